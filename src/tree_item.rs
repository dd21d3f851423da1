use std::collections::HashSet;

use ratatui::style::Style;
use ratatui::text::Text;

/// Classification of a [`TreeItem`].
///
/// A video index distinguishes three kinds of entries and the kind decides how an
/// entry takes part in [`TreeState::collapse_initial`](crate::TreeState::collapse_initial):
/// the children of a [`Video`](Self::Video) entry are never collapsed by the
/// initial pass, no matter how deep the entry sits in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The analysed video itself. Its children stay expanded.
    Video,
    /// A major division of the video, usually holding segments.
    Chapter,
    /// An atomic content unit, usually a leaf.
    Segment,
}

/// One entry inside a [`Tree`](crate::Tree).
///
/// Can have zero or more `children`, which form the entry's children container:
/// the region below it that collapsing hides and expanding shows again.
///
/// # Identifier
///
/// The generic argument `Identifier` is used to keep the state like the currently selected or collapsed [`TreeItem`]s in the [`TreeState`](crate::TreeState).
///
/// It needs to be unique among its siblings but can be used again on parent or child [`TreeItem`]s.
/// The entries built from a [`VideoIndex`](crate::VideoIndex) use the time range an entry
/// covers as its identifier, which is unique among siblings as segments never overlap.
///
/// The `text` can be different from its `identifier`: what is rendered carries
/// icons and time badges while the identifier stays stable across re-renders.
///
/// # Example
///
/// ```
/// # use video_index_tree::TreeItem;
/// let a = TreeItem::new_leaf("questions", "Q&A");
/// let b = TreeItem::new("closing", "Closing", vec![a])?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeItem<'a, Identifier> {
    pub(super) identifier: Identifier,
    pub(super) text: Text<'a>,
    pub(super) style: Style,
    pub(super) kind: NodeKind,
    pub(super) children: Vec<TreeItem<'a, Identifier>>,
}

impl<'a, Identifier> TreeItem<'a, Identifier>
where
    Identifier: Clone + PartialEq + Eq + core::hash::Hash,
{
    /// Create a new `TreeItem` without children.
    ///
    /// Starts out as a [`NodeKind::Segment`]; override with [`kind`](Self::kind).
    #[must_use]
    pub fn new_leaf<T>(identifier: Identifier, text: T) -> Self
    where
        T: Into<Text<'a>>,
    {
        Self {
            identifier,
            text: text.into(),
            style: Style::new(),
            kind: NodeKind::Segment,
            children: Vec::new(),
        }
    }

    /// Create a new `TreeItem` with children.
    ///
    /// Starts out as a [`NodeKind::Chapter`]; override with [`kind`](Self::kind).
    ///
    /// # Errors
    ///
    /// Errors when there are duplicate identifiers in the children.
    pub fn new<T>(
        identifier: Identifier,
        text: T,
        children: Vec<TreeItem<'a, Identifier>>,
    ) -> std::io::Result<Self>
    where
        T: Into<Text<'a>>,
    {
        let identifiers = children
            .iter()
            .map(|item| &item.identifier)
            .collect::<HashSet<_>>();
        if identifiers.len() != children.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "The children contain duplicate identifiers",
            ));
        }

        Ok(Self {
            identifier,
            text: text.into(),
            style: Style::new(),
            kind: NodeKind::Chapter,
            children,
        })
    }

    #[must_use]
    pub fn children(&self) -> &[TreeItem<Identifier>] {
        &self.children
    }

    /// Get a reference to a child by index.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Get a mutable reference to a child by index.
    ///
    /// When you choose to change the `identifier` the [`TreeState`](crate::TreeState) might not work as expected afterwards.
    #[must_use]
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.children.get_mut(index)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.text.height()
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a child to the `TreeItem`.
    ///
    /// # Errors
    ///
    /// Errors when the `identifier` of the `child` already exists in the children.
    pub fn add_child(&mut self, child: TreeItem<'a, Identifier>) -> std::io::Result<()> {
        let existing = self
            .children
            .iter()
            .map(|item| &item.identifier)
            .collect::<HashSet<_>>();
        if existing.contains(&child.identifier) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "identifier already exists in the children",
            ));
        }

        self.children.push(child);
        Ok(())
    }
}

#[cfg(test)]
impl TreeItem<'static, &'static str> {
    pub(crate) fn example() -> Vec<Self> {
        vec![Self::new(
            "talk",
            "Rust in Production",
            vec![
                Self::new(
                    "intro",
                    "Introduction",
                    vec![
                        Self::new_leaf("hook", "Opening hook"),
                        Self::new_leaf("agenda", "Agenda"),
                    ],
                )
                .expect("all item identifiers are unique"),
                Self::new(
                    "ownership",
                    "Ownership deep dive",
                    vec![
                        Self::new_leaf("moves", "Move semantics"),
                        Self::new_leaf("borrows", "Borrowing"),
                    ],
                )
                .expect("all item identifiers are unique"),
                Self::new_leaf("outro", "Closing remarks"),
            ],
        )
        .expect("all item identifiers are unique")
        .kind(NodeKind::Video)]
    }
}

#[test]
#[should_panic = "duplicate identifiers"]
fn tree_item_new_errors_with_duplicate_identifiers() {
    let item = TreeItem::new_leaf("same", "text");
    let another = item.clone();
    TreeItem::new("root", "Root", vec![item, another]).unwrap();
}

#[test]
#[should_panic = "identifier already exists"]
fn tree_item_add_child_errors_with_duplicate_identifiers() {
    let item = TreeItem::new_leaf("same", "text");
    let another = item.clone();
    let mut root = TreeItem::new("root", "Root", vec![item]).unwrap();
    root.add_child(another).unwrap();
}
