use std::collections::HashSet;

use crate::collapse::initial_collapsed;
use crate::flatten::{flatten, Flattened};
use crate::tree_item::TreeItem;

/// Keeps the state of what is currently selected and what was collapsed in a [`Tree`](crate::Tree).
///
/// Children containers are expanded by default: only the identifiers in the
/// collapsed set hide their children. Use [`collapse_initial`](Self::collapse_initial)
/// once after building the tree to start with everything below the first level
/// folded away.
///
/// The generic argument `Identifier` is used to keep the state like the currently selected or collapsed [`TreeItem`]s in the [`TreeState`].
/// For more information see [`TreeItem`].
///
/// # Example
///
/// ```
/// # use video_index_tree::TreeState;
/// type Identifier = usize;
///
/// let mut state = TreeState::<Identifier>::default();
/// ```
#[derive(Debug, Default, Clone)]
pub struct TreeState<Identifier> {
    pub(super) offset: usize,
    pub(super) collapsed: HashSet<Vec<Identifier>>,
    pub(super) selected: Vec<Identifier>,
    pub(super) ensure_selected_in_view_on_next_render: bool,
}

impl<Identifier> TreeState<Identifier>
where
    Identifier: Clone + PartialEq + Eq + core::hash::Hash,
{
    #[must_use]
    pub const fn get_offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn get_all_collapsed(&self) -> Vec<Vec<Identifier>> {
        self.collapsed.iter().cloned().collect()
    }

    /// Get a flat list of all visible (= not below collapsed) [`TreeItem`]s with this `TreeState`.
    #[must_use]
    pub fn flatten<'a>(
        &self,
        items: &'a [TreeItem<'a, Identifier>],
    ) -> Vec<Flattened<'a, Identifier>> {
        flatten(&self.collapsed, items, &[])
    }

    #[must_use]
    pub fn selected(&self) -> Vec<Identifier> {
        self.selected.clone()
    }

    /// Selects the given identifier.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// Clear the selection by passing an empty identifier vector:
    ///
    /// ```rust
    /// # use video_index_tree::TreeState;
    /// # let mut state = TreeState::<usize>::default();
    /// state.select(Vec::new());
    /// ```
    pub fn select(&mut self, identifier: Vec<Identifier>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let changed = self.selected != identifier;
        self.selected = identifier;
        changed
    }

    /// Collapse the children container of a tree node.
    /// Returns `true` if the container was expanded and has been collapsed.
    /// Returns `false` if the container was already collapsed.
    pub fn collapse(&mut self, identifier: Vec<Identifier>) -> bool {
        if identifier.is_empty() {
            false
        } else {
            self.collapsed.insert(identifier)
        }
    }

    /// Expand the children container of a tree node.
    /// Returns `true` if the container was collapsed and has been expanded.
    /// Returns `false` if the container was already expanded.
    pub fn expand(&mut self, identifier: &[Identifier]) -> bool {
        self.collapsed.remove(identifier)
    }

    /// Toggles the children container of the given node between collapsed and expanded.
    /// The disclosure glyph in front of the node follows on the next render.
    ///
    /// The identifier has to resolve to an item in `items` that has children.
    /// When it does not (there is no such node, or no children container below it)
    /// nothing changes and the call returns `false`.
    ///
    /// Two calls with the same identifier restore the original state.
    pub fn toggle(&mut self, items: &[TreeItem<Identifier>], identifier: Vec<Identifier>) -> bool {
        let has_children = resolve_item(items, &identifier)
            .is_some_and(|item| !item.children.is_empty());
        if !has_children {
            return false;
        }

        if self.collapsed.contains(&identifier) {
            self.expand(&identifier)
        } else {
            self.collapse(identifier)
        }
    }

    /// Toggles the currently selected tree node.
    /// See also [`toggle`](Self::toggle)
    ///
    /// Returns `true` when a container was collapsed / expanded.
    pub fn toggle_selected(&mut self, items: &[TreeItem<Identifier>]) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        self.toggle(items, self.selected())
    }

    /// Applies the initial collapsed state for a freshly built tree.
    ///
    /// Every children container below the first level is collapsed, except the
    /// containers of [`NodeKind::Video`](crate::NodeKind::Video) nodes: first
    /// level containers and video containers stay expanded.
    ///
    /// The resulting collapsed set is a pure function of the tree structure.
    /// Prior [`toggle`](Self::toggle) calls do not influence it and applying it
    /// again yields the same set.
    pub fn collapse_initial(&mut self, items: &[TreeItem<Identifier>]) {
        self.collapsed = initial_collapsed(items);
    }

    /// Expands all collapsed containers.
    ///
    /// Returns `true` when any container was expanded.
    pub fn expand_all(&mut self) -> bool {
        if self.collapsed.is_empty() {
            false
        } else {
            self.collapsed.clear();
            true
        }
    }

    /// Select the first node.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_first(&mut self, items: &[TreeItem<Identifier>]) -> bool {
        let identifier = items
            .first()
            .map_or(Vec::new(), |item| vec![item.identifier.clone()]);
        self.select(identifier)
    }

    /// Select the last visible node.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_last(&mut self, items: &[TreeItem<Identifier>]) -> bool {
        let visible = self.flatten(items);
        let new_identifier = visible
            .into_iter()
            .last()
            .map_or(Vec::new(), |flattened| flattened.identifier);
        self.select(new_identifier)
    }

    /// Select the node visible on the given index.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// This can be useful for mouse clicks.
    pub fn select_visible_index(
        &mut self,
        items: &[TreeItem<Identifier>],
        new_index: usize,
    ) -> bool {
        let visible = self.flatten(items);
        let new_index = new_index.min(visible.len().saturating_sub(1));
        let new_identifier = visible
            .into_iter()
            .nth(new_index)
            .map_or(Vec::new(), |flattened| flattened.identifier);
        self.select(new_identifier)
    }

    /// Move the current selection with the direction/amount by the given function.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// # Example
    ///
    /// ```
    /// # use video_index_tree::TreeState;
    /// # let items = vec![];
    /// # type Identifier = usize;
    /// # let mut state = TreeState::<Identifier>::default();
    /// // Move the selection one down
    /// state.select_visible_relative(&items, |current| {
    ///     current.map_or(0, |current| current.saturating_add(1))
    /// });
    /// ```
    ///
    /// For more examples take a look into the source code of [`key_up`](Self::key_up) or [`key_down`](Self::key_down).
    /// They are implemented with this method.
    pub fn select_visible_relative<F>(
        &mut self,
        items: &[TreeItem<Identifier>],
        change_function: F,
    ) -> bool
    where
        F: FnOnce(Option<usize>) -> usize,
    {
        let visible = self.flatten(items);
        let current_identifier = self.selected();
        let current_index = visible
            .iter()
            .position(|flattened| flattened.identifier == current_identifier);
        let new_index = change_function(current_index).min(visible.len().saturating_sub(1));
        let new_identifier = visible
            .into_iter()
            .nth(new_index)
            .map_or(Vec::new(), |flattened| flattened.identifier);
        self.select(new_identifier)
    }

    /// Ensure the selected [`TreeItem`] is visible on next render
    pub fn scroll_selected_into_view(&mut self) {
        self.ensure_selected_in_view_on_next_render = true;
    }

    /// Scroll the specified amount of lines up
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        before != self.offset
    }

    /// Scroll the specified amount of lines down
    ///
    /// In contrast to [`scroll_up()`](Self::scroll_up) this can not return whether the view position changed or not as the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.offset = self.offset.saturating_add(lines);
        true
    }

    /// Handles the up arrow key.
    /// Moves up in the current depth or to its parent.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_up(&mut self, items: &[TreeItem<Identifier>]) -> bool {
        self.select_visible_relative(items, |current| {
            current.map_or(usize::MAX, |current| current.saturating_sub(1))
        })
    }

    /// Handles the down arrow key.
    /// Moves down in the current depth or into a child node.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_down(&mut self, items: &[TreeItem<Identifier>]) -> bool {
        self.select_visible_relative(items, |current| {
            current.map_or(0, |current| current.saturating_add(1))
        })
    }

    /// Handles the left arrow key.
    /// Collapses the currently selected or moves to its parent.
    ///
    /// Returns `true` when the selection or the collapsed state changed.
    pub fn key_left(&mut self, items: &[TreeItem<Identifier>]) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let can_collapse = resolve_item(items, &self.selected)
            .is_some_and(|item| !item.children.is_empty())
            && !self.collapsed.contains(&self.selected);
        if can_collapse {
            self.collapsed.insert(self.selected.clone())
        } else {
            // Select the parent by removing the leaf from selection
            self.selected.pop().is_some()
        }
    }

    /// Handles the right arrow key.
    /// Expands the currently selected.
    ///
    /// Returns `true` if the container was collapsed and has been expanded.
    /// Returns `false` if the container was already expanded.
    pub fn key_right(&mut self) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        self.expand(&self.selected())
    }
}

/// Follow the identifier path through the items, one sibling level per element.
fn resolve_item<'a, Identifier>(
    items: &'a [TreeItem<'a, Identifier>],
    identifier: &[Identifier],
) -> Option<&'a TreeItem<'a, Identifier>>
where
    Identifier: PartialEq,
{
    let (head, rest) = identifier.split_first()?;
    let item = items.iter().find(|item| item.identifier == *head)?;
    if rest.is_empty() {
        Some(item)
    } else {
        resolve_item(&item.children, rest)
    }
}

#[cfg(test)]
use crate::tree_item::NodeKind;

#[cfg(test)]
fn scenario_items() -> Vec<TreeItem<'static, &'static str>> {
    vec![TreeItem::new(
        "r1",
        "First level",
        vec![
            TreeItem::new("r2", "Second level", vec![TreeItem::new_leaf("s", "Leaf")]).unwrap(),
            TreeItem::new("r3", "Second level video", vec![TreeItem::new_leaf("t", "Leaf")])
                .unwrap()
                .kind(NodeKind::Video),
        ],
    )
    .unwrap()]
}

#[test]
fn toggle_twice_restores_the_original_state() {
    let items = TreeItem::example();
    let mut state = TreeState::default();
    let before = state.collapsed.clone();

    assert!(state.toggle(&items, vec!["talk", "intro"]));
    assert!(state.collapsed.contains(&vec!["talk", "intro"]));
    assert!(state.toggle(&items, vec!["talk", "intro"]));
    assert_eq!(state.collapsed, before);
}

#[test]
fn toggle_unknown_identifier_is_a_no_op() {
    let items = TreeItem::example();
    let mut state = TreeState::default();
    assert!(!state.toggle(&items, vec!["talk", "bogus"]));
    assert!(!state.toggle(&items, vec!["intro"]));
    assert!(state.collapsed.is_empty());
}

#[test]
fn toggle_leaf_is_a_no_op() {
    let items = TreeItem::example();
    let mut state = TreeState::default();
    assert!(!state.toggle(&items, vec!["talk", "outro"]));
    assert!(state.collapsed.is_empty());
}

#[test]
fn toggle_empty_identifier_is_a_no_op() {
    let items = TreeItem::example();
    let mut state = TreeState::default();
    assert!(!state.toggle(&items, Vec::new()));
    assert!(state.collapsed.is_empty());
}

#[test]
fn initial_collapse_keeps_first_level_and_video_containers_expanded() {
    let items = scenario_items();
    let mut state = TreeState::default();
    state.collapse_initial(&items);

    assert!(!state.collapsed.contains(&vec!["r1"]));
    assert!(state.collapsed.contains(&vec!["r1", "r2"]));
    assert!(!state.collapsed.contains(&vec!["r1", "r3"]));
    assert_eq!(state.collapsed.len(), 1);
}

#[test]
fn initial_collapse_ignores_prior_toggles() {
    let items = scenario_items();

    let mut toggled = TreeState::default();
    toggled.toggle(&items, vec!["r1"]);
    toggled.toggle(&items, vec!["r1", "r2"]);
    toggled.collapse_initial(&items);

    let mut untouched = TreeState::default();
    untouched.collapse_initial(&items);

    assert_eq!(toggled.collapsed, untouched.collapsed);
}

#[test]
fn initial_collapse_is_idempotent() {
    let items = scenario_items();
    let mut state = TreeState::default();
    state.collapse_initial(&items);
    let first = state.collapsed.clone();
    state.collapse_initial(&items);
    assert_eq!(state.collapsed, first);
}

#[test]
fn expand_all_clears_the_collapsed_set() {
    let items = TreeItem::example();
    let mut state = TreeState::default();
    assert!(!state.expand_all());
    state.collapse_initial(&items);
    assert!(state.expand_all());
    assert!(state.collapsed.is_empty());
}
