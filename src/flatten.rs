use std::collections::HashSet;

use crate::tree_item::TreeItem;

/// One visible [`TreeItem`] in render order.
///
/// Generated via [`TreeState::flatten`](crate::TreeState::flatten).
#[derive(Debug)]
pub struct Flattened<'a, Identifier> {
    pub identifier: Vec<Identifier>,
    pub item: &'a TreeItem<'a, Identifier>,
}

impl<Identifier> Flattened<'_, Identifier> {
    /// Zero based depth. Depth 0 means top level with 0 indentation.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.identifier.len() - 1
    }
}

/// Get a flat list of all visible [`TreeItem`]s.
///
/// Recurses into every children container whose identifier is not in the
/// `collapsed` set. The top level is always visible.
///
/// `current` starts empty: `&[]`
#[must_use]
pub fn flatten<'a, Identifier>(
    collapsed: &HashSet<Vec<Identifier>>,
    items: &'a [TreeItem<'a, Identifier>],
    current: &[Identifier],
) -> Vec<Flattened<'a, Identifier>>
where
    Identifier: Clone + PartialEq + Eq + core::hash::Hash,
{
    let mut result = Vec::new();
    for item in items {
        let mut child_identifier = current.to_vec();
        child_identifier.push(item.identifier.clone());

        let child_result = (!collapsed.contains(&child_identifier))
            .then(|| flatten(collapsed, &item.children, &child_identifier));

        result.push(Flattened {
            identifier: child_identifier,
            item,
        });

        if let Some(mut child_result) = child_result {
            result.append(&mut child_result);
        }
    }
    result
}

#[test]
fn depth_works() {
    let mut collapsed = HashSet::new();
    collapsed.insert(vec!["talk", "intro"]);
    let depths = flatten(&collapsed, &TreeItem::example(), &[])
        .into_iter()
        .map(|flattened| flattened.depth())
        .collect::<Vec<_>>();
    assert_eq!(depths, [0, 1, 1, 2, 2, 1]);
}

#[cfg(test)]
fn flatten_works(collapsed: &HashSet<Vec<&'static str>>, expected: &[&str]) {
    let items = TreeItem::example();
    let result = flatten(collapsed, &items, &[]);
    let actual = result
        .into_iter()
        .map(|flattened| flattened.identifier.into_iter().last().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

#[test]
fn flatten_nothing_collapsed_shows_all() {
    let collapsed = HashSet::new();
    flatten_works(
        &collapsed,
        &[
            "talk",
            "intro",
            "hook",
            "agenda",
            "ownership",
            "moves",
            "borrows",
            "outro",
        ],
    );
}

#[test]
fn flatten_wrong_collapsed_changes_nothing() {
    let mut collapsed = HashSet::new();
    collapsed.insert(vec!["intro"]);
    collapsed.insert(vec!["ownership", "moves"]);
    flatten_works(
        &collapsed,
        &[
            "talk",
            "intro",
            "hook",
            "agenda",
            "ownership",
            "moves",
            "borrows",
            "outro",
        ],
    );
}

#[test]
fn flatten_collapsed_chapter_hides_its_segments() {
    let mut collapsed = HashSet::new();
    collapsed.insert(vec!["talk", "intro"]);
    flatten_works(
        &collapsed,
        &["talk", "intro", "ownership", "moves", "borrows", "outro"],
    );
}

#[test]
fn flatten_collapsed_root_shows_only_root() {
    let mut collapsed = HashSet::new();
    collapsed.insert(vec!["talk"]);
    flatten_works(&collapsed, &["talk"]);
}
