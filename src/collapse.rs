use std::collections::HashSet;

use crate::tree_item::{NodeKind, TreeItem};

/// Children containers to collapse when a freshly built tree is shown for the first time.
///
/// Walks every item that has children and collects its identifier path, skipping
/// top level items and [`NodeKind::Video`] items. Leaves have no children
/// container and are never part of the result.
///
/// Pure function of the tree structure: collapsed/expanded state plays no role here.
#[must_use]
pub fn initial_collapsed<Identifier>(items: &[TreeItem<'_, Identifier>]) -> HashSet<Vec<Identifier>>
where
    Identifier: Clone + PartialEq + Eq + core::hash::Hash,
{
    let mut result = HashSet::new();
    recurse(items, &[], &mut result);
    result
}

fn recurse<Identifier>(
    items: &[TreeItem<'_, Identifier>],
    current: &[Identifier],
    result: &mut HashSet<Vec<Identifier>>,
) where
    Identifier: Clone + PartialEq + Eq + core::hash::Hash,
{
    for item in items {
        if item.children.is_empty() {
            continue;
        }

        let mut child_identifier = current.to_vec();
        child_identifier.push(item.identifier.clone());

        let top_level = child_identifier.len() < 2;
        if !top_level && item.kind != NodeKind::Video {
            result.insert(child_identifier.clone());
        }

        recurse(&item.children, &child_identifier, result);
    }
}

#[test]
fn example_collapses_exactly_the_chapters() {
    let collapsed = initial_collapsed(&TreeItem::example());
    let mut expected = HashSet::new();
    expected.insert(vec!["talk", "intro"]);
    expected.insert(vec!["talk", "ownership"]);
    assert_eq!(collapsed, expected);
}

#[test]
fn top_level_containers_stay_expanded() {
    let items = vec![
        TreeItem::new("a", "Alfa", vec![TreeItem::new_leaf("b", "Bravo")]).unwrap(),
        TreeItem::new_leaf("c", "Charlie"),
    ];
    assert!(initial_collapsed(&items).is_empty());
}

#[test]
fn video_containers_stay_expanded_at_any_depth() {
    let video = TreeItem::new(
        "v",
        "Nested video",
        vec![
            TreeItem::new("c", "Chapter", vec![TreeItem::new_leaf("s", "Segment")]).unwrap()
        ],
    )
    .unwrap()
    .kind(NodeKind::Video);
    let items = vec![TreeItem::new("top", "Top", vec![video]).unwrap()];

    let collapsed = initial_collapsed(&items);
    let mut expected = HashSet::new();
    expected.insert(vec!["top", "v", "c"]);
    assert_eq!(collapsed, expected);
}

#[test]
fn leaves_are_never_collapsed() {
    let items = vec![
        TreeItem::new_leaf("a", "Alfa"),
        TreeItem::new_leaf("b", "Bravo"),
    ];
    assert!(initial_collapsed(&items).is_empty());
}
