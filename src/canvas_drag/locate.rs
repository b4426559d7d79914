//! Resolving the drop surface and the dragged item root inside a wrapped visual hierarchy.

use std::fmt::Debug;

/// Read-only navigation over a visual hierarchy.
///
/// Nothing here is tied to a particular node type: the reference [`super::Scene`] implements it,
/// and so can any retained-mode tree a host already has.
pub trait VisualTree {
    type Node: Copy + Eq + Debug;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children in paint order (first child is painted first, i.e. bottom-most).
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Whether `node` is the surface that directly lays out individually rendered items,
    /// as opposed to chrome or wrapper nodes around it.
    fn is_items_host(&self, node: Self::Node) -> bool;
}

/// Depth-first, pre-order search over the descendants of `root` (`root` itself is not tested).
///
/// Children are visited in the order [`VisualTree::children`] yields them, so the result is
/// deterministic: the first match in that order wins.
pub fn find_descendant<T: VisualTree>(
    tree: &T,
    root: T::Node,
    mut predicate: impl FnMut(T::Node) -> bool,
) -> Option<T::Node> {
    fn visit<T: VisualTree>(
        tree: &T,
        node: T::Node,
        predicate: &mut impl FnMut(T::Node) -> bool,
    ) -> Option<T::Node> {
        for child in tree.children(node) {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = visit(tree, child, predicate) {
                return Some(found);
            }
        }
        None
    }

    visit(tree, root, &mut predicate)
}

/// Walks from `node` towards the root and returns the first node (including `node`) that matches.
pub fn find_ancestor_or_self<T: VisualTree>(
    tree: &T,
    node: T::Node,
    mut predicate: impl FnMut(T::Node) -> bool,
) -> Option<T::Node> {
    std::iter::successors(Some(node), |&n| tree.parent(n)).find(|&n| predicate(n))
}

/// The first items host below `root`.
pub fn find_items_host<T: VisualTree>(tree: &T, root: T::Node) -> Option<T::Node> {
    find_descendant(tree, root, |node| tree.is_items_host(node))
}

/// The top-level visual of the item that `source` belongs to: the nearest ancestor-or-self of
/// `source` whose parent is `container`.
///
/// `None` when `source` is the container itself or lies outside it.
pub fn find_item_root<T: VisualTree>(
    tree: &T,
    source: T::Node,
    container: T::Node,
) -> Option<T::Node> {
    if source == container {
        return None;
    }
    find_ancestor_or_self(tree, source, |node| tree.parent(node) == Some(container))
}
