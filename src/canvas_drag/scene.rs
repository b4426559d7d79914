//! A small retained visual tree that implements every collaborator trait of the controller.
//!
//! Hosts that already own a hierarchy implement [`VisualTree`], [`LayoutTree`] and [`ItemStore`]
//! themselves; `Scene` is what the demo and the tests drive, and a ready-made surface for apps
//! that only need a canvas of labelled boxes.

use egui::{Pos2, Rect, Vec2};

use super::commit::{CanvasItem, ItemStore};
use super::locate::{VisualTree, find_items_host};
use super::types::LayoutTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Borders, scroll viewers and other wrappers.
    Chrome,

    /// Generates one child per item; its own child is the items host.
    ItemsPresenter,

    /// A layout panel.
    Panel,

    /// Anything that renders content.
    Visual,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub role: NodeRole,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    /// Top-left relative to the parent's content origin.
    pub offset: Vec2,
    pub size: Vec2,

    /// Content scroll: children are shifted by `-scroll`.
    pub scroll: Vec2,
    pub visible: bool,
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    /// A scene with a single root [`NodeRole::Chrome`] node covering `rect`.
    pub fn new(rect: Rect) -> Self {
        Self {
            nodes: vec![SceneNode {
                role: NodeRole::Chrome,
                parent: None,
                children: Vec::new(),
                offset: rect.min.to_vec2(),
                size: rect.size(),
                scroll: Vec2::ZERO,
                visible: true,
                label: None,
            }],
        }
    }

    /// The usual wrapped hierarchy of an items control laid out on a canvas:
    ///
    /// ```text
    /// border (Chrome)
    /// └─ scroll viewer (Chrome)
    ///    └─ items presenter (ItemsPresenter)
    ///       └─ canvas (Panel)            <- items host
    ///          └─ item root (Visual)     one per item, at (left, top)
    ///             └─ content (Visual)
    /// ```
    pub fn canvas(rect: Rect, items: &[CanvasItem], item_size: Vec2) -> Self {
        const BORDER: f32 = 1.0;

        let mut scene = Self::new(rect);
        let inner = (rect.size() - Vec2::splat(2.0 * BORDER)).max(Vec2::ZERO);
        let viewer = scene.add_node(scene.root(), NodeRole::Chrome, Vec2::splat(BORDER), inner);
        let presenter = scene.add_node(viewer, NodeRole::ItemsPresenter, Vec2::ZERO, inner);
        let canvas = scene.add_node(presenter, NodeRole::Panel, Vec2::ZERO, inner);

        for item in items {
            let root = scene.add_node(
                canvas,
                NodeRole::Visual,
                item.position().to_vec2(),
                item_size,
            );
            scene.set_label(root, item.name.clone());
            scene.add_node(root, NodeRole::Visual, Vec2::ZERO, item_size);
        }

        scene
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a child to `parent`, on top of its existing children.
    ///
    /// # Panics
    /// If `parent` does not belong to this scene.
    pub fn add_node(&mut self, parent: NodeId, role: NodeRole, offset: Vec2, size: Vec2) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(SceneNode {
            role,
            parent: Some(parent),
            children: Vec::new(),
            offset,
            size,
            scroll: Vec2::ZERO,
            visible: true,
            label: None,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.label = Some(label.into());
        }
    }

    pub fn set_scroll(&mut self, id: NodeId, scroll: Vec2) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.scroll = scroll;
        }
    }

    /// Moves and resizes the root, e.g. to follow the rect egui allocated for the canvas this frame.
    pub fn set_root_rect(&mut self, rect: Rect) {
        let root = &mut self.nodes[0];
        root.offset = rect.min.to_vec2();
        root.size = rect.size();
    }

    pub fn global_origin(&self, id: NodeId) -> Option<Pos2> {
        let node = self.nodes.get(id.0)?;
        match node.parent {
            None => Some(node.offset.to_pos2()),
            Some(parent) => {
                let scroll = self.nodes.get(parent.0)?.scroll;
                Some(self.global_origin(parent)? + node.offset - scroll)
            }
        }
    }

    pub fn global_rect(&self, id: NodeId) -> Option<Rect> {
        let size = self.nodes.get(id.0)?.size;
        Some(Rect::from_min_size(self.global_origin(id)?, size))
    }

    /// The deepest visible node under `pos`, preferring later (top-most) siblings.
    ///
    /// A node is only searched if its own rectangle contains `pos`, so children outside their
    /// parent are clipped away.
    pub fn hit_test(&self, pos: Pos2) -> Option<NodeId> {
        self.hit_test_from(self.root(), pos)
    }

    fn hit_test_from(&self, id: NodeId, pos: Pos2) -> Option<NodeId> {
        let node = self.nodes.get(id.0)?;
        if !node.visible || !self.global_rect(id)?.contains(pos) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test_from(child, pos))
            .or(Some(id))
    }

    /// Item roots in paint order.
    pub fn item_roots(&self) -> Vec<NodeId> {
        find_items_host(self, self.root())
            .map(|host| self.children(host).collect())
            .unwrap_or_default()
    }

    pub fn item_by_name(&self, name: &str) -> Option<NodeId> {
        self.item_roots()
            .into_iter()
            .find(|&id| self.label(id) == Some(name))
    }

    /// Snapshot of the items as the backing collection would see them.
    pub fn items(&self) -> Vec<CanvasItem> {
        self.item_roots()
            .into_iter()
            .filter_map(|id| {
                let node = self.nodes.get(id.0)?;
                Some(CanvasItem::new(
                    node.label.clone().unwrap_or_default(),
                    node.offset.x,
                    node.offset.y,
                ))
            })
            .collect()
    }
}

impl VisualTree for Scene {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node.0)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    fn is_items_host(&self, node: NodeId) -> bool {
        self.parent(node)
            .and_then(|parent| self.nodes.get(parent.0))
            .is_some_and(|parent| parent.role == NodeRole::ItemsPresenter)
    }
}

impl LayoutTree for Scene {
    fn origin(&self, node: NodeId) -> Pos2 {
        self.global_origin(node).unwrap_or(Pos2::ZERO)
    }

    fn offset(&self, node: NodeId) -> Vec2 {
        self.nodes.get(node.0).map_or(Vec2::ZERO, |n| n.offset)
    }

    fn size(&self, node: NodeId) -> Vec2 {
        self.nodes.get(node.0).map_or(Vec2::ZERO, |n| n.size)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.visible = visible;
        }
    }

    fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0)?.label.as_deref()
    }
}

impl ItemStore<NodeId> for Scene {
    fn set_position(&mut self, item: NodeId, position: Pos2) {
        if let Some(node) = self.nodes.get_mut(item.0) {
            node.offset = position.to_vec2();
        }
    }
}
