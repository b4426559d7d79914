use egui::{Painter, Rect, Vec2};

use super::geometry::overlay_rect;
use super::ghost::{GhostVisual, OverlaySource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

/// Floating proxy of a dragged item.
///
/// The overlay rides on the item's rectangle and is translated from there: writing either offset
/// moves [`Self::rect`] and raises a repaint request, nothing else is laid out. When the item's
/// projection changes under it (the container scrolled or moved), the owner re-anchors it with
/// [`Self::set_base_rect`].
#[derive(Clone, Debug)]
pub struct Overlay<N> {
    adorned: N,
    base_rect: Rect,
    left_offset: f32,
    top_offset: f32,
    visual: GhostVisual,
    repaint_requested: bool,
}

impl<N: Copy> Overlay<N> {
    pub fn new(adorned: N, source: &OverlaySource<'_>, visual: GhostVisual) -> Self {
        Self {
            adorned,
            base_rect: source.rect,
            left_offset: 0.0,
            top_offset: 0.0,
            visual,
            repaint_requested: true,
        }
    }

    pub fn adorned(&self) -> N {
        self.adorned
    }

    pub fn visual(&self) -> &GhostVisual {
        &self.visual
    }

    pub fn base_rect(&self) -> Rect {
        self.base_rect
    }

    /// Re-anchors the overlay on the adorned item's current screen rectangle.
    pub fn set_base_rect(&mut self, rect: Rect) {
        if self.base_rect != rect {
            self.base_rect = rect;
            self.repaint_requested = true;
        }
    }

    pub fn left_offset(&self) -> f32 {
        self.left_offset
    }

    pub fn top_offset(&self) -> f32 {
        self.top_offset
    }

    pub fn set_left_offset(&mut self, left: f32) {
        self.left_offset = left;
        self.repaint_requested = true;
    }

    pub fn set_top_offset(&mut self, top: f32) {
        self.top_offset = top;
        self.repaint_requested = true;
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.set_left_offset(offset.x);
        self.set_top_offset(offset.y);
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.left_offset, self.top_offset)
    }

    /// Current screen rectangle: the base layout rectangle translated by the offset.
    pub fn rect(&self) -> Rect {
        overlay_rect(self.base_rect, self.offset())
    }

    /// Returns whether the overlay changed since the last call, and clears the flag.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    pub fn paint(&self, painter: &Painter, time: f64) {
        self.visual.paint(painter, self.rect(), time);
    }
}

/// The compositing layer overlays live in. It is painted after (above) the container's children.
#[derive(Debug)]
pub struct OverlayLayer<N> {
    next_id: u64,
    overlays: Vec<(OverlayId, Overlay<N>)>,
}

impl<N> Default for OverlayLayer<N> {
    fn default() -> Self {
        Self {
            next_id: 1,
            overlays: Vec::new(),
        }
    }
}

impl<N: Copy> OverlayLayer<N> {
    pub fn add(&mut self, overlay: Overlay<N>) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.overlays.push((id, overlay));
        id
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay<N>> {
        let index = self.overlays.iter().position(|(oid, _)| *oid == id)?;
        Some(self.overlays.remove(index).1)
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay<N>> {
        self.overlays
            .iter()
            .find_map(|(oid, overlay)| (*oid == id).then_some(overlay))
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut Overlay<N>> {
        self.overlays
            .iter_mut()
            .find_map(|(oid, overlay)| (*oid == id).then_some(overlay))
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay<N>> + '_ {
        self.overlays.iter().map(|(_, overlay)| overlay)
    }

    /// True while any overlay animates on its own and needs continuous repaints.
    pub fn is_animating(&self) -> bool {
        self.iter().any(|overlay| overlay.visual().pulse().is_some())
    }

    /// Drains the per-overlay repaint flags; true if any overlay moved or was added.
    pub fn take_repaint_requests(&mut self) -> bool {
        self.overlays
            .iter_mut()
            .fold(false, |any, (_, overlay)| overlay.take_repaint_request() || any)
    }

    pub fn paint(&self, painter: &Painter, time: f64) {
        for overlay in self.iter() {
            overlay.paint(painter, time);
        }
    }
}
