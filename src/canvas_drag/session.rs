use egui::{Pos2, Vec2};

use super::overlay::OverlayId;
use super::types::GesturePhase;

/// Everything known about the drag in progress. Lives exactly as long as the gesture is not idle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession<N> {
    pub id: u64,

    /// The items host that holds pointer capture for this session.
    pub container: N,

    /// The item root being moved.
    pub item: N,

    /// Container-relative pointer position of the press.
    pub press_point: Pos2,

    /// The item's `(left, top)` before the drag.
    pub pre_drag_position: Pos2,

    /// Pointer displacement since the press, in container units.
    pub offset: Vec2,
}

impl<N> DragSession<N> {
    /// Where the item ends up if the session is committed now.
    pub fn target_position(&self) -> Pos2 {
        super::geometry::committed_position(self.pre_drag_position, self.offset)
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) enum GestureState<N> {
    Idle,
    Armed(DragSession<N>),
    Dragging {
        session: DragSession<N>,
        overlay: OverlayId,
        hid_original: bool,
    },
}

impl<N> Default for GestureState<N> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<N> GestureState<N> {
    pub(super) fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Armed(_) => GesturePhase::Armed,
            Self::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    pub(super) fn session(&self) -> Option<&DragSession<N>> {
        match self {
            Self::Idle => None,
            Self::Armed(session) | Self::Dragging { session, .. } => Some(session),
        }
    }

    pub(super) fn overlay(&self) -> Option<OverlayId> {
        match self {
            Self::Dragging { overlay, .. } => Some(*overlay),
            _ => None,
        }
    }
}
