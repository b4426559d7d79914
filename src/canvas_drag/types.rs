use egui::{Pos2, Vec2};

use super::locate::VisualTree;

/// Layout facts the controller needs about the hierarchy it drags in.
pub trait LayoutTree: VisualTree {
    /// Screen-space position of the node's top-left corner, after every ancestor offset and scroll.
    fn origin(&self, node: Self::Node) -> Pos2;

    /// Layout offset of the node inside its parent (for an item root: its stored `(left, top)`).
    fn offset(&self, node: Self::Node) -> Vec2;

    /// Rendered size.
    fn size(&self, node: Self::Node) -> Vec2;

    fn set_visible(&mut self, node: Self::Node, visible: bool);

    /// Human readable name, used by mirroring ghosts and the debug log.
    fn label(&self, _node: Self::Node) -> Option<&str> {
        None
    }
}

/// One input event as seen by the controller. Positions are in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragInput<N> {
    /// Primary button pressed over `source`, the deepest node under the pointer.
    PointerDown { pos: Pos2, source: N },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2 },

    /// Explicit abort (Escape).
    Cancel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    #[default]
    Idle,

    /// Pointer is down on an item but has not moved past the threshold yet.
    Armed,

    /// Threshold exceeded; the ghost overlay is live.
    Dragging,
}

/// Why an input did not change the gesture state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A pointer-down arrived while a session is already running.
    Busy,

    /// No items host was found below the controller's root.
    NoContainer,

    /// The press landed on the container background, not on an item.
    BareContainer,

    /// The event source is not inside the container.
    NoItemRoot,

    /// Move, release or cancel without an active session.
    NotActive,
}

/// What a single [`DragInput`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome<N> {
    Ignored(IgnoreReason),

    /// `Idle -> Armed`.
    Armed { item: N },

    /// Still within the threshold.
    Pending,

    /// `Armed -> Dragging`; the overlay was created with this offset already applied.
    DragStarted { item: N, offset: Vec2 },

    /// The overlay moved.
    Moved { offset: Vec2 },

    /// Released before the threshold was exceeded; nothing was written.
    Released { item: N },

    /// The drag finished and `item` was moved from `from` to `to`.
    Committed { item: N, from: Pos2, to: Pos2 },

    /// The session was aborted and `item` was left where it was.
    Cancelled { item: N },
}

impl<N> DragOutcome<N> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    /// True for the outcomes that end a session (`Released`, `Committed`, `Cancelled`).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Released { .. } | Self::Committed { .. } | Self::Cancelled { .. }
        )
    }
}
