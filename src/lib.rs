//! Free-form drag-to-reposition for the items of an egui canvas.
//!
//! A press on an item arms a [`GestureController`]; once the pointer has moved past the drag
//! threshold a ghost [`Overlay`] follows it, and the release writes the new position back
//! through [`ItemStore`]. Escape aborts without touching the item.
#![forbid(unsafe_code)]

pub mod canvas_drag;

pub use canvas_drag::{
    CanvasItem, DragInput, DragOptions, DragOutcome, DragSession, GestureController,
    GesturePhase, GhostPainter, GhostVisual, IgnoreReason, ItemStore, LayoutTree, NodeId,
    NodeRole, Overlay, OverlayFactory, OverlayLayer, OverlaySource, Pulse, Scene, VisualTree,
    collect_inputs, paint_overlays,
};
