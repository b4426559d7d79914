//! Glue between egui's raw input/painting and [`GestureController`].

use std::fmt::Debug;

use egui::{Context, Event, Id, Key, LayerId, Order, PointerButton, Pos2};

use super::GestureController;
use super::commit::ItemStore;
use super::overlay::OverlayLayer;
use super::types::{DragInput, DragOutcome, LayoutTree};

/// Converts this frame's raw events into controller inputs, in the order they happened.
///
/// Only the primary button drags. A press is reported with the node `hit_test` finds under
/// the pointer and dropped if there is none, or if another egui layer (a window, a popup)
/// covers the canvas `layer` at that point. Escape maps to [`DragInput::Cancel`].
pub fn collect_inputs<N>(
    ctx: &Context,
    layer: LayerId,
    mut hit_test: impl FnMut(Pos2) -> Option<N>,
) -> Vec<DragInput<N>> {
    frame_events(ctx)
        .iter()
        .filter_map(|event| input_for(ctx, layer, event, &mut hit_test))
        .collect()
}

// Cloned so `hit_test` is free to read the context itself.
fn frame_events(ctx: &Context) -> Vec<Event> {
    ctx.input(|i| i.events.clone())
}

fn input_for<N>(
    ctx: &Context,
    layer: LayerId,
    event: &Event,
    hit_test: impl FnOnce(Pos2) -> Option<N>,
) -> Option<DragInput<N>> {
    match *event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            ..
        } => {
            if !owns_pointer(ctx, layer, pos) {
                log::trace!("press at {pos:?} ignored: covered by another layer");
                return None;
            }
            hit_test(pos).map(|source| DragInput::PointerDown { pos, source })
        }
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: false,
            ..
        } => Some(DragInput::PointerUp { pos }),
        Event::PointerMoved(pos) => Some(DragInput::PointerMove { pos }),
        Event::Key {
            key: Key::Escape,
            pressed: true,
            ..
        } => Some(DragInput::Cancel),
        _ => None,
    }
}

/// Panels live outside egui's area order, so "no area here" means the background owns `pos`.
fn owns_pointer(ctx: &Context, layer: LayerId, pos: Pos2) -> bool {
    ctx.layer_id_at(pos).is_none_or(|top| top == layer)
}

/// Paints the ghosts above everything in the container and keeps animating ones repainting.
pub fn paint_overlays<N: Copy>(ctx: &Context, id: Id, overlays: &mut OverlayLayer<N>) {
    if overlays.is_empty() {
        return;
    }

    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, id));
    let time = ctx.input(|i| i.time);
    overlays.paint(&painter, time);

    if overlays.take_repaint_requests() || overlays.is_animating() {
        ctx.request_repaint();
    }
}

impl<N: Copy + Eq + Debug> GestureController<N> {
    /// Feeds one frame of egui input through the controller, with the canvas painted on `layer`.
    ///
    /// Each press is hit-tested against `host` as it stands after the inputs before it in the
    /// same frame were handled, so a press right after a drop sees the item at its new place.
    /// Afterwards the live ghost is re-anchored on its item (see [`Self::refresh_overlay`]).
    ///
    /// Returns the outcomes that changed something; ignored inputs are left out.
    pub fn drive<H>(
        &mut self,
        ctx: &Context,
        layer: LayerId,
        host: &mut H,
        hit_test: impl Fn(&H, Pos2) -> Option<N>,
    ) -> Vec<DragOutcome<N>>
    where
        H: LayoutTree<Node = N> + ItemStore<N>,
    {
        let mut outcomes = Vec::new();
        for event in frame_events(ctx) {
            let Some(input) = input_for(ctx, layer, &event, |pos| hit_test(&*host, pos)) else {
                continue;
            };
            let outcome = self.handle(host, input);
            if !outcome.is_ignored() {
                outcomes.push(outcome);
            }
        }
        self.refresh_overlay(&*host);
        outcomes
    }
}
