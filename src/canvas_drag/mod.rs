use std::fmt::Debug;

use egui::{Pos2, Rect, Vec2};

mod commit;
mod debug;
mod geometry;
mod ghost;
mod locate;
mod options;
mod overlay;
mod scene;
mod session;
mod surface;
mod types;

#[cfg(test)]
mod controller_tests;

pub use commit::{CanvasItem, ItemStore, commit_position};
pub use geometry::{committed_position, delta, exceeds, overlay_rect, relative_position};
pub use ghost::{GhostPainter, GhostVisual, OverlayFactory, OverlaySource, Pulse};
pub use locate::{
    VisualTree, find_ancestor_or_self, find_descendant, find_item_root, find_items_host,
};
pub use options::DragOptions;
pub use overlay::{Overlay, OverlayId, OverlayLayer};
pub use scene::{NodeId, NodeRole, Scene, SceneNode};
pub use session::DragSession;
pub use surface::{collect_inputs, paint_overlays};
pub use types::{DragInput, DragOutcome, GesturePhase, IgnoreReason, LayoutTree};

use debug::DebugLog;
use session::GestureState;

/// Drag-to-reposition gesture for the items of one container.
///
/// ```text
/// Idle --down on item--> Armed --move past threshold--> Dragging
///   ^                      |                              |
///   +------ up / cancel ---+------ up (commit) / cancel --+
/// ```
///
/// While the gesture is not idle the container holds pointer capture ([`Self::captured`]): the
/// host must route every move and release of that pointer here, whatever is under it.
/// All transitions happen synchronously inside the handler call; nothing times out.
#[derive(Debug)]
pub struct GestureController<N> {
    pub options: DragOptions,

    /// Root of the subtree searched for the items host on every press.
    root: N,
    factory: OverlayFactory,
    state: GestureState<N>,
    overlays: OverlayLayer<N>,
    next_session_id: u64,
    debug_log: DebugLog,
}

impl<N: Copy + Eq + Debug> GestureController<N> {
    pub fn new(root: N, options: DragOptions, factory: OverlayFactory) -> Self {
        Self {
            options,
            root,
            factory,
            state: GestureState::Idle,
            overlays: OverlayLayer::default(),
            next_session_id: 1,
            debug_log: DebugLog::default(),
        }
    }

    pub fn root(&self) -> N {
        self.root
    }

    /// Takes effect on the next press; a running session keeps its container.
    pub fn set_root(&mut self, root: N) {
        self.root = root;
    }

    /// Takes effect on the next drag start.
    pub fn set_overlay_factory(&mut self, factory: OverlayFactory) {
        self.factory = factory;
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    pub fn session(&self) -> Option<&DragSession<N>> {
        self.state.session()
    }

    /// The live ghost, present exactly while [`GesturePhase::Dragging`].
    pub fn overlay(&self) -> Option<&Overlay<N>> {
        self.overlays.get(self.state.overlay()?)
    }

    pub fn overlays(&self) -> &OverlayLayer<N> {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayLayer<N> {
        &mut self.overlays
    }

    /// The container owning pointer capture, if a session is running.
    pub fn captured(&self) -> Option<N> {
        self.state.session().map(|session| session.container)
    }

    pub fn handle<H>(&mut self, host: &mut H, input: DragInput<N>) -> DragOutcome<N>
    where
        H: LayoutTree<Node = N> + ItemStore<N>,
    {
        match input {
            DragInput::PointerDown { pos, source } => self.pointer_down(host, pos, source),
            DragInput::PointerMove { pos } => self.pointer_move(host, pos),
            DragInput::PointerUp { pos } => self.pointer_up(host, pos),
            DragInput::Cancel => self.cancel(host),
        }
    }

    pub fn pointer_down<H>(&mut self, host: &H, pos: Pos2, source: N) -> DragOutcome<N>
    where
        H: LayoutTree<Node = N>,
    {
        if let Some(session) = self.state.session() {
            let id = session.id;
            self.debug_log_event(format!("session {id}: press ignored, already active"));
            return DragOutcome::Ignored(IgnoreReason::Busy);
        }

        let Some(container) = find_items_host(host, self.root) else {
            log::trace!("press ignored: no items host below {:?}", self.root);
            return DragOutcome::Ignored(IgnoreReason::NoContainer);
        };
        if source == container {
            return DragOutcome::Ignored(IgnoreReason::BareContainer);
        }
        let Some(item) = find_item_root(host, source, container) else {
            log::trace!("press ignored: {source:?} is not inside {container:?}");
            return DragOutcome::Ignored(IgnoreReason::NoItemRoot);
        };

        let id = self.next_session_id;
        self.next_session_id = id.saturating_add(1);

        let session = DragSession {
            id,
            container,
            item,
            press_point: relative_position(pos, host.origin(container)),
            pre_drag_position: host.offset(item).to_pos2(),
            offset: Vec2::ZERO,
        };
        self.debug_log_event(format!(
            "session {id}: armed item={item:?} press=({:.1},{:.1}) at=({:.1},{:.1})",
            session.press_point.x,
            session.press_point.y,
            session.pre_drag_position.x,
            session.pre_drag_position.y,
        ));
        self.state = GestureState::Armed(session);

        DragOutcome::Armed { item }
    }

    pub fn pointer_move<H>(&mut self, host: &mut H, pos: Pos2) -> DragOutcome<N>
    where
        H: LayoutTree<Node = N>,
    {
        let Some(session) = self.state.session() else {
            return DragOutcome::Ignored(IgnoreReason::NotActive);
        };
        let current = relative_position(pos, host.origin(session.container));
        let offset = delta(session.press_point, current);

        match &mut self.state {
            GestureState::Idle => DragOutcome::Ignored(IgnoreReason::NotActive),
            GestureState::Armed(session) => {
                if !exceeds(offset, self.options.threshold) {
                    return DragOutcome::Pending;
                }
                let session = *session;
                self.start_drag(host, session, offset)
            }
            GestureState::Dragging {
                session, overlay, ..
            } => {
                session.offset = offset;
                if let Some(overlay) = self.overlays.get_mut(*overlay) {
                    overlay.set_base_rect(item_rect(&*host, session.item));
                    overlay.set_offset(offset);
                }
                DragOutcome::Moved { offset }
            }
        }
    }

    /// Re-anchors the live ghost on the item's current projection.
    ///
    /// Call once per frame so the ghost keeps showing the drop point when the container scrolls
    /// or moves while the pointer is still. [`Self::drive`] does this for you.
    pub fn refresh_overlay<H>(&mut self, host: &H)
    where
        H: LayoutTree<Node = N>,
    {
        let GestureState::Dragging {
            session, overlay, ..
        } = &self.state
        else {
            return;
        };
        if let Some(overlay) = self.overlays.get_mut(*overlay) {
            overlay.set_base_rect(item_rect(host, session.item));
        }
    }

    fn start_drag<H>(&mut self, host: &mut H, mut session: DragSession<N>, offset: Vec2) -> DragOutcome<N>
    where
        H: LayoutTree<Node = N>,
    {
        let item = session.item;
        let source = OverlaySource {
            rect: item_rect(&*host, item),
            label: host.label(item),
        };
        let mut overlay = Overlay::new(item, &source, self.factory.create(&source));
        overlay.set_offset(offset);
        let overlay = self.overlays.add(overlay);

        let hid_original = !self.options.show_while_dragging;
        if hid_original {
            host.set_visible(item, false);
        }

        session.offset = offset;
        self.debug_log_event(format!(
            "session {}: drag started item={item:?} offset=({:.1},{:.1}) hide_original={hid_original}",
            session.id, offset.x, offset.y,
        ));
        self.state = GestureState::Dragging {
            session,
            overlay,
            hid_original,
        };

        DragOutcome::DragStarted { item, offset }
    }

    /// Ends the session. A drag is committed at the release position; a press that never
    /// passed the threshold changes nothing.
    pub fn pointer_up<H>(&mut self, host: &mut H, pos: Pos2) -> DragOutcome<N>
    where
        H: LayoutTree<Node = N> + ItemStore<N>,
    {
        if self.phase() == GesturePhase::Dragging {
            self.pointer_move(host, pos);
        }

        let Some((session, dragged)) = self.teardown(host) else {
            return DragOutcome::Ignored(IgnoreReason::NotActive);
        };
        let item = session.item;
        if !dragged {
            self.debug_log_event(format!("session {}: released without drag", session.id));
            return DragOutcome::Released { item };
        }

        let from = session.pre_drag_position;
        let to = session.target_position();
        commit_position(host, item, to);
        self.debug_log_event(format!(
            "session {}: committed item={item:?} ({:.1},{:.1}) -> ({:.1},{:.1})",
            session.id, from.x, from.y, to.x, to.y,
        ));

        DragOutcome::Committed { item, from, to }
    }

    /// Aborts the session; the item keeps its pre-drag position whatever the ghost's offset.
    pub fn cancel<H>(&mut self, host: &mut H) -> DragOutcome<N>
    where
        H: LayoutTree<Node = N>,
    {
        let Some((session, dragged)) = self.teardown(host) else {
            return DragOutcome::Ignored(IgnoreReason::NotActive);
        };
        self.debug_log_event(format!(
            "session {}: cancelled (dragging={dragged})",
            session.id
        ));
        DragOutcome::Cancelled { item: session.item }
    }

    /// Returns to idle: releases capture, removes the ghost and shows the original again.
    ///
    /// Yields the finished session and whether it had reached the dragging phase.
    fn teardown<H>(&mut self, host: &mut H) -> Option<(DragSession<N>, bool)>
    where
        H: LayoutTree<Node = N>,
    {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => None,
            GestureState::Armed(session) => Some((session, false)),
            GestureState::Dragging {
                mut session,
                overlay,
                hid_original,
            } => {
                if let Some(removed) = self.overlays.remove(overlay) {
                    session.offset = removed.offset();
                }
                if hid_original {
                    host.set_visible(session.item, true);
                }
                Some((session, true))
            }
        }
    }

    fn debug_log_event(&mut self, message: String) {
        log::debug!("{message}");
        if !self.options.debug_event_log {
            return;
        }
        self.debug_log
            .push(self.options.debug_event_log_capacity, message);
    }

    pub fn debug_log_text(&self) -> String {
        self.debug_log.text()
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }
}

/// The item's rendered rectangle as currently projected to the screen.
fn item_rect<H: LayoutTree>(host: &H, item: H::Node) -> Rect {
    Rect::from_min_size(host.origin(item), host.size(item))
}
