use egui::{Color32, Pos2, Rect, Vec2};

use super::{
    CanvasItem, DragInput, DragOptions, DragOutcome, GestureController, GesturePhase,
    GhostVisual, IgnoreReason, LayoutTree, NodeId, NodeRole, OverlayFactory, Scene, VisualTree,
    find_items_host,
};

struct Fixture {
    scene: Scene,
    container: NodeId,
    regulus: NodeId,
    regulus_content: NodeId,
    dubhe: NodeId,
}

impl Fixture {
    fn new() -> Self {
        let scene = Scene::canvas(
            Rect::from_min_size(Pos2::new(20.0, 30.0), Vec2::new(800.0, 600.0)),
            &[
                CanvasItem::new("Regulus", 100.0, 100.0),
                CanvasItem::new("Dubhe", 300.0, 200.0),
            ],
            Vec2::new(60.0, 40.0),
        );
        let container = find_items_host(&scene, scene.root()).expect("canvas has an items host");
        let regulus = scene.item_by_name("Regulus").expect("Regulus exists");
        let regulus_content = scene
            .children(regulus)
            .next()
            .expect("item root has content");
        let dubhe = scene.item_by_name("Dubhe").expect("Dubhe exists");
        Self {
            scene,
            container,
            regulus,
            regulus_content,
            dubhe,
        }
    }

    /// Screen position of a container-relative point.
    fn screen(&self, x: f32, y: f32) -> Pos2 {
        self.scene.origin(self.container) + Vec2::new(x, y)
    }

    fn controller(&self, options: DragOptions) -> GestureController<NodeId> {
        GestureController::new(self.scene.root(), options, OverlayFactory::default())
    }

    fn press(&mut self, c: &mut GestureController<NodeId>, x: f32, y: f32) -> DragOutcome<NodeId> {
        let pos = self.screen(x, y);
        let source = self.regulus_content;
        c.handle(&mut self.scene, DragInput::PointerDown { pos, source })
    }

    fn move_to(&mut self, c: &mut GestureController<NodeId>, x: f32, y: f32) -> DragOutcome<NodeId> {
        let pos = self.screen(x, y);
        c.handle(&mut self.scene, DragInput::PointerMove { pos })
    }

    fn release(&mut self, c: &mut GestureController<NodeId>, x: f32, y: f32) -> DragOutcome<NodeId> {
        let pos = self.screen(x, y);
        c.handle(&mut self.scene, DragInput::PointerUp { pos })
    }

    fn position_of(&self, name: &str) -> Pos2 {
        self.scene
            .items()
            .into_iter()
            .find(|item| item.name == name)
            .map(|item| item.position())
            .expect("item exists")
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.scene.node(node).is_some_and(|n| n.visible)
    }
}

#[test]
fn press_arms_and_captures() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    assert_eq!(c.phase(), GesturePhase::Idle);
    assert_eq!(c.captured(), None);

    assert_eq!(f.press(&mut c, 50.0, 50.0), DragOutcome::Armed { item: f.regulus });
    assert_eq!(c.phase(), GesturePhase::Armed);
    assert_eq!(c.captured(), Some(f.container));

    let session = *c.session().expect("armed session");
    assert_eq!(session.item, f.regulus);
    assert_eq!(session.container, f.container);
    assert_eq!(session.press_point, Pos2::new(50.0, 50.0));
    assert_eq!(session.pre_drag_position, Pos2::new(100.0, 100.0));
    assert_eq!(session.offset, Vec2::ZERO);
    assert!(c.overlay().is_none());
}

#[test]
fn movement_within_threshold_never_creates_an_overlay() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);

    for (x, y) in [(52.0, 50.0), (54.0, 46.0), (46.0, 54.0), (50.0, 50.0)] {
        assert_eq!(f.move_to(&mut c, x, y), DragOutcome::Pending);
        assert_eq!(c.phase(), GesturePhase::Armed);
        assert!(c.overlays().is_empty());
    }

    assert_eq!(f.release(&mut c, 53.0, 53.0), DragOutcome::Released { item: f.regulus });
    assert_eq!(c.phase(), GesturePhase::Idle);
    assert_eq!(c.captured(), None);
    assert_eq!(f.position_of("Regulus"), Pos2::new(100.0, 100.0));
}

#[test]
fn release_beyond_threshold_without_a_move_is_still_a_click() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);

    assert_eq!(f.release(&mut c, 90.0, 90.0), DragOutcome::Released { item: f.regulus });
    assert_eq!(f.position_of("Regulus"), Pos2::new(100.0, 100.0));
    assert!(c.overlays().is_empty());
}

#[test]
fn crossing_the_threshold_starts_dragging_once() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);

    assert_eq!(
        f.move_to(&mut c, 55.0, 50.0),
        DragOutcome::DragStarted {
            item: f.regulus,
            offset: Vec2::new(5.0, 0.0),
        }
    );
    assert_eq!(c.phase(), GesturePhase::Dragging);
    assert_eq!(c.overlays().len(), 1);

    assert_eq!(
        f.move_to(&mut c, 60.0, 41.0),
        DragOutcome::Moved {
            offset: Vec2::new(10.0, -9.0),
        }
    );
    // Coming back inside the threshold does not re-arm.
    assert_eq!(
        f.move_to(&mut c, 50.0, 50.0),
        DragOutcome::Moved { offset: Vec2::ZERO }
    );
    assert_eq!(c.phase(), GesturePhase::Dragging);
    assert_eq!(c.overlays().len(), 1);
}

#[test]
fn threshold_axes_are_independent() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default().with_threshold(Vec2::new(10.0, 2.0)));
    f.press(&mut c, 50.0, 50.0);

    assert_eq!(f.move_to(&mut c, 59.0, 51.0), DragOutcome::Pending);
    assert!(matches!(
        f.move_to(&mut c, 50.0, 53.0),
        DragOutcome::DragStarted { .. }
    ));
}

#[test]
fn completed_drag_commits_pre_drag_position_plus_offset() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 65.0, 60.0);
    f.move_to(&mut c, 80.0, 70.0);

    assert_eq!(
        f.release(&mut c, 80.0, 70.0),
        DragOutcome::Committed {
            item: f.regulus,
            from: Pos2::new(100.0, 100.0),
            to: Pos2::new(130.0, 120.0),
        }
    );
    assert_eq!(f.position_of("Regulus"), Pos2::new(130.0, 120.0));
    assert_eq!(f.position_of("Dubhe"), Pos2::new(300.0, 200.0));
    assert_eq!(c.phase(), GesturePhase::Idle);
    assert!(c.session().is_none());
    assert!(c.overlays().is_empty());
    assert_eq!(c.captured(), None);
}

#[test]
fn release_position_is_the_final_move() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 60.0, 50.0);

    assert!(matches!(
        f.release(&mut c, 80.0, 70.0),
        DragOutcome::Committed { to, .. } if to == Pos2::new(130.0, 120.0)
    ));
}

#[test]
fn cancel_while_dragging_keeps_pre_drag_position() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 250.0, -40.0);
    assert_eq!(
        c.overlay().map(|o| o.offset()),
        Some(Vec2::new(200.0, -90.0))
    );

    assert_eq!(
        c.handle(&mut f.scene, DragInput::Cancel),
        DragOutcome::Cancelled { item: f.regulus }
    );
    assert_eq!(f.position_of("Regulus"), Pos2::new(100.0, 100.0));
    assert_eq!(c.phase(), GesturePhase::Idle);
    assert!(c.overlays().is_empty());
    assert_eq!(c.captured(), None);

    // The release that follows the abort belongs to no session.
    assert_eq!(
        f.release(&mut c, 250.0, -40.0),
        DragOutcome::Ignored(IgnoreReason::NotActive)
    );
    assert_eq!(f.position_of("Regulus"), Pos2::new(100.0, 100.0));
}

#[test]
fn cancel_while_armed_returns_to_idle() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);

    assert_eq!(
        c.cancel(&mut f.scene),
        DragOutcome::Cancelled { item: f.regulus }
    );
    assert_eq!(c.phase(), GesturePhase::Idle);
    assert_eq!(c.captured(), None);
}

#[test]
fn inputs_without_a_session_are_no_ops() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    let not_active = DragOutcome::Ignored(IgnoreReason::NotActive);

    assert_eq!(f.move_to(&mut c, 10.0, 10.0), not_active);
    assert_eq!(f.release(&mut c, 10.0, 10.0), not_active);
    assert_eq!(c.cancel(&mut f.scene), not_active);
    assert_eq!(c.phase(), GesturePhase::Idle);
    assert_eq!(f.scene.items(), Fixture::new().scene.items());
}

#[test]
fn press_during_a_session_is_ignored() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    let armed = *c.session().expect("session");

    let other = f.dubhe;
    let pos = f.screen(310.0, 210.0);
    assert_eq!(
        c.handle(&mut f.scene, DragInput::PointerDown { pos, source: other }),
        DragOutcome::Ignored(IgnoreReason::Busy)
    );
    assert_eq!(c.session(), Some(&armed));
    assert_eq!(c.phase(), GesturePhase::Armed);

    f.move_to(&mut c, 70.0, 50.0);
    let dragging = *c.session().expect("session");
    assert_eq!(
        c.handle(&mut f.scene, DragInput::PointerDown { pos, source: other }),
        DragOutcome::Ignored(IgnoreReason::Busy)
    );
    assert_eq!(c.session(), Some(&dragging));
    assert_eq!(c.phase(), GesturePhase::Dragging);
    assert_eq!(c.overlays().len(), 1);
}

#[test]
fn press_on_bare_container_or_chrome_is_ignored() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    let pos = f.screen(5.0, 5.0);

    let container = f.container;
    assert_eq!(
        c.handle(&mut f.scene, DragInput::PointerDown { pos, source: container }),
        DragOutcome::Ignored(IgnoreReason::BareContainer)
    );

    let root = f.scene.root();
    assert_eq!(
        c.handle(&mut f.scene, DragInput::PointerDown { pos, source: root }),
        DragOutcome::Ignored(IgnoreReason::NoItemRoot)
    );
    assert_eq!(c.phase(), GesturePhase::Idle);
}

#[test]
fn tree_without_items_host_keeps_controller_idle() {
    let mut scene = Scene::new(Rect::from_min_size(Pos2::ZERO, Vec2::splat(400.0)));
    let panel = scene.add_node(scene.root(), NodeRole::Panel, Vec2::ZERO, Vec2::splat(400.0));
    let item = scene.add_node(panel, NodeRole::Visual, Vec2::splat(10.0), Vec2::splat(20.0));

    let mut c = GestureController::new(scene.root(), DragOptions::default(), OverlayFactory::default());
    for input in [
        DragInput::PointerDown {
            pos: Pos2::new(15.0, 15.0),
            source: item,
        },
        DragInput::PointerMove {
            pos: Pos2::new(80.0, 80.0),
        },
        DragInput::PointerUp {
            pos: Pos2::new(80.0, 80.0),
        },
    ] {
        assert!(c.handle(&mut scene, input).is_ignored());
        assert_eq!(c.phase(), GesturePhase::Idle);
    }
    assert_eq!(
        scene.node(item).map(|n| n.offset),
        Some(Vec2::splat(10.0))
    );
}

#[test]
fn overlay_matches_item_rect_and_follows_offset() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);

    let item_rect = f.scene.global_rect(f.regulus).expect("item rect");
    let overlay = c.overlay().expect("overlay while dragging");
    assert_eq!(overlay.adorned(), f.regulus);
    assert_eq!(overlay.base_rect(), item_rect);
    assert_eq!(overlay.rect(), item_rect.translate(Vec2::new(30.0, 20.0)));
    assert_eq!(overlay.rect().size(), Vec2::new(60.0, 40.0));

    // The item itself is not moved before the commit.
    assert_eq!(f.scene.global_rect(f.regulus), Some(item_rect));
}

#[test]
fn original_stays_visible_by_default() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);
    assert!(f.is_visible(f.regulus));
}

#[test]
fn hidden_original_is_restored_on_commit_and_cancel() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default().with_show_while_dragging(false));

    f.press(&mut c, 50.0, 50.0);
    assert!(f.is_visible(f.regulus));
    f.move_to(&mut c, 80.0, 70.0);
    assert!(!f.is_visible(f.regulus));
    f.release(&mut c, 80.0, 70.0);
    assert!(f.is_visible(f.regulus));

    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 10.0, 10.0);
    assert!(!f.is_visible(f.regulus));
    c.cancel(&mut f.scene);
    assert!(f.is_visible(f.regulus));
    assert_eq!(f.position_of("Regulus"), Pos2::new(130.0, 120.0));
}

#[test]
fn scrolled_container_commits_in_layout_units() {
    let mut f = Fixture::new();
    let viewer = f
        .scene
        .children(f.scene.root())
        .next()
        .expect("scroll viewer");
    f.scene.set_scroll(viewer, Vec2::new(40.0, 200.0));
    assert_eq!(
        f.scene.origin(f.container),
        Pos2::new(21.0 - 40.0, 31.0 - 200.0)
    );

    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);
    assert!(matches!(
        f.release(&mut c, 80.0, 70.0),
        DragOutcome::Committed { to, .. } if to == Pos2::new(130.0, 120.0)
    ));
}

#[test]
fn ghost_tracks_the_drop_point_when_scrolled_mid_drag() {
    let mut f = Fixture::new();
    let viewer = f
        .scene
        .children(f.scene.root())
        .next()
        .expect("scroll viewer");
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);
    let pointer = f.screen(80.0, 70.0);

    f.scene.set_scroll(viewer, Vec2::new(0.0, 100.0));

    // Pointer still: re-anchoring alone moves the ghost along with its item.
    c.refresh_overlay(&f.scene);
    let item_rect = f.scene.global_rect(f.regulus).expect("item rect");
    assert_eq!(
        c.overlay().map(|o| o.rect()),
        Some(item_rect.translate(Vec2::new(30.0, 20.0)))
    );

    c.handle(&mut f.scene, DragInput::PointerMove { pos: pointer });
    let ghost = c.overlay().map(|o| o.rect()).expect("ghost while dragging");
    c.handle(&mut f.scene, DragInput::PointerUp { pos: pointer });

    assert_eq!(f.position_of("Regulus"), Pos2::new(130.0, 220.0));
    assert_eq!(f.scene.global_rect(f.regulus), Some(ghost));
}

#[test]
fn factory_decides_the_ghost_visual() {
    let mut f = Fixture::new();
    let mut c = GestureController::new(
        f.scene.root(),
        DragOptions::default(),
        OverlayFactory::mirror(Color32::LIGHT_BLUE, Color32::BLACK),
    );
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);
    assert_eq!(
        c.overlay().map(|o| o.visual().clone()),
        Some(GhostVisual::Mirror {
            fill: Color32::LIGHT_BLUE,
            text_color: Color32::BLACK,
            label: Some("Regulus".to_owned()),
        })
    );
    f.release(&mut c, 80.0, 70.0);

    c.set_overlay_factory(OverlayFactory::invisible());
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);
    assert_eq!(
        c.overlay().map(|o| o.visual().clone()),
        Some(GhostVisual::Invisible)
    );
    assert!(!c.overlays().is_animating());
}

#[test]
fn sessions_are_numbered_and_logged() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default().with_debug_event_log(true));

    f.press(&mut c, 50.0, 50.0);
    f.release(&mut c, 50.0, 50.0);
    f.press(&mut c, 50.0, 50.0);
    f.move_to(&mut c, 80.0, 70.0);
    c.cancel(&mut f.scene);

    let log = c.debug_log_text();
    assert!(log.contains("session 1: armed"), "{log}");
    assert!(log.contains("session 1: released without drag"), "{log}");
    assert!(log.contains("session 2: drag started"), "{log}");
    assert!(log.contains("session 2: cancelled"), "{log}");

    c.debug_log_clear();
    assert!(c.debug_log_text().is_empty());
}

#[test]
fn debug_log_is_off_by_default() {
    let mut f = Fixture::new();
    let mut c = f.controller(DragOptions::default());
    f.press(&mut c, 50.0, 50.0);
    assert!(c.debug_log_text().is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    let options: DragOptions =
        serde_json::from_str(r#"{ "show_while_dragging": false }"#).expect("valid options");
    assert!(!options.show_while_dragging);
    assert_eq!(options.threshold, DragOptions::default().threshold);
}
