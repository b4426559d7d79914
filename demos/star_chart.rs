#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui_canvas_drag::{
    CanvasItem, DragOptions, DragOutcome, GestureController, NodeId, OverlayFactory, Pulse,
    Scene, paint_overlays,
};

const STAR_SIZE: egui::Vec2 = egui::vec2(90.0, 28.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ghost {
    Pulsing,
    Corners,
    Copy,
    Invisible,
}

impl Ghost {
    const ALL: [Self; 4] = [Self::Pulsing, Self::Corners, Self::Copy, Self::Invisible];

    fn title(self) -> &'static str {
        match self {
            Self::Pulsing => "Pulsing corners",
            Self::Corners => "Corners",
            Self::Copy => "Copy of the star",
            Self::Invisible => "Invisible",
        }
    }

    fn factory(self) -> OverlayFactory {
        match self {
            Self::Pulsing => OverlayFactory::pulsing_corner_markers(Pulse::default()),
            Self::Corners => OverlayFactory::corner_markers(),
            Self::Copy => OverlayFactory::painted(0.6, paint_star),
            Self::Invisible => OverlayFactory::invisible(),
        }
    }
}

struct App {
    scene: Scene,
    controller: GestureController<NodeId>,
    ghost: Ghost,
    last: String,
}

impl Default for App {
    fn default() -> Self {
        let stars = [
            CanvasItem::new("Regulus", 80.0, 60.0),
            CanvasItem::new("Dubhe", 260.0, 140.0),
            CanvasItem::new("Denebola", 420.0, 90.0),
            CanvasItem::new("Gienah", 180.0, 300.0),
            CanvasItem::new("Acrux", 520.0, 320.0),
        ];
        let scene = Scene::canvas(
            egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0)),
            &stars,
            STAR_SIZE,
        );
        let controller = GestureController::new(
            scene.root(),
            DragOptions::default().with_debug_event_log(true),
            Ghost::Pulsing.factory(),
        );

        Self {
            scene,
            controller,
            ghost: Ghost::Pulsing,
            last: String::new(),
        }
    }
}

/// Draws one star into its rectangle. Used for the stars themselves and for their ghosts.
fn paint_star(painter: &egui::Painter, rect: egui::Rect, label: Option<&str>) {
    let dot = rect.left_center() + egui::vec2(10.0, 0.0);
    painter.circle_filled(dot, 5.0, egui::Color32::from_rgb(255, 230, 140));
    painter.text(
        dot + egui::vec2(12.0, 0.0),
        egui::Align2::LEFT_CENTER,
        label.unwrap_or_default(),
        egui::FontId::proportional(14.0),
        egui::Color32::from_gray(230),
    );
}

impl App {
    fn paint_stars(&self, painter: &egui::Painter) {
        for item in self.scene.item_roots() {
            let Some(node) = self.scene.node(item) else {
                continue;
            };
            let Some(rect) = self.scene.global_rect(item) else {
                continue;
            };
            if node.visible {
                paint_star(painter, rect, node.label.as_deref());
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("star_chart_options").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(
                    &mut self.controller.options.show_while_dragging,
                    "Show star while dragging",
                );
                ui.separator();
                let before = self.ghost;
                egui::ComboBox::from_label("Ghost")
                    .selected_text(self.ghost.title())
                    .show_ui(ui, |ui| {
                        for ghost in Ghost::ALL {
                            ui.selectable_value(&mut self.ghost, ghost, ghost.title());
                        }
                    });
                if self.ghost != before {
                    self.controller.set_overlay_factory(self.ghost.factory());
                }
                ui.separator();
                ui.label(format!("{:?}", self.controller.phase()));
            });
            ui.label(&self.last);
        });

        egui::SidePanel::right("star_chart_log")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Gesture log");
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.monospace(self.controller.debug_log_text());
                    });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(10, 14, 32)))
            .show(ctx, |ui| {
                let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                self.scene.set_root_rect(rect);

                let layer = ui.layer_id();
                for outcome in self.controller.drive(ctx, layer, &mut self.scene, Scene::hit_test) {
                    if let DragOutcome::Committed { to, .. } = outcome {
                        self.last = format!("Dropped at ({:.0}, {:.0})", to.x, to.y);
                    }
                }

                self.paint_stars(&ui.painter_at(rect));
            });

        paint_overlays(ctx, egui::Id::new("star_chart_ghosts"), self.controller.overlays_mut());
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1120.0, 640.0])
            .with_title("egui_canvas_drag star chart"),
        ..Default::default()
    };

    eframe::run_native(
        "egui_canvas_drag star chart",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
