use std::sync::Arc;

use egui::{Align2, Color32, FontId, Painter, Rect, Stroke, StrokeKind};

/// What the factory is told about the item a ghost is created for.
#[derive(Clone, Copy, Debug)]
pub struct OverlaySource<'a> {
    /// The item's rendered rectangle in screen space at drag start.
    pub rect: Rect,
    pub label: Option<&'a str>,
}

/// Auto-reversing opacity animation, driven by an external clock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pulse {
    pub from: f32,
    pub to: f32,

    /// Seconds for one `from -> to` leg; the way back takes as long.
    pub leg_seconds: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            from: 0.3,
            to: 1.0,
            leg_seconds: 1.0,
        }
    }
}

impl Pulse {
    pub fn opacity_at(&self, time: f64) -> f32 {
        if self.leg_seconds <= 0.0 {
            return self.to;
        }
        let phase = (time / self.leg_seconds as f64).rem_euclid(2.0) as f32;
        let t = if phase <= 1.0 { phase } else { 2.0 - phase };
        self.from + (self.to - self.from) * t
    }
}

/// Host routine that draws an item into a rectangle; see [`GhostVisual::Painted`].
///
/// Compared by identity: two painters are equal when they share the same routine.
#[derive(Clone)]
pub struct GhostPainter(Arc<dyn Fn(&Painter, Rect) + Send + Sync>);

impl GhostPainter {
    pub fn new(paint: impl Fn(&Painter, Rect) + Send + Sync + 'static) -> Self {
        Self(Arc::new(paint))
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) {
        (self.0)(painter, rect);
    }
}

impl PartialEq for GhostPainter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for GhostPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GhostPainter(..)")
    }
}

/// Visual style of a ghost. All styles share the same positioning contract (see
/// [`super::Overlay`]); only painting differs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GhostVisual {
    /// A plain rounded rectangle.
    Solid { fill: Color32, stroke: Stroke },

    /// Translucent rectangle with a circle on each corner.
    CornerMarkers {
        fill: Color32,
        stroke: Stroke,
        radius: f32,
        pulse: Option<Pulse>,
    },

    /// A copy of the item: its fill and its label.
    Mirror {
        fill: Color32,
        text_color: Color32,
        label: Option<String>,
    },

    /// A full copy of the item, drawn by the host's own item routine and faded to `opacity`.
    ///
    /// Not serializable: it carries code, not data.
    #[cfg_attr(feature = "serde", serde(skip))]
    Painted { paint: GhostPainter, opacity: f32 },

    /// Occupies the item's rectangle but paints nothing.
    Invisible,
}

impl GhostVisual {
    pub fn corner_markers(pulse: Option<Pulse>) -> Self {
        Self::CornerMarkers {
            fill: Color32::from_rgb(0, 128, 0).gamma_multiply(0.2),
            stroke: Stroke::new(1.5, Color32::from_rgb(0, 0, 128)),
            radius: 5.0,
            pulse,
        }
    }

    pub fn pulse(&self) -> Option<Pulse> {
        match self {
            Self::CornerMarkers { pulse, .. } => *pulse,
            _ => None,
        }
    }

    pub fn paint(&self, painter: &Painter, rect: Rect, time: f64) {
        match self {
            Self::Solid { fill, stroke } => {
                painter.rect(rect, 2.0, *fill, *stroke, StrokeKind::Inside);
            }
            Self::CornerMarkers {
                fill,
                stroke,
                radius,
                pulse,
            } => {
                let opacity = pulse.map_or(1.0, |p| p.opacity_at(time));
                let fill = fill.gamma_multiply(opacity);
                let stroke = Stroke::new(stroke.width, stroke.color.gamma_multiply(opacity));

                painter.rect(rect, 0.0, fill, stroke, StrokeKind::Middle);
                for corner in [
                    rect.left_top(),
                    rect.right_top(),
                    rect.left_bottom(),
                    rect.right_bottom(),
                ] {
                    painter.circle(corner, *radius, fill, stroke);
                }
            }
            Self::Mirror {
                fill,
                text_color,
                label,
            } => {
                painter.rect_filled(rect, 4.0, fill.gamma_multiply(0.6));
                if let Some(label) = label {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(14.0),
                        text_color.gamma_multiply(0.8),
                    );
                }
            }
            Self::Painted { paint, opacity } => {
                let mut painter = painter.clone();
                painter.multiply_opacity(*opacity);
                paint.paint(&painter, rect);
            }
            Self::Invisible => {}
        }
    }
}

/// Builds the ghost visual for a drag that is about to start.
pub struct OverlayFactory(Box<dyn Fn(&OverlaySource<'_>) -> GhostVisual>);

impl OverlayFactory {
    pub fn new(create: impl Fn(&OverlaySource<'_>) -> GhostVisual + 'static) -> Self {
        Self(Box::new(create))
    }

    pub fn create(&self, source: &OverlaySource<'_>) -> GhostVisual {
        (self.0)(source)
    }

    pub fn solid(fill: Color32, stroke: Stroke) -> Self {
        Self::new(move |_| GhostVisual::Solid { fill, stroke })
    }

    pub fn corner_markers() -> Self {
        Self::new(|_| GhostVisual::corner_markers(None))
    }

    pub fn pulsing_corner_markers(pulse: Pulse) -> Self {
        Self::new(move |_| GhostVisual::corner_markers(Some(pulse)))
    }

    pub fn mirror(fill: Color32, text_color: Color32) -> Self {
        Self::new(move |source| GhostVisual::Mirror {
            fill,
            text_color,
            label: source.label.map(ToOwned::to_owned),
        })
    }

    /// Ghosts that copy the item by drawing it with `paint`, the routine the host draws items with.
    ///
    /// `paint` gets the ghost's rectangle and the item's label.
    pub fn painted(
        opacity: f32,
        paint: impl Fn(&Painter, Rect, Option<&str>) + Send + Sync + 'static,
    ) -> Self {
        let paint = Arc::new(paint);
        Self::new(move |source| {
            let paint = Arc::clone(&paint);
            let label = source.label.map(ToOwned::to_owned);
            GhostVisual::Painted {
                paint: GhostPainter::new(move |painter, rect| {
                    paint(painter, rect, label.as_deref());
                }),
                opacity,
            }
        })
    }

    pub fn invisible() -> Self {
        Self::new(|_| GhostVisual::Invisible)
    }
}

impl Default for OverlayFactory {
    fn default() -> Self {
        Self::pulsing_corner_markers(Pulse::default())
    }
}

impl std::fmt::Debug for OverlayFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OverlayFactory(..)")
    }
}
