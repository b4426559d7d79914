use egui::Vec2;

/// Options for [`super::GestureController`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragOptions {
    /// Minimum pointer travel (per axis, in points) before a press turns into a drag.
    ///
    /// The drag starts as soon as *either* axis exceeds its limit.
    pub threshold: Vec2,

    /// If true, the original item stays visible underneath its ghost while dragging.
    ///
    /// If false, the item is hidden for the duration of the drag and shown again on release or
    /// cancel, so only the ghost is visible.
    pub show_while_dragging: bool,

    /// If true, gesture transitions are recorded into an in-memory log
    /// (see [`super::GestureController::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of lines kept by the debug event log.
    pub debug_event_log_capacity: usize,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            threshold: Vec2::splat(4.0),
            show_while_dragging: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl DragOptions {
    #[inline]
    pub fn with_threshold(mut self, threshold: Vec2) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn with_show_while_dragging(mut self, show: bool) -> Self {
        self.show_while_dragging = show;
        self
    }

    #[inline]
    pub fn with_debug_event_log(mut self, enabled: bool) -> Self {
        self.debug_event_log = enabled;
        self
    }
}
