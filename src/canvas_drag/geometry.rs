use egui::{Pos2, Rect, Vec2};

/// Projects a screen-space point into the coordinate frame whose top-left is `container_origin`.
#[inline]
pub fn relative_position(global: Pos2, container_origin: Pos2) -> Pos2 {
    (global - container_origin).to_pos2()
}

/// Displacement that takes `from` to `to`.
#[inline]
pub fn delta(from: Pos2, to: Pos2) -> Vec2 {
    to - from
}

/// True once the pointer moved further than the threshold on *either* axis.
///
/// Each axis is tested on its own (`|dx| > tx || |dy| > ty`); a diagonal move that stays
/// within both per-axis limits never starts a drag.
#[inline]
pub fn exceeds(delta: Vec2, threshold: Vec2) -> bool {
    delta.x.abs() > threshold.x || delta.y.abs() > threshold.y
}

#[inline]
pub fn committed_position(pre_drag: Pos2, offset: Vec2) -> Pos2 {
    pre_drag + offset
}

/// Where an overlay laid out at `base` ends up after being shifted by `offset`.
#[inline]
pub fn overlay_rect(base: Rect, offset: Vec2) -> Rect {
    base.translate(offset)
}
