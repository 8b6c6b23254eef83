#![forbid(unsafe_code)]

//! Pose math for a live drag.
//!
//! Everything here is a pure function of the dragged card and the container
//! geometry: the overlay visibility rule, the touch-quadrant rotation, and
//! the scale blending that background cards track during a drag.

use swipedeck_core::{Direction, Size, Transform};

use crate::card::SwipeCard;

/// Scale applied to the card at `position` when the stack is settled.
///
/// Position 0 is full size; everything behind shares one reduced scale when
/// background scaling is on.
#[must_use]
pub fn scale_factor(position: isize, scales_background: bool) -> (f32, f32) {
    if scales_background && position != 0 {
        (0.95, 0.95)
    } else {
        (1.0, 1.0)
    }
}

/// The settled pose of the card at `position`.
#[must_use]
pub fn settled_transform(position: isize, scales_background: bool) -> Transform {
    let (sx, sy) = scale_factor(position, scales_background);
    Transform::scale(sx, sy)
}

/// Overlay visibility for `direction` on a dragged card.
///
/// Zero for every non-active direction. For the active one, the overlay only
/// appears once that direction wins by more than half the combined drag
/// magnitude: `2·p(active) − Σ p(d)`, clamped to `[0, 1]`.
#[must_use]
pub fn overlay_percentage(card: &SwipeCard, container: Size, direction: Direction) -> f32 {
    if Some(direction) != card.active_direction(container) {
        return 0.0;
    }
    let total = card.total_drag_percentage(container);
    let actual = 2.0 * card.drag_percentage(direction, container) - total;
    actual.clamp(0.0, 1.0)
}

/// +1 when the initial touch is in the card's upper half, −1 in the lower
/// half, 0 when unknown.
#[must_use]
pub fn rotation_direction_y(card: &SwipeCard) -> f32 {
    match card.touch_location() {
        Some(touch) if touch.y < card.frame().height() / 2.0 => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

/// Rotation of the dragged card, in radians.
///
/// Grows with horizontal translation relative to the container width and
/// flips sign with the touch half, capturing the lever-arm of pinching a
/// card above versus below its center.
#[must_use]
pub fn rotation_angle(card: &SwipeCard, container: Size) -> f32 {
    let translation = card.drag().map_or(0.0, |drag| drag.translation.dx);
    let strength = if container.width > 0.0 {
        (translation / container.width).min(1.0)
    } else {
        0.0
    };
    rotation_direction_y(card)
        * strength
        * card.config().options.maximum_rotation_angle().abs()
}

/// The live pose of the dragged card: raw translation plus rotation.
#[must_use]
pub fn drag_transform(card: &SwipeCard, container: Size) -> Transform {
    let translation = card.drag().map_or(swipedeck_core::Vector::ZERO, |drag| {
        drag.translation
    });
    Transform::translation_rotation(translation, rotation_angle(card, container))
}

/// How far the background stack has progressed toward its next poses.
///
/// Tracks whichever axis the drag favors, saturating once the drag covers
/// half the container's shorter side.
#[must_use]
pub fn background_transform_percentage(top: &SwipeCard, container: Size) -> f32 {
    let Some(drag) = top.drag() else {
        return 0.0;
    };
    let min_side = container.min_side();
    if min_side <= 0.0 {
        return 0.0;
    }
    let horizontal = (2.0 * drag.translation.dx.abs() / min_side).min(1.0);
    let vertical = (2.0 * drag.translation.dy.abs() / min_side).min(1.0);
    horizontal.max(vertical)
}

/// The pose of the background card at `position` while the top card drags:
/// its settled scale blended toward the next position's.
#[must_use]
pub fn background_drag_transform(
    top: &SwipeCard,
    container: Size,
    position: usize,
    scales_background: bool,
) -> Transform {
    let percentage = background_transform_percentage(top, container);
    let (cx, cy) = scale_factor(position as isize, scales_background);
    let (nx, ny) = scale_factor(position as isize - 1, scales_background);
    Transform::scale(
        (1.0 - percentage) * cx + percentage * nx,
        (1.0 - percentage) * cy + percentage * ny,
    )
}
