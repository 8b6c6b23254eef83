#![forbid(unsafe_code)]

//! Drag measurement: pure math over one in-flight drag sample.
//!
//! A [`DragState`] is the transient snapshot of an active gesture
//! (translation, velocity, initial touch point) delivered by the embedding
//! input layer. The functions here project it onto candidate swipe
//! directions; the commit-or-cancel decision built on top of them lives with
//! the card entity.
//!
//! # Invariants
//!
//! 1. `drag_percentage` is 0 for any direction the drag opposes; it never
//!    goes negative.
//! 2. Growing the translation along a direction never decreases that
//!    direction's percentage.
//! 3. `active_direction` only considers allowed directions, and resolves
//!    exact ties to the first direction in [`Direction::ALL`] order.
//!
//! # Failure Modes
//!
//! - A zero translation yields percentage 0 everywhere and no active
//!   direction.
//! - A non-positive minimum swipe distance yields percentage 0 rather than a
//!   division by zero.

use crate::direction::{Direction, DirectionMap, DirectionSet};
use crate::geometry::{Point, Size, Vector};

/// Per-direction swipe thresholds.
///
/// Speeds are in points per second. A `None` distance falls back to a quarter
/// of the container's shorter side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipePolicy {
    pub minimum_swipe_speed: DirectionMap<f32>,
    pub minimum_swipe_distance: DirectionMap<Option<f32>>,
}

impl SwipePolicy {
    /// Minimum velocity (default: 1100 pt/s per direction) for a flick to
    /// commit a swipe regardless of distance.
    #[inline]
    pub fn minimum_swipe_speed(&self, direction: Direction) -> f32 {
        self.minimum_swipe_speed.get(direction)
    }

    /// Minimum drag distance for a slow drag to commit a swipe.
    #[inline]
    pub fn minimum_swipe_distance(&self, direction: Direction, container: Size) -> f32 {
        self.minimum_swipe_distance
            .get(direction)
            .unwrap_or(container.min_side() / 4.0)
    }
}

impl Default for SwipePolicy {
    fn default() -> Self {
        Self {
            minimum_swipe_speed: DirectionMap::splat(1100.0),
            minimum_swipe_distance: DirectionMap::splat(None),
        }
    }
}

/// Snapshot of an active drag, relative to the stack container.
///
/// Owned by the in-progress gesture and discarded when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragState {
    /// Accumulated translation since the gesture began.
    pub translation: Vector,
    /// Instantaneous velocity in points per second.
    pub velocity: Vector,
    /// Initial touch point in card coordinates, when known.
    pub touch_location: Option<Point>,
}

impl DragState {
    /// A drag described by translation and velocity alone.
    pub const fn new(translation: Vector, velocity: Vector) -> Self {
        Self {
            translation,
            velocity,
            touch_location: None,
        }
    }

    /// How far the drag has progressed toward committing in `direction`,
    /// where 1.0 is the minimum swipe distance.
    ///
    /// Dragging opposite to `direction` never counts toward it.
    pub fn drag_percentage(
        &self,
        direction: Direction,
        policy: &SwipePolicy,
        container: Size,
    ) -> f32 {
        let distance = policy.minimum_swipe_distance(direction, container);
        if distance <= 0.0 {
            return 0.0;
        }
        let projection = self.translation.dot(direction.vector()) / distance;
        projection.max(0.0)
    }

    /// Current speed projected onto `direction`, in points per second.
    pub fn drag_speed(&self, direction: Direction) -> f32 {
        self.velocity.dot(direction.vector()).abs()
    }

    /// The allowed direction with the largest drag percentage, or `None`
    /// when the drag has no component along any allowed direction.
    pub fn active_direction(
        &self,
        allowed: DirectionSet,
        policy: &SwipePolicy,
        container: Size,
    ) -> Option<Direction> {
        let mut best: Option<(f32, Direction)> = None;
        for direction in allowed.iter_ordered() {
            let percentage = self.drag_percentage(direction, policy, container);
            if percentage > best.map_or(0.0, |(p, _)| p) {
                best = Some((percentage, direction));
            }
        }
        best.map(|(_, direction)| direction)
    }

    /// Sum of drag percentages over the allowed directions.
    pub fn total_drag_percentage(
        &self,
        allowed: DirectionSet,
        policy: &SwipePolicy,
        container: Size,
    ) -> f32 {
        allowed
            .iter_ordered()
            .map(|d| self.drag_percentage(d, policy, container))
            .sum()
    }
}
