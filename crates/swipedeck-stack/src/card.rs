#![forbid(unsafe_code)]

//! The per-card gesture entity.
//!
//! A [`SwipeCard`] is plain data — configuration, frame, current pose,
//! overlay alphas, and the in-flight drag sample — rendered by an external
//! presentation layer. Its drag lifecycle mirrors the gesture it tracks:
//! [`begin_drag`](SwipeCard::begin_drag) captures the touch point,
//! [`continue_drag`](SwipeCard::continue_drag) recomputes the live pose and
//! overlay alphas, and [`end_drag`](SwipeCard::end_drag) resolves the whole
//! gesture into exactly one of swipe or cancel.
//!
//! # Invariants
//!
//! 1. A gesture resolves to swipe or cancel, never both and never neither;
//!    no half-swiped pose outlives the drag.
//! 2. Overlay alphas are nonzero for at most one direction at a time (the
//!    active one).
//! 3. The drag sample lives exactly as long as the gesture (plus the plan
//!    build that consumes it); [`clear_drag`](SwipeCard::clear_drag) restores
//!    the idle state.

use swipedeck_core::{
    Direction, DirectionMap, DirectionSet, DragState, Point, Rect, Size, SwipePolicy, Transform,
};

use crate::layout::Footer;
use crate::options::CardAnimationOptions;
use crate::transform;

/// Per-card configuration delivered by the data source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardConfig {
    /// Directions this card can be swiped in.
    pub directions: DirectionSet,
    /// Commit thresholds.
    pub policy: SwipePolicy,
    /// Animation timing for this card.
    pub options: CardAnimationOptions,
    /// Footer strip, if any.
    pub footer: Option<Footer>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            directions: DirectionSet::all(),
            policy: SwipePolicy::default(),
            options: CardAnimationOptions::default(),
            footer: None,
        }
    }
}

/// The outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeResolution {
    /// The drag crossed a distance or speed threshold.
    Swiped(Direction),
    /// Spring back to identity.
    Cancelled,
}

/// One materialized card.
#[derive(Debug, Clone)]
pub struct SwipeCard {
    config: CardConfig,
    frame: Rect,
    transform: Transform,
    drag: Option<DragState>,
    touch_location: Option<Point>,
    overlay_alphas: DirectionMap<f32>,
    interaction_enabled: bool,
}

impl SwipeCard {
    /// A card at the identity pose with no drag in progress.
    #[must_use]
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            frame: Rect::ZERO,
            transform: Transform::IDENTITY,
            drag: None,
            touch_location: None,
            overlay_alphas: DirectionMap::splat(0.0),
            interaction_enabled: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    #[inline]
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// The in-flight drag sample, while a gesture is active.
    #[inline]
    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Where the current gesture first touched the card, in card
    /// coordinates.
    #[inline]
    #[must_use]
    pub fn touch_location(&self) -> Option<Point> {
        self.touch_location
    }

    /// Current overlay alpha for a direction.
    #[inline]
    #[must_use]
    pub fn overlay_alpha(&self, direction: Direction) -> f32 {
        self.overlay_alphas.get(direction)
    }

    #[inline]
    #[must_use]
    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.interaction_enabled = enabled;
    }

    // --- drag lifecycle ---

    /// Start a gesture at `touch` (card coordinates).
    pub fn begin_drag(&mut self, touch: Point) {
        self.touch_location = Some(touch);
        self.drag = Some(DragState {
            touch_location: Some(touch),
            ..DragState::default()
        });
    }

    /// Record a touch without a drag (a tap).
    pub fn record_touch(&mut self, touch: Point) {
        self.touch_location = Some(touch);
    }

    /// Fold a new drag sample in and recompute the live pose and overlay
    /// alphas.
    pub fn continue_drag(&mut self, sample: DragState, container: Size) {
        self.apply_sample(sample);
        self.transform = transform::drag_transform(self, container);
        let mut alphas = DirectionMap::splat(0.0);
        for direction in self.config.directions.iter_ordered() {
            alphas.set(
                direction,
                transform::overlay_percentage(self, container, direction),
            );
        }
        self.overlay_alphas = alphas;
    }

    /// Resolve the gesture: swipe when the final sample crosses the speed or
    /// distance threshold along the active direction, cancel otherwise.
    ///
    /// The drag sample is kept for the animation plan; call
    /// [`clear_drag`](SwipeCard::clear_drag) once it has been consumed.
    #[must_use]
    pub fn end_drag(&mut self, sample: DragState, container: Size) -> SwipeResolution {
        self.apply_sample(sample);
        if let Some(direction) = self.active_direction(container) {
            if self.drag_speed(direction) >= self.config.policy.minimum_swipe_speed(direction)
                || self.drag_percentage(direction, container) >= 1.0
            {
                return SwipeResolution::Swiped(direction);
            }
        }
        SwipeResolution::Cancelled
    }

    /// Drop the gesture state and overlay alphas.
    pub fn clear_drag(&mut self) {
        self.drag = None;
        self.touch_location = None;
        self.overlay_alphas = DirectionMap::splat(0.0);
    }

    fn apply_sample(&mut self, sample: DragState) {
        if let Some(touch) = sample.touch_location {
            self.touch_location = Some(touch);
        }
        self.drag = Some(DragState {
            touch_location: self.touch_location,
            ..sample
        });
    }

    // --- drag measurement ---

    /// The allowed direction this drag leans toward, if any.
    #[must_use]
    pub fn active_direction(&self, container: Size) -> Option<Direction> {
        self.drag.as_ref().and_then(|drag| {
            drag.active_direction(self.config.directions, &self.config.policy, container)
        })
    }

    /// Progress toward the commit distance along `direction`.
    #[must_use]
    pub fn drag_percentage(&self, direction: Direction, container: Size) -> f32 {
        self.drag.as_ref().map_or(0.0, |drag| {
            drag.drag_percentage(direction, &self.config.policy, container)
        })
    }

    /// Sum of progress over every allowed direction.
    #[must_use]
    pub fn total_drag_percentage(&self, container: Size) -> f32 {
        self.drag.as_ref().map_or(0.0, |drag| {
            drag.total_drag_percentage(self.config.directions, &self.config.policy, container)
        })
    }

    /// Current speed along `direction`, in points per second.
    #[must_use]
    pub fn drag_speed(&self, direction: Direction) -> f32 {
        self.drag
            .as_ref()
            .map_or(0.0, |drag| drag.drag_speed(direction))
    }
}
