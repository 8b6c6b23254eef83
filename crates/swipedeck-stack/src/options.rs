#![forbid(unsafe_code)]

//! Animation timing configuration.
//!
//! Options are clamped to their valid ranges at construction and never
//! mutated afterwards; components receive them by value. There is no
//! process-wide default beyond [`Default::default`].

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

/// Timing and physics options for a single card's animations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardAnimationOptions {
    maximum_rotation_angle: f32,
    relative_swipe_overlay_fade_duration: f32,
    relative_reverse_swipe_overlay_fade_duration: f32,
    reset_spring_damping: f32,
    total_reset_duration: Duration,
    total_reverse_swipe_duration: Duration,
    total_swipe_duration: Duration,
}

impl CardAnimationOptions {
    /// Maximum rotation of a dragged card, in radians. Default `π/10`,
    /// clamped to `[-π/2, π/2]`.
    #[inline]
    #[must_use]
    pub fn maximum_rotation_angle(&self) -> f32 {
        self.maximum_rotation_angle
    }

    /// Fraction of the swipe animation spent fading the overlay in before
    /// the card translates. Default `0.15`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn relative_swipe_overlay_fade_duration(&self) -> f32 {
        self.relative_swipe_overlay_fade_duration
    }

    /// Fraction of the reverse-swipe animation spent fading the overlay out
    /// at the tail. Default `0.15`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn relative_reverse_swipe_overlay_fade_duration(&self) -> f32 {
        self.relative_reverse_swipe_overlay_fade_duration
    }

    /// Damping ratio of the spring applied when a swipe cancels. Default
    /// `0.5`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn reset_spring_damping(&self) -> f32 {
        self.reset_spring_damping
    }

    /// Total duration of the cancel spring-back. Default 600ms.
    #[inline]
    #[must_use]
    pub fn total_reset_duration(&self) -> Duration {
        self.total_reset_duration
    }

    /// Total duration of the reverse-swipe (undo) animation. Default 250ms.
    #[inline]
    #[must_use]
    pub fn total_reverse_swipe_duration(&self) -> Duration {
        self.total_reverse_swipe_duration
    }

    /// Total duration of the swipe animation. Default 700ms.
    #[inline]
    #[must_use]
    pub fn total_swipe_duration(&self) -> Duration {
        self.total_swipe_duration
    }

    #[must_use]
    pub fn with_maximum_rotation_angle(mut self, angle: f32) -> Self {
        self.maximum_rotation_angle = angle.clamp(-FRAC_PI_2, FRAC_PI_2);
        self
    }

    #[must_use]
    pub fn with_relative_swipe_overlay_fade_duration(mut self, fraction: f32) -> Self {
        self.relative_swipe_overlay_fade_duration = fraction.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_relative_reverse_swipe_overlay_fade_duration(mut self, fraction: f32) -> Self {
        self.relative_reverse_swipe_overlay_fade_duration = fraction.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_reset_spring_damping(mut self, damping: f32) -> Self {
        self.reset_spring_damping = damping.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_total_reset_duration(mut self, duration: Duration) -> Self {
        self.total_reset_duration = duration;
        self
    }

    #[must_use]
    pub fn with_total_reverse_swipe_duration(mut self, duration: Duration) -> Self {
        self.total_reverse_swipe_duration = duration;
        self
    }

    #[must_use]
    pub fn with_total_swipe_duration(mut self, duration: Duration) -> Self {
        self.total_swipe_duration = duration;
        self
    }
}

impl Default for CardAnimationOptions {
    fn default() -> Self {
        Self {
            maximum_rotation_angle: std::f32::consts::PI / 10.0,
            relative_swipe_overlay_fade_duration: 0.15,
            relative_reverse_swipe_overlay_fade_duration: 0.15,
            reset_spring_damping: 0.5,
            total_reset_duration: Duration::from_millis(600),
            total_reverse_swipe_duration: Duration::from_millis(250),
            total_swipe_duration: Duration::from_millis(700),
        }
    }
}

/// Timing options for the stack-level (background card) animations.
///
/// `None` durations fall back to half of the dismissed card's own policy, so
/// background reflow reads faster than the foreground exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackAnimationOptions {
    /// Background animation duration after a cancel. `None`: half the card's
    /// reset duration.
    pub reset_duration: Option<Duration>,
    /// Duration of the shift animation. Zero disables the slide.
    pub shift_duration: Duration,
    /// Background animation duration after a swipe. `None`: half the card's
    /// swipe duration policy.
    pub swipe_duration: Option<Duration>,
    /// Background animation duration after an undo. `None`: half the card's
    /// reverse-swipe duration.
    pub undo_duration: Option<Duration>,
}

impl StackAnimationOptions {
    /// Options with the stock 100ms shift duration and derived durations
    /// everywhere else.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reset_duration: None,
            shift_duration: Duration::from_millis(100),
            swipe_duration: None,
            undo_duration: None,
        }
    }
}
