#![forbid(unsafe_code)]

//! The tweening-engine contract and the declarative plans handed to it.
//!
//! The core never interpolates frames itself. Each structural transition is
//! compiled into a [`TweenPlan`] — a value snapshot of every pose and overlay
//! change with absolute track timing — and passed to an injected
//! [`TweenEngine`]. The engine is expected to apply frames over time on the
//! same logical thread and to deliver **exactly one** completion per plan,
//! which the embedder routes back through
//! [`CardStack::animation_finished`](crate::stack::CardStack::animation_finished)
//! with the plan's token.
//!
//! # Failure Modes
//!
//! - An engine that never completes a plan leaves the stack gated on
//!   `is_animating`; the contract forbids this.
//! - An engine that completes twice is also out of contract; the controller
//!   treats stale tokens for finished transitions as no-ops where it can.

use std::time::Duration;

use swipedeck_core::{Direction, Transform};

/// Which structural transition a plan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionKind {
    /// Spring-back after a cancelled gesture.
    Reset,
    /// Top card dismissal plus background reflow.
    Swipe,
    /// Undo: replay the exit pose, then return to identity.
    ReverseSwipe,
    /// Stack rotation slide.
    Shift,
}

/// Identifies one in-flight plan. Ids are unique per stack instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationToken {
    pub id: u64,
    pub kind: TransitionKind,
}

/// Interpolation curve for a track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TweenCurve {
    Linear,
    EaseInOut,
    /// Underdamped spring; `damping` in `[0, 1]`.
    Spring { damping: f32 },
}

/// One card's pose change within a plan.
///
/// `start`/`duration` are absolute offsets from the plan's start; a
/// zero-duration track is a jump.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseTrack {
    /// Backing index of the card.
    pub index: usize,
    pub start: Duration,
    pub duration: Duration,
    pub curve: TweenCurve,
    pub from: Transform,
    pub to: Transform,
}

/// One overlay's alpha change within a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayTrack {
    /// Backing index of the card the overlay belongs to.
    pub index: usize,
    pub direction: Direction,
    pub start: Duration,
    pub duration: Duration,
    pub from_alpha: f32,
    pub to_alpha: f32,
}

/// A complete transition, ready for an engine to interpolate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TweenPlan {
    pub token: AnimationToken,
    /// Time from `animate` to completion. At least the end of every track;
    /// may exceed it (the empty-window swipe still waits out its delay plus
    /// duration).
    pub duration: Duration,
    pub poses: Vec<PoseTrack>,
    pub overlays: Vec<OverlayTrack>,
}

impl TweenPlan {
    /// The end offset of the last track, or zero for an empty plan.
    #[must_use]
    pub fn tracks_end(&self) -> Duration {
        let poses = self
            .poses
            .iter()
            .map(|t| t.start + t.duration)
            .max()
            .unwrap_or(Duration::ZERO);
        let overlays = self
            .overlays
            .iter()
            .map(|t| t.start + t.duration)
            .max()
            .unwrap_or(Duration::ZERO);
        poses.max(overlays)
    }
}

/// Which in-flight animations a cancel applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelScope {
    /// The top card only (a new gesture is taking over).
    TopCard,
    /// Background cards only.
    BackgroundCards,
    /// Everything.
    AllCards,
}

/// An external tweening runtime.
///
/// `animate` must return immediately; interpolation happens in the embedder's
/// frame loop. `cancel` drops matching in-flight plans without completing
/// them.
pub trait TweenEngine {
    fn animate(&mut self, plan: TweenPlan);
    fn cancel(&mut self, scope: CancelScope);
}

/// A deterministic engine that records plans instead of running them.
///
/// Tests and headless embedders pop the recorded plans and drive
/// `CardStack::animation_finished` explicitly.
#[derive(Debug, Default)]
pub struct ManualTweenEngine {
    plans: Vec<TweenPlan>,
    cancels: Vec<CancelScope>,
}

impl ManualTweenEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans recorded so far, oldest first.
    #[must_use]
    pub fn plans(&self) -> &[TweenPlan] {
        &self.plans
    }

    /// The most recently recorded plan.
    #[must_use]
    pub fn last_plan(&self) -> Option<&TweenPlan> {
        self.plans.last()
    }

    /// Drain the recorded plans.
    pub fn take_plans(&mut self) -> Vec<TweenPlan> {
        std::mem::take(&mut self.plans)
    }

    /// Cancel scopes recorded so far.
    #[must_use]
    pub fn cancels(&self) -> &[CancelScope] {
        &self.cancels
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.plans.clear();
        self.cancels.clear();
    }
}

impl TweenEngine for ManualTweenEngine {
    fn animate(&mut self, plan: TweenPlan) {
        self.plans.push(plan);
    }

    fn cancel(&mut self, scope: CancelScope) {
        self.cancels.push(scope);
    }
}
