#![forbid(unsafe_code)]

//! Stack state, gesture physics, and animation orchestration for swipedeck.
//!
//! The modules mirror the data flow of a swipe: raw drag samples are measured
//! against per-card thresholds ([`card`]), converted into poses and overlay
//! alphas ([`transform`]), and resolved into a commit-or-cancel decision that
//! mutates the authoritative index bookkeeping ([`state`]). The controller
//! ([`stack`]) then refills the visible window and hands a declarative
//! transition plan ([`animator`], [`tween`]) to an injected tweening engine
//! for the visual catch-up.

pub mod animator;
pub mod card;
pub mod delegate;
pub mod error;
pub mod layout;
pub mod options;
pub mod state;
pub mod stack;
pub mod transform;
pub mod tween;

pub use card::{CardConfig, SwipeCard, SwipeResolution};
pub use delegate::{CardStackDataSource, NoopDelegate, StackDelegate};
pub use error::InvalidUpdate;
pub use layout::Footer;
pub use options::{CardAnimationOptions, StackAnimationOptions};
pub use stack::{CardStack, StackPhase, VisibleCard};
pub use state::{StackStateManager, Swipe};
pub use tween::{
    AnimationToken, CancelScope, ManualTweenEngine, OverlayTrack, PoseTrack, TransitionKind,
    TweenCurve, TweenEngine, TweenPlan,
};
