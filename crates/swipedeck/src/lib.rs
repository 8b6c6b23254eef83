#![forbid(unsafe_code)]

//! Swipedeck public facade crate.
//!
//! Re-exports the stable surface of the stack engine and offers a
//! lightweight prelude for day-to-day usage. The engine itself is headless:
//! you feed it drag samples and a tweening runtime, it hands back poses,
//! plans, and callbacks.

// --- Core re-exports -------------------------------------------------------

pub use swipedeck_core::{
    Direction, DirectionMap, DirectionSet, DragState, Insets, Point, Rect, Size, SwipePolicy,
    Transform, Vector,
};

// --- Stack re-exports ------------------------------------------------------

pub use swipedeck_stack::{
    AnimationToken, CancelScope, CardAnimationOptions, CardConfig, CardStack, CardStackDataSource,
    Footer, InvalidUpdate, ManualTweenEngine, NoopDelegate, OverlayTrack, PoseTrack,
    StackAnimationOptions, StackDelegate, StackPhase, SwipeCard, SwipeResolution,
    StackStateManager, Swipe, TransitionKind, TweenCurve, TweenEngine, TweenPlan, VisibleCard,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use swipedeck_core::{Direction, DirectionSet, DragState, Point, Rect, Vector};
    pub use swipedeck_stack::{
        CardConfig, CardStack, CardStackDataSource, StackDelegate, StackPhase, TweenEngine,
        TweenPlan,
    };
}
