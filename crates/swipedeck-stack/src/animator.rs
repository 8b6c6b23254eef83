#![forbid(unsafe_code)]

//! Transition plan building.
//!
//! Each structural transition — reset, swipe, reverse swipe, shift — is
//! compiled here into one [`TweenPlan`]: the top card's track carries the
//! per-card timing policy, background tracks carry the stack-level timing
//! (half the card policy unless overridden), and the plan duration covers
//! whichever runs longer.
//!
//! # Invariants
//!
//! 1. Plans are pure values: building one mutates nothing.
//! 2. Every track ends at or before the plan duration.
//! 3. A swipe plan always spans `delay + background duration`, even when
//!    there are no background tracks to run (the completion timing contract).

use std::time::Duration;

use swipedeck_core::{Direction, Size, Transform, Vector};

use crate::card::SwipeCard;
use crate::options::StackAnimationOptions;
use crate::stack::VisibleCard;
use crate::transform::settled_transform;
use crate::tween::{AnimationToken, OverlayTrack, PoseTrack, TweenCurve, TweenPlan};

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// How long the dismissed card takes to leave.
///
/// Forced (programmatic) swipes always run the full configured duration.
/// Drag-released swipes shorten with the release speed: at or above the
/// minimum swipe speed the duration is the reciprocal of the velocity
/// factor, so faster flicks exit faster.
#[must_use]
pub fn swipe_duration(card: &SwipeCard, direction: Direction, forced: bool) -> Duration {
    let options = &card.config().options;
    if forced {
        return options.total_swipe_duration();
    }
    let velocity_factor =
        card.drag_speed(direction) / card.config().policy.minimum_swipe_speed(direction);
    if velocity_factor < 1.0 {
        options.total_swipe_duration()
    } else {
        Duration::from_secs_f32(1.0 / velocity_factor)
    }
}

/// Background reflow duration for a swipe: the stack override, or half of
/// whichever card-level policy applies.
#[must_use]
pub fn stack_swipe_duration(
    card: &SwipeCard,
    direction: Direction,
    forced: bool,
    stack_options: &StackAnimationOptions,
) -> Duration {
    if let Some(duration) = stack_options.swipe_duration {
        return duration;
    }
    let options = &card.config().options;
    if forced {
        return options.total_swipe_duration() / 2;
    }
    let velocity_factor =
        card.drag_speed(direction) / card.config().policy.minimum_swipe_speed(direction);
    if velocity_factor < 1.0 {
        options.total_swipe_duration() / 2
    } else {
        Duration::from_secs_f32(1.0 / (2.0 * velocity_factor))
    }
}

/// Background reflow delay: forced swipes wait out the overlay fade-in.
#[must_use]
pub fn swipe_delay(card: &SwipeCard, forced: bool) -> Duration {
    if forced {
        let options = &card.config().options;
        options
            .total_swipe_duration()
            .mul_f32(options.relative_swipe_overlay_fade_duration())
    } else {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Exit geometry
// ---------------------------------------------------------------------------

/// Rotation of the dismissed card as it exits. Vertical exits don't rotate;
/// horizontal exits rotate to twice the configured maximum, with the sign
/// set by the touch half so the card tips the way it was held.
#[must_use]
pub fn exit_rotation(card: &SwipeCard, direction: Direction, forced: bool) -> f32 {
    if !direction.is_horizontal() {
        return 0.0;
    }
    let rotation_direction_y = if direction == Direction::Left { -1.0 } else { 1.0 };
    let max_angle = card.config().options.maximum_rotation_angle();

    if forced {
        return 2.0 * rotation_direction_y * max_angle;
    }
    let Some(touch) = card.touch_location() else {
        return 2.0 * rotation_direction_y * max_angle;
    };
    let upper_half = touch.y < card.frame().height() / 2.0;
    if (direction == Direction::Left && upper_half)
        || (direction == Direction::Right && !upper_half)
    {
        -2.0 * max_angle
    } else {
        2.0 * max_angle
    }
}

/// The off-bounds pose the dismissed card exits to: far enough along the
/// drag heading (or the bare direction, for forced swipes) that no part of
/// the card remains inside the container.
#[must_use]
pub fn exit_transform(
    card: &SwipeCard,
    container: Size,
    direction: Direction,
    forced: bool,
) -> Transform {
    let heading = if forced {
        direction.vector()
    } else {
        let normalized = card
            .drag()
            .map_or(Vector::ZERO, |drag| drag.translation.normalized());
        if normalized == Vector::ZERO {
            direction.vector()
        } else {
            normalized
        }
    };
    let magnitude = container.max_side() + card.frame().size.diagonal();
    Transform::translation_rotation(
        heading.scaled(magnitude),
        exit_rotation(card, direction, forced),
    )
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Cancel: the top card springs back to identity while its active overlay
/// fades out, and background cards return to their own settled poses.
#[must_use]
pub fn reset_plan(
    token: AnimationToken,
    top: &SwipeCard,
    top_index: usize,
    background: &[VisibleCard],
    container: Size,
    stack_options: &StackAnimationOptions,
    scales_background: bool,
) -> TweenPlan {
    let card_options = &top.config().options;
    let card_duration = card_options.total_reset_duration();
    let background_duration = stack_options.reset_duration.unwrap_or(card_duration / 2);

    let mut poses = vec![PoseTrack {
        index: top_index,
        start: Duration::ZERO,
        duration: card_duration,
        curve: TweenCurve::Spring {
            damping: card_options.reset_spring_damping(),
        },
        from: top.transform(),
        to: Transform::IDENTITY,
    }];
    let mut overlays = Vec::new();
    if let Some(direction) = top.active_direction(container) {
        overlays.push(OverlayTrack {
            index: top_index,
            direction,
            start: Duration::ZERO,
            duration: card_duration,
            from_alpha: top.overlay_alpha(direction),
            to_alpha: 0.0,
        });
    }
    for entry in background {
        poses.push(PoseTrack {
            index: entry.index(),
            start: Duration::ZERO,
            duration: background_duration,
            curve: TweenCurve::EaseInOut,
            from: entry.card().transform(),
            to: settled_transform(entry.position() as isize, scales_background),
        });
    }

    TweenPlan {
        token,
        duration: card_duration.max(background_duration),
        poses,
        overlays,
    }
}

/// Swipe: the dismissed card exits while the refilled window catches up to
/// its new positions.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn swipe_plan(
    token: AnimationToken,
    top: &SwipeCard,
    top_index: usize,
    direction: Direction,
    forced: bool,
    window: &[VisibleCard],
    container: Size,
    stack_options: &StackAnimationOptions,
    scales_background: bool,
) -> TweenPlan {
    let card_duration = swipe_duration(top, direction, forced);
    let fade_fraction = if forced {
        top.config().options.relative_swipe_overlay_fade_duration()
    } else {
        0.0
    };
    let fade_duration = card_duration.mul_f32(fade_fraction);
    let delay = swipe_delay(top, forced);
    let background_duration = stack_swipe_duration(top, direction, forced, stack_options);

    let mut overlays = Vec::new();
    for other in top
        .config()
        .directions
        .iter_ordered()
        .filter(|d| *d != direction)
    {
        overlays.push(OverlayTrack {
            index: top_index,
            direction: other,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            from_alpha: top.overlay_alpha(other),
            to_alpha: 0.0,
        });
    }
    overlays.push(OverlayTrack {
        index: top_index,
        direction,
        start: Duration::ZERO,
        duration: fade_duration,
        from_alpha: top.overlay_alpha(direction),
        to_alpha: 1.0,
    });

    let mut poses = vec![PoseTrack {
        index: top_index,
        start: fade_duration,
        duration: card_duration.saturating_sub(fade_duration),
        curve: TweenCurve::Linear,
        from: top.transform(),
        to: exit_transform(top, container, direction, forced),
    }];
    for entry in window {
        poses.push(PoseTrack {
            index: entry.index(),
            start: delay,
            duration: background_duration,
            curve: TweenCurve::EaseInOut,
            from: entry.card().transform(),
            to: settled_transform(entry.position() as isize, scales_background),
        });
    }

    TweenPlan {
        token,
        duration: card_duration.max(delay + background_duration),
        poses,
        overlays,
    }
}

/// Undo: replay the exit pose as the starting keyframe, animate back to
/// identity, and fade the restored overlay out over the tail; background
/// cards slide from one position up to their own.
#[must_use]
pub fn reverse_swipe_plan(
    token: AnimationToken,
    window: &[VisibleCard],
    direction: Direction,
    container: Size,
    stack_options: &StackAnimationOptions,
    scales_background: bool,
) -> TweenPlan {
    let top = &window[0];
    let card_options = &top.card().config().options;
    let total = card_options.total_reverse_swipe_duration();
    let fade_duration = total.mul_f32(card_options.relative_reverse_swipe_overlay_fade_duration());
    let pose_duration = total.saturating_sub(fade_duration);
    let background_duration = stack_options.undo_duration.unwrap_or(total / 2);

    let mut poses = vec![PoseTrack {
        index: top.index(),
        start: Duration::ZERO,
        duration: pose_duration,
        curve: TweenCurve::Linear,
        from: exit_transform(top.card(), container, direction, true),
        to: Transform::IDENTITY,
    }];
    let mut overlays = Vec::new();
    for allowed in top.card().config().directions.iter_ordered() {
        // Start keyframe: the restored direction's overlay at full alpha,
        // everything else hidden.
        overlays.push(OverlayTrack {
            index: top.index(),
            direction: allowed,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            from_alpha: 0.0,
            to_alpha: if allowed == direction { 1.0 } else { 0.0 },
        });
    }
    overlays.push(OverlayTrack {
        index: top.index(),
        direction,
        start: pose_duration,
        duration: fade_duration,
        from_alpha: 1.0,
        to_alpha: 0.0,
    });

    for entry in &window[1..] {
        poses.push(PoseTrack {
            index: entry.index(),
            start: Duration::ZERO,
            duration: background_duration,
            curve: TweenCurve::EaseInOut,
            from: settled_transform(entry.position() as isize - 1, scales_background),
            to: settled_transform(entry.position() as isize, scales_background),
        });
    }

    TweenPlan {
        token,
        duration: total.max(background_duration),
        poses,
        overlays,
    }
}

/// Shift: the stack slides from where the items used to be to where they now
/// are.
#[must_use]
pub fn shift_plan(
    token: AnimationToken,
    window: &[VisibleCard],
    distance: isize,
    stack_options: &StackAnimationOptions,
    scales_background: bool,
) -> TweenPlan {
    let duration = stack_options.shift_duration;
    let poses = window
        .iter()
        .map(|entry| PoseTrack {
            index: entry.index(),
            start: Duration::ZERO,
            duration,
            curve: TweenCurve::EaseInOut,
            from: settled_transform(entry.position() as isize + distance, scales_background),
            to: settled_transform(entry.position() as isize, scales_background),
        })
        .collect();

    TweenPlan {
        token,
        duration,
        poses,
        overlays: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipedeck_core::{DragState, Point, Rect};

    use crate::card::CardConfig;
    use crate::tween::TransitionKind;

    const CONTAINER: Size = Size::new(400.0, 800.0);

    fn token(kind: TransitionKind) -> AnimationToken {
        AnimationToken { id: 7, kind }
    }

    // mul_f32 rounds through f32, so fade-derived offsets need tolerance.
    fn close(a: Duration, b: Duration) -> bool {
        a.abs_diff(b) < Duration::from_micros(50)
    }

    fn card() -> SwipeCard {
        let mut card = SwipeCard::new(CardConfig::default());
        card.set_frame(Rect::new(0.0, 0.0, 300.0, 400.0));
        card
    }

    fn dragged_card(dx: f32, dy: f32, vx: f32, vy: f32) -> SwipeCard {
        let mut card = card();
        card.begin_drag(Point::new(150.0, 100.0));
        card.continue_drag(
            DragState::new(Vector::new(dx, dy), Vector::new(vx, vy)),
            CONTAINER,
        );
        card
    }

    fn window(entries: &[(usize, usize)]) -> Vec<VisibleCard> {
        entries
            .iter()
            .map(|&(position, index)| VisibleCard::new(position, index, card()))
            .collect()
    }

    // --- duration policy tests ---

    #[test]
    fn forced_swipe_uses_full_duration() {
        let top = dragged_card(200.0, 0.0, 5000.0, 0.0);
        assert_eq!(
            swipe_duration(&top, Direction::Right, true),
            Duration::from_millis(700)
        );
    }

    #[test]
    fn slow_release_uses_full_duration() {
        let top = dragged_card(200.0, 0.0, 500.0, 0.0);
        assert_eq!(
            swipe_duration(&top, Direction::Right, false),
            Duration::from_millis(700)
        );
    }

    #[test]
    fn fast_flick_shortens_duration() {
        // velocity factor = 2200 / 1100 = 2 → 0.5s.
        let top = dragged_card(200.0, 0.0, 2200.0, 0.0);
        assert_eq!(
            swipe_duration(&top, Direction::Right, false),
            Duration::from_secs_f32(0.5)
        );
    }

    #[test]
    fn stack_duration_is_half_the_card_policy() {
        let top = dragged_card(200.0, 0.0, 2200.0, 0.0);
        let options = StackAnimationOptions::new();
        assert_eq!(
            stack_swipe_duration(&top, Direction::Right, true, &options),
            Duration::from_millis(350)
        );
        assert_eq!(
            stack_swipe_duration(&top, Direction::Right, false, &options),
            Duration::from_secs_f32(0.25)
        );
    }

    #[test]
    fn stack_duration_override_wins() {
        let top = dragged_card(200.0, 0.0, 2200.0, 0.0);
        let options = StackAnimationOptions {
            swipe_duration: Some(Duration::from_millis(42)),
            ..StackAnimationOptions::new()
        };
        assert_eq!(
            stack_swipe_duration(&top, Direction::Right, false, &options),
            Duration::from_millis(42)
        );
    }

    #[test]
    fn delay_only_for_forced_swipes() {
        let top = card();
        assert_eq!(swipe_delay(&top, false), Duration::ZERO);
        // 700ms * 0.15 = 105ms.
        assert!(close(swipe_delay(&top, true), Duration::from_millis(105)));
    }

    // --- exit geometry tests ---

    #[test]
    fn vertical_exits_do_not_rotate() {
        let top = dragged_card(0.0, -200.0, 0.0, -2000.0);
        assert_eq!(exit_rotation(&top, Direction::Up, false), 0.0);
        assert_eq!(exit_rotation(&top, Direction::Down, true), 0.0);
    }

    #[test]
    fn forced_exit_rotation_is_double_max() {
        let top = card();
        let max = top.config().options.maximum_rotation_angle();
        assert_eq!(exit_rotation(&top, Direction::Right, true), 2.0 * max);
        assert_eq!(exit_rotation(&top, Direction::Left, true), -2.0 * max);
    }

    #[test]
    fn exit_rotation_sign_follows_touch_half() {
        let max = CardConfig::default().options.maximum_rotation_angle();
        // Touch in upper half (y=100 of 400): left exits negative.
        let top = dragged_card(-200.0, 0.0, 0.0, 0.0);
        assert_eq!(exit_rotation(&top, Direction::Left, false), -2.0 * max);
        assert_eq!(exit_rotation(&top, Direction::Right, false), 2.0 * max);
    }

    #[test]
    fn exit_translation_clears_container() {
        let top = dragged_card(200.0, 0.0, 0.0, 0.0);
        let pose = exit_transform(&top, CONTAINER, Direction::Right, false);
        // max side 800 + diagonal 500 = 1300, heading (1, 0).
        assert!((pose.translation.dx - 1300.0).abs() < 1e-3);
        assert!(pose.translation.dy.abs() < 1e-3);
    }

    #[test]
    fn forced_exit_ignores_drag_heading() {
        let top = dragged_card(50.0, 120.0, 0.0, 0.0);
        let pose = exit_transform(&top, CONTAINER, Direction::Left, true);
        assert!(pose.translation.dx < 0.0);
        assert_eq!(pose.translation.dy, 0.0);
    }

    #[test]
    fn free_exit_follows_drag_heading() {
        let top = dragged_card(100.0, 100.0, 0.0, 0.0);
        let pose = exit_transform(&top, CONTAINER, Direction::Right, false);
        assert!((pose.translation.dx - pose.translation.dy).abs() < 1e-3);
    }

    #[test]
    fn zero_drag_exit_falls_back_to_direction() {
        let top = card();
        let pose = exit_transform(&top, CONTAINER, Direction::Down, false);
        assert_eq!(pose.translation.dx, 0.0);
        assert!(pose.translation.dy > 0.0);
    }

    // --- plan tests ---

    #[test]
    fn reset_plan_springs_top_and_settles_background() {
        let top = dragged_card(80.0, 0.0, 0.0, 0.0);
        let background = window(&[(1, 11), (2, 12)]);
        let plan = reset_plan(
            token(TransitionKind::Reset),
            &top,
            10,
            &background,
            CONTAINER,
            &StackAnimationOptions::new(),
            true,
        );

        assert_eq!(plan.duration, Duration::from_millis(600));
        assert_eq!(plan.poses.len(), 3);
        assert!(matches!(
            plan.poses[0].curve,
            TweenCurve::Spring { damping } if (damping - 0.5).abs() < 1e-6
        ));
        assert_eq!(plan.poses[0].to, Transform::IDENTITY);
        // Background halves the card reset duration.
        assert_eq!(plan.poses[1].duration, Duration::from_millis(300));
        assert_eq!(plan.poses[1].to, settled_transform(1, true));
        // The active (right) overlay fades out.
        assert_eq!(plan.overlays.len(), 1);
        assert_eq!(plan.overlays[0].direction, Direction::Right);
        assert_eq!(plan.overlays[0].to_alpha, 0.0);
    }

    #[test]
    fn swipe_plan_covers_delay_plus_background() {
        let top = dragged_card(200.0, 0.0, 0.0, 0.0);
        let new_window = window(&[(0, 1), (1, 2)]);
        let plan = swipe_plan(
            token(TransitionKind::Swipe),
            &top,
            0,
            Direction::Right,
            true,
            &new_window,
            CONTAINER,
            &StackAnimationOptions::new(),
            true,
        );

        // Forced: card 700ms, delay 105ms, background 350ms.
        assert_eq!(plan.duration, Duration::from_millis(700));
        let background: Vec<_> = plan.poses.iter().filter(|t| t.index != 0).collect();
        assert_eq!(background.len(), 2);
        for track in background {
            assert!(close(track.start, Duration::from_millis(105)));
            assert_eq!(track.duration, Duration::from_millis(350));
        }
        // Top pose starts after the overlay fade-in.
        assert!(close(plan.poses[0].start, Duration::from_millis(105)));
    }

    #[test]
    fn swipe_plan_empty_window_keeps_timing_contract() {
        let top = dragged_card(200.0, 0.0, 2200.0, 0.0);
        let plan = swipe_plan(
            token(TransitionKind::Swipe),
            &top,
            0,
            Direction::Right,
            false,
            &[],
            CONTAINER,
            &StackAnimationOptions::new(),
            true,
        );
        // Non-forced fast flick: card 0.5s, background 0.25s, no delay.
        assert_eq!(plan.duration, Duration::from_secs_f32(0.5));
        assert!(plan.duration >= plan.tracks_end());
    }

    #[test]
    fn swipe_plan_zeroes_other_overlays() {
        let top = dragged_card(200.0, 0.0, 0.0, 0.0);
        let plan = swipe_plan(
            token(TransitionKind::Swipe),
            &top,
            0,
            Direction::Right,
            false,
            &[],
            CONTAINER,
            &StackAnimationOptions::new(),
            true,
        );
        for track in &plan.overlays {
            if track.direction == Direction::Right {
                assert_eq!(track.to_alpha, 1.0);
            } else {
                assert_eq!(track.to_alpha, 0.0);
                assert_eq!(track.duration, Duration::ZERO);
            }
        }
    }

    #[test]
    fn reverse_swipe_plan_replays_exit_pose() {
        let new_window = window(&[(0, 0), (1, 1), (2, 2)]);
        let plan = reverse_swipe_plan(
            token(TransitionKind::ReverseSwipe),
            &new_window,
            Direction::Left,
            CONTAINER,
            &StackAnimationOptions::new(),
            true,
        );

        assert_eq!(plan.duration, Duration::from_millis(250));
        // Top card: from off-bounds back to identity.
        assert!(plan.poses[0].from.translation.dx < 0.0);
        assert_eq!(plan.poses[0].to, Transform::IDENTITY);
        // 250ms minus the 0.15 fade tail.
        assert!(close(plan.poses[0].duration, Duration::from_micros(212_500)));
        // Background slides from one position up.
        assert_eq!(plan.poses[1].from, settled_transform(0, true));
        assert_eq!(plan.poses[1].to, settled_transform(1, true));
        // The restored overlay ends hidden.
        let fade = plan
            .overlays
            .iter()
            .find(|t| t.direction == Direction::Left && t.duration > Duration::ZERO)
            .unwrap();
        assert_eq!(fade.from_alpha, 1.0);
        assert_eq!(fade.to_alpha, 0.0);
    }

    #[test]
    fn shift_plan_slides_from_old_positions() {
        let new_window = window(&[(0, 2), (1, 3), (2, 4)]);
        let plan = shift_plan(
            token(TransitionKind::Shift),
            &new_window,
            2,
            &StackAnimationOptions::new(),
            true,
        );

        assert_eq!(plan.duration, Duration::from_millis(100));
        assert_eq!(plan.poses.len(), 3);
        // Every card starts at the pose of (position + distance).
        assert_eq!(plan.poses[0].from, settled_transform(2, true));
        assert_eq!(plan.poses[0].to, settled_transform(0, true));
        assert_eq!(plan.poses[1].from, settled_transform(3, true));
        assert_eq!(plan.poses[1].to, settled_transform(1, true));
    }

    #[test]
    fn negative_shift_uses_negative_offsets() {
        let new_window = window(&[(0, 4), (1, 0)]);
        let plan = shift_plan(
            token(TransitionKind::Shift),
            &new_window,
            -1,
            &StackAnimationOptions::new(),
            true,
        );
        // Position 0 slides in from "position -1", which scales like any
        // background position.
        assert_eq!(plan.poses[0].from, settled_transform(-1, true));
        assert_eq!(plan.poses[0].to, settled_transform(0, true));
    }
}
