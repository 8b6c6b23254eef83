#![forbid(unsafe_code)]

//! The top-level card stack state machine.
//!
//! [`CardStack`] owns the visible window, wires gesture callbacks into
//! [`StackStateManager`] mutations, and hands transition plans to the
//! injected tweening engine. The gesture path runs
//! `Idle → Dragging → Committing | Cancelling → Idle`; the committing and
//! cancelling legs are closed by the engine's completion, routed back
//! through [`animation_finished`](CardStack::animation_finished).
//!
//! # Invariants
//!
//! 1. `visible_cards.len() == min(remaining, number_of_visible_cards)` after
//!    every mutating operation; `visible_cards[i]` holds `remaining[i]`.
//! 2. At most one structural transition is in flight: commands arriving
//!    while `is_animating` are dropped, not queued.
//! 3. A structural mutation whose data-source count delta is wrong panics
//!    with [`InvalidUpdate`]; gesture commands in impossible states are
//!    silent no-ops.
//!
//! # Failure Modes
//!
//! - A data source whose count disagrees with an insert/append/delete is a
//!   contract violation and aborts (see [`InvalidUpdate`]).
//! - An engine that never completes leaves the stack gated; the engine
//!   contract requires exactly one completion per plan.

use swipedeck_core::{Direction, DragState, Insets, Point, Rect, Size, Transform, Vector};

use crate::animator;
use crate::card::{SwipeCard, SwipeResolution};
use crate::delegate::{CardStackDataSource, NoopDelegate, StackDelegate};
use crate::error::InvalidUpdate;
use crate::layout;
use crate::options::StackAnimationOptions;
use crate::state::StackStateManager;
use crate::transform::{self, settled_transform};
use crate::tween::{AnimationToken, CancelScope, TransitionKind, TweenEngine};

/// Where the stack's gesture state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPhase {
    #[default]
    Idle,
    /// A drag is live on the top card.
    Dragging,
    /// A swipe was committed and its transition is in flight.
    Committing(Direction),
    /// A cancelled drag is springing back.
    Cancelling,
}

/// One entry of the visible window: a materialized card plus its position
/// and backing index.
#[derive(Debug, Clone)]
pub struct VisibleCard {
    position: usize,
    index: usize,
    card: SwipeCard,
}

impl VisibleCard {
    pub(crate) fn new(position: usize, index: usize, card: SwipeCard) -> Self {
        Self {
            position,
            index,
            card,
        }
    }

    /// Window position, 0 = top.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Backing-data index.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn card(&self) -> &SwipeCard {
        &self.card
    }

    pub(crate) fn card_mut(&mut self) -> &mut SwipeCard {
        &mut self.card
    }

    /// Current pose, convenience for renderers.
    #[inline]
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.card.transform()
    }

    /// Current frame, convenience for renderers.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.card.frame()
    }
}

/// A gesture-driven swipeable card stack.
///
/// Generic over its three collaborators so embedders and tests can reach
/// them after construction: the data source `S`, the delegate `D`, and the
/// tweening engine `E`.
#[derive(Debug)]
pub struct CardStack<S, D, E> {
    data_source: S,
    delegate: D,
    engine: E,

    state: StackStateManager,
    stack_options: StackAnimationOptions,
    bounds: Rect,
    insets: Insets,
    number_of_visible_cards: usize,
    scales_background_cards: bool,
    recognize_horizontal_drag: bool,
    recognize_vertical_drag: bool,

    visible_cards: Vec<VisibleCard>,
    is_animating: bool,
    phase: StackPhase,
    next_animation_id: u64,
}

impl<S: CardStackDataSource, E: TweenEngine> CardStack<S, NoopDelegate, E> {
    /// A stack with the default (no-op) delegate, loaded from `data_source`.
    pub fn new(data_source: S, engine: E, bounds: Rect) -> Self {
        Self::with_delegate(data_source, NoopDelegate, engine, bounds)
    }
}

impl<S, D, E> CardStack<S, D, E>
where
    S: CardStackDataSource,
    D: StackDelegate,
    E: TweenEngine,
{
    /// A stack with an explicit delegate, loaded from `data_source`.
    pub fn with_delegate(data_source: S, delegate: D, engine: E, bounds: Rect) -> Self {
        let mut stack = Self {
            data_source,
            delegate,
            engine,
            state: StackStateManager::new(),
            stack_options: StackAnimationOptions::new(),
            bounds,
            insets: Insets::all(10.0),
            number_of_visible_cards: 2,
            scales_background_cards: true,
            recognize_horizontal_drag: true,
            recognize_vertical_drag: true,
            visible_cards: Vec::new(),
            is_animating: false,
            phase: StackPhase::Idle,
            next_animation_id: 0,
        };
        stack.reload_data();
        stack
    }

    // --- configuration ---

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the stack and relayout the window.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.settle_window();
    }

    #[inline]
    #[must_use]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.settle_window();
    }

    #[inline]
    #[must_use]
    pub fn number_of_visible_cards(&self) -> usize {
        self.number_of_visible_cards
    }

    /// Change the window size and rebuild the window to match.
    pub fn set_number_of_visible_cards(&mut self, count: usize) {
        self.number_of_visible_cards = count;
        self.reload_visible_cards();
    }

    pub fn set_scales_background_cards(&mut self, scales: bool) {
        self.scales_background_cards = scales;
        self.settle_window();
    }

    pub fn set_recognize_horizontal_drag(&mut self, recognize: bool) {
        self.recognize_horizontal_drag = recognize;
    }

    pub fn set_recognize_vertical_drag(&mut self, recognize: bool) {
        self.recognize_vertical_drag = recognize;
    }

    #[inline]
    #[must_use]
    pub fn stack_options(&self) -> &StackAnimationOptions {
        &self.stack_options
    }

    pub fn set_stack_options(&mut self, options: StackAnimationOptions) {
        self.stack_options = options;
    }

    // --- collaborators ---

    #[inline]
    #[must_use]
    pub fn data_source(&self) -> &S {
        &self.data_source
    }

    pub fn data_source_mut(&mut self) -> &mut S {
        &mut self.data_source
    }

    #[inline]
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    #[inline]
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // --- queries ---

    /// The visible window, top first.
    #[inline]
    #[must_use]
    pub fn visible_cards(&self) -> &[VisibleCard] {
        &self.visible_cards
    }

    /// Backing index of the current top card.
    #[must_use]
    pub fn top_index(&self) -> Option<usize> {
        self.visible_cards.first().map(VisibleCard::index)
    }

    /// Backing indices not yet swiped, in display order.
    #[must_use]
    pub fn remaining_indices(&self) -> &[usize] {
        self.state.remaining_indices()
    }

    /// Number of cards left to swipe.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.state.remaining_indices().len()
    }

    /// Swiped backing indices in swipe order.
    #[must_use]
    pub fn swiped_indices(&self) -> Vec<usize> {
        self.state.swipes().iter().map(|s| s.index).collect()
    }

    /// Current window position of a backing index, if it remains.
    #[must_use]
    pub fn position_for_index(&self, index: usize) -> Option<usize> {
        self.state
            .remaining_indices()
            .iter()
            .position(|&i| i == index)
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> StackPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// Whether gesture-driven commands are currently accepted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.is_animating
            && self
                .visible_cards
                .first()
                .is_none_or(|entry| entry.card().is_interaction_enabled())
    }

    /// The card container frame inside the stack bounds.
    #[must_use]
    pub fn container_frame(&self) -> Rect {
        layout::container_frame(self.bounds, self.insets)
    }

    fn container_size(&self) -> Size {
        self.container_frame().size
    }

    fn card_frame(&self) -> Rect {
        layout::card_frame(self.bounds, self.insets)
    }

    // --- gesture surface ---

    /// Axis filter for the embedding input layer: consult before starting a
    /// drag with this initial velocity.
    #[must_use]
    pub fn should_begin_drag(&self, velocity: Vector) -> bool {
        if velocity.dx.abs() > velocity.dy.abs() {
            return self.recognize_horizontal_drag;
        }
        if velocity.dx.abs() < velocity.dy.abs() {
            return self.recognize_vertical_drag;
        }
        true
    }

    /// A drag touched down on the top card at `touch` (card coordinates).
    pub fn begin_drag(&mut self, touch: Point) {
        let Some(entry) = self.visible_cards.first() else {
            return;
        };
        if !entry.card().is_interaction_enabled() {
            return;
        }
        let top_index = entry.index();
        // A new gesture takes over whatever was still animating.
        self.engine.cancel(CancelScope::TopCard);
        self.engine.cancel(CancelScope::BackgroundCards);
        self.phase = StackPhase::Dragging;
        self.delegate.did_begin_drag(top_index);
        self.visible_cards[0].card_mut().begin_drag(touch);
    }

    /// The live drag moved.
    pub fn continue_drag(&mut self, sample: DragState) {
        if self.phase != StackPhase::Dragging {
            return;
        }
        let Some(top_index) = self.top_index() else {
            return;
        };
        if !self.delegate.can_move(top_index) {
            return;
        }
        self.delegate.did_continue_drag(top_index);

        let container = self.container_size();
        let scales = self.scales_background_cards;
        let Some((first, rest)) = self.visible_cards.split_first_mut() else {
            return;
        };
        first.card_mut().continue_drag(sample, container);
        let top = first.card();
        for entry in rest.iter_mut() {
            let pose =
                transform::background_drag_transform(top, container, entry.position, scales);
            entry.card_mut().set_transform(pose);
        }
    }

    /// The drag lifted; resolve it into a swipe or a cancel.
    pub fn end_drag(&mut self, sample: DragState) {
        if self.phase != StackPhase::Dragging {
            return;
        }
        let Some(top_index) = self.top_index() else {
            return;
        };
        if !self.delegate.can_move(top_index) {
            return;
        }
        self.delegate.did_end_drag(top_index);

        let container = self.container_size();
        let resolution = self.visible_cards[0].card_mut().end_drag(sample, container);
        match resolution {
            SwipeResolution::Swiped(direction) => self.swipe_action(direction, false, true),
            SwipeResolution::Cancelled => self.cancel_drag(),
        }
    }

    /// The top card was tapped.
    pub fn tap(&mut self, touch: Point) {
        let Some(top_index) = self.top_index() else {
            return;
        };
        self.visible_cards[0].card_mut().record_touch(touch);
        self.delegate.did_select_card(top_index);
    }

    // --- public mutations ---

    /// Programmatically swipe the top card.
    ///
    /// Dropped while animating or disabled.
    pub fn swipe(&mut self, direction: Direction, animated: bool) {
        if !self.is_enabled() {
            return;
        }
        self.swipe_action(direction, true, animated);
    }

    /// Return the most recently swiped card to the top.
    ///
    /// Dropped while animating or when the history is empty.
    pub fn undo_last_swipe(&mut self, animated: bool) {
        if !self.is_enabled() {
            return;
        }
        let Some(swipe) = self.state.undo_swipe() else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(index = swipe.index, direction = %swipe.direction, "undo swipe");

        self.reload_visible_cards();
        self.delegate.did_undo(swipe.index, swipe.direction);

        if !animated || self.visible_cards.is_empty() {
            return;
        }
        let token = self.next_token(TransitionKind::ReverseSwipe);
        let plan = animator::reverse_swipe_plan(
            token,
            &self.visible_cards,
            swipe.direction,
            self.container_size(),
            &self.stack_options,
            self.scales_background_cards,
        );
        self.visible_cards[0].card_mut().set_interaction_enabled(false);
        self.is_animating = true;
        self.delegate.did_begin_animating();
        self.engine.animate(plan);
    }

    /// Rotate the remaining cards by `distance`, positive toward the back.
    ///
    /// Dropped while animating, for zero distance, or with fewer than two
    /// visible cards.
    pub fn shift(&mut self, distance: isize, animated: bool) {
        if !self.is_enabled() || distance == 0 || self.visible_cards.len() <= 1 {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(distance, "shift");

        self.state.shift(distance);
        self.reload_visible_cards();

        if !animated {
            return;
        }
        let token = self.next_token(TransitionKind::Shift);
        let plan = animator::shift_plan(
            token,
            &self.visible_cards,
            distance,
            &self.stack_options,
            self.scales_background_cards,
        );
        self.is_animating = true;
        self.delegate.did_begin_animating();
        self.engine.animate(plan);
    }

    /// Insert a new backing index at a window position.
    ///
    /// The data source must already report the grown count; a mismatch is a
    /// fatal consistency violation.
    pub fn insert_card(&mut self, index: usize, position: usize) {
        let old_count = self.state.total_index_count();
        let new_count = self.data_source.number_of_cards();
        self.state.insert(index, position);
        if new_count != old_count + 1 {
            panic!(
                "{}",
                InvalidUpdate {
                    old_count,
                    new_count,
                    inserted: 1,
                    deleted: 0,
                }
            );
        }
        self.reload_visible_cards();
    }

    /// Append new backing indices at the bottom of the stack.
    pub fn append_cards(&mut self, indices: &[usize]) {
        let old_count = self.state.total_index_count();
        let new_count = self.data_source.number_of_cards();
        for &index in indices {
            let tail = self.state.remaining_indices().len();
            self.state.insert(index, tail);
        }
        if new_count != old_count + indices.len() {
            panic!(
                "{}",
                InvalidUpdate {
                    old_count,
                    new_count,
                    inserted: indices.len(),
                    deleted: 0,
                }
            );
        }
        self.reload_visible_cards();
    }

    /// Delete backing indices, swiped or remaining.
    pub fn delete_cards(&mut self, indices: &[usize]) {
        let old_count = self.state.total_index_count();
        let new_count = self.data_source.number_of_cards();
        self.state.delete_all(indices);
        if new_count + indices.len() != old_count {
            panic!(
                "{}",
                InvalidUpdate {
                    old_count,
                    new_count,
                    inserted: 0,
                    deleted: indices.len(),
                }
            );
        }
        self.reload_visible_cards();
    }

    /// Delete the cards at the given remaining positions.
    pub fn delete_cards_at_positions(&mut self, positions: &[usize]) {
        let old_count = self.state.total_index_count();
        let new_count = self.data_source.number_of_cards();
        self.state.delete_at_positions(positions);
        if new_count + positions.len() != old_count {
            panic!(
                "{}",
                InvalidUpdate {
                    old_count,
                    new_count,
                    inserted: 0,
                    deleted: positions.len(),
                }
            );
        }
        self.reload_visible_cards();
    }

    /// Re-read the data source count and rebuild everything.
    pub fn reload_data(&mut self) {
        let count = self.data_source.number_of_cards();
        #[cfg(feature = "tracing")]
        tracing::debug!(count, "reload data");
        self.state.reset(count);
        self.reload_visible_cards();
        self.is_animating = false;
        self.phase = StackPhase::Idle;
    }

    // --- animation completion ---

    /// Route an engine completion back into the state machine.
    ///
    /// `finished` is the engine's report; an interrupted swipe still releases
    /// the animation gate so a fast follow-up swipe cannot wedge the stack.
    pub fn animation_finished(&mut self, token: AnimationToken, finished: bool) {
        match token.kind {
            TransitionKind::Swipe => {
                self.is_animating = false;
                if matches!(self.phase, StackPhase::Committing(_)) {
                    self.phase = StackPhase::Idle;
                }
                self.delegate.did_end_animating();
            }
            TransitionKind::ReverseSwipe => {
                if finished {
                    self.is_animating = false;
                    if let Some(entry) = self.visible_cards.first_mut() {
                        entry.card_mut().set_interaction_enabled(true);
                    }
                    self.delegate.did_end_animating();
                }
            }
            TransitionKind::Shift => {
                if finished {
                    self.is_animating = false;
                    self.delegate.did_end_animating();
                }
            }
            TransitionKind::Reset => {
                if self.phase == StackPhase::Cancelling {
                    self.phase = StackPhase::Idle;
                }
            }
        }
    }

    // --- internals ---

    fn swipe_action(&mut self, direction: Direction, forced: bool, animated: bool) {
        if self.visible_cards.is_empty() {
            return;
        }
        self.phase = StackPhase::Committing(direction);
        let removed = self.visible_cards.remove(0);
        #[cfg(feature = "tracing")]
        tracing::debug!(index = removed.index, %direction, forced, animated, "swipe");

        self.state.swipe(direction);
        for (position, entry) in self.visible_cards.iter_mut().enumerate() {
            entry.position = position;
        }

        // Refill the tail while more indices remain than are visible.
        if self.state.remaining_indices().len() > self.visible_cards.len() {
            let position = self.visible_cards.len();
            let index = self.state.remaining_indices()[position];
            let card = self.load_card(index, position);
            self.visible_cards.push(VisibleCard::new(position, index, card));
        }

        self.delegate.did_swipe(removed.index, direction);

        if self.state.remaining_indices().is_empty() {
            self.delegate.did_swipe_all();
            self.phase = StackPhase::Idle;
            return;
        }
        if !animated {
            self.settle_window();
            self.phase = StackPhase::Idle;
            return;
        }

        let token = self.next_token(TransitionKind::Swipe);
        let plan = animator::swipe_plan(
            token,
            removed.card(),
            removed.index,
            direction,
            forced,
            &self.visible_cards,
            self.container_size(),
            &self.stack_options,
            self.scales_background_cards,
        );
        self.settle_window();
        self.is_animating = true;
        self.delegate.did_begin_animating();
        self.engine.animate(plan);
    }

    fn cancel_drag(&mut self) {
        self.phase = StackPhase::Cancelling;
        let token = self.next_token(TransitionKind::Reset);
        let top = &self.visible_cards[0];
        let plan = animator::reset_plan(
            token,
            top.card(),
            top.index(),
            &self.visible_cards[1..],
            self.container_size(),
            &self.stack_options,
            self.scales_background_cards,
        );
        self.settle_window();
        self.engine.animate(plan);
    }

    fn reload_visible_cards(&mut self) {
        self.visible_cards.clear();
        let count = self
            .state
            .remaining_indices()
            .len()
            .min(self.number_of_visible_cards);
        for position in 0..count {
            let index = self.state.remaining_indices()[position];
            let card = self.load_card(index, position);
            self.visible_cards.push(VisibleCard::new(position, index, card));
        }
    }

    fn load_card(&self, index: usize, position: usize) -> SwipeCard {
        let mut card = SwipeCard::new(self.data_source.card(index));
        card.set_frame(self.card_frame());
        card.set_transform(settled_transform(
            position as isize,
            self.scales_background_cards,
        ));
        card.set_interaction_enabled(position == 0);
        card
    }

    /// Snap every window entry to its settled pose and drop gesture state.
    fn settle_window(&mut self) {
        let frame = self.card_frame();
        let scales = self.scales_background_cards;
        for (position, entry) in self.visible_cards.iter_mut().enumerate() {
            entry.position = position;
            let card = entry.card_mut();
            card.clear_drag();
            card.set_frame(frame);
            card.set_transform(settled_transform(position as isize, scales));
            card.set_interaction_enabled(position == 0);
        }
    }

    fn next_token(&mut self, kind: TransitionKind) -> AnimationToken {
        self.next_animation_id += 1;
        AnimationToken {
            id: self.next_animation_id,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardConfig;
    use crate::tween::ManualTweenEngine;

    // Container 400x800 after the default 10pt insets: minimum swipe
    // distance 100, background blend saturates at 200.
    const BOUNDS: Rect = Rect::new(0.0, 0.0, 420.0, 820.0);

    #[derive(Debug)]
    struct CountingSource {
        count: usize,
    }

    impl CardStackDataSource for CountingSource {
        fn number_of_cards(&self) -> usize {
            self.count
        }

        fn card(&self, _index: usize) -> CardConfig {
            CardConfig::default()
        }
    }

    #[derive(Debug)]
    struct RecordingDelegate {
        events: Vec<String>,
        allow_movement: bool,
    }

    impl Default for RecordingDelegate {
        fn default() -> Self {
            Self {
                events: Vec::new(),
                allow_movement: true,
            }
        }
    }

    impl StackDelegate for RecordingDelegate {
        fn did_begin_drag(&mut self, index: usize) {
            self.events.push(format!("begin_drag {index}"));
        }

        fn did_continue_drag(&mut self, index: usize) {
            self.events.push(format!("continue_drag {index}"));
        }

        fn did_end_drag(&mut self, index: usize) {
            self.events.push(format!("end_drag {index}"));
        }

        fn did_select_card(&mut self, index: usize) {
            self.events.push(format!("select {index}"));
        }

        fn did_swipe(&mut self, index: usize, direction: Direction) {
            self.events.push(format!("swipe {index} {direction}"));
        }

        fn did_undo(&mut self, index: usize, direction: Direction) {
            self.events.push(format!("undo {index} {direction}"));
        }

        fn did_swipe_all(&mut self) {
            self.events.push("all_swiped".into());
        }

        fn did_begin_animating(&mut self) {
            self.events.push("begin_animating".into());
        }

        fn did_end_animating(&mut self) {
            self.events.push("end_animating".into());
        }

        fn can_move(&mut self, _index: usize) -> bool {
            self.allow_movement
        }
    }

    fn stack(count: usize) -> CardStack<CountingSource, NoopDelegate, ManualTweenEngine> {
        let mut stack = CardStack::new(
            CountingSource { count },
            ManualTweenEngine::new(),
            BOUNDS,
        );
        stack.set_number_of_visible_cards(3);
        stack
    }

    fn observed(count: usize) -> CardStack<CountingSource, RecordingDelegate, ManualTweenEngine> {
        let mut stack = CardStack::with_delegate(
            CountingSource { count },
            RecordingDelegate::default(),
            ManualTweenEngine::new(),
            BOUNDS,
        );
        stack.set_number_of_visible_cards(3);
        stack
    }

    fn window_indices<S, D, E>(stack: &CardStack<S, D, E>) -> Vec<usize>
    where
        S: CardStackDataSource,
        D: StackDelegate,
        E: TweenEngine,
    {
        stack.visible_cards().iter().map(VisibleCard::index).collect()
    }

    fn assert_window_matches_state<S, D, E>(stack: &CardStack<S, D, E>, visible_count: usize)
    where
        S: CardStackDataSource,
        D: StackDelegate,
        E: TweenEngine,
    {
        let expected = stack.state.remaining_indices().len().min(visible_count);
        assert_eq!(stack.visible_cards().len(), expected);
        for (i, entry) in stack.visible_cards().iter().enumerate() {
            assert_eq!(entry.position(), i);
            assert_eq!(entry.index(), stack.state.remaining_indices()[i]);
        }
    }

    fn drag_commit_right<S, D, E>(stack: &mut CardStack<S, D, E>)
    where
        S: CardStackDataSource,
        D: StackDelegate,
        E: TweenEngine,
    {
        stack.begin_drag(Point::new(200.0, 100.0));
        stack.continue_drag(DragState::new(Vector::new(120.0, 0.0), Vector::ZERO));
        stack.end_drag(DragState::new(Vector::new(120.0, 0.0), Vector::ZERO));
    }

    // --- window tests ---

    #[test]
    fn initial_window_is_remaining_prefix() {
        let stack = stack(5);
        assert_eq!(window_indices(&stack), vec![0, 1, 2]);
        assert_window_matches_state(&stack, 3);
        assert!(stack.visible_cards()[0].card().is_interaction_enabled());
        assert!(!stack.visible_cards()[1].card().is_interaction_enabled());
        assert_eq!(stack.visible_cards()[0].transform(), Transform::IDENTITY);
        assert_eq!(
            stack.visible_cards()[1].transform(),
            settled_transform(1, true)
        );
    }

    #[test]
    fn window_shrinks_with_small_stacks() {
        let two = stack(2);
        assert_eq!(window_indices(&two), vec![0, 1]);
        let empty = stack(0);
        assert!(empty.visible_cards().is_empty());
    }

    #[test]
    fn card_frames_follow_insets() {
        let stack = stack(3);
        assert_eq!(stack.container_frame(), Rect::new(10.0, 10.0, 400.0, 800.0));
        assert_eq!(
            stack.visible_cards()[0].frame(),
            Rect::new(0.0, 0.0, 400.0, 800.0)
        );
    }

    // --- swipe tests ---

    #[test]
    fn swipe_pops_and_refills() {
        let mut stack = stack(5);
        stack.swipe(Direction::Right, true);

        assert_eq!(stack.remaining_indices(), &[1, 2, 3, 4]);
        assert_eq!(stack.swiped_indices(), vec![0]);
        assert_eq!(window_indices(&stack), vec![1, 2, 3]);
        assert!(stack.is_animating());
        assert_eq!(stack.phase(), StackPhase::Committing(Direction::Right));

        let plan = stack.engine().last_plan().unwrap().clone();
        assert_eq!(plan.token.kind, TransitionKind::Swipe);
        stack.animation_finished(plan.token, true);
        assert!(!stack.is_animating());
        assert_eq!(stack.phase(), StackPhase::Idle);
    }

    #[test]
    fn swipe_without_animation_settles_immediately() {
        let mut stack = stack(5);
        stack.swipe(Direction::Left, false);
        assert_eq!(window_indices(&stack), vec![1, 2, 3]);
        assert!(!stack.is_animating());
        assert!(stack.engine().plans().is_empty());
        assert_eq!(stack.phase(), StackPhase::Idle);
    }

    #[test]
    fn swipe_is_dropped_while_animating() {
        let mut stack = stack(5);
        stack.swipe(Direction::Right, true);
        stack.swipe(Direction::Right, true);
        assert_eq!(stack.remaining_indices(), &[1, 2, 3, 4]);
        assert_eq!(stack.engine().plans().len(), 1);
    }

    #[test]
    fn swiping_everything_notifies_all_swiped() {
        let mut stack = observed(1);
        stack.swipe(Direction::Up, true);
        assert!(stack.remaining_indices().is_empty());
        assert!(stack.visible_cards().is_empty());
        assert!(!stack.is_animating());
        assert!(stack.engine().plans().is_empty());
        let events = &stack.delegate().events;
        assert_eq!(events, &["swipe 0 up", "all_swiped"]);
    }

    #[test]
    fn swipe_on_empty_stack_is_noop() {
        let mut stack = stack(0);
        stack.swipe(Direction::Right, true);
        assert!(stack.engine().plans().is_empty());
    }

    #[test]
    fn swipe_then_undo_round_trips_the_window() {
        let mut stack = stack(5);

        stack.swipe(Direction::Right, true);
        assert_eq!(stack.remaining_indices(), &[1, 2, 3, 4]);
        assert_eq!(stack.swiped_indices(), vec![0]);
        assert_eq!(window_indices(&stack), vec![1, 2, 3]);
        let token = stack.engine().last_plan().unwrap().token;
        stack.animation_finished(token, true);

        stack.undo_last_swipe(true);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3, 4]);
        assert!(stack.swiped_indices().is_empty());
        assert_eq!(window_indices(&stack), vec![0, 1, 2]);
    }

    // --- undo tests ---

    #[test]
    fn undo_with_empty_history_is_noop() {
        let mut stack = stack(5);
        stack.undo_last_swipe(true);
        assert!(stack.engine().plans().is_empty());
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn undo_disables_top_until_finished() {
        let mut stack = stack(5);
        stack.swipe(Direction::Left, false);
        stack.undo_last_swipe(true);

        assert!(!stack.visible_cards()[0].card().is_interaction_enabled());
        assert!(stack.is_animating());
        assert!(!stack.is_enabled());

        let token = stack.engine().last_plan().unwrap().token;
        stack.animation_finished(token, true);
        assert!(stack.visible_cards()[0].card().is_interaction_enabled());
        assert!(stack.is_enabled());
    }

    #[test]
    fn unfinished_undo_keeps_the_gate_closed() {
        let mut stack = stack(5);
        stack.swipe(Direction::Left, false);
        stack.undo_last_swipe(true);
        let token = stack.engine().last_plan().unwrap().token;
        stack.animation_finished(token, false);
        assert!(stack.is_animating());
    }

    #[test]
    fn undo_plan_is_reverse_swipe() {
        let mut stack = stack(5);
        stack.swipe(Direction::Down, false);
        stack.undo_last_swipe(true);
        let plan = stack.engine().last_plan().unwrap();
        assert_eq!(plan.token.kind, TransitionKind::ReverseSwipe);
        // The restored card replays a downward exit.
        assert!(plan.poses[0].from.translation.dy > 0.0);
    }

    // --- shift tests ---

    #[test]
    fn shift_by_two_rotates_toward_the_back() {
        let mut stack = stack(5);
        stack.shift(2, false);
        assert_eq!(stack.remaining_indices(), &[2, 3, 4, 0, 1]);
        assert_eq!(window_indices(&stack), vec![2, 3, 4]);
    }

    #[test]
    fn shift_zero_is_noop() {
        let mut stack = stack(5);
        stack.shift(0, true);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3, 4]);
        assert!(stack.engine().plans().is_empty());
    }

    #[test]
    fn shift_needs_two_visible_cards() {
        let mut stack = stack(1);
        stack.shift(1, true);
        assert_eq!(stack.remaining_indices(), &[0]);
        assert!(stack.engine().plans().is_empty());
    }

    #[test]
    fn animated_shift_gates_until_finished() {
        let mut stack = stack(5);
        stack.shift(1, true);
        assert!(stack.is_animating());
        let plan = stack.engine().last_plan().unwrap().clone();
        assert_eq!(plan.token.kind, TransitionKind::Shift);
        stack.animation_finished(plan.token, true);
        assert!(!stack.is_animating());
    }

    // --- structural mutation tests ---

    #[test]
    fn insert_card_rebuilds_window() {
        let mut stack = stack(5);
        stack.data_source_mut().count = 6;
        stack.insert_card(2, 0);
        assert_eq!(stack.remaining_indices(), &[2, 0, 1, 3, 4, 5]);
        assert_eq!(window_indices(&stack), vec![2, 0, 1]);
        assert_window_matches_state(&stack, 3);
    }

    #[test]
    #[should_panic(expected = "invalid update")]
    fn insert_with_stale_count_panics() {
        let mut stack = stack(5);
        stack.insert_card(2, 0);
    }

    #[test]
    fn append_cards_lands_at_the_bottom() {
        let mut stack = stack(3);
        stack.data_source_mut().count = 5;
        stack.append_cards(&[3, 4]);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3, 4]);
        assert_window_matches_state(&stack, 3);
    }

    #[test]
    #[should_panic(expected = "invalid update")]
    fn append_with_wrong_delta_panics() {
        let mut stack = stack(3);
        stack.data_source_mut().count = 4;
        stack.append_cards(&[3, 4]);
    }

    #[test]
    fn delete_renumbers_later_indices() {
        let mut stack = stack(5);
        stack.data_source_mut().count = 4;
        stack.delete_cards(&[1]);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3]);
        assert_eq!(window_indices(&stack), vec![0, 1, 2]);
    }

    #[test]
    fn delete_at_positions_resolves_positions_first() {
        let mut stack = stack(5);
        stack.data_source_mut().count = 4;
        stack.delete_cards_at_positions(&[0]);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "invalid update")]
    fn delete_with_wrong_delta_panics() {
        let mut stack = stack(5);
        stack.delete_cards(&[1]);
    }

    #[test]
    fn reload_data_resets_everything() {
        let mut stack = stack(5);
        stack.swipe(Direction::Right, true);
        stack.data_source_mut().count = 2;
        stack.reload_data();
        assert_eq!(stack.remaining_indices(), &[0, 1]);
        assert!(stack.swiped_indices().is_empty());
        assert_eq!(window_indices(&stack), vec![0, 1]);
        assert!(!stack.is_animating());
        assert_eq!(stack.phase(), StackPhase::Idle);
    }

    // --- gesture tests ---

    #[test]
    fn drag_commit_runs_the_swipe_path() {
        let mut stack = observed(5);
        drag_commit_right(&mut stack);

        assert_eq!(stack.remaining_indices(), &[1, 2, 3, 4]);
        assert_eq!(stack.phase(), StackPhase::Committing(Direction::Right));
        assert!(stack.is_animating());
        let events = &stack.delegate().events;
        assert_eq!(
            events,
            &[
                "begin_drag 0",
                "continue_drag 0",
                "end_drag 0",
                "swipe 0 right",
                "begin_animating",
            ]
        );
    }

    #[test]
    fn short_drag_cancels_and_springs_back() {
        let mut stack = stack(5);
        stack.begin_drag(Point::new(200.0, 100.0));
        stack.continue_drag(DragState::new(Vector::new(40.0, 0.0), Vector::ZERO));
        stack.end_drag(DragState::new(Vector::new(40.0, 0.0), Vector::ZERO));

        assert_eq!(stack.phase(), StackPhase::Cancelling);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3, 4]);
        assert!(!stack.is_animating());
        let plan = stack.engine().last_plan().unwrap().clone();
        assert_eq!(plan.token.kind, TransitionKind::Reset);
        // The window settled back to identity poses.
        assert_eq!(stack.visible_cards()[0].transform(), Transform::IDENTITY);

        stack.animation_finished(plan.token, true);
        assert_eq!(stack.phase(), StackPhase::Idle);
    }

    #[test]
    fn continue_drag_blends_background_cards() {
        let mut stack = stack(5);
        stack.begin_drag(Point::new(200.0, 100.0));
        // Half the saturation distance: blend 0.5 of the way to full size.
        stack.continue_drag(DragState::new(Vector::new(100.0, 0.0), Vector::ZERO));

        let top = stack.visible_cards()[0].transform();
        assert_eq!(top.translation, Vector::new(100.0, 0.0));
        let behind = stack.visible_cards()[1].transform();
        assert!((behind.scale_x - 0.975).abs() < 1e-6);
    }

    #[test]
    fn begin_drag_cancels_in_flight_animations() {
        let mut stack = stack(5);
        stack.begin_drag(Point::new(200.0, 100.0));
        assert_eq!(
            stack.engine().cancels(),
            &[CancelScope::TopCard, CancelScope::BackgroundCards]
        );
        assert_eq!(stack.phase(), StackPhase::Dragging);
    }

    #[test]
    fn continue_without_begin_is_noop() {
        let mut stack = stack(5);
        stack.continue_drag(DragState::new(Vector::new(100.0, 0.0), Vector::ZERO));
        assert_eq!(stack.visible_cards()[0].transform(), Transform::IDENTITY);
    }

    #[test]
    fn movement_veto_freezes_the_card() {
        let mut stack = observed(5);
        stack.delegate_mut().allow_movement = false;
        stack.begin_drag(Point::new(200.0, 100.0));
        stack.continue_drag(DragState::new(Vector::new(150.0, 0.0), Vector::ZERO));
        stack.end_drag(DragState::new(Vector::new(150.0, 0.0), Vector::ZERO));

        assert_eq!(stack.visible_cards()[0].transform(), Transform::IDENTITY);
        assert_eq!(stack.remaining_indices(), &[0, 1, 2, 3, 4]);
        assert_eq!(stack.phase(), StackPhase::Dragging);
    }

    #[test]
    fn tap_selects_top_card() {
        let mut stack = observed(5);
        stack.tap(Point::new(50.0, 50.0));
        assert_eq!(stack.delegate().events, &["select 0"]);
    }

    #[test]
    fn axis_recognition_flags() {
        let mut stack = stack(5);
        assert!(stack.should_begin_drag(Vector::new(10.0, 2.0)));
        stack.set_recognize_horizontal_drag(false);
        assert!(!stack.should_begin_drag(Vector::new(10.0, 2.0)));
        assert!(stack.should_begin_drag(Vector::new(2.0, 10.0)));
        stack.set_recognize_vertical_drag(false);
        assert!(!stack.should_begin_drag(Vector::new(2.0, 10.0)));
        // Perfect diagonals fall through to allowed.
        assert!(stack.should_begin_drag(Vector::new(5.0, 5.0)));
    }

    // --- window bound invariant ---

    #[test]
    fn window_bound_holds_across_operations() {
        for visible_count in 0..5 {
            let mut stack = stack(6);
            stack.set_number_of_visible_cards(visible_count);
            assert_window_matches_state(&stack, visible_count);

            stack.swipe(Direction::Right, false);
            assert_window_matches_state(&stack, visible_count);

            stack.undo_last_swipe(false);
            assert_window_matches_state(&stack, visible_count);

            stack.data_source_mut().count = 5;
            stack.delete_cards(&[2]);
            assert_window_matches_state(&stack, visible_count);

            stack.data_source_mut().count = 6;
            stack.insert_card(0, 1);
            assert_window_matches_state(&stack, visible_count);
        }
    }
}
