#![forbid(unsafe_code)]

//! Collaborator contracts: the data source the stack reads from and the
//! delegate it notifies.

use swipedeck_core::Direction;

use crate::card::CardConfig;

/// Supplies the backing items.
///
/// The stack calls [`number_of_cards`](CardStackDataSource::number_of_cards)
/// around every structural mutation solely to validate that its bookkeeping
/// and the data agree; [`card`](CardStackDataSource::card) materializes the
/// per-card configuration when an index enters the visible window.
pub trait CardStackDataSource {
    fn number_of_cards(&self) -> usize;
    fn card(&self, index: usize) -> CardConfig;
}

/// Observes stack activity. Every method defaults to a no-op; `can_move`
/// defaults to allowing movement.
#[allow(unused_variables)]
pub trait StackDelegate {
    /// A drag started on the card at `index`.
    fn did_begin_drag(&mut self, index: usize) {}

    /// The drag on `index` moved.
    fn did_continue_drag(&mut self, index: usize) {}

    /// The drag on `index` ended (before the swipe/cancel resolution).
    fn did_end_drag(&mut self, index: usize) {}

    /// The top card (at `index`) was tapped.
    fn did_select_card(&mut self, index: usize) {}

    /// The card at `index` was dismissed in `direction`.
    fn did_swipe(&mut self, index: usize, direction: Direction) {}

    /// The card at `index` returned to the top, undoing a `direction` swipe.
    fn did_undo(&mut self, index: usize, direction: Direction) {}

    /// Every card has been swiped.
    fn did_swipe_all(&mut self) {}

    /// A structural transition began animating.
    fn did_begin_animating(&mut self) {}

    /// The in-flight structural transition completed.
    fn did_end_animating(&mut self) {}

    /// Veto query, consulted on every drag continuation and at swipe commit.
    fn can_move(&mut self, index: usize) -> bool {
        true
    }
}

/// The default delegate: ignores everything, vetoes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelegate;

impl StackDelegate for NoopDelegate {}
