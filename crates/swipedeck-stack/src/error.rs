#![forbid(unsafe_code)]

//! Fatal consistency errors.
//!
//! A structural mutation whose count delta disagrees with the data source is
//! unrecoverable by design: the caller's data and the stack's bookkeeping
//! have diverged, and continuing would hand out indices into the wrong
//! items. The controller panics with this message rather than returning it.

use thiserror::Error;

/// Raised when the externally reported card count does not match the count
/// implied by an insert/append/delete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid update: the number of cards after the update ({new_count}) must equal \
     the number of cards before the update ({old_count}), plus or minus the number \
     of cards inserted or deleted ({inserted} inserted, {deleted} deleted)"
)]
pub struct InvalidUpdate {
    pub old_count: usize,
    pub new_count: usize,
    pub inserted: usize,
    pub deleted: usize,
}
