use crate::external;
use bcr_ebill_core::{ValidationError, bill::eligibility::BillAction};
use thiserror::Error;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// the bill couldn't be loaded, so nothing can be done with it
    #[error("bill is not available: {0}")]
    Unavailable(String),

    /// the action is not in the eligible set for the local peer and the bill's current state
    #[error("action {0} is not eligible for bill {1}")]
    ActionNotEligible(BillAction, String),

    /// the bill has no payment address or link to settle it with
    #[error("bill {0} has no payment data for {1}")]
    MissingPaymentData(String, BillAction),

    /// all errors originating from external APIs
    #[error("External API error: {0}")]
    ExternalApi(#[from] external::Error),

    /// errors that stem from bill validation errors
    #[error("bill validation error {0}")]
    Validation(#[from] ValidationError),
}
