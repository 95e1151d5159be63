//! Submission validation.
//!
//! The ledger program refuses empty strings and strings longer than
//! [`MAX_TEXT_LEN`] bytes. Checking locally avoids paying for a round-trip
//! that is certain to fail.

use crate::error::CoreError;
use crate::record::MAX_TEXT_LEN;

/// Check that `text` is acceptable to the ledger.
pub fn validate_submission(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::EmptyText);
    }
    if text.len() > MAX_TEXT_LEN {
        return Err(CoreError::TextTooLong(text.len()));
    }
    Ok(())
}
