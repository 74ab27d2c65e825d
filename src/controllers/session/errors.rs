use thiserror::Error;

use crate::core::analysis::EstimateError;
use crate::core::optics::OpticsError;

/// Everything a session can report back. None of these end the session.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SessionError {
    #[error("parameter rejected: {0}")]
    Parameter(#[from] OpticsError),
    #[error("curvature estimate failed: {0}")]
    Estimate(#[from] EstimateError),
}
