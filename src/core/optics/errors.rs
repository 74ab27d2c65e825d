use thiserror::Error;

use crate::core::optics::params::ParameterName;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OpticsError {
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidParameter { name: ParameterName, value: f64 },
}
