//! Error types for volume computation.

use crate::VolumeMethod;
use pithos_interp::InterpError;
use thiserror::Error;

/// Errors that can occur during volume computation.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// A method identifier did not name one of the five known methods.
    #[error("unknown volume method '{0}'")]
    UnknownMethod(String),

    /// Quadrature settings failed validation.
    #[error("invalid quadrature settings: {0}")]
    InvalidSettings(String),

    /// A method produced a NaN or infinite volume.
    #[error("{method} method produced a non-finite volume")]
    NonFinite {
        /// The method that failed.
        method: VolumeMethod,
    },

    /// Fill percentage outside `[0, 100]`.
    #[error("fill percentage must be between 0 and 100, got {0}")]
    InvalidPercent(f64),

    /// Interpolant construction failed for the profile.
    #[error("interpolation failed: {0}")]
    Interp(#[from] InterpError),
}

/// Result type for volume operations.
pub type Result<T> = std::result::Result<T, VolumeError>;
