pub mod error;
pub mod types;

#[cfg(feature = "fees")]
pub mod fees;

#[cfg(feature = "presentation")]
pub mod presentation;

pub use error::FeeError;
pub use types::*;

/// Standard result type for all gross-up operations
pub type FeeResult<T> = Result<T, FeeError>;
