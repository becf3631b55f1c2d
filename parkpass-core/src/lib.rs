pub mod fastpass;
pub mod patch;
pub mod pii;
pub mod repository;
pub mod ride;
pub mod timestamp;
pub mod validation;

pub use fastpass::{CheckInResult, FastPass, FastPassTier, FastPassUpdate, NewFastPass};
pub use patch::Patch;
pub use repository::{FastPassRepository, RideRepository};
pub use ride::{NewRide, Ride, RideUpdate};
pub use validation::{validate, FieldError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    pub fn ride_not_found() -> Self {
        Self::NotFound("Ride not found".to_string())
    }

    pub fn fastpass_not_found() -> Self {
        Self::NotFound("Fast pass not found".to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
