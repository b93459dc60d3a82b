use std::process::ExitCode;

use thiserror::Error;

/// How a run ended, as reported to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Outcome {
    Success = 0,
    TimeslotUnavailable = 1,
    InvalidLogin = 2,
    InvalidArguments = 3,
    UnknownError = 4,
    GroupAmountNotAvailable = 5,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome as u8)
    }
}

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    InvalidLogin(String),

    #[error("group amount {0} is not available")]
    GroupAmountNotAvailable(u32),

    #[error("timeslot unavailable: {0}")]
    TimeslotUnavailable(String),

    #[error("reservation rejected: {0}")]
    ReservationRejected(String),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl ReservationError {
    pub fn outcome(&self) -> Outcome {
        match self {
            ReservationError::InvalidArguments(_) => Outcome::InvalidArguments,
            ReservationError::InvalidLogin(_) => Outcome::InvalidLogin,
            ReservationError::GroupAmountNotAvailable(_) => Outcome::GroupAmountNotAvailable,
            ReservationError::TimeslotUnavailable(_) => Outcome::TimeslotUnavailable,
            ReservationError::ReservationRejected(_) | ReservationError::Unknown(_) => {
                Outcome::UnknownError
            }
        }
    }
}

pub type ReservationResult<T> = Result<T, ReservationError>;
