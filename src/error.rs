use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("malformed date key '{0}' (expected YYYY-MM-DD)")]
    MalformedDateKey(String),
    #[error("vacation #{index} has a malformed range '{start}'..'{end}'")]
    MalformedVacationRange {
        index: usize,
        start: String,
        end: String,
    },
    #[error("no holiday table built for {0}")]
    MissingHolidayTable(i32),
    #[error("invalid holiday configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid employee: {0}")]
    InvalidEmployee(String),
    #[error("unknown employee '{0}'")]
    UnknownEmployee(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
}

pub type RosterResult<T> = Result<T, RosterError>;
