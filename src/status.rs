use serde::{Deserialize, Serialize};
use std::fmt;

/// Effective status of an employee on one day.
///
/// Serialized as its display label, so stored override strings and resolved
/// statuses share one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    OnVacation,
    Off,
    Working,
    ScheduledOff,
    /// Free-form text set as an override (e.g. "Absent", "Sick Leave").
    Custom(String),
}

/// Which rule produced a resolved status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    Vacation,
    Override,
    Holiday,
    WeeklySchedule,
    Default,
}

impl Status {
    pub const ON_VACATION: &'static str = "On Vacation";
    pub const OFF: &'static str = "Off";
    pub const WORKING: &'static str = "Working";
    pub const SCHEDULED_OFF: &'static str = "Scheduled Off";

    /// Interpret a stored label. Built-in labels map to their variants,
    /// anything else is kept verbatim as [`Status::Custom`].
    pub fn from_label(label: &str) -> Self {
        match label {
            Self::ON_VACATION => Status::OnVacation,
            Self::OFF => Status::Off,
            Self::WORKING => Status::Working,
            Self::SCHEDULED_OFF => Status::ScheduledOff,
            other => Status::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Status::OnVacation => Self::ON_VACATION,
            Status::Off => Self::OFF,
            Status::Working => Self::WORKING,
            Status::ScheduledOff => Self::SCHEDULED_OFF,
            Status::Custom(text) => text.as_str(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match Status::from_label(&value) {
            Status::Custom(_) => Status::Custom(value),
            builtin => builtin,
        }
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::from_label(value)
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Custom(text) => text,
            builtin => builtin.label().to_string(),
        }
    }
}

impl StatusSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusSource::Vacation => "vacation",
            StatusSource::Override => "override",
            StatusSource::Holiday => "holiday",
            StatusSource::WeeklySchedule => "weekly_schedule",
            StatusSource::Default => "default",
        }
    }
}
