//! Effective status of an employee on a given day.
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! 1. the day falls inside a vacation range: [`Status::OnVacation`]
//! 2. an override exists for the day: the override, verbatim
//! 3. the day is a public holiday: [`Status::Off`]
//! 4. the weekday is in the employee's working days: [`Status::Working`]
//! 5. otherwise: [`Status::ScheduledOff`]

use crate::date_key::date_key;
use crate::employee::Employee;
use crate::error::RosterError;
use crate::holiday_cache::{HolidayCache, HolidayProvider};
use crate::status::{Status, StatusSource};
use chrono::{Datelike, NaiveDate};
use tracing::warn;

/// Result of resolving one employee-day, with the rule that decided it and
/// any anomalies met on the way.
#[derive(Debug)]
pub struct Resolution {
    pub status: Status,
    pub source: StatusSource,
    /// Currently only [`RosterError::MalformedVacationRange`]; those ranges
    /// were treated as non-matching.
    pub warnings: Vec<RosterError>,
}

/// Resolves statuses against holiday tables from a [`HolidayProvider`].
#[derive(Debug, Default)]
pub struct StatusResolver<P = HolidayCache> {
    holidays: P,
}

impl<P: HolidayProvider> StatusResolver<P> {
    pub fn new(holidays: P) -> Self {
        Self { holidays }
    }

    pub fn holidays(&self) -> &P {
        &self.holidays
    }

    pub fn resolve(&self, employee: &Employee, date: NaiveDate) -> Status {
        self.resolve_detailed(employee, date).status
    }

    pub fn resolve_detailed(&self, employee: &Employee, date: NaiveDate) -> Resolution {
        resolve_detailed(employee, date, &self.holidays)
    }
}

/// Resolve `employee`'s status on `date`.
pub fn resolve_status<P>(employee: &Employee, date: NaiveDate, holidays: &P) -> Status
where
    P: HolidayProvider + ?Sized,
{
    resolve_detailed(employee, date, holidays).status
}

pub fn resolve_detailed<P>(employee: &Employee, date: NaiveDate, holidays: &P) -> Resolution
where
    P: HolidayProvider + ?Sized,
{
    let mut warnings = Vec::new();
    let mut on_vacation = false;
    for bounds in employee.vacation_bounds() {
        match bounds {
            Ok((start, end)) => {
                if start <= date && date <= end {
                    on_vacation = true;
                    break;
                }
            }
            Err(err) => {
                warn!(employee = %employee.id, %date, "skipping vacation: {err}");
                warnings.push(err);
            }
        }
    }
    if on_vacation {
        return Resolution {
            status: Status::OnVacation,
            source: StatusSource::Vacation,
            warnings,
        };
    }

    let key = date_key(date);
    let (status, source) = if let Some(status) = employee.overrides.get(&key) {
        (status.clone(), StatusSource::Override)
    } else if holidays.holidays_for(date.year()).contains_key(&key) {
        (Status::Off, StatusSource::Holiday)
    } else if employee.works_on(date.weekday()) {
        (Status::Working, StatusSource::WeeklySchedule)
    } else {
        (Status::ScheduledOff, StatusSource::Default)
    };

    Resolution {
        status,
        source,
        warnings,
    }
}
