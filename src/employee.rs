use crate::date_key::{date_key, parse_calendar_date};
use crate::error::{RosterError, RosterResult};
use crate::status::Status;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weekly working schedule as weekday indices, 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDays(BTreeSet<u8>);

/// An inclusive vacation range, stored the way the roster documents keep it:
/// as calendar date strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRange {
    pub start_date: String,
    pub end_date: String,
}

/// An employee record as synced from the roster.
///
/// Every per-day map is keyed by [`date_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub work_days: WorkDays,
    #[serde(default)]
    pub overrides: BTreeMap<String, Status>,
    #[serde(default)]
    pub vacations: Vec<VacationRange>,
    #[serde(default)]
    pub extra_hours: BTreeMap<String, f64>,
    #[serde(default)]
    pub extra_hours_notes: BTreeMap<String, String>,
}

impl WorkDays {
    pub fn new<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self(indices.into_iter().collect())
    }

    pub fn from_weekdays<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        Self::new(days.into_iter().map(|d| d.num_days_from_sunday() as u8))
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self::new(1..=5)
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.contains_index(weekday.num_days_from_sunday() as u8)
    }

    pub fn contains_index(&self, index: u8) -> bool {
        self.0.contains(&index)
    }

    pub fn indices(&self) -> impl Iterator<Item = u8> {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl VacationRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: date_key(start),
            end_date: date_key(end),
        }
    }

    /// Parsed `(start, end)`, or `None` when either side is not a date.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = parse_calendar_date(&self.start_date).ok()?;
        let end = parse_calendar_date(&self.end_date).ok()?;
        Some((start, end))
    }
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>, work_days: WorkDays) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            work_days,
            overrides: BTreeMap::new(),
            vacations: Vec::new(),
            extra_hours: BTreeMap::new(),
            extra_hours_notes: BTreeMap::new(),
        }
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.work_days.contains(weekday)
    }

    /// Parsed bounds of every vacation range, in stored order.
    pub fn vacation_bounds(&self) -> impl Iterator<Item = RosterResult<(NaiveDate, NaiveDate)>> {
        self.vacations.iter().enumerate().map(|(index, range)| {
            range
                .bounds()
                .ok_or_else(|| RosterError::MalformedVacationRange {
                    index,
                    start: range.start_date.clone(),
                    end: range.end_date.clone(),
                })
        })
    }

    pub fn override_for(&self, date: NaiveDate) -> Option<&Status> {
        self.overrides.get(&date_key(date))
    }

    pub fn set_override(&mut self, date: NaiveDate, status: impl Into<Status>) {
        self.overrides.insert(date_key(date), status.into());
    }

    pub fn clear_override(&mut self, date: NaiveDate) -> Option<Status> {
        self.overrides.remove(&date_key(date))
    }

    pub fn add_vacation(&mut self, start: NaiveDate, end: NaiveDate) -> RosterResult<()> {
        if start > end {
            return Err(RosterError::InvalidEmployee(format!(
                "employee {} vacation starts {} after it ends {}",
                self.id, start, end
            )));
        }
        self.vacations.push(VacationRange::new(start, end));
        Ok(())
    }

    pub fn remove_vacation(&mut self, index: usize) -> Option<VacationRange> {
        (index < self.vacations.len()).then(|| self.vacations.remove(index))
    }

    /// Record extra hours for a day. Zero hours removes the entry and its note.
    pub fn set_extra_hours(
        &mut self,
        date: NaiveDate,
        hours: f64,
        note: Option<String>,
    ) -> RosterResult<()> {
        if !hours.is_finite() {
            return Err(RosterError::InvalidEmployee(format!(
                "employee {} extra hours on {} must be finite (got {})",
                self.id, date, hours
            )));
        }
        let key = date_key(date);
        if hours == 0.0 {
            self.extra_hours.remove(&key);
            self.extra_hours_notes.remove(&key);
            return Ok(());
        }
        self.extra_hours.insert(key.clone(), hours);
        match note.filter(|n| !n.trim().is_empty()) {
            Some(note) => {
                self.extra_hours_notes.insert(key, note);
            }
            None => {
                self.extra_hours_notes.remove(&key);
            }
        }
        Ok(())
    }

    pub fn extra_hours_on(&self, date: NaiveDate) -> Option<f64> {
        self.extra_hours.get(&date_key(date)).copied()
    }

    pub fn extra_hours_note_on(&self, date: NaiveDate) -> Option<&str> {
        self.extra_hours_notes
            .get(&date_key(date))
            .map(String::as_str)
    }
}
