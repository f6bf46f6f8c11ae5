use crate::date_key::parse_date_key;
use crate::employee::Employee;
use crate::holiday_cache::HolidayProvider;
use crate::resolver::{StatusResolver, resolve_detailed};
use crate::status::Status;
use chrono::{Datelike, NaiveDate, Weekday};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub const DEFAULT_ANNUAL_ALLOWANCE: u32 = 22;

/// How vacation days are counted against the yearly allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VacationPolicy {
    pub annual_allowance: u32,
    /// Leave public holidays that fall inside a vacation out of the count.
    pub exclude_holidays: bool,
}

impl Default for VacationPolicy {
    fn default() -> Self {
        Self {
            annual_allowance: DEFAULT_ANNUAL_ALLOWANCE,
            exclude_holidays: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBalance {
    pub year: i32,
    pub allowance: u32,
    pub used: u32,
    /// Negative when more days were booked than allowed.
    pub remaining: i64,
}

/// Per-status day counts for one employee over a period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSummary {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    counts: HashMap<Status, u32>,
    /// Malformed vacation ranges met while resolving the period.
    pub skipped_vacations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub employee_id: String,
    pub days: Vec<(NaiveDate, Status)>,
}

/// Inclusive day iterator; empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Distinct Monday-Friday dates of `year` covered by the employee's vacations.
/// Overlapping ranges count once and malformed ranges are ignored.
pub fn vacation_days_in_year<P>(
    employee: &Employee,
    year: i32,
    policy: &VacationPolicy,
    holidays: &P,
) -> BTreeSet<NaiveDate>
where
    P: HolidayProvider + ?Sized,
{
    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return BTreeSet::new();
    };
    let table = policy.exclude_holidays.then(|| holidays.holidays_for(year));

    let mut days = BTreeSet::new();
    for (start, end) in employee.vacation_bounds().flatten() {
        for date in days_between(start.max(first), end.min(last)) {
            if is_weekend(date) {
                continue;
            }
            if table.as_ref().is_some_and(|t| t.is_holiday(date)) {
                continue;
            }
            days.insert(date);
        }
    }
    days
}

pub fn vacation_balance<P>(
    employee: &Employee,
    year: i32,
    policy: &VacationPolicy,
    holidays: &P,
) -> VacationBalance
where
    P: HolidayProvider + ?Sized,
{
    let used = vacation_days_in_year(employee, year, policy, holidays).len() as u32;
    VacationBalance {
        year,
        allowance: policy.annual_allowance,
        used,
        remaining: i64::from(policy.annual_allowance) - i64::from(used),
    }
}

/// Sum of extra hours recorded on days of `year`.
pub fn extra_hours_total(employee: &Employee, year: i32) -> f64 {
    employee
        .extra_hours
        .iter()
        .filter_map(|(key, hours)| {
            let date = parse_date_key(key).ok()?;
            (date.year() == year).then_some(*hours)
        })
        .sum()
}

/// Count resolved statuses for every day in `start..=end`.
pub fn summarize_period<P>(
    employee: &Employee,
    start: NaiveDate,
    end: NaiveDate,
    holidays: &P,
) -> StatusSummary
where
    P: HolidayProvider + ?Sized,
{
    let mut summary = StatusSummary {
        start: Some(start),
        end: Some(end),
        ..StatusSummary::default()
    };
    for date in days_between(start, end) {
        let resolution = resolve_detailed(employee, date, holidays);
        summary.skipped_vacations += resolution.warnings.len();
        *summary.counts.entry(resolution.status).or_insert(0) += 1;
    }
    summary
}

/// Resolve every employee over `start..=end`, one row per employee in input
/// order.
pub fn roster_grid<P>(
    employees: &[Employee],
    start: NaiveDate,
    end: NaiveDate,
    resolver: &StatusResolver<P>,
) -> Vec<RosterRow>
where
    P: HolidayProvider + Sync,
{
    employees
        .par_iter()
        .map(|employee| RosterRow {
            employee_id: employee.id.clone(),
            days: days_between(start, end)
                .map(|date| (date, resolver.resolve(employee, date)))
                .collect(),
        })
        .collect()
}

impl StatusSummary {
    pub fn count(&self, status: &Status) -> u32 {
        self.counts.get(status).copied().unwrap_or(0)
    }

    pub fn total_days(&self) -> u32 {
        self.counts.values().sum()
    }

    /// `(status, days)` sorted by descending count, then label.
    pub fn entries(&self) -> Vec<(&Status, u32)> {
        let mut entries: Vec<(&Status, u32)> = self.counts.iter().map(|(s, c)| (s, *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
        entries
    }
}
