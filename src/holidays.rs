use crate::date_key::date_key;
use crate::error::{RosterError, RosterResult};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A holiday that falls on the same month/day every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    pub month: u32,
    pub day: u32,
    pub name: String,
}

/// A holiday at a fixed offset (in days) from Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableHoliday {
    pub easter_offset: i64,
    pub name: String,
}

impl FixedHoliday {
    pub fn new(month: u32, day: u32, name: impl Into<String>) -> Self {
        Self {
            month,
            day,
            name: name.into(),
        }
    }
}

impl MovableHoliday {
    pub fn new(easter_offset: i64, name: impl Into<String>) -> Self {
        Self {
            easter_offset,
            name: name.into(),
        }
    }
}

/// The rule set a holiday table is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    fixed: Vec<FixedHoliday>,
    movable: Vec<MovableHoliday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendarConfig {
    #[serde(default)]
    pub fixed: Vec<FixedHoliday>,
    #[serde(default)]
    pub movable: Vec<MovableHoliday>,
}

/// Holidays of one year, keyed by date key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayTable {
    year: i32,
    entries: BTreeMap<String, String>,
}

const DEFAULT_FIXED: [(u32, u32, &str); 14] = [
    (1, 1, "New Year's Day"),
    (4, 2, "Regional Holiday"),
    (4, 25, "Freedom Day"),
    (5, 1, "Labour Day"),
    (6, 10, "Portugal Day"),
    (7, 1, "Regional Day"),
    (8, 15, "Assumption Day"),
    (8, 21, "City Day"),
    (10, 5, "Republic Day"),
    (11, 1, "All Saints' Day"),
    (12, 1, "Restoration of Independence"),
    (12, 8, "Immaculate Conception"),
    (12, 25, "Christmas Day"),
    (12, 26, "Boxing Day"),
];

const DEFAULT_MOVABLE: [(i64, &str); 4] = [
    (-47, "Carnival"),
    (-2, "Good Friday"),
    (0, "Easter Sunday"),
    (60, "Corpus Christi"),
];

/// Gregorian Easter Sunday for `year` (Oudin's algorithm).
///
/// Returns `None` for years before 1 AD, where the computation is meaningless.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }
    let y = year;
    let g = y % 19;
    let c = y / 100;
    let h = (c - c / 4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let i = h - (h / 28) * (1 - (h / 28) * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (y + y / 4 + i + 2 - c + c / 4) % 7;
    let p = i - j;
    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Build the default holiday table for `year`.
pub fn build_holiday_table(year: i32) -> HolidayTable {
    HolidayCalendar::default().build_table(year)
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self {
            fixed: DEFAULT_FIXED
                .iter()
                .map(|&(month, day, name)| FixedHoliday::new(month, day, name))
                .collect(),
            movable: DEFAULT_MOVABLE
                .iter()
                .map(|&(offset, name)| MovableHoliday::new(offset, name))
                .collect(),
        }
    }
}

impl HolidayCalendar {
    pub fn custom<I, J>(fixed: I, movable: J) -> RosterResult<Self>
    where
        I: IntoIterator<Item = FixedHoliday>,
        J: IntoIterator<Item = MovableHoliday>,
    {
        let config = HolidayCalendarConfig {
            fixed: fixed.into_iter().collect(),
            movable: movable.into_iter().collect(),
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &HolidayCalendarConfig) -> RosterResult<Self> {
        for holiday in &config.fixed {
            // 2000 is a leap year, so Feb 29 is accepted here and skipped in
            // years that lack it.
            if NaiveDate::from_ymd_opt(2000, holiday.month, holiday.day).is_none() {
                return Err(RosterError::InvalidConfig(format!(
                    "'{}' has no valid month/day ({}/{})",
                    holiday.name, holiday.month, holiday.day
                )));
            }
        }
        for holiday in &config.movable {
            if !(-366..=366).contains(&holiday.easter_offset) {
                return Err(RosterError::InvalidConfig(format!(
                    "'{}' is {} days from Easter, more than a year away",
                    holiday.name, holiday.easter_offset
                )));
            }
        }
        Ok(Self {
            fixed: config.fixed.clone(),
            movable: config.movable.clone(),
        })
    }

    pub fn to_config(&self) -> HolidayCalendarConfig {
        HolidayCalendarConfig::from(self)
    }

    /// Compute the holiday table for `year`.
    ///
    /// Fixed rules are applied first, then Easter-relative ones; when two rules
    /// land on the same day the later one's name is kept. An Easter-relative
    /// date that falls outside `year` is left out.
    pub fn build_table(&self, year: i32) -> HolidayTable {
        let mut entries = BTreeMap::new();

        for holiday in &self.fixed {
            if let Some(date) = NaiveDate::from_ymd_opt(year, holiday.month, holiday.day) {
                entries.insert(date_key(date), holiday.name.clone());
            }
        }

        if let Some(easter) = easter_sunday(year) {
            for holiday in &self.movable {
                let date = easter.checked_add_signed(Duration::days(holiday.easter_offset));
                if let Some(date) = date.filter(|d| d.year() == year) {
                    entries.insert(date_key(date), holiday.name.clone());
                }
            }
        }

        HolidayTable { year, entries }
    }
}

impl Default for HolidayCalendarConfig {
    fn default() -> Self {
        HolidayCalendarConfig::from(&HolidayCalendar::default())
    }
}

impl From<&HolidayCalendar> for HolidayCalendarConfig {
    fn from(calendar: &HolidayCalendar) -> Self {
        Self {
            fixed: calendar.fixed.clone(),
            movable: calendar.movable.clone(),
        }
    }
}

impl HolidayTable {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.get(&date_key(date))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains_key(&date_key(date))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(date_key, name)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
