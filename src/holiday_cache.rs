use crate::error::{RosterError, RosterResult};
use crate::holidays::{HolidayCalendar, HolidayTable};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Supplies the holiday table for a given year.
///
/// Resolution always asks for the table of the date being resolved, so a
/// caller can never pair a date with another year's holidays.
pub trait HolidayProvider {
    fn holidays_for(&self, year: i32) -> Arc<HolidayTable>;
}

/// Year-indexed memo of holiday tables built from one [`HolidayCalendar`].
///
/// Tables are built on first request and shared afterwards. Two threads asking
/// for the same missing year may both build it; they produce identical tables,
/// so whichever insert lands last is equivalent to the first.
#[derive(Debug, Default)]
pub struct HolidayCache {
    calendar: HolidayCalendar,
    tables: RwLock<HashMap<i32, Arc<HolidayTable>>>,
}

impl HolidayCache {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self {
            calendar,
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Table for `year`, building and caching it on first use.
    pub fn table_for(&self, year: i32) -> Arc<HolidayTable> {
        if let Some(table) = self.tables.read().get(&year) {
            return Arc::clone(table);
        }
        self.rebuild(year)
    }

    /// Build the table for `year` and overwrite any cached copy.
    pub fn rebuild(&self, year: i32) -> Arc<HolidayTable> {
        let table = Arc::new(self.calendar.build_table(year));
        debug!(year, holidays = table.len(), "built holiday table");
        self.tables.write().insert(year, Arc::clone(&table));
        table
    }

    /// Cached table for `year` without building it.
    pub fn get(&self, year: i32) -> RosterResult<Arc<HolidayTable>> {
        self.tables
            .read()
            .get(&year)
            .cloned()
            .ok_or(RosterError::MissingHolidayTable(year))
    }

    pub fn is_cached(&self, year: i32) -> bool {
        self.tables.read().contains_key(&year)
    }

    pub fn cached_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.tables.read().keys().copied().collect();
        years.sort_unstable();
        years
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        self.tables.write().clear();
    }

    /// Swap the rule set. Cached tables were built from the old rules and are
    /// dropped.
    pub fn set_calendar(&mut self, calendar: HolidayCalendar) {
        self.calendar = calendar;
        self.tables.get_mut().clear();
    }
}

impl HolidayProvider for HolidayCache {
    fn holidays_for(&self, year: i32) -> Arc<HolidayTable> {
        self.table_for(year)
    }
}

/// Builds a fresh table on every request.
impl HolidayProvider for HolidayCalendar {
    fn holidays_for(&self, year: i32) -> Arc<HolidayTable> {
        Arc::new(self.build_table(year))
    }
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for &P {
    fn holidays_for(&self, year: i32) -> Arc<HolidayTable> {
        (**self).holidays_for(year)
    }
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for Arc<P> {
    fn holidays_for(&self, year: i32) -> Arc<HolidayTable> {
        (**self).holidays_for(year)
    }
}
