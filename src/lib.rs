pub mod config;
pub mod date_key;
pub mod employee;
pub(crate) mod employee_validation;
pub mod error;
pub mod holiday_cache;
pub mod holidays;
pub mod persistence;
pub mod resolver;
pub mod stats;
pub mod status;

pub use config::{RosterConfig, load_config_from_json, save_config_to_json};
pub use date_key::{calendar_date, date_key, parse_date_key, weekday_index};
pub use employee::{Employee, VacationRange, WorkDays};
pub use error::{RosterError, RosterResult};
pub use holiday_cache::{HolidayCache, HolidayProvider};
pub use holidays::{
    FixedHoliday, HolidayCalendar, HolidayCalendarConfig, HolidayTable, MovableHoliday,
    build_holiday_table, easter_sunday,
};
pub use persistence::{
    JsonRosterStore, RosterSnapshot, RosterStore, load_roster_from_json, save_roster_to_json,
    validate_employees,
};
pub use resolver::{Resolution, StatusResolver, resolve_detailed, resolve_status};
pub use stats::{
    RosterRow, StatusSummary, VacationBalance, VacationPolicy, extra_hours_total, roster_grid,
    summarize_period, vacation_balance,
};
pub use status::{Status, StatusSource};
