use crate::error::RosterResult;
use crate::holiday_cache::HolidayCache;
use crate::holidays::{HolidayCalendar, HolidayCalendarConfig};
use crate::resolver::StatusResolver;
use crate::stats::VacationPolicy;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Deployment settings: which holidays apply and how vacation is counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub holidays: HolidayCalendarConfig,
    #[serde(default)]
    pub vacation: VacationPolicy,
}

impl RosterConfig {
    pub fn holiday_calendar(&self) -> RosterResult<HolidayCalendar> {
        HolidayCalendar::from_config(&self.holidays)
    }

    /// A resolver backed by a fresh cache for this config's holidays.
    pub fn resolver(&self) -> RosterResult<StatusResolver<HolidayCache>> {
        Ok(StatusResolver::new(HolidayCache::new(
            self.holiday_calendar()?,
        )))
    }
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> RosterResult<RosterConfig> {
    let file = File::open(path)?;
    let config: RosterConfig = serde_json::from_reader(file)?;
    // Reject bad rules at load time rather than on first lookup.
    config.holiday_calendar()?;
    Ok(config)
}

pub fn save_config_to_json<P: AsRef<Path>>(config: &RosterConfig, path: P) -> RosterResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
