use chrono::{Datelike, Duration, NaiveDate, Weekday};
use staff_roster::{
    FixedHoliday, HolidayCalendar, MovableHoliday, build_holiday_table, date_key, easter_sunday,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Anonymous Gregorian algorithm (Meeus/Jones/Butcher), used as an
/// independent reference.
fn reference_easter(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d_ = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d_ - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    d(year, month as u32, day as u32)
}

#[test]
fn easter_matches_known_dates() {
    assert_eq!(date_key(easter_sunday(2024).unwrap()), "2024-03-31");
    assert_eq!(date_key(easter_sunday(2025).unwrap()), "2025-04-20");
    assert_eq!(date_key(easter_sunday(2026).unwrap()), "2026-04-05");
    assert_eq!(easter_sunday(1900).unwrap(), d(1900, 4, 15));
    assert_eq!(easter_sunday(2000).unwrap(), d(2000, 4, 23));
    assert_eq!(easter_sunday(2038).unwrap(), d(2038, 4, 25));
    assert_eq!(easter_sunday(2100).unwrap(), d(2100, 3, 28));
}

#[test]
fn easter_agrees_with_reference_algorithm_1900_to_2100() {
    for year in 1900..=2100 {
        let easter = easter_sunday(year).unwrap();
        assert_eq!(easter, reference_easter(year), "year {year}");
        assert_eq!(easter.weekday(), Weekday::Sun, "year {year}");
        assert!(easter >= d(year, 3, 22) && easter <= d(year, 4, 25));
    }
}

#[test]
fn easter_is_undefined_before_year_one() {
    assert_eq!(easter_sunday(0), None);
    assert_eq!(easter_sunday(-200), None);
}

#[test]
fn movable_holidays_sit_at_fixed_offsets_from_easter() {
    for year in [2024, 2025, 2026] {
        let table = build_holiday_table(year);
        let easter = easter_sunday(year).unwrap();
        assert_eq!(table.name_for(easter), Some("Easter Sunday"));
        assert_eq!(table.name_for(easter - Duration::days(2)), Some("Good Friday"));
        assert_eq!(table.name_for(easter - Duration::days(47)), Some("Carnival"));
        assert_eq!(table.name_for(easter + Duration::days(60)), Some("Corpus Christi"));
    }

    let table = build_holiday_table(2025);
    assert_eq!(table.get("2025-03-04"), Some("Carnival"));
    assert_eq!(table.get("2025-04-18"), Some("Good Friday"));
    assert_eq!(table.get("2025-06-19"), Some("Corpus Christi"));
}

#[test]
fn fixed_holidays_are_present_every_year() {
    let expected = [
        ("01-01", "New Year's Day"),
        ("04-02", "Regional Holiday"),
        ("04-25", "Freedom Day"),
        ("05-01", "Labour Day"),
        ("06-10", "Portugal Day"),
        ("07-01", "Regional Day"),
        ("08-15", "Assumption Day"),
        ("08-21", "City Day"),
        ("10-05", "Republic Day"),
        ("11-01", "All Saints' Day"),
        ("12-01", "Restoration of Independence"),
        ("12-08", "Immaculate Conception"),
        ("12-25", "Christmas Day"),
        ("12-26", "Boxing Day"),
    ];
    for year in [2023, 2025, 2027] {
        let table = build_holiday_table(year);
        assert_eq!(table.year(), year);
        for (md, name) in expected {
            assert_eq!(table.get(&format!("{year}-{md}")), Some(name), "{year}-{md}");
        }
    }
}

#[test]
fn non_holidays_are_absent() {
    let table = build_holiday_table(2025);
    assert!(!table.is_holiday(d(2025, 6, 11)));
    assert!(!table.is_holiday(d(2025, 12, 24)));
    assert_eq!(table.len(), 18);
}

#[test]
fn later_rule_wins_on_collision() {
    // 2010: Good Friday is April 2
    let table = build_holiday_table(2010);
    assert_eq!(table.get("2010-04-02"), Some("Good Friday"));
    assert_eq!(table.len(), 17);

    // 2038: Easter Sunday is April 25
    assert_eq!(build_holiday_table(2038).get("2038-04-25"), Some("Easter Sunday"));

    // 2004: Corpus Christi is June 10
    assert_eq!(build_holiday_table(2004).get("2004-06-10"), Some("Corpus Christi"));
}

#[test]
fn building_twice_gives_identical_tables() {
    for year in [1999, 2025, 2100] {
        let first = build_holiday_table(year);
        let second = build_holiday_table(year);
        assert_eq!(first, second);
        assert_eq!(
            first.iter().collect::<Vec<_>>(),
            second.iter().collect::<Vec<_>>()
        );
    }
}

#[test]
fn holidays_iterate_in_calendar_order() {
    let table = build_holiday_table(2025);
    let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys.first().copied(), Some("2025-01-01"));
    assert_eq!(keys.last().copied(), Some("2025-12-26"));
}

#[test]
fn custom_calendar_round_trips_through_config() {
    let calendar = HolidayCalendar::custom(
        [FixedHoliday::new(12, 24, "Christmas Eve")],
        [MovableHoliday::new(1, "Easter Monday")],
    )
    .unwrap();
    let table = calendar.build_table(2025);
    assert_eq!(table.get("2025-12-24"), Some("Christmas Eve"));
    assert_eq!(table.get("2025-04-21"), Some("Easter Monday"));
    assert_eq!(table.len(), 2);

    let config = calendar.to_config();
    let json = serde_json::to_string(&config).unwrap();
    let restored = HolidayCalendar::from_config(&serde_json::from_str(&json).unwrap()).unwrap();
    assert_eq!(restored, calendar);
}

#[test]
fn far_movable_offsets_are_rejected() {
    for offset in [400, -400, i64::MIN, i64::MAX] {
        let result = HolidayCalendar::custom(
            Vec::<FixedHoliday>::new(),
            [MovableHoliday::new(offset, "Too Far")],
        );
        assert!(result.is_err(), "offset {offset}");
    }
}

#[test]
fn config_with_extreme_offset_is_rejected_not_panicking() {
    let config: staff_roster::HolidayCalendarConfig = serde_json::from_str(
        r#"{ "movable": [ { "easter_offset": -9223372036854775808, "name": "Overflow" } ] }"#,
    )
    .unwrap();
    assert!(matches!(
        HolidayCalendar::from_config(&config),
        Err(staff_roster::RosterError::InvalidConfig(_))
    ));
}

#[test]
fn movable_holiday_stays_in_its_own_years_table() {
    // Easter 2025 is April 20; +260 days is 2026-01-05
    let calendar = HolidayCalendar::custom(
        Vec::<FixedHoliday>::new(),
        [MovableHoliday::new(260, "Epiphany Eve")],
    )
    .unwrap();
    assert_eq!(calendar.build_table(2025).get("2026-01-05"), None);
    assert!(calendar.build_table(2025).is_empty());
}
