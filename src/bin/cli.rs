use chrono::{Datelike, NaiveDate};
use staff_roster::{
    Employee, HolidayCache, RosterConfig, RosterResult, RosterSnapshot, Status, StatusResolver,
    WorkDays, date_key, extra_hours_total, load_config_from_json, load_roster_from_json,
    parse_date_key, roster_grid, save_roster_to_json, summarize_period, vacation_balance,
};
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn render_text_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if ci < widths.len() && cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, cells: &[String]| {
        out.push('|');
        for (ci, w) in widths.iter().enumerate() {
            let cell = cells.get(ci).map(String::as_str).unwrap_or("");
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(w.saturating_sub(cell.len())));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, headers);
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        push_row(&mut out, row);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <json_path>                   Load roster snapshot\n  save <json_path>                   Save roster snapshot\n  config <json_path>                 Load holiday/vacation configuration\n  employees                          List employees\n  add <id> <days_csv> <name...>      Add employee (days 0=Sun..6=Sat, e.g. 1,2,3,4,5)\n  holidays <year>                    List holidays for a year\n  status <id> <YYYY-MM-DD>           Resolve one employee-day\n  month <YYYY-MM>                    Status grid for every employee\n  override <id> <YYYY-MM-DD> <status...>\n                                     Set an explicit status\n  clear <id> <YYYY-MM-DD>            Remove an override\n  vacation <id> <start> <end>        Add an inclusive vacation range\n  hours <id> <YYYY-MM-DD> <hours> [note...]\n                                     Record extra hours (0 removes)\n  balance <id> <year>                Vacation balance and extra hours\n  summary <id> <start> <end>         Status counts over a period\n  quit|exit                          Exit"
    );
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_date_key(s).ok()
}

fn month_bounds(s: &str) -> Option<(NaiveDate, NaiveDate)> {
    let first = parse_date_key(&format!("{s}-01")).ok()?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

fn status_code(status: &Status) -> String {
    match status {
        Status::Working => "W".into(),
        Status::OnVacation => "V".into(),
        Status::Off => "H".into(),
        Status::ScheduledOff => "-".into(),
        Status::Custom(text) => text
            .chars()
            .next()
            .map(|c| format!("{}*", c.to_ascii_uppercase()))
            .unwrap_or_else(|| "*".into()),
    }
}

fn print_employees(snapshot: &RosterSnapshot) {
    let headers = vec![
        "id".to_string(),
        "name".to_string(),
        "work days".to_string(),
        "overrides".to_string(),
        "vacations".to_string(),
    ];
    let rows: Vec<Vec<String>> = snapshot
        .employees
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.display_name().to_string(),
                e.work_days
                    .indices()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
                e.overrides.len().to_string(),
                e.vacations.len().to_string(),
            ]
        })
        .collect();
    println!("{}", render_text_table(&headers, &rows));
}

fn print_month(snapshot: &RosterSnapshot, resolver: &StatusResolver, start: NaiveDate, end: NaiveDate) {
    let grid = roster_grid(&snapshot.employees, start, end, resolver);
    let mut headers = vec!["employee".to_string()];
    headers.extend(
        staff_roster::stats::days_between(start, end).map(|d| format!("{:02}", d.day())),
    );
    let rows: Vec<Vec<String>> = grid
        .iter()
        .map(|row| {
            let mut cells = vec![row.employee_id.clone()];
            cells.extend(row.days.iter().map(|(_, status)| status_code(status)));
            cells
        })
        .collect();
    println!("{}", render_text_table(&headers, &rows));
    println!("W=Working H=Holiday V=On Vacation -=Scheduled Off X*=override");
}

fn with_employee<F>(snapshot: &mut RosterSnapshot, id: &str, f: F)
where
    F: FnOnce(&mut Employee) -> RosterResult<String>,
{
    match snapshot.employee_mut(id).and_then(f) {
        Ok(message) => println!("{message}"),
        Err(e) => println!("Error: {e}"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install log subscriber: {e}");
    }
}

fn main() {
    init_tracing();

    let mut snapshot = RosterSnapshot::default();
    let mut config = RosterConfig::default();
    let mut resolver = StatusResolver::new(HolidayCache::default());

    println!("Staff Roster (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match parts.next() {
                Some(path) => match load_roster_from_json(path) {
                    Ok(loaded) => {
                        snapshot = loaded;
                        println!(
                            "Roster loaded from {path} ({} employees).",
                            snapshot.employees.len()
                        );
                    }
                    Err(e) => println!("Error loading roster: {e}"),
                },
                None => println!("Usage: load <json_path>"),
            },
            "save" => match parts.next() {
                Some(path) => match save_roster_to_json(&snapshot, path) {
                    Ok(()) => println!("Roster saved to {path}."),
                    Err(e) => println!("Error saving roster: {e}"),
                },
                None => println!("Usage: save <json_path>"),
            },
            "config" => match parts.next() {
                Some(path) => match load_config_from_json(path).and_then(|c| {
                    let r = c.resolver()?;
                    Ok((c, r))
                }) {
                    Ok((loaded, new_resolver)) => {
                        config = loaded;
                        resolver = new_resolver;
                        println!("Configuration loaded from {path}.");
                    }
                    Err(e) => println!("Error loading configuration: {e}"),
                },
                None => println!("Usage: config <json_path>"),
            },
            "employees" => print_employees(&snapshot),
            "add" => {
                let id = parts.next();
                let days = parts.next();
                let name = parts.collect::<Vec<_>>().join(" ");
                match (id, days) {
                    (Some(id), Some(days)) => {
                        let indices: Result<Vec<u8>, _> =
                            days.split(',').map(|d| d.trim().parse::<u8>()).collect();
                        let Ok(indices) = indices else {
                            println!("Invalid days (expected e.g. 1,2,3,4,5)");
                            continue;
                        };
                        if let Some(bad) = indices.iter().find(|idx| **idx > 6) {
                            println!("Invalid weekday {bad} (0=Sun .. 6=Sat)");
                            continue;
                        }
                        if snapshot.employee(id).is_ok() {
                            println!("Employee {id} already exists.");
                            continue;
                        }
                        snapshot
                            .employees
                            .push(Employee::new(id, name, WorkDays::new(indices)));
                        println!("Added employee {id}.");
                    }
                    _ => println!("Usage: add <id> <days_csv> <name...>"),
                }
            }
            "holidays" => match parts.next().and_then(|y| y.parse::<i32>().ok()) {
                Some(year) => {
                    let table = resolver.holidays().table_for(year);
                    let headers = vec!["date".to_string(), "holiday".to_string()];
                    let rows: Vec<Vec<String>> = table
                        .iter()
                        .map(|(k, n)| vec![k.to_string(), n.to_string()])
                        .collect();
                    println!("{}", render_text_table(&headers, &rows));
                }
                None => println!("Usage: holidays <year>"),
            },
            "status" => match (parts.next(), parts.next().and_then(parse_date)) {
                (Some(id), Some(date)) => match snapshot.employee(id) {
                    Ok(employee) => {
                        let resolution = resolver.resolve_detailed(employee, date);
                        println!(
                            "{} on {}: {} ({})",
                            employee.display_name(),
                            date_key(date),
                            resolution.status,
                            resolution.source.as_str()
                        );
                        for warning in &resolution.warnings {
                            println!("Warning: {warning}");
                        }
                    }
                    Err(e) => println!("Error: {e}"),
                },
                _ => println!("Usage: status <id> <YYYY-MM-DD>"),
            },
            "month" => match parts.next().and_then(month_bounds) {
                Some((start, end)) => print_month(&snapshot, &resolver, start, end),
                None => println!("Usage: month <YYYY-MM>"),
            },
            "override" => {
                let id = parts.next();
                let date = parts.next().and_then(parse_date);
                let text = parts.collect::<Vec<_>>().join(" ");
                match (id, date) {
                    (Some(id), Some(date)) if !text.is_empty() => {
                        with_employee(&mut snapshot, id, |e| {
                            let status = Status::from(text);
                            let message = format!("Override on {} set to {}.", date_key(date), status);
                            e.set_override(date, status);
                            Ok(message)
                        })
                    }
                    _ => println!("Usage: override <id> <YYYY-MM-DD> <status...>"),
                }
            }
            "clear" => match (parts.next(), parts.next().and_then(parse_date)) {
                (Some(id), Some(date)) => with_employee(&mut snapshot, id, |e| {
                    Ok(match e.clear_override(date) {
                        Some(previous) => format!("Cleared override '{previous}'."),
                        None => format!("No override on {}.", date_key(date)),
                    })
                }),
                _ => println!("Usage: clear <id> <YYYY-MM-DD>"),
            },
            "vacation" => match (
                parts.next(),
                parts.next().and_then(parse_date),
                parts.next().and_then(parse_date),
            ) {
                (Some(id), Some(start), Some(end)) => with_employee(&mut snapshot, id, |e| {
                    e.add_vacation(start, end)?;
                    Ok(format!("Vacation {start} to {end} added."))
                }),
                _ => println!("Usage: vacation <id> <start> <end>"),
            },
            "hours" => {
                let id = parts.next();
                let date = parts.next().and_then(parse_date);
                let hours = parts.next().and_then(|h| h.parse::<f64>().ok());
                let note = parts.collect::<Vec<_>>().join(" ");
                match (id, date, hours) {
                    (Some(id), Some(date), Some(hours)) => with_employee(&mut snapshot, id, |e| {
                        e.set_extra_hours(date, hours, Some(note))?;
                        Ok(format!("Extra hours on {} set to {hours}.", date_key(date)))
                    }),
                    _ => println!("Usage: hours <id> <YYYY-MM-DD> <hours> [note...]"),
                }
            }
            "balance" => match (parts.next(), parts.next().and_then(|y| y.parse::<i32>().ok())) {
                (Some(id), Some(year)) => match snapshot.employee(id) {
                    Ok(employee) => {
                        let balance =
                            vacation_balance(employee, year, &config.vacation, resolver.holidays());
                        println!(
                            "{year}: vacation used {} of {} (remaining {}), extra hours {:.1}",
                            balance.used,
                            balance.allowance,
                            balance.remaining,
                            extra_hours_total(employee, year)
                        );
                    }
                    Err(e) => println!("Error: {e}"),
                },
                _ => println!("Usage: balance <id> <year>"),
            },
            "summary" => match (
                parts.next(),
                parts.next().and_then(parse_date),
                parts.next().and_then(parse_date),
            ) {
                (Some(id), Some(start), Some(end)) => match snapshot.employee(id) {
                    Ok(employee) => {
                        let summary = summarize_period(employee, start, end, resolver.holidays());
                        let headers = vec!["status".to_string(), "days".to_string()];
                        let rows: Vec<Vec<String>> = summary
                            .entries()
                            .into_iter()
                            .map(|(s, c)| vec![s.to_string(), c.to_string()])
                            .collect();
                        println!("{}", render_text_table(&headers, &rows));
                        if summary.skipped_vacations > 0 {
                            println!(
                                "Warning: {} malformed vacation checks skipped.",
                                summary.skipped_vacations
                            );
                        }
                    }
                    Err(e) => println!("Error: {e}"),
                },
                _ => println!("Usage: summary <id> <start> <end>"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
