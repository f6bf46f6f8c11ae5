//! Local JSON snapshots of the roster.
//!
//! Field names follow the remote roster documents (`workDays`, `overrides`,
//! `vacations`, `extraHours`, `extraHoursNotes`), so an export of the
//! employee collection loads as is.

use crate::employee::Employee;
use crate::employee_validation;
use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub employees: Vec<Employee>,
}

pub trait RosterStore {
    fn save_roster(&self, snapshot: &RosterSnapshot) -> RosterResult<()>;
    fn load_roster(&self) -> RosterResult<Option<RosterSnapshot>>;
}

/// Stores the snapshot as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonRosterStore {
    path: PathBuf,
}

impl JsonRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for JsonRosterStore {
    fn save_roster(&self, snapshot: &RosterSnapshot) -> RosterResult<()> {
        save_roster_to_json(snapshot, &self.path)
    }

    fn load_roster(&self) -> RosterResult<Option<RosterSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_roster_from_json(&self.path).map(Some)
    }
}

pub fn validate_employees(employees: &[Employee]) -> RosterResult<()> {
    employee_validation::validate_roster(employees)
        .map_err(|err| RosterError::InvalidEmployee(err.to_string()))
}

pub fn save_roster_to_json<P: AsRef<Path>>(snapshot: &RosterSnapshot, path: P) -> RosterResult<()> {
    validate_employees(&snapshot.employees)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)?;
    Ok(())
}

pub fn load_roster_from_json<P: AsRef<Path>>(path: P) -> RosterResult<RosterSnapshot> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let snapshot: RosterSnapshot = serde_json::from_reader(BufReader::new(file))?;
    if let Err(err) = validate_employees(&snapshot.employees) {
        warn!(path = %path.display(), "rejecting roster snapshot: {err}");
        return Err(err);
    }
    Ok(snapshot)
}

impl RosterSnapshot {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employee(&self, id: &str) -> RosterResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| RosterError::UnknownEmployee(id.to_string()))
    }

    pub fn employee_mut(&mut self, id: &str) -> RosterResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| RosterError::UnknownEmployee(id.to_string()))
    }
}
