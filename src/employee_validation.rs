use crate::date_key::{date_key, parse_date_key};
use crate::employee::Employee;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EmployeeValidationError {
    message: String,
}

impl EmployeeValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Keys must be exactly what `date_key` produces, otherwise lookups by date
/// never find them.
fn is_canonical_key(key: &str) -> bool {
    parse_date_key(key).is_ok_and(|date| date_key(date) == key)
}

pub fn validate_employee(employee: &Employee) -> Result<(), EmployeeValidationError> {
    if employee.id.trim().is_empty() {
        return Err(EmployeeValidationError::new(
            "employee requires a non-empty id",
        ));
    }

    if let Some(bad) = employee.work_days.indices().find(|idx| *idx > 6) {
        return Err(EmployeeValidationError::new(format!(
            "employee {} has weekday index {} (must be 0..=6)",
            employee.id, bad
        )));
    }

    for key in employee.overrides.keys() {
        if !is_canonical_key(key) {
            return Err(EmployeeValidationError::new(format!(
                "employee {} has an override for malformed date key '{}'",
                employee.id, key
            )));
        }
    }

    for (idx, bounds) in employee.vacation_bounds().enumerate() {
        let (start, end) = bounds
            .map_err(|err| EmployeeValidationError::new(format!("employee {}: {err}", employee.id)))?;
        if start > end {
            return Err(EmployeeValidationError::new(format!(
                "employee {} vacation #{} starts {} after it ends {}",
                employee.id, idx, start, end
            )));
        }
    }

    for (key, hours) in &employee.extra_hours {
        if !is_canonical_key(key) {
            return Err(EmployeeValidationError::new(format!(
                "employee {} has extra hours for malformed date key '{}'",
                employee.id, key
            )));
        }
        if !hours.is_finite() {
            return Err(EmployeeValidationError::new(format!(
                "employee {} has non-finite extra hours {} on {}",
                employee.id, hours, key
            )));
        }
    }

    for key in employee.extra_hours_notes.keys() {
        if !is_canonical_key(key) {
            return Err(EmployeeValidationError::new(format!(
                "employee {} has an extra-hours note for malformed date key '{}'",
                employee.id, key
            )));
        }
    }

    Ok(())
}

pub fn validate_roster(employees: &[Employee]) -> Result<(), EmployeeValidationError> {
    let mut seen_ids = HashSet::with_capacity(employees.len());
    for employee in employees {
        if !seen_ids.insert(employee.id.as_str()) {
            return Err(EmployeeValidationError::new(format!(
                "duplicate employee id {}",
                employee.id
            )));
        }
        validate_employee(employee)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::WorkDays;

    #[test]
    fn error_is_a_std_error_carrying_its_message() {
        let err: Box<dyn std::error::Error> =
            Box::new(EmployeeValidationError::new("duplicate employee id a"));
        assert_eq!(err.to_string(), "duplicate employee id a");
    }

    #[test]
    fn unpadded_keys_are_not_canonical() {
        assert!(is_canonical_key("2025-06-11"));
        assert!(!is_canonical_key("2025-6-11"));
        assert!(!is_canonical_key("2025-06-1"));

        let mut employee = Employee::new("m", "M", WorkDays::weekdays());
        employee.extra_hours.insert("2025-6-11".into(), 3.0);
        let err = validate_employee(&employee).unwrap_err();
        assert!(err.to_string().contains("'2025-6-11'"));
    }
}
