use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router, routing::post};
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tally_core::{Fault, FaultKind, FieldError};

use crate::render::FaultResponse;
use crate::store::Store;
use crate::types::WorkTime;

/// Working-time routes
pub fn router() -> Router<Arc<Store>> {
    Router::new().route("/workTimes", post(create_work_time))
}

/// Raw booking payload before binding
///
/// Fields stay untyped so binding can report the rejected value verbatim
/// instead of failing at deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkTimeForm {
    #[serde(default)]
    employee: Value,
    #[serde(default)]
    date: Value,
    #[serde(default)]
    start_time: Value,
    #[serde(default)]
    end_time: Value,
}

#[derive(Debug)]
struct BoundWorkTime {
    employee: u64,
    date: String,
    start_time: String,
    end_time: String,
}

/// Handle `POST /workTimes`
///
/// This controller binds its fields explicitly rather than leaning on the
/// declarative validation pass, so failures surface as a bind fault.
async fn create_work_time(
    State(store): State<Arc<Store>>,
    Json(form): Json<WorkTimeForm>,
) -> Result<(StatusCode, Json<WorkTime>), FaultResponse> {
    let bound = bind(&form).map_err(|errors| Fault::new(FaultKind::Bind(errors), "work time binding failed"))?;
    let work_time = store.insert_work_time(bound.employee, bound.date, bound.start_time, bound.end_time);
    Ok((StatusCode::CREATED, Json(work_time)))
}

fn bind(form: &WorkTimeForm) -> Result<BoundWorkTime, Vec<FieldError>> {
    let mut errors = Vec::new();

    let employee = form.employee.as_u64();
    if employee.is_none() {
        errors.push(FieldError::new(
            "employee",
            form.employee.clone(),
            "must be an employee id",
        ));
    }

    let date = match form.date.as_str() {
        Some(raw) if is_iso_date(raw) => Some(raw.to_owned()),
        _ => {
            errors.push(FieldError::new("date", form.date.clone(), "must match yyyy-MM-dd"));
            None
        }
    };

    let start_time = bind_time("startTime", &form.start_time, &mut errors);
    let end_time = bind_time("endTime", &form.end_time, &mut errors);

    // Zero-padded HH:mm compares correctly as text
    if let (Some(start), Some(end)) = (&start_time, &end_time)
        && end <= start
    {
        errors.push(FieldError::new(
            "endTime",
            form.end_time.clone(),
            "must be after startTime",
        ));
    }

    match (employee, date, start_time, end_time) {
        (Some(employee), Some(date), Some(start_time), Some(end_time)) if errors.is_empty() => Ok(BoundWorkTime {
            employee,
            date,
            start_time,
            end_time,
        }),
        _ => Err(errors),
    }
}

fn bind_time(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.as_str() {
        Some(raw) if is_time(raw) => Some(raw.to_owned()),
        _ => {
            errors.push(FieldError::new(field, value.clone(), "must match HH:mm"));
            None
        }
    }
}

/// `yyyy-MM-dd` with a plausible month and day
fn is_iso_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    if !raw
        .bytes()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return false;
    }
    let month: u32 = raw[5..7].parse().unwrap_or(0);
    let day: u32 = raw[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// `HH:mm`, 24-hour clock
fn is_time(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if !raw.bytes().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit()) {
        return false;
    }
    let hours: u32 = raw[0..2].parse().unwrap_or(24);
    let minutes: u32 = raw[3..5].parse().unwrap_or(60);
    hours < 24 && minutes < 60
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form(employee: Value, date: Value, start: Value, end: Value) -> WorkTimeForm {
        WorkTimeForm {
            employee,
            date,
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn accepts_dates_and_rejects_lookalikes() {
        assert!(is_iso_date("2014-07-01"));
        assert!(!is_iso_date("2014-13-01"));
        assert!(!is_iso_date("2014-00-10"));
        assert!(!is_iso_date("2014-7-1"));
        assert!(!is_iso_date("01.07.2014"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn accepts_times_and_rejects_lookalikes() {
        assert!(is_time("09:00"));
        assert!(is_time("23:59"));
        assert!(!is_time("24:00"));
        assert!(!is_time("09:60"));
        assert!(!is_time("9:00"));
        assert!(!is_time("0900"));
    }

    #[test]
    fn a_complete_form_binds() {
        let bound = bind(&form(json!(1), json!("2014-07-01"), json!("09:00"), json!("17:30"))).unwrap();

        assert_eq!(bound.employee, 1);
        assert_eq!(bound.date, "2014-07-01");
        assert_eq!(bound.start_time, "09:00");
        assert_eq!(bound.end_time, "17:30");
    }

    #[test]
    fn every_broken_field_gets_its_own_error() {
        let errors = bind(&form(json!("one"), Value::Null, json!("morning"), json!("17:30"))).unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["employee", "date", "startTime"]);
        assert_eq!(errors[0].rejected_value, json!("one"));
    }

    #[test]
    fn end_before_start_is_reported_on_the_end_field() {
        let errors = bind(&form(json!(1), json!("2014-07-01"), json!("17:30"), json!("09:00"))).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "endTime");
        assert_eq!(errors[0].message, "must be after startTime");
    }
}
