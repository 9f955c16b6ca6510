use serde::{Deserialize, Serialize};
use serde_json::json;
use tally_core::ConstraintViolation;

/// An employee record as exposed over the REST surface
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_state: Option<String>,
    pub hourly_cost_rate: f64,
}

/// Client payload for creating or updating an employee
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub federal_state: Option<String>,
    #[serde(default)]
    pub hourly_cost_rate: f64,
}

/// Declarative-style validation pass over an employee draft
///
/// Stands in for the validation engine: returns one violation record per
/// broken constraint, in field order.
pub fn validate_employee(draft: &EmployeeDraft) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();

    if draft.first_name.trim().is_empty() {
        violations.push(ConstraintViolation::new(
            "Employee",
            "firstName",
            "may not be empty",
            json!(draft.first_name),
        ));
    }
    if draft.last_name.trim().is_empty() {
        violations.push(ConstraintViolation::new(
            "Employee",
            "lastName",
            "may not be empty",
            json!(draft.last_name),
        ));
    }
    if !draft.email.contains('@') {
        violations.push(ConstraintViolation::new(
            "Employee",
            "email",
            "not a well-formed email address",
            json!(draft.email),
        ));
    }
    if draft.hourly_cost_rate < 0.0 {
        violations.push(ConstraintViolation::new(
            "Employee",
            "hourlyCostRate",
            "must be greater than or equal to 0",
            json!(draft.hourly_cost_rate),
        ));
    }

    violations
}

/// A working-time booking accepted through the explicitly bound controller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTime {
    pub id: u64,
    pub employee: u64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}
