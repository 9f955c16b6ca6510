use http::StatusCode;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use tally_core::{ConstraintViolation, FieldError};

/// Field path → failure mapping emitted for validation-class faults.
///
/// Keys are unique; inserting a second failure for the same path replaces
/// the first.
pub type FieldFaultMap = IndexMap<String, FieldFault>;

/// One validation failure attributed to a field of a logical entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFault {
    /// Owning entity, when the reporting collaborator exposes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Dot-delimited path to the invalid field, never empty
    pub field: String,
    /// The value the client sent
    pub rejected_value: Value,
    /// Human-readable failure message
    pub message: String,
}

impl FieldFault {
    /// Build a field fault from a validation-engine violation
    #[must_use]
    pub fn from_violation(violation: &ConstraintViolation) -> Self {
        Self {
            entity: Some(violation.root_entity.clone()),
            field: violation.property_path.clone(),
            rejected_value: violation.invalid_value.clone(),
            message: violation.message.clone(),
        }
    }

    /// Build a field fault from a binding field error
    ///
    /// Binding does not know which entity the field belongs to, so the
    /// entity stays unset.
    #[must_use]
    pub fn from_field_error(error: &FieldError) -> Self {
        Self {
            entity: None,
            field: error.field.clone(),
            rejected_value: error.rejected_value.clone(),
            message: error.message.clone(),
        }
    }
}

/// The translated client-facing payload.
///
/// Exactly one shape per translation: a field mapping for validation-class
/// faults, a plain message for conflict-class faults, or nothing at all for
/// the unresolved commit-failure case.
#[derive(Debug, Clone, PartialEq)]
pub enum FaultReport {
    /// Field path → failure mapping
    Fields(FieldFaultMap),
    /// Single free-text message
    Message(String),
    /// No payload
    Empty,
}

/// Status attached to a report.
///
/// Translation only ever assigns these two; anything outside the recognized
/// taxonomy is not translated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultStatus {
    /// The client sent something invalid
    BadRequest,
    /// The write conflicts with existing data
    Conflict,
}

impl FaultStatus {
    /// The HTTP status code this maps to
    #[must_use]
    pub const fn as_status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
        }
    }
}
