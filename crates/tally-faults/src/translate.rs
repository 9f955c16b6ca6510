use tally_core::{ConstraintViolation, Fault, FaultKind, FieldError};

use crate::report::{FaultReport, FaultStatus, FieldFault, FieldFaultMap};

/// How far to descend into a commit failure's cause chain when looking for
/// a hidden validation failure (`fault.cause.cause`).
///
/// Storage engines that validate on flush report violations through the
/// transaction manager with exactly this nesting; anything deeper or
/// shallower is not recognized.
pub const TRANSACTION_UNWRAP_DEPTH: usize = 2;

/// A translated fault: the payload plus the status to attach to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub report: FaultReport,
    pub status: FaultStatus,
}

/// Translate a fault escaping request handling into a client-facing report.
///
/// Dispatches over the fault's kind tag. Returns `None` for kinds outside
/// the recognized taxonomy; those propagate to the pipeline's generic
/// fallback instead of being handled here.
#[must_use]
pub fn translate(fault: &Fault) -> Option<Translation> {
    match fault.kind() {
        FaultKind::PersistenceConstraint => Some(persistence_constraint(fault)),
        FaultKind::Bind(errors) => Some(bind_failure(errors)),
        FaultKind::ConstraintViolation(violations) => Some(constraint_violations(violations)),
        FaultKind::TransactionBoundary => Some(transaction_boundary(fault)),
        FaultKind::Other => None,
    }
}

/// Unique and foreign-key violations surfaced by the storage engine.
///
/// The engine does not report which field violated the constraint in a
/// structured way, so the report carries the root cause's message and no
/// field attribution.
#[must_use]
pub fn persistence_constraint(fault: &Fault) -> Translation {
    Translation {
        report: FaultReport::Message(fault.most_specific_cause().message().to_owned()),
        status: FaultStatus::Conflict,
    }
}

/// Field errors collected by explicit request binding in non-declarative
/// controller paths.
#[must_use]
pub fn bind_failure(errors: &[FieldError]) -> Translation {
    let mut fields = FieldFaultMap::new();
    for error in errors {
        fields.insert(error.field.clone(), FieldFault::from_field_error(error));
    }
    Translation {
        report: FaultReport::Fields(fields),
        status: FaultStatus::BadRequest,
    }
}

/// Violations reported by the validation engine.
///
/// Two violations on the identical property path collapse to one entry,
/// last write wins.
#[must_use]
pub fn constraint_violations(violations: &[ConstraintViolation]) -> Translation {
    let mut fields = FieldFaultMap::new();
    for violation in violations {
        fields.insert(violation.property_path.clone(), FieldFault::from_violation(violation));
    }
    Translation {
        report: FaultReport::Fields(fields),
        status: FaultStatus::BadRequest,
    }
}

/// Commit failures that may be hiding a validation failure.
///
/// When the fault two levels down is a constraint violation, its
/// translation is returned. Any other shape yields an empty report: the
/// client gets a bodyless response. That gap is pinned by a regression
/// test pending a policy decision on a fallback payload.
#[must_use]
pub fn transaction_boundary(fault: &Fault) -> Translation {
    if let Some(inner) = fault.unwrap_cause(TRANSACTION_UNWRAP_DEPTH)
        && let FaultKind::ConstraintViolation(violations) = inner.kind()
    {
        tracing::debug!("extracting constraint violations from failed commit");
        return constraint_violations(violations);
    }
    Translation {
        report: FaultReport::Empty,
        status: FaultStatus::BadRequest,
    }
}
