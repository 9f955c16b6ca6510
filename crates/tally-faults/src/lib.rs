//! Fault translation for the request pipeline.
//!
//! Converts faults escaping request handling into a uniform client-facing
//! representation: either a field-path → error mapping or a plain message,
//! paired with the status to attach. Composed at the edge of the pipeline
//! by the server crate; translation itself knows nothing about HTTP routing.

mod report;
mod translate;

pub use report::{FaultReport, FaultStatus, FieldFault, FieldFaultMap};
pub use translate::{
    TRANSACTION_UNWRAP_DEPTH, Translation, bind_failure, constraint_violations,
    persistence_constraint, transaction_boundary, translate,
};
