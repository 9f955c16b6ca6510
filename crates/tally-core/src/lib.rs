//! Shared boundary contract between the request pipeline's collaborators
//! (store, validation, binding) and the fault-translation layer.

mod fault;

pub use fault::{ConstraintViolation, Fault, FaultKind, FieldError};
