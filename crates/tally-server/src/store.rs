use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tally_core::{ConstraintViolation, Fault, FaultKind};

use crate::types::{Employee, EmployeeDraft, WorkTime, validate_employee};

/// In-memory store standing in for the storage engine.
///
/// Inserts validate up front, so a broken draft surfaces directly as a
/// constraint-violation fault. Updates validate when the change is flushed,
/// so the same breakage surfaces wrapped inside a transaction-boundary
/// fault instead. Unique-email violations surface as persistence-constraint
/// faults on both paths.
pub struct Store {
    employees: DashMap<u64, Employee>,
    work_times: DashMap<u64, WorkTime>,
    next_employee_id: AtomicU64,
    next_work_time_id: AtomicU64,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self {
            employees: DashMap::new(),
            work_times: DashMap::new(),
            next_employee_id: AtomicU64::new(1),
            next_work_time_id: AtomicU64::new(1),
        }
    }

    /// Insert a new employee
    ///
    /// # Errors
    ///
    /// Returns a constraint-violation fault for an invalid draft, or a
    /// persistence-constraint fault when the email is already taken
    pub fn insert_employee(&self, draft: EmployeeDraft) -> Result<Employee, Fault> {
        let violations = validate_employee(&draft);
        if !violations.is_empty() {
            return Err(validation_fault(violations));
        }
        if self.email_taken(&draft.email, None) {
            return Err(duplicate_email_fault());
        }

        let id = self.next_employee_id.fetch_add(1, Ordering::Relaxed);
        let employee = Employee {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            federal_state: draft.federal_state,
            hourly_cost_rate: draft.hourly_cost_rate,
        };
        self.employees.insert(id, employee.clone());
        Ok(employee)
    }

    /// Replace an existing employee
    ///
    /// Returns `Ok(None)` when no employee has the given id.
    ///
    /// # Errors
    ///
    /// Returns a persistence-constraint fault when the new email is already
    /// taken, or a transaction-boundary fault wrapping the violations when
    /// flush-time validation rejects the change
    pub fn update_employee(&self, id: u64, draft: EmployeeDraft) -> Result<Option<Employee>, Fault> {
        if !self.employees.contains_key(&id) {
            return Ok(None);
        }
        if self.email_taken(&draft.email, Some(id)) {
            return Err(duplicate_email_fault());
        }

        let violations = validate_employee(&draft);
        if !violations.is_empty() {
            return Err(commit_failure(violations));
        }

        let employee = Employee {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            federal_state: draft.federal_state,
            hourly_cost_rate: draft.hourly_cost_rate,
        };
        self.employees.insert(id, employee.clone());
        Ok(Some(employee))
    }

    #[must_use]
    pub fn get_employee(&self, id: u64) -> Option<Employee> {
        self.employees.get(&id).map(|entry| entry.value().clone())
    }

    /// All employees, ordered by id
    #[must_use]
    pub fn list_employees(&self) -> Vec<Employee> {
        let mut employees: Vec<_> = self.employees.iter().map(|entry| entry.value().clone()).collect();
        employees.sort_by_key(|employee| employee.id);
        employees
    }

    pub fn remove_employee(&self, id: u64) -> Option<Employee> {
        self.employees.remove(&id).map(|(_, employee)| employee)
    }

    /// Record a bound working-time booking
    pub fn insert_work_time(&self, employee: u64, date: String, start_time: String, end_time: String) -> WorkTime {
        let id = self.next_work_time_id.fetch_add(1, Ordering::Relaxed);
        let work_time = WorkTime {
            id,
            employee,
            date,
            start_time,
            end_time,
        };
        self.work_times.insert(id, work_time.clone());
        work_time
    }

    fn email_taken(&self, email: &str, exclude: Option<u64>) -> bool {
        self.employees
            .iter()
            .any(|entry| entry.email == email && Some(entry.id) != exclude)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn validation_fault(violations: Vec<ConstraintViolation>) -> Fault {
    Fault::new(FaultKind::ConstraintViolation(violations), "validation failed")
}

/// The shape the storage engine reports a unique-key violation in: a broad
/// statement failure wrapping the specific constraint message.
fn duplicate_email_fault() -> Fault {
    Fault::new(FaultKind::PersistenceConstraint, "could not execute statement").caused_by(Fault::new(
        FaultKind::Other,
        "duplicate key value violates unique constraint \"uk_employee_email\"",
    ))
}

/// Flush-time validation failures surface through the transaction manager,
/// two levels above the violations themselves.
fn commit_failure(violations: Vec<ConstraintViolation>) -> Fault {
    Fault::new(FaultKind::TransactionBoundary, "could not commit transaction").caused_by(
        Fault::new(FaultKind::Other, "transaction marked as rollback-only")
            .caused_by(Fault::new(FaultKind::ConstraintViolation(violations), "validation failed on flush")),
    )
}
