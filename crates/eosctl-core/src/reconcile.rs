// ── Idempotent reconciliation ──
//
// Read, compare, write only on difference. A failed read never leads to a
// write, and a failed write is reported once with its cause.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AccessError, ReconcileError};
use crate::resource::Resource;

/// What a reconciliation run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<S> {
    /// Device already matched; nothing was written.
    AlreadySatisfied { current: S },
    /// One write was issued and acknowledged.
    Changed { previous: S, current: S },
    /// Dry run: a write would have been issued.
    WouldChange { current: S, desired: S },
}

impl<S> Outcome<S> {
    /// Whether the device state was modified.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

impl<S: fmt::Display> fmt::Display for Outcome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySatisfied { current } => write!(f, "already {current}, no change"),
            Self::Changed { previous, current } => write!(f, "changed {previous} -> {current}"),
            Self::WouldChange { current, desired } => {
                write!(f, "would change {current} -> {desired} (dry run)")
            }
        }
    }
}

/// Drives one resource towards a desired state.
pub struct Reconciler<'r, R: ?Sized> {
    resource: &'r R,
    dry_run: bool,
}

impl<'r, R: Resource + ?Sized> Reconciler<'r, R> {
    pub fn new(resource: &'r R) -> Self {
        Self {
            resource,
            dry_run: false,
        }
    }

    /// Report what would change instead of writing.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(
        &self,
        id: &R::Id,
        desired: &R::State,
    ) -> Result<Outcome<R::State>, ReconcileError> {
        let current = self.resource.get(id).map_err(|source| {
            warn!(kind = R::KIND, %id, error = %source, "read failed; nothing written");
            ReconcileError::Read {
                id: id.to_string(),
                source,
            }
        })?;

        if &current == desired {
            info!(kind = R::KIND, %id, %current, "already in desired state");
            return Ok(Outcome::AlreadySatisfied { current });
        }

        if self.dry_run {
            info!(kind = R::KIND, %id, %current, %desired, "would change (dry run)");
            return Ok(Outcome::WouldChange {
                current,
                desired: desired.clone(),
            });
        }

        info!(kind = R::KIND, %id, %current, %desired, "applying change");
        self.resource.set(id, desired).map_err(|source| {
            if let AccessError::RejectedByDevice { errors, .. } = &source {
                warn!(kind = R::KIND, %id, errors = ?errors, "change rejected");
            }
            ReconcileError::Write {
                id: id.to_string(),
                source,
            }
        })?;

        Ok(Outcome::Changed {
            previous: current,
            current: desired.clone(),
        })
    }
}

/// Bring `id` to `desired` on `resource`, writing only if it differs.
pub fn reconcile<R: Resource + ?Sized>(
    resource: &R,
    id: &R::Id,
    desired: &R::State,
) -> Result<Outcome<R::State>, ReconcileError> {
    Reconciler::new(resource).run(id, desired)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    /// In-memory resource that counts reads and writes.
    #[derive(Default)]
    struct Memory {
        values: RefCell<HashMap<String, u32>>,
        reads: Cell<usize>,
        writes: Cell<usize>,
        reject: bool,
    }

    impl Memory {
        fn with(id: &str, value: u32) -> Self {
            let memory = Self::default();
            memory.values.borrow_mut().insert(id.into(), value);
            memory
        }
    }

    impl Resource for Memory {
        type Id = str;
        type State = u32;
        const KIND: &'static str = "counter";

        fn get(&self, id: &str) -> Result<u32, AccessError> {
            self.reads.set(self.reads.get() + 1);
            self.values
                .borrow()
                .get(id)
                .copied()
                .ok_or_else(|| AccessError::NotFound {
                    resource: Self::KIND,
                    id: id.into(),
                })
        }

        fn set(&self, id: &str, desired: &u32) -> Result<(), AccessError> {
            self.writes.set(self.writes.get() + 1);
            if self.reject {
                return Err(AccessError::RejectedByDevice {
                    resource: Self::KIND,
                    id: id.into(),
                    errors: vec!["read-only".into()],
                });
            }
            self.values.borrow_mut().insert(id.into(), *desired);
            Ok(())
        }
    }

    #[test]
    fn matching_state_writes_nothing() {
        let memory = Memory::with("a", 7);
        let outcome = reconcile(&memory, "a", &7).unwrap();
        assert_eq!(outcome, Outcome::AlreadySatisfied { current: 7 });
        assert_eq!(memory.writes.get(), 0);
    }

    #[test]
    fn differing_state_writes_once() {
        let memory = Memory::with("a", 7);
        let outcome = reconcile(&memory, "a", &9).unwrap();
        assert_eq!(
            outcome,
            Outcome::Changed {
                previous: 7,
                current: 9
            }
        );
        assert!(outcome.is_changed());
        assert_eq!(memory.writes.get(), 1);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let memory = Memory::with("a", 7);
        reconcile(&memory, "a", &9).unwrap();
        let again = reconcile(&memory, "a", &9).unwrap();
        assert_eq!(again, Outcome::AlreadySatisfied { current: 9 });
        assert_eq!(memory.writes.get(), 1);
        assert_eq!(memory.reads.get(), 2);
    }

    #[test]
    fn read_failure_never_writes() {
        let memory = Memory::default();
        let err = reconcile(&memory, "missing", &1).unwrap_err();
        assert!(matches!(err, ReconcileError::Read { .. }));
        assert!(matches!(err.access_error(), AccessError::NotFound { .. }));
        assert_eq!(memory.writes.get(), 0);
    }

    #[test]
    fn rejected_write_is_reported_once() {
        let memory = Memory {
            reject: true,
            ..Memory::with("a", 7)
        };
        let err = reconcile(&memory, "a", &9).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Write {
                source: AccessError::RejectedByDevice { .. },
                ..
            }
        ));
        assert_eq!(memory.writes.get(), 1);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let memory = Memory::with("a", 7);
        let outcome = Reconciler::new(&memory).dry_run(true).run("a", &9).unwrap();
        assert_eq!(
            outcome,
            Outcome::WouldChange {
                current: 7,
                desired: 9
            }
        );
        assert_eq!(memory.writes.get(), 0);
        assert_eq!(outcome.to_string(), "would change 7 -> 9 (dry run)");
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = Outcome::AlreadySatisfied { current: 3 };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "outcome": "already_satisfied", "current": 3 })
        );
    }
}
