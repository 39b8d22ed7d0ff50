//! Ownership ledger for one generated C routine.
//!
//! Every heap value the routine creates is recorded here as it is written:
//!
//! - `zend_string` handles are *acquired*, *consumed* by one or more calls and
//!   *released* exactly once, after their last consumer.
//! - `malloc`-ed type lists are *allocated* and *transferred* exactly once into
//!   the value that takes ownership of them.
//!
//! [`OwnershipLedger::check`] runs before the routine's text is accepted.

use rustc_hash::FxHashMap;

use zendgen_core::InternalError;

/// One recorded ownership step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipEvent {
    Acquire(String),
    Consume { handle: String, by: String },
    Release(String),
    Alloc(String),
    Transfer { handle: String, to: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleKind {
    Counted,
    Allocated,
}

#[derive(Debug)]
struct HandleState {
    kind: HandleKind,
    consumed: usize,
    released: usize,
    transferred: usize,
}

/// Ordered record of handle events in one routine.
#[derive(Debug)]
pub struct OwnershipLedger {
    routine: String,
    events: Vec<OwnershipEvent>,
}

impl OwnershipLedger {
    pub fn new(routine: impl Into<String>) -> Self {
        Self {
            routine: routine.into(),
            events: Vec::new(),
        }
    }

    pub fn acquire(&mut self, handle: &str) {
        self.events.push(OwnershipEvent::Acquire(handle.to_string()));
    }

    pub fn consume(&mut self, handle: &str, by: &str) {
        self.events.push(OwnershipEvent::Consume {
            handle: handle.to_string(),
            by: by.to_string(),
        });
    }

    pub fn release(&mut self, handle: &str) {
        self.events.push(OwnershipEvent::Release(handle.to_string()));
    }

    pub fn alloc(&mut self, handle: &str) {
        self.events.push(OwnershipEvent::Alloc(handle.to_string()));
    }

    pub fn transfer(&mut self, handle: &str, to: &str) {
        self.events.push(OwnershipEvent::Transfer {
            handle: handle.to_string(),
            to: to.to_string(),
        });
    }

    pub fn events(&self) -> &[OwnershipEvent] {
        &self.events
    }

    /// Number of acquired string handles.
    pub fn acquired(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OwnershipEvent::Acquire(_)))
            .count()
    }

    /// Number of released string handles.
    pub fn released(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OwnershipEvent::Release(_)))
            .count()
    }

    /// Check that every handle was balanced, in order.
    pub fn check(&self) -> Result<(), InternalError> {
        let mut states: FxHashMap<&str, HandleState> = FxHashMap::default();
        let mut order: Vec<&str> = Vec::new();

        for event in &self.events {
            match event {
                OwnershipEvent::Acquire(handle) | OwnershipEvent::Alloc(handle) => {
                    let kind = if matches!(event, OwnershipEvent::Acquire(_)) {
                        HandleKind::Counted
                    } else {
                        HandleKind::Allocated
                    };
                    if states.contains_key(handle.as_str()) {
                        return Err(self.unbalanced(format!("{handle} created twice")));
                    }
                    states.insert(
                        handle,
                        HandleState {
                            kind,
                            consumed: 0,
                            released: 0,
                            transferred: 0,
                        },
                    );
                    order.push(handle);
                }
                OwnershipEvent::Consume { handle, by } => {
                    let state = self.state(&mut states, handle)?;
                    if state.kind != HandleKind::Counted {
                        return Err(self.unbalanced(format!(
                            "{handle} consumed by {by} but never acquired"
                        )));
                    }
                    if state.released > 0 {
                        return Err(self.unbalanced(format!("{handle} used by {by} after release")));
                    }
                    state.consumed += 1;
                }
                OwnershipEvent::Release(handle) => {
                    let state = self.state(&mut states, handle)?;
                    if state.kind != HandleKind::Counted {
                        return Err(self.unbalanced(format!(
                            "{handle} released but it was allocated"
                        )));
                    }
                    if state.consumed == 0 {
                        return Err(self.unbalanced(format!("{handle} released before any use")));
                    }
                    state.released += 1;
                }
                OwnershipEvent::Transfer { handle, to } => {
                    let state = self.state(&mut states, handle)?;
                    if state.kind != HandleKind::Allocated {
                        return Err(self.unbalanced(format!(
                            "{handle} transferred to {to} but never allocated"
                        )));
                    }
                    state.transferred += 1;
                }
            }
        }

        for handle in order {
            let state = &states[handle];
            match state.kind {
                HandleKind::Counted if state.released != 1 => {
                    return Err(self.unbalanced(format!(
                        "{handle} acquired once but released {} times",
                        state.released
                    )));
                }
                HandleKind::Allocated if state.transferred != 1 => {
                    return Err(self.unbalanced(format!(
                        "{handle} allocated once but transferred {} times",
                        state.transferred
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn state<'s>(
        &self,
        states: &'s mut FxHashMap<&str, HandleState>,
        handle: &str,
    ) -> Result<&'s mut HandleState, InternalError> {
        states
            .get_mut(handle)
            .ok_or_else(|| self.unbalanced(format!("{handle} used but never created")))
    }

    fn unbalanced(&self, detail: String) -> InternalError {
        InternalError::UnbalancedOwnership {
            routine: self.routine.clone(),
            detail,
        }
    }
}
