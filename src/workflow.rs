//! Forward-only status workflows
//!
//! A workflow is a transition table mapping every state to at most one
//! successor. Task and schedule statuses each declare one; callers only ever
//! move a record with [`Workflow::advance`].

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use thiserror::Error;

/// Raised when advancing a state that has no successor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No transition available from status '{state}'")]
pub struct NoNextStateError {
    pub state: String,
}

/// Transition table over a closed set of states
#[derive(Debug, Clone)]
pub struct Workflow<S> {
    transitions: IndexMap<S, Option<S>>,
}

impl<S> Workflow<S>
where
    S: Copy + Eq + Hash + fmt::Display,
{
    /// Build a chain where each state advances to the one after it and the
    /// last state is terminal.
    pub fn linear(states: &[S]) -> Self {
        let mut transitions = IndexMap::with_capacity(states.len());
        for (i, state) in states.iter().enumerate() {
            transitions.insert(*state, states.get(i + 1).copied());
        }
        Self { transitions }
    }

    /// First declared state
    pub fn initial(&self) -> Option<S> {
        self.transitions.keys().next().copied()
    }

    /// Successor of `state`, or `None` when terminal or undeclared
    pub fn next(&self, state: S) -> Option<S> {
        self.transitions.get(&state).copied().flatten()
    }

    pub fn advance(&self, state: S) -> Result<S, NoNextStateError> {
        self.next(state).ok_or_else(|| NoNextStateError {
            state: state.to_string(),
        })
    }

    pub fn is_terminal(&self, state: S) -> bool {
        self.next(state).is_none()
    }

    /// States in declaration order
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.transitions.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::ScheduleStatus;
    use crate::models::task::TaskStatus;

    #[test]
    fn test_task_chain_visits_every_status_once() {
        let workflow = TaskStatus::workflow();
        let mut visited = Vec::new();
        let mut current = workflow.initial();
        while let Some(state) = current {
            visited.push(state);
            current = workflow.next(state);
        }
        assert_eq!(
            visited,
            vec![
                TaskStatus::Created,
                TaskStatus::Assigned,
                TaskStatus::InProgress,
                TaskStatus::Completed,
                TaskStatus::Verified,
            ]
        );
    }

    #[test]
    fn test_next_is_a_pure_lookup() {
        let workflow = TaskStatus::workflow();
        for state in workflow.states() {
            assert_eq!(workflow.next(state), workflow.next(state));
        }
        assert_eq!(workflow.next(TaskStatus::InProgress), Some(TaskStatus::Completed));
    }

    #[test]
    fn test_advance_terminal_fails() {
        let err = TaskStatus::workflow()
            .advance(TaskStatus::Verified)
            .unwrap_err();
        assert_eq!(err.state, "Verified");
        assert!(TaskStatus::workflow().is_terminal(TaskStatus::Verified));
    }

    #[test]
    fn test_schedule_chain() {
        let workflow = ScheduleStatus::workflow();
        assert_eq!(workflow.advance(ScheduleStatus::Pending), Ok(ScheduleStatus::InProgress));
        assert_eq!(workflow.advance(ScheduleStatus::InProgress), Ok(ScheduleStatus::Completed));
        assert!(workflow.advance(ScheduleStatus::Completed).is_err());
    }

    #[test]
    fn test_empty_workflow() {
        let workflow: Workflow<TaskStatus> = Workflow::linear(&[]);
        assert_eq!(workflow.initial(), None);
        assert!(workflow.is_terminal(TaskStatus::Created));
    }
}
