//! Single-slot pipeline action controller.
//!
//! At most one pipeline action runs at a time — while anything is
//! running, every trigger (same or different action) is a no-op that
//! issues no request. The mutual exclusion is structural: the state is an
//! enum with a single `Running` variant, not a per-action flag set.

use std::fmt;

use crate::api::ApiError;

// ---------------------------------------------------------------------------
// Action identifiers
// ---------------------------------------------------------------------------

/// The closed set of operator-triggerable pipeline actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    /// Gather fresh raw signals from configured sources.
    Collect,
    /// Process collected raw signals.
    Process,
    /// Detect patterns across processed signals.
    DetectPatterns,
    /// Score patterns into opportunities.
    GenerateOpportunities,
    /// Produce a fresh digest (the digest read is the trigger).
    GenerateDigest,
}

impl ActionId {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collect" => Some(Self::Collect),
            "process" => Some(Self::Process),
            "detect-patterns" => Some(Self::DetectPatterns),
            "generate-opportunities" => Some(Self::GenerateOpportunities),
            "generate-digest" => Some(Self::GenerateDigest),
            _ => None,
        }
    }

    /// Human label for progress lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Collect => "signal collection",
            Self::Process => "signal processing",
            Self::DetectPatterns => "pattern detection",
            Self::GenerateOpportunities => "opportunity generation",
            Self::GenerateDigest => "digest generation",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collect => write!(f, "collect"),
            Self::Process => write!(f, "process"),
            Self::DetectPatterns => write!(f, "detect-patterns"),
            Self::GenerateOpportunities => write!(f, "generate-opportunities"),
            Self::GenerateDigest => write!(f, "generate-digest"),
        }
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Controller state: terminal transitions Idle → Running(id) → Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Running(ActionId),
}

/// Outcome of one [`ActionRunner::run`] call.
#[derive(Debug)]
pub enum RunOutcome<T> {
    /// Another action was in flight — nothing was issued.
    Busy(ActionId),
    /// The action resolved and the reload callback has run.
    Completed(T),
    /// The action failed — no reload was performed.
    Failed(ApiError),
}

/// Serializes pipeline actions and triggers dependent reloads.
#[derive(Debug, Default)]
pub struct ActionRunner {
    state: ActionState,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ActionState::Running(_))
    }

    /// Claim the slot for `id`. Returns `false` while any action runs.
    pub fn try_begin(&mut self, id: ActionId) -> bool {
        match self.state {
            ActionState::Idle => {
                self.state = ActionState::Running(id);
                true
            }
            ActionState::Running(_) => false,
        }
    }

    /// Release the slot. Runs on every outcome, success or failure.
    pub fn finish(&mut self) {
        self.state = ActionState::Idle;
    }

    /// Run one action to completion.
    ///
    /// The slot is claimed before `action` executes and released before
    /// the outcome is inspected, so the controller is Idle again by the
    /// time `on_success` fires its reloads. The reload runs exactly once,
    /// only after a successful resolution — a failed action leaves the
    /// views on their previously loaded data.
    pub fn run<T>(
        &mut self,
        id: ActionId,
        action: impl FnOnce() -> Result<T, ApiError>,
        on_success: impl FnOnce(&T),
    ) -> RunOutcome<T> {
        if let ActionState::Running(current) = self.state {
            return RunOutcome::Busy(current);
        }
        self.state = ActionState::Running(id);

        let result = action();
        self.finish();

        match result {
            Ok(value) => {
                on_success(&value);
                RunOutcome::Completed(value)
            }
            Err(cause) => RunOutcome::Failed(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn parse_covers_the_closed_set() {
        assert_eq!(ActionId::parse("collect"), Some(ActionId::Collect));
        assert_eq!(
            ActionId::parse("detect-patterns"),
            Some(ActionId::DetectPatterns)
        );
        assert_eq!(
            ActionId::parse("GENERATE-DIGEST"),
            Some(ActionId::GenerateDigest)
        );
        assert_eq!(ActionId::parse("restart"), None);
    }

    #[test]
    fn run_claims_and_releases_slot() {
        let mut runner = ActionRunner::new();
        let outcome = runner.run(ActionId::Collect, || Ok(1u32), |_| {});
        assert!(matches!(outcome, RunOutcome::Completed(1)));
        assert_eq!(runner.state(), ActionState::Idle);
    }

    #[test]
    fn busy_runner_issues_nothing_for_any_action() {
        let mut runner = ActionRunner::new();
        assert!(runner.try_begin(ActionId::Collect));

        let issued = Cell::new(false);
        // Same id and a different id are both rejected while running.
        for id in [ActionId::Collect, ActionId::DetectPatterns] {
            let outcome = runner.run(
                id,
                || {
                    issued.set(true);
                    Ok(())
                },
                |_| {},
            );
            assert!(matches!(outcome, RunOutcome::Busy(ActionId::Collect)));
        }
        assert!(!issued.get());
        assert!(runner.is_running());
    }

    #[test]
    fn reload_fires_once_after_success() {
        let mut runner = ActionRunner::new();
        let reloads = Cell::new(0u32);
        runner.run(
            ActionId::GenerateOpportunities,
            || Ok("ack"),
            |_| reloads.set(reloads.get() + 1),
        );
        assert_eq!(reloads.get(), 1);
    }

    #[test]
    fn failure_skips_reload_and_frees_slot() {
        let mut runner = ActionRunner::new();
        let reloads = Cell::new(0u32);
        let outcome = runner.run(
            ActionId::Process,
            || Err::<(), _>(ApiError::Transport("connection refused".to_string())),
            |_: &()| reloads.set(reloads.get() + 1),
        );
        assert!(matches!(outcome, RunOutcome::Failed(_)));
        assert_eq!(reloads.get(), 0);
        // Slot is free again — the next trigger is accepted.
        assert!(runner.try_begin(ActionId::Process));
    }
}
