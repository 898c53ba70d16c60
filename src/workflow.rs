use thiserror::Error;

use crate::models::ComplaintStatus;

/// A status change outside the allowed workflow edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: ComplaintStatus,
    pub to: ComplaintStatus,
}

/// Workflow edges a worker may take. Reopening a resolved complaint puts it
/// back in progress; earlier feedback is kept, the resolution timestamp is not.
pub fn is_allowed(from: ComplaintStatus, to: ComplaintStatus) -> bool {
    use ComplaintStatus::*;
    matches!(
        (from, to),
        (Pending, InProgress) | (Pending, Resolved) | (InProgress, Resolved) | (Resolved, InProgress)
    )
}

pub fn check_transition(
    from: ComplaintStatus,
    to: ComplaintStatus,
) -> Result<(), InvalidTransition> {
    if is_allowed(from, to) {
        Ok(())
    } else {
        Err(InvalidTransition { from, to })
    }
}

/// What an allowed transition writes besides the status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEffect {
    pub to: ComplaintStatus,
    /// Resolving stamps the resolution time; every other target clears it,
    /// so reopening drops the stamp.
    pub stamps_resolved_at: bool,
}

/// Validates the edge and plans its column effects.
pub fn plan_transition(
    from: ComplaintStatus,
    to: ComplaintStatus,
) -> Result<TransitionEffect, InvalidTransition> {
    check_transition(from, to)?;
    Ok(TransitionEffect {
        to,
        stamps_resolved_at: to == ComplaintStatus::Resolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    #[test]
    fn full_transition_matrix() {
        let allowed = [
            (Pending, InProgress),
            (Pending, Resolved),
            (InProgress, Resolved),
            (Resolved, InProgress),
        ];
        for from in [Pending, InProgress, Resolved] {
            for to in [Pending, InProgress, Resolved] {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    is_allowed(from, to),
                    expected,
                    "transition {from} -> {to} should be {}",
                    if expected { "allowed" } else { "rejected" }
                );
            }
        }
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in [Pending, InProgress, Resolved] {
            assert!(check_transition(status, status).is_err());
        }
    }

    #[test]
    fn moving_backwards_to_pending_is_rejected() {
        assert_eq!(
            check_transition(Resolved, Pending),
            Err(InvalidTransition { from: Resolved, to: Pending })
        );
        assert_eq!(
            check_transition(InProgress, Pending),
            Err(InvalidTransition { from: InProgress, to: Pending })
        );
    }

    #[test]
    fn invalid_transition_message_names_both_states() {
        let err = check_transition(Resolved, Pending).unwrap_err();
        assert_eq!(err.to_string(), "invalid status transition: resolved -> pending");
    }

    #[test]
    fn resolving_stamps_the_resolution_time() {
        for from in [Pending, InProgress] {
            let effect = plan_transition(from, Resolved).unwrap();
            assert_eq!(effect.to, Resolved);
            assert!(effect.stamps_resolved_at);
        }
    }

    #[test]
    fn reopening_and_starting_work_clear_the_resolution_time() {
        for from in [Pending, Resolved] {
            let effect = plan_transition(from, InProgress).unwrap();
            assert_eq!(effect.to, InProgress);
            assert!(!effect.stamps_resolved_at);
        }
    }

    #[test]
    fn rejected_edges_plan_nothing() {
        assert_eq!(
            plan_transition(Resolved, Pending),
            Err(InvalidTransition { from: Resolved, to: Pending })
        );
        for status in [Pending, InProgress, Resolved] {
            assert!(plan_transition(status, status).is_err());
        }
    }
}
