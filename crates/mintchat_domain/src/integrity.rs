use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::repair::repair_with_report;
use crate::validation::{ValidationReport, validate};
use crate::{AppliedFix, Conversation};

/// Controls what the engine does with its findings. `log_errors` is a pure
/// side channel: it gates diagnostic emission and never changes returned
/// data.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct IntegrityConfig {
    pub fix_errors: bool,
    pub log_errors: bool,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self { fix_errors: true, log_errors: true }
    }
}

/// Result of one engine pass. `validation` is always the report for the
/// conversation as received; callers that need the post-fix state re-run
/// [`validate`] on the returned conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrityOutcome {
    pub conversation: Conversation,
    pub validation: ValidationReport,
    pub fixes_applied: Vec<AppliedFix>,
}

/// Single entry point composing the validator and the repairer.
///
/// Always validates first. With `fix_errors` off the conversation comes back
/// unchanged next to the (possibly failing) report, which is the observe-only
/// path; with it on, flagged tool calls are removed. Stateless and
/// idempotent: invoked fresh on every request, it owns nothing between
/// calls.
pub fn validate_and_fix(conversation: &Conversation, config: &IntegrityConfig) -> IntegrityOutcome {
    let validation = validate(conversation);

    if config.log_errors {
        for error in &validation.errors {
            warn!(
                tool_call_id = error.tool_call_id.as_str(),
                message_index = error.message_index,
                reason = %error.reason,
                "Tool call pairing violation"
            );
        }
        for warning in &validation.warnings {
            debug!(
                tool_call_id = warning.tool_call_id.as_str(),
                message_index = warning.message_index,
                "Orphan tool result"
            );
        }
    }

    if !config.fix_errors || validation.is_valid {
        return IntegrityOutcome {
            conversation: conversation.clone(),
            validation,
            fixes_applied: Vec::new(),
        };
    }

    let repaired = repair_with_report(conversation, &validation);
    IntegrityOutcome {
        conversation: repaired.conversation,
        validation,
        fixes_applied: repaired.fixes_applied,
    }
}
