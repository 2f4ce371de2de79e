use serde::Serialize;
use tracing::debug;

use crate::validation::{ValidationReport, validate};
use crate::{Conversation, Part, ToolCallId};

/// One tool-call part removed during repair
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AppliedFix {
    pub tool_call_id: ToolCallId,
    pub message_index: usize,
}

/// A repaired conversation plus the record of what was removed
#[derive(Clone, Debug, PartialEq)]
pub struct RepairOutcome {
    pub conversation: Conversation,
    pub fixes_applied: Vec<AppliedFix>,
}

/// Removes exactly the tool-call parts the validator flagged, leaving every
/// other part and every clean message untouched. Orphan results are left in
/// place: removing one would guess at intent about history the caller may
/// still need.
pub fn repair(conversation: &Conversation) -> RepairOutcome {
    let report = validate(conversation);
    repair_with_report(conversation, &report)
}

/// Repair against an already-computed report, so the orchestrator can reuse
/// its pre-fix validation pass
pub(crate) fn repair_with_report(
    conversation: &Conversation,
    report: &ValidationReport,
) -> RepairOutcome {
    let mut fixed = conversation.clone();
    let mut fixes_applied = Vec::new();

    for error in &report.errors {
        let Some(message) = fixed.messages.get_mut(error.message_index) else {
            continue;
        };
        // Legacy content-only messages pass through: a parts array is never
        // synthesized where none existed.
        let Some(parts) = message.parts.as_mut() else {
            continue;
        };

        let before = parts.len();
        parts.retain(|part| {
            !matches!(part, Part::ToolCall { tool_call_id, .. } if *tool_call_id == error.tool_call_id)
        });

        if parts.len() < before {
            debug!(
                tool_call_id = error.tool_call_id.as_str(),
                message_index = error.message_index,
                "Removed unresolved tool call"
            );
            fixes_applied.push(AppliedFix {
                tool_call_id: error.tool_call_id.clone(),
                message_index: error.message_index,
            });
        }
    }

    RepairOutcome { conversation: fixed, fixes_applied }
}
