use serde::Serialize;
use strum_macros::Display;

use crate::correlation::{extract_tool_call_ids, extract_tool_result_ids};
use crate::{Conversation, Role, ToolCallId};

/// Why a tool-call/result pairing was flagged.
///
/// The display strings are stable observable output: they surface in logs
/// and telemetry and tests assert on them verbatim.
#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize)]
pub enum IssueReason {
    /// The call id is absent from the following message's result blocks
    #[strum(serialize = "not found in tool_result blocks")]
    #[serde(rename = "not found in tool_result blocks")]
    MissingToolResult,
    /// The call is the last meaningful content in the conversation
    #[strum(serialize = "no following message")]
    #[serde(rename = "no following message")]
    TrailingToolCall,
    /// The message after a tool-calling assistant turn is itself an
    /// assistant turn
    #[strum(serialize = "next message is assistant")]
    #[serde(rename = "next message is assistant")]
    RoleMismatch,
    /// A result id with no matching call in the preceding message; flagged
    /// but never fatal
    #[strum(serialize = "no matching tool_call block")]
    #[serde(rename = "no matching tool_call block")]
    OrphanToolResult,
}

/// A single pairing finding, anchored to the message that carries the
/// offending block
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub tool_call_id: ToolCallId,
    pub message_index: usize,
    pub reason: IssueReason,
}

/// Structural findings for one conversation. Warnings never affect
/// `is_valid`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Walks the conversation in order and checks every tool-call/result pairing
/// invariant the upstream API enforces:
///
/// - every tool call in an assistant turn must be answered by a matching
///   result in the immediately following message,
/// - a tool call must not trail the conversation,
/// - the message after a tool-calling assistant turn must not itself be an
///   assistant turn,
/// - a result without a matching call is tolerated but flagged.
///
/// Findings are data, not failures; this function is total. Errors are
/// ordered by message index, then by the order the call ids appear within
/// the message, which callers and tests rely on.
pub fn validate(conversation: &Conversation) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (index, message) in conversation.messages.iter().enumerate() {
        if message.has_role(Role::User) {
            let call_ids = match index {
                0 => Vec::new(),
                _ => extract_tool_call_ids(&conversation.messages[index - 1]),
            };
            for result_id in extract_tool_result_ids(message) {
                if !call_ids.contains(&result_id) {
                    warnings.push(ValidationIssue {
                        tool_call_id: result_id,
                        message_index: index,
                        reason: IssueReason::OrphanToolResult,
                    });
                }
            }
            continue;
        }

        let call_ids = extract_tool_call_ids(message);
        if call_ids.is_empty() {
            continue;
        }

        match conversation.messages.get(index + 1) {
            None => {
                errors.extend(call_ids.into_iter().map(|id| ValidationIssue {
                    tool_call_id: id,
                    message_index: index,
                    reason: IssueReason::TrailingToolCall,
                }));
            }
            Some(next) if next.has_role(Role::Assistant) => {
                errors.extend(call_ids.into_iter().map(|id| ValidationIssue {
                    tool_call_id: id,
                    message_index: index,
                    reason: IssueReason::RoleMismatch,
                }));
            }
            Some(next) => {
                let result_ids = extract_tool_result_ids(next);
                for id in call_ids {
                    if !result_ids.contains(&id) {
                        errors.push(ValidationIssue {
                            tool_call_id: id,
                            message_index: index,
                            reason: IssueReason::MissingToolResult,
                        });
                    }
                }
            }
        }
    }

    ValidationReport { is_valid: errors.is_empty(), errors, warnings }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Message, Part};

    fn issue(id: &str, index: usize, reason: IssueReason) -> ValidationIssue {
        ValidationIssue { tool_call_id: ToolCallId::new(id), message_index: index, reason }
    }

    #[test]
    fn test_reason_strings_are_stable() {
        assert_eq!(
            IssueReason::MissingToolResult.to_string(),
            "not found in tool_result blocks"
        );
        assert_eq!(IssueReason::TrailingToolCall.to_string(), "no following message");
        assert_eq!(IssueReason::RoleMismatch.to_string(), "next message is assistant");
        assert_eq!(
            IssueReason::OrphanToolResult.to_string(),
            "no matching tool_call block"
        );
    }

    #[test]
    fn test_compliant_conversation_is_valid() {
        let fixture = Conversation::default()
            .add_message(Message::user("msg_1", "what's my balance?"))
            .add_message(
                Message::new("msg_2", Role::Assistant).parts(vec![
                    Part::reasoning("need the wallet balance"),
                    Part::text("checking"),
                    Part::tool_call("call_a", "get_balance"),
                ]),
            )
            .add_message(
                Message::new("msg_3", Role::User).parts(vec![Part::tool_result("call_a")]),
            )
            .add_message(Message::assistant("msg_4", "you have 42 credits"));

        let actual = validate(&fixture);
        let expected = ValidationReport { is_valid: true, errors: vec![], warnings: vec![] };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_missing_tool_result_is_an_error() {
        let fixture = Conversation::default()
            .add_message(
                Message::assistant("msg_1", "checking")
                    .add_part(Part::tool_call("a", "get_balance")),
            )
            .add_message(Message::user("msg_2", "never mind"));

        let actual = validate(&fixture);
        let expected = ValidationReport {
            is_valid: false,
            errors: vec![issue("a", 0, IssueReason::MissingToolResult)],
            warnings: vec![],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_partially_answered_calls_error_per_missing_id() {
        let fixture = Conversation::default()
            .add_message(
                Message::assistant("msg_1", "two lookups")
                    .add_part(Part::tool_call("a", "get_balance"))
                    .add_part(Part::tool_call("b", "get_rate")),
            )
            .add_message(
                Message::new("msg_2", Role::User).parts(vec![Part::tool_result("a")]),
            );

        let actual = validate(&fixture);
        let expected = ValidationReport {
            is_valid: false,
            errors: vec![issue("b", 0, IssueReason::MissingToolResult)],
            warnings: vec![],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_trailing_tool_call_is_an_error() {
        let fixture = Conversation::default()
            .add_message(Message::user("msg_1", "pay alice"))
            .add_message(
                Message::assistant("msg_2", "sending")
                    .add_part(Part::tool_call("a", "send_payment")),
            );

        let actual = validate(&fixture);
        let expected = ValidationReport {
            is_valid: false,
            errors: vec![issue("a", 1, IssueReason::TrailingToolCall)],
            warnings: vec![],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_assistant_following_tool_calls_is_an_error() {
        let fixture = Conversation::default()
            .add_message(
                Message::assistant("msg_1", "sending")
                    .add_part(Part::tool_call("a", "send_payment")),
            )
            .add_message(Message::assistant("msg_2", "done"));

        let actual = validate(&fixture);
        let expected = ValidationReport {
            is_valid: false,
            errors: vec![issue("a", 0, IssueReason::RoleMismatch)],
            warnings: vec![],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_orphan_tool_result_is_a_warning_only() {
        let fixture = Conversation::default()
            .add_message(Message::assistant("msg_1", "hello"))
            .add_message(
                Message::new("msg_2", Role::User).parts(vec![Part::tool_result("x")]),
            );

        let actual = validate(&fixture);
        let expected = ValidationReport {
            is_valid: true,
            errors: vec![],
            warnings: vec![issue("x", 1, IssueReason::OrphanToolResult)],
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_orphan_result_in_leading_user_message_is_flagged() {
        let fixture = Conversation::default().add_message(
            Message::new("msg_1", Role::User).parts(vec![Part::tool_result("x")]),
        );

        let actual = validate(&fixture);

        assert!(actual.is_valid);
        assert_eq!(actual.warnings, vec![issue("x", 0, IssueReason::OrphanToolResult)]);
    }

    #[test]
    fn test_error_ordering_follows_messages_then_ids() {
        let fixture = Conversation::default()
            .add_message(
                Message::assistant("msg_1", "first")
                    .add_part(Part::tool_call("a", "get_balance"))
                    .add_part(Part::tool_call("b", "get_rate")),
            )
            .add_message(Message::user("msg_2", "skip it"))
            .add_message(
                Message::assistant("msg_3", "second").add_part(Part::tool_call("c", "send_payment")),
            );

        let actual = validate(&fixture);
        let expected = vec![
            issue("a", 0, IssueReason::MissingToolResult),
            issue("b", 0, IssueReason::MissingToolResult),
            issue("c", 2, IssueReason::TrailingToolCall),
        ];

        assert_eq!(actual.errors, expected);
    }

    #[test]
    fn test_legacy_content_shape_is_validated() {
        use serde_json::json;

        use crate::{LegacyBlock, ToolName};

        let fixture = Conversation::default().add_message(
            Message::new("msg_1", Role::Assistant).content(vec![LegacyBlock::ToolUse {
                id: ToolCallId::new("toolu_1"),
                name: ToolName::new("get_balance"),
                input: json!({}),
            }]),
        );

        let actual = validate(&fixture);

        assert_eq!(
            actual.errors,
            vec![issue("toolu_1", 0, IssueReason::TrailingToolCall)]
        );
    }

    #[test]
    fn test_empty_conversation_is_valid() {
        let actual = validate(&Conversation::default());

        assert!(actual.is_valid);
        assert!(actual.errors.is_empty());
        assert!(actual.warnings.is_empty());
    }
}
