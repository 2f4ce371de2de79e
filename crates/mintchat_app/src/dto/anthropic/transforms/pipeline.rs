use mintchat_domain::{DefaultTransformation, Transformer};

use super::drop_invalid_tool_use::DropInvalidToolUse;
use super::ensure_thinking::EnsureThinkingBlock;
use super::sanitize_tool_ids::SanitizeToolIds;
use crate::dto::anthropic::Request;

/// Wire-level compliance passes applied to every converted request, in
/// submission order. `EnsureThinkingBlock` runs last so it sees the request
/// exactly as it will go out.
pub struct CompliancePipeline;

impl Transformer for CompliancePipeline {
    type Value = Request;

    fn transform(&mut self, request: Self::Value) -> Self::Value {
        let mut combined = DefaultTransformation::<Request>::new()
            .pipe(DropInvalidToolUse)
            .pipe(SanitizeToolIds)
            .pipe(EnsureThinkingBlock.when(|request: &Request| request.thinking.is_some()));
        combined.transform(request)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::dto::anthropic::{Content, Message, Role, Thinking, ThinkingType};

    #[test]
    fn test_pipeline_applies_every_stage() {
        let fixture = Request::default()
            .thinking(Thinking { r#type: ThinkingType::Enabled, budget_tokens: Some(1024) })
            .messages(vec![Message::new(
                Role::Assistant,
                vec![
                    Content::ToolUse {
                        id: "call 1!".to_string(),
                        name: "get_balance".to_string(),
                        input: Some(json!({})),
                    },
                    Content::ToolUse {
                        id: "call_2".to_string(),
                        name: "get_rate".to_string(),
                        input: Some(json!("not an object")),
                    },
                ],
            )]);

        let actual = CompliancePipeline.transform(fixture);

        let expected = vec![
            Content::Thinking {
                thinking: "Deciding which tool to invoke next.".to_string(),
                signature: None,
            },
            Content::ToolUse {
                id: "call_1_".to_string(),
                name: "get_balance".to_string(),
                input: Some(json!({})),
            },
        ];
        assert_eq!(actual.messages[0].content, expected);
    }

    #[test]
    fn test_pipeline_without_thinking_skips_enforcement() {
        let fixture = Request::default().messages(vec![Message::new(
            Role::Assistant,
            vec![Content::ToolUse {
                id: "call_1".to_string(),
                name: "get_balance".to_string(),
                input: Some(json!({})),
            }],
        )]);

        let actual = CompliancePipeline.transform(fixture.clone());

        assert_eq!(actual, fixture);
    }
}
