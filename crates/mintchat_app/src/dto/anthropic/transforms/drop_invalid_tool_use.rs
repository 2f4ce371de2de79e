use mintchat_domain::Transformer;

use crate::dto::anthropic::{Content, Request};

/// Transformer that removes `tool_use` blocks whose input is missing or not
/// a JSON object; the upstream API rejects any other input shape. Every
/// other block kind passes through.
pub struct DropInvalidToolUse;

impl Transformer for DropInvalidToolUse {
    type Value = Request;

    fn transform(&mut self, mut request: Self::Value) -> Self::Value {
        for message in &mut request.messages {
            message.content.retain(|content| match content {
                Content::ToolUse { input, .. } => {
                    input.as_ref().is_some_and(|value| value.is_object())
                }
                _ => true,
            });
        }

        request
    }
}
