use mintchat_domain::Transformer;
use tracing::debug;

use crate::dto::anthropic::{Content, Request, Role};

/// Deterministic placeholder text; never user-visible
const PLACEHOLDER_THINKING: &str = "Deciding which tool to invoke next.";

/// Transformer that restores the thinking-first rule on tool-calling
/// assistant messages.
///
/// The request conversion drops replayed thinking blocks that lack a
/// provider signature, so an assistant turn that calls tools can reach the
/// wire with a text or tool_use block first even when the source
/// conversation was compliant. With extended thinking enabled the upstream
/// API rejects such turns: the first content block of every tool-calling
/// assistant message must be a thinking block. This pass re-asserts that on
/// the converted request rather than trusting the conversion step.
///
/// Tool-free assistant turns are left alone, and the pass is a no-op when
/// thinking is not enabled on the request.
pub struct EnsureThinkingBlock;

impl Transformer for EnsureThinkingBlock {
    type Value = Request;

    fn transform(&mut self, mut request: Self::Value) -> Self::Value {
        if request.thinking.is_none() {
            return request;
        }

        for message in &mut request.messages {
            if message.role != Role::Assistant {
                continue;
            }
            if !message.content.iter().any(Content::is_tool_use) {
                continue;
            }
            if message.content.first().is_some_and(Content::is_thinking) {
                continue;
            }

            debug!("Prepending placeholder thinking block to tool-calling assistant message");
            message.content.insert(
                0,
                Content::Thinking { thinking: PLACEHOLDER_THINKING.to_string(), signature: None },
            );
        }

        request
    }
}
