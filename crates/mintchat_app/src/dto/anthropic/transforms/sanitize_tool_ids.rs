use lazy_static::lazy_static;
use mintchat_domain::Transformer;
use regex::Regex;

use crate::dto::anthropic::{Content, Request};

lazy_static! {
    static ref INVALID_ID_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9_-]").unwrap();
}

/// Transformer that rewrites tool correlation ids to the `[a-zA-Z0-9_-]`
/// alphabet the upstream API enforces on `tool_use.id` and
/// `tool_result.tool_use_id`; any other character becomes an underscore.
/// Ids minted by the app are already clean, but histories imported from
/// other clients are not.
pub struct SanitizeToolIds;

impl Transformer for SanitizeToolIds {
    type Value = Request;

    fn transform(&mut self, mut request: Self::Value) -> Self::Value {
        let regex = &*INVALID_ID_CHARS;

        for message in &mut request.messages {
            for content in &mut message.content {
                match content {
                    Content::ToolUse { id, .. } => {
                        *id = regex.replace_all(id, "_").to_string();
                    }
                    Content::ToolResult { tool_use_id, .. } => {
                        *tool_use_id = regex.replace_all(tool_use_id, "_").to_string();
                    }
                    _ => {}
                }
            }
        }

        request
    }
}
