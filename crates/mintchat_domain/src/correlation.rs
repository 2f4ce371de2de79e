use crate::{LegacyBlock, Message, Part, Role, ToolCallId};

/// Ordered tool-call ids carried by a message.
///
/// Only assistant turns can carry tool calls; any other role yields an empty
/// list. Both persisted shapes are recognized here, flat `parts` first and
/// the legacy nested `content` array otherwise, so every downstream stage
/// sees one canonical id list and never branches on shape. Total: a message
/// with neither array yields an empty list.
pub fn extract_tool_call_ids(message: &Message) -> Vec<ToolCallId> {
    if !message.has_role(Role::Assistant) {
        return Vec::new();
    }

    if let Some(parts) = &message.parts {
        return parts
            .iter()
            .filter_map(|part| match part {
                Part::ToolCall { tool_call_id, .. } => Some(tool_call_id.clone()),
                _ => None,
            })
            .collect();
    }

    if let Some(content) = &message.content {
        return content
            .iter()
            .filter_map(|block| match block {
                LegacyBlock::ToolUse { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect();
    }

    Vec::new()
}

/// Ordered tool-result ids carried by a message.
///
/// Results ride in user turns; any other role yields an empty list. Shape
/// handling matches [`extract_tool_call_ids`].
pub fn extract_tool_result_ids(message: &Message) -> Vec<ToolCallId> {
    if !message.has_role(Role::User) {
        return Vec::new();
    }

    if let Some(parts) = &message.parts {
        return parts
            .iter()
            .filter_map(|part| match part {
                Part::ToolResult { tool_call_id, .. } => Some(tool_call_id.clone()),
                _ => None,
            })
            .collect();
    }

    if let Some(content) = &message.content {
        return content
            .iter()
            .filter_map(|block| match block {
                LegacyBlock::ToolResult { tool_use_id, .. } => Some(tool_use_id.clone()),
                _ => None,
            })
            .collect();
    }

    Vec::new()
}
