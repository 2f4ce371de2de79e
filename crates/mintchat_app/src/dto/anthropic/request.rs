use derive_setters::Setters;
use mintchat_domain::{
    Conversation, LegacyBlock, Message as ChatMessage, Part, Role as ChatRole,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Error;

/// Wire role vocabulary; system text travels in the request-level `system`
/// field, not as a message
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One content block in the upstream block vocabulary
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<Value>,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Value>,
    },
}

impl Content {
    pub fn is_thinking(&self) -> bool {
        matches!(self, Content::Thinking { .. })
    }

    pub fn is_tool_use(&self) -> bool {
        matches!(self, Content::ToolUse { .. })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<Content>,
}

impl Message {
    pub fn new(role: Role, content: Vec<Content>) -> Self {
        Self { role, content }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingType {
    Enabled,
}

/// Extended-thinking switch in the upstream request shape
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Thinking {
    pub r#type: ThinkingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_tokens: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Setters)]
#[setters(strip_option, into)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<Thinking>,
}

fn part_block(part: &Part) -> Option<Content> {
    match part {
        Part::Text { text } => Some(Content::Text { text: text.clone() }),
        // Replayed thinking must carry the provider signature; synthesized
        // reasoning has none and is dropped here.
        Part::Reasoning { text, signature } => signature.as_ref().map(|signature| {
            Content::Thinking { thinking: text.clone(), signature: Some(signature.clone()) }
        }),
        Part::ToolCall { tool_call_id, tool_name, args } => Some(Content::ToolUse {
            id: tool_call_id.as_str().to_string(),
            name: tool_name.as_str().to_string(),
            input: Some(args.clone()),
        }),
        Part::ToolResult { tool_call_id, result } => Some(Content::ToolResult {
            tool_use_id: tool_call_id.as_str().to_string(),
            content: Some(result.clone()),
        }),
    }
}

fn legacy_block(block: &LegacyBlock) -> Option<Content> {
    match block {
        LegacyBlock::Text { text } => Some(Content::Text { text: text.clone() }),
        LegacyBlock::Thinking { thinking, signature } => signature.as_ref().map(|signature| {
            Content::Thinking { thinking: thinking.clone(), signature: Some(signature.clone()) }
        }),
        LegacyBlock::ToolUse { id, name, input } => Some(Content::ToolUse {
            id: id.as_str().to_string(),
            name: name.as_str().to_string(),
            input: Some(input.clone()),
        }),
        LegacyBlock::ToolResult { tool_use_id, content } => Some(Content::ToolResult {
            tool_use_id: tool_use_id.as_str().to_string(),
            content: Some(content.clone()),
        }),
    }
}

fn message_blocks(message: &ChatMessage) -> Vec<Content> {
    if let Some(parts) = &message.parts {
        return parts.iter().filter_map(part_block).collect();
    }
    if let Some(content) = &message.content {
        return content.iter().filter_map(legacy_block).collect();
    }
    Vec::new()
}

fn plain_text(message: &ChatMessage) -> String {
    message_blocks(message)
        .into_iter()
        .filter_map(|block| match block {
            Content::Text { text } => Some(text),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl TryFrom<&Conversation> for Request {
    type Error = Error;

    fn try_from(conversation: &Conversation) -> Result<Self, Self::Error> {
        let mut system = Vec::new();
        let mut messages = Vec::new();

        for message in &conversation.messages {
            match message.role {
                ChatRole::System => {
                    let text = plain_text(message);
                    if !text.is_empty() {
                        system.push(text);
                    }
                }
                ChatRole::User | ChatRole::Assistant => {
                    let content = message_blocks(message);
                    // Truncated records can resolve to nothing sendable;
                    // the upstream API rejects empty content arrays.
                    if content.is_empty() {
                        continue;
                    }
                    let role = match message.role {
                        ChatRole::User => Role::User,
                        _ => Role::Assistant,
                    };
                    messages.push(Message::new(role, content));
                }
            }
        }

        if messages.is_empty() {
            return Err(Error::EmptyRequest);
        }

        let thinking = conversation
            .reasoning
            .as_ref()
            .filter(|reasoning| reasoning.is_enabled())
            .map(|reasoning| Thinking {
                r#type: ThinkingType::Enabled,
                budget_tokens: reasoning.budget_tokens,
            });

        Ok(Request {
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages,
            max_tokens: None,
            thinking,
        })
    }
}
