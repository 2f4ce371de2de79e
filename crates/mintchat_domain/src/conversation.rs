use derive_more::derive::Display;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{ToolCallId, ToolName};

/// Role of a single conversation turn
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One block of a message in the flat parts shape
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Part {
    Text {
        text: String,
    },
    /// Emitted by assistant turns; `tool_call_id` is assigned by the caller
    /// and unique within the conversation at creation time.
    ToolCall {
        tool_call_id: ToolCallId,
        tool_name: ToolName,
        #[serde(default)]
        args: Value,
    },
    /// Carried by the following user turn, referencing the call it resolves
    ToolResult {
        tool_call_id: ToolCallId,
        #[serde(default)]
        result: Value,
    },
    /// Internal deliberation. Only blocks that kept their provider signature
    /// survive the wire conversion; synthesized ones carry `None`.
    Reasoning {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
    },
}

impl Part {
    pub fn text(text: impl ToString) -> Self {
        Part::Text { text: text.to_string() }
    }

    pub fn reasoning(text: impl ToString) -> Self {
        Part::Reasoning { text: text.to_string(), signature: None }
    }

    pub fn tool_call(id: impl Into<ToolCallId>, name: impl Into<ToolName>) -> Self {
        Part::ToolCall { tool_call_id: id.into(), tool_name: name.into(), args: Value::default() }
    }

    pub fn tool_result(id: impl Into<ToolCallId>) -> Self {
        Part::ToolResult { tool_call_id: id.into(), result: Value::default() }
    }

    pub fn is_tool_call(&self) -> bool {
        matches!(self, Part::ToolCall { .. })
    }
}

/// One block of the legacy nested `content` shape persisted by older builds.
/// Resolved to the same semantic part set at the correlation boundary; no
/// later stage branches on shape.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LegacyBlock {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
    },
    ToolUse {
        id: ToolCallId,
        name: ToolName,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: ToolCallId,
        #[serde(default)]
        content: Value,
    },
}

/// A single role-tagged entry in a conversation. Histories created by older
/// builds carry the legacy `content` array instead of `parts`; both may be
/// absent on truncated records, which is legal and must survive the pipeline
/// untouched.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Setters)]
#[setters(strip_option, into)]
pub struct Message {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<LegacyBlock>>,
}

impl Message {
    pub fn new(id: impl ToString, role: Role) -> Self {
        Self { id: id.to_string(), role, parts: None, content: None }
    }

    pub fn system(id: impl ToString, text: impl ToString) -> Self {
        Self::new(id, Role::System).parts(vec![Part::text(text)])
    }

    pub fn user(id: impl ToString, text: impl ToString) -> Self {
        Self::new(id, Role::User).parts(vec![Part::text(text)])
    }

    pub fn assistant(id: impl ToString, text: impl ToString) -> Self {
        Self::new(id, Role::Assistant).parts(vec![Part::text(text)])
    }

    pub fn add_part(mut self, part: Part) -> Self {
        self.parts.get_or_insert_with(Vec::new).push(part);
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_tool_call(&self) -> bool {
        self.parts
            .as_ref()
            .is_some_and(|parts| parts.iter().any(Part::is_tool_call))
    }
}

/// Extended-thinking strategy decided by model selection upstream of the
/// engine
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, Setters)]
#[setters(strip_option, into)]
pub struct ReasoningConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_tokens: Option<usize>,
}

impl ReasoningConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

/// An ordered message history as handed over by the persistence layer or the
/// live turn buffer. Order is the sole adjacency signal; no timestamps are
/// consulted anywhere in the engine.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Setters)]
#[setters(strip_option, into)]
pub struct Conversation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningConfig>,
}

impl Conversation {
    pub fn add_message(mut self, message: Message) -> Self {
        debug!(id = message.id.as_str(), role = %message.role, "Adding message to conversation");
        self.messages.push(message);
        self
    }
}
