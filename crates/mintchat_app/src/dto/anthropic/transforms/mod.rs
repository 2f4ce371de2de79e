mod drop_invalid_tool_use;
mod ensure_thinking;
mod pipeline;
mod sanitize_tool_ids;

pub use drop_invalid_tool_use::DropInvalidToolUse;
pub use ensure_thinking::EnsureThinkingBlock;
pub use pipeline::CompliancePipeline;
pub use sanitize_tool_ids::SanitizeToolIds;
