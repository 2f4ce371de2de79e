use anyhow::Context;
use mintchat_domain::{Conversation, IntegrityConfig, Transformer, validate_and_fix};
use tracing::debug;

use crate::dto::anthropic::{CompliancePipeline, Request};

/// Builds the upstream request for a conversation: application-level
/// validation and repair, conversion to the wire format, then the wire
/// compliance passes. This is the one call the request handler makes before
/// opening the stream.
pub fn prepare_request(
    conversation: &Conversation,
    config: &IntegrityConfig,
) -> anyhow::Result<Request> {
    let outcome = validate_and_fix(conversation, config);

    if !outcome.validation.is_valid {
        debug!(
            errors = outcome.validation.errors.len(),
            fixes = outcome.fixes_applied.len(),
            "Conversation required structural repair"
        );
    }

    let request = Request::try_from(&outcome.conversation)
        .context("Failed to convert conversation to an upstream request")?;

    Ok(CompliancePipeline.transform(request))
}
