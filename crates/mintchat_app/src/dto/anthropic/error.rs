/// Failure while assembling an upstream request from a conversation
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("conversation resolved to an empty message array")]
    EmptyRequest,
}
