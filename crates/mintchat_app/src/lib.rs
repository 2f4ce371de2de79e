//! Provider-facing layer: the upstream wire format, the conversion from the
//! canonical conversation model, and the compliance passes applied to every
//! converted request before submission.

pub mod dto;
mod prepare;

pub use prepare::*;
