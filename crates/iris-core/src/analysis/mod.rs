//! Analysis request composition and results.
//!
//! An [`AnalysisRequest`] is the provider-neutral form of one inference call:
//! a single user turn made of exactly one text part followed by exactly one
//! inline image part. Provider clients translate it into their wire format.

mod request;
mod response;

pub use request::{AnalysisRequest, DEFAULT_INSTRUCTION, Part};
pub use response::AnalysisResult;
