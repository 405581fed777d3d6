//! Wire types for the `generateContent` endpoint.
//!
//! Only the subset iris sends and reads is modelled. Unknown response fields
//! are ignored and unknown part kinds are kept as raw JSON.

mod request;
mod response;

pub use request::{Blob, Content, GenerateContentRequest, Part};
pub use response::{ApiError, ApiErrorResponse, Candidate, GenerateContentResponse, UsageMetadata};
