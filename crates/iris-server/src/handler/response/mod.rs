//! Response bodies.

mod analysis;
mod error_response;
mod health;

pub use analysis::Description;
pub use error_response::ErrorResponse;
pub use health::Health;
