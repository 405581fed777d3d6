use serde::{Deserialize, Serialize};

/// `GET /health` body.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}

impl Health {
    pub const OK: Self = Self { ok: true };
}
