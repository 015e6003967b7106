// ----- standard library imports
use std::fmt;
// ----- extra library imports
use bitcoin::hex::DisplayHex;
use rand::RngCore;
use serde::{Deserialize, Serialize};
// ----- local imports

// ----- end imports

/// The secret message a proof commits to.
///
/// Locally generated secrets are the lowercase hex encoding of 32 random or
/// derived bytes (64 ASCII chars). The bytes hashed to the curve are the
/// UTF-8 bytes of that hex string, not the raw 32 bytes; the mint applies
/// the same rule, so the encoding is part of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(bytes.to_lower_hex_string())
    }

    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(&bytes)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The on-wire byte view, i.e. what gets hashed to the curve.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
