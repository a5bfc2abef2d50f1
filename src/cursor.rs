//! Cursor token codec
//!
//! Owns the opaque wire-token format used for pagination cursors: a
//! base64-encoded UTF-8 JSON object carrying at least an `offset` key.
//! Extra keys are preserved verbatim through a decode/encode round trip so
//! collaborators can piggyback their own state on the token.
//!
//! Decoding a malformed token (bad base64, bad UTF-8, bad JSON, non-object
//! payload, ill-typed offset) is a hard error, never a silent default. A
//! well-formed object that simply lacks `offset` decodes successfully and
//! contributes no offset override.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

// Defensive decode bound for untrusted cursor token input.
const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

/// Decoded cursor payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// One-based resumption offset into the underlying record set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Additional keys carried by the token, round-tripped unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Cursor {
    /// Create a cursor at the given offset
    pub fn at(offset: u64) -> Self {
        Self {
            offset: Some(offset),
            extra: serde_json::Map::new(),
        }
    }

    /// Encode this cursor as an opaque base64 token
    ///
    /// # Errors
    ///
    /// Returns an error if the payload fails to serialize as JSON.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Decode an opaque base64 token into a cursor payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::CursorDecode`] for any structural failure: empty or
    /// oversized token, invalid base64, invalid UTF-8, invalid JSON, a
    /// non-object payload, or a negative/non-integer `offset`.
    pub fn decode(token: &str) -> Result<Self> {
        let token = token.trim();

        if token.is_empty() {
            return Err(Error::cursor_decode("cursor token is empty"));
        }

        if token.len() > MAX_CURSOR_TOKEN_LEN {
            return Err(Error::cursor_decode(format!(
                "cursor token exceeds max length: {} chars (max {})",
                token.len(),
                MAX_CURSOR_TOKEN_LEN
            )));
        }

        let bytes = STANDARD
            .decode(token)
            .map_err(|e| Error::cursor_decode(format!("invalid base64: {e}")))?;

        let json = std::str::from_utf8(&bytes)
            .map_err(|e| Error::cursor_decode(format!("invalid UTF-8 payload: {e}")))?;

        serde_json::from_str(json)
            .map_err(|e| Error::cursor_decode(format!("invalid JSON payload: {e}")))
    }
}
