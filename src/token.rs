// ----- standard library imports
use std::str::FromStr;
// ----- extra library imports
use base64::engine::{general_purpose::URL_SAFE_NO_PAD, Engine};
use bitcoin::secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
// ----- local imports
use crate::amount::Amount;
use crate::error::{Error, Result};
use crate::keys::KeysetId;
use crate::proof::Proof;
use crate::secret::Secret;

// ----- end imports

const TOKEN_PREFIX: &str = "cashu";
const TOKEN_VERSION: char = 'A';

/// Proofs from one mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub mint: String,
    pub proofs: Vec<Proof>,
}

/// Transport envelope for proofs, ordered by mint.
///
/// Deserialization drops entries with no proofs but never merges entries
/// sharing a mint url; merging is the caller's explicit choice via
/// [`clean_token`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: Vec<TokenEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Token {
    pub fn new(mint: impl Into<String>, proofs: Vec<Proof>, memo: Option<String>) -> Self {
        Self {
            token: vec![TokenEntry {
                mint: mint.into(),
                proofs,
            }],
            memo,
        }
    }

    pub fn total_amount(&self) -> Amount {
        self.token
            .iter()
            .flat_map(|entry| entry.proofs.iter())
            .map(|proof| proof.amount)
            .sum()
    }

    /// `cashuA` + unpadded url-safe base64 of the JSON body.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("token serialization is infallible");
        format!("{}{}{}", TOKEN_PREFIX, TOKEN_VERSION, URL_SAFE_NO_PAD.encode(json))
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let body = encoded
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|rest| rest.strip_prefix(TOKEN_VERSION))
            .ok_or_else(|| Error::MalformedToken(String::from("missing cashuA prefix")))?;
        // some encoders pad; the reference format does not
        let json = URL_SAFE_NO_PAD
            .decode(body.trim_end_matches('='))
            .map_err(|e| Error::MalformedToken(e.to_string()))?;
        let raw: RawToken =
            serde_json::from_slice(&json).map_err(|e| Error::MalformedToken(e.to_string()))?;
        raw.try_into()
    }
}

/// Coalesces entries sharing a mint url, preserving first-appearance order,
/// and drops entries left with no proofs.
pub fn clean_token(token: Token) -> Token {
    let mut entries: Vec<TokenEntry> = Vec::new();
    for entry in token.token {
        if entry.proofs.is_empty() {
            continue;
        }
        match entries.iter_mut().find(|e| e.mint == entry.mint) {
            Some(existing) => existing.proofs.extend(entry.proofs),
            None => entries.push(entry),
        }
    }
    Token {
        token: entries,
        memo: token.memo,
    }
}

// Decoding goes through a raw mirror so an undecodable C point surfaces as
// InvalidPoint rather than a JSON error.
#[derive(Deserialize)]
struct RawToken {
    token: Vec<RawEntry>,
    #[serde(default)]
    memo: Option<String>,
}

#[derive(Deserialize)]
struct RawEntry {
    mint: String,
    proofs: Vec<RawProof>,
}

#[derive(Deserialize)]
struct RawProof {
    id: String,
    amount: Amount,
    secret: String,
    #[serde(rename = "C")]
    c: String,
}

impl TryFrom<RawToken> for Token {
    type Error = Error;

    fn try_from(raw: RawToken) -> Result<Token> {
        let mut entries = Vec::with_capacity(raw.token.len());
        for entry in raw.token {
            if entry.proofs.is_empty() {
                continue;
            }
            let mut proofs = Vec::with_capacity(entry.proofs.len());
            for proof in entry.proofs {
                proofs.push(Proof {
                    keyset_id: KeysetId::new(proof.id),
                    amount: proof.amount,
                    secret: Secret::from(proof.secret),
                    c: PublicKey::from_str(&proof.c)?,
                });
            }
            entries.push(TokenEntry {
                mint: entry.mint,
                proofs,
            });
        }
        Ok(Token {
            token: entries,
            memo: raw.memo,
        })
    }
}
