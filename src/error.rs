// ----- standard library imports
// ----- extra library imports
use thiserror::Error;
// ----- local imports
use crate::amount::Amount;
use crate::keys::{CurrencyUnit, KeysetId};

// ----- end imports

pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug, Error)]
pub enum Error {
    #[error("insufficient funds: available {0}, requested {1}")]
    InsufficientFunds(Amount, Amount),
    #[error("invalid amount preference")]
    InvalidPreference,
    #[error("deterministic outputs requested without a seed")]
    NoSeed,
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] bip39::Error),
    #[error("no key for amount {0}")]
    UnknownDenomination(Amount),
    #[error("unknown keyset {0}")]
    UnknownKeyset(KeysetId),
    #[error("no active keyset for unit {0}")]
    NoKeysetForUnit(CurrencyUnit),
    #[error("mint error {code}: {detail}")]
    Mint { code: i32, detail: String },
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("invalid point: {0}")]
    InvalidPoint(#[from] bitcoin::secp256k1::Error),

    // external errors wrappers
    #[error("bip32 derivation error: {0}")]
    Bip32(#[from] bitcoin::bip32::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
