// ----- standard library imports
// ----- extra library imports
use async_trait::async_trait;
use bitcoin::secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
// ----- local imports
use crate::amount::Amount;
use crate::error::Result;
use crate::keys::{CurrencyUnit, KeysetId, KeysetInfo, MintKeys};
use crate::proof::{BlindSignature, BlindedMessage, Proof};
use crate::secret::Secret;

// ----- end imports

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pubkey: Option<PublicKey>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintQuoteRequest {
    pub unit: CurrencyUnit,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintQuoteResponse {
    pub quote: String,
    /// Payment request on the external rail (a bolt11 invoice).
    pub request: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub expiry: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub quote: String,
    pub outputs: Vec<BlindedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintResponse {
    pub signatures: Vec<BlindSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltQuoteRequest {
    pub unit: CurrencyUnit,
    /// The bolt11 invoice to pay.
    pub request: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltQuoteResponse {
    pub quote: String,
    pub amount: Amount,
    pub fee_reserve: Amount,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    pub expiry: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltRequest {
    pub quote: String,
    pub inputs: Vec<Proof>,
    pub outputs: Vec<BlindedMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeltResponse {
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    pub payment_preimage: Option<String>,
    #[serde(default)]
    pub change: Option<Vec<BlindSignature>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub inputs: Vec<Proof>,
    pub outputs: Vec<BlindedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResponse {
    pub signatures: Vec<BlindSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStateRequest {
    pub secrets: Vec<Secret>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProofState {
    Unspent,
    Pending,
    Spent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStateEntry {
    pub secret: Secret,
    pub state: ProofState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStateResponse {
    pub states: Vec<ProofStateEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreRequest {
    pub outputs: Vec<BlindedMessage>,
}

/// The subset of the requested outputs the mint has signed before, with
/// their signatures, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreResponse {
    pub outputs: Vec<BlindedMessage>,
    pub signatures: Vec<BlindSignature>,
}

/// Typed transport to a mint. One implementation speaks HTTP; tests mock
/// the trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MintConnector: Send + Sync {
    async fn get_info(&self) -> Result<MintInfo>;
    /// `None` fetches every active keyset (multi-unit mints list one per
    /// unit); the caller selects, the transport never guesses.
    async fn get_keys(&self, kid: Option<KeysetId>) -> Result<Vec<MintKeys>>;
    async fn get_keysets(&self) -> Result<Vec<KeysetInfo>>;
    async fn mint_quote(&self, request: MintQuoteRequest) -> Result<MintQuoteResponse>;
    async fn mint(&self, request: MintRequest) -> Result<MintResponse>;
    async fn melt_quote(&self, request: MeltQuoteRequest) -> Result<MeltQuoteResponse>;
    async fn melt(&self, request: MeltRequest) -> Result<MeltResponse>;
    async fn swap(&self, request: SwapRequest) -> Result<SwapResponse>;
    async fn check(&self, request: CheckStateRequest) -> Result<CheckStateResponse>;
    async fn restore(&self, request: RestoreRequest) -> Result<RestoreResponse>;
}
