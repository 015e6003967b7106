// ----- standard library imports
// ----- extra library imports
// ----- local modules
pub mod amount;
pub mod derivation;
pub mod dhke;
pub mod error;
pub mod http;
pub mod keys;
pub mod outputs;
pub mod proof;
pub mod secret;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod token;
pub mod transport;
pub mod wallet;
// ----- local imports
pub use crate::amount::{split_amount, Amount, AmountPreference};
pub use crate::error::{Error, Result};
pub use crate::http::HttpClient;
pub use crate::keys::{CurrencyUnit, KeysetId, KeysetInfo, MintKeys};
pub use crate::outputs::OutputPlan;
pub use crate::proof::{BlindSignature, BlindedMessage, Proof};
pub use crate::secret::Secret;
pub use crate::token::{clean_token, Token, TokenEntry};
pub use crate::transport::MintConnector;
pub use crate::wallet::{Melted, Received, SendResult, Wallet};
