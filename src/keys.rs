// ----- standard library imports
use std::{collections::BTreeMap, fmt};
// ----- extra library imports
use bitcoin::bip32 as btc32;
use bitcoin::hex::FromHex;
use bitcoin::secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
// ----- local imports
use crate::amount::Amount;

// ----- end imports

/// The currency a keyset denominates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CurrencyUnit {
    #[default]
    Sat,
    Msat,
    Usd,
    Custom(String),
}

impl From<CurrencyUnit> for String {
    fn from(unit: CurrencyUnit) -> Self {
        match unit {
            CurrencyUnit::Sat => String::from("sat"),
            CurrencyUnit::Msat => String::from("msat"),
            CurrencyUnit::Usd => String::from("usd"),
            CurrencyUnit::Custom(custom) => custom,
        }
    }
}

impl From<String> for CurrencyUnit {
    fn from(value: String) -> Self {
        match value.as_str() {
            "sat" => CurrencyUnit::Sat,
            "msat" => CurrencyUnit::Msat,
            "usd" => CurrencyUnit::Usd,
            _ => CurrencyUnit::Custom(value),
        }
    }
}

impl fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(self.clone()))
    }
}

/// Mint-supplied keyset identifier; the mint's value is authoritative,
/// the wallet never re-derives it from the keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeysetId(String);

impl KeysetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hardened BIP-32 child index for this keyset: the first 31 bits of
    /// the id (hex-decoded when possible, raw UTF-8 bytes otherwise),
    /// reduced mod 2^31.
    pub fn to_path_index(&self) -> btc32::ChildNumber {
        const MASK: u32 = (1u32 << 31) - 1;
        let bytes = Vec::<u8>::from_hex(&self.0).unwrap_or_else(|_| self.0.as_bytes().to_vec());
        let mut buf = [0u8; 4];
        let take = bytes.len().min(4);
        buf[..take].copy_from_slice(&bytes[..take]);
        let idx = u32::from_be_bytes(buf) & MASK;
        btc32::ChildNumber::from_hardened_idx(idx).expect("masked to 31 bits")
    }
}

impl From<&str> for KeysetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for KeysetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A keyset: one mint public key per power-of-two denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintKeys {
    pub id: KeysetId,
    pub unit: CurrencyUnit,
    pub keys: BTreeMap<Amount, PublicKey>,
}

impl MintKeys {
    pub fn amount_key(&self, amount: Amount) -> Option<&PublicKey> {
        self.keys.get(&amount)
    }
}

/// Keyset metadata as listed by the mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysetInfo {
    pub id: KeysetId,
    pub unit: CurrencyUnit,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_index_is_hardened_and_masked() {
        let kid = KeysetId::new("ffffffffffffffff");
        let child = kid.to_path_index();
        assert!(child.is_hardened());
        let btc32::ChildNumber::Hardened { index } = child else {
            panic!("hardened index expected");
        };
        assert!(index < 1u32 << 31);
        assert_eq!(index, 0x7fffffff);
    }

    #[test]
    fn path_index_of_non_hex_id_uses_utf8_bytes() {
        // legacy mints published base64 ids
        let kid = KeysetId::new("I2yN+iRYfkzT");
        let child = kid.to_path_index();
        let expected = u32::from_be_bytes([b'I', b'2', b'y', b'N']) & ((1u32 << 31) - 1);
        assert_eq!(
            child,
            btc32::ChildNumber::from_hardened_idx(expected).unwrap()
        );
    }

    #[test]
    fn path_index_is_deterministic() {
        let kid = KeysetId::new("009a1f293253e41e");
        assert_eq!(kid.to_path_index(), kid.to_path_index());
    }

    #[test]
    fn currency_unit_roundtrips_through_string() {
        for unit in [
            CurrencyUnit::Sat,
            CurrencyUnit::Msat,
            CurrencyUnit::Usd,
            CurrencyUnit::Custom(String::from("eur")),
        ] {
            let s = String::from(unit.clone());
            assert_eq!(CurrencyUnit::from(s), unit);
        }
    }
}
