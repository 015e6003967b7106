// ----- standard library imports
// ----- extra library imports
use bitcoin::secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
// ----- local imports
use crate::amount::Amount;
use crate::keys::KeysetId;
use crate::secret::Secret;

// ----- end imports

/// A bearer token: possession equals spend authority until the mint marks
/// the secret spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    #[serde(rename = "id")]
    pub keyset_id: KeysetId,
    pub amount: Amount,
    pub secret: Secret,
    #[serde(rename = "C")]
    pub c: PublicKey,
}

impl Proof {
    pub fn new(keyset_id: KeysetId, amount: Amount, secret: Secret, c: PublicKey) -> Self {
        Self {
            keyset_id,
            amount,
            secret,
            c,
        }
    }
}

/// Blinded output sent to the mint: `B_ = H2C(secret) + r*G`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedMessage {
    #[serde(rename = "id")]
    pub keyset_id: KeysetId,
    pub amount: Amount,
    #[serde(rename = "B_")]
    pub blinded_secret: PublicKey,
}

/// Mint response to a blinded output: `C_ = k*B_`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindSignature {
    #[serde(rename = "id")]
    pub keyset_id: KeysetId,
    pub amount: Amount,
    #[serde(rename = "C_")]
    pub c: PublicKey,
}

pub fn total_amount(proofs: &[Proof]) -> Amount {
    proofs.iter().map(|proof| proof.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn proof_serializes_to_cashu_field_names() {
        let keyset = test_utils::generate_keyset();
        let proof = test_utils::generate_proofs(&keyset, &[Amount::from(8)])
            .pop()
            .unwrap();
        let json = serde_json::to_value(&proof).unwrap();
        assert!(json.get("id").is_some());
        assert!(json.get("C").is_some());
        assert_eq!(json["amount"], 8);
        let back: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(back, proof);
    }

    #[test]
    fn total_amount_sums_proofs() {
        let keyset = test_utils::generate_keyset();
        let proofs =
            test_utils::generate_proofs(&keyset, &[Amount::from(2), Amount::from(8)]);
        assert_eq!(total_amount(&proofs), Amount::from(10));
    }
}
