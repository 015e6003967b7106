// ----- standard library imports
use std::collections::BTreeMap;
// ----- extra library imports
use bitcoin::hex::DisplayHex;
use bitcoin::secp256k1::{PublicKey, SecretKey};
// ----- local imports
use crate::amount::Amount;
use crate::dhke;
use crate::keys::{CurrencyUnit, KeysetId, MintKeys};
use crate::proof::{BlindSignature, BlindedMessage, Proof};
use crate::secret::Secret;

// ----- end imports

pub fn seed() -> [u8; 64] {
    [0x5E; 64]
}

/// A mint keyset with its secret keys, so tests can play the mint.
#[derive(Debug, Clone)]
pub struct SigningKeys {
    pub id: KeysetId,
    pub keys: BTreeMap<Amount, SecretKey>,
}

impl SigningKeys {
    pub fn generate() -> Self {
        let id = KeysetId::new(rand::random::<[u8; 8]>().to_lower_hex_string());
        let keys = (0..12)
            .map(|bit| {
                (
                    Amount::from(1u64 << bit),
                    SecretKey::new(&mut rand::thread_rng()),
                )
            })
            .collect();
        Self { id, keys }
    }

    pub fn secret_key(&self, amount: Amount) -> SecretKey {
        *self.keys.get(&amount).expect("keys for amount")
    }

    pub fn public_keys(&self) -> MintKeys {
        MintKeys {
            id: self.id.clone(),
            unit: CurrencyUnit::Sat,
            keys: self
                .keys
                .iter()
                .map(|(amount, sk)| (*amount, PublicKey::from_secret_key(&dhke::SECP, sk)))
                .collect(),
        }
    }

    pub fn sign(&self, message: &BlindedMessage) -> BlindSignature {
        let sk = self.secret_key(message.amount);
        let c_ = dhke::sign_message(&sk, &message.blinded_secret).expect("sign_message");
        BlindSignature {
            keyset_id: self.id.clone(),
            amount: message.amount,
            c: c_,
        }
    }

    pub fn sign_messages(&self, messages: &[BlindedMessage]) -> Vec<BlindSignature> {
        messages.iter().map(|message| self.sign(message)).collect()
    }
}

pub fn generate_keyset() -> SigningKeys {
    SigningKeys::generate()
}

pub fn generate_blinds(
    keyset: &SigningKeys,
    amounts: &[Amount],
) -> Vec<(BlindedMessage, Secret, SecretKey)> {
    let mut blinds = Vec::with_capacity(amounts.len());
    for amount in amounts {
        let secret = Secret::generate();
        let (b_, r) = dhke::blind_message(secret.as_bytes(), None).expect("blind_message");
        let message = BlindedMessage {
            keyset_id: keyset.id.clone(),
            amount: *amount,
            blinded_secret: b_,
        };
        blinds.push((message, secret, r));
    }
    blinds
}

pub fn sign_blinds(
    keyset: &SigningKeys,
    blinds: &[(BlindedMessage, Secret, SecretKey)],
) -> Vec<BlindSignature> {
    blinds
        .iter()
        .map(|(message, _, _)| keyset.sign(message))
        .collect()
}

pub fn generate_proofs(keyset: &SigningKeys, amounts: &[Amount]) -> Vec<Proof> {
    let mut proofs = Vec::with_capacity(amounts.len());
    for amount in amounts {
        let sk = keyset.secret_key(*amount);
        let pk = PublicKey::from_secret_key(&dhke::SECP, &sk);
        let secret = Secret::generate();
        let (b_, r) = dhke::blind_message(secret.as_bytes(), None).expect("blind_message");
        let c_ = dhke::sign_message(&sk, &b_).expect("sign_message");
        let c = dhke::unblind_message(&c_, &r, &pk).expect("unblind_message");
        proofs.push(Proof::new(keyset.id.clone(), *amount, secret, c));
    }
    proofs
}
