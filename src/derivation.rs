// ----- standard library imports
// ----- extra library imports
use bitcoin::bip32 as btc32;
use bitcoin::secp256k1::SecretKey;
// ----- local imports
use crate::dhke::SECP;
use crate::error::Result;
use crate::keys::KeysetId;
use crate::secret::Secret;

// ----- end imports

// secrets and blinding factors follow a deterministic path
// m/129372'/0'/<keysetID>'/<counter>'/<leaf>'
// 129372 is utf-8 for 🥜
// <keysetID> check KeysetId::to_path_index
// <leaf> 0 for the secret, 1 for the blinding factor
const PURPOSE: u32 = 129372;
const LEAF_SECRET: u32 = 0;
const LEAF_BLINDING_FACTOR: u32 = 1;

fn derive_key(seed: &[u8; 64], kid: &KeysetId, counter: u32, leaf: u32) -> Result<SecretKey> {
    let master = btc32::Xpriv::new_master(bitcoin::NetworkKind::Main, seed)?;
    let path = btc32::DerivationPath::from(vec![
        btc32::ChildNumber::from_hardened_idx(PURPOSE).expect("129372 is a valid index"),
        btc32::ChildNumber::from_hardened_idx(0).expect("0 is a valid index"),
        kid.to_path_index(),
        btc32::ChildNumber::from_hardened_idx(counter)?,
        btc32::ChildNumber::from_hardened_idx(leaf).expect("leaf is a valid index"),
    ]);
    let derived = master.derive_priv(&SECP, &path)?;
    Ok(derived.private_key)
}

/// The secret for output `counter` of keyset `kid`: the derived private
/// key bytes, hex-encoded.
pub fn derive_secret(seed: &[u8; 64], kid: &KeysetId, counter: u32) -> Result<Secret> {
    let key = derive_key(seed, kid, counter, LEAF_SECRET)?;
    Ok(Secret::from_bytes(&key.secret_bytes()))
}

/// The blinding factor for output `counter` of keyset `kid`. BIP-32 child
/// keys are already reduced mod the curve order.
pub fn derive_blinding_factor(seed: &[u8; 64], kid: &KeysetId, counter: u32) -> Result<SecretKey> {
    derive_key(seed, kid, counter, LEAF_BLINDING_FACTOR)
}
