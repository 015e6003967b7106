// ----- standard library imports
// ----- extra library imports
use bitcoin::hashes::{sha256, Hash};
use bitcoin::secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use once_cell::sync::Lazy;
// ----- local imports
use crate::error::{Error, Result};
use crate::keys::MintKeys;
use crate::proof::{BlindSignature, Proof};
use crate::secret::Secret;

// ----- end imports

pub(crate) static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Must match the mint bit-exactly.
pub const DOMAIN_SEPARATOR: &[u8; 28] = b"Secp256k1_HashToCurve_Cashu_";

const H2C_MAX_ITERATIONS: u32 = 1 << 16;

/// Maps a message to a curve point nobody knows the discrete log of.
///
/// Iterates `SHA256(DOMAIN_SEPARATOR || message || counter_le32)` from
/// counter 0, reading each digest as the x coordinate of a compressed
/// point with prefix 0x02; the first decodable point wins.
pub fn hash_to_curve(message: &[u8]) -> Result<PublicKey> {
    let mut buf = Vec::with_capacity(DOMAIN_SEPARATOR.len() + message.len() + 4);
    buf.extend_from_slice(DOMAIN_SEPARATOR);
    buf.extend_from_slice(message);
    for counter in 0..H2C_MAX_ITERATIONS {
        buf.truncate(DOMAIN_SEPARATOR.len() + message.len());
        buf.extend_from_slice(&counter.to_le_bytes());
        let digest = sha256::Hash::hash(&buf);
        let mut candidate = [0u8; 33];
        candidate[0] = 0x02;
        candidate[1..].copy_from_slice(digest.as_byte_array());
        if let Ok(point) = PublicKey::from_slice(&candidate) {
            return Ok(point);
        }
    }
    // roughly half of all x coordinates decode; 2^16 misses do not happen
    Err(Error::InvalidPoint(
        bitcoin::secp256k1::Error::InvalidPublicKey,
    ))
}

/// Blinds `secret` into `B_ = H2C(secret) + r*G`; samples `r` when the
/// caller does not supply one.
pub fn blind_message(
    secret: &[u8],
    blinding_factor: Option<SecretKey>,
) -> Result<(PublicKey, SecretKey)> {
    let y = hash_to_curve(secret)?;
    let r = blinding_factor.unwrap_or_else(|| SecretKey::new(&mut rand::thread_rng()));
    let b_ = y.combine(&PublicKey::from_secret_key(&SECP, &r))?;
    Ok((b_, r))
}

/// Strips the blinding from a signature: `C = C_ - r*K`.
pub fn unblind_message(c_: &PublicKey, r: &SecretKey, mint_key: &PublicKey) -> Result<PublicKey> {
    let rk = mint_key.mul_tweak(&SECP, &Scalar::from(*r))?;
    let c = c_.combine(&rk.negate(&SECP))?;
    Ok(c)
}

/// Mint-side signing: `C_ = k*B_`. The wallet needs it only to play the
/// mint in tests.
pub fn sign_message(mint_secret: &SecretKey, b_: &PublicKey) -> Result<PublicKey> {
    let c_ = b_.mul_tweak(&SECP, &Scalar::from(*mint_secret))?;
    Ok(c_)
}

/// Mint-side check that `C == k*H2C(secret)`.
pub fn verify_message(mint_secret: &SecretKey, c: &PublicKey, secret: &[u8]) -> Result<bool> {
    let y = hash_to_curve(secret)?;
    let expected = y.mul_tweak(&SECP, &Scalar::from(*mint_secret))?;
    Ok(expected == *c)
}

/// Pairs signatures element-wise with their blinding factors and secrets
/// and unblinds each into a proof tagged with the keyset id.
///
/// The three inputs come from the same output plan; a length mismatch is a
/// programming error.
pub fn construct_proofs(
    signatures: Vec<BlindSignature>,
    rs: Vec<SecretKey>,
    secrets: Vec<Secret>,
    keys: &MintKeys,
) -> Result<Vec<Proof>> {
    assert_eq!(signatures.len(), rs.len(), "one blinding factor per signature");
    assert_eq!(signatures.len(), secrets.len(), "one secret per signature");
    let mut proofs = Vec::with_capacity(signatures.len());
    for ((signature, r), secret) in signatures.into_iter().zip(rs).zip(secrets) {
        let mint_key = keys
            .amount_key(signature.amount)
            .ok_or(Error::UnknownDenomination(signature.amount))?;
        let c = unblind_message(&signature.c, &r, mint_key)?;
        proofs.push(Proof::new(keys.id.clone(), signature.amount, secret, c));
    }
    Ok(proofs)
}
