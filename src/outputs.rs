// ----- standard library imports
// ----- extra library imports
use bitcoin::secp256k1::SecretKey;
// ----- local imports
use crate::amount::Amount;
use crate::derivation::{derive_blinding_factor, derive_secret};
use crate::dhke::blind_message;
use crate::error::{Error, Result};
use crate::keys::KeysetId;
use crate::proof::BlindedMessage;
use crate::secret::Secret;

// ----- end imports

/// A planned batch of outputs awaiting mint signatures.
///
/// Columns stay index-aligned with the blinded messages; the caller must
/// persist `secrets` and `rs` before dispatching the plan, or a crash
/// between mint response and proof construction loses the funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub messages: Vec<BlindedMessage>,
    pub secrets: Vec<Secret>,
    pub rs: Vec<SecretKey>,
}

impl OutputPlan {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Vec::with_capacity(capacity),
            secrets: Vec::with_capacity(capacity),
            rs: Vec::with_capacity(capacity),
        }
    }

    /// Number of counter indices the plan consumed.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Blinds one output per amount, in order.
///
/// With a seed and a counter, output `i` consumes derivation index
/// `counter + i`; otherwise secrets and blinding factors are drawn from
/// the RNG. A counter without a seed is refused.
pub fn plan_outputs(
    amounts: &[Amount],
    keyset_id: &KeysetId,
    seed: Option<&[u8; 64]>,
    counter: Option<u32>,
) -> Result<OutputPlan> {
    if counter.is_some() && seed.is_none() {
        return Err(Error::NoSeed);
    }
    let mut plan = OutputPlan::with_capacity(amounts.len());
    for (i, amount) in amounts.iter().enumerate() {
        let (secret, blinding_factor) = match (seed, counter) {
            (Some(seed), Some(counter)) => {
                let index = counter + i as u32;
                (
                    derive_secret(seed, keyset_id, index)?,
                    Some(derive_blinding_factor(seed, keyset_id, index)?),
                )
            }
            _ => (Secret::generate(), None),
        };
        let (b_, r) = blind_message(secret.as_bytes(), blinding_factor)?;
        plan.messages.push(BlindedMessage {
            keyset_id: keyset_id.clone(),
            amount: *amount,
            blinded_secret: b_,
        });
        plan.secrets.push(secret);
        plan.rs.push(r);
    }
    Ok(plan)
}

/// Number of blank outputs needed to absorb change up to `fee_reserve`:
/// `ceil(log2(fee_reserve))`, at least 1 whenever the reserve is non-zero.
pub fn blank_count(fee_reserve: Amount) -> usize {
    let fee = fee_reserve.to_u64();
    if fee == 0 {
        return 0;
    }
    let ceil_log2 = (u64::BITS - (fee - 1).leading_zeros()) as usize;
    ceil_log2.max(1)
}

/// Blank outputs for Lightning fee change: amount 1 placeholders the mint
/// overwrites with the actual change denominations.
pub fn blank_outputs(
    fee_reserve: Amount,
    keyset_id: &KeysetId,
    seed: Option<&[u8; 64]>,
    counter: Option<u32>,
) -> Result<OutputPlan> {
    let amounts = vec![Amount::ONE; blank_count(fee_reserve)];
    plan_outputs(&amounts, keyset_id, seed, counter)
}

/// Placeholder outputs for restore: `count` amount-0 outputs at derivation
/// indices `[start, start + count)`. The signatures the mint returns carry
/// the real amounts.
pub fn restore_outputs(
    seed: &[u8; 64],
    keyset_id: &KeysetId,
    start: u32,
    count: u32,
) -> Result<OutputPlan> {
    let amounts = vec![Amount::ZERO; count as usize];
    plan_outputs(&amounts, keyset_id, Some(seed), Some(start))
}
