// ----- standard library imports
use std::sync::Mutex;
// ----- extra library imports
// ----- local imports
use crate::amount::{preference_total, split_amount, Amount, AmountPreference};
use crate::dhke::construct_proofs;
use crate::error::{Error, Result};
use crate::keys::{CurrencyUnit, KeysetId, MintKeys};
use crate::outputs::{blank_outputs, plan_outputs, restore_outputs};
use crate::proof::{total_amount, Proof};
use crate::token::{Token, TokenEntry};
use crate::transport::{
    CheckStateRequest, MeltQuoteRequest, MeltQuoteResponse, MeltRequest, MintConnector,
    MintQuoteRequest, MintQuoteResponse, MintRequest, ProofState, RestoreRequest, SwapRequest,
};

// ----- end imports

/// Result of receiving a token: one fresh entry per entry that swapped
/// cleanly, the original entries for those that did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Received {
    pub token: Vec<TokenEntry>,
    pub tokens_with_errors: Vec<TokenEntry>,
}

/// Result of a send: `send` sums to the requested amount, `return_change`
/// holds the swap change followed by the untouched proofs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendResult {
    pub return_change: Vec<Proof>,
    pub send: Vec<Proof>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Melted {
    pub paid: bool,
    pub preimage: Option<String>,
    pub change: Vec<Proof>,
}

/// Client-side wallet core.
///
/// Stateless between calls apart from the cached active keyset; proofs and
/// the deterministic counter live with the caller. Operations that mint
/// outputs accept a `counter` and consume indices `[counter, counter + n)`
/// where `n` is the number of proofs returned; the caller advances its
/// stored counter accordingly.
pub struct Wallet<Conn> {
    mint: Conn,
    unit: CurrencyUnit,
    seed: Option<[u8; 64]>,
    keys: Mutex<Option<MintKeys>>,
}

impl<Conn> Wallet<Conn> {
    pub fn new(mint: Conn, unit: CurrencyUnit) -> Self {
        Self {
            mint,
            unit,
            seed: None,
            keys: Mutex::new(None),
        }
    }

    pub fn with_seed(mint: Conn, unit: CurrencyUnit, seed: [u8; 64]) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(mint, unit)
        }
    }

    /// Validates the mnemonic and stretches it into the derivation seed
    /// (empty passphrase).
    pub fn with_mnemonic(mint: Conn, unit: CurrencyUnit, mnemonic: &str) -> Result<Self> {
        let mnemonic = bip39::Mnemonic::parse(mnemonic)?;
        Ok(Self::with_seed(mint, unit, mnemonic.to_seed("")))
    }
}

impl<Conn> Wallet<Conn>
where
    Conn: MintConnector,
{
    /// The active keyset for this wallet's unit; a multi-unit mint lists
    /// one active keyset per unit and the wallet must not settle for
    /// another unit's keys.
    async fn active_keys(&self) -> Result<MintKeys> {
        if let Some(keys) = self.keys.lock().unwrap().clone() {
            return Ok(keys);
        }
        let keysets = self.mint.get_keys(None).await?;
        let keys = keysets
            .into_iter()
            .find(|keyset| keyset.unit == self.unit)
            .ok_or_else(|| Error::NoKeysetForUnit(self.unit.clone()))?;
        *self.keys.lock().unwrap() = Some(keys.clone());
        Ok(keys)
    }

    async fn keys_for(&self, kid: &KeysetId) -> Result<MintKeys> {
        {
            let cached = self.keys.lock().unwrap();
            if let Some(keys) = cached.as_ref() {
                if keys.id == *kid {
                    return Ok(keys.clone());
                }
            }
        }
        let keysets = self.mint.get_keys(Some(kid.clone())).await?;
        let keys = keysets
            .into_iter()
            .find(|keyset| keyset.id == *kid)
            .ok_or_else(|| Error::UnknownKeyset(kid.clone()))?;
        *self.keys.lock().unwrap() = Some(keys.clone());
        Ok(keys)
    }

    pub async fn mint_quote(&self, amount: Amount) -> Result<MintQuoteResponse> {
        self.mint
            .mint_quote(MintQuoteRequest {
                unit: self.unit.clone(),
                amount,
            })
            .await
    }

    pub async fn melt_quote(&self, request: impl Into<String> + Send) -> Result<MeltQuoteResponse> {
        self.mint
            .melt_quote(MeltQuoteRequest {
                unit: self.unit.clone(),
                request: request.into(),
            })
            .await
    }

    /// Redeems a paid mint quote into proofs summing to `amount`.
    pub async fn mint_tokens(
        &self,
        amount: Amount,
        quote: &str,
        preference: Option<&[AmountPreference]>,
        counter: Option<u32>,
    ) -> Result<Vec<Proof>> {
        tracing::debug!("minting {} against quote {}", amount, quote);
        let amounts = split_amount(amount, preference)?;
        let keys = self.active_keys().await?;
        let plan = plan_outputs(&amounts, &keys.id, self.seed.as_ref(), counter)?;
        let response = self
            .mint
            .mint(MintRequest {
                quote: quote.to_string(),
                outputs: plan.messages.clone(),
            })
            .await?;
        construct_proofs(response.signatures, plan.rs, plan.secrets, &keys)
    }

    /// Swaps every entry of an encoded token into fresh proofs at this
    /// wallet's mint. Entries that fail are reported, not fatal.
    pub async fn receive(
        &self,
        encoded: &str,
        preference: Option<&[AmountPreference]>,
        counter: Option<u32>,
    ) -> Result<Received> {
        let token = Token::decode(encoded)?;
        self.receive_token(token, preference, counter).await
    }

    pub async fn receive_token(
        &self,
        token: Token,
        preference: Option<&[AmountPreference]>,
        counter: Option<u32>,
    ) -> Result<Received> {
        tracing::debug!("receiving token with {} entries", token.token.len());
        let mut received = Received::default();
        // counter indices consumed by earlier entries; failed entries do
        // not advance so a retry regenerates the same outputs
        let mut offset = 0u32;
        for entry in token.token {
            if entry.proofs.is_empty() {
                continue;
            }
            let entry_counter = counter.map(|counter| counter + offset);
            match self.receive_entry(&entry, preference, entry_counter).await {
                Ok(proofs) => {
                    offset += proofs.len() as u32;
                    received.token.push(TokenEntry {
                        mint: entry.mint,
                        proofs,
                    });
                }
                Err(e) => {
                    tracing::warn!("failed to receive entry from mint {}: {}", entry.mint, e);
                    received.tokens_with_errors.push(entry);
                }
            }
        }
        Ok(received)
    }

    async fn receive_entry(
        &self,
        entry: &TokenEntry,
        preference: Option<&[AmountPreference]>,
        counter: Option<u32>,
    ) -> Result<Vec<Proof>> {
        let amount = total_amount(&entry.proofs);
        let amounts = split_amount(amount, preference)?;
        let keys = self.active_keys().await?;
        let plan = plan_outputs(&amounts, &keys.id, self.seed.as_ref(), counter)?;
        let response = self
            .mint
            .swap(SwapRequest {
                inputs: entry.proofs.clone(),
                outputs: plan.messages.clone(),
            })
            .await?;
        construct_proofs(response.signatures, plan.rs, plan.secrets, &keys)
    }

    /// Carves `amount` out of `proofs` via a single swap.
    ///
    /// Proofs are selected greedily in the given order; the swap emits the
    /// change outputs first, then the send outputs, so a supplied counter
    /// advances contiguously across both groups.
    pub async fn send(
        &self,
        amount: Amount,
        proofs: Vec<Proof>,
        preference: Option<&[AmountPreference]>,
        counter: Option<u32>,
    ) -> Result<SendResult> {
        let target = match preference {
            Some(preference) => preference_total(preference),
            None => amount,
        };
        tracing::debug!("sending {} out of {} proofs", target, proofs.len());

        let mut selected = Vec::new();
        let mut untouched = Vec::new();
        let mut available = Amount::ZERO;
        for proof in proofs {
            if available < target {
                available += proof.amount;
                selected.push(proof);
            } else {
                untouched.push(proof);
            }
        }
        if available < target {
            return Err(Error::InsufficientFunds(available, target));
        }

        let keep_total = available - target;
        let mut amounts = split_amount(keep_total, None)?;
        let keep_count = amounts.len();
        amounts.extend(split_amount(target, preference)?);

        let keys = self.active_keys().await?;
        let plan = plan_outputs(&amounts, &keys.id, self.seed.as_ref(), counter)?;
        let response = self
            .mint
            .swap(SwapRequest {
                inputs: selected,
                outputs: plan.messages.clone(),
            })
            .await?;
        let swapped = construct_proofs(response.signatures, plan.rs, plan.secrets, &keys)?;

        let mut keep_proofs: Vec<Proof> = swapped;
        let send_proofs = keep_proofs.split_off(keep_count);
        keep_proofs.extend(untouched);
        Ok(SendResult {
            return_change: keep_proofs,
            send: send_proofs,
        })
    }

    /// Pays a melt quote with `inputs`, planning blank outputs to absorb
    /// whatever the mint refunds of the fee reserve.
    pub async fn melt_tokens(
        &self,
        quote: &MeltQuoteResponse,
        inputs: Vec<Proof>,
        keyset_id: Option<KeysetId>,
        counter: Option<u32>,
    ) -> Result<Melted> {
        let kid = match keyset_id {
            Some(kid) => kid,
            None => self.active_keys().await?.id,
        };
        let plan = blank_outputs(quote.fee_reserve, &kid, self.seed.as_ref(), counter)?;
        tracing::debug!(
            "melting quote {} with {} inputs, {} blank outputs",
            quote.quote,
            inputs.len(),
            plan.len()
        );
        let response = self
            .mint
            .melt(MeltRequest {
                quote: quote.quote.clone(),
                inputs,
                outputs: plan.messages.clone(),
            })
            .await?;
        let change = match response.change {
            Some(signatures) if !signatures.is_empty() => {
                let keys = self.keys_for(&kid).await?;
                // the mint may return fewer change signatures than blanks
                let n = signatures.len().min(plan.len());
                construct_proofs(
                    signatures.into_iter().take(n).collect(),
                    plan.rs.into_iter().take(n).collect(),
                    plan.secrets.into_iter().take(n).collect(),
                    &keys,
                )?
            }
            _ => Vec::new(),
        };
        Ok(Melted {
            paid: response.paid.unwrap_or(false),
            preimage: response.payment_preimage,
            change,
        })
    }

    /// Recovers proofs previously signed for derivation indices
    /// `[start, start + count)` of `keyset_id`.
    pub async fn restore(&self, start: u32, count: u32, keyset_id: KeysetId) -> Result<Vec<Proof>> {
        let seed = self.seed.as_ref().ok_or(Error::NoSeed)?;
        let plan = restore_outputs(seed, &keyset_id, start, count)?;
        let response = self
            .mint
            .restore(RestoreRequest {
                outputs: plan.messages.clone(),
            })
            .await?;
        let keys = self.keys_for(&keyset_id).await?;

        let mut signatures = Vec::new();
        let mut rs = Vec::new();
        let mut secrets = Vec::new();
        for (output, signature) in response.outputs.iter().zip(response.signatures) {
            let Some(pos) = plan
                .messages
                .iter()
                .position(|m| m.blinded_secret == output.blinded_secret)
            else {
                continue;
            };
            signatures.push(signature);
            rs.push(plan.rs[pos]);
            secrets.push(plan.secrets[pos].clone());
        }
        construct_proofs(signatures, rs, secrets, &keys)
    }

    /// The subset of `proofs` the mint has marked spent, in input order.
    pub async fn check_spent(&self, proofs: &[Proof]) -> Result<Vec<Proof>> {
        let request = CheckStateRequest {
            secrets: proofs.iter().map(|proof| proof.secret.clone()).collect(),
        };
        let response = self.mint.check(request).await?;
        let spent = proofs
            .iter()
            .filter(|proof| {
                response
                    .states
                    .iter()
                    .any(|entry| entry.secret == proof.secret && entry.state == ProofState::Spent)
            })
            .cloned()
            .collect();
        Ok(spent)
    }
}
