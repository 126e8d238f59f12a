//! Donation Commands
//!
//! PIX copy-and-paste codes for the configured receiving account.

use bible_crentech_pix::{verify, Amount, PaymentPayload, TlvField};
use serde::{Deserialize, Serialize};

use crate::models::response::CommandResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// A generated PIX code and what went into it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCode {
    pub payload: String,
    pub key: String,
    pub name: String,
    pub city: String,
    pub amount: Option<Amount>,
    pub transaction_id: String,
}

/// Build a PIX payload. `amount` accepts "10", "10.50" or "10,50"; no amount
/// leaves the value to the payer.
pub async fn generate_pix(
    state: &AppState,
    amount: Option<&str>,
    transaction_id: Option<&str>,
) -> CommandResponse<PixCode> {
    generate_pix_inner(state, amount, transaction_id).await.into()
}

async fn generate_pix_inner(
    state: &AppState,
    amount: Option<&str>,
    transaction_id: Option<&str>,
) -> AppResult<PixCode> {
    let pix = state.get_config().await?.pix;

    let mut payload = PaymentPayload::new(&pix.key, &pix.name, &pix.city)?;
    if let Some(amount) = amount {
        payload = payload.with_amount(Amount::parse(amount)?);
    }
    if let Some(txid) = transaction_id.or(pix.transaction_id.as_deref()) {
        payload = payload.with_transaction_id(txid);
    }

    let encoded = payload.encode();
    tracing::info!(
        "[Donate] Generated PIX code for {} ({} chars)",
        payload.payee_key(),
        encoded.chars().count()
    );

    Ok(PixCode {
        payload: encoded,
        key: payload.payee_key().to_string(),
        name: payload.payee_name().to_string(),
        city: payload.payee_city().to_string(),
        amount: payload.amount().filter(|a| !a.is_zero()),
        transaction_id: payload.transaction_id().to_string(),
    })
}

/// Check the checksum and structure of an existing PIX code
pub async fn verify_pix(payload: &str) -> CommandResponse<Vec<TlvField>> {
    let result: AppResult<Vec<TlvField>> = verify(payload.trim()).map_err(Into::into);
    result.into()
}
