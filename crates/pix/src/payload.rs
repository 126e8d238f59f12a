//! Static PIX Payload
//!
//! Builds the single-line "copia e cola" string behind a PIX QR code.
//!
//! Field order is fixed:
//! `00` format indicator, `26` merchant account (GUI + key), `52` category,
//! `53` currency, `54` amount (only when non-zero), `58` country, `59` name,
//! `60` city, `62` additional data (transaction id), `63` CRC.
//!
//! Oversized name, city, key and transaction id are truncated, never rejected,
//! so a constructed payload always encodes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checksum::crc16_hex;
use crate::error::{PixError, PixResult};
use crate::tlv::{encode_field, parse_fields, truncate_to, TlvField};

/// Top-level and nested field ids.
pub mod ids {
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    pub const MERCHANT_ACCOUNT_INFO: &str = "26";
    pub const MERCHANT_ACCOUNT_GUI: &str = "00";
    pub const MERCHANT_ACCOUNT_KEY: &str = "01";
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    pub const TRANSACTION_CURRENCY: &str = "53";
    pub const TRANSACTION_AMOUNT: &str = "54";
    pub const COUNTRY_CODE: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";
    pub const ADDITIONAL_DATA_TXID: &str = "05";
    pub const CRC: &str = "63";
}

pub const PAYLOAD_FORMAT_VERSION: &str = "01";
pub const PIX_GUI: &str = "br.gov.bcb.pix";
pub const MERCHANT_CATEGORY_UNSPECIFIED: &str = "0000";
/// ISO 4217 numeric code for BRL.
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_BR: &str = "BR";
/// Transaction id used when the caller gives none.
pub const DEFAULT_TRANSACTION_ID: &str = "***";

pub const MAX_NAME_LEN: usize = 25;
pub const MAX_CITY_LEN: usize = 15;
pub const MAX_TRANSACTION_ID_LEN: usize = 25;
/// Keeps the nested merchant account block within 99 bytes.
pub const MAX_KEY_LEN: usize = 77;
/// Largest amount whose text fits the 13-character amount field.
pub const MAX_AMOUNT_CENTS: u64 = 999_999_999_999;

/// Non-negative BRL amount with centavo precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount {
    cents: u64,
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub fn from_cents(cents: u64) -> PixResult<Self> {
        if cents > MAX_AMOUNT_CENTS {
            return Err(PixError::validation(format!(
                "amount of {} cents does not fit the amount field",
                cents
            )));
        }
        Ok(Self { cents })
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// Zero amounts are encoded as "open amount".
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Parse decimal text such as `10`, `10.5`, `10.50` or `10,50`.
    pub fn parse(text: &str) -> PixResult<Self> {
        let text = text.trim().replace(',', ".");
        let invalid = || PixError::validation(format!("'{}' is not a non-negative amount", text));

        let (units, fraction) = match text.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (text.as_str(), ""),
        };
        if units.is_empty()
            || !units.bytes().all(|b| b.is_ascii_digit())
            || fraction.len() > 2
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: u64 = units.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;
        Self::from_cents(cents)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = PixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> String {
        amount.to_string()
    }
}

/// Everything needed to render one static PIX payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPayload {
    payee_key: String,
    payee_name: String,
    payee_city: String,
    amount: Option<Amount>,
    transaction_id: String,
}

impl PaymentPayload {
    /// Key, name and city are required; surrounding whitespace is dropped.
    pub fn new(
        payee_key: impl Into<String>,
        payee_name: impl Into<String>,
        payee_city: impl Into<String>,
    ) -> PixResult<Self> {
        let payee_key = required("payee key", payee_key.into())?;
        let payee_name = required("payee name", payee_name.into())?;
        let payee_city = required("payee city", payee_city.into())?;
        Ok(Self {
            payee_key,
            payee_name,
            payee_city,
            amount: None,
            transaction_id: DEFAULT_TRANSACTION_ID.to_string(),
        })
    }

    /// Fixed amount; a zero amount keeps the payload open.
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Transaction id; blank input keeps the `***` placeholder.
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        let transaction_id = transaction_id.into().trim().to_string();
        if !transaction_id.is_empty() {
            self.transaction_id = transaction_id;
        }
        self
    }

    pub fn payee_key(&self) -> &str {
        &self.payee_key
    }

    pub fn payee_name(&self) -> &str {
        &self.payee_name
    }

    pub fn payee_city(&self) -> &str {
        &self.payee_city
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Render the payload, CRC included.
    pub fn encode(&self) -> String {
        let mut payload = String::with_capacity(160);

        payload.push_str(&encode_field(ids::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_VERSION));

        let account = format!(
            "{}{}",
            encode_field(ids::MERCHANT_ACCOUNT_GUI, PIX_GUI),
            encode_field(ids::MERCHANT_ACCOUNT_KEY, limited("payee key", &self.payee_key, MAX_KEY_LEN))
        );
        payload.push_str(&encode_field(ids::MERCHANT_ACCOUNT_INFO, &account));
        payload.push_str(&encode_field(ids::MERCHANT_CATEGORY_CODE, MERCHANT_CATEGORY_UNSPECIFIED));
        payload.push_str(&encode_field(ids::TRANSACTION_CURRENCY, CURRENCY_BRL));

        if let Some(amount) = self.amount.filter(|a| !a.is_zero()) {
            payload.push_str(&encode_field(ids::TRANSACTION_AMOUNT, &amount.to_string()));
        }

        payload.push_str(&encode_field(ids::COUNTRY_CODE, COUNTRY_BR));
        payload.push_str(&encode_field(
            ids::MERCHANT_NAME,
            limited("payee name", &self.payee_name, MAX_NAME_LEN),
        ));
        payload.push_str(&encode_field(
            ids::MERCHANT_CITY,
            limited("payee city", &self.payee_city, MAX_CITY_LEN),
        ));

        let additional = encode_field(
            ids::ADDITIONAL_DATA_TXID,
            limited("transaction id", &self.transaction_id, MAX_TRANSACTION_ID_LEN),
        );
        payload.push_str(&encode_field(ids::ADDITIONAL_DATA, &additional));

        // CRC covers its own id and length.
        payload.push_str(ids::CRC);
        payload.push_str("04");
        let crc = crc16_hex(payload.as_bytes());
        payload.push_str(&crc);
        payload
    }
}

fn required(field: &str, value: String) -> PixResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PixError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn limited<'a>(field: &str, value: &'a str, max_bytes: usize) -> &'a str {
    let cut = truncate_to(value, max_bytes);
    if cut.len() < value.len() {
        tracing::debug!(
            "[PixPayload] {} truncated from {} to {} bytes",
            field,
            value.len(),
            cut.len()
        );
    }
    cut
}

/// Check an existing payload: TLV structure, leading format indicator and the
/// trailing CRC. Returns the top-level fields on success.
pub fn verify(payload: &str) -> PixResult<Vec<TlvField>> {
    let body_len = payload
        .len()
        .checked_sub(4)
        .filter(|len| payload.is_char_boundary(*len))
        .ok_or_else(|| PixError::malformed("payload too short to carry a CRC"))?;
    let (body, found) = payload.split_at(body_len);
    if !body.ends_with("6304") {
        return Err(PixError::malformed("payload does not end with a CRC field"));
    }

    let fields = parse_fields(payload)?;
    match fields.first() {
        Some(first)
            if first.id == ids::PAYLOAD_FORMAT_INDICATOR && first.value == PAYLOAD_FORMAT_VERSION => {}
        _ => return Err(PixError::malformed("payload must start with 000201")),
    }
    if fields.last().map(|f| f.id.as_str()) != Some(ids::CRC) {
        return Err(PixError::malformed("CRC must be the last field"));
    }

    let expected = crc16_hex(body.as_bytes());
    if !found.eq_ignore_ascii_case(&expected) {
        return Err(PixError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(fields)
}
