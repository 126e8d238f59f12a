//! Bible Crentech PIX
//!
//! Encoder for static PIX (BR Code) payment payloads, the string shown as a QR
//! code and offered for "copia e cola" on the donation screen.
//!
//! ## Module Organization
//!
//! - `error` - `PixError`, `PixResult`
//! - `checksum` - CRC16/CCITT-FALSE over the payload bytes
//! - `tlv` - tag-length-value field encoding and decoding
//! - `payload` - `PaymentPayload`, `Amount` and payload verification
//!
//! Encoding is a pure function of its input: the same payload always yields
//! the same string, byte for byte, because scanning apps recompute the CRC.

pub mod checksum;
pub mod error;
pub mod payload;
pub mod tlv;

pub use checksum::{crc16_ccitt_false, crc16_hex};
pub use error::{PixError, PixResult};
pub use payload::{verify, Amount, PaymentPayload, DEFAULT_TRANSACTION_ID};
pub use tlv::{encode_field, parse_fields, TlvField};
