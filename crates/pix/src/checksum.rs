//! CRC16/CCITT-FALSE
//!
//! The checksum required by the BR Code (EMV QR) payload: polynomial 0x1021,
//! initial value 0xFFFF, no input/output reflection, no final XOR.
//! Check value for ASCII "123456789" is 0x29B1.
//!
//! Input is the payload's UTF-8 bytes, including the trailing `6304` tag and
//! length but not the checksum digits themselves.

use crc::{Crc, CRC_16_IBM_3740};

/// CRC-16/IBM-3740 is the catalog name of CRC16/CCITT-FALSE.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Compute the CRC16/CCITT-FALSE of `data`.
pub fn crc16_ccitt_false(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Checksum rendered as 4 upper-case hex digits, zero-padded.
pub fn crc16_hex(data: &[u8]) -> String {
    format!("{:04X}", crc16_ccitt_false(data))
}
