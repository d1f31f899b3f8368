//! Base-62 byte encoding
//!
//! The whole input is read as one big-endian number and written in base 62
//! over [`BASE62_ALPHABET`]. Each leading zero byte becomes one leading `'0'`
//! symbol (and back), so inputs with leading zeros round-trip exactly.

use crate::error::{Error, Result};

/// Symbol table, digit value = index
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u32 = 62;

fn digit_value(symbol: char) -> Option<u32> {
    match symbol {
        '0'..='9' => Some(symbol as u32 - '0' as u32),
        'A'..='Z' => Some(symbol as u32 - 'A' as u32 + 10),
        'a'..='z' => Some(symbol as u32 - 'a' as u32 + 36),
        _ => None,
    }
}

/// Encode bytes as a base-62 string
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Little-endian base-62 digits; log(256)/log(62) < 1.35
    let mut digits: Vec<u8> = Vec::with_capacity((bytes.len() - zeros) * 135 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % BASE) as u8;
            carry /= BASE;
        }
        while carry > 0 {
            digits.push((carry % BASE) as u8);
            carry /= BASE;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat(BASE62_ALPHABET[0] as char).take(zeros));
    out.extend(digits.iter().rev().map(|&d| BASE62_ALPHABET[d as usize] as char));
    out
}

/// Decode a base-62 string to bytes
///
/// The empty string decodes to no bytes.
///
/// # Errors
///
/// Returns [`Error::Base62`] for any symbol outside the alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut zeros = 0;
    let mut leading = true;

    // Little-endian base-256 digits
    let mut bytes: Vec<u8> = Vec::with_capacity(text.len());
    for (position, symbol) in text.chars().enumerate() {
        let value = digit_value(symbol).ok_or(Error::Base62 { symbol, position })?;
        if leading && value == 0 {
            zeros += 1;
            continue;
        }
        leading = false;

        let mut carry = value;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * BASE;
            *byte = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alphabet_order() {
        assert_eq!(digit_value('0'), Some(0));
        assert_eq!(digit_value('9'), Some(9));
        assert_eq!(digit_value('A'), Some(10));
        assert_eq!(digit_value('Z'), Some(35));
        assert_eq!(digit_value('a'), Some(36));
        assert_eq!(digit_value('z'), Some(61));
        for (i, &symbol) in BASE62_ALPHABET.iter().enumerate() {
            assert_eq!(digit_value(symbol as char), Some(i as u32));
        }
    }

    #[test]
    fn test_encode_small_values() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode(&[1]), "1");
        assert_eq!(encode(&[61]), "z");
        assert_eq!(encode(&[62]), "10");
        assert_eq!(encode(&[0x01, 0x00]), "48"); // 256 = 4 * 62 + 8
    }

    #[test]
    fn test_leading_zero_bytes() {
        assert_eq!(encode(&[0, 0, 1]), "001");
        assert_eq!(decode("001").unwrap(), vec![0, 0, 1]);
        assert_eq!(encode(&[0; 16]), "0".repeat(16));
        assert_eq!(decode(&"0".repeat(16)).unwrap(), vec![0; 16]);
    }

    #[test]
    fn test_decode_small_values() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("10").unwrap(), vec![62]);
        assert_eq!(decode("48").unwrap(), vec![0x01, 0x00]);
    }

    #[test]
    fn test_decode_invalid_symbol() {
        match decode("ab-c") {
            Err(Error::Base62 { symbol, position }) => {
                assert_eq!(symbol, '-');
                assert_eq!(position, 2);
            }
            other => panic!("expected base62 error, got {:?}", other),
        }
        assert!(decode("é").is_err());
    }

    #[test]
    fn test_sixteen_bytes_fit_in_22_symbols() {
        assert_eq!(encode(&[0xFF; 16]).len(), 22);
    }

    proptest! {
        #[test]
        fn prop_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }
}
