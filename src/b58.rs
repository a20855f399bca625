//! Base58 rendering of binary identifiers.
//!
//! Encodes bytes with the Bitcoin base58 alphabet, the canonical text form of
//! 32-byte on-chain addresses. Implemented as big-endian long division over
//! the input byte array, so it works on inputs of any length without an
//! arbitrary-precision integer type.

/// The Bitcoin base58 alphabet. A single wrong character here would produce
/// addresses that look valid but point elsewhere.
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encode `input` as base58 text.
///
/// Each leading zero byte maps to one leading `'1'`; the remaining bytes are
/// treated as a single big-endian unsigned integer and repeatedly divided by
/// 58, emitting symbols most-significant-first.
pub fn encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|byte| **byte == 0).count();

    // Base58 digits of the non-zero tail, least-significant-first.
    // ceil(log(256) / log(58)) == ~1.37 digits per input byte.
    let mut digits: Vec<u8> = Vec::with_capacity((input.len() - zeros) * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push(ALPHABET[0] as char);
    }
    for &digit in digits.iter().rev() {
        out.push(ALPHABET[digit as usize] as char);
    }
    out
}
