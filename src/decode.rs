//! Fixed-layout decoding of payment requirement account data.
//!
//! Account data is a versioned, sequentially laid out blob: an 8-byte
//! discriminator, the 32-byte subject address, two 1-byte enum tags, then the
//! fields this crate cares about (amount, asset, recipient), two
//! length-prefixed strings, and the active flag. All multi-byte integers are
//! little-endian. The variable-length fields force strictly sequential,
//! offset-driven parsing: each length prefix must be read before the field it
//! describes can be skipped.
//!
//! The decoder is best-effort by contract: it does not validate the
//! discriminator value or enum ordinals, so any blob of sufficient length with
//! internally consistent length prefixes decodes to some record. It must
//! however never read past the end of the blob, whatever the length prefixes
//! claim.

use crate::b58;
use crate::types::PaymentRequirement;

/// Discriminator plus subject address. Blobs shorter than this are rejected
/// before any field read.
pub const MIN_ACCOUNT_LEN: usize = 8 + 32;

/// Decoding failure for a payment requirement account blob.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The blob is shorter than the fixed discriminator-plus-subject prefix.
    #[error("account data too short: {0} bytes, expected at least {MIN_ACCOUNT_LEN}")]
    TooShort(usize),
    /// A field read or a length-prefixed skip would run past the blob end.
    #[error("field `{0}` runs past the end of account data")]
    Truncated(&'static str),
}

/// The fields of a payment requirement account retained after decoding.
///
/// Addresses stay in raw 32-byte form here; [`PaymentRequirement`] carries
/// their base58 rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRequirement {
    pub amount: u64,
    pub asset: [u8; 32],
    pub pay_to: [u8; 32],
    pub active: bool,
}

impl From<DecodedRequirement> for PaymentRequirement {
    fn from(decoded: DecodedRequirement) -> Self {
        PaymentRequirement {
            pay_to: b58::encode(&decoded.pay_to),
            amount: decoded.amount.into(),
            asset: b58::encode(&decoded.asset),
            active: decoded.active,
        }
    }
}

/// Bounds-checked sequential reader over account data.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or(DecodeError::Truncated(field))?;
        if end > self.data.len() {
            return Err(DecodeError::Truncated(field));
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize, field: &'static str) -> Result<(), DecodeError> {
        self.take(len, field).map(|_| ())
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, field)?[0])
    }

    fn read_u32_le(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, field)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64_le(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8, field)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_array32(&mut self, field: &'static str) -> Result<[u8; 32], DecodeError> {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(self.take(32, field)?);
        Ok(buf)
    }
}

/// Decode a raw payment requirement account blob.
///
/// Trailing bytes (creation timestamps, bump) are ignored. The blob is only
/// borrowed for the duration of the call.
pub fn decode_requirement(data: &[u8]) -> Result<DecodedRequirement, DecodeError> {
    if data.len() < MIN_ACCOUNT_LEN {
        return Err(DecodeError::TooShort(data.len()));
    }
    let mut cursor = Cursor::new(data);
    cursor.skip(8, "discriminator")?;
    cursor.skip(32, "subject")?;
    cursor.skip(1, "category tag")?;
    cursor.skip(1, "scheme tag")?;
    let amount = cursor.read_u64_le("amount")?;
    let asset = cursor.read_array32("asset")?;
    let pay_to = cursor.read_array32("pay_to")?;
    let description_len = cursor.read_u32_le("description length")? as usize;
    cursor.skip(description_len, "description")?;
    let resource_len = cursor.read_u32_le("resource length")? as usize;
    cursor.skip(resource_len, "resource")?;
    let active = cursor.read_u8("active")? != 0;
    Ok(DecodedRequirement {
        amount,
        asset,
        pay_to,
        active,
    })
}
