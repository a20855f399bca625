//! Caller-facing types for resolved payment requirements.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// An on-chain token amount in base units, represented as a `u64`.
///
/// Serialized as a stringified integer to avoid loss of precision in JSON:
/// `1000000` becomes `"1000000"` in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let amount = s
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom("amount must be a non-negative integer"))?;
        Ok(TokenAmount(amount))
    }
}

/// The normalized, decoded view of an on-chain payment requirement.
///
/// Address fields carry the base58 text form of the underlying 32-byte
/// identifiers, ready for inclusion in a 402 payment challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirement {
    /// Payment destination address.
    pub pay_to: String,
    /// Required amount in base units of the asset.
    pub amount: TokenAmount,
    /// Mint address of the fungible asset the payment is denominated in.
    pub asset: String,
    /// Whether the requirement is currently enforceable.
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_amount_serializes_as_string() {
        let amount = TokenAmount::from(1_000_000u64);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1000000\"");
        let back: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn token_amount_rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<TokenAmount>("\"-1\"").is_err());
        assert!(serde_json::from_str::<TokenAmount>("\"1.5\"").is_err());
        assert!(serde_json::from_str::<TokenAmount>("\"abc\"").is_err());
    }

    #[test]
    fn payment_requirement_uses_camel_case() {
        let requirement = PaymentRequirement {
            pay_to: "8qbHbw2BbbTHBW1sbeqakYXVKRQM8Ne7pLK7m6CVfeR".to_string(),
            amount: TokenAmount::from(42u64),
            asset: "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi".to_string(),
            active: true,
        };
        let json = serde_json::to_value(&requirement).unwrap();
        assert_eq!(json["payTo"], "8qbHbw2BbbTHBW1sbeqakYXVKRQM8Ne7pLK7m6CVfeR");
        assert_eq!(json["amount"], "42");
        assert_eq!(json["active"], true);
    }
}
