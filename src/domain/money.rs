//! Decimal money values and their JSON encoding.
//!
//! Amounts are held as [`BigDecimal`] so halving a ticket price or summing
//! snack lines never drifts. On the wire they travel as plain JSON numbers,
//! which is what REST stores such as json-server keep; numeric strings are
//! accepted on input as well.

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{de, ser, Deserialize, Deserializer, Serializer};

pub type Money = BigDecimal;

#[derive(Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Number(serde_json::Number),
    Text(String),
}

/// Parse a decimal amount from its textual form.
pub fn parse(text: &str) -> Result<Money, bigdecimal::ParseBigDecimalError> {
    BigDecimal::from_str(text.trim())
}

pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_integer() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    let number = value
        .to_f64()
        .ok_or_else(|| ser::Error::custom(format!("amount {value} is not representable")))?;
    serializer.serialize_f64(number)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    // serde_json renders floats with their shortest round-trip text, so 12.9
    // arrives as "12.9" rather than its binary expansion.
    let text = match WireAmount::deserialize(deserializer)? {
        WireAmount::Number(n) => n.to_string(),
        WireAmount::Text(s) => s,
    };
    parse(&text).map_err(|e| de::Error::custom(format!("invalid amount '{text}': {e}")))
}

/// Same encoding for optional amounts, used by loosely-typed form bodies.
pub mod option {
    use serde::{Deserialize, Deserializer};

    use super::Money;

    #[derive(Deserialize)]
    struct Wrapped(#[serde(with = "super")] Money);

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(m)| m))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "super")]
        price: Money,
    }

    fn amount(text: &str) -> Money {
        parse(text).expect("valid decimal")
    }

    #[test]
    fn accepts_integer_float_and_string_amounts() {
        let whole: Priced = serde_json::from_value(json!({ "price": 30 })).unwrap();
        let fractional: Priced = serde_json::from_value(json!({ "price": 12.9 })).unwrap();
        let text: Priced = serde_json::from_value(json!({ "price": "7.50" })).unwrap();

        assert_eq!(whole.price, amount("30"));
        assert_eq!(fractional.price, amount("12.9"));
        assert_eq!(text.price, amount("7.5"));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let result: Result<Priced, _> = serde_json::from_value(json!({ "price": "abc" }));
        assert!(result.is_err());
    }

    #[test]
    fn whole_amounts_serialize_as_integers() {
        let value = serde_json::to_value(Priced { price: amount("15") }).unwrap();
        assert_eq!(value, json!({ "price": 15 }));
    }

    #[test]
    fn fractional_amounts_serialize_as_numbers() {
        let value = serde_json::to_value(Priced { price: amount("12.5") }).unwrap();
        assert_eq!(value, json!({ "price": 12.5 }));
    }

    #[test]
    fn optional_amount_treats_null_as_none() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "option::deserialize")]
            price: Option<Money>,
        }
        let empty: Form = serde_json::from_value(json!({ "price": null })).unwrap();
        let missing: Form = serde_json::from_value(json!({})).unwrap();
        let present: Form = serde_json::from_value(json!({ "price": "4.25" })).unwrap();

        assert!(empty.price.is_none());
        assert!(missing.price.is_none());
        assert_eq!(present.price, Some(amount("4.25")));
    }
}
