//! Order-book price level.
//!
//! The venue encodes a level as a two-element array `[price, size]`, never as
//! an object. Both directions preserve that shape.

use rust_decimal::Decimal;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single price level: `["21.05", "0.34"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl BookLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }

    /// Quote value of the level (`price * quantity`).
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

impl Serialize for BookLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.price.to_string())?;
        tuple.serialize_element(&self.quantity.to_string())?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for BookLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(BookLevelVisitor)
    }
}

struct BookLevelVisitor;

impl<'de> Visitor<'de> for BookLevelVisitor {
    type Value = BookLevel;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a [price, size] array")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<BookLevel, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(2);
        while let Some(value) = seq.next_element::<DecimalText>()? {
            values.push(value.0);
        }
        if values.len() != 2 {
            return Err(de::Error::custom(format!(
                "expected 2 elements, got {}",
                values.len()
            )));
        }
        Ok(BookLevel {
            price: values[0],
            quantity: values[1],
        })
    }
}

/// A decimal that may arrive as a JSON string or a JSON number.
struct DecimalText(Decimal);

impl<'de> Deserialize<'de> for DecimalText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalTextVisitor;

        impl<'de> Visitor<'de> for DecimalTextVisitor {
            type Value = DecimalText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a decimal string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DecimalText, E> {
                Decimal::from_str(v).map(DecimalText).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DecimalText, E> {
                Ok(DecimalText(Decimal::from(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DecimalText, E> {
                Ok(DecimalText(Decimal::from(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<DecimalText, E> {
                Decimal::from_str(&v.to_string())
                    .map(DecimalText)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_any(DecimalTextVisitor)
    }
}
