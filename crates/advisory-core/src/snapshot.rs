//! One cycle's worth of readings, grouped by category.
//!
//! Categories and instruments keep the order in which the collaborator
//! enumerated them; ranking ties are broken by that order.

use crate::{AdvisoryError, InstrumentReading};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySnapshot {
    pub name: String,
    /// `None` when the collaborator had nothing for the symbol
    pub instruments: Vec<(String, Option<InstrumentReading>)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    pub categories: Vec<CategorySnapshot>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `{category: {symbol: reading}}` document.
    pub fn from_json(json: &str) -> Result<Self, AdvisoryError> {
        serde_json::from_str(json).map_err(|e| AdvisoryError::Snapshot(e.to_string()))
    }

    /// Append a reading, creating the category on first use.
    pub fn push(
        &mut self,
        category: impl Into<String>,
        symbol: impl Into<String>,
        reading: Option<InstrumentReading>,
    ) {
        let category = category.into();
        let entry = (symbol.into(), reading);
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.instruments.push(entry),
            None => self.categories.push(CategorySnapshot {
                name: category,
                instruments: vec![entry],
            }),
        }
    }

    pub fn with(
        mut self,
        category: impl Into<String>,
        symbol: impl Into<String>,
        reading: InstrumentReading,
    ) -> Self {
        self.push(category, symbol, Some(reading));
        self
    }

    pub fn instrument_count(&self) -> usize {
        self.categories.iter().map(|c| c.instruments.len()).sum()
    }

    /// Flatten to `(category, symbol, reading)` in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Option<&InstrumentReading>)> {
        self.categories.iter().flat_map(|c| {
            c.instruments
                .iter()
                .map(move |(symbol, reading)| (c.name.as_str(), symbol.as_str(), reading.as_ref()))
        })
    }
}

/// Map entries collected in document order
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for MarketSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let OrderedEntries(categories) =
            OrderedEntries::<OrderedEntries<Option<InstrumentReading>>>::deserialize(deserializer)?;
        Ok(MarketSnapshot {
            categories: categories
                .into_iter()
                .map(|(name, OrderedEntries(instruments))| CategorySnapshot { name, instruments })
                .collect(),
        })
    }
}

struct InstrumentsRef<'a>(&'a [(String, Option<InstrumentReading>)]);

impl Serialize for InstrumentsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (symbol, reading) in self.0 {
            map.serialize_entry(symbol, reading)?;
        }
        map.end()
    }
}

impl Serialize for MarketSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &InstrumentsRef(&category.instruments))?;
        }
        map.end()
    }
}
