//! The phonetics-phonology interface: symbols ↔ feature vectors.
//!
//! An [`Interface`] is the bidirectional mapping between surface symbols and
//! the feature vectors the engine rewrites. The forward table takes a symbol
//! to its vector; the reverse table takes a vector back to a symbol and
//! requires an exact match on the complete specified-feature tuple - a
//! partially specified vector that corresponds to no cataloged symbol cannot
//! be rendered and decoding fails.
//!
//! # Feature table format
//!
//! [`Interface::from_tsv`] reads the conventional tab-separated feature
//! table: a header row listing feature names from the second column, then
//! one row per symbol with `+`, `-`, or anything else (underspecified) per
//! feature:
//!
//! ```text
//! \tcons\tvoi
//! p\t+\t-
//! b\t+\t+
//! a\t-\t0
//! ```
//!
//! Every cataloged symbol implicitly carries `segment = +1`; the reserved
//! boundary symbol `#` maps to the [`WORD_BOUNDARY`] vector and is installed
//! at construction, never read from the table.

use rustc_hash::FxHashMap;

use crate::error::{PhonologyError, Result};
use crate::features::{FeatureKey, FeatureVector, SEGMENT_FEATURE, WORD_BOUNDARY};
use crate::segment::SegmentString;

/// The reserved symbol for the word boundary.
pub const BOUNDARY_SYMBOL: char = '#';

/// Bidirectional mapping between surface symbols and feature vectors.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Interface {
    to_features: FxHashMap<char, FeatureVector>,
    to_symbols: FxHashMap<FeatureKey, char>,
    features: Vec<String>,
}

impl Interface {
    /// Create an interface containing only the boundary entry.
    pub fn new() -> Self {
        let mut interface = Self {
            to_features: FxHashMap::default(),
            to_symbols: FxHashMap::default(),
            features: vec![SEGMENT_FEATURE.to_string()],
        };
        interface
            .to_features
            .insert(BOUNDARY_SYMBOL, WORD_BOUNDARY.clone());
        interface
            .to_symbols
            .insert(WORD_BOUNDARY.key(), BOUNDARY_SYMBOL);
        interface
    }

    /// Parse a tab-separated feature table. See the module docs for the
    /// format.
    pub fn from_tsv(table: &str) -> Result<Self> {
        let mut lines = table.lines().enumerate();
        let (_, header) = lines
            .next()
            .ok_or_else(|| PhonologyError::MalformedFeatureTable {
                line: 1,
                reason: "missing header row".to_string(),
            })?;
        let feature_names: Vec<&str> = header.split('\t').skip(1).collect();

        let mut interface = Self::new();
        for name in &feature_names {
            interface.features.push((*name).to_string());
        }

        for (index, row) in lines {
            let line = index + 1;
            if row.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = row.split('\t').collect();
            if cells.len() != feature_names.len() + 1 {
                return Err(PhonologyError::MalformedFeatureTable {
                    line,
                    reason: format!(
                        "expected {} columns, found {}",
                        feature_names.len() + 1,
                        cells.len()
                    ),
                });
            }
            let mut symbols = cells[0].chars();
            let symbol = match (symbols.next(), symbols.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(PhonologyError::MalformedFeatureTable {
                        line,
                        reason: format!("symbol {:?} is not a single character", cells[0]),
                    })
                }
            };
            if symbol == BOUNDARY_SYMBOL {
                return Err(PhonologyError::MalformedFeatureTable {
                    line,
                    reason: "the boundary symbol is reserved".to_string(),
                });
            }
            let mut vector = FeatureVector::new();
            for (name, cell) in feature_names.iter().zip(&cells[1..]) {
                vector.set(name, sign_of(cell));
            }
            interface.insert(symbol, vector);
        }
        Ok(interface)
    }

    /// Catalog a symbol. The vector is implicitly completed with
    /// `segment = +1` before both tables are updated.
    pub fn insert(&mut self, symbol: char, mut vector: FeatureVector) {
        vector.set(SEGMENT_FEATURE, 1);
        self.to_symbols.insert(vector.key(), symbol);
        self.to_features.insert(symbol, vector);
    }

    /// The known feature inventory, `segment` first, then table order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// The feature vector for a symbol.
    pub fn segment(&self, symbol: char) -> Result<&FeatureVector> {
        self.to_features
            .get(&symbol)
            .ok_or(PhonologyError::UnknownSymbol(symbol))
    }

    /// The symbol whose cataloged vector exactly matches `segment`.
    ///
    /// Exact means equality of the specified-feature tuples; there is no
    /// nearest-neighbor fallback.
    pub fn symbol(&self, segment: &FeatureVector) -> Result<char> {
        self.to_symbols
            .get(&segment.key())
            .copied()
            .ok_or_else(|| PhonologyError::NoSymbolForSegment(segment.to_string()))
    }

    /// Map a symbol sequence onto a segment string.
    pub fn encode(&self, symbols: &str) -> Result<SegmentString> {
        symbols
            .chars()
            .map(|c| self.segment(c).cloned())
            .collect()
    }

    /// Map a segment string back onto a symbol sequence.
    pub fn decode(&self, string: &SegmentString) -> Result<String> {
        string.iter().map(|segment| self.symbol(segment)).collect()
    }
}

impl Default for Interface {
    fn default() -> Self {
        Self::new()
    }
}

fn sign_of(cell: &str) -> i8 {
    match cell.trim() {
        "+" => 1,
        "-" => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\tcons\tvoi\np\t+\t-\nb\t+\t+\na\t-\t0\n";

    #[test]
    fn parses_header_and_rows() {
        let interface = Interface::from_tsv(TABLE).unwrap();
        assert_eq!(interface.features(), &["segment", "cons", "voi"]);

        let b = interface.segment('b').unwrap();
        assert_eq!(b.value("segment"), 1);
        assert_eq!(b.value("cons"), 1);
        assert_eq!(b.value("voi"), 1);

        // 'a' leaves voi underspecified rather than storing a zero.
        let a = interface.segment('a').unwrap();
        assert!(!a.specifies("voi"));
    }

    #[test]
    fn boundary_is_preinstalled() {
        let interface = Interface::new();
        assert_eq!(interface.segment('#').unwrap(), &*WORD_BOUNDARY);
        assert_eq!(interface.symbol(&WORD_BOUNDARY).unwrap(), '#');
    }

    #[test]
    fn encode_decode_round_trips() {
        let interface = Interface::from_tsv(TABLE).unwrap();
        let string = interface.encode("aba").unwrap();
        assert_eq!(string.len(), 3);
        assert_eq!(interface.decode(&string).unwrap(), "aba");
    }

    #[test]
    fn unknown_symbol_is_fatal() {
        let interface = Interface::from_tsv(TABLE).unwrap();
        assert_eq!(
            interface.encode("axa"),
            Err(PhonologyError::UnknownSymbol('x'))
        );
    }

    #[test]
    fn decode_requires_an_exact_match() {
        let interface = Interface::from_tsv(TABLE).unwrap();
        // A bare [+cons] core corresponds to no cataloged symbol.
        let partial = FeatureVector::from_specs(&[("segment", 1), ("cons", 1)]);
        let string: SegmentString = std::iter::once(partial).collect();
        assert!(matches!(
            interface.decode(&string),
            Err(PhonologyError::NoSymbolForSegment(_))
        ));
    }

    #[test]
    fn rejects_ragged_rows_and_reserved_symbols() {
        assert!(matches!(
            Interface::from_tsv("\tcons\np\t+\t-\n"),
            Err(PhonologyError::MalformedFeatureTable { line: 2, .. })
        ));
        assert!(matches!(
            Interface::from_tsv("\tcons\n#\t+\n"),
            Err(PhonologyError::MalformedFeatureTable { line: 2, .. })
        ));
    }
}
