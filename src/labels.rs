// Label generation - equal-length labels for every cell in a session
// The length is the smallest depth whose Cartesian product covers the cell
// count; labels follow product order with the leftmost symbol varying slowest,
// so a given cell count always maps to the same labels.

use crate::errors::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of label symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> GridResult<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(GridError::AlphabetTooSmall {
                symbols: 0,
                required: 1,
            });
        }
        // Labels are trimmed before matching, so whitespace can never be typed
        if let Some(ws) = symbols.iter().find(|c| c.is_whitespace()) {
            return Err(GridError::Config(format!(
                "Alphabet may not contain whitespace ({:?})",
                ws
            )));
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(GridError::Config(format!(
                    "Alphabet contains '{}' more than once",
                    symbol
                )));
            }
        }
        Ok(Self { symbols })
    }

    /// Keys ordered for strong finger presses, index fingers first and
    /// alternating hands
    pub fn primary() -> Self {
        Self {
            symbols: crate::VALID_KEYS.chars().collect(),
        }
    }

    /// Four keys forming a square on a QWERTY keyboard
    pub fn quadrants() -> Self {
        Self {
            symbols: crate::QUADRANT_KEYS.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

/// Minimal label length `L >= 1` with `symbols^L >= count`
pub fn label_depth(symbols: usize, count: usize) -> GridResult<usize> {
    if symbols == 0 || (symbols == 1 && count > 1) {
        return Err(GridError::AlphabetTooSmall {
            symbols,
            required: count,
        });
    }

    let mut depth = 1;
    let mut capacity = symbols;
    while capacity < count {
        depth += 1;
        capacity = capacity.saturating_mul(symbols);
    }
    Ok(depth)
}

/// First `count` labels of the minimal depth, in product order
pub fn generate_labels(alphabet: &Alphabet, count: usize) -> GridResult<Vec<String>> {
    let depth = label_depth(alphabet.len(), count)?;
    Ok((0..count)
        .map(|index| label_at(alphabet.symbols(), depth, index))
        .collect())
}

// The index written in base `symbols.len()` with `depth` digits, most
// significant digit first.
fn label_at(symbols: &[char], depth: usize, mut index: usize) -> String {
    let base = symbols.len();
    let mut digits = vec![symbols[0]; depth];
    for slot in digits.iter_mut().rev() {
        *slot = symbols[index % base];
        index /= base;
    }
    digits.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_abcd_ten_labels() {
        let alphabet = Alphabet::new("abcd").unwrap();
        let labels = generate_labels(&alphabet, 10).unwrap();
        assert_eq!(
            labels,
            vec!["aa", "ab", "ac", "ad", "ba", "bb", "bc", "bd", "ca", "cb"]
        );
    }

    #[test]
    fn test_depth_is_minimal() {
        assert_eq!(label_depth(4, 1).unwrap(), 1);
        assert_eq!(label_depth(4, 4).unwrap(), 1);
        assert_eq!(label_depth(4, 5).unwrap(), 2);
        assert_eq!(label_depth(4, 16).unwrap(), 2);
        assert_eq!(label_depth(4, 17).unwrap(), 3);
        assert_eq!(label_depth(26, 1200).unwrap(), 3);
        assert_eq!(label_depth(1, 1).unwrap(), 1);
    }

    #[test]
    fn test_labels_unique_and_equal_length() {
        let alphabet = Alphabet::new("fjruvndkeicmslwoxaqpzghtyb").unwrap();
        for count in [1, 2, 25, 26, 27, 676, 677, 1500] {
            let labels = generate_labels(&alphabet, count).unwrap();
            let depth = label_depth(alphabet.len(), count).unwrap();
            assert_eq!(labels.len(), count);
            assert!(labels.iter().all(|l| l.chars().count() == depth));
            let unique: HashSet<&String> = labels.iter().collect();
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn test_zero_count_yields_nothing() {
        let alphabet = Alphabet::new("ab").unwrap();
        assert!(generate_labels(&alphabet, 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_cannot_label_two_cells() {
        let alphabet = Alphabet::new("a").unwrap();
        assert!(matches!(
            generate_labels(&alphabet, 2),
            Err(GridError::AlphabetTooSmall { symbols: 1, required: 2 })
        ));
    }

    #[test]
    fn test_alphabet_validation() {
        assert!(matches!(
            Alphabet::new(""),
            Err(GridError::AlphabetTooSmall { .. })
        ));
        assert!(matches!(Alphabet::new("abca"), Err(GridError::Config(_))));
        assert!(matches!(Alphabet::new("a b"), Err(GridError::Config(_))));
    }

    #[test]
    fn test_builtin_alphabets_are_valid() {
        assert_eq!(Alphabet::new(crate::VALID_KEYS).unwrap(), Alphabet::primary());
        assert_eq!(Alphabet::new(crate::QUADRANT_KEYS).unwrap(), Alphabet::quadrants());
        assert_eq!(Alphabet::primary().len(), 26);
    }

    #[test]
    fn test_alphabet_serde_as_string() {
        let alphabet = Alphabet::new("wesd").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"wesd\"");
        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alphabet);
        assert!(serde_json::from_str::<Alphabet>("\"\"").is_err());
    }
}
