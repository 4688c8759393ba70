use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An ordered sequence of cells, written as `'0'` (dead) and `'1'` (live).
///
/// ```notrust
/// [false, true] <-> "01"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitPattern {
    bits: Vec<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid cell '{got}' at index {index}, expected '0' or '1'")]
    InvalidCell { got: char, index: usize },
}

impl BitPattern {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Cell `i` of the pattern repeated forever in both directions.
    ///
    /// Panics if the pattern is empty.
    pub fn periodic(&self, i: i64) -> bool {
        let n = self.bits.len() as i64;
        self.bits[i.rem_euclid(n) as usize]
    }
}

impl From<Vec<bool>> for BitPattern {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }

        Ok(())
    }
}

impl FromStr for BitPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                got => Err(PatternError::InvalidCell { got, index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { bits })
    }
}

#[cfg(test)]
mod test {
    use super::BitPattern;
    use super::PatternError;

    #[test]
    fn parse() {
        let pat: BitPattern = "0110".parse().unwrap();
        assert_eq!(pat.bits(), &[false, true, true, false]);
        assert_eq!(pat.to_string(), "0110");
    }

    #[test]
    fn empty() {
        let pat: BitPattern = "".parse().unwrap();
        assert!(pat.is_empty());
        assert_eq!(pat.to_string(), "");
    }

    #[test]
    fn invalid_cell() {
        let err = "01a1".parse::<BitPattern>().unwrap_err();
        assert_eq!(err, PatternError::InvalidCell { got: 'a', index: 2 });
    }

    #[test]
    fn periodic_wraps_both_ways() {
        let pat: BitPattern = "100".parse().unwrap();
        assert!(pat.periodic(0));
        assert!(pat.periodic(3));
        assert!(pat.periodic(-3));
        assert!(!pat.periodic(-1));
        assert!(!pat.periodic(4));
    }
}
