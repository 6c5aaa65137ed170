use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;

/// 1-based slide order.
///
/// Entry `k` holds the index of the source slide that becomes slide `k + 1`
/// of the reordered document. A valid permutation of length N contains every
/// value in `1..=N` exactly once; construction does not enforce that, callers
/// check it with [`Permutation::validate`] against the actual slide count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// `[1, 2, ..., n]`.
    pub fn identity(n: usize) -> Self {
        Self((1..=n).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Checks that this order covers `1..=slide_count` exactly once.
    pub fn validate(&self, slide_count: usize) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::OrderEmpty);
        }
        if self.0.len() != slide_count {
            return Err(ValidationError::CountMismatch {
                order_len: self.0.len(),
                slide_count,
            });
        }
        let mut seen = vec![false; slide_count];
        for &index in &self.0 {
            let slot = index
                .checked_sub(1)
                .and_then(|idx| seen.get_mut(idx))
                .filter(|taken| !**taken);
            match slot {
                Some(taken) => *taken = true,
                None => {
                    return Err(ValidationError::OrderInvalid {
                        order: self.to_string(),
                        slide_count,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate(self.0.len()).is_ok()
    }

    /// Order that undoes this one, or `None` when this is not a permutation.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_valid() {
            return None;
        }
        let mut inverse = vec![0; self.0.len()];
        for (position, &index) in self.0.iter().enumerate() {
            inverse[index - 1] = position + 1;
        }
        Some(Self(inverse))
    }

    /// Reorders `items` in memory, or `None` when the lengths disagree or
    /// this is not a permutation.
    pub fn apply_to<T: Clone>(&self, items: &[T]) -> Option<Vec<T>> {
        self.validate(items.len()).ok()?;
        Some(self.0.iter().map(|&index| items[index - 1].clone()).collect())
    }
}

impl From<Vec<usize>> for Permutation {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

/// Error parsing a slide order such as `3,1,2`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePermutationError {
    #[error("slide order is empty")]
    Empty,
    #[error("invalid slide index '{token}': expected a non-negative integer")]
    InvalidIndex { token: String },
}

impl FromStr for Permutation {
    type Err = ParsePermutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);
        let indices = inner
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| ParsePermutationError::InvalidIndex {
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if indices.is_empty() {
            return Err(ParsePermutationError::Empty);
        }
        Ok(Self(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_valid() {
        let identity = Permutation::identity(4);
        assert_eq!(identity.as_slice(), &[1, 2, 3, 4]);
        assert!(identity.is_valid());
    }

    #[test]
    fn rejects_duplicates() {
        let order = Permutation::from(vec![1, 2, 2]);
        assert_eq!(
            order.validate(3),
            Err(ValidationError::OrderInvalid {
                order: "[1, 2, 2]".to_string(),
                slide_count: 3,
            })
        );
    }

    #[test]
    fn rejects_zero_and_out_of_range() {
        assert!(Permutation::from(vec![0, 1, 2]).validate(3).is_err());
        assert!(Permutation::from(vec![1, 2, 4]).validate(3).is_err());
    }

    #[test]
    fn rejects_empty_order() {
        let empty = Permutation::from(Vec::new());
        assert_eq!(empty.validate(0), Err(ValidationError::OrderEmpty));
        assert_eq!(empty.validate(2), Err(ValidationError::OrderEmpty));
        assert!(!empty.is_valid());
        assert!(empty.inverse().is_none());
    }

    #[test]
    fn rejects_length_mismatch() {
        assert_eq!(
            Permutation::from(vec![2, 1]).validate(3),
            Err(ValidationError::CountMismatch {
                order_len: 2,
                slide_count: 3,
            })
        );
    }

    #[test]
    fn inverse_undoes_order() {
        let order = Permutation::from(vec![3, 1, 2]);
        let inverse = order.inverse().expect("valid permutation");
        assert_eq!(inverse.as_slice(), &[2, 3, 1]);
        let slides = ["a", "b", "c"];
        let shuffled = order.apply_to(&slides).expect("apply");
        assert_eq!(shuffled, vec!["c", "a", "b"]);
        assert_eq!(inverse.apply_to(&shuffled).expect("apply"), slides);
        assert!(Permutation::from(vec![1, 1]).inverse().is_none());
    }

    #[test]
    fn parses_and_displays() {
        let order: Permutation = "3,1, 2".parse().expect("parse");
        assert_eq!(order.as_slice(), &[3, 1, 2]);
        assert_eq!(order.to_string(), "[3, 1, 2]");
        let bracketed: Permutation = "[3, 1, 2]".parse().expect("parse");
        assert_eq!(bracketed, order);
        assert_eq!("".parse::<Permutation>(), Err(ParsePermutationError::Empty));
        assert!(matches!(
            "1,x".parse::<Permutation>(),
            Err(ParsePermutationError::InvalidIndex { .. })
        ));
    }
}
