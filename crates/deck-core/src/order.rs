//! Slide order derivation from two identifier lists.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info, warn};

use deck_model::{IdentifierList, Permutation, Result, ValidationError};

/// Derives the order that rearranges `first` into `second`.
///
/// Entry `k` of the result is the 1-based position in `first` of the
/// identifier at position `k + 1` in `second`. Repeated identifiers consume
/// their occurrences in `first` from left to right, so no source position is
/// used twice.
///
/// Checks, in order: both lists non-empty, equal lengths, equal multisets.
pub fn derive(first: &IdentifierList, second: &IdentifierList) -> Result<Permutation> {
    check_lists(first, second).inspect_err(|error| warn!(%error, "identifier lists rejected"))?;

    let mut positions: HashMap<&str, VecDeque<usize>> = HashMap::with_capacity(first.len());
    for (idx, identifier) in first.iter().enumerate() {
        positions.entry(identifier).or_default().push_back(idx + 1);
    }

    let mut order = Vec::with_capacity(second.len());
    for identifier in second.iter() {
        let Some(position) = positions
            .get_mut(identifier)
            .and_then(VecDeque::pop_front)
        else {
            return Err(set_mismatch(&first.sorted(), &second.sorted()));
        };
        debug!(identifier, position, "matched identifier");
        order.push(position);
    }

    let order = Permutation::from(order);
    info!(order = %order, "derived slide order");
    Ok(order)
}

fn check_lists(first: &IdentifierList, second: &IdentifierList) -> Result<()> {
    if first.is_empty() || second.is_empty() {
        return Err(ValidationError::EmptyList {
            first: first.len(),
            second: second.len(),
        });
    }
    if first.len() != second.len() {
        return Err(ValidationError::LengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }
    let sorted_first = first.sorted();
    let sorted_second = second.sorted();
    if sorted_first != sorted_second {
        return Err(set_mismatch(&sorted_first, &sorted_second));
    }
    Ok(())
}

/// Walks two sorted lists and collects the entries each side lacks.
fn set_mismatch(sorted_first: &[&str], sorted_second: &[&str]) -> ValidationError {
    let mut missing_from_first = Vec::new();
    let mut missing_from_second = Vec::new();
    let (mut left, mut right) = (0, 0);
    while left < sorted_first.len() && right < sorted_second.len() {
        match sorted_first[left].cmp(sorted_second[right]) {
            std::cmp::Ordering::Equal => {
                left += 1;
                right += 1;
            }
            std::cmp::Ordering::Less => {
                missing_from_second.push(sorted_first[left].to_string());
                left += 1;
            }
            std::cmp::Ordering::Greater => {
                missing_from_first.push(sorted_second[right].to_string());
                right += 1;
            }
        }
    }
    missing_from_second.extend(sorted_first[left..].iter().map(|value| (*value).to_string()));
    missing_from_first.extend(sorted_second[right..].iter().map(|value| (*value).to_string()));
    ValidationError::SetMismatch {
        missing_from_first,
        missing_from_second,
    }
}
