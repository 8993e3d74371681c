//! Cartesian product over named dimensions.
//!
//! Dimension names are visited in sorted order (BTreeMap), and enumeration is a
//! mixed-radix odometer: the last name is the least significant digit and
//! changes on every step, the first name changes least often.

use crate::matrix::Entry;
use std::collections::BTreeMap;

/// Dimension name -> candidate values.
pub type DimensionSet = BTreeMap<String, Vec<String>>;

const MAX_PREALLOC: usize = 4096;

/// Enumerate every combination of the non-empty dimensions in `dims`.
///
/// Dimensions with no values are dropped; if none remain the result is empty.
pub fn cartesian_product(dims: &DimensionSet) -> Vec<Entry> {
    let dims: Vec<(&String, &Vec<String>)> =
        dims.iter().filter(|(_, values)| !values.is_empty()).collect();
    if dims.is_empty() {
        return Vec::new();
    }

    // Only a hint; enumeration below does not depend on it.
    let capacity = dims
        .iter()
        .try_fold(1usize, |acc, (_, values)| acc.checked_mul(values.len()))
        .unwrap_or(0)
        .min(MAX_PREALLOC);
    let mut out = Vec::with_capacity(capacity);

    let mut cursor = vec![0usize; dims.len()];
    loop {
        out.push(
            dims.iter()
                .zip(&cursor)
                .map(|((name, values), &i)| (name.to_string(), values[i].clone()))
                .collect::<Entry>(),
        );

        // Advance, carrying from the last digit towards the first.
        let mut digit = dims.len();
        loop {
            if digit == 0 {
                return out;
            }
            digit -= 1;

            cursor[digit] += 1;
            if cursor[digit] < dims[digit].1.len() {
                break;
            }
            cursor[digit] = 0;
        }
    }
}
