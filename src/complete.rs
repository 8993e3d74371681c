//! Shell completion candidates for `-m`.
//!
//! Candidates come from the same expansion the task run uses, narrowed by the
//! `-m` tokens already on the command line, so completion never offers a
//! value the run would not select.

use crate::matrix::{Entry, Filter, Spec, generate_entries};
use crate::host::Host;
use std::collections::BTreeSet;

/// `key=value` candidates for `matrix`, sorted, minus the tokens in `typed`,
/// keeping only those starting with `prefix`.
pub fn matrix_candidates(
    matrix: Option<&Spec>,
    typed: &[String],
    prefix: &str,
    host: &Host,
) -> Vec<String> {
    let filter = Filter::from_tokens(typed);
    let entries = generate_entries(matrix, Some(&filter), &host.kernel, &host.arch);
    project(&entries, typed, prefix)
}

fn project(entries: &[Entry], typed: &[String], prefix: &str) -> Vec<String> {
    let typed: BTreeSet<&str> = typed.iter().map(String::as_str).collect();

    let mut out: BTreeSet<String> = BTreeSet::new();
    for entry in entries {
        for (k, v) in entry.iter() {
            let candidate = format!("{}={}", k, v);
            if candidate.starts_with(prefix) && !typed.contains(candidate.as_str()) {
                out.insert(candidate);
            }
        }
    }
    out.into_iter().collect()
}
