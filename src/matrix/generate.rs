use crate::matrix::spec::{ARCH, KERNEL};
use crate::matrix::{Entry, Filter, Spec, cartesian_product};

/// Expand `spec` into the ordered list of entries to run, narrowed by `filter`.
///
/// Pipeline:
/// 1) empty spec => the host platform, filter not applied
/// 2) product of the base dimensions, minus excluded and ignored entries,
///    kept if any positive filter tuple accepts it
/// 3) include entries appended in declaration order; they skip exclude but
///    still go through dedup, ignore and the positive filter
pub fn generate_entries(
    spec: Option<&Spec>,
    filter: Option<&Filter>,
    host_kernel: &str,
    host_arch: &str,
) -> Vec<Entry> {
    let spec = match spec {
        Some(spec) if !spec.is_empty() => spec,
        _ => {
            return vec![Entry::from_iter([
                (KERNEL, host_kernel),
                (ARCH, host_arch),
            ])];
        }
    };

    let excludes: Vec<Entry> = spec.exclude.iter().flat_map(cartesian_product).collect();

    let (positives, ignores) = match filter {
        Some(f) => (cartesian_product(f.matches()), f.ignores()),
        None => (Vec::new(), &[][..]),
    };

    let selected = |e: &Entry| -> bool {
        if ignores.iter().any(|(k, v)| e.matches_kv(k, v)) {
            return false;
        }
        positives.is_empty() || positives.iter().any(|p| e.accepted_by(p))
    };

    let mut out: Vec<Entry> = cartesian_product(&spec.dimensions())
        .into_iter()
        .filter(|e| !excludes.iter().any(|x| e.matches(x)))
        .filter(|e| selected(e))
        .collect();

    for include in &spec.include {
        for e in cartesian_product(include) {
            // Only against what is already accepted; one include's own
            // product has no duplicates.
            if out.contains(&e) || !selected(&e) {
                continue;
            }
            out.push(e);
        }
    }

    out
}
