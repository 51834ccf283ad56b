//! Property-based tests for unique name resolution
//!
//! Tests that `unique_name` never collides, leaves free names alone and
//! numbers from the base of a `base(n)` candidate.

use std::collections::HashSet;

use autotunnel_core::naming::{name_from_file_name, split_numbered_suffix, unique_name};
use proptest::prelude::*;

/// Generates a plain tunnel name without a numbered suffix
fn arb_base_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9 _.-]{0,15}").unwrap()
}

/// Generates a set of existing names around one base, including numbered
/// variants
fn arb_existing(base: String) -> impl Strategy<Value = (String, HashSet<String>)> {
    (
        prop::collection::hash_set(0u32..20, 0..20),
        prop::collection::hash_set(arb_base_name(), 0..10),
        any::<bool>(),
    )
        .prop_map(move |(numbers, others, include_base)| {
            let mut existing: HashSet<String> = numbers
                .into_iter()
                .map(|n| format!("{base}({n})"))
                .collect();
            existing.extend(others);
            if include_base {
                existing.insert(base.clone());
            }
            (base.clone(), existing)
        })
}

proptest! {
    /// Property: the result is never one of the existing names
    #[test]
    fn unique_name_is_not_taken(
        (base, existing) in arb_base_name().prop_flat_map(arb_existing),
        numbered in any::<bool>(),
        n in 0u32..25,
    ) {
        let candidate = if numbered { format!("{base}({n})") } else { base };
        let name = unique_name(&candidate, &existing);
        prop_assert!(!existing.contains(&name));
    }

    /// Property: a free candidate is returned unchanged
    #[test]
    fn unique_name_keeps_free_candidate(
        (base, mut existing) in arb_base_name().prop_flat_map(arb_existing),
    ) {
        existing.remove(&base);
        prop_assert_eq!(unique_name(&base, &existing), base);
    }

    /// Property: the same inputs always give the same output, whatever order
    /// the set was built in
    #[test]
    fn unique_name_is_deterministic(
        (base, existing) in arb_base_name().prop_flat_map(arb_existing),
    ) {
        let mut items: Vec<_> = existing.iter().cloned().collect();
        items.reverse();
        let rebuilt: HashSet<String> = items.into_iter().collect();
        prop_assert_eq!(unique_name(&base, &existing), unique_name(&base, &rebuilt));
    }

    /// Property: a taken candidate resolves to `base(k)` with
    /// `1 <= k <= |existing| + 1`
    #[test]
    fn unique_name_numbers_from_base(
        (base, mut existing) in arb_base_name().prop_flat_map(arb_existing),
        n in 0u32..25,
    ) {
        let candidate = format!("{base}({n})");
        existing.insert(candidate.clone());
        let name = unique_name(&candidate, &existing);

        let (found_base, number) = split_numbered_suffix(&name).expect("numbered result");
        prop_assert_eq!(found_base, base.as_str());
        let k: usize = number.parse().expect("integer suffix");
        prop_assert!(k >= 1 && k <= existing.len() + 1);
    }

    /// Property: file names lose directories and exactly one extension
    #[test]
    fn name_from_file_name_strips_extension(
        dir in "[a-z]{1,8}",
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in "[a-z]{1,4}",
    ) {
        let file = format!("{dir}/{stem}.{ext}");
        prop_assert_eq!(name_from_file_name(&file), stem.as_str());
    }
}
