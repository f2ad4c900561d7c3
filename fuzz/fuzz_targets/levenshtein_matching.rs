// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded edit distance.
//!
//! The bound must never change the answer, only whether we give up early.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skillsearch::fuzzy::bounded_distance;

#[derive(Debug, Arbitrary)]
struct Input {
    a: String,
    b: String,
    max: u8,
}

fuzz_target!(|input: Input| {
    let a: String = input.a.chars().take(32).collect();
    let b: String = input.b.chars().take(32).collect();
    let max = (input.max % 8) as usize;
    let unbounded = bounded_distance(&a, &b, usize::MAX);

    match bounded_distance(&a, &b, max) {
        Some(d) => {
            assert!(d <= max);
            assert_eq!(Some(d), unbounded);
        }
        None => assert!(unbounded.is_some_and(|d| d > max)),
    }

    assert_eq!(bounded_distance(&b, &a, max), bounded_distance(&a, &b, max));
    assert_eq!(bounded_distance(&a, &a, max), Some(0));
});
