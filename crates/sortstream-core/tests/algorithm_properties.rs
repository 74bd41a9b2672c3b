//! Properties every instrumented algorithm must satisfy.
//!
//! Each test runs all nine built-in algorithms over a shared set of inputs and
//! checks the stream shape the viewer depends on:
//!
//! - the last record is terminal and carries the input sorted ascending;
//! - no other record is terminal;
//! - the caller's input is left untouched;
//! - merge, counting and radix sort keep equal values in input order.

use sortstream_core::algorithms::DEFAULT_MAX_COUNTING_RANGE;
use sortstream_core::{AlgorithmId, AlgorithmRegistry, StepRecord};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Inputs accepted by every algorithm (non-negative integers).
fn shared_inputs() -> Vec<Vec<f64>> {
    vec![
        vec![1.0],
        vec![2.0, 1.0],
        vec![1.0, 2.0],
        vec![5.0, 3.0, 8.0, 1.0],
        vec![2.0, 2.0, 1.0],
        vec![0.0, 0.0, 0.0],
        vec![9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0],
        vec![10.0, 1.0, 100.0, 7.0, 55.0, 3.0, 3.0, 1000.0, 0.0, 42.0, 19.0],
        pseudo_random(64, 7),
        pseudo_random(200, 99),
    ]
}

/// Deterministic values in `0..500` from a linear congruential generator.
fn pseudo_random(len: usize, seed: u32) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            f64::from((state >> 16) % 500)
        })
        .collect()
}

fn run(id: AlgorithmId, input: &[f64]) -> Vec<StepRecord> {
    let registry = AlgorithmRegistry::standard(DEFAULT_MAX_COUNTING_RANGE);
    registry
        .get(id.as_str())
        .expect("built-in algorithm must be registered")
        .steps(input)
        .unwrap_or_else(|e| panic!("{id} rejected {input:?}: {e}"))
        .collect()
}

fn sorted_copy(input: &[f64]) -> Vec<f64> {
    let mut expected = input.to_vec();
    expected.sort_by(f64::total_cmp);
    expected
}

// ── Properties ────────────────────────────────────────────────────────────────

#[test]
fn test_final_record_is_the_sorted_input() {
    for id in AlgorithmId::ALL {
        for input in shared_inputs() {
            let records = run(id, &input);
            let last = records.last().expect("stream must not be empty");
            assert_eq!(last.array, sorted_copy(&input), "{id} on {input:?}");
        }
    }
}

#[test]
fn test_exactly_one_terminal_record_and_it_is_last() {
    for id in AlgorithmId::ALL {
        for input in shared_inputs() {
            let records = run(id, &input);
            let terminals = records.iter().filter(|r| r.is_terminal()).count();
            assert_eq!(terminals, 1, "{id} on {input:?}");
            assert!(records.last().unwrap().is_terminal(), "{id} on {input:?}");
        }
    }
}

#[test]
fn test_snapshots_keep_the_input_length() {
    for id in AlgorithmId::ALL {
        let input = pseudo_random(50, 3);
        for record in run(id, &input) {
            assert_eq!(record.array.len(), input.len(), "{id}");
        }
    }
}

#[test]
fn test_indices_stay_in_bounds() {
    for id in AlgorithmId::ALL {
        let input = pseudo_random(33, 11);
        for record in run(id, &input) {
            for (a, b) in record.compare.into_iter().chain(record.swap) {
                assert!(a < input.len() && b < input.len(), "{id}: ({a}, {b})");
            }
        }
    }
}

#[test]
fn test_caller_input_is_not_mutated() {
    for id in AlgorithmId::ALL {
        let input = vec![3.0, 1.0, 2.0];
        let before = input.clone();
        let _ = run(id, &input);
        assert_eq!(input, before, "{id}");
    }
}

#[test]
fn test_comparison_sorts_accept_negative_and_fractional_values() {
    let input = vec![2.5, -1.0, 0.0, -7.25, 3.0, 2.5];
    let comparison_sorts = AlgorithmId::ALL
        .into_iter()
        .filter(|id| !matches!(id, AlgorithmId::CountingSort | AlgorithmId::RadixSort));
    for id in comparison_sorts {
        let records = run(id, &input);
        assert_eq!(records.last().unwrap().array, sorted_copy(&input), "{id}");
    }
}

#[test]
fn test_stable_algorithms_keep_equal_values_in_input_order() {
    // `0.0` and `-0.0` are equal keys with distinguishable signs.
    let input = vec![2.0, -0.0, 1.0, 0.0, -0.0, 0.0];
    let expected_signs = [true, false, true, false]; // negative?, in input order

    for id in [
        AlgorithmId::MergeSort,
        AlgorithmId::CountingSort,
        AlgorithmId::RadixSort,
    ] {
        let records = run(id, &input);
        let sorted = &records.last().unwrap().array;
        let zero_signs: Vec<bool> = sorted[..4].iter().map(|v| v.is_sign_negative()).collect();
        assert_eq!(zero_signs, expected_signs, "{id} must be stable");
        assert_eq!(&sorted[4..], &[1.0, 2.0], "{id}");
    }
}

#[test]
fn test_bubble_sort_example_sequence() {
    let records = run(AlgorithmId::BubbleSort, &[5.0, 3.0, 8.0, 1.0]);

    assert_eq!(records[0].compare, Some((0, 1)));
    assert_eq!(records[1].swap, Some((0, 1)));
    assert_eq!(records[1].array, vec![3.0, 5.0, 8.0, 1.0]);
    assert_eq!(records.last().unwrap().array, vec![1.0, 3.0, 5.0, 8.0]);
}

#[test]
fn test_counting_sort_example() {
    let records = run(AlgorithmId::CountingSort, &[2.0, 2.0, 1.0]);
    assert_eq!(records.last().unwrap().array, vec![1.0, 2.0, 2.0]);
}

#[test]
fn test_streams_are_lazy() {
    // Taking a prefix of a long stream must not require running the sort.
    let registry = AlgorithmRegistry::standard(DEFAULT_MAX_COUNTING_RANGE);
    let input: Vec<f64> = (0..1000).rev().map(f64::from).collect();
    let mut stream = registry.get("bubbleSort").unwrap().steps(&input).unwrap();

    let first = stream.next().unwrap();

    assert_eq!(first.compare, Some((0, 1)));
    drop(stream);
}
