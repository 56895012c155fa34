//! Property-based tests for the smoothing and alignment pipeline.

use paper_figures::{align_series, exponential_smooth, rebase, AlignParams, NamedSeries};
use proptest::prelude::*;

/// Strategy for accuracy-like observation sequences.
fn values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..100.0_f64, min_len..max_len)
}

/// Strategy for a handful of named, non-empty series.
fn series_set_strategy() -> impl Strategy<Value = Vec<NamedSeries>> {
    prop::collection::vec(values_strategy(1, 150), 1..6).prop_map(|sets| {
        sets.into_iter()
            .enumerate()
            .map(|(i, values)| NamedSeries::new(format!("run{i}"), values))
            .collect()
    })
}

fn params_strategy() -> impl Strategy<Value = AlignParams> {
    (0.01..0.99_f64, 1usize..80, 50.0..100.0_f64).prop_map(|(decay, window, baseline)| {
        AlignParams {
            decay,
            window,
            baseline,
        }
    })
}

// =============================================================================
// Property: smoothing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn single_point_is_never_smoothed(v in -1e6..1e6_f64, decay in 0.001..0.999_f64) {
        prop_assert_eq!(exponential_smooth(&[v], decay), vec![v]);
    }

    #[test]
    fn smoothing_preserves_length(values in values_strategy(0, 200), decay in 0.01..0.99_f64) {
        prop_assert_eq!(exponential_smooth(&values, decay).len(), values.len());
    }

    #[test]
    fn smoothing_stays_within_input_range(
        values in values_strategy(1, 200),
        decay in 0.01..0.99_f64
    ) {
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for s in exponential_smooth(&values, decay) {
            prop_assert!(s >= lo - 1e-9 && s <= hi + 1e-9);
        }
    }
}

// =============================================================================
// Property: rebasing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rebased_window_mean_hits_baseline(
        values in values_strategy(1, 200),
        window in 1usize..80,
        baseline in 50.0..100.0_f64
    ) {
        let s = NamedSeries::new("s", values);
        let r = rebase(&s, window, baseline).unwrap();
        let w = window.min(r.len());
        let mean = r.values[..w].iter().sum::<f64>() / w as f64;
        prop_assert!((mean - baseline).abs() < 1e-6);
    }

    #[test]
    fn rebasing_twice_changes_nothing_more(
        values in values_strategy(1, 200),
        window in 1usize..80,
        baseline in 50.0..100.0_f64
    ) {
        let s = NamedSeries::new("s", values);
        let once = rebase(&s, window, baseline).unwrap();
        let twice = rebase(&once, window, baseline).unwrap();
        for (a, b) in once.values.iter().zip(&twice.values) {
            prop_assert!((a - b).abs() < 1e-6);
        }
    }
}

// =============================================================================
// Property: alignment
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn aligned_set_has_uniform_minimum_length(
        inputs in series_set_strategy(),
        params in params_strategy()
    ) {
        let shortest = inputs.iter().map(NamedSeries::len).min().unwrap();
        let set = align_series(inputs, &params).unwrap();

        prop_assert_eq!(set.len(), shortest);
        for s in set.series() {
            prop_assert_eq!(s.len(), shortest);
        }
    }

    #[test]
    fn truncation_is_a_prefix(
        inputs in series_set_strategy(),
        params in params_strategy()
    ) {
        let full: Vec<NamedSeries> = inputs
            .iter()
            .map(|s| {
                let smoothed =
                    NamedSeries::new(s.name.clone(), exponential_smooth(&s.values, params.decay));
                rebase(&smoothed, params.window, params.baseline).unwrap()
            })
            .collect();

        let set = align_series(inputs, &params).unwrap();
        for (aligned, untruncated) in set.series().iter().zip(&full) {
            prop_assert_eq!(&aligned.values[..], &untruncated.values[..set.len()]);
        }
    }

    #[test]
    fn appending_to_longest_series_does_not_change_output(
        inputs in series_set_strategy(),
        params in params_strategy(),
        tail in values_strategy(1, 20)
    ) {
        // Another member keeps the minimum length in place.
        prop_assume!(inputs.len() >= 2);

        let before = align_series(inputs.clone(), &params).unwrap();

        let mut extended = inputs;
        let longest = extended
            .iter()
            .enumerate()
            .max_by_key(|(_, s)| s.len())
            .map(|(i, _)| i)
            .unwrap();
        // The baseline window must already be fully covered.
        prop_assume!(extended[longest].len() >= params.window);
        extended[longest].values.extend(tail);

        let after = align_series(extended, &params).unwrap();
        prop_assert_eq!(after, before);
    }
}
