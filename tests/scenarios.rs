use samplable_set_cr::{ElementKey, KeyedSamplableSet, SSetError, SamplableSet};

fn single_a() -> SamplableSet<&'static str> {
    let mut s = SamplableSet::with_seed(1.0, 100.0, 2024).unwrap();
    s.insert(&"a", 33.3).unwrap();
    s
}

#[test]
fn single_element_round_trip() {
    let mut s = single_a();
    assert_eq!(s.sample(), Some(("a", 33.3)));
    assert_eq!(s.total_weight(), 33.3);
    assert_eq!(s.size(), 1);

    assert_eq!(s.sample_destructive(), Some(("a", 33.3)));
    assert_eq!(s.size(), 0);
    assert!(s.sample().is_none());
    assert!(s.sample_destructive().is_none());
}

#[test]
fn sample_many_without_replacement_pads_with_none() {
    let mut s = single_a();
    let draws = s.sample_many(5, false);
    assert_eq!(draws, vec![Some(("a", 33.3)), None, None, None, None]);
    assert_eq!(s.size(), 0);
}

#[test]
fn sample_many_with_replacement_repeats() {
    let mut s = single_a();
    let draws = s.sample_many(5, true);
    assert_eq!(draws, vec![Some(("a", 33.3)); 5]);
    assert_eq!(s.size(), 1);
}

#[test]
fn clear_empties_everything() {
    let mut s = single_a();
    s.clear();
    assert_eq!(s.total_weight(), 0.0);
    assert_eq!(s.size(), 0);
    assert!(s.is_empty());
    assert!(s.sample().is_none());
}

#[test]
fn out_of_range_weights_are_rejected() {
    let mut s = SamplableSet::<&str>::new(1.0, 10.0).unwrap();
    assert!(matches!(s.insert(&"a", 0.5), Err(SSetError::WeightOutOfRange { .. })));

    s.insert(&"a", 2.0).unwrap();
    assert!(matches!(s.insert(&"b", 0.5), Err(SSetError::WeightOutOfRange { .. })));
    assert!(matches!(s.set_weight(&"a", 11.0), Err(SSetError::WeightOutOfRange { .. })));
    assert_eq!(s.count(&"a"), Some(2.0));
    assert_eq!(s.total_weight(), 2.0);
}

#[test]
fn bad_bounds_are_rejected() {
    for (min, max) in [(0.0, 100.0), (1.0, f64::INFINITY), (2.0, 1.0), (-1.0, 1.0)] {
        assert!(
            matches!(SamplableSet::<u64>::new(min, max), Err(SSetError::InvalidBounds { .. })),
            "[{min}, {max}] accepted"
        );
    }
}

#[test]
fn keyed_set_from_mapping() {
    let s = KeyedSamplableSet::from_pairs(1.0, 100.0, None, vec![(3u64, 33.3), (6, 66.6)]).unwrap();
    assert!(s.contains(&ElementKey::Int(3)));
    assert!(s.contains(&ElementKey::Int(6)));
    assert!(!s.contains(&ElementKey::Label("3".into())));
}

/// Chi-square goodness of fit for two keys, one degree of freedom.
#[test]
fn two_key_frequencies_fit_weights() {
    let (w1, w2) = (3.0, 17.0);
    let mut s = SamplableSet::<u8>::with_seed(1.0, 20.0, 0xC0FFEE).unwrap();
    s.insert(&1, w1).unwrap();
    s.insert(&2, w2).unwrap();

    let n = 200_000usize;
    let mut hits = 0usize;
    for _ in 0..n {
        if s.sample().unwrap().0 == 1 {
            hits += 1;
        }
    }

    let p1 = w1 / (w1 + w2);
    let e1 = n as f64 * p1;
    let e2 = n as f64 * (1.0 - p1);
    let o1 = hits as f64;
    let o2 = (n - hits) as f64;
    let chi2 = (o1 - e1).powi(2) / e1 + (o2 - e2).powi(2) / e2;
    // critical value for p = 1e-6 at 1 dof
    assert!(chi2 < 23.93, "chi2 = {chi2:.3}, hits = {hits}, expected {e1:.0}");
}

/// Weights spanning many buckets, checked per bucket range.
#[test]
fn wide_range_frequencies_fit_weights() {
    let mut s = SamplableSet::<usize>::with_seed(1e-3, 1e3, 17).unwrap();
    let weights = [1e-3, 0.01, 0.5, 1.0, 7.5, 120.0, 999.0, 1e3];
    for (k, &w) in weights.iter().enumerate() {
        s.insert(&k, w).unwrap();
    }
    let total: f64 = weights.iter().sum();

    let n = 400_000usize;
    let mut counts = vec![0usize; weights.len()];
    for _ in 0..n {
        counts[s.sample().unwrap().0] += 1;
    }

    for (k, &w) in weights.iter().enumerate() {
        let p = w / total;
        let freq = counts[k] as f64 / n as f64;
        let sigma = (p * (1.0 - p) / n as f64).sqrt();
        // rare keys get a floor of a few raw counts
        let tol = (6.0 * sigma).max(10.0 / n as f64);
        assert!(
            (freq - p).abs() <= tol,
            "key {k}: freq={freq:.6}, expected={p:.6}"
        );
    }
}
