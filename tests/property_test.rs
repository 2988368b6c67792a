use rand::prelude::*;
use rand::rngs::StdRng;
use rsmhg::prelude::*;

#[test]
fn pvalue_stays_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..50 {
        let n_total = rng.gen_range(2..400usize);
        let b_total = rng.gen_range(1..=n_total);
        let max_size = rng.gen_range(1..600usize);
        // Log-uniform thresholds from 1e-12 up to 1.
        let min_hgt = 10f64.powf(rng.gen_range(-12.0..0.0));

        let p = mhg_pvalue(b_total, n_total, max_size, min_hgt)
            .unwrap()
            .to_f64();
        assert!(
            p >= -1e-12 && p <= 1.0 + 1e-12,
            "p = {p} for B={b_total} N={n_total} max_size={max_size} min_hgt={min_hgt:e}"
        );
    }
}

#[test]
fn pvalue_monotone_in_threshold() {
    let mut rng = StdRng::seed_from_u64(999);

    for _ in 0..20 {
        let n_total = rng.gen_range(20..300usize);
        let b_total = rng.gen_range(1..=n_total / 2);

        // A loosening threshold cannot make triggering less likely.
        let mut prev = 0.0f64;
        for exp in (1..=10).rev() {
            let min_hgt = 10f64.powi(-exp);
            let p = mhg_pvalue(b_total, n_total, 1000, min_hgt)
                .unwrap()
                .to_f64();
            assert!(
                p + 1e-12 >= prev,
                "p({min_hgt:e}) = {p} < p(tighter) = {prev} for B={b_total} N={n_total}"
            );
            prev = p;
        }
    }
}

#[test]
fn pvalue_dominates_pointwise_threshold() {
    // The event "some prefix tail <= min_hgt" contains the event for any
    // single prefix, so the p-value is at least the best single-prefix
    // probability of the most enriched start: a success-first ordering has
    // first-prefix tail B/N, so at min_hgt = B/N the p-value must be at
    // least B/N. Power-of-two denominators keep the threshold exact.
    for &(b, n) in &[(1usize, 2usize), (1, 4), (3, 8), (5, 16)] {
        let ratio = b as f64 / n as f64;
        let p = mhg_pvalue(b, n, 1000, ratio).unwrap().to_f64();
        assert!(p + 1e-12 >= ratio, "p = {p} < {ratio} for B={b} N={n}");
    }
}

#[test]
fn pmf_support_sums_to_one_random_params() {
    let mut rng = StdRng::seed_from_u64(777);

    for _ in 0..100 {
        let n_total = rng.gen_range(1..2000i64);
        let b_total = rng.gen_range(0..=n_total);
        let n = rng.gen_range(0..=n_total);

        let sum: f64 = (0..=n)
            .map(|i| hypergeometric_pmf(i, n, b_total, n_total))
            .sum();
        assert!(
            (sum - 1.0).abs() < 1e-9,
            "sum = {sum} for n={n} B={b_total} N={n_total}"
        );
    }
}

#[test]
fn fisher_tails_bounded_and_consistent() {
    let mut rng = StdRng::seed_from_u64(4242);

    for _ in 0..100 {
        let n_total = rng.gen_range(2..500u64);
        let b_total = rng.gen_range(0..=n_total);
        let n = rng.gen_range(0..=n_total);
        let lo = (n + b_total).saturating_sub(n_total);
        let hi = n.min(b_total);
        let b = rng.gen_range(lo..=hi);

        let t = fisher_exact_test(b, n, b_total, n_total).unwrap();
        for tail in [t.left, t.right, t.two_tailed] {
            assert!((0.0..=1.0).contains(&tail), "tail = {tail}");
        }
        // Both one-sided tails include the observed outcome.
        let pmf = hypergeometric_pmf(b as i64, n as i64, b_total as i64, n_total as i64);
        assert!(t.left + 1e-12 >= pmf);
        assert!(t.right + 1e-12 >= pmf);
        assert!(t.two_tailed + 1e-12 >= pmf);
    }
}
