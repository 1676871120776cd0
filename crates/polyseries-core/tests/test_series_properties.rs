//! Property-based tests for the series and domain kernels.

use polyseries_core::prelude::*;
use proptest::prelude::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn trim_seq_is_idempotent(c in prop::collection::vec(-1e6f64..1e6, 1..20)) {
        let once = trim_seq(&c).to_vec();
        prop_assert_eq!(trim_seq(&once), &once[..]);
    }

    #[test]
    fn trim_seq_never_lengthens(c in prop::collection::vec(-1e6f64..1e6, 1..20)) {
        let t = trim_seq(&c);
        prop_assert!(!t.is_empty());
        prop_assert!(t.len() <= c.len());
    }

    #[test]
    fn get_domain_encloses_every_point(x in prop::collection::vec(-1e3f64..1e3, 1..30)) {
        let d = get_domain(&x).unwrap();
        for &v in &x {
            prop_assert!(d[0] <= v && v <= d[1]);
        }
    }

    #[test]
    fn map_domain_round_trips(x in prop::collection::vec(-100.0f64..100.0, 1..20)) {
        let old = [-1.0, 1.0];
        let new = [2.0, 7.5];
        let mapped = map_domain(&x, &old, &new).unwrap();
        let back = map_domain(&mapped, &new, &old).unwrap();
        for (a, b) in x.iter().zip(&back) {
            prop_assert!(close(*a, *b, 1e-12));
        }
    }

    #[test]
    fn map_parms_sends_endpoints(
        a in -50.0f64..50.0,
        gap in 0.5f64..10.0,
        c in -50.0f64..50.0,
        d in -50.0f64..50.0,
    ) {
        let old = [a, a + gap];
        let new = [c, d];
        let (off, scl) = map_parms(&old, &new).unwrap();
        prop_assert!(close(off + scl * old[0], new[0], 1e-10));
        prop_assert!(close(off + scl * old[1], new[1], 1e-10));
    }

    #[test]
    fn add_then_sub_preserves_values(
        c1 in prop::collection::vec(-100.0f64..100.0, 1..8),
        c2 in prop::collection::vec(-100.0f64..100.0, 1..8),
    ) {
        let basis = PowerBasis;
        let s = add(&c1, &c2).unwrap();
        let back = sub(&s, &c2).unwrap();
        for x in [-0.9, -0.3, 0.2, 0.7] {
            let lhs = basis.eval(x, &back);
            let rhs = basis.eval(x, &c1);
            prop_assert!(close(lhs, rhs, 1e-9));
        }
    }

    #[test]
    fn div_reconstructs_dividend(
        c1 in prop::collection::vec(-10.0f64..10.0, 3..9),
        mut c2 in prop::collection::vec(-10.0f64..10.0, 2..5),
    ) {
        // Keep the divisor's leading coefficient away from zero.
        let n = c2.len();
        c2[n - 1] = c2[n - 1].signum() * (c2[n - 1].abs() + 1.0);
        let basis = PowerBasis;
        let (q, r) = div(&basis, &c1, &c2).unwrap();
        let back = add(&basis.mul(&q, &c2), &r).unwrap();
        for x in [-0.8, -0.1, 0.4, 0.9] {
            prop_assert!(close(basis.eval(x, &back), basis.eval(x, &c1), 1e-8));
        }
    }

    #[test]
    fn from_roots_vanishes_at_roots(
        roots in prop::collection::vec(-1.0f64..1.0, 1..6),
    ) {
        let power = PowerBasis;
        let cheb = ChebyshevBasis;
        let p = from_roots(&power, &roots);
        let c = from_roots(&cheb, &roots);
        prop_assert_eq!(p.len(), roots.len() + 1);
        for &r in &roots {
            prop_assert!(power.eval(r, &p).abs() < 1e-8);
            prop_assert!(cheb.eval(r, &c).abs() < 1e-8);
        }
    }

    #[test]
    fn pow_matches_repeated_eval(
        c in prop::collection::vec(-2.0f64..2.0, 1..4),
        e in 0usize..5,
    ) {
        let basis = PowerBasis;
        let p = pow(&basis, &c, e, None).unwrap();
        for x in [-0.7, 0.0, 0.6] {
            let expected = basis.eval(x, &c).powi(e as i32);
            prop_assert!(close(basis.eval(x, &p), expected, 1e-9));
        }
    }
}
