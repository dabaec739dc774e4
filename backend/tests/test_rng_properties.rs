//! Range properties of derived draws
//!
//! Every supported algorithm, 10,000 consecutive draws, plus proptest over
//! seeds and bounds.

use ensemble_rng_core_rs::{InitMode, Rng, RngAlgorithm};
use proptest::prelude::*;

const DRAWS: usize = 10_000;

#[test]
fn test_uniform_double_in_unit_interval() {
    for alg in RngAlgorithm::ALL {
        let mut rng = Rng::new(alg, InitMode::SystemRandom).unwrap();
        for _ in 0..DRAWS {
            let val = rng.next_uniform_double();
            assert!(
                (0.0..1.0).contains(&val),
                "{}: next_uniform_double() produced {} outside [0.0, 1.0)",
                alg,
                val
            );
        }
    }
}

#[test]
fn test_next_int_in_bounds() {
    for alg in RngAlgorithm::ALL {
        for bound in [1u32, 2, 3, 6, 7, 100, 1000, 65_537, u32::MAX] {
            let mut rng = Rng::new(alg, InitMode::SystemRandom).unwrap();
            for _ in 0..DRAWS {
                let val = rng.next_int(bound);
                assert!(val < bound, "{}: {} out of range [0, {})", alg, val, bound);
            }
        }
    }
}

#[test]
fn test_next_int_bound_one_always_zero() {
    let mut rng = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();
    assert!((0..100).all(|_| rng.next_int(1) == 0));
}

#[test]
fn test_raw_values_within_max() {
    let mut rng = Rng::new(RngAlgorithm::Lcg31, InitMode::SystemRandom).unwrap();
    for _ in 0..DRAWS {
        assert!(u64::from(rng.forward()) <= rng.max_value());
    }
}

#[test]
fn test_each_derived_draw_advances_once() {
    let mut a = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();
    let mut b = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();

    a.next_uniform_double();
    a.next_int(10);
    b.forward();
    b.forward();

    assert_eq!(a.forward(), b.forward());
}

#[test]
fn test_uniform_double_roughly_centered() {
    let mut rng = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();
    let mean = (0..DRAWS).map(|_| rng.next_uniform_double()).sum::<f64>() / DRAWS as f64;
    assert!((mean - 0.5).abs() < 0.02, "mean {} too far from 0.5", mean);
}

proptest! {
    #[test]
    fn prop_next_int_below_bound(seed in proptest::collection::vec(any::<u8>(), 16), bound in 1u32..) {
        let mut rng = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();
        rng.set_state(&seed).unwrap();
        for _ in 0..64 {
            prop_assert!(rng.next_int(bound) < bound);
        }
    }

    #[test]
    fn prop_same_seed_same_doubles(seed in proptest::collection::vec(any::<u8>(), 4..32)) {
        let mut a = Rng::new(RngAlgorithm::Lcg31, InitMode::Default).unwrap();
        let mut b = Rng::new(RngAlgorithm::Lcg31, InitMode::Default).unwrap();
        a.set_state(&seed).unwrap();
        b.set_state(&seed).unwrap();
        for _ in 0..32 {
            let x = a.next_uniform_double();
            prop_assert!((0.0..1.0).contains(&x));
            prop_assert_eq!(x, b.next_uniform_double());
        }
    }
}
