use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = SplitMix64::new(42);
    let mut b = SplitMix64::new(42);
    for _ in 0..32 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = SplitMix64::new(1);
    let mut b = SplitMix64::new(2);
    assert_ne!(a.next_u64(), b.next_u64());
}

#[test]
fn unit_floats_stay_in_half_open_range() {
    let mut rng = SplitMix64::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn coin_flips_hit_both_sides() {
    let mut rng = SplitMix64::new(99);
    let heads = (0..1000).filter(|_| rng.next_bool()).count();
    assert!(heads > 300 && heads < 700, "heads={heads}");
}
