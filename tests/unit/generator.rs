use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = Generator::new(98_765);
    let mut b = Generator::new(98_765);
    for _ in 0..64 {
        assert_eq!(a.uniform01().to_bits(), b.uniform01().to_bits());
        assert_eq!(a.randint(-5, 5), b.randint(-5, 5));
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = Generator::new(1);
    let mut b = Generator::new(2);
    let xs: Vec<u64> = (0..8).map(|_| a.uniform01().to_bits()).collect();
    let ys: Vec<u64> = (0..8).map(|_| b.uniform01().to_bits()).collect();
    assert_ne!(xs, ys);
}

#[test]
fn for_frame_offsets_the_base_seed() {
    let mut a = Generator::for_frame(77_771, 5);
    let mut b = Generator::new(77_776);
    assert_eq!(a.randint(0, 1000), b.randint(0, 1000));
}

#[test]
fn values_stay_in_bounds() {
    let mut g = Generator::new(7);
    for _ in 0..1000 {
        let u = g.uniform01();
        assert!((0.0..1.0).contains(&u));
        let i = g.randint(-1, 1);
        assert!((-1..=1).contains(&i));
        let r = g.range(2.0, 3.0);
        assert!((2.0..3.0).contains(&r));
    }
}

#[test]
fn degenerate_bounds_do_not_panic() {
    let mut g = Generator::new(7);
    assert_eq!(g.randint(4, 4), 4);
    let swapped = g.randint(10, 1);
    assert!((1..=10).contains(&swapped));
    assert_eq!(g.range(5.0, 1.0), 5.0);
    assert!(g.pick::<u8>(&[]).is_none());
    assert_eq!(g.pick(&[9]), Some(&9));
}
