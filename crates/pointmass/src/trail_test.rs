use nalgebra::Point2;

use crate::trail::Trail;

#[test]
fn test_empty_trail() {
    let trail = Trail::with_capacity(30);

    assert!(trail.is_empty());
    assert_eq!(trail.capacity(), 30);
    assert_eq!(trail.oldest(), None);
    assert_eq!(trail.newest(), None);
}

#[test]
fn test_evicts_oldest_first() {
    let mut trail = Trail::with_capacity(3);
    for i in 0..5 {
        trail.push(Point2::new(i as f64, 0.0));
    }

    let xs: Vec<f64> = trail.points().map(|p| p.x).collect();

    assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    assert_eq!(trail.newest(), Some(Point2::new(4.0, 0.0)));
}

#[test]
fn test_length_never_exceeds_capacity() {
    let mut trail = Trail::with_capacity(30);
    for i in 0..100 {
        trail.push(Point2::new(i as f64, i as f64));
        assert!(trail.len() <= 30);
    }
    assert_eq!(trail.len(), 30);
}

#[test]
fn test_zero_capacity_records_nothing() {
    let mut trail = Trail::with_capacity(0);
    trail.push(Point2::new(1.0, 1.0));

    assert!(trail.is_empty());
}

#[test]
fn test_clear() {
    let mut trail = Trail::with_capacity(2);
    trail.push(Point2::new(1.0, 1.0));
    trail.clear();

    assert!(trail.is_empty());
    assert_eq!(trail.capacity(), 2);
}
