use super::*;

// --- frame_for_time ---

#[test]
fn floors_time_times_rate() {
    assert_eq!(frame_for_time(0.0, 25.0, 100), 0);
    assert_eq!(frame_for_time(0.039, 25.0, 100), 0);
    assert_eq!(frame_for_time(0.04, 25.0, 100), 1);
    assert_eq!(frame_for_time(1.0, 25.0, 100), 25);
    assert_eq!(frame_for_time(2.5, 30.0, 100), 75);
}

#[test]
fn clamps_past_end_to_last_frame() {
    assert_eq!(frame_for_time(10.0, 25.0, 100), 99);
    assert_eq!(frame_for_time(1.0e9, 25.0, 100), 99);
    assert_eq!(frame_for_time(f64::INFINITY, 25.0, 100), 99);
}

#[test]
fn negative_and_nan_times_map_to_first_frame() {
    assert_eq!(frame_for_time(-3.0, 25.0, 100), 0);
    assert_eq!(frame_for_time(f64::NAN, 25.0, 100), 0);
}

#[test]
fn empty_payload_maps_to_zero() {
    assert_eq!(frame_for_time(5.0, 25.0, 0), 0);
}

#[test]
fn single_frame_always_zero() {
    assert_eq!(frame_for_time(0.0, 25.0, 1), 0);
    assert_eq!(frame_for_time(100.0, 25.0, 1), 0);
}

#[test]
fn monotonic_and_in_range_over_time_sweep() {
    let count = 250;
    let mut prev = 0;
    for step in 0..20_000 {
        let t = f64::from(step) * 0.001;
        let idx = frame_for_time(t, 29.97, count);
        assert!(idx >= prev, "index went backwards at t={t}");
        assert!(idx < count);
        prev = idx;
    }
    assert_eq!(prev, count - 1);
}

// --- FrameIndex ---

#[test]
fn starts_at_frame_zero() {
    let fi = FrameIndex::new(25.0, 10);
    assert_eq!(fi.current_frame(), 0);
    assert_eq!(fi.frame_count(), 10);
}

#[test]
fn advance_reports_only_changes() {
    let mut fi = FrameIndex::new(25.0, 10);
    assert_eq!(fi.advance(0.01), None);
    assert_eq!(fi.advance(0.05), Some(1));
    assert_eq!(fi.advance(0.06), None);
    assert_eq!(fi.advance(0.079), None);
    assert_eq!(fi.advance(0.08), Some(2));
    assert_eq!(fi.current_frame(), 2);
}

#[test]
fn advance_tolerates_backward_seek() {
    let mut fi = FrameIndex::new(25.0, 100);
    assert_eq!(fi.advance(2.0), Some(50));
    assert_eq!(fi.advance(0.5), Some(12));
    assert_eq!(fi.current_frame(), 12);
}

#[test]
fn advance_holds_last_frame_past_end() {
    let mut fi = FrameIndex::new(25.0, 10);
    assert_eq!(fi.advance(100.0), Some(9));
    assert_eq!(fi.advance(200.0), None);
    assert_eq!(fi.current_frame(), 9);
}

#[test]
fn advance_records_last_time() {
    let mut fi = FrameIndex::new(25.0, 10);
    fi.advance(0.01);
    assert!((fi.last_time() - 0.01).abs() < f64::EPSILON);
}
