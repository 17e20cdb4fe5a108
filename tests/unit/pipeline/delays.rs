use super::*;

#[test]
fn first_and_last_frames_are_held() {
    assert_eq!(frame_delays(5, 12), vec![100, 8, 8, 8, 80]);
    assert_eq!(frame_delays(2, 12), vec![100, 80]);
}

#[test]
fn single_frame_takes_the_last_frame_hold() {
    assert_eq!(frame_delays(1, 12), vec![80]);
    assert_eq!(frame_delays(1, 1), vec![1000]);
}

#[test]
fn regular_delay_truncates() {
    assert_eq!(frame_delays(3, 3), vec![100, 33, 330]);
    assert_eq!(frame_delays(3, 100), vec![100, 1, 10]);
    assert_eq!(frame_delays(3, 1), vec![100, 100, 1000]);
}

#[test]
fn no_frames_no_delays() {
    assert!(frame_delays(0, 12).is_empty());
}
