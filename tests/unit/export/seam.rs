use super::*;

#[test]
fn crossfade_is_one_second_capped_at_half_the_clip() {
    assert_eq!(crossfade_len(30, 360), 30);
    assert_eq!(crossfade_len(30, 300), 30);
    assert_eq!(crossfade_len(120, 100), 50);
    assert_eq!(crossfade_len(1, 10), 1);
    assert_eq!(crossfade_len(30, 1), 1);
}

#[test]
fn weights_run_from_one_step_to_exactly_one() {
    assert_eq!(tail_weight(0, 30), 1.0 / 30.0);
    assert_eq!(tail_weight(29, 30), 1.0);
    assert_eq!(tail_weight(0, 1), 1.0);
}

#[test]
fn blend_rounds_per_channel() {
    let mut dst = [0u8; 4];
    blend_toward(&mut dst, &[0, 100, 255, 10], &[255, 200, 0, 11], 0.5).unwrap();
    assert_eq!(dst, [128, 150, 128, 11]);

    blend_toward(&mut dst, &[0, 0, 0, 0], &[30, 60, 90, 120], 1.0 / 30.0).unwrap();
    assert_eq!(dst, [1, 2, 3, 4]);
}

#[test]
fn blend_at_full_weight_copies_first() {
    let first = [7u8, 8, 9, 10];
    let mut dst = [0u8; 4];
    blend_toward(&mut dst, &[200, 201, 202, 203], &first, 1.0).unwrap();
    assert_eq!(dst, first);
    assert!(blend_toward(&mut dst, &[0; 3], &first, 0.5).is_err());
}

#[test]
fn last_frame_equals_frame_cross_minus_one() {
    let total = 20;
    let mut seam = SeamBlender::new(total, 4);
    assert_eq!(seam.cross(), 4);
    assert_eq!(seam.tail_start(), 16);

    let mut out = Vec::new();
    for i in 0..total {
        let frame = vec![(i * 10) as u8; 8];
        out.push(seam.process(i, &frame).unwrap().to_vec());
    }
    assert_eq!(out[19], out[3]);
    assert_eq!(out[15], vec![150; 8]);
    // k = 0, t = 1/4: round(0.75 * 160 + 0.25 * 0)
    assert_eq!(out[16], vec![120; 8]);
}

#[test]
fn frames_must_arrive_in_order() {
    let mut seam = SeamBlender::new(10, 2);
    assert!(seam.process(1, &[0; 4]).is_err());
    seam.process(0, &[0; 4]).unwrap();
    assert!(seam.process(0, &[0; 4]).is_err());
}
