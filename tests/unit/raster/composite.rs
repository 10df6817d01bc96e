use super::*;

fn one_px(bgra: [u8; 4]) -> FrameBgra {
    FrameBgra {
        width: 1,
        height: 1,
        data: bgra.to_vec(),
    }
}

#[test]
fn opaque_source_replaces_destination() {
    for dst in [[0, 0, 0, 0], [10, 20, 30, 40], [255, 255, 255, 255]] {
        let mut f = one_px(dst);
        blend_pixel(&mut f, 0, 0, Rgba8::new(200, 100, 50, 255));
        assert_eq!(f.data, vec![50, 100, 200, 255]);
    }
}

#[test]
fn source_over_formula_agrees_with_fast_paths() {
    let src = Rgba8::new(200, 100, 50, 255);
    assert_eq!(source_over([1, 2, 3, 4], src), [50, 100, 200, 255]);

    let dst = [10, 20, 30, 200];
    assert_eq!(source_over(dst, Rgba8::new(1, 2, 3, 0)), dst);
}

#[test]
fn transparent_source_leaves_destination_unchanged() {
    for dst in [[0, 0, 0, 0], [9, 8, 7, 0], [10, 20, 30, 40]] {
        let mut f = one_px(dst);
        blend_pixel(&mut f, 0, 0, Rgba8::new(255, 255, 255, 0));
        assert_eq!(f.data, dst.to_vec());
    }
}

#[test]
fn half_alpha_over_transparent_keeps_source_color() {
    let mut f = one_px([0, 0, 0, 0]);
    blend_pixel(&mut f, 0, 0, Rgba8::new(255, 0, 0, 128));
    assert_eq!(f.data, vec![0, 0, 255, 128]);
}

#[test]
fn half_alpha_over_opaque_mixes() {
    let mut f = one_px([0, 0, 0, 255]);
    blend_pixel(&mut f, 0, 0, Rgba8::new(255, 255, 255, 128));
    assert_eq!(f.data, vec![128, 128, 128, 255]);
}

#[test]
fn out_of_bounds_is_a_noop() {
    let mut f = FrameBgra::new(2, 2);
    for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2), (i32::MIN, i32::MAX)] {
        blend_pixel(&mut f, x, y, Rgba8::new(255, 255, 255, 255));
    }
    assert_eq!(f.coverage(), 0);
}

#[test]
fn flatten_keeps_opaque_and_swaps_to_rgba() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_over_background(&mut dst, &src, [10, 20, 30]).unwrap();
    assert_eq!(dst, vec![3, 2, 1, 255]);
}

#[test]
fn flatten_transparent_returns_background() {
    let src = vec![200u8, 200, 200, 0];
    let mut dst = vec![0u8; 4];
    flatten_over_background(&mut dst, &src, [32, 32, 32]).unwrap();
    assert_eq!(dst, vec![32, 32, 32, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_over_background(&mut dst, &[0u8; 4], [0, 0, 0]).is_err());
}

#[test]
fn background_rgb() {
    assert_eq!(Background::None.rgb(), None);
    assert_eq!(Background::default().rgb(), Some([32, 32, 32]));
    assert_eq!(Background::White.rgb(), Some([255, 255, 255]));
}
