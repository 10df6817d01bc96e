use super::*;

#[test]
fn defaults_match_the_export_preset() {
    let ctx = EffectContext::default();
    assert_eq!(ctx.resolution(), Resolution::new(1280, 720));
    assert_eq!(ctx.duration(), 12);
    assert_eq!(ctx.fps(), 30);
    assert_eq!(ctx.density(), 50);
    assert_eq!(ctx.total_frames(), 360);
}

#[test]
fn setters_clamp_out_of_range_values() {
    let ctx = EffectContext::new(64, 64)
        .with_duration(3)
        .with_fps(1000)
        .with_speed(9.0)
        .with_density(0);
    assert_eq!(ctx.duration(), 10);
    assert_eq!(ctx.fps(), 120);
    assert_eq!(ctx.speed(), 5.0);
    assert_eq!(ctx.density(), 1);

    let ctx = ctx.with_duration(99).with_fps(0).with_speed(0.0).with_density(500);
    assert_eq!(ctx.duration(), 20);
    assert_eq!(ctx.fps(), 1);
    assert_eq!(ctx.speed(), 0.1);
    assert_eq!(ctx.density(), 100);

    assert_eq!(ctx.with_speed(f32::NAN).speed(), 1.0);
}

#[test]
fn zero_dimensions_are_clamped_not_rejected() {
    let ctx = EffectContext::new(0, 0);
    assert_eq!(ctx.resolution(), Resolution::new(1, 1));
    let ctx = ctx.with_resolution(Resolution::new(0, 9));
    assert_eq!(ctx.resolution(), Resolution::new(1, 9));
}

#[test]
fn size_bounds_clamp_each_other() {
    let mut ctx = EffectContext::new(8, 8).with_size_range(2.0, 4.0);
    ctx.set_size_min(10.0);
    assert_eq!((ctx.size_min(), ctx.size_max()), (10.0, 10.0));
    ctx.set_size_max(3.0);
    assert_eq!((ctx.size_min(), ctx.size_max()), (3.0, 3.0));
    ctx.set_size_max(1000.0);
    assert_eq!(ctx.size_max(), 200.0);
    ctx.set_size_min(0.0);
    assert_eq!(ctx.size_min(), 0.1);
    assert!(ctx.size_min() <= ctx.size_max());
}

#[test]
fn total_frames_is_duration_times_fps() {
    let ctx = EffectContext::new(8, 8).with_duration(10).with_fps(30);
    assert_eq!(ctx.total_frames(), 300);
    let ctx = ctx.with_duration(12);
    assert_eq!(ctx.total_frames(), 360);
}

#[test]
fn deserialization_goes_through_the_clamps() {
    let ctx: EffectContext =
        serde_json::from_str(r#"{ "duration": 1, "fps": 500, "size_min": 9, "size_max": 2 }"#)
            .unwrap();
    assert_eq!(ctx.duration(), 10);
    assert_eq!(ctx.fps(), 120);
    assert!(ctx.size_min() <= ctx.size_max());
    assert_eq!(ctx.resolution(), Resolution::new(1280, 720));

    let json = serde_json::to_string(&ctx).unwrap();
    let back: EffectContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ctx);
}
