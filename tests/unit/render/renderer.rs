use super::*;

fn ctx() -> EffectContext {
    EffectContext::new(40, 24).with_duration(10).with_fps(3)
}

fn ready(name: &str) -> Renderer {
    let mut r = Renderer::new(ctx());
    r.set_effect(name);
    r.setup();
    r
}

#[test]
fn unconfigured_renderer_ignores_render_calls() {
    let mut r = Renderer::new(ctx());
    assert_eq!(r.state(), RendererState::Unconfigured);
    r.render_next_frame();
    assert_eq!(r.cursor(), 0);
    assert_eq!(r.frame().coverage(), 0);
    assert_eq!(r.particle_count(), 0);
}

#[test]
fn setup_falls_back_to_golden_lights() {
    let r = ready("does-not-exist");
    assert!(r.is_ready());
    assert_eq!(r.effect_kind(), Some(EffectKind::GoldenLights));
    assert_eq!(r.effect_name(), "does-not-exist");
    assert!(r.particle_count() >= 10);
}

#[test]
fn cursor_wraps_after_a_full_loop() {
    let mut r = ready("rain");
    let total = r.context().total_frames();
    for _ in 0..total - 1 {
        r.render_next_frame();
    }
    assert_eq!(r.cursor(), total - 1);
    r.render_next_frame();
    assert_eq!(r.cursor(), 0);
    assert_eq!(r.frame().data.len(), 40 * 24 * 4);
}

#[test]
fn identical_renderers_stay_in_lockstep() {
    for kind in EffectKind::ALL {
        let mut a = ready(kind.name());
        let mut b = ready(kind.name());
        for _ in 0..a.context().total_frames() {
            a.render_next_frame();
            b.render_next_frame();
            assert_eq!(a.frame(), b.frame(), "{kind}");
        }
    }
}

#[test]
fn replacing_context_requires_setup_again() {
    let mut r = ready("snow");
    r.render_next_frame();
    r.set_context(EffectContext::new(10, 6));
    assert_eq!(r.state(), RendererState::Unconfigured);
    assert_eq!(r.frame().resolution().to_string(), "10x6");
    assert_eq!(r.cursor(), 0);
    r.setup();
    r.render_next_frame();
    assert_eq!(r.frame().data.len(), 10 * 6 * 4);
}

#[test]
fn speed_changes_keep_effect_state() {
    let mut r = ready("fireflies");
    r.render_next_frame();
    let count = r.particle_count();
    r.set_speed(2.0);
    assert!(r.is_ready());
    assert_eq!(r.particle_count(), count);
    assert_eq!(r.context().speed(), 2.0);
    assert_eq!(r.cursor(), 1);
}

#[test]
fn seek_matches_sequential_output_for_index_derived_effects() {
    let mut seq = ready("white-noise");
    for _ in 0..7 {
        seq.render_next_frame();
    }
    let mut jumped = ready("white-noise");
    jumped.seek(6).unwrap();
    jumped.render_next_frame();
    assert_eq!(seq.frame(), jumped.frame());
    assert_eq!(jumped.cursor(), 7);
}

#[test]
fn seek_is_rejected_for_incremental_effects_and_before_setup() {
    let mut r = ready("golden-lights");
    assert!(matches!(r.seek(3), Err(LoopfxError::Validation(_))));
    let mut fresh = Renderer::new(ctx());
    assert!(fresh.seek(0).is_err());
}
