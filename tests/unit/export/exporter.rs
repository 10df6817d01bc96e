use super::*;
use crate::encode::sink::InMemorySink;

#[test]
fn kebab_case_collapses_separators() {
    assert_eq!(to_kebab_case("Golden Lights"), "golden-lights");
    assert_eq!(to_kebab_case("  Film -- Dust!! "), "film-dust");
    assert_eq!(to_kebab_case("Snow"), "snow");
    assert_eq!(to_kebab_case("4K_Rain v2"), "4k-rain-v2");
    assert_eq!(to_kebab_case("***"), "");
}

#[test]
fn output_names_follow_effect_size_and_container() {
    assert_eq!(
        output_file_name(
            EffectKind::WhiteNoise,
            Resolution::new(720, 1280),
            CodecProfile::DualStreamAlpha
        ),
        "white-noise-720x1280.webm"
    );
}

#[test]
fn render_loop_emits_every_frame_and_closes_the_seam() {
    let ctx = EffectContext::new(24, 16).with_duration(10).with_fps(2);
    let mut sink = InMemorySink::new();
    let frames = render_loop(&ctx, "golden-lights", &mut sink).unwrap();
    assert_eq!(frames, 20);
    assert!(sink.is_finished());
    let out = sink.frames();
    assert_eq!(out.len(), 20);
    assert!(out.iter().enumerate().all(|(i, (idx, _))| idx.0 == i as u64));
    // cross = min(fps, total / 2) = 2
    assert_eq!(out[19].1, out[1].1);
}

#[test]
fn render_loop_head_matches_a_plain_renderer() {
    let ctx = EffectContext::new(24, 16).with_duration(10).with_fps(3);
    let mut sink = InMemorySink::new();
    render_loop(&ctx, "rain", &mut sink).unwrap();

    let mut renderer = Renderer::new(ctx.clone());
    renderer.set_effect("rain");
    renderer.setup();
    let tail_start = ctx.total_frames() - 3;
    for i in 0..tail_start {
        renderer.render_next_frame();
        assert_eq!(renderer.frame().data, sink.frames()[i as usize].1, "frame {i}");
    }
}

#[test]
fn thread_pool_rejects_zero_threads() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}
