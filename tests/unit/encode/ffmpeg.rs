use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: 10,
    }
}

#[test]
fn log_path_sits_next_to_the_output() {
    assert_eq!(
        encoder_log_path(Path::new("out/rain-1280x720.webm")),
        PathBuf::from("out/rain-1280x720-encoder-output.txt")
    );
    let opts = EncoderOpts::new("a/b.mov", CodecProfile::LosslessRgba).with_saved_log();
    assert_eq!(
        opts.log_path,
        Some(PathBuf::from("a/b-encoder-output.txt"))
    );
}

#[test]
fn odd_dimensions_are_rejected_for_lossy_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = StreamingSink::new(
        EncoderOpts::new(dir.path().join("x.webm"), CodecProfile::SingleStreamAlpha)
            .with_program("true"),
    );
    assert!(matches!(
        sink.begin(cfg(15, 16)),
        Err(LoopfxError::Validation(_))
    ));
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("x.mov");
    std::fs::write(&out, b"keep").unwrap();
    let mut opts = EncoderOpts::new(&out, CodecProfile::LosslessRgba);
    opts.overwrite = false;
    let mut sink = StreamingSink::new(opts);
    assert!(sink.begin(cfg(2, 2)).is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"keep");
}

#[test]
fn missing_program_reports_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = StreamingSink::new(
        EncoderOpts::new(dir.path().join("x.mov"), CodecProfile::LosslessRgba)
            .with_program("loopfx-no-such-encoder"),
    );
    let err = sink.begin(cfg(2, 2)).unwrap_err();
    assert!(matches!(err, LoopfxError::Spawn { .. }), "{err}");
}

#[cfg(unix)]
#[test]
fn clean_exit_finishes_the_stream() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = StreamingSink::new(
        EncoderOpts::new(dir.path().join("x.mov"), CodecProfile::LosslessRgba)
            .with_program("true"),
    );
    sink.begin(cfg(2, 2)).unwrap();
    sink.end().unwrap();
    assert!(sink.end().is_err());
}

#[cfg(unix)]
#[test]
fn dropping_an_unfinished_sink_reaps_the_encoder() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = StreamingSink::new(
        EncoderOpts::new(dir.path().join("x.mov"), CodecProfile::LosslessRgba)
            .with_program("true"),
    );
    sink.begin(cfg(2, 2)).unwrap();
    drop(sink);
}

#[cfg(unix)]
#[test]
fn failing_encoder_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = StreamingSink::new(
        EncoderOpts::new(dir.path().join("x.mov"), CodecProfile::LosslessRgba)
            .with_program("false"),
    );
    sink.begin(cfg(2, 2)).unwrap();
    let pushed = (0..3).try_for_each(|i| sink.push_frame(FrameIndex(i), &[0; 16]));
    let err = match pushed {
        Err(e) => e,
        Ok(()) => sink.end().unwrap_err(),
    };
    assert!(
        matches!(
            err,
            LoopfxError::PartialWrite { .. } | LoopfxError::NonZeroExit { .. }
        ),
        "{err}"
    );
}

#[cfg(unix)]
#[test]
fn write_to_exited_encoder_is_a_partial_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = StreamingSink::new(
        EncoderOpts::new(dir.path().join("x.mov"), CodecProfile::LosslessRgba)
            .with_program("true"),
    );
    sink.begin(cfg(1024, 1024)).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(200));
    let err = sink
        .push_frame(FrameIndex(0), &vec![0; 1024 * 1024 * 4])
        .unwrap_err();
    match err {
        LoopfxError::PartialWrite {
            written, expected, ..
        } => {
            assert_eq!(expected, 1024 * 1024 * 4);
            assert!(written < expected);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn saved_log_receives_encoder_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("clip.mov");
    let mut sink = StreamingSink::new(
        EncoderOpts::new(&out, CodecProfile::LosslessRgba)
            .with_program("true")
            .with_saved_log(),
    );
    sink.begin(cfg(2, 2)).unwrap();
    sink.end().unwrap();
    assert!(dir.path().join("clip-encoder-output.txt").exists());
}
