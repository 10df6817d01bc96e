use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: 30,
    }
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &[1; 8]).unwrap();
    sink.push_frame(FrameIndex(1), &[2; 8]).unwrap();
    sink.end().unwrap();
    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].1, vec![2; 8]);
}

#[test]
fn out_of_order_and_wrong_size_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &[0; 8]).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &[0; 8]).is_err());
    assert!(sink.push_frame(FrameIndex(2), &[0; 8]).is_err());
    assert!(matches!(
        sink.push_frame(FrameIndex(4), &[0; 7]),
        Err(LoopfxError::Validation(_))
    ));
}

#[test]
fn push_before_begin_and_zero_fps_fail() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &[0; 8]).is_err());
    assert!(sink.end().is_err());
    let bad = SinkConfig { fps: 0, ..cfg() };
    assert!(sink.begin(bad).is_err());
}
