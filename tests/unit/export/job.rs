use super::*;

#[test]
fn defaults_cover_the_standard_sizes() {
    let job = ExportJob::default();
    assert_eq!(job.effect, "golden-lights");
    assert_eq!(job.resolutions.len(), 4);
    assert_eq!(job.mode, DeliveryMode::Streaming);
    assert_eq!(job.codec, CodecProfile::SingleStreamAlpha);
    assert_eq!(job.frame_pattern, "frame_%05d.png");
    assert!(job.parallel);
    job.validate().unwrap();
}

#[test]
fn partial_json_fills_in_defaults_and_clamps_context() {
    let job: ExportJob = serde_json::from_str(
        r#"{
            "effect": "snow",
            "context": { "duration": 99, "density": 0, "speed": 2.0 },
            "resolutions": ["640x360", "360X640"],
            "codec": "lossless-rgba",
            "mode": "batch"
        }"#,
    )
    .unwrap();
    assert_eq!(job.effect_kind(), EffectKind::Snow);
    assert_eq!(job.context.duration(), 20);
    assert_eq!(job.context.density(), 1);
    assert_eq!(job.context.speed(), 2.0);
    assert_eq!(job.context.fps(), 30);
    assert_eq!(job.resolutions[1], Resolution::new(360, 640));
    assert_eq!(job.mode, DeliveryMode::Batch);
    assert_eq!(job.encoder, PathBuf::from("ffmpeg"));
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    assert!(serde_json::from_str::<ExportJob>(r#"{"efect": "rain"}"#).is_err());
    assert!(serde_json::from_str::<ExportJob>(r#"{"resolutions": ["0x10"]}"#).is_err());
    assert!(serde_json::from_str::<ExportJob>(r#"{"mode": "pipe"}"#).is_err());
}

#[test]
fn validate_catches_unusable_jobs() {
    let mut job = ExportJob {
        resolutions: vec![],
        ..ExportJob::default()
    };
    assert!(job.validate().is_err());

    job.resolutions = vec![Resolution::new(8, 8), Resolution::new(8, 8)];
    assert!(job.validate().is_err());

    job.resolutions = vec![Resolution::new(8, 8)];
    job.threads = Some(0);
    assert!(job.validate().is_err());

    job.threads = Some(2);
    job.frame_pattern = "sub/frame_%05d.png".into();
    assert!(job.validate().is_err());

    job.frame_pattern = "frame.png".into();
    assert!(job.validate().is_err());
}

#[test]
fn output_path_uses_kebab_title_and_profile_extension() {
    let job = ExportJob {
        effect: "black-noise".into(),
        out_dir: PathBuf::from("renders"),
        codec: CodecProfile::LosslessRgba,
        ..ExportJob::default()
    };
    assert_eq!(
        job.output_path(Resolution::new(1920, 1080)),
        PathBuf::from("renders/grain-noise-1920x1080.mov")
    );
    let ctx = job.context_for(Resolution::new(720, 1280));
    assert_eq!(ctx.width(), 720);
    assert_eq!(ctx.duration(), job.context.duration());
}

#[test]
fn job_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.json");
    let job = ExportJob {
        effect: "fireflies".into(),
        threads: Some(3),
        ..ExportJob::default()
    };
    std::fs::write(&path, serde_json::to_string_pretty(&job).unwrap()).unwrap();
    assert_eq!(ExportJob::from_path(&path).unwrap(), job);

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        ExportJob::from_path(&path),
        Err(LoopfxError::Serde(_))
    ));
    assert!(ExportJob::from_path(&dir.path().join("missing.json")).is_err());
}

#[test]
fn delivery_mode_parses_case_insensitively() {
    assert_eq!("Batch".parse::<DeliveryMode>().unwrap(), DeliveryMode::Batch);
    assert_eq!(DeliveryMode::Streaming.to_string(), "streaming");
    assert!("both".parse::<DeliveryMode>().is_err());
}
