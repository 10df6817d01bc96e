use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LoopfxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LoopfxError::encode("x").to_string().contains("encode error:"));
    assert!(
        LoopfxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LoopfxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn spawn_names_program_and_keeps_source() {
    use std::error::Error as _;

    let err = LoopfxError::Spawn {
        program: "ffmpeg".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    assert!(err.to_string().contains("'ffmpeg'"));
    assert!(err.source().is_some());
}

#[test]
fn partial_write_reports_byte_counts() {
    let err = LoopfxError::PartialWrite {
        expected: 16,
        written: 4,
        source: None,
    };
    assert!(err.to_string().contains("4 of 16 bytes"));
}

#[test]
fn directory_mentions_parent_path() {
    let err = LoopfxError::Directory {
        path: PathBuf::from("/nowhere/frames"),
        source: std::io::Error::other("denied"),
    };
    assert!(err.to_string().contains("/nowhere/frames"));
}

#[cfg(unix)]
#[test]
fn non_zero_exit_includes_stderr() {
    use std::os::unix::process::ExitStatusExt as _;

    let err = LoopfxError::NonZeroExit {
        status: ExitStatus::from_raw(1 << 8),
        stderr: "Unknown encoder".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("encoder exited with status"));
    assert!(msg.contains("Unknown encoder"));
}
