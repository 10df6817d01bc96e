use std::path::PathBuf;
use std::process::ExitStatus;

/// Convenience result type used across loopfx.
pub type LoopfxResult<T> = Result<T, LoopfxError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Configuration problems (resolution, density, ...) never surface here: [`crate::EffectContext`]
/// clamps its inputs instead. The encoder variants map one-to-one onto the ways a single
/// resolution's export can fail.
#[derive(thiserror::Error, Debug)]
pub enum LoopfxError {
    /// Invalid user-provided data or API misuse.
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoder sink misuse or unexpected encoder plumbing state.
    #[error("encode error: {0}")]
    Encode(String),

    /// The external encoder process could not be started.
    #[error("failed to spawn encoder '{program}' (is it installed and on PATH?): {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Fewer frame bytes reached the encoder's input than were produced.
    #[error("short frame write: {written} of {expected} bytes reached the encoder")]
    PartialWrite {
        /// Bytes in the frame.
        expected: usize,
        /// Bytes accepted by the channel before it failed.
        written: usize,
        /// Write error that stopped the transfer, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The external encoder ran but reported failure.
    #[error("encoder exited with status {status}: {stderr}")]
    NonZeroExit {
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured diagnostic output, or the log file path when output was redirected.
        stderr: String,
    },

    /// The temporary frame-sequence directory could not be created (batch mode).
    #[error("failed to create frame directory under '{}': {source}", .path.display())]
    Directory {
        /// Parent directory the temporary directory was requested in.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Errors when serializing or deserializing job files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoopfxError {
    /// Build a [`LoopfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LoopfxError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`LoopfxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
