pub mod level;
pub mod platform;

use thiserror::Error;

pub use level::VolumeLevel;
pub use platform::{default_backend, endpoint_backend};

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("volume control is not supported on {0}")]
    Unsupported(&'static str),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("unexpected mixer output: {0:?}")]
    Output(String),

    #[error("audio endpoint error: {0}")]
    Endpoint(String),
}

/// One way of reading and writing the default output device's volume.
///
/// A single backend is picked at process start (see [`default_backend`]);
/// calls are blocking.
pub trait VolumeBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn get_volume(&self) -> Result<VolumeLevel, VolumeError>;

    fn set_volume(&self, level: VolumeLevel) -> Result<(), VolumeError>;
}

impl<B: VolumeBackend + ?Sized> VolumeBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn get_volume(&self) -> Result<VolumeLevel, VolumeError> {
        (**self).get_volume()
    }

    fn set_volume(&self, level: VolumeLevel) -> Result<(), VolumeError> {
        (**self).set_volume(level)
    }
}
