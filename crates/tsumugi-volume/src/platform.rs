pub mod pactl;

#[cfg(target_os = "windows")]
pub mod windows;

use crate::{VolumeBackend, VolumeError, VolumeLevel};

/// Backend for hosts with no known volume control. Every call fails with
/// [`VolumeError::Unsupported`].
#[derive(Debug, Default)]
pub struct UnsupportedBackend;

impl VolumeBackend for UnsupportedBackend {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn get_volume(&self) -> Result<VolumeLevel, VolumeError> {
        Err(VolumeError::Unsupported(std::env::consts::OS))
    }

    fn set_volume(&self, _level: VolumeLevel) -> Result<(), VolumeError> {
        Err(VolumeError::Unsupported(std::env::consts::OS))
    }
}

/// Platform-specific backend for the cross-platform volume helper.
pub fn default_backend() -> Box<dyn VolumeBackend> {
    #[cfg(target_os = "linux")]
    {
        Box::new(pactl::PactlBackend::default())
    }
    #[cfg(target_os = "windows")]
    {
        endpoint_backend()
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Box::new(UnsupportedBackend)
    }
}

/// The Core Audio endpoint backend, or [`UnsupportedBackend`] off Windows.
///
/// Both helpers use this on Windows so they behave identically.
pub fn endpoint_backend() -> Box<dyn VolumeBackend> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::EndpointVolumeBackend)
    }
    #[cfg(not(target_os = "windows"))]
    {
        Box::new(UnsupportedBackend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_backend_refuses() {
        let backend = UnsupportedBackend;
        assert!(matches!(
            backend.get_volume(),
            Err(VolumeError::Unsupported(_))
        ));
        assert!(matches!(
            backend.set_volume(VolumeLevel::from_percent(50.0)),
            Err(VolumeError::Unsupported(_))
        ));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_endpoint_backend_unsupported_off_windows() {
        assert_eq!(endpoint_backend().name(), "unsupported");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_uses_pactl() {
        assert_eq!(default_backend().name(), "pactl");
    }
}
