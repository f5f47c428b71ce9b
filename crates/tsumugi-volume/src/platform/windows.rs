use tracing::debug;

use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{eConsole, eRender, IMMDeviceEnumerator, MMDeviceEnumerator};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
};

use crate::{VolumeBackend, VolumeError, VolumeLevel};

/// Master volume of the default render endpoint via Core Audio.
#[derive(Debug, Default)]
pub struct EndpointVolumeBackend;

impl VolumeBackend for EndpointVolumeBackend {
    fn name(&self) -> &'static str {
        "core-audio"
    }

    fn get_volume(&self) -> Result<VolumeLevel, VolumeError> {
        with_endpoint(|endpoint| {
            let scalar = unsafe { endpoint.GetMasterVolumeLevelScalar()? };
            debug!(scalar, "read endpoint volume");
            Ok(VolumeLevel::from_scalar(scalar))
        })
    }

    fn set_volume(&self, level: VolumeLevel) -> Result<(), VolumeError> {
        with_endpoint(|endpoint| {
            debug!(scalar = level.as_scalar(), "setting endpoint volume");
            unsafe { endpoint.SetMasterVolumeLevelScalar(level.as_scalar(), std::ptr::null()) }
        })
    }
}

/// Balances a successful `CoInitializeEx` on this thread.
struct ComGuard;

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

fn with_endpoint<T>(
    f: impl FnOnce(&IAudioEndpointVolume) -> windows::core::Result<T>,
) -> Result<T, VolumeError> {
    unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
        .ok()
        .map_err(endpoint_error)?;
    let _com = ComGuard;

    // Interfaces must be released before the guard uninitializes COM.
    let result = (|| {
        let enumerator: IMMDeviceEnumerator =
            unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)? };
        let device = unsafe { enumerator.GetDefaultAudioEndpoint(eRender, eConsole)? };
        let endpoint: IAudioEndpointVolume = unsafe { device.Activate(CLSCTX_ALL, None)? };
        f(&endpoint)
    })();

    result.map_err(endpoint_error)
}

fn endpoint_error(err: windows::core::Error) -> VolumeError {
    VolumeError::Endpoint(err.message().to_string())
}
