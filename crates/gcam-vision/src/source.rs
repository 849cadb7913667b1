//! Video source seam and device probing.
//!
//! The camera driver lives behind these traits; the loop only needs
//! "read the next frame or fail".

use tracing::{debug, info};

use gcam_models::Frame;

use crate::config::{CaptureFormat, DeviceSelector};
use crate::error::{VisionError, VisionResult};

/// Device indices tried, in order, when no explicit index is configured.
pub const PROBE_CANDIDATES: [u32; 4] = [0, 1, 2, 3];

/// An opened video source, exclusively owned by the capture loop.
pub trait VideoSource: Send {
    /// Blocking read of the next frame. Any error is fatal for the loop:
    /// no retry, no reconnect. Dropping the source releases the device.
    fn read_frame(&mut self) -> VisionResult<Frame>;
}

impl std::fmt::Debug for dyn VideoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn VideoSource")
    }
}

/// Opens video sources by device index.
pub trait SourceProvider {
    /// Open the device at `index` with the requested format, verifying it
    /// actually delivers frames.
    fn open(&self, index: u32, format: &CaptureFormat) -> VisionResult<Box<dyn VideoSource>>;
}

/// Resolve a [`DeviceSelector`] against a provider.
///
/// An explicit index either opens or fails with [`VisionError::DeviceOpen`].
/// Probing walks [`PROBE_CANDIDATES`] and returns the first device that
/// opens; exhausting the candidates is [`VisionError::NoDevice`]. Both
/// failures are fatal startup errors for the process.
pub fn open_source(
    provider: &dyn SourceProvider,
    selector: DeviceSelector,
    format: &CaptureFormat,
) -> VisionResult<(u32, Box<dyn VideoSource>)> {
    match selector {
        DeviceSelector::Index(index) => {
            let source = provider.open(index, format)?;
            info!(index, "Opened camera");
            Ok((index, source))
        }
        DeviceSelector::Probe => {
            for index in PROBE_CANDIDATES {
                info!(index, "Trying camera index");
                match provider.open(index, format) {
                    Ok(source) => {
                        info!(index, "Opened camera");
                        return Ok((index, source));
                    }
                    Err(e) => debug!(index, error = %e, "Camera index not usable"),
                }
            }
            Err(VisionError::NoDevice)
        }
    }
}
