use candle_core::Device;
use tracing::{debug, warn};

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

/// Picks the inference device: Metal, then CUDA (when compiled in), else CPU.
///
/// GPU initialisation failures are logged and skipped.
pub fn select_device() -> Device {
    #[allow(unused_mut)]
    let mut skipped: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Embedding on Metal GPU");
            return device;
        }
        Err(e) => {
            warn!(error = %e, "Metal device unavailable");
            skipped.push(format!("metal: {e}"));
        }
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Embedding on CUDA GPU");
            return device;
        }
        Err(e) => {
            warn!(error = %e, "CUDA device unavailable");
            skipped.push(format!("cuda: {e}"));
        }
    }

    if skipped.is_empty() {
        debug!("No GPU backend compiled, embedding on CPU");
    } else {
        warn!(reason = %skipped.join("; "), "Falling back to CPU device");
    }

    Device::Cpu
}
