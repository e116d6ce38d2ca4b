use candle_core::Device;
use tracing::{debug, info, warn};

type Probe = (&'static str, fn() -> candle_core::Result<Device>);

/// Accelerators compiled into this build, in preference order.
fn compiled_backends() -> Vec<Probe> {
    #[allow(unused_mut)]
    let mut probes: Vec<Probe> = Vec::new();

    #[cfg(feature = "metal")]
    probes.push(("metal", || Device::new_metal(0)));

    #[cfg(feature = "cuda")]
    probes.push(("cuda", || Device::new_cuda(0)));

    probes
}

/// Picks the device the sentence encoder runs on.
///
/// Each compiled accelerator is probed once; the first that opens wins.
/// Falls back to CPU, which always succeeds.
pub fn select_device() -> Device {
    let probes = compiled_backends();
    if probes.is_empty() {
        debug!("No accelerator backend compiled, encoding on CPU");
        return Device::Cpu;
    }

    let mut failures = Vec::with_capacity(probes.len());
    for (name, open) in probes {
        match open() {
            Ok(device) => {
                info!(backend = name, "Sentence encoder using accelerator");
                return device;
            }
            Err(e) => {
                warn!(backend = name, error = %e, "Accelerator unavailable");
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    warn!(reason = %failures.join("; "), "Falling back to CPU device");
    Device::Cpu
}
