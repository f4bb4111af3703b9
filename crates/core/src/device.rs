//! Device discovery: find and open the brightness control endpoint.

use crate::descriptor::is_brightness_control;
use crate::error::{Error, Result};
use crate::transport::{EndpointInfo, HidBackend, HidEndpoint};
use crate::{pids, APPLE_VID};
use tracing::{debug, info, warn};

/// Whether an enumerated endpoint belongs to a Pro Display XDR.
///
/// All four of the display's interfaces pass this check; the descriptor
/// fingerprint decides which one controls brightness.
pub fn is_pro_display_xdr(info: &EndpointInfo) -> bool {
    info.vendor_id == APPLE_VID && info.product_id == pids::PRO_DISPLAY_XDR
}

/// Enumerate the Pro Display XDR endpoints, in enumeration order.
pub fn discover_endpoints(backend: &dyn HidBackend) -> Result<Vec<EndpointInfo>> {
    debug!("Starting HID device enumeration");
    let candidates: Vec<EndpointInfo> = backend
        .enumerate()?
        .into_iter()
        .filter(is_pro_display_xdr)
        .collect();
    debug!(count = candidates.len(), "Pro Display XDR endpoints found");
    Ok(candidates)
}

/// Open the brightness control endpoint.
///
/// Candidates are opened one at a time. Rejected candidates are closed before
/// the next one is opened, and the scan stops at the first match. Open and
/// descriptor failures are logged and skipped.
pub fn locate(backend: &dyn HidBackend) -> Result<Box<dyn HidEndpoint>> {
    let candidates = discover_endpoints(backend)?;
    let mut open_failures = 0usize;

    for info in &candidates {
        let path = info.display_path();
        let endpoint = match backend.open(info) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(path = %path, "failed to open device: {e}");
                open_failures += 1;
                continue;
            }
        };

        if !is_brightness_control(endpoint.as_ref(), &path) {
            // Dropping the handle closes it.
            drop(endpoint);
            continue;
        }

        info!(
            path = %path,
            interface = info.interface_number,
            "Found Pro Display XDR brightness control endpoint"
        );
        return Ok(endpoint);
    }

    let mut detail = String::from("Apple Pro Display XDR brightness control device not found");
    if open_failures > 0 {
        detail.push_str(&format!(
            " ({open_failures} of {} candidate endpoint(s) could not be opened)",
            candidates.len()
        ));
    }
    Err(Error::DeviceNotFound(detail))
}

/// Outcome of probing one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Descriptor matches the brightness control fingerprint.
    BrightnessControl,
    /// Opened and fingerprinted, but not the control endpoint.
    Other,
    /// Could not be opened.
    Unavailable,
}

/// One row of a [`survey`].
#[derive(Debug, Clone)]
pub struct Probe {
    pub info: EndpointInfo,
    pub status: ProbeStatus,
}

/// Probe every Pro Display XDR endpoint without stopping at the first match.
///
/// Each handle is closed before the next one is opened.
pub fn survey(backend: &dyn HidBackend) -> Result<Vec<Probe>> {
    let candidates = discover_endpoints(backend)?;
    let mut probes = Vec::with_capacity(candidates.len());

    for info in candidates {
        let path = info.display_path();
        let status = match backend.open(&info) {
            Ok(endpoint) => {
                if is_brightness_control(endpoint.as_ref(), &path) {
                    ProbeStatus::BrightnessControl
                } else {
                    ProbeStatus::Other
                }
            }
            Err(e) => {
                warn!(path = %path, "failed to open device: {e}");
                ProbeStatus::Unavailable
            }
        };
        probes.push(Probe { info, status });
    }

    Ok(probes)
}
