//! hidapi-backed implementation of [`HidBackend`].

use crate::error::{Error, Result};
use crate::transport::{ApiVersion, ApiVersions, EndpointInfo, HidBackend, HidEndpoint};
use hidapi::{HidApi, HidDevice};
use tracing::debug;

/// Version of the HID library compiled into the `hidapi` crate.
///
/// The crate builds its backend into this binary, so the compiled and
/// runtime versions are the same build.
pub const BUNDLED_HIDAPI_VERSION: ApiVersion = ApiVersion::new(0, 14, 0);

/// Live HID access through hidapi.
pub struct HidApiBackend {
    api: HidApi,
}

impl HidApiBackend {
    pub fn new() -> Result<Self> {
        let api = HidApi::new().map_err(|e| Error::Hid(format!("hidapi init: {e}")))?;
        Ok(Self { api })
    }
}

impl HidBackend for HidApiBackend {
    fn api_versions(&self) -> ApiVersions {
        ApiVersions {
            compiled: BUNDLED_HIDAPI_VERSION,
            runtime: BUNDLED_HIDAPI_VERSION,
        }
    }

    fn enumerate(&self) -> Result<Vec<EndpointInfo>> {
        let endpoints: Vec<EndpointInfo> = self
            .api
            .device_list()
            .map(|info| EndpointInfo {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                interface_number: info.interface_number(),
                path: info.path().to_owned(),
                serial: info.serial_number().map(|s| s.to_string()),
            })
            .collect();
        debug!(count = endpoints.len(), "HID enumeration complete");
        Ok(endpoints)
    }

    fn open(&self, info: &EndpointInfo) -> Result<Box<dyn HidEndpoint>> {
        let device = self.api.open_path(&info.path).map_err(|e| {
            Error::Hid(format!(
                "open_path (VID=0x{:04X} PID=0x{:04X} path={}): {e}",
                info.vendor_id,
                info.product_id,
                info.display_path()
            ))
        })?;
        Ok(Box::new(HidApiEndpoint { device }))
    }
}

/// An open hidapi device. hidapi closes it on drop.
struct HidApiEndpoint {
    device: HidDevice,
}

impl HidEndpoint for HidApiEndpoint {
    fn report_descriptor(&self, buf: &mut [u8]) -> Result<usize> {
        self.device
            .get_report_descriptor(buf)
            .map_err(|e| Error::Hid(format!("get_report_descriptor: {e}")))
    }

    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize> {
        self.device
            .get_feature_report(buf)
            .map_err(|e| Error::Hid(format!("get_feature_report: {e}")))
    }

    fn send_feature_report(&self, data: &[u8]) -> Result<()> {
        self.device
            .send_feature_report(data)
            .map_err(|e| Error::Hid(format!("send_feature_report: {e}")))
    }
}
