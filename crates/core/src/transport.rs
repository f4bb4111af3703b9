//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that the hidapi backend and
//! mock devices share the same interface. An open endpoint is closed by
//! dropping it.

use crate::error::{Error, Result};
use std::ffi::CString;
use std::fmt;
use tracing::debug;

/// One entry of the enumeration result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface_number: i32,
    pub path: CString,
    pub serial: Option<String>,
}

impl EndpointInfo {
    /// Path rendered for logs and listings.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Version triple of the HID library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// HID library version the backend was built against and the one it runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersions {
    pub compiled: ApiVersion,
    pub runtime: ApiVersion,
}

/// An open HID endpoint.
///
/// Buffers passed to the feature report calls start with the report ID.
pub trait HidEndpoint {
    /// Copy up to `buf.len()` bytes of the report descriptor into `buf`.
    fn report_descriptor(&self, buf: &mut [u8]) -> Result<usize>;

    /// Read a feature report. `buf[0]` holds the requested report ID on entry.
    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize>;

    /// Write a feature report.
    fn send_feature_report(&self, data: &[u8]) -> Result<()>;
}

/// Abstraction over HID enumeration and open.
pub trait HidBackend {
    /// Versions used by [`check_api_version`].
    fn api_versions(&self) -> ApiVersions;

    /// Snapshot every HID endpoint currently connected.
    fn enumerate(&self) -> Result<Vec<EndpointInfo>>;

    /// Open one endpoint from a previous enumeration.
    fn open(&self, info: &EndpointInfo) -> Result<Box<dyn HidEndpoint>>;
}

/// Refuse to talk to devices when the HID library major versions differ.
pub fn check_api_version(versions: ApiVersions) -> Result<()> {
    if versions.compiled.major != versions.runtime.major {
        return Err(Error::VersionMismatch {
            compiled: versions.compiled,
            runtime: versions.runtime,
        });
    }
    debug!(
        compiled = %versions.compiled,
        runtime = %versions.runtime,
        "HID API version check passed"
    );
    Ok(())
}
