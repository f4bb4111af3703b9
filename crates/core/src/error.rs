//! Error types for xdr-brightness-core.

use crate::transport::ApiVersion;
use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Value outside its declared domain. Rejected before any device I/O.
    #[error("invalid {field} value {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Brightness token that is neither an integer nor `<int>%`.
    #[error("invalid brightness value '{0}': must be an integer or a percentage such as \"50%\"")]
    InvalidValue(String),

    /// No enumerated endpoint matched the brightness control fingerprint.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// HID layer failure (open, descriptor read, feature report read or write).
    #[error("HID error: {0}")]
    Hid(String),

    /// The device answered, but not with a well-formed brightness report.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Major version of the HID library differs between build and runtime.
    #[error("HID API version mismatch: built against {compiled}, running {runtime}")]
    VersionMismatch {
        compiled: ApiVersion,
        runtime: ApiVersion,
    },
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Process-level outcome surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultCode {
    Success = 0,
    InvalidInput = 1,
    DeviceNotFound = 2,
    Transport = 3,
    VersionMismatch = 4,
}

impl ResultCode {
    /// Numeric value used as the process exit status.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<&Error> for ResultCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::OutOfRange { .. } | Error::InvalidValue(_) => Self::InvalidInput,
            Error::DeviceNotFound(_) => Self::DeviceNotFound,
            Error::Hid(_) | Error::Protocol(_) => Self::Transport,
            Error::VersionMismatch { .. } => Self::VersionMismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_code_1() {
        let err = Error::OutOfRange {
            field: "percentage",
            value: 101,
            min: 0,
            max: 100,
        };
        assert_eq!(ResultCode::from(&err).as_u8(), 1);
        assert_eq!(
            ResultCode::from(&Error::InvalidValue("abc".into())).as_u8(),
            1
        );
    }

    #[test]
    fn transport_and_protocol_errors_share_code_3() {
        assert_eq!(ResultCode::from(&Error::Hid("open: busy".into())).as_u8(), 3);
        assert_eq!(
            ResultCode::from(&Error::Protocol("short read".into())).as_u8(),
            3
        );
    }

    #[test]
    fn not_found_and_version_codes() {
        assert_eq!(
            ResultCode::from(&Error::DeviceNotFound("XDR".into())),
            ResultCode::DeviceNotFound
        );
        let err = Error::VersionMismatch {
            compiled: ApiVersion::new(0, 14, 0),
            runtime: ApiVersion::new(1, 0, 0),
        };
        assert_eq!(ResultCode::from(&err).as_u8(), 4);
        assert_eq!(
            err.to_string(),
            "HID API version mismatch: built against 0.14.0, running 1.0.0"
        );
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = Error::OutOfRange {
            field: "brightness",
            value: 399,
            min: 400,
            max: 50_000,
        };
        assert_eq!(
            err.to_string(),
            "invalid brightness value 399 (allowed 400..=50000)"
        );
    }
}
