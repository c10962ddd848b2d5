//! Error Types for Device Access and Station Collaborators
//!
//! ## Design Philosophy
//!
//! The error system follows the same rules as the rest of the core:
//!
//! 1. **Small Size**: every variant carries at most a register address or a
//!    `&'static str`, so errors can be returned from the sampling hot path
//!    and copied into cycle reports.
//!
//! 2. **No Heap Allocation**: messages are static strings only.
//!
//! 3. **Copy Semantics**: errors implement `Copy`.
//!
//! ## Error Categories
//!
//! ### Device Access
//! - `DeviceError::Read`: a register read failed on the bus
//! - `DeviceError::Write`: a register write failed on the bus
//! - `DeviceError::CalibrationIncomplete`: compensation was requested before
//!   calibration constants were decoded
//!
//! ### Collaborators
//! - `TelemetryError`: host CPU telemetry could not be read
//! - `StoreError`: the measurement store rejected a record
//!
//! A degenerate pressure calibration is not an error: the compensator returns
//! the `0.0` sentinel instead.
//!
//! ## Error Handling Strategy
//!
//! Nothing in the core retries. The sampling loop logs every failure and keeps
//! the cycle going with partial data:
//!
//! ```rust
//! use baroguard_core::DeviceError;
//!
//! fn describe(err: DeviceError) -> &'static str {
//!     match err {
//!         DeviceError::Read { .. } | DeviceError::Write { .. } => "bus fault",
//!         DeviceError::CalibrationIncomplete => "sensor not calibrated yet",
//!     }
//! }
//! # assert_eq!(describe(DeviceError::CalibrationIncomplete), "sensor not calibrated yet");
//! ```

use thiserror_no_std::Error;

/// Result type for register level operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors raised while talking to the sensor
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// Register read failed on the bus
    #[error("Failed to read register 0x{register:02X}")]
    Read {
        /// Register address that could not be read
        register: u8,
    },

    /// Register write failed on the bus
    #[error("Failed to write register 0x{register:02X}")]
    Write {
        /// Register address that could not be written
        register: u8,
    },

    /// Compensation attempted before calibration was decoded
    #[error("Calibration data has not been decoded")]
    CalibrationIncomplete,
}

/// Errors raised by host telemetry sources
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// The telemetry channel does not exist on this host
    #[error("Telemetry unavailable: {reason}")]
    Unavailable {
        reason: &'static str,
    },

    /// The telemetry source returned something that is not a number
    #[error("Malformed telemetry value: {reason}")]
    Malformed {
        reason: &'static str,
    },
}

/// Errors raised by measurement stores
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The store refused the record
    #[error("Measurement rejected: {reason}")]
    Rejected {
        reason: &'static str,
    },
}

/// Errors raised by summary sinks
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The summaries could not be delivered
    #[error("Summary publish failed: {reason}")]
    PublishFailed {
        reason: &'static str,
    },
}
