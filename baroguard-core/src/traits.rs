//! Boundary traits for the station's external collaborators
//!
//! The core never talks to hardware, storage or the host directly. Each of
//! those concerns sits behind one of these traits so the compensation and
//! aggregation logic can be driven by a real bus on a Raspberry Pi or by a
//! scripted fake in tests.

use alloc::vec::Vec;

use crate::aggregation::SummaryRecord;
use crate::errors::{DeviceResult, SinkError, StoreError, TelemetryError};
use crate::measurement::Measurement;
use crate::time::Timestamp;

/// Byte-level access to the sensor's 8-bit register file
///
/// Only `read_u8` and `write_u8` are required; the wider reads are built from
/// consecutive single-byte reads, least significant byte first.
///
/// ## Example Implementation
///
/// ```rust
/// use baroguard_core::traits::RegisterSource;
/// use baroguard_core::errors::{DeviceError, DeviceResult};
///
/// struct RegisterBank([u8; 256]);
///
/// impl RegisterSource for RegisterBank {
///     fn read_u8(&mut self, register: u8) -> DeviceResult<u8> {
///         Ok(self.0[register as usize])
///     }
///
///     fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()> {
///         self.0[register as usize] = value;
///         Ok(())
///     }
/// }
///
/// let mut bank = RegisterBank([0; 256]);
/// bank.0[0x8A] = 0x43;
/// bank.0[0x8B] = 0x67;
/// assert_eq!(bank.read_i16_le(0x8A).unwrap(), 26435);
/// # let _ = DeviceError::CalibrationIncomplete;
/// ```
pub trait RegisterSource {
    /// Read one unsigned byte
    fn read_u8(&mut self, register: u8) -> DeviceResult<u8>;

    /// Write one byte
    fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()>;

    /// Read one byte as two's-complement signed
    fn read_i8(&mut self, register: u8) -> DeviceResult<i8> {
        Ok(self.read_u8(register)? as i8)
    }

    /// Read an unsigned 16-bit little endian word from `register` and
    /// `register + 1`
    fn read_u16_le(&mut self, register: u8) -> DeviceResult<u16> {
        let lsb = self.read_u8(register)?;
        let msb = self.read_u8(register.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lsb, msb]))
    }

    /// Read a signed 16-bit little endian word from `register` and
    /// `register + 1`
    fn read_i16_le(&mut self, register: u8) -> DeviceResult<i16> {
        let lsb = self.read_u8(register)?;
        let msb = self.read_u8(register.wrapping_add(1))?;
        Ok(i16::from_le_bytes([lsb, msb]))
    }

    /// Fill `buf` from consecutive registers starting at `start`
    ///
    /// The default reads one byte at a time; buses with burst reads should
    /// override it.
    fn read_block(&mut self, start: u8, buf: &mut [u8]) -> DeviceResult<()> {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_u8(start.wrapping_add(offset as u8))?;
        }
        Ok(())
    }
}

impl<R: RegisterSource + ?Sized> RegisterSource for &mut R {
    fn read_u8(&mut self, register: u8) -> DeviceResult<u8> {
        (**self).read_u8(register)
    }

    fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()> {
        (**self).write_u8(register, value)
    }

    fn read_block(&mut self, start: u8, buf: &mut [u8]) -> DeviceResult<()> {
        (**self).read_block(start, buf)
    }
}

/// Host CPU telemetry recorded alongside every measurement
pub trait HostTelemetry {
    /// CPU temperature in °C
    fn cpu_temperature(&mut self) -> Result<f32, TelemetryError>;

    /// CPU core voltage in volts
    fn cpu_core_voltage(&mut self) -> Result<f32, TelemetryError>;
}

/// Persistent measurement history
///
/// `list` returns every record with `start <= timestamp < end` in insertion
/// order.
pub trait MeasurementStore {
    /// Persist one measurement
    fn create(&mut self, measurement: Measurement) -> Result<(), StoreError>;

    /// Measurements inside the half-open range `[start, end)`
    fn list(&self, start: Timestamp, end: Timestamp) -> Vec<Measurement>;
}

/// Destination for aggregation summaries (JSON file, dashboard, ...)
pub trait SummarySink {
    /// Deliver the latest set of summaries, replacing the previous set
    fn publish(&mut self, summaries: &[SummaryRecord]) -> Result<(), SinkError>;
}
