//! BME280 Device Driver
//!
//! ## Overview
//!
//! Thin register-level driver: it knows the register map, how to start a
//! forced conversion, how long a conversion takes for a given oversampling
//! mode, and how the raw ADC codes are laid out. It does not compensate; that
//! is the [`Compensator`](crate::compensation::Compensator)'s job.
//!
//! ## Raw Code Layout
//!
//! ```text
//! 0xF7 press_msb  0xF8 press_lsb  0xF9 press_xlsb[7:4]   → 20-bit pressure
//! 0xFA temp_msb   0xFB temp_lsb   0xFC temp_xlsb[7:4]    → 20-bit temperature
//! 0xFD hum_msb    0xFE hum_lsb                           → 16-bit humidity
//!
//! raw20 = ((msb << 16) | (lsb << 8) | xlsb) >> 4
//! raw16 = (msb << 8) | lsb
//! ```
//!
//! ## Conversion Time
//!
//! A forced conversion of all three channels at oversampling code `m` takes
//!
//! ```text
//! t = 1.25 + (2.3 × 2^m) + (2.3 × 2^m + 0.575) + (2.3 × 2^m + 0.575)  [ms]
//! ```
//!
//! which is 112.8 ms for the default ×8 mode.
//!
//! ## Buses
//!
//! Any [`RegisterSource`] works. [`I2cRegisters`] adapts an
//! `embedded_hal::i2c::I2c` bus (Linux `i2cdev`, ESP-IDF, RP2040, ...).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::calibration::CalibrationData;
use crate::constants::registers::*;
use crate::constants::sensors::{
    CONVERSION_BASE_US, CONVERSION_CHANNEL_SETTLE_US, CONVERSION_STEP_US,
};
use crate::errors::{DeviceError, DeviceResult};
use crate::traits::RegisterSource;

/// Oversampling applied to every channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Oversampling {
    X1,
    X2,
    X4,
    #[default]
    X8,
    X16,
}

impl Oversampling {
    /// 3-bit `osrs_*` register code
    pub const fn register_code(self) -> u8 {
        match self {
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 3,
            Oversampling::X8 => 4,
            Oversampling::X16 => 5,
        }
    }

    /// `ctrl_meas` value starting a forced conversion of all channels
    pub const fn control_byte(self) -> u8 {
        let code = self.register_code();
        (code << 5) | (code << 2) | MODE_FORCED
    }

    /// Worst case time for one forced conversion, in microseconds
    pub const fn conversion_time_us(self) -> u32 {
        let step = CONVERSION_STEP_US << self.register_code();
        CONVERSION_BASE_US
            + step
            + (step + CONVERSION_CHANNEL_SETTLE_US)
            + (step + CONVERSION_CHANNEL_SETTLE_US)
    }

    /// Worst case time for one forced conversion, in milliseconds
    pub fn conversion_time_ms(self) -> f32 {
        self.conversion_time_us() as f32 / 1000.0
    }
}

/// Assemble a 20-bit right-justified code from msb, lsb and xlsb registers
pub fn assemble_raw20(msb: u8, lsb: u8, xlsb: u8) -> i32 {
    (((msb as i32) << 16) | ((lsb as i32) << 8) | xlsb as i32) >> 4
}

/// Assemble a 16-bit code from msb and lsb registers
pub fn assemble_raw16(msb: u8, lsb: u8) -> i32 {
    ((msb as i32) << 8) | lsb as i32
}

/// Register-level BME280 driver
pub struct Bme280<R> {
    source: R,
    oversampling: Oversampling,
}

impl<R: RegisterSource> Bme280<R> {
    /// Wrap a register source; no bus traffic happens here
    pub fn new(source: R, oversampling: Oversampling) -> Self {
        Self { source, oversampling }
    }

    /// Oversampling mode used for forced conversions
    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    /// Decode the factory calibration
    pub fn read_calibration(&mut self) -> DeviceResult<CalibrationData> {
        CalibrationData::read_from(&mut self.source)
    }

    /// Put the measurement control register in its start-up state
    pub fn configure(&mut self) -> DeviceResult<()> {
        self.source.write_u8(CONTROL, CONTROL_STARTUP)
    }

    /// Start a forced conversion and block until it has finished
    ///
    /// `ctrl_hum` only takes effect after a write to `ctrl_meas`, so the
    /// humidity setting goes first.
    pub fn trigger_measurement<D: DelayNs>(&mut self, delay: &mut D) -> DeviceResult<()> {
        self.source
            .write_u8(CONTROL_HUM, self.oversampling.register_code())?;
        self.source.write_u8(CONTROL, self.oversampling.control_byte())?;
        delay.delay_us(self.oversampling.conversion_time_us());
        Ok(())
    }

    /// Raw 20-bit temperature code of the last conversion
    pub fn read_raw_temperature(&mut self) -> DeviceResult<i32> {
        self.read_raw20(TEMP_DATA)
    }

    /// Raw 20-bit pressure code of the last conversion
    pub fn read_raw_pressure(&mut self) -> DeviceResult<i32> {
        self.read_raw20(PRESSURE_DATA)
    }

    /// Raw 16-bit humidity code of the last conversion
    pub fn read_raw_humidity(&mut self) -> DeviceResult<i32> {
        let msb = self.source.read_u8(HUMIDITY_DATA)?;
        let lsb = self.source.read_u8(HUMIDITY_DATA + 1)?;
        Ok(assemble_raw16(msb, lsb))
    }

    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Give the register source back
    pub fn release(self) -> R {
        self.source
    }

    fn read_raw20(&mut self, register: u8) -> DeviceResult<i32> {
        let msb = self.source.read_u8(register)?;
        let lsb = self.source.read_u8(register + 1)?;
        let xlsb = self.source.read_u8(register + 2)?;
        Ok(assemble_raw20(msb, lsb, xlsb))
    }
}

/// [`RegisterSource`] over an `embedded-hal` I2C bus
///
/// ```rust,ignore
/// let bus = linux_embedded_hal::I2cdev::new("/dev/i2c-1")?;
/// let registers = I2cRegisters::new(bus, BME280_I2C_ADDRESS);
/// let sensor = Bme280::new(registers, Oversampling::X8);
/// ```
pub struct I2cRegisters<I2C> {
    bus: I2C,
    address: u8,
}

impl<I2C: I2c> I2cRegisters<I2C> {
    /// Talk to the device at the 7-bit `address`
    pub fn new(bus: I2C, address: u8) -> Self {
        Self { bus, address }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2c> RegisterSource for I2cRegisters<I2C> {
    fn read_u8(&mut self, register: u8) -> DeviceResult<u8> {
        let mut buf = [0u8; 1];
        self.read_block(register, &mut buf)?;
        Ok(buf[0])
    }

    fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()> {
        self.bus.write(self.address, &[register, value]).map_err(|_err| {
            log_debug!("I2C write of 0x{:02X} failed: {:?}", register, _err);
            DeviceError::Write { register }
        })
    }

    fn read_block(&mut self, start: u8, buf: &mut [u8]) -> DeviceResult<()> {
        self.bus.write_read(self.address, &[start], buf).map_err(|_err| {
            log_debug!("I2C read of 0x{:02X} failed: {:?}", start, _err);
            DeviceError::Read { register: start }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::vec::Vec;

    struct Bank {
        regs: [u8; 256],
        writes: Vec<(u8, u8)>,
        broken: Option<u8>,
    }

    impl Bank {
        fn new() -> Self {
            Self { regs: [0; 256], writes: Vec::new(), broken: None }
        }
    }

    impl RegisterSource for Bank {
        fn read_u8(&mut self, register: u8) -> DeviceResult<u8> {
            if self.broken == Some(register) {
                return Err(DeviceError::Read { register });
            }
            Ok(self.regs[register as usize])
        }

        fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()> {
            self.writes.push((register, value));
            Ok(())
        }
    }

    struct CountingDelay {
        total_us: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_us += (ns / 1000) as u64;
        }

        fn delay_us(&mut self, us: u32) {
            self.total_us += us as u64;
        }
    }

    #[test]
    fn conversion_time_for_x8() {
        let ms = Oversampling::X8.conversion_time_ms();
        assert!((ms - 112.8).abs() < 0.01, "got {}", ms);
        assert_eq!(Oversampling::X8.conversion_time_us(), 112_800);
    }

    #[test]
    fn conversion_time_grows_with_oversampling() {
        assert!(Oversampling::X1.conversion_time_ms() < Oversampling::X2.conversion_time_ms());
        assert!(Oversampling::X8.conversion_time_ms() < Oversampling::X16.conversion_time_ms());
    }

    #[test]
    fn control_byte_layout() {
        // osrs_t = osrs_p = 100b, mode = 01b
        assert_eq!(Oversampling::X8.control_byte(), 0b100_100_01);
        assert_eq!(Oversampling::X1.control_byte(), 0b001_001_01);
    }

    #[test]
    fn raw_code_assembly() {
        // 519888 << 4 = 0x7EED00
        assert_eq!(assemble_raw20(0x7E, 0xED, 0x00), 519888);
        // Low nibble of xlsb is discarded
        assert_eq!(assemble_raw20(0x7E, 0xED, 0x0F), 519888);
        assert_eq!(assemble_raw20(0xFF, 0xFF, 0xF0), (1 << 20) - 1);
        assert_eq!(assemble_raw16(0x75, 0x30), 30000);
    }

    #[test]
    fn trigger_writes_humidity_control_first_and_waits() {
        let mut sensor = Bme280::new(Bank::new(), Oversampling::X8);
        let mut delay = CountingDelay { total_us: 0 };

        sensor.trigger_measurement(&mut delay).unwrap();

        let bank = sensor.release();
        assert_eq!(bank.writes, vec![(CONTROL_HUM, 4), (CONTROL, 0x91)]);
        assert_eq!(delay.total_us, 112_800);
    }

    #[test]
    fn reads_raw_codes_from_data_registers() {
        let mut bank = Bank::new();
        bank.regs[0xF7..=0xF9].copy_from_slice(&[0x65, 0x5A, 0xC0]);
        bank.regs[0xFA..=0xFC].copy_from_slice(&[0x7E, 0xED, 0x00]);
        bank.regs[0xFD..=0xFE].copy_from_slice(&[0x75, 0x30]);

        let mut sensor = Bme280::new(bank, Oversampling::default());
        assert_eq!(sensor.read_raw_pressure().unwrap(), 415148);
        assert_eq!(sensor.read_raw_temperature().unwrap(), 519888);
        assert_eq!(sensor.read_raw_humidity().unwrap(), 30000);
    }

    #[test]
    fn raw_read_failure_names_register() {
        let mut bank = Bank::new();
        bank.broken = Some(PRESSURE_DATA + 2);

        let mut sensor = Bme280::new(bank, Oversampling::default());
        assert_eq!(
            sensor.read_raw_pressure(),
            Err(DeviceError::Read { register: 0xF9 })
        );
        assert!(sensor.read_raw_temperature().is_ok());
    }

    #[test]
    fn configure_writes_startup_control() {
        let mut sensor = Bme280::new(Bank::new(), Oversampling::default());
        sensor.configure().unwrap();
        assert_eq!(sensor.release().writes, vec![(CONTROL, 0x3F)]);
    }
}
