//! BME280 Register Map
//!
//! Addresses are the wire protocol contract and must match the physical
//! device exactly.
//!
//! Source: Bosch BME280 datasheet, section 5.3 (memory map) and table 16
//! (compensation parameter storage).

/// Default 7-bit I2C address (SDO pulled high).
pub const BME280_I2C_ADDRESS: u8 = 0x77;

/// Alternate 7-bit I2C address (SDO pulled low).
pub const BME280_I2C_ADDRESS_ALT: u8 = 0x76;

// ===== CALIBRATION (TRIMMING) REGISTERS =====

/// `dig_T1`, u16 little endian.
pub const DIG_T1: u8 = 0x88;
/// `dig_T2`, i16 little endian.
pub const DIG_T2: u8 = 0x8A;
/// `dig_T3`, i16 little endian.
pub const DIG_T3: u8 = 0x8C;

/// `dig_P1`, u16 little endian.
pub const DIG_P1: u8 = 0x8E;
/// `dig_P2`, i16 little endian.
pub const DIG_P2: u8 = 0x90;
/// `dig_P3`, i16 little endian.
pub const DIG_P3: u8 = 0x92;
/// `dig_P4`, i16 little endian.
pub const DIG_P4: u8 = 0x94;
/// `dig_P5`, i16 little endian.
pub const DIG_P5: u8 = 0x96;
/// `dig_P6`, i16 little endian.
pub const DIG_P6: u8 = 0x98;
/// `dig_P7`, i16 little endian.
pub const DIG_P7: u8 = 0x9A;
/// `dig_P8`, i16 little endian.
pub const DIG_P8: u8 = 0x9C;
/// `dig_P9`, i16 little endian.
pub const DIG_P9: u8 = 0x9E;

/// `dig_H1`, u8.
pub const DIG_H1: u8 = 0xA1;
/// `dig_H2`, i16 little endian.
pub const DIG_H2: u8 = 0xE1;
/// `dig_H3`, u8.
pub const DIG_H3: u8 = 0xE3;

/// Register labelled "H4": high 8 bits of `dig_H4`.
pub const DIG_H4: u8 = 0xE4;

/// Register labelled "H5": low nibble belongs to `dig_H4`, high nibble to
/// `dig_H5`.
pub const DIG_H5: u8 = 0xE5;

/// Register labelled "H6": high 8 bits of `dig_H5`.
pub const DIG_H6: u8 = 0xE6;

/// Register labelled "H7": holds `dig_H6` (the labels are shifted by one
/// from the constant names on this device).
pub const DIG_H7: u8 = 0xE7;

/// Number of distinct calibration bytes on the device.
///
/// 12 two-byte words (T1..T3, P1..P9), H1, H2 (two bytes), H3 and the four
/// packed registers 0xE4..=0xE7.
pub const CALIBRATION_BYTE_COUNT: usize = 24 + 1 + 2 + 1 + 4;

/// First block of calibration bytes: 0x88..=0xA1 (includes `dig_H1`).
pub const CALIBRATION_BLOCK_A: u8 = DIG_T1;
/// Length of the first calibration block.
pub const CALIBRATION_BLOCK_A_LEN: usize = 26;

/// Second block of calibration bytes: 0xE1..=0xE7.
pub const CALIBRATION_BLOCK_B: u8 = DIG_H2;
/// Length of the second calibration block.
pub const CALIBRATION_BLOCK_B_LEN: usize = 7;

// ===== CONTROL AND DATA REGISTERS =====

/// Humidity oversampling control (`ctrl_hum`).
pub const CONTROL_HUM: u8 = 0xF2;

/// Measurement control (`ctrl_meas`): `osrs_t[7:5] osrs_p[4:2] mode[1:0]`.
pub const CONTROL: u8 = 0xF4;

/// Value written to [`CONTROL`] when the driver starts up.
pub const CONTROL_STARTUP: u8 = 0x3F;

/// Pressure data, 3 bytes (msb, lsb, xlsb), 20-bit right justified.
pub const PRESSURE_DATA: u8 = 0xF7;

/// Temperature data, 3 bytes (msb, lsb, xlsb), 20-bit right justified.
pub const TEMP_DATA: u8 = 0xFA;

/// Humidity data, 2 bytes (msb, lsb).
pub const HUMIDITY_DATA: u8 = 0xFD;

/// Forced-mode bit pattern in `ctrl_meas[1:0]`.
pub const MODE_FORCED: u8 = 0x01;
