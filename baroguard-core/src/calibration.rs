//! Calibration Decoding for the BME280
//!
//! ## Overview
//!
//! Every BME280 leaves the factory with 32 bytes of trimming parameters burnt
//! into non-volatile memory. The compensation polynomials are useless without
//! them, so they are decoded once per device session and handed to the
//! [`Compensator`](crate::compensation::Compensator).
//!
//! ## Register Layout
//!
//! ```text
//! 0x88 ┌──────────┬──────────┬──────────┬──────────┬─────┬──────────┐
//!      │ T1 (u16) │ T2 (i16) │ T3 (i16) │ P1 (u16) │ ... │ P9 (i16) │  little endian
//! 0xA1 ├──────────┴──────────┴──────────┴──────────┴─────┴──────────┘
//!      │ H1 (u8)
//! 0xE1 ├──────────┬─────────┬────────┬──────────────┬────────┬────────┐
//!      │ H2 (i16) │ H3 (u8) │ "H4"   │ "H5"         │ "H6"   │ "H7"   │
//!      │          │         │ 0xE4   │ 0xE5         │ 0xE6   │ 0xE7   │
//!      └──────────┴─────────┴────────┴──────────────┴────────┴────────┘
//! ```
//!
//! ## The Packed Humidity Fields
//!
//! `dig_H4` and `dig_H5` are 12-bit signed values that share register 0xE5:
//!
//! ```text
//!            0xE4            0xE5             0xE6
//!      ┌───────────────┐ ┌───────┬───────┐ ┌───────────────┐
//!      │ H4[11:4]      │ │H5[3:0]│H4[3:0]│ │ H5[11:4]      │
//!      └───────────────┘ └───────┴───────┘ └───────────────┘
//!
//! dig_H4 = sext(0xE4) << 4 | (0xE5 & 0x0F)
//! dig_H5 = sext(0xE6) << 4 | (0xE5 >> 4 & 0x0F)
//! ```
//!
//! The high byte is sign-extended by loading it as `i8`, parking it in the top
//! byte of an `i32` and shifting arithmetically right by 20. The asymmetry
//! (low nibble for H4, high nibble for H5, and `dig_H6` living in the register
//! labelled "H7") is the device's real layout and is reproduced exactly.
//!
//! ## Worked Example
//!
//! ```rust
//! use baroguard_core::calibration::{decode_h4, decode_h5};
//!
//! // 0xE4 = 0x1E, 0xE5 = 0x3C, 0xE6 = 0x1A
//! assert_eq!(decode_h4(0x1E, 0x3C), 0x1EC); // 492
//! assert_eq!(decode_h5(0x1A, 0x3C), 0x1A3); // 419
//!
//! // Negative high byte sign-extends into the 12-bit field
//! assert_eq!(decode_h4(0xF0, 0x3C), -244);
//! ```

use crate::constants::registers::*;
use crate::errors::DeviceResult;
use crate::traits::RegisterSource;

/// Factory trimming parameters of one BME280
///
/// Field names follow the vendor's `dig_*` naming so they can be checked
/// against the datasheet line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationData {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,

    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,

    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    pub dig_h4: i16,
    pub dig_h5: i16,
    pub dig_h6: i8,
}

/// Sign-extend the 8-bit high part of a packed 12-bit field
///
/// Equivalent to `(high as i8 as i32) << 4`, written as the shift pair used
/// by the vendor reference so the two can be compared directly.
#[inline]
fn sign_extend_high_byte(high: u8) -> i32 {
    ((high as i8 as i32) << 24) >> 20
}

/// Decode `dig_H4` from register "H4" (0xE4) and the shared register "H5"
/// (0xE5)
pub fn decode_h4(reg_h4: u8, reg_h5: u8) -> i16 {
    (sign_extend_high_byte(reg_h4) | (reg_h5 & 0x0F) as i32) as i16
}

/// Decode `dig_H5` from register "H6" (0xE6) and the shared register "H5"
/// (0xE5)
pub fn decode_h5(reg_h6: u8, reg_h5: u8) -> i16 {
    (sign_extend_high_byte(reg_h6) | ((reg_h5 >> 4) & 0x0F) as i32) as i16
}

impl CalibrationData {
    /// Read and decode all trimming parameters register by register
    ///
    /// The first failing read aborts decoding and is returned unchanged;
    /// nothing is retried here.
    pub fn read_from<R: RegisterSource + ?Sized>(source: &mut R) -> DeviceResult<Self> {
        let reg_h4 = source.read_u8(DIG_H4)?;
        let reg_h5 = source.read_u8(DIG_H5)?;
        let reg_h6 = source.read_u8(DIG_H6)?;

        let calibration = Self {
            dig_t1: source.read_u16_le(DIG_T1)?,
            dig_t2: source.read_i16_le(DIG_T2)?,
            dig_t3: source.read_i16_le(DIG_T3)?,

            dig_p1: source.read_u16_le(DIG_P1)?,
            dig_p2: source.read_i16_le(DIG_P2)?,
            dig_p3: source.read_i16_le(DIG_P3)?,
            dig_p4: source.read_i16_le(DIG_P4)?,
            dig_p5: source.read_i16_le(DIG_P5)?,
            dig_p6: source.read_i16_le(DIG_P6)?,
            dig_p7: source.read_i16_le(DIG_P7)?,
            dig_p8: source.read_i16_le(DIG_P8)?,
            dig_p9: source.read_i16_le(DIG_P9)?,

            dig_h1: source.read_u8(DIG_H1)?,
            dig_h2: source.read_i16_le(DIG_H2)?,
            dig_h3: source.read_u8(DIG_H3)?,
            dig_h4: decode_h4(reg_h4, reg_h5),
            dig_h5: decode_h5(reg_h6, reg_h5),
            dig_h6: source.read_i8(DIG_H7)?,
        };

        calibration.log_constants();
        Ok(calibration)
    }

    /// Decode from the two contiguous calibration blocks
    ///
    /// `block_a` holds 0x88..=0xA1 and `block_b` holds 0xE1..=0xE7, which is
    /// how buses with burst reads fetch them. The result is identical to
    /// [`read_from`](Self::read_from).
    pub fn from_blocks(
        block_a: &[u8; CALIBRATION_BLOCK_A_LEN],
        block_b: &[u8; CALIBRATION_BLOCK_B_LEN],
    ) -> Self {
        let word = |offset: usize| [block_a[offset], block_a[offset + 1]];

        Self {
            dig_t1: u16::from_le_bytes(word(0)),
            dig_t2: i16::from_le_bytes(word(2)),
            dig_t3: i16::from_le_bytes(word(4)),

            dig_p1: u16::from_le_bytes(word(6)),
            dig_p2: i16::from_le_bytes(word(8)),
            dig_p3: i16::from_le_bytes(word(10)),
            dig_p4: i16::from_le_bytes(word(12)),
            dig_p5: i16::from_le_bytes(word(14)),
            dig_p6: i16::from_le_bytes(word(16)),
            dig_p7: i16::from_le_bytes(word(18)),
            dig_p8: i16::from_le_bytes(word(20)),
            dig_p9: i16::from_le_bytes(word(22)),

            // 0xA0 is reserved, H1 sits at the end of the block
            dig_h1: block_a[25],
            dig_h2: i16::from_le_bytes([block_b[0], block_b[1]]),
            dig_h3: block_b[2],
            dig_h4: decode_h4(block_b[3], block_b[4]),
            dig_h5: decode_h5(block_b[5], block_b[4]),
            dig_h6: block_b[6] as i8,
        }
    }

    /// Read both calibration blocks with two burst reads and decode them
    pub fn read_blocks_from<R: RegisterSource + ?Sized>(source: &mut R) -> DeviceResult<Self> {
        let mut block_a = [0u8; CALIBRATION_BLOCK_A_LEN];
        let mut block_b = [0u8; CALIBRATION_BLOCK_B_LEN];
        source.read_block(CALIBRATION_BLOCK_A, &mut block_a)?;
        source.read_block(CALIBRATION_BLOCK_B, &mut block_b)?;

        let calibration = Self::from_blocks(&block_a, &block_b);
        calibration.log_constants();
        Ok(calibration)
    }

    fn log_constants(&self) {
        log_debug!(
            "Calibration T1={} T2={} T3={}",
            self.dig_t1, self.dig_t2, self.dig_t3
        );
        log_debug!(
            "Calibration P1={} P2={} P3={} P4={} P5={} P6={} P7={} P8={} P9={}",
            self.dig_p1, self.dig_p2, self.dig_p3, self.dig_p4, self.dig_p5,
            self.dig_p6, self.dig_p7, self.dig_p8, self.dig_p9
        );
        log_debug!(
            "Calibration H1={} H2={} H3={} H4={} H5={} H6={}",
            self.dig_h1, self.dig_h2, self.dig_h3, self.dig_h4, self.dig_h5, self.dig_h6
        );
    }
}
