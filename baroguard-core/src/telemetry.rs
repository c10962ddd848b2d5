//! Host CPU telemetry
//!
//! The station records the host's CPU temperature and core voltage next to
//! every weather reading, which makes it easy to spot an enclosure that heats
//! the sensor.
//!
//! - [`SysfsTelemetry`] (std): Linux thermal zone plus an optional voltage
//!   file
//! - [`NoTelemetry`]: hosts without either; every read reports
//!   [`TelemetryError::Unavailable`]

use crate::errors::TelemetryError;
use crate::traits::HostTelemetry;

/// Telemetry for hosts that expose nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTelemetry;

impl HostTelemetry for NoTelemetry {
    fn cpu_temperature(&mut self) -> Result<f32, TelemetryError> {
        Err(TelemetryError::Unavailable {
            reason: "no CPU temperature source",
        })
    }

    fn cpu_core_voltage(&mut self) -> Result<f32, TelemetryError> {
        Err(TelemetryError::Unavailable {
            reason: "no CPU voltage source",
        })
    }
}

/// Parse a thermal zone reading in milli-degrees Celsius
pub fn parse_millidegrees(text: &str) -> Result<f32, TelemetryError> {
    text.trim()
        .parse::<i64>()
        .map(|milli| milli as f32 / 1000.0)
        .map_err(|_| TelemetryError::Malformed {
            reason: "thermal zone value is not an integer",
        })
}

/// Parse a core voltage, either bare (`1.2000`) or in `vcgencmd`
/// form (`volt=1.2000V`)
pub fn parse_volts(text: &str) -> Result<f32, TelemetryError> {
    let text = text.trim();
    let text = text.strip_prefix("volt=").unwrap_or(text);
    let text = text.strip_suffix('V').unwrap_or(text);
    text.parse::<f32>().map_err(|_| TelemetryError::Malformed {
        reason: "core voltage is not a number",
    })
}

#[cfg(feature = "std")]
pub use sysfs::{SysfsTelemetry, DEFAULT_THERMAL_ZONE};

#[cfg(feature = "std")]
mod sysfs {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{parse_millidegrees, parse_volts};
    use crate::errors::TelemetryError;
    use crate::traits::HostTelemetry;

    /// Default Linux CPU thermal zone
    pub const DEFAULT_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

    /// Reads CPU telemetry from files under `/sys`
    #[derive(Debug, Clone)]
    pub struct SysfsTelemetry {
        temperature_path: PathBuf,
        voltage_path: Option<PathBuf>,
    }

    impl Default for SysfsTelemetry {
        fn default() -> Self {
            Self::new(DEFAULT_THERMAL_ZONE)
        }
    }

    impl SysfsTelemetry {
        pub fn new(temperature_path: impl Into<PathBuf>) -> Self {
            Self {
                temperature_path: temperature_path.into(),
                voltage_path: None,
            }
        }

        /// Also read the core voltage from `path`
        pub fn with_voltage_path(mut self, path: impl Into<PathBuf>) -> Self {
            self.voltage_path = Some(path.into());
            self
        }

        fn read(path: &Path) -> Result<String, TelemetryError> {
            fs::read_to_string(path).map_err(|_err| {
                log_debug!("Cannot read {}: {}", path.display(), _err);
                TelemetryError::Unavailable {
                    reason: "telemetry file unreadable",
                }
            })
        }
    }

    impl HostTelemetry for SysfsTelemetry {
        fn cpu_temperature(&mut self) -> Result<f32, TelemetryError> {
            parse_millidegrees(&Self::read(&self.temperature_path)?)
        }

        fn cpu_core_voltage(&mut self) -> Result<f32, TelemetryError> {
            match &self.voltage_path {
                Some(path) => parse_volts(&Self::read(path)?),
                None => Err(TelemetryError::Unavailable {
                    reason: "no CPU voltage source",
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millidegrees() {
        assert_eq!(parse_millidegrees("48312\n").unwrap(), 48.312);
        assert_eq!(parse_millidegrees("-5000").unwrap(), -5.0);
        assert!(matches!(
            parse_millidegrees("hot"),
            Err(TelemetryError::Malformed { .. })
        ));
    }

    #[test]
    fn volts_in_both_forms() {
        assert_eq!(parse_volts("volt=1.2000V\n").unwrap(), 1.2);
        assert_eq!(parse_volts("0.8625").unwrap(), 0.8625);
        assert!(parse_volts("volt=V").is_err());
    }

    #[test]
    fn no_telemetry_is_unavailable() {
        let mut host = NoTelemetry;
        assert!(matches!(
            host.cpu_temperature(),
            Err(TelemetryError::Unavailable { .. })
        ));
        assert!(host.cpu_core_voltage().is_err());
    }

    #[cfg(feature = "std")]
    mod sysfs_files {
        use super::super::*;
        use std::fs;
        use tempfile::tempdir;

        #[test]
        fn reads_temperature_and_voltage_files() {
            let dir = tempdir().unwrap();
            let temp = dir.path().join("temp");
            let volts = dir.path().join("volts");
            fs::write(&temp, "51540\n").unwrap();
            fs::write(&volts, "volt=1.3500V\n").unwrap();

            let mut host = SysfsTelemetry::new(&temp).with_voltage_path(&volts);
            assert_eq!(host.cpu_temperature().unwrap(), 51.54);
            assert_eq!(host.cpu_core_voltage().unwrap(), 1.35);
        }

        #[test]
        fn missing_files_are_unavailable() {
            let dir = tempdir().unwrap();
            let mut host = SysfsTelemetry::new(dir.path().join("nope"));
            assert!(matches!(
                host.cpu_temperature(),
                Err(TelemetryError::Unavailable { .. })
            ));
            assert!(matches!(
                host.cpu_core_voltage(),
                Err(TelemetryError::Unavailable { .. })
            ));
        }

        #[test]
        fn garbage_is_malformed() {
            let dir = tempdir().unwrap();
            let temp = dir.path().join("temp");
            fs::write(&temp, "n/a").unwrap();
            let mut host = SysfsTelemetry::new(&temp);
            assert!(matches!(
                host.cpu_temperature(),
                Err(TelemetryError::Malformed { .. })
            ));
        }
    }
}
