//! Target and sensor altitudes.
//!
//! The control file encodes the target as `0` (sea level), a negative
//! altitude in km, or a positive pressure in mb; the sensor as `-1000`
//! (satellite), `0` (sea level) or a negative altitude in km followed by the
//! aircraft's water/ozone and aerosol lines. In those aircraft lines a
//! negative value asks the engine to derive the quantity from the profile.

use super::validation::{require_at_least, require_open, require_positive};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use serde::{Deserialize, Serialize};

pub const MAX_ALTITUDE_KM: f64 = 100.0;
const SATELLITE_LEVEL_CODE: f64 = -1000.0;
const UNKNOWN_AIRCRAFT_VALUE: f64 = -1.0;

/// Target level. Only the validating constructors and deserialisation
/// build one, so an altitude can never be written as a pressure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "TargetLevel", into = "TargetLevel")]
pub struct TargetAltitude(TargetLevel);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
enum TargetLevel {
    #[default]
    SeaLevel,
    Altitude {
        km: f64,
    },
    Pressure {
        mb: f64,
    },
}

impl TryFrom<TargetLevel> for TargetAltitude {
    type Error = ParameterError;

    fn try_from(level: TargetLevel) -> Result<Self, Self::Error> {
        let target = Self(level);
        target.validate()?;
        Ok(target)
    }
}

impl From<TargetAltitude> for TargetLevel {
    fn from(target: TargetAltitude) -> Self {
        target.0
    }
}

impl TargetAltitude {
    pub const fn sea_level() -> Self {
        Self(TargetLevel::SeaLevel)
    }

    pub fn altitude_km(km: f64) -> ParameterResult<Self> {
        Self::try_from(TargetLevel::Altitude { km })
    }

    pub fn pressure_mb(mb: f64) -> ParameterResult<Self> {
        Self::try_from(TargetLevel::Pressure { mb })
    }

    pub fn is_sea_level(&self) -> bool {
        self.0 == TargetLevel::SeaLevel
    }

    pub fn km(&self) -> Option<f64> {
        match self.0 {
            TargetLevel::Altitude { km } => Some(km),
            _ => None,
        }
    }

    pub fn mb(&self) -> Option<f64> {
        match self.0 {
            TargetLevel::Pressure { mb } => Some(mb),
            _ => None,
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self.0 {
            TargetLevel::SeaLevel => Ok(()),
            TargetLevel::Altitude { km } => {
                require_open(km, 0.0, MAX_ALTITUDE_KM, "target altitude")?;
                Ok(())
            }
            TargetLevel::Pressure { mb } => {
                require_positive(mb, "target pressure")?;
                Ok(())
            }
        }
    }

    fn encoded(&self) -> f64 {
        match self.0 {
            TargetLevel::SeaLevel => 0.0,
            TargetLevel::Altitude { km } => -km,
            TargetLevel::Pressure { mb } => mb,
        }
    }

    fn decode(value: f64) -> ParameterResult<Self> {
        if value == 0.0 {
            Ok(Self::sea_level())
        } else if value < 0.0 {
            Self::altitude_km(-value)
        } else {
            Self::pressure_mb(value)
        }
    }
}

/// Aircraft measurement. `None` entries are derived by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AircraftFields")]
pub struct AircraftSensor {
    km: f64,
    water: Option<f64>,
    ozone: Option<f64>,
    aot550: Option<f64>,
}

impl AircraftSensor {
    pub fn new(
        km: f64,
        water: Option<f64>,
        ozone: Option<f64>,
        aot550: Option<f64>,
    ) -> ParameterResult<Self> {
        let sensor = Self {
            km,
            water,
            ozone,
            aot550,
        };
        sensor.validate()?;
        Ok(sensor)
    }

    pub fn km(&self) -> f64 {
        self.km
    }

    pub fn water(&self) -> Option<f64> {
        self.water
    }

    pub fn ozone(&self) -> Option<f64> {
        self.ozone
    }

    pub fn aot550(&self) -> Option<f64> {
        self.aot550
    }

    fn validate(&self) -> ParameterResult<()> {
        require_open(self.km, 0.0, MAX_ALTITUDE_KM, "sensor altitude")?;
        for (value, field) in [
            (self.water, "aircraft water"),
            (self.ozone, "aircraft ozone"),
            (self.aot550, "aircraft aot550"),
        ] {
            if let Some(value) = value {
                require_at_least(value, 0.0, field)?;
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct AircraftFields {
    km: f64,
    #[serde(default)]
    water: Option<f64>,
    #[serde(default)]
    ozone: Option<f64>,
    #[serde(default)]
    aot550: Option<f64>,
}

impl TryFrom<AircraftFields> for AircraftSensor {
    type Error = ParameterError;

    fn try_from(fields: AircraftFields) -> Result<Self, Self::Error> {
        Self::new(fields.km, fields.water, fields.ozone, fields.aot550)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SensorAltitude {
    #[default]
    SatelliteLevel,
    SeaLevel,
    Aircraft(AircraftSensor),
}

impl SensorAltitude {
    pub fn aircraft(
        km: f64,
        water: Option<f64>,
        ozone: Option<f64>,
        aot550: Option<f64>,
    ) -> ParameterResult<Self> {
        Ok(Self::Aircraft(AircraftSensor::new(km, water, ozone, aot550)?))
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::SatelliteLevel | Self::SeaLevel => Ok(()),
            Self::Aircraft(sensor) => sensor.validate(),
        }
    }
}

fn encode_optional(value: Option<f64>) -> f64 {
    value.unwrap_or(UNKNOWN_AIRCRAFT_VALUE)
}

fn decode_optional(value: f64) -> Option<f64> {
    (value >= 0.0).then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Altitudes {
    pub target: TargetAltitude,
    pub sensor: SensorAltitude,
}

impl Altitudes {
    pub fn new(target: TargetAltitude, sensor: SensorAltitude) -> Self {
        Self { target, sensor }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        self.target.validate()?;
        self.sensor.validate()
    }
}

impl ControlSection for Altitudes {
    fn write_section(&self, writer: &mut ControlWriter) {
        writer.value(self.target.encoded(), "target altitude");
        match &self.sensor {
            SensorAltitude::SatelliteLevel => {
                writer.value(SATELLITE_LEVEL_CODE, "sensor at satellite level");
            }
            SensorAltitude::SeaLevel => writer.value(0.0, "sensor at sea level"),
            SensorAltitude::Aircraft(sensor) => {
                writer.value(-sensor.km, "aircraft altitude");
                writer.record(
                    &[encode_optional(sensor.water), encode_optional(sensor.ozone)],
                    "water and ozone",
                );
                writer.value(encode_optional(sensor.aot550), "aot at 550 nm");
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let target_value = reader.read_value("target altitude")?;
        let target = reader.at_line(TargetAltitude::decode(target_value))?;

        let sensor_value = reader.read_value("sensor altitude")?;
        let sensor = if sensor_value == SATELLITE_LEVEL_CODE {
            SensorAltitude::SatelliteLevel
        } else if sensor_value == 0.0 {
            SensorAltitude::SeaLevel
        } else if sensor_value < 0.0 {
            let [water, ozone] = reader.read_array::<2>("aircraft water and ozone")?;
            let aot550 = reader.read_value("aircraft aot")?;
            reader.at_line(SensorAltitude::aircraft(
                -sensor_value,
                decode_optional(water),
                decode_optional(ozone),
                decode_optional(aot550),
            ))?
        } else {
            let code = reader.integral(sensor_value, "sensor altitude")?;
            return reader.unknown_code("sensor altitude", code);
        };

        Ok(Self { target, sensor })
    }
}
