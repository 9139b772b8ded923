//! Optional inversion request: recover surface reflectance from a measured
//! apparent reflectance or radiance.
//!
//! Encoding: `-1` for no correction, `0` Lambertian, `1` BRDF, followed by the
//! measurement. A negative measurement is a reflectance, a non-negative one a
//! radiance in W/m2/sr/µm.

use super::validation::{require_at_least, require_range};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionInput {
    Reflectance(f64),
    Radiance(f64),
}

impl CorrectionInput {
    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::Reflectance(value) => {
                require_range(*value, 0.0, 1.0, "correction reflectance")?;
                if *value == 0.0 {
                    // zero would be read back as a radiance
                    return Err(ParameterError::new(
                        "correction reflectance",
                        value,
                        "must lie in (0, 1]",
                    ));
                }
            }
            Self::Radiance(value) => {
                require_at_least(*value, 0.0, "correction radiance")?;
            }
        }
        Ok(())
    }

    fn encoded(&self) -> f64 {
        match self {
            Self::Reflectance(value) => -value,
            Self::Radiance(value) => *value,
        }
    }

    fn decode(value: f64) -> Self {
        if value < 0.0 {
            Self::Reflectance(-value)
        } else {
            Self::Radiance(value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosCorrection {
    #[default]
    None,
    Lambertian(CorrectionInput),
    Brdf(CorrectionInput),
}

impl AtmosCorrection {
    pub fn lambertian_from_reflectance(reflectance: f64) -> ParameterResult<Self> {
        Self::checked(Self::Lambertian(CorrectionInput::Reflectance(reflectance)))
    }

    pub fn lambertian_from_radiance(radiance: f64) -> ParameterResult<Self> {
        Self::checked(Self::Lambertian(CorrectionInput::Radiance(radiance)))
    }

    pub fn brdf_from_reflectance(reflectance: f64) -> ParameterResult<Self> {
        Self::checked(Self::Brdf(CorrectionInput::Reflectance(reflectance)))
    }

    pub fn brdf_from_radiance(radiance: f64) -> ParameterResult<Self> {
        Self::checked(Self::Brdf(CorrectionInput::Radiance(radiance)))
    }

    fn checked(correction: Self) -> ParameterResult<Self> {
        correction.validate()?;
        Ok(correction)
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::None => -1,
            Self::Lambertian(_) => 0,
            Self::Brdf(_) => 1,
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::None => Ok(()),
            Self::Lambertian(input) | Self::Brdf(input) => input.validate(),
        }
    }
}

impl ControlSection for AtmosCorrection {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self {
            Self::None => writer.code(-1, "no atmospheric correction"),
            Self::Lambertian(input) => {
                writer.code(0, "lambertian correction");
                writer.value(input.encoded(), "measurement");
            }
            Self::Brdf(input) => {
                writer.code(1, "brdf correction");
                writer.value(input.encoded(), "measurement");
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let code = reader.read_code("atmospheric correction code")?;
        let correction = match code {
            -1 => return Ok(Self::None),
            0 => Self::Lambertian(CorrectionInput::decode(reader.read_value("measurement")?)),
            1 => Self::Brdf(CorrectionInput::decode(reader.read_value("measurement")?)),
            other => return reader.unknown_code("atmospheric correction", other),
        };
        reader.at_line(Self::checked(correction))
    }
}
