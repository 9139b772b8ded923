//! Spectral conditions: one wavelength, a predefined sensor band, a band with
//! a unit filter, or a user filter function sampled every 2.5 nm.

use super::validation::{require_length_in, require_range};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const MIN_WAVELENGTH_UM: f64 = 0.2;
pub const MAX_WAVELENGTH_UM: f64 = 4.0;
pub const FILTER_STEP_UM: f64 = 0.0025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredefinedBand {
    MeteosatVisible,
    GoesEastVisible,
    GoesWestVisible,
    AvhrrNoaa6B1,
    AvhrrNoaa6B2,
    AvhrrNoaa7B1,
    AvhrrNoaa7B2,
    AvhrrNoaa8B1,
    AvhrrNoaa8B2,
    AvhrrNoaa9B1,
    AvhrrNoaa9B2,
    AvhrrNoaa10B1,
    AvhrrNoaa10B2,
    AvhrrNoaa11B1,
    AvhrrNoaa11B2,
    SpotHrv1B1,
    SpotHrv1B2,
    SpotHrv1B3,
    SpotHrv1Pan,
    SpotHrv2B1,
    SpotHrv2B2,
    SpotHrv2B3,
    SpotHrv2Pan,
    LandsatTmB1,
    LandsatTmB2,
    LandsatTmB3,
    LandsatTmB4,
    LandsatTmB5,
    LandsatTmB7,
    LandsatMssB1,
    LandsatMssB2,
    LandsatMssB3,
    LandsatMssB4,
    MasB1,
    MasB2,
    MasB3,
    MasB4,
    MasB5,
    MasB6,
    MasB7,
    ModisB1,
    ModisB2,
    ModisB3,
    ModisB4,
    ModisB5,
    ModisB6,
    ModisB7,
    ModisB8,
    AvhrrNoaa12B1,
    AvhrrNoaa12B2,
    AvhrrNoaa14B1,
}

/// Engine code and the band limits in micrometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandInfo {
    pub code: i32,
    pub name: &'static str,
    pub start_um: f64,
    pub end_um: f64,
}

const fn band(code: i32, name: &'static str, start_um: f64, end_um: f64) -> BandInfo {
    BandInfo {
        code,
        name,
        start_um,
        end_um,
    }
}

impl PredefinedBand {
    pub const ALL: [Self; 51] = [
        Self::MeteosatVisible,
        Self::GoesEastVisible,
        Self::GoesWestVisible,
        Self::AvhrrNoaa6B1,
        Self::AvhrrNoaa6B2,
        Self::AvhrrNoaa7B1,
        Self::AvhrrNoaa7B2,
        Self::AvhrrNoaa8B1,
        Self::AvhrrNoaa8B2,
        Self::AvhrrNoaa9B1,
        Self::AvhrrNoaa9B2,
        Self::AvhrrNoaa10B1,
        Self::AvhrrNoaa10B2,
        Self::AvhrrNoaa11B1,
        Self::AvhrrNoaa11B2,
        Self::SpotHrv1B1,
        Self::SpotHrv1B2,
        Self::SpotHrv1B3,
        Self::SpotHrv1Pan,
        Self::SpotHrv2B1,
        Self::SpotHrv2B2,
        Self::SpotHrv2B3,
        Self::SpotHrv2Pan,
        Self::LandsatTmB1,
        Self::LandsatTmB2,
        Self::LandsatTmB3,
        Self::LandsatTmB4,
        Self::LandsatTmB5,
        Self::LandsatTmB7,
        Self::LandsatMssB1,
        Self::LandsatMssB2,
        Self::LandsatMssB3,
        Self::LandsatMssB4,
        Self::MasB1,
        Self::MasB2,
        Self::MasB3,
        Self::MasB4,
        Self::MasB5,
        Self::MasB6,
        Self::MasB7,
        Self::ModisB1,
        Self::ModisB2,
        Self::ModisB3,
        Self::ModisB4,
        Self::ModisB5,
        Self::ModisB6,
        Self::ModisB7,
        Self::ModisB8,
        Self::AvhrrNoaa12B1,
        Self::AvhrrNoaa12B2,
        Self::AvhrrNoaa14B1,
    ];

    pub const fn info(self) -> BandInfo {
        match self {
            Self::MeteosatVisible => band(2, "METEOSAT_VISIBLE", 0.35, 1.11),
            Self::GoesEastVisible => band(3, "GOES_EAST_VISIBLE", 0.49, 0.9),
            Self::GoesWestVisible => band(4, "GOES_WEST_VISIBLE", 0.49, 0.9),
            Self::AvhrrNoaa6B1 => band(5, "AVHRR_NOAA6_B1", 0.505, 0.8),
            Self::AvhrrNoaa6B2 => band(6, "AVHRR_NOAA6_B2", 0.65, 1.2),
            Self::AvhrrNoaa7B1 => band(7, "AVHRR_NOAA7_B1", 0.5, 0.8),
            Self::AvhrrNoaa7B2 => band(8, "AVHRR_NOAA7_B2", 0.64, 1.17),
            Self::AvhrrNoaa8B1 => band(9, "AVHRR_NOAA8_B1", 0.54, 1.01),
            Self::AvhrrNoaa8B2 => band(10, "AVHRR_NOAA8_B2", 0.68, 1.12),
            Self::AvhrrNoaa9B1 => band(11, "AVHRR_NOAA9_B1", 0.53, 0.81),
            Self::AvhrrNoaa9B2 => band(12, "AVHRR_NOAA9_B2", 0.68, 1.17),
            Self::AvhrrNoaa10B1 => band(13, "AVHRR_NOAA10_B1", 0.53, 0.78),
            Self::AvhrrNoaa10B2 => band(14, "AVHRR_NOAA10_B2", 0.6, 1.19),
            Self::AvhrrNoaa11B1 => band(15, "AVHRR_NOAA11_B1", 0.54, 0.82),
            Self::AvhrrNoaa11B2 => band(16, "AVHRR_NOAA11_B2", 0.6, 1.12),
            Self::SpotHrv1B1 => band(17, "SPOT_HRV1_B1", 0.47, 0.65),
            Self::SpotHrv1B2 => band(18, "SPOT_HRV1_B2", 0.58, 0.7),
            Self::SpotHrv1B3 => band(19, "SPOT_HRV1_B3", 0.73, 0.93),
            Self::SpotHrv1Pan => band(20, "SPOT_HRV1_PAN", 0.47, 0.79),
            Self::SpotHrv2B1 => band(21, "SPOT_HRV2_B1", 0.47, 0.65),
            Self::SpotHrv2B2 => band(22, "SPOT_HRV2_B2", 0.59, 0.73),
            Self::SpotHrv2B3 => band(23, "SPOT_HRV2_B3", 0.74, 0.94),
            Self::SpotHrv2Pan => band(24, "SPOT_HRV2_PAN", 0.47, 0.79),
            Self::LandsatTmB1 => band(25, "LANDSAT_TM_B1", 0.43, 0.56),
            Self::LandsatTmB2 => band(26, "LANDSAT_TM_B2", 0.5, 0.65),
            Self::LandsatTmB3 => band(27, "LANDSAT_TM_B3", 0.58, 0.74),
            Self::LandsatTmB4 => band(28, "LANDSAT_TM_B4", 0.73, 0.95),
            Self::LandsatTmB5 => band(29, "LANDSAT_TM_B5", 1.5025, 1.89),
            Self::LandsatTmB7 => band(30, "LANDSAT_TM_B7", 1.95, 2.41),
            Self::LandsatMssB1 => band(31, "LANDSAT_MSS_B1", 0.475, 0.64),
            Self::LandsatMssB2 => band(32, "LANDSAT_MSS_B2", 0.58, 0.75),
            Self::LandsatMssB3 => band(33, "LANDSAT_MSS_B3", 0.655, 0.855),
            Self::LandsatMssB4 => band(34, "LANDSAT_MSS_B4", 0.785, 1.1),
            Self::MasB1 => band(35, "MAS_B1", 0.525, 0.595),
            Self::MasB2 => band(36, "MAS_B2", 0.6, 0.7),
            Self::MasB3 => band(37, "MAS_B3", 0.645, 0.7),
            Self::MasB4 => band(38, "MAS_B4", 0.6925, 0.7175),
            Self::MasB5 => band(39, "MAS_B5", 0.8475, 0.9075),
            Self::MasB6 => band(40, "MAS_B6", 0.8875, 0.9125),
            Self::MasB7 => band(41, "MAS_B7", 1.6, 1.665),
            Self::ModisB1 => band(42, "MODIS_B1", 0.61, 0.685),
            Self::ModisB2 => band(43, "MODIS_B2", 0.82, 0.9025),
            Self::ModisB3 => band(44, "MODIS_B3", 0.45, 0.4825),
            Self::ModisB4 => band(45, "MODIS_B4", 0.54, 0.57),
            Self::ModisB5 => band(46, "MODIS_B5", 1.215, 1.27),
            Self::ModisB6 => band(47, "MODIS_B6", 1.6, 1.665),
            Self::ModisB7 => band(48, "MODIS_B7", 2.0575, 2.1825),
            Self::ModisB8 => band(49, "MODIS_B8", 0.4025, 0.4225),
            Self::AvhrrNoaa12B1 => band(50, "AVHRR_NOAA12_B1", 0.5, 1.0),
            Self::AvhrrNoaa12B2 => band(51, "AVHRR_NOAA12_B2", 0.65, 1.12),
            Self::AvhrrNoaa14B1 => band(52, "AVHRR_NOAA14_B1", 0.5, 1.11),
        }
    }

    pub const fn code(self) -> i32 {
        self.info().code
    }

    pub const fn as_str(self) -> &'static str {
        self.info().name
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl Display for PredefinedBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Number of 2.5 nm samples from `start` to `end` inclusive.
pub fn filter_sample_count(start_um: f64, end_um: f64) -> usize {
    ((end_um - start_um) / FILTER_STEP_UM).round() as usize + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct SpectralRange {
    start_um: f64,
    end_um: f64,
}

#[derive(Deserialize)]
struct RangeFields {
    start_um: f64,
    end_um: f64,
}

impl TryFrom<RangeFields> for SpectralRange {
    type Error = ParameterError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        Self::new(fields.start_um, fields.end_um)
    }
}

impl SpectralRange {
    pub fn new(start_um: f64, end_um: f64) -> ParameterResult<Self> {
        let range = Self { start_um, end_um };
        range.validate()?;
        Ok(range)
    }

    pub fn start_um(&self) -> f64 {
        self.start_um
    }

    pub fn end_um(&self) -> f64 {
        self.end_um
    }

    fn validate(&self) -> ParameterResult<()> {
        require_range(self.start_um, MIN_WAVELENGTH_UM, MAX_WAVELENGTH_UM, "start_um")?;
        require_range(self.end_um, MIN_WAVELENGTH_UM, MAX_WAVELENGTH_UM, "end_um")?;
        if self.end_um <= self.start_um {
            return Err(ParameterError::new(
                "end_um",
                self.end_um,
                format!("must exceed start_um {}", self.start_um),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilterFields")]
pub struct FilterFunction {
    range: SpectralRange,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct FilterFields {
    range: SpectralRange,
    values: Vec<f64>,
}

impl TryFrom<FilterFields> for FilterFunction {
    type Error = ParameterError;

    fn try_from(fields: FilterFields) -> Result<Self, Self::Error> {
        let filter = Self {
            range: fields.range,
            values: fields.values,
        };
        filter.validate()?;
        Ok(filter)
    }
}

impl FilterFunction {
    pub fn range(&self) -> SpectralRange {
        self.range
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn validate(&self) -> ParameterResult<()> {
        self.range.validate()?;
        let expected = filter_sample_count(self.range.start_um, self.range.end_um);
        require_length_in(self.values.len(), &[expected], "filter values")?;
        for value in &self.values {
            require_range(*value, 0.0, 1.0, "filter values")?;
        }
        Ok(())
    }
}

/// Monochromatic wavelength in micrometres, inside the engine's tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Monochromatic(f64);

impl Monochromatic {
    pub fn new(micrometres: f64) -> ParameterResult<Self> {
        require_range(micrometres, MIN_WAVELENGTH_UM, MAX_WAVELENGTH_UM, "wavelength")?;
        Ok(Self(micrometres))
    }

    pub fn micrometres(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Monochromatic {
    type Error = ParameterError;

    fn try_from(micrometres: f64) -> Result<Self, Self::Error> {
        Self::new(micrometres)
    }
}

impl From<Monochromatic> for f64 {
    fn from(wavelength: Monochromatic) -> Self {
        wavelength.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wavelength {
    Single(Monochromatic),
    Predefined(PredefinedBand),
    Band(SpectralRange),
    FilterFunction(FilterFunction),
}

impl Default for Wavelength {
    fn default() -> Self {
        Self::Single(Monochromatic(0.5))
    }
}

impl From<PredefinedBand> for Wavelength {
    fn from(band: PredefinedBand) -> Self {
        Self::Predefined(band)
    }
}

impl Wavelength {
    pub fn single(micrometres: f64) -> ParameterResult<Self> {
        Ok(Self::Single(Monochromatic::new(micrometres)?))
    }

    pub fn predefined(band: PredefinedBand) -> Self {
        Self::Predefined(band)
    }

    pub fn band(start_um: f64, end_um: f64) -> ParameterResult<Self> {
        Ok(Self::Band(SpectralRange::new(start_um, end_um)?))
    }

    pub fn filter_function(start_um: f64, end_um: f64, values: Vec<f64>) -> ParameterResult<Self> {
        let filter = FilterFunction {
            range: SpectralRange::new(start_um, end_um)?,
            values,
        };
        filter.validate()?;
        Ok(Self::FilterFunction(filter))
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Single(_) => -1,
            Self::FilterFunction(_) => 0,
            Self::Band(_) => 1,
            Self::Predefined(band) => band.code(),
        }
    }

    /// Lower and upper limits in micrometres.
    pub fn limits(&self) -> (f64, f64) {
        match self {
            Self::Single(single) => (single.micrometres(), single.micrometres()),
            Self::Predefined(band) => {
                let info = band.info();
                (info.start_um, info.end_um)
            }
            Self::Band(range) => (range.start_um, range.end_um),
            Self::FilterFunction(filter) => (filter.range.start_um, filter.range.end_um),
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::Single(_) | Self::Predefined(_) => Ok(()),
            Self::Band(range) => range.validate(),
            Self::FilterFunction(filter) => filter.validate(),
        }
    }
}

impl ControlSection for Wavelength {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self {
            Self::Single(single) => {
                writer.code(-1, "monochromatic");
                writer.value(single.micrometres(), "wavelength in micrometres");
            }
            Self::Predefined(band) => writer.code(band.code(), band.as_str()),
            Self::Band(range) => {
                writer.code(1, "band with unit filter");
                writer.record(&[range.start_um, range.end_um], "start and end");
            }
            Self::FilterFunction(filter) => {
                writer.code(0, "user filter function");
                writer.record(&[filter.range.start_um, filter.range.end_um], "start and end");
                writer.series(&filter.values);
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let code = reader.read_code("wavelength code")?;
        match code {
            -1 => {
                let micrometres = reader.read_value("wavelength")?;
                reader.at_line(Self::single(micrometres))
            }
            0 => {
                let [start_um, end_um] = reader.read_array::<2>("filter range")?;
                let range = reader.at_line(SpectralRange::new(start_um, end_um))?;
                let count = filter_sample_count(range.start_um, range.end_um);
                let values = reader.read_values(count, "filter values")?;
                reader.at_line(Self::filter_function(start_um, end_um, values))
            }
            1 => {
                let [start_um, end_um] = reader.read_array::<2>("band range")?;
                reader.at_line(Self::band(start_um, end_um))
            }
            other => match PredefinedBand::from_code(other) {
                Some(band) => Ok(Self::Predefined(band)),
                None => reader.unknown_code("wavelength", other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PredefinedBand, Wavelength, filter_sample_count};
    use crate::control::{ControlReader, ControlSection, ControlWriter};

    fn compiled(wavelength: &Wavelength) -> String {
        let mut writer = ControlWriter::new();
        wavelength.write_section(&mut writer);
        writer.finish()
    }

    #[test]
    fn band_codes_are_unique_and_contiguous() {
        let codes = PredefinedBand::ALL
            .iter()
            .map(|band| band.code())
            .collect::<Vec<_>>();
        assert_eq!(codes, (2..=52).collect::<Vec<_>>());

        for band in PredefinedBand::ALL {
            let info = band.info();
            assert!(info.start_um < info.end_um, "{} limits", info.name);
        }
    }

    #[test]
    fn band_lookup_by_code_and_name() {
        assert_eq!(PredefinedBand::from_code(11), Some(PredefinedBand::AvhrrNoaa9B1));
        assert_eq!(PredefinedBand::from_code(45), Some(PredefinedBand::ModisB4));
        assert_eq!(PredefinedBand::from_code(53), None);
        assert_eq!(
            PredefinedBand::from_name("avhrr_noaa11_b1"),
            Some(PredefinedBand::AvhrrNoaa11B1)
        );
    }

    #[test]
    fn band_json_uses_engine_names() {
        let json = serde_json::to_string(&PredefinedBand::AvhrrNoaa9B1).expect("encode band");
        assert_eq!(json, "\"AVHRR_NOAA9_B1\"");
        let band: PredefinedBand = serde_json::from_str("\"SPOT_HRV1_PAN\"").expect("decode band");
        assert_eq!(band, PredefinedBand::SpotHrv1Pan);
    }

    #[test]
    fn single_wavelength_must_lie_in_engine_range() {
        assert!(Wavelength::single(0.55).is_ok());
        assert!(Wavelength::single(0.2).is_ok());
        let error = Wavelength::single(4.5).expect_err("beyond 4 micrometres");
        assert_eq!(error.field(), "wavelength");
        assert!(Wavelength::single(0.1).is_err());
    }

    #[test]
    fn deserialised_wavelengths_are_validated() {
        let wavelength: Wavelength =
            serde_json::from_str(r#"{"single": 0.55}"#).expect("monochromatic JSON");
        assert_eq!(wavelength.limits(), (0.55, 0.55));

        let error = serde_json::from_str::<Wavelength>(r#"{"single": 9.0}"#)
            .expect_err("outside the engine tables");
        assert!(error.to_string().contains("wavelength"), "{error}");

        let error = serde_json::from_str::<Wavelength>(
            r#"{"band": {"start_um": 0.6, "end_um": 0.5}}"#,
        )
        .expect_err("reversed band");
        assert!(error.to_string().contains("end_um"), "{error}");

        let error = serde_json::from_str::<Wavelength>(
            r#"{"filter_function": {"range": {"start_um": 0.4, "end_um": 0.41}, "values": [1.0]}}"#,
        )
        .expect_err("short filter");
        assert!(error.to_string().contains("filter values"), "{error}");
    }

    #[test]
    fn filter_length_must_match_sampling() {
        assert_eq!(filter_sample_count(0.4, 0.41), 5);
        assert!(Wavelength::filter_function(0.4, 0.41, vec![1.0; 5]).is_ok());

        let error = Wavelength::filter_function(0.4, 0.41, vec![1.0; 4])
            .expect_err("one sample short");
        assert_eq!(error.value(), "length 4");
    }

    #[test]
    fn sections_read_back() {
        let wavelengths = [
            Wavelength::default(),
            Wavelength::predefined(PredefinedBand::AvhrrNoaa9B1),
            Wavelength::band(0.5, 0.6).expect("band"),
            Wavelength::filter_function(0.4, 0.41, vec![0.1, 0.5, 1.0, 0.5, 0.1])
                .expect("filter"),
        ];

        for wavelength in wavelengths {
            let text = compiled(&wavelength);
            let mut reader = ControlReader::new(&text);
            let decoded = Wavelength::read_section(&mut reader).expect("section reads back");
            reader.finish().expect("section fully consumed");
            assert_eq!(decoded, wavelength);
        }
    }

    #[test]
    fn predefined_band_writes_its_code() {
        assert_eq!(
            compiled(&Wavelength::predefined(PredefinedBand::AvhrrNoaa9B1)),
            "11 (AVHRR_NOAA9_B1)\n"
        );
        assert_eq!(
            compiled(&Wavelength::default()),
            "-1 (monochromatic)\n0.5 (wavelength in micrometres)\n"
        );
    }
}
