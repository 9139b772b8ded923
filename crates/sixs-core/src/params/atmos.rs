//! Atmospheric gas profiles: the engine's predefined atmospheres, a user
//! water/ozone column override, a full radiosonde profile, and the
//! latitude/date lookup that picks a predefined atmosphere for a scene.

use super::validation::{require_at_least, require_length_in, require_positive, require_range};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const RADIOSONDE_LEVEL_COUNT: usize = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosType {
    NoGaseousAbsorption,
    Tropical,
    MidlatitudeSummer,
    MidlatitudeWinter,
    SubarcticSummer,
    SubarcticWinter,
    UsStandard1962,
}

impl AtmosType {
    pub const ALL: [Self; 7] = [
        Self::NoGaseousAbsorption,
        Self::Tropical,
        Self::MidlatitudeSummer,
        Self::MidlatitudeWinter,
        Self::SubarcticSummer,
        Self::SubarcticWinter,
        Self::UsStandard1962,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::NoGaseousAbsorption => 0,
            Self::Tropical => 1,
            Self::MidlatitudeSummer => 2,
            Self::MidlatitudeWinter => 3,
            Self::SubarcticSummer => 4,
            Self::SubarcticWinter => 5,
            Self::UsStandard1962 => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoGaseousAbsorption => "no gaseous absorption",
            Self::Tropical => "tropical",
            Self::MidlatitudeSummer => "midlatitude summer",
            Self::MidlatitudeWinter => "midlatitude winter",
            Self::SubarcticSummer => "subarctic summer",
            Self::SubarcticWinter => "subarctic winter",
            Self::UsStandard1962 => "us standard 62",
        }
    }
}

impl Display for AtmosType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

use AtmosType::{
    MidlatitudeSummer as MLS, MidlatitudeWinter as MLW, SubarcticSummer as SAS,
    SubarcticWinter as SAW, Tropical as T,
};

/// Rows run from 80N down to 80S in 10 degree bands; columns are the
/// bimonthly seasons starting January/February.
const SEASONAL_PROFILES: [[AtmosType; 6]; 17] = [
    [SAW, SAW, SAW, MLW, MLW, SAW],
    [SAW, SAW, MLW, MLW, MLW, SAW],
    [MLW, MLW, MLW, SAS, SAS, MLW],
    [MLW, MLW, SAS, SAS, SAS, SAS],
    [SAS, SAS, SAS, MLS, MLS, SAS],
    [MLS, MLS, MLS, T, T, MLS],
    [T, T, T, T, T, T],
    [T, T, T, T, T, T],
    [T, T, T, T, T, T],
    [T, T, T, T, T, T],
    [T, T, T, MLS, MLS, T],
    [MLS, MLS, MLS, MLS, MLS, MLS],
    [SAS, SAS, SAS, SAS, SAS, SAS],
    [SAS, SAS, SAS, MLW, MLW, SAS],
    [MLW, MLW, MLW, MLW, MLW, MLW],
    [MLW, MLW, MLW, MLW, MLW, MLW],
    [MLW, MLW, MLW, MLW, MLW, MLW],
];

/// Picks the predefined atmosphere for a latitude and date.
///
/// Latitude is rounded to the nearest 10 degree band, exact halves going to
/// the even band (45 to 40, 55 to 60), and clamped to 80 degrees either side.
pub fn seasonal_profile(latitude: f64, date: NaiveDate) -> ParameterResult<AtmosType> {
    let latitude = require_range(latitude, -90.0, 90.0, "latitude")?;
    let band = ((latitude / 10.0).round_ties_even() as i32).clamp(-8, 8);
    let row = (8 - band) as usize;
    let column = (date.month0() / 2) as usize;
    Ok(SEASONAL_PROFILES[row][column])
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterAndOzone {
    water: f64,
    ozone: f64,
}

impl WaterAndOzone {
    /// Water vapour column in g/cm2.
    pub fn water(&self) -> f64 {
        self.water
    }

    /// Ozone column in cm-atm.
    pub fn ozone(&self) -> f64 {
        self.ozone
    }

    fn validate(&self) -> ParameterResult<()> {
        require_at_least(self.water, 0.0, "water")?;
        require_at_least(self.ozone, 0.0, "ozone")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiosondeLevel {
    pub altitude_km: f64,
    pub pressure_mb: f64,
    pub temperature_k: f64,
    pub water_density: f64,
    pub ozone_density: f64,
}

impl RadiosondeLevel {
    fn values(&self) -> [f64; 5] {
        [
            self.altitude_km,
            self.pressure_mb,
            self.temperature_k,
            self.water_density,
            self.ozone_density,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiosondeProfile {
    levels: Vec<RadiosondeLevel>,
}

impl RadiosondeProfile {
    pub fn levels(&self) -> &[RadiosondeLevel] {
        &self.levels
    }

    fn validate(&self) -> ParameterResult<()> {
        require_length_in(self.levels.len(), &[RADIOSONDE_LEVEL_COUNT], "radiosonde levels")?;
        for level in &self.levels {
            require_at_least(level.altitude_km, 0.0, "altitude_km")?;
            require_positive(level.pressure_mb, "pressure_mb")?;
            require_positive(level.temperature_k, "temperature_k")?;
            require_at_least(level.water_density, 0.0, "water_density")?;
            require_at_least(level.ozone_density, 0.0, "ozone_density")?;
        }
        if let Some(pair) = self
            .levels
            .windows(2)
            .find(|pair| pair[1].altitude_km <= pair[0].altitude_km)
        {
            return Err(ParameterError::new(
                "altitude_km",
                pair[1].altitude_km,
                format!(
                    "levels must increase in altitude (previous {})",
                    pair[0].altitude_km
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosProfile {
    Predefined(AtmosType),
    UserWaterAndOzone(WaterAndOzone),
    Radiosonde(RadiosondeProfile),
}

impl Default for AtmosProfile {
    fn default() -> Self {
        Self::Predefined(AtmosType::MidlatitudeSummer)
    }
}

impl From<AtmosType> for AtmosProfile {
    fn from(kind: AtmosType) -> Self {
        Self::Predefined(kind)
    }
}

impl AtmosProfile {
    pub fn predefined(kind: AtmosType) -> Self {
        Self::Predefined(kind)
    }

    pub fn user_water_and_ozone(water: f64, ozone: f64) -> ParameterResult<Self> {
        let columns = WaterAndOzone { water, ozone };
        columns.validate()?;
        Ok(Self::UserWaterAndOzone(columns))
    }

    pub fn radiosonde(levels: Vec<RadiosondeLevel>) -> ParameterResult<Self> {
        let profile = RadiosondeProfile { levels };
        profile.validate()?;
        Ok(Self::Radiosonde(profile))
    }

    /// Resolves immediately to the matching predefined atmosphere; `date` is
    /// an ISO `YYYY-MM-DD` string.
    pub fn from_latitude_and_date(latitude: f64, date: &str) -> ParameterResult<Self> {
        let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|error| {
            ParameterError::new("date", date, format!("expected YYYY-MM-DD ({error})"))
        })?;
        Ok(Self::Predefined(seasonal_profile(latitude, parsed)?))
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Predefined(kind) => kind.code(),
            Self::Radiosonde(_) => 7,
            Self::UserWaterAndOzone(_) => 8,
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::Predefined(_) => Ok(()),
            Self::UserWaterAndOzone(columns) => columns.validate(),
            Self::Radiosonde(profile) => profile.validate(),
        }
    }
}

impl ControlSection for AtmosProfile {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self {
            Self::Predefined(kind) => writer.code(kind.code(), kind.as_str()),
            Self::UserWaterAndOzone(columns) => {
                writer.code(self.code(), "user water and ozone");
                writer.record(&[columns.water, columns.ozone], "");
            }
            Self::Radiosonde(profile) => {
                writer.code(self.code(), "radiosonde profile");
                for level in &profile.levels {
                    writer.series(&level.values());
                }
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let code = reader.read_code("atmosphere code")?;
        match code {
            7 => {
                let mut levels = Vec::with_capacity(RADIOSONDE_LEVEL_COUNT);
                for _ in 0..RADIOSONDE_LEVEL_COUNT {
                    let [altitude_km, pressure_mb, temperature_k, water_density, ozone_density] =
                        reader.read_array::<5>("radiosonde level")?;
                    levels.push(RadiosondeLevel {
                        altitude_km,
                        pressure_mb,
                        temperature_k,
                        water_density,
                        ozone_density,
                    });
                }
                reader.at_line(Self::radiosonde(levels))
            }
            8 => {
                let [water, ozone] = reader.read_array::<2>("water and ozone")?;
                reader.at_line(Self::user_water_and_ozone(water, ozone))
            }
            other => match AtmosType::from_code(other) {
                Some(kind) => Ok(Self::Predefined(kind)),
                None => reader.unknown_code("atmosphere", other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AtmosProfile, AtmosType, RADIOSONDE_LEVEL_COUNT, RadiosondeLevel, seasonal_profile,
    };
    use crate::control::{ControlReader, ControlSection, ControlWriter};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn standard_levels() -> Vec<RadiosondeLevel> {
        (0..RADIOSONDE_LEVEL_COUNT)
            .map(|index| {
                let altitude_km = index as f64 * 2.5;
                RadiosondeLevel {
                    altitude_km,
                    pressure_mb: 1013.0 * (-altitude_km / 7.0).exp(),
                    temperature_k: 288.0 - altitude_km.min(11.0) * 6.5,
                    water_density: 5.9 * (-altitude_km / 2.0).exp(),
                    ozone_density: 5.4e-5,
                }
            })
            .collect()
    }

    #[test]
    fn latitude_and_date_resolves_to_predefined_profile() {
        let resolved =
            AtmosProfile::from_latitude_and_date(53.0, "2015-07-14").expect("valid inputs");
        assert_eq!(resolved, AtmosProfile::Predefined(AtmosType::SubarcticSummer));
    }

    #[test]
    fn seasonal_table_covers_both_hemispheres() {
        assert_eq!(
            seasonal_profile(0.0, date(2020, 1, 1)),
            Ok(AtmosType::Tropical)
        );
        assert_eq!(
            seasonal_profile(47.0, date(2020, 1, 15)),
            Ok(AtmosType::MidlatitudeWinter)
        );
        assert_eq!(
            seasonal_profile(-37.0, date(2020, 7, 1)),
            Ok(AtmosType::SubarcticSummer)
        );
        assert_eq!(
            seasonal_profile(90.0, date(2020, 12, 31)),
            Ok(AtmosType::SubarcticWinter)
        );
        assert_eq!(
            seasonal_profile(-90.0, date(2020, 12, 31)),
            Ok(AtmosType::MidlatitudeWinter)
        );
    }

    #[test]
    fn exact_half_bands_round_to_even() {
        let january = date(2020, 1, 15);
        // 45 joins the 40N row, 55 the 60N row
        assert_eq!(seasonal_profile(45.0, january), seasonal_profile(40.0, january));
        assert_eq!(seasonal_profile(45.0, january), Ok(AtmosType::SubarcticSummer));
        assert_eq!(seasonal_profile(55.0, january), seasonal_profile(60.0, january));
        assert_eq!(seasonal_profile(55.0, january), Ok(AtmosType::MidlatitudeWinter));
        assert_eq!(seasonal_profile(-25.0, january), seasonal_profile(-20.0, january));
        assert_eq!(seasonal_profile(-35.0, january), seasonal_profile(-40.0, january));
        assert_eq!(seasonal_profile(-35.0, january), Ok(AtmosType::SubarcticSummer));
    }

    #[test]
    fn invalid_latitude_or_date_fails() {
        let error = AtmosProfile::from_latitude_and_date(91.0, "2015-07-14")
            .expect_err("latitude out of range");
        assert_eq!(error.field(), "latitude");

        let error = AtmosProfile::from_latitude_and_date(53.0, "14/07/2015")
            .expect_err("unparsable date");
        assert_eq!(error.field(), "date");

        assert!(AtmosProfile::from_latitude_and_date(53.0, "2015-02-30").is_err());
    }

    #[test]
    fn water_and_ozone_must_be_non_negative() {
        assert!(AtmosProfile::user_water_and_ozone(3.0, 3.5).is_ok());
        assert!(AtmosProfile::user_water_and_ozone(-0.1, 3.5).is_err());
    }

    #[test]
    fn radiosonde_requires_full_increasing_profile() {
        assert!(AtmosProfile::radiosonde(standard_levels()).is_ok());

        let mut short = standard_levels();
        short.pop();
        assert!(AtmosProfile::radiosonde(short).is_err());

        let mut unordered = standard_levels();
        unordered.swap(3, 4);
        let error = AtmosProfile::radiosonde(unordered).expect_err("altitudes must increase");
        assert_eq!(error.field(), "altitude_km");
    }

    #[test]
    fn sections_read_back_to_equal_profiles() {
        let profiles = [
            AtmosProfile::default(),
            AtmosProfile::Predefined(AtmosType::NoGaseousAbsorption),
            AtmosProfile::user_water_and_ozone(0.29, 0.41).expect("valid columns"),
            AtmosProfile::radiosonde(standard_levels()).expect("valid radiosonde"),
        ];

        for profile in profiles {
            let mut writer = ControlWriter::new();
            profile.write_section(&mut writer);
            let text = writer.finish();

            let mut reader = ControlReader::new(&text);
            let decoded = AtmosProfile::read_section(&mut reader).expect("section reads back");
            reader.finish().expect("section fully consumed");
            assert_eq!(decoded, profile);
        }
    }

    #[test]
    fn water_and_ozone_layout() {
        let mut writer = ControlWriter::new();
        AtmosProfile::user_water_and_ozone(3.0, 3.5)
            .expect("valid columns")
            .write_section(&mut writer);
        assert_eq!(writer.finish(), "8 (user water and ozone)\n3 3.5\n");
    }
}
