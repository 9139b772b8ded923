//! Sun and view geometry: free-form angles with a date, or one of the
//! engine's built-in satellite geometries from which it derives the angles.

use super::validation::{require_at_least, require_half_open, require_range};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Leap year used to check day-of-month, so 29 February is always accepted.
const CALENDAR_CHECK_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Meteosat,
    GoesEast,
    GoesWest,
    AvhrrPm,
    AvhrrAm,
    SpotHrv,
    LandsatTm,
}

impl SensorKind {
    pub const ALL: [Self; 7] = [
        Self::Meteosat,
        Self::GoesEast,
        Self::GoesWest,
        Self::AvhrrPm,
        Self::AvhrrAm,
        Self::SpotHrv,
        Self::LandsatTm,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::Meteosat => 1,
            Self::GoesEast => 2,
            Self::GoesWest => 3,
            Self::AvhrrPm => 4,
            Self::AvhrrAm => 5,
            Self::SpotHrv => 6,
            Self::LandsatTm => 7,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meteosat => "METEOSAT",
            Self::GoesEast => "GOES EAST",
            Self::GoesWest => "GOES WEST",
            Self::AvhrrPm => "AVHRR PM",
            Self::AvhrrAm => "AVHRR AM",
            Self::SpotHrv => "SPOT HRV",
            Self::LandsatTm => "LANDSAT TM",
        }
    }

    /// AVHRR overpasses are described by their ascending node, so the
    /// decimal hour is the node time rather than the acquisition time.
    pub const fn uses_orbit_position(self) -> bool {
        matches!(self, Self::AvhrrPm | Self::AvhrrAm)
    }

    const fn expected_position(self) -> &'static str {
        match self {
            Self::Meteosat | Self::GoesEast | Self::GoesWest => "pixel",
            Self::AvhrrPm | Self::AvhrrAm => "orbit",
            Self::SpotHrv | Self::LandsatTm => "ground",
        }
    }
}

impl Display for SensorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Where the sensor looks, in the form its geometry code requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorPosition {
    Pixel {
        column: f64,
        line: f64,
    },
    Orbit {
        column: f64,
        ascending_node_longitude: f64,
    },
    Ground {
        latitude: f64,
        longitude: f64,
    },
}

impl SensorPosition {
    const fn shape(&self) -> &'static str {
        match self {
            Self::Pixel { .. } => "pixel",
            Self::Orbit { .. } => "orbit",
            Self::Ground { .. } => "ground",
        }
    }

    fn validate(&self) -> ParameterResult<()> {
        match *self {
            Self::Pixel { column, line } => {
                require_at_least(column, 0.0, "column")?;
                require_at_least(line, 0.0, "line")?;
            }
            Self::Orbit {
                column,
                ascending_node_longitude,
            } => {
                require_at_least(column, 0.0, "column")?;
                require_range(
                    ascending_node_longitude,
                    -180.0,
                    180.0,
                    "ascending_node_longitude",
                )?;
            }
            Self::Ground {
                latitude,
                longitude,
            } => {
                require_range(latitude, -90.0, 90.0, "latitude")?;
                require_range(longitude, -180.0, 180.0, "longitude")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserGeometry {
    solar_zenith: f64,
    solar_azimuth: f64,
    view_zenith: f64,
    view_azimuth: f64,
    month: u32,
    day: u32,
}

impl UserGeometry {
    pub fn solar_zenith(&self) -> f64 {
        self.solar_zenith
    }

    pub fn solar_azimuth(&self) -> f64 {
        self.solar_azimuth
    }

    pub fn view_zenith(&self) -> f64 {
        self.view_zenith
    }

    pub fn view_azimuth(&self) -> f64 {
        self.view_azimuth
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    fn validate(&self) -> ParameterResult<()> {
        require_range(self.solar_zenith, 0.0, 90.0, "solar_zenith")?;
        require_half_open(self.solar_azimuth, 0.0, 360.0, "solar_azimuth")?;
        require_range(self.view_zenith, 0.0, 90.0, "view_zenith")?;
        require_half_open(self.view_azimuth, 0.0, 360.0, "view_azimuth")?;
        require_calendar_day(self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorGeometry {
    sensor: SensorKind,
    month: u32,
    day: u32,
    gmt_decimal_hour: f64,
    position: SensorPosition,
}

impl SensorGeometry {
    pub fn sensor(&self) -> SensorKind {
        self.sensor
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn gmt_decimal_hour(&self) -> f64 {
        self.gmt_decimal_hour
    }

    pub fn position(&self) -> SensorPosition {
        self.position
    }

    fn validate(&self) -> ParameterResult<()> {
        require_calendar_day(self.month, self.day)?;
        require_range(self.gmt_decimal_hour, 0.0, 24.0, "gmt_decimal_hour")?;
        if self.position.shape() != self.sensor.expected_position() {
            return Err(ParameterError::new(
                "position",
                self.position.shape(),
                format!(
                    "{} geometry requires a {} position",
                    self.sensor,
                    self.sensor.expected_position()
                ),
            ));
        }
        self.position.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    UserDefined(UserGeometry),
    NamedSensor(SensorGeometry),
}

impl Default for Geometry {
    fn default() -> Self {
        Self::UserDefined(UserGeometry {
            solar_zenith: 32.0,
            solar_azimuth: 264.0,
            view_zenith: 23.0,
            view_azimuth: 190.0,
            month: 7,
            day: 14,
        })
    }
}

impl Geometry {
    pub fn user_defined(
        solar_zenith: f64,
        solar_azimuth: f64,
        view_zenith: f64,
        view_azimuth: f64,
        month: u32,
        day: u32,
    ) -> ParameterResult<Self> {
        let geometry = UserGeometry {
            solar_zenith,
            solar_azimuth,
            view_zenith,
            view_azimuth,
            month,
            day,
        };
        geometry.validate()?;
        Ok(Self::UserDefined(geometry))
    }

    /// View angles are never accepted here: the engine derives them from the
    /// sensor's position.
    pub fn named_sensor(
        sensor: SensorKind,
        month: u32,
        day: u32,
        gmt_decimal_hour: f64,
        position: SensorPosition,
    ) -> ParameterResult<Self> {
        let geometry = SensorGeometry {
            sensor,
            month,
            day,
            gmt_decimal_hour,
            position,
        };
        geometry.validate()?;
        Ok(Self::NamedSensor(geometry))
    }

    pub fn meteosat(
        month: u32,
        day: u32,
        gmt_decimal_hour: f64,
        column: f64,
        line: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::Meteosat,
            month,
            day,
            gmt_decimal_hour,
            SensorPosition::Pixel { column, line },
        )
    }

    pub fn goes_east(
        month: u32,
        day: u32,
        gmt_decimal_hour: f64,
        column: f64,
        line: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::GoesEast,
            month,
            day,
            gmt_decimal_hour,
            SensorPosition::Pixel { column, line },
        )
    }

    pub fn goes_west(
        month: u32,
        day: u32,
        gmt_decimal_hour: f64,
        column: f64,
        line: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::GoesWest,
            month,
            day,
            gmt_decimal_hour,
            SensorPosition::Pixel { column, line },
        )
    }

    pub fn avhrr_pm(
        month: u32,
        day: u32,
        column: f64,
        ascending_node_longitude: f64,
        ascending_node_hour: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::AvhrrPm,
            month,
            day,
            ascending_node_hour,
            SensorPosition::Orbit {
                column,
                ascending_node_longitude,
            },
        )
    }

    pub fn avhrr_am(
        month: u32,
        day: u32,
        column: f64,
        ascending_node_longitude: f64,
        ascending_node_hour: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::AvhrrAm,
            month,
            day,
            ascending_node_hour,
            SensorPosition::Orbit {
                column,
                ascending_node_longitude,
            },
        )
    }

    pub fn spot_hrv(
        month: u32,
        day: u32,
        gmt_decimal_hour: f64,
        latitude: f64,
        longitude: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::SpotHrv,
            month,
            day,
            gmt_decimal_hour,
            SensorPosition::Ground {
                latitude,
                longitude,
            },
        )
    }

    pub fn landsat_tm(
        month: u32,
        day: u32,
        gmt_decimal_hour: f64,
        latitude: f64,
        longitude: f64,
    ) -> ParameterResult<Self> {
        Self::named_sensor(
            SensorKind::LandsatTm,
            month,
            day,
            gmt_decimal_hour,
            SensorPosition::Ground {
                latitude,
                longitude,
            },
        )
    }

    pub const fn code(&self) -> i32 {
        match self {
            Self::UserDefined(_) => 0,
            Self::NamedSensor(geometry) => geometry.sensor.code(),
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::UserDefined(geometry) => geometry.validate(),
            Self::NamedSensor(geometry) => geometry.validate(),
        }
    }
}

fn require_calendar_day(month: u32, day: u32) -> ParameterResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ParameterError::new("month", month, "must lie in [1, 12]"));
    }
    if NaiveDate::from_ymd_opt(CALENDAR_CHECK_YEAR, month, day).is_none() {
        return Err(ParameterError::new(
            "day",
            day,
            format!("is not a valid day of month {month}"),
        ));
    }
    Ok(())
}

impl ControlSection for Geometry {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self {
            Self::UserDefined(geometry) => {
                writer.code(0, "user defined geometry");
                writer.record(
                    &[
                        geometry.solar_zenith,
                        geometry.solar_azimuth,
                        geometry.view_zenith,
                        geometry.view_azimuth,
                        f64::from(geometry.month),
                        f64::from(geometry.day),
                    ],
                    "",
                );
            }
            Self::NamedSensor(geometry) => {
                writer.code(geometry.sensor.code(), geometry.sensor.as_str());
                let month = f64::from(geometry.month);
                let day = f64::from(geometry.day);
                let values = match geometry.position {
                    SensorPosition::Pixel { column, line } => {
                        [month, day, geometry.gmt_decimal_hour, column, line]
                    }
                    SensorPosition::Orbit {
                        column,
                        ascending_node_longitude,
                    } => [
                        month,
                        day,
                        column,
                        ascending_node_longitude,
                        geometry.gmt_decimal_hour,
                    ],
                    SensorPosition::Ground {
                        latitude,
                        longitude,
                    } => [month, day, geometry.gmt_decimal_hour, longitude, latitude],
                };
                writer.record(&values, "");
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let code = reader.read_code("geometry code")?;
        if code == 0 {
            let [sz, sa, vz, va, month, day] = reader.read_array::<6>("user geometry")?;
            let month = reader.ordinal(month, "month")?;
            let day = reader.ordinal(day, "day")?;
            return reader.at_line(Self::user_defined(sz, sa, vz, va, month, day));
        }

        let Some(sensor) = SensorKind::from_code(code) else {
            return reader.unknown_code("geometry", code);
        };
        let [month, day, a, b, c] = reader.read_array::<5>("sensor geometry")?;
        let month = reader.ordinal(month, "month")?;
        let day = reader.ordinal(day, "day")?;
        let (gmt_decimal_hour, position) = match sensor {
            SensorKind::Meteosat | SensorKind::GoesEast | SensorKind::GoesWest => {
                (a, SensorPosition::Pixel { column: b, line: c })
            }
            SensorKind::AvhrrPm | SensorKind::AvhrrAm => (
                c,
                SensorPosition::Orbit {
                    column: a,
                    ascending_node_longitude: b,
                },
            ),
            SensorKind::SpotHrv | SensorKind::LandsatTm => (
                a,
                SensorPosition::Ground {
                    latitude: c,
                    longitude: b,
                },
            ),
        };
        reader.at_line(Self::named_sensor(
            sensor,
            month,
            day,
            gmt_decimal_hour,
            position,
        ))
    }
}
