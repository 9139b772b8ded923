//! Ground reflectance: homogeneous Lambertian or BRDF surfaces, and a
//! Lambertian target disc inside a different background.

use super::spectral::{REFERENCE_WAVELENGTH_COUNT, SpectralInput, SpectralTable};
use super::validation::{require_at_least, require_finite, require_half_open, require_open};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterResult, SixsResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundType {
    GreenVegetation,
    ClearWater,
    Sand,
    LakeWater,
}

impl GroundType {
    pub const ALL: [Self; 4] = [
        Self::GreenVegetation,
        Self::ClearWater,
        Self::Sand,
        Self::LakeWater,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::GreenVegetation => 1,
            Self::ClearWater => 2,
            Self::Sand => 3,
            Self::LakeWater => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GreenVegetation => "green vegetation",
            Self::ClearWater => "clear water",
            Self::Sand => "sand",
            Self::LakeWater => "lake water",
        }
    }
}

impl Display for GroundType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Reflectance of one surface: a built-in spectrum or a table on the
/// reference grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectanceSpec {
    Predefined(GroundType),
    Spectral(SpectralTable),
}

impl From<GroundType> for ReflectanceSpec {
    fn from(kind: GroundType) -> Self {
        Self::Predefined(kind)
    }
}

impl ReflectanceSpec {
    /// One value (broadcast) or exactly 20 values, each in [0, 1].
    pub fn spectral(input: impl Into<SpectralInput>) -> ParameterResult<Self> {
        let table = SpectralTable::broadcast(input, "reflectance")?;
        table.require_each_in(0.0, 1.0, "reflectance")?;
        Ok(Self::Spectral(table))
    }

    /// 0 for a constant reflectance, -1 for a per-wavelength table.
    pub fn code(&self) -> i32 {
        match self {
            Self::Predefined(kind) => kind.code(),
            Self::Spectral(table) if table.is_uniform() => 0,
            Self::Spectral(_) => -1,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Predefined(kind) => kind.as_str(),
            Self::Spectral(table) if table.is_uniform() => "constant reflectance",
            Self::Spectral(_) => "spectral reflectance",
        }
    }

    fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::Predefined(_) => Ok(()),
            Self::Spectral(table) => table.require_each_in(0.0, 1.0, "reflectance"),
        }
    }

    fn write_values(&self, writer: &mut ControlWriter) {
        match self {
            Self::Predefined(_) => {}
            Self::Spectral(table) if table.is_uniform() => {
                writer.value(table.values()[0], "reflectance");
            }
            Self::Spectral(table) => writer.series(table.values()),
        }
    }

    fn read_from_code(code: i32, reader: &mut ControlReader) -> SixsResult<Self> {
        match code {
            0 => {
                let value = reader.read_value("reflectance")?;
                reader.at_line(Self::spectral(value))
            }
            -1 => {
                let values =
                    reader.read_values(REFERENCE_WAVELENGTH_COUNT, "spectral reflectance")?;
                reader.at_line(Self::spectral(values))
            }
            other => match GroundType::from_code(other) {
                Some(kind) => Ok(Self::Predefined(kind)),
                None => reader.unknown_code("ground type", other),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OceanSurface {
    wind_speed: f64,
    wind_azimuth: f64,
    salinity: f64,
    pigment: f64,
}

impl OceanSurface {
    pub fn new(
        wind_speed: f64,
        wind_azimuth: f64,
        salinity: f64,
        pigment: f64,
    ) -> ParameterResult<Self> {
        let surface = Self {
            wind_speed,
            wind_azimuth,
            salinity,
            pigment,
        };
        surface.validate()?;
        Ok(surface)
    }

    /// Wind speed (m/s), wind azimuth (deg), salinity (ppt), pigment (mg/m3).
    pub fn values(&self) -> [f64; 4] {
        [self.wind_speed, self.wind_azimuth, self.salinity, self.pigment]
    }

    fn validate(&self) -> ParameterResult<()> {
        require_at_least(self.wind_speed, 0.0, "wind_speed")?;
        require_half_open(self.wind_azimuth, 0.0, 360.0, "wind_azimuth")?;
        require_at_least(self.salinity, 0.0, "salinity")?;
        require_at_least(self.pigment, 0.0, "pigment")?;
        Ok(())
    }
}

/// Directional reflectance models with their kernel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum BrdfModel {
    Hapke { om: f64, af: f64, s0: f64, h: f64 },
    Roujean { k0: f64, k1: f64, k2: f64 },
    Walthall { a: f64, ap: f64, b: f64, c: f64 },
    Minnaert { k: f64, b: f64 },
    Ocean(OceanSurface),
    Rahman { rho0: f64, af: f64, k: f64 },
    Modis { p1: f64, p2: f64, p3: f64 },
}

impl BrdfModel {
    pub const fn code(&self) -> i32 {
        match self {
            Self::Hapke { .. } => 1,
            Self::Roujean { .. } => 3,
            Self::Walthall { .. } => 4,
            Self::Minnaert { .. } => 5,
            Self::Ocean(_) => 6,
            Self::Rahman { .. } => 8,
            Self::Modis { .. } => 10,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hapke { .. } => "hapke",
            Self::Roujean { .. } => "roujean",
            Self::Walthall { .. } => "walthall",
            Self::Minnaert { .. } => "minnaert",
            Self::Ocean(_) => "ocean",
            Self::Rahman { .. } => "rahman",
            Self::Modis { .. } => "modis brdf",
        }
    }

    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::Hapke { om, af, s0, h } => vec![om, af, s0, h],
            Self::Roujean { k0, k1, k2 } => vec![k0, k1, k2],
            Self::Walthall { a, ap, b, c } => vec![a, ap, b, c],
            Self::Minnaert { k, b } => vec![k, b],
            Self::Ocean(surface) => surface.values().to_vec(),
            Self::Rahman { rho0, af, k } => vec![rho0, af, k],
            Self::Modis { p1, p2, p3 } => vec![p1, p2, p3],
        }
    }

    fn validate(&self) -> ParameterResult<()> {
        if let Self::Ocean(surface) = self {
            return surface.validate();
        }
        for value in self.parameters() {
            require_finite(value, self.as_str())?;
        }
        Ok(())
    }

    fn read_from_code(code: i32, reader: &mut ControlReader) -> SixsResult<Self> {
        let model = match code {
            1 => {
                let [om, af, s0, h] = reader.read_array::<4>("hapke parameters")?;
                Self::Hapke { om, af, s0, h }
            }
            3 => {
                let [k0, k1, k2] = reader.read_array::<3>("roujean parameters")?;
                Self::Roujean { k0, k1, k2 }
            }
            4 => {
                let [a, ap, b, c] = reader.read_array::<4>("walthall parameters")?;
                Self::Walthall { a, ap, b, c }
            }
            5 => {
                let [k, b] = reader.read_array::<2>("minnaert parameters")?;
                Self::Minnaert { k, b }
            }
            6 => {
                let [wind_speed, wind_azimuth, salinity, pigment] =
                    reader.read_array::<4>("ocean parameters")?;
                Self::Ocean(reader.at_line(OceanSurface::new(
                    wind_speed,
                    wind_azimuth,
                    salinity,
                    pigment,
                ))?)
            }
            8 => {
                let [rho0, af, k] = reader.read_array::<3>("rahman parameters")?;
                Self::Rahman { rho0, af, k }
            }
            10 => {
                let [p1, p2, p3] = reader.read_array::<3>("modis brdf parameters")?;
                Self::Modis { p1, p2, p3 }
            }
            other => return reader.unknown_code("brdf model", other),
        };
        reader.at_line(model.validate())?;
        Ok(model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeterogeneousLambertian {
    radius: f64,
    target: ReflectanceSpec,
    background: ReflectanceSpec,
}

impl HeterogeneousLambertian {
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn target(&self) -> ReflectanceSpec {
        self.target
    }

    pub fn background(&self) -> ReflectanceSpec {
        self.background
    }

    fn validate(&self) -> ParameterResult<()> {
        require_open(self.radius, 0.0, 1.0, "radius")?;
        self.target.validate()?;
        self.background.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundReflectance {
    HomogeneousLambertian(ReflectanceSpec),
    HomogeneousBrdf(BrdfModel),
    HeterogeneousLambertian(HeterogeneousLambertian),
}

impl Default for GroundReflectance {
    fn default() -> Self {
        Self::HomogeneousLambertian(ReflectanceSpec::Spectral(SpectralTable::uniform(0.3)))
    }
}

impl GroundReflectance {
    pub fn homogeneous_lambertian(spec: impl Into<SpectralInput>) -> ParameterResult<Self> {
        Ok(Self::HomogeneousLambertian(ReflectanceSpec::spectral(spec)?))
    }

    pub fn homogeneous_ground_type(kind: GroundType) -> Self {
        Self::HomogeneousLambertian(ReflectanceSpec::Predefined(kind))
    }

    pub fn homogeneous_brdf(model: BrdfModel) -> ParameterResult<Self> {
        model.validate()?;
        Ok(Self::HomogeneousBrdf(model))
    }

    pub fn homogeneous_roujean(k0: f64, k1: f64, k2: f64) -> ParameterResult<Self> {
        Self::homogeneous_brdf(BrdfModel::Roujean { k0, k1, k2 })
    }

    pub fn homogeneous_ocean(
        wind_speed: f64,
        wind_azimuth: f64,
        salinity: f64,
        pigment: f64,
    ) -> ParameterResult<Self> {
        Ok(Self::HomogeneousBrdf(BrdfModel::Ocean(OceanSurface::new(
            wind_speed,
            wind_azimuth,
            salinity,
            pigment,
        )?)))
    }

    pub fn homogeneous_hapke(om: f64, af: f64, s0: f64, h: f64) -> ParameterResult<Self> {
        Self::homogeneous_brdf(BrdfModel::Hapke { om, af, s0, h })
    }

    pub fn homogeneous_walthall(a: f64, ap: f64, b: f64, c: f64) -> ParameterResult<Self> {
        Self::homogeneous_brdf(BrdfModel::Walthall { a, ap, b, c })
    }

    pub fn homogeneous_minnaert(k: f64, b: f64) -> ParameterResult<Self> {
        Self::homogeneous_brdf(BrdfModel::Minnaert { k, b })
    }

    pub fn homogeneous_rahman(rho0: f64, af: f64, k: f64) -> ParameterResult<Self> {
        Self::homogeneous_brdf(BrdfModel::Rahman { rho0, af, k })
    }

    pub fn homogeneous_modis_brdf(p1: f64, p2: f64, p3: f64) -> ParameterResult<Self> {
        Self::homogeneous_brdf(BrdfModel::Modis { p1, p2, p3 })
    }

    /// Target disc of `radius` inside a background, both Lambertian.
    pub fn heterogeneous_lambertian(
        radius: f64,
        target: impl Into<ReflectanceSpec>,
        background: impl Into<ReflectanceSpec>,
    ) -> ParameterResult<Self> {
        let ground = HeterogeneousLambertian {
            radius,
            target: target.into(),
            background: background.into(),
        };
        ground.validate()?;
        Ok(Self::HeterogeneousLambertian(ground))
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::HomogeneousLambertian(spec) => spec.validate(),
            Self::HomogeneousBrdf(model) => model.validate(),
            Self::HeterogeneousLambertian(ground) => ground.validate(),
        }
    }
}

impl ControlSection for GroundReflectance {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self {
            Self::HomogeneousLambertian(spec) => {
                writer.code(0, "homogeneous surface");
                writer.code(0, "no directional effects");
                writer.code(spec.code(), spec.label());
                spec.write_values(writer);
            }
            Self::HomogeneousBrdf(model) => {
                writer.code(0, "homogeneous surface");
                writer.code(1, "directional effects");
                writer.code(model.code(), model.as_str());
                writer.series(&model.parameters());
            }
            Self::HeterogeneousLambertian(ground) => {
                writer.code(1, "non-uniform surface");
                writer.record(
                    &[
                        f64::from(ground.target.code()),
                        f64::from(ground.background.code()),
                        ground.radius,
                    ],
                    "target, background, radius",
                );
                ground.target.write_values(writer);
                ground.background.write_values(writer);
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let surface = reader.read_code("surface code")?;
        match surface {
            0 => {
                let directional = reader.read_code("directional effects flag")?;
                match directional {
                    0 => {
                        let code = reader.read_code("ground type")?;
                        let spec = ReflectanceSpec::read_from_code(code, reader)?;
                        Ok(Self::HomogeneousLambertian(spec))
                    }
                    1 => {
                        let code = reader.read_code("brdf model")?;
                        Ok(Self::HomogeneousBrdf(BrdfModel::read_from_code(code, reader)?))
                    }
                    other => reader.unknown_code("directional effects", other),
                }
            }
            1 => {
                let [target, background, radius] =
                    reader.read_array::<3>("target, background, radius")?;
                let target = reader.integral(target, "target ground type")?;
                let background = reader.integral(background, "background ground type")?;
                let target = ReflectanceSpec::read_from_code(target, reader)?;
                let background = ReflectanceSpec::read_from_code(background, reader)?;
                reader.at_line(Self::heterogeneous_lambertian(radius, target, background))
            }
            other => reader.unknown_code("surface", other),
        }
    }
}
