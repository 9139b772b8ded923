//! Control-file compiler and decompiler.
//!
//! The engine reads one positional text file; every section below is always
//! present and appears in the fixed order geometry, atmosphere, aerosol,
//! aerosol loading, altitudes, spectral band, ground reflectance and
//! atmospheric correction.

pub mod reader;
pub mod writer;

pub use reader::{CONTROL_FILE_PLACEHOLDER, ControlReader, ControlRecord, tokenize_control_file};
pub use writer::ControlWriter;

use crate::domain::{ParameterError, ParameterResult, SixsError, SixsResult};
use crate::params::{
    AeroProfile, AerosolLoading, Altitudes, AtmosCorrection, AtmosProfile, Geometry,
    GroundReflectance, Wavelength,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SCENE_PLACEHOLDER: &str = "INPUT.SCENE";

/// One section of the control file, written and read in its engine layout.
pub trait ControlSection: Sized {
    fn write_section(&self, writer: &mut ControlWriter);
    fn read_section(reader: &mut ControlReader) -> SixsResult<Self>;
}

/// Complete scene handed to the engine. Every field has a default so a
/// partially specified scene still compiles to a complete control file.
///
/// A configuration is valid whenever it exists: the setters and
/// deserialisation check each component before storing it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SceneFields")]
pub struct RunConfiguration {
    geometry: Geometry,
    atmosphere: AtmosProfile,
    aerosol: AeroProfile,
    loading: AerosolLoading,
    altitudes: Altitudes,
    wavelength: Wavelength,
    ground: GroundReflectance,
    atmos_correction: AtmosCorrection,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct SceneFields {
    geometry: Geometry,
    atmosphere: AtmosProfile,
    aerosol: AeroProfile,
    loading: AerosolLoading,
    altitudes: Altitudes,
    wavelength: Wavelength,
    ground: GroundReflectance,
    atmos_correction: AtmosCorrection,
}

impl TryFrom<SceneFields> for RunConfiguration {
    type Error = ParameterError;

    fn try_from(fields: SceneFields) -> Result<Self, Self::Error> {
        let configuration = Self {
            geometry: fields.geometry,
            atmosphere: fields.atmosphere,
            aerosol: fields.aerosol,
            loading: fields.loading,
            altitudes: fields.altitudes,
            wavelength: fields.wavelength,
            ground: fields.ground,
            atmos_correction: fields.atmos_correction,
        };
        configuration.validate()?;
        Ok(configuration)
    }
}

impl RunConfiguration {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn atmosphere(&self) -> &AtmosProfile {
        &self.atmosphere
    }

    pub fn aerosol(&self) -> &AeroProfile {
        &self.aerosol
    }

    pub fn loading(&self) -> AerosolLoading {
        self.loading
    }

    pub fn altitudes(&self) -> Altitudes {
        self.altitudes
    }

    pub fn wavelength(&self) -> &Wavelength {
        &self.wavelength
    }

    pub fn ground(&self) -> &GroundReflectance {
        &self.ground
    }

    pub fn atmos_correction(&self) -> &AtmosCorrection {
        &self.atmos_correction
    }

    pub fn set_geometry(&mut self, geometry: Geometry) -> ParameterResult<()> {
        geometry.validate()?;
        self.geometry = geometry;
        Ok(())
    }

    pub fn set_atmosphere(&mut self, atmosphere: AtmosProfile) -> ParameterResult<()> {
        atmosphere.validate()?;
        self.atmosphere = atmosphere;
        Ok(())
    }

    pub fn set_aerosol(&mut self, aerosol: impl Into<AeroProfile>) -> ParameterResult<()> {
        let aerosol = aerosol.into();
        aerosol.validate()?;
        self.aerosol = aerosol;
        Ok(())
    }

    pub fn set_loading(&mut self, loading: AerosolLoading) {
        self.loading = loading;
    }

    pub fn set_aot550(&mut self, aot: f64) -> ParameterResult<()> {
        self.loading = AerosolLoading::aot550(aot)?;
        Ok(())
    }

    pub fn set_altitudes(&mut self, altitudes: Altitudes) {
        self.altitudes = altitudes;
    }

    pub fn set_wavelength(&mut self, wavelength: impl Into<Wavelength>) {
        self.wavelength = wavelength.into();
    }

    pub fn set_ground(&mut self, ground: GroundReflectance) -> ParameterResult<()> {
        ground.validate()?;
        self.ground = ground;
        Ok(())
    }

    pub fn set_atmos_correction(&mut self, correction: AtmosCorrection) -> ParameterResult<()> {
        correction.validate()?;
        self.atmos_correction = correction;
        Ok(())
    }

    fn validate(&self) -> ParameterResult<()> {
        self.geometry.validate()?;
        self.atmosphere.validate()?;
        self.aerosol.validate()?;
        self.loading.validate()?;
        self.altitudes.validate()?;
        self.wavelength.validate()?;
        self.ground.validate()?;
        self.atmos_correction.validate()
    }

    /// Parses a JSON scene and checks every invariant the constructors check.
    pub fn from_json(source: &str) -> SixsResult<Self> {
        serde_json::from_str(source).map_err(|error| {
            SixsError::input_validation(SCENE_PLACEHOLDER, format!("invalid scene JSON: {error}"))
        })
    }

    pub fn to_json_pretty(&self) -> SixsResult<String> {
        serde_json::to_string_pretty(self).map_err(|error| {
            SixsError::internal("INTERNAL.SCENE_JSON", format!("failed to encode scene: {error}"))
        })
    }
}

/// Renders the configuration in the engine's control-file grammar.
///
/// The output depends only on the configuration, byte for byte. The loading
/// section is skipped for layered user aerosol profiles, whose layers carry
/// their own optical depths.
pub fn compile(configuration: &RunConfiguration) -> String {
    let mut writer = ControlWriter::new();
    configuration.geometry.write_section(&mut writer);
    configuration.atmosphere.write_section(&mut writer);
    configuration.aerosol.write_section(&mut writer);
    if !configuration.aerosol.carries_own_loading() {
        configuration.loading.write_section(&mut writer);
    }
    configuration.altitudes.write_section(&mut writer);
    configuration.wavelength.write_section(&mut writer);
    configuration.ground.write_section(&mut writer);
    configuration.atmos_correction.write_section(&mut writer);

    let text = writer.finish();
    debug!(
        lines = text.lines().count(),
        aerosol_code = configuration.aerosol.code(),
        "compiled control file"
    );
    text
}

/// Rebuilds a configuration from control-file text.
///
/// A user aerosol profile has no loading section, so the decompiled
/// configuration carries the default loading in that case.
pub fn decompile(source: &str) -> SixsResult<RunConfiguration> {
    let mut reader = ControlReader::new(source);
    let geometry = Geometry::read_section(&mut reader)?;
    let atmosphere = AtmosProfile::read_section(&mut reader)?;
    let aerosol = AeroProfile::read_section(&mut reader)?;
    let loading = if aerosol.carries_own_loading() {
        AerosolLoading::default()
    } else {
        AerosolLoading::read_section(&mut reader)?
    };
    let altitudes = Altitudes::read_section(&mut reader)?;
    let wavelength = Wavelength::read_section(&mut reader)?;
    let ground = GroundReflectance::read_section(&mut reader)?;
    let atmos_correction = AtmosCorrection::read_section(&mut reader)?;
    reader.finish()?;

    let configuration = RunConfiguration::try_from(SceneFields {
        geometry,
        atmosphere,
        aerosol,
        loading,
        altitudes,
        wavelength,
        ground,
        atmos_correction,
    })
    .map_err(|error| SixsError::input_validation(CONTROL_FILE_PLACEHOLDER, error.to_string()))?;
    debug!(
        records = tokenize_control_file(source).len(),
        "decompiled control file"
    );
    Ok(configuration)
}
