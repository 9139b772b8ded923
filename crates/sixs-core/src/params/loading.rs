//! Aerosol loading: optical thickness at 550 nm, or horizontal visibility.

use super::validation::{require_at_least, require_positive};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use serde::{Deserialize, Serialize};

/// Aerosol optical thickness at 550 nm, or horizontal visibility in km.
///
/// Only the validating constructors and deserialisation build a loading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LoadingKind", into = "LoadingKind")]
pub struct AerosolLoading(LoadingKind);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LoadingKind {
    Aot550(f64),
    Visibility(f64),
}

impl Default for AerosolLoading {
    fn default() -> Self {
        Self(LoadingKind::Aot550(0.5))
    }
}

impl TryFrom<LoadingKind> for AerosolLoading {
    type Error = ParameterError;

    fn try_from(kind: LoadingKind) -> Result<Self, Self::Error> {
        let loading = Self(kind);
        loading.validate()?;
        Ok(loading)
    }
}

impl From<AerosolLoading> for LoadingKind {
    fn from(loading: AerosolLoading) -> Self {
        loading.0
    }
}

impl AerosolLoading {
    pub fn aot550(aot: f64) -> ParameterResult<Self> {
        Self::try_from(LoadingKind::Aot550(aot))
    }

    pub fn visibility(km: f64) -> ParameterResult<Self> {
        Self::try_from(LoadingKind::Visibility(km))
    }

    /// Optical thickness at 550 nm, when the loading is given that way.
    pub fn optical_thickness(&self) -> Option<f64> {
        match self.0 {
            LoadingKind::Aot550(aot) => Some(aot),
            LoadingKind::Visibility(_) => None,
        }
    }

    pub fn visibility_km(&self) -> Option<f64> {
        match self.0 {
            LoadingKind::Aot550(_) => None,
            LoadingKind::Visibility(km) => Some(km),
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self.0 {
            LoadingKind::Aot550(aot) => require_at_least(aot, 0.0, "aot550")?,
            LoadingKind::Visibility(km) => require_positive(km, "visibility")?,
        };
        Ok(())
    }
}

impl ControlSection for AerosolLoading {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self.0 {
            LoadingKind::Aot550(aot) => {
                writer.value(0.0, "visibility unused");
                writer.value(aot, "aot at 550 nm");
            }
            LoadingKind::Visibility(km) => writer.value(km, "visibility in km"),
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let visibility = reader.read_value("visibility")?;
        if visibility == 0.0 {
            let aot = reader.read_value("aot at 550 nm")?;
            return reader.at_line(Self::aot550(aot));
        }
        reader.at_line(Self::visibility(visibility))
    }
}

#[cfg(test)]
mod tests {
    use super::AerosolLoading;
    use crate::control::{ControlReader, ControlSection, ControlWriter};

    #[test]
    fn loading_layouts() {
        let mut writer = ControlWriter::new();
        AerosolLoading::default().write_section(&mut writer);
        AerosolLoading::visibility(23.0)
            .expect("visibility")
            .write_section(&mut writer);
        let text = writer.finish();
        assert_eq!(
            text,
            "0 (visibility unused)\n0.5 (aot at 550 nm)\n23 (visibility in km)\n"
        );

        let mut reader = ControlReader::new(&text);
        let aot = AerosolLoading::read_section(&mut reader).expect("aot");
        assert_eq!(aot.optical_thickness(), Some(0.5));
        let visibility = AerosolLoading::read_section(&mut reader).expect("visibility");
        assert_eq!(visibility.visibility_km(), Some(23.0));
        assert_eq!(visibility.optical_thickness(), None);
        reader.finish().expect("fully consumed");
    }

    #[test]
    fn negative_loading_is_rejected() {
        assert!(AerosolLoading::aot550(-0.1).is_err());
        assert!(AerosolLoading::visibility(0.0).is_err());

        let error = serde_json::from_str::<AerosolLoading>(r#"{"aot550": -3.0}"#)
            .expect_err("negative aot in JSON");
        assert!(error.to_string().contains("aot550"), "{error}");
        let loading: AerosolLoading =
            serde_json::from_str(r#"{"visibility": 10.0}"#).expect("visibility JSON");
        assert_eq!(loading.visibility_km(), Some(10.0));

        let mut reader = ControlReader::new("-3\n");
        let error = AerosolLoading::read_section(&mut reader).expect_err("negative visibility");
        assert!(error.message().contains("line 1"));
    }
}
