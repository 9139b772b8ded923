//! Aerosol composition: predefined models, a user mixture of the four basic
//! components, size distributions, and layered user profiles.

pub mod distribution;

pub use distribution::{
    Component, JungePowerLawDistribution, MAX_LOG_NORMAL_COMPONENTS, ModifiedGammaDistribution,
    MultimodalLogNormalDistribution, RadiusBounds, SunPhotometerDistribution,
};

use super::spectral::{REFERENCE_WAVELENGTH_COUNT, RefractiveIndexTable};
use super::validation::{require_at_least, require_range};
use crate::control::{ControlReader, ControlSection, ControlWriter};
use crate::domain::{ParameterError, ParameterResult, SixsResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Rounding slack allowed on the mixture sum, e.g. 0.1 + 0.2 + 0.3 + 0.4.
const MIXTURE_SUM_TOLERANCE: f64 = 1.0e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AeroType {
    NoAerosols,
    Continental,
    Maritime,
    Urban,
    Desert,
    BiomassBurning,
    Stratospheric,
}

impl AeroType {
    pub const ALL: [Self; 7] = [
        Self::NoAerosols,
        Self::Continental,
        Self::Maritime,
        Self::Urban,
        Self::Desert,
        Self::BiomassBurning,
        Self::Stratospheric,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::NoAerosols => 0,
            Self::Continental => 1,
            Self::Maritime => 2,
            Self::Urban => 3,
            Self::Desert => 5,
            Self::BiomassBurning => 6,
            Self::Stratospheric => 7,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAerosols => "no aerosols",
            Self::Continental => "continental",
            Self::Maritime => "maritime",
            Self::Urban => "urban",
            Self::Desert => "desert",
            Self::BiomassBurning => "biomass burning",
            Self::Stratospheric => "stratospheric",
        }
    }

    /// Every type except `NoAerosols` can seed a layered profile.
    pub const fn can_seed_profile(self) -> bool {
        !matches!(self, Self::NoAerosols)
    }
}

impl Display for AeroType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Volume fractions of the four basic components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentMixture {
    dust: f64,
    water: f64,
    oceanic: f64,
    soot: f64,
}

impl ComponentMixture {
    pub fn new(dust: f64, water: f64, oceanic: f64, soot: f64) -> ParameterResult<Self> {
        let mixture = Self {
            dust,
            water,
            oceanic,
            soot,
        };
        mixture.validate()?;
        Ok(mixture)
    }

    pub fn fractions(&self) -> [f64; 4] {
        [self.dust, self.water, self.oceanic, self.soot]
    }

    pub fn validate(&self) -> ParameterResult<()> {
        require_range(self.dust, 0.0, 1.0, "dust")?;
        require_range(self.water, 0.0, 1.0, "water")?;
        require_range(self.oceanic, 0.0, 1.0, "oceanic")?;
        require_range(self.soot, 0.0, 1.0, "soot")?;

        let total: f64 = self.fractions().iter().sum();
        if total > 1.0 + MIXTURE_SUM_TOLERANCE {
            return Err(ParameterError::new(
                "dust+water+oceanic+soot",
                total,
                format!("fractions must sum to at most 1 (excess {})", total - 1.0),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerosolLayer {
    altitude_km: f64,
    optical_depth: f64,
}

impl AerosolLayer {
    pub fn new(altitude_km: f64, optical_depth: f64) -> ParameterResult<Self> {
        Ok(Self {
            altitude_km: require_at_least(altitude_km, 0.0, "altitude_km")?,
            optical_depth: require_at_least(optical_depth, 0.0, "optical_depth")?,
        })
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_km
    }

    pub fn optical_depth(&self) -> f64 {
        self.optical_depth
    }
}

/// Vertical aerosol profile built one layer at a time over a base type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    base_type: AeroType,
    layers: Vec<AerosolLayer>,
}

impl UserProfile {
    pub fn new(base_type: AeroType) -> ParameterResult<Self> {
        let profile = Self {
            base_type,
            layers: Vec::new(),
        };
        profile.require_base_type()?;
        Ok(profile)
    }

    /// No local limit on the layer count.
    pub fn add_layer(&mut self, altitude_km: f64, optical_depth: f64) -> ParameterResult<()> {
        self.layers.push(AerosolLayer::new(altitude_km, optical_depth)?);
        Ok(())
    }

    pub fn base_type(&self) -> AeroType {
        self.base_type
    }

    pub fn layers(&self) -> &[AerosolLayer] {
        &self.layers
    }

    pub fn validate(&self) -> ParameterResult<()> {
        self.require_base_type()?;
        if self.layers.is_empty() {
            return Err(ParameterError::new(
                "layers",
                0,
                "at least one layer is required",
            ));
        }
        for layer in &self.layers {
            AerosolLayer::new(layer.altitude_km, layer.optical_depth)?;
        }
        Ok(())
    }

    fn require_base_type(&self) -> ParameterResult<()> {
        if self.base_type.can_seed_profile() {
            return Ok(());
        }
        Err(ParameterError::new(
            "base_type",
            self.base_type,
            "a layered profile needs an aerosol type",
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AeroProfile {
    Predefined(AeroType),
    UserMixture(ComponentMixture),
    SunPhotometer(SunPhotometerDistribution),
    MultimodalLogNormal(MultimodalLogNormalDistribution),
    ModifiedGamma(ModifiedGammaDistribution),
    JungePowerLaw(JungePowerLawDistribution),
    UserProfile(UserProfile),
}

impl Default for AeroProfile {
    fn default() -> Self {
        Self::Predefined(AeroType::Maritime)
    }
}

impl From<AeroType> for AeroProfile {
    fn from(kind: AeroType) -> Self {
        Self::Predefined(kind)
    }
}

impl From<ComponentMixture> for AeroProfile {
    fn from(mixture: ComponentMixture) -> Self {
        Self::UserMixture(mixture)
    }
}

impl From<SunPhotometerDistribution> for AeroProfile {
    fn from(distribution: SunPhotometerDistribution) -> Self {
        Self::SunPhotometer(distribution)
    }
}

impl From<MultimodalLogNormalDistribution> for AeroProfile {
    fn from(distribution: MultimodalLogNormalDistribution) -> Self {
        Self::MultimodalLogNormal(distribution)
    }
}

impl From<ModifiedGammaDistribution> for AeroProfile {
    fn from(distribution: ModifiedGammaDistribution) -> Self {
        Self::ModifiedGamma(distribution)
    }
}

impl From<JungePowerLawDistribution> for AeroProfile {
    fn from(distribution: JungePowerLawDistribution) -> Self {
        Self::JungePowerLaw(distribution)
    }
}

impl From<UserProfile> for AeroProfile {
    fn from(profile: UserProfile) -> Self {
        Self::UserProfile(profile)
    }
}

impl AeroProfile {
    pub fn predefined(kind: AeroType) -> Self {
        Self::Predefined(kind)
    }

    pub fn user_mixture(dust: f64, water: f64, oceanic: f64, soot: f64) -> ParameterResult<Self> {
        Ok(Self::UserMixture(ComponentMixture::new(
            dust, water, oceanic, soot,
        )?))
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Predefined(kind) => kind.code(),
            Self::UserMixture(_) => 4,
            Self::MultimodalLogNormal(_) => 8,
            Self::ModifiedGamma(_) => 9,
            Self::JungePowerLaw(_) => 10,
            Self::SunPhotometer(_) => 11,
            Self::UserProfile(_) => -1,
        }
    }

    /// Layered profiles carry their own optical depths, so the engine reads no
    /// separate aerosol loading after them.
    pub fn carries_own_loading(&self) -> bool {
        matches!(self, Self::UserProfile(_))
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::Predefined(_) => Ok(()),
            Self::UserMixture(mixture) => mixture.validate(),
            Self::SunPhotometer(distribution) => distribution.validate(),
            Self::MultimodalLogNormal(distribution) => distribution.validate(),
            Self::ModifiedGamma(distribution) => distribution.validate(),
            Self::JungePowerLaw(distribution) => distribution.validate(),
            Self::UserProfile(profile) => profile.validate(),
        }
    }
}

fn write_refractive_index(writer: &mut ControlWriter, table: &RefractiveIndexTable) {
    writer.series(&table.real_parts());
    writer.series(&table.imag_parts());
}

fn read_refractive_index(reader: &mut ControlReader) -> SixsResult<(Vec<f64>, Vec<f64>)> {
    let real = reader.read_values(REFERENCE_WAVELENGTH_COUNT, "refractive index (real)")?;
    let imag = reader.read_values(REFERENCE_WAVELENGTH_COUNT, "refractive index (imaginary)")?;
    Ok((real, imag))
}

/// Distribution models end with the flag that turns off the engine's
/// aerosol results file.
fn write_no_results_file(writer: &mut ControlWriter) {
    writer.code(0, "no aerosol results file");
}

fn read_no_results_file(reader: &mut ControlReader) -> SixsResult<()> {
    let flag = reader.read_code("aerosol results flag")?;
    if flag != 0 {
        return reader.at_line(Err(ParameterError::new(
            "aerosol results flag",
            flag,
            "only 0 (no results file) is supported",
        )));
    }
    Ok(())
}

impl ControlSection for AeroProfile {
    fn write_section(&self, writer: &mut ControlWriter) {
        match self {
            Self::Predefined(kind) => writer.code(kind.code(), kind.as_str()),
            Self::UserMixture(mixture) => {
                writer.code(self.code(), "user mixture");
                writer.record(&mixture.fractions(), "dust water oceanic soot");
            }
            Self::MultimodalLogNormal(distribution) => {
                writer.code(self.code(), "multimodal log-normal distribution");
                writer.record(&distribution.bounds().values(), "min and max radius");
                writer.code(distribution.components().len() as i32, "components");
                for component in distribution.components() {
                    writer.record(
                        &[
                            component.mean_radius(),
                            component.sigma(),
                            component.percentage_density(),
                        ],
                        "",
                    );
                    write_refractive_index(writer, component.refractive_index());
                }
                write_no_results_file(writer);
            }
            Self::ModifiedGamma(distribution) => {
                writer.code(self.code(), "modified gamma distribution");
                writer.record(&distribution.bounds().values(), "min and max radius");
                writer.record(&distribution.shape(), "alpha b gamma");
                write_refractive_index(writer, distribution.refractive_index());
                write_no_results_file(writer);
            }
            Self::JungePowerLaw(distribution) => {
                writer.code(self.code(), "junge power-law distribution");
                writer.record(&distribution.bounds().values(), "min and max radius");
                writer.value(distribution.alpha(), "alpha");
                write_refractive_index(writer, distribution.refractive_index());
                write_no_results_file(writer);
            }
            Self::SunPhotometer(distribution) => {
                writer.code(self.code(), "sun photometer distribution");
                writer.code(distribution.radii().len() as i32, "samples");
                for (radius, density) in distribution
                    .radii()
                    .iter()
                    .zip(distribution.log_volume_density())
                {
                    writer.series(&[*radius, *density]);
                }
                write_refractive_index(writer, distribution.refractive_index());
                write_no_results_file(writer);
            }
            Self::UserProfile(profile) => {
                writer.code(self.code(), "user aerosol profile");
                writer.code(profile.layers().len() as i32, "layers");
                let base_code = f64::from(profile.base_type().code());
                for layer in profile.layers() {
                    writer.series(&[layer.altitude_km(), layer.optical_depth(), base_code]);
                }
            }
        }
    }

    fn read_section(reader: &mut ControlReader) -> SixsResult<Self> {
        let code = reader.read_code("aerosol code")?;
        match code {
            4 => {
                let [dust, water, oceanic, soot] = reader.read_array::<4>("aerosol mixture")?;
                reader.at_line(Self::user_mixture(dust, water, oceanic, soot))
            }
            8 => {
                let [min_radius, max_radius] = reader.read_array::<2>("radius bounds")?;
                let mut distribution =
                    reader.at_line(MultimodalLogNormalDistribution::new(min_radius, max_radius))?;
                let count = reader.read_count("component count")?;
                for _ in 0..count {
                    let [mean_radius, sigma, density] =
                        reader.read_array::<3>("log-normal component")?;
                    let (real, imag) = read_refractive_index(reader)?;
                    reader.at_line(distribution.add_component(
                        mean_radius,
                        sigma,
                        density,
                        &real,
                        &imag,
                    ))?;
                }
                read_no_results_file(reader)?;
                Ok(Self::MultimodalLogNormal(distribution))
            }
            9 => {
                let [min_radius, max_radius] = reader.read_array::<2>("radius bounds")?;
                let [alpha, b, gamma] = reader.read_array::<3>("modified gamma shape")?;
                let (real, imag) = read_refractive_index(reader)?;
                let distribution = reader.at_line(ModifiedGammaDistribution::new(
                    min_radius, max_radius, alpha, b, gamma, real, imag,
                ))?;
                read_no_results_file(reader)?;
                Ok(Self::ModifiedGamma(distribution))
            }
            10 => {
                let [min_radius, max_radius] = reader.read_array::<2>("radius bounds")?;
                let alpha = reader.read_value("junge alpha")?;
                let (real, imag) = read_refractive_index(reader)?;
                let distribution = reader.at_line(JungePowerLawDistribution::new(
                    min_radius, max_radius, alpha, real, imag,
                ))?;
                read_no_results_file(reader)?;
                Ok(Self::JungePowerLaw(distribution))
            }
            11 => {
                let count = reader.read_count("sample count")?;
                let mut radii = Vec::new();
                let mut density = Vec::new();
                for _ in 0..count {
                    let [radius, value] = reader.read_array::<2>("radius and density")?;
                    radii.push(radius);
                    density.push(value);
                }
                let (real, imag) = read_refractive_index(reader)?;
                let distribution = reader.at_line(SunPhotometerDistribution::new(
                    radii, density, real, imag,
                ))?;
                read_no_results_file(reader)?;
                Ok(Self::SunPhotometer(distribution))
            }
            -1 => {
                let count = reader.read_count("layer count")?;
                let mut layers = Vec::new();
                let mut base_code = None;
                for _ in 0..count {
                    let [altitude_km, optical_depth, code] =
                        reader.read_array::<3>("aerosol layer")?;
                    base_code.get_or_insert(reader.integral(code, "layer aerosol type")?);
                    layers.push((altitude_km, optical_depth));
                }
                let base_code = base_code.unwrap_or(AeroType::Maritime.code());
                let Some(base_type) = AeroType::from_code(base_code) else {
                    return reader.unknown_code("aerosol profile type", base_code);
                };
                let mut profile = reader.at_line(UserProfile::new(base_type))?;
                for (altitude_km, optical_depth) in layers {
                    reader.at_line(profile.add_layer(altitude_km, optical_depth))?;
                }
                Ok(Self::UserProfile(profile))
            }
            other => match AeroType::from_code(other) {
                Some(kind) => Ok(Self::Predefined(kind)),
                None => reader.unknown_code("aerosol", other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AeroProfile, AeroType, ComponentMixture, JungePowerLawDistribution,
        ModifiedGammaDistribution, MultimodalLogNormalDistribution, SunPhotometerDistribution,
        UserProfile,
    };
    use crate::control::{ControlReader, ControlSection, ControlWriter};

    fn compiled(profile: &AeroProfile) -> String {
        let mut writer = ControlWriter::new();
        profile.write_section(&mut writer);
        writer.finish()
    }

    fn read_back(text: &str) -> AeroProfile {
        let mut reader = ControlReader::new(text);
        let profile = AeroProfile::read_section(&mut reader).expect("section reads back");
        reader.finish().expect("section fully consumed");
        profile
    }

    #[test]
    fn mixture_sum_above_one_fails_and_reports_excess() {
        assert!(ComponentMixture::new(0.3, 0.0, 0.7, 0.0).is_ok());
        assert!(ComponentMixture::new(0.1, 0.2, 0.3, 0.4).is_ok());

        let error = AeroProfile::user_mixture(0.8, 0.0, 0.4, 0.0)
            .expect_err("fractions sum to 1.2");
        assert!(error.constraint().contains("excess"));
    }

    #[test]
    fn mixture_writes_four_fractions_on_one_line() {
        let profile = AeroProfile::user_mixture(0.25, 0.25, 0.25, 0.25).expect("valid mixture");
        assert_eq!(
            compiled(&profile),
            "4 (user mixture)\n0.25 0.25 0.25 0.25 (dust water oceanic soot)\n"
        );
    }

    #[test]
    fn user_profile_rejects_no_aerosols_base() {
        assert!(UserProfile::new(AeroType::NoAerosols).is_err());

        let mut profile = UserProfile::new(AeroType::Maritime).expect("maritime base");
        profile.add_layer(5.0, 0.34).expect("first layer");
        profile.add_layer(10.0, 0.01).expect("second layer");
        assert_eq!(profile.layers().len(), 2);
        assert!(profile.add_layer(1.0, -0.1).is_err());
    }

    #[test]
    fn user_profile_layers_carry_base_code() {
        let mut profile = UserProfile::new(AeroType::Maritime).expect("maritime base");
        profile.add_layer(5.0, 0.34).expect("layer");
        let profile = AeroProfile::from(profile);

        assert_eq!(
            compiled(&profile),
            "-1 (user aerosol profile)\n1 (layers)\n5 0.34 2\n"
        );
        assert!(profile.carries_own_loading());
        assert_eq!(read_back(&compiled(&profile)), profile);
    }

    #[test]
    fn sun_photometer_section_layout() {
        let distribution =
            SunPhotometerDistribution::new(vec![0.05, 0.1], vec![0.0013, 0.0075], 1.47, 0.0093)
                .expect("valid distribution");
        let text = compiled(&AeroProfile::from(distribution));
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "11 (sun photometer distribution)");
        assert_eq!(lines[1], "2 (samples)");
        assert_eq!(lines[2], "0.05 0.0013");
        assert_eq!(lines[4].split_whitespace().count(), 20);
        assert!(lines[4].split_whitespace().all(|value| value == "1.47"));
        assert!(lines[5].split_whitespace().all(|value| value == "0.0093"));
        assert_eq!(lines[6], "0 (no aerosol results file)");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn distribution_sections_read_back() {
        let mut multimodal =
            MultimodalLogNormalDistribution::new(0.001, 20.0).expect("valid bounds");
        multimodal
            .add_component(0.05, 2.03, 0.538, &[1.5; 20], &[3.24e-7; 20])
            .expect("first component");
        multimodal
            .add_component(0.0695, 2.03, 0.457, &[1.43; 20], &[1.0e-8; 20])
            .expect("second component");

        let profiles = [
            AeroProfile::default(),
            AeroProfile::Predefined(AeroType::Stratospheric),
            AeroProfile::from(multimodal),
            AeroProfile::from(
                ModifiedGammaDistribution::new(0.01, 10.0, 1.0, 4.0, 0.5, 1.5, 0.01)
                    .expect("modified gamma"),
            ),
            AeroProfile::from(
                JungePowerLawDistribution::new(0.01, 10.0, 4.0, 1.45, 0.001)
                    .expect("junge"),
            ),
        ];

        for profile in profiles {
            assert_eq!(read_back(&compiled(&profile)), profile);
        }
    }

    #[test]
    fn unknown_aerosol_code_is_rejected() {
        let mut reader = ControlReader::new("12\n");
        assert!(AeroProfile::read_section(&mut reader).is_err());
    }

    #[test]
    fn oversized_counts_fail_at_end_of_input() {
        for text in ["11\n2000000000\n0.1 0.2\n", "-1\n2000000000\n1 0.1 2\n"] {
            let mut reader = ControlReader::new(text);
            let error = AeroProfile::read_section(&mut reader).expect_err("count exceeds records");
            assert_eq!(error.placeholder(), "INPUT.CONTROL_FILE");
            assert!(error.message().contains("ended"), "{}", error.message());
        }
    }

    #[test]
    fn results_file_flag_must_be_zero() {
        let profile: AeroProfile = JungePowerLawDistribution::new(0.01, 10.0, 4.0, 1.5, 0.01)
            .expect("junge")
            .into();
        let text = compiled(&profile);
        assert!(text.ends_with("0 (no aerosol results file)\n"), "{text}");
        assert_eq!(read_back(&text), profile);

        let flagged = text.replace("0 (no aerosol results file)", "1");
        let mut reader = ControlReader::new(&flagged);
        let error = AeroProfile::read_section(&mut reader).expect_err("results file requested");
        assert_eq!(error.placeholder(), "INPUT.CONTROL_FILE");
        assert!(error.message().contains("aerosol results flag"), "{}", error.message());
    }
}
