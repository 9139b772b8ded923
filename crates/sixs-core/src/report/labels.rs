//! Label tables for the engine's text report.
//!
//! Labels are matched verbatim, spacing included, against report lines with
//! their `*` frame removed.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const VERSION_LABEL: &str = "6SV version";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    Month,
    Day,
    SolarZenithAngle,
    SolarAzimuthAngle,
    ViewZenithAngle,
    ViewAzimuthAngle,
    ScatteringAngle,
    AzimuthalAngleDifference,
    ApparentReflectance,
    ApparentRadiance,
    TotalGaseousTransmittance,
    WvAboveAerosol,
    WvMixedWithAerosol,
    WvUnderAerosol,
    ApparentPolarizedReflectance,
    ApparentPolarizedRadiance,
    DirectionOfPlaneOfPolarization,
    TotalPolarizationRatio,
    PercentDirectSolarIrradiance,
    PercentDiffuseSolarIrradiance,
    PercentEnvironmentalIrradiance,
    AtmosphericIntrinsicReflectance,
    BackgroundReflectance,
    PixelReflectance,
    DirectSolarIrradiance,
    DiffuseSolarIrradiance,
    EnvironmentalIrradiance,
    AtmosphericIntrinsicRadiance,
    BackgroundRadiance,
    PixelRadiance,
    SolarSpectrum,
    MeasuredRadiance,
    InputApparentReflectance,
    AtmosCorrectedReflectanceLambertian,
    AtmosCorrectedReflectanceBrdf,
    CoefXa,
    CoefXb,
    CoefXc,
}

impl OutputField {
    pub const ALL: [Self; 38] = [
        Self::Month,
        Self::Day,
        Self::SolarZenithAngle,
        Self::SolarAzimuthAngle,
        Self::ViewZenithAngle,
        Self::ViewAzimuthAngle,
        Self::ScatteringAngle,
        Self::AzimuthalAngleDifference,
        Self::ApparentReflectance,
        Self::ApparentRadiance,
        Self::TotalGaseousTransmittance,
        Self::WvAboveAerosol,
        Self::WvMixedWithAerosol,
        Self::WvUnderAerosol,
        Self::ApparentPolarizedReflectance,
        Self::ApparentPolarizedRadiance,
        Self::DirectionOfPlaneOfPolarization,
        Self::TotalPolarizationRatio,
        Self::PercentDirectSolarIrradiance,
        Self::PercentDiffuseSolarIrradiance,
        Self::PercentEnvironmentalIrradiance,
        Self::AtmosphericIntrinsicReflectance,
        Self::BackgroundReflectance,
        Self::PixelReflectance,
        Self::DirectSolarIrradiance,
        Self::DiffuseSolarIrradiance,
        Self::EnvironmentalIrradiance,
        Self::AtmosphericIntrinsicRadiance,
        Self::BackgroundRadiance,
        Self::PixelRadiance,
        Self::SolarSpectrum,
        Self::MeasuredRadiance,
        Self::InputApparentReflectance,
        Self::AtmosCorrectedReflectanceLambertian,
        Self::AtmosCorrectedReflectanceBrdf,
        Self::CoefXa,
        Self::CoefXb,
        Self::CoefXc,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Day => "day",
            Self::SolarZenithAngle => "solar_zenith_angle",
            Self::SolarAzimuthAngle => "solar_azimuth_angle",
            Self::ViewZenithAngle => "view_zenith_angle",
            Self::ViewAzimuthAngle => "view_azimuth_angle",
            Self::ScatteringAngle => "scattering_angle",
            Self::AzimuthalAngleDifference => "azimuthal_angle_difference",
            Self::ApparentReflectance => "apparent_reflectance",
            Self::ApparentRadiance => "apparent_radiance",
            Self::TotalGaseousTransmittance => "total_gaseous_transmittance",
            Self::WvAboveAerosol => "wv_above_aerosol",
            Self::WvMixedWithAerosol => "wv_mixed_with_aerosol",
            Self::WvUnderAerosol => "wv_under_aerosol",
            Self::ApparentPolarizedReflectance => "apparent_polarized_reflectance",
            Self::ApparentPolarizedRadiance => "apparent_polarized_radiance",
            Self::DirectionOfPlaneOfPolarization => "direction_of_plane_of_polarization",
            Self::TotalPolarizationRatio => "total_polarization_ratio",
            Self::PercentDirectSolarIrradiance => "percent_direct_solar_irradiance",
            Self::PercentDiffuseSolarIrradiance => "percent_diffuse_solar_irradiance",
            Self::PercentEnvironmentalIrradiance => "percent_environmental_irradiance",
            Self::AtmosphericIntrinsicReflectance => "atmospheric_intrinsic_reflectance",
            Self::BackgroundReflectance => "background_reflectance",
            Self::PixelReflectance => "pixel_reflectance",
            Self::DirectSolarIrradiance => "direct_solar_irradiance",
            Self::DiffuseSolarIrradiance => "diffuse_solar_irradiance",
            Self::EnvironmentalIrradiance => "environmental_irradiance",
            Self::AtmosphericIntrinsicRadiance => "atmospheric_intrinsic_radiance",
            Self::BackgroundRadiance => "background_radiance",
            Self::PixelRadiance => "pixel_radiance",
            Self::SolarSpectrum => "solar_spectrum",
            Self::MeasuredRadiance => "measured_radiance",
            Self::InputApparentReflectance => "input_apparent_reflectance",
            Self::AtmosCorrectedReflectanceLambertian => {
                "atmos_corrected_reflectance_lambertian"
            }
            Self::AtmosCorrectedReflectanceBrdf => "atmos_corrected_reflectance_brdf",
            Self::CoefXa => "coef_xa",
            Self::CoefXb => "coef_xb",
            Self::CoefXc => "coef_xc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl Display for OutputField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Value on the label's own line: the `index`-th number after the label.
#[derive(Debug, Clone, Copy)]
pub struct SameLineRule {
    pub label: &'static str,
    pub index: usize,
    pub field: OutputField,
}

/// Three-column header whose values sit on the following line.
#[derive(Debug, Clone, Copy)]
pub struct NextLineRule {
    pub label: &'static str,
    pub fields: [OutputField; 3],
}

const fn same_line(label: &'static str, index: usize, field: OutputField) -> SameLineRule {
    SameLineRule {
        label,
        index,
        field,
    }
}

pub const SAME_LINE_RULES: [SameLineRule; 26] = [
    same_line("month:", 0, OutputField::Month),
    same_line("day :", 0, OutputField::Day),
    same_line("solar zenith angle:", 0, OutputField::SolarZenithAngle),
    same_line("solar azimuthal angle:", 0, OutputField::SolarAzimuthAngle),
    same_line("view zenith angle:", 0, OutputField::ViewZenithAngle),
    same_line("view azimuthal angle:", 0, OutputField::ViewAzimuthAngle),
    same_line("scattering angle:", 0, OutputField::ScatteringAngle),
    same_line("azimuthal angle difference:", 0, OutputField::AzimuthalAngleDifference),
    same_line("apparent reflectance", 0, OutputField::ApparentReflectance),
    same_line("appar. rad.(w/m2/sr/mic)", 0, OutputField::ApparentRadiance),
    same_line("total gaseous transmittance", 0, OutputField::TotalGaseousTransmittance),
    same_line("wv above aerosol", 0, OutputField::WvAboveAerosol),
    same_line("wv mixed with aerosol", 0, OutputField::WvMixedWithAerosol),
    same_line("wv under aerosol", 0, OutputField::WvUnderAerosol),
    same_line("app. polarized refl.", 0, OutputField::ApparentPolarizedReflectance),
    same_line("app. pol. rad. (w/m2/sr/mic)", 0, OutputField::ApparentPolarizedRadiance),
    same_line(
        "direction of the plane of polarization",
        0,
        OutputField::DirectionOfPlaneOfPolarization,
    ),
    same_line("total polarization ratio", 0, OutputField::TotalPolarizationRatio),
    same_line("sol. spect (in w/m2/mic)", 0, OutputField::SolarSpectrum),
    same_line("measured radiance [w/m2/sr/mic]", 0, OutputField::MeasuredRadiance),
    same_line("input apparent reflectance", 0, OutputField::InputApparentReflectance),
    same_line("Lambertian case :", 0, OutputField::AtmosCorrectedReflectanceLambertian),
    same_line("BRDF       case :", 0, OutputField::AtmosCorrectedReflectanceBrdf),
    same_line("coefficients xa xb xc", 0, OutputField::CoefXa),
    same_line("coefficients xa xb xc", 1, OutputField::CoefXb),
    same_line("coefficients xa xb xc", 2, OutputField::CoefXc),
];

pub const NEXT_LINE_RULES: [NextLineRule; 4] = [
    NextLineRule {
        label: "% of direct  irr.",
        fields: [
            OutputField::PercentDirectSolarIrradiance,
            OutputField::PercentDiffuseSolarIrradiance,
            OutputField::PercentEnvironmentalIrradiance,
        ],
    },
    NextLineRule {
        label: "atm. intrin. ref.",
        fields: [
            OutputField::AtmosphericIntrinsicReflectance,
            OutputField::BackgroundReflectance,
            OutputField::PixelReflectance,
        ],
    },
    NextLineRule {
        label: "direct solar irr.",
        fields: [
            OutputField::DirectSolarIrradiance,
            OutputField::DiffuseSolarIrradiance,
            OutputField::EnvironmentalIrradiance,
        ],
    },
    NextLineRule {
        label: "atm. intrin. rad.",
        fields: [
            OutputField::AtmosphericIntrinsicRadiance,
            OutputField::BackgroundRadiance,
            OutputField::PixelRadiance,
        ],
    },
];

/// Rows of the integrated transmittance table (`downward upward total`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmittanceKind {
    GlobalGas,
    Water,
    Ozone,
    CarbonDioxide,
    Oxygen,
    NitrogenDioxide,
    Methane,
    CarbonMonoxide,
    RayleighScattering,
    AerosolScattering,
    TotalScattering,
}

impl TransmittanceKind {
    pub const ALL: [Self; 11] = [
        Self::GlobalGas,
        Self::Water,
        Self::Ozone,
        Self::CarbonDioxide,
        Self::Oxygen,
        Self::NitrogenDioxide,
        Self::Methane,
        Self::CarbonMonoxide,
        Self::RayleighScattering,
        Self::AerosolScattering,
        Self::TotalScattering,
    ];

    /// Row head with runs of whitespace collapsed to one space.
    pub const fn row_head(self) -> &'static str {
        match self {
            Self::GlobalGas => "global gas. trans.",
            Self::Water => "water \" \"",
            Self::Ozone => "ozone \" \"",
            Self::CarbonDioxide => "co2 \" \"",
            Self::Oxygen => "oxyg \" \"",
            Self::NitrogenDioxide => "no2 \" \"",
            Self::Methane => "ch4 \" \"",
            Self::CarbonMonoxide => "co \" \"",
            Self::RayleighScattering => "rayleigh sca.trans.",
            Self::AerosolScattering => "aeros. sca. \"",
            Self::TotalScattering => "total sca. \"",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GlobalGas => "global_gas",
            Self::Water => "water",
            Self::Ozone => "ozone",
            Self::CarbonDioxide => "co2",
            Self::Oxygen => "oxygen",
            Self::NitrogenDioxide => "no2",
            Self::Methane => "ch4",
            Self::CarbonMonoxide => "co",
            Self::RayleighScattering => "rayleigh_scattering",
            Self::AerosolScattering => "aerosol_scattering",
            Self::TotalScattering => "total_scattering",
        }
    }

    pub fn from_row_head(head: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.row_head() == head)
    }
}

/// Rows of the `rayleigh aerosols total` property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentProperty {
    SphericalAlbedo,
    OpticalDepthTotal,
    OpticalDepthPlane,
    ReflectanceI,
    ReflectanceQ,
    ReflectanceU,
    PolarizedReflectance,
    DegreeOfPolarization,
    DirectionOfPlaneOfPolarization,
    PhaseFunctionI,
    PhaseFunctionQ,
    PhaseFunctionU,
    PrimaryDegreeOfPolarization,
    SingleScatteringAlbedo,
}

impl ComponentProperty {
    pub const ALL: [Self; 14] = [
        Self::SphericalAlbedo,
        Self::OpticalDepthTotal,
        Self::OpticalDepthPlane,
        Self::ReflectanceI,
        Self::ReflectanceQ,
        Self::ReflectanceU,
        Self::PolarizedReflectance,
        Self::DegreeOfPolarization,
        Self::DirectionOfPlaneOfPolarization,
        Self::PhaseFunctionI,
        Self::PhaseFunctionQ,
        Self::PhaseFunctionU,
        Self::PrimaryDegreeOfPolarization,
        Self::SingleScatteringAlbedo,
    ];

    pub const fn row_head(self) -> &'static str {
        match self {
            Self::SphericalAlbedo => "spherical albedo",
            Self::OpticalDepthTotal => "optical depth total",
            Self::OpticalDepthPlane => "optical depth plane",
            Self::ReflectanceI => "reflectance I",
            Self::ReflectanceQ => "reflectance Q",
            Self::ReflectanceU => "reflectance U",
            Self::PolarizedReflectance => "polarized reflect.",
            Self::DegreeOfPolarization => "degree of polar.",
            Self::DirectionOfPlaneOfPolarization => "dir. plane polar.",
            Self::PhaseFunctionI => "phase function I",
            Self::PhaseFunctionQ => "phase function Q",
            Self::PhaseFunctionU => "phase function U",
            Self::PrimaryDegreeOfPolarization => "primary deg. of pol.",
            Self::SingleScatteringAlbedo => "sing. scat. albedo",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SphericalAlbedo => "spherical_albedo",
            Self::OpticalDepthTotal => "optical_depth_total",
            Self::OpticalDepthPlane => "optical_depth_plane",
            Self::ReflectanceI => "reflectance_i",
            Self::ReflectanceQ => "reflectance_q",
            Self::ReflectanceU => "reflectance_u",
            Self::PolarizedReflectance => "polarized_reflectance",
            Self::DegreeOfPolarization => "degree_of_polarization",
            Self::DirectionOfPlaneOfPolarization => "direction_of_plane_of_polarization",
            Self::PhaseFunctionI => "phase_function_i",
            Self::PhaseFunctionQ => "phase_function_q",
            Self::PhaseFunctionU => "phase_function_u",
            Self::PrimaryDegreeOfPolarization => "primary_degree_of_polarization",
            Self::SingleScatteringAlbedo => "single_scattering_albedo",
        }
    }

    pub fn from_row_head(head: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|property| property.row_head() == head)
    }
}
