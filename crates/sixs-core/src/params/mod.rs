pub mod aero;
pub mod altitudes;
pub mod atmos;
pub mod atmos_corr;
pub mod geometry;
pub mod ground;
pub mod loading;
pub mod spectral;
pub mod validation;
pub mod wavelength;

pub use aero::{
    AeroProfile, AeroType, AerosolLayer, Component, ComponentMixture, JungePowerLawDistribution,
    ModifiedGammaDistribution, MultimodalLogNormalDistribution, RadiusBounds,
    SunPhotometerDistribution, UserProfile,
};
pub use altitudes::{AircraftSensor, Altitudes, SensorAltitude, TargetAltitude};
pub use atmos::{
    AtmosProfile, AtmosType, RADIOSONDE_LEVEL_COUNT, RadiosondeLevel, RadiosondeProfile,
    WaterAndOzone, seasonal_profile,
};
pub use atmos_corr::{AtmosCorrection, CorrectionInput};
pub use geometry::{Geometry, SensorGeometry, SensorKind, SensorPosition, UserGeometry};
pub use ground::{
    BrdfModel, GroundReflectance, GroundType, HeterogeneousLambertian, OceanSurface,
    ReflectanceSpec,
};
pub use loading::AerosolLoading;
pub use spectral::{
    REFERENCE_WAVELENGTH_COUNT, REFERENCE_WAVELENGTHS, RefractiveIndexTable, SpectralInput,
    SpectralTable,
};
pub use wavelength::{
    BandInfo, FilterFunction, Monochromatic, PredefinedBand, SpectralRange, Wavelength,
    filter_sample_count,
};
