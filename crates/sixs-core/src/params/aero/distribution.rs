//! Size-distribution aerosol models. Each carries its refractive index on the
//! 20-wavelength reference grid.

use crate::domain::{ParameterError, ParameterResult};
use crate::params::spectral::{RefractiveIndexTable, SpectralInput};
use crate::params::validation::{
    require_count_at_most, require_equal_length, require_finite, require_positive,
    require_range,
};
use serde::{Deserialize, Serialize};

pub const MAX_LOG_NORMAL_COMPONENTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusBounds {
    min_radius: f64,
    max_radius: f64,
}

impl RadiusBounds {
    pub fn new(min_radius: f64, max_radius: f64) -> ParameterResult<Self> {
        let bounds = Self {
            min_radius,
            max_radius,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn values(&self) -> [f64; 2] {
        [self.min_radius, self.max_radius]
    }

    fn validate(&self) -> ParameterResult<()> {
        require_positive(self.min_radius, "min_radius")?;
        require_positive(self.max_radius, "max_radius")?;
        if self.max_radius <= self.min_radius {
            return Err(ParameterError::new(
                "max_radius",
                self.max_radius,
                format!("must exceed min_radius {}", self.min_radius),
            ));
        }
        Ok(())
    }
}

/// Size distribution retrieved from sun-photometer measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunPhotometerDistribution {
    radii: Vec<f64>,
    log_volume_density: Vec<f64>,
    refractive_index: RefractiveIndexTable,
}

impl SunPhotometerDistribution {
    pub fn new(
        radii: Vec<f64>,
        log_volume_density: Vec<f64>,
        refr_real: impl Into<SpectralInput>,
        refr_imag: impl Into<SpectralInput>,
    ) -> ParameterResult<Self> {
        let refractive_index = RefractiveIndexTable::broadcast(refr_real, refr_imag, "refr")?;
        let distribution = Self {
            radii,
            log_volume_density,
            refractive_index,
        };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn log_volume_density(&self) -> &[f64] {
        &self.log_volume_density
    }

    pub fn refractive_index(&self) -> &RefractiveIndexTable {
        &self.refractive_index
    }

    pub fn validate(&self) -> ParameterResult<()> {
        let count = require_equal_length(
            &[self.radii.as_slice(), self.log_volume_density.as_slice()],
            "radii/log_volume_density",
        )?;
        if count == 0 {
            return Err(ParameterError::new(
                "radii",
                "length 0",
                "at least one radius is required",
            ));
        }
        for radius in &self.radii {
            require_positive(*radius, "radii")?;
        }
        for density in &self.log_volume_density {
            require_finite(*density, "log_volume_density")?;
        }
        Ok(())
    }
}

/// One log-normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComponentFields", into = "ComponentFields")]
pub struct Component {
    mean_radius: f64,
    sigma: f64,
    percentage_density: f64,
    refractive_index: RefractiveIndexTable,
}

impl Component {
    /// Refractive-index arrays must hold exactly 20 values; a scalar is not
    /// broadcast here.
    pub fn new(
        mean_radius: f64,
        sigma: f64,
        percentage_density: f64,
        refr_real: &[f64],
        refr_imag: &[f64],
    ) -> ParameterResult<Self> {
        let component = Self {
            mean_radius: require_positive(mean_radius, "mean_radius")?,
            sigma: require_positive(sigma, "sigma")?,
            percentage_density: require_range(
                percentage_density,
                0.0,
                1.0,
                "percentage_density",
            )?,
            refractive_index: RefractiveIndexTable::exact(refr_real, refr_imag, "refr")?,
        };
        Ok(component)
    }

    pub fn mean_radius(&self) -> f64 {
        self.mean_radius
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn percentage_density(&self) -> f64 {
        self.percentage_density
    }

    pub fn refractive_index(&self) -> &RefractiveIndexTable {
        &self.refractive_index
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentFields {
    mean_radius: f64,
    sigma: f64,
    percentage_density: f64,
    refr_real: Vec<f64>,
    refr_imag: Vec<f64>,
}

impl TryFrom<ComponentFields> for Component {
    type Error = ParameterError;

    fn try_from(fields: ComponentFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.mean_radius,
            fields.sigma,
            fields.percentage_density,
            &fields.refr_real,
            &fields.refr_imag,
        )
    }
}

impl From<Component> for ComponentFields {
    fn from(component: Component) -> Self {
        Self {
            mean_radius: component.mean_radius,
            sigma: component.sigma,
            percentage_density: component.percentage_density,
            refr_real: component.refractive_index.real_parts().to_vec(),
            refr_imag: component.refractive_index.imag_parts().to_vec(),
        }
    }
}

/// Up to four log-normal modes, added one at a time.
///
/// Every instance owns its own component list; building many profiles in
/// sequence never carries components from one to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimodalLogNormalDistribution {
    bounds: RadiusBounds,
    components: Vec<Component>,
}

impl MultimodalLogNormalDistribution {
    pub fn new(min_radius: f64, max_radius: f64) -> ParameterResult<Self> {
        Ok(Self {
            bounds: RadiusBounds::new(min_radius, max_radius)?,
            components: Vec::with_capacity(MAX_LOG_NORMAL_COMPONENTS),
        })
    }

    pub fn add_component(
        &mut self,
        mean_radius: f64,
        sigma: f64,
        percentage_density: f64,
        refr_real: &[f64],
        refr_imag: &[f64],
    ) -> ParameterResult<()> {
        let component = Component::new(
            mean_radius,
            sigma,
            percentage_density,
            refr_real,
            refr_imag,
        )?;
        self.push_component(component)
    }

    pub fn push_component(&mut self, component: Component) -> ParameterResult<()> {
        require_count_at_most(
            self.components.len() + 1,
            MAX_LOG_NORMAL_COMPONENTS,
            "components",
        )?;
        self.components.push(component);
        Ok(())
    }

    pub fn bounds(&self) -> RadiusBounds {
        self.bounds
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn validate(&self) -> ParameterResult<()> {
        self.bounds.validate()?;
        require_count_at_most(
            self.components.len(),
            MAX_LOG_NORMAL_COMPONENTS,
            "components",
        )?;
        if self.components.is_empty() {
            return Err(ParameterError::new(
                "components",
                0,
                "at least one component is required",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifiedGammaDistribution {
    bounds: RadiusBounds,
    alpha: f64,
    b: f64,
    gamma: f64,
    refractive_index: RefractiveIndexTable,
}

impl ModifiedGammaDistribution {
    pub fn new(
        min_radius: f64,
        max_radius: f64,
        alpha: f64,
        b: f64,
        gamma: f64,
        refr_real: impl Into<SpectralInput>,
        refr_imag: impl Into<SpectralInput>,
    ) -> ParameterResult<Self> {
        let distribution = Self {
            bounds: RadiusBounds::new(min_radius, max_radius)?,
            alpha,
            b,
            gamma,
            refractive_index: RefractiveIndexTable::broadcast(refr_real, refr_imag, "refr")?,
        };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn bounds(&self) -> RadiusBounds {
        self.bounds
    }

    pub fn shape(&self) -> [f64; 3] {
        [self.alpha, self.b, self.gamma]
    }

    pub fn refractive_index(&self) -> &RefractiveIndexTable {
        &self.refractive_index
    }

    pub fn validate(&self) -> ParameterResult<()> {
        self.bounds.validate()?;
        require_finite(self.alpha, "alpha")?;
        require_positive(self.b, "b")?;
        require_positive(self.gamma, "gamma")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JungePowerLawDistribution {
    bounds: RadiusBounds,
    alpha: f64,
    refractive_index: RefractiveIndexTable,
}

impl JungePowerLawDistribution {
    pub fn new(
        min_radius: f64,
        max_radius: f64,
        alpha: f64,
        refr_real: impl Into<SpectralInput>,
        refr_imag: impl Into<SpectralInput>,
    ) -> ParameterResult<Self> {
        let distribution = Self {
            bounds: RadiusBounds::new(min_radius, max_radius)?,
            alpha,
            refractive_index: RefractiveIndexTable::broadcast(refr_real, refr_imag, "refr")?,
        };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn bounds(&self) -> RadiusBounds {
        self.bounds
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn refractive_index(&self) -> &RefractiveIndexTable {
        &self.refractive_index
    }

    pub fn validate(&self) -> ParameterResult<()> {
        self.bounds.validate()?;
        require_finite(self.alpha, "alpha")?;
        Ok(())
    }
}
