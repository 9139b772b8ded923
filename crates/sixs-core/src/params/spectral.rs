//! The engine's fixed 20-wavelength reference grid and the tables defined on it.
//!
//! Several parameters accept either one value or one value per reference
//! wavelength. Both forms are normalised here, at construction, into the
//! expanded 20-element table, so equality and serialisation never see the
//! scalar form.

use super::validation::{require_finite, require_length_in, require_range};
use crate::domain::{ParameterError, ParameterResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

pub const REFERENCE_WAVELENGTH_COUNT: usize = 20;

/// Reference wavelengths in micrometres.
pub const REFERENCE_WAVELENGTHS: [f64; REFERENCE_WAVELENGTH_COUNT] = [
    0.350, 0.400, 0.412, 0.443, 0.470, 0.488, 0.515, 0.550, 0.590, 0.633, 0.670, 0.694, 0.760,
    0.860, 1.240, 1.536, 1.650, 1.950, 2.250, 3.750,
];

/// Caller-facing input: a scalar to broadcast or an explicit series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpectralInput {
    Scalar(f64),
    Series(Vec<f64>),
}

impl From<f64> for SpectralInput {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for SpectralInput {
    fn from(values: Vec<f64>) -> Self {
        Self::Series(values)
    }
}

impl From<&[f64]> for SpectralInput {
    fn from(values: &[f64]) -> Self {
        Self::Series(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for SpectralInput {
    fn from(values: [f64; N]) -> Self {
        Self::Series(values.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpectralInput", into = "Vec<f64>")]
pub struct SpectralTable([f64; REFERENCE_WAVELENGTH_COUNT]);

impl SpectralTable {
    pub fn uniform(value: f64) -> Self {
        Self([value; REFERENCE_WAVELENGTH_COUNT])
    }

    /// Accepts one value (broadcast) or exactly 20 values.
    pub fn broadcast(input: impl Into<SpectralInput>, field: &str) -> ParameterResult<Self> {
        match input.into() {
            SpectralInput::Scalar(value) => Ok(Self::uniform(require_finite(value, field)?)),
            SpectralInput::Series(values) => {
                require_length_in(values.len(), &[1, REFERENCE_WAVELENGTH_COUNT], field)?;
                if values.len() == 1 {
                    return Ok(Self::uniform(require_finite(values[0], field)?));
                }
                Self::exact(&values, field)
            }
        }
    }

    /// Accepts exactly 20 values; a scalar is not broadcast.
    pub fn exact(values: &[f64], field: &str) -> ParameterResult<Self> {
        require_length_in(values.len(), &[REFERENCE_WAVELENGTH_COUNT], field)?;
        let mut table = [0.0; REFERENCE_WAVELENGTH_COUNT];
        for (slot, value) in table.iter_mut().zip(values) {
            *slot = require_finite(*value, field)?;
        }
        Ok(Self(table))
    }

    pub fn values(&self) -> &[f64; REFERENCE_WAVELENGTH_COUNT] {
        &self.0
    }

    pub fn is_uniform(&self) -> bool {
        self.0.iter().all(|value| *value == self.0[0])
    }

    pub fn require_each_in(&self, lo: f64, hi: f64, field: &str) -> ParameterResult<()> {
        for value in &self.0 {
            require_range(*value, lo, hi, field)?;
        }
        Ok(())
    }
}

impl TryFrom<SpectralInput> for SpectralTable {
    type Error = ParameterError;

    fn try_from(input: SpectralInput) -> Result<Self, Self::Error> {
        Self::broadcast(input, "spectral table")
    }
}

impl From<SpectralTable> for Vec<f64> {
    fn from(table: SpectralTable) -> Self {
        table.0.to_vec()
    }
}

/// Complex refractive index sampled on the reference grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RefractiveIndexParts", into = "RefractiveIndexParts")]
pub struct RefractiveIndexTable([Complex64; REFERENCE_WAVELENGTH_COUNT]);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RefractiveIndexParts {
    real: SpectralTable,
    imag: SpectralTable,
}

impl RefractiveIndexTable {
    pub fn from_parts(real: SpectralTable, imag: SpectralTable) -> Self {
        let mut table = [Complex64::new(0.0, 0.0); REFERENCE_WAVELENGTH_COUNT];
        for (index, slot) in table.iter_mut().enumerate() {
            *slot = Complex64::new(real.values()[index], imag.values()[index]);
        }
        Self(table)
    }

    pub fn broadcast(
        real: impl Into<SpectralInput>,
        imag: impl Into<SpectralInput>,
        field: &str,
    ) -> ParameterResult<Self> {
        let real = SpectralTable::broadcast(real, &format!("{field} (real part)"))?;
        let imag = SpectralTable::broadcast(imag, &format!("{field} (imaginary part)"))?;
        Ok(Self::from_parts(real, imag))
    }

    pub fn exact(real: &[f64], imag: &[f64], field: &str) -> ParameterResult<Self> {
        let real = SpectralTable::exact(real, &format!("{field} (real part)"))?;
        let imag = SpectralTable::exact(imag, &format!("{field} (imaginary part)"))?;
        Ok(Self::from_parts(real, imag))
    }

    pub fn values(&self) -> &[Complex64; REFERENCE_WAVELENGTH_COUNT] {
        &self.0
    }

    pub fn real_parts(&self) -> [f64; REFERENCE_WAVELENGTH_COUNT] {
        self.0.map(|value| value.re)
    }

    pub fn imag_parts(&self) -> [f64; REFERENCE_WAVELENGTH_COUNT] {
        self.0.map(|value| value.im)
    }
}

impl From<RefractiveIndexParts> for RefractiveIndexTable {
    fn from(parts: RefractiveIndexParts) -> Self {
        Self::from_parts(parts.real, parts.imag)
    }
}

impl From<RefractiveIndexTable> for RefractiveIndexParts {
    fn from(table: RefractiveIndexTable) -> Self {
        Self {
            real: SpectralTable(table.real_parts()),
            imag: SpectralTable(table.imag_parts()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{REFERENCE_WAVELENGTHS, RefractiveIndexTable, SpectralTable};

    #[test]
    fn reference_grid_is_strictly_increasing() {
        assert!(
            REFERENCE_WAVELENGTHS
                .windows(2)
                .all(|pair| pair[0] < pair[1])
        );
    }

    #[test]
    fn scalar_broadcast_matches_explicit_expansion() {
        let scalar = SpectralTable::broadcast(1.47, "refr_real").expect("scalar should broadcast");
        let explicit =
            SpectralTable::broadcast(vec![1.47; 20], "refr_real").expect("20 values accepted");
        let single =
            SpectralTable::broadcast(vec![1.47], "refr_real").expect("one value broadcasts");

        assert_eq!(scalar, explicit);
        assert_eq!(scalar, single);
        assert!(scalar.is_uniform());
    }

    #[test]
    fn other_lengths_are_rejected() {
        let error = SpectralTable::broadcast(vec![1.47; 15], "refr_real")
            .expect_err("15 values should be rejected");
        assert_eq!(error.field(), "refr_real");
        assert_eq!(error.value(), "length 15");

        assert!(SpectralTable::exact(&[1.47], "refr_real").is_err());
        assert!(SpectralTable::exact(&[1.47; 23], "refr_real").is_err());
    }

    #[test]
    fn refractive_index_pairs_real_and_imaginary_parts() {
        let table =
            RefractiveIndexTable::broadcast(1.47, 0.0093, "refr").expect("scalars broadcast");

        assert!(table.real_parts().iter().all(|value| *value == 1.47));
        assert!(table.imag_parts().iter().all(|value| *value == 0.0093));
        assert_eq!(table.values()[7].re, 1.47);
    }

    #[test]
    fn spectral_table_json_accepts_scalar_and_series() {
        let scalar: SpectralTable = serde_json::from_str("0.3").expect("scalar json");
        let series: SpectralTable =
            serde_json::from_str(&serde_json::to_string(&vec![0.3; 20]).expect("encode"))
                .expect("series json");
        assert_eq!(scalar, series);

        assert!(serde_json::from_str::<SpectralTable>("[0.1, 0.2]").is_err());
    }
}
