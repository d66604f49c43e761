//! Geometric and material description of one cylindrical part.

use serde::{Deserialize, Serialize};

/// Temperature at which part diameters are quoted, in degrees Celsius.
pub const REFERENCE_TEMPERATURE_C: f64 = 20.0;

/// Immutable description of one cylindrical part of the joint.
///
/// Construction cannot fail: geometric validity
/// (`outer_diameter > inner_diameter > 0`) is a caller responsibility.
/// Downstream formulas divide by wall areas derived from these fields, so
/// degenerate inputs produce NaN or infinite results rather than panics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartSpecification {
    /// Bore diameter in millimetres.
    pub inner_diameter: f64,
    /// Outside diameter in millimetres.
    pub outer_diameter: f64,
    /// Young's modulus in gigapascals.
    pub youngs_modulus: f64,
    /// Poisson's ratio, dimensionless, `0 <= v < 0.5`.
    pub poissons_ratio: f64,
    /// Coefficient of thermal expansion in µm/m·°C.
    pub cte: f64,
    /// Operating temperature in degrees Celsius.
    pub temperature: f64,
}

impl PartSpecification {
    /// Create a part specification.
    ///
    /// # Examples
    /// ```
    /// use pressfitx::PartSpecification;
    ///
    /// let shaft = PartSpecification::new(10.0, 15.05, 200.0, 0.3, 20.0, 20.0);
    /// assert_eq!(shaft.outer_diameter, 15.05);
    /// ```
    #[must_use]
    pub const fn new(
        inner_diameter: f64,
        outer_diameter: f64,
        youngs_modulus: f64,
        poissons_ratio: f64,
        cte: f64,
        temperature: f64,
    ) -> Self {
        Self {
            inner_diameter,
            outer_diameter,
            youngs_modulus,
            poissons_ratio,
            cte,
            temperature,
        }
    }

    /// Linear expansion per degree Celsius.
    ///
    /// The stored coefficient is in µm/m·°C; this is the single place the
    /// 1e-6 scaling is applied.
    #[must_use]
    pub fn expansion_per_degree(&self) -> f64 {
        self.cte * 1.0e-6
    }

    /// Return a copy with both diameters scaled for thermal growth.
    ///
    /// The growth rate is `1 + (temperature - 20 °C) * cte * 1e-6`; material
    /// properties pass through unchanged. At the reference temperature this
    /// is an identity transform.
    ///
    /// # Examples
    /// ```
    /// use pressfitx::PartSpecification;
    ///
    /// let cold = PartSpecification::new(10.0, 15.0, 200.0, 0.3, 20.0, 20.0);
    /// assert_eq!(cold.corrected_for_growth(), cold);
    /// ```
    #[must_use]
    pub fn corrected_for_growth(&self) -> Self {
        let growth_rate =
            1.0 + (self.temperature - REFERENCE_TEMPERATURE_C) * self.expansion_per_degree();
        Self {
            inner_diameter: self.inner_diameter * growth_rate,
            outer_diameter: self.outer_diameter * growth_rate,
            ..*self
        }
    }
}
