//! Uniform read surface over the two solution kinds.

use crate::analytical::AnalyticalSolution;
use crate::fea::FiniteElementSolution;
use crate::fit::{self, Capacities, FitGeometry};
use crate::part::PartSpecification;

/// A solved press-fit joint, from either the closed-form path or the
/// finite-element path.
///
/// Both variants share the fit geometry and capacity record; the stress
/// data is variant-specific. Accessors that can be unavailable on the
/// finite-element side return `Option` uniformly, with the analytical
/// variant always resolving to `Some`.
#[derive(Clone, Debug)]
pub enum JointResult {
    /// Closed-form Lamé solution.
    Analytical(AnalyticalSolution),
    /// Post-processed finite-element solution.
    FiniteElement(FiniteElementSolution),
}

impl JointResult {
    /// Fit geometry of the joint.
    #[must_use]
    pub fn geometry(&self) -> &FitGeometry {
        match self {
            JointResult::Analytical(solution) => solution.geometry(),
            JointResult::FiniteElement(solution) => solution.geometry(),
        }
    }

    /// Contact pressure at the interface, in MPa.
    #[must_use]
    pub fn contact_pressure(&self) -> f64 {
        match self {
            JointResult::Analytical(solution) => solution.contact_pressure(),
            JointResult::FiniteElement(solution) => solution.contact_pressure(),
        }
    }

    /// Joint capacities.
    #[must_use]
    pub fn capacities(&self) -> &Capacities {
        match self {
            JointResult::Analytical(solution) => solution.capacities(),
            JointResult::FiniteElement(solution) => solution.capacities(),
        }
    }

    /// Von Mises stress at the inner part's bore, in MPa.
    #[must_use]
    pub fn max_inner_von_mises(&self) -> Option<f64> {
        match self {
            JointResult::Analytical(solution) => Some(solution.stresses().von_mises.max_inner),
            JointResult::FiniteElement(solution) => solution.von_mises().max_inner,
        }
    }

    /// Von Mises stress at the inner part's outer wall, in MPa.
    #[must_use]
    pub fn min_inner_von_mises(&self) -> Option<f64> {
        match self {
            JointResult::Analytical(solution) => Some(solution.stresses().von_mises.min_inner),
            JointResult::FiniteElement(solution) => solution.von_mises().min_inner,
        }
    }

    /// Von Mises stress at the outer part's bore, in MPa.
    #[must_use]
    pub fn max_outer_von_mises(&self) -> Option<f64> {
        match self {
            JointResult::Analytical(solution) => Some(solution.stresses().von_mises.max_outer),
            JointResult::FiniteElement(solution) => solution.von_mises().max_outer,
        }
    }

    /// Von Mises stress at the outer part's free surface, in MPa.
    #[must_use]
    pub fn min_outer_von_mises(&self) -> Option<f64> {
        match self {
            JointResult::Analytical(solution) => Some(solution.stresses().von_mises.min_outer),
            JointResult::FiniteElement(solution) => solution.von_mises().min_outer,
        }
    }

    /// Cooling of the inner part that would free the interference for
    /// assembly, in degrees Celsius.
    #[must_use]
    pub fn inner_assembly_temperature_differential(&self) -> f64 {
        fit::assembly_temperature_differential(self.geometry(), self.inner_part())
    }

    /// Heating of the outer part that would free the interference for
    /// assembly, in degrees Celsius.
    #[must_use]
    pub fn outer_assembly_temperature_differential(&self) -> f64 {
        fit::assembly_temperature_differential(self.geometry(), self.outer_part())
    }

    /// The growth-corrected inner part.
    #[must_use]
    pub fn inner_part(&self) -> &PartSpecification {
        match self {
            JointResult::Analytical(solution) => solution.inner_part(),
            JointResult::FiniteElement(solution) => solution.inner_part(),
        }
    }

    /// The growth-corrected outer part.
    #[must_use]
    pub fn outer_part(&self) -> &PartSpecification {
        match self {
            JointResult::Analytical(solution) => solution.outer_part(),
            JointResult::FiniteElement(solution) => solution.outer_part(),
        }
    }
}

impl From<AnalyticalSolution> for JointResult {
    fn from(solution: AnalyticalSolution) -> Self {
        JointResult::Analytical(solution)
    }
}

impl From<FiniteElementSolution> for JointResult {
    fn from(solution: FiniteElementSolution) -> Self {
        JointResult::FiniteElement(solution)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn analytical_result() -> JointResult {
        let inner = PartSpecification::new(10.0, 15.05, 200.0, 0.3, 20.0, 20.0);
        let outer = PartSpecification::new(15.0, 30.0, 200.0, 0.3, 20.0, 20.0);
        AnalyticalSolution::new(inner, outer, 0.2, 15.0).into()
    }

    #[test]
    fn analytical_variant_always_resolves_stress_accessors() {
        let result = analytical_result();
        assert!(result.max_inner_von_mises().is_some());
        assert!(result.min_inner_von_mises().is_some());
        assert!(result.max_outer_von_mises().is_some());
        assert!(result.min_outer_von_mises().is_some());
    }

    #[test]
    fn assembly_differentials_follow_the_part_expansion_coefficients() {
        let result = analytical_result();
        let geometry = result.geometry();
        let expected =
            geometry.radial_interference / (geometry.nominal_radius * 20.0e-6);
        assert_relative_eq!(
            result.inner_assembly_temperature_differential(),
            expected,
            epsilon = 1.0e-9
        );
        // Same CTE on both parts here, so the differentials agree.
        assert_relative_eq!(
            result.inner_assembly_temperature_differential(),
            result.outer_assembly_temperature_differential(),
            epsilon = 1.0e-12
        );
    }
}
