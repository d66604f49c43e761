//! Fit geometry and the capacity formulas shared by both solution kinds.

use crate::part::PartSpecification;

/// Geometry of the interference fit derived from a pair of part
/// specifications, plus the friction and length inputs the capacity
/// formulas need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitGeometry {
    /// Radial interference in millimetres; positive for a press fit.
    pub radial_interference: f64,
    /// Nominal interface radius in millimetres: the average of the inner
    /// part's outer radius and the outer part's inner radius.
    pub nominal_radius: f64,
    /// Axial length of the contact zone in millimetres.
    pub contact_length: f64,
    /// Coulomb friction coefficient at the interface, dimensionless.
    pub friction_coefficient: f64,
}

impl FitGeometry {
    /// Derive the fit geometry from a pair of growth-corrected parts.
    #[must_use]
    pub fn new(
        inner: &PartSpecification,
        outer: &PartSpecification,
        friction_coefficient: f64,
        contact_length: f64,
    ) -> Self {
        Self {
            radial_interference: (inner.outer_diameter - outer.inner_diameter) / 2.0,
            nominal_radius: (inner.outer_diameter + outer.inner_diameter) / 4.0,
            contact_length,
            friction_coefficient,
        }
    }
}

/// Load-carrying capacities of the assembled joint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capacities {
    /// Axial force the friction interface can carry, in newtons.
    pub axial_force: f64,
    /// Torque the friction interface can carry, in newton-millimetres.
    pub torque: f64,
}

/// Axial force capacity of the joint for a given contact pressure.
///
/// `µ · p · 2π · R · L`, in newtons for pressure in MPa and lengths in mm.
#[must_use]
pub fn axial_force_capacity(geometry: &FitGeometry, contact_pressure: f64) -> f64 {
    geometry.friction_coefficient
        * contact_pressure
        * 2.0
        * std::f64::consts::PI
        * geometry.nominal_radius
        * geometry.contact_length
}

/// Torque capacity of the joint for a given contact pressure.
///
/// The axial force capacity acting at the interface radius:
/// `µ · p · 2π · R² · L`, in newton-millimetres.
#[must_use]
pub fn torque_capacity(geometry: &FitGeometry, contact_pressure: f64) -> f64 {
    axial_force_capacity(geometry, contact_pressure) * geometry.nominal_radius
}

/// Compute both capacities from an already-known contact pressure.
///
/// Capacities are always derived from a contact pressure that has been
/// computed first; keeping this a function of the pressure (rather than a
/// mutation that reads a maybe-unset field) fixes that ordering by
/// construction.
#[must_use]
pub fn capacities(geometry: &FitGeometry, contact_pressure: f64) -> Capacities {
    Capacities {
        axial_force: axial_force_capacity(geometry, contact_pressure),
        torque: torque_capacity(geometry, contact_pressure),
    }
}

/// Temperature change that opens a radial gap equal to the interference.
///
/// `2·Δ / (2·R·cte·1e-6)` with the supplied part's expansion coefficient.
/// Applied to the inner part this is the cooling required for assembly;
/// applied to the outer part, the heating required.
#[must_use]
pub fn assembly_temperature_differential(geometry: &FitGeometry, part: &PartSpecification) -> f64 {
    (2.0 * geometry.radial_interference)
        / (2.0 * geometry.nominal_radius * part.expansion_per_degree())
}

/// Von Mises equivalent stress for plane stress with zero shear.
///
/// # Examples
/// ```
/// use pressfitx::von_mises;
///
/// let uniaxial = von_mises(100.0, 0.0);
/// assert!((uniaxial - 100.0).abs() < 1.0e-12);
/// ```
#[must_use]
pub fn von_mises(principal_stress_1: f64, principal_stress_2: f64) -> f64 {
    (principal_stress_1.powi(2) + principal_stress_2.powi(2)
        - principal_stress_1 * principal_stress_2)
        .sqrt()
}
