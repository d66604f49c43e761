//! Post-processed view of a finite-element solve of the joint.
//!
//! The solve itself happens in an external service; this module combines
//! its decoded mesh with the per-node displacement and per-element stress
//! tables it returned, and extracts radius-localized values from them.

use std::collections::HashMap;

use crate::fit::{self, Capacities, FitGeometry};
use crate::mesh::Mesh;
use crate::part::PartSpecification;

/// Absolute tolerance, in millimetres, for matching a requested radius
/// against undeformed node coordinates.
pub const RADIUS_MATCH_TOLERANCE: f64 = 0.001;

/// Von Mises stresses sampled from the elemental result table at the four
/// diagnostic radii. Each sample is `None` when no element matched the
/// radius or the table had no entry for the matching element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampledExtrema {
    /// Sample at the inner part's bore, in MPa.
    pub max_inner: Option<f64>,
    /// Sample at the inner part's outer wall, in MPa.
    pub min_inner: Option<f64>,
    /// Sample at the outer part's bore, in MPa.
    pub max_outer: Option<f64>,
    /// Sample at the outer part's free surface, in MPa.
    pub min_outer: Option<f64>,
}

/// Finite-element view of one press-fit joint.
///
/// Owns the decoded mesh and treats the two result maps as read-only
/// lookup tables keyed by entity id. Lookups that find no entity within
/// tolerance resolve to `None` — an unavailable value, never an error and
/// never zero.
#[derive(Clone, Debug)]
pub struct FiniteElementSolution {
    /// Inner part, growth-corrected before it was sent to the solver.
    inner: PartSpecification,
    /// Outer part, growth-corrected before it was sent to the solver.
    outer: PartSpecification,
    /// Fit geometry, with the interface radius re-informed by the solve.
    geometry: FitGeometry,
    /// The decoded mesh.
    mesh: Mesh,
    /// Von Mises stress per element id, in MPa.
    elemental_stresses: HashMap<usize, f64>,
    /// Total displacement per node id, in metres.
    nodal_displacements: HashMap<usize, f64>,
    /// Contact pressure reported by the solver, in MPa.
    contact_pressure: f64,
    /// Capacities derived from the FE-informed geometry.
    capacities: Capacities,
    /// Stresses sampled at the diagnostic radii.
    von_mises: SampledExtrema,
    /// Bore deflection of the inner part, in millimetres.
    inner_deflection: Option<f64>,
    /// Free-surface deflection of the outer part, in millimetres.
    outer_deflection: Option<f64>,
}

impl FiniteElementSolution {
    /// Combine a decoded mesh with the solver's result tables.
    ///
    /// Both parts must already be growth-corrected (they were corrected
    /// before being serialized into the solve request). The contact
    /// pressure comes from the solver rather than the closed form, and the
    /// interface radius is re-informed by the solved deflection when the
    /// lookup resolves. Capacities are derived last, from that geometry
    /// and pressure.
    #[must_use]
    pub fn new(
        inner: PartSpecification,
        outer: PartSpecification,
        friction_coefficient: f64,
        contact_length: f64,
        mesh: Mesh,
        elemental_stresses: HashMap<usize, f64>,
        nodal_displacements: HashMap<usize, f64>,
        contact_pressure: f64,
    ) -> Self {
        let geometry = FitGeometry::new(&inner, &outer, friction_coefficient, contact_length);
        let mut solution = Self {
            inner,
            outer,
            geometry,
            mesh,
            elemental_stresses,
            nodal_displacements,
            contact_pressure,
            capacities: Capacities {
                axial_force: f64::NAN,
                torque: f64::NAN,
            },
            von_mises: SampledExtrema::default(),
            inner_deflection: None,
            outer_deflection: None,
        };

        solution.extract_derived_values();
        solution
    }

    /// Displacement of the first node whose undeformed x-coordinate
    /// matches `radius` within [`RADIUS_MATCH_TOLERANCE`].
    ///
    /// The returned value is in the solver's unit (metres). `None` marks
    /// an unresolved lookup: no node within tolerance, or no table entry
    /// for the node that matched.
    #[must_use]
    pub fn deflection_at_radius(&self, radius: f64) -> Option<f64> {
        self.mesh
            .nodes()
            .iter()
            .find(|node| (node.position.x - radius).abs() < RADIUS_MATCH_TOLERANCE)
            .and_then(|node| self.nodal_displacements.get(&node.id).copied())
    }

    /// Stress of the first element with an outer-edge node matching
    /// `radius` within [`RADIUS_MATCH_TOLERANCE`], in MPa.
    ///
    /// The candidate nodes are those at indices 0 and 5 of the 8-node
    /// ordering — the corner and midside nodes lying on the element's
    /// outer edge.
    #[must_use]
    pub fn stress_at_radius(&self, radius: f64) -> Option<f64> {
        self.mesh
            .elements()
            .iter()
            .find(|element| {
                [element.node_ids[0], element.node_ids[5]].iter().any(|&id| {
                    self.mesh
                        .node(id)
                        .map(|node| (node.position.x - radius).abs() < RADIUS_MATCH_TOLERANCE)
                        .unwrap_or(false)
                })
            })
            .and_then(|element| self.elemental_stresses.get(&element.id).copied())
    }

    /// Fit geometry, with the interface radius re-informed by the FE
    /// deflection when that lookup resolved.
    #[must_use]
    pub fn geometry(&self) -> &FitGeometry {
        &self.geometry
    }

    /// The decoded mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Contact pressure reported by the solver, in MPa.
    #[must_use]
    pub fn contact_pressure(&self) -> f64 {
        self.contact_pressure
    }

    /// Joint capacities derived from the FE-informed geometry.
    #[must_use]
    pub fn capacities(&self) -> &Capacities {
        &self.capacities
    }

    /// Von Mises stresses sampled at the diagnostic radii.
    #[must_use]
    pub fn von_mises(&self) -> &SampledExtrema {
        &self.von_mises
    }

    /// Deflection of the inner part's bore in millimetres, when resolved.
    #[must_use]
    pub fn inner_deflection(&self) -> Option<f64> {
        self.inner_deflection
    }

    /// Deflection of the outer part's free surface in millimetres, when
    /// resolved.
    #[must_use]
    pub fn outer_deflection(&self) -> Option<f64> {
        self.outer_deflection
    }

    /// Inner part specification as sent to the solver.
    #[must_use]
    pub fn inner_part(&self) -> &PartSpecification {
        &self.inner
    }

    /// Outer part specification as sent to the solver.
    #[must_use]
    pub fn outer_part(&self) -> &PartSpecification {
        &self.outer
    }

    /// Fill the derived fields from the mesh and result tables.
    fn extract_derived_values(&mut self) {
        let interface_radius = self.inner.outer_diameter / 2.0;
        if let Some(deflection) = self.deflection_at_radius(interface_radius) {
            // Replace the nominal average radius with the deformed
            // interface radius observed in the FE solution.
            self.geometry.nominal_radius = interface_radius + deflection * 1000.0;
        }

        self.inner_deflection = self
            .deflection_at_radius(self.inner.inner_diameter / 2.0)
            .map(|d| d * 1000.0);
        self.outer_deflection = self
            .deflection_at_radius(self.outer.outer_diameter / 2.0)
            .map(|d| d * 1000.0);

        self.von_mises = SampledExtrema {
            max_inner: self.stress_at_radius(self.inner.inner_diameter / 2.0),
            min_inner: self.stress_at_radius(self.inner.outer_diameter / 2.0),
            max_outer: self.stress_at_radius(self.outer.inner_diameter / 2.0),
            min_outer: self.stress_at_radius(self.outer.outer_diameter / 2.0),
        };

        self.capacities = fit::capacities(&self.geometry, self.contact_pressure);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::mesh::TWO_ELEMENT_MESH;

    fn solution() -> FiniteElementSolution {
        let inner = PartSpecification::new(10.0, 15.0, 200.0, 0.3, 20.0, 20.0);
        let outer = PartSpecification::new(15.0, 20.0, 200.0, 0.3, 20.0, 20.0);
        let mesh = Mesh::parse(TWO_ELEMENT_MESH).expect("synthetic mesh parses");

        let mut stresses = HashMap::new();
        stresses.insert(1, 120.0);
        stresses.insert(2, 95.0);

        let mut displacements = HashMap::new();
        displacements.insert(1, 1.0e-6);
        displacements.insert(3, 2.0e-6);
        displacements.insert(9, 1.5e-6);

        FiniteElementSolution::new(inner, outer, 0.2, 15.0, mesh, stresses, displacements, 60.0)
    }

    #[test]
    fn deflection_lookup_resolves_within_tolerance() {
        let solution = solution();
        // Node 1 sits at exactly 5 mm; 0.0005 mm away is still a match.
        assert_eq!(solution.deflection_at_radius(5.0), Some(1.0e-6));
        assert_eq!(solution.deflection_at_radius(5.0005), Some(1.0e-6));
    }

    #[test]
    fn deflection_lookup_misses_outside_tolerance() {
        let solution = solution();
        // Nearest nodes to 6.0 mm sit at 6.25 mm.
        assert_eq!(solution.deflection_at_radius(6.0), None);
        assert_eq!(solution.deflection_at_radius(5.002), None);
    }

    #[test]
    fn deflection_lookup_misses_when_table_has_no_entry() {
        let solution = solution();
        // Node 2 exists at 6.25 mm but the displacement table skips it.
        assert_eq!(solution.deflection_at_radius(6.25), None);
    }

    #[test]
    fn stress_lookup_matches_via_either_outer_edge_node() {
        let solution = solution();
        // Element 1's node at index 0 (node 1) sits at 5 mm.
        assert_eq!(solution.stress_at_radius(5.0), Some(120.0));
        // Element 2's node at index 5 (node 13) sits at 10 mm.
        assert_eq!(solution.stress_at_radius(10.0), Some(95.0));
    }

    #[test]
    fn stress_lookup_returns_first_matching_element() {
        let solution = solution();
        // Both elements touch the 7.5 mm interface; the scan finds
        // element 1 first.
        assert_eq!(solution.stress_at_radius(7.5), Some(120.0));
    }

    #[test]
    fn stress_lookup_misses_for_absent_radius() {
        let solution = solution();
        assert_eq!(solution.stress_at_radius(3.0), None);
    }

    #[test]
    fn interface_radius_is_informed_by_the_solved_deflection() {
        let solution = solution();
        // Node 3 at the 7.5 mm interface carries 2e-6 m of deflection.
        assert_relative_eq!(
            solution.geometry().nominal_radius,
            7.5 + 2.0e-6 * 1000.0,
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn derived_deflections_convert_to_millimetres() {
        let solution = solution();
        assert_relative_eq!(
            solution.inner_deflection().expect("bore deflection resolves"),
            1.0e-3,
            epsilon = 1.0e-15
        );
        assert_relative_eq!(
            solution.outer_deflection().expect("outer deflection resolves"),
            1.5e-3,
            epsilon = 1.0e-15
        );
    }

    #[test]
    fn sampled_extrema_follow_the_radius_lookups() {
        let solution = solution();
        let samples = solution.von_mises();
        assert_eq!(samples.max_inner, Some(120.0));
        assert_eq!(samples.min_inner, Some(120.0));
        assert_eq!(samples.max_outer, Some(120.0));
        assert_eq!(samples.min_outer, Some(95.0));
    }

    #[test]
    fn capacities_use_the_informed_geometry_and_solver_pressure() {
        let solution = solution();
        let expected = fit::capacities(solution.geometry(), 60.0);
        assert_eq!(*solution.capacities(), expected);
    }
}
