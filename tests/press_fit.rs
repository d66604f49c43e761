use approx::assert_relative_eq;
use pressfitx::{
    AnalyticalSolution, JointResult, PartSpecification, SolverRequest, SolverResponse,
};

/// Reference scenario: a 15 mm shaft with 50 µm of diametral interference
/// in a 30 mm hub, both in steel at 12.2 °C.
fn shaft() -> PartSpecification {
    PartSpecification::new(10.0, 15.05, 200.0, 0.3, 20.0, 12.2)
}

fn hub() -> PartSpecification {
    PartSpecification::new(15.0, 30.0, 200.0, 0.3, 20.0, 12.2)
}

fn reference_solution() -> AnalyticalSolution {
    AnalyticalSolution::new(shaft(), hub(), 0.2, 15.0)
}

const SOLVER_MESH: &str = "\
*NODE, NSET=nodes
1, 0.005, 0.0, 0.0
2, 0.00625, 0.0, 0.0
3, 0.0075, 0.0, 0.0
4, 0.0075, 0.001, 0.0
5, 0.005, 0.001, 0.0
6, 0.00625, 0.001, 0.0
7, 0.005, 0.0005, 0.0
8, 0.0075, 0.0005, 0.0
9, 0.01, 0.0, 0.0
10, 0.01, 0.001, 0.0
11, 0.00875, 0.0, 0.0
12, 0.00875, 0.001, 0.0
13, 0.01, 0.0005, 0.0
*ELEMENT, TYPE=CAX8, ELSET=EAll
1, 1, 3, 4, 5, 2, 8, 6, 7
2, 3, 9, 10, 4, 11, 13, 12, 8
*NSET,NSET=L1_nodes
3, 4, 8
*ELSET,ELSET=PART0_elements
1
*ELSET,ELSET=PART1_elements
2
*SURFACE,NAME=L2_faces,TYPE=ELEMENT
2, S4
*NSET,NSET=PART0_nodes
1, 2, 5, 6, 7
*NSET,NSET=PART1_nodes
9, 10, 11, 12, 13
*MATERIAL,NAME=STEEL
";

#[test]
fn reference_geometry_matches_the_nominal_values() {
    let solution = reference_solution();
    let geometry = solution.geometry();

    // Thermal growth at 12.2 °C shifts the nominal figures by less than
    // 0.02 %, so they hold to a loose tolerance.
    assert_relative_eq!(geometry.radial_interference, 0.025, max_relative = 1.0e-3);
    assert_relative_eq!(geometry.nominal_radius, 7.5125, max_relative = 1.0e-3);
}

#[test]
fn reference_results_are_finite_positive_and_deterministic() {
    let solution = reference_solution();

    assert!(solution.contact_pressure().is_finite());
    assert!(solution.contact_pressure() > 0.0);
    assert!(solution.capacities().axial_force > 0.0);
    assert!(solution.capacities().torque > 0.0);

    let extrema = solution.stresses().von_mises;
    for value in [
        extrema.max_inner,
        extrema.min_inner,
        extrema.max_outer,
        extrema.min_outer,
    ] {
        assert!(value.is_finite());
        assert!(value >= 0.0);
    }

    // Same inputs, same numbers, bit for bit.
    let again = reference_solution();
    assert_eq!(solution.contact_pressure(), again.contact_pressure());
    assert_eq!(solution.stresses().von_mises, again.stresses().von_mises);
}

#[test]
fn capacity_only_update_leaves_the_stress_field_untouched() {
    let mut solution = reference_solution();
    let stresses_before = *solution.stresses();

    solution.update(shaft(), hub(), 0.35, 15.0);

    assert_eq!(*solution.stresses(), stresses_before);
    assert_relative_eq!(
        solution.capacities().axial_force,
        pressfitx::axial_force_capacity(solution.geometry(), stresses_before.contact_pressure),
        epsilon = 1.0e-9
    );
}

#[test]
fn analytical_and_finite_element_results_share_one_read_surface() {
    let request = SolverRequest::new(
        PartSpecification::new(10.0, 15.0, 200.0, 0.3, 20.0, 20.0),
        PartSpecification::new(15.0, 20.0, 200.0, 0.3, 20.0, 20.0),
        0.2,
        15.0,
    );
    let body = serde_json::json!({
        "mesh": SOLVER_MESH,
        "elemental_stresses": { "1": 120.0, "2": 95.0 },
        "nodal_displacements": { "1": 1.0e-6, "3": 2.0e-6, "9": 1.5e-6 },
        "contact_pressure": 60.0,
    })
    .to_string();

    let fe_result: JointResult = SolverResponse::from_json(&body)
        .expect("response decodes")
        .into_solution(&request)
        .expect("solution builds")
        .into();
    let analytical_result: JointResult = reference_solution().into();

    for result in [&analytical_result, &fe_result] {
        assert!(result.contact_pressure() > 0.0);
        assert!(result.capacities().torque > 0.0);
        assert!(result.inner_assembly_temperature_differential() > 0.0);
    }

    // The FE variant reports its sampled stresses through the same
    // accessors the analytical variant uses.
    assert_eq!(fe_result.max_inner_von_mises(), Some(120.0));
    assert_eq!(fe_result.min_outer_von_mises(), Some(95.0));
    assert!(analytical_result.max_inner_von_mises().is_some());

    // The FE interface radius is informed by the solved deflection.
    assert_relative_eq!(
        fe_result.geometry().nominal_radius,
        7.5 + 2.0e-3,
        epsilon = 1.0e-9
    );
}

#[test]
fn fe_lookup_misses_surface_as_unavailable_not_zero() {
    let request = SolverRequest::new(
        PartSpecification::new(10.0, 15.0, 200.0, 0.3, 20.0, 20.0),
        PartSpecification::new(15.0, 20.0, 200.0, 0.3, 20.0, 20.0),
        0.2,
        15.0,
    );
    // Result tables that skip every entity the diagnostic radii resolve to.
    let body = serde_json::json!({
        "mesh": SOLVER_MESH,
        "elemental_stresses": {},
        "nodal_displacements": {},
        "contact_pressure": 60.0,
    })
    .to_string();

    let fe_result: JointResult = SolverResponse::from_json(&body)
        .expect("response decodes")
        .into_solution(&request)
        .expect("solution builds")
        .into();

    assert_eq!(fe_result.max_inner_von_mises(), None);
    assert_eq!(fe_result.min_outer_von_mises(), None);
    // Without a resolved interface deflection the nominal radius stands.
    assert_relative_eq!(fe_result.geometry().nominal_radius, 7.5, epsilon = 1.0e-12);
}
