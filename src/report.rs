//! Plain-text rendering of a solved joint.

use std::fmt::Write;

use crate::result::JointResult;

/// Format an optional stress sample, marking unresolved lookups as
/// unavailable rather than zero.
fn stress_line(value: Option<f64>) -> String {
    match value {
        Some(stress) => format!("{:.2} MPa", stress),
        None => "unavailable".to_owned(),
    }
}

/// Render a textual summary of a solved press-fit joint.
///
/// The report walks through the interface state, the load capacities and
/// the stress picture in the order an engineer would check them.
#[must_use]
pub fn render_summary(result: &JointResult, title: &str) -> String {
    let mut output = String::new();
    let geometry = result.geometry();

    writeln!(&mut output, "{}", title).expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Radial interference: {:.4} mm at R = {:.4} mm over {:.1} mm of contact",
        geometry.radial_interference, geometry.nominal_radius, geometry.contact_length
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Interface pressure: {:.2} MPa",
        result.contact_pressure()
    )
    .expect("writing to string cannot fail");

    let capacities = result.capacities();
    writeln!(
        &mut output,
        "Axial force capacity: {:.1} N, torque capacity: {:.1} N·mm",
        capacities.axial_force, capacities.torque
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Assembly: cool inner part by {:.1} °C or heat outer part by {:.1} °C",
        result.inner_assembly_temperature_differential(),
        result.outer_assembly_temperature_differential()
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Inner part stress: {} at bore, {} at interface",
        stress_line(result.max_inner_von_mises()),
        stress_line(result.min_inner_von_mises())
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Outer part stress: {} at interface, {} at free surface",
        stress_line(result.max_outer_von_mises()),
        stress_line(result.min_outer_von_mises())
    )
    .expect("writing to string cannot fail");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::AnalyticalSolution;
    use crate::part::PartSpecification;

    #[test]
    fn summary_mentions_the_key_quantities() {
        let inner = PartSpecification::new(10.0, 15.05, 200.0, 0.3, 20.0, 20.0);
        let outer = PartSpecification::new(15.0, 30.0, 200.0, 0.3, 20.0, 20.0);
        let result = AnalyticalSolution::new(inner, outer, 0.2, 15.0).into();

        let summary = render_summary(&result, "Shaft and hub");
        assert!(summary.starts_with("Shaft and hub"));
        assert!(summary.contains("Interface pressure"));
        assert!(summary.contains("torque capacity"));
        assert!(summary.contains("°C"));
        assert!(!summary.contains("unavailable"));
    }
}
