//! Demonstration binary: solve a reference shaft-and-hub joint and print
//! the summary report.

use pressfitx::report::render_summary;
use pressfitx::{AnalyticalSolution, PartSpecification};

fn main() {
    // A 15 mm steel shaft pressed into a 30 mm hub with 50 µm of
    // diametral interference, both sitting at 12.2 °C.
    let shaft = PartSpecification::new(10.0, 15.05, 200.0, 0.3, 20.0, 12.2);
    let hub = PartSpecification::new(15.0, 30.0, 200.0, 0.3, 20.0, 12.2);

    let solution = AnalyticalSolution::new(shaft, hub, 0.2, 15.0);
    print!(
        "{}",
        render_summary(&solution.into(), "Shaft and hub press fit (analytical)")
    );
}
