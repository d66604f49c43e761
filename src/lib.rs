#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analytical;
pub mod errors;
pub mod fea;
pub mod fit;
pub mod mesh;
pub mod part;
pub mod report;
pub mod result;
pub mod transfer;

pub use analytical::{
    compute_stresses, contact_pressure, lame_radial, lame_tangential, AnalyticalSolution,
    StressField, VonMisesExtrema,
};
pub use errors::{MeshParseError, ResponseError};
pub use fea::{FiniteElementSolution, SampledExtrema, RADIUS_MATCH_TOLERANCE};
pub use fit::{
    assembly_temperature_differential, axial_force_capacity, capacities, torque_capacity,
    von_mises, Capacities, FitGeometry,
};
pub use mesh::{Element, Mesh, Node, PartTag, ScalingFactors};
pub use part::{PartSpecification, REFERENCE_TEMPERATURE_C};
pub use result::JointResult;
pub use transfer::{SolverRequest, SolverResponse};
