//! Serialization contract with the external finite-element service.
//!
//! The transport itself (HTTP, retries, backoff) lives outside this crate;
//! only the shape of what crosses the boundary is defined here.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ResponseError;
use crate::fea::FiniteElementSolution;
use crate::mesh::Mesh;
use crate::part::PartSpecification;

/// Inputs serialized for the external solver.
///
/// The request carries growth-corrected part specifications, so the solver
/// and the analytical path see the same geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolverRequest {
    /// Inner part, corrected for thermal growth.
    pub inner_part: PartSpecification,
    /// Outer part, corrected for thermal growth.
    pub outer_part: PartSpecification,
    /// Coulomb friction coefficient at the interface.
    pub friction_coefficient: f64,
    /// Axial contact length in millimetres.
    pub contact_length: f64,
}

impl SolverRequest {
    /// Build a request from as-specified parts, applying the thermal
    /// growth correction.
    #[must_use]
    pub fn new(
        inner: PartSpecification,
        outer: PartSpecification,
        friction_coefficient: f64,
        contact_length: f64,
    ) -> Self {
        Self {
            inner_part: inner.corrected_for_growth(),
            outer_part: outer.corrected_for_growth(),
            friction_coefficient,
            contact_length,
        }
    }
}

/// Raw payload returned by the external solver.
///
/// The result maps arrive keyed by stringified entity ids, as JSON object
/// keys always are; [`SolverResponse::into_solution`] converts them to
/// integer-keyed tables.
#[derive(Clone, Debug, Deserialize)]
pub struct SolverResponse {
    /// The mesh the solver used, in its structured-text format.
    pub mesh: String,
    /// Von Mises stress per element id, in MPa.
    pub elemental_stresses: HashMap<String, f64>,
    /// Total displacement per node id, in metres.
    pub nodal_displacements: HashMap<String, f64>,
    /// Contact pressure at the interface, in MPa.
    pub contact_pressure: f64,
}

impl SolverResponse {
    /// Decode a response from its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Json`] when the body is not valid JSON or
    /// is missing a field of the contract.
    pub fn from_json(body: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Turn the response into a finite-element solution for the joint the
    /// request described.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Mesh`] when the embedded mesh text fails
    /// to parse and [`ResponseError::BadEntityId`] when a result map is
    /// keyed by a non-integer id.
    pub fn into_solution(
        self,
        request: &SolverRequest,
    ) -> Result<FiniteElementSolution, ResponseError> {
        let mesh = Mesh::parse(&self.mesh)?;
        let elemental_stresses = integer_keyed(self.elemental_stresses, "element")?;
        let nodal_displacements = integer_keyed(self.nodal_displacements, "node")?;

        debug!(
            "solver response carries {} elemental and {} nodal results",
            elemental_stresses.len(),
            nodal_displacements.len()
        );

        Ok(FiniteElementSolution::new(
            request.inner_part,
            request.outer_part,
            request.friction_coefficient,
            request.contact_length,
            mesh,
            elemental_stresses,
            nodal_displacements,
            self.contact_pressure,
        ))
    }
}

/// Convert a string-keyed result map into an integer-keyed lookup table.
fn integer_keyed(
    map: HashMap<String, f64>,
    what: &'static str,
) -> Result<HashMap<usize, f64>, ResponseError> {
    map.into_iter()
        .map(|(key, value)| {
            key.parse::<usize>()
                .map(|id| (id, value))
                .map_err(|_| ResponseError::BadEntityId { what, key })
        })
        .collect()
}
