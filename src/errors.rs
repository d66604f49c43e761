//! Error types produced while decoding solver output.

use thiserror::Error;

/// Error returned when the solver's structured-text mesh cannot be decoded.
///
/// A malformed mesh is fatal for the finite-element result it arrived
/// with; callers should fall back to "no FE result available" rather than
/// attempt recovery.
#[derive(Debug, Error, PartialEq)]
pub enum MeshParseError {
    /// Returned when a required section marker never appears in the text.
    #[error("mesh text is missing the `{marker}` section")]
    MissingSection {
        /// Marker literal of the absent section.
        marker: &'static str,
    },
    /// Returned when a row cannot be split into the expected fields.
    #[error("malformed row in the `{section}` section: `{line}`")]
    MalformedRow {
        /// Marker literal of the section containing the row.
        section: &'static str,
        /// The offending row, verbatim.
        line: String,
    },
    /// Returned when an element row does not list exactly eight nodes.
    #[error("element {element} lists {count} nodes; a quadratic axisymmetric element has 8")]
    WrongNodeCount {
        /// Id of the offending element.
        element: usize,
        /// Number of node ids the row actually listed.
        count: usize,
    },
    /// Returned when a connectivity or membership row references a node
    /// that is not in the node table.
    #[error("mesh references unknown node id {id}")]
    UnknownNode {
        /// The unresolved node id.
        id: usize,
    },
    /// Returned when a membership row references an element that is not in
    /// the connectivity table.
    #[error("mesh references unknown element id {id}")]
    UnknownElement {
        /// The unresolved element id.
        id: usize,
    },
}

/// Error returned when a solver response cannot be turned into a
/// finite-element solution.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Returned when the response body is not valid JSON.
    #[error("solver response is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when the embedded mesh text fails to parse.
    #[error("solver response mesh could not be decoded: {0}")]
    Mesh(#[from] MeshParseError),
    /// Returned when a result map is keyed by something other than an
    /// integer entity id.
    #[error("solver response contains a non-integer {what} id `{key}`")]
    BadEntityId {
        /// Which map the key came from.
        what: &'static str,
        /// The offending key, verbatim.
        key: String,
    },
}
