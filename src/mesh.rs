//! Node/element mesh model decoded from the external solver's
//! CalculiX-style structured-text format.

use std::collections::HashMap;

use log::debug;
use nalgebra::{Point3, Vector2};

use crate::errors::MeshParseError;

/// Marker opening the node table.
const NODE_TABLE_MARKER: &str = "*NODE, NSET=nodes";
/// Marker opening the connectivity table of 8-node axisymmetric elements.
const ELEMENT_TABLE_MARKER: &str = "*ELEMENT, TYPE=CAX8, ELSET=EAll";
/// Marker opening the node set that traces the contact interface.
const INTERFACE_NODES_MARKER: &str = "*NSET,NSET=L1_nodes";
/// Marker opening the inner part's element membership list.
const INNER_ELEMENTS_MARKER: &str = "*ELSET,ELSET=PART0_elements";
/// Marker opening the outer part's element membership list.
const OUTER_ELEMENTS_MARKER: &str = "*ELSET,ELSET=PART1_elements";
/// Marker opening the inner part's node membership list.
const INNER_NODES_MARKER: &str = "*NSET,NSET=PART0_nodes";
/// Marker opening the outer part's node membership list.
const OUTER_NODES_MARKER: &str = "*NSET,NSET=PART1_nodes";
/// Prefix of the material section that terminates the scan.
const MATERIAL_MARKER: &str = "*MATERIAL,NAME";

/// Which physical part of the joint a node or element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartTag {
    /// The inner part (part number 0).
    Inner,
    /// The outer part (part number 1).
    Outer,
}

/// Scaling context mapping mesh coordinates onto a display viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingFactors {
    /// Horizontal scale from millimetres to display units.
    pub x_scale: f64,
    /// Vertical scale from millimetres to display units.
    pub y_scale: f64,
    /// Margin added on both display axes.
    pub margin: f64,
    /// Minimum and maximum x coordinate of the mesh, in millimetres.
    pub x_range: [f64; 2],
}

/// A mesh node.
///
/// Coordinates are stored in millimetres; the parser converts from the
/// solver's metres on load.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Node id, unique within its mesh.
    pub id: usize,
    /// Undeformed position in millimetres.
    pub position: Point3<f64>,
    /// Display position, recomputed whenever the scaling context changes.
    pub vis: Vector2<f64>,
    /// Owning part, when the membership lists assign one.
    pub part: Option<PartTag>,
}

impl Node {
    /// Create a node from solver coordinates in metres.
    fn from_metres(id: usize, x: f64, y: f64, z: f64) -> Self {
        let position = Point3::new(x * 1000.0, y * 1000.0, z * 1000.0);
        Self {
            id,
            vis: Vector2::new(position.x, position.y),
            position,
            part: None,
        }
    }

    /// Recompute the display position for a new scaling context.
    ///
    /// `elemental_y_scale` exaggerates vertical displacement in plots and
    /// defaults to 1 for undistorted views.
    pub fn set_scaling(&mut self, factors: &ScalingFactors, elemental_y_scale: f64) {
        self.vis = Vector2::new(
            (self.position.x - factors.x_range[0]) * factors.x_scale + factors.margin,
            self.position.y * factors.y_scale * elemental_y_scale + factors.margin,
        );
    }
}

/// An 8-node quadratic axisymmetric element.
///
/// The first four node ids are the corners tracing the quadrilateral
/// boundary; the remaining four are edge midpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Element id, unique within its mesh.
    pub id: usize,
    /// The eight node ids, corners first.
    pub node_ids: [usize; 8],
    /// Owning part, when the membership lists assign one.
    pub part: Option<PartTag>,
}

impl Element {
    /// The four corner node ids, in boundary order.
    #[must_use]
    pub fn corner_node_ids(&self) -> &[usize] {
        &self.node_ids[..4]
    }
}

/// A decoded mesh: nodes, elements and part-membership tags.
///
/// Nodes and elements are owned exclusively by the mesh. Lookups by id go
/// through explicit index maps, so ids need not be dense or 1-based.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Nodes in table order.
    nodes: Vec<Node>,
    /// Elements in table order.
    elements: Vec<Element>,
    /// Ids of the nodes tracing the contact interface.
    interface_node_ids: Vec<usize>,
    /// Node id to position in `nodes`.
    node_index: HashMap<usize, usize>,
    /// Element id to position in `elements`.
    element_index: HashMap<usize, usize>,
}

/// Sections of the structured-text format the parser models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Section {
    /// The node coordinate table.
    Nodes,
    /// The element connectivity table.
    Elements,
    /// The node set tracing the contact interface.
    InterfaceNodes,
    /// The inner part's element membership list.
    InnerElements,
    /// The outer part's element membership list.
    OuterElements,
    /// The inner part's node membership list.
    InnerNodes,
    /// The outer part's node membership list.
    OuterNodes,
}

impl Section {
    /// Marker literal that opens this section.
    fn marker(self) -> &'static str {
        match self {
            Section::Nodes => NODE_TABLE_MARKER,
            Section::Elements => ELEMENT_TABLE_MARKER,
            Section::InterfaceNodes => INTERFACE_NODES_MARKER,
            Section::InnerElements => INNER_ELEMENTS_MARKER,
            Section::OuterElements => OUTER_ELEMENTS_MARKER,
            Section::InnerNodes => INNER_NODES_MARKER,
            Section::OuterNodes => OUTER_NODES_MARKER,
        }
    }
}

impl Mesh {
    /// Decode a mesh from the solver's structured-text format.
    ///
    /// The text is tokenized line by line: recognized section markers open
    /// a section, body lines accumulate under the current one, and
    /// unrecognized `*` headers (face definitions, extra node sets) open a
    /// section that is skipped. The scan stops at the material section.
    /// Blank lines are ignored throughout.
    ///
    /// # Errors
    ///
    /// Returns [`MeshParseError`] when a required section is missing, a row
    /// is malformed, an element does not list exactly eight nodes, or a
    /// membership list references an unknown node or element. A malformed
    /// mesh is fatal for the result set it came with; there is nothing to
    /// recover.
    pub fn parse(text: &str) -> Result<Self, MeshParseError> {
        let sections = split_into_sections(text);

        let mut mesh = Mesh::default();
        mesh.build_nodes(required(&sections, Section::Nodes)?)?;
        mesh.build_elements(required(&sections, Section::Elements)?)?;

        mesh.interface_node_ids = parse_id_rows(
            required(&sections, Section::InterfaceNodes)?,
            Section::InterfaceNodes.marker(),
        )?;

        mesh.tag_elements(required(&sections, Section::InnerElements)?, PartTag::Inner)?;
        mesh.tag_elements(required(&sections, Section::OuterElements)?, PartTag::Outer)?;
        mesh.tag_nodes(required(&sections, Section::InnerNodes)?, PartTag::Inner)?;
        mesh.tag_nodes(required(&sections, Section::OuterNodes)?, PartTag::Outer)?;

        debug!(
            "parsed mesh with {} nodes and {} elements",
            mesh.nodes.len(),
            mesh.elements.len()
        );

        Ok(mesh)
    }

    /// All nodes, in table order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All elements, in table order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of nodes in the mesh.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements in the mesh.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: usize) -> Option<&Element> {
        self.element_index.get(&id).map(|&idx| &self.elements[idx])
    }

    /// Resolve an element's node ids into node references.
    ///
    /// Returns `None` when no element has the given id. Connectivity was
    /// validated against the node table during parsing, so an element that
    /// resolves always yields all eight nodes.
    #[must_use]
    pub fn element_nodes(&self, id: usize) -> Option<Vec<&Node>> {
        self.element(id)
            .and_then(|element| element.node_ids.iter().map(|&nid| self.node(nid)).collect())
    }

    /// Ids of the nodes tracing the contact interface.
    #[must_use]
    pub fn interface_node_ids(&self) -> &[usize] {
        &self.interface_node_ids
    }

    /// Recompute every node's display position for a new scaling context.
    pub fn set_scaling(&mut self, factors: &ScalingFactors, elemental_y_scale: f64) {
        for node in &mut self.nodes {
            node.set_scaling(factors, elemental_y_scale);
        }
    }

    /// Populate the node table from its section body.
    fn build_nodes(&mut self, lines: &[&str]) -> Result<(), MeshParseError> {
        for line in lines {
            let fields = numeric_fields(line);
            if fields.len() != 4 {
                return Err(malformed(NODE_TABLE_MARKER, line));
            }
            let id = parse_usize(fields[0]).ok_or_else(|| malformed(NODE_TABLE_MARKER, line))?;
            let mut coords = [0.0_f64; 3];
            for (slot, field) in coords.iter_mut().zip(&fields[1..]) {
                *slot = field
                    .parse()
                    .map_err(|_| malformed(NODE_TABLE_MARKER, line))?;
            }
            self.node_index.insert(id, self.nodes.len());
            self.nodes
                .push(Node::from_metres(id, coords[0], coords[1], coords[2]));
        }
        Ok(())
    }

    /// Populate the element table from its section body.
    fn build_elements(&mut self, lines: &[&str]) -> Result<(), MeshParseError> {
        for line in lines {
            let fields = numeric_fields(line);
            let id = fields
                .first()
                .and_then(|f| parse_usize(f))
                .ok_or_else(|| malformed(ELEMENT_TABLE_MARKER, line))?;
            if fields.len() != 9 {
                return Err(MeshParseError::WrongNodeCount {
                    element: id,
                    count: fields.len() - 1,
                });
            }
            let mut node_ids = [0_usize; 8];
            for (slot, field) in node_ids.iter_mut().zip(&fields[1..]) {
                let node_id =
                    parse_usize(field).ok_or_else(|| malformed(ELEMENT_TABLE_MARKER, line))?;
                if !self.node_index.contains_key(&node_id) {
                    return Err(MeshParseError::UnknownNode { id: node_id });
                }
                *slot = node_id;
            }
            self.element_index.insert(id, self.elements.len());
            self.elements.push(Element {
                id,
                node_ids,
                part: None,
            });
        }
        Ok(())
    }

    /// Assign a part tag to every element named in a membership list.
    fn tag_elements(&mut self, lines: &[&str], part: PartTag) -> Result<(), MeshParseError> {
        let marker = match part {
            PartTag::Inner => INNER_ELEMENTS_MARKER,
            PartTag::Outer => OUTER_ELEMENTS_MARKER,
        };
        for id in parse_id_rows(lines, marker)? {
            let idx = *self
                .element_index
                .get(&id)
                .ok_or(MeshParseError::UnknownElement { id })?;
            self.elements[idx].part = Some(part);
        }
        Ok(())
    }

    /// Assign a part tag to every node named in a membership list.
    fn tag_nodes(&mut self, lines: &[&str], part: PartTag) -> Result<(), MeshParseError> {
        let marker = match part {
            PartTag::Inner => INNER_NODES_MARKER,
            PartTag::Outer => OUTER_NODES_MARKER,
        };
        for id in parse_id_rows(lines, marker)? {
            let idx = *self
                .node_index
                .get(&id)
                .ok_or(MeshParseError::UnknownNode { id })?;
            self.nodes[idx].part = Some(part);
        }
        Ok(())
    }
}

/// Tokenize the text into a table of section bodies.
fn split_into_sections(text: &str) -> HashMap<Section, Vec<&str>> {
    const KNOWN: [Section; 7] = [
        Section::Nodes,
        Section::Elements,
        Section::InterfaceNodes,
        Section::InnerElements,
        Section::OuterElements,
        Section::InnerNodes,
        Section::OuterNodes,
    ];

    let mut sections: HashMap<Section, Vec<&str>> = HashMap::new();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('*') {
            if trimmed.starts_with(MATERIAL_MARKER) {
                break;
            }
            // Unrecognized headers (the surface block and any extra node
            // sets) open a section whose body is skipped.
            current = KNOWN.iter().copied().find(|s| s.marker() == trimmed);
            continue;
        }
        if let Some(section) = current {
            sections.entry(section).or_default().push(trimmed);
        }
    }

    sections
}

/// Fetch a section body, failing when the marker never appeared.
fn required<'a>(
    sections: &'a HashMap<Section, Vec<&'a str>>,
    section: Section,
) -> Result<&'a [&'a str], MeshParseError> {
    sections
        .get(&section)
        .map(Vec::as_slice)
        .ok_or_else(|| MeshParseError::MissingSection {
            marker: section.marker(),
        })
}

/// Parse membership rows of comma-separated integer ids.
fn parse_id_rows(lines: &[&str], marker: &'static str) -> Result<Vec<usize>, MeshParseError> {
    let mut ids = Vec::new();
    for line in lines {
        for field in numeric_fields(line) {
            ids.push(parse_usize(field).ok_or_else(|| malformed(marker, line))?);
        }
    }
    Ok(ids)
}

/// Split a row into trimmed, non-empty comma-separated fields.
fn numeric_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Parse a decimal id field.
fn parse_usize(field: &str) -> Option<usize> {
    field.parse().ok()
}

/// Shorthand for the malformed-row error.
fn malformed(section: &'static str, line: &str) -> MeshParseError {
    MeshParseError::MalformedRow {
        section,
        line: line.to_owned(),
    }
}

#[cfg(test)]
pub(crate) use tests::TWO_ELEMENT_MESH;
