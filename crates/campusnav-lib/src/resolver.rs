//! Bridge between the location tree and the campus graph.
//!
//! Rooms resolve to their enclosing building by walking two parent links.
//! Gates have no floors, so a gate is its own building and every gate reports
//! the same synthetic ground floor.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::location::{LocationKind, LocationNode, LocationTree};

/// The three campus entrances. They share names with their graph nodes.
pub const GATE_NAMES: [&str; 3] = ["main gate", "walkin gate", "back gate"];

/// Name of the floor reported for every gate.
pub const GATE_FLOOR_NAME: &str = "floorGateGround";

/// Whether `node` is one of the campus gates (case-insensitive).
pub fn is_gate(node: &LocationNode) -> bool {
    let name = node.name().to_lowercase();
    GATE_NAMES.contains(&name.as_str())
}

/// Building and floor nodes for a from/to pair.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEndpoints<'a> {
    pub from_building: Option<&'a LocationNode>,
    pub from_floor: Option<&'a LocationNode>,
    pub to_building: Option<&'a LocationNode>,
    pub to_floor: Option<&'a LocationNode>,
}

/// Building, floor and room that a single location input refers to.
///
/// A building input has no floor or room; a floor input has no room.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationContext<'a> {
    pub building: Option<&'a LocationNode>,
    pub floor: Option<&'a LocationNode>,
    pub room: Option<&'a LocationNode>,
}

impl LocationContext<'_> {
    /// Most specific level the input named.
    pub fn granularity(&self) -> Granularity {
        if self.room.is_some() {
            Granularity::Room
        } else if self.floor.is_some() && !self.is_gate() {
            Granularity::Floor
        } else if self.is_gate() {
            Granularity::Gate
        } else {
            Granularity::Building
        }
    }

    pub fn is_gate(&self) -> bool {
        self.building.map(is_gate).unwrap_or(false)
    }
}

/// Level of detail of a location input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Room,
    Floor,
    Building,
    Gate,
}

/// Resolves location tree nodes to buildings, floors and graph keys.
#[derive(Debug, Clone)]
pub struct NodeResolver<'t> {
    tree: &'t LocationTree,
    gate_floor: LocationNode,
}

impl<'t> NodeResolver<'t> {
    pub fn new(tree: &'t LocationTree) -> Self {
        Self {
            tree,
            gate_floor: LocationNode::detached(GATE_FLOOR_NAME, LocationKind::Floor),
        }
    }

    pub fn tree(&self) -> &'t LocationTree {
        self.tree
    }

    /// The shared floor node every gate resolves to.
    pub fn gate_floor(&self) -> &LocationNode {
        &self.gate_floor
    }

    /// Building that encloses a room.
    ///
    /// A gate is returned unchanged. Otherwise two parent links are followed
    /// (room → floor → building) and the result is only accepted if it still
    /// hangs off the root. Absent input is an [`Error::InvalidNode`]; a short
    /// or malformed chain yields `Ok(None)`.
    pub fn find_building_node<'a>(
        &'a self,
        node: Option<&'a LocationNode>,
    ) -> Result<Option<&'a LocationNode>> {
        let node = node.ok_or(Error::InvalidNode)?;
        if is_gate(node) {
            return Ok(Some(node));
        }

        let building = self
            .tree
            .parent_of(node)
            .and_then(|floor| self.tree.parent_of(floor))
            .filter(|building| building.parent().is_some());
        Ok(building)
    }

    /// Floor that contains a room.
    ///
    /// Gates report [`Self::gate_floor`]; any other node reports its direct
    /// parent, or `None` when it has none.
    pub fn find_floor_node<'a>(
        &'a self,
        node: Option<&'a LocationNode>,
    ) -> Result<Option<&'a LocationNode>> {
        let node = node.ok_or(Error::InvalidNode)?;
        if is_gate(node) {
            return Ok(Some(&self.gate_floor));
        }
        Ok(self.tree.parent_of(node))
    }

    /// Resolve buildings and floors for both ends of a route.
    pub fn resolve_building_and_floor<'a>(
        &'a self,
        from: Option<&'a LocationNode>,
        to: Option<&'a LocationNode>,
    ) -> Result<ResolvedEndpoints<'a>> {
        Ok(ResolvedEndpoints {
            from_building: self.find_building_node(from)?,
            from_floor: self.find_floor_node(from)?,
            to_building: self.find_building_node(to)?,
            to_floor: self.find_floor_node(to)?,
        })
    }

    /// Resolve a location of any level into its building/floor/room parts.
    ///
    /// Rooms and gates go through [`Self::find_building_node`] and
    /// [`Self::find_floor_node`]; floors and buildings resolve by kind.
    pub fn locate<'a>(&'a self, node: &'a LocationNode) -> Result<LocationContext<'a>> {
        if is_gate(node) {
            return Ok(LocationContext {
                building: Some(node),
                floor: Some(&self.gate_floor),
                room: None,
            });
        }

        let context = match node.kind() {
            LocationKind::Room => LocationContext {
                building: self.find_building_node(Some(node))?,
                floor: self.find_floor_node(Some(node))?,
                room: Some(node),
            },
            LocationKind::Floor => LocationContext {
                building: self.tree.parent_of(node),
                floor: Some(node),
                room: None,
            },
            LocationKind::Building => LocationContext {
                building: Some(node),
                floor: None,
                room: None,
            },
            LocationKind::Root => LocationContext::default(),
        };
        Ok(context)
    }
}

/// Graph key for a building or gate node.
///
/// Names are lowercased; gates pass through and buildings must look like
/// `building<N>`. Anything else is not routable and yields `None`.
pub fn to_graph_key(node: Option<&LocationNode>) -> Option<String> {
    let name = node?.name().trim().to_lowercase();

    if GATE_NAMES.contains(&name.as_str()) {
        return Some(name);
    }

    let digits = name.strip_prefix("building")?;
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(name)
    } else {
        None
    }
}
