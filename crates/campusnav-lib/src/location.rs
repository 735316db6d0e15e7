//! Hierarchical Building → Floor → Room location tree.
//!
//! The tree owns every node in a flat arena; children are listed by
//! [`LocationId`] and each node keeps a non-owning `parent` index. Gates are
//! stored as building-level children of the root with no floors.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Index of a node inside a [`LocationTree`].
pub type LocationId = usize;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Level of a node in the location hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Root,
    Building,
    Floor,
    Room,
}

/// Entry in the location tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNode {
    name: String,
    label: Option<String>,
    kind: LocationKind,
    parent: Option<LocationId>,
    children: Vec<LocationId>,
}

impl LocationNode {
    /// Node that does not belong to any tree.
    pub(crate) fn detached(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-friendly building name, when one was provided.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label when present, otherwise the name.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn parent(&self) -> Option<LocationId> {
        self.parent
    }

    pub fn children(&self) -> &[LocationId] {
        &self.children
    }
}

/// Serialized building with its floors and rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub floors: Vec<FloorRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<String>,
}

/// Serialized location tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    #[serde(default)]
    pub buildings: Vec<BuildingRecord>,
    #[serde(default)]
    pub gates: Vec<String>,
}

/// Arena-backed location tree with case-insensitive name lookup.
#[derive(Debug, Clone)]
pub struct LocationTree {
    nodes: Vec<LocationNode>,
    lookup: BTreeMap<String, LocationId>,
}

impl Default for LocationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationTree {
    /// Create an empty tree containing only the virtual root.
    pub fn new() -> Self {
        Self {
            nodes: vec![LocationNode::detached("root", LocationKind::Root)],
            lookup: BTreeMap::new(),
        }
    }

    /// Build a tree from its serialized form.
    pub fn from_data(data: &LocationData) -> Result<Self> {
        let mut tree = Self::new();
        for building in &data.buildings {
            let building_id = tree.add_building(&building.name, building.label.as_deref())?;
            for floor in &building.floors {
                let floor_id = tree.add_floor(building_id, &floor.name)?;
                for room in &floor.rooms {
                    tree.add_room(floor_id, room)?;
                }
            }
        }
        for gate in &data.gates {
            tree.add_gate(gate)?;
        }
        Ok(tree)
    }

    pub fn root_id(&self) -> LocationId {
        0
    }

    pub fn root(&self) -> &LocationNode {
        &self.nodes[0]
    }

    /// Number of named locations (the root is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a building under the root. A label is a second lookup key unless
    /// it only differs from `name` in case or whitespace.
    ///
    /// Both keys are checked before anything is inserted, so a failed call
    /// leaves the tree unchanged.
    pub fn add_building(&mut self, name: &str, label: Option<&str>) -> Result<LocationId> {
        let label = label.map(str::trim);
        let name_key = self.check_available(name)?;
        let label_key = match label {
            Some(label) if normalize_name(label) != name_key => Some(self.check_available(label)?),
            _ => None,
        };

        let id = self.insert(self.root_id(), name, LocationKind::Building)?;
        if let Some(key) = label_key {
            self.lookup.insert(key, id);
        }
        self.nodes[id].label = label.map(str::to_string);
        Ok(id)
    }

    /// Gates hang directly off the root and never have floors.
    pub fn add_gate(&mut self, name: &str) -> Result<LocationId> {
        self.insert(self.root_id(), name, LocationKind::Building)
    }

    pub fn add_floor(&mut self, building: LocationId, name: &str) -> Result<LocationId> {
        self.insert(building, name, LocationKind::Floor)
    }

    pub fn add_room(&mut self, floor: LocationId, name: &str) -> Result<LocationId> {
        self.insert(floor, name, LocationKind::Room)
    }

    pub fn node(&self, id: LocationId) -> Option<&LocationNode> {
        self.nodes.get(id)
    }

    /// Parent of `node`, if it has one.
    pub fn parent_of(&self, node: &LocationNode) -> Option<&LocationNode> {
        node.parent.and_then(|id| self.node(id))
    }

    /// Case-insensitive exact lookup by name or building label.
    pub fn get(&self, name: &str) -> Option<&LocationNode> {
        self.get_id(name).and_then(|id| self.node(id))
    }

    pub fn get_id(&self, name: &str) -> Option<LocationId> {
        self.lookup.get(&normalize_name(name)).copied()
    }

    /// Up to `limit` names that look similar to `name`, best match first.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_name(name);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .lookup
            .keys()
            .map(|candidate| (strsim::jaro_winkler(&needle, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Alphabetical completions for `prefix`, at most `limit` of them.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = normalize_name(prefix);
        self.lookup
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .take(limit)
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn insert(&mut self, parent: LocationId, name: &str, kind: LocationKind) -> Result<LocationId> {
        let expected_parent = match kind {
            LocationKind::Building => LocationKind::Root,
            LocationKind::Floor => LocationKind::Building,
            LocationKind::Room => LocationKind::Floor,
            LocationKind::Root => {
                return Err(Error::InvalidLocationData {
                    message: "only one root is allowed".to_string(),
                })
            }
        };
        let parent_kind = self
            .node(parent)
            .map(LocationNode::kind)
            .ok_or_else(|| Error::InvalidLocationData {
                message: format!("unknown parent for {name}"),
            })?;
        if parent_kind != expected_parent {
            return Err(Error::InvalidLocationData {
                message: format!("{name} cannot be placed under a {parent_kind:?} node"),
            });
        }

        let id = self.nodes.len();
        self.register(name, id)?;
        self.nodes.push(LocationNode {
            name: name.trim().to_string(),
            label: None,
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    fn register(&mut self, name: &str, id: LocationId) -> Result<()> {
        let key = self.check_available(name)?;
        self.lookup.insert(key, id);
        Ok(())
    }

    /// Normalized lookup key for `name`, if it is non-empty and unused.
    fn check_available(&self, name: &str) -> Result<String> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(Error::InvalidLocationData {
                message: "location names cannot be empty".to_string(),
            });
        }
        if self.lookup.contains_key(&key) {
            return Err(Error::DuplicateLocation { name: key });
        }
        Ok(key)
    }
}

/// Trim and lowercase a location name for lookup.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> LocationTree {
        let mut tree = LocationTree::new();
        let building = tree.add_building("building1", Some("Engineering")).unwrap();
        let floor = tree.add_floor(building, "floor1ground").unwrap();
        tree.add_room(floor, "1a37").unwrap();
        tree.add_room(floor, "1a36").unwrap();
        tree.add_gate("main gate").unwrap();
        tree
    }

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        let tree = sample_tree();
        assert_eq!(tree.get("  1A37 ").map(LocationNode::name), Some("1a37"));
        assert_eq!(tree.get("ENGINEERING").map(LocationNode::name), Some("building1"));
        assert!(tree.get("1a99").is_none());
    }

    #[test]
    fn rooms_cannot_hang_off_buildings() {
        let mut tree = LocationTree::new();
        let building = tree.add_building("building9", None).unwrap();
        let err = tree.add_room(building, "9x1").expect_err("room under building");
        assert!(matches!(err, Error::InvalidLocationData { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut tree = sample_tree();
        let err = tree.add_gate("MAIN GATE").expect_err("duplicate gate");
        assert!(matches!(err, Error::DuplicateLocation { .. }));
    }

    #[test]
    fn conflicting_label_leaves_tree_unchanged() {
        let mut tree = LocationTree::new();
        tree.add_building("building1", None).unwrap();
        let before = tree.len();

        let err = tree
            .add_building("building3", Some("BUILDING1"))
            .expect_err("label collides with building1");
        assert!(matches!(err, Error::DuplicateLocation { name } if name == "building1"));
        assert!(tree.get("building3").is_none());
        assert_eq!(tree.len(), before);
        assert_eq!(tree.root().children().len(), 1);

        let id = tree.add_building("building3", Some("Library")).unwrap();
        assert_eq!(tree.get_id("library"), Some(id));
    }

    #[test]
    fn label_matching_own_name_is_accepted() {
        let mut tree = LocationTree::new();
        let id = tree.add_building("building1", Some(" Building1 ")).unwrap();

        assert_eq!(tree.get_id("building1"), Some(id));
        assert_eq!(tree.node(id).and_then(LocationNode::label), Some("Building1"));
        assert_eq!(tree.complete("building", 10), vec!["building1"]);
    }

    #[test]
    fn completion_is_alphabetical_and_bounded() {
        let tree = sample_tree();
        assert_eq!(tree.complete("1a3", 10), vec!["1a36", "1a37"]);
        assert_eq!(tree.complete("1a", 1), vec!["1a36"]);
        assert!(tree.complete("zz", 10).is_empty());
    }

    #[test]
    fn suggestions_rank_close_names_first() {
        let tree = sample_tree();
        let suggestions = tree.suggest("1a73", 3);
        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().any(|s| s == "1a37"));
        assert!(tree.suggest("   ", 3).is_empty());
    }
}
