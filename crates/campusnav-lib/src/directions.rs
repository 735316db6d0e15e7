//! Turn-by-turn text directions between two resolved locations.

use serde::Serialize;

use crate::location::LocationNode;
use crate::resolver::{Granularity, LocationContext};

/// Ordered, human-readable walking instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directions {
    steps: Vec<String>,
}

impl Directions {
    /// Instructions for walking from `from` to `to`.
    ///
    /// Locations in different buildings get an exit/follow/enter sequence,
    /// followed by the floor and room to look for. Locations in the same
    /// building only describe the movement between floors and rooms.
    pub fn between(from: &LocationContext<'_>, to: &LocationContext<'_>) -> Self {
        let mut steps = Vec::new();

        match (from.building, to.building) {
            (Some(from_building), Some(to_building))
                if !std::ptr::eq(from_building, to_building) =>
            {
                if from.is_gate() {
                    steps.push(format!("Start at the {}", from_building.name()));
                } else {
                    steps.push(format!("Exit {}", building_title(from_building)));
                }
                steps.push(format!(
                    "Follow the highlighted path to {}",
                    building_title(to_building)
                ));
                if to.is_gate() {
                    steps.push(format!("You have arrived at the {}", to_building.name()));
                } else {
                    steps.push(format!("Enter {}", building_title(to_building)));
                    if let Some(floor) = to.floor {
                        steps.push(format!("Navigate to {}", floor.name()));
                    }
                    if let Some(room) = to.room {
                        steps.push(format!("Locate {}", room.name()));
                    }
                }
            }
            (Some(building), Some(_)) => same_building(&mut steps, building, from, to),
            _ => {}
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn same_building(
    steps: &mut Vec<String>,
    building: &LocationNode,
    from: &LocationContext<'_>,
    to: &LocationContext<'_>,
) {
    let target_floor = match to.granularity() {
        Granularity::Room | Granularity::Floor => to.floor,
        Granularity::Building | Granularity::Gate => None,
    };
    let Some(target_floor) = target_floor else {
        steps.push("You are already at the right building".to_string());
        return;
    };

    let current_floor = match from.granularity() {
        Granularity::Room | Granularity::Floor => from.floor,
        Granularity::Building | Granularity::Gate => None,
    };

    match current_floor {
        Some(current) if std::ptr::eq(current, target_floor) => match (from.room, to.room) {
            (Some(current_room), Some(target_room)) => {
                if std::ptr::eq(current_room, target_room) {
                    steps.push("You are already in the right room".to_string());
                } else {
                    steps.push(format!("You are on {}", current.name()));
                    steps.push(format!(
                        "Navigate from {} to {}",
                        current_room.name(),
                        target_room.name()
                    ));
                }
            }
            (None, Some(target_room)) => {
                steps.push(format!("You are on {}", current.name()));
                steps.push(format!("Locate {}", target_room.name()));
            }
            (_, None) => steps.push("You are already on the right floor".to_string()),
        },
        Some(current) => {
            steps.push(format!("You are in {}", building_title(building)));
            steps.push(format!(
                "Navigate from {} to {}",
                current.name(),
                target_floor.name()
            ));
            if let Some(room) = to.room {
                steps.push(format!("Locate {}", room.name()));
            }
        }
        None => {
            steps.push(format!("You are in {}", building_title(building)));
            steps.push(format!("Navigate to {}", target_floor.name()));
            if let Some(room) = to.room {
                steps.push(format!("Locate {}", room.name()));
            }
        }
    }
}

fn building_title(building: &LocationNode) -> String {
    match building.label() {
        Some(label) => format!("{label} ({})", building.name()),
        None => building.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationTree;
    use crate::resolver::NodeResolver;

    fn tree() -> LocationTree {
        let mut tree = LocationTree::new();
        let b1 = tree.add_building("building1", Some("Engineering")).unwrap();
        let ground = tree.add_floor(b1, "floor1ground").unwrap();
        tree.add_room(ground, "1a37").unwrap();
        tree.add_room(ground, "1a36").unwrap();
        let upper = tree.add_floor(b1, "floor1a").unwrap();
        tree.add_room(upper, "1b10").unwrap();
        let b2 = tree.add_building("building2", None).unwrap();
        let floor = tree.add_floor(b2, "floor2b").unwrap();
        tree.add_room(floor, "2b5").unwrap();
        tree.add_gate("main gate").unwrap();
        tree
    }

    fn directions(tree: &LocationTree, from: &str, to: &str) -> Vec<String> {
        let resolver = NodeResolver::new(tree);
        let from = resolver.locate(tree.get(from).unwrap()).unwrap();
        let to = resolver.locate(tree.get(to).unwrap()).unwrap();
        Directions::between(&from, &to).steps().to_vec()
    }

    #[test]
    fn different_buildings_exit_and_enter() {
        let tree = tree();
        assert_eq!(
            directions(&tree, "1a37", "2b5"),
            vec![
                "Exit Engineering (building1)",
                "Follow the highlighted path to building2",
                "Enter building2",
                "Navigate to floor2b",
                "Locate 2b5",
            ]
        );
    }

    #[test]
    fn gate_origin_and_destination() {
        let tree = tree();
        let from_gate = directions(&tree, "main gate", "building2");
        assert_eq!(from_gate[0], "Start at the main gate");
        assert_eq!(from_gate.last().unwrap(), "Enter building2");

        let to_gate = directions(&tree, "2b5", "main gate");
        assert_eq!(to_gate.last().unwrap(), "You have arrived at the main gate");
    }

    #[test]
    fn same_floor_rooms() {
        let tree = tree();
        assert_eq!(
            directions(&tree, "1a37", "1a36"),
            vec!["You are on floor1ground", "Navigate from 1a37 to 1a36"]
        );
    }

    #[test]
    fn other_floor_in_same_building() {
        let tree = tree();
        assert_eq!(
            directions(&tree, "1a37", "1b10"),
            vec![
                "You are in Engineering (building1)",
                "Navigate from floor1ground to floor1a",
                "Locate 1b10",
            ]
        );
        assert_eq!(
            directions(&tree, "building1", "floor1a"),
            vec!["You are in Engineering (building1)", "Navigate to floor1a"]
        );
    }

    #[test]
    fn already_there() {
        let tree = tree();
        assert_eq!(
            directions(&tree, "1a37", "building1"),
            vec!["You are already at the right building"]
        );
        assert_eq!(
            directions(&tree, "1a37", "floor1ground"),
            vec!["You are already on the right floor"]
        );
    }
}
