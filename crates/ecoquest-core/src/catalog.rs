//! The fixed mission catalog.
//!
//! Read-only registry of every mission the program can hand out. Daily
//! sets are drawn from here; persistence only ever stores mission ids.

use std::sync::LazyLock;

use crate::error::{EcoQuestError, EcoQuestResult};
use crate::models::mission::MissionDefinition;

/// (id, title, description, points) source tuples for the catalog.
const MISSION_TABLE: &[(u32, &str, &str, u32)] = &[
    (1, "Reusable Bottle", "Photo using reusable bottle", 20),
    (2, "Public Transport", "Photo using public transport", 20),
    (3, "Vegetarian Meal", "Photo of vegetarian meal", 20),
    (4, "Recycling", "Photo of proper recycling", 20),
    (5, "Bike Ride", "Photo while cycling for commute", 25),
    (6, "Eco Bag", "Photo using eco-friendly shopping bag", 15),
    (7, "Pick Up Trash", "Photo picking up trash in public area", 30),
    (8, "Composting", "Photo of home composting bin", 25),
    (9, "Plant a Tree", "Photo while planting a tree", 40),
    (10, "Thrift Shopping", "Photo from a second-hand/thrift store", 20),
    (11, "No Plastic", "Photo of a plastic-free meal or drink", 20),
    (12, "Community Garden", "Photo participating in a community garden", 30),
    (
        13,
        "Refill Station",
        "Photo refilling bottle at public refill station",
        20,
    ),
    (14, "DIY Item", "Photo of a handmade upcycled item", 25),
    (15, "Outdoor Yoga", "Photo doing yoga outside", 15),
    (
        16,
        "Use Natural Light",
        "Photo of working/studying without artificial light",
        15,
    ),
    (17, "Read Outdoors", "Photo reading a book outdoors", 15),
    (
        18,
        "Walk Instead of Ride",
        "Photo walking to destination instead of using vehicle",
        20,
    ),
    (19, "Local Market Visit", "Photo at local farmer's market", 20),
    (
        20,
        "Zero Waste Lunch",
        "Photo of lunch with no packaging waste",
        25,
    ),
    (
        21,
        "Eco Cleaning",
        "Photo using natural/eco cleaning product",
        15,
    ),
    (
        22,
        "Natural Scenery",
        "Photo of favorite green spot near your location",
        10,
    ),
    (
        23,
        "Rainy Day Plant Care",
        "Photo of watering plants using rainwater",
        25,
    ),
    (
        24,
        "Home Gardening",
        "Photo of your indoor or balcony garden",
        20,
    ),
    (
        25,
        "Solar Panel Sighting",
        "Photo of any solar panel in use",
        30,
    ),
];

static CATALOG: LazyLock<Vec<MissionDefinition>> = LazyLock::new(|| {
    MISSION_TABLE
        .iter()
        .map(|&(id, title, description, points)| MissionDefinition {
            id,
            title: title.to_string(),
            description: description.to_string(),
            points,
        })
        .collect()
});

/// All missions, in catalog order.
pub fn all() -> &'static [MissionDefinition] {
    &CATALOG
}

/// Look up a single mission by id.
pub fn get(id: u32) -> EcoQuestResult<&'static MissionDefinition> {
    CATALOG
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| EcoQuestError::NotFound {
            entity: "mission".into(),
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_twenty_five_missions() {
        assert_eq!(all().len(), 25);
    }

    #[test]
    fn mission_ids_are_unique() {
        let ids: HashSet<u32> = all().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn point_values_are_positive_and_bounded() {
        for mission in all() {
            assert!(
                (10..=40).contains(&mission.points),
                "mission {} has out-of-range points {}",
                mission.id,
                mission.points
            );
        }
    }

    #[test]
    fn lookup_by_id() {
        let mission = get(5).unwrap();
        assert_eq!(mission.title, "Bike Ride");
        assert_eq!(mission.points, 25);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = get(999).unwrap_err();
        assert!(matches!(
            err,
            crate::error::EcoQuestError::NotFound { .. }
        ));
    }
}
