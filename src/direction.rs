use std::fmt;

use serde::Serialize;

use crate::schema::JsonDirectionOrGroup;

/// A single preparation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Direction(String);

impl Direction {
    pub fn new(text: impl Into<String>) -> Self {
        Direction(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A group of directions under a single heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionGroup {
    pub heading: String,
    pub directions: Vec<Direction>,
}

/// An entry in a recipe's list of directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectionEntry {
    Single(Direction),
    Group(DirectionGroup),
}

impl From<JsonDirectionOrGroup> for DirectionEntry {
    fn from(entry: JsonDirectionOrGroup) -> Self {
        match entry {
            JsonDirectionOrGroup::Single(text) => DirectionEntry::Single(Direction(text)),
            JsonDirectionOrGroup::Group(group) => DirectionEntry::Group(DirectionGroup {
                heading: group.heading,
                directions: group.directions.into_iter().map(Direction).collect(),
            }),
        }
    }
}

impl From<Direction> for DirectionEntry {
    fn from(direction: Direction) -> Self {
        DirectionEntry::Single(direction)
    }
}

impl From<DirectionGroup> for DirectionEntry {
    fn from(group: DirectionGroup) -> Self {
        DirectionEntry::Group(group)
    }
}
