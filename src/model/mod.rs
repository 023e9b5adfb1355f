pub mod character;
pub mod graph;

pub use character::{
    Character, CharacterOverrides, Gender, MAX_PARENTS, STAT_MAX, STAT_MIN, Stats,
    ValidationError,
};
pub use graph::{DynastyGraph, GraphError, create_child, marry};
