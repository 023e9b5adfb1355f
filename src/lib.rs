pub mod generation;
pub mod id;
pub mod model;
pub mod store;
pub mod traverse;

pub use generation::{GenerateConfig, GeneratedDynasty, generate_founders};
pub use id::IdGenerator;
pub use model::{
    Character, CharacterOverrides, DynastyGraph, Gender, GraphError, Stats, ValidationError,
    create_child, marry,
};
pub use store::{SaveFile, SaveState, StoreError};
