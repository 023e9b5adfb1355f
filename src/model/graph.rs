use std::collections::BTreeMap;

use rand::RngCore;
use thiserror::Error;

use crate::id::IdGenerator;

use super::character::{Character, CharacterOverrides, Gender, Stats, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown character id {0}")]
    UnknownCharacter(u64),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The dynasty graph: every character keyed by ID, plus the generator for
/// fresh IDs. BTreeMap for deterministic iteration.
///
/// All mutation goes through methods that keep the relation invariants:
/// `spouse_ids` symmetric, `child_ids`/`parent_ids` consistent in direction,
/// and no unvalidated character ever inserted.
#[derive(Debug, Default)]
pub struct DynastyGraph {
    pub characters: BTreeMap<u64, Character>,
    pub id_gen: IdGenerator,
}

impl DynastyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a graph from an existing mapping (e.g. a loaded save),
    /// resuming the ID generator past the highest ID present.
    pub fn from_characters(characters: BTreeMap<u64, Character>) -> Self {
        let mut id_gen = IdGenerator::new();
        if let Some(&max_id) = characters.keys().next_back() {
            id_gen.advance_past(max_id);
        }
        Self { characters, id_gen }
    }

    pub fn get(&self, id: u64) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Insert or replace a character, validating it first. The ID generator
    /// is advanced past the character's ID so later fresh IDs stay unique.
    pub fn upsert(&mut self, character: Character) -> Result<(), ValidationError> {
        character.validate()?;
        self.id_gen.advance_past(character.id);
        self.characters.insert(character.id, character);
        Ok(())
    }

    /// Remove a character entry. Relation lists on other characters are left
    /// untouched; callers deleting nodes own any unlinking they need.
    pub fn remove(&mut self, id: u64) -> Option<Character> {
        self.characters.remove(&id)
    }

    /// Create a child of the given parents and link it in one step: the
    /// child is inserted and its ID appended to every listed parent's
    /// `child_ids`. Fails without touching the graph if any parent is
    /// unknown or the resulting child is invalid.
    ///
    /// When no family name override is given the child takes the first
    /// parent's family name.
    pub fn add_child(
        &mut self,
        rng: &mut dyn RngCore,
        parent_ids: &[u64],
        mut overrides: CharacterOverrides,
    ) -> Result<u64, GraphError> {
        for &pid in parent_ids {
            if !self.characters.contains_key(&pid) {
                return Err(GraphError::UnknownCharacter(pid));
            }
        }

        if overrides.family_name.is_none() {
            overrides.family_name = parent_ids
                .first()
                .and_then(|pid| self.characters.get(pid))
                .and_then(|parent| parent.family_name.clone());
        }

        let child = create_child(&mut self.id_gen, rng, parent_ids, overrides)?;
        let child_id = child.id;
        self.characters.insert(child_id, child);

        for &pid in parent_ids {
            if let Some(parent) = self.characters.get_mut(&pid) {
                if !parent.child_ids.contains(&child_id) {
                    parent.child_ids.push(child_id);
                }
            }
        }

        Ok(child_id)
    }

    /// Record a marriage between two existing characters. Symmetric and
    /// idempotent: each ends up listing the other exactly once.
    pub fn marry(&mut self, a: u64, b: u64) -> Result<(), GraphError> {
        if !self.characters.contains_key(&a) {
            return Err(GraphError::UnknownCharacter(a));
        }
        if !self.characters.contains_key(&b) {
            return Err(GraphError::UnknownCharacter(b));
        }
        if let Some(ca) = self.characters.get_mut(&a) {
            if !ca.spouse_ids.contains(&b) {
                ca.spouse_ids.push(b);
            }
        }
        if let Some(cb) = self.characters.get_mut(&b) {
            if !cb.spouse_ids.contains(&a) {
                cb.spouse_ids.push(a);
            }
        }
        Ok(())
    }
}

/// Build a new child character without linking it anywhere: fresh ID,
/// `parent_ids` copied, every other field defaulted (random gender and
/// stats when unspecified) or taken from `overrides`.
///
/// Parents' `child_ids` are NOT updated here — [`DynastyGraph::add_child`]
/// is the path that keeps both sides of the relation consistent.
pub fn create_child(
    id_gen: &mut IdGenerator,
    rng: &mut dyn RngCore,
    parent_ids: &[u64],
    overrides: CharacterOverrides,
) -> Result<Character, ValidationError> {
    let child = Character {
        id: id_gen.next_id(),
        given_name: overrides
            .given_name
            .unwrap_or_else(|| "Newborn".to_string()),
        family_name: overrides.family_name,
        birth_year: overrides.birth_year,
        death_year: None,
        gender: overrides.gender.unwrap_or_else(|| Gender::random(rng)),
        parent_ids: parent_ids.to_vec(),
        spouse_ids: Vec::new(),
        child_ids: Vec::new(),
        stats: overrides.stats.unwrap_or_else(|| Stats::random(rng)),
        traits: overrides.traits.unwrap_or_default(),
        titles: overrides.titles.unwrap_or_default(),
        alive: true,
    };
    child.validate()?;
    Ok(child)
}

/// In-place marriage between two characters already borrowed by the caller.
/// Symmetric and idempotent.
pub fn marry(a: &mut Character, b: &mut Character) {
    if !a.spouse_ids.contains(&b.id) {
        a.spouse_ids.push(b.id);
    }
    if !b.spouse_ids.contains(&a.id) {
        b.spouse_ids.push(a.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn test_character(id: u64, name: &str) -> Character {
        Character {
            id,
            given_name: name.to_string(),
            family_name: Some("House A".to_string()),
            birth_year: Some(980),
            death_year: None,
            gender: Gender::Male,
            parent_ids: vec![],
            spouse_ids: vec![],
            child_ids: vec![],
            stats: Stats {
                diplomacy: 5,
                martial: 5,
                stewardship: 5,
                intrigue: 5,
                learning: 5,
            },
            traits: vec![],
            titles: vec![],
            alive: true,
        }
    }

    fn graph_with_couple() -> DynastyGraph {
        let mut graph = DynastyGraph::new();
        let a = test_character(graph.id_gen.next_id(), "Aldric");
        let mut b = test_character(graph.id_gen.next_id(), "Bera");
        b.gender = Gender::Female;
        graph.upsert(a).unwrap();
        graph.upsert(b).unwrap();
        graph
    }

    #[test]
    fn add_child_links_both_parents() {
        let mut graph = graph_with_couple();
        let mut rng = SmallRng::seed_from_u64(7);
        let child_id = graph
            .add_child(&mut rng, &[1, 2], CharacterOverrides::default())
            .unwrap();

        let child = graph.get(child_id).unwrap();
        assert_eq!(child.parent_ids, vec![1, 2]);
        assert!(child.alive);
        assert_eq!(child.death_year, None);
        assert!(graph.get(1).unwrap().child_ids.contains(&child_id));
        assert!(graph.get(2).unwrap().child_ids.contains(&child_id));
    }

    #[test]
    fn add_child_inherits_family_name() {
        let mut graph = graph_with_couple();
        let mut rng = SmallRng::seed_from_u64(7);
        let child_id = graph
            .add_child(&mut rng, &[1, 2], CharacterOverrides::default())
            .unwrap();
        assert_eq!(
            graph.get(child_id).unwrap().family_name.as_deref(),
            Some("House A")
        );
    }

    #[test]
    fn add_child_unknown_parent_leaves_graph_unchanged() {
        let mut graph = graph_with_couple();
        let mut rng = SmallRng::seed_from_u64(7);
        let err = graph
            .add_child(&mut rng, &[1, 99], CharacterOverrides::default())
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownCharacter(99));
        assert_eq!(graph.len(), 2);
        assert!(graph.get(1).unwrap().child_ids.is_empty());
    }

    #[test]
    fn marry_is_symmetric_and_idempotent() {
        let mut graph = graph_with_couple();
        graph.marry(1, 2).unwrap();
        graph.marry(1, 2).unwrap();
        graph.marry(2, 1).unwrap();
        assert_eq!(graph.get(1).unwrap().spouse_ids, vec![2]);
        assert_eq!(graph.get(2).unwrap().spouse_ids, vec![1]);
    }

    #[test]
    fn marry_unknown_id_fails() {
        let mut graph = graph_with_couple();
        assert_eq!(
            graph.marry(1, 42).unwrap_err(),
            GraphError::UnknownCharacter(42)
        );
        assert!(graph.get(1).unwrap().spouse_ids.is_empty());
    }

    #[test]
    fn upsert_rejects_invalid_character() {
        let mut graph = DynastyGraph::new();
        let mut c = test_character(1, "Aldric");
        c.stats.learning = 0;
        assert!(graph.upsert(c).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn upsert_advances_id_generator() {
        let mut graph = DynastyGraph::new();
        graph.upsert(test_character(50, "Aldric")).unwrap();
        assert_eq!(graph.id_gen.next_id(), 51);
    }

    #[test]
    fn from_characters_resumes_ids() {
        let mut characters = BTreeMap::new();
        characters.insert(3, test_character(3, "Aldric"));
        characters.insert(9, test_character(9, "Bera"));
        let mut graph = DynastyGraph::from_characters(characters);
        assert_eq!(graph.id_gen.next_id(), 10);
    }

    #[test]
    fn create_child_applies_overrides() {
        let mut id_gen = IdGenerator::new();
        let mut rng = SmallRng::seed_from_u64(7);
        let overrides = CharacterOverrides {
            given_name: Some("Aria".to_string()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let child = create_child(&mut id_gen, &mut rng, &[10, 11], overrides).unwrap();
        assert_eq!(child.given_name, "Aria");
        assert_eq!(child.gender, Gender::Female);
        assert_eq!(child.parent_ids, vec![10, 11]);
        assert!(child.stats.validate().is_ok());
    }

    #[test]
    fn create_child_rejects_too_many_parents() {
        let mut id_gen = IdGenerator::new();
        let mut rng = SmallRng::seed_from_u64(7);
        let err =
            create_child(&mut id_gen, &mut rng, &[1, 2, 3], CharacterOverrides::default())
                .unwrap_err();
        assert_eq!(err, ValidationError::TooManyParents(3));
    }

    #[test]
    fn standalone_marry_idempotent() {
        let mut a = test_character(1, "Aldric");
        let mut b = test_character(2, "Bera");
        marry(&mut a, &mut b);
        marry(&mut a, &mut b);
        assert_eq!(a.spouse_ids, vec![2]);
        assert_eq!(b.spouse_ids, vec![1]);
    }

    #[test]
    fn remove_leaves_other_relations_untouched() {
        let mut graph = graph_with_couple();
        graph.marry(1, 2).unwrap();
        let removed = graph.remove(2);
        assert!(removed.is_some());
        // Dangling spouse reference is the caller's to clean up
        assert_eq!(graph.get(1).unwrap().spouse_ids, vec![2]);
    }
}
