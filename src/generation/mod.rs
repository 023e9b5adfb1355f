//! Procedural founder generation.
//!
//! Produces the initial population: `count` founders paired sequentially
//! into marriages, each couple with 1–3 children, all reachable from the
//! returned root IDs. Fully deterministic from the config seed.

pub mod config;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{Character, CharacterOverrides, DynastyGraph, Gender, Stats};

pub use config::GenerateConfig;

/// Output of [`generate_founders`]: the populated graph plus the founder
/// IDs in creation order. `root_ids.len()` always equals the configured
/// count, whatever children were added afterwards.
#[derive(Debug)]
pub struct GeneratedDynasty {
    pub graph: DynastyGraph,
    pub root_ids: Vec<u64>,
}

/// Generate founders, pair them into spousal units, and give each unit
/// 1–3 children.
///
/// Founder `i` (0-indexed) gets a synthetic name, a house letter cycling
/// A–Z, a birth year of `starting_year - rand(20..=40)`, and alternating
/// male/female gender. Pairs are (0,1), (2,3), …; an odd last founder
/// stays unmarried. Children take the first parent's family name and a
/// birth year 18–30 years after that parent's.
pub fn generate_founders(config: &GenerateConfig) -> GeneratedDynasty {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut graph = DynastyGraph::new();
    let mut root_ids = Vec::with_capacity(config.count as usize);

    for i in 0..config.count {
        let id = graph.id_gen.next_id();
        let founder = Character {
            id,
            given_name: format!("Founder{}", i + 1),
            family_name: Some(format!("House {}", house_letter(i))),
            birth_year: Some(config.starting_year - rng.random_range(20..=40)),
            death_year: None,
            gender: if i % 2 == 0 {
                Gender::Male
            } else {
                Gender::Female
            },
            parent_ids: Vec::new(),
            spouse_ids: Vec::new(),
            child_ids: Vec::new(),
            stats: Stats::random(&mut rng),
            traits: Vec::new(),
            titles: Vec::new(),
            alive: true,
        };
        graph
            .upsert(founder)
            .expect("generated founder is valid by construction");
        root_ids.push(id);
    }

    // chunks_exact leaves an odd last founder unpaired
    for (pair_no, pair) in root_ids.chunks_exact(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        graph
            .marry(a, b)
            .expect("paired founders were just inserted");

        let (family_name, base_year) = {
            let first = graph.get(a).expect("founder a was just inserted");
            (
                first.family_name.clone(),
                first.birth_year.unwrap_or(config.starting_year),
            )
        };

        let children_count = rng.random_range(1..=3);
        for c in 0..children_count {
            let overrides = CharacterOverrides {
                given_name: Some(format!("Child{}-{}", pair_no * 2, c)),
                family_name: family_name.clone(),
                birth_year: Some(base_year + rng.random_range(18..=30)),
                ..Default::default()
            };
            graph
                .add_child(&mut rng, &[a, b], overrides)
                .expect("generated child is valid and parents exist");
        }
    }

    GeneratedDynasty { graph, root_ids }
}

fn house_letter(index: u32) -> char {
    (b'A' + (index % 26) as u8) as char
}
