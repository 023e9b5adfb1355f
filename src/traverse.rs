//! Ancestor/descendant queries over the dynasty graph.
//!
//! Both walks are read-only depth-first traversals sharing one engine: at
//! each node the stored relation IDs are followed in order, each newly seen
//! character is recorded, then its own relations are walked before the next
//! sibling. A visited set makes diamonds and malformed cycles safe.

use std::collections::HashSet;

use crate::model::{Character, DynastyGraph};

impl DynastyGraph {
    /// All characters reachable by following `parent_ids` from `id`, in
    /// first-discovered order, excluding `id` itself. `depth` bounds the
    /// number of relation-hops from the start (inclusive); `None` is
    /// unbounded. An unknown start ID yields an empty result.
    pub fn ancestors(&self, id: u64, depth: Option<u32>) -> Vec<&Character> {
        self.collect_related(id, depth, |c| c.parent_ids.as_slice())
    }

    /// All characters reachable by following `child_ids` from `id`; same
    /// contract as [`ancestors`](Self::ancestors).
    pub fn descendants(&self, id: u64, depth: Option<u32>) -> Vec<&Character> {
        self.collect_related(id, depth, |c| c.child_ids.as_slice())
    }

    fn collect_related(
        &self,
        start: u64,
        depth: Option<u32>,
        relation: fn(&Character) -> &[u64],
    ) -> Vec<&Character> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        // The start never appears in its own result, even through a cycle.
        visited.insert(start);
        if let Some(node) = self.characters.get(&start) {
            self.walk(node, 1, depth, relation, &mut visited, &mut result);
        }
        result
    }

    fn walk<'a>(
        &'a self,
        node: &'a Character,
        level: u32,
        depth: Option<u32>,
        relation: fn(&Character) -> &[u64],
        visited: &mut HashSet<u64>,
        result: &mut Vec<&'a Character>,
    ) {
        if depth.is_some_and(|d| level > d) {
            return;
        }
        for &rid in relation(node) {
            if !visited.insert(rid) {
                continue;
            }
            match self.characters.get(&rid) {
                Some(related) => {
                    result.push(related);
                    self.walk(related, level + 1, depth, relation, visited, result);
                }
                None => {
                    tracing::warn!(
                        "character {rid} referenced by {} is missing from the graph",
                        node.id
                    );
                }
            }
        }
    }
}
