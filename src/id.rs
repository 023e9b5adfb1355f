/// Monotonic ID generator for characters.
/// Guarantees globally unique IDs within one dynasty graph.
#[derive(Debug)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn starting_from(start: u64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Ensure no future ID collides with `id`. Used when characters with
    /// externally chosen IDs enter the graph (upsert, loading a save).
    pub fn advance_past(&mut self, id: u64) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}
