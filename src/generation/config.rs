/// Configuration for founder generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// RNG seed — the same seed reproduces the same population.
    pub seed: u64,
    /// Number of founder characters to create.
    pub count: u32,
    /// Calendar year anchor for birth-year computation.
    pub starting_year: i32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 4,
            starting_year: 1000,
        }
    }
}
