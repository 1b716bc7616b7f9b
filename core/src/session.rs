use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::*;

/// State shared by every phase for the lifetime of the process.
///
/// Built once at startup and handed to phases through their [`Context`].
#[derive(Debug)]
pub struct Session {
    difficulties: DifficultyTable,
    rng: SmallRng,
    quit_requested: bool,
}

impl Session {
    pub fn new(difficulties: DifficultyTable, seed: u64) -> Self {
        log::debug!("session seed: {}", seed);
        Self {
            difficulties,
            rng: SmallRng::seed_from_u64(seed),
            quit_requested: false,
        }
    }

    pub fn difficulties(&self) -> &DifficultyTable {
        &self.difficulties
    }

    /// Seed for the next board, drawn from the session seed so whole runs replay.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn request_quit(&mut self) {
        log::debug!("quit requested");
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
