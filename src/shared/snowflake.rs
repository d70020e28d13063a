//! Snowflake ID Generator
//!
//! Time-ordered 63-bit IDs for users and blogs:
//! 41 bits of milliseconds since the configured epoch, 10 bits of machine id,
//! 12 bits of per-millisecond sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Default epoch (2024-01-01T00:00:00.000Z)
pub const DEFAULT_EPOCH: u64 = 1_704_067_200_000;

const MACHINE_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: u64,
    sequence: u64,
}

/// Snowflake ID generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch: u64,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, epoch: u64) -> Self {
        Self {
            machine_id: machine_id & ((1 << MACHINE_BITS) - 1),
            epoch,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();
        let mut timestamp = current_millis().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond, borrow the next one
                timestamp += 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        let id = (timestamp.saturating_sub(self.epoch) << (MACHINE_BITS + SEQUENCE_BITS))
            | (self.machine_id << SEQUENCE_BITS)
            | state.sequence;

        (id & i64::MAX as u64) as i64
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(1, DEFAULT_EPOCH)
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
