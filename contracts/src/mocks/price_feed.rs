//! Settable price feed.

use odra::prelude::*;
use crate::oracle_adapter::block_time_secs;
use crate::types::RoundData;

/// Price feed whose answer is pushed by hand
#[odra::module]
pub struct MockPriceFeed {
    decimals: Var<u8>,
    round: Var<RoundData>,
}

#[odra::module]
impl MockPriceFeed {
    pub fn init(&mut self, decimals: u8, initial_answer: i64) {
        self.decimals.set(decimals);
        self.update_answer(initial_answer);
    }

    /// Publish a new answer stamped with the current block time
    pub fn update_answer(&mut self, answer: i64) {
        let now = block_time_secs(&self.env());
        let round_id = self.round.get().map(|r| r.round_id + 1).unwrap_or(1);
        self.round.set(RoundData {
            round_id,
            answer,
            started_at: now,
            updated_at: now,
            answered_in_round: round_id,
        });
    }

    /// Publish a round with explicit timestamps
    pub fn update_round_data(&mut self, round_id: u64, answer: i64, started_at: u64, updated_at: u64) {
        self.round.set(RoundData {
            round_id,
            answer,
            started_at,
            updated_at,
            answered_in_round: round_id,
        });
    }

    pub fn latest_round_data(&self) -> RoundData {
        self.round.get().unwrap_or(RoundData {
            round_id: 0,
            answer: 0,
            started_at: 0,
            updated_at: 0,
            answered_in_round: 0,
        })
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(crate::types::DEFAULT_FEED_DECIMALS)
    }
}
