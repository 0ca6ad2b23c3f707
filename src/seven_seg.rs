//! Encoding for the two-digit seven-segment high-score displays.
//!
//! Segment bit order is `gfedcba`: bit 0 is the top bar, bit 6 the middle one.

use crate::{Player, RoundState};

pub const DIGIT_CODES: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

pub const MAX_SHOWN: u32 = 99;

/// Tens digit in bits 8..15, units in bits 0..7. Scores above 99 show 99.
pub fn encode_score(score: u32) -> u32 {
    let s = score.min(MAX_SHOWN) as usize;
    ((DIGIT_CODES[s / 10] as u32) << 8) | DIGIT_CODES[s % 10] as u32
}

/// Register values for both displays: player 1 on HEX1..HEX0, player 2 on HEX5..HEX4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScoreDisplay {
    pub hex3_0: u32,
    pub hex5_4: u32,
}

impl HighScoreDisplay {
    pub fn from_round(round: &RoundState) -> Self {
        Self {
            hex3_0: encode_score(round.high_score(Player::One)),
            hex5_4: encode_score(round.high_score(Player::Two)),
        }
    }

    /// Split a register value into its (tens, units) segment codes.
    pub fn digits(reg: u32) -> [u8; 2] {
        [((reg >> 8) & 0x7F) as u8, (reg & 0x7F) as u8]
    }
}
