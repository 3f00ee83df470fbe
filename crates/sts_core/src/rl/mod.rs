//! Reinforcement-learning encoding of player decisions.
//!
//! Layout of a [`PolicyVector`]:
//!
//! | slots | meaning |
//! |-------|---------|
//! | 0..9  | skating direction, relative to the attack direction |
//! | 9     | PASS |
//! | 10    | SHOOT |
//! | 11    | SKATE (any other action) |

mod encoder;

pub use encoder::{encode_decision, input_to_policy_index, policy_index_to_input, EncodedDecision};

use serde::{Deserialize, Serialize};

pub mod outputs {
    pub const DIRECTIONS: usize = 9;
    pub const PASS: usize = 9;
    pub const SHOOT: usize = 10;
    pub const SKATE: usize = 11;
    pub const NUM: usize = 12;
}

/// Index of the "no input" direction.
pub const IDLE_DIRECTION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyVector(pub [f32; outputs::NUM]);

impl Default for PolicyVector {
    fn default() -> Self {
        Self([0.0; outputs::NUM])
    }
}

impl PolicyVector {
    /// One-hot over direction and action class.
    pub fn one_hot(direction: usize, class: usize) -> Self {
        let mut slots = [0.0; outputs::NUM];
        if direction < outputs::DIRECTIONS {
            slots[direction] = 1.0;
        }
        if (outputs::PASS..outputs::NUM).contains(&class) {
            slots[class] = 1.0;
        }
        Self(slots)
    }

    pub fn direction(&self) -> Option<usize> {
        self.0[..outputs::DIRECTIONS].iter().position(|&v| v == 1.0)
    }

    pub fn class(&self) -> Option<usize> {
        self.0[outputs::PASS..].iter().position(|&v| v == 1.0).map(|i| i + outputs::PASS)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}
