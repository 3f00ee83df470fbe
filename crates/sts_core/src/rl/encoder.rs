use tracing::warn;

use super::{outputs, PolicyVector, IDLE_DIRECTION};
use crate::geometry::{sign, vec2, Vec2};
use crate::models::Action;

/// RL view of one player's decision on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EncodedDecision {
    pub action_index: usize,
    pub policy: PolicyVector,
    /// Placeholder until a value network is attached
    pub value_estimate: f32,
}

/// Quantize `input` into one of nine directions, expressed relative to the
/// player's attack direction so both teams share one policy space.
///
/// Non-finite input maps to index 0.
pub fn input_to_policy_index(attack_dir: Vec2, input: Vec2) -> usize {
    let relative = input.component_mul(&attack_dir);
    if !relative.iter().all(|c| c.is_finite()) {
        warn!(
            input_x = input.x,
            input_z = input.y,
            attack_x = attack_dir.x,
            attack_z = attack_dir.y,
            "non-finite input, encoding as direction 0"
        );
        return 0;
    }
    let sx = sign(relative.x) as i32;
    let sz = sign(relative.y) as i32;
    ((sx + 1) * 3 + (sz + 1)) as usize
}

/// Inverse of [`input_to_policy_index`] on quantized inputs.
pub fn policy_index_to_input(attack_dir: Vec2, index: usize) -> Vec2 {
    let x = (index / 3) as f32 - 1.0;
    let z = (index % 3) as f32 - 1.0;
    vec2(x, z).component_mul(&attack_dir)
}

pub fn encode_decision(action: Action, input: Vec2, attack_dir: Vec2) -> EncodedDecision {
    let class = if action.is_pass() {
        outputs::PASS
    } else if action == Action::Shoot {
        outputs::SHOOT
    } else {
        outputs::SKATE
    };
    let direction = input_to_policy_index(attack_dir, input);
    EncodedDecision { action_index: action.index(), policy: PolicyVector::one_hot(direction, class), value_estimate: 0.0 }
}

impl EncodedDecision {
    /// Encoding of a player that made no decision this tick.
    pub fn idle() -> Self {
        Self {
            action_index: Action::None.index(),
            policy: PolicyVector::one_hot(IDLE_DIRECTION, outputs::SKATE),
            value_estimate: 0.0,
        }
    }
}
