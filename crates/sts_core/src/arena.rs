//! Arena geometry: bounds, nets and normalized coordinates.
//!
//! The arena is centered on the origin. `x` runs across the arena, `z`
//! (stored as `Vec2::y`) runs from the home end (`-z`) to the away end
//! (`+z`). Home scores in the net at `+z`, away in the net at `-z`.

use crate::config::Rules;
use crate::geometry::{vec2, Vec2};
use crate::models::TeamSide;

#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    pub size: [u32; 2],
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    net_inset: f32,
}

impl Arena {
    pub fn new(size: [u32; 2], net_inset: f32) -> Self {
        let half_w = size[0] as f32 / 2.0;
        let half_h = size[1] as f32 / 2.0;
        Self { size, min_x: -half_w, max_x: half_w, min_z: -half_h, max_z: half_h, net_inset }
    }

    pub fn from_rules(rules: &Rules) -> Self {
        Self::new(rules.arena_size, rules.net_inset)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn length(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Center of the net `side` scores into.
    pub fn scoring_net(&self, side: TeamSide) -> Vec2 {
        match side {
            TeamSide::Home => vec2(0.0, self.max_z - self.net_inset),
            TeamSide::Away => vec2(0.0, self.min_z + self.net_inset),
        }
    }

    /// Center of the net `side` defends.
    pub fn defended_net(&self, side: TeamSide) -> Vec2 {
        self.scoring_net(side.opponent())
    }

    /// Axis signs that rotate world coordinates into the attacking frame of
    /// `side` (forward is always `+z`).
    pub fn attack_dir(&self, side: TeamSide) -> Vec2 {
        match side {
            TeamSide::Home => vec2(1.0, 1.0),
            TeamSide::Away => vec2(-1.0, -1.0),
        }
    }

    /// Map an arena position to `[0, 1]²`.
    pub fn normalized(&self, p: Vec2) -> Vec2 {
        vec2((p.x - self.min_x) / self.width(), (p.y - self.min_z) / self.length())
    }

    pub fn from_normalized(&self, n: Vec2) -> Vec2 {
        vec2(self.min_x + n.x * self.width(), self.min_z + n.y * self.length())
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_z && p.y <= self.max_z
    }

    /// Clamp a disc of `radius` at `p` to stay inside the boards.
    pub fn clamp_inside(&self, p: Vec2, radius: f32) -> Vec2 {
        vec2(
            p.x.clamp(self.min_x + radius, self.max_x - radius),
            p.y.clamp(self.min_z + radius, self.max_z - radius),
        )
    }
}
