//! Built-in player strategies.
//!
//! Strategies are a closed set dispatched by [`PolicyKind`]. Each one reads
//! the match through `&MatchEngine` and returns a [`Decision`]; the engine
//! applies it afterwards, so thinking never mutates the match.

use serde::{Deserialize, Serialize};

use crate::engine::MatchEngine;
use crate::geometry::Vec2;
use crate::models::{Action, PlayerId};

use super::Player;

/// Closer than this to a steering target counts as arrived.
const ARRIVE_DIST: f32 = 0.25;
/// How far ahead of (or behind) the carrier supporting players skate.
const SUPPORT_LEAD: f32 = 4.0;

/// What a player wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decision {
    pub action: Action,
    /// Desired skating direction, nominally unit length
    pub input: Vec2,
}

impl Decision {
    pub fn new(action: Action, input: Vec2) -> Self {
        Self { action, input }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Externally driven through the client adapter
    Agent,
    #[default]
    Simple,
    AdaptedSimple,
    Egoistic,
    Aggressive,
    Defensive,
    Shy,
}

/// Knobs that separate the scripted strategies from each other.
#[derive(Debug, Clone, Copy)]
struct Temperament {
    /// Shoot once the simulated shot chance reaches this
    shoot_threshold: f32,
    /// Never pass through worse odds than this
    pass_min_chance: f32,
    passes: bool,
    /// Chase the ball or carrier even when a teammate is closer
    chase_always: bool,
    /// Support and cover from deeper positions
    hangs_back: bool,
    /// Opponents inside this radius make the player bail out
    avoid_radius: f32,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 7] = [
        PolicyKind::Agent,
        PolicyKind::Simple,
        PolicyKind::AdaptedSimple,
        PolicyKind::Egoistic,
        PolicyKind::Aggressive,
        PolicyKind::Defensive,
        PolicyKind::Shy,
    ];

    /// Tag used in generated player names (`h_sim_2`) and on the command line.
    pub const fn short_name(self) -> &'static str {
        match self {
            PolicyKind::Agent => "ai",
            PolicyKind::Simple => "sim",
            PolicyKind::AdaptedSimple => "adsim",
            PolicyKind::Egoistic => "ego",
            PolicyKind::Aggressive => "agg",
            PolicyKind::Defensive => "def",
            PolicyKind::Shy => "shy",
        }
    }

    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.short_name() == name)
    }

    fn temperament(self) -> Temperament {
        let simple = Temperament {
            shoot_threshold: 0.3,
            pass_min_chance: 0.6,
            passes: true,
            chase_always: false,
            hangs_back: false,
            avoid_radius: 0.0,
        };
        match self {
            PolicyKind::Agent | PolicyKind::Simple => simple,
            PolicyKind::AdaptedSimple => Temperament { shoot_threshold: 0.25, pass_min_chance: 0.75, ..simple },
            PolicyKind::Egoistic => {
                Temperament { shoot_threshold: 0.15, passes: false, chase_always: true, ..simple }
            }
            PolicyKind::Aggressive => Temperament { chase_always: true, ..simple },
            PolicyKind::Defensive => {
                Temperament { shoot_threshold: 0.5, pass_min_chance: 0.5, hangs_back: true, ..simple }
            }
            PolicyKind::Shy => {
                Temperament { shoot_threshold: 0.4, pass_min_chance: 0.0, avoid_radius: 3.0, ..simple }
            }
        }
    }

    /// Decide an action and skating input for `id`.
    ///
    /// Unknown ids yield the neutral decision.
    pub fn think(self, engine: &MatchEngine, id: PlayerId) -> Decision {
        let Some(me) = engine.player(id) else {
            return Decision::default();
        };

        if self == PolicyKind::Agent {
            return match engine.adapter().unpack_action(me.name()) {
                Some(command) => Decision::new(command.action, command.input),
                None => Decision::default(),
            };
        }

        let t = self.temperament();
        match engine.controller() {
            Some(carrier) if carrier.id() == id => carry(&t, engine, me),
            Some(carrier) if carrier.side() == me.side() => support(&t, engine, me, carrier.position()),
            Some(carrier) => defend(&t, engine, me, carrier),
            None => loose_ball(&t, engine, me),
        }
    }
}

fn heading(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.norm();
    if len < ARRIVE_DIST {
        Vec2::zeros()
    } else {
        delta / len
    }
}

/// Lateral lane for a roster slot, spread evenly across the arena width.
fn lane_x(engine: &MatchEngine, me: &Player) -> f32 {
    let arena = engine.arena();
    let n = engine.team(me.side()).len().max(1) as f32;
    arena.min_x + arena.width() * (me.index() as f32 + 1.0) / (n + 1.0)
}

fn nearest_opponent(engine: &MatchEngine, me: &Player) -> Option<(Vec2, f32)> {
    engine
        .team(me.side().opponent())
        .iter()
        .map(|p| (p.position(), (p.position() - me.position()).norm()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn carry(t: &Temperament, engine: &MatchEngine, me: &Player) -> Decision {
    let net = engine.arena().scoring_net(me.side());
    let to_net = heading(me.position(), net);
    let shot = engine.shot_chance(me.id()).unwrap_or(0.0);
    if shot >= t.shoot_threshold {
        return Decision::new(Action::Shoot, to_net);
    }

    if t.passes {
        let pressured = t.avoid_radius > 0.0
            && nearest_opponent(engine, me).is_some_and(|(_, dist)| dist < t.avoid_radius);

        let mut best: Option<(Action, f32, f32)> = None;
        for mate in engine.team(me.side()) {
            if mate.index() == me.index() {
                continue;
            }
            let Some(action) = Action::pass_to(mate.index()) else { continue };
            let through = engine.pass_chance(me.id(), mate.id()).unwrap_or(0.0);
            let score = through * engine.on_net_chance_from(me.side(), mate.position());
            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((action, through, score));
            }
        }

        if let Some((action, through, score)) = best {
            if through >= t.pass_min_chance && (pressured || score > shot) {
                return Decision::new(action, to_net);
            }
        }
    }

    if t.avoid_radius > 0.0 {
        if let Some((opp, dist)) = nearest_opponent(engine, me) {
            if dist < t.avoid_radius {
                return Decision::new(Action::None, heading(opp, me.position()));
            }
        }
    }

    Decision::new(Action::None, to_net)
}

fn support(t: &Temperament, engine: &MatchEngine, me: &Player, carrier_pos: Vec2) -> Decision {
    let arena = engine.arena();
    let forward = arena.attack_dir(me.side()).y;
    let lead = if t.hangs_back { -SUPPORT_LEAD } else { SUPPORT_LEAD };
    let z = (carrier_pos.y + forward * lead).clamp(arena.min_z, arena.max_z);
    let spot = Vec2::new(lane_x(engine, me), z);
    Decision::new(Action::None, heading(me.position(), spot))
}

fn defend(t: &Temperament, engine: &MatchEngine, me: &Player, carrier: &Player) -> Decision {
    let dist = (carrier.position() - me.position()).norm();

    if t.avoid_radius > 0.0 && dist < t.avoid_radius {
        return Decision::new(Action::None, heading(carrier.position(), me.position()));
    }

    if engine.distance_rank(me.id()) == 0 || t.chase_always {
        let action = if dist <= engine.rules().check_dist { Action::Check } else { Action::None };
        return Decision::new(action, heading(me.position(), carrier.position()));
    }

    let own_net = engine.arena().defended_net(me.side());
    let depth = if t.hangs_back { 0.66 } else { 0.5 };
    let cover = carrier.position() + (own_net - carrier.position()) * depth;
    Decision::new(Action::None, heading(me.position(), cover))
}

fn loose_ball(t: &Temperament, engine: &MatchEngine, me: &Player) -> Decision {
    let ball = engine.state().ball_position();
    if engine.distance_rank(me.id()) == 0 || t.chase_always {
        return Decision::new(Action::None, heading(me.position(), ball));
    }
    support(t, engine, me, ball)
}
