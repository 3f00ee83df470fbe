//! Dataset tooling: cut a continuous history into scoring episodes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::StateVector;
use crate::models::GamePhase;

/// Consecutive records ending with a `STOPPAGE_GOAL` record.
pub type Episode = Vec<StateVector>;

/// Split `states` after every `STOPPAGE_GOAL` record. The trailing records
/// that never reached a goal are dropped.
pub fn split_episodes(states: impl IntoIterator<Item = StateVector>) -> Vec<Episode> {
    let mut episodes = Vec::new();
    let mut current = Episode::new();
    for state in states {
        let goal = state.get_str("current_phase") == Some(GamePhase::StoppageGoal.as_str());
        current.push(state);
        if goal {
            episodes.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        debug!(dropped = current.len(), "dropping unfinished episode");
    }
    episodes
}

/// Draw `count` episodes uniformly with replacement.
pub fn subsample_episodes(episodes: &[Episode], count: usize, seed: u64) -> Vec<Episode> {
    if episodes.is_empty() {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| episodes[rng.gen_range(0..episodes.len())].clone()).collect()
}

pub fn flatten_episodes(episodes: Vec<Episode>) -> Vec<StateVector> {
    episodes.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(list: &[&str]) -> Vec<StateVector> {
        list.iter()
            .enumerate()
            .map(|(tick, phase)| {
                let mut s = StateVector::new();
                s.insert("tick", tick as i64);
                s.insert("current_phase", *phase);
                s
            })
            .collect()
    }

    #[test]
    fn test_split_drops_unfinished_tail() {
        let states = phases(&["GAME_ON", "GAME_ON", "STOPPAGE_GOAL", "GAME_ON", "STOPPAGE_GOAL", "GAME_ON"]);
        let episodes = split_episodes(states);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].len(), 3);
        assert_eq!(episodes[1].len(), 2);
        assert_eq!(episodes[1][0].tick(), Some(3));
    }

    #[test]
    fn test_split_without_goal_is_empty() {
        assert!(split_episodes(phases(&["GAME_ON", "STOPPAGE_TIMEUP", "GAME_OVER"])).is_empty());
    }

    #[test]
    fn test_subsample_is_seeded() {
        let episodes = split_episodes(phases(&["STOPPAGE_GOAL", "GAME_ON", "STOPPAGE_GOAL", "STOPPAGE_GOAL"]));
        let a = subsample_episodes(&episodes, 9, 42);
        let b = subsample_episodes(&episodes, 9, 42);
        assert_eq!(a.len(), 9);
        assert_eq!(a, b);
        assert!(subsample_episodes(&[], 3, 42).is_empty());
    }

    #[test]
    fn test_flatten_preserves_order() {
        let episodes = split_episodes(phases(&["GAME_ON", "STOPPAGE_GOAL", "STOPPAGE_GOAL"]));
        let flat = flatten_episodes(episodes);
        let ticks: Vec<_> = flat.iter().filter_map(StateVector::tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
    }
}
