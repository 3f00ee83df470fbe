//! Per-tick orchestration.

use chrono::Local;
use tracing::{info, trace};

use super::{MatchEngine, Scheduler, TickHooks};
use crate::error::Result;
use crate::history::{dated_history_path, HistoryEntry};
use crate::models::GamePhase;

impl TickHooks for MatchEngine {
    fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    fn on_tick_start(&mut self) -> Result<()> {
        let players = self.player_count();
        self.frame.reset(players);
        Ok(())
    }

    fn on_tick_body(&mut self) -> Result<()> {
        self.custom_tick()
    }

    fn on_tick_end(&mut self) -> Result<()> {
        self.record_history();
        Ok(())
    }
}

impl MatchEngine {
    /// Advance the match by one tick. A simulation error aborts the tick
    /// without advancing the clock; the match should not be ticked further.
    /// Persistence runs after the tick is committed, so a failed write is
    /// retried by the next update.
    pub fn update(&mut self) -> Result<()> {
        Scheduler::run_tick(self)?;
        if self.state.phase() == GamePhase::GameOver && self.config.save_states && self.persisted_to.is_none() {
            self.save_state_history()?;
        }
        Ok(())
    }

    /// Run up to `ticks` updates, stopping early once the match is over.
    /// Returns the number of ticks run.
    pub fn run(&mut self, ticks: u64) -> Result<u64> {
        let mut run = 0;
        while run < ticks && !self.is_simulation_complete() {
            self.update()?;
            run += 1;
        }
        Ok(run)
    }

    fn custom_tick(&mut self) -> Result<()> {
        self.phase_update()?;
        if self.state.phase() == GamePhase::GameOver {
            return Ok(());
        }
        self.draw_arena();
        self.ball_update()?;
        self.ai_update();
        self.locomotion_update();
        self.resolve_player_collisions();
        self.action_update()?;
        self.rules_update()?;
        self.check_goal();
        self.board_ball_collision();

        trace!(
            tick = self.tick(),
            previous = %self.state.previous_phase(),
            current = %self.state.phase(),
            "tick done"
        );
        Ok(())
    }

    /// Rule enforcement after actions: body checks on the ball carrier.
    fn rules_update(&mut self) -> Result<()> {
        self.check_update()
    }

    fn record_history(&mut self) {
        let entry = HistoryEntry {
            tick: self.tick(),
            state: self.state_vector(),
            player_names: self.players().map(|p| p.name().to_string()).collect(),
            policies: self.frame.decisions.iter().map(|d| d.policy).collect(),
            actions: self.frame.decisions.iter().map(|d| d.action_index).collect(),
            value_estimates: self.frame.decisions.iter().map(|d| d.value_estimate).collect(),
            rewards: self.frame.rewards.clone(),
        };
        self.scheduler.history_mut().record(entry);
    }

    /// Write the whole history to `<root>/datasets/<today>/STATEHISTORY.json`.
    pub fn save_state_history(&mut self) -> Result<()> {
        let path = dated_history_path(&self.config.dataset_root, Local::now().date_naive());
        self.history().save_json(&path)?;
        info!(tick = self.tick(), path = %path.display(), "history persisted");
        self.persisted_to = Some(path);
        Ok(())
    }
}
