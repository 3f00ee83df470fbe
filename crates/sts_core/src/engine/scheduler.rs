//! Tick scheduling.
//!
//! The scheduler owns the clock and the append-only logs. Hosts plug their
//! per-tick work in through [`TickHooks`]; [`Scheduler::run_tick`] calls the
//! hooks in order and only advances the clock once all of them succeed.

use crate::error::Result;
use crate::history::HistoryRecorder;
use crate::models::{EventLog, GameEvent};

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tick: u64,
    events: EventLog,
    history: HistoryRecorder,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryRecorder {
        &mut self.history
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Run one tick on `host`. A failing hook leaves the clock where it was.
    pub fn run_tick<H: TickHooks + ?Sized>(host: &mut H) -> Result<()> {
        host.on_tick_start()?;
        host.on_tick_body()?;
        host.on_tick_end()?;
        host.scheduler_mut().tick += 1;
        Ok(())
    }
}

/// Per-tick callbacks of a simulation driven by a [`Scheduler`].
pub trait TickHooks {
    fn scheduler(&self) -> &Scheduler;

    fn scheduler_mut(&mut self) -> &mut Scheduler;

    fn on_tick_start(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_tick_body(&mut self) -> Result<()>;

    fn on_tick_end(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::models::GameEventKind;

    #[derive(Default)]
    struct Counter {
        scheduler: Scheduler,
        calls: Vec<&'static str>,
        fail_at: Option<u64>,
    }

    impl TickHooks for Counter {
        fn scheduler(&self) -> &Scheduler {
            &self.scheduler
        }

        fn scheduler_mut(&mut self) -> &mut Scheduler {
            &mut self.scheduler
        }

        fn on_tick_start(&mut self) -> Result<()> {
            self.calls.push("start");
            Ok(())
        }

        fn on_tick_body(&mut self) -> Result<()> {
            self.calls.push("body");
            if self.fail_at == Some(self.scheduler.tick()) {
                return Err(SimError::UnknownPhase("BROKEN".into()));
            }
            let tick = self.scheduler.tick();
            self.scheduler.push_event(GameEvent::new(tick, GameEventKind::Pass, "a", "b"));
            Ok(())
        }

        fn on_tick_end(&mut self) -> Result<()> {
            self.calls.push("end");
            Ok(())
        }
    }

    #[test]
    fn test_hooks_run_in_order_and_advance_clock() {
        let mut host = Counter::default();
        Scheduler::run_tick(&mut host).unwrap();
        Scheduler::run_tick(&mut host).unwrap();
        assert_eq!(host.calls, vec!["start", "body", "end", "start", "body", "end"]);
        assert_eq!(host.scheduler().tick(), 2);
        assert_eq!(host.scheduler().events().len(), 2);
        assert_eq!(host.scheduler().events().last().unwrap().tick, 1);
    }

    #[test]
    fn test_failed_tick_does_not_advance() {
        let mut host = Counter { fail_at: Some(0), ..Counter::default() };
        assert!(Scheduler::run_tick(&mut host).is_err());
        assert_eq!(host.scheduler().tick(), 0);
        assert_eq!(host.calls, vec!["start", "body"]);
    }
}
