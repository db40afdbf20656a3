use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use log::warn;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::pairing::scheduler::{Scheduler, TimerTicket};

#[derive(Debug)]
pub struct ArmedTimer {
    pub ticket: TimerTicket,
    pub delay: Duration,
    pub cancel: CancellationToken,
}

/**
 * Scheduler backed by tokio timers. Armed timers are queued until the application turns them into
 * commands (see `take_armed` and `wait_for_timer`). Every timer token is a child of the application
 * token, so cancelling that token tears down all outstanding timers.
 */
pub struct CommandScheduler {
    app_cancel: CancellationToken,
    tokens: HashMap<TimerTicket, CancellationToken>,
    armed: Vec<ArmedTimer>,
}

impl CommandScheduler {
    pub fn new(app_cancel: CancellationToken) -> Self {
        CommandScheduler {
            app_cancel,
            tokens: HashMap::new(),
            armed: Vec::new(),
        }
    }

    pub fn take_armed(&mut self) -> Vec<ArmedTimer> {
        std::mem::take(&mut self.armed)
    }

    pub fn outstanding(&self) -> usize {
        self.tokens.len()
    }
}

impl Scheduler for CommandScheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        let cancel = self.app_cancel.child_token();
        self.tokens.insert(ticket, cancel.clone());
        self.armed.push(ArmedTimer { ticket, delay, cancel });
    }

    fn cancel(&mut self, ticket: TimerTicket) {
        if let Some(token) = self.tokens.remove(&ticket) {
            token.cancel();
        }
        self.armed.retain(|timer| timer.ticket != ticket);
    }

    fn timestamp_millis(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_millis() as u64,
            Err(err) => {
                warn!("System clock is before the unix epoch: {:?}", err);
                0
            },
        }
    }
}

/// Resolves to the ticket once the delay has passed, or None if the timer was cancelled first.
pub async fn wait_for_timer(timer: ArmedTimer) -> Option<TimerTicket> {
    tokio::select! {
        _ = timer.cancel.cancelled() => None,
        _ = sleep(timer.delay) => Some(timer.ticket),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::device::types::seed_devices;
    use crate::pairing::controller::PairingController;
    use crate::pairing::random::SequenceRandom;
    use crate::pairing::state::{Intent, ViewState};

    fn controller(draws: Vec<f64>) -> PairingController<CommandScheduler, SequenceRandom> {
        PairingController::new(
            seed_devices(),
            Config::default(),
            CommandScheduler::new(CancellationToken::new()),
            SequenceRandom::new(draws),
        )
    }

    #[test]
    fn cancel_before_take_drops_armed_timer() {
        let mut scheduler = CommandScheduler::new(CancellationToken::new());
        scheduler.schedule(TimerTicket(1), Duration::from_millis(3000));
        scheduler.cancel(TimerTicket(1));

        assert!(scheduler.take_armed().is_empty());
        assert_eq!(scheduler.outstanding(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_delay() {
        let mut scheduler = CommandScheduler::new(CancellationToken::new());
        scheduler.schedule(TimerTicket(4), Duration::from_millis(2500));

        let mut armed = scheduler.take_armed();
        assert_eq!(armed.len(), 1);
        assert_eq!(wait_for_timer(armed.remove(0)).await, Some(TimerTicket(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_resolves_to_none() {
        let mut scheduler = CommandScheduler::new(CancellationToken::new());
        scheduler.schedule(TimerTicket(2), Duration::from_millis(3000));
        let timer = scheduler.take_armed().remove(0);

        let handle = tokio::spawn(wait_for_timer(timer));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        scheduler.cancel(TimerTicket(2));

        assert_eq!(handle.await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn app_cancel_tears_down_all_timers() {
        let app_cancel = CancellationToken::new();
        let mut scheduler = CommandScheduler::new(app_cancel.clone());
        scheduler.schedule(TimerTicket(1), Duration::from_millis(2000));
        let timer = scheduler.take_armed().remove(0);

        app_cancel.cancel();
        assert_eq!(wait_for_timer(timer).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn back_during_search_cancels_controller_timer() {
        let mut controller = controller(vec![0.9]);
        controller.dispatch(Intent::BeginSearch);

        let mut armed = controller.scheduler_mut().take_armed();
        assert_eq!(armed.len(), 1);
        let handle = tokio::spawn(wait_for_timer(armed.remove(0)));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(controller.dispatch(Intent::Back), Some(ViewState::List));
        assert_eq!(controller.scheduler().outstanding(), 0);

        assert_eq!(handle.await.unwrap(), None);
        assert_eq!(controller.state(), ViewState::List);
        assert_eq!(controller.device_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn controller_timers_drive_full_pairing() {
        let mut controller = controller(vec![0.9]);
        controller.dispatch(Intent::BeginSearch);

        let timer = controller.scheduler_mut().take_armed().remove(0);
        assert_eq!(timer.delay, Duration::from_millis(3000));
        let ticket = wait_for_timer(timer).await.unwrap();
        assert_eq!(controller.timer_elapsed(ticket), Some(ViewState::Found));

        controller.dispatch(Intent::ConfirmConnect);
        let timer = controller.scheduler_mut().take_armed().remove(0);
        assert_eq!(timer.delay, Duration::from_millis(2500));
        let ticket = wait_for_timer(timer).await.unwrap();
        assert_eq!(controller.timer_elapsed(ticket), Some(ViewState::Success));

        let timer = controller.scheduler_mut().take_armed().remove(0);
        assert_eq!(timer.delay, Duration::from_millis(2000));
        let ticket = wait_for_timer(timer).await.unwrap();
        assert_eq!(controller.timer_elapsed(ticket), Some(ViewState::List));

        assert_eq!(controller.device_count(), 4);
        assert_eq!(controller.scheduler().outstanding(), 0);
        assert!(controller.scheduler_mut().take_armed().is_empty());
    }
}
