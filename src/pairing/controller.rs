use std::time::Duration;
use indexmap::IndexMap;
use log::{debug, info};

use crate::config::types::Config;
use crate::device::types::{Device, DeviceId};
use crate::pairing::random::RandomSource;
use crate::pairing::scheduler::{ManualScheduler, Scheduler, TimerTicket};
use crate::pairing::state::{transition, Intent, ViewState};

// The timer armed on entering `armed_in`. It is released whenever that state is left.
#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    ticket: TimerTicket,
    armed_in: ViewState,
}

/**
 * Owns the current view state and the device collection of the pairing screen.
 *
 * All mutation goes through `dispatch` (user intents) and `timer_elapsed` (timers armed through the
 * scheduler). Failed searches and failed connections are ordinary states, not errors.
 */
pub struct PairingController<S: Scheduler, R: RandomSource> {
    state: ViewState,
    devices: IndexMap<DeviceId, Device>,
    config: Config,
    scheduler: S,
    random: R,
    pending: Option<PendingTimer>,
    next_ticket: u64,
}

impl<S: Scheduler, R: RandomSource> PairingController<S, R> {
    pub fn new(devices: Vec<Device>, config: Config, scheduler: S, random: R) -> Self {
        let devices = devices
            .into_iter()
            .map(|device| (device.id.clone(), device))
            .collect();

        PairingController {
            state: ViewState::List,
            devices,
            config,
            scheduler,
            random,
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Known devices in display (insertion) order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> + '_ {
        self.devices.values()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies to timers armed after this call; a timer that is already pending keeps its delay.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending_ticket(&self) -> Option<TimerTicket> {
        self.pending.map(|pending| pending.ticket)
    }

    /// Handles a user intent. Returns the new state, or None if the intent is not valid right now.
    pub fn dispatch(&mut self, intent: Intent) -> Option<ViewState> {
        match transition(self.state, intent) {
            Some(next) => {
                info!("{:?}: {} -> {}", intent, self.state, next);
                self.enter(next);
                Some(next)
            },
            None => {
                debug!("Ignoring {:?} in state {}", intent, self.state);
                None
            },
        }
    }

    /**
     * Delivers a fired timer. Tickets that do not belong to the timer of the current state are
     * stale and ignored. Returns the new state if a transition happened.
     */
    pub fn timer_elapsed(&mut self, ticket: TimerTicket) -> Option<ViewState> {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket && pending.armed_in == self.state => pending,
            _ => {
                debug!("Ignoring stale timer {} in state {}", ticket, self.state);
                return None;
            },
        };

        let next = match pending.armed_in {
            ViewState::Searching => {
                if self.draw_success() { ViewState::Found } else { ViewState::SearchFailed }
            },
            ViewState::Connecting => {
                if self.draw_success() { ViewState::Success } else { ViewState::ConnectionFailed }
            },
            ViewState::Success => {
                let device = Device::paired(self.new_device_id());
                info!("Adding device {}", device.id);
                self.devices.insert(device.id.clone(), device);
                ViewState::List
            },
            other => {
                debug!("No timed transition from {}", other);
                return None;
            },
        };

        info!("Timer {}: {} -> {}", ticket, self.state, next);
        self.enter(next);
        Some(next)
    }

    /// Cancels the pending timer, if any. Also done when the controller is dropped.
    pub fn shutdown(&mut self) {
        self.release_timer();
    }

    fn enter(&mut self, next: ViewState) {
        self.release_timer();
        self.state = next;

        if let Some(delay) = self.timer_delay(next) {
            let ticket = TimerTicket(self.next_ticket);
            self.next_ticket += 1;

            debug!("Arming timer {} for {} ({})", ticket, next, humantime::format_duration(delay));
            self.scheduler.schedule(ticket, delay);
            self.pending = Some(PendingTimer { ticket, armed_in: next });
        }
    }

    fn release_timer(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.ticket);
        }
    }

    fn timer_delay(&self, state: ViewState) -> Option<Duration> {
        match state {
            ViewState::Searching => Some(self.config.search_delay()),
            ViewState::Connecting => Some(self.config.connect_delay()),
            ViewState::Success => Some(self.config.success_delay()),
            _ => None,
        }
    }

    fn draw_success(&mut self) -> bool {
        let value = self.random.next_unit();
        let success = value > self.config.success_threshold;
        debug!("Drew {:.3} against threshold {}: {}", value, self.config.success_threshold, if success { "success" } else { "failure" });
        success
    }

    // Derived from the current time, bumped until it does not collide with a known device.
    fn new_device_id(&self) -> DeviceId {
        let mut millis = self.scheduler.timestamp_millis();

        loop {
            let id = DeviceId::new(millis.to_string());
            if !self.devices.contains_key(&id) {
                return id;
            }
            millis += 1;
        }
    }
}

impl<R: RandomSource> PairingController<ManualScheduler, R> {
    /// Moves virtual time forward, delivering every timer that comes due on the way.
    pub fn advance(&mut self, by: Duration) {
        let target = self.scheduler.elapsed() + by;

        while let Some(ticket) = self.scheduler.fire_next(target) {
            self.timer_elapsed(ticket);
        }

        self.scheduler.advance_to(target);
    }
}

impl<S: Scheduler, R: RandomSource> Drop for PairingController<S, R> {
    fn drop(&mut self) {
        self.release_timer();
    }
}
