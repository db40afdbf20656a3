use std::time::Duration;

use notepins_pairing::config::types::Config;
use notepins_pairing::device::types::seed_devices;
use notepins_pairing::pairing::controller::PairingController;
use notepins_pairing::pairing::random::SequenceRandom;
use notepins_pairing::pairing::scheduler::ManualScheduler;
use notepins_pairing::pairing::state::{Intent, ViewState};

fn controller(draws: Vec<f64>) -> PairingController<ManualScheduler, SequenceRandom> {
    PairingController::new(
        seed_devices(),
        Config::default(),
        ManualScheduler::new(1_700_000_000_000),
        SequenceRandom::new(draws),
    )
}

#[test]
fn add_device_happy_path() {
    let mut controller = controller(vec![0.9]);
    assert_eq!(controller.state(), ViewState::List);
    assert_eq!(controller.device_count(), 3);

    controller.dispatch(Intent::BeginSearch);
    assert_eq!(controller.state(), ViewState::Searching);

    controller.advance(Duration::from_millis(3000));
    assert_eq!(controller.state(), ViewState::Found);

    controller.dispatch(Intent::ConfirmConnect);
    assert_eq!(controller.state(), ViewState::Connecting);

    controller.advance(Duration::from_millis(2500));
    assert_eq!(controller.state(), ViewState::Success);

    controller.advance(Duration::from_millis(2000));
    assert_eq!(controller.state(), ViewState::List);

    let devices: Vec<_> = controller.devices().collect();
    assert_eq!(devices.len(), 4);
    assert_eq!(devices[3].battery_level, 100);
    assert!(devices[3].connected);
    assert_eq!(devices[0].id.as_str(), "1");
}

#[test]
fn recovers_from_both_failures() {
    // search fails, search succeeds, connect fails, connect succeeds
    let mut controller = controller(vec![0.1, 0.8, 0.3, 0.31]);

    controller.dispatch(Intent::BeginSearch);
    controller.advance(Duration::from_millis(3000));
    assert_eq!(controller.state(), ViewState::SearchFailed);

    controller.dispatch(Intent::RetrySearch);
    controller.advance(Duration::from_millis(3000));
    assert_eq!(controller.state(), ViewState::Found);

    controller.dispatch(Intent::ConfirmConnect);
    controller.advance(Duration::from_millis(2500));
    assert_eq!(controller.state(), ViewState::ConnectionFailed);

    controller.dispatch(Intent::RetryConnect);
    controller.advance(Duration::from_millis(2500));
    assert_eq!(controller.state(), ViewState::Success);

    controller.advance(Duration::from_millis(2000));
    assert_eq!(controller.state(), ViewState::List);
    assert_eq!(controller.device_count(), 4);
}

#[test]
fn repeated_cycles_keep_ids_unique() {
    let mut controller = controller(vec![0.9]);

    for _ in 0..10 {
        controller.dispatch(Intent::BeginSearch);
        controller.advance(Duration::from_millis(3000));
        controller.dispatch(Intent::ConfirmConnect);
        controller.advance(Duration::from_millis(4500));
        assert_eq!(controller.state(), ViewState::List);
    }

    let mut ids: Vec<String> = controller.devices().map(|device| device.id.to_string()).collect();
    assert_eq!(ids.len(), 13);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 13);
}
