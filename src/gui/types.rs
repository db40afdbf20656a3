use iced::Event;

use crate::config::types::Config;
use crate::pairing::scheduler::TimerTicket;
use crate::pairing::state::Intent;

#[derive(Debug, Clone)]
pub enum Message {
    EventOccurred(Event),
    ConfigLoadComplete((Config, Option<String>)), // error message if the config could not be used
    NoticeConfirmed,
    Intent(Intent),
    TimerSettled(Option<TimerTicket>), // None if the timer was cancelled
}
