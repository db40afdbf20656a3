use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    List,
    Searching,
    SearchFailed,
    Found,
    Connecting,
    ConnectionFailed,
    Success,
}

pub const VIEW_STATES: [ViewState; 7] = [
    ViewState::List,
    ViewState::Searching,
    ViewState::SearchFailed,
    ViewState::Found,
    ViewState::Connecting,
    ViewState::ConnectionFailed,
    ViewState::Success,
];

impl Default for ViewState {
    fn default() -> Self {
        ViewState::List
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self {
            ViewState::List => "LIST",
            ViewState::Searching => "SEARCHING",
            ViewState::SearchFailed => "SEARCH_FAILED",
            ViewState::Found => "FOUND",
            ViewState::Connecting => "CONNECTING",
            ViewState::ConnectionFailed => "CONNECTION_FAILED",
            ViewState::Success => "SUCCESS",
        };

        write!(f, "{}", result)
    }
}

/// A discrete request from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    BeginSearch,
    RetrySearch,
    Back,
    ConfirmConnect,
    RejectAndRescan,
    RetryConnect,
    BackToFound,
}

pub const INTENTS: [Intent; 7] = [
    Intent::BeginSearch,
    Intent::RetrySearch,
    Intent::Back,
    Intent::ConfirmConnect,
    Intent::RejectAndRescan,
    Intent::RetryConnect,
    Intent::BackToFound,
];

/**
 * The state that `intent` leads to from `state`, or None if the intent is not valid there.
 * Timer driven transitions are not part of this table, see `PairingController::timer_elapsed`.
 */
pub fn transition(state: ViewState, intent: Intent) -> Option<ViewState> {
    use Intent::*;
    use ViewState::*;

    match (state, intent) {
        (List, BeginSearch) => Some(Searching),
        (Searching, Back) => Some(List),
        (SearchFailed, RetrySearch) => Some(Searching),
        (SearchFailed, Back) => Some(List),
        (Found, ConfirmConnect) => Some(Connecting),
        (Found, RejectAndRescan) => Some(Searching),
        (Found, Back) => Some(Searching),
        (ConnectionFailed, RetryConnect) => Some(Connecting),
        (ConnectionFailed, BackToFound) => Some(Found),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_list() {
        assert_eq!(ViewState::default(), ViewState::List);
    }

    #[test]
    fn pairing_path() {
        assert_eq!(transition(ViewState::List, Intent::BeginSearch), Some(ViewState::Searching));
        assert_eq!(transition(ViewState::Found, Intent::ConfirmConnect), Some(ViewState::Connecting));
        assert_eq!(transition(ViewState::SearchFailed, Intent::RetrySearch), Some(ViewState::Searching));
        assert_eq!(transition(ViewState::ConnectionFailed, Intent::RetryConnect), Some(ViewState::Connecting));
    }

    #[test]
    fn back_navigation() {
        assert_eq!(transition(ViewState::Searching, Intent::Back), Some(ViewState::List));
        assert_eq!(transition(ViewState::SearchFailed, Intent::Back), Some(ViewState::List));
        assert_eq!(transition(ViewState::Found, Intent::Back), Some(ViewState::Searching));
        assert_eq!(transition(ViewState::ConnectionFailed, Intent::BackToFound), Some(ViewState::Found));
    }

    #[test]
    fn timed_states_ignore_all_intents_except_back() {
        for intent in INTENTS {
            assert_eq!(transition(ViewState::Connecting, intent), None);
            assert_eq!(transition(ViewState::Success, intent), None);

            if intent != Intent::Back {
                assert_eq!(transition(ViewState::Searching, intent), None);
            }
        }
    }

    #[test]
    fn list_only_accepts_begin_search() {
        let accepted: Vec<Intent> = INTENTS
            .into_iter()
            .filter(|intent| transition(ViewState::List, *intent).is_some())
            .collect();

        assert_eq!(accepted, vec![Intent::BeginSearch]);
    }

    #[test]
    fn display_names() {
        let names: Vec<String> = VIEW_STATES.iter().map(|state| state.to_string()).collect();
        assert_eq!(
            names,
            vec!["LIST", "SEARCHING", "SEARCH_FAILED", "FOUND", "CONNECTING", "CONNECTION_FAILED", "SUCCESS"],
        );
    }
}
