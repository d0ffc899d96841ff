//! Search, pagination, supersede and timeout through the real client, the
//! fetch worker and the state machine.

mod common;

use common::{Behavior, Harness};
use gourmet::app::pagination::NO_RESULTS_STATUS;
use gourmet::app::{handle_event, Action, AppState, Event};
use gourmet::storage::JsonStorage;
use gourmet::{FetchError, Theme};
use std::time::Duration;

/// State with a short viewport (3 table rows) so loads never prefetch.
fn short_state() -> AppState {
    let mut state = AppState::new("", Theme::default());
    handle_event(&mut state, Event::Resize { rows: 10, cols: 100 });
    state
}

fn search(state: &mut AppState, keyword: &str) -> Vec<Action> {
    handle_event(state, Event::SearchMode);
    while !state.keyword_input.is_empty() {
        handle_event(state, Event::Backspace);
    }
    for c in keyword.chars() {
        handle_event(state, Event::Char(c));
    }
    handle_event(state, Event::SubmitSearch).1
}

fn fetch_starts(actions: &[Action]) -> Vec<usize> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::StartFetch(request) => Some(request.query.start),
            _ => None,
        })
        .collect()
}

#[test]
fn first_page_of_a_search() {
    let mut harness = Harness::new(Behavior::Pages { total: 100 }, Duration::from_secs(5));
    let mut state = short_state();

    let actions = search(&mut state, "ramen");
    assert_eq!(fetch_starts(&actions), [1]);
    assert!(state.query.in_flight());

    harness.execute(actions);
    let follow_up = harness.complete_one(&mut state);

    assert!(follow_up.is_empty());
    assert_eq!(state.results.shops.len(), 20);
    assert!(!state.query.end_of_results());
    assert!(!state.query.in_flight());
    assert_eq!(harness.server.starts(), [1]);
    assert_eq!(harness.server.requests()[0]["keyword"], "ramen");
}

#[test]
fn empty_append_marks_end_of_results() {
    let mut harness = Harness::new(Behavior::Pages { total: 20 }, Duration::from_secs(5));
    let mut state = short_state();

    let actions = search(&mut state, "ramen");
    harness.execute(actions);
    harness.complete_one(&mut state);

    // A taller viewport brings the last row within the prefetch threshold.
    let (_, actions) = handle_event(&mut state, Event::Resize { rows: 24, cols: 100 });
    assert_eq!(fetch_starts(&actions), [21]);

    harness.execute(actions);
    let follow_up = harness.complete_one(&mut state);

    assert!(follow_up.is_empty());
    assert_eq!(state.results.shops.len(), 20);
    assert!(state.query.end_of_results());
    assert_eq!(harness.server.starts(), [1, 21]);

    let (_, actions) = handle_event(&mut state, Event::KeyDown);
    assert!(fetch_starts(&actions).is_empty());
}

#[test]
fn scrolling_appends_the_next_page() {
    let mut harness = Harness::new(Behavior::Pages { total: 100 }, Duration::from_secs(5));
    let mut state = short_state();

    let actions = search(&mut state, "ramen");
    harness.execute(actions);
    harness.complete_one(&mut state);

    let mut prefetch = vec![];
    while prefetch.is_empty() {
        prefetch = handle_event(&mut state, Event::KeyDown).1;
    }
    assert_eq!(fetch_starts(&prefetch), [21]);

    harness.execute(prefetch);
    harness.complete_one(&mut state);

    assert_eq!(state.results.shops.len(), 40);
    assert_eq!(state.results.shops[20].id, "J0020");
    assert!(!state.query.end_of_results());
}

#[test]
fn failed_fetch_clears_results() {
    let mut harness = Harness::new(Behavior::Pages { total: 100 }, Duration::from_secs(5));
    let mut state = short_state();

    let actions = search(&mut state, "ramen");
    harness.execute(actions);
    harness.complete_one(&mut state);
    assert_eq!(state.results.shops.len(), 20);

    harness.server.set_behavior(Behavior::Status(502));
    let (_, actions) = handle_event(&mut state, Event::Refresh);
    harness.execute(actions);
    harness.complete_one(&mut state);

    assert!(state.results.shops.is_empty());
    assert!(state.query.end_of_results());
    assert!(!state.query.in_flight());
    assert_eq!(state.status(), Some(NO_RESULTS_STATUS));

    let dir = tempfile::tempdir().unwrap();
    let store = JsonStorage::new(dir.path().join("favorites.json")).unwrap();
    assert!(gourmet::ui::render(&state, &store).contains(NO_RESULTS_STATUS));
}

#[test]
fn timeout_releases_the_guard() {
    let mut harness = Harness::new(
        Behavior::Slow {
            total: 100,
            delay: Duration::from_secs(3),
        },
        Duration::from_millis(100),
    );
    let mut state = short_state();

    let actions = search(&mut state, "ramen");
    harness.execute(actions);

    let response = harness.responses.recv_timeout(Duration::from_secs(2)).unwrap();
    match &response {
        gourmet::worker::WorkerResponse::PageLoaded { result, .. } => {
            assert_eq!(result, &Err(FetchError::Timeout));
        }
    }
    handle_event(&mut state, response.into());
    assert!(!state.query.in_flight());
    assert_eq!(state.status(), Some(NO_RESULTS_STATUS));

    harness.server.set_behavior(Behavior::Pages { total: 100 });
    let (_, actions) = handle_event(&mut state, Event::Refresh);
    assert_eq!(fetch_starts(&actions), [1]);
    harness.execute(actions);
    harness.complete_one(&mut state);
    assert_eq!(state.results.shops.len(), 20);
}

#[test]
fn new_keyword_supersedes_outstanding_search() {
    let mut harness = Harness::new(
        Behavior::Slow {
            total: 100,
            delay: Duration::from_millis(300),
        },
        Duration::from_secs(5),
    );
    let mut state = short_state();

    let first = search(&mut state, "ramen");
    let first_generation = state.query.generation();
    harness.execute(first);

    let second = search(&mut state, "sushi");
    assert!(second.contains(&Action::CancelFetch {
        generation: first_generation
    }));
    harness.execute(second);

    harness.complete_one(&mut state);
    assert_eq!(state.query.keyword(), "sushi");
    assert_eq!(state.results.shops.len(), 20);
    assert!(!state.query.in_flight());

    // The aborted task never answers.
    assert!(harness.responses.recv_timeout(Duration::from_millis(600)).is_err());
    assert_eq!(harness.worker.pending(), 0);
}
