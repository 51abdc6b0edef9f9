//! Change detection against the persisted seen set.
//!
//! Compares the current run's fixtures with the ids recorded by previous
//! runs to decide which listings are new and whether a notification should
//! go out at all.

use crate::models::{Fixture, WatchState};

/// Fixtures whose ids are not yet in the seen set, in extraction order.
pub fn detect_new(current: &[Fixture], state: &WatchState) -> Vec<Fixture> {
    current
        .iter()
        .filter(|fixture| !state.contains(&fixture.id))
        .cloned()
        .collect()
}

/// Notification policy.
///
/// The very first run establishes a baseline: with no prior state, every
/// listing on the page would look new, so nothing is reported unless the
/// override flag is set.
pub fn should_notify(new: &[Fixture], state: &WatchState, notify_on_first_run: bool) -> bool {
    !new.is_empty() && (notify_on_first_run || !state.is_first_run())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_fixture(id: &str) -> Fixture {
        Fixture {
            id: id.to_string(),
            competition: "Liga Portugal".to_string(),
            teams: vec!["SPORTING".to_string()],
            date: "12 Jan 20:00".to_string(),
            raw: id.to_string(),
        }
    }

    fn state_with(ids: &[&str]) -> WatchState {
        let mut state = WatchState::default();
        state.absorb(ids.iter().map(|id| id.to_string()));
        state
    }

    #[test]
    fn test_everything_is_new_against_empty_state() {
        let current = vec![make_fixture("x"), make_fixture("y")];
        let new = detect_new(&current, &WatchState::default());
        assert_eq!(new.len(), 2);
    }

    #[test]
    fn test_known_ids_are_filtered_in_order() {
        let current = vec![make_fixture("x"), make_fixture("y"), make_fixture("z")];
        let new = detect_new(&current, &state_with(&["y"]));

        let ids: Vec<&str> = new.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "z"]);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let current = vec![make_fixture("x"), make_fixture("y")];
        let state = state_with(&["x"]);

        let first = detect_new(&current, &state);
        let second = detect_new(&current, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_run_is_suppressed() {
        let new = vec![make_fixture("x")];
        assert!(!should_notify(&new, &WatchState::default(), false));
    }

    #[test]
    fn test_first_run_override() {
        let new = vec![make_fixture("x")];
        assert!(should_notify(&new, &WatchState::default(), true));
    }

    #[test]
    fn test_nothing_new_means_no_notification() {
        assert!(!should_notify(&[], &state_with(&["x"]), false));
        assert!(!should_notify(&[], &WatchState::default(), true));
    }

    #[test]
    fn test_new_fixtures_notify_after_baseline() {
        let new = vec![make_fixture("y")];
        assert!(should_notify(&new, &state_with(&["x"]), false));
    }

    #[test]
    fn test_two_run_scenario() {
        // Run 1: empty prior state, page lists only "x".
        let mut state = WatchState::default();
        let run1 = vec![make_fixture("x")];

        let new1 = detect_new(&run1, &state);
        assert_eq!(new1.len(), 1);
        assert!(!should_notify(&new1, &state, false));
        state.absorb(run1.iter().map(|f| f.id.clone()));
        assert!(state.contains("x"));

        // Run 2: page now lists "x" and "y"; only "y" is reported.
        let run2 = vec![make_fixture("x"), make_fixture("y")];
        let new2 = detect_new(&run2, &state);
        let ids: Vec<&str> = new2.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["y"]);
        assert!(should_notify(&new2, &state, false));

        state.absorb(run2.iter().map(|f| f.id.clone()));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_state_grows_monotonically() {
        let mut state = state_with(&["x"]);
        let before: Vec<String> = state.seen_ids.iter().cloned().collect();

        // The union takes all current ids, not just the new ones.
        state.absorb(["y".to_string(), "x".to_string()]);
        for id in before {
            assert!(state.contains(&id));
        }
        assert_eq!(state.len(), 2);
    }
}
