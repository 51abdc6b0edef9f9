//! Fixture data structure.

use serde::{Deserialize, Serialize};

/// A fixture listing detected on the ticket page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    /// Stable identifier used to deduplicate listings across runs
    pub id: String,

    /// Competition label (empty string if none was detected)
    pub competition: String,

    /// Team names in page order, at most two
    pub teams: Vec<String>,

    /// Raw date/time text as it appears on the page
    pub date: String,

    /// Full window of source lines the fixture was derived from
    pub raw: String,
}

impl Fixture {
    /// Team names joined for display.
    ///
    /// Falls back to a placeholder when the heuristic found no team-like
    /// lines in the window.
    pub fn title(&self) -> String {
        if self.teams.is_empty() {
            "(equipas não detectadas)".to_string()
        } else {
            self.teams.join(" vs ")
        }
    }

    /// One-line summary used in notification bodies.
    pub fn summary(&self) -> String {
        format!("{} | {} | {}", self.title(), self.competition, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fixture() -> Fixture {
        Fixture {
            id: "Liga Portugal|SPORTING vs BENFICA|12 Jan 20:00".to_string(),
            competition: "Liga Portugal".to_string(),
            teams: vec!["SPORTING".to_string(), "BENFICA".to_string()],
            date: "12 Jan 20:00".to_string(),
            raw: "Liga Portugal | SPORTING | BENFICA | 12 Jan 20:00".to_string(),
        }
    }

    #[test]
    fn test_summary() {
        let fixture = sample_fixture();
        assert_eq!(
            fixture.summary(),
            "SPORTING vs BENFICA | Liga Portugal | 12 Jan 20:00"
        );
    }

    #[test]
    fn test_title_placeholder_without_teams() {
        let mut fixture = sample_fixture();
        fixture.teams.clear();
        assert_eq!(fixture.title(), "(equipas não detectadas)");
        assert!(fixture.summary().starts_with("(equipas não detectadas) |"));
    }
}
