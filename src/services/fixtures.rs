// src/services/fixtures.rs

//! Fixture extraction service.
//!
//! Scans the rendered text of the ticket page for listing blocks that end
//! in the configured marker phrase and assembles structured fixtures from
//! the lines around each marker.

use std::collections::HashSet;

use regex::Regex;

use crate::models::{Fixture, HeuristicsConfig};

/// Pattern for date-like lines, e.g. "12 Jan 20:00".
const DATE_PATTERN: &str = r"(?i)\b\d{1,2}\s+\w+\s+\d{2}:\d{2}\b";

/// Service for extracting fixtures from rendered page lines.
pub struct FixtureExtractor {
    config: HeuristicsConfig,
    marker_lower: String,
    date_re: Regex,
}

impl FixtureExtractor {
    /// Create a new extractor with the given heuristics.
    pub fn new(config: HeuristicsConfig) -> Self {
        let marker_lower = config.marker_phrase.to_lowercase();
        let date_re = Regex::new(DATE_PATTERN).expect("date pattern is valid");

        Self {
            config,
            marker_lower,
            date_re,
        }
    }

    /// Extract deduplicated fixtures from an ordered sequence of page lines.
    ///
    /// Lines are expected to be trimmed and non-empty, the way
    /// [`crate::utils::http::fetch_page_lines`] produces them. Extraction
    /// never fails; the worst case is an empty result.
    pub fn extract(&self, lines: &[String]) -> Vec<Fixture> {
        let mut fixtures = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if line.to_lowercase() != self.marker_lower {
                continue;
            }

            let start = i.saturating_sub(self.config.lookbehind);
            let window = &lines[start..=i];

            // A block without a date is navigation or boilerplate, not a listing.
            if !window.iter().any(|l| self.date_re.is_match(l)) {
                log::debug!("Skipping dateless block ending at line {i}");
                continue;
            }

            fixtures.push(self.assemble(window));
        }

        dedup_by_id(fixtures)
    }

    /// Build a fixture from an accepted window of lines.
    fn assemble(&self, window: &[String]) -> Fixture {
        let raw = window.join(" | ");

        let date = window
            .iter()
            .find(|l| self.date_re.is_match(l))
            .cloned()
            .unwrap_or_default();

        let teams: Vec<String> = window
            .iter()
            .filter(|l| self.looks_like_team(l))
            .take(2)
            .cloned()
            .collect();

        let competition = window
            .iter()
            .find(|l| self.looks_like_competition(l))
            .cloned()
            .unwrap_or_default();

        let versus = teams.join(" vs ");
        let id = [competition.as_str(), versus.as_str(), date.as_str()]
            .join("|")
            .trim_matches('|')
            .to_string();
        // Last resort when no structured field survived: the window text
        // itself still identifies the listing, at the cost of layout
        // sensitivity.
        let id = if id.is_empty() { raw.clone() } else { id };

        Fixture {
            id,
            competition,
            teams,
            date,
            raw,
        }
    }

    /// Short fully-uppercase lines read like team names.
    fn looks_like_team(&self, line: &str) -> bool {
        line.chars().count() <= self.config.max_team_name_len
            && line.to_uppercase() == *line
    }

    fn looks_like_competition(&self, line: &str) -> bool {
        line.contains(" - ")
            || self
                .config
                .competition_keywords
                .iter()
                .any(|keyword| line.contains(keyword.as_str()))
    }
}

impl Default for FixtureExtractor {
    fn default() -> Self {
        Self::new(HeuristicsConfig::default())
    }
}

/// Remove duplicate ids, keeping the first occurrence in encounter order.
fn dedup_by_id(fixtures: Vec<Fixture>) -> Vec<Fixture> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for fixture in fixtures {
        if seen.insert(fixture.id.clone()) {
            unique.push(fixture);
        }
    }
    unique
}
