//! Bluebook-style legal citation parsing and validation.

mod reporters;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use lexrisk_common::types::{CitationReport, CitationType, InvalidCitation, ParsedCitation};

/// `VOLUME REPORTER PAGE[, PINPOINT]`.
static CASE_CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+([A-Z][A-Za-z.0-9]+)\s+(\d+)(?:,?\s+(\d+))?").unwrap()
});

/// Trailing `(YEAR)` parenthetical.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d{4})\)").unwrap());

/// Trailing `(COURT YEAR)` parenthetical, e.g. `(9th Cir. 2020)`.
static COURT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Za-z0-9][A-Za-z0-9.\s]+?)\s+(\d{4})\)").unwrap());

/// `TITLE U.S.C. § SECTION`.
static USC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+U\.S\.C\.\s+§\s*(\d+)").unwrap());

/// Generic `STATE Code/Stat. § SECTION` form.
static STATE_STATUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z.]+)\s+(?:Code|Stat\.)\s+(?:Ann\.\s+)?§\s*(\d+)").unwrap()
});

/// Context window scanned before a citation for its case name.
const CASE_NAME_WINDOW: usize = 100;
/// Context window scanned after a citation for its year/court.
const YEAR_WINDOW: usize = 50;

/// Parser for case-law and statutory citations.
///
/// Stateless; all tables are static. Safe to call from any number of
/// threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct CitationParser;

impl CitationParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single citation string into structured components.
    ///
    /// An unrecognized citation is returned with `is_valid = false` rather
    /// than discarded.
    pub fn parse(&self, text: &str) -> ParsedCitation {
        let text = text.trim();

        let mut unrecognized_case = None;
        if let Some(parsed) = self.parse_case(text) {
            if parsed.is_valid {
                return parsed;
            }
            // Keep the partial parse around in case the statute patterns
            // also fail.
            unrecognized_case = Some(parsed);
        }

        if let Some(parsed) = self.parse_statute(text) {
            return parsed;
        }

        match unrecognized_case {
            Some(parsed) => parsed,
            None => {
                tracing::warn!(citation = text, "Unable to parse citation");
                ParsedCitation::unknown(text)
            }
        }
    }

    /// Extract every case citation from a block of text, deduplicated by
    /// volume/reporter/page.
    ///
    /// Case name and year/court are resolved from a bounded window around
    /// each match so adjacent citations do not bleed into each other.
    pub fn extract_all(&self, text: &str) -> Vec<ParsedCitation> {
        let mut citations = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for caps in CASE_CITATION_RE.captures_iter(text) {
            let m = caps.get(0).unwrap();
            let volume = &caps[1];
            let reporter = &caps[2];
            let page = &caps[3];
            let pinpoint = caps.get(4).map(|p| p.as_str().to_string());

            let key = format!("{volume}_{reporter}_{page}");
            if seen.contains(&key) {
                continue;
            }

            let reporter = match self.resolve_reporter(reporter) {
                Some(r) => r,
                None => continue,
            };

            let citation_type = if reporters::is_federal_reporter(&reporter) {
                CitationType::FederalCase
            } else {
                CitationType::StateCase
            };

            let name_start = floor_char_boundary(text, m.start().saturating_sub(CASE_NAME_WINDOW));
            let case_name = extract_case_name(&text[name_start..m.start()]);

            let year_end = ceil_char_boundary(text, (m.end() + YEAR_WINDOW).min(text.len()));
            let (court, year) = extract_court_year(&text[m.end()..year_end]);

            let jurisdiction = determine_jurisdiction(&reporter, court.as_deref());

            citations.push(ParsedCitation {
                raw: m.as_str().to_string(),
                citation_type,
                volume: Some(volume.to_string()),
                reporter: Some(reporter),
                page: Some(page.to_string()),
                pinpoint,
                year,
                court,
                jurisdiction,
                case_name,
                is_valid: true,
                confidence: 0.9,
            });
            seen.insert(key);
        }

        citations
    }

    /// Check that a parsed citation carries every field its type requires.
    pub fn validate(&self, citation: &ParsedCitation) -> bool {
        if !citation.is_valid {
            return false;
        }

        match citation.citation_type {
            CitationType::FederalCase | CitationType::StateCase => {
                citation.volume.is_some() && citation.reporter.is_some() && citation.page.is_some()
            }
            // `page` holds the section number for statutes.
            CitationType::Statute => citation.page.is_some(),
            _ => true,
        }
    }

    /// Batch-validate a set of citations.
    pub fn validation_report(&self, citations: &[ParsedCitation]) -> CitationReport {
        let mut valid = 0;
        let mut invalid = Vec::new();

        for citation in citations {
            if self.validate(citation) {
                valid += 1;
            } else {
                invalid.push(InvalidCitation {
                    raw: citation.raw.clone(),
                    reason: "Invalid format or missing required fields".into(),
                });
            }
        }

        let validation_rate = if citations.is_empty() {
            0.0
        } else {
            valid as f64 / citations.len() as f64 * 100.0
        };

        CitationReport {
            total: citations.len(),
            valid,
            invalid,
            validation_rate,
        }
    }

    /// Format a citation according to a style guide. Only "bluebook" is
    /// supported; other styles fall back to the raw text.
    pub fn format(&self, citation: &ParsedCitation, style: &str) -> String {
        if style != "bluebook" {
            return citation.raw.clone();
        }

        match citation.citation_type {
            CitationType::FederalCase | CitationType::StateCase => {
                let (Some(volume), Some(reporter), Some(page)) =
                    (&citation.volume, &citation.reporter, &citation.page)
                else {
                    return citation.raw.clone();
                };

                let mut formatted = format!("{volume} {reporter} {page}");
                if let Some(pinpoint) = &citation.pinpoint {
                    formatted.push_str(&format!(", {pinpoint}"));
                }
                match (&citation.court, &citation.year) {
                    (Some(court), Some(year)) => {
                        formatted.push_str(&format!(" ({court} {year})"));
                    }
                    (None, Some(year)) => formatted.push_str(&format!(" ({year})")),
                    _ => {}
                }
                formatted
            }
            _ => citation.raw.clone(),
        }
    }

    fn parse_case(&self, text: &str) -> Option<ParsedCitation> {
        let caps = CASE_CITATION_RE.captures(text)?;
        let m = caps.get(0).unwrap();
        let volume = caps[1].to_string();
        let raw_reporter = caps[2].to_string();
        let page = caps[3].to_string();
        let pinpoint = caps.get(4).map(|p| p.as_str().to_string());

        let Some(reporter) = self.resolve_reporter(&raw_reporter) else {
            // Reporter not in the tables even after normalization: keep the
            // partial parse with a fixed low confidence.
            return Some(ParsedCitation {
                raw: text.to_string(),
                citation_type: CitationType::Unknown,
                volume: Some(volume),
                reporter: Some(raw_reporter),
                page: Some(page),
                pinpoint,
                year: None,
                court: None,
                jurisdiction: None,
                case_name: None,
                is_valid: false,
                confidence: 0.3,
            });
        };

        let citation_type = if reporters::is_federal_reporter(&reporter) {
            CitationType::FederalCase
        } else {
            CitationType::StateCase
        };

        let (court, year) = extract_court_year(text);
        let case_name = extract_case_name(&text[..m.start()]);
        let jurisdiction = determine_jurisdiction(&reporter, court.as_deref());

        Some(ParsedCitation {
            raw: text.to_string(),
            citation_type,
            volume: Some(volume),
            reporter: Some(reporter),
            page: Some(page),
            pinpoint,
            year,
            court,
            jurisdiction,
            case_name,
            is_valid: true,
            confidence: 0.95,
        })
    }

    fn parse_statute(&self, text: &str) -> Option<ParsedCitation> {
        if let Some(caps) = USC_RE.captures(text) {
            return Some(ParsedCitation {
                raw: text.to_string(),
                citation_type: CitationType::Statute,
                volume: Some(caps[1].to_string()),
                reporter: None,
                page: Some(caps[2].to_string()),
                pinpoint: None,
                year: None,
                court: None,
                jurisdiction: Some("federal".into()),
                case_name: None,
                is_valid: true,
                confidence: 0.9,
            });
        }

        if let Some(caps) = STATE_STATUTE_RE.captures(text) {
            return Some(ParsedCitation {
                raw: text.to_string(),
                citation_type: CitationType::Statute,
                volume: None,
                reporter: None,
                page: Some(caps[2].to_string()),
                pinpoint: None,
                year: None,
                court: None,
                jurisdiction: Some(caps[1].to_lowercase()),
                case_name: None,
                is_valid: true,
                confidence: 0.85,
            });
        }

        None
    }

    /// Resolve a reporter token against the tables, retrying with
    /// whitespace stripped.
    fn resolve_reporter(&self, reporter: &str) -> Option<String> {
        if reporters::is_known_reporter(reporter) {
            return Some(reporter.to_string());
        }
        let normalized: String = reporter.split_whitespace().collect();
        if reporters::is_known_reporter(&normalized) {
            return Some(normalized);
        }
        None
    }
}

/// Case name is the text immediately before the citation, trimmed with any
/// trailing comma stripped.
fn extract_case_name(before: &str) -> Option<String> {
    let name = before.trim().trim_end_matches(',').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Pull court and year out of a trailing parenthetical. `(9th Cir. 2020)`
/// yields both; `(1973)` yields only the year.
fn extract_court_year(text: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = COURT_RE.captures(text) {
        return (Some(caps[1].to_string()), Some(caps[2].to_string()));
    }
    if let Some(caps) = YEAR_RE.captures(text) {
        return (None, Some(caps[1].to_string()));
    }
    (None, None)
}

fn determine_jurisdiction(reporter: &str, court: Option<&str>) -> Option<String> {
    if let Some(jurisdiction) = reporters::reporter_jurisdiction(reporter) {
        return Some(jurisdiction.to_string());
    }
    // Regional reporters need the court parenthetical to place them.
    court.map(|c| c.to_lowercase().replace(' ', "-"))
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
