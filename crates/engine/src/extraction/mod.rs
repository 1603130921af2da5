//! Clause extraction: sectioning, paragraph segmentation, and
//! keyword-based classification into the clause taxonomy.

mod patterns;

pub use patterns::{rules, ClauseRules};

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use lexrisk_common::config::ExtractionConfig;
use lexrisk_common::types::{ClauseSummary, ClauseType, ExtractedClause};

use crate::risk::base_weight;

/// Line-anchored numbered section header, e.g. `3.2. LIMITATION OF LIABILITY`
/// or `7) Termination`.
static SECTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d+(?:\.\d+)*)[ \t]*[.)][ \t]*(\S[^\n]*)").unwrap());

/// A document section delimited by numbered headers. Offsets are absolute
/// byte positions of the section body in the original document.
#[derive(Clone, Debug)]
struct Section {
    number: Option<String>,
    title: Option<String>,
    start: usize,
    end: usize,
}

/// Deterministic, stateless clause extractor.
///
/// No instance fields are mutated across calls; instances can be shared
/// freely across worker threads.
#[derive(Clone, Debug)]
pub struct ClauseExtractor {
    config: ExtractionConfig,
}

impl ClauseExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract all clauses at or above `min_confidence`.
    ///
    /// Empty or whitespace-only input yields an empty list, not an error.
    /// Paragraphs that classify as `Unknown` are dropped unless
    /// `min_confidence` is zero.
    pub fn extract_clauses(&self, text: &str, min_confidence: f64) -> Vec<ExtractedClause> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut clauses = Vec::new();
        for section in identify_sections(text) {
            let body = &text[section.start..section.end];
            for (para_start, para_end) in split_paragraphs(body) {
                let paragraph = &body[para_start..para_end];
                if paragraph.len() < self.config.min_paragraph_chars {
                    continue;
                }

                let (clause_type, confidence, keywords) = self.classify(paragraph);
                if clause_type == ClauseType::Unknown && min_confidence > 0.0 {
                    continue;
                }
                if confidence < min_confidence {
                    continue;
                }

                let risk_indicators = self.risk_indicators(paragraph, clause_type);
                clauses.push(ExtractedClause {
                    clause_type,
                    text: paragraph.to_string(),
                    start: section.start + para_start,
                    end: section.start + para_end,
                    section_number: section.number.clone(),
                    section_title: section.title.clone(),
                    confidence,
                    keywords_matched: keywords,
                    risk_indicators,
                });
            }
        }

        metrics::counter!("extraction.clauses").increment(clauses.len() as u64);
        tracing::info!(
            clauses = clauses.len(),
            min_confidence,
            "Extracted clauses from document"
        );
        clauses
    }

    /// Classify a single paragraph against every clause category's keyword
    /// table.
    ///
    /// Score per category is matched keywords over table size, with a 1.5×
    /// boost when two or more keywords match. Equal scores go to the
    /// category with the higher base risk weight.
    pub fn classify(&self, text: &str) -> (ClauseType, f64, Vec<String>) {
        let lower = text.to_lowercase();

        let mut best_type = ClauseType::Unknown;
        let mut best_score = 0.0_f64;
        let mut best_keywords: Vec<String> = Vec::new();

        for clause_type in ClauseType::ALL {
            let Some(rules) = patterns::rules(clause_type) else {
                continue;
            };

            let matched: Vec<String> = rules
                .keywords
                .iter()
                .filter(|kw| lower.contains(&kw.to_lowercase()))
                .map(|kw| kw.to_string())
                .collect();
            if matched.is_empty() {
                continue;
            }

            let mut score = matched.len() as f64 / rules.keywords.len() as f64;
            if matched.len() >= 2 {
                score *= 1.5;
            }

            let wins = score > best_score
                || (score == best_score && base_weight(clause_type) > base_weight(best_type));
            if wins {
                best_type = clause_type;
                best_score = score;
                best_keywords = matched;
            }
        }

        (best_type, best_score.min(1.0), best_keywords)
    }

    /// Scan a paragraph for the clause type's risk-indicator phrases.
    /// Matches are recorded verbatim from the table, without deduplication.
    pub fn risk_indicators(&self, text: &str, clause_type: ClauseType) -> Vec<String> {
        let Some(rules) = patterns::rules(clause_type) else {
            return Vec::new();
        };

        let lower = text.to_lowercase();
        rules
            .risk_keywords
            .iter()
            .filter(|kw| lower.contains(&kw.to_lowercase()))
            .map(|kw| kw.to_string())
            .collect()
    }

    /// Summary statistics over a set of extracted clauses.
    pub fn summarize(&self, clauses: &[ExtractedClause]) -> ClauseSummary {
        let mut clause_types: HashMap<ClauseType, usize> = HashMap::new();
        let mut total_risk_indicators = 0;
        let mut clauses_with_risk_indicators = 0;
        let mut high_confidence_count = 0;

        for clause in clauses {
            *clause_types.entry(clause.clause_type).or_insert(0) += 1;
            if !clause.risk_indicators.is_empty() {
                total_risk_indicators += clause.risk_indicators.len();
                clauses_with_risk_indicators += 1;
            }
            if clause.confidence >= 0.8 {
                high_confidence_count += 1;
            }
        }

        let average_confidence = if clauses.is_empty() {
            0.0
        } else {
            clauses.iter().map(|c| c.confidence).sum::<f64>() / clauses.len() as f64
        };

        ClauseSummary {
            total_clauses: clauses.len(),
            clause_types,
            high_confidence_count,
            clauses_with_risk_indicators,
            total_risk_indicators,
            average_confidence,
        }
    }
}

/// Split a document into sections at numbered headers. With no headers the
/// whole document is one anonymous section.
fn identify_sections(text: &str) -> Vec<Section> {
    let matches: Vec<_> = SECTION_HEADER_RE.captures_iter(text).collect();

    if matches.is_empty() {
        return vec![Section {
            number: None,
            title: None,
            start: 0,
            end: text.len(),
        }];
    }

    let mut sections = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let header = caps.get(0).unwrap();
        let end = if i + 1 < matches.len() {
            matches[i + 1].get(0).unwrap().start()
        } else {
            text.len()
        };

        sections.push(Section {
            number: Some(caps[1].to_string()),
            title: Some(caps[2].trim().to_string()),
            start: header.end(),
            end,
        });
    }
    sections
}

/// Paragraph spans within a section body: blank-line boundaries, or a break
/// before a strongly indented (≥ 4 spaces/tabs) line. Spans are trimmed of
/// surrounding whitespace.
fn split_paragraphs(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut para_start: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let content = line.trim_end_matches('\n');

        if content.trim().is_empty() {
            if let Some(start) = para_start.take() {
                push_trimmed(text, start, line_start, &mut spans);
            }
            continue;
        }

        let indent = content
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();
        if indent >= 4 {
            if let Some(start) = para_start.take() {
                push_trimmed(text, start, line_start, &mut spans);
            }
        }

        if para_start.is_none() {
            para_start = Some(line_start);
        }
    }

    if let Some(start) = para_start {
        push_trimmed(text, start, text.len(), &mut spans);
    }
    spans
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start().len();
    let trail = raw.len() - raw.trim_end().len();
    spans.push((start + lead, end - trail));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ClauseExtractor {
        ClauseExtractor::new(ExtractionConfig {
            min_confidence: 0.5,
            min_paragraph_chars: 50,
        })
    }

    const INDEMNITY_DOC: &str = "1. INDEMNIFICATION\n\
        The Seller shall indemnify and hold harmless the Buyer from any and all claims.";

    #[test]
    fn extracts_indemnification_clause() {
        let clauses = extractor().extract_clauses(INDEMNITY_DOC, 0.3);

        assert_eq!(clauses.len(), 1);
        let clause = &clauses[0];
        assert_eq!(clause.clause_type, ClauseType::Indemnification);
        assert!(clause.confidence > 0.3);
        assert_eq!(clause.section_number.as_deref(), Some("1"));
        assert_eq!(clause.section_title.as_deref(), Some("INDEMNIFICATION"));
        assert!(clause.risk_indicators.contains(&"any and all".to_string()));
    }

    #[test]
    fn offsets_point_into_original_document() {
        let clauses = extractor().extract_clauses(INDEMNITY_DOC, 0.3);
        let clause = &clauses[0];
        assert_eq!(&INDEMNITY_DOC[clause.start..clause.end], clause.text);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(extractor().extract_clauses("", 0.5).is_empty());
        assert!(extractor().extract_clauses("   \n\n  ", 0.5).is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "1. CONFIDENTIALITY\n\
            Each party shall keep all confidential information and trade secrets \
            of the other party in strict confidence under this non-disclosure obligation.\n\n\
            2. TERMINATION\n\
            Either party may terminate this agreement at any time without cause upon \
            thirty days written notice of termination.";

        let first = extractor().extract_clauses(text, 0.1);
        let second = extractor().extract_clauses(text, 0.1);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.clause_type, b.clause_type);
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
            assert_eq!(a.confidence, b.confidence);
        }
    }

    #[test]
    fn short_paragraphs_are_skipped_as_noise() {
        let text = "1. NOTICES\nShort line.";
        assert!(extractor().extract_clauses(text, 0.0).is_empty());
    }

    #[test]
    fn document_without_headers_is_one_section() {
        let text = "The Contractor agrees to indemnify and hold harmless the Company, \
            its officers and employees, from any and all liabilities.";
        let clauses = extractor().extract_clauses(text, 0.1);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].section_number, None);
        assert_eq!(clauses[0].clause_type, ClauseType::Indemnification);
    }

    #[test]
    fn multi_keyword_boost_applies() {
        let ext = extractor();
        let one = ext.classify("This agreement includes an obligation to defend the other party.");
        let two = ext.classify("The Vendor shall indemnify, defend and hold harmless the Client.");

        assert_eq!(one.0, ClauseType::Indemnification);
        assert_eq!(two.0, ClauseType::Indemnification);
        // 3 matches at 1.5x vs a single match.
        assert!(two.1 > one.1 * 2.0);
    }

    #[test]
    fn unclassifiable_text_is_unknown_with_zero_confidence() {
        let (clause_type, confidence, keywords) =
            extractor().classify("The quick brown fox jumps over the lazy dog.");
        assert_eq!(clause_type, ClauseType::Unknown);
        assert_eq!(confidence, 0.0);
        assert!(keywords.is_empty());
    }

    #[test]
    fn risk_indicators_match_only_own_type_table() {
        let ext = extractor();
        let text = "unlimited liability applies and the fee is non-refundable";
        let indicators = ext.risk_indicators(text, ClauseType::LiabilityLimitation);
        assert_eq!(indicators, vec!["unlimited liability".to_string()]);
        assert!(ext
            .risk_indicators(text, ClauseType::Severability)
            .is_empty());
    }

    #[test]
    fn summary_counts_are_consistent() {
        let text = "1. CONFIDENTIALITY\n\
            All confidential information, trade secrets and proprietary data shall \
            remain confidential in perpetuity under this non-disclosure agreement.\n\n\
            2. PAYMENT\n\
            All fees and compensation are due on the invoice due date; late payment \
            accrues interest and a non-refundable surcharge.";
        let ext = extractor();
        let clauses = ext.extract_clauses(text, 0.1);
        let summary = ext.summarize(&clauses);

        assert_eq!(summary.total_clauses, clauses.len());
        assert_eq!(
            summary.clause_types.values().sum::<usize>(),
            summary.total_clauses
        );
        assert!(summary.average_confidence > 0.0);
        assert!(summary.total_risk_indicators >= summary.clauses_with_risk_indicators);
    }
}
