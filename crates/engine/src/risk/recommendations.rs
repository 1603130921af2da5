//! Fixed rule table turning scored clauses into review recommendations.

use lexrisk_common::types::{ClauseType, Priority, Recommendation, RiskedClause};

fn has_indicator(clause: &RiskedClause, phrase: &str) -> bool {
    clause.clause.risk_indicators.iter().any(|i| i == phrase)
}

fn of_type<'a>(
    clauses: &'a [RiskedClause],
    clause_type: ClauseType,
) -> impl Iterator<Item = &'a RiskedClause> {
    clauses
        .iter()
        .filter(move |c| c.clause.clause_type == clause_type)
}

/// Build the recommendation list for an assessment. Deterministic over the
/// input: the same clauses always yield the same list in the same order.
/// No clauses means no recommendations, not a fallback message.
pub fn build_recommendations(clauses: &[RiskedClause], high_risk_count: usize) -> Vec<Recommendation> {
    if clauses.is_empty() {
        return Vec::new();
    }

    let mut recommendations = Vec::new();

    if high_risk_count > 0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: "general".into(),
            text: format!(
                "Document contains {high_risk_count} high-risk clause(s) requiring careful legal review"
            ),
        });
    }

    let indemnity_exposed = of_type(clauses, ClauseType::Indemnification).any(|c| {
        c.risk_level.is_elevated() || has_indicator(c, "unlimited") || has_indicator(c, "any and all")
    });
    if indemnity_exposed {
        recommendations.push(Recommendation {
            priority: Priority::Critical,
            category: "indemnification".into(),
            text: "Consider negotiating a cap on indemnification obligations and carving out \
                   indirect damages"
                .into(),
        });
    }

    if of_type(clauses, ClauseType::LiabilityLimitation).any(|c| has_indicator(c, "no limit")) {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: "liability".into(),
            text: "Liability exposure appears uncapped; negotiate an aggregate liability cap".into(),
        });
    }

    if of_type(clauses, ClauseType::AutomaticRenewal).next().is_some() {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            category: "renewal".into(),
            text: "Calendar the renewal notice deadline to avoid unintended automatic renewal".into(),
        });
    }

    if of_type(clauses, ClauseType::NonCompete).any(|c| has_indicator(c, "broad scope")) {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: "non_compete".into(),
            text: "Non-compete scope is broad; narrow the restricted activities, territory, or \
                   duration"
                .into(),
        });
    }

    if of_type(clauses, ClauseType::DataProtection).next().is_some() {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            category: "data_protection".into(),
            text: "Verify data handling terms against applicable privacy regulations".into(),
        });
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            category: "general".into(),
            text: "No elevated risks detected; standard review recommended".into(),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexrisk_common::types::{ExtractedClause, RiskLevel};

    fn risked(clause_type: ClauseType, risk_score: f64, indicators: &[&str]) -> RiskedClause {
        RiskedClause {
            clause: ExtractedClause {
                clause_type,
                text: String::new(),
                start: 0,
                end: 0,
                section_number: None,
                section_title: None,
                confidence: 1.0,
                keywords_matched: Vec::new(),
                risk_indicators: indicators.iter().map(|s| s.to_string()).collect(),
            },
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            base_risk: risk_score,
        }
    }

    #[test]
    fn no_clauses_means_no_recommendations() {
        assert!(build_recommendations(&[], 0).is_empty());
    }

    #[test]
    fn benign_clauses_get_the_standard_review_fallback() {
        let clauses = vec![risked(ClauseType::GoverningLaw, 3.0, &[])];
        let recs = build_recommendations(&clauses, 0);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
    }

    #[test]
    fn unlimited_indemnification_is_critical() {
        let clauses = vec![risked(ClauseType::Indemnification, 5.0, &["any and all"])];
        let recs = build_recommendations(&clauses, 0);
        assert!(recs
            .iter()
            .any(|r| r.priority == Priority::Critical && r.category == "indemnification"));
    }

    #[test]
    fn high_risk_count_adds_general_warning() {
        let clauses = vec![risked(ClauseType::Termination, 7.0, &[])];
        let recs = build_recommendations(&clauses, 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].category, "general");
    }

    #[test]
    fn determinism() {
        let clauses = vec![
            risked(ClauseType::Indemnification, 8.0, &["unlimited"]),
            risked(ClauseType::AutomaticRenewal, 6.0, &[]),
            risked(ClauseType::DataProtection, 7.0, &[]),
        ];
        let a = build_recommendations(&clauses, 3);
        let b = build_recommendations(&clauses, 3);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.category, y.category);
            assert_eq!(x.priority, y.priority);
        }
    }
}
