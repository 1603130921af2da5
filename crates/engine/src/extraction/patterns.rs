//! Static keyword and risk-indicator tables per clause category.
//!
//! Plain immutable tables keyed by the closed `ClauseType` enumeration so
//! the compiler enforces exhaustiveness, instead of a class hierarchy.

use lexrisk_common::types::ClauseType;

/// Keyword sets driving classification and risk-indicator scanning for one
/// clause category.
pub struct ClauseRules {
    pub keywords: &'static [&'static str],
    pub risk_keywords: &'static [&'static str],
}

/// Classification rules for a clause type. Types without a rule set
/// (`Notice`, `Severability`, `EntireAgreement`, `Amendment`, `Unknown`)
/// never win classification but still carry risk weights.
pub fn rules(clause_type: ClauseType) -> Option<&'static ClauseRules> {
    match clause_type {
        ClauseType::Indemnification => Some(&ClauseRules {
            keywords: &[
                "indemnify",
                "indemnification",
                "hold harmless",
                "defend",
                "indemnitor",
                "indemnitee",
                "indemnified party",
            ],
            risk_keywords: &[
                "any and all",
                "unlimited",
                "consequential",
                "indirect",
                "sole discretion",
                "irrespective",
            ],
        }),
        ClauseType::LiabilityLimitation => Some(&ClauseRules {
            keywords: &[
                "limitation of liability",
                "liability cap",
                "limited to",
                "in no event shall",
                "maximum liability",
                "aggregate liability",
            ],
            risk_keywords: &[
                "no limit",
                "unlimited liability",
                "consequential damages",
                "punitive damages",
                "indirect damages",
            ],
        }),
        ClauseType::Confidentiality => Some(&ClauseRules {
            keywords: &[
                "confidential",
                "confidentiality",
                "non-disclosure",
                "proprietary",
                "trade secret",
                "confidential information",
                "NDA",
            ],
            risk_keywords: &[
                "perpetual",
                "indefinite",
                "no limitation",
                "broad definition",
                "all information",
            ],
        }),
        ClauseType::Termination => Some(&ClauseRules {
            keywords: &[
                "termination",
                "terminate",
                "cancellation",
                "cancel",
                "termination for cause",
                "termination for convenience",
                "notice of termination",
                "early termination",
            ],
            risk_keywords: &[
                "without cause",
                "at any time",
                "without notice",
                "sole discretion",
                "no refund",
                "immediate termination",
            ],
        }),
        ClauseType::PaymentTerms => Some(&ClauseRules {
            keywords: &[
                "payment",
                "fees",
                "compensation",
                "price",
                "invoice",
                "payment terms",
                "due date",
                "late payment",
            ],
            risk_keywords: &[
                "non-refundable",
                "advance payment",
                "late fees",
                "interest",
                "acceleration",
                "price increase",
            ],
        }),
        ClauseType::IntellectualProperty => Some(&ClauseRules {
            keywords: &[
                "intellectual property",
                "IP",
                "copyright",
                "trademark",
                "patent",
                "trade secret",
                "ownership",
                "license",
            ],
            risk_keywords: &[
                "assign",
                "work for hire",
                "all rights",
                "perpetual",
                "exclusive",
                "irrevocable",
                "worldwide",
            ],
        }),
        ClauseType::DisputeResolution => Some(&ClauseRules {
            keywords: &[
                "dispute resolution",
                "dispute",
                "mediation",
                "arbitration",
                "litigation",
                "negotiation",
                "escalation",
            ],
            risk_keywords: &[
                "binding arbitration",
                "waive right",
                "class action waiver",
                "jury trial waiver",
                "exclusive jurisdiction",
            ],
        }),
        ClauseType::GoverningLaw => Some(&ClauseRules {
            keywords: &[
                "governing law",
                "applicable law",
                "governed by",
                "laws of",
                "jurisdiction",
                "venue",
            ],
            risk_keywords: &[
                "foreign jurisdiction",
                "inconvenient forum",
                "exclusive venue",
            ],
        }),
        ClauseType::ForceMajeure => Some(&ClauseRules {
            keywords: &[
                "force majeure",
                "act of god",
                "beyond control",
                "unforeseeable",
                "excused performance",
            ],
            risk_keywords: &["no force majeure", "limited relief", "short notice period"],
        }),
        ClauseType::Warranty => Some(&ClauseRules {
            keywords: &[
                "warranty",
                "warrant",
                "guarantee",
                "representation",
                "as-is",
                "merchantability",
                "fitness for purpose",
            ],
            risk_keywords: &[
                "no warranty",
                "as-is",
                "disclaimer",
                "limited warranty",
                "breach of warranty",
            ],
        }),
        ClauseType::NonCompete => Some(&ClauseRules {
            keywords: &[
                "non-compete",
                "non-competition",
                "restrictive covenant",
                "competitive activity",
                "refrain from competing",
            ],
            risk_keywords: &[
                "broad scope",
                "long duration",
                "worldwide",
                "any capacity",
                "indefinite",
            ],
        }),
        ClauseType::Assignment => Some(&ClauseRules {
            keywords: &[
                "assignment",
                "transfer",
                "assignee",
                "successor",
                "delegate",
                "subcontract",
            ],
            risk_keywords: &[
                "freely assign",
                "without consent",
                "automatic assignment",
                "change of control",
            ],
        }),
        ClauseType::Arbitration => Some(&ClauseRules {
            keywords: &[
                "arbitration",
                "arbitrator",
                "AAA",
                "JAMS",
                "arbitral",
                "binding arbitration",
                "arbitration clause",
            ],
            risk_keywords: &[
                "mandatory arbitration",
                "waive jury",
                "individual basis only",
                "no class action",
                "expedited arbitration",
            ],
        }),
        ClauseType::AutomaticRenewal => Some(&ClauseRules {
            keywords: &[
                "automatic renewal",
                "auto-renew",
                "automatically renew",
                "successive terms",
                "renewal term",
            ],
            risk_keywords: &[
                "automatic",
                "unless notice",
                "short notice period",
                "perpetual renewal",
            ],
        }),
        ClauseType::ChangeOfControl => Some(&ClauseRules {
            keywords: &[
                "change of control",
                "change in control",
                "acquisition",
                "merger",
                "sale of business",
            ],
            risk_keywords: &[
                "automatic termination",
                "immediate payment",
                "accelerated vesting",
            ],
        }),
        ClauseType::DataProtection => Some(&ClauseRules {
            keywords: &[
                "data protection",
                "privacy",
                "GDPR",
                "personal data",
                "data processing",
                "data security",
                "CCPA",
            ],
            risk_keywords: &[
                "unlimited use",
                "no restrictions",
                "data breach",
                "third party access",
            ],
        }),
        ClauseType::Notice
        | ClauseType::Severability
        | ClauseType::EntireAgreement
        | ClauseType::Amendment
        | ClauseType::Unknown => None,
    }
}
