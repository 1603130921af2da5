//! Static base risk weights per clause category, on the 0–10 scale.

use lexrisk_common::types::ClauseType;

/// Inherent riskiness of a clause category before indicator adjustment.
/// Also the tie-breaker when two categories classify with equal scores.
pub fn base_weight(clause_type: ClauseType) -> f64 {
    match clause_type {
        ClauseType::Indemnification => 8.5,
        ClauseType::IntellectualProperty => 8.0,
        ClauseType::NonCompete => 7.5,
        ClauseType::DataProtection => 7.5,
        ClauseType::LiabilityLimitation => 7.0,
        ClauseType::ChangeOfControl => 7.0,
        ClauseType::Arbitration => 6.5,
        ClauseType::AutomaticRenewal => 6.0,
        ClauseType::PaymentTerms => 6.0,
        ClauseType::Termination => 5.5,
        ClauseType::Warranty => 5.5,
        ClauseType::Confidentiality => 5.0,
        ClauseType::DisputeResolution => 4.5,
        ClauseType::Assignment => 4.0,
        ClauseType::ForceMajeure => 4.0,
        ClauseType::GoverningLaw => 3.5,
        ClauseType::Amendment => 3.0,
        ClauseType::Notice => 2.0,
        ClauseType::Severability => 1.5,
        ClauseType::EntireAgreement => 1.5,
        ClauseType::Unknown => 3.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_stay_on_scale() {
        for clause_type in ClauseType::ALL {
            let weight = base_weight(clause_type);
            assert!((0.0..=10.0).contains(&weight), "{clause_type:?}");
        }
    }

    #[test]
    fn indemnification_outranks_everything() {
        for clause_type in ClauseType::ALL {
            if clause_type != ClauseType::Indemnification {
                assert!(base_weight(clause_type) < base_weight(ClauseType::Indemnification));
            }
        }
    }
}
