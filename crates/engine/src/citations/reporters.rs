//! Static reporter tables for Bluebook-style case citations.

/// Federal reporter abbreviations and their full names.
pub const FEDERAL_REPORTERS: &[(&str, &str)] = &[
    ("U.S.", "United States Reports"),
    ("S.Ct.", "Supreme Court Reporter"),
    ("L.Ed.", "Lawyers' Edition"),
    ("F.", "Federal Reporter"),
    ("F.2d", "Federal Reporter, Second Series"),
    ("F.3d", "Federal Reporter, Third Series"),
    ("F.4th", "Federal Reporter, Fourth Series"),
    ("F.Supp.", "Federal Supplement"),
    ("F.Supp.2d", "Federal Supplement, Second Series"),
    ("F.Supp.3d", "Federal Supplement, Third Series"),
];

/// State and regional reporter abbreviations.
pub const STATE_REPORTERS: &[(&str, &str)] = &[
    ("Cal.", "California Reporter"),
    ("Cal.2d", "California Reporter, Second Series"),
    ("Cal.3d", "California Reporter, Third Series"),
    ("Cal.4th", "California Reporter, Fourth Series"),
    ("N.Y.", "New York Reports"),
    ("N.Y.2d", "New York Reports, Second Series"),
    ("Tex.", "Texas Reports"),
    ("Fla.", "Florida Reports"),
    ("Ill.", "Illinois Reports"),
    ("P.", "Pacific Reporter"),
    ("P.2d", "Pacific Reporter, Second Series"),
    ("P.3d", "Pacific Reporter, Third Series"),
    ("A.", "Atlantic Reporter"),
    ("A.2d", "Atlantic Reporter, Second Series"),
    ("A.3d", "Atlantic Reporter, Third Series"),
    ("N.E.", "North Eastern Reporter"),
    ("N.E.2d", "North Eastern Reporter, Second Series"),
    ("N.E.3d", "North Eastern Reporter, Third Series"),
    ("S.E.", "South Eastern Reporter"),
    ("S.E.2d", "South Eastern Reporter, Second Series"),
    ("S.W.", "South Western Reporter"),
    ("S.W.2d", "South Western Reporter, Second Series"),
    ("S.W.3d", "South Western Reporter, Third Series"),
];

/// Reporter prefixes that resolve directly to a state jurisdiction.
pub const STATE_JURISDICTION_PREFIXES: &[(&str, &str)] = &[
    ("Cal", "california"),
    ("N.Y", "new-york"),
    ("Tex", "texas"),
    ("Fla", "florida"),
    ("Ill", "illinois"),
];

pub fn is_federal_reporter(reporter: &str) -> bool {
    FEDERAL_REPORTERS.iter().any(|(abbr, _)| *abbr == reporter)
}

pub fn is_known_reporter(reporter: &str) -> bool {
    is_federal_reporter(reporter) || STATE_REPORTERS.iter().any(|(abbr, _)| *abbr == reporter)
}

/// Jurisdiction implied by a reporter, independent of any court
/// parenthetical.
pub fn reporter_jurisdiction(reporter: &str) -> Option<&'static str> {
    if reporter == "U.S." {
        return Some("federal-supreme");
    }
    if matches!(reporter, "F." | "F.2d" | "F.3d" | "F.4th") {
        return Some("federal-circuit");
    }
    if matches!(reporter, "F.Supp." | "F.Supp.2d" | "F.Supp.3d") {
        return Some("federal-district");
    }
    STATE_JURISDICTION_PREFIXES
        .iter()
        .find(|(prefix, _)| reporter.starts_with(prefix))
        .map(|(_, state)| *state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_lookup() {
        assert!(is_known_reporter("U.S."));
        assert!(is_known_reporter("F.3d"));
        assert!(is_known_reporter("N.E.2d"));
        assert!(!is_known_reporter("X.Y.Z."));
    }

    #[test]
    fn jurisdiction_mapping() {
        assert_eq!(reporter_jurisdiction("U.S."), Some("federal-supreme"));
        assert_eq!(reporter_jurisdiction("F.3d"), Some("federal-circuit"));
        assert_eq!(reporter_jurisdiction("F.Supp.2d"), Some("federal-district"));
        assert_eq!(reporter_jurisdiction("Cal.4th"), Some("california"));
        assert_eq!(reporter_jurisdiction("N.Y.2d"), Some("new-york"));
        assert_eq!(reporter_jurisdiction("P.3d"), None);
    }
}
