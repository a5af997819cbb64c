use serde::Serialize;

use super::PLACEHOLDER;

/// Short label classifying a release's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "lowercase")]
pub enum FormatBadge {
    Vinyl,
    Cd,
    /// Any other format, carrying the text to show
    Generic(String),
}

#[derive(Clone, Copy)]
enum Known {
    Vinyl,
    Cd,
}

// First match wins, so vinyl tokens are checked before "cd".
const FORMAT_TOKENS: &[(&str, Known)] = &[
    ("vinyl", Known::Vinyl),
    ("vinilo", Known::Vinyl),
    ("lp", Known::Vinyl),
    ("cd", Known::Cd),
];

impl FormatBadge {
    pub fn label(&self) -> &str {
        match self {
            FormatBadge::Vinyl => "Vinyl",
            FormatBadge::Cd => "CD",
            FormatBadge::Generic(label) => label,
        }
    }
}

/// Classify a raw Format value by trimmed, case-insensitive substring match.
pub fn classify_format(value: Option<&str>) -> FormatBadge {
    let trimmed = value.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return FormatBadge::Generic(PLACEHOLDER.to_string());
    }

    let lowered = trimmed.to_lowercase();
    FORMAT_TOKENS
        .iter()
        .find(|(token, _)| lowered.contains(token))
        .map(|(_, kind)| match kind {
            Known::Vinyl => FormatBadge::Vinyl,
            Known::Cd => FormatBadge::Cd,
        })
        .unwrap_or_else(|| FormatBadge::Generic(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vinyl_tokens() {
        assert_eq!(classify_format(Some("LP")), FormatBadge::Vinyl);
        assert_eq!(classify_format(Some("Vinilo")), FormatBadge::Vinyl);
        assert_eq!(classify_format(Some(" vinyl 12\" ")), FormatBadge::Vinyl);
    }

    #[test]
    fn test_cd() {
        assert_eq!(classify_format(Some("cd")), FormatBadge::Cd);
        assert_eq!(classify_format(Some("2xCD")), FormatBadge::Cd);
    }

    #[test]
    fn test_vinyl_checked_before_cd() {
        assert_eq!(classify_format(Some("LP + CD")), FormatBadge::Vinyl);
    }

    #[test]
    fn test_generic() {
        assert_eq!(
            classify_format(Some("Cassette")),
            FormatBadge::Generic("Cassette".to_string())
        );
        assert_eq!(classify_format(Some("  Cassette ")).label(), "Cassette");
    }

    #[test]
    fn test_blank_is_placeholder() {
        assert_eq!(classify_format(Some("")).label(), PLACEHOLDER);
        assert_eq!(classify_format(Some("   ")).label(), PLACEHOLDER);
        assert_eq!(classify_format(None).label(), PLACEHOLDER);
    }

    #[test]
    fn test_serializes_with_kind() {
        let value = serde_json::to_value(FormatBadge::Vinyl).unwrap();
        assert_eq!(value["kind"], "vinyl");
        let value = serde_json::to_value(FormatBadge::Generic("Cassette".into())).unwrap();
        assert_eq!(value["label"], "Cassette");
    }
}
