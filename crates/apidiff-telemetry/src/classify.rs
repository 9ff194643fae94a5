//! Positional-argument classification
//!
//! Maps a raw positional argument (typically a file path or URL) to a
//! coarse, non-identifying category label. Classification is ordered
//! first-match-wins over a fixed host-rule table, then generic scheme
//! prefixes, then the `"file"` fallback.

use std::sync::OnceLock;

use regex::Regex;

/// Category for arguments matching no known scheme or host.
pub const CATEGORY_FILE: &str = "file";

/// One entry of the host classification table.
///
/// A rule with no patterns is reserved: it never matches but keeps its
/// slot in the priority order until patterns land.
struct HostRule {
    category: &'static str,
    patterns: &'static [&'static str],
}

/// Host rules in priority order. First match wins.
const HOST_RULES: &[HostRule] = &[
    HostRule {
        category: "swaggerhub",
        patterns: &[r"^https://(.)*swaggerhub\.com/"],
    },
    HostRule {
        category: "github",
        patterns: &[
            r"^https://(.)*githubusercontent\.com/",
            r"^https://(.)*github\.com/",
        ],
    },
    HostRule {
        category: "gcs",
        patterns: &[r"^https://storage\.cloud\.google\.com/"],
    },
    // Reserved: no S3 host patterns yet.
    HostRule {
        category: "s3",
        patterns: &[],
    },
    HostRule {
        category: "azure",
        patterns: &[r"^https://(.)*azure\.com/"],
    },
    HostRule {
        category: "heroku",
        patterns: &[r"^https://(.)*herokuapp\.com/"],
    },
];

/// Every label [`classify`] can produce. The redactor treats these as
/// fixed points so that redacting an already-redacted event is a no-op.
pub(crate) const CATEGORY_LABELS: &[&str] = &[
    "swaggerhub",
    "github",
    "gcs",
    "s3",
    "azure",
    "heroku",
    "https",
    "http",
    CATEGORY_FILE,
];

/// Compile the rule table once. A pattern that fails to compile disables
/// itself, not the classifier: the failure is logged and evaluation falls
/// through to the remaining patterns and rules.
fn compiled_rules() -> &'static Vec<(&'static str, Vec<Regex>)> {
    static RULES: OnceLock<Vec<(&'static str, Vec<Regex>)>> = OnceLock::new();
    RULES.get_or_init(|| {
        HOST_RULES
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .filter_map(|pattern| match Regex::new(pattern) {
                        Ok(re) => Some(re),
                        Err(err) => {
                            tracing::debug!(
                                category = rule.category,
                                "failed to compile host pattern: {err}"
                            );
                            None
                        }
                    })
                    .collect();
                (rule.category, patterns)
            })
            .collect()
    })
}

/// Classify a positional argument into its category label.
///
/// Pure function, no side effects. Empty strings are handled upstream and
/// never reach this function through the normal pipeline.
pub fn classify(raw: &str) -> &'static str {
    for (category, patterns) in compiled_rules() {
        if patterns.iter().any(|re| re.is_match(raw)) {
            return *category;
        }
    }

    if raw.starts_with("https://") {
        "https"
    } else if raw.starts_with("http://") {
        "http"
    } else {
        CATEGORY_FILE
    }
}

pub(crate) fn is_category_label(value: &str) -> bool {
    CATEGORY_LABELS.iter().any(|label| *label == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_heroku() {
        assert_eq!(
            classify("https://aerial-data-production.herokuapp.com/bank/api/openapi3.json"),
            "heroku"
        );
    }

    #[test]
    fn test_classify_swaggerhub() {
        assert_eq!(
            classify("https://app.swaggerhub.com/apis/g4/Banking/1.7.56"),
            "swaggerhub"
        );
    }

    #[test]
    fn test_classify_github_hosts() {
        assert_eq!(
            classify("https://raw.githubusercontent.com/acme/specs/main/openapi.yaml"),
            "github"
        );
        assert_eq!(
            classify("https://github.com/acme/specs/blob/main/openapi.yaml"),
            "github"
        );
    }

    #[test]
    fn test_classify_gcs() {
        assert_eq!(
            classify("https://storage.cloud.google.com/specs/openapi.yaml"),
            "gcs"
        );
    }

    #[test]
    fn test_classify_azure() {
        assert_eq!(classify("https://dev.azure.com/acme/specs"), "azure");
    }

    #[test]
    fn test_s3_rule_is_reserved() {
        // The S3 rule has no patterns yet, so S3 URLs fall through to the
        // generic scheme category.
        assert_eq!(
            classify("https://specs.s3.amazonaws.com/openapi.yaml"),
            "https"
        );
    }

    #[test]
    fn test_classify_generic_schemes() {
        assert_eq!(classify("https://example.com/openapi.yaml"), "https");
        assert_eq!(classify("http://example.com/openapi.yaml"), "http");
    }

    #[test]
    fn test_classify_file_fallback() {
        assert_eq!(classify("./local/spec.yaml"), CATEGORY_FILE);
        assert_eq!(classify("data/openapi-test1.yaml"), CATEGORY_FILE);
        assert_eq!(classify("C:\\specs\\openapi.yaml"), CATEGORY_FILE);
    }

    #[test]
    fn test_patterns_are_anchored() {
        // The host must appear in the URL itself, not merely as a suffix
        // of some local path.
        assert_eq!(classify("notes-about-github.com/readme"), CATEGORY_FILE);
    }

    #[test]
    fn test_every_label_is_a_category_label() {
        for label in CATEGORY_LABELS {
            assert!(is_category_label(label));
        }
        assert!(!is_category_label("data/openapi.yaml"));
    }
}
