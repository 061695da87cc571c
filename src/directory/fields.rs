//! Declarative field-extraction specs. Each detail field is an ordered list
//! of strategies tried in sequence; the first non-empty value wins, and a
//! field that no strategy can read comes back as an empty string.

use crate::directory::feed::{DetailView, DirectoryFeed};

#[derive(Debug, Clone, Copy)]
pub enum ValueSource {
    Text,
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum Transform {
    StripPrefix(&'static str),
    NthToken(usize),
    AsciiOnly,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldStrategy {
    pub selector: &'static str,
    pub source: ValueSource,
    pub transforms: &'static [Transform],
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub strategies: &'static [FieldStrategy],
}

pub const WEBSITE: FieldSpec = FieldSpec {
    name: "website",
    strategies: &[
        FieldStrategy {
            selector: r#"a[data-item-id="authority"]"#,
            source: ValueSource::Attr("href"),
            transforms: &[],
        },
        FieldStrategy {
            selector: r#"a[aria-label^="Website:"]"#,
            source: ValueSource::Attr("href"),
            transforms: &[],
        },
    ],
};

pub const PHONE: FieldSpec = FieldSpec {
    name: "phone",
    strategies: &[
        FieldStrategy {
            selector: r#"button[data-item-id^="phone"]"#,
            source: ValueSource::Text,
            transforms: &[Transform::AsciiOnly],
        },
        FieldStrategy {
            selector: r#"button[data-item-id^="phone"]"#,
            source: ValueSource::Attr("aria-label"),
            transforms: &[Transform::StripPrefix("Phone: "), Transform::AsciiOnly],
        },
    ],
};

pub const ADDRESS: FieldSpec = FieldSpec {
    name: "address",
    strategies: &[
        FieldStrategy {
            selector: r#"button[data-item-id="address"]"#,
            source: ValueSource::Text,
            transforms: &[],
        },
        FieldStrategy {
            selector: r#"button[data-item-id="address"]"#,
            source: ValueSource::Attr("aria-label"),
            transforms: &[Transform::StripPrefix("Address: ")],
        },
    ],
};

// Rating labels render as e.g. "4.5 stars 132 Reviews".
pub const RATING: FieldSpec = FieldSpec {
    name: "rating",
    strategies: &[FieldStrategy {
        selector: r#"span[role="img"][aria-label*="stars"]"#,
        source: ValueSource::Attr("aria-label"),
        transforms: &[Transform::NthToken(0)],
    }],
};

pub const REVIEWS: FieldSpec = FieldSpec {
    name: "reviews",
    strategies: &[FieldStrategy {
        selector: r#"span[role="img"][aria-label*="stars"]"#,
        source: ValueSource::Attr("aria-label"),
        transforms: &[Transform::NthToken(2)],
    }],
};

pub const CATEGORY: FieldSpec = FieldSpec {
    name: "category",
    strategies: &[FieldStrategy {
        selector: r#"button[jsaction*="category"]"#,
        source: ValueSource::Text,
        transforms: &[],
    }],
};

pub fn apply_transforms(value: &str, transforms: &[Transform]) -> String {
    let mut out = value.to_string();
    for transform in transforms {
        out = match transform {
            Transform::StripPrefix(prefix) => {
                out.strip_prefix(prefix).unwrap_or(&out).to_string()
            }
            Transform::NthToken(n) => out
                .split_whitespace()
                .nth(*n)
                .unwrap_or_default()
                .to_string(),
            Transform::AsciiOnly => out.chars().filter(|c| c.is_ascii()).collect(),
        };
        out = out.trim().to_string();
    }
    out
}

/// Runs a spec's fallback chain against a detail view. First strategy that
/// produces a non-empty value wins; total failure yields an empty string.
pub fn resolve_field<F: DirectoryFeed + ?Sized>(
    feed: &F,
    view: &DetailView,
    spec: &FieldSpec,
) -> String {
    for strategy in spec.strategies {
        if let Some(raw) = feed.read_field(view, strategy) {
            let value = apply_transforms(&raw, strategy.transforms);
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_leaves_unprefixed_values_alone() {
        let t = [Transform::StripPrefix("Phone: ")];
        assert_eq!(apply_transforms("Phone: 555-1234", &t), "555-1234");
        assert_eq!(apply_transforms("555-1234", &t), "555-1234");
    }

    #[test]
    fn nth_token_out_of_range_is_empty() {
        let t = [Transform::NthToken(2)];
        assert_eq!(apply_transforms("4.5 stars 132 Reviews", &t), "132");
        assert_eq!(apply_transforms("4.5 stars", &t), "");
    }

    #[test]
    fn ascii_only_drops_unicode_and_trims() {
        let t = [Transform::AsciiOnly];
        assert_eq!(apply_transforms("\u{202a}(555) 010-2030\u{202c} ", &t), "(555) 010-2030");
    }
}
