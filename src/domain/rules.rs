// src/domain/rules.rs

use serde::{Deserialize, Serialize};

/// Catch-all for complexes that match no village token
/// (urban-type housing, officetels, stand-alone brand towers).
pub const OTHER_LABEL: &str = "기타(도시형/오피스텔)";

/// Village tokens as they appear in complex names, in lookup order.
const VILLAGE_TOKENS: [(&str, &str); 16] = [
    ("가락", "가락마을"),
    ("가온", "가온마을"),
    ("가재", "가재마을"),
    ("나릿재", "나릿재마을"),
    ("도램", "도램마을"),
    ("범지기", "범지기마을"),
    ("산울", "산울마을"),
    ("새나루", "새나루마을"),
    ("새뜸", "새뜸마을"),
    ("새샘", "새샘마을"),
    ("수루배", "수루배마을"),
    ("첫마을", "첫마을"),
    ("한뜰", "한뜰마을"),
    ("해들", "해들마을"),
    ("해밀", "해밀마을"),
    ("호려울", "호려울마을"),
];

/// A (sub-area, tokens) pair. A name matches when it contains any token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAreaRule {
    pub name: String,
    pub tokens: Vec<String>,
}

impl SubAreaRule {
    pub fn new(name: &str, tokens: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn matches(&self, complex_name: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| !t.is_empty() && complex_name.contains(t.as_str()))
    }
}

/// Ordered lookup table. The first matching rule wins and anything
/// left over resolves to the "other" label, so lookup is total.
#[derive(Debug, Clone, PartialEq)]
pub struct SubAreaTable {
    rules: Vec<SubAreaRule>,
    other: String,
}

impl SubAreaTable {
    pub fn new(rules: Vec<SubAreaRule>, other: impl Into<String>) -> Self {
        Self {
            rules,
            other: other.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::builtin_with_other(OTHER_LABEL)
    }

    /// The built-in village table with `other` as the catch-all label,
    /// used both for the fallback and for the officetel exclusion.
    pub fn builtin_with_other(other: &str) -> Self {
        let mut rules = Vec::with_capacity(VILLAGE_TOKENS.len() + 2);

        // "우빈가온" contains "가온" but is an officetel, not part of 가온마을.
        rules.push(SubAreaRule::new(other, &["우빈가온"]));
        for (token, village) in VILLAGE_TOKENS {
            rules.push(SubAreaRule::new(village, &[token]));
        }
        // 도담동 complexes carry the 도담 prefix but belong to 도램마을.
        rules.push(SubAreaRule::new("도램마을", &["도담"]));

        Self::new(rules, other)
    }

    pub fn rules(&self) -> &[SubAreaRule] {
        &self.rules
    }

    pub fn other(&self) -> &str {
        &self.other
    }

    pub fn classify(&self, complex_name: &str) -> &str {
        let name = complex_name.trim();
        self.rules
            .iter()
            .find(|r| r.matches(name))
            .map(|r| r.name.as_str())
            .unwrap_or(self.other.as_str())
    }

    /// Every label lookup can produce, in table order, with "other" last.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for rule in &self.rules {
            if rule.name != self.other && !names.contains(&rule.name) {
                names.push(rule.name.clone());
            }
        }
        names.push(self.other.clone());
        names
    }
}
