//! Canonical orderings for categorical axes.
//!
//! Survey answers are ordinal ("Strongly disagree" … "Strongly agree"), so
//! every chart sorts its categories by an explicit rank table instead of by
//! encounter or alphabetical order. A value without a rank is a data error;
//! lookups report it instead of guessing a position.

use std::collections::HashMap;

use super::error::OrderingError;

pub const LONELINESS_LEVELS: [&str; 3] = [
    "Always or often feels lonely",
    "Sometimes feels lonely",
    "Rarely or never feels lonely",
];

pub const AGREEMENT_LEVELS: [&str; 6] = [
    "Strongly disagree",
    "Disagree",
    "Slightly disagree",
    "Slightly agree",
    "Agree",
    "Strongly agree",
];

pub const NOT_APPLICABLE: &str = "Does not apply to my current situation";

pub const COVID_SITUATIONS: [&str; 4] = [
    "Life carries on as usual",
    "Life carries on with minor changes",
    "Isolated",
    "Isolated in medical facility of similar location",
];

pub const STRESS_DOMAIN: [&str; 5] = [
    "Very stressed",
    "Fairly stressed",
    "Sometimes stressed",
    "Almost never stressed",
    "Never stressed",
];

pub const INDOORS_DOMAIN: [&str; 6] = [
    "Never indoors",
    "Seldom indoors",
    "Sometimes indoors",
    "Frequently indoors",
    "Mostly indoors",
    "Always indoors",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalOrdering {
    name: &'static str,
    ranks: HashMap<String, i32>,
    keys: Vec<String>,
}

impl CanonicalOrdering {
    /// Ranks `keys` by position, starting at zero.
    pub fn new<I, S>(name: &'static str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_ranks(
            name,
            keys.into_iter()
                .zip(0..)
                .map(|(key, rank)| (key.into(), rank)),
        )
    }

    /// Explicit rank table. Ranks need not be contiguous; ties keep the
    /// order in which they were given.
    pub fn from_ranks<I, S>(name: &'static str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let mut ranked: Vec<(String, i32)> =
            pairs.into_iter().map(|(key, rank)| (key.into(), rank)).collect();
        ranked.sort_by_key(|(_, rank)| *rank);

        let keys = ranked.iter().map(|(key, _)| key.clone()).collect();
        let ranks = ranked.into_iter().collect();
        Self { name, ranks, keys }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rank(&self, value: &str) -> Result<i32, OrderingError> {
        self.ranks
            .get(value)
            .copied()
            .ok_or_else(|| OrderingError::Unranked {
                ordering: self.name,
                value: value.to_string(),
            })
    }

    pub fn contains(&self, value: &str) -> bool {
        self.ranks.contains_key(value)
    }

    /// Keys in rank order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Three-point loneliness scale of the Statistics Canada table.
pub fn loneliness() -> CanonicalOrdering {
    CanonicalOrdering::new("loneliness", LONELINESS_LEVELS)
}

/// Agreement scale, ascending from "Strongly disagree".
pub fn agreement() -> CanonicalOrdering {
    CanonicalOrdering::new("agreement", AGREEMENT_LEVELS)
}

/// Distress columns of the dot chart: most distressed first.
pub fn distress() -> CanonicalOrdering {
    CanonicalOrdering::new("distress", AGREEMENT_LEVELS.iter().rev().copied())
}

/// Node order of the loneliness → COVID isolation sankey.
pub fn sankey_attributes() -> CanonicalOrdering {
    CanonicalOrdering::new(
        "sankey attribute",
        std::iter::once(NOT_APPLICABLE)
            .chain(AGREEMENT_LEVELS)
            .chain(COVID_SITUATIONS),
    )
}

pub fn stress_domain() -> CanonicalOrdering {
    CanonicalOrdering::new("stress", STRESS_DOMAIN)
}

pub fn indoors_domain() -> CanonicalOrdering {
    CanonicalOrdering::new("time indoors", INDOORS_DOMAIN)
}

/// Trust in others, rated 0 to 10.
pub fn trust_domain() -> CanonicalOrdering {
    CanonicalOrdering::new("trust", (0..=10).map(|score| score.to_string()))
}

pub fn gender() -> CanonicalOrdering {
    CanonicalOrdering::new("gender", ["Men", "Women"])
}

pub fn education() -> CanonicalOrdering {
    CanonicalOrdering::new(
        "education",
        [
            "No certificate, diploma or degree",
            "Secondary (high) school diploma or equivalency certificate",
            "Apprenticeship or trades certificate or diploma",
            "College, CEGEP or other non-university certificate or diploma",
            "Bachelor's degree or higher",
        ],
    )
}

pub fn urbanization() -> CanonicalOrdering {
    CanonicalOrdering::new("urbanization", ["Rural areas", "Urban areas"])
}

pub fn immigration() -> CanonicalOrdering {
    CanonicalOrdering::new("immigration", ["Immigrants", "Non-immigrants"])
}

pub fn work() -> CanonicalOrdering {
    CanonicalOrdering::new(
        "work",
        [
            "Working at a paid job or business",
            "Retired",
            "Other activity",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_position() {
        let ordering = loneliness();
        assert_eq!(ordering.rank("Always or often feels lonely"), Ok(0));
        assert_eq!(ordering.rank("Rarely or never feels lonely"), Ok(2));
    }

    #[test]
    fn missing_value_is_reported() {
        let err = agreement().rank("Neutral").unwrap_err();
        assert_eq!(
            err,
            OrderingError::Unranked {
                ordering: "agreement",
                value: "Neutral".into()
            }
        );
    }

    #[test]
    fn explicit_ranks_sort_keys() {
        let ordering = CanonicalOrdering::from_ranks("custom", [("b", 5), ("a", -1), ("c", 9)]);
        assert_eq!(ordering.keys(), ["a", "b", "c"]);
    }

    #[test]
    fn distress_puts_strong_agreement_first() {
        let ordering = distress();
        assert_eq!(ordering.keys()[0], "Strongly agree");
        assert_eq!(ordering.keys()[5], "Strongly disagree");
    }

    #[test]
    fn sankey_ordering_covers_both_columns() {
        let ordering = sankey_attributes();
        assert_eq!(ordering.len(), 11);
        assert_eq!(ordering.rank(NOT_APPLICABLE), Ok(0));
        assert_eq!(ordering.rank("Isolated"), Ok(9));
    }
}
