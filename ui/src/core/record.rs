//! Survey record shapes and the shared, immutable dataset container.

use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

/// One row of the Statistics Canada loneliness table (`dataset1.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SurveyRow {
    #[serde(rename = "ID")]
    pub id: String,
    pub gender: String,
    pub category: String,
    pub value: String,
    #[serde(rename = "indicators")]
    pub loneliness: String,
    #[serde(deserialize_with = "lenient_int")]
    pub amount: Option<i64>,
    #[serde(rename = "STATUS", default)]
    pub status: String,
}

impl SurveyRow {
    /// Weight accessor used by sum reductions.
    pub fn weight(&self) -> Option<f64> {
        self.amount.map(|amount| amount as f64)
    }
}

/// One respondent of the COVID-19 wellbeing questionnaire (`dataset2-output.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WellbeingResponse {
    #[serde(rename = "BFF_15_5")]
    pub extravert: String,
    #[serde(rename = "BFF_15_6")]
    pub introvert: String,
    #[serde(rename = "Dem_islolation")]
    pub covid: String,
    #[serde(rename = "Scale_PSS10_UCLA_13")]
    pub isolation: String,
    #[serde(rename = "Scale_PSS10_UCLA_3")]
    pub stress: String,
    #[serde(rename = "Expl_Distress_18")]
    pub distress: String,
    #[serde(rename = "Expl_Distress_19")]
    pub inside: String,
    #[serde(rename = "OECD_people_1", deserialize_with = "lenient_int")]
    pub trust: Option<i64>,
}

/// Coerce a raw cell into an integer the way a lenient numeric parser would:
/// surrounding whitespace is ignored, an optional sign and the leading run of
/// digits are taken, everything after is dropped. Cells without leading
/// digits yield `None`, the "undefined" sentinel.
pub fn coerce_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(coerce_int(&raw))
}

/// An ordered, shared sequence of records.
///
/// Records are reference counted so filtered views share rows with the
/// dataset they came from; nothing is ever mutated in place.
#[derive(Debug)]
pub struct Dataset<R> {
    rows: Rc<[Rc<R>]>,
}

impl<R> Dataset<R> {
    pub fn new(rows: Vec<R>) -> Self {
        rows.into_iter().map(Rc::new).collect()
    }

    pub fn empty() -> Self {
        Self { rows: Rc::from([]) }
    }

    /// Returns a new dataset with the rows that satisfy `keep`.
    pub fn filter(&self, mut keep: impl FnMut(&R) -> bool) -> Self {
        self.rows
            .iter()
            .filter(|row| keep(row))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().map(|row| row.as_ref())
    }
}

impl<R> Clone for Dataset<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Rc::clone(&self.rows),
        }
    }
}

impl<R> Default for Dataset<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: PartialEq> PartialEq for Dataset<R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.rows, &other.rows)
            || (self.len() == other.len() && self.iter().eq(other.iter()))
    }
}

impl<R> FromIterator<Rc<R>> for Dataset<R> {
    fn from_iter<I: IntoIterator<Item = Rc<R>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<R> Deref for Dataset<R> {
    type Target = [Rc<R>];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_int_takes_leading_digits() {
        assert_eq!(coerce_int("42"), Some(42));
        assert_eq!(coerce_int(" 17 "), Some(17));
        assert_eq!(coerce_int("12.7"), Some(12));
        assert_eq!(coerce_int("8 people"), Some(8));
        assert_eq!(coerce_int("-3"), Some(-3));
    }

    #[test]
    fn coerce_int_rejects_non_numeric() {
        assert_eq!(coerce_int(""), None);
        assert_eq!(coerce_int("F"), None);
        assert_eq!(coerce_int(".."), None);
        assert_eq!(coerce_int("-"), None);
    }

    #[test]
    fn filter_produces_a_new_sequence_sharing_rows() {
        let dataset = Dataset::new(vec![1, 2, 3, 4]);
        let even = dataset.filter(|n| n % 2 == 0);

        assert_eq!(even.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(dataset.len(), 4);
        assert!(Rc::ptr_eq(&dataset[1], &even[0]));
    }
}
