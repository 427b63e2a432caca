//! Aggregation engine: group-by, cross-tabulation and percentage breakdowns.
//!
//! Every function here is a pure function of its inputs. Groups always come
//! out sorted by a [`CanonicalOrdering`]; observed keys that the ordering does
//! not know are logged, reported in the result and appended after the ranked
//! groups in encounter order.

use std::collections::HashMap;

use super::error::AggregateError;
use super::ordering::CanonicalOrdering;
use super::record::WellbeingResponse;

/// How the records of one group collapse into a number.
pub enum Reduction<R> {
    /// Number of records. Always defined.
    Count,
    /// Sum of a weight. Undefined weights are skipped; a group without any
    /// defined weight is itself undefined.
    Sum(fn(&R) -> Option<f64>),
}

impl<R> Clone for Reduction<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Reduction<R> {}

impl<R> Reduction<R> {
    fn reduce<'a>(self, records: impl IntoIterator<Item = &'a R>) -> Option<f64>
    where
        R: 'a,
    {
        match self {
            Reduction::Count => Some(records.into_iter().count() as f64),
            Reduction::Sum(weight) => records
                .into_iter()
                .filter_map(weight)
                .fold(None, |acc, value| Some(acc.unwrap_or(0.0) + value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateGroup {
    pub key: String,
    /// `None` when the group has no defined weight.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub ordering: &'static str,
    pub groups: Vec<AggregateGroup>,
    /// Observed keys without a rank, in encounter order. Their groups sit at
    /// the end of `groups`.
    pub unranked: Vec<String>,
}

impl Aggregation {
    pub fn is_complete(&self) -> bool {
        self.unranked.is_empty()
    }

    /// Refuse the degraded ordering.
    pub fn into_strict(self) -> Result<Vec<AggregateGroup>, AggregateError> {
        if self.unranked.is_empty() {
            Ok(self.groups)
        } else {
            Err(AggregateError::Unranked {
                ordering: self.ordering,
                keys: self.unranked,
            })
        }
    }

    pub fn get(&self, key: &str) -> Option<&AggregateGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.groups
            .iter()
            .filter_map(|group| group.value)
            .fold(None, |max, value| Some(max.map_or(value, |m: f64| m.max(value))))
    }

    pub fn total(&self) -> f64 {
        self.groups.iter().filter_map(|group| group.value).sum()
    }
}

/// Group `records` by `key`, reduce each group and sort by `ordering`.
pub fn group_by<'a, R, I, K>(
    records: I,
    key: K,
    reduction: Reduction<R>,
    ordering: &CanonicalOrdering,
) -> Aggregation
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Fn(&R) -> &str,
{
    let (partitions, unranked) = ordered_partitions(partition(records, key), ordering);
    let groups = partitions
        .into_iter()
        .map(|(key, members)| AggregateGroup {
            key,
            value: reduction.reduce(members),
        })
        .collect();

    Aggregation {
        ordering: ordering.name(),
        groups,
        unranked,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossTabRow {
    pub key: String,
    /// One cell per column of the owning [`CrossTab`]. `None` means no data,
    /// which is not the same as a zero count.
    pub cells: Vec<Option<f64>>,
}

impl CrossTabRow {
    /// Sum of the defined cells, `None` if every cell is missing.
    pub fn total(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .fold(None, |acc, value| Some(acc.unwrap_or(0.0) + value))
    }

    /// Each cell as a percentage of the row's own total.
    pub fn percentages(&self) -> Vec<Option<f64>> {
        match self.total() {
            Some(total) => self.percentages_of(total),
            None => vec![None; self.cells.len()],
        }
    }

    /// Each cell as a percentage of `total`. A zero or non-finite
    /// denominator leaves every cell undefined.
    pub fn percentages_of(&self, total: f64) -> Vec<Option<f64>> {
        if total == 0.0 || !total.is_finite() {
            return vec![None; self.cells.len()];
        }
        self.cells
            .iter()
            .map(|cell| cell.map(|value| value / total * 100.0))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    /// Inner keys: every key of the inner ordering, followed by any
    /// unranked inner keys that were observed.
    pub columns: Vec<String>,
    pub rows: Vec<CrossTabRow>,
    pub unranked: Vec<String>,
}

impl CrossTab {
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == key)
    }

    pub fn row(&self, key: &str) -> Option<&CrossTabRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn cell(&self, row: &str, column: &str) -> Option<f64> {
        let index = self.column_index(column)?;
        self.row(row).and_then(|row| row.cells[index])
    }
}

/// Two-level aggregation: rows by `outer`, columns by `inner`.
pub fn cross_tabulate<'a, R, I, O, N>(
    records: I,
    outer: O,
    inner: N,
    reduction: Reduction<R>,
    outer_ordering: &CanonicalOrdering,
    inner_ordering: &CanonicalOrdering,
) -> CrossTab
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    O: Fn(&R) -> &str,
    N: Fn(&R) -> &str,
{
    let (partitions, mut unranked) = ordered_partitions(partition(records, outer), outer_ordering);

    let mut columns: Vec<String> = inner_ordering.keys().to_vec();
    let mut row_cells: Vec<(String, HashMap<String, Option<f64>>)> = Vec::new();

    for (key, members) in partitions {
        let mut cells = HashMap::new();
        for (inner_key, inner_members) in partition(members, &inner) {
            if !inner_ordering.contains(&inner_key) && !columns.contains(&inner_key) {
                tracing::error!(
                    ordering = inner_ordering.name(),
                    value = %inner_key,
                    "cross-tab column has no canonical rank; appending it last"
                );
                columns.push(inner_key.clone());
                unranked.push(inner_key.clone());
            }
            cells.insert(inner_key, reduction.reduce(inner_members));
        }
        row_cells.push((key, cells));
    }

    let rows = row_cells
        .into_iter()
        .map(|(key, mut cells)| CrossTabRow {
            key,
            cells: columns
                .iter()
                .map(|column| cells.remove(column).flatten())
                .collect(),
        })
        .collect();

    CrossTab {
        columns,
        rows,
        unranked,
    }
}

/// One bar segment of a 100% stacked row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSegment {
    pub column: usize,
    pub start: f64,
    /// `None` for a missing cell; the segment then has zero width.
    pub end: Option<f64>,
}

impl StackSegment {
    pub fn width(&self) -> f64 {
        self.end.map_or(0.0, |end| end - self.start)
    }
}

/// Stack cells left to right. Missing cells do not advance the offset.
pub fn stack(cells: &[Option<f64>]) -> Vec<StackSegment> {
    let mut offset = 0.0;
    cells
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            let start = offset;
            let end = cell.map(|value| start + value);
            if let Some(end) = end {
                offset = end;
            }
            StackSegment { column, start, end }
        })
        .collect()
}

/// Answers to "how often do you feel isolated" that count as isolated.
pub const ISOLATED_ANSWERS: [&str; 3] = ["Very often", "Fairly often", "Sometimes"];

/// The average line also counts the plain "Often" answer.
const AVERAGE_ISOLATED_ANSWERS: [&str; 4] = ["Very often", "Often", "Fairly often", "Sometimes"];

pub fn is_isolated(response: &WellbeingResponse) -> bool {
    ISOLATED_ANSWERS.contains(&response.isolation.as_str())
}

/// Share of isolated respondents over the whole dataset.
pub fn isolation_average<'a>(
    responses: impl IntoIterator<Item = &'a WellbeingResponse>,
) -> Option<f64> {
    let (total, isolated) = responses.into_iter().fold((0usize, 0usize), |(n, k), r| {
        let hit = AVERAGE_ISOLATED_ANSWERS.contains(&r.isolation.as_str());
        (n + 1, k + usize::from(hit))
    });
    (total > 0).then(|| isolated as f64 / total as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainShare {
    pub label: String,
    pub total: usize,
    pub isolated: usize,
}

impl DomainShare {
    /// Isolated fraction in `0.0..=1.0`, undefined for an empty bucket.
    pub fn share(&self) -> Option<f64> {
        (self.total > 0).then(|| self.isolated as f64 / self.total as f64)
    }
}

/// Isolation share per value of `domain`. `attribute` maps a response onto
/// a domain value; responses that map outside the domain are skipped.
pub fn isolation_shares<'a, I, A>(
    responses: I,
    attribute: A,
    domain: &CanonicalOrdering,
) -> Vec<DomainShare>
where
    I: IntoIterator<Item = &'a WellbeingResponse>,
    A: Fn(&WellbeingResponse) -> Option<String>,
{
    let mut buckets: Vec<DomainShare> = domain
        .keys()
        .iter()
        .map(|label| DomainShare {
            label: label.clone(),
            total: 0,
            isolated: 0,
        })
        .collect();

    for response in responses {
        let Some(value) = attribute(response) else {
            continue;
        };
        let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.label == value) else {
            tracing::debug!(
                domain = domain.name(),
                value = %value,
                "skipping value outside domain"
            );
            continue;
        };
        bucket.total += 1;
        if is_isolated(response) {
            bucket.isolated += 1;
        }
    }

    buckets
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: usize,
}

/// Distress → COVID situation flows of the sankey diagram.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flows {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    pub links: Vec<FlowLink>,
    pub unranked: Vec<String>,
}

impl Flows {
    pub fn total(&self) -> usize {
        self.links.iter().map(|link| link.value).sum()
    }
}

pub fn sankey_flows<'a>(
    responses: impl IntoIterator<Item = &'a WellbeingResponse>,
    ordering: &CanonicalOrdering,
) -> Flows {
    // Single-character COVID answers are stray codes in the export.
    let kept: Vec<&WellbeingResponse> = responses
        .into_iter()
        .filter(|r| r.covid.chars().count() > 1)
        .collect();

    let (sources, mut unranked) = ordered_partitions(
        partition(kept.iter().copied(), |r: &WellbeingResponse| r.distress.as_str()),
        ordering,
    );
    let (targets, target_unranked) = ordered_partitions(
        partition(kept.iter().copied(), |r: &WellbeingResponse| r.covid.as_str()),
        ordering,
    );
    unranked.extend(target_unranked);

    let mut links = Vec::new();
    for (source, members) in &sources {
        for (target, _) in &targets {
            let value = members.iter().filter(|r| &r.covid == target).count();
            if value > 0 {
                links.push(FlowLink {
                    source: source.clone(),
                    target: target.clone(),
                    value,
                });
            }
        }
    }

    Flows {
        sources: sources.into_iter().map(|(key, _)| key).collect(),
        targets: targets.into_iter().map(|(key, _)| key).collect(),
        links,
        unranked,
    }
}

type Partition<'a, R> = (String, Vec<&'a R>);

/// Split records by key, keeping first-encounter order of the keys.
fn partition<'a, R, I, K>(records: I, key: K) -> Vec<Partition<'a, R>>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Fn(&R) -> &str,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut parts: Vec<Partition<'a, R>> = Vec::new();

    for record in records {
        let value = key(record);
        match index.get(value) {
            Some(&slot) => parts[slot].1.push(record),
            None => {
                index.insert(value.to_string(), parts.len());
                parts.push((value.to_string(), vec![record]));
            }
        }
    }

    parts
}

/// Sort partitions by rank. Unranked keys are logged and kept at the end in
/// encounter order.
fn ordered_partitions<'a, R>(
    parts: Vec<Partition<'a, R>>,
    ordering: &CanonicalOrdering,
) -> (Vec<Partition<'a, R>>, Vec<String>) {
    let mut ranked = Vec::with_capacity(parts.len());
    let mut rest = Vec::new();

    for part in parts {
        match ordering.rank(&part.0) {
            Ok(rank) => ranked.push((rank, part)),
            Err(err) => {
                tracing::error!("{err}; placing it after the ranked groups");
                rest.push(part);
            }
        }
    }

    ranked.sort_by_key(|(rank, _)| *rank);
    let unranked = rest.iter().map(|(key, _)| key.clone()).collect();
    let ordered = ranked.into_iter().map(|(_, part)| part).chain(rest).collect();
    (ordered, unranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ordering;

    #[derive(Debug)]
    struct Row {
        key: &'static str,
        inner: &'static str,
        weight: Option<f64>,
    }

    fn row(key: &'static str, inner: &'static str, weight: Option<f64>) -> Row {
        Row { key, inner, weight }
    }

    fn weight(row: &Row) -> Option<f64> {
        row.weight
    }

    fn abc() -> CanonicalOrdering {
        CanonicalOrdering::new("abc", ["A", "B", "C"])
    }

    #[test]
    fn sums_weights_per_key_in_canonical_order() {
        let rows = [
            row("A", "p", Some(3.0)),
            row("B", "p", Some(5.0)),
            row("A", "p", Some(2.0)),
        ];
        let ordering = CanonicalOrdering::new("ab", ["A", "B"]);
        let result = group_by(&rows, |r| r.key, Reduction::Sum(weight), &ordering);

        assert_eq!(
            result.groups,
            vec![
                AggregateGroup { key: "A".into(), value: Some(5.0) },
                AggregateGroup { key: "B".into(), value: Some(5.0) },
            ]
        );
        assert!(result.is_complete());
    }

    #[test]
    fn encounter_order_does_not_leak_into_output() {
        let rows = [row("C", "p", None), row("A", "p", None), row("B", "p", None)];
        let result = group_by(&rows, |r| r.key, Reduction::Count, &abc());
        let keys: Vec<_> = result.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C"]);
    }

    #[test]
    fn unranked_keys_degrade_to_the_end() {
        let rows = [row("Z", "p", Some(1.0)), row("B", "p", Some(1.0)), row("Y", "p", Some(1.0))];
        let result = group_by(&rows, |r| r.key, Reduction::Sum(weight), &abc());

        let keys: Vec<_> = result.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["B", "Z", "Y"]);
        assert_eq!(result.unranked, ["Z", "Y"]);

        let err = result.into_strict().unwrap_err();
        assert_eq!(
            err,
            AggregateError::Unranked {
                ordering: "abc",
                keys: vec!["Z".into(), "Y".into()]
            }
        );
    }

    #[test]
    fn group_without_defined_weights_is_undefined() {
        let rows = [row("A", "p", None), row("B", "p", Some(0.0))];
        let result = group_by(&rows, |r| r.key, Reduction::Sum(weight), &abc());
        assert_eq!(result.get("A").unwrap().value, None);
        assert_eq!(result.get("B").unwrap().value, Some(0.0));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let rows: [Row; 0] = [];
        let result = group_by(&rows, |r| r.key, Reduction::Count, &abc());
        assert!(result.groups.is_empty());
        assert_eq!(result.max_value(), None);
    }

    #[test]
    fn cross_tab_marks_missing_cells_as_undefined() {
        let rows = [
            row("A", "p", Some(10.0)),
            row("A", "r", Some(5.0)),
            row("B", "q", Some(0.0)),
        ];
        let inner = CanonicalOrdering::new("pqr", ["p", "q", "r"]);
        let table = cross_tabulate(
            &rows,
            |r| r.key,
            |r| r.inner,
            Reduction::Sum(weight),
            &abc(),
            &inner,
        );

        assert_eq!(table.columns, ["p", "q", "r"]);
        assert_eq!(table.rows[0].cells, vec![Some(10.0), None, Some(5.0)]);
        assert_eq!(table.rows[1].cells, vec![None, Some(0.0), None]);
        assert_eq!(table.cell("B", "q"), Some(0.0));
        assert_eq!(table.cell("B", "p"), None);
    }

    #[test]
    fn cross_tab_appends_unranked_columns() {
        let rows = [row("A", "p", Some(1.0)), row("A", "x", Some(2.0))];
        let inner = CanonicalOrdering::new("pq", ["p", "q"]);
        let table = cross_tabulate(
            &rows,
            |r| r.key,
            |r| r.inner,
            Reduction::Sum(weight),
            &abc(),
            &inner,
        );

        assert_eq!(table.columns, ["p", "q", "x"]);
        assert_eq!(table.unranked, ["x"]);
        assert_eq!(table.rows[0].cells, vec![Some(1.0), None, Some(2.0)]);
    }

    #[test]
    fn percentages_over_observed_total() {
        let row = CrossTabRow {
            key: "G1".into(),
            cells: vec![Some(10.0), None, Some(5.0)],
        };
        let pct = row.percentages();

        assert!((pct[0].unwrap() - 66.666).abs() < 0.01);
        assert_eq!(pct[1], None);
        assert!((pct[2].unwrap() - 33.333).abs() < 0.01);
        let sum: f64 = pct.iter().flatten().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_denominator_fails_closed() {
        let row = CrossTabRow {
            key: "G".into(),
            cells: vec![Some(0.0), Some(0.0)],
        };
        assert_eq!(row.percentages(), vec![None, None]);

        let empty = CrossTabRow {
            key: "G".into(),
            cells: vec![None, None],
        };
        assert_eq!(empty.percentages(), vec![None, None]);
    }

    #[test]
    fn external_denominator_leaves_room_for_missing_cells() {
        let row = CrossTabRow {
            key: "G".into(),
            cells: vec![Some(30.0), None, Some(20.0)],
        };
        let sum: f64 = row.percentages_of(80.0).iter().flatten().sum();
        assert!((sum - 62.5).abs() < 1e-9);
    }

    #[test]
    fn stack_skips_missing_segments() {
        let segments = stack(&[Some(40.0), None, Some(60.0)]);
        assert_eq!(segments[0], StackSegment { column: 0, start: 0.0, end: Some(40.0) });
        assert_eq!(segments[1], StackSegment { column: 1, start: 40.0, end: None });
        assert_eq!(segments[1].width(), 0.0);
        assert_eq!(segments[2], StackSegment { column: 2, start: 40.0, end: Some(100.0) });
    }

    fn response(isolation: &str, distress: &str, covid: &str, stress: &str) -> WellbeingResponse {
        WellbeingResponse {
            extravert: "Agree".into(),
            introvert: "Disagree".into(),
            covid: covid.into(),
            isolation: isolation.into(),
            stress: stress.into(),
            distress: distress.into(),
            inside: "Agree".into(),
            trust: Some(5),
        }
    }

    #[test]
    fn isolation_shares_skip_out_of_domain_values() {
        let responses = [
            response("Very often", "Agree", "Isolated", "Never"),
            response("Never", "Agree", "Isolated", "Never"),
            response("Sometimes", "Agree", "Isolated", "Sometimes"),
            response("Sometimes", "Agree", "Isolated", "Unsure"),
        ];
        let domain = CanonicalOrdering::new("stress", ["Never", "Sometimes"]);
        let shares = isolation_shares(&responses, |r| Some(r.stress.clone()), &domain);

        assert_eq!(shares[0].total, 2);
        assert_eq!(shares[0].isolated, 1);
        assert_eq!(shares[0].share(), Some(0.5));
        assert_eq!(shares[1].share(), Some(1.0));
    }

    #[test]
    fn empty_bucket_share_is_undefined() {
        let domain = CanonicalOrdering::new("stress", ["Never"]);
        let shares = isolation_shares(std::iter::empty(), |r| Some(r.stress.clone()), &domain);
        assert_eq!(shares[0].share(), None);
        assert_eq!(isolation_average(std::iter::empty()), None);
    }

    #[test]
    fn average_counts_plain_often() {
        let responses = [
            response("Often", "Agree", "Isolated", "Never"),
            response("Never", "Agree", "Isolated", "Never"),
        ];
        assert_eq!(isolation_average(&responses), Some(0.5));
    }

    #[test]
    fn sankey_flows_drop_stray_codes_and_order_nodes() {
        let responses = [
            response("Never", "Strongly agree", "Isolated", "Never"),
            response("Never", "Disagree", "Life carries on as usual", "Never"),
            response("Never", "Disagree", "Isolated", "Never"),
            response("Never", "Disagree", "1", "Never"),
        ];
        let flows = sankey_flows(&responses, &ordering::sankey_attributes());

        assert_eq!(flows.sources, ["Disagree", "Strongly agree"]);
        assert_eq!(flows.targets, ["Life carries on as usual", "Isolated"]);
        assert_eq!(flows.total(), 3);
        assert_eq!(
            flows.links[0],
            FlowLink {
                source: "Disagree".into(),
                target: "Life carries on as usual".into(),
                value: 1
            }
        );
    }
}
