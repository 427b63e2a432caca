use proptest::prelude::*;

use ui::core::aggregate::{cross_tabulate, group_by, stack, Reduction};
use ui::core::ordering::CanonicalOrdering;

#[derive(Debug, Clone)]
struct Row {
    outer: String,
    inner: String,
    weight: Option<f64>,
}

fn weight(row: &Row) -> Option<f64> {
    row.weight
}

fn outer_ordering() -> CanonicalOrdering {
    CanonicalOrdering::new("outer", ["a", "b", "c", "d"])
}

fn inner_ordering() -> CanonicalOrdering {
    CanonicalOrdering::new("inner", ["p", "q", "r"])
}

/// Keys mostly from the orderings, sometimes outside them.
fn rows() -> impl Strategy<Value = Vec<Row>> {
    let outer = prop_oneof![
        4 => prop::sample::select(vec!["a", "b", "c", "d"]),
        1 => prop::sample::select(vec!["x", "y"]),
    ];
    let inner = prop::sample::select(vec!["p", "q", "r"]);
    let weight = prop::option::weighted(0.9, 0u32..10_000);
    prop::collection::vec((outer, inner, weight), 0..60).prop_map(|cells| {
        cells
            .into_iter()
            .map(|(outer, inner, weight)| Row {
                outer: outer.to_string(),
                inner: inner.to_string(),
                weight: weight.map(f64::from),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn counting_conserves_records(rows in rows()) {
        let result = group_by(&rows, |r| r.outer.as_str(), Reduction::Count, &outer_ordering());
        prop_assert_eq!(result.total() as usize, rows.len());
    }

    #[test]
    fn summing_conserves_defined_weights(rows in rows()) {
        let result = group_by(
            &rows,
            |r| r.outer.as_str(),
            Reduction::Sum(weight),
            &outer_ordering(),
        );
        let expected: f64 = rows.iter().filter_map(|r| r.weight).sum();
        prop_assert!((result.total() - expected).abs() < 1e-6);
    }

    #[test]
    fn ranked_groups_precede_unranked_in_rank_order(rows in rows()) {
        let ordering = outer_ordering();
        let result = group_by(&rows, |r| r.outer.as_str(), Reduction::Count, &ordering);

        let ranks: Vec<Option<i32>> = result
            .groups
            .iter()
            .map(|group| ordering.rank(&group.key).ok())
            .collect();
        let ranked: Vec<i32> = ranks.iter().map_while(|rank| *rank).collect();
        prop_assert!(ranked.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(ranks[ranked.len()..].iter().all(Option::is_none));
        prop_assert_eq!(result.unranked.len(), ranks.len() - ranked.len());
    }

    #[test]
    fn row_percentages_stay_within_bounds(rows in rows()) {
        let table = cross_tabulate(
            &rows,
            |r| r.outer.as_str(),
            |r| r.inner.as_str(),
            Reduction::Sum(weight),
            &outer_ordering(),
            &inner_ordering(),
        );

        for row in &table.rows {
            let percentages = row.percentages();
            prop_assert_eq!(percentages.len(), table.columns.len());
            for share in percentages.iter().flatten() {
                prop_assert!((0.0..=100.0 + 1e-9).contains(share), "{share}");
            }
            if row.total().is_some_and(|total| total > 0.0) {
                let sum: f64 = percentages.iter().flatten().sum();
                prop_assert!((sum - 100.0).abs() < 1e-6, "{sum}");
            }
        }
    }

    #[test]
    fn stacked_segments_are_contiguous(
        cells in prop::collection::vec(prop::option::of(0.0f64..100.0), 0..8)
    ) {
        let segments = stack(&cells);
        prop_assert_eq!(segments.len(), cells.len());

        let mut offset = 0.0;
        for segment in &segments {
            prop_assert!((segment.start - offset).abs() < 1e-9);
            offset += segment.width();
        }
        let total: f64 = cells.iter().flatten().sum();
        prop_assert!((offset - total).abs() < 1e-9);
    }
}
