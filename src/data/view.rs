use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use super::model::{coerce_number, StateValue, Year, YearTable};

/// Year range offered when no dataset is loaded yet.
pub const FALLBACK_YEARS: RangeInclusive<Year> = 2006..=2019;

// ---------------------------------------------------------------------------
// Per-year projection
// ---------------------------------------------------------------------------

/// Project a raw dataset onto one year.
///
/// Keeps source order and drops rows with no field for `year`.
pub fn year_view(table: &YearTable, year: Year) -> Vec<StateValue> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let raw = row.field(year)?;
            Some(StateValue {
                state: row.state.clone(),
                value: coerce_number(raw),
            })
        })
        .collect()
}

/// Slider bounds for a set of available years.
pub fn year_span(years: &BTreeSet<Year>) -> RangeInclusive<Year> {
    match (years.first(), years.last()) {
        (Some(&lo), Some(&hi)) => lo..=hi,
        _ => FALLBACK_YEARS,
    }
}

// ---------------------------------------------------------------------------
// Joining the two views by state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub state: String,
    pub education: Option<f64>,
    pub income: Option<f64>,
}

impl JoinedRow {
    /// Both values, when both are present and finite.
    pub fn point(&self) -> Option<[f64; 2]> {
        match (self.education, self.income) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some([x, y]),
            _ => None,
        }
    }
}

/// Outer join on state name: education order first, then income-only states.
pub fn join_views(education: &[StateValue], income: &[StateValue]) -> Vec<JoinedRow> {
    let mut income_by_state: BTreeMap<&str, f64> = BTreeMap::new();
    for sv in income {
        income_by_state.entry(sv.state.as_str()).or_insert(sv.value);
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut rows = Vec::with_capacity(education.len().max(income.len()));

    for sv in education {
        if !seen.insert(sv.state.as_str()) {
            continue;
        }
        rows.push(JoinedRow {
            state: sv.state.clone(),
            education: Some(sv.value),
            income: income_by_state.get(sv.state.as_str()).copied(),
        });
    }
    for sv in income {
        if seen.insert(sv.state.as_str()) {
            rows.push(JoinedRow {
                state: sv.state.clone(),
                education: None,
                income: Some(sv.value),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::StateRow;

    fn sample() -> YearTable {
        YearTable::from_rows(vec![
            StateRow::new("Ohio").with_field(2006, "24.5").with_field(2007, "25.0"),
            StateRow::new("Texas").with_field(2006, "26.1"),
        ])
    }

    fn sv(state: &str, value: f64) -> StateValue {
        StateValue {
            state: state.to_string(),
            value,
        }
    }

    #[test]
    fn rows_without_the_year_are_dropped() {
        assert_eq!(year_view(&sample(), 2007), vec![sv("Ohio", 25.0)]);
    }

    #[test]
    fn all_rows_with_the_year_keep_source_order() {
        assert_eq!(
            year_view(&sample(), 2006),
            vec![sv("Ohio", 24.5), sv("Texas", 26.1)]
        );
    }

    #[test]
    fn unknown_year_gives_empty_view() {
        assert!(year_view(&sample(), 1999).is_empty());
        assert!(year_view(&YearTable::default(), 2006).is_empty());
    }

    #[test]
    fn non_numeric_cells_become_nan() {
        let table = YearTable::from_rows(vec![StateRow::new("Guam").with_field(2006, "n/a")]);
        let view = year_view(&table, 2006);
        assert_eq!(view.len(), 1);
        assert!(view[0].value.is_nan());
    }

    #[test]
    fn span_falls_back_without_years() {
        assert_eq!(year_span(&BTreeSet::new()), FALLBACK_YEARS);
        assert_eq!(year_span(&[2008, 2003, 2011].into_iter().collect()), 2003..=2011);
    }

    #[test]
    fn join_is_outer_and_ordered() {
        let education = vec![sv("Ohio", 25.0), sv("Texas", 26.1)];
        let income = vec![sv("Iowa", 31000.0), sv("Ohio", 33000.0)];
        let joined = join_views(&education, &income);

        let states: Vec<&str> = joined.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Ohio", "Texas", "Iowa"]);
        assert_eq!(joined[0].point(), Some([25.0, 33000.0]));
        assert_eq!(joined[1].income, None);
        assert_eq!(joined[2].education, None);
        assert_eq!(joined[2].point(), None);
    }

    #[test]
    fn nan_values_have_no_point() {
        let joined = join_views(&[sv("Ohio", f64::NAN)], &[sv("Ohio", 1.0)]);
        assert_eq!(joined[0].point(), None);
    }
}
