//! Period-by-series pivots and the correlation grid built on them.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::analytics::stats;
use crate::models::Observation;

/// What the pivot columns are keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PivotKey {
    /// One column per area label
    Country,
    /// One column per region label
    Region,
}

impl PivotKey {
    fn column<'a>(self, row: &'a Observation) -> &'a str {
        match self {
            Self::Country => &row.area_label,
            Self::Region => row.region.label(),
        }
    }
}

/// Mean value per (period, column), periods ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pivot {
    /// Row index, ascending
    pub periods: Vec<NaiveDate>,
    /// Column labels, ascending
    pub columns: Vec<String>,
    /// `cells[row][column]`, `None` where no observation exists
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Pivot {
    /// Whether the pivot has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Cell for a period and column label
    #[must_use]
    pub fn get(&self, period: NaiveDate, column: &str) -> Option<f64> {
        let row = self.periods.binary_search(&period).ok()?;
        let col = self.columns.iter().position(|c| c == column)?;
        self.cells[row][col]
    }

    /// One column as a series aligned with `periods`
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.cells.iter().map(|row| row[index]).collect()
    }

    /// Mean of the populated cells in each row, aligned with `periods`
    #[must_use]
    pub fn row_means(&self) -> Vec<Option<f64>> {
        self.cells
            .iter()
            .map(|row| {
                let values: Vec<f64> = row.iter().flatten().copied().collect();
                stats::mean(&values)
            })
            .collect()
    }
}

/// Period whose row mean moved furthest from the previous row's mean
///
/// Returns the later period of the pair with the absolute change. Ties keep
/// the earliest period; rows without a mean break the chain on both sides.
#[must_use]
pub fn sharpest_swing(pivot: &Pivot) -> Option<(NaiveDate, f64)> {
    let means = pivot.row_means();
    let mut best: Option<(NaiveDate, f64)> = None;
    for (index, pair) in means.windows(2).enumerate() {
        let (Some(before), Some(after)) = (pair[0], pair[1]) else {
            continue;
        };
        let swing = (after - before).abs();
        if best.is_none_or(|(_, current)| swing > current) {
            best = Some((pivot.periods[index + 1], swing));
        }
    }
    best
}

/// Pivot `rows` by period and `key`, averaging duplicates
#[must_use]
pub fn pivot(rows: &[Observation], key: PivotKey) -> Pivot {
    let mut sums: BTreeMap<NaiveDate, BTreeMap<&str, (f64, usize)>> = BTreeMap::new();
    let mut columns: BTreeMap<&str, usize> = BTreeMap::new();

    for row in rows {
        let column = key.column(row);
        columns.insert(column, 0);
        let cell = sums.entry(row.period).or_default().entry(column).or_insert((0.0, 0));
        cell.0 += row.value;
        cell.1 += 1;
    }
    for (index, slot) in columns.values_mut().enumerate() {
        *slot = index;
    }

    let mut cells = Vec::with_capacity(sums.len());
    for by_column in sums.values() {
        let mut line = vec![None; columns.len()];
        for (column, (sum, count)) in by_column {
            line[columns[column]] = Some(sum / *count as f64);
        }
        cells.push(line);
    }

    Pivot {
        periods: sums.keys().copied().collect(),
        columns: columns.keys().map(|c| (*c).to_string()).collect(),
        cells,
    }
}

/// Mean value per (period, country label)
#[must_use]
pub fn country_pivot(rows: &[Observation]) -> Pivot {
    pivot(rows, PivotKey::Country)
}

/// Mean value per (period, region) over the `months` before `reference`
///
/// Covers periods from `reference - months` through `reference`.
#[must_use]
pub fn region_heatmap(rows: &[Observation], reference: NaiveDate, months: u32) -> Pivot {
    let Some(start) = reference.checked_sub_months(Months::new(months)) else {
        return Pivot::default();
    };
    let recent: Vec<Observation> = rows
        .iter()
        .filter(|row| row.period >= start && row.period <= reference)
        .cloned()
        .collect();
    pivot(&recent, PivotKey::Region)
}

/// Pairwise correlation between pivot columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Series labels
    pub labels: Vec<String>,
    /// `values[i][j]`, `None` where the pair has too little overlap or variance
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Most positively correlated pair of distinct series
    #[must_use]
    pub fn strongest_pair(&self) -> Option<(&str, &str, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..self.labels.len() {
            for j in (i + 1)..self.labels.len() {
                if let Some(value) = self.values[i][j] {
                    if best.is_none_or(|(_, _, current)| value > current) {
                        best = Some((i, j, value));
                    }
                }
            }
        }
        best.map(|(i, j, value)| (self.labels[i].as_str(), self.labels[j].as_str(), value))
    }
}

/// Pearson correlation of every column pair over the periods both observe
#[must_use]
pub fn correlation_matrix(pivot: &Pivot) -> CorrelationMatrix {
    let series: Vec<Vec<Option<f64>>> = (0..pivot.columns.len()).map(|c| pivot.column(c)).collect();
    let n = series.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series[i]
                .iter()
                .zip(&series[j])
                .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                .unzip();
            let r = stats::pearson(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: pivot.columns.clone(),
        values,
    }
}
