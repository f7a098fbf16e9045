use serde::Serialize;

use super::types::GrowthProjection;

/// Most points a chart series keeps before it is decimated.
pub const MAX_CHART_POINTS: usize = 10;

/// Age labels and balances for a line chart, already decimated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub labels: Vec<f64>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_projection(projection: &GrowthProjection) -> Self {
        let labels: Vec<f64> = projection.series.iter().map(|p| p.age).collect();
        let values: Vec<f64> = projection.series.iter().map(|p| p.balance).collect();
        Self {
            labels: decimate(&labels),
            values: decimate(&values),
        }
    }
}

/// Keeps every `ceil(n / 10)`-th element starting at index 0.
pub fn decimate<T: Clone>(items: &[T]) -> Vec<T> {
    if items.len() <= MAX_CHART_POINTS {
        return items.to_vec();
    }
    let step = items.len().div_ceil(MAX_CHART_POINTS);
    items.iter().step_by(step).cloned().collect()
}
