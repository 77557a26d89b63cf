//! Aggregation engine.
//!
//! Stateless functions over enriched observations. Inputs are borrowed and
//! never mutated; degenerate inputs (an empty slice, a window without data,
//! a region without countries) yield an empty `Vec`, `None` or 0 rather than
//! an error.

pub mod anomaly;
pub mod breaks;
pub mod cache;
pub mod distribution;
pub mod era;
pub mod filter;
pub mod metric;
pub mod movers;
pub mod pivot;
pub mod regional;
pub mod risk;
pub mod stats;
pub mod timeline;
pub mod volatility;

pub use anomaly::{Anomaly, AnomalyRadar, anomaly_radar};
pub use breaks::{BreakPoint, detect_breaks};
pub use cache::PivotCache;
pub use distribution::{DistributionSummary, SpreadPoint, percentile_spread, summarize_distribution};
pub use era::{decade_summary, era_benchmarks, era_leaderboard, era_statistics, era_trajectories};
pub use filter::{DataFilter, latest_period, period_slice};
pub use metric::{GroupKey, Metric, Unit, group_aggregate};
pub use movers::{alerts, historical_movers, month_over_month_movers, policy_kpis, record_board};
pub use pivot::{
    CorrelationMatrix, Pivot, PivotKey, correlation_matrix, country_pivot, pivot, region_heatmap,
    sharpest_swing,
};
pub use regional::{
    DrillRow, RegionKpis, RegionalHotspot, concentration_table, hotspot_share, persistence_ranking,
    region_drill_table, region_kpis, regional_averages, regional_hotspots, threshold_share_by_region,
};
pub use risk::{RiskScore, risk_scores};
pub use timeline::{dataset_overview, focus_countries, global_timeline, trend_series};
pub use volatility::{VolatilityPoint, latest_volatility, level_vs_volatility, rolling_volatility};
