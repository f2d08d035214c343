pub mod export;
pub mod merged_series;
pub mod point_lookup;
pub mod residuals;
