//! Data models for award nominations, movies and ranking metrics

pub mod award;
pub mod metric;
pub mod movie;

pub use award::AwardRecord;
pub use metric::{Metric, MetricValue};
pub use movie::{MovieRecord, MovieRow};
