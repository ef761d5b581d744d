#![deny(unsafe_code)]

pub mod analysis;
pub mod catalog;
pub mod cell;
pub mod charts;
pub mod error;
pub mod mapping;
pub mod table;

pub use analysis::{
    AnalysisResult, CategoryCount, CorrelationData, Distributions, Kpi, NumericSummary, StrongPair,
};
pub use catalog::FieldDef;
pub use cell::{Cell, format_number};
pub use charts::{ChartData, ChartSpec, TrendLine};
pub use error::{ConfigError, LoadError};
pub use mapping::{ColumnKind, ColumnMapping, ColumnProfile, MappingConfig};
pub use table::{Column, Table};
