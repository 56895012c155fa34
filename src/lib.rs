//! Figure data for the paper's charts.
//!
//! Run logs are loaded, smoothed and aligned into equal-length series
//! ([`data::align`]). Analytic curves are evaluated over fixed grids
//! ([`curves`]). Both end up in an explicit [`figure::Figure`] that is either
//! shown in an egui window or exported as a JSON document ([`render`]).

pub mod app;
pub mod color;
pub mod config;
pub mod curves;
pub mod data;
pub mod error;
pub mod figure;
pub mod figures;
pub mod render;
pub mod state;
pub mod ui;

pub use config::{Config, FigureKind};
pub use data::align::{align_from_source, align_series, exponential_smooth, rebase};
pub use data::loader::{RunDirectory, SeriesSource};
pub use data::model::{AlignParams, AlignedSeriesSet, NamedSeries};
pub use error::{FigureError, Result};
pub use figure::{Figure, RenderMode};
pub use figures::build_figure;
pub use render::render;
