//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{
    ChartData, ChartPlotter, TrendSeries, COUNTRY_CHART_TITLE, POU_AXIS_LABEL, REGION_CHART_TITLE,
};
pub use renderer::{RenderError, StaticChartRenderer};
