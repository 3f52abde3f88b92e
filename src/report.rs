// Report rendering module
//
// Two independent outputs are produced from the same table:
// - chart: monthly totals line chart (SVG)
// - html: static report document embedding every view plus the chart

pub mod chart;
pub mod html;

pub use chart::{render_monthly_totals, ChartError};
pub use html::{generate_html, ReportView};
