pub mod analysis_report;
pub mod evaluation_panel;
pub mod history_chart;
pub mod resume_drop_zone;
pub mod verdict_badge;
