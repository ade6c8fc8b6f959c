//! Score progress chart.
//!
//! Loads past attempt scores once when mounted and draws them as an inline
//! SVG line chart. Attempts are labelled by position only.

use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::{format_score, HistoryEntry};
use crate::request::{begin_in, settle_in, Tracked};

/// Labels and values of the score series, in attempt order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Pixel layout of the plot area inside the SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 520.0,
            height: 260.0,
            pad_left: 40.0,
            pad_right: 16.0,
            pad_top: 16.0,
            pad_bottom: 36.0,
        }
    }
}

impl ChartFrame {
    fn plot_width(&self) -> f64 {
        self.width - self.pad_left - self.pad_right
    }

    fn plot_height(&self) -> f64 {
        self.height - self.pad_top - self.pad_bottom
    }

    fn bottom(&self) -> f64 {
        self.height - self.pad_bottom
    }
}

impl ChartSeries {
    /// `None` for an empty history, which renders no chart at all.
    pub fn from_history(entries: &[HistoryEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            labels: (1..=entries.len()).map(|i| format!("Attempt {}", i)).collect(),
            values: entries.iter().map(|e| e.score).collect(),
        })
    }

    /// Value range of the y axis. At least 0..100, widened to fit outliers.
    pub fn y_range(&self) -> (f64, f64) {
        let lo = self.values.iter().copied().fold(0.0_f64, f64::min);
        let hi = self.values.iter().copied().fold(100.0_f64, f64::max);
        ((lo / 10.0).floor() * 10.0, (hi / 10.0).ceil() * 10.0)
    }

    pub fn x_at(&self, index: usize, frame: &ChartFrame) -> f64 {
        let n = self.values.len();
        if n <= 1 {
            return frame.pad_left + frame.plot_width() / 2.0;
        }
        frame.pad_left + frame.plot_width() * index as f64 / (n - 1) as f64
    }

    pub fn y_at(&self, value: f64, frame: &ChartFrame) -> f64 {
        let (lo, hi) = self.y_range();
        let t = (value - lo) / (hi - lo);
        frame.bottom() - frame.plot_height() * t
    }

    pub fn points(&self, frame: &ChartFrame) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.x_at(i, frame), self.y_at(v, frame)))
            .collect()
    }

    /// SVG `d` attribute joining every point with straight segments.
    pub fn path(&self, frame: &ChartFrame) -> String {
        self.points(frame)
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{} {:.1} {:.1}", cmd, x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Evenly spaced y-axis tick values, bottom to top.
    pub fn y_ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.y_range();
        let steps = count.max(1);
        (0..=steps)
            .map(|i| lo + (hi - lo) * i as f64 / steps as f64)
            .collect()
    }
}

/// Line chart of every past attempt's score.
#[component]
pub fn HistoryChart() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let history = RwSignal::new(Tracked::<Vec<HistoryEntry>>::new());

    // Load once on mount; the chart never refreshes afterwards.
    if let Some(id) = begin_in(history) {
        let client = ApiClient::new(config);
        spawn_local(async move {
            let outcome = client.history().await.map_err(|e| {
                warn!("Failed to load score history: {}", e);
                e.to_string()
            });
            settle_in(history, id, outcome);
        });
    }

    view! {
        {move || {
            history.with(|state| {
                if let Some(err) = state.error() {
                    return Some(view! {
                        <p class="history-chart-error">{format!("Could not load score history: {}", err)}</p>
                    }.into_any());
                }
                let series = state.value().and_then(|entries| ChartSeries::from_history(entries))?;
                Some(view! { <LineChart series=series /> }.into_any())
            })
        }}
    }
}

#[component]
fn LineChart(series: ChartSeries) -> impl IntoView {
    let frame = ChartFrame::default();
    let view_box = format!("0 0 {} {}", frame.width, frame.height);
    let path = series.path(&frame);
    let points = series.points(&frame);
    let left = frame.pad_left;
    let right = frame.width - frame.pad_right;

    let grid = series
        .y_ticks(4)
        .into_iter()
        .map(|tick| {
            let y = series.y_at(tick, &frame);
            view! {
                <line class="chart-grid" x1=left y1=y x2=right y2=y />
                <text class="chart-tick" x={left - 6.0} y={y + 4.0} text-anchor="end">
                    {format_score(tick)}
                </text>
            }
        })
        .collect::<Vec<_>>();

    let labels = series
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let x = series.x_at(i, &frame);
            view! {
                <text class="chart-label" x=x y={frame.height - 12.0} text-anchor="middle">
                    {label.clone()}
                </text>
            }
        })
        .collect::<Vec<_>>();

    let dots = points
        .into_iter()
        .zip(series.values.iter().copied())
        .map(|((x, y), value)| {
            view! {
                <circle class="chart-point" cx=x cy=y r="4" data-score={format_score(value)} />
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="history-chart">
            <style>{include_str!("history_chart.css")}</style>
            <div class="chart-legend">
                <span class="chart-legend-swatch"></span>
                "Score Progress"
            </div>
            <svg class="chart-svg" viewBox=view_box role="img" aria-label="Score Progress">
                {grid}
                <path class="chart-line" d=path />
                {dots}
                {labels}
            </svg>
        </div>
    }
}
