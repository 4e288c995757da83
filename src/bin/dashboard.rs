//! Options IV Dashboard GUI
//!
//! Single-page interactive dashboard: an implied-volatility surface over
//! (strike, DTE) and a call/put skew chart, driven by sidebar selectors.

use chrono::NaiveDate;
use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points, Polygon, VLine};
use tracing::{error, warn};

use iv_dash::prelude::*;

struct DashboardApp {
    dataset: Dataset,

    // UI state
    mode: ViewMode,
    side: OptionSide,
    surface_date_idx: usize,
    skew_obs_idx: usize,
    skew_exp_idx: usize,

    // Last built view; rebuilt whenever the selection changes
    last_selection: Option<ViewSelection>,
    view: Option<DashResult<ViewData>>,
}

impl DashboardApp {
    fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            mode: ViewMode::Surface,
            side: OptionSide::Call,
            surface_date_idx: 0,
            skew_obs_idx: 0,
            skew_exp_idx: 0,
            last_selection: None,
            view: None,
        }
    }

    fn current_selection(
        &self,
        observation_dates: &[NaiveDate],
        expiration_dates: &[NaiveDate],
    ) -> Option<ViewSelection> {
        match self.mode {
            ViewMode::Surface => {
                let date = *observation_dates.get(self.surface_date_idx)?;
                Some(ViewSelection::Surface {
                    date,
                    side: self.side,
                })
            }
            ViewMode::Skew => {
                let observation = *observation_dates.get(self.skew_obs_idx)?;
                let expiration = *expiration_dates.get(self.skew_exp_idx)?;
                Some(ViewSelection::Skew {
                    observation,
                    expiration,
                })
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Distinct-value lists are derived from the dataset on demand,
        // never stored alongside it.
        let observation_dates = self.dataset.observation_dates();
        let expiration_dates = self.dataset.expiration_dates();

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Options IV Dashboard");
            ui.separator();

            ui.heading("Select Analysis");
            for mode in ViewMode::ALL {
                ui.radio_value(&mut self.mode, mode, mode.label());
            }

            ui.separator();
            match self.mode {
                ViewMode::Surface => {
                    ui.heading("Option Type");
                    ui.horizontal(|ui| {
                        for side in [OptionSide::Call, OptionSide::Put] {
                            ui.selectable_value(&mut self.side, side, side.label());
                        }
                    });

                    date_combo(ui, "Date", &observation_dates, &mut self.surface_date_idx);
                }
                ViewMode::Skew => {
                    date_combo(
                        ui,
                        "Observation Date",
                        &observation_dates,
                        &mut self.skew_obs_idx,
                    );
                    date_combo(
                        ui,
                        "Expiration Date",
                        &expiration_dates,
                        &mut self.skew_exp_idx,
                    );
                }
            }

            ui.separator();
            ui.label(format!("Rows: {}", self.dataset.len()));
            ui.label(format!("Dates: {}", observation_dates.len()));
            ui.label(format!("Expirations: {}", expiration_dates.len()));
        });

        // One full recomputation per selection change, run to completion
        // before rendering. The frame loop serializes interactions.
        if let Some(selection) = self.current_selection(&observation_dates, &expiration_dates) {
            if self.last_selection != Some(selection) {
                let built = build_view(&self.dataset, selection);
                if let Err(e) = &built {
                    warn!("view build failed: {}", e);
                }
                self.view = Some(built);
                self.last_selection = Some(selection);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match &self.view {
            Some(Ok(ViewData::Surface(grid))) => draw_surface(ui, grid),
            Some(Ok(ViewData::Skew(slice))) => draw_skew(ui, slice),
            Some(Err(e)) => {
                let color = if e.is_fatal() {
                    egui::Color32::LIGHT_RED
                } else {
                    egui::Color32::YELLOW
                };
                ui.colored_label(color, e.to_string());
            }
            None => {
                ui.label("No quote data loaded.");
            }
        });
    }
}

/// Date picker backed by one of the dataset's distinct-value lists.
fn date_combo(ui: &mut egui::Ui, label: &str, dates: &[NaiveDate], idx: &mut usize) {
    if dates.is_empty() {
        ui.label(format!("{}: (none)", label));
        return;
    }
    if *idx >= dates.len() {
        *idx = dates.len() - 1;
    }

    egui::ComboBox::from_label(label)
        .selected_text(dates[*idx].to_string())
        .show_ui(ui, |ui| {
            for (i, date) in dates.iter().enumerate() {
                ui.selectable_value(idx, i, date.to_string());
            }
        });
}

fn draw_surface(ui: &mut egui::Ui, grid: &VolGrid) {
    ui.heading(format!(
        "Implied Volatility Surface for {} ({})",
        grid.date,
        grid.side.label()
    ));

    let (lo, hi) = match grid.vol_range() {
        Some(range) => range,
        None => {
            ui.colored_label(
                egui::Color32::YELLOW,
                "No implied volatility observed for this selection.",
            );
            return;
        }
    };

    let dte_axis: Vec<f64> = grid.dtes.iter().map(|&d| d as f64).collect();
    let x_edges = cell_edges(&dte_axis);
    let y_edges = cell_edges(&grid.strikes);

    // The formatter must own its data; the grid is small and ephemeral.
    let hover_grid = grid.clone();
    Plot::new("iv_surface")
        .x_axis_label("Days to Expiration")
        .y_axis_label("Strike Price")
        .label_formatter(move |_name, value| hover_text(&hover_grid, value.x, value.y))
        .show(ui, |plot_ui| {
            for si in 0..grid.strikes.len() {
                for ti in 0..grid.dtes.len() {
                    let iv = match grid.value(si, ti) {
                        Some(v) => v,
                        None => continue,
                    };
                    let t = if hi > lo { (iv - lo) / (hi - lo) } else { 0.5 };
                    let color = heat_color(t);

                    let cell = vec![
                        [x_edges[ti], y_edges[si]],
                        [x_edges[ti + 1], y_edges[si]],
                        [x_edges[ti + 1], y_edges[si + 1]],
                        [x_edges[ti], y_edges[si + 1]],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(cell))
                            .fill_color(color)
                            .stroke(egui::Stroke::new(0.5, color)),
                    );
                }
            }
        });

    ui.label(format!("IV range: {:.4} - {:.4}", lo, hi));
}

fn draw_skew(ui: &mut egui::Ui, slice: &SkewSlice) {
    ui.heading(format!(
        "Volatility Skew on {} (Expiring {})",
        slice.observation, slice.expiration
    ));

    let call_points = slice.call_points();
    let put_points = slice.put_points();

    Plot::new("vol_skew")
        .view_aspect(2.0)
        .x_axis_label("Strike Price")
        .y_axis_label("Implied Volatility")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.vline(
                VLine::new(slice.underlying)
                    .name("Underlying")
                    .color(egui::Color32::GRAY)
                    .width(1.0)
                    .style(LineStyle::Dashed { length: 5.0 }),
            );

            if !call_points.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::new(call_points.clone()))
                        .name("Call IV")
                        .color(egui::Color32::LIGHT_BLUE)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(call_points)
                        .name("Call IV")
                        .color(egui::Color32::LIGHT_BLUE)
                        .radius(2.5),
                );
            }

            if !put_points.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::new(put_points.clone()))
                        .name("Put IV")
                        .color(egui::Color32::LIGHT_RED)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(put_points)
                        .name("Put IV")
                        .color(egui::Color32::LIGHT_RED)
                        .radius(2.5),
                );
            }
        });

    ui.label(format!(
        "{} strikes | Underlying: {:.2}",
        slice.len(),
        slice.underlying
    ));
}

/// Hover text for the surface: nearest cell's strike, DTE and IV.
fn hover_text(grid: &VolGrid, x: f64, y: f64) -> String {
    let ti = nearest_index(&grid.dtes.iter().map(|&d| d as f64).collect::<Vec<_>>(), x);
    let si = nearest_index(&grid.strikes, y);
    match (si, ti) {
        (Some(si), Some(ti)) => match grid.value(si, ti) {
            Some(iv) => format!(
                "Strike: {}\nDays to Expiration: {}\nIV: {:.4}",
                grid.strikes[si], grid.dtes[ti], iv
            ),
            None => format!(
                "Strike: {}\nDays to Expiration: {}\nIV: n/a",
                grid.strikes[si], grid.dtes[ti]
            ),
        },
        _ => String::new(),
    }
}

fn nearest_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (*a - value)
                .abs()
                .partial_cmp(&(*b - value).abs())
                .unwrap()
        })
        .map(|(i, _)| i)
}

/// Cell boundaries for a sorted axis: midpoints between neighbors, end
/// cells extended by half the adjacent gap.
fn cell_edges(axis: &[f64]) -> Vec<f64> {
    if axis.len() == 1 {
        return vec![axis[0] - 0.5, axis[0] + 0.5];
    }

    let mut edges = Vec::with_capacity(axis.len() + 1);
    edges.push(axis[0] - (axis[1] - axis[0]) / 2.0);
    for w in axis.windows(2) {
        edges.push((w[0] + w[1]) / 2.0);
    }
    let n = axis.len();
    edges.push(axis[n - 1] + (axis[n - 1] - axis[n - 2]) / 2.0);
    edges
}

/// Viridis-like color ramp over [0, 1].
fn heat_color(t: f64) -> egui::Color32 {
    const STOPS: [(f64, [u8; 3]); 5] = [
        (0.00, [68, 1, 84]),
        (0.25, [59, 82, 139]),
        (0.50, [33, 145, 140]),
        (0.75, [94, 201, 98]),
        (1.00, [253, 231, 37]),
    ];

    let t = t.clamp(0.0, 1.0);
    for w in STOPS.windows(2) {
        let (t0, c0) = w[0];
        let (t1, c1) = w[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (a as f64 + f * (b as f64 - a as f64)).round() as u8;
            return egui::Color32::from_rgb(
                lerp(c0[0], c1[0]),
                lerp(c0[1], c1[1]),
                lerp(c0[2], c1[2]),
            );
        }
    }
    let last = STOPS[STOPS.len() - 1].1;
    egui::Color32::from_rgb(last[0], last[1], last[2])
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/quotes.csv".to_string());

    let dataset = match load_quotes(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            // The dashboard cannot render without data; fail before any
            // window opens.
            error!("could not load quote table from {}: {}", path, e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Options IV Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Options IV Dashboard",
        options,
        Box::new(|_cc| Box::new(DashboardApp::new(dataset))),
    )
}
