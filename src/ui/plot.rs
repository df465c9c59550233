use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Plot, PlotPoints, Points};

use crate::data::view::{join_views, JoinedRow};
use crate::store::Store;

fn joined_rows(store: &Store) -> Vec<JoinedRow> {
    join_views(&store.education_rates(), &store.personal_income())
}

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Education rate against personal income, one point per state.
pub fn scatter_plot(ui: &mut Ui, store: &Store) {
    let rows = joined_rows(store);
    if rows.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if store.is_loading() {
                ui.heading("Loading data…");
            } else {
                ui.heading(format!(
                    "No data for {}  (File → Open data folder…)",
                    store.selected_year()
                ));
            }
        });
        return;
    }

    let color_map = store.color_map();

    Plot::new("education_vs_income")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Bachelor's degree or higher (%)")
        .y_axis_label("Personal income per capita ($)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for row in &rows {
                let Some(point) = row.point() else {
                    continue;
                };
                let selected = store.is_state_selected(&row.state);

                // Only selected states get a legend entry.
                let mut points = Points::new(PlotPoints::new(vec![point]))
                    .color(color_map.color_for(&row.state))
                    .radius(if selected { 6.0 } else { 3.0 })
                    .filled(true);
                if selected {
                    points = points.name(&row.state);
                }
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Value table (bottom panel)
// ---------------------------------------------------------------------------

/// Per-state values for the selected year; selected states in bold.
pub fn value_table(ui: &mut Ui, store: &Store) {
    let rows = joined_rows(store);
    ui.strong(format!("Values for {}", store.selected_year()));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::initial(160.0).resizable(true))
        .column(Column::initial(120.0).resizable(true))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("State");
            });
            header.col(|ui| {
                ui.strong("Degree or higher (%)");
            });
            header.col(|ui| {
                ui.strong("Income ($)");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut table_row| {
                let row = &rows[table_row.index()];
                let selected = store.is_state_selected(&row.state);
                let cell = |text: String| {
                    let text = RichText::new(text).color(store.color_map().color_for(&row.state));
                    if selected {
                        text.strong()
                    } else {
                        text
                    }
                };

                table_row.col(|ui| {
                    ui.label(cell(row.state.clone()));
                });
                table_row.col(|ui| {
                    ui.label(cell(format_value(row.education, 1)));
                });
                table_row.col(|ui| {
                    ui.label(cell(format_value(row.income, 0)));
                });
            });
        });
}

fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) => format!("{v:.decimals$}"),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_missing_and_nan() {
        assert_eq!(format_value(None, 1), "–");
        assert_eq!(format_value(Some(f64::NAN), 1), "NaN");
        assert_eq!(format_value(Some(24.56), 1), "24.6");
        assert_eq!(format_value(Some(41234.4), 0), "41234");
    }
}
