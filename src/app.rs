use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::source::FileSource;
use crate::store::Store;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StatewiseApp {
    pub store: Store,
    pub config: AppConfig,
}

impl StatewiseApp {
    pub fn new(config: AppConfig) -> Self {
        let mut store = Store::new(Arc::new(FileSource::from_config(&config)));
        store.change_selected_year(config.initial_year);
        store.load_data();
        Self { store, config }
    }

    /// One colour per state seen in either dataset.
    fn refresh_color_map(&mut self) {
        let map = ColorMap::for_keys(self.store.state_names());
        self.store.set_color_map(map);
    }
}

impl eframe::App for StatewiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.store.poll_loads().is_empty() {
            self.refresh_color_map();
        }
        if self.store.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.store, &mut self.config);
        });

        // ---- Left side panel: year and state selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.store);
            });

        // ---- Bottom panel: values for the selected year ----
        egui::TopBottomPanel::bottom("value_table")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::value_table(ui, &self.store);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &self.store);
        });
    }
}
