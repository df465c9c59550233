use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::AppConfig;
use crate::data::model::DatasetKind;
use crate::data::source::FileSource;
use crate::data::view::year_span;
use crate::store::Store;

// ---------------------------------------------------------------------------
// Left side panel – year slider and state list
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, store: &mut Store) {
    ui.heading("Year");
    ui.separator();

    let span = year_span(&store.available_years());
    let mut year = store.selected_year();
    if ui
        .add(egui::Slider::new(&mut year, span).step_by(1.0))
        .changed()
    {
        store.change_selected_year(year);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("States");
        let n_selected = store.selected_states().len();
        if ui
            .add_enabled(n_selected > 0, egui::Button::new(format!("Clear ({n_selected})")).small())
            .clicked()
        {
            store.clear_state_selection();
        }
    });
    ui.separator();

    // Clone what we need so we can mutate the store inside the loop.
    let names = store.state_names();
    if names.is_empty() {
        ui.label(if store.is_loading() {
            "Loading…"
        } else {
            "No dataset loaded."
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in &names {
                let mut checked = store.is_state_selected(name);
                let mut text = RichText::new(name);
                if !store.color_map().is_empty() {
                    text = text.color(store.color_map().color_for(name));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    store.toggle_state_selection(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, store: &mut Store, config: &mut AppConfig) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(store, config);
                ui.close_menu();
            }
            if ui
                .add_enabled(!store.is_loading(), egui::Button::new("Reload"))
                .clicked()
            {
                store.load_data();
                ui.close_menu();
            }
        });

        ui.separator();

        if store.is_loading() {
            ui.spinner();
            ui.label(format!("{} dataset(s) loading", store.pending_loads()));
        } else {
            for kind in DatasetKind::ALL {
                if store.is_loaded(kind) {
                    ui.label(format!("{kind}: {} states", store.raw(kind).len()));
                } else {
                    ui.label(format!("{kind}: not loaded"));
                }
            }
        }

        for kind in DatasetKind::ALL {
            if let Some(msg) = store.last_load_error(kind) {
                ui.separator();
                ui.label(RichText::new(format!("{kind}: {msg}")).color(Color32::RED));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(store: &mut Store, config: &mut AppConfig) {
    let folder = rfd::FileDialog::new()
        .set_title("Open data folder")
        .set_directory(&config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("switching data folder to {}", dir.display());
        config.data_dir = dir;
        store.set_source(Arc::new(FileSource::from_config(config)));
        store.load_data();
    }
}
