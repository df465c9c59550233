use std::path::PathBuf;
use std::sync::Arc;

use statewise::config::AppConfig;
use statewise::data::model::{DatasetKind, StateValue};
use statewise::data::source::FileSource;
use statewise::store::Store;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("statewise-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sv(state: &str, value: f64) -> StateValue {
    StateValue {
        state: state.to_string(),
        value,
    }
}

#[test]
fn loads_both_csv_files_from_the_data_folder() {
    let dir = scratch_dir("both");
    let config = AppConfig {
        data_dir: dir.clone(),
        ..AppConfig::default()
    };
    std::fs::write(
        config.path_for(DatasetKind::Education),
        "State,2006,2007\nOhio,24.5,25.0\nTexas,26.1,\n",
    )
    .unwrap();
    std::fs::write(
        config.path_for(DatasetKind::Income),
        "State,2006,2007\nOhio,33000,34100\nTexas,35000,36200\n",
    )
    .unwrap();

    let mut store = Store::new(Arc::new(FileSource::from_config(&config)));
    store.load_data();
    store.wait_for_loads();
    std::fs::remove_dir_all(&dir).ok();

    assert!(store.is_loaded(DatasetKind::Education));
    assert!(store.is_loaded(DatasetKind::Income));

    store.change_selected_year(2007);
    // The blank 2007 cell for Texas is still a field, and coerces to zero.
    assert_eq!(
        store.education_rates(),
        vec![sv("Ohio", 25.0), sv("Texas", 0.0)]
    );
    assert_eq!(
        store.personal_income(),
        vec![sv("Ohio", 34100.0), sv("Texas", 36200.0)]
    );
}

#[test]
fn missing_file_only_affects_its_own_dataset() {
    let dir = scratch_dir("partial");
    let config = AppConfig {
        data_dir: dir.clone(),
        ..AppConfig::default()
    };
    std::fs::write(config.path_for(DatasetKind::Income), "State,2006\nIowa,31000\n").unwrap();

    let mut store = Store::new(Arc::new(FileSource::from_config(&config)));
    store.load_data();
    store.wait_for_loads();
    std::fs::remove_dir_all(&dir).ok();

    assert!(!store.is_loaded(DatasetKind::Education));
    assert!(store.raw(DatasetKind::Education).is_empty());
    assert!(store.last_load_error(DatasetKind::Education).is_some());
    assert_eq!(store.personal_income(), vec![sv("Iowa", 31000.0)]);
}

#[test]
fn csv_without_state_column_is_reported() {
    let dir = scratch_dir("nostate");
    let config = AppConfig {
        data_dir: dir.clone(),
        ..AppConfig::default()
    };
    std::fs::write(config.path_for(DatasetKind::Education), "Name,2006\nOhio,24.5\n").unwrap();
    std::fs::write(config.path_for(DatasetKind::Income), "State,2006\nOhio,33000\n").unwrap();

    let mut store = Store::new(Arc::new(FileSource::from_config(&config)));
    store.load_data();
    store.wait_for_loads();
    std::fs::remove_dir_all(&dir).ok();

    let message = store
        .last_load_error(DatasetKind::Education)
        .unwrap_or_default();
    assert!(message.contains("'State'"), "{message}");
    assert!(store.is_loaded(DatasetKind::Income));
}
