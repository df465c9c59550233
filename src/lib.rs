//! Education rates and personal income by US state, one year at a time.
//!
//! [`store::Store`] holds the selection and both raw datasets; the `ui`
//! and `app` modules are the egui viewer built on top of it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod store;
pub mod ui;
