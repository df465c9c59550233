pub mod panels;
pub mod plot;
