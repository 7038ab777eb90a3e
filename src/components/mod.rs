pub mod enhance;
pub mod ui;
