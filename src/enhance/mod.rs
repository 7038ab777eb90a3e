//! Enhancement view state: which variants exist, which one is shown, and what the panel renders
//! for it. Framework-free so it can be driven by a fake clock in tests.

pub(crate) mod auto_advance;
pub(crate) mod availability;
pub(crate) mod panel;
pub(crate) mod progress;
pub(crate) mod tabs;

pub(crate) use auto_advance::{
    AdvanceEvent, AutoAdvanceController, SINGLE_VIEW_COOLDOWN_MS, TWO_COLUMN_COOLDOWN_MS,
};
pub(crate) use availability::{Availability, ADVANCE_PRIORITY};
pub(crate) use panel::{
    generate_label, generating_copy, improved_diff, resolve_panel, PanelView, Rendered,
};
pub(crate) use progress::GenerationTracker;
pub(crate) use tabs::{next_tab, prev_tab, tab_options, TabOption, TabState};
