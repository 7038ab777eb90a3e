pub(crate) mod diff;
pub(crate) mod markdown;
pub(crate) mod panel;
pub(crate) mod prefs;
pub(crate) mod tabs;
pub(crate) mod viewer;

pub(crate) use viewer::NoteContentViewer;
