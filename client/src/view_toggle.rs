use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// Which sub-view of the browse panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    FileList,
    Stats,
}

impl ViewMode {
    pub fn other(self) -> ViewMode {
        match self {
            ViewMode::FileList => ViewMode::Stats,
            ViewMode::Stats => ViewMode::FileList,
        }
    }

    /// Label of the toggle button while `self` is shown: it names the next view.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ViewMode::FileList => "Show Database Info",
            ViewMode::Stats => "Show Files",
        }
    }
}

/// Two-state switch between the file list and the stats view.
#[derive(Debug, Default)]
pub struct ViewToggle {
    mode: Cell<ViewMode>,
}

impl ViewToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode.get()
    }

    pub fn is_shown(&self, mode: ViewMode) -> bool {
        self.mode.get() == mode
    }

    pub fn label(&self) -> &'static str {
        self.mode.get().toggle_label()
    }

    /// Switches to the other view and returns it.
    pub fn toggle(&self) -> ViewMode {
        let next = self.mode.get().other();
        self.mode.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_file_list() {
        let t = ViewToggle::new();
        assert_eq!(t.mode(), ViewMode::FileList);
        assert_eq!(t.label(), "Show Database Info");
    }

    #[test]
    fn label_names_the_next_view() {
        let t = ViewToggle::new();
        assert_eq!(t.toggle(), ViewMode::Stats);
        assert_eq!(t.label(), "Show Files");
        assert!(t.is_shown(ViewMode::Stats));
        assert_eq!(t.toggle(), ViewMode::FileList);
        assert_eq!(t.label(), "Show Database Info");
    }
}
