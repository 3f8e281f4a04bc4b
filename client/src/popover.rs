//! Visibility and placement of the two overlay panels.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// Horizontal gap between a trigger control and its panel, in CSS pixels.
pub const GUTTER_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Upload,
    Browse,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Upload, Panel::Browse];

    pub fn other(self) -> Panel {
        match self {
            Panel::Upload => Panel::Browse,
            Panel::Browse => Panel::Upload,
        }
    }
}

/// On-screen bounding box of a trigger control (viewport coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Top-left corner at which a panel is placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub top: f64,
    pub left: f64,
}

impl Anchor {
    pub fn beside(trigger: Rect) -> Self {
        Self { top: trigger.top, left: trigger.right + GUTTER_PX }
    }

    /// Inline CSS for absolute placement.
    pub fn to_style(self) -> String {
        format!("top:{}px;left:{}px;", self.top, self.left)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Visible {
        anchor: Anchor,
    },
}

impl PanelState {
    pub fn is_visible(self) -> bool {
        matches!(self, PanelState::Visible { .. })
    }
}

/// How opening one panel affects the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopoverMode {
    /// Opening a panel hides the other one; at most one panel is visible.
    #[default]
    Exclusive,
    /// Only outside clicks hide panels, so both may end up visible.
    Loose,
}

/// Result of hit-testing a document-level click, done by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickTarget {
    /// Panel whose element contains the click target, if any.
    pub inside: Option<Panel>,
    /// Panel whose trigger control is the click target, if any.
    pub trigger_of: Option<Panel>,
}

impl ClickTarget {
    pub fn elsewhere() -> Self {
        Self::default()
    }

    pub fn inside(panel: Panel) -> Self {
        Self { inside: Some(panel), trigger_of: None }
    }

    pub fn trigger(panel: Panel) -> Self {
        Self { inside: None, trigger_of: Some(panel) }
    }
}

/// Owns both panels' state. Every method runs to completion inside one event handler,
/// so the state has a single writer at any time.
#[derive(Debug, Default)]
pub struct PopoverManager {
    mode: PopoverMode,
    upload: Cell<PanelState>,
    browse: Cell<PanelState>,
}

impl PopoverManager {
    pub fn new(mode: PopoverMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn mode(&self) -> PopoverMode {
        self.mode
    }

    fn slot(&self, panel: Panel) -> &Cell<PanelState> {
        match panel {
            Panel::Upload => &self.upload,
            Panel::Browse => &self.browse,
        }
    }

    pub fn state(&self, panel: Panel) -> PanelState {
        self.slot(panel).get()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.state(panel).is_visible()
    }

    /// Toggles `panel`. When it becomes visible it is anchored next to `trigger`.
    pub fn open(&self, panel: Panel, trigger: Rect) -> PanelState {
        let next = if self.is_visible(panel) {
            PanelState::Hidden
        } else {
            if self.mode == PopoverMode::Exclusive {
                self.slot(panel.other()).set(PanelState::Hidden);
            }
            PanelState::Visible { anchor: Anchor::beside(trigger) }
        };
        self.slot(panel).set(next);
        tracing::debug!(?panel, visible = next.is_visible(), "popover toggled");
        next
    }

    pub fn hide(&self, panel: Panel) {
        self.slot(panel).set(PanelState::Hidden);
    }

    /// Hides every visible panel the click landed outside of (its trigger counts as
    /// inside). Returns the panels that were hidden.
    pub fn close_if_outside(&self, target: ClickTarget) -> Vec<Panel> {
        let mut closed = Vec::new();
        for panel in Panel::ALL {
            if !self.is_visible(panel) {
                continue;
            }
            if target.inside == Some(panel) || target.trigger_of == Some(panel) {
                continue;
            }
            self.hide(panel);
            closed.push(panel);
        }
        closed
    }

    pub fn visible_count(&self) -> usize {
        Panel::ALL.iter().filter(|p| self.is_visible(**p)).count()
    }
}
