use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Config, PanelBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    pub docked: bool,
    pub collapsed: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            docked: true,
            collapsed: false,
        }
    }
}

impl SidebarState {
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Undocking also expands, so a floating sidebar is never a bare rail.
    pub fn toggle_docked(&mut self) {
        self.docked = !self.docked;
        if !self.docked {
            self.collapsed = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.docked || !self.collapsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPanel {
    pub open: bool,
    pub width: u32,
    bounds: PanelBounds,
}

impl ContextPanel {
    pub fn new(bounds: PanelBounds) -> Self {
        Self {
            open: true,
            width: bounds.default_width.clamp(bounds.min_width, bounds.max_width),
            bounds,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Set an absolute width, clamped to the configured bounds.
    pub fn resize(&mut self, width: u32) -> u32 {
        self.width = width.clamp(self.bounds.min_width, self.bounds.max_width);
        self.width
    }

    /// Apply a drag delta in pixels; negative narrows the panel.
    pub fn drag(&mut self, delta: i32) -> u32 {
        let target = (self.width as i64 + delta as i64).max(0) as u32;
        self.resize(target)
    }

    pub fn reset(&mut self) {
        self.width = self.bounds.default_width;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveModal {
    #[default]
    None,
    Records,
    Treasury,
    Withdrawals,
}

impl fmt::Display for ActiveModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveModal::None => write!(f, "none"),
            ActiveModal::Records => write!(f, "records"),
            ActiveModal::Treasury => write!(f, "treasury"),
            ActiveModal::Withdrawals => write!(f, "withdrawals"),
        }
    }
}

/// Layout state owned by the shell view and handed to children explicitly.
/// At most one modal is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub sidebar: SidebarState,
    pub panel: ContextPanel,
    pub modal: ActiveModal,
}

impl Workspace {
    pub fn new(cfg: &Config) -> Self {
        Self {
            sidebar: SidebarState::default(),
            panel: ContextPanel::new(cfg.panel.clone()),
            modal: ActiveModal::None,
        }
    }

    pub fn open_modal(&mut self, modal: ActiveModal) {
        self.modal = modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = ActiveModal::None;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal != ActiveModal::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_width_is_clamped() {
        let mut ws = Workspace::new(&Config::default());
        assert_eq!(ws.panel.width, 360);
        assert_eq!(ws.panel.resize(10_000), 640);
        assert_eq!(ws.panel.resize(0), 280);
        assert_eq!(ws.panel.drag(-500), 280);
        assert_eq!(ws.panel.drag(100), 380);
        ws.panel.reset();
        assert_eq!(ws.panel.width, 360);
    }

    #[test]
    fn toggling_panel_keeps_width() {
        let mut ws = Workspace::new(&Config::default());
        assert!(ws.panel.open);
        ws.panel.resize(500);
        ws.panel.toggle();
        assert!(!ws.panel.open);
        ws.panel.toggle();
        assert!(ws.panel.open);
        assert_eq!(ws.panel.width, 500);
    }

    #[test]
    fn opening_a_modal_replaces_the_previous_one() {
        let mut ws = Workspace::new(&Config::default());
        assert!(!ws.is_modal_open());
        ws.open_modal(ActiveModal::Records);
        ws.open_modal(ActiveModal::Withdrawals);
        assert_eq!(ws.modal, ActiveModal::Withdrawals);
        ws.close_modal();
        assert!(!ws.is_modal_open());
    }

    #[test]
    fn undocking_expands_sidebar() {
        let mut s = SidebarState::default();
        s.toggle_collapsed();
        assert!(s.collapsed);
        s.toggle_docked();
        assert!(!s.docked);
        assert!(!s.collapsed);
        assert!(s.is_visible());
    }
}
