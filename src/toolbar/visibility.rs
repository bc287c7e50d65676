//! Visibility state machine: nothing, the compact toolbar, or the
//! expanded ask window.
//!
//! The sticky `pinned`/`docked` flags live on the UI renderer, not here;
//! they modify dismissal decisions in the controller but are not states.
//! One deliberate behavior carried over from the original design: an
//! outside pointer-down never dismisses the window itself, it only
//! collapses the compact toolbar, and only while the window is hidden.

use crate::geometry::{Point, Rect};

/// How the ask window was opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMode {
    /// Opened from the compact toolbar, seeded with the selection.
    AskSelection,
    /// Opened by global invocation with no selection context.
    GlobalInput,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToolbarState {
    Hidden,
    Compact {
        anchor: Rect,
        point: Point,
    },
    Window {
        anchor: Rect,
        context: Option<String>,
        mode: WindowMode,
    },
}

#[derive(Debug)]
pub struct VisibilityController {
    state: ToolbarState,
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityController {
    pub fn new() -> Self {
        Self {
            state: ToolbarState::Hidden,
        }
    }

    pub fn state(&self) -> &ToolbarState {
        &self.state
    }

    pub fn is_compact_visible(&self) -> bool {
        matches!(self.state, ToolbarState::Compact { .. })
    }

    pub fn is_window_open(&self) -> bool {
        matches!(self.state, ToolbarState::Window { .. })
    }

    /// The selection became non-empty: show the compact toolbar at its
    /// bounding rect, also anchored to the raw pointer-up coordinates.
    pub fn selection_appeared(&mut self, anchor: Rect, point: Point) {
        self.state = ToolbarState::Compact { anchor, point };
    }

    /// The selection became empty. Returns `true` when the controller
    /// should hide the toolbar and clear its snapshot; while the window is
    /// on screen the state persists independent of the live selection.
    pub fn selection_cleared(&mut self, window_visible: bool) -> bool {
        if window_visible {
            return false;
        }
        self.state = ToolbarState::Hidden;
        true
    }

    /// Collapse the compact toolbar, unless the window is on screen.
    /// Returns `true` when the UI should actually hide it.
    pub fn collapse_compact(&mut self, window_visible: bool) -> bool {
        if window_visible || !self.is_compact_visible() {
            return false;
        }
        self.state = ToolbarState::Hidden;
        true
    }

    pub fn window_opened(&mut self, anchor: Rect, context: Option<String>, mode: WindowMode) {
        self.state = ToolbarState::Window {
            anchor,
            context,
            mode,
        };
    }

    pub fn window_closed(&mut self) {
        self.state = ToolbarState::Hidden;
    }
}
