//! Collaborator contracts.
//!
//! The controller owns no rendering, no hover heuristics and no network
//! pipeline. Those live behind the traits below and are injected at
//! construction as a [`Collaborators`] record, so each one can be replaced
//! in isolation (and recorded in tests).

use std::time::Duration;

use url::Url;

use crate::geometry::{Point, Rect};
use crate::host::Host;
use crate::toolbar::source::SourceSnapshot;

/// Renderer of the compact toolbar, the ask window and their affordances.
///
/// The renderer is also the authority on the sticky display flags
/// (`pinned` / `docked`) and on whether the ask window is currently on
/// screen; the controller reads those back rather than shadowing them.
pub trait ToolbarUi<H: Host> {
    /// One-time construction of the toolbar DOM/widgets.
    fn build(&mut self);

    /// Show the compact toolbar anchored to the selection.
    fn show(&mut self, anchor: Rect, point: Point);

    /// Hide the compact toolbar.
    fn hide(&mut self);

    /// Open the expanded ask window. `context` is the selected text seeding
    /// the question, `None` for the no-context entry point.
    fn show_ask_window(&mut self, anchor: Rect, context: Option<&str>, title: &str);

    fn hide_ask_window(&mut self);

    fn is_window_visible(&self) -> bool;
    fn is_pinned(&self) -> bool;
    fn is_docked(&self) -> bool;

    /// Whether `node` belongs to the toolbar/window itself. Pointer-downs
    /// on host nodes never dismiss anything.
    fn is_host(&self, node: &H::Node) -> bool;

    /// Toggle grammar mode; while enabled the window offers insert/replace
    /// buttons targeting the captured source.
    fn set_grammar_mode(&mut self, enabled: bool, snapshot: &SourceSnapshot<H>);

    /// Offer the grammar action only when the selection has an editable
    /// origin.
    fn show_grammar_button(&mut self, visible: bool);

    /// Insert/replace buttons are single-use per result; the controller
    /// retracts them after a successful injection.
    fn show_insert_replace_buttons(&mut self, visible: bool);

    fn show_image_button(&mut self, rect: Rect);
    fn hide_image_button(&mut self);

    /// Transient, non-fatal notice.
    fn show_error(&mut self, message: &str);

    fn show_copy_selection_feedback(&mut self, ok: bool);

    /// Overwrite the ask window's question input.
    fn set_input_value(&mut self, text: &str);
}

/// Opaque conversation-turn identifier handed back by the result pipeline.
/// Overwritten on each new answer, retained across window dismissal so a
/// later invocation can continue the chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionHandle(pub String);

/// The result-producing quick actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickAction {
    Translate,
    Explain,
    Summarize,
    Grammar,
}

impl QuickAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickAction::Translate => "translate",
            QuickAction::Explain => "explain",
            QuickAction::Summarize => "summarize",
            QuickAction::Grammar => "grammar",
        }
    }
}

/// The result-producing pipeline (streaming, retries and session tracking
/// happen on its side of the fence).
///
/// Cancellation is authoritative: after `handle_cancel` the collaborator
/// must disregard any result still in flight. The controller does not
/// track request identity.
pub trait Assistant {
    fn handle_quick_action(&mut self, kind: QuickAction, text: &str, anchor: Rect);
    fn handle_image_analyze(&mut self, src: &Url, rect: Rect);
    fn handle_submit_ask(&mut self, question: &str, context: &str);
    fn handle_retry(&mut self);
    fn handle_cancel(&mut self);
    fn handle_continue_chat(&mut self, session: Option<&SessionHandle>);
}

/// An image the hover detector currently has under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct HoveredImage {
    pub src: Url,
    pub rect: Rect,
}

/// Hover-driven image affordance detector.
pub trait ImageHover {
    fn current_image(&self) -> Option<HoveredImage>;

    /// Keep the affordance up while the pointer rests on its button.
    fn cancel_hide(&mut self);

    fn schedule_hide(&mut self);
}

/// System clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), crate::error::ClipboardError>;
}

/// Work the controller defers to a later tick of the event loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred {
    /// Read the finalized selection after the settle delay. Selection
    /// finalization completes asynchronously relative to pointer-up on
    /// some platforms, so the read must not run inside the event handler.
    ReadSelection { point: Point },
}

/// Single-threaded timer. The embedder runs the task by feeding it back
/// through the controller once the delay elapses.
pub trait Timer {
    fn schedule(&mut self, delay: Duration, task: Deferred);
}

/// Constructor-injected handler record wiring the controller to its
/// collaborators.
pub struct Collaborators<H: Host> {
    pub ui: Box<dyn ToolbarUi<H>>,
    pub assistant: Box<dyn Assistant>,
    pub image_hover: Box<dyn ImageHover>,
    pub clipboard: Box<dyn Clipboard>,
    pub timer: Box<dyn Timer>,
}
