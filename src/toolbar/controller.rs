//! The floating toolbar controller.
//!
//! Owns the one `SourceSnapshot`/selection pair, the visibility state
//! machine and the retained session handle, and routes every action to a
//! local effect, the result collaborator, or the text injector. All entry
//! points run on the embedder's single event-handling thread.

use std::time::Duration;

use crate::collab::{
    Assistant, Clipboard, Collaborators, Deferred, ImageHover, QuickAction, SessionHandle, Timer,
    ToolbarUi,
};
use crate::config::ToolbarConfig;
use crate::error::InjectionError;
use crate::geometry::{Point, Rect};
use crate::host::Host;
use crate::toolbar::actions::Action;
use crate::toolbar::inject::inject;
use crate::toolbar::source::{capture, SourceSnapshot};
use crate::toolbar::visibility::{ToolbarState, VisibilityController, WindowMode};

pub struct ToolbarController<H: Host> {
    host: H,
    config: ToolbarConfig,

    ui: Box<dyn ToolbarUi<H>>,
    assistant: Box<dyn Assistant>,
    image_hover: Box<dyn ImageHover>,
    clipboard: Box<dyn Clipboard>,
    timer: Box<dyn Timer>,

    visibility: VisibilityController,
    selection: String,
    last_anchor: Option<Rect>,
    snapshot: SourceSnapshot<H>,
    session: Option<SessionHandle>,
}

impl<H: Host> ToolbarController<H> {
    pub fn new(host: H, config: ToolbarConfig, collaborators: Collaborators<H>) -> Self {
        let Collaborators {
            mut ui,
            assistant,
            image_hover,
            clipboard,
            timer,
        } = collaborators;
        ui.build();

        Self {
            host,
            config,
            ui,
            assistant,
            image_hover,
            clipboard,
            timer,
            visibility: VisibilityController::new(),
            selection: String::new(),
            last_anchor: None,
            snapshot: SourceSnapshot::None,
            session: None,
        }
    }

    // --- EVENT ENTRY POINTS ---

    /// Pointer released. The finalized selection is read on a short delay,
    /// not here: selection finalization completes asynchronously relative
    /// to pointer-up on some platforms.
    pub fn on_pointer_up(&mut self, point: Point) {
        self.timer.schedule(
            Duration::from_millis(self.config.selection_settle_ms),
            Deferred::ReadSelection { point },
        );
    }

    /// Pointer pressed somewhere in the document.
    pub fn on_pointer_down(&mut self, target: &H::Node) {
        if self.ui.is_host(target) {
            return;
        }

        if self.ui.is_pinned() || self.ui.is_docked() {
            // Sticky window: an outside click only collapses the compact
            // toolbar, and only while the window is hidden.
            if self.visibility.is_compact_visible() && !self.ui.is_window_visible() {
                self.hide_compact();
            }
            return;
        }

        self.hide_compact();
    }

    /// Run a task whose delay has elapsed.
    pub fn run_deferred(&mut self, task: Deferred) {
        match task {
            Deferred::ReadSelection { point } => self.read_selection(point),
        }
    }

    fn read_selection(&mut self, point: Point) {
        let text = self.host.selection_text().trim().to_string();

        if !text.is_empty() {
            self.selection = text;
            let anchor = self.host.selection_rect().unwrap_or(Rect::ZERO);
            self.last_anchor = Some(anchor);

            // Capture the source now; the live selection may move into the
            // toolbar before the user picks an action.
            self.snapshot = capture(&self.host);
            self.ui.show_grammar_button(!self.snapshot.is_none());

            self.visibility.selection_appeared(anchor, point);
            self.ui.show(anchor, point);
        } else if !self.ui.is_window_visible() {
            self.selection.clear();
            self.snapshot = SourceSnapshot::None;
            let was_compact = self.visibility.is_compact_visible();
            self.visibility.selection_cleared(false);
            if was_compact {
                self.ui.hide();
            }
        }
    }

    fn hide_compact(&mut self) {
        if self.visibility.collapse_compact(self.ui.is_window_visible()) {
            self.ui.hide();
        }
    }

    // --- ACTION ROUTING ---

    /// Single dispatch entry point for UI affordances. Each action is
    /// terminal: it triggers exactly one effect.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::CopySelection => self.copy_selection(),
            Action::ImageAnalyze => self.image_analyze(),
            Action::Ask => self.open_ask_window(),
            Action::Translate => self.quick_action(QuickAction::Translate),
            Action::Explain => self.quick_action(QuickAction::Explain),
            Action::Summarize => self.quick_action(QuickAction::Summarize),
            Action::Grammar => self.grammar_action(),
            Action::InsertResult(text) => self.inject_result(&text, false),
            Action::ReplaceResult(text) => self.inject_result(&text, true),
            Action::SubmitAsk(question) => self.submit_ask(&question),
            Action::RetryAsk => self.assistant.handle_retry(),
            Action::CancelAsk => {
                self.assistant.handle_cancel();
                self.close_window();
            }
            Action::ContinueChat => {
                // The handle survives the window: the next invocation can
                // pick the conversation back up.
                self.assistant.handle_continue_chat(self.session.as_ref());
                self.close_window();
            }
        }
    }

    fn copy_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        match self.clipboard.write_text(&self.selection) {
            Ok(()) => self.ui.show_copy_selection_feedback(true),
            Err(err) => {
                log::warn!("failed to copy selection: {err}");
                self.ui.show_copy_selection_feedback(false);
            }
        }
    }

    fn image_analyze(&mut self) {
        let Some(image) = self.image_hover.current_image() else {
            return;
        };
        self.ui.hide_image_button();
        self.assistant.handle_image_analyze(&image.src, image.rect);
    }

    fn open_ask_window(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let anchor = self.last_anchor.unwrap_or(Rect::ZERO);
        self.ui.hide();
        self.visibility.window_opened(
            anchor,
            Some(self.selection.clone()),
            WindowMode::AskSelection,
        );
        self.ui
            .show_ask_window(anchor, Some(&self.selection), &self.config.ask_window_title);
    }

    fn quick_action(&mut self, kind: QuickAction) {
        if self.selection.is_empty() {
            return;
        }
        let anchor = self.last_anchor.unwrap_or(Rect::ZERO);
        self.assistant
            .handle_quick_action(kind, &self.selection, anchor);
    }

    fn grammar_action(&mut self) {
        // Without an editable origin there is nowhere to put the fix.
        if self.selection.is_empty() || self.snapshot.is_none() {
            return;
        }
        self.ui.set_grammar_mode(true, &self.snapshot);
        self.quick_action(QuickAction::Grammar);
    }

    fn inject_result(&mut self, text: &str, replace: bool) {
        match inject(&mut self.host, &self.snapshot, text, replace) {
            Ok(()) => self.ui.show_insert_replace_buttons(false),
            Err(InjectionError::NoEditableTarget) => match self.clipboard.write_text(text) {
                Ok(()) => self
                    .ui
                    .show_error("Text copied to clipboard (not in an editable field)"),
                Err(err) => {
                    log::warn!("clipboard fallback failed: {err}");
                    self.ui.show_error("Cannot insert: not in an editable field");
                }
            },
            Err(InjectionError::EmptyPayload) => {
                log::warn!("nothing to insert");
            }
            Err(err @ InjectionError::InjectionFailed) => {
                log::error!("text injection failed: {err}");
                self.ui
                    .show_error("Failed to insert text into the source field");
            }
        }
    }

    fn submit_ask(&mut self, question: &str) {
        if question.is_empty() {
            return;
        }
        self.assistant.handle_submit_ask(question, &self.selection);
    }

    fn close_window(&mut self) {
        self.ui.hide_ask_window();
        self.visibility.window_closed();
    }

    // --- GLOBAL INVOCATION ---

    /// Open the ask window with no selection context, centered in the
    /// viewport.
    pub fn show_global_input(&mut self) {
        let (viewport_w, viewport_h) = self.host.viewport();
        let width = self.config.global_input_width;
        let height = self.config.global_input_height;
        let anchor = Rect::new(
            (viewport_w - width) / 2.0,
            viewport_h / 2.0 - 200.0,
            width,
            height,
        );

        self.ui.hide();
        self.visibility
            .window_opened(anchor, None, WindowMode::GlobalInput);
        self.ui
            .show_ask_window(anchor, None, &self.config.ask_window_title);

        // Fresh question: clear the input and any stale context.
        self.ui.set_input_value("");
        self.selection.clear();
    }

    // --- SUB-MODULE CALLBACKS ---

    /// The result collaborator established a new session.
    pub fn set_session(&mut self, handle: SessionHandle) {
        self.session = Some(handle);
    }

    /// The hover detector found an image under the pointer.
    pub fn image_detected(&mut self, rect: Rect) {
        self.ui.show_image_button(rect);
    }

    pub fn image_lost(&mut self) {
        self.ui.hide_image_button();
    }

    /// The pointer entered or left the image affordance button.
    pub fn image_button_hover(&mut self, hovering: bool) {
        if hovering {
            self.image_hover.cancel_hide();
        } else {
            self.image_hover.schedule_hide();
        }
    }

    /// Explicit teardown: hide everything and drop captured state. The
    /// embedder detaches its event sources separately.
    pub fn detach(&mut self) {
        self.ui.hide();
        self.ui.hide_ask_window();
        self.ui.hide_image_button();
        self.visibility.window_closed();
        self.selection.clear();
        self.snapshot = SourceSnapshot::None;
    }

    // --- ACCESSORS ---

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn snapshot(&self) -> &SourceSnapshot<H> {
        &self.snapshot
    }

    pub fn state(&self) -> &ToolbarState {
        self.visibility.state()
    }

    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
