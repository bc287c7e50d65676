//! In-memory host document and recording collaborators for tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use url::Url;

use crate::collab::{
    Assistant, Clipboard, Deferred, HoveredImage, ImageHover, QuickAction, SessionHandle, Timer,
    ToolbarUi,
};
use crate::error::ClipboardError;
use crate::geometry::{Point, Rect};
use crate::host::Host;
use crate::toolbar::source::SourceSnapshot;

pub type NodeId = usize;

/// A cloned structural range: region node plus byte offsets into its flat
/// text. Plain data, so it trivially survives live-selection changes.
#[derive(Clone, Debug, PartialEq)]
pub struct MemRange {
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
}

enum MemKind {
    Field {
        text: String,
        selection: Option<(usize, usize)>,
        cursor: Option<usize>,
    },
    Block {
        text: String,
        rich_editable: bool,
    },
}

struct MemNode {
    parent: Option<NodeId>,
    attached: bool,
    input_events: u32,
    kind: MemKind,
}

struct LiveSelection {
    text: String,
    rect: Rect,
    container: NodeId,
    range: Option<MemRange>,
}

/// Minimal in-memory document: a flat node arena with parent links, one
/// focused node and one live selection.
pub struct MemHost {
    nodes: Vec<MemNode>,
    focused: Option<NodeId>,
    selection: Option<LiveSelection>,
    viewport: (f32, f32),
}

impl MemHost {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            focused: None,
            selection: None,
            viewport: (1280.0, 800.0),
        }
    }

    fn push(&mut self, parent: Option<NodeId>, kind: MemKind) -> NodeId {
        self.nodes.push(MemNode {
            parent,
            attached: true,
            input_events: 0,
            kind,
        });
        self.nodes.len() - 1
    }

    pub fn add_field(&mut self, text: &str) -> NodeId {
        self.push(
            None,
            MemKind::Field {
                text: text.to_string(),
                selection: None,
                cursor: None,
            },
        )
    }

    pub fn add_rich_region(&mut self, text: &str) -> NodeId {
        self.push(
            None,
            MemKind::Block {
                text: text.to_string(),
                rich_editable: true,
            },
        )
    }

    pub fn add_plain_block(&mut self) -> NodeId {
        self.push(
            None,
            MemKind::Block {
                text: String::new(),
                rich_editable: false,
            },
        )
    }

    /// Non-editable child element, e.g. a text container inside a region.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        self.push(
            Some(parent),
            MemKind::Block {
                text: String::new(),
                rich_editable: false,
            },
        )
    }

    pub fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    /// Focus `field` and select `[start, end)` inside it, mirroring the
    /// host selection as the field's slice.
    pub fn select_in_field(&mut self, field: NodeId, start: usize, end: usize) {
        self.focused = Some(field);
        let text = match &mut self.nodes[field].kind {
            MemKind::Field {
                text, selection, ..
            } => {
                *selection = Some((start, end));
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                text.get(lo..hi).unwrap_or_default().to_string()
            }
            MemKind::Block { .. } => panic!("node {field} is not a field"),
        };
        self.selection = Some(LiveSelection {
            text,
            rect: Rect::new(10.0, 10.0, 80.0, 16.0),
            container: field,
            range: None,
        });
    }

    /// Select `[start, end)` of `region`'s text, with `container` as the
    /// range's common container (pass a child to exercise the ancestor
    /// walk). Does not move focus.
    pub fn select_in_region(&mut self, region: NodeId, container: NodeId, start: usize, end: usize) {
        let text = match &self.nodes[region].kind {
            MemKind::Block { text, .. } => text.get(start..end).unwrap_or_default().to_string(),
            MemKind::Field { .. } => panic!("node {region} is not a block"),
        };
        self.selection = Some(LiveSelection {
            text,
            rect: Rect::new(20.0, 40.0, 120.0, 16.0),
            container,
            range: Some(MemRange {
                node: region,
                start,
                end,
            }),
        });
    }

    /// Selection inside non-editable content.
    pub fn select_in_plain(&mut self, container: NodeId, text: &str) {
        self.selection = Some(LiveSelection {
            text: text.to_string(),
            rect: Rect::new(5.0, 5.0, 60.0, 16.0),
            container,
            range: None,
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        for node in &mut self.nodes {
            if let MemKind::Field { selection, .. } = &mut node.kind {
                *selection = None;
            }
        }
    }

    pub fn detach(&mut self, node: NodeId) {
        self.nodes[node].attached = false;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Overwrite a field's value without touching selections, simulating a
    /// user edit between capture and injection.
    pub fn set_field_text(&mut self, node: NodeId, text: &str) {
        match &mut self.nodes[node].kind {
            MemKind::Field { text: value, .. } => *value = text.to_string(),
            MemKind::Block { .. } => panic!("node {node} is not a field"),
        }
    }

    pub fn field_value(&self, node: NodeId) -> String {
        match &self.nodes[node].kind {
            MemKind::Field { text, .. } => text.clone(),
            MemKind::Block { .. } => panic!("node {node} is not a field"),
        }
    }

    pub fn region_text(&self, node: NodeId) -> String {
        match &self.nodes[node].kind {
            MemKind::Block { text, .. } => text.clone(),
            MemKind::Field { .. } => panic!("node {node} is not a block"),
        }
    }

    pub fn cursor(&self, node: NodeId) -> Option<usize> {
        match &self.nodes[node].kind {
            MemKind::Field { cursor, .. } => *cursor,
            MemKind::Block { .. } => None,
        }
    }

    pub fn input_events(&self, node: NodeId) -> u32 {
        self.nodes[node].input_events
    }
}

impl Host for MemHost {
    type Node = NodeId;
    type Range = MemRange;

    fn selection_text(&self) -> String {
        self.selection
            .as_ref()
            .map(|s| s.text.clone())
            .unwrap_or_default()
    }

    fn selection_rect(&self) -> Option<Rect> {
        self.selection.as_ref().map(|s| s.rect)
    }

    fn focused_node(&self) -> Option<NodeId> {
        self.focused
    }

    fn field_selection(&self, node: &NodeId) -> Option<(usize, usize)> {
        match &self.nodes[*node].kind {
            MemKind::Field { selection, .. } => *selection,
            MemKind::Block { .. } => None,
        }
    }

    fn selection_container(&self) -> Option<NodeId> {
        self.selection.as_ref().map(|s| s.container)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[*node].parent
    }

    fn is_rich_editable(&self, node: &NodeId) -> bool {
        matches!(
            self.nodes[*node].kind,
            MemKind::Block {
                rich_editable: true,
                ..
            }
        )
    }

    fn clone_selection_range(&self) -> Option<MemRange> {
        self.selection.as_ref().and_then(|s| s.range.clone())
    }

    fn field_text(&self, node: &NodeId) -> Option<String> {
        let entry = &self.nodes[*node];
        if !entry.attached {
            return None;
        }
        match &entry.kind {
            MemKind::Field { text, .. } => Some(text.clone()),
            MemKind::Block { .. } => None,
        }
    }

    fn commit_field(&mut self, node: &NodeId, text: &str, cursor_at: usize) -> bool {
        let entry = &mut self.nodes[*node];
        if !entry.attached {
            return false;
        }
        match &mut entry.kind {
            MemKind::Field {
                text: value,
                cursor,
                selection,
            } => {
                *value = text.to_string();
                *cursor = Some(cursor_at);
                *selection = Some((cursor_at, cursor_at));
                self.focused = Some(*node);
                true
            }
            MemKind::Block { .. } => false,
        }
    }

    fn replace_range(&mut self, node: &NodeId, range: &MemRange, text: &str) -> bool {
        self.splice_region(node, range.start, range.end, text)
    }

    fn insert_at_range_end(&mut self, node: &NodeId, range: &MemRange, text: &str) -> bool {
        self.splice_region(node, range.end, range.end, text)
    }

    fn fire_input(&mut self, node: &NodeId) {
        self.nodes[*node].input_events += 1;
    }

    fn viewport(&self) -> (f32, f32) {
        self.viewport
    }
}

impl MemHost {
    fn splice_region(&mut self, node: &NodeId, start: usize, end: usize, text: &str) -> bool {
        let entry = &mut self.nodes[*node];
        if !entry.attached {
            return false;
        }
        match &mut entry.kind {
            MemKind::Block { text: value, .. } => {
                let Some(head) = value.get(..start) else {
                    return false;
                };
                let Some(tail) = value.get(end..) else {
                    return false;
                };
                *value = format!("{head}{text}{tail}");
                true
            }
            MemKind::Field { .. } => false,
        }
    }
}

// --- RECORDING COLLABORATORS ---

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Build,
    Show(Rect, Point),
    Hide,
    ShowAskWindow {
        context: Option<String>,
        title: String,
    },
    HideAskWindow,
    GrammarMode(bool),
    GrammarButton(bool),
    InsertReplaceButtons(bool),
    ShowImageButton(Rect),
    HideImageButton,
    Error(String),
    CopyFeedback(bool),
    SetInput(String),
}

#[derive(Default)]
pub struct UiLog {
    pub events: Vec<UiEvent>,
    pub pinned: bool,
    pub docked: bool,
    pub window_visible: bool,
    pub host_nodes: Vec<NodeId>,
}

/// UI renderer double: records every call, tracks window visibility.
pub struct RecordingUi(pub Rc<RefCell<UiLog>>);

impl ToolbarUi<MemHost> for RecordingUi {
    fn build(&mut self) {
        self.0.borrow_mut().events.push(UiEvent::Build);
    }

    fn show(&mut self, anchor: Rect, point: Point) {
        self.0.borrow_mut().events.push(UiEvent::Show(anchor, point));
    }

    fn hide(&mut self) {
        self.0.borrow_mut().events.push(UiEvent::Hide);
    }

    fn show_ask_window(&mut self, _anchor: Rect, context: Option<&str>, title: &str) {
        let mut log = self.0.borrow_mut();
        log.window_visible = true;
        log.events.push(UiEvent::ShowAskWindow {
            context: context.map(str::to_string),
            title: title.to_string(),
        });
    }

    fn hide_ask_window(&mut self) {
        let mut log = self.0.borrow_mut();
        log.window_visible = false;
        log.events.push(UiEvent::HideAskWindow);
    }

    fn is_window_visible(&self) -> bool {
        self.0.borrow().window_visible
    }

    fn is_pinned(&self) -> bool {
        self.0.borrow().pinned
    }

    fn is_docked(&self) -> bool {
        self.0.borrow().docked
    }

    fn is_host(&self, node: &NodeId) -> bool {
        self.0.borrow().host_nodes.contains(node)
    }

    fn set_grammar_mode(&mut self, enabled: bool, _snapshot: &SourceSnapshot<MemHost>) {
        self.0.borrow_mut().events.push(UiEvent::GrammarMode(enabled));
    }

    fn show_grammar_button(&mut self, visible: bool) {
        self.0
            .borrow_mut()
            .events
            .push(UiEvent::GrammarButton(visible));
    }

    fn show_insert_replace_buttons(&mut self, visible: bool) {
        self.0
            .borrow_mut()
            .events
            .push(UiEvent::InsertReplaceButtons(visible));
    }

    fn show_image_button(&mut self, rect: Rect) {
        self.0
            .borrow_mut()
            .events
            .push(UiEvent::ShowImageButton(rect));
    }

    fn hide_image_button(&mut self) {
        self.0.borrow_mut().events.push(UiEvent::HideImageButton);
    }

    fn show_error(&mut self, message: &str) {
        self.0
            .borrow_mut()
            .events
            .push(UiEvent::Error(message.to_string()));
    }

    fn show_copy_selection_feedback(&mut self, ok: bool) {
        self.0.borrow_mut().events.push(UiEvent::CopyFeedback(ok));
    }

    fn set_input_value(&mut self, text: &str) {
        self.0
            .borrow_mut()
            .events
            .push(UiEvent::SetInput(text.to_string()));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssistantEvent {
    Quick(QuickAction, String, Rect),
    ImageAnalyze(Url, Rect),
    Submit {
        question: String,
        context: String,
    },
    Retry,
    Cancel,
    ContinueChat(Option<SessionHandle>),
}

pub struct RecordingAssistant(pub Rc<RefCell<Vec<AssistantEvent>>>);

impl Assistant for RecordingAssistant {
    fn handle_quick_action(&mut self, kind: QuickAction, text: &str, anchor: Rect) {
        self.0
            .borrow_mut()
            .push(AssistantEvent::Quick(kind, text.to_string(), anchor));
    }

    fn handle_image_analyze(&mut self, src: &Url, rect: Rect) {
        self.0
            .borrow_mut()
            .push(AssistantEvent::ImageAnalyze(src.clone(), rect));
    }

    fn handle_submit_ask(&mut self, question: &str, context: &str) {
        self.0.borrow_mut().push(AssistantEvent::Submit {
            question: question.to_string(),
            context: context.to_string(),
        });
    }

    fn handle_retry(&mut self) {
        self.0.borrow_mut().push(AssistantEvent::Retry);
    }

    fn handle_cancel(&mut self) {
        self.0.borrow_mut().push(AssistantEvent::Cancel);
    }

    fn handle_continue_chat(&mut self, session: Option<&SessionHandle>) {
        self.0
            .borrow_mut()
            .push(AssistantEvent::ContinueChat(session.cloned()));
    }
}

#[derive(Default)]
pub struct ClipboardLog {
    pub writes: Vec<String>,
    pub fail: bool,
}

pub struct TestClipboard(pub Rc<RefCell<ClipboardLog>>);

impl Clipboard for TestClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut log = self.0.borrow_mut();
        if log.fail {
            return Err(ClipboardError("denied".to_string()));
        }
        log.writes.push(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HoverEvent {
    CancelHide,
    ScheduleHide,
}

#[derive(Default)]
pub struct HoverLog {
    pub image: Option<HoveredImage>,
    pub events: Vec<HoverEvent>,
}

pub struct TestHover(pub Rc<RefCell<HoverLog>>);

impl ImageHover for TestHover {
    fn current_image(&self) -> Option<HoveredImage> {
        self.0.borrow().image.clone()
    }

    fn cancel_hide(&mut self) {
        self.0.borrow_mut().events.push(HoverEvent::CancelHide);
    }

    fn schedule_hide(&mut self) {
        self.0.borrow_mut().events.push(HoverEvent::ScheduleHide);
    }
}

/// Timer double: the test pops scheduled tasks and feeds them back.
pub struct TestTimer(pub Rc<RefCell<Vec<(Duration, Deferred)>>>);

impl Timer for TestTimer {
    fn schedule(&mut self, delay: Duration, task: Deferred) {
        self.0.borrow_mut().push((delay, task));
    }
}
