//! Abstraction over the host document the toolbar attaches to.
//!
//! The controller never touches a concrete document API. The embedder
//! implements [`Host`] on top of whatever it renders into (a DOM bridge, an
//! accessibility tree, an in-memory document in tests) and the controller
//! drives it through this trait alone.

use crate::geometry::Rect;

/// The host document: selection reads plus the mutations text injection
/// needs.
///
/// Two structurally different editable surfaces exist:
///
/// * **Offset-addressable fields** (single-line or plain multi-line inputs)
///   whose selection is a pair of byte offsets into a flat string value.
/// * **Rich-editable regions** whose selection is an opaque structural
///   range. Ranges handed out by [`Host::clone_selection_range`] must stay
///   valid after the live selection changes; the live range itself would
///   not.
pub trait Host {
    /// Handle to a document element. Cheap to clone.
    type Node: Clone + PartialEq;
    /// A cloned structural range inside a rich-editable region.
    type Range: Clone;

    // --- Selection reads (pure) ---

    /// Plain text of the current selection, untrimmed.
    fn selection_text(&self) -> String;

    /// Bounding rect of the primary selection range.
    fn selection_rect(&self) -> Option<Rect>;

    /// The currently focused element, if any.
    fn focused_node(&self) -> Option<Self::Node>;

    /// Internal selection bounds of an offset-addressable field. `None`
    /// when `node` is not such a field or reports no selection. Offsets
    /// index into the field's flat string value.
    fn field_selection(&self, node: &Self::Node) -> Option<(usize, usize)>;

    /// Common container element of the primary selection range.
    fn selection_container(&self) -> Option<Self::Node>;

    /// Parent element, `None` at the document root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` is flagged as a rich-editable region.
    fn is_rich_editable(&self, node: &Self::Node) -> bool;

    /// Clone of the primary live range. The clone must survive subsequent
    /// changes to the live selection.
    fn clone_selection_range(&self) -> Option<Self::Range>;

    // --- Injection surface ---

    /// Current flat value of an offset-addressable field. `None` when the
    /// element is detached from the document or is not a field.
    fn field_text(&self, node: &Self::Node) -> Option<String>;

    /// Focus the field, set its full value and place the collapsed cursor
    /// at `cursor`. Must be atomic: either the whole commit applies or
    /// nothing does. Returns `false` when the element is detached.
    fn commit_field(&mut self, node: &Self::Node, text: &str, cursor: usize) -> bool;

    /// Restore `range` as the live selection inside `node`, delete its
    /// contents and insert `text` in its place, leaving a collapsed cursor
    /// after the inserted text. Returns `false` on failure with nothing
    /// mutated.
    fn replace_range(&mut self, node: &Self::Node, range: &Self::Range, text: &str) -> bool;

    /// Collapse `range` to its end boundary and insert `text` there.
    /// Returns `false` on failure with nothing mutated.
    fn insert_at_range_end(&mut self, node: &Self::Node, range: &Self::Range, text: &str) -> bool;

    /// Synthesize an input-changed notification on `node` so host-side
    /// listeners observe the mutation.
    fn fire_input(&mut self, node: &Self::Node);

    /// Viewport size, used to synthesize the centered entry rect for the
    /// no-context invocation.
    fn viewport(&self) -> (f32, f32);
}
