//! Source capture: where did the current selection come from?
//!
//! The snapshot is taken once per qualifying selection event, before any
//! UI is shown, so later actions (grammar fix in particular) keep a stable
//! target even after the live selection moves into the toolbar.

use std::fmt;

use crate::host::Host;

/// The captured origin of a selection.
///
/// Exactly one variant is active at a time; a new selection event replaces
/// the snapshot wholesale, never merges into it.
pub enum SourceSnapshot<H: Host + ?Sized> {
    /// The selection lies in non-editable content.
    None,
    /// An offset-addressable field plus byte offsets into its flat value
    /// at capture time. Invariant: `start <= end`.
    Offset {
        element: H::Node,
        start: usize,
        end: usize,
    },
    /// A rich-editable region plus a cloned range. The clone stays valid
    /// after the live selection changes; the live range would not.
    Range { element: H::Node, range: H::Range },
}

impl<H: Host + ?Sized> SourceSnapshot<H> {
    pub fn is_none(&self) -> bool {
        matches!(self, SourceSnapshot::None)
    }
}

impl<H: Host + ?Sized> Clone for SourceSnapshot<H> {
    fn clone(&self) -> Self {
        match self {
            SourceSnapshot::None => SourceSnapshot::None,
            SourceSnapshot::Offset {
                element,
                start,
                end,
            } => SourceSnapshot::Offset {
                element: element.clone(),
                start: *start,
                end: *end,
            },
            SourceSnapshot::Range { element, range } => SourceSnapshot::Range {
                element: element.clone(),
                range: range.clone(),
            },
        }
    }
}

impl<H: Host + ?Sized> fmt::Debug for SourceSnapshot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSnapshot::None => write!(f, "SourceSnapshot::None"),
            SourceSnapshot::Offset { start, end, .. } => {
                write!(f, "SourceSnapshot::Offset {{ start: {start}, end: {end} }}")
            }
            SourceSnapshot::Range { .. } => write!(f, "SourceSnapshot::Range"),
        }
    }
}

/// Inspect the host's focus/selection state and record where a future
/// insertion should land. Pure read.
///
/// 1. A focused offset-addressable field with a non-collapsed internal
///    selection wins.
/// 2. Otherwise walk the ancestors of the selection's common container up
///    to the document root looking for a rich-editable region.
/// 3. Otherwise the selection has no editable origin.
pub fn capture<H: Host>(host: &H) -> SourceSnapshot<H> {
    if let Some(focused) = host.focused_node() {
        if let Some((start, end)) = host.field_selection(&focused) {
            if start != end {
                // Normalize so downstream offset math never sees a
                // reversed span.
                let (start, end) = if start <= end { (start, end) } else { (end, start) };
                return SourceSnapshot::Offset {
                    element: focused,
                    start,
                    end,
                };
            }
        }
    }

    let mut node = host.selection_container();
    while let Some(current) = node {
        if host.is_rich_editable(&current) {
            if let Some(range) = host.clone_selection_range() {
                return SourceSnapshot::Range {
                    element: current,
                    range,
                };
            }
            break;
        }
        node = host.parent(&current);
    }

    SourceSnapshot::None
}
