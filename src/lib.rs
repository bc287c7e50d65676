//! A floating contextual-action toolbar controller.
//!
//! Attaches to a host document, tracks where each text selection came
//! from, and offers actions against it: copy, ask, translate, explain,
//! summarize, grammar-fix, image analysis. Results can be written back
//! into the surface the selection originated in, whether that surface is
//! an offset-addressable field or a rich-editable region.
//!
//! Rendering, image-hover detection, the streaming result pipeline, the
//! clipboard and the timer are collaborators behind traits, injected at
//! construction (see [`collab::Collaborators`]). The host document itself
//! is abstracted by [`host::Host`], so the controller runs unchanged on a
//! real document bridge or an in-memory double.

pub mod collab; // Collaborator contracts (UI, result pipeline, hover, clipboard, timer)
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod toolbar;

#[cfg(test)]
pub(crate) mod test_support;

pub use collab::{
    Assistant, Clipboard, Collaborators, Deferred, HoveredImage, ImageHover, QuickAction,
    SessionHandle, Timer, ToolbarUi,
};
pub use config::{load_config, save_config, ToolbarConfig};
pub use error::{ClipboardError, InjectionError};
pub use geometry::{Point, Rect};
pub use host::Host;
pub use toolbar::{
    capture, inject, Action, SourceSnapshot, ToolbarController, ToolbarState,
    VisibilityController, WindowMode,
};
