pub mod actions; // Action vocabulary + string-protocol decoding
pub mod controller; // Wiring: events in, collaborator calls out
pub mod inject; // Write results back into the captured source
pub mod source; // Selection origin capture
pub mod visibility; // Hidden / compact / window state machine

pub use actions::Action;
pub use controller::ToolbarController;
pub use inject::inject;
pub use source::{capture, SourceSnapshot};
pub use visibility::{ToolbarState, VisibilityController, WindowMode};
