//! Menu bar: a row of labels, each owning a submenu that drops down while the
//! bar is open and the label is active.
//!
//! - [`state`] holds the activation state machine.
//! - [`descriptor`] describes the children a caller hands the bar.
//! - [`projection`] derives per-child props on every render.
//! - [`menubar_component`] wires it all to the terminal.
pub mod descriptor;
pub mod menubar_component;
pub mod projection;
pub mod state;

pub use descriptor::{DeclaredAction, MenuDescriptor, MenubarChild};
pub use menubar_component::{MenubarComponent, MenubarLayout, MenubarProps};
pub use projection::{ChildProjection, ItemProjection, ProjectionContext, project_children};
pub use state::{ActivationState, OnSetOpen};
