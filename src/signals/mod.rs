/*!
 * Signals Module
 * Guest signal dispositions, layouts and delivery work items
 */

pub mod action;
pub mod delivery;
pub mod table;
pub mod types;

// Re-export for convenience
pub use action::SigAction;
pub use delivery::{HandlerTask, SignalFunction};
pub use table::SignalTable;
pub use types::*;
