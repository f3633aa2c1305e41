/*!
 * Guest Module
 * Capabilities consumed from the instruction emulator
 */

pub mod simulation;
pub mod traits;
pub mod types;

// Re-export public API
pub use simulation::SimulatedGuest;
pub use traits::{Backend, Emulator, GuestMemory, RegisterContext};
pub use types::{Arch, MemoryError, MemoryResult};
