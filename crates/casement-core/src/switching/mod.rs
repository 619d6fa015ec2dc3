pub mod active;
pub mod errors;
pub mod handler;
pub mod types;

pub use active::ActiveGroup;
pub use errors::SwitchError;
pub use handler::{minimize_all, restore_all, switch_to};
pub use types::{SwitchOutcome, SwitchResult};
