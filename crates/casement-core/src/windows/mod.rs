pub mod applescript;
pub mod errors;
pub mod host;
pub mod matcher;
pub mod system_events;
pub mod traits;
pub mod types;

pub use errors::WindowError;
pub use matcher::{available_windows, claimed_keys, group_keys, locate, match_key, matches};
pub use system_events::SystemEventsServer;
pub use traits::WindowServer;
pub use types::{LiveWindow, RaiseOutcome, WindowReference};
