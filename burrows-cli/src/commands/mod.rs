//! Command implementations for the Burrows CLI.

pub mod completions;
pub mod hexdump;
pub mod stage;
pub mod stats;

pub use completions::cmd_completions;
pub use hexdump::cmd_hexdump;
pub use stage::cmd_stage;
pub use stats::cmd_stats;
