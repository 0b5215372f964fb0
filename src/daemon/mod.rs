// ABOUTME: Background daemon startup and readiness polling.
// ABOUTME: Both steps are best-effort; failures only become warnings.

mod bootstrap;
mod readiness;

pub use bootstrap::bootstrap;
pub use readiness::{Readiness, wait_until_ready};
