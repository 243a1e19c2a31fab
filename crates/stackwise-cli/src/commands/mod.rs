//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `shared` - Shared utilities (load_config, load_snapshot, open_service)
//! - `recommend` - Recommendation commands (recommend, summary)
//! - `analyze` - Diagnostics (analyze, readiness)
//! - `check` - New-supplement pre-check
//! - `config` - Effective configuration

pub mod analyze;
pub mod check;
pub mod config;
pub mod recommend;
pub mod shared;

// Re-export command functions for main.rs
pub use analyze::*;
pub use check::*;
pub use config::*;
pub use recommend::*;
pub use shared::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
