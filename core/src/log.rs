//! Logging utilities
//!
//! Thin helpers over the `log` facade so every crate logs with the same
//! target and labels. The host decides where records go (`console_log` in
//! the browser, `env_logger` in the terminal).

const TARGET: &str = "battler";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{}", msg);
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{}", msg);
}

/// Log an error message
#[inline(always)]
pub fn error(msg: &str) {
    ::log::error!(target: TARGET, "{}", msg);
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{}] {}", label, msg);
}

/// Log an intent or request being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::info!(target: TARGET, "> {}: {}", name, details);
}

/// Log action result
#[inline(always)]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::info!(target: TARGET, "ok: {}", msg);
    } else {
        ::log::warn!(target: TARGET, "failed: {}", msg);
    }
}

/// Log a one-line summary of the client state
#[inline(always)]
pub fn state_summary(screen: &str, round: Option<u32>, moves_enabled: bool, log_lines: usize) {
    ::log::debug!(
        target: TARGET,
        "screen={} round={:?} moves_enabled={} log_lines={}",
        screen,
        round,
        moves_enabled,
        log_lines
    );
}
