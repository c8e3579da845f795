// src/logger.rs
// =============================================================================
// A tiny console logger with three channels:
//
// - setup():    service startup chatter, only shown with --verbose
// - run():      per-route progress lines, always shown
// - complete(): the final summary line, always shown
//
// We deliberately don't pull in a logging framework: this is a short-lived
// CLI tool and plain println! keeps stdout predictable.
// =============================================================================

// Copy is fine here: the logger is just a bool
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Logger { verbose }
    }

    /// Startup chatter (host listening, browser launched, ...)
    pub fn setup(&self, msg: &str) {
        if self.verbose {
            println!("🔧 SETUP: {}", msg);
        }
    }

    /// Per-route progress
    pub fn run(&self, msg: &str) {
        println!("  -> {}", msg);
    }

    /// Final summary
    pub fn complete(&self, msg: &str) {
        println!("✨ {}", msg);
    }

    /// Non-fatal problems (teardown hiccups and the like)
    pub fn warn(&self, msg: &str) {
        eprintln!("⚠️  Warning: {}", msg);
    }

    /// Fatal failures, just before the process exits non-zero
    pub fn error(&self, msg: &str) {
        eprintln!("❌ {}", msg);
    }
}
