//! Injectable progress reporting
//!
//! The core and the workflow report through this trait instead of
//! calling a process-global logger, so they stay pure and testable.

use console::style;

/// Sink for run progress and per-item diagnostics.
pub trait Reporter {
    fn group(&self, title: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Reporter that styles output for a terminal.
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        ConsoleReporter { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn group(&self, title: &str) {
        println!("\n{}", style(title).bold());
    }

    fn info(&self, message: &str) {
        println!("{} {}", style("→").yellow(), message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", style("WARN:").red().bold(), message);
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("·").dim(), style(message).dim());
        }
    }
}

/// Reporter that swallows everything. Used in tests.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn group(&self, _title: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}
