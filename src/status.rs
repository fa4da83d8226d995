// Status display for a query.
//
// The computer reports phase transitions through the `Status` trait and
// never touches the terminal itself. `Spinner` draws them with indicatif,
// `Silent` drops them.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Observer notified by `Computer::ask` as the query progresses.
pub trait Status {
    /// The query has started.
    fn start(&mut self, message: &str);
    /// The query finished with a probability.
    fn succeed(&mut self, message: &str);
    /// The query failed; no probability will follow.
    fn fail(&mut self, message: &str);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Status for Silent {
    fn start(&mut self, _message: &str) {}
    fn succeed(&mut self, _message: &str) {}
    fn fail(&mut self, _message: &str) {}
}

pub const OK_GLYPH: &str = "✅";
pub const FAIL_GLYPH: &str = "💥";

const MOON: &[&str] = &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘", "🌑"];

/// Animated moon-phase spinner on stderr.
pub struct Spinner {
    bar: ProgressBar,
    done: ProgressStyle,
}

impl Spinner {
    /// Spinner drawing to stderr. Hidden when stderr is not a terminal.
    pub fn new() -> Result<Self, indicatif::style::TemplateError> {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// Spinner that never draws; final lines are still printed.
    pub fn hidden() -> Result<Self, indicatif::style::TemplateError> {
        Self::with_bar(ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden()))
    }

    fn with_bar(bar: ProgressBar) -> Result<Self, indicatif::style::TemplateError> {
        let spinning = ProgressStyle::with_template("{spinner} {msg}")?.tick_strings(MOON);
        let done = ProgressStyle::with_template("{msg}")?;
        bar.set_style(spinning);
        Ok(Spinner { bar, done })
    }

    /// Current status line, without the glyph while spinning.
    pub fn message(&self) -> String {
        self.bar.message()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    fn finish(&mut self, glyph: &str, message: &str) -> String {
        let line = format!("{glyph} {message}");
        self.bar.set_style(self.done.clone());
        self.bar.finish_with_message(line.clone());
        line
    }
}

impl Status for Spinner {
    fn start(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    fn succeed(&mut self, message: &str) {
        let line = self.finish(OK_GLYPH, message);
        if self.bar.is_hidden() {
            println!("{line}");
        }
    }

    fn fail(&mut self, message: &str) {
        let line = self.finish(FAIL_GLYPH, message);
        if self.bar.is_hidden() {
            eprintln!("{line}");
        }
    }
}
