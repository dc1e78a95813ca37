use crate::ui::theme;
use crate::ui::Icons;
use indicatif::{HumanDuration, MultiProgress, ProgressBar};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinners for the three pipeline phases of `generate`
pub struct ProgressManager {
    mp: MultiProgress,
    scanning: ProgressBar,
    extracting: ProgressBar,
    rendering: ProgressBar,
}

impl ProgressManager {
    pub fn new() -> Self {
        let mp = MultiProgress::new();
        let scanning = Self::phase_bar(&mp, "Scanning repository");
        let extracting = Self::phase_bar(&mp, "Extracting API surface");
        let rendering = Self::phase_bar(&mp, "Rendering pages");

        Self {
            mp,
            scanning,
            extracting,
            rendering,
        }
    }

    fn phase_bar(mp: &MultiProgress, message: &str) -> ProgressBar {
        if !console::Term::stdout().is_term() {
            return ProgressBar::hidden();
        }
        mp.add(ProgressBar::new_spinner().with_message(message.to_string()))
    }

    pub fn start_scanning(&self) {
        self.scanning.enable_steady_tick(Duration::from_millis(100));
    }

    pub fn finish_scanning(&self, files: usize) {
        self.scanning.finish_with_message(format!("Scanned {} source files", files));
    }

    pub fn start_extracting(&self) {
        self.extracting.enable_steady_tick(Duration::from_millis(100));
    }

    pub fn finish_extracting(&self, containers: usize) {
        self.extracting.finish_with_message(format!("Extracted {} containers", containers));
    }

    pub fn start_rendering(&self) {
        self.rendering.enable_steady_tick(Duration::from_millis(100));
    }

    pub fn finish_rendering(&self, pages: usize) {
        self.rendering.finish_with_message(format!("Rendered {} pages", pages));
    }

    pub fn clear(&self) {
        self.mp.clear().ok();
    }

    pub fn finish_with_summary(&self, duration: Duration, files: usize, containers: usize, pages: usize) {
        self.clear();
        println!();
        println!(
            "{} {}",
            Icons::CHECK.style(theme().success.clone()),
            format!("Complete in {}", HumanDuration(duration)).style(theme().success.clone())
        );
        println!(
            "  {} {}  {} {}  {} {}",
            Icons::FILE.style(theme().info.clone()),
            files,
            Icons::PACKAGE.style(theme().info.clone()),
            containers,
            Icons::BOOK.style(theme().info.clone()),
            pages
        );
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
