use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use crate::error::Result;
use crate::record::{DiagnosticGrade, FileRecord};
use crate::report::ScanReport;
use crate::status::IntegrityStatus;

use super::ReportFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(status: IntegrityStatus) -> &'static str {
        match status {
            IntegrityStatus::Intact => "✓",
            IntegrityStatus::Corrupted => "✗",
            IntegrityStatus::Inaccessible => "⚠",
            IntegrityStatus::Unknown => "?",
        }
    }

    const fn status_color(status: IntegrityStatus) -> &'static str {
        match status {
            IntegrityStatus::Intact => ansi::GREEN,
            IntegrityStatus::Corrupted => ansi::RED,
            IntegrityStatus::Inaccessible => ansi::YELLOW,
            IntegrityStatus::Unknown => ansi::CYAN,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_record(&self, record: &FileRecord, output: &mut Vec<u8>) {
        let status = record.integrity_status;
        let icon = Self::status_icon(status);
        let colored = self.colorize(&status.to_string(), Self::status_color(status));

        writeln!(output, "{icon} {colored}: {}", record.path.display()).ok();
        writeln!(
            output,
            "   Format: {} ({} bytes)",
            record.format, record.size
        )
        .ok();

        for diagnostic in &record.diagnostics {
            let grade = match diagnostic.grade {
                DiagnosticGrade::Info => "note",
                DiagnosticGrade::Unknown => "warn",
                DiagnosticGrade::Corrupted => "fail",
            };
            writeln!(output, "   [{grade}] {}", diagnostic.message).ok();
        }
    }

    fn format_summary(&self, report: &ScanReport) -> String {
        let s = &report.summary;
        let intact = self.colorize(&s.intact.to_string(), ansi::GREEN);
        let corrupted = self.colorize(&s.corrupted.to_string(), ansi::RED);
        let inaccessible = self.colorize(&s.inaccessible.to_string(), ansi::YELLOW);
        let unknown = self.colorize(&s.unknown.to_string(), ansi::CYAN);

        let mut summary = format!(
            "Summary: {} files scanned, {intact} intact ({}%), {corrupted} corrupted ({}%), \
             {inaccessible} inaccessible ({}%), {unknown} unknown ({}%)",
            s.total,
            s.percentage(s.intact),
            s.percentage(s.corrupted),
            s.percentage(s.inaccessible),
            s.percentage(s.unknown),
        );

        if self.verbose >= 1 && !report.format_counts.is_empty() {
            let formats = report
                .format_counts
                .iter()
                .map(|(tag, count)| format!("{tag}={count}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(summary, "\nFormats: {formats}");
        }

        summary
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut output = Vec::new();

        // Problem files first, worst grade leading.
        for status in [
            IntegrityStatus::Corrupted,
            IntegrityStatus::Inaccessible,
            IntegrityStatus::Unknown,
        ] {
            for record in report.with_status(status) {
                self.format_record(record, &mut output);
                writeln!(output).ok();
            }
        }

        // Intact files only in verbose mode.
        if self.verbose >= 1 {
            for record in report.with_status(IntegrityStatus::Intact) {
                self.format_record(record, &mut output);
                writeln!(output).ok();
            }
        }

        writeln!(output, "{}", self.format_summary(report)).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
