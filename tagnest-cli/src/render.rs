//! Plain-text rendering of reports and step replays.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use tagnest_core::{Report, Step, TagStatus};

/// Applies terminal colors, or not.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    /// Whether to emit ANSI color codes.
    pub color: bool,
}

impl Paint {
    fn good(self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn bad(self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn status(self, status: TagStatus) -> String {
        let label = status.to_string();
        match status {
            TagStatus::Matched => self.good(&label),
            TagStatus::Unmatched | TagStatus::Unclosed => self.bad(&label),
        }
    }
}

/// Stack shown top first, as `<b> <a>`.
fn stack_top_first(stack: &[String]) -> String {
    if stack.is_empty() {
        return "(empty)".to_string();
    }
    stack
        .iter()
        .rev()
        .map(|name| format!("<{name}>"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line verdict.
#[must_use]
pub fn status_line(report: &Report, paint: Paint) -> String {
    if report.is_valid() {
        paint.good("Valid markup!")
    } else {
        paint.bad(&format!(
            "Invalid markup - {} error(s)",
            report.counts.error_count
        ))
    }
}

/// Full text report: verdict, summary, errors and optionally every tag.
#[must_use]
pub fn render_report(report: &Report, source_name: &str, show_tokens: bool, paint: Paint) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {source_name} ===");
    let _ = writeln!(out, "{}", status_line(report, paint));
    let _ = writeln!(out);

    let counts = report.counts;
    let _ = writeln!(out, "=== Summary ===");
    let _ = writeln!(out, "  Total tags found: {}", counts.total);
    let _ = writeln!(out, "  Opening tags: {}", counts.opening);
    let _ = writeln!(out, "  Closing tags: {}", counts.closing);
    let _ = writeln!(out, "  Errors found: {}", counts.error_count);
    let _ = writeln!(out);

    if report.is_valid() {
        let _ = writeln!(
            out,
            "{} All tags are properly matched and nested.",
            paint.good("Success!")
        );
    } else {
        let _ = writeln!(out, "=== Errors ({}) ===", report.errors.len());
        for (i, error) in report.errors.iter().enumerate() {
            let kind = format!("[{}]", error.kind());
            let _ = writeln!(out, "  {:3}. {} {error}", i + 1, paint.bad(&kind));
        }
    }

    if show_tokens {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Tags ({}) ===", report.tokens.len());
        for (token, result) in report.tokens.iter().zip(&report.matches) {
            let partner = result
                .partner
                .map_or_else(String::new, |p| format!(" <-> {p}"));
            let _ = writeln!(
                out,
                "  {:3}: {:<24} {} {}{}",
                result.index,
                token.raw,
                paint.dim(&format!("line {:<4}", token.line)),
                paint.status(result.status),
                partner
            );
        }
    }

    out
}

/// Text for one replay step, including the stack after it.
#[must_use]
pub fn render_step(step: &Step, paint: Paint) -> String {
    let message = step.action.to_string();
    let message = if step.action.is_error() {
        paint.bad(&message)
    } else {
        message
    };
    format!(
        "Step {}: {message}\n    {} {}",
        step.number,
        paint.dim("stack (top first):"),
        stack_top_first(&step.stack)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagnest_core::{analyze, steps};

    const PLAIN: Paint = Paint { color: false };

    #[test]
    fn test_valid_report_text() {
        let report = analyze("<a><b></b></a>").unwrap();
        let text = render_report(&report, "<inline>", false, PLAIN);
        assert!(text.starts_with("=== <inline> ===\nValid markup!\n"));
        assert!(text.contains("  Total tags found: 4\n"));
        assert!(text.contains("Success! All tags are properly matched and nested."));
        assert!(!text.contains("=== Tags"));
    }

    #[test]
    fn test_invalid_report_lists_errors_in_order() {
        let report = analyze("<a></b>").unwrap();
        let text = render_report(&report, "x.html", false, PLAIN);
        assert!(text.contains("Invalid markup - 2 error(s)"));
        let mismatch = text.find("[mismatch]").unwrap();
        let unclosed = text.find("[unclosed] Unclosed tag '<a>'").unwrap();
        assert!(mismatch < unclosed);
    }

    #[test]
    fn test_tag_listing_shows_status_and_partner() {
        let report = analyze("<a></a></b>").unwrap();
        let text = render_report(&report, "x", true, PLAIN);
        assert!(text.contains("=== Tags (3) ==="));
        assert!(text.contains("Matched <-> 1"));
        assert!(text.contains("Unmatched"));
    }

    #[test]
    fn test_step_text() {
        let tokens = tagnest_core::tokenize("<a><b>");
        let all: Vec<Step> = steps(&tokens).collect();
        assert_eq!(
            render_step(&all[1], PLAIN),
            "Step 2: Pushed '<b>' onto stack\n    stack (top first): <b> <a>"
        );
        assert_eq!(
            render_step(&all[3], PLAIN),
            "Step 4: Error: Unclosed tag '<a>' found\n    stack (top first): (empty)"
        );
    }
}
