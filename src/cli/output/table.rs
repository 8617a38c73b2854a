//! Table output formatting for CLI commands
//!
//! Provides formatted table output for subgoals, combinations, and iteration
//! history using comfy-table. Supports color-coded cells, automatic column
//! sizing, and accessibility features.

use crate::domain::models::{Combination, Iteration, RunStatus, Subgoal};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format the current subgoal set as a table
    pub fn format_subgoals(&self, subgoals: &[Subgoal]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Subgoal").add_attribute(Attribute::Bold),
            Cell::new("Probability").add_attribute(Attribute::Bold),
            Cell::new("Resonance").add_attribute(Attribute::Bold),
            Cell::new("Active").add_attribute(Attribute::Bold),
        ]);

        for subgoal in subgoals {
            let active = if subgoal.is_active { "yes" } else { "-" };
            let active_cell = if self.use_colors && subgoal.is_active {
                Cell::new(active).fg(Color::Green)
            } else {
                Cell::new(active)
            };

            table.add_row(vec![
                Cell::new(subgoal.id),
                Cell::new(truncate_text(&subgoal.text, 48)),
                Cell::new(format!("{:.4}", subgoal.probability)),
                Cell::new(format!("{:.3}", subgoal.resonance_score)),
                active_cell,
            ]);
        }

        table.to_string()
    }

    /// Format the ranked combinations of a scoring pass as a table
    pub fn format_combinations(&self, combinations: &[Combination]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Rank").add_attribute(Attribute::Bold),
            Cell::new("Triple").add_attribute(Attribute::Bold),
            Cell::new("Probability").add_attribute(Attribute::Bold),
            Cell::new("Amplitude").add_attribute(Attribute::Bold),
            Cell::new("Frequency").add_attribute(Attribute::Bold),
        ]);

        for (rank, combination) in combinations.iter().enumerate() {
            let probability = format!("{:.6}", combination.probability);
            let probability_cell = if self.use_colors && rank == 0 {
                Cell::new(probability).fg(Color::Cyan)
            } else {
                Cell::new(probability)
            };

            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&combination.id),
                probability_cell,
                Cell::new(format!("{:.3}", combination.resonance_amplitude)),
                Cell::new(format!("{:.2}", combination.frequency)),
            ]);
        }

        table.to_string()
    }

    /// Format the iteration history as a table
    pub fn format_iterations(&self, iterations: &[Iteration]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Best probability").add_attribute(Attribute::Bold),
            Cell::new("Resonance").add_attribute(Attribute::Bold),
            Cell::new("Convergence rate").add_attribute(Attribute::Bold),
            Cell::new("Complete").add_attribute(Attribute::Bold),
        ]);

        for iteration in iterations {
            let complete = if iteration.is_complete { "yes" } else { "-" };
            let complete_cell = if self.use_colors && iteration.is_complete {
                Cell::new(complete).fg(Color::Green)
            } else {
                Cell::new(complete)
            };

            table.add_row(vec![
                Cell::new(iteration.id),
                Cell::new(format!("{:.6}", iteration.best_probability)),
                Cell::new(format!("{:.3}", iteration.resonance_score)),
                Cell::new(format!("{:+.6}", iteration.convergence_rate)),
                complete_cell,
            ]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        // Apply max width if set
        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

/// Human-readable label for a terminal run status
pub fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Idle => "idle",
        RunStatus::Running => "running",
        RunStatus::Converged => "converged",
        RunStatus::Capped => "iteration cap reached",
        RunStatus::Stopped => "stopped",
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        format!("{}...", &text[..max_len.saturating_sub(3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a very long subgoal text", 10), "a very ...");
    }

    #[test]
    fn test_format_subgoals_includes_every_row() {
        let formatter = TableFormatter::with_config(false, None);
        let subgoals = vec![
            Subgoal::new(0, "First subgoal", 0.05, 1.0),
            Subgoal::new(1, "Second subgoal", 0.07, 1.5),
        ];

        let rendered = formatter.format_subgoals(&subgoals);
        assert!(rendered.contains("First subgoal"));
        assert!(rendered.contains("Second subgoal"));
        assert!(rendered.contains("0.0500"));
    }

    #[test]
    fn test_format_iterations_marks_completion() {
        let formatter = TableFormatter::with_config(false, None);
        let iterations = vec![Iteration {
            id: 1,
            goal: "goal".to_string(),
            best_probability: 0.97,
            resonance_score: 1.2,
            convergence_rate: 0.0,
            is_complete: true,
            recorded_at: chrono::Utc::now(),
        }];

        let rendered = formatter.format_iterations(&iterations);
        assert!(rendered.contains("yes"));
        assert!(rendered.contains("0.970000"));
    }
}
