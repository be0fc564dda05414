//! Table output formatting for prediction results using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::Convergence;

/// Table formatter for CLI output.
pub struct TableFormatter {
    /// Whether to use colors in output.
    use_colors: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Create a formatter, auto-detecting color support.
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Create a formatter with colors forced on or off.
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format predicted convergences as a table.
    pub fn format_convergences(&self, results: &[Convergence]) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Agents").add_attribute(Attribute::Bold),
            Cell::new("Meet In").add_attribute(Attribute::Bold),
            Cell::new("Probability").add_attribute(Attribute::Bold),
            Cell::new("Point (lon, lat)").add_attribute(Attribute::Bold),
            Cell::new("Venue").add_attribute(Attribute::Bold),
        ]);

        for result in results {
            let agents = result
                .agent_ids
                .iter()
                .map(|id| id.to_string()[..8].to_string())
                .collect::<Vec<_>>()
                .join(" + ");

            let probability = format!("{:.0}%", result.probability * 100.0);
            let probability_cell = if self.use_colors {
                Cell::new(&probability).fg(probability_color(result.probability))
            } else {
                Cell::new(&probability)
            };

            let venue = result
                .nearest_venue
                .as_ref()
                .map_or_else(|| "-".to_string(), |venue| venue.name.clone());

            table.add_row(vec![
                Cell::new(agents),
                Cell::new(format!("{:.0}s", result.time_to_meet_secs)),
                probability_cell,
                Cell::new(format!(
                    "{:.5}, {:.5}",
                    result.point.lon, result.point.lat
                )),
                Cell::new(venue),
            ]);
        }

        table.to_string()
    }
}

/// Color bucket for a probability value.
fn probability_color(probability: f64) -> Color {
    if probability >= 0.85 {
        Color::Green
    } else if probability >= 0.7 {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Whether the terminal supports (and the user wants) colored output.
fn supports_color() -> bool {
    env::var("NO_COLOR").is_err() && env::var("TERM").is_ok_and(|term| term != "dumb")
}
