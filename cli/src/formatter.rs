//! Output formatters for entity lists.
//!
//! Renders hotels, rooms, bookings and users either as box-drawing tables
//! sized to the terminal, or as JSON.

use serde::Serialize;
use staybook_link::{Booking, Hotel, Room, User};

use crate::error::{CliError, Result};
use crate::session::OutputFormat;

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

/// Minimum column width when resizing to fit the terminal
const MIN_COLUMN_WIDTH: usize = 6;

/// Formats entity lists for display
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// Get terminal width, defaulting to 80 if unavailable
    fn terminal_width() -> usize {
        if let Some((w, _h)) = term_size::dimensions() {
            w
        } else {
            80
        }
    }

    /// Truncate a string to max width with ellipsis
    fn truncate_value(value: &str, max_width: usize) -> String {
        if value.chars().count() <= max_width {
            value.to_string()
        } else if max_width <= 3 {
            value.chars().take(max_width).collect()
        } else {
            let take = max_width - 3;
            format!("{}...", value.chars().take(take).collect::<String>())
        }
    }

    /// Render a list of hotels
    pub fn hotels(&self, hotels: &[Hotel]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(hotels),
            OutputFormat::Table => Ok(render_table(
                &["ID", "NUMBER", "NAME", "LOCATION", "PRICE/NIGHT", "RATING"],
                hotels
                    .iter()
                    .map(|h| {
                        vec![
                            h.id.clone(),
                            h.hotel_number.clone().unwrap_or_default(),
                            h.name.clone(),
                            h.location.clone(),
                            format!("{:.2}", h.price_per_night),
                            h.rating.map(|r| format!("{:.1}", r)).unwrap_or_default(),
                        ]
                    })
                    .collect(),
            )),
        }
    }

    /// Render a list of rooms
    pub fn rooms(&self, rooms: &[Room]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(rooms),
            OutputFormat::Table => Ok(render_table(
                &["ID", "ROOM NO.", "TYPE", "PRICE/NIGHT", "HOTEL", "AVAILABLE"],
                rooms
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.clone(),
                            r.room_number.clone(),
                            r.room_type.clone(),
                            format!("{:.2}", r.price_per_night),
                            r.hotel_id.clone().unwrap_or_default(),
                            if r.available { "yes" } else { "no" }.to_string(),
                        ]
                    })
                    .collect(),
            )),
        }
    }

    /// Render a list of bookings
    pub fn bookings(&self, bookings: &[Booking]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(bookings),
            OutputFormat::Table => Ok(render_table(
                &["BOOKING NO.", "USER", "HOTEL", "ROOM", "FROM", "TO", "STATUS"],
                bookings
                    .iter()
                    .map(|b| {
                        vec![
                            b.booking_number.clone(),
                            b.display_username().to_string(),
                            b.display_hotel_name().to_string(),
                            b.room_number.clone().unwrap_or_default(),
                            b.from_date.to_string(),
                            b.to_date.to_string(),
                            b.status.to_string(),
                        ]
                    })
                    .collect(),
            )),
        }
    }

    /// Render a list of users
    pub fn users(&self, users: &[User]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(users),
            OutputFormat::Table => Ok(render_table(
                &["ID", "USERNAME", "EMAIL", "ROLE"],
                users
                    .iter()
                    .map(|u| {
                        vec![
                            u.id.clone(),
                            u.username.clone(),
                            u.email.clone(),
                            u.role.to_string(),
                        ]
                    })
                    .collect(),
            )),
        }
    }

    fn json<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| CliError::Format(e.to_string()))
    }
}

/// Render a box-drawing table fitted to the terminal width.
fn render_table(columns: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "(0 rows)\n".to_string();
    }

    let terminal_width = OutputFormatter::terminal_width();

    let mut col_widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(value.chars().count());
            }
        }
    }

    let column_count = col_widths.len();
    if column_count > 0 {
        let border_padding = column_count * 3 + 1;
        let mut available = terminal_width.saturating_sub(border_padding);
        if available < column_count {
            available = column_count;
        }

        // Only shrink when the natural width exceeds the terminal
        let mut total_width: usize = col_widths.iter().sum();
        if total_width > available {
            for width in col_widths.iter_mut() {
                if *width > MAX_COLUMN_WIDTH {
                    *width = MAX_COLUMN_WIDTH;
                }
            }
            total_width = col_widths.iter().sum();

            while total_width > available {
                if let Some((idx, _)) = col_widths
                    .iter()
                    .enumerate()
                    .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
                    .max_by_key(|(_, width)| *width)
                {
                    col_widths[idx] -= 1;
                } else if let Some((idx, _)) = col_widths
                    .iter()
                    .enumerate()
                    .filter(|(_, width)| **width > 1)
                    .max_by_key(|(_, width)| *width)
                {
                    col_widths[idx] -= 1;
                } else {
                    break;
                }
                total_width = col_widths.iter().sum();
            }
        }
    }

    let mut output = String::new();

    let border = |output: &mut String, left: char, mid: char, right: char| {
        output.push(left);
        for (idx, width) in col_widths.iter().enumerate() {
            output.push_str(&"─".repeat(width + 2));
            output.push(if idx == col_widths.len() - 1 { right } else { mid });
        }
        output.push('\n');
    };

    border(&mut output, '┌', '┬', '┐');

    output.push('│');
    for (i, col) in columns.iter().enumerate() {
        let truncated = OutputFormatter::truncate_value(col, col_widths[i]);
        output.push_str(&format!(" {:width$} │", truncated, width = col_widths[i]));
    }
    output.push('\n');

    border(&mut output, '├', '┼', '┤');

    for row in &rows {
        output.push('│');
        for (i, value) in row.iter().enumerate() {
            let truncated = OutputFormatter::truncate_value(value, col_widths[i]);
            output.push_str(&format!(" {:width$} │", truncated, width = col_widths[i]));
        }
        output.push('\n');
    }

    border(&mut output, '└', '┴', '┘');

    let row_count = rows.len();
    let row_label = if row_count == 1 { "row" } else { "rows" };
    output.push_str(&format!("({} {})\n", row_count, row_label));

    output
}
