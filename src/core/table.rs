use crate::domain::model::{Artwork, PageWindow};
use crate::domain::selection::SelectionSet;
use crate::utils::error::{Result, TableError};

pub const COLUMNS: [&str; 6] = [
    "Title",
    "Place of Origin",
    "Artist",
    "Inscriptions",
    "Date Start",
    "Date End",
];

const MAX_CELL_WIDTH: usize = 28;

/// Cell values in column order. Absent values render as empty cells.
pub fn cells(artwork: &Artwork) -> [String; 6] {
    [
        artwork.title.clone().unwrap_or_default(),
        artwork.place_of_origin.clone().unwrap_or_default(),
        artwork.artist_display.clone().unwrap_or_default(),
        artwork.inscriptions.clone().unwrap_or_default(),
        artwork.date_start.map(|d| d.to_string()).unwrap_or_default(),
        artwork.date_end.map(|d| d.to_string()).unwrap_or_default(),
    ]
}

fn fit(value: &str) -> String {
    // Multi-line artist/inscription text collapses onto one row.
    let flat = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut truncated: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Renders the displayed page as a fixed-width text grid with a checkbox column.
pub fn render_page(records: &[Artwork], selection: &SelectionSet, window: &PageWindow) -> String {
    let header: Vec<String> = ["[ ]".to_string(), "ID".to_string()]
        .into_iter()
        .chain(COLUMNS.iter().map(|c| c.to_string()))
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|artwork| {
            let checkbox = if selection.contains(artwork.id) {
                "[x]"
            } else {
                "[ ]"
            };
            [checkbox.to_string(), artwork.id.to_string()]
                .into_iter()
                .chain(cells(artwork).iter().map(|c| fit(c)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format_row(&header));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    if rows.is_empty() {
        lines.push("(no records)".to_string());
    }
    for row in &rows {
        lines.push(format_row(row));
    }
    lines.push(footer(window, selection));

    lines.join("\n")
}

pub fn footer(window: &PageWindow, selection: &SelectionSet) -> String {
    format!(
        "Page {} of {} | {} rows per page | {} records | {} selected",
        window.page_number,
        window.total_pages().max(1),
        window.page_size,
        window.total_records,
        selection.len()
    )
}

/// One line per selected artwork, in selection order.
pub fn render_selection(selection: &SelectionSet) -> String {
    if selection.is_empty() {
        return "No artworks selected".to_string();
    }
    selection
        .records()
        .iter()
        .enumerate()
        .map(|(i, artwork)| {
            format!(
                "{:>4}. {} {}",
                i + 1,
                artwork.id,
                fit(artwork.title.as_deref().unwrap_or_default())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_csv(selection: &SelectionSet) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(std::iter::once("ID").chain(COLUMNS))?;
    for artwork in selection.records() {
        let id = artwork.id.to_string();
        let cells = cells(artwork);
        writer.write_record(std::iter::once(id.as_str()).chain(cells.iter().map(String::as_str)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn export_json(selection: &SelectionSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(selection.records())?)
}
