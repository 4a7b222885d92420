use crate::api::{Department, ObjectRecord};
use crate::utils;

pub const EMPTY_STATE: &str = "no displayable objects for this page";

const GRID_CELL_WIDTH: usize = 34;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Grid,
    List,
}

impl DisplayMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Title for display: markup stripped, "Untitled" when the catalog has none.
/// Titles arrive as untrusted markup and are always reduced to plain text.
pub fn display_title(record: &ObjectRecord) -> String {
    let cleaned = utils::strip_markup(record.title.trim());
    if cleaned.is_empty() {
        "Untitled".to_string()
    } else {
        cleaned
    }
}

/// The origin line of the detail view: "culture, period" when both are
/// known, either one alone otherwise, and no line at all when neither is.
pub fn origin_line(culture: &str, period: &str) -> Option<String> {
    let culture = culture.trim();
    let period = period.trim();
    match (culture.is_empty(), period.is_empty()) {
        (false, false) => Some(format!("Origin: {culture}, {period}.")),
        (false, true) => Some(format!("Origin: {culture}.")),
        (true, false) => Some(format!("Origin: {period}.")),
        (true, true) => None,
    }
}

pub fn department_lines(departments: &[Department]) -> Vec<String> {
    let mut out = vec![format!("{:<6} {}", "ID", "Department")];
    for d in departments {
        out.push(format!("{:<6} {}", d.department_id, d.display_name));
    }
    out
}

pub fn list_lines(records: &[ObjectRecord]) -> Vec<String> {
    let mut out = vec![format!("{:<44} {:<28} {}", "Title", "Artist", "Date")];
    for r in records {
        out.push(format!(
            "{:<44} {:<28} {}",
            utils::truncate_ellipsis(&display_title(r), 42),
            utils::truncate_ellipsis(r.artist_display_name.trim(), 26),
            r.object_date.trim()
        ));
    }
    out
}

pub fn grid_lines(records: &[ObjectRecord], columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut out = Vec::new();
    for row in records.chunks(columns) {
        let titles: Vec<String> = row
            .iter()
            .map(|r| utils::truncate_ellipsis(&display_title(r), GRID_CELL_WIDTH))
            .collect();
        let artists: Vec<String> = row
            .iter()
            .map(|r| utils::truncate_ellipsis(r.artist_display_name.trim(), GRID_CELL_WIDTH))
            .collect();
        let thumbs: Vec<String> = row
            .iter()
            .map(|r| utils::truncate_ellipsis(r.primary_image_small.trim(), GRID_CELL_WIDTH))
            .collect();
        out.push(pad_row(&titles));
        out.push(pad_row(&artists));
        out.push(pad_row(&thumbs));
        out.push(String::new());
    }
    out
}

fn pad_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| format!("{c:<width$}", width = GRID_CELL_WIDTH))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Detail view of a single record. Absent fields are omitted, never rendered
/// as placeholders.
pub fn detail_lines(record: &ObjectRecord) -> Vec<String> {
    let mut out = Vec::new();
    if !record.department.trim().is_empty() {
        out.push(record.department.trim().to_string());
        out.push(String::new());
    }
    out.push(display_title(record));
    if !record.artist_display_name.trim().is_empty() {
        out.push(record.artist_display_name.trim().to_string());
    }
    if !record.object_date.trim().is_empty() {
        out.push(record.object_date.trim().to_string());
    }
    if !record.primary_image.trim().is_empty() {
        out.push(format!("Image: {}", record.primary_image.trim()));
    }
    if let Some(origin) = origin_line(&record.culture, &record.period) {
        out.push(origin);
    }
    if !record.medium.trim().is_empty() {
        out.push(format!("Technique: {}.", record.medium.trim()));
    }
    if !record.credit_line.trim().is_empty() {
        out.push(String::new());
        out.push(record.credit_line.trim().to_string());
    }
    out
}

/// Footer with the page position; a boundary control renders as a dash run,
/// the disabled-button analog.
pub fn page_footer(current_page: usize, total_pages: usize) -> String {
    let previous = if current_page > 1 { "< prev" } else { "------" };
    let next = if current_page < total_pages { "next >" } else { "------" };
    format!("[{previous}]  page {current_page}/{total_pages}  [{next}]")
}

pub fn render_text(records: &[ObjectRecord]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!("{} {}", r.object_id, display_title(r)));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(records: &[ObjectRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}
