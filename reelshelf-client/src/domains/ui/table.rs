//! Plain-text rendering of catalog rows for the terminal.

use std::fmt::Write as _;

use reelshelf_model::{Record, SortColumn};

const WIDTHS: [usize; 5] = [6, 32, 22, 12, 8];

fn cell(column: SortColumn, record: &Record) -> String {
    match column {
        SortColumn::Id => record.id.to_string(),
        SortColumn::Title => record.title.clone(),
        SortColumn::Director => record.director.clone(),
        SortColumn::ReleaseYear => record
            .year_facet()
            .map(|y| y.to_string())
            .unwrap_or_default(),
        SortColumn::MediaType => record.media_type.label().to_string(),
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn header_line() -> String {
    SortColumn::all()
        .iter()
        .zip(WIDTHS)
        .map(|(column, width)| fit(column.header(), width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

pub fn row_line(record: &Record) -> String {
    SortColumn::all()
        .iter()
        .zip(WIDTHS)
        .map(|(column, width)| fit(&cell(*column, record), width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Header plus one line per record, in the given order.
pub fn render<'a>(records: impl IntoIterator<Item = &'a Record>) -> String {
    let mut out = header_line();
    out.push('\n');
    for record in records {
        let _ = writeln!(out, "{}", row_line(record));
    }
    out
}

/// Multi-line detail block for a single record
pub fn render_detail(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", record.id, record.title);
    let _ = writeln!(out, "  Director: {}", record.director);
    if let Some(year) = record.year_facet() {
        let _ = writeln!(out, "  Year:     {year}");
    }
    let _ = writeln!(out, "  Type:     {}", record.media_type.label());
    if let Some(minutes) = record.duration_minutes {
        let _ = writeln!(out, "  Duration: {minutes} min");
    }
    if let Some(budget) = record.budget {
        let _ = writeln!(out, "  Budget:   {budget}");
    }
    if let Some(location) = record.location.as_deref().filter(|l| !l.is_empty()) {
        let _ = writeln!(out, "  Location: {location}");
    }
    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  {description}");
    }
    if let Some(url) = record.poster_url() {
        let _ = writeln!(out, "  Poster:   {}", shorten_url(url));
    }
    for image in &record.gallery {
        let _ = writeln!(out, "  Image:    {}", shorten_url(&image.url));
    }
    if let Some(created) = record.created_at {
        let _ = writeln!(out, "  Added:    {}", created.format("%Y-%m-%d %H:%M UTC"));
    }
    out
}

fn shorten_url(url: &str) -> String {
    if url.starts_with("data:") {
        let mime = url.trim_start_matches("data:").split(';').next().unwrap_or("");
        format!("<inline {mime}>")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelshelf_model::MediaKind;

    #[test]
    fn long_titles_are_truncated() {
        let record = Record::new(
            7,
            "An Extraordinarily Long Title That Will Not Fit",
            "Someone",
            2001,
            MediaKind::Movie,
        );
        let line = row_line(&record);
        assert!(line.starts_with("7      An Extraordinarily Long Title T…"));
    }

    #[test]
    fn zero_year_renders_blank() {
        let record = Record::new(1, "Untitled", "", 0, MediaKind::TvShow);
        assert!(!row_line(&record).contains(" 0 "));
    }

    #[test]
    fn detail_shows_creation_date() {
        let mut record = Record::new(3, "Arrival", "Denis Villeneuve", 2016, MediaKind::Movie);
        record.created_at = chrono::DateTime::from_timestamp(1_700_000_000, 0);
        let detail = render_detail(&record);
        assert!(detail.starts_with("#3 Arrival\n"));
        assert!(detail.contains("  Added:    2023-11-14 22:13 UTC\n"));
    }

    #[test]
    fn inline_images_are_not_dumped() {
        assert_eq!(shorten_url("data:image/png;base64,AAAA"), "<inline image/png>");
        assert_eq!(shorten_url("http://x/y.png"), "http://x/y.png");
    }
}
