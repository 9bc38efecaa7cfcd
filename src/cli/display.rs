// src/cli/display.rs

use crate::domain::bookmark::Bookmark;
use crate::domain::metadata::{MetadataEntry, MetadataStatus};
use crate::domain::pagination::{next_page, previous_page, Page};
use crate::util::helper::abbreviate;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::Serialize;
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

const DESCRIPTION_WIDTH: usize = 100;

/// Single-character marker for the preview state of a bookmark
pub fn status_glyph(status: Option<MetadataStatus>) -> &'static str {
    match status {
        Some(MetadataStatus::Success) => "✓",
        Some(MetadataStatus::Error) => "✗",
        Some(MetadataStatus::Pending) => "○",
        None => "·",
    }
}

fn status_color(status: Option<MetadataStatus>) -> Color {
    match status {
        Some(MetadataStatus::Success) => Color::Green,
        Some(MetadataStatus::Error) => Color::Red,
        Some(MetadataStatus::Pending) => Color::Yellow,
        None => Color::White,
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DisplayBookmark {
    pub id: String,

    #[builder(default)]
    pub name: String,

    pub url: String,

    #[builder(default = "crate::domain::timestamp::now_millis()")]
    pub last_edited: DateTime<Utc>,

    #[builder(default)]
    pub status: Option<MetadataStatus>,

    #[builder(default)]
    pub title: Option<String>,

    #[builder(default)]
    pub description: Option<String>,

    #[builder(default)]
    pub kind: Option<String>,

    #[builder(default)]
    pub image: Option<String>,

    #[builder(default)]
    pub favicon: Option<String>,
}

impl DisplayBookmark {
    pub fn from_domain(bookmark: &Bookmark, metadata: Option<&MetadataEntry>) -> Self {
        Self {
            id: bookmark.id.clone(),
            name: bookmark.name.clone(),
            url: bookmark.url.clone(),
            last_edited: bookmark.last_edited,
            status: metadata.map(|m| m.status),
            title: metadata.and_then(|m| m.title.clone()),
            description: metadata.and_then(|m| m.description.clone()),
            kind: metadata.and_then(|m| m.kind.clone()),
            image: metadata.and_then(|m| m.image.clone()),
            favicon: metadata.and_then(|m| m.favicon.clone()),
        }
    }

    pub fn short_id(&self) -> &str {
        self.id
            .get(..crate::domain::bookmark::SHORT_ID_LEN)
            .unwrap_or(&self.id)
    }

    /// Name, else preview title, else url
    pub fn heading(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            self.title.as_deref().unwrap_or(&self.url)
        }
    }
}

/// Writes one page of bookmarks followed by the pagination footer
pub fn show_page<W: WriteColor>(out: &mut W, page: &Page<DisplayBookmark>) -> io::Result<()> {
    if page.items.is_empty() {
        writeln!(out, "No bookmarks to display")?;
        return Ok(());
    }

    let first_col_width = page.items.len().to_string().len();
    for (i, bm) in page.items.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(status_color(bm.status))))?;
        write!(out, "{} ", status_glyph(bm.status))?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:first_col_width$}. {}", i + 1, bm.heading())?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
        writeln!(out, " [{}]", bm.short_id())?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "  {:first_col_width$}  {}", "", bm.url)?;

        if let Some(title) = bm.title.as_deref().filter(|t| *t != bm.heading()) {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            writeln!(out, "  {:first_col_width$}  {}", "", title)?;
        }

        if let Some(description) = &bm.description {
            out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
            writeln!(
                out,
                "  {:first_col_width$}  {}",
                "",
                abbreviate(description, DESCRIPTION_WIDTH)
            )?;
        }

        out.reset()?;
        writeln!(out)?;
    }

    show_footer(out, page)
}

/// `< 2/5 >`, with the arrows and `list -p` hints only where a neighbouring page exists
pub fn show_footer<W: WriteColor, T>(out: &mut W, page: &Page<T>) -> io::Result<()> {
    let prev = if page.is_first() { " " } else { "<" };
    let next = if page.is_last() { " " } else { ">" };

    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(
        out,
        "{} {}/{} {}",
        prev,
        page.number,
        page.count.max(1),
        next
    )?;
    out.reset()?;
    write!(out, "  ({} bookmarks)", page.total)?;

    if !page.is_first() {
        write!(out, "  prev: list -p {}", previous_page(page.number))?;
    }
    if !page.is_last() {
        write!(out, "  next: list -p {}", next_page(page.number, page.count))?;
    }
    writeln!(out)
}

/// Full detail view of one bookmark
pub fn show_details<W: WriteColor>(out: &mut W, bm: &DisplayBookmark) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
    write!(out, "{} ", bm.id)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "{}", bm.heading())?;
    out.reset()?;

    writeln!(out, "  URL: {}", bm.url)?;
    writeln!(out, "  Last edited: {}", bm.last_edited)?;

    out.set_color(ColorSpec::new().set_fg(Some(status_color(bm.status))))?;
    match bm.status {
        Some(status) => writeln!(out, "  Preview: {} {}", status_glyph(bm.status), status)?,
        None => writeln!(out, "  Preview: {} not fetched", status_glyph(None))?,
    }
    out.reset()?;

    let fields = [
        ("Title", &bm.title),
        ("Description", &bm.description),
        ("Type", &bm.kind),
        ("Image", &bm.image),
        ("Favicon", &bm.favicon),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            writeln!(out, "  {}: {}", label, value)?;
        }
    }
    Ok(())
}

/// Pipeable view of a bookmark and its preview
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonBookmarkView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub last_edited: String,
    pub status: Option<MetadataStatus>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: Option<String>,
    pub favicon: Option<String>,
}

impl JsonBookmarkView {
    pub fn from_display(bm: &DisplayBookmark) -> Self {
        Self {
            id: bm.id.clone(),
            name: bm.name.clone(),
            url: bm.url.clone(),
            last_edited: bm.last_edited.to_rfc3339(),
            status: bm.status,
            title: bm.title.clone(),
            description: bm.description.clone(),
            kind: bm.kind.clone(),
            image: bm.image.clone(),
            favicon: bm.favicon.clone(),
        }
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;
    use termcolor::Buffer;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Buffer) -> io::Result<()>,
    {
        let mut buffer = Buffer::no_color();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    fn create_test_bookmarks() -> Vec<DisplayBookmark> {
        vec![
            DisplayBookmarkBuilder::default()
                .id("0a1b2c3d-0000-4000-8000-000000000001")
                .name("Rust")
                .url("https://www.rust-lang.org")
                .status(Some(MetadataStatus::Success))
                .title(Some("Rust Programming Language".to_string()))
                .description(Some("A language empowering everyone".to_string()))
                .build()
                .unwrap(),
            DisplayBookmarkBuilder::default()
                .id("ffeeddcc-0000-4000-8000-000000000002")
                .url("https://down.example")
                .status(Some(MetadataStatus::Error))
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn given_page_when_show_page_then_glyphs_ids_and_footer() {
        let page = Page {
            items: create_test_bookmarks(),
            number: 2,
            count: 3,
            total: 24,
        };
        let output = render(|out| show_page(out, &page));

        assert!(output.contains("✓ 1. Rust [0a1b2c3d]"));
        assert!(output.contains("Rust Programming Language"));
        assert!(output.contains("✗ 2. https://down.example [ffeeddcc]"));
        assert!(output.contains("< 2/3 >  (24 bookmarks)"));
    }

    #[test]
    fn given_empty_page_when_show_page_then_message() {
        let page: Page<DisplayBookmark> = Page {
            items: vec![],
            number: 1,
            count: 0,
            total: 0,
        };
        assert_eq!(render(|out| show_page(out, &page)), "No bookmarks to display\n");
    }

    #[test]
    fn given_first_page_when_footer_then_no_back_arrow() {
        let page: Page<()> = Page {
            items: vec![],
            number: 1,
            count: 2,
            total: 12,
        };
        assert_eq!(
            render(|out| show_footer(out, &page)),
            "  1/2 >  (12 bookmarks)  next: list -p 2\n"
        );
    }

    #[test]
    fn given_middle_page_when_footer_then_both_hints() {
        let page: Page<()> = Page {
            items: vec![],
            number: 2,
            count: 3,
            total: 24,
        };
        assert_eq!(
            render(|out| show_footer(out, &page)),
            "< 2/3 >  (24 bookmarks)  prev: list -p 1  next: list -p 3\n"
        );
    }

    #[test]
    fn given_single_page_when_footer_then_no_hints() {
        let page: Page<()> = Page {
            items: vec![],
            number: 1,
            count: 1,
            total: 3,
        };
        assert_eq!(render(|out| show_footer(out, &page)), "  1/1    (3 bookmarks)\n");
    }

    #[test]
    fn given_unfetched_bookmark_when_show_details_then_marked() {
        let bm = DisplayBookmark::from_domain(&Bookmark::new("x", "https://x.example"), None);
        let output = render(|out| show_details(out, &bm));

        assert!(output.contains("URL: https://x.example"));
        assert!(output.contains("Preview: · not fetched"));
        assert!(!output.contains("Title:"));
    }

    #[test]
    fn given_metadata_when_json_view_then_type_key() {
        let bm = &create_test_bookmarks()[0];
        let value = serde_json::to_value(JsonBookmarkView::from_display(bm)).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["title"], "Rust Programming Language");
        assert!(value.get("type").is_some());
        assert!(value.get("lastEdited").is_some());
    }
}
