// src/cli/bookmark_commands.rs
use crate::application::error::ApplicationError;
use crate::cli::display::{show_details, show_page, status_glyph, DisplayBookmark, JsonBookmarkView};
use crate::cli::error::{CliError, CliResult};
use crate::domain::bookmark::Bookmark;
use crate::domain::metadata::MetadataEntry;
use crate::domain::pagination::Page;
use crate::infrastructure::di::ServiceContainer;
use crate::util::helper::split_ids;
use termcolor::{Color, ColorSpec, WriteColor};
use tracing::{debug, instrument};

fn warn_line<W: WriteColor>(out: &mut W, message: &str) -> CliResult<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    writeln!(out, "{}", message)?;
    out.reset()?;
    Ok(())
}

/// Resolves every id of a comma separated list, reporting unknown or ambiguous ones
fn resolve_ids<W: WriteColor>(
    out: &mut W,
    services: &ServiceContainer,
    ids: &str,
) -> CliResult<Vec<Bookmark>> {
    let id_list = split_ids(ids);
    if id_list.is_empty() {
        return Err(CliError::InvalidInput(format!("No ids given: '{}'", ids)));
    }

    let mut bookmarks = Vec::with_capacity(id_list.len());
    for id in id_list {
        match services.bookmark_service.resolve_id(&id) {
            Ok(bookmark) => bookmarks.push(bookmark),
            Err(e @ (ApplicationError::BookmarkNotFound(_) | ApplicationError::AmbiguousId(..))) => {
                warn_line(out, &e.to_string())?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(bookmarks)
}

fn fetch_metadata(
    services: &ServiceContainer,
    bookmark: &Bookmark,
    offline: bool,
) -> CliResult<Option<MetadataEntry>> {
    if offline {
        debug!("Offline, using cached metadata for {}", bookmark.id);
        return Ok(services.metadata_service.get_metadata(&bookmark.id)?);
    }
    Ok(Some(services.metadata_service.sync_bookmark(bookmark)?))
}

#[instrument(skip(out, services))]
pub fn add<W: WriteColor>(
    out: &mut W,
    services: &ServiceContainer,
    url: &str,
    name: &str,
    offline: bool,
) -> CliResult<()> {
    let url = url.trim();
    let bookmark = services.bookmark_service.add_bookmark(name.trim(), url)?;
    println!("Added bookmark: {} [{}]", bookmark.label(), bookmark.short_id());

    if let Some(entry) = fetch_metadata(services, &bookmark, offline)? {
        writeln!(out, "{} preview {}", status_glyph(Some(entry.status)), entry.status)?;
    }
    Ok(())
}

#[instrument(skip(out, services))]
pub fn edit<W: WriteColor>(
    out: &mut W,
    services: &ServiceContainer,
    id: &str,
    name: Option<String>,
    url: Option<String>,
    offline: bool,
) -> CliResult<()> {
    if name.is_none() && url.is_none() {
        return Err(CliError::InvalidInput(
            "Nothing to edit, give --name and/or --url".to_string(),
        ));
    }

    let current = services.bookmark_service.resolve_id(id)?;
    let new_name = name.map_or_else(|| current.name.clone(), |n| n.trim().to_string());
    let new_url = url.map_or_else(|| current.url.clone(), |u| u.trim().to_string());

    if current.same_content(&new_name, &new_url) {
        warn_line(out, "Nothing changed")?;
        return Ok(());
    }

    let edited = services
        .bookmark_service
        .edit_bookmark(&current.id, &new_name, &new_url)?;
    println!("Updated bookmark: {} [{}]", edited.label(), edited.short_id());

    if edited.url != current.url {
        if let Some(entry) = fetch_metadata(services, &edited, offline)? {
            writeln!(out, "{} preview {}", status_glyph(Some(entry.status)), entry.status)?;
        }
    }
    Ok(())
}

#[instrument(skip(out, services))]
pub fn delete<W: WriteColor>(out: &mut W, services: &ServiceContainer, ids: &str) -> CliResult<()> {
    for bookmark in resolve_ids(out, services, ids)? {
        match services.bookmark_service.delete_bookmark(&bookmark.id)? {
            true => println!("Deleted: {} ({})", bookmark.label(), bookmark.url),
            false => warn_line(out, &format!("Bookmark {} not found", bookmark.short_id()))?,
        }
    }
    Ok(())
}

/// Shows one page, syncing the previews of the shown bookmarks first
#[instrument(skip(out, services))]
pub fn list<W: WriteColor>(
    out: &mut W,
    services: &ServiceContainer,
    page: usize,
    is_json: bool,
    offline: bool,
) -> CliResult<()> {
    let page = services.bookmark_service.get_page(page)?;

    let mut items = Vec::with_capacity(page.items.len());
    for bookmark in &page.items {
        let entry = fetch_metadata(services, bookmark, offline)?;
        items.push(DisplayBookmark::from_domain(bookmark, entry.as_ref()));
    }
    let page = Page {
        items,
        number: page.number,
        count: page.count,
        total: page.total,
    };

    if is_json {
        let views: Vec<JsonBookmarkView> =
            page.items.iter().map(JsonBookmarkView::from_display).collect();
        let json = serde_json::to_string_pretty(&views)?;
        println!("{}", json);
        return Ok(());
    }

    show_page(out, &page)?;
    Ok(())
}

#[instrument(skip(out, services))]
pub fn show<W: WriteColor>(out: &mut W, services: &ServiceContainer, id: &str) -> CliResult<()> {
    let bookmark = services.bookmark_service.resolve_id(id)?;
    let entry = services.metadata_service.get_metadata(&bookmark.id)?;
    show_details(out, &DisplayBookmark::from_domain(&bookmark, entry.as_ref()))?;
    Ok(())
}

#[instrument(skip(out, services))]
pub fn refresh<W: WriteColor>(
    out: &mut W,
    services: &ServiceContainer,
    ids: Option<&str>,
    force: bool,
    offline: bool,
) -> CliResult<()> {
    if offline {
        return Err(CliError::InvalidInput(
            "refresh fetches previews, drop --offline".to_string(),
        ));
    }

    let bookmarks = match ids {
        Some(ids) => resolve_ids(out, services, ids)?,
        None => services.bookmark_service.get_all_bookmarks()?,
    };

    let mut failed = 0;
    for bookmark in &bookmarks {
        let entry = if force {
            services.metadata_service.refresh_bookmark(bookmark)?
        } else {
            services.metadata_service.sync_bookmark(bookmark)?
        };
        if !entry.is_success() {
            failed += 1;
        }
        writeln!(
            out,
            "{} {} [{}]",
            status_glyph(Some(entry.status)),
            bookmark.label(),
            bookmark.short_id()
        )?;
    }
    println!(
        "Checked {} bookmarks, {} without preview",
        bookmarks.len(),
        failed
    );
    Ok(())
}

#[instrument(skip(services))]
pub fn open(services: &ServiceContainer, id: &str) -> CliResult<()> {
    let bookmark = services.bookmark_service.resolve_id(id)?;
    open::that(&bookmark.url)
        .map_err(|e| CliError::CommandFailed(format!("Failed to open {}: {}", bookmark.url, e)))?;
    println!("Opened: {}", bookmark.url);
    Ok(())
}
