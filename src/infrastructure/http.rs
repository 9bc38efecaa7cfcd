// src/infrastructure/http.rs
use crate::domain::metadata::{LinkPreview, MetadataStatus};
use crate::domain::services::metadata_provider::MetadataProvider;
use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};
use select::document::Document;
use select::predicate::{Attr, Name, Predicate};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const USER_AGENT: &str = concat!("linkshelf/", env!("CARGO_PKG_VERSION"), " (link preview)");

fn build_client(timeout_ms: u64) -> InfrastructureResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| InfrastructureError::Network(format!("Failed to build HTTP client: {}", e)))
}

/// Link previews from the opengraph.io site API.
#[derive(Debug)]
pub struct OpenGraphProvider {
    client: reqwest::blocking::Client,
    api_url: String,
    app_id: String,
}

impl OpenGraphProvider {
    pub fn new(api_url: &str, app_id: &str, timeout_ms: u64) -> InfrastructureResult<Self> {
        Ok(Self {
            client: build_client(timeout_ms)?,
            api_url: api_url.to_string(),
            app_id: app_id.to_string(),
        })
    }

    /// `{api_url}/{percent-encoded url}?app_id={app_id}`
    pub fn request_url(&self, url: &str) -> InfrastructureResult<Url> {
        let mut request = Url::parse(&self.api_url).map_err(|e| {
            InfrastructureError::Network(format!("Invalid API url {}: {}", self.api_url, e))
        })?;
        request
            .path_segments_mut()
            .map_err(|_| {
                InfrastructureError::Network(format!("API url cannot be a base: {}", self.api_url))
            })?
            .pop_if_empty()
            .push(url);
        request.query_pairs_mut().append_pair("app_id", &self.app_id);
        Ok(request)
    }

    fn try_fetch(&self, url: &str) -> InfrastructureResult<LinkPreview> {
        let request = self.request_url(url)?;
        let body: Value = self
            .client
            .get(request)
            .send()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?
            .json()
            .map_err(|e| InfrastructureError::Serialization(e.to_string()))?;
        Ok(parse_opengraph_response(&body))
    }
}

impl MetadataProvider for OpenGraphProvider {
    #[instrument(skip(self), level = "debug")]
    fn fetch(&self, url: &str) -> LinkPreview {
        self.try_fetch(url).unwrap_or_else(|e| {
            debug!("OpenGraph fetch failed for {}: {}", url, e);
            LinkPreview::failed()
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

fn string_field(source: &Value, key: &str) -> Option<String> {
    source
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Maps an opengraph.io response body to a preview.
///
/// An `error` on the body or on `htmlInferred` marks the fetch as failed. Fields come
/// from `htmlInferred`, or `hybridGraph` when the former is absent.
pub fn parse_opengraph_response(body: &Value) -> LinkPreview {
    let inferred = body.get("htmlInferred").filter(|v| is_truthy(v));
    let inferred_error = inferred
        .and_then(|v| v.get("error"))
        .is_some_and(is_truthy);
    if inferred_error || body.get("error").is_some_and(is_truthy) {
        return LinkPreview::failed();
    }

    let Some(source) = inferred.or_else(|| body.get("hybridGraph").filter(|v| is_truthy(v)))
    else {
        return LinkPreview {
            status: MetadataStatus::Success,
            ..LinkPreview::failed()
        };
    };

    LinkPreview {
        title: string_field(source, "title"),
        description: string_field(source, "description"),
        kind: string_field(source, "type"),
        image: string_field(source, "image"),
        favicon: string_field(source, "favicon"),
        status: MetadataStatus::Success,
    }
}

/// Link previews scraped straight from the page's HTML head.
#[derive(Debug)]
pub struct HtmlMetadataProvider {
    client: reqwest::blocking::Client,
}

impl HtmlMetadataProvider {
    pub fn new(timeout_ms: u64) -> InfrastructureResult<Self> {
        Ok(Self {
            client: build_client(timeout_ms)?,
        })
    }

    fn try_fetch(&self, url: &str) -> InfrastructureResult<LinkPreview> {
        let base = Url::parse(url).map_err(|e| InfrastructureError::Network(e.to_string()))?;
        let response = self
            .client
            .get(base.clone())
            .send()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(InfrastructureError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }
        // redirects may move the page, relative links resolve against where it landed
        let final_url = response.url().clone();
        let body = response
            .text()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?;
        Ok(parse_html_preview(&body, &final_url))
    }
}

impl MetadataProvider for HtmlMetadataProvider {
    #[instrument(skip(self), level = "debug")]
    fn fetch(&self, url: &str) -> LinkPreview {
        self.try_fetch(url).unwrap_or_else(|e| {
            debug!("HTML fetch failed for {}: {}", url, e);
            LinkPreview::failed()
        })
    }
}

fn meta_content(document: &Document, attr: &'static str, key: &'static str) -> Option<String> {
    document
        .find(Name("meta").and(Attr(attr, key)))
        .filter_map(|n| n.attr("content"))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|u| u.to_string())
}

/// Extracts preview fields from an HTML document served at `base`.
pub fn parse_html_preview(body: &str, base: &Url) -> LinkPreview {
    let document = Document::from(body);

    let title = meta_content(&document, "property", "og:title").or_else(|| {
        document
            .find(Name("title"))
            .next()
            .map(|n| n.text().trim().to_owned())
            .filter(|t| !t.is_empty())
    });

    let description = meta_content(&document, "property", "og:description")
        .or_else(|| meta_content(&document, "name", "description"));

    let image = meta_content(&document, "property", "og:image").and_then(|i| resolve(base, &i));

    let favicon = document
        .find(Name("link"))
        .filter(|n| {
            n.attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("icon"))
            })
        })
        .filter_map(|n| n.attr("href"))
        .find_map(|href| resolve(base, href))
        .or_else(|| resolve(base, "/favicon.ico"));

    debug!("Parsed preview for {}: title={:?}", base, title);

    LinkPreview {
        title,
        description,
        kind: meta_content(&document, "property", "og:type"),
        image,
        favicon,
        status: MetadataStatus::Success,
    }
}
