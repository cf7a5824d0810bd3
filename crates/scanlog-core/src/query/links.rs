//! Pagination link construction.

use url::Url;
use url::form_urlencoded;

use crate::config::QueryConfig;
use crate::error::{AppError, ErrorKind};
use crate::types::links::PageLinks;
use crate::types::pagination::PageSummary;

/// Builds `first`/`last`/`prev`/`next` links for a paged list request.
///
/// The request route is parsed into its components; only the page and
/// page-size query pairs are rewritten (or appended when missing). Every
/// other pair keeps its position and raw encoding.
#[derive(Debug, Clone)]
pub struct PageLinkBuilder {
    /// Public base URL (scheme, host, port and optional path prefix).
    base_url: String,
    /// Name of the page-number parameter.
    page_param: String,
    /// Name of the page-size parameter.
    items_per_page_param: String,
}

impl PageLinkBuilder {
    /// Create a link builder for the given public base URL.
    pub fn new(base_url: &str, config: &QueryConfig) -> Result<Self, AppError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid pagination base URL '{base_url}'"),
                e,
            )
        })?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Pagination base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_param: config.page_param.clone(),
            items_per_page_param: config.items_per_page_param.clone(),
        })
    }

    /// Build the link set for `route` (request path plus original query).
    ///
    /// Produces exactly one of four shapes: `{first, last}` for a single
    /// page, `+next` on the first of many, `+prev` on the last of many and
    /// `+prev, +next` in between.
    pub fn build(
        &self,
        route: &str,
        page: u64,
        items_per_page: u64,
        total_count: u64,
    ) -> Result<PageLinks, AppError> {
        if page == 0 {
            return Err(AppError::validation("page must be at least 1"));
        }
        let summary = PageSummary::compute(total_count, items_per_page)?;
        let last_page = summary.last_page;
        let url = self.resolve(route)?;

        let mut links = PageLinks {
            first: self.link_for(&url, 1, items_per_page),
            last: self.link_for(&url, last_page, items_per_page),
            prev: None,
            next: None,
        };

        // No `next` past u64::MAX; the page number has nowhere to go.
        let next_page = page.checked_add(1);
        if page != 1 && last_page != 1 {
            links.prev = Some(self.link_for(&url, page - 1, items_per_page));
            if page != last_page {
                links.next = next_page.map(|next| self.link_for(&url, next, items_per_page));
            }
        } else if page != last_page && last_page != 1 {
            links.next = next_page.map(|next| self.link_for(&url, next, items_per_page));
        }

        Ok(links)
    }

    /// Join the route onto the base URL.
    fn resolve(&self, route: &str) -> Result<Url, AppError> {
        let full = if route.starts_with('/') {
            format!("{}{}", self.base_url, route)
        } else {
            format!("{}/{}", self.base_url, route)
        };
        Url::parse(&full).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Cannot build pagination links for route '{route}'"),
                e,
            )
        })
    }

    /// Render `url` with the page and page-size pairs set.
    fn link_for(&self, url: &Url, page: u64, items_per_page: u64) -> String {
        let mut segments: Vec<String> = Vec::new();
        let mut page_seen = false;
        let mut size_seen = false;

        for segment in url.query().unwrap_or("").split('&') {
            if segment.is_empty() {
                continue;
            }
            let key = form_urlencoded::parse(segment.as_bytes())
                .next()
                .map(|(k, _)| k.into_owned())
                .unwrap_or_default();

            if key == self.page_param {
                if !page_seen {
                    segments.push(format!("{}={page}", encode(&self.page_param)));
                    page_seen = true;
                }
            } else if key == self.items_per_page_param {
                if !size_seen {
                    segments.push(format!(
                        "{}={items_per_page}",
                        encode(&self.items_per_page_param)
                    ));
                    size_seen = true;
                }
            } else {
                segments.push(segment.to_string());
            }
        }

        if !page_seen {
            segments.push(format!("{}={page}", encode(&self.page_param)));
        }
        if !size_seen {
            segments.push(format!(
                "{}={items_per_page}",
                encode(&self.items_per_page_param)
            ));
        }

        let mut link = url.clone();
        link.set_fragment(None);
        link.set_query(Some(&segments.join("&")));
        link.to_string()
    }
}

fn encode(name: &str) -> String {
    form_urlencoded::byte_serialize(name.as_bytes()).collect()
}
