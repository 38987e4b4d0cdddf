//! Lazy iteration over Syncro's page-numbered list endpoints.
//!
//! List endpoints answer with a named collection plus a `meta` object:
//!
//! ```json
//! { "contacts": [ ... ], "meta": { "page": 1, "total_pages": 4 } }
//! ```
//!
//! [`paginate`] turns such an endpoint into a [`Stream`](futures_util::Stream) of [`Page`]s. Nothing
//! is fetched until the stream is polled, and each page is requested only
//! after the previous one has arrived. A stream is single use: build a new
//! one for every independent pass over the data.

use futures_util::stream::{self, BoxStream, StreamExt};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::SyncroClient;
use crate::error::Result;

/// Sentinel used when `meta.page` or `meta.total_pages` is missing.
pub const MISSING_META: i64 = -1;

/// A single record from a list endpoint, keys in API order.
pub type Record = Map<String, Value>;

/// One decoded page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-indexed page number reported by the server.
    pub number: i64,
    /// Total number of pages reported by the server.
    pub total_pages: i64,
    body: Value,
}

impl Page {
    pub fn from_body(body: Value) -> Self {
        let meta = body.get("meta");
        let read = |key: &str| {
            meta.and_then(|m| m.get(key))
                .and_then(Value::as_i64)
                .unwrap_or(MISSING_META)
        };
        Self {
            number: read("page"),
            total_pages: read("total_pages"),
            body,
        }
    }

    /// Whether the server says another page follows this one.
    pub fn has_more(&self) -> bool {
        self.number < self.total_pages
    }

    /// Take the collection stored under `key`. Absent or `null` yields an empty list.
    pub fn into_collection(self, key: &str) -> Result<Vec<Record>> {
        let Value::Object(mut body) = self.body else {
            return Ok(Vec::new());
        };
        match body.remove(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(items) => Ok(serde_json::from_value(items)?),
        }
    }
}

#[derive(Serialize)]
struct PageQuery<'q, Q> {
    page: i64,
    #[serde(flatten)]
    params: &'q Q,
}

struct Cursor<'a, Q> {
    client: &'a SyncroClient,
    path: String,
    params: Q,
    next: Option<i64>,
}

/// Stream every page of `path`, starting at page 1.
///
/// `params` is sent unchanged with every request; only `page` changes. The
/// stream ends after the page whose number is not below `total_pages`, or
/// right after yielding the first error.
pub fn paginate<'a, Q>(
    client: &'a SyncroClient,
    path: impl Into<String>,
    params: Q,
) -> BoxStream<'a, Result<Page>>
where
    Q: Serialize + Send + Sync + 'a,
{
    let cursor = Cursor {
        client,
        path: path.into(),
        params,
        next: Some(1),
    };

    stream::unfold(cursor, |mut cursor| async move {
        let page = cursor.next?;
        log::debug!("Fetching --> {}{} [page={}]", cursor.client.base_url(), cursor.path, page);

        let query = PageQuery {
            page,
            params: &cursor.params,
        };
        let result = cursor
            .client
            .fetch(&cursor.path, &query)
            .await
            .map(Page::from_body);

        cursor.next = match &result {
            Ok(page) if page.has_more() => Some(page.number + 1),
            _ => None,
        };
        Some((result, cursor))
    })
    .boxed()
}

// ============================================================================
// Tests
// ============================================================================
