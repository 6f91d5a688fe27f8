// Paginated GET
//
// List endpoints return `{ data, totalRows, currentPage, currentSize }`
// one page at a time. `paginated` turns that into a lazy stream: the next
// page is only requested once the current one has been consumed, and the
// traversal stops as soon as the rows yielded reach the most recently
// reported total (or a page comes back empty).

use async_stream::try_stream;
use futures_util::Stream;
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::Page;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

const PAGE_PARAM: &str = "currentPage";
const PAGE_SIZE_PARAM: &str = "currentPageSize";

/// Per-traversal bookkeeping.
#[derive(Debug)]
struct PageCursor {
    path: String,
    /// Caller params minus the two paging keys.
    params: Vec<(String, String)>,
    page: u64,
    page_size: u64,
    total_rows: u64,
    yielded: u64,
}

impl PageCursor {
    fn new(path: String, params: &[(&str, String)]) -> Self {
        let mut page = 1;
        let mut page_size = DEFAULT_PAGE_SIZE;
        let mut rest = Vec::with_capacity(params.len());

        for (key, value) in params {
            match *key {
                PAGE_PARAM => page = value.parse::<u64>().unwrap_or(1).max(1),
                PAGE_SIZE_PARAM => {
                    page_size = value.parse::<u64>().unwrap_or(DEFAULT_PAGE_SIZE).max(1);
                }
                _ => rest.push(((*key).to_owned(), value.clone())),
            }
        }

        // Rows on the pages before the start page count as already seen.
        let yielded = (page - 1).saturating_mul(page_size);

        Self {
            path,
            params: rest,
            page,
            page_size,
            total_rows: 0,
            yielded,
        }
    }

    fn query(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .chain([
                (PAGE_PARAM, self.page.to_string()),
                (PAGE_SIZE_PARAM, self.page_size.to_string()),
            ])
            .collect()
    }

    /// Account for a fetched page; returns whether another page is due.
    fn record_page(&mut self, received: usize, total_rows: u64) -> bool {
        let received = u64::try_from(received).unwrap_or(u64::MAX);
        self.total_rows = total_rows;
        self.yielded = self.yielded.saturating_add(received);

        let more = received > 0 && self.yielded < self.total_rows;
        if more {
            self.page += 1;
        }
        more
    }
}

impl OmadaClient {
    /// Stream every record of a paginated endpoint as raw JSON.
    pub fn paginated_get<'a>(
        &'a self,
        path: impl Into<String>,
        params: &[(&str, String)],
    ) -> BoxStream<'a, Result<Value, Error>> {
        self.paginated(path, params)
    }

    /// Stream every record of a paginated endpoint, deserialized as `T`.
    ///
    /// `currentPage` / `currentPageSize` in `params` override the starting
    /// page (default 1) and page size (default 10). The stream is single
    /// pass; call again for a fresh traversal. Dropping it early is fine.
    pub fn paginated<'a, T>(
        &'a self,
        path: impl Into<String>,
        params: &[(&str, String)],
    ) -> BoxStream<'a, Result<T, Error>>
    where
        T: DeserializeOwned + Send + 'a,
    {
        Box::pin(self.page_stream(PageCursor::new(path.into(), params)))
    }

    fn page_stream<'a, T>(
        &'a self,
        mut cursor: PageCursor,
    ) -> impl Stream<Item = Result<T, Error>> + Send + 'a
    where
        T: DeserializeOwned + Send + 'a,
    {
        try_stream! {
            loop {
                let page: Page<T> = {
                    let query = cursor.query();
                    self.get(&cursor.path, &query).await?
                };

                let more = cursor.record_page(page.data.len(), page.total_rows);
                trace!(
                    path = %cursor.path,
                    yielded = cursor.yielded,
                    total = cursor.total_rows,
                    more,
                    "page fetched"
                );

                for item in page.data {
                    yield item;
                }

                if !more {
                    break;
                }
            }
        }
    }
}
