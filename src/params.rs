use reqwest::header::HeaderMap;
use url::form_urlencoded;

/// Filtering and pagination options accepted by the list endpoints.
///
/// Fields left at their zero value are omitted from the generated query
/// string entirely, so the default value produces an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Text to filter results by, e.g. `example.com`.
    pub query: String,
    /// Field to sort by, e.g. `name`.
    pub sort_by: String,
    /// Sort direction, `asc` or `desc`.
    pub sort_order: String,
    /// Maximum number of results per page.
    pub limit: u64,
    /// Page to fetch, starting at 1.
    pub page: u64,
}

impl ListParams {
    /// Serializes the options into a percent-encoded query string.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if !self.query.is_empty() {
            serializer.append_pair("query", &self.query);
        }
        if !self.sort_by.is_empty() {
            serializer.append_pair("sort_by", &self.sort_by);
        }
        if !self.sort_order.is_empty() {
            serializer.append_pair("sort_order", &self.sort_order);
        }
        if self.limit != 0 {
            serializer.append_pair("limit", &self.limit.to_string());
        }
        if self.page != 0 {
            serializer.append_pair("page", &self.page.to_string());
        }

        serializer.finish()
    }
}

/// Pagination details parsed from list response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListMeta {
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub pages_count: u64,
}

impl ListMeta {
    /// Returns a response handler that fills the pagination details from the
    /// `X-Page`, `X-Limit`, `X-Total-Count` and `X-Pages-Count` headers.
    ///
    /// Each header is parsed independently; a missing or unparsable header
    /// leaves the corresponding field untouched.
    pub fn capture(&mut self) -> impl FnMut(&HeaderMap) + '_ {
        move |headers| {
            set_from_header(&mut self.page, headers, "x-page");
            set_from_header(&mut self.limit, headers, "x-limit");
            set_from_header(&mut self.total_count, headers, "x-total-count");
            set_from_header(&mut self.pages_count, headers, "x-pages-count");
        }
    }
}

fn set_from_header(dest: &mut u64, headers: &HeaderMap, name: &str) {
    let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) else {
        return;
    };
    if let Ok(n) = value.parse() {
        *dest = n;
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderName, HeaderValue};

    use super::*;

    #[test]
    fn query_string_omits_zero_values() {
        let tests = [
            (ListParams::default(), ""),
            (
                ListParams {
                    query: "foo bar".to_string(),
                    ..Default::default()
                },
                "query=foo+bar",
            ),
            (
                ListParams {
                    sort_by: "name".to_string(),
                    ..Default::default()
                },
                "sort_by=name",
            ),
            (
                ListParams {
                    sort_order: "asc".to_string(),
                    ..Default::default()
                },
                "sort_order=asc",
            ),
            (
                ListParams {
                    sort_order: "desc".to_string(),
                    ..Default::default()
                },
                "sort_order=desc",
            ),
            (
                ListParams {
                    limit: 1,
                    ..Default::default()
                },
                "limit=1",
            ),
            (
                ListParams {
                    page: 1,
                    ..Default::default()
                },
                "page=1",
            ),
            (
                ListParams {
                    limit: 1,
                    page: 1,
                    ..Default::default()
                },
                "limit=1&page=1",
            ),
        ];

        for (params, expected) in tests {
            assert_eq!(params.query_string(), expected);
        }
    }

    #[test]
    fn query_string_uses_fixed_key_order() {
        let params = ListParams {
            query: "example.org".to_string(),
            sort_by: "name".to_string(),
            sort_order: "desc".to_string(),
            limit: 10,
            page: 2,
        };
        assert_eq!(
            params.query_string(),
            "query=example.org&sort_by=name&sort_order=desc&limit=10&page=2"
        );
    }

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn capture_fills_all_counters() {
        let mut meta = ListMeta::default();
        let mut capture = meta.capture();
        capture(&headers(&[
            ("x-page", "1"),
            ("x-limit", "100"),
            ("x-total-count", "42"),
            ("x-pages-count", "1"),
        ]));
        drop(capture);

        assert_eq!(
            meta,
            ListMeta {
                page: 1,
                limit: 100,
                total_count: 42,
                pages_count: 1,
            }
        );
    }

    #[test]
    fn capture_keeps_prior_values_for_missing_or_unparsable_headers() {
        let mut meta = ListMeta {
            page: 3,
            limit: 50,
            total_count: 120,
            pages_count: 3,
        };
        let mut capture = meta.capture();
        capture(&headers(&[("x-page", "4"), ("x-limit", "not a number")]));
        drop(capture);

        assert_eq!(
            meta,
            ListMeta {
                page: 4,
                limit: 50,
                total_count: 120,
                pages_count: 3,
            }
        );
    }
}
