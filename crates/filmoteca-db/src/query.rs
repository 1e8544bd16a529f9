//! Read-query builder for the table REST API.
//!
//! Supports the predicate set the catalog needs: equality, array
//! membership, case-insensitive substring, OR across substring predicates,
//! multi-key ordering, and inclusive 0-indexed row ranges with an exact
//! total count. The rendered operator grammar stays private to this crate.

use filmoteca_core::models::{SortDirection, SortKey};
use filmoteca_core::{AppError, AppResult};
use serde::de::DeserializeOwned;

use crate::client::SupabaseClient;

/// One predicate. All predicates on a query are AND-combined; OR exists
/// only inside `AnyIlike`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// Array column contains all of `values`.
    Contains { column: String, values: Vec<String> },
    /// Case-insensitive substring match.
    Ilike { column: String, term: String },
    /// OR of case-insensitive substring matches across several columns.
    AnyIlike { columns: Vec<String>, term: String },
}

impl Filter {
    pub fn eq(column: &str, value: impl ToString) -> Self {
        Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn contains(column: &str, value: &str) -> Self {
        Filter::Contains {
            column: column.to_string(),
            values: vec![value.to_string()],
        }
    }

    /// Render to a query-string pair in the backend's operator grammar.
    fn to_query_pair(&self) -> (String, String) {
        match self {
            Filter::Eq { column, value } => (column.clone(), format!("eq.{}", value)),
            Filter::Contains { column, values } => {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("\"{}\"", sanitize(v)))
                    .collect();
                (column.clone(), format!("cs.{{{}}}", quoted.join(",")))
            }
            Filter::Ilike { column, term } => {
                (column.clone(), format!("ilike.*{}*", sanitize(term)))
            }
            Filter::AnyIlike { columns, term } => {
                let term = sanitize(term);
                let parts: Vec<String> = columns
                    .iter()
                    .map(|c| format!("{}.ilike.*{}*", c, term))
                    .collect();
                ("or".to_string(), format!("({})", parts.join(",")))
            }
        }
    }
}

/// Strip characters reserved by the filter grammar so user-typed terms
/// cannot change the query structure.
fn sanitize(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '\\'))
        .collect()
}

/// Builder for one read query against one table.
#[derive(Debug)]
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    filters: Vec<Filter>,
    orders: Vec<SortKey>,
    range: Option<(u64, u64)>,
    count_exact: bool,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            filters: Vec::new(),
            orders: Vec::new(),
            range: None,
            count_exact: false,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn order(mut self, key: SortKey) -> Self {
        self.orders.push(key);
        self
    }

    pub fn orders(mut self, keys: impl IntoIterator<Item = SortKey>) -> Self {
        self.orders.extend(keys);
        self
    }

    /// Inclusive 0-indexed row range.
    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some((from, to));
        self
    }

    /// Request the total row count (before the range) with the response.
    pub fn count_exact(mut self) -> Self {
        self.count_exact = true;
        self
    }

    /// Rendered query parameters, in application order: select, predicates,
    /// then ordering. The range travels in a header, not the query string.
    fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filters.iter().map(Filter::to_query_pair));
        if !self.orders.is_empty() {
            let rendered: Vec<String> = self
                .orders
                .iter()
                .map(|k| {
                    let dir = match k.direction {
                        SortDirection::Ascending => "asc",
                        SortDirection::Descending => "desc",
                    };
                    format!("{}.{}", k.column, dir)
                })
                .collect();
            params.push(("order".to_string(), rendered.join(",")));
        }
        params
    }

    /// Execute the query. Returns the rows plus the exact total when
    /// `count_exact` was requested.
    pub async fn fetch<T: DeserializeOwned>(self) -> AppResult<(Vec<T>, Option<u64>)> {
        let mut request = self
            .client
            .authed(self.client.http().get(self.client.table_url(&self.table)))
            .query(&self.query_params());

        if let Some((from, to)) = self.range {
            request = request.header("Range", format!("{}-{}", from, to));
        }
        if self.count_exact {
            request = request.header("Prefer", "count=exact");
        }

        let response = request.send().await?;
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let response = SupabaseClient::check_status(response).await?;
        let rows: Vec<T> = response.json().await?;

        if self.count_exact && total.is_none() {
            return Err(AppError::Remote(
                "response carried no total count".to_string(),
            ));
        }
        Ok((rows, total))
    }
}

/// Total from a `Content-Range` header value such as `0-19/123` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmoteca_core::models::SortKey;

    fn client() -> SupabaseClient {
        SupabaseClient::new("https://abcd.supabase.co".to_string(), "anon".to_string()).unwrap()
    }

    #[test]
    fn eq_and_contains_render_backend_operators() {
        assert_eq!(
            Filter::eq("cult_film", true).to_query_pair(),
            ("cult_film".to_string(), "eq.true".to_string())
        );
        assert_eq!(
            Filter::contains("film_type", "Pelicula").to_query_pair(),
            ("film_type".to_string(), "cs.{\"Pelicula\"}".to_string())
        );
    }

    #[test]
    fn any_ilike_renders_an_or_group() {
        let filter = Filter::AnyIlike {
            columns: vec![
                "title".to_string(),
                "year_film".to_string(),
                "cult_brand".to_string(),
            ],
            term: "matrix".to_string(),
        };
        assert_eq!(
            filter.to_query_pair(),
            (
                "or".to_string(),
                "(title.ilike.*matrix*,year_film.ilike.*matrix*,cult_brand.ilike.*matrix*)"
                    .to_string()
            )
        );
    }

    #[test]
    fn reserved_characters_are_stripped_from_terms() {
        let filter = Filter::Ilike {
            column: "title".to_string(),
            term: "a,b(c)\"d\\".to_string(),
        };
        assert_eq!(
            filter.to_query_pair(),
            ("title".to_string(), "ilike.*abcd*".to_string())
        );
    }

    #[test]
    fn ordering_joins_keys_into_one_parameter() {
        let owner = client();
        let query = TableQuery::new(&owner, "films")
            .order(SortKey::asc("title"))
            .order(SortKey::desc("year_film"));
        let params = query.query_params();
        assert!(params.contains(&("order".to_string(), "title.asc,year_film.desc".to_string())));
    }

    #[test]
    fn content_range_total_parses_both_forms() {
        assert_eq!(parse_content_range_total("0-19/123"), Some(123));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[tokio::test]
    async fn fetch_sends_range_and_reads_total() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/films")
            .match_header("range", "20-39")
            .match_header("prefer", "count=exact")
            .match_query(mockito::Matcher::UrlEncoded(
                "cult_film".to_string(),
                "eq.true".to_string(),
            ))
            .with_status(206)
            .with_header("content-range", "20-39/57")
            .with_body(r#"[{"id":"1","title":"A"}]"#)
            .create_async()
            .await;

        let owner = SupabaseClient::new(server.url(), "anon".to_string()).unwrap();
        let (rows, total): (Vec<serde_json::Value>, _) = owner
            .from("films")
            .filter(Filter::eq("cult_film", true))
            .range(20, 39)
            .count_exact()
            .fetch()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(total, Some(57));
    }
}
