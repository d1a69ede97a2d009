//! Translation of listing options into a parameterized SQL statement.
//!
//! User-supplied values only ever travel as positional arguments; the SQL
//! text contains nothing but fixed fragments and `$n` placeholders.

use super::models::{BookParams, ListOptions, SortOrder};

/// Projection over every book column, unfiltered.
pub const SELECT_BOOKS: &str = "SELECT id, title, author, genre, price FROM books";

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    Text(String),
    Int(i64),
}

/// SQL text plus the arguments for its `$1..$n` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    sql: String,
    args: Vec<QueryArg>,
}

impl BookQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[QueryArg] {
        &self.args
    }
}

impl From<&ListOptions> for BookQuery {
    fn from(options: &ListOptions) -> Self {
        let mut builder = QueryBuilder::new();
        if let Some(genre) = &options.genre {
            builder = builder.filter_eq("genre", QueryArg::Text(genre.clone()));
        }
        builder
            .order_by(options.sort)
            .limit(options.limit)
            .offset(options.offset)
            .build()
    }
}

impl From<BookParams> for BookQuery {
    fn from(params: BookParams) -> Self {
        Self::from(&ListOptions::from(params))
    }
}

/// Incremental builder over the books projection.
///
/// Filters accumulate as (column, value) pairs and are AND-ed together;
/// placeholders are numbered at [`QueryBuilder::build`] in the order the
/// arguments land: filters first, then LIMIT, then OFFSET.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    filters: Vec<(&'static str, QueryArg)>,
    sort: Option<SortOrder>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column` to equal `value`. `column` must be a trusted identifier.
    pub fn filter_eq(mut self, column: &'static str, value: QueryArg) -> Self {
        self.filters.push((column, value));
        self
    }

    pub fn order_by(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: Option<i64>) -> Self {
        self.offset = offset;
        self
    }

    pub fn build(self) -> BookQuery {
        let mut sql = String::from(SELECT_BOOKS);
        let mut args = Vec::with_capacity(self.filters.len() + 2);

        let mut conditions = Vec::with_capacity(self.filters.len());
        for (column, value) in self.filters {
            args.push(value);
            conditions.push(format!("{} = ${}", column, args.len()));
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        match self.sort {
            Some(SortOrder::PriceAsc) => sql.push_str(" ORDER BY price ASC"),
            Some(SortOrder::PriceDesc) => sql.push_str(" ORDER BY price DESC"),
            None => {}
        }

        if let Some(limit) = self.limit {
            args.push(QueryArg::Int(limit));
            sql.push_str(&format!(" LIMIT ${}", args.len()));
        }

        // OFFSET always trails LIMIT.
        if let Some(offset) = self.offset {
            args.push(QueryArg::Int(offset));
            sql.push_str(&format!(" OFFSET ${}", args.len()));
        }

        BookQuery { sql, args }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        genre: Option<&str>,
        sort: Option<&str>,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> BookQuery {
        BookQuery::from(BookParams {
            genre: genre.map(str::to_string),
            sort: sort.map(str::to_string),
            limit: limit.map(str::to_string),
            offset: offset.map(str::to_string),
        })
    }

    #[test]
    fn test_no_parameters_selects_everything() {
        let q = query(None, None, None, None);
        assert_eq!(q.sql(), SELECT_BOOKS);
        assert!(q.args().is_empty());
    }

    #[test]
    fn test_genre_becomes_first_placeholder() {
        let q = query(Some("Fiction"), None, None, None);
        assert_eq!(
            q.sql(),
            "SELECT id, title, author, genre, price FROM books WHERE genre = $1"
        );
        assert_eq!(q.args(), &[QueryArg::Text("Fiction".to_string())]);
    }

    #[test]
    fn test_empty_genre_adds_no_filter() {
        assert_eq!(query(Some(""), None, None, None).sql(), SELECT_BOOKS);
    }

    #[test]
    fn test_sort_appends_order_clause() {
        assert_eq!(
            query(None, Some("price_asc"), None, None).sql(),
            "SELECT id, title, author, genre, price FROM books ORDER BY price ASC"
        );
        assert_eq!(
            query(None, Some("price_desc"), None, None).sql(),
            "SELECT id, title, author, genre, price FROM books ORDER BY price DESC"
        );
    }

    #[test]
    fn test_unrecognized_sort_adds_no_order_clause() {
        for sort in ["", "price", "title_asc", "PRICE_DESC"] {
            let q = query(None, Some(sort), None, None);
            assert!(!q.sql().contains("ORDER BY"), "sort={sort:?} produced {}", q.sql());
        }
    }

    #[test]
    fn test_all_parameters_number_placeholders_in_order() {
        let q = query(Some("Drama"), Some("price_desc"), Some("10"), Some("20"));
        assert_eq!(
            q.sql(),
            "SELECT id, title, author, genre, price FROM books WHERE genre = $1 \
             ORDER BY price DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            q.args(),
            &[
                QueryArg::Text("Drama".to_string()),
                QueryArg::Int(10),
                QueryArg::Int(20),
            ]
        );
    }

    #[test]
    fn test_offset_without_genre_or_limit_takes_first_placeholder() {
        let q = query(None, None, None, Some("5"));
        assert_eq!(
            q.sql(),
            "SELECT id, title, author, genre, price FROM books OFFSET $1"
        );
        assert_eq!(q.args(), &[QueryArg::Int(5)]);
    }

    #[test]
    fn test_invalid_bounds_match_omitted_bounds() {
        let omitted = query(Some("Fiction"), Some("price_asc"), None, None);
        let invalid = query(Some("Fiction"), Some("price_asc"), Some("many"), Some("-2"));
        assert_eq!(invalid, omitted);
    }

    #[test]
    fn test_hostile_genre_stays_out_of_sql_text() {
        let hostile = "x'; DROP TABLE books; --";
        let q = query(Some(hostile), None, None, None);
        assert!(!q.sql().contains("DROP"));
        assert_eq!(q.args(), &[QueryArg::Text(hostile.to_string())]);
    }

    #[test]
    fn test_multiple_filters_are_conjoined() {
        let q = QueryBuilder::new()
            .filter_eq("genre", QueryArg::Text("Fiction".to_string()))
            .filter_eq("author", QueryArg::Text("x".to_string()))
            .limit(Some(1))
            .build();
        assert_eq!(
            q.sql(),
            "SELECT id, title, author, genre, price FROM books \
             WHERE genre = $1 AND author = $2 LIMIT $3"
        );
        assert_eq!(q.args().len(), 3);
    }
}
