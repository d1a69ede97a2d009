use serde::{Deserialize, Serialize};

/// A catalogue entry, read-only from this service's perspective.
///
/// `id` and `price` decode from PostgreSQL `INTEGER` / `SERIAL` columns only;
/// a `BIGINT` column fails every row with [`StoreError::Decode`].
///
/// [`StoreError::Decode`]: super::store::StoreError::Decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Store-assigned identifier
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Whole currency units
    pub price: i32,
}

/// Raw `GET /books` query string, exactly as the client sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookParams {
    pub genre: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl BookParams {
    /// Collect decoded query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "genre" => &mut params.genre,
                "sort" => &mut params.sort,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Price ordering requested through `sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// `price_asc` / `price_desc`; anything else means "no ordering".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            _ => None,
        }
    }
}

/// Normalized listing options.
///
/// Every field is `None` when the parameter was absent, empty (genre), not
/// recognized (sort) or not a non-negative integer (limit, offset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub genre: Option<String>,
    pub sort: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<BookParams> for ListOptions {
    fn from(params: BookParams) -> Self {
        Self {
            genre: params.genre.filter(|genre| !genre.is_empty()),
            sort: params.sort.as_deref().and_then(SortOrder::parse),
            limit: parse_bound(params.limit.as_deref()),
            offset: parse_bound(params.offset.as_deref()),
        }
    }
}

fn parse_bound(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|value| *value >= 0)
}
