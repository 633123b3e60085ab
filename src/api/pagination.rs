use std::collections::HashMap;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 50;

/// Page/limit as parsed from the query string. Anything that is not a
/// positive integer falls back to the defaults rather than erroring.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            page: parse_positive(params.get("page")).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(params.get("limit")).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        // page and limit come straight from the client; saturate instead of
        // overflowing on absurd values.
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(value: Option<&String>) -> Option<i64> {
    value.and_then(|s| s.parse::<i64>().ok()).filter(|n| *n > 0)
}
