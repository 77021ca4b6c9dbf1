//! Row filters, encoded PostgREST-style into query parameters.

/// A single filter; multiple filters on one request combine with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column=eq.value`
    Eq { column: String, value: String },
    /// `column=ilike.%needle%` (case-insensitive substring)
    Ilike { column: String, needle: String },
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Filter::Eq {
            column: column.into(),
            value: value.to_string(),
        }
    }

    pub fn ilike_contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Ilike {
            column: column.into(),
            needle: needle.into(),
        }
    }

    /// Query-string pair for this filter.
    pub(crate) fn query_pair(&self) -> (String, String) {
        match self {
            Filter::Eq { column, value } => (column.clone(), format!("eq.{}", value)),
            Filter::Ilike { column, needle } => (column.clone(), format!("ilike.%{}%", needle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_filter_encodes_value() {
        assert_eq!(
            Filter::eq("company_id", 7).query_pair(),
            ("company_id".to_string(), "eq.7".to_string())
        );
    }

    #[test]
    fn ilike_filter_wraps_needle_in_wildcards() {
        assert_eq!(
            Filter::ilike_contains("title", "engineer").query_pair(),
            ("title".to_string(), "ilike.%engineer%".to_string())
        );
    }
}
