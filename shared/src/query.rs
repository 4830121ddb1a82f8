//! Search filters
//!
//! The backend lists products at `GET /products` and narrows by at most one
//! of `name`, `category`, `price`. The client sends every filter the user
//! filled in and lets the backend pick.

use serde::{Deserialize, Serialize};

/// Optional search filters, in wire order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}

impl ProductQuery {
    /// Build filters from raw form text; empty fields are dropped.
    pub fn from_fields(name: &str, category: &str, price: &str) -> Self {
        fn present(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        Self {
            name: present(name),
            category: present(category),
            price: present(price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none()
    }

    /// Query string including the leading `?`, or empty when no filter is set.
    ///
    /// Order is fixed (name, category, price) and values are appended
    /// verbatim, so existing bookmarked URLs keep matching.
    pub fn to_query_string(&self) -> String {
        let mut query = String::new();
        let filters = [
            ("name", &self.name),
            ("category", &self.category),
            ("price", &self.price),
        ];

        for (key, value) in filters {
            if let Some(value) = value {
                query.push(if query.is_empty() { '?' } else { '&' });
                query.push_str(key);
                query.push('=');
                query.push_str(value);
            }
        }

        query
    }
}

/// Price band codes understood by the backend's `price` filter
///
/// `1` → (0, 25], `2` → (25, 50], `3` → (50, 75]. Any other value makes the
/// backend ignore the filter and list everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    Low,
    Mid,
    High,
}

impl PriceBand {
    pub const ALL: [PriceBand; 3] = [PriceBand::Low, PriceBand::Mid, PriceBand::High];

    pub fn code(self) -> &'static str {
        match self {
            PriceBand::Low => "1",
            PriceBand::Mid => "2",
            PriceBand::High => "3",
        }
    }

    /// Exclusive lower and inclusive upper bound
    pub fn bounds(self) -> (u32, u32) {
        match self {
            PriceBand::Low => (0, 25),
            PriceBand::Mid => (25, 50),
            PriceBand::High => (50, 75),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.code() == code)
    }

    /// One-line hint for form labels, e.g. `1=(0,25] 2=(25,50] 3=(50,75]`
    pub fn hint() -> String {
        Self::ALL
            .iter()
            .map(|band| {
                let (low, high) = band.bounds();
                format!("{}=({},{}]", band.code(), low, high)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_no_query_string() {
        assert_eq!(ProductQuery::default().to_query_string(), "");
        assert!(ProductQuery::from_fields("", "", "").is_empty());
    }

    #[test]
    fn test_single_filter_uses_question_mark() {
        let query = ProductQuery::from_fields("", "pet", "");
        assert_eq!(query.to_query_string(), "?category=pet");

        let query = ProductQuery::from_fields("", "", "2");
        assert_eq!(query.to_query_string(), "?price=2");
    }

    #[test]
    fn test_skipped_name_keeps_order() {
        let query = ProductQuery::from_fields("", "food", "1");
        assert_eq!(query.to_query_string(), "?category=food&price=1");
    }

    #[test]
    fn test_all_filters_in_fixed_order() {
        let query = ProductQuery::from_fields("Lamp", "electronic", "3");
        assert_eq!(
            query.to_query_string(),
            "?name=Lamp&category=electronic&price=3"
        );
    }

    #[test]
    fn test_values_are_not_encoded() {
        let query = ProductQuery::from_fields("red shoe", "", "");
        assert_eq!(query.to_query_string(), "?name=red shoe");
    }

    #[test]
    fn test_price_band_codes() {
        assert_eq!(PriceBand::from_code("2"), Some(PriceBand::Mid));
        assert_eq!(PriceBand::from_code("4"), None);
        assert_eq!(PriceBand::High.bounds(), (50, 75));
        assert_eq!(PriceBand::hint(), "1=(0,25] 2=(25,50] 3=(50,75]");
    }
}
