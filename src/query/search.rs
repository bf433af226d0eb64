use serde::Serialize;

use crate::model::Transaction;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub month: Option<String>,
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            month: None,
            search: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl SearchRequest {
    pub fn for_month(month: impl Into<String>) -> Self {
        Self {
            month: Some(month.into()),
            ..Self::default()
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// The text filter, if one was given. Blank text means no filter.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
    pub products: Vec<Transaction>,
}

/// 1-based page slice. Out-of-range pages, page 0 and a page size of 0 all
/// produce an empty slice.
pub fn paginate(records: Vec<Transaction>, page: u32, per_page: u32) -> Vec<Transaction> {
    if page == 0 || per_page == 0 {
        return Vec::new();
    }

    let per_page = per_page as usize;
    let start = (page as usize - 1).saturating_mul(per_page);

    records.into_iter().skip(start).take(per_page).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTransaction, sale_date};

    fn numbered(n: u64) -> Vec<Transaction> {
        (1..=n)
            .map(|id| {
                NewTransaction {
                    title: format!("item {id}"),
                    price: 1.0,
                    description: String::new(),
                    category: "misc".to_string(),
                    image: None,
                    sold: false,
                    date_of_sale: sale_date::parse("2022-03-05").unwrap(),
                }
                .into_transaction(id)
            })
            .collect()
    }

    fn ids(records: &[Transaction]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn pages_are_one_based_slices() {
        assert_eq!(ids(&paginate(numbered(25), 1, 10)), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&paginate(numbered(25), 3, 10)), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        assert!(paginate(numbered(25), 4, 10).is_empty());
        assert!(paginate(numbered(25), 0, 10).is_empty());
        assert!(paginate(numbered(25), 1, 0).is_empty());
        assert!(paginate(numbered(3), u32::MAX, u32::MAX).is_empty());
    }

    #[test]
    fn blank_search_text_is_ignored() {
        let request = SearchRequest::for_month("March").search("");
        assert_eq!(request.search_text(), None);
        let request = SearchRequest::for_month("March").search("bag");
        assert_eq!(request.search_text(), Some("bag"));
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 10);
    }
}
