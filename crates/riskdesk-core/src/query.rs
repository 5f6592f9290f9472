//! Filtering, sorting and pagination of result lists

use crate::model::ResultRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Column a result list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSortKey {
    #[default]
    Username,
    /// Flag severity, `Unknown` below `Low`
    Flag,
    TransactionCount,
}

impl ResultSortKey {
    fn compare(&self, a: &ResultRow, b: &ResultRow) -> Ordering {
        match self {
            ResultSortKey::Username => a
                .username
                .to_lowercase()
                .cmp(&b.username.to_lowercase()),
            ResultSortKey::Flag => a.flag.severity().cmp(&b.flag.severity()),
            ResultSortKey::TransactionCount => a.transaction_count.cmp(&b.transaction_count),
        }
    }
}

impl fmt::Display for ResultSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSortKey::Username => write!(f, "username"),
            ResultSortKey::Flag => write!(f, "flag"),
            ResultSortKey::TransactionCount => write!(f, "count"),
        }
    }
}

impl FromStr for ResultSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "username" | "user" | "name" => Ok(ResultSortKey::Username),
            "flag" | "flag_level" | "severity" => Ok(ResultSortKey::Flag),
            "count" | "transaction_count" | "transactions" => {
                Ok(ResultSortKey::TransactionCount)
            }
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page. Page 0 is treated as page 1;
    /// pages past the end are empty.
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let items = if start >= total_items {
            Vec::new()
        } else {
            items.into_iter().skip(start).take(page_size).collect()
        };

        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Search, sort and page settings for the results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultQuery {
    /// Case-insensitive username substring
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<(ResultSortKey, SortDirection)>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ResultQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl ResultQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn sort_by(mut self, key: ResultSortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn matches(&self, row: &ResultRow) -> bool {
        match &self.search {
            Some(text) => row
                .username
                .to_lowercase()
                .contains(&text.trim().to_lowercase()),
            None => true,
        }
    }

    /// Filter, then sort (stable), then paginate
    pub fn apply<'a>(&self, rows: &'a [ResultRow]) -> Page<&'a ResultRow> {
        let mut selected: Vec<&ResultRow> = rows.iter().filter(|r| self.matches(r)).collect();

        if let Some((key, direction)) = self.sort {
            selected.sort_by(|a, b| {
                let ord = key.compare(a, b);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        log::trace!(
            "result query matched {} of {} rows",
            selected.len(),
            rows.len()
        );

        Page::paginate(selected, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlagLevel;

    fn row(username: &str, flag: FlagLevel, count: u64) -> ResultRow {
        ResultRow {
            username: username.to_string(),
            flag,
            transaction_count: count,
            user_id: None,
        }
    }

    fn sample() -> Vec<ResultRow> {
        vec![
            row("meera", FlagLevel::Low, 4),
            row("Arjun", FlagLevel::High, 12),
            row("kabir", FlagLevel::Medium, 7),
            row("arjunk", FlagLevel::Unknown, 1),
        ]
    }

    fn names(page: &Page<&ResultRow>) -> Vec<String> {
        page.items.iter().map(|r| r.username.clone()).collect()
    }

    #[test]
    fn test_default_keeps_server_order() {
        let rows = sample();
        let page = ResultQuery::new().apply(&rows);
        assert_eq!(names(&page), vec!["meera", "Arjun", "kabir", "arjunk"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = sample();
        let page = ResultQuery::new().search("ARJ").apply(&rows);
        assert_eq!(names(&page), vec!["Arjun", "arjunk"]);
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let q = ResultQuery::new().search("   ");
        assert!(q.search.is_none());
    }

    #[test]
    fn test_sort_by_flag_descending() {
        let rows = sample();
        let page = ResultQuery::new()
            .sort_by(ResultSortKey::Flag, SortDirection::Descending)
            .apply(&rows);
        assert_eq!(names(&page), vec!["Arjun", "kabir", "meera", "arjunk"]);
    }

    #[test]
    fn test_sort_by_username_and_count() {
        let rows = sample();
        let page = ResultQuery::new()
            .sort_by(ResultSortKey::Username, SortDirection::Ascending)
            .apply(&rows);
        assert_eq!(names(&page), vec!["Arjun", "arjunk", "kabir", "meera"]);

        let page = ResultQuery::new()
            .sort_by(ResultSortKey::TransactionCount, SortDirection::Ascending)
            .apply(&rows);
        assert_eq!(names(&page), vec!["arjunk", "meera", "kabir", "Arjun"]);
    }

    #[test]
    fn test_pagination() {
        let rows: Vec<ResultRow> = (0..45)
            .map(|i| row(&format!("user{:02}", i), FlagLevel::Low, i))
            .collect();

        let first = ResultQuery::new().apply(&rows);
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());

        let last = ResultQuery::new().page(3).apply(&rows);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].username, "user40");
        assert!(!last.has_next());

        let beyond = ResultQuery::new().page(4).apply(&rows);
        assert!(beyond.is_empty());
        assert_eq!(beyond.total_items, 45);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = Page::paginate(vec![1, 2, 3], 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("count".parse::<ResultSortKey>().unwrap(), ResultSortKey::TransactionCount);
        assert_eq!("FLAG".parse::<ResultSortKey>().unwrap(), ResultSortKey::Flag);
        assert!("age".parse::<ResultSortKey>().is_err());
    }
}
