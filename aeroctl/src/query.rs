//! Filter-then-paginate over in-memory collections.
//!
//! Every console list (realname records, pilot records, devices) is the same pipeline: a set of
//! optional predicates combined with logical AND, followed by a 1-based page window. Predicates
//! built from absent or empty filter values are never registered, so they can't exclude anything.
//!
//! ```
//! use aeroctl::api::models::pagination::PageRequest;
//! use aeroctl::query::ListQuery;
//!
//! let names = vec!["Li Lei".to_string(), "Han Meimei".to_string(), "Li Hua".to_string()];
//! let page = ListQuery::new()
//!     .contains(Some("Li"), |name: &String| name.as_str())
//!     .paginate(&names, PageRequest::new(1, 1).resolve(10));
//!
//! assert_eq!(page.total, 2);
//! assert_eq!(page.list, vec!["Li Lei".to_string()]);
//! ```

use crate::api::models::pagination::{Page, PageSpec};

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// A conjunctive list of predicates over `T`.
pub struct ListQuery<'a, T> {
    predicates: Vec<Predicate<'a, T>>,
}

impl<T> Default for ListQuery<'_, T> {
    fn default() -> Self {
        Self { predicates: Vec::new() }
    }
}

/// Treat empty strings the same as an absent filter.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl<'a, T> ListQuery<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unconditional predicate.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Add a predicate parameterised by `value`, only when a value was supplied.
    pub fn when<V: 'a>(self, value: Option<V>, predicate: impl Fn(&T, &V) -> bool + 'a) -> Self {
        match value {
            Some(value) => self.filter(move |item| predicate(item, &value)),
            None => self,
        }
    }

    /// Substring match of `field` against `needle`.
    pub fn contains(self, needle: Option<&'a str>, field: impl Fn(&T) -> &str + 'a) -> Self {
        self.when(non_empty(needle), move |item, needle| field(item).contains(*needle))
    }

    /// Exact match of `field` against `expected`.
    pub fn equals(self, expected: Option<&'a str>, field: impl Fn(&T) -> &str + 'a) -> Self {
        self.when(non_empty(expected), move |item, expected| field(item) == *expected)
    }

    /// Number of registered predicates.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.predicates.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether `item` satisfies every predicate.
    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(item))
    }

    /// Filter `items`, then cut out the requested page.
    ///
    /// `total` counts every matching item, not just those on the page. Item order is preserved.
    pub fn paginate<'b, I>(&self, items: I, page: PageSpec) -> Page<T>
    where
        I: IntoIterator<Item = &'b T>,
        T: Clone + 'b,
    {
        let start = page.offset();
        let end = start.saturating_add(page.limit());

        let mut total = 0;
        let mut list = Vec::new();
        for item in items.into_iter().filter(|item| self.matches(item)) {
            if (start..end).contains(&total) {
                list.push(item.clone());
            }
            total += 1;
        }

        Page::new(list, total, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::pagination::PageRequest;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        status: &'static str,
    }

    fn rows() -> Vec<Row> {
        let statuses = ["pending", "approved", "rejected"];
        let names = ["Zhang Wei", "Wang Fang", "Li Na", "Zhang Min", "Liu Yang"];
        (0..25)
            .map(|i| Row {
                id: i + 1,
                name: names[i as usize % names.len()],
                status: statuses[i as usize % statuses.len()],
            })
            .collect()
    }

    fn spec(page: i64, size: i64) -> PageSpec {
        PageRequest::new(page, size).resolve(10)
    }

    #[test]
    fn test_no_filters_returns_everything_paged() {
        let data = rows();
        let page = ListQuery::new().paginate(&data, PageSpec::default());
        assert_eq!(page.total, 25);
        assert_eq!(page.list, data[..10].to_vec());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let data = rows();
        let query = ListQuery::new()
            .contains(Some("Zhang"), |r: &Row| r.name)
            .equals(Some("approved"), |r: &Row| r.status);
        assert_eq!(query.len(), 2);

        let page = query.paginate(&data, spec(1, 100));
        let expected: Vec<Row> = data
            .iter()
            .filter(|r| r.name.contains("Zhang") && r.status == "approved")
            .cloned()
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(page.list, expected);
        assert_eq!(page.total, expected.len());
    }

    #[test]
    fn test_absent_and_empty_filters_are_noops() {
        let query: ListQuery<'_, Row> = ListQuery::new()
            .contains(None, |r: &Row| r.name)
            .contains(Some(""), |r: &Row| r.name)
            .equals(Some(""), |r: &Row| r.status);
        assert!(query.is_empty());
        assert_eq!(query.paginate(&rows(), spec(1, 100)).total, 25);
    }

    #[test]
    fn test_exact_match_does_not_accept_substrings() {
        let page = ListQuery::new()
            .equals(Some("approve"), |r: &Row| r.status)
            .paginate(&rows(), spec(1, 100));
        assert_eq!(page.total, 0);
        assert!(page.list.is_empty());
    }

    #[test]
    fn test_total_is_independent_of_window() {
        let data = rows();
        let query = ListQuery::new().equals(Some("pending"), |r: &Row| r.status);
        let totals: Vec<usize> = [(1, 1), (2, 3), (1, 50), (9, 4)]
            .into_iter()
            .map(|(p, s)| query.paginate(&data, spec(p, s)).total)
            .collect();
        assert!(totals.iter().all(|t| *t == 9), "{totals:?}");
    }

    #[test]
    fn test_page_window_slices_filtered_set() {
        let data = rows();
        let filtered: Vec<Row> = data.iter().filter(|r| r.status != "rejected").cloned().collect();
        let query = ListQuery::new().filter(|r: &Row| r.status != "rejected");

        for (p, s) in [(1, 4), (2, 4), (4, 4), (5, 4), (2, 7)] {
            let page = query.paginate(&data, spec(p, s));
            let start = ((p - 1) * s) as usize;
            let end = (start + s as usize).min(filtered.len());
            let expected = if start < filtered.len() { filtered[start..end].to_vec() } else { vec![] };
            assert_eq!(page.list, expected, "page {p} size {s}");
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let page = ListQuery::new().paginate(&rows(), spec(100, 10));
        assert!(page.list.is_empty());
        assert_eq!(page.total, 25);
        assert_eq!(page.current_page, 100);
    }

    #[test]
    fn test_when_uses_typed_values() {
        let page = ListQuery::new()
            .when(Some(20u32), |r: &Row, min: &u32| r.id >= *min)
            .when(None::<u32>, |_: &Row, _: &u32| false)
            .paginate(&rows(), spec(1, 100));
        assert_eq!(page.total, 6);
    }
}
