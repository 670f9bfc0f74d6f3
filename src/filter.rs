//! Search and categorical filtering over entity collections
//!
//! A [`RecordFilter`] narrows a collection by a free-text query (OR'd across
//! each record's searchable fields) and any number of equality constraints.
//! Constraint selectors equal to a sentinel such as `All` pass every record
//! through. Filtering is stable: surviving records keep their source order.

/// Selector values that disable a categorical constraint (compared
/// case-insensitively)
pub const PASS_THROUGH: [&str; 2] = ["all", "all categories"];

/// Records that expose text fields to free-text search
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// True when a selector does not constrain anything
pub fn is_pass_through(selector: Option<&str>) -> bool {
    match selector {
        None => true,
        Some(s) => PASS_THROUGH.iter().any(|p| s.eq_ignore_ascii_case(p)),
    }
}

/// Case-insensitive substring match of `query` against any searchable field.
/// An empty query matches everything.
pub fn matches_search<T: Searchable>(record: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    IgnoreCase,
}

struct Constraint<'a, T> {
    selector: Option<&'a str>,
    mode: MatchMode,
    field: fn(&T) -> &str,
}

impl<T> Constraint<'_, T> {
    fn matches(&self, record: &T) -> bool {
        let Some(selector) = self.selector else {
            return true;
        };
        if is_pass_through(Some(selector)) {
            return true;
        }
        let value = (self.field)(record);
        match self.mode {
            MatchMode::Exact => value == selector,
            MatchMode::IgnoreCase => value.eq_ignore_ascii_case(selector),
        }
    }
}

/// Composable filter: search AND every constraint
pub struct RecordFilter<'a, T> {
    search: Option<&'a str>,
    constraints: Vec<Constraint<'a, T>>,
}

impl<'a, T: Searchable> RecordFilter<'a, T> {
    pub fn new(search: Option<&'a str>) -> Self {
        Self {
            search,
            constraints: Vec::new(),
        }
    }

    /// Case-sensitive equality (categories)
    pub fn exact(mut self, selector: Option<&'a str>, field: fn(&T) -> &str) -> Self {
        self.constraints.push(Constraint {
            selector,
            mode: MatchMode::Exact,
            field,
        });
        self
    }

    /// Case-insensitive equality (statuses, priorities, roles)
    pub fn ignore_case(mut self, selector: Option<&'a str>, field: fn(&T) -> &str) -> Self {
        self.constraints.push(Constraint {
            selector,
            mode: MatchMode::IgnoreCase,
            field,
        });
        self
    }

    pub fn matches(&self, record: &T) -> bool {
        let search_ok = self.search.map_or(true, |q| matches_search(record, q));
        search_ok && self.constraints.iter().all(|c| c.matches(record))
    }

    pub fn apply(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        location: &'static str,
        category: &'static str,
        status: &'static str,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.location]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "King Size Bed", location: "Room 103", category: "Furniture", status: "active" },
            Row { name: "Mini Refrigerator", location: "Room 104", category: "Appliances", status: "retired" },
            Row { name: "Executive Desk", location: "Business Center", category: "Furniture", status: "pending" },
        ]
    }

    #[test]
    fn test_empty_search_is_identity() {
        let filter = RecordFilter::new(Some(""));
        assert_eq!(filter.apply(rows()), rows());
        let filter = RecordFilter::new(None);
        assert_eq!(filter.apply(rows()), rows());
    }

    #[test]
    fn test_sentinel_is_identity() {
        for sentinel in ["All", "all", "All Categories"] {
            let filter = RecordFilter::new(None).exact(Some(sentinel), |r: &Row| r.category);
            assert_eq!(filter.apply(rows()), rows());
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filter = RecordFilter::new(Some("room 10"));
        assert_eq!(filter.apply(rows()).len(), 2);
        let filter = RecordFilter::new(Some("BUSINESS"));
        assert_eq!(filter.apply(rows())[0].name, "Executive Desk");
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let filter = RecordFilter::new(None).exact(Some("furniture"), |r: &Row| r.category);
        assert!(filter.apply(rows()).is_empty());
        let filter = RecordFilter::new(None).exact(Some("Furniture"), |r: &Row| r.category);
        assert_eq!(filter.apply(rows()).len(), 2);
    }

    #[test]
    fn test_status_is_case_insensitive_and_preserves_order() {
        let filter = RecordFilter::new(None)
            .exact(Some("Furniture"), |r: &Row| r.category)
            .ignore_case(Some("Pending"), |r: &Row| r.status);
        let result = filter.apply(rows());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Executive Desk");

        let filter = RecordFilter::new(Some("e")).exact(Some("Furniture"), |r: &Row| r.category);
        let names: Vec<_> = filter.apply(rows()).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["King Size Bed", "Executive Desk"]);
    }

    #[test]
    fn test_unknown_selector_matches_nothing() {
        let filter = RecordFilter::new(None).exact(Some("Spaceships"), |r: &Row| r.category);
        assert!(filter.apply(rows()).is_empty());
    }
}
