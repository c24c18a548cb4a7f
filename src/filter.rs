use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

/// Values a filter clause can bind. Statement text only ever contains
/// column names and `$n` placeholders; values travel separately.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Date(time::Date),
}

/// Collects optional `AND <column> <op> $n` predicates on top of a base
/// statement. Placeholders continue the base statement's numbering, and
/// clauses keep the order in which the caller pushed them.
#[derive(Debug)]
pub struct SqlFilter {
    clauses: Vec<String>,
    params: Vec<FilterValue>,
    next_param: usize,
}

impl SqlFilter {
    /// `bound_params` is how many placeholders the base statement already
    /// uses, so appended clauses start at `$bound_params + 1`.
    pub fn new(bound_params: usize) -> Self {
        Self {
            clauses: vec![],
            params: vec![],
            next_param: bound_params + 1,
        }
    }

    pub fn eq(&mut self, column: &str, value: impl Into<String>) {
        let n = self.placeholder();
        self.clauses.push(format!("{column} = ${n}"));
        self.params.push(FilterValue::Text(value.into()));
    }

    /// Substring match; the raw term never reaches the statement text.
    pub fn contains(&mut self, column: &str, term: &str) {
        let n = self.placeholder();
        self.clauses.push(format!("{column} ILIKE ${n}"));
        self.params.push(FilterValue::Text(format!("%{term}%")));
    }

    pub fn on_or_after(&mut self, column: &str, date: time::Date) {
        let n = self.placeholder();
        self.clauses.push(format!("{column} >= ${n}"));
        self.params.push(FilterValue::Date(date));
    }

    /// SQL fragment to splice after the base WHERE; empty when no filter
    /// was pushed.
    pub fn clause(&self) -> String {
        self.clauses
            .iter()
            .map(|c| format!(" AND {c}"))
            .collect::<String>()
    }

    pub fn params(&self) -> &[FilterValue] {
        &self.params
    }

    fn placeholder(&mut self) -> usize {
        let n = self.next_param;
        self.next_param += 1;
        n
    }
}

/// Binds collected filter values onto a prepared query, in clause order.
pub fn bind_filter<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [FilterValue],
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    for value in params {
        query = match value {
            FilterValue::Text(s) => query.bind(s.as_str()),
            FilterValue::Date(d) => query.bind(*d),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn empty_filter_contributes_nothing() {
        let filter = SqlFilter::new(0);
        assert_eq!(filter.clause(), "");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn clauses_keep_caller_order_and_continue_numbering() {
        let mut filter = SqlFilter::new(1);
        filter.eq("diploma", "CS");
        filter.eq("school_of", "Engineering");
        filter.contains("title", "algebra");
        assert_eq!(
            filter.clause(),
            " AND diploma = $2 AND school_of = $3 AND title ILIKE $4"
        );
        assert_eq!(
            filter.params(),
            &[
                FilterValue::Text("CS".into()),
                FilterValue::Text("Engineering".into()),
                FilterValue::Text("%algebra%".into()),
            ]
        );
    }

    #[test]
    fn search_term_becomes_wildcard_parameter_not_sql() {
        let mut filter = SqlFilter::new(0);
        filter.contains("title", "'; DROP TABLE notes; --");
        assert_eq!(filter.clause(), " AND title ILIKE $1");
        assert_eq!(
            filter.params(),
            &[FilterValue::Text("%'; DROP TABLE notes; --%".into())]
        );
    }

    #[test]
    fn date_bound_uses_gte() {
        let mut filter = SqlFilter::new(0);
        filter.on_or_after("created_at", date!(2024 - 09 - 01));
        filter.on_or_after("updated_at", date!(2024 - 10 - 01));
        assert_eq!(
            filter.clause(),
            " AND created_at >= $1 AND updated_at >= $2"
        );
        assert_eq!(
            filter.params(),
            &[
                FilterValue::Date(date!(2024 - 09 - 01)),
                FilterValue::Date(date!(2024 - 10 - 01)),
            ]
        );
    }
}
