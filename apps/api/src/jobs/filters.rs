//! Query construction for the public job list.
//!
//! Every key is optional; unset keys add no clause. The public list always
//! restricts to published postings, orders featured-first then newest-first,
//! and caps at one page.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

/// Fixed page size for public listings.
pub const PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilters {
    pub search: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub work_location_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
}

fn trimmed(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl JobFilters {
    /// Appends the filter clauses to a query whose WHERE clause is already
    /// open (the base predicate `status = 'published'` comes first).
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(search) = trimmed(&self.search) {
            let pattern = format!("%{search}%");
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(location) = trimmed(&self.location) {
            qb.push(" AND location ILIKE ")
                .push_bind(format!("%{location}%"));
        }
        if let Some(industry) = trimmed(&self.industry) {
            qb.push(" AND industry = ").push_bind(industry.to_string());
        }
        if let Some(employment_type) = trimmed(&self.employment_type) {
            qb.push(" AND employment_type = ")
                .push_bind(employment_type.to_string());
        }
        if let Some(experience_level) = trimmed(&self.experience_level) {
            qb.push(" AND experience_level = ")
                .push_bind(experience_level.to_string());
        }
        if let Some(work_location_type) = trimmed(&self.work_location_type) {
            qb.push(" AND work_location_type = ")
                .push_bind(work_location_type.to_string());
        }
        if let Some(min) = self.salary_min {
            qb.push(" AND salary_range_min >= ").push_bind(min);
        }
        if let Some(max) = self.salary_max {
            qb.push(" AND salary_range_max <= ").push_bind(max);
        }
    }

    /// The full page query: published only, featured-first then newest,
    /// capped at `PAGE_SIZE`.
    pub fn list_query(&self) -> QueryBuilder<'_, Postgres> {
        let mut qb =
            QueryBuilder::new("SELECT * FROM job_postings WHERE status = 'published'");
        self.apply(&mut qb);
        qb.push(" ORDER BY featured DESC, created_at DESC LIMIT ");
        qb.push_bind(PAGE_SIZE);
        qb
    }

    /// The matching total, uncapped.
    pub fn count_query(&self) -> QueryBuilder<'_, Postgres> {
        let mut qb =
            QueryBuilder::new("SELECT COUNT(*) FROM job_postings WHERE status = 'published'");
        self.apply(&mut qb);
        qb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(filters: &JobFilters) -> String {
        filters.list_query().into_sql()
    }

    #[test]
    fn test_no_filters_is_published_page_only() {
        let s = sql(&JobFilters::default());
        assert!(s.contains("status = 'published'"));
        assert!(s.contains("ORDER BY featured DESC, created_at DESC"));
        assert!(!s.contains("employment_type"));
        assert!(!s.contains("ILIKE"));
    }

    #[test]
    fn test_employment_type_adds_equality_clause() {
        let filters = JobFilters {
            employment_type: Some("full_time".to_string()),
            ..Default::default()
        };
        let s = sql(&filters);
        assert!(s.contains("employment_type ="));
        assert!(!s.contains("experience_level"));
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let filters = JobFilters {
            search: Some("ingénieur".to_string()),
            ..Default::default()
        };
        let s = sql(&filters);
        assert!(s.contains("title ILIKE"));
        assert!(s.contains("OR description ILIKE"));
    }

    #[test]
    fn test_blank_search_adds_no_clause() {
        let filters = JobFilters {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!sql(&filters).contains("ILIKE"));
    }

    #[test]
    fn test_salary_bounds_are_range_clauses() {
        let filters = JobFilters {
            salary_min: Some(200_000),
            salary_max: Some(500_000),
            ..Default::default()
        };
        let s = sql(&filters);
        assert!(s.contains("salary_range_min >="));
        assert!(s.contains("salary_range_max <="));
    }

    #[test]
    fn test_count_query_has_no_cap_or_order() {
        let filters = JobFilters {
            industry: Some("tech".to_string()),
            ..Default::default()
        };
        let s = filters.count_query().into_sql();
        assert!(s.starts_with("SELECT COUNT(*)"));
        assert!(s.contains("industry ="));
        assert!(!s.contains("LIMIT"));
        assert!(!s.contains("ORDER BY"));
    }
}
