//! Pure aggregation helpers behind the dashboard endpoints.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::application::ApplicationStatus;
use crate::models::job::JobPosting;

/// Days covered by the applications-over-time chart.
pub const CHART_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: i64,
}

/// Buckets application timestamps by calendar day over the trailing window
/// ending at `today`. Always exactly `CHART_WINDOW_DAYS` buckets, oldest
/// first, zero-filled; timestamps outside the window are ignored.
pub fn applications_over_time(created: &[DateTime<Utc>], today: NaiveDate) -> Vec<DayBucket> {
    let start = today - Duration::days(CHART_WINDOW_DAYS - 1);
    let mut buckets: Vec<DayBucket> = (0..CHART_WINDOW_DAYS)
        .map(|offset| DayBucket {
            date: start + Duration::days(offset),
            count: 0,
        })
        .collect();

    for ts in created {
        let day = ts.date_naive();
        if day < start || day > today {
            continue;
        }
        let idx = (day - start).num_days() as usize;
        buckets[idx].count += 1;
    }

    buckets
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: i64,
}

/// Counts applications per status over the fixed label set. Every label is
/// present in output order even at zero; unknown statuses are dropped.
pub fn status_chart(statuses: &[String]) -> Vec<StatusCount> {
    ApplicationStatus::ALL
        .iter()
        .map(|s| StatusCount {
            status: s.as_str(),
            count: statuses.iter().filter(|v| v.as_str() == s.as_str()).count() as i64,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmployerTotals {
    pub total_jobs: i64,
    pub total_applications: i64,
    pub total_views: i64,
}

/// Headline stats: counter sums across the employer's postings.
pub fn employer_totals(postings: &[JobPosting]) -> EmployerTotals {
    EmployerTotals {
        total_jobs: postings.len() as i64,
        total_applications: postings.iter().map(|p| i64::from(p.applications_count)).sum(),
        total_views: postings.iter().map(|p| i64::from(p.views_count)).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_chart_is_exactly_thirty_buckets_oldest_first() {
        let today = day(2024, 6, 30);
        let buckets = applications_over_time(&[], today);
        assert_eq!(buckets.len(), 30);
        assert_eq!(buckets[0].date, day(2024, 6, 1));
        assert_eq!(buckets[29].date, today);
        assert!(buckets.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_empty_days_are_zero_filled() {
        let today = day(2024, 6, 30);
        let created = vec![at(day(2024, 6, 15), 9), at(day(2024, 6, 15), 17)];
        let buckets = applications_over_time(&created, today);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<i64>(), 2);
        assert_eq!(buckets[14].count, 2); // June 15
        assert_eq!(buckets.iter().filter(|b| b.count == 0).count(), 29);
    }

    #[test]
    fn test_out_of_window_timestamps_ignored() {
        let today = day(2024, 6, 30);
        let created = vec![
            at(day(2024, 5, 1), 12),  // before the window
            at(day(2024, 7, 1), 12),  // after `today`
            at(day(2024, 6, 1), 0),   // first bucket, boundary
            at(day(2024, 6, 30), 23), // last bucket, boundary
        ];
        let buckets = applications_over_time(&created, today);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<i64>(), 2);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[29].count, 1);
    }

    #[test]
    fn test_status_chart_has_all_five_labels() {
        let chart = status_chart(&[]);
        let labels: Vec<_> = chart.iter().map(|c| c.status).collect();
        assert_eq!(
            labels,
            vec!["submitted", "viewed", "in_progress", "accepted", "rejected"]
        );
        assert!(chart.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_status_chart_counts_match_and_unknown_dropped() {
        let statuses = vec![
            "submitted".to_string(),
            "submitted".to_string(),
            "accepted".to_string(),
            "archived".to_string(), // not in the label set
        ];
        let chart = status_chart(&statuses);
        assert_eq!(chart[0], StatusCount { status: "submitted", count: 2 });
        assert_eq!(chart[3], StatusCount { status: "accepted", count: 1 });
        assert_eq!(chart.iter().map(|c| c.count).sum::<i64>(), 3);
    }

    #[test]
    fn test_employer_totals_sum_counters() {
        use chrono::Utc;
        use uuid::Uuid;

        let make = |apps: i32, views: i32| JobPosting {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            company_id: None,
            title: "T".to_string(),
            description: "D".to_string(),
            employment_type: "full_time".to_string(),
            work_location_type: "on_site".to_string(),
            experience_level: "mid".to_string(),
            industry: None,
            location: None,
            salary_range_min: None,
            salary_range_max: None,
            featured: false,
            status: "published".to_string(),
            applications_count: apps,
            views_count: views,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let totals = employer_totals(&[make(3, 100), make(7, 50)]);
        assert_eq!(
            totals,
            EmployerTotals {
                total_jobs: 2,
                total_applications: 10,
                total_views: 150,
            }
        );
    }
}
