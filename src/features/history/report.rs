//! Weekly session reports.
//!
//! Groups completed sessions by ISO week (Monday first) in a caller-chosen
//! timezone.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::storage::SessionRecord;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Completed sessions in one calendar week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// ISO week number
    pub iso_week: u32,
    /// Completed sessions
    pub count: u32,
    /// Total minutes of completed work
    pub minutes: u32,
    /// Sessions per weekday, Monday first
    pub by_day: [u32; 7],
}

impl WeekSummary {
    fn empty(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            iso_week: week_start.iso_week().week(),
            count: 0,
            minutes: 0,
            by_day: [0; 7],
        }
    }

    fn add(&mut self, date: NaiveDate, minutes: u32) {
        self.count += 1;
        self.minutes += minutes;
        self.by_day[date.weekday().num_days_from_monday() as usize] += 1;
    }
}

/// Weekly breakdown of completed sessions, newest week first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHistory {
    pub weeks: Vec<WeekSummary>,
}

/// Monday of the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

impl WeeklyHistory {
    /// Group records into the weeks that contain at least one session.
    #[must_use]
    pub fn from_records<Tz: TimeZone>(records: &[SessionRecord], tz: &Tz) -> Self {
        let mut weeks: BTreeMap<NaiveDate, WeekSummary> = BTreeMap::new();

        for record in records {
            let date = record.completed_at.with_timezone(tz).date_naive();
            let start = week_start(date);
            weeks
                .entry(start)
                .or_insert_with(|| WeekSummary::empty(start))
                .add(date, record.duration_minutes);
        }

        Self {
            weeks: weeks.into_values().rev().collect(),
        }
    }

    /// The `count` consecutive weeks ending with the week of `today`.
    ///
    /// Weeks without sessions are included with zero counts.
    #[must_use]
    pub fn last_weeks<Tz: TimeZone>(
        records: &[SessionRecord],
        tz: &Tz,
        today: NaiveDate,
        count: usize,
    ) -> Self {
        let grouped = Self::from_records(records, tz);
        let current = week_start(today);

        let weeks = (0..count)
            .map(|i| {
                let start = current - Duration::weeks(i64::try_from(i).unwrap_or(i64::MAX));
                grouped
                    .weeks
                    .iter()
                    .find(|w| w.week_start == start)
                    .cloned()
                    .unwrap_or_else(|| WeekSummary::empty(start))
            })
            .collect();

        Self { weeks }
    }

    /// Sessions across every week in the report.
    #[must_use]
    pub fn total_sessions(&self) -> u32 {
        self.weeks.iter().map(|w| w.count).sum()
    }

    /// Busiest week's session count.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.weeks.iter().map(|w| w.count).max().unwrap_or(0)
    }

    /// Average sessions per week.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weekly_average(&self) -> f64 {
        if self.weeks.is_empty() {
            return 0.0;
        }
        f64::from(self.total_sessions()) / self.weeks.len() as f64
    }

    /// Format the report for display.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Weekly History".to_string());
        lines.push("═".repeat(50));

        if self.weeks.is_empty() {
            lines.push("No completed sessions yet.".to_string());
            return lines.join("\n");
        }

        let max = self.max_count().max(1);
        for week in &self.weeks {
            let bar_len = (f64::from(week.count) / f64::from(max) * 24.0) as usize;
            lines.push(format!(
                "  {} (W{:02}) {:>3} {}",
                week.week_start.format("%Y-%m-%d"),
                week.iso_week,
                week.count,
                "█".repeat(bar_len)
            ));
        }

        lines.push("─".repeat(50));
        lines.push(format!("  Total sessions:  {}", self.total_sessions()));
        lines.push(format!("  Weekly average:  {:.1}", self.weekly_average()));

        if let Some(latest) = self.weeks.first() {
            let days = DAY_NAMES
                .iter()
                .zip(latest.by_day)
                .map(|(name, n)| format!("{name} {n}"))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(format!("  This week:       {days}"));
        }

        lines.join("\n")
    }
}
