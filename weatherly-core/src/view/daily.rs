use crate::model::{ForecastEntry, utc_offset};

/// Days shown in the multi-day view.
pub const MAX_DAYS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    /// Short weekday name, e.g. "Mon".
    pub day: String,
    /// Mean temperature in Celsius.
    pub avg_temp: f64,
    pub condition: String,
}

struct DayBucket {
    day: String,
    temps: Vec<f64>,
    conditions: Vec<String>,
}

/// Collapse 3-hourly entries into per-day summaries.
///
/// Entries are keyed by the weekday name of their local time, so buckets
/// appear in the order their weekday is first seen and the same weekday a
/// week later lands in the same bucket. The prevailing condition is the
/// most frequent description; on a tie the one seen first wins.
pub fn group_by_day(entries: &[ForecastEntry], utc_offset_secs: i32) -> Vec<DailySummary> {
    let offset = utc_offset(utc_offset_secs);
    let mut buckets: Vec<DayBucket> = Vec::new();

    for entry in entries {
        let day = entry.local_time(offset).format("%a").to_string();
        let idx = match buckets.iter().position(|b| b.day == day) {
            Some(idx) => idx,
            None => {
                buckets.push(DayBucket {
                    day,
                    temps: Vec::new(),
                    conditions: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        buckets[idx].temps.push(entry.main.temp);
        buckets[idx].conditions.push(entry.description().to_string());
    }

    buckets
        .into_iter()
        .map(|bucket| DailySummary {
            avg_temp: bucket.temps.iter().sum::<f64>() / bucket.temps.len() as f64,
            condition: prevailing_condition(&bucket.conditions),
            day: bucket.day,
        })
        .take(MAX_DAYS)
        .collect()
}

fn prevailing_condition(conditions: &[String]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for cond in conditions {
        match counts.iter_mut().find(|(c, _)| *c == cond.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((cond.as_str(), 1)),
        }
    }

    let mut best = "";
    let mut best_count = 0;
    for (cond, count) in counts {
        if count > best_count {
            best = cond;
            best_count = count;
        }
    }
    best.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clouds, Condition, Readings, Wind};

    // 2024-01-01 00:00:00 UTC, a Monday.
    const MONDAY_MIDNIGHT: i64 = 1_704_067_200;
    const THREE_HOURS: i64 = 3 * 3600;

    fn entry(dt: i64, temp: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            dt,
            main: Readings {
                temp,
                feels_like: temp,
                pressure: 1013.0,
                humidity: 50,
            },
            weather: vec![Condition {
                main: "Clouds".into(),
                description: description.into(),
            }],
            wind: Wind::default(),
            clouds: Clouds::default(),
            visibility: None,
            dt_txt: None,
        }
    }

    #[test]
    fn three_days_of_three_hourly_entries() {
        let entries: Vec<_> = (0..24)
            .map(|i| entry(MONDAY_MIDNIGHT + i * THREE_HOURS, i as f64 * 0.7, "clear sky"))
            .collect();

        let days = group_by_day(&entries, 0);

        assert_eq!(days.len(), 3);
        assert_eq!(
            days.iter().map(|d| d.day.as_str()).collect::<Vec<_>>(),
            ["Mon", "Tue", "Wed"]
        );
        for (n, day) in days.iter().enumerate() {
            let members = &entries[n * 8..(n + 1) * 8];
            let mean = members.iter().map(|e| e.main.temp).sum::<f64>() / 8.0;
            assert!((day.avg_temp - mean).abs() < 0.01, "{}: {}", day.day, day.avg_temp);
        }
    }

    #[test]
    fn most_frequent_condition_wins() {
        let entries = vec![
            entry(MONDAY_MIDNIGHT, 1.0, "light rain"),
            entry(MONDAY_MIDNIGHT + THREE_HOURS, 1.0, "overcast clouds"),
            entry(MONDAY_MIDNIGHT + 2 * THREE_HOURS, 1.0, "overcast clouds"),
        ];
        assert_eq!(group_by_day(&entries, 0)[0].condition, "overcast clouds");
    }

    #[test]
    fn tie_goes_to_first_seen_condition() {
        let entries = vec![
            entry(MONDAY_MIDNIGHT, 1.0, "light rain"),
            entry(MONDAY_MIDNIGHT + THREE_HOURS, 1.0, "clear sky"),
            entry(MONDAY_MIDNIGHT + 2 * THREE_HOURS, 1.0, "clear sky"),
            entry(MONDAY_MIDNIGHT + 3 * THREE_HOURS, 1.0, "light rain"),
        ];
        assert_eq!(group_by_day(&entries, 0)[0].condition, "light rain");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let day = 24 * 3600;
        let entries = vec![
            entry(MONDAY_MIDNIGHT + 2 * day, 3.0, "clear sky"),
            entry(MONDAY_MIDNIGHT, 1.0, "clear sky"),
            entry(MONDAY_MIDNIGHT + day, 2.0, "clear sky"),
        ];
        let days: Vec<_> = group_by_day(&entries, 0).into_iter().map(|d| d.day).collect();
        assert_eq!(days, ["Wed", "Mon", "Tue"]);
    }

    #[test]
    fn same_weekday_a_week_apart_merges() {
        let week = 7 * 24 * 3600;
        let entries = vec![
            entry(MONDAY_MIDNIGHT, 10.0, "clear sky"),
            entry(MONDAY_MIDNIGHT + week, 20.0, "clear sky"),
        ];
        let days = group_by_day(&entries, 0);
        assert_eq!(days.len(), 1);
        assert!((days[0].avg_temp - 15.0).abs() < 0.01);
    }

    #[test]
    fn at_most_five_days() {
        let entries: Vec<_> = (0..40)
            .map(|i| entry(MONDAY_MIDNIGHT + i * THREE_HOURS * 2, 0.0, "clear sky"))
            .collect();
        assert_eq!(group_by_day(&entries, 0).len(), MAX_DAYS);
    }

    #[test]
    fn local_offset_shifts_day_boundary() {
        // 23:00 Sunday UTC is already Monday at UTC+2.
        let entries = vec![entry(MONDAY_MIDNIGHT - 3600, 0.0, "clear sky")];
        assert_eq!(group_by_day(&entries, 0)[0].day, "Sun");
        assert_eq!(group_by_day(&entries, 7200)[0].day, "Mon");
    }

    #[test]
    fn no_entries_no_days() {
        assert!(group_by_day(&[], 0).is_empty());
    }
}
