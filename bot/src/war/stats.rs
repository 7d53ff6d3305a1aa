use crate::store::{WarOutcome, WarRecord};

/// Aggregated view of a guild's concluded engagements.
#[derive(Debug, Clone, PartialEq)]
pub struct WarStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub truces: usize,
    pub average_duration_seconds: f64,
}

impl WarStats {
    /// Aggregate a guild's full history.
    pub fn from_records(records: &[WarRecord]) -> Self {
        let wins = records
            .iter()
            .filter(|r| r.status == WarOutcome::Win)
            .count();
        let losses = records
            .iter()
            .filter(|r| r.status == WarOutcome::Loss)
            .count();
        let truces = records
            .iter()
            .filter(|r| r.status == WarOutcome::Truce)
            .count();
        let total_duration: f64 = records.iter().map(|r| r.duration_seconds).sum();
        let average_duration_seconds = if records.is_empty() {
            0.0
        } else {
            total_duration / records.len() as f64
        };

        Self {
            total: records.len(),
            wins,
            losses,
            truces,
            average_duration_seconds,
        }
    }

    /// Win rate in percent over decided wars (truces excluded). `None` when
    /// nothing was decided yet.
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.wins + self.losses;
        (decided > 0).then(|| self.wins as f64 / decided as f64 * 100.0)
    }
}

/// Format a duration in seconds as `HH:MM:SS`.
pub fn format_hms(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// The `n` most recently concluded records, newest first. RFC 3339 end
/// times in a fixed offset sort lexicographically in time order.
pub fn most_recent(records: &[WarRecord], n: usize) -> Vec<&WarRecord> {
    let mut sorted: Vec<&WarRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.end_time_utc.cmp(&a.end_time_utc));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: WarOutcome, duration_seconds: f64, end_time_utc: &str) -> WarRecord {
        WarRecord {
            war_id: 1,
            initiator_id: 42,
            initiator_roblox_user: "Builderman".into(),
            opponents: "a, b".into(),
            num_opponents: 2,
            region: "Europe".into(),
            start_time_utc: "2024-05-01T12:00:00+00:00".into(),
            end_time_utc: end_time_utc.into(),
            duration_seconds,
            status,
            concluded_by_id: 42,
        }
    }

    #[test]
    fn test_aggregates_outcomes_and_average() {
        let records = vec![
            record(WarOutcome::Win, 100.0, "2024-05-01T12:01:40+00:00"),
            record(WarOutcome::Win, 200.0, "2024-05-01T12:03:20+00:00"),
            record(WarOutcome::Loss, 300.0, "2024-05-01T12:05:00+00:00"),
            record(WarOutcome::Truce, 400.0, "2024-05-01T12:06:40+00:00"),
        ];
        let stats = WarStats::from_records(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.truces, 1);
        assert_eq!(stats.average_duration_seconds, 250.0);
    }

    #[test]
    fn test_win_rate_excludes_truces() {
        let records = vec![
            record(WarOutcome::Win, 10.0, "2024-05-01T12:00:10+00:00"),
            record(WarOutcome::Loss, 10.0, "2024-05-01T12:00:20+00:00"),
            record(WarOutcome::Truce, 10.0, "2024-05-01T12:00:30+00:00"),
        ];
        let stats = WarStats::from_records(&records);
        assert_eq!(stats.win_rate(), Some(50.0));
    }

    #[test]
    fn test_win_rate_none_when_nothing_decided() {
        let records = vec![record(WarOutcome::Truce, 10.0, "2024-05-01T12:00:10+00:00")];
        assert_eq!(WarStats::from_records(&records).win_rate(), None);
        assert_eq!(WarStats::from_records(&[]).win_rate(), None);
    }

    #[test]
    fn test_empty_history_aggregates_to_zero() {
        let stats = WarStats::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_duration_seconds, 0.0);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0.0), "00:00:00");
        assert_eq!(format_hms(59.9), "00:00:59");
        assert_eq!(format_hms(3661.0), "01:01:01");
        assert_eq!(format_hms(86400.0), "24:00:00");
    }

    #[test]
    fn test_most_recent_sorts_newest_first_and_truncates() {
        let records = vec![
            record(WarOutcome::Win, 1.0, "2024-05-01T12:00:10+00:00"),
            record(WarOutcome::Loss, 1.0, "2024-05-03T12:00:10+00:00"),
            record(WarOutcome::Truce, 1.0, "2024-05-02T12:00:10+00:00"),
        ];
        let recent = most_recent(&records, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].status, WarOutcome::Loss);
        assert_eq!(recent[1].status, WarOutcome::Truce);
    }
}
