use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::db::models::AudioEvent;

pub const LABEL_SNORING: &str = "Snoring";
pub const LABEL_SPEECH: &str = "Speech";
/// Room ambience; the dashboard reads it as time spent awake.
pub const LABEL_ROOM: &str = "Inside, small room";

/// Sum of classifier scores for `label` on one day.
///
/// Scores are summed as if each were a unit of time. That is how the
/// dashboard has always reported them, even though they are confidences.
pub fn total_score_for_label(date_key: DateKey, label: &str, events: &[AudioEvent]) -> f64 {
    events
        .iter()
        .filter(|event| event.date_key == date_key && event.label == label)
        .map(|event| event.score)
        .sum()
}

/// The three per-night totals shown on the sound dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStats {
    pub snore: f64,
    pub speech: f64,
    pub room: f64,
}

impl AudioStats {
    pub fn for_day(date_key: DateKey, events: &[AudioEvent]) -> Self {
        Self {
            snore: total_score_for_label(date_key, LABEL_SNORING, events),
            speech: total_score_for_label(date_key, LABEL_SPEECH, events),
            room: total_score_for_label(date_key, LABEL_ROOM, events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn event(id: i64, date_key: DateKey, label: &str, score: f64) -> AudioEvent {
        AudioEvent {
            id,
            date_key,
            label: label.to_string(),
            score,
            timestamp_millis: 1_700_000_000_000 + id,
        }
    }

    #[test]
    fn sums_scores_per_label() {
        let day = DateKey::try_from(20240501u32).unwrap();
        let events = vec![
            event(1, day, "Snoring", 0.8),
            event(2, day, "Snoring", 0.3),
            event(3, day, "Speech", 0.5),
        ];

        assert_abs_diff_eq!(total_score_for_label(day, "Snoring", &events), 1.1, epsilon = 1e-9);
        assert_abs_diff_eq!(total_score_for_label(day, "Speech", &events), 0.5, epsilon = 1e-9);
        assert_eq!(total_score_for_label(day, "Music", &events), 0.0);
    }

    #[test]
    fn ignores_other_days() {
        let day = DateKey::try_from(20240501u32).unwrap();
        let events = vec![event(1, day, "Snoring", 0.4), event(2, day.succ(), "Snoring", 0.9)];
        assert_abs_diff_eq!(total_score_for_label(day, "Snoring", &events), 0.4, epsilon = 1e-9);
    }

    #[test]
    fn dashboard_totals() {
        let day = DateKey::try_from(20240501u32).unwrap();
        let events = vec![
            event(1, day, LABEL_SNORING, 0.6),
            event(2, day, LABEL_ROOM, 0.2),
            event(3, day, LABEL_ROOM, 0.7),
        ];
        let stats = AudioStats::for_day(day, &events);
        assert_abs_diff_eq!(stats.snore, 0.6, epsilon = 1e-9);
        assert_eq!(stats.speech, 0.0);
        assert_abs_diff_eq!(stats.room, 0.9, epsilon = 1e-9);
    }
}
