//! Seasonal bucketing, backfill and next-season projection

use crate::constants::{metrics, seasonal};
use crate::models::{
    MetricSample, Season, SeasonalBucket, SeasonalOutlook, SeasonalShift, TrendDirection,
};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;

/// Buckets wellness history by calendar season and projects the next season
///
/// Works over the four wellness metrics (activity level, mood, energy, sleep
/// quality). Missing seasons are inferred from populated ones with a fixed
/// seasonal multiplier; sleep quality is carried across unmodified, an
/// inherited policy that treats sleep as seasonally invariant.
pub struct SeasonalTrendEngine;

/// Per-season accumulator for the four wellness metrics
#[derive(Default)]
struct BucketAccumulator {
    sums: [f64; 4],
    counts: [usize; 4],
}

impl SeasonalTrendEngine {
    pub fn new() -> Self {
        Self
    }

    /// Partition samples into the four season buckets, applying the
    /// backfill policy to seasons with no samples
    ///
    /// Returned in [`Season::ALL`] order. Backfilled buckets keep
    /// `sample_count == 0` so callers can tell inference from observation.
    pub fn build_buckets(
        &self,
        samples_by_metric: &HashMap<String, Vec<MetricSample>>,
    ) -> Vec<SeasonalBucket> {
        let mut accumulators: HashMap<Season, BucketAccumulator> = HashMap::new();

        for (slot, metric_name) in metrics::SEASONAL_METRICS.iter().enumerate() {
            if let Some(samples) = samples_by_metric.get(*metric_name) {
                for sample in samples {
                    let season = Season::from_month(sample.timestamp.month());
                    let acc = accumulators.entry(season).or_default();
                    acc.sums[slot] += sample.value;
                    acc.counts[slot] += 1;
                }
            }
        }

        let mut buckets: Vec<SeasonalBucket> = Season::ALL
            .iter()
            .map(|season| {
                let acc = accumulators.get(season);
                let sample_count =
                    acc.map(|a| a.counts.iter().sum()).unwrap_or(0usize);
                let values = metric_values(acc);
                SeasonalBucket {
                    season: *season,
                    activity_level: values[0].unwrap_or(0.0),
                    mood_score: values[1].unwrap_or(0.0),
                    energy_level: values[2].unwrap_or(0.0),
                    sleep_quality: values[3].unwrap_or(0.0),
                    sample_count,
                }
            })
            .collect();

        let populated: Vec<SeasonalBucket> = buckets
            .iter()
            .filter(|b| b.sample_count > 0)
            .cloned()
            .collect();

        if populated.is_empty() {
            for bucket in &mut buckets {
                bucket.activity_level = seasonal::DEFAULT_ACTIVITY_LEVEL;
                bucket.mood_score = seasonal::DEFAULT_MOOD_SCORE;
                bucket.energy_level = seasonal::DEFAULT_ENERGY_LEVEL;
                bucket.sleep_quality = seasonal::DEFAULT_SLEEP_QUALITY;
            }
            return buckets;
        }

        let n = populated.len() as f64;
        let mean_activity =
            populated.iter().map(|b| b.activity_level).sum::<f64>() / n;
        let mean_mood = populated.iter().map(|b| b.mood_score).sum::<f64>() / n;
        let mean_energy = populated.iter().map(|b| b.energy_level).sum::<f64>() / n;
        let mean_sleep = populated.iter().map(|b| b.sleep_quality).sum::<f64>() / n;

        for bucket in &mut buckets {
            if bucket.sample_count > 0 {
                continue;
            }
            let multiplier = seasonal_multiplier(bucket.season);
            bucket.activity_level = mean_activity * multiplier;
            bucket.mood_score = mean_mood * multiplier;
            bucket.energy_level = mean_energy * multiplier;
            // Sleep is assumed not to vary with season
            bucket.sleep_quality = mean_sleep;
        }

        buckets
    }

    /// Build buckets and project the season after `as_of`
    pub fn outlook(
        &self,
        samples_by_metric: &HashMap<String, Vec<MetricSample>>,
        as_of: DateTime<Utc>,
    ) -> SeasonalOutlook {
        let buckets = self.build_buckets(samples_by_metric);
        let current_season = Season::from_month(as_of.month());
        let next_season = current_season.next();

        let current = bucket_for(&buckets, current_season);
        let next = bucket_for(&buckets, next_season);

        let shifts = vec![
            shift(metrics::ACTIVITY_LEVEL, current.activity_level, next.activity_level),
            shift(metrics::MOOD_SCORE, current.mood_score, next.mood_score),
            shift(metrics::ENERGY_LEVEL, current.energy_level, next.energy_level),
            shift(metrics::SLEEP_QUALITY, current.sleep_quality, next.sleep_quality),
        ];

        SeasonalOutlook {
            current_season,
            next_season,
            buckets,
            shifts,
            recommendations: season_recommendations(next_season),
        }
    }
}

impl Default for SeasonalTrendEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn metric_values(acc: Option<&BucketAccumulator>) -> [Option<f64>; 4] {
    let mut values = [None; 4];
    if let Some(acc) = acc {
        for slot in 0..4 {
            if acc.counts[slot] > 0 {
                values[slot] = Some(acc.sums[slot] / acc.counts[slot] as f64);
            }
        }
    }
    values
}

fn seasonal_multiplier(season: Season) -> f64 {
    match season {
        Season::Summer => seasonal::SUMMER_MULTIPLIER,
        Season::Winter => seasonal::WINTER_MULTIPLIER,
        Season::Spring | Season::Autumn => seasonal::NEUTRAL_MULTIPLIER,
    }
}

fn bucket_for(buckets: &[SeasonalBucket], season: Season) -> &SeasonalBucket {
    // Buckets are built in Season::ALL order, one per season
    &buckets[Season::ALL
        .iter()
        .position(|s| *s == season)
        .unwrap_or(0)]
}

fn shift(metric: &str, current: f64, projected: f64) -> SeasonalShift {
    let delta = projected - current;
    let trend = if delta > 0.0 {
        TrendDirection::Increasing
    } else if delta < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };
    SeasonalShift {
        metric: metric.to_string(),
        current,
        projected,
        delta,
        trend,
    }
}

/// Fixed recommendations keyed by the upcoming season only
fn season_recommendations(next: Season) -> Vec<String> {
    let actions: &[&str] = match next {
        Season::Spring => &[
            "Move more sessions outdoors as the weather opens up",
            "Refresh goals for the new season",
        ],
        Season::Summer => &[
            "Schedule workouts outside peak heat hours",
            "Raise hydration targets for hotter days",
        ],
        Season::Autumn => &[
            "Plan indoor backup workouts as daylight shrinks",
            "Keep session length steady while routines shift",
        ],
        Season::Winter => &[
            "Keep a consistent indoor routine through the holidays",
            "Get light exposure early in the day to support energy",
        ],
    };
    actions.iter().map(|s| (*s).to_string()).collect()
}
