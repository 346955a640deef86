// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// A trusted (episode number, date) fact used to calibrate interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub number: u32,
    pub date: NaiveDate,
}

impl Anchor {
    pub fn new(number: u32, date: NaiveDate) -> Self {
        Self { number, date }
    }
}

/// Cadence assumed when fewer than two anchors constrain a segment
const FALLBACK_DAYS_PER_EPISODE: f64 = 7.0;

/// Assign a publication instant to every requested episode number.
///
/// Anchored numbers are pinned to their anchor date exactly. Numbers
/// between two anchors are linearly interpolated; numbers beyond the
/// first or last anchor are extrapolated using the cadence of the two
/// nearest anchors on that side, falling back to a constant cadence of
/// 7 days per episode when only one anchor exists. With no anchors at
/// all, every episode maps to `now`.
///
/// This is a pure function: the clock is injected via `now`, so the
/// result is fully determined by its inputs. It never fails; every
/// input shape has a defined fallback.
pub fn assign_dates(
    episode_numbers: &[u32],
    anchors: &[Anchor],
    now: DateTime<Utc>,
) -> BTreeMap<u32, DateTime<Utc>> {
    let mut result = BTreeMap::new();

    if anchors.is_empty() {
        for &number in episode_numbers {
            result.insert(number, now);
        }
        return result;
    }

    // Anchors are curated data, not guaranteed to arrive sorted
    let mut sorted: Vec<Anchor> = anchors.to_vec();
    sorted.sort_by_key(|anchor| anchor.number);

    for &number in episode_numbers {
        result.insert(number, date_for(number, &sorted, now));
    }

    result
}

/// Compute the date for a single episode number against sorted anchors
fn date_for(number: u32, sorted: &[Anchor], now: DateTime<Utc>) -> DateTime<Utc> {
    if let Some(anchor) = sorted.iter().find(|a| a.number == number) {
        return midnight_utc(anchor.date);
    }

    // Closest anchor strictly below and strictly above the target.
    // The list is sorted, so a last/first scan picks the nearest ones.
    let prev = sorted.iter().filter(|a| a.number < number).next_back();
    let next = sorted.iter().find(|a| a.number > number);

    match (prev, next) {
        (Some(prev), Some(next)) => interpolate(number, prev, next),
        (Some(prev), None) => extrapolate_forward(number, prev, sorted),
        (None, Some(next)) => extrapolate_backward(number, next, sorted),
        // Unreachable with non-empty anchors, kept as a defined fallback
        (None, None) => now,
    }
}

fn interpolate(number: u32, prev: &Anchor, next: &Anchor) -> DateTime<Utc> {
    let episode_span = next.number - prev.number;
    let day_span = (next.date - prev.date).num_days();

    if episode_span == 0 || day_span == 0 {
        // Degenerate anchor pair collapses onto the earlier anchor
        return midnight_utc(prev.date);
    }

    let days_per_episode = day_span as f64 / episode_span as f64;
    let offset = (number - prev.number) as f64 * days_per_episode;
    midnight_utc(prev.date) + fractional_days(offset)
}

fn extrapolate_forward(number: u32, prev: &Anchor, sorted: &[Anchor]) -> DateTime<Utc> {
    // Cadence of the last two anchors, if a second one exists
    let prev2 = sorted
        .iter()
        .filter(|a| a.number < prev.number)
        .next_back();

    let days_per_episode = match prev2 {
        Some(prev2) => {
            let episode_span = prev.number - prev2.number;
            let day_span = (prev.date - prev2.date).num_days();
            if episode_span == 0 {
                FALLBACK_DAYS_PER_EPISODE
            } else {
                day_span as f64 / episode_span as f64
            }
        }
        None => FALLBACK_DAYS_PER_EPISODE,
    };

    let offset = (number - prev.number) as f64 * days_per_episode;
    midnight_utc(prev.date) + fractional_days(offset)
}

fn extrapolate_backward(number: u32, next: &Anchor, sorted: &[Anchor]) -> DateTime<Utc> {
    // Cadence of the first two anchors, if a second one exists
    let next2 = sorted.iter().find(|a| a.number > next.number);

    let days_per_episode = match next2 {
        Some(next2) => {
            let episode_span = next2.number - next.number;
            let day_span = (next2.date - next.date).num_days();
            if episode_span == 0 {
                FALLBACK_DAYS_PER_EPISODE
            } else {
                day_span as f64 / episode_span as f64
            }
        }
        None => FALLBACK_DAYS_PER_EPISODE,
    };

    let offset = (next.number - number) as f64 * days_per_episode;
    midnight_utc(next.date) - fractional_days(offset)
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Convert fractional days to a timedelta without truncating the cadence.
/// Second resolution is kept so fractional cadences (1.5 days/episode)
/// land between calendar days instead of collapsing onto one of them.
fn fractional_days(days: f64) -> Duration {
    Duration::seconds((days * 86_400.0).round() as i64)
}
