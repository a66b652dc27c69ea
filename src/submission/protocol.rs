use chrono::{DateTime, FixedOffset};
use rand::Rng;

use super::calendar;

/// Generate a tracking number: local timestamp (`YYYYMMDDHHMMSS`) plus two
/// random digits. Fresh per call; collisions within the same second are
/// possible and accepted.
pub fn generate() -> String {
    let suffix = rand::rng().random_range(0..100);
    generate_at(calendar::local_now(), suffix)
}

fn generate_at(now: DateTime<FixedOffset>, suffix: u8) -> String {
    format!("{}{suffix:02}", now.format("%Y%m%d%H%M%S"))
}
