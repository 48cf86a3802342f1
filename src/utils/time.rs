use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// A uniformly random instant within the last `max_days` days.
pub fn random_past<R: Rng + ?Sized>(rng: &mut R, max_days: i64) -> DateTime<Utc> {
    let max_ms = Duration::days(max_days).num_milliseconds().max(1);
    now() - Duration::milliseconds(rng.gen_range(0..max_ms))
}
