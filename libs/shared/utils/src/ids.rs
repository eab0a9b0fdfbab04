use chrono::Utc;

/// Millisecond timestamp id, bumped past every existing id so that two
/// records created within the same millisecond never collide.
pub fn next_timestamp_id<I>(existing: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= now => max.saturating_add(1),
        _ => now,
    }
}
