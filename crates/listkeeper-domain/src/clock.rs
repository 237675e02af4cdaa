use chrono::{DateTime, Duration, Utc};

/// Current time truncated to whole milliseconds, the resolution of the
/// persisted document.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Next modification stamp: the current time, or one millisecond after
/// `previous` when the clock has not advanced past it.
pub fn next_stamp_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_millis();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_next_stamp_is_strictly_later() {
        let future = now_millis() + Duration::seconds(60);
        let next = next_stamp_after(future);
        assert_eq!(next, future + Duration::milliseconds(1));

        let past = now_millis() - Duration::seconds(60);
        assert!(next_stamp_after(past) > past);
    }
}
