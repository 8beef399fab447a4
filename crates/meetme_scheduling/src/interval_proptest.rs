#[cfg(test)]
mod tests {
    use crate::availability::is_available;
    use crate::interval::{overlaps, slot_end, Interval};
    use crate::test_support::{busy, utc};
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        utc(2030, 1, 1, 0, 0)
    }

    fn minutes_interval(start: i64, len: i64) -> Interval {
        let start = base() + Duration::minutes(start);
        Interval::new(start, start + Duration::minutes(len))
    }

    // Minute-aligned intervals share an instant iff they share a whole minute.
    fn share_a_minute(a: &Interval, b: &Interval) -> bool {
        let mut t = a.start;
        while t < a.end {
            if t >= b.start && t < b.end {
                return true;
            }
            t += Duration::minutes(1);
        }
        false
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            a_start in 0..300i64, a_len in 1..120i64,
            b_start in 0..300i64, b_len in 1..120i64,
        ) {
            let a = minutes_interval(a_start, a_len);
            let b = minutes_interval(b_start, b_len);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn overlap_matches_shared_minutes(
            a_start in 0..300i64, a_len in 1..120i64,
            b_start in 0..300i64, b_len in 1..120i64,
        ) {
            let a = minutes_interval(a_start, a_len);
            let b = minutes_interval(b_start, b_len);
            prop_assert_eq!(overlaps(&a, &b), share_a_minute(&a, &b));
        }

        #[test]
        fn available_slots_touch_no_busy_interval(
            start in 0..600i64,
            duration in 1..180i64,
            busy_spans in proptest::collection::vec((0..600i64, 1..120i64), 0..6),
        ) {
            let busy_set: Vec<_> = busy_spans
                .iter()
                .map(|(s, l)| {
                    let i = minutes_interval(*s, *l);
                    busy(i.start, i.end)
                })
                .collect();
            let slot_start = base() + Duration::minutes(start);
            let candidate = Interval::new(slot_start, slot_end(slot_start, duration));

            let any_overlap = busy_set
                .iter()
                .any(|b| overlaps(&candidate, &Interval::from(b)));
            prop_assert_eq!(is_available(slot_start, duration, &busy_set), !any_overlap);
        }

        #[test]
        fn slot_directly_after_busy_is_free(b_start in 0..600i64, b_len in 1..120i64, duration in 1..120i64) {
            let b = minutes_interval(b_start, b_len);
            prop_assert!(is_available(b.end, duration, &[busy(b.start, b.end)]));
        }
    }
}
