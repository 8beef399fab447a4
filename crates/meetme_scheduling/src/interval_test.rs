#[cfg(test)]
mod tests {
    use crate::interval::{overlaps, slot_end, Interval};
    use crate::test_support::utc;
    use chrono::Duration;

    fn busy_10_to_11() -> Interval {
        Interval::new(utc(2030, 1, 1, 10, 0), utc(2030, 1, 1, 11, 0))
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let before = Interval::slot(utc(2030, 1, 1, 9, 0), 60);
        let after = Interval::slot(utc(2030, 1, 1, 11, 0), 30);

        assert!(!overlaps(&before, &busy_10_to_11()));
        assert!(!overlaps(&after, &busy_10_to_11()));
    }

    #[test]
    fn start_inside_busy_overlaps() {
        let slot = Interval::slot(utc(2030, 1, 1, 10, 30), 60);
        assert!(overlaps(&slot, &busy_10_to_11()));
    }

    #[test]
    fn end_inside_busy_overlaps() {
        let slot = Interval::slot(utc(2030, 1, 1, 9, 30), 60);
        assert!(overlaps(&slot, &busy_10_to_11()));
    }

    #[test]
    fn slot_containing_busy_overlaps() {
        let slot = Interval::slot(utc(2030, 1, 1, 9, 30), 120);
        assert!(overlaps(&slot, &busy_10_to_11()));
    }

    #[test]
    fn slot_inside_busy_overlaps() {
        let slot = Interval::slot(utc(2030, 1, 1, 10, 15), 15);
        assert!(overlaps(&slot, &busy_10_to_11()));
        assert!(busy_10_to_11().overlaps(&slot));
    }

    #[test]
    fn slot_end_adds_duration() {
        let start = utc(2030, 1, 1, 16, 45);
        assert_eq!(slot_end(start, 30), utc(2030, 1, 1, 17, 15));
        assert_eq!(Interval::slot(start, 90).duration(), Duration::minutes(90));
    }

    #[test]
    fn empty_interval_detection() {
        let t = utc(2030, 1, 1, 10, 0);
        assert!(Interval::new(t, t).is_empty());
        assert!(!busy_10_to_11().is_empty());
    }

    #[test]
    fn covers_requires_both_ends_inside() {
        let range = busy_10_to_11();
        assert!(range.covers(&Interval::slot(utc(2030, 1, 1, 10, 0), 60)));
        assert!(range.covers(&Interval::slot(utc(2030, 1, 1, 10, 30), 30)));
        assert!(!range.covers(&Interval::slot(utc(2030, 1, 1, 10, 30), 60)));
        assert!(!range.covers(&Interval::slot(utc(2030, 1, 1, 9, 30), 60)));
    }
}
