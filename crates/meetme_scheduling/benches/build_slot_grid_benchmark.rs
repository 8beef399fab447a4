use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meetme_common::BusyInterval;
use meetme_scheduling::{build_slot_grid, BusinessRules, PastSlotPolicy};

// Helper function to create a range starting on a Tuesday
fn create_time_range(duration_days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    (start, start + Duration::days(duration_days))
}

// Helper function to create a list of busy intervals
fn create_busy_intervals(
    base_time: DateTime<Utc>,
    count: usize,
    duration_hours: i64,
) -> Vec<BusyInterval> {
    let mut busy = Vec::new();
    let mut current_time = base_time;

    for _ in 0..count {
        let start = current_time + Duration::hours(1);
        let end = start + Duration::hours(duration_hours.max(1));
        busy.push(BusyInterval::new(start, end, "Busy"));
        current_time = end + Duration::hours(1);
    }

    busy
}

fn zurich_rules() -> BusinessRules {
    BusinessRules::new(
        Tz::Europe__Zurich,
        BusinessRules::default().working_days().to_vec(),
        9,
        17,
        PastSlotPolicy::Block,
    )
    .unwrap()
}

fn benchmark_build_slot_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_slot_grid");
    let now = Utc.with_ymd_and_hms(2029, 12, 31, 0, 0, 0).unwrap();
    let rules = zurich_rules();

    group.bench_function("no_busy_intervals", |b| {
        let (start, end) = create_time_range(7);
        let busy = Vec::new();
        b.iter(|| {
            build_slot_grid(
                black_box(start),
                black_box(end),
                black_box(60),
                black_box(15),
                black_box(&busy),
                black_box(&rules),
                black_box(now),
            )
        })
    });

    group.bench_function("many_busy_intervals", |b| {
        let (start, end) = create_time_range(7);
        let busy = create_busy_intervals(start, 20, 2);
        b.iter(|| {
            build_slot_grid(
                black_box(start),
                black_box(end),
                black_box(60),
                black_box(15),
                black_box(&busy),
                black_box(&rules),
                black_box(now),
            )
        })
    });

    group.bench_function("month_range", |b| {
        let (start, end) = create_time_range(31);
        let busy = create_busy_intervals(start, 60, 2);
        b.iter(|| {
            build_slot_grid(
                black_box(start),
                black_box(end),
                black_box(30),
                black_box(30),
                black_box(&busy),
                black_box(&rules),
                black_box(now),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_build_slot_grid);
criterion_main!(benches);
