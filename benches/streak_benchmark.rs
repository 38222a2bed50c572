use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use naijafit_tracker::services::streak;

/// Build a ten-year logging history with gaps on a fixed pattern, in the
/// shuffled-ish (non-chronological) order the meal log produces.
fn history(start: NaiveDate, days: u64) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for n in 0..days {
        // Skip roughly one day in seven, and log two meals on some days.
        if n % 7 == 3 {
            continue;
        }
        let date = start.checked_add_days(Days::new(n)).unwrap();
        dates.push(date);
        if n % 5 == 0 {
            dates.push(date);
        }
    }
    dates.reverse();
    dates
}

fn benchmark_streak_analysis(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap();
    let ten_years = history(start, 3650);
    let today = start.checked_add_days(Days::new(3649)).unwrap();

    let mut group = c.benchmark_group("streak_analysis");

    group.bench_function("ten_year_history", |b| {
        b.iter(|| streak::analyze(black_box(&ten_years), black_box(today)))
    });

    let sparse = history(start, 120);
    group.bench_function("four_month_history", |b| {
        b.iter(|| streak::analyze(black_box(&sparse), black_box(today)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_streak_analysis);
criterion_main!(benches);
