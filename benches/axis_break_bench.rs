use chart_axis_breaks::{AxisId, CategoryAxis, CategoryAxisBreak, CategoryAxisLink};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn build_axis(categories: usize, breaks: usize) -> CategoryAxis {
    let mut axis = CategoryAxis::new(AxisId(0), (0..categories).map(|i| format!("cat-{i}")))
        .with_length_px(1920.0)
        .expect("valid length");
    let stride = categories / (breaks + 1);
    for i in 0..breaks {
        let start = (i + 1) * stride;
        axis.add_break(CategoryAxisBreak::with_categories(
            format!("cat-{start}"),
            format!("cat-{}", start + stride / 2),
        ));
    }
    axis.validate_data_range();
    axis
}

fn bench_index_to_position_10k(c: &mut Criterion) {
    let axis = build_axis(10_000, 8);

    c.bench_function("index_to_position_10k", |b| {
        b.iter(|| {
            for index in (0..10_000).step_by(7) {
                let _ = axis.index_to_position(black_box(index as f64));
            }
        })
    });
}

fn bench_validate_data_range_64_breaks(c: &mut Criterion) {
    let mut axis = build_axis(5_000, 64);

    c.bench_function("validate_data_range_64_breaks", |b| {
        b.iter(|| {
            axis.invalidate_data_range();
            axis.validate_data_range();
        })
    });
}

fn bench_break_positions(c: &mut Criterion) {
    let axis = build_axis(2_000, 16);

    c.bench_function("break_positions_16", |b| {
        b.iter(|| {
            for view in axis.breaks() {
                let _ = black_box(view.start_position());
                let _ = black_box(view.end_position());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_index_to_position_10k,
    bench_validate_data_range_64_breaks,
    bench_break_positions
);
criterion_main!(benches);
