use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imgsplit::{extract_labels, stratified_split_indices, HoldOut, Splitter};

fn synthetic_dataset(samples: usize, classes: usize) -> (Vec<String>, Vec<usize>) {
    let labels: Vec<usize> = (0..samples).map(|i| i % classes).collect();
    let paths = labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("data/class_{:03}/{:06}.jpg", label, i))
        .collect();
    (paths, labels)
}

fn bench_labels(c: &mut Criterion) {
    let (paths, _) = synthetic_dataset(10_000, 10);
    let mut group = c.benchmark_group("Labels");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("extract_10k", |b| b.iter(|| {
        extract_labels(black_box(&paths)).unwrap()
    }));

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("Split");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let (_, labels) = synthetic_dataset(10_000, 10);
    group.bench_function("primitive_10k", |b| b.iter(|| {
        stratified_split_indices(black_box(&labels), HoldOut::Fraction(0.2), 10).unwrap()
    }));

    let splitter = Splitter::builder().build().unwrap();
    let (paths, labels) = synthetic_dataset(10_000, 10);
    group.bench_function("three_way_10k", |b| b.iter(|| {
        splitter.split(black_box(&paths), black_box(&labels)).unwrap()
    }));

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");
    group.sample_size(20);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let splitter = Splitter::builder().build().unwrap();

    // Scaling with number of classes at a fixed dataset size
    let class_counts = [2, 10, 50, 200];
    for &count in &class_counts {
        let (paths, labels) = synthetic_dataset(20_000, count);
        group.bench_function(format!("classes_{}", count), |b| b.iter(|| {
            splitter.split(black_box(&paths), black_box(&labels)).unwrap()
        }));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_labels,
    bench_split,
    bench_scaling
);
criterion_main!(benches);
