use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use diffattr_benches::available_corpora;
use diffattr_core::{compare, render_differences, render_json, ReportConfig, Value};

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for corpus in available_corpora() {
        group.throughput(Throughput::Bytes(corpus.fixture_bytes() as u64));
        group.bench_function(corpus.name(), |b| {
            b.iter(|| {
                let dataset = corpus.load().expect("failed to load dataset");
                black_box(dataset);
            });
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    for corpus in available_corpora() {
        let dataset = corpus.load().expect("failed to load dataset");
        group.throughput(Throughput::Bytes(corpus.fixture_bytes() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name()),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    let count = dataset.difference_count().expect("comparable");
                    black_box(count);
                });
            },
        );
    }
    group.finish();
}

fn bench_first_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("first-difference");
    for corpus in available_corpora() {
        let dataset = corpus.load().expect("failed to load dataset");
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name()),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    let first = compare(dataset.reference(), dataset.test()).next();
                    black_box(first.is_some());
                });
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let config = ReportConfig::default();

    {
        let mut text = c.benchmark_group("render-text");
        for corpus in available_corpora() {
            let dataset = corpus.load().expect("failed to load dataset");
            let differences = collect(dataset.reference(), dataset.test());
            text.throughput(Throughput::Elements(differences.len() as u64));
            text.bench_function(corpus.name(), |b| {
                b.iter(|| {
                    let rendered = render_differences(&differences, &config);
                    black_box(rendered);
                });
            });
        }
        text.finish();
    }

    {
        let mut json = c.benchmark_group("render-json");
        for corpus in available_corpora() {
            let dataset = corpus.load().expect("failed to load dataset");
            let differences = collect(dataset.reference(), dataset.test());
            json.throughput(Throughput::Elements(differences.len() as u64));
            json.bench_function(corpus.name(), |b| {
                b.iter(|| {
                    let rendered = render_json(&differences).expect("json output");
                    black_box(rendered);
                });
            });
        }
        json.finish();
    }
}

fn collect<'a>(reference: &'a Value, test: &'a Value) -> Vec<diffattr_core::Difference<'a>> {
    compare(reference, test).collect::<Result<_, _>>().expect("comparable")
}

criterion_group!(benches, bench_load, bench_compare, bench_first_difference, bench_render);
criterion_main!(benches);
