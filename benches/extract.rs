use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

use threadmedia::config::ApiConfig;
use threadmedia::extract::{extract_thread, url::ApiRoot};
use threadmedia::parser::thread::load_thread;
use threadmedia::thread::DefaultThreadPolicy;

fn bench_extract_fixture(c: &mut Criterion) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("thread.json");
    let thread = load_thread(&fixture_path).unwrap();
    let resolver = ApiRoot::from_config(&ApiConfig::default()).unwrap();
    let policy = DefaultThreadPolicy::default();

    c.bench_function("extract_fixture_thread", |b| {
        b.iter(|| extract_thread(&thread, &policy, &resolver).unwrap())
    });
}

fn bench_load_thread(c: &mut Criterion) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("thread.json");

    c.bench_function("load_fixture_thread", |b| {
        b.iter(|| load_thread(&fixture_path).unwrap())
    });
}

criterion_group!(benches, bench_extract_fixture, bench_load_thread);
criterion_main!(benches);
