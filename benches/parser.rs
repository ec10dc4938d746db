//! Parser and codec benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use inikit::{Configuration, Options};
use std::hint::black_box;

/// Build a synthetic document with the given number of sections, each
/// holding a mix of scalar and array settings plus comments.
fn synthetic_document(sections: usize) -> String {
    let mut source = String::new();
    for s in 0..sections {
        source.push_str(&format!("# block {}\n[Section{}] ; inline\n", s, s));
        for k in 0..10 {
            source.push_str(&format!("Key{} = value-{}-{} ; note\n", k, s, k));
        }
        source.push_str("Retries = {1,2,3,4,5}\n\n");
    }
    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for sections in [10usize, 100, 500] {
        let source = synthetic_document(sections);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &source,
            |b, source| {
                b.iter(|| Configuration::from_str(black_box(source)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_save(c: &mut Criterion) {
    let config = Configuration::from_str(&synthetic_document(100)).unwrap();
    c.bench_function("save_to_string", |b| {
        b.iter(|| black_box(&config).save_to_string());
    });
}

fn bench_array_decode(c: &mut Criterion) {
    let options = Options::default();
    let config = Configuration::from_str("[A]\nnumbers = {1,2,3,4,5,6,7,8,9,10}\n").unwrap();
    let setting = config
        .section_at(0)
        .and_then(|section| section.find_setting("numbers"))
        .unwrap();

    c.bench_function("decode_int_array", |b| {
        b.iter(|| {
            setting
                .array_value::<i64>(black_box(&options))
                .unwrap()
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_parse, bench_save, bench_array_decode);
criterion_main!(benches);
