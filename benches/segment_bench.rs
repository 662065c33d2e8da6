// benches/segment_bench.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::{hint::black_box, io::Write};
use thai_newmm::{Dictionary, Segmenter, UNBOUNDED, segment_with};

// ── Inputs ──────────────────────────────────────────────────────────────────

const SAMPLES: &[(&str, &str)] = &[
    ("short", "ฉันไปโรงเรียน"),
    ("sentence", "วันนี้อากาศดีมาก ฉันไปโรงเรียนกับเพื่อน 2 คน"),
    ("mixed", "ราคา 1,250.50 บาท (THB) ส่งฟรีทั่วประเทศ!"),
    ("unknown", "กระดาษคอมพิวเตอร์สำหรับเครื่องพิมพ์เลเซอร์"),
];

const EXTRA_WORDS: &[&str] = &[
    "ฉัน", "โรงเรียน", "โรง", "เรียน", "เพื่อน", "วันนี้", "อากาศ", "ดี", "มาก", "ราคา",
    "บาท", "ส่ง", "ฟรี", "ทั่ว", "ประเทศ", "กระดาษ", "คอมพิวเตอร์", "สำหรับ", "เครื่อง",
    "พิมพ์", "เครื่องพิมพ์", "เลเซอร์",
];

fn larger_dictionary() -> Dictionary {
    let words = thai_newmm::DEFAULT_WORDS
        .iter()
        .copied()
        .chain(EXTRA_WORDS.iter().copied());
    Dictionary::from_words(words).expect("word list fits in memory")
}

// ── Built-in list vs a richer one ───────────────────────────────────────────

fn bench_dictionaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dictionary");
    let builtin = Segmenter::builder().config(UNBOUNDED).build();
    let larger = Segmenter::builder()
        .dictionary(larger_dictionary())
        .config(UNBOUNDED)
        .build();

    for &(name, text) in SAMPLES {
        let long = text.repeat(64);
        group.throughput(Throughput::Bytes(long.len() as u64));
        group.bench_with_input(BenchmarkId::new("builtin", name), &long, |b, t| {
            b.iter(|| black_box(builtin.segment(black_box(t)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("larger", name), &long, |b, t| {
            b.iter(|| black_box(larger.segment(black_box(t)).unwrap()));
        });
    }
    group.finish();
}

// ── Reusing a handle vs loading per call ────────────────────────────────────

fn bench_handle_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("HandleReuse");

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    for word in thai_newmm::DEFAULT_WORDS.iter().chain(EXTRA_WORDS) {
        writeln!(file, "{word}").expect("write word");
    }
    let path = file.path().to_path_buf();
    let reused = Segmenter::new(Dictionary::try_load(&path).expect("load word list"));
    let text = SAMPLES[1].1;

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("reused", |b| {
        b.iter(|| black_box(reused.segment_str(black_box(text)).unwrap()));
    });
    group.bench_function("one_shot", |b| {
        b.iter(|| black_box(segment_with(black_box(text), Some(&path)).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_dictionaries, bench_handle_reuse);
criterion_main!(benches);
