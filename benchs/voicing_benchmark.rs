use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fret_chord_rust::guitar::music_note::CANONICAL_KEYS;
use fret_chord_rust::{GenerateOptions, VoicingConfig, find_voicings, generate_guitar_voicings};

fn benchmark_generate_voicings(c: &mut Criterion) {
    let options = GenerateOptions::default();
    c.bench_function("generate_c_major", |b| {
        b.iter(|| generate_guitar_voicings(black_box("C"), black_box("major"), &options))
    });

    // 五音和弦的候选品格最多，是最慢的情况
    c.bench_function("generate_c_13", |b| {
        b.iter(|| generate_guitar_voicings(black_box("C"), black_box("13"), &options))
    });

    let wide = GenerateOptions {
        max_fret: 24,
        max_span: 6,
        max_results: 100,
    };
    c.bench_function("generate_e_minor_full_neck", |b| {
        b.iter(|| generate_guitar_voicings(black_box("E"), black_box("minor"), &wide))
    });
}

fn benchmark_find_voicings(c: &mut Criterion) {
    let config = VoicingConfig::default();
    c.bench_function("find_voicings_all_keys_m7", |b| {
        b.iter(|| {
            for key in CANONICAL_KEYS {
                black_box(find_voicings(key, "m7", &config));
            }
        })
    });
}

criterion_group!(benches, benchmark_generate_voicings, benchmark_find_voicings);
criterion_main!(benches);
