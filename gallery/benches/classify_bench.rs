use criterion::{black_box, criterion_group, criterion_main, Criterion};
use faceid_gallery::{classify, Gallery, DEFAULT_TOLERANCE};

fn random_unit_vec(dim: usize, seed: u64) -> Vec<f32> {
    let mut v = Vec::with_capacity(dim);
    let mut state = seed;
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        v.push(((state >> 33) as f32) / (u32::MAX as f32) - 0.5);
    }
    let norm: f64 = v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt();
    if norm > 0.0 {
        let s = (1.0 / norm) as f32;
        for x in &mut v {
            *x *= s;
        }
    }
    v
}

fn populated_gallery(dim: usize, n: usize) -> Gallery {
    let gallery = Gallery::new();
    for i in 0..n {
        let emb = random_unit_vec(dim, i as u64 + 1);
        gallery.register(&format!("student-{i:04}"), &emb).unwrap();
    }
    gallery
}

fn bench_classify(c: &mut Criterion) {
    let dim = 128;
    let gallery = populated_gallery(dim, 200);
    let snapshot = gallery.snapshot();
    let query = random_unit_vec(dim, 9999);

    c.bench_function("gallery_classify_128d_200faces", |b| {
        b.iter(|| {
            let _ = black_box(classify(black_box(&query), &snapshot, DEFAULT_TOLERANCE));
        });
    });
}

fn bench_recognize_batch(c: &mut Criterion) {
    let dim = 128;
    let gallery = populated_gallery(dim, 200);
    let queries: Vec<Vec<f32>> = (0..5)
        .map(|i| random_unit_vec(dim, 5000 + i as u64))
        .collect();

    c.bench_function("gallery_recognize_5faces_128d_200entries", |b| {
        b.iter(|| {
            let _ = black_box(gallery.recognize(black_box(&queries), DEFAULT_TOLERANCE));
        });
    });
}

criterion_group!(benches, bench_classify, bench_recognize_batch);
criterion_main!(benches);
