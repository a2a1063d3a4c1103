use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlwatch_masking::SqlMasker;

const CLEAN: &str = "SELECT o.id, o.total FROM orders o JOIN users u ON o.uid = u.id \
                     WHERE o.created_at > '2024-01-01' ORDER BY o.total DESC LIMIT 50";
const DIRTY: &str = "SELECT * FROM users WHERE phone = '13812345678' OR email = 'a.b@example.com' \
                     OR id_no = '110101199003071234' AND password = 'hunter22' AND host = '10.0.0.8'";

fn bench_mask(c: &mut Criterion) {
    let masker = SqlMasker::new();
    c.bench_function("mask_clean", |b| b.iter(|| masker.mask(black_box(CLEAN))));
    c.bench_function("mask_dirty", |b| b.iter(|| masker.mask(black_box(DIRTY))));
    c.bench_function("quick_mask_dirty", |b| {
        b.iter(|| masker.quick_mask(black_box(DIRTY)))
    });
    c.bench_function("contains_sensitive_clean", |b| {
        b.iter(|| masker.contains_sensitive(black_box(CLEAN)))
    });
}

criterion_group!(benches, bench_mask);
criterion_main!(benches);
