use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlwatch_fingerprint::SqlFingerprinter;

const SHORT: &str = "SELECT * FROM users WHERE id = 42";
const LONG: &str = "SELECT o.id, o.total, u.name FROM orders o JOIN users u ON o.uid = u.id \
    WHERE o.status IN ('paid', 'shipped', 'refunded') AND o.created_at > '2024-01-01' \
    /* report */ ORDER BY o.total DESC LIMIT 100";

fn bench_fingerprint(c: &mut Criterion) {
    let engine = SqlFingerprinter::new();
    c.bench_function("fingerprint_short", |b| {
        b.iter(|| engine.fingerprint(black_box(SHORT)))
    });
    c.bench_function("fingerprint_long", |b| {
        b.iter(|| engine.fingerprint(black_box(LONG)))
    });
}

criterion_group!(benches, bench_fingerprint);
criterion_main!(benches);
