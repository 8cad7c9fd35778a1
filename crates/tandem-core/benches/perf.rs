use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tandem_core::{AlignedDiff, BlockNavigator, DiffLine, TextDiff};

/// Alternating context / delete-add runs of varying height
fn synthetic_diff(hunks: usize) -> TextDiff {
    let mut lines = Vec::new();
    let mut old_line = 1;
    let mut new_line = 1;
    for hunk in 0..hunks {
        for _ in 0..3 {
            lines.push(DiffLine::context("    unchanged();", old_line, new_line));
            old_line += 1;
            new_line += 1;
        }
        for _ in 0..(hunk % 4) {
            lines.push(DiffLine::deleted("    old_call();", old_line));
            old_line += 1;
        }
        for _ in 0..(hunk % 3 + 1) {
            lines.push(DiffLine::added("    new_call();", new_line));
            new_line += 1;
        }
    }
    TextDiff::new("bench.rs", lines)
}

fn bench_align(c: &mut Criterion) {
    let diff = synthetic_diff(5_000);
    c.bench_function("align_5k_hunks", |b| {
        b.iter(|| AlignedDiff::new(black_box(&diff.lines)))
    });
}

fn bench_caret_resync(c: &mut Criterion) {
    let diff = synthetic_diff(5_000);
    let aligned = AlignedDiff::new(&diff.lines);
    let rows = aligned.len();
    c.bench_function("caret_resync_sweep", |b| {
        b.iter(|| {
            let mut nav = BlockNavigator::new(&aligned.old, Some(0));
            for caret in (1..rows).step_by(97) {
                nav.update_by_caret_position(black_box(caret));
            }
            nav.current_index()
        })
    });
}

criterion_group!(benches, bench_align, bench_caret_resync);
criterion_main!(benches);
