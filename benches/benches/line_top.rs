// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_line_top::LineTopIndex;

const LINE_HEIGHT: f64 = 18.0;
const MAX_ROW: usize = 100_000;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// An index over `MAX_ROW + 1` rows with `blocks` randomly anchored blocks.
fn gen_index(blocks: usize) -> LineTopIndex {
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    let mut index = LineTopIndex::new(LINE_HEIGHT, MAX_ROW);
    for _ in 0..blocks {
        let row = rng.below(MAX_ROW + 1);
        let height = (rng.below(6) + 1) as f64 * LINE_HEIGHT;
        index.insert_block(row, height);
    }
    index
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_top/queries");

    // Both queries are linear in the number of blocks; a scroll frame issues a
    // handful of each.
    for blocks in [16usize, 128, 1_024, 8_192] {
        let index = gen_index(blocks);
        let mut rng = Rng::new(0xD1B5_4A32_D192_ED03);
        let rows: Vec<usize> = (0..256).map(|_| rng.below(MAX_ROW + 1)).collect();
        let tops: Vec<f64> = rows
            .iter()
            .map(|&row| index.top_pixel_position_for_row(row) + LINE_HEIGHT * 0.3)
            .collect();
        group.throughput(Throughput::Elements(rows.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("top_pixel_position_for_row", blocks),
            &rows,
            |b, rows| {
                b.iter(|| {
                    for &row in rows {
                        black_box(index.top_pixel_position_for_row(row));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("row_for_top_pixel_position", blocks),
            &tops,
            |b, tops| {
                b.iter(|| {
                    for &top in tops {
                        black_box(index.row_for_top_pixel_position(top));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_top/mutations");

    for blocks in [128usize, 1_024, 8_192] {
        group.throughput(Throughput::Elements(1));

        group.bench_function(BenchmarkId::new("insert_block", blocks), |b| {
            b.iter_batched(
                || gen_index(blocks),
                |mut index| {
                    black_box(index.insert_block(MAX_ROW / 2, LINE_HEIGHT));
                    black_box(index);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("splice_typing_newline", blocks), |b| {
            b.iter_batched(
                || gen_index(blocks),
                |mut index| {
                    black_box(index.splice(MAX_ROW / 2, 1, 2));
                    black_box(index);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("splice_delete_range", blocks), |b| {
            b.iter_batched(
                || gen_index(blocks),
                |mut index| {
                    black_box(index.splice(MAX_ROW / 4, MAX_ROW / 2, 0));
                    black_box(index);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries, bench_mutations);
criterion_main!(benches);
