use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use std::hint::black_box;

use lazar_core::{Block2Array, Block4Array};

// --- Constants ---
const N_SMALL: usize = 1 << 10;
const N_BIG: usize = 1 << 20;

// --- Setup helpers ---

fn fresh2(n: usize) -> Block2Array {
    let mut arr = Block2Array::new(n).expect("even n");
    arr.init(42);
    arr
}

fn fresh4(n: usize) -> Block4Array {
    let mut arr = Block4Array::new(n).expect("n % 4 == 0");
    arr.init(42);
    arr
}

/// Array with a populated chain structure: every fourth cell written.
fn churned2(n: usize) -> Block2Array {
    let mut arr = fresh2(n);
    for i in (0..n).step_by(4) {
        arr.write(i, i as i64).unwrap();
    }
    arr
}

fn churned4(n: usize) -> Block4Array {
    let mut arr = fresh4(n);
    for i in (0..n).step_by(4) {
        arr.write(i, i as i64).unwrap();
    }
    arr
}

// --- init: must cost the same at any size ---

#[library_benchmark]
#[bench::small(Block2Array::new(N_SMALL).unwrap())]
#[bench::big(Block2Array::new(N_BIG).unwrap())]
fn bench_init_block2(mut arr: Block2Array) {
    black_box(arr.init(7));
}

#[library_benchmark]
#[bench::small(Block4Array::new(N_SMALL).unwrap())]
#[bench::big(Block4Array::new(N_BIG).unwrap())]
fn bench_init_block4(mut arr: Block4Array) {
    black_box(arr.init(7));
}

// --- read: unwritten cells decode to initv, written cells to stored data ---

#[library_benchmark]
#[bench::small(fresh2(N_SMALL))]
#[bench::big(fresh2(N_BIG))]
fn bench_read_unwritten_block2(mut arr: Block2Array) {
    black_box(arr.read(N_SMALL / 2).unwrap());
}

#[library_benchmark]
#[bench::small(churned2(N_SMALL))]
#[bench::big(churned2(N_BIG))]
fn bench_read_mixed_block2(mut arr: Block2Array) {
    black_box(arr.read(0).unwrap());
}

#[library_benchmark]
#[bench::small(fresh4(N_SMALL))]
#[bench::big(fresh4(N_BIG))]
fn bench_read_unwritten_block4(mut arr: Block4Array) {
    black_box(arr.read(N_SMALL / 2).unwrap());
}

#[library_benchmark]
#[bench::small(churned4(N_SMALL))]
#[bench::big(churned4(N_BIG))]
fn bench_read_mixed_block4(mut arr: Block4Array) {
    black_box(arr.read(0).unwrap());
}

// --- write: first touch pays one extend; rewrite is direct ---

#[library_benchmark]
#[bench::small(fresh2(N_SMALL))]
#[bench::big(fresh2(N_BIG))]
fn bench_write_first_touch_block2(mut arr: Block2Array) {
    black_box(arr.write(N_SMALL / 2, 9).unwrap());
}

#[library_benchmark]
#[bench::small(churned2(N_SMALL))]
#[bench::big(churned2(N_BIG))]
fn bench_write_rewrite_block2(mut arr: Block2Array) {
    black_box(arr.write(0, 9).unwrap());
}

#[library_benchmark]
#[bench::small(fresh4(N_SMALL))]
#[bench::big(fresh4(N_BIG))]
fn bench_write_first_touch_block4(mut arr: Block4Array) {
    black_box(arr.write(N_SMALL / 2, 9).unwrap());
}

#[library_benchmark]
#[bench::small(churned4(N_SMALL))]
#[bench::big(churned4(N_BIG))]
fn bench_write_rewrite_block4(mut arr: Block4Array) {
    black_box(arr.write(0, 9).unwrap());
}

library_benchmark_group!(
    name = init_ops;
    benchmarks = bench_init_block2, bench_init_block4
);

library_benchmark_group!(
    name = read_ops;
    benchmarks = bench_read_unwritten_block2, bench_read_mixed_block2,
                 bench_read_unwritten_block4, bench_read_mixed_block4
);

library_benchmark_group!(
    name = write_ops;
    benchmarks = bench_write_first_touch_block2, bench_write_rewrite_block2,
                 bench_write_first_touch_block4, bench_write_rewrite_block4
);

main!(library_benchmark_groups = init_ops, read_ops, write_ops);
