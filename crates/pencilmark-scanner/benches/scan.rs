//! Benchmarks for the scanner.
//!
//! # Benchmarks
//!
//! - **`scan_to_fixed_point`**: Steps a fresh session until no cell changes.
//!   Includes building the scan context.
//! - **`seen_cells`**: Resolves the seen cells of every cell, with and without
//!   variant constraints.
//!
//! # Test Data
//!
//! - **`classic`**: a 9x9 puzzle with 30 givens.
//! - **`sparse`**: the solution of `classic` with one cell per row left
//!   empty.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench scan
//! ```

use std::{hint, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use pencilmark_core::{Dimensions, Grid, RuleFlags, RuleModel};
use pencilmark_scanner::{ScanMode, ScannerSettings, Session, visibility};

const PUZZLES: [(&str, &str); 2] = [
    (
        "classic",
        "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_
        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6
        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
        ",
    ),
    (
        "sparse",
        "
        .34 678 912
        672 .95 348
        198 342 .67
        859 761 42.
        426 853 7.1
        713 924 .56
        961 .37 284
        287 419 6.5
        345 28. 179
        ",
    ),
];

fn bench_scan_to_fixed_point(c: &mut Criterion) {
    let dims = Dimensions::square(9);
    for (name, text) in PUZZLES {
        let rules = RuleModel::new(dims);
        let grid = Grid::from_givens(dims, text).unwrap();
        c.bench_with_input(
            BenchmarkId::new("scan_to_fixed_point", name),
            &(rules, grid),
            |b, (rules, grid)| {
                b.iter_batched(
                    || Session::new(rules.clone(), grid.clone()),
                    |mut session| {
                        while session.step(None) {}
                        hint::black_box(session)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_seen_cells(c: &mut Criterion) {
    let dims = Dimensions::square(9);
    let variants = [
        ("classic", RuleModel::new(dims), ScannerSettings::default()),
        (
            "variant",
            RuleModel::new(dims).with_flags(
                RuleFlags::DIAGONAL_POS
                    | RuleFlags::DIAGONAL_NEG
                    | RuleFlags::ANTI_KING
                    | RuleFlags::ANTI_KNIGHT
                    | RuleFlags::DISJOINT_SETS,
            ),
            ScannerSettings::default().with_mode(ScanMode::Advanced),
        ),
    ];
    for (name, rules, settings) in variants {
        c.bench_function(&format!("seen_cells/{name}"), |b| {
            b.iter(|| {
                for pos in dims.playable_positions() {
                    hint::black_box(visibility::seen_cells(&rules, &settings, pos));
                }
            });
        });
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(8));
    targets =
        bench_scan_to_fixed_point,
        bench_seen_cells
);
criterion_main!(benches);
