//! Parser and engine benchmarks.
//!
//! Benchmarks: tokenize/parse of the fixture application module, and a full
//! exposure run over 100 generated test modules.
//! Run with: cargo bench -p wirecheck-analysis --bench parser_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wirecheck_analysis::engine::{ExposureEngine, SourceFile};
use wirecheck_analysis::parsers::parse;
use wirecheck_analysis::tokenizer::tokenize;
use wirecheck_core::config::AnalysisConfig;

const MAIN: &str = include_str!("../../../test-fixtures/elm/Main.elm");

/// Generate a test module whose suite wires up all but one of its tests.
fn sample_test_module(idx: usize) -> SourceFile {
    let source = format!(
        r#"module Generated{idx} exposing (suite)

import Expect
import Test exposing (..)


suite : Test
suite =
    describe "generated {idx}"
        [ first
        , second
        ]


first : Test
first =
    test "first" <|
        \_ -> Expect.equal {idx} {idx}


second : Test
second =
    test "second {{- not a comment -}}" <|
        \_ -> Expect.notEqual 0 {idx}


stray : Test
stray =
    -- forgotten
    test "stray" <|
        \_ -> Expect.pass
"#
    );
    SourceFile::new(
        format!("Generated{idx}"),
        format!("tests/Generated{idx}.elm"),
        true,
        source,
    )
}

fn single_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_file");

    group.bench_function("tokenize_main", |b| {
        b.iter(|| tokenize(MAIN));
    });

    group.bench_function("parse_main", |b| {
        b.iter(|| parse("Main", MAIN));
    });

    group.finish();
}

fn exposure_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("exposure_run");
    group.sample_size(20);

    let files: Vec<SourceFile> = (0..100).map(sample_test_module).collect();

    for parallel in [false, true] {
        let engine = ExposureEngine::new(&AnalysisConfig {
            parallel: Some(parallel),
            ..Default::default()
        });
        group.bench_with_input(
            BenchmarkId::new("run_100", if parallel { "parallel" } else { "sequential" }),
            &files,
            |b, files| {
                b.iter(|| engine.run(files));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, single_file, exposure_run);
criterion_main!(benches);
