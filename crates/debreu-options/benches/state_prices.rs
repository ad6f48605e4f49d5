//! Benchmarks for state-price recovery.
//!
//! Run with: cargo bench -p debreu-options

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use debreu_options::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// A synthetic chain with `n` puts below 1000 and `n` calls above it.
fn create_chain(n: usize) -> (OptionQuotes, OptionQuotes, MarketStates) {
    let step = 400.0 / n as f64;
    let put_strikes: Vec<f64> = (1..=n).map(|i| 600.0 + step * i as f64).collect();
    let call_strikes: Vec<f64> = (0..n).map(|i| 1000.0 + step * i as f64).collect();

    let puts = put_strikes
        .iter()
        .map(|k| OptionQuote::new(*k, 0.5 + (k - 600.0).powi(2) / 4000.0))
        .collect();
    let calls = call_strikes
        .iter()
        .map(|k| OptionQuote::new(*k, 0.5 + (1400.0 - k).powi(2) / 4000.0))
        .collect();

    let put_states = put_strikes.iter().map(|k| k - step / 2.0).collect();
    let call_states = call_strikes.iter().map(|k| k + step / 2.0).collect();

    (puts, calls, MarketStates::new(put_states, call_states))
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_state_prices");

    for n in [4, 16, 64] {
        let (puts, calls, states) = create_chain(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                solve_state_prices(
                    black_box(&puts.strikes()),
                    black_box(&puts.prices()),
                    black_box(&states.put_states),
                    black_box(&calls.strikes()),
                    black_box(&calls.prices()),
                    black_box(&states.call_states),
                )
            });
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let (puts, calls, states) = create_chain(16);
    let model = ArrowDebreuModel::new(puts.clone(), calls.clone(), states);

    c.bench_function("evaluate_rmse_16", |b| {
        b.iter(|| model.evaluate_quotes(black_box(&puts), black_box(&calls), ErrorMetric::Rmse));
    });
}

fn bench_completeness(c: &mut Criterion) {
    let (puts, calls, states) = create_chain(32);
    let matrix = ArrowDebreuModel::new(puts, calls, states).payoff_matrix();

    c.bench_function("is_complete_64", |b| {
        b.iter(|| is_complete(black_box(&matrix), 64));
    });
}

criterion_group!(benches, bench_solve, bench_evaluate, bench_completeness);
criterion_main!(benches);
