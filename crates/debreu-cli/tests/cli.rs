//! End-to-end tests for the `debreu` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const INDEX_SCENARIO: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../scenarios/index_options.toml"
);

const ENDPOINT_SWEEP: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../scenarios/endpoint_sweep.toml"
);

const PUT_ARBITRAGE: &str = r#"
[model]
puts = [{ strike = 90, price = 12 }, { strike = 100, price = 18 }]

[states]
put = [80, 95]
"#;

fn debreu() -> Command {
    let mut cmd = Command::cargo_bin("debreu").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn scenario_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// STATES
// =============================================================================

#[test]
fn test_states_minimal() {
    let file = scenario_file(PUT_ARBITRAGE);

    debreu()
        .args(["states", "--format", "minimal"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2000000000,-1.2000000000"));
}

#[test]
fn test_states_json_reports_arbitrage() {
    let file = scenario_file(PUT_ARBITRAGE);

    debreu()
        .args(["states", "-f", "json"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"discount_factor\""))
        .stdout(predicate::str::contains("\"violations\""))
        .stdout(predicate::str::contains("\"status\": \"complete\""));
}

#[test]
fn test_states_table() {
    debreu()
        .args(["states", INDEX_SCENARIO])
        .assert()
        .success()
        .stdout(predicate::str::contains("State Prices"))
        .stdout(predicate::str::contains("Summary"));
}

#[test]
fn test_states_sweep_minimal() {
    debreu()
        .args(["states", ENDPOINT_SWEEP, "--sweep", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("800,1650,true"))
        .stdout(predicate::str::contains("950,1700,true"))
        .stdout(predicate::str::contains("true").count(9));
}

#[test]
fn test_states_sweep_json() {
    debreu()
        .args(["states", ENDPOINT_SWEEP, "--sweep", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"low\": 1100.0"))
        .stdout(predicate::str::contains("\"violations\""));
}

#[test]
fn test_states_sweep_without_section() {
    let file = scenario_file(PUT_ARBITRAGE);

    debreu()
        .arg("states")
        .arg(file.path())
        .arg("--sweep")
        .assert()
        .failure()
        .stderr(predicate::str::contains("[sweep]"));
}

#[test]
fn test_states_missing_file() {
    debreu()
        .args(["states", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_states_malformed_scenario() {
    let file = scenario_file("[model\nputs = ");

    debreu()
        .arg("states")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scenario parse error"));
}

// =============================================================================
// EVALUATE
// =============================================================================

#[test]
fn test_evaluate_mae() {
    debreu()
        .args(["evaluate", INDEX_SCENARIO, "--metric", "mae", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.06622219"));
}

#[test]
fn test_evaluate_scenario_metric() {
    debreu()
        .args(["evaluate", INDEX_SCENARIO, "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.08547975"));
}

#[test]
fn test_evaluate_json() {
    debreu()
        .args(["-f", "json", "evaluate", INDEX_SCENARIO])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quotes\""))
        .stdout(predicate::str::contains("\"rmse\""));
}

#[test]
fn test_evaluate_without_evaluation_section() {
    let file = scenario_file(PUT_ARBITRAGE);

    debreu()
        .arg("evaluate")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[evaluation]"));
}

// =============================================================================
// BOND
// =============================================================================

#[test]
fn test_bond_yield_from_price() {
    debreu()
        .args(["bond", "--maturity", "2", "--period", "0.25", "--coupon", "8"])
        .args(["--price", "98", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yield: 9.003038%"));
}

#[test]
fn test_bond_price_from_yield_json() {
    debreu()
        .args(["bond", "-m", "2", "-p", "0.25", "-c", "8", "--yield", "9"])
        .args(["--shift", "10", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("98.00555695"))
        .stdout(predicate::str::contains("\"shift_bps\""));
}

#[test]
fn test_bond_cashflows_table() {
    debreu()
        .args(["bond", "-m", "1", "-c", "6", "--yield", "5", "--cashflows"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash Flows"))
        .stdout(predicate::str::contains("103.0000"));
}

#[test]
fn test_bond_requires_price_or_yield() {
    debreu()
        .args(["bond", "--maturity", "2", "--coupon", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--price or --yield"));
}

#[test]
fn test_bond_price_conflicts_with_yield() {
    debreu()
        .args(["bond", "-m", "2", "-c", "8", "--price", "98", "--yield", "9"])
        .assert()
        .failure();
}

#[test]
fn test_bond_rejects_negative_maturity() {
    debreu()
        .args(["bond", "--maturity=-1", "--coupon", "8", "--yield", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid maturity"));
}

// =============================================================================
// IMPLIED VOLATILITY
// =============================================================================

#[test]
fn test_implied_vol_recovers_call_volatility() {
    debreu()
        .args(["implied-vol", "--kind", "call", "-s", "60", "-k", "65"])
        .args(["-e", "0.25", "-r", "0.08", "-p", "2.133368444916", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.30000000"));
}

#[test]
fn test_implied_vol_table() {
    debreu()
        .args(["implied-vol", "--kind", "put", "-s", "60", "-k", "65"])
        .args(["-e", "0.25", "-r", "0.08", "-p", "5.846282209855"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parity Call Price"));
}

// =============================================================================
// ROOT
// =============================================================================

#[test]
fn test_root_all_methods_agree() {
    debreu()
        .args(["root", "--function", "sqrt2", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.414213562").count(3));
}

#[test]
fn test_root_quartic_json() {
    debreu()
        .args(["root", "--method", "newton", "--guess=-2", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"method\""))
        .stdout(predicate::str::contains("\"iterations\""));
}
