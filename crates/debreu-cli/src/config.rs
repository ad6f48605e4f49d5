//! Scenario files.
//!
//! A scenario is a TOML document describing one option chain:
//!
//! ```toml
//! [model]
//! puts = [{ strike = 800, bid = 1.2, ask = 1.65 }, { strike = 1200, price = 54.9 }]
//! calls = [{ strike = 1200, price = 53.8 }, { strike = 1425, bid = 1.4, ask = 1.85 }]
//!
//! [states]
//! levels = [650, 1000, 1312.5, 1500]   # or: put = [...] and call = [...]
//!
//! [evaluation]                          # optional held-out quotes
//! metric = "rmse"
//! puts = [...]
//! calls = [...]
//!
//! [sweep]                               # optional, with `levels` above
//! low = [800, 950, 1100]                # candidates for the lowest level
//! high = [1650, 1700, 1800]             # candidates for the highest level
//! ```
//!
//! With a `[sweep]` section, `levels` lists only the interior states.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use debreu_options::{
    sweep_endpoints, ArrowDebreuModel, EndpointOutcome, ErrorMetric, MarketStates, OptionQuote,
    OptionQuotes,
};

use crate::error::{CliError, CliResult};

/// One quote as written in a scenario: a price, or a bid/ask pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteEntry {
    /// Strike level
    pub strike: f64,
    /// Quoted price
    pub price: Option<f64>,
    /// Bid, used with `ask` when no price is given
    pub bid: Option<f64>,
    /// Ask, used with `bid` when no price is given
    pub ask: Option<f64>,
}

impl QuoteEntry {
    fn to_quote(self) -> CliResult<OptionQuote> {
        match (self.price, self.bid, self.ask) {
            (Some(price), _, _) => Ok(OptionQuote::new(self.strike, price)),
            (None, Some(bid), Some(ask)) => Ok(OptionQuote::from_bid_ask(self.strike, bid, ask)),
            _ => Err(CliError::config(format!(
                "quote at strike {} needs either price or both bid and ask",
                self.strike
            ))),
        }
    }
}

fn to_quotes(entries: &[QuoteEntry]) -> CliResult<OptionQuotes> {
    entries.iter().map(|e| e.to_quote()).collect()
}

/// Quotes the model is fitted to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    /// Put quotes
    #[serde(default)]
    pub puts: Vec<QuoteEntry>,
    /// Call quotes
    #[serde(default)]
    pub calls: Vec<QuoteEntry>,
}

/// Hypothesized terminal states.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatesSection {
    /// Flat level list, partitioned by the quoted strikes
    pub levels: Option<Vec<f64>>,
    /// Explicit put states
    pub put: Option<Vec<f64>>,
    /// Explicit call states
    pub call: Option<Vec<f64>>,
}

/// Held-out quotes to score the model against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationSection {
    /// Default error metric
    #[serde(default)]
    pub metric: ErrorMetric,
    /// Put quotes
    #[serde(default)]
    pub puts: Vec<QuoteEntry>,
    /// Call quotes
    #[serde(default)]
    pub calls: Vec<QuoteEntry>,
}

/// Candidate outermost states.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepSection {
    /// Candidates for the lowest state
    pub low: Vec<f64>,
    /// Candidates for the highest state
    pub high: Vec<f64>,
}

/// A parsed scenario file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Fitted quotes
    #[serde(default)]
    pub model: ModelSection,
    /// State hypothesis
    #[serde(default)]
    pub states: StatesSection,
    /// Held-out quotes
    pub evaluation: Option<EvaluationSection>,
    /// Endpoint candidates
    pub sweep: Option<SweepSection>,
}

impl ScenarioConfig {
    /// Loads a scenario from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        info!("loading scenario from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses a scenario from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the state-price model described by the scenario.
    pub fn build_model(&self) -> CliResult<ArrowDebreuModel> {
        let puts = to_quotes(&self.model.puts)?;
        let calls = to_quotes(&self.model.calls)?;
        if puts.is_empty() && calls.is_empty() {
            return Err(CliError::config("[model] has no put or call quotes"));
        }

        let states = match (&self.states.levels, &self.states.put, &self.states.call) {
            (Some(levels), None, None) => MarketStates::partition(levels, &puts, &calls),
            (None, put, call) if put.is_some() || call.is_some() => MarketStates::new(
                put.clone().unwrap_or_default(),
                call.clone().unwrap_or_default(),
            ),
            (Some(_), _, _) => {
                return Err(CliError::config(
                    "[states] takes either levels or put/call, not both",
                ))
            }
            _ => return Err(CliError::config("[states] needs levels or put/call")),
        };

        Ok(ArrowDebreuModel::new(puts, calls, states))
    }

    /// Solves the model for every pair of `[sweep]` endpoints around the
    /// interior `levels`.
    pub fn endpoint_sweep(&self) -> CliResult<Vec<EndpointOutcome>> {
        let sweep = self
            .sweep
            .as_ref()
            .ok_or_else(|| CliError::config("scenario has no [sweep] section"))?;
        let interior = self
            .states
            .levels
            .as_ref()
            .ok_or_else(|| CliError::config("[sweep] needs interior [states] levels"))?;
        let puts = to_quotes(&self.model.puts)?;
        let calls = to_quotes(&self.model.calls)?;

        info!(
            "sweeping {} low and {} high endpoints",
            sweep.low.len(),
            sweep.high.len()
        );
        Ok(sweep_endpoints(&puts, &calls, interior, &sweep.low, &sweep.high)?)
    }

    /// Held-out put and call quotes.
    pub fn evaluation_quotes(&self) -> CliResult<(OptionQuotes, OptionQuotes, ErrorMetric)> {
        let section = self
            .evaluation
            .as_ref()
            .ok_or_else(|| CliError::config("scenario has no [evaluation] section"))?;
        Ok((
            to_quotes(&section.puts)?,
            to_quotes(&section.calls)?,
            section.metric,
        ))
    }
}
