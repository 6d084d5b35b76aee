//! Replays an action log through reducers built from a [`ReplayConfig`].

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use switchyard_actions::Action;
use switchyard_engine::{
    combine_reducers, create_reducer, handle, ActionProcessor, CombinedReducer, CombinedState,
    Reducer, ReducerCreator, ReducerMap,
};

use crate::config::{CounterConfig, ReplayConfig};

/// How the replay classifies an action before reducing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Known,
    Unknown,
}

/// Final state plus dispatch counts, printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub state: BTreeMap<String, i64>,
    pub dispatched: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub unknown: usize,
}

/// Integer amount carried by an action: `{"value": n}` or a bare `n`.
fn amount(action: &Action) -> Option<i64> {
    match action.payload.as_ref()? {
        serde_json::Value::Object(fields) => fields.get("value")?.as_i64(),
        other => other.as_i64(),
    }
}

fn counter_reducer(counter: &CounterConfig) -> ReducerCreator<i64, Action> {
    let mut reducer = create_reducer(counter.initial);
    for (tags, sign) in [(&counter.add, 1_i64), (&counter.subtract, -1)] {
        for tag in tags {
            reducer = reducer.when(tag, move |state: Arc<i64>, action: &Action| {
                let Some(n) = amount(action) else {
                    debug!(tag = action.tag(), "no integer amount in payload");
                    return state;
                };
                match sign.checked_mul(n).and_then(|d| state.checked_add(d)) {
                    Some(next) => Arc::new(next),
                    None => {
                        warn!(tag = action.tag(), current = *state, amount = n, "counter would overflow, keeping state");
                        state
                    }
                }
            });
        }
    }
    reducer
}

/// One counter reducer per configured key, combined.
pub fn build_reducer(config: &ReplayConfig) -> CombinedReducer<Action> {
    let map = config
        .counters
        .iter()
        .fold(ReducerMap::new(), |map, counter| {
            map.insert(&counter.key, counter_reducer(counter))
        });
    combine_reducers(map)
}

/// Classifies actions as known (some counter reacts) or unknown.
pub fn build_classifier(config: &ReplayConfig) -> ActionProcessor<Action, Outcome> {
    config
        .known_tags()
        .fold(handle::otherwise(|_: &Action| Outcome::Unknown), |processor, tag| {
            processor.when(tag, |_: &Action| Outcome::Known)
        })
}

/// Read a JSON-lines action log. Blank lines are skipped.
pub fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open action log: {}", path.display()))?;
    parse_actions(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to read action log: {}", path.display()))
}

pub fn parse_actions(reader: impl BufRead) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let action: Action = serde_json::from_str(&line)
            .with_context(|| format!("Invalid action on line {}", index + 1))?;
        actions.push(action);
    }
    Ok(actions)
}

/// Reduce `actions` from the default state and summarize.
pub fn run(config: &ReplayConfig, actions: &[Action]) -> Result<ReplaySummary> {
    let reducer = build_reducer(config);
    let classifier = build_classifier(config);

    let mut state: Option<Arc<CombinedState>> = None;
    let mut summary = ReplaySummary {
        state: BTreeMap::new(),
        dispatched: 0,
        changed: 0,
        unchanged: 0,
        unknown: 0,
    };

    for action in actions {
        if classifier.process(action)? == Outcome::Unknown {
            summary.unknown += 1;
        }

        let next = reducer.reduce(state.clone(), action);
        let changed = state.as_ref().map_or(true, |prev| !Arc::ptr_eq(prev, &next));
        debug!(tag = action.tag(), changed, "dispatched");

        summary.dispatched += 1;
        if changed {
            summary.changed += 1;
        } else {
            summary.unchanged += 1;
        }
        state = Some(next);
    }

    // An empty log never reduces, so the counters sit at their initial values.
    for counter in &config.counters {
        let value = match &state {
            Some(state) => state.get::<i64>(&counter.key).map(|v| *v),
            None => Some(counter.initial),
        };
        if let Some(value) = value {
            summary.state.insert(counter.key.clone(), value);
        }
    }

    info!(
        dispatched = summary.dispatched,
        changed = summary.changed,
        unknown = summary.unknown,
        "replay finished"
    );
    Ok(summary)
}
