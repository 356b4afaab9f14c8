//! WASM bindings for browser play

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{describe_strategy, run_gauntlet, Engine, EngineConfig, StrategyId};

/// An engine instance owned by JavaScript, one per match.
#[wasm_bindgen]
pub struct WasmEngine {
    inner: Engine,
}

#[wasm_bindgen]
impl WasmEngine {
    /// Create an engine. `config_json` may be empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmEngine, JsError> {
        let config = if config_json.is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?
        };
        Ok(Self { inner: Engine::with_config(config) })
    }

    /// Play one round. Pass `""` for the first round of a match.
    pub fn play(&mut self, previous: &str) -> Result<String, JsError> {
        self.inner
            .step_token(previous)
            .map(|m| m.token().to_string())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Snapshot of the current match, `null` before the first round
    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.state())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: StrategyId,
    name: &'static str,
    description: &'static str,
}

/// Get all reference strategies with their descriptions
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = StrategyId::ALL
        .into_iter()
        .map(|id| StrategyInfo { id, name: id.name(), description: describe_strategy(id) })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Play a default engine against every reference strategy
///
/// # Returns
/// JSON serialized GauntletReport
#[wasm_bindgen]
pub fn replay_gauntlet(rounds: u32) -> Result<JsValue, JsError> {
    let mut engine = Engine::new();
    let report = run_gauntlet(&mut engine, rounds);

    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
