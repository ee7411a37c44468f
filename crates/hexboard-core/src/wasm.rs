//! WebAssembly bindings for the board generator.
//!
//! This module exposes board generation to JavaScript renderers through
//! wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::board::{generate_board, Board, BoardConfig};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed board wrapper
#[wasm_bindgen]
pub struct WasmBoard {
    board: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Generate a board from a JSON config (missing fields use defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmBoard, JsValue> {
        let config: BoardConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid board config: {}", e)))?;

        let board = generate_board(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmBoard { board })
    }

    /// Get the board snapshot as JSON
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> Result<String, JsValue> {
        let snapshot = self
            .board
            .snapshot()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the board with a freshly generated one.
    ///
    /// The current board stays in place if generation fails.
    pub fn refresh(&mut self) -> Result<(), JsValue> {
        let fresh = self
            .board
            .refresh()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.board = fresh;
        Ok(())
    }

    /// Seed of the current board, as a decimal string (JS numbers lose u64 precision)
    #[wasm_bindgen(js_name = getSeed)]
    pub fn get_seed(&self) -> String {
        self.board.seed().to_string()
    }
}
