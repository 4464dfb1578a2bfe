//! WebAssembly bindings for the trivia board.
//!
//! The page does its own fetching; these bindings sample what it fetched,
//! hold the board, and run the reveal state machine.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::board::ClueAddress;
#[cfg(feature = "wasm")]
use crate::setup::{board_from_details, sample_category_ids, Game};
#[cfg(feature = "wasm")]
use crate::source::{CategoryDetail, CategorySummary};

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a game with the default board shape and no board yet
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            game: Game::default(),
        }
    }

    /// Number of categories a board holds
    #[wasm_bindgen(js_name = categoryCount)]
    pub fn category_count(&self) -> usize {
        self.game.settings().categories
    }

    /// Number of clues under each category
    #[wasm_bindgen(js_name = cluesPerCategory)]
    pub fn clues_per_category(&self) -> usize {
        self.game.settings().clues_per_category
    }

    /// Pool size to request from the category listing
    #[wasm_bindgen(js_name = categoryPoolSize)]
    pub fn category_pool_size(&self) -> usize {
        self.game.settings().category_pool
    }

    /// Pick category ids from a fetched listing, returns a JSON array of ids
    #[wasm_bindgen(js_name = sampleCategoryIds)]
    pub fn sample_category_ids(&self, pool_json: &str) -> Result<String, JsValue> {
        let pool: Vec<CategorySummary> = serde_json::from_str(pool_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid category list: {}", e)))?;
        let picked = sample_category_ids(&pool, self.game.settings(), &mut rand::thread_rng())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&picked).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build a board from a JSON array of fetched categories.
    ///
    /// Extra categories are sampled down to the board width. The current
    /// board is only replaced when enough usable categories were supplied.
    #[wasm_bindgen(js_name = loadBoard)]
    pub fn load_board(&mut self, categories_json: &str) -> Result<String, JsValue> {
        let details: Vec<CategoryDetail> = serde_json::from_str(categories_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid categories: {}", e)))?;

        let board = board_from_details(details, self.game.settings(), &mut rand::thread_rng())
            .map_err(|e| JsValue::from_str(&format!("Setup failed: {}", e)))?;

        let view = self.game.replace_board(board).view();
        Ok(serde_json::to_string(&view).unwrap_or_else(|_| "null".to_string()))
    }

    /// Whether a board has been loaded
    #[wasm_bindgen(js_name = hasBoard)]
    pub fn has_board(&self) -> bool {
        self.game.board().is_some()
    }

    /// Get the board snapshot as JSON (for rendering), `null` before setup
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        match self.game.board() {
            Some(board) => serde_json::to_string(&board.view()).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    /// Click a clue. Returns the text to show, or `undefined` when nothing changes.
    #[wasm_bindgen]
    pub fn interact(&mut self, category: usize, clue: usize) -> Result<Option<String>, JsValue> {
        self.game
            .interact(ClueAddress::new(category, clue))
            .map(|text| text.map(str::to_string))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
