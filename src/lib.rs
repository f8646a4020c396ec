//! Word Owl core crate.
//!
//! Browser vocabulary matching game: two shuffled columns of word tiles
//! (English / Japanese) per level, click-to-pair matching with sound and
//! text-to-speech feedback, and an owl mascot that evolves as levels are
//! cleared. `start_game()` is the single entrypoint called from JS; all
//! selection / level-progression logic lives in `game::session` so it can
//! run under native `cargo test` without a browser.

use wasm_bindgen::prelude::*;

pub mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Word bank: (english, japanese) pairs, partitioned into fixed-size levels.
// Editing this list is the only supported configuration.
// -----------------------------------------------------------------------------

pub const WORD_BANK: &[(&str, &str)] = &[
    // Level 1
    ("apple", "りんご"), ("cat", "ねこ"), ("dog", "いぬ"),
    ("book", "本"), ("sun", "太陽"), ("moon", "月"),
    // Level 2
    ("bird", "鳥"), ("fish", "魚"), ("car", "車"),
    ("tree", "木"), ("flower", "花"), ("water", "水"),
    // Level 3
    ("house", "家"), ("table", "テーブル"), ("chair", "いす"),
    ("pen", "ペン"), ("pencil", "鉛筆"), ("bag", "カバン"),
    // Level 4
    ("happy", "嬉しい"), ("sad", "悲しい"), ("big", "大きい"),
    ("small", "小さい"), ("red", "赤"), ("blue", "青"),
];

/// Pairs per level. The bank length must be a whole multiple of this.
pub const WORDS_PER_LEVEL: usize = 6;

// -----------------------------------------------------------------------------
// Mascot / audio asset tables. Index into MASCOT_STAGE_IMAGES corresponds to
// the level reached; the last entry is the fully-evolved "all clear" owl.
// These files must ship alongside the deployed page.
// -----------------------------------------------------------------------------

pub const MASCOT_STAGE_IMAGES: &[&str] = &[
    "owl_normal.png",
    "owl_evolution1.png",
    "owl_evolution2.png",
    "owl_evolution3.png",
    "owl_final.png",
];

pub const MASCOT_HAPPY_IMAGE: &str = "reaction_happy.png";
pub const MASCOT_CONFUSED_IMAGE: &str = "reaction_confused.png";

pub const CORRECT_SOUND_SRC: &str = "correct.mp3";
pub const WRONG_SOUND_SRC: &str = "wrong.mp3";

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_match_game()
}
