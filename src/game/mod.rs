//! DOM shell for the matching game.
//!
//! Owns the page elements and one `GameSession`, and wires browser events
//! (tile clicks, the action button, the mismatch timer, `animationend`,
//! `voiceschanged`) into session calls. Missing page elements are created on
//! startup so the crate runs against a bare host page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlAudioElement, HtmlImageElement, window,
};

mod rng;
pub mod session;
mod speech;

use session::{BoardBuild, ClickOutcome, Column, GameSession, Tile, TileState};
use speech::VoiceChoice;

// --- UI strings & tuning -----------------------------------------------------

const MSG_MATCH: &str = "やったね！せいかい！";
const MSG_MISMATCH: &str = "あれれ？ちがうみたいだよ。";
const MSG_ALL_CLEAR: &str = "全レベルクリア！おめでとう！";
const LABEL_FINAL: &str = "最終レベル！";
const LABEL_NEXT_LEVEL: &str = "次のレベルへ";
const LABEL_RESTART: &str = "最初からやり直す";

const MISMATCH_CLEAR_DELAY_MS: i32 = 800;
const SPARKLES_PER_TILE: usize = 10;

// Inline styles applied only when an element has to be created (a host page
// that ships its own markup and stylesheet keeps full control).
const BOARD_STYLE: &str = "display:flex; justify-content:center; gap:40px; margin:16px;";
const COLUMN_STYLE: &str = "display:flex; flex-direction:column; gap:10px; min-width:140px;";
const LEVEL_STYLE: &str =
    "font-size:1.2em; font-weight:bold; color:#00796B; text-align:center; margin:8px 0 0;";
const MESSAGE_STYLE: &str = "font-size:1.1em; min-height:1.4em; text-align:center; margin:8px 0;";
const MASCOT_STYLE: &str = "display:block; width:120px; height:120px; margin:8px auto;";
const BUTTON_HIDDEN_STYLE: &str = "display:none;";
const BUTTON_VISIBLE_STYLE: &str =
    "display:block; margin:14px auto; padding:8px 20px; font-size:1.05em; cursor:pointer;";
const SPARKLE_LAYER_STYLE: &str =
    "position:fixed; left:0; top:0; width:100%; height:100%; pointer-events:none; \
     overflow:hidden; z-index:50;";

// --- Game state ---------------------------------------------------------------

struct GameState {
    document: Document,
    session: GameSession,
    source_container: Element,
    target_container: Element,
    level_display: Element,
    message: Element,
    action_button: Element,
    mascot: HtmlImageElement,
    sparkle_layer: Element,
    correct_sound: HtmlAudioElement,
    wrong_sound: HtmlAudioElement,
    voice: VoiceChoice,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static GAME_STATE: std::cell::RefCell<Option<GameState>> = std::cell::RefCell::new(None);
}

pub fn start_match_game() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body: Element = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .into();

    let mascot: HtmlImageElement =
        ensure_element(&doc, &body, "owl-character", "img", MASCOT_STYLE)?.dyn_into()?;
    let level_display = ensure_element(&doc, &body, "level-display", "p", LEVEL_STYLE)?;
    let message = ensure_element(&doc, &body, "message", "p", MESSAGE_STYLE)?;
    let board = ensure_element(&doc, &body, "word-board", "div", BOARD_STYLE)?;
    let source_container = ensure_element(&doc, &board, "english-words", "div", COLUMN_STYLE)?;
    let target_container = ensure_element(&doc, &board, "japanese-words", "div", COLUMN_STYLE)?;
    let action_button = ensure_element(&doc, &body, "reset-button", "button", BUTTON_HIDDEN_STYLE)?;

    let sparkle_layer = ensure_element(&doc, &body, "sparkle-layer", "div", SPARKLE_LAYER_STYLE)?;
    sparkle_layer.set_class_name("sparkle-container");

    let correct_sound = ensure_audio(&doc, &body, "correct-sound", crate::CORRECT_SOUND_SRC)?;
    let wrong_sound = ensure_audio(&doc, &body, "wrong-sound", crate::WRONG_SOUND_SRC)?;

    install_tile_listener(&source_container, Column::Source)?;
    install_tile_listener(&target_container, Column::Target)?;
    install_action_listener(&action_button)?;
    install_voice_listener()?;

    // Some platforms populate the voice list synchronously and never fire
    // `voiceschanged`; resolve up front when voices are already there.
    let voice = match speech::synth() {
        Some(synth) if synth.get_voices().length() > 0 => {
            VoiceChoice::Resolved(speech::resolve_english_voice(&synth))
        }
        _ => VoiceChoice::Unresolved,
    };

    let mut state = GameState {
        document: doc,
        session: GameSession::new(crate::WORD_BANK, crate::WORDS_PER_LEVEL),
        source_container,
        target_container,
        level_display,
        message,
        action_button,
        mascot,
        sparkle_layer,
        correct_sound,
        wrong_sound,
        voice,
    };

    let build = state.session.rebuild();
    apply_build(&mut state, build)?;

    GAME_STATE.with(|cell| cell.replace(Some(state)));
    Ok(())
}

// --- DOM bootstrap -------------------------------------------------------------

/// Reuse the element with `id` if the host page declared it, otherwise create
/// it under `parent` with a minimal inline style.
fn ensure_element(
    doc: &Document,
    parent: &Element,
    id: &str,
    tag: &str,
    style: &str,
) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    if !style.is_empty() {
        el.set_attribute("style", style)?;
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn ensure_audio(
    doc: &Document,
    parent: &Element,
    id: &str,
    src: &str,
) -> Result<HtmlAudioElement, JsValue> {
    let audio: HtmlAudioElement = ensure_element(doc, parent, id, "audio", "")?.dyn_into()?;
    if audio.get_attribute("src").is_none() {
        audio.set_src(src);
    }
    Ok(audio)
}

// --- Event wiring ---------------------------------------------------------------

/// One delegated click listener per column; tiles carry their index in a
/// `data-idx` attribute so rebuilt boards need no new closures.
fn install_tile_listener(container: &Element, column: Column) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        let Some(target) = evt.target() else { return };
        let Ok(el) = target.dyn_into::<Element>() else { return };
        let Some(raw) = el.get_attribute("data-idx") else { return };
        let Ok(idx) = raw.parse::<usize>() else { return };
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                let _ = handle_tile_click(state, column, idx);
            }
        });
    }) as Box<dyn FnMut(_)>);
    container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_action_listener(button: &Element) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                let build = state.session.on_action();
                let _ = apply_build(state, build);
            }
        });
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_voice_listener() -> Result<(), JsValue> {
    let Some(synth) = speech::synth() else {
        return Ok(()); // no speech capability; tiles stay silent
    };
    let closure = Closure::wrap(Box::new(move || {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if let Some(synth) = speech::synth() {
                    state.voice = VoiceChoice::Resolved(speech::resolve_english_voice(&synth));
                }
            }
        });
    }) as Box<dyn FnMut()>);
    synth.set_onvoiceschanged(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    Ok(())
}

// --- Board rendering --------------------------------------------------------------

/// Render the outcome of a session rebuild: either a fresh level board or the
/// terminal "all levels complete" presentation.
fn apply_build(state: &mut GameState, build: BoardBuild) -> Result<(), JsValue> {
    state.source_container.set_inner_html("");
    state.target_container.set_inner_html("");
    state.message.set_text_content(Some(""));
    hide_button(state);

    match build {
        BoardBuild::Level { number } => {
            state
                .level_display
                .set_text_content(Some(&format!("レベル {number}")));
            set_mascot_idle(state);
            build_column(
                &state.document,
                &state.source_container,
                state.session.tiles(Column::Source),
            )?;
            build_column(
                &state.document,
                &state.target_container,
                state.session.tiles(Column::Target),
            )?;
        }
        BoardBuild::AllComplete => {
            state.message.set_text_content(Some(MSG_ALL_CLEAR));
            state.level_display.set_text_content(Some(LABEL_FINAL));
            if let Some(&img) = crate::MASCOT_STAGE_IMAGES.last() {
                state.mascot.set_src(img);
            }
            state.mascot.set_class_name("");
            state.action_button.set_text_content(Some(LABEL_RESTART));
            show_button(state);
        }
    }
    Ok(())
}

fn build_column(doc: &Document, container: &Element, tiles: &[Tile]) -> Result<(), JsValue> {
    for (i, tile) in tiles.iter().enumerate() {
        let card = doc.create_element("div")?;
        card.set_class_name("word-card");
        card.set_text_content(Some(tile.word));
        card.set_attribute("data-idx", &i.to_string())?;
        container.append_child(&card)?;
    }
    Ok(())
}

/// Re-sync every tile's class list from session state. Boards are at most a
/// handful of tiles, so a full sweep per click beats tracking deltas.
fn refresh_tiles(state: &GameState) {
    sync_column(&state.source_container, state.session.tiles(Column::Source));
    sync_column(&state.target_container, state.session.tiles(Column::Target));
}

fn sync_column(container: &Element, tiles: &[Tile]) {
    let children = container.children();
    for (i, tile) in tiles.iter().enumerate() {
        if let Some(el) = children.item(i as u32) {
            el.set_class_name(match tile.state {
                TileState::Unselected => "word-card",
                TileState::Selected => "word-card selected",
                TileState::Matched => "word-card matched",
            });
        }
    }
}

// --- Click handling ------------------------------------------------------------------

fn handle_tile_click(state: &mut GameState, column: Column, idx: usize) -> Result<(), JsValue> {
    let Some(word) = state.session.tiles(column).get(idx).map(|t| t.word) else {
        return Ok(());
    };

    let had_pending_mismatch = state.session.mismatch_pending();
    let outcome = state.session.on_tile_clicked(column, idx);
    refresh_tiles(state);

    // A click that resolved a pending mismatch early takes over the timer's
    // feedback cleanup too, otherwise the mismatch message and confused
    // mascot would outlive the pair they described.
    if had_pending_mismatch && !state.session.mismatch_pending() {
        state.message.set_text_content(Some(""));
        set_mascot_idle(state);
    }

    // Source-column tiles are pronounced on every click, matched or not.
    if column == Column::Source {
        if let Some(synth) = speech::synth() {
            speech::speak(&synth, &state.voice, word).ok();
        }
    }

    match outcome {
        ClickOutcome::Ignored | ClickOutcome::Selection => {}
        ClickOutcome::Match { source_idx, target_idx, level_cleared } => {
            play_sound(&state.correct_sound);
            state.message.set_text_content(Some(MSG_MATCH));
            animate_mascot_happy(state)?;
            if let Some(el) = state.source_container.children().item(source_idx as u32) {
                spawn_sparkle_burst(&state.document, &state.sparkle_layer, &el)?;
            }
            if let Some(el) = state.target_container.children().item(target_idx as u32) {
                spawn_sparkle_burst(&state.document, &state.sparkle_layer, &el)?;
            }
            if level_cleared {
                // Session already advanced; level_index names the cleared level.
                state.message.set_text_content(Some(&format!(
                    "レベル {} クリア！",
                    state.session.level_index()
                )));
                state.action_button.set_text_content(Some(LABEL_NEXT_LEVEL));
                show_button(state);
                // Evolve the idle image immediately instead of waiting for the
                // happy animation to end.
                set_mascot_idle(state);
            }
        }
        ClickOutcome::Mismatch => {
            play_sound(&state.wrong_sound);
            state.message.set_text_content(Some(MSG_MISMATCH));
            animate_mascot_confused(state);
            schedule_mismatch_clear()?;
        }
    }
    Ok(())
}

/// The fixed delay after a mismatch before the pair snaps back. A click in
/// the window resolves the pair early, which makes this timer fire a no-op.
fn schedule_mismatch_clear() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let closure: Closure<dyn FnMut()> = Closure::once(move || {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.session.on_mismatch_timeout() {
                    refresh_tiles(state);
                    state.message.set_text_content(Some(""));
                    set_mascot_idle(state);
                }
            }
        });
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        MISMATCH_CLEAR_DELAY_MS,
    )?;
    closure.forget();
    Ok(())
}

// --- Feedback layer --------------------------------------------------------------------

fn play_sound(audio: &HtmlAudioElement) {
    // Fire-and-forget; overlapping playback on rapid input is acceptable.
    let _ = audio.play();
}

fn set_mascot_idle(state: &GameState) {
    let stage = state
        .session
        .level_index()
        .min(crate::MASCOT_STAGE_IMAGES.len() - 1);
    state.mascot.set_src(crate::MASCOT_STAGE_IMAGES[stage]);
    state.mascot.set_class_name("");
}

/// Happy reaction: transient close-up that snaps back to the level's idle
/// image when its CSS animation ends.
fn animate_mascot_happy(state: &GameState) -> Result<(), JsValue> {
    state.mascot.set_src(crate::MASCOT_HAPPY_IMAGE);
    state.mascot.set_class_name("happy-animation");
    let closure: Closure<dyn FnMut()> = Closure::once(move || {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                set_mascot_idle(state);
            }
        });
    });
    add_animation_end_once(&state.mascot, &closure)?;
    closure.forget();
    Ok(())
}

/// Confused reaction persists until the mismatch timer (or the next board
/// interaction) resets the mascot.
fn animate_mascot_confused(state: &GameState) {
    state.mascot.set_src(crate::MASCOT_CONFUSED_IMAGE);
    state.mascot.set_class_name("confused-animation");
}

fn add_animation_end_once(el: &Element, closure: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    let opts = AddEventListenerOptions::new();
    opts.set_once(true);
    el.add_event_listener_with_callback_and_add_event_listener_options(
        "animationend",
        closure.as_ref().unchecked_ref(),
        &opts,
    )
}

/// Decorative burst of `.sparkle` divs around a matched tile's center; each
/// particle removes itself when its animation ends.
fn spawn_sparkle_burst(doc: &Document, layer: &Element, anchor: &Element) -> Result<(), JsValue> {
    let rect = anchor.get_bounding_client_rect();
    let center_x = rect.left() + rect.width() / 2.0;
    let center_y = rect.top() + rect.height() / 2.0;

    for _ in 0..SPARKLES_PER_TILE {
        let sparkle = doc.create_element("div")?;
        sparkle.set_class_name("sparkle");
        let size = rng::unit() * 8.0 + 4.0;
        let offset_x = (rng::unit() - 0.5) * rect.width() * 0.8;
        let offset_y = (rng::unit() - 0.5) * rect.height() * 0.8;
        sparkle.set_attribute(
            "style",
            &format!(
                "position:fixed; width:{size}px; height:{size}px; left:{}px; top:{}px;",
                center_x + offset_x,
                center_y + offset_y
            ),
        )?;
        layer.append_child(&sparkle)?;

        let particle = sparkle.clone();
        let closure: Closure<dyn FnMut()> = Closure::once(move || particle.remove());
        add_animation_end_once(&sparkle, &closure)?;
        closure.forget();
    }
    Ok(())
}

fn show_button(state: &GameState) {
    let _ = state
        .action_button
        .set_attribute("style", BUTTON_VISIBLE_STYLE);
}

fn hide_button(state: &GameState) {
    let _ = state
        .action_button
        .set_attribute("style", BUTTON_HIDDEN_STYLE);
}
