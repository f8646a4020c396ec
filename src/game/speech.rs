//! Pronunciation service: speaks clicked English words through the browser's
//! speech-synthesis voice list.
//!
//! Voice discovery is asynchronous (the list is often empty until the
//! `voiceschanged` event), so the chosen voice is an explicit two-state
//! capability: `Unresolved` until discovery completes, then
//! `Resolved(Some(..))` or `Resolved(None)`. While unresolved (or when no
//! English voice exists) utterances fall back to requesting `en-US` with the
//! platform default voice.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice, window};

const FALLBACK_LANG: &str = "en-US";
const SPEECH_RATE: f32 = 0.9;
const SPEECH_PITCH: f32 = 1.0;

pub enum VoiceChoice {
    Unresolved,
    Resolved(Option<SpeechSynthesisVoice>),
}

pub fn synth() -> Option<SpeechSynthesis> {
    window()?.speech_synthesis().ok()
}

/// Index of the preferred English voice among `langs`: an exact
/// `en-US` / `en-GB` tag wins over any other `en-*` variant.
pub fn pick_english_lang(langs: &[String]) -> Option<usize> {
    langs
        .iter()
        .position(|l| l == "en-US" || l == "en-GB")
        .or_else(|| langs.iter().position(|l| l.starts_with("en-")))
}

/// Scan the (now populated) voice list for an English voice. Logs a console
/// diagnostic when none is found; the caller keeps the `None` and speaking
/// falls back to the default voice.
pub fn resolve_english_voice(synth: &SpeechSynthesis) -> Option<SpeechSynthesisVoice> {
    let list: js_sys::Array = synth.get_voices();
    let voices: Vec<SpeechSynthesisVoice> =
        list.iter().filter_map(|v| v.dyn_into().ok()).collect();
    let langs: Vec<String> = voices.iter().map(|v| v.lang()).collect();
    match pick_english_lang(&langs) {
        Some(i) => Some(voices[i].clone()),
        None => {
            web_sys::console::warn_1(&JsValue::from_str(
                "word-owl: no English voice available, using default voice",
            ));
            None
        }
    }
}

/// Speak one word, superseding any utterance still playing.
pub fn speak(synth: &SpeechSynthesis, voice: &VoiceChoice, word: &str) -> Result<(), JsValue> {
    if synth.speaking() {
        synth.cancel();
    }
    let utterance = SpeechSynthesisUtterance::new_with_text(word)?;
    match voice {
        VoiceChoice::Resolved(Some(v)) => utterance.set_voice(Some(v)),
        _ => utterance.set_lang(FALLBACK_LANG),
    }
    utterance.set_rate(SPEECH_RATE);
    utterance.set_pitch(SPEECH_PITCH);
    synth.speak(&utterance);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefers_en_us_over_earlier_english_variants() {
        let langs = tags(&["ja-JP", "en-AU", "en-US"]);
        assert_eq!(pick_english_lang(&langs), Some(2));
    }

    #[test]
    fn en_gb_counts_as_preferred() {
        let langs = tags(&["en-AU", "en-GB"]);
        assert_eq!(pick_english_lang(&langs), Some(1));
    }

    #[test]
    fn falls_back_to_any_english_variant() {
        let langs = tags(&["ja-JP", "en-AU", "de-DE"]);
        assert_eq!(pick_english_lang(&langs), Some(1));
    }

    #[test]
    fn none_when_no_english_voice() {
        let langs = tags(&["ja-JP", "fr-FR"]);
        assert_eq!(pick_english_lang(&langs), None);
        assert_eq!(pick_english_lang(&[]), None);
    }
}
