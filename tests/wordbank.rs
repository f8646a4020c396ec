// Word-bank and asset-table invariants. Native-friendly, no browser APIs.

use std::collections::HashSet;
use word_owl::{MASCOT_STAGE_IMAGES, WORD_BANK, WORDS_PER_LEVEL};

#[test]
fn bank_partitions_into_whole_levels() {
    assert!(!WORD_BANK.is_empty());
    assert_eq!(
        WORD_BANK.len() % WORDS_PER_LEVEL,
        0,
        "word bank length {} is not a multiple of {}",
        WORD_BANK.len(),
        WORDS_PER_LEVEL
    );
}

#[test]
fn words_are_unique_within_each_level() {
    for (level, chunk) in WORD_BANK.chunks(WORDS_PER_LEVEL).enumerate() {
        let mut english = HashSet::new();
        let mut japanese = HashSet::new();
        for &(en, ja) in chunk {
            assert!(english.insert(en), "duplicate english '{en}' in level {}", level + 1);
            assert!(japanese.insert(ja), "duplicate japanese '{ja}' in level {}", level + 1);
        }
    }
}

#[test]
fn entries_are_nonempty_and_english_is_ascii() {
    for &(en, ja) in WORD_BANK {
        assert!(!en.is_empty() && !ja.is_empty());
        assert!(
            en.chars().all(|c| c.is_ascii_lowercase()),
            "english entry '{en}' should be lowercase ascii (it is spoken via TTS)"
        );
    }
}

#[test]
fn mascot_has_one_stage_per_level_plus_final() {
    let levels = WORD_BANK.len() / WORDS_PER_LEVEL;
    assert_eq!(
        MASCOT_STAGE_IMAGES.len(),
        levels + 1,
        "mascot needs an idle image for each level plus the all-clear stage"
    );
    let unique: HashSet<_> = MASCOT_STAGE_IMAGES.iter().collect();
    assert_eq!(unique.len(), MASCOT_STAGE_IMAGES.len());
}
