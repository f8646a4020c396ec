// Integration tests (native) for the `word-owl` crate.
// These avoid wasm-specific functionality and exercise the pure session
// logic so they can run under `cargo test` on the host.

use word_owl::game::session::{BoardBuild, ClickOutcome, Column, GameSession, TileState};
use word_owl::{WORD_BANK, WORDS_PER_LEVEL};

fn match_pair(session: &mut GameSession, source: &str, target: &str) -> ClickOutcome {
    let s = session
        .tiles(Column::Source)
        .iter()
        .position(|t| t.word == source)
        .expect("source word on board");
    assert_eq!(session.on_tile_clicked(Column::Source, s), ClickOutcome::Selection);
    let t = session
        .tiles(Column::Target)
        .iter()
        .position(|t| t.word == target)
        .expect("target word on board");
    session.on_tile_clicked(Column::Target, t)
}

fn column_words_sorted(session: &GameSession, column: Column) -> Vec<&'static str> {
    let mut words: Vec<_> = session.tiles(column).iter().map(|t| t.word).collect();
    words.sort_unstable();
    words
}

#[test]
fn full_playthrough_reaches_terminal_and_restarts() {
    let mut session = GameSession::new(WORD_BANK, WORDS_PER_LEVEL);
    let levels = WORD_BANK.len() / WORDS_PER_LEVEL;
    assert_eq!(session.rebuild(), BoardBuild::Level { number: 1 });

    for level in 0..levels {
        let pairs = &WORD_BANK[level * WORDS_PER_LEVEL..(level + 1) * WORDS_PER_LEVEL];

        // Each column renders exactly the level's words, in some order.
        let mut want_source: Vec<_> = pairs.iter().map(|&(s, _)| s).collect();
        let mut want_target: Vec<_> = pairs.iter().map(|&(_, t)| t).collect();
        want_source.sort_unstable();
        want_target.sort_unstable();
        assert_eq!(column_words_sorted(&session, Column::Source), want_source);
        assert_eq!(column_words_sorted(&session, Column::Target), want_target);

        for (i, &(source, target)) in pairs.iter().enumerate() {
            let cleared = i == pairs.len() - 1;
            match match_pair(&mut session, source, target) {
                ClickOutcome::Match { level_cleared, .. } => assert_eq!(level_cleared, cleared),
                other => panic!("expected match for ({source}, {target}), got {other:?}"),
            }
        }

        match session.rebuild() {
            BoardBuild::Level { number } => assert_eq!(number, level + 2),
            BoardBuild::AllComplete => assert_eq!(level, levels - 1),
        }
    }

    assert!(session.is_terminal());
    // "Next" past the final level stays terminal.
    assert_eq!(session.rebuild(), BoardBuild::AllComplete);
    // Restart goes back to level 1 with a fresh board.
    assert_eq!(session.on_action(), BoardBuild::Level { number: 1 });
    assert_eq!(session.level_index(), 0);
    assert_eq!(session.tiles(Column::Source).len(), WORDS_PER_LEVEL);
}

#[test]
fn mismatch_across_levels_never_marks_tiles() {
    let mut session = GameSession::new(WORD_BANK, WORDS_PER_LEVEL);
    session.rebuild();
    // "apple" is level 1; "鳥" is level 2, so it is not on this board, but a
    // same-level wrong pairing must also mismatch.
    assert_eq!(match_pair(&mut session, "apple", "ねこ"), ClickOutcome::Mismatch);
    assert!(session.on_mismatch_timeout());
    assert!(
        session
            .tiles(Column::Source)
            .iter()
            .chain(session.tiles(Column::Target))
            .all(|t| t.state == TileState::Unselected)
    );
    assert_eq!(session.matched_count(), 0);
}
