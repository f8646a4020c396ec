//! Selection / match engine and level controller.
//!
//! Pure game state: no web-sys in here, so everything is exercised by native
//! `cargo test`. The DOM shell in `game` owns one `GameSession` and translates
//! its outcomes into class changes, sounds, mascot reactions and timers.

use super::rng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Column {
    Source,
    Target,
}

impl Column {
    fn index(self) -> usize {
        match self {
            Column::Source => 0,
            Column::Target => 1,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileState {
    Unselected,
    Selected,
    Matched,
}

/// One rendered word tile. Created on board build, dropped on the next build.
#[derive(Debug)]
pub struct Tile {
    pub word: &'static str,
    pub state: TileState,
}

/// Result of rebuilding the board for the current level index.
#[derive(Debug, PartialEq, Eq)]
pub enum BoardBuild {
    /// A playable level was built. `number` is 1-based for display.
    Level { number: usize },
    /// The level index is past the last level: terminal presentation.
    AllComplete,
}

/// What a tile click did, for the shell to render.
#[derive(Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click on a matched tile (or stale index): no state change.
    Ignored,
    /// Selection toggled / swapped; no evaluation happened.
    Selection,
    /// Both columns were selected and the pair is in the word bank.
    Match {
        source_idx: usize,
        target_idx: usize,
        /// True when this match completed the level (index already advanced).
        level_cleared: bool,
    },
    /// Both columns were selected but the pair is not in the word bank.
    /// The pair stays selected until `on_mismatch_timeout` (or the next click).
    Mismatch,
}

/// One game session: current level, tile columns, selections, progress.
pub struct GameSession {
    bank: &'static [(&'static str, &'static str)],
    words_per_level: usize,
    level_index: usize,
    terminal: bool,
    columns: [Vec<Tile>; 2],
    selected: [Option<usize>; 2],
    matched_count: usize,
    mismatch_pending: bool,
}

impl GameSession {
    pub fn new(bank: &'static [(&'static str, &'static str)], words_per_level: usize) -> Self {
        Self {
            bank,
            words_per_level,
            level_index: 0,
            terminal: false,
            columns: [Vec::new(), Vec::new()],
            selected: [None, None],
            matched_count: 0,
            mismatch_pending: false,
        }
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.bank.len().div_ceil(self.words_per_level)
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn tiles(&self, column: Column) -> &[Tile] {
        &self.columns[column.index()]
    }

    /// Word-bank slice for the current level; empty past the last level.
    pub fn level_pairs(&self) -> &'static [(&'static str, &'static str)] {
        let start = self.level_index * self.words_per_level;
        if start >= self.bank.len() {
            return &[];
        }
        let end = (start + self.words_per_level).min(self.bank.len());
        &self.bank[start..end]
    }

    /// Rebuild both columns for the current level index, resetting all
    /// transient state. Each column is an independent uniform shuffle of the
    /// level's words.
    pub fn rebuild(&mut self) -> BoardBuild {
        self.selected = [None, None];
        self.matched_count = 0;
        self.mismatch_pending = false;

        let pairs = self.level_pairs();
        if pairs.is_empty() {
            self.terminal = true;
            self.columns = [Vec::new(), Vec::new()];
            return BoardBuild::AllComplete;
        }
        self.terminal = false;

        let mut source: Vec<&'static str> = pairs.iter().map(|&(s, _)| s).collect();
        let mut target: Vec<&'static str> = pairs.iter().map(|&(_, t)| t).collect();
        rng::shuffle(&mut source);
        rng::shuffle(&mut target);

        self.columns = [
            source
                .into_iter()
                .map(|word| Tile { word, state: TileState::Unselected })
                .collect(),
            target
                .into_iter()
                .map(|word| Tile { word, state: TileState::Unselected })
                .collect(),
        ];
        BoardBuild::Level { number: self.level_index + 1 }
    }

    /// Action button: restart from level 0 when terminal, otherwise rebuild
    /// for the (already advanced) current level.
    pub fn on_action(&mut self) -> BoardBuild {
        if self.terminal {
            self.level_index = 0;
            self.terminal = false;
        }
        self.rebuild()
    }

    pub fn on_tile_clicked(&mut self, column: Column, idx: usize) -> ClickOutcome {
        let col = column.index();
        // Matched (or stale) tiles are a strict no-op: they must not even
        // resolve a pending mismatch early.
        if idx >= self.columns[col].len() || self.columns[col][idx].state == TileState::Matched {
            return ClickOutcome::Ignored;
        }

        // Any other click during the mismatch window resolves the pending
        // pair first; the scheduled timeout then finds nothing to do.
        if self.mismatch_pending {
            self.clear_mismatch();
        }

        // A different selected tile in the same column gets deselected.
        if let Some(prev) = self.selected[col] {
            if prev != idx {
                self.columns[col][prev].state = TileState::Unselected;
                self.selected[col] = None;
            }
        }

        let tile = &mut self.columns[col][idx];
        if tile.state == TileState::Selected {
            tile.state = TileState::Unselected;
            self.selected[col] = None;
            return ClickOutcome::Selection;
        }
        tile.state = TileState::Selected;
        self.selected[col] = Some(idx);

        match (self.selected[0], self.selected[1]) {
            (Some(source_idx), Some(target_idx)) => self.evaluate(source_idx, target_idx),
            _ => ClickOutcome::Selection,
        }
    }

    /// True while a mismatched pair is waiting for its snap-back timer. The
    /// shell compares this across a click to know whether the click took
    /// over the timer's cleanup (deselection, message, mascot reset).
    pub fn mismatch_pending(&self) -> bool {
        self.mismatch_pending
    }

    /// Mismatch timer fired. Returns true when a pending pair was cleared
    /// (false for stale timers already resolved by a click).
    pub fn on_mismatch_timeout(&mut self) -> bool {
        if !self.mismatch_pending {
            return false;
        }
        self.clear_mismatch();
        true
    }

    fn evaluate(&mut self, source_idx: usize, target_idx: usize) -> ClickOutcome {
        let source = self.columns[0][source_idx].word;
        let target = self.columns[1][target_idx].word;
        let is_match = self
            .level_pairs()
            .iter()
            .any(|&(s, t)| s == source && t == target);

        if is_match {
            self.columns[0][source_idx].state = TileState::Matched;
            self.columns[1][target_idx].state = TileState::Matched;
            self.selected = [None, None];
            self.matched_count += 1;
            let level_cleared = self.matched_count == self.level_pairs().len();
            if level_cleared {
                self.level_index += 1;
            }
            ClickOutcome::Match { source_idx, target_idx, level_cleared }
        } else {
            self.mismatch_pending = true;
            ClickOutcome::Mismatch
        }
    }

    fn clear_mismatch(&mut self) {
        for col in 0..2 {
            if let Some(i) = self.selected[col].take() {
                if self.columns[col][i].state == TileState::Selected {
                    self.columns[col][i].state = TileState::Unselected;
                }
            }
        }
        self.mismatch_pending = false;
    }
}
