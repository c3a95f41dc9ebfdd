//! HUD plumbing: change-filtered snapshots and the window-title HUD.

use engine_core::{Hud, HudSnapshot};

/// Forwards snapshots to a `Hud`, skipping ones identical to the last.
#[derive(Debug, Default)]
pub struct HudRelay {
    last: Option<HudSnapshot>,
}

impl HudRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present `snapshot` if it differs from the previous one.
    pub fn push(&mut self, snapshot: HudSnapshot, hud: &mut dyn Hud) -> bool {
        if self.last == Some(snapshot) {
            return false;
        }
        hud.present(&snapshot);
        self.last = Some(snapshot);
        true
    }

    /// Forget the last snapshot so the next push always goes through.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// Render a snapshot as one line of text.
pub fn hud_text(snapshot: &HudSnapshot) -> String {
    let mut text = format!("Flaneur | Score: {}", snapshot.score);
    if let Some(seconds) = snapshot.countdown {
        text.push_str(&format!(" | Superhuman: {}s", seconds));
    }
    if snapshot.game_over {
        text.push_str(" | GAME OVER (R to restart)");
    }
    text
}

/// HUD shown in the window title bar.
#[derive(Debug, Default)]
pub struct TitleHud {
    text: String,
    dirty: bool,
}

impl TitleHud {
    pub fn new() -> Self {
        Self::default()
    }

    /// New title text, if it changed since the last call.
    pub fn take_update(&mut self) -> Option<&str> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(&self.text)
    }
}

impl Hud for TitleHud {
    fn present(&mut self, snapshot: &HudSnapshot) {
        self.text = hud_text(snapshot);
        self.dirty = true;
    }
}
