use std::sync::Mutex;

use edunexia_core::path_of;
use tracing::{debug, info};

/// Where the client currently is, and how it moves.
pub(crate) trait Navigator: Send + Sync {
    fn current_location(&self) -> String;

    /// In-app navigation; `replace` swaps the current history entry.
    fn navigate(&self, target: &str, replace: bool);

    /// Full page load that discards in-memory state.
    fn redirect(&self, target: &str);

    fn reload(&self);

    fn current_path(&self) -> String {
        path_of(&self.current_location()).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Push,
    Replace,
    Redirect,
    Reload,
}

#[derive(Debug, Default)]
struct HistoryState {
    entries: Vec<String>,
    transitions: Vec<(Transition, String)>,
}

/// History stack standing in for the browser location.
#[derive(Debug, Default)]
pub(crate) struct History {
    state: Mutex<HistoryState>,
}

impl History {
    pub(crate) fn new(start: &str) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![start.to_string()],
                transitions: Vec::new(),
            }),
        }
    }

    /// Transitions recorded since the page was opened.
    pub(crate) fn transitions(&self) -> Vec<(Transition, String)> {
        self.state
            .lock()
            .map(|state| state.transitions.clone())
            .unwrap_or_default()
    }

    pub(crate) fn moved(&self) -> bool {
        !self.transitions().is_empty()
    }

    fn record(&self, transition: Transition, target: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        match transition {
            Transition::Push | Transition::Redirect => state.entries.push(target.to_string()),
            Transition::Replace => {
                state.entries.pop();
                state.entries.push(target.to_string());
            }
            Transition::Reload => {}
        }
        state.transitions.push((transition, target.to_string()));
    }
}

impl Navigator for History {
    fn current_location(&self) -> String {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.entries.last().cloned())
            .unwrap_or_else(|| edunexia_core::HOME.to_string())
    }

    fn navigate(&self, target: &str, replace: bool) {
        debug!(to = %target, replace, "navigate");
        let transition = if replace {
            Transition::Replace
        } else {
            Transition::Push
        };
        self.record(transition, target);
    }

    fn redirect(&self, target: &str) {
        info!(to = %target, "hard redirect");
        self.record(Transition::Redirect, target);
    }

    fn reload(&self) {
        let current = self.current_location();
        info!(location = %current, "reload");
        self.record(Transition::Reload, &current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_swaps_current_entry() {
        let history = History::new("/auth/callback?token=abc");
        assert_eq!(history.current_path(), "/auth/callback");
        history.navigate("/dashboard", true);
        assert_eq!(history.current_location(), "/dashboard");
        assert_eq!(
            history.transitions(),
            vec![(Transition::Replace, "/dashboard".to_string())]
        );
    }

    #[test]
    fn reload_keeps_location() {
        let history = History::new("/auth/callback?error=x");
        history.reload();
        assert_eq!(history.current_location(), "/auth/callback?error=x");
        assert!(history.moved());
    }
}
