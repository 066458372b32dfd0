//! Live light/dark theme signal.
//!
//! The composer is a pure function of its inputs, so theme state lives
//! here instead: a single subscribable value with get/subscribe
//! semantics. Hosts read the mode once at mount and push transitions
//! into the signal; subscribers re-compose their charts on each
//! notification. Compositions are idempotent, so the only ordering
//! guarantee anyone needs is last write wins.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, Weak};

/// Current presentation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Theme-dependent colors. Everything else in the style policy is a
/// fixed constant shared by both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub font_color: &'static str,
    pub grid_color: &'static str,
}

const DARK: Palette = Palette {
    font_color: "#FFFFFF",
    grid_color: "rgba(255, 255, 255, 0.3)",
};

const LIGHT: Palette = Palette {
    font_color: "#374151",
    grid_color: "rgba(0, 0, 0, 0.1)",
};

impl ThemeMode {
    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }
}

type Callback = Arc<dyn Fn(ThemeMode) + Send + Sync + 'static>;

struct SignalState {
    mode: ThemeMode,
    subscribers: Vec<(u64, Callback)>,
    next_id: u64,
}

/// Shared, observable theme value.
///
/// Clones observe the same underlying state. Notifications run outside
/// the internal lock, so a callback may freely read the signal or set
/// it again.
#[derive(Clone)]
pub struct ThemeSignal {
    state: Arc<Mutex<SignalState>>,
}

/// Handle returned by [`ThemeSignal::subscribe`]; dropping it removes
/// the subscription.
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<SignalState>>,
}

impl ThemeSignal {
    pub fn new(initial: ThemeMode) -> Self {
        Self {
            state: Arc::new(Mutex::new(SignalState {
                mode: initial,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn get(&self) -> ThemeMode {
        self.lock().mode
    }

    /// Update the mode. Subscribers are notified only on actual
    /// transitions; setting the current value again is a no-op.
    pub fn set(&self, mode: ThemeMode) {
        let callbacks: Vec<Callback> = {
            let mut state = self.lock();
            if state.mode == mode {
                return;
            }
            state.mode = mode;
            state.subscribers.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for cb in callbacks {
            cb(mode);
        }
    }

    /// Register a transition callback. The subscription lasts until the
    /// returned handle is dropped.
    pub fn subscribe(&self, f: impl Fn(ThemeMode) + Send + Sync + 'static) -> Subscription {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, Arc::new(f)));
        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SignalState> {
        // A poisoned lock only means a callback panicked; the state
        // itself is a plain value and stays usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ThemeSignal {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
            state.subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}
