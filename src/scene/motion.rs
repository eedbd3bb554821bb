use std::cell::Cell;
use std::rc::Rc;

/// The media query hosts evaluate for the reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Environment variable read by [`MotionPreference::from_env`].
pub const REDUCED_MOTION_ENV: &str = "PIXELSCROLL_REDUCED_MOTION";

/// Process-wide reduced-motion preference.
///
/// Clones share state: the host keeps one handle and flips it when the media query changes,
/// every scene lifecycle reads its own clone on each sync and frame.
#[derive(Clone, Debug, Default)]
pub struct MotionPreference {
    reduce: Rc<Cell<bool>>,
    changes: Rc<Cell<u64>>,
}

impl MotionPreference {
    /// Preference from a media query result. `None` means the host cannot answer the query;
    /// that fails open to motion enabled.
    pub fn from_query(matches: Option<bool>) -> Self {
        let reduce = match matches {
            Some(m) => m,
            None => {
                tracing::debug!(
                    query = REDUCED_MOTION_QUERY,
                    "reduced-motion query unsupported, animating"
                );
                false
            }
        };
        let pref = Self::default();
        pref.reduce.set(reduce);
        pref
    }

    /// Preference from `PIXELSCROLL_REDUCED_MOTION` (`reduce`/`1`/`true` or
    /// `no-preference`/`0`/`false`). Unset or unrecognized values fail open.
    pub fn from_env() -> Self {
        let parsed = std::env::var(REDUCED_MOTION_ENV).ok().and_then(|v| {
            match v.trim().to_ascii_lowercase().as_str() {
                "reduce" | "1" | "true" => Some(true),
                "no-preference" | "0" | "false" => Some(false),
                _ => None,
            }
        });
        Self::from_query(parsed)
    }

    /// `true` when animation should be suppressed.
    pub fn reduced_motion(&self) -> bool {
        self.reduce.get()
    }

    /// Change the preference. Returns `true` when the value changed.
    pub fn set(&self, reduce: bool) -> bool {
        if self.reduce.get() == reduce {
            return false;
        }
        self.reduce.set(reduce);
        self.changes.set(self.changes.get().saturating_add(1));
        tracing::debug!(reduce, "reduced-motion preference changed");
        true
    }

    /// Number of observed changes.
    pub fn changes(&self) -> u64 {
        self.changes.get()
    }
}
