//! Light/dark colour-scheme tracking.
//!
//! The terminal's colour scheme is global state owned by the host. The plugin
//! observes it through a listener that must be released when the plugin no
//! longer wants updates. [`SchemeSubscription`] ties that listener to a scope:
//! it attaches on construction and detaches on drop, whatever path the owner
//! takes out of that scope.
//!
//! # Example
//!
//! ```rust
//! use image_finder::ui::scheme::{SchemeListener, SchemeSubscription};
//!
//! #[derive(Default)]
//! struct Counter { attached: u32, detached: u32 }
//!
//! impl SchemeListener for Counter {
//!     fn attach(&mut self) { self.attached += 1; }
//!     fn detach(&mut self) { self.detached += 1; }
//! }
//!
//! let subscription = SchemeSubscription::acquire(Counter::default());
//! assert_eq!(subscription.listener().attached, 1);
//! drop(subscription);
//! ```

use std::fmt;
use std::str::FromStr;

/// Relative luminance above which a background counts as light.
const LIGHT_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Which half of a theme set is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Returns the opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Classifies a 24-bit background colour by its perceived luminance.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_finder::ui::scheme::ThemeMode;
    ///
    /// assert_eq!(ThemeMode::from_background_rgb(0x1e, 0x1e, 0x2e), ThemeMode::Dark);
    /// assert_eq!(ThemeMode::from_background_rgb(0xef, 0xf1, 0xf5), ThemeMode::Light);
    /// ```
    #[must_use]
    pub fn from_background_rgb(r: u8, g: u8, b: u8) -> Self {
        let luminance =
            (0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)) / 255.0;
        if luminance > LIGHT_LUMINANCE_THRESHOLD {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Classifies an 8-bit (256-colour) background index.
    ///
    /// Indices 0-15 are the ANSI colours, where only white and bright white
    /// count as light. 16-231 form a 6x6x6 cube and 232-255 a grey ramp; both
    /// are converted to RGB and classified by luminance.
    #[must_use]
    pub fn from_background_index(index: u8) -> Self {
        match index {
            7 | 15 => Self::Light,
            0..=15 => Self::Dark,
            16..=231 => {
                let cube = index - 16;
                let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                Self::from_background_rgb(level(cube / 36), level((cube / 6) % 6), level(cube % 6))
            }
            232..=255 => {
                let grey = 8 + (index - 232) * 10;
                Self::from_background_rgb(grey, grey, grey)
            }
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured colour-scheme behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemePreference {
    /// Follow the terminal's colour scheme.
    #[default]
    Auto,
    /// Always start in the given mode and ignore scheme changes.
    Fixed(ThemeMode),
}

impl FromStr for SchemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "system" => Ok(Self::Auto),
            "light" => Ok(Self::Fixed(ThemeMode::Light)),
            "dark" => Ok(Self::Fixed(ThemeMode::Dark)),
            other => Err(format!("unknown theme mode `{other}` (expected auto, light, or dark)")),
        }
    }
}

/// Host hook for colour-scheme change notifications.
pub trait SchemeListener {
    /// Starts delivering scheme change notifications.
    fn attach(&mut self);
    /// Stops delivering scheme change notifications.
    fn detach(&mut self);
}

/// Scoped colour-scheme subscription.
///
/// Holds a [`SchemeListener`] that is attached for exactly as long as the
/// subscription lives.
pub struct SchemeSubscription<L: SchemeListener> {
    listener: L,
}

impl<L: SchemeListener> SchemeSubscription<L> {
    /// Attaches `listener` and returns the guard owning it.
    pub fn acquire(mut listener: L) -> Self {
        tracing::debug!("attaching colour scheme listener");
        listener.attach();
        Self { listener }
    }

    #[must_use]
    pub const fn listener(&self) -> &L {
        &self.listener
    }
}

impl<L: SchemeListener> Drop for SchemeSubscription<L> {
    fn drop(&mut self) {
        tracing::debug!("detaching colour scheme listener");
        self.listener.detach();
    }
}

impl<L: SchemeListener> fmt::Debug for SchemeSubscription<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeSubscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl SchemeListener for Recorder {
        fn attach(&mut self) {
            self.0.borrow_mut().push("attach");
        }
        fn detach(&mut self) {
            self.0.borrow_mut().push("detach");
        }
    }

    #[test]
    fn subscription_detaches_on_drop() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.0);

        {
            let _subscription = SchemeSubscription::acquire(recorder);
            assert_eq!(*log.borrow(), vec!["attach"]);
        }

        assert_eq!(*log.borrow(), vec!["attach", "detach"]);
    }

    #[test]
    fn subscription_detaches_when_owner_is_replaced() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.0);

        let mut slot = Some(SchemeSubscription::acquire(recorder));
        assert_eq!(*log.borrow(), vec!["attach"]);

        drop(slot.take());
        assert!(slot.is_none());
        assert_eq!(*log.borrow(), vec!["attach", "detach"]);
    }

    #[test]
    fn background_index_classification() {
        assert_eq!(ThemeMode::from_background_index(0), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_background_index(15), ThemeMode::Light);
        assert_eq!(ThemeMode::from_background_index(16), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_background_index(231), ThemeMode::Light);
        assert_eq!(ThemeMode::from_background_index(233), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_background_index(255), ThemeMode::Light);
    }

    #[test]
    fn preference_parsing() {
        assert_eq!("auto".parse(), Ok(SchemePreference::Auto));
        assert_eq!(" Dark ".parse(), Ok(SchemePreference::Fixed(ThemeMode::Dark)));
        assert_eq!("light".parse(), Ok(SchemePreference::Fixed(ThemeMode::Light)));
        assert!("sepia".parse::<SchemePreference>().is_err());
    }

    #[test]
    fn toggling_round_trips() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }
}
