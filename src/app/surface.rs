//! Asynchronously loaded surfaces guarded by generation tokens.
//!
//! Every surface that shows remote data (section overlay, item overlay, search
//! results) runs the same lifecycle:
//!
//! ```text
//! Closed ──open──▶ Loading ──resolve──▶ Loaded | Failed
//!    ▲                │                       │
//!    └──────close─────┴───────────────────────┘
//! ```
//!
//! `open` and `close` both bump the generation, so a response carrying an
//! older token can never overwrite what the surface currently shows.

use crate::domain::LoadError;

/// Visible state of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceState<T> {
    Closed,
    Loading,
    Loaded(T),
    Failed,
}

impl<T> SurfaceState<Vec<T>> {
    /// Number of loaded entries; zero unless loaded.
    #[must_use]
    pub fn loaded_len(&self) -> usize {
        match self {
            Self::Loaded(values) => values.len(),
            _ => 0,
        }
    }
}

/// A surface and its current generation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface<T> {
    state: SurfaceState<T>,
    generation: u64,
}

impl<T> Default for Surface<T> {
    fn default() -> Self {
        Self {
            state: SurfaceState::Closed,
            generation: 0,
        }
    }
}

impl<T> Surface<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a fresh `Loading` state and returns the token the response must carry.
    pub fn open(&mut self) -> u64 {
        self.generation += 1;
        self.state = SurfaceState::Loading;
        self.generation
    }

    /// Applies a response. Returns `false` when it was discarded as stale.
    pub fn resolve(&mut self, generation: u64, result: Result<T, LoadError>) -> bool {
        if generation != self.generation || !matches!(self.state, SurfaceState::Loading) {
            return false;
        }
        self.state = match result {
            Ok(value) => SurfaceState::Loaded(value),
            Err(_) => SurfaceState::Failed,
        };
        true
    }

    /// Closes the surface and invalidates any in-flight token.
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = SurfaceState::Closed;
    }

    #[must_use]
    pub const fn state(&self) -> &SurfaceState<T> {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.state, SurfaceState::Closed)
    }

    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match &self.state {
            SurfaceState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> LoadError {
        LoadError::Decode("bad".into())
    }

    #[test]
    fn open_then_resolve() {
        let mut surface = Surface::new();
        let token = surface.open();
        assert_eq!(surface.state(), &SurfaceState::Loading);
        assert!(surface.resolve(token, Ok(3)));
        assert_eq!(surface.loaded(), Some(&3));
    }

    #[test]
    fn failure_is_its_own_state() {
        let mut surface: Surface<u8> = Surface::new();
        let token = surface.open();
        assert!(surface.resolve(token, Err(failure())));
        assert_eq!(surface.state(), &SurfaceState::Failed);
    }

    #[test]
    fn later_open_wins() {
        let mut surface = Surface::new();
        let first = surface.open();
        let second = surface.open();
        assert!(surface.resolve(second, Ok("s2")));
        assert!(!surface.resolve(first, Ok("s1")));
        assert_eq!(surface.loaded(), Some(&"s2"));
    }

    #[test]
    fn responses_after_close_are_discarded() {
        let mut surface = Surface::new();
        let token = surface.open();
        surface.close();
        assert!(!surface.resolve(token, Ok(1)));
        assert_eq!(surface.state(), &SurfaceState::Closed);
        assert!(!surface.is_open());
    }

    #[test]
    fn duplicate_response_is_ignored() {
        let mut surface = Surface::new();
        let token = surface.open();
        assert!(surface.resolve(token, Ok(1)));
        assert!(!surface.resolve(token, Ok(2)));
        assert_eq!(surface.loaded(), Some(&1));
    }

    #[test]
    fn reopen_resets_to_loading() {
        let mut surface = Surface::new();
        let token = surface.open();
        surface.resolve(token, Ok(1));
        surface.open();
        assert_eq!(surface.state(), &SurfaceState::Loading);
        assert_eq!(surface.loaded(), None);
    }
}
