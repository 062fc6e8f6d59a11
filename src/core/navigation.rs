//! Screen navigation - the back-history stack behind the navigation bar

/// Index of a screen in the shell's screen area.
///
/// `HOME` and `DRAWER` are fixed; mini-app screens are assigned indices
/// from `APP_BASE` upward in launch order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenIndex(pub usize);

impl ScreenIndex {
    pub const HOME: ScreenIndex = ScreenIndex(0);
    pub const DRAWER: ScreenIndex = ScreenIndex(1);
    /// First index available to launched mini-apps.
    pub const APP_BASE: usize = 2;

    pub fn is_app(&self) -> bool {
        self.0 >= Self::APP_BASE
    }
}

impl std::fmt::Display for ScreenIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The navigation controller: an ordered record of visited screens.
///
/// The history is never empty and its last element is the currently
/// displayed screen, so the "top of history equals current" invariant
/// cannot be violated from outside.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<ScreenIndex>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start at the home screen with history `[HOME]`.
    pub fn new() -> Self {
        Self {
            history: vec![ScreenIndex::HOME],
        }
    }

    /// The currently displayed screen.
    pub fn current(&self) -> ScreenIndex {
        // Invariant: history is never empty.
        *self.history.last().expect("navigation history is never empty")
    }

    /// Display `index`. Pushes a history entry unless `index` is already
    /// the current top, in which case this is a no-op.
    pub fn navigate_to(&mut self, index: ScreenIndex) {
        if self.current() != index {
            self.history.push(index);
        }
    }

    /// Jump to the home screen.
    pub fn go_home(&mut self) {
        self.navigate_to(ScreenIndex::HOME);
    }

    /// Jump to the app drawer.
    pub fn go_to_drawer(&mut self) {
        self.navigate_to(ScreenIndex::DRAWER);
    }

    /// Pop the most recent entry and display the new top. With a single
    /// entry left the history resets to `[HOME]`; backing out of the
    /// initial state is a no-op that stays at home.
    pub fn back(&mut self) {
        if self.history.len() > 1 {
            self.history.pop();
        } else {
            self.history = vec![ScreenIndex::HOME];
        }
    }

    /// Number of entries currently in the history.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// The full history, oldest first. The last element is the current
    /// screen.
    pub fn history(&self) -> &[ScreenIndex] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> ScreenIndex {
        ScreenIndex(i)
    }

    #[test]
    fn starts_at_home() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), ScreenIndex::HOME);
        assert_eq!(nav.history(), &[ScreenIndex::HOME]);
    }

    #[test]
    fn navigate_pushes_new_screens() {
        let mut nav = Navigator::new();
        nav.navigate_to(idx(2));
        nav.navigate_to(idx(3));
        assert_eq!(nav.history(), &[idx(0), idx(2), idx(3)]);
        assert_eq!(nav.current(), idx(3));
    }

    #[test]
    fn navigate_to_current_screen_is_idempotent() {
        let mut nav = Navigator::new();
        nav.navigate_to(idx(2));
        let depth = nav.depth();
        nav.navigate_to(idx(2));
        nav.navigate_to(idx(2));
        assert_eq!(nav.depth(), depth);
        assert_eq!(nav.current(), idx(2));
    }

    #[test]
    fn navigate_home_from_home_does_not_grow_history() {
        let mut nav = Navigator::new();
        nav.go_home();
        nav.go_home();
        assert_eq!(nav.history(), &[ScreenIndex::HOME]);
    }

    #[test]
    fn back_pops_to_previous_screen() {
        let mut nav = Navigator::new();
        nav.navigate_to(idx(2));
        nav.navigate_to(idx(4));
        nav.back();
        assert_eq!(nav.current(), idx(2));
        assert_eq!(nav.history(), &[idx(0), idx(2)]);
    }

    #[test]
    fn back_on_single_entry_resets_to_home() {
        let mut nav = Navigator::new();
        nav.back();
        assert_eq!(nav.current(), ScreenIndex::HOME);
        assert_eq!(nav.history(), &[ScreenIndex::HOME]);
    }

    #[test]
    fn back_from_deep_stack_stabilizes_at_home() {
        let mut nav = Navigator::new();
        nav.navigate_to(idx(2));
        nav.navigate_to(idx(3));
        for _ in 0..10 {
            nav.back();
        }
        assert_eq!(nav.history(), &[ScreenIndex::HOME]);
        assert_eq!(nav.current(), ScreenIndex::HOME);
    }

    #[test]
    fn drawer_and_home_round_trip() {
        let mut nav = Navigator::new();
        nav.go_to_drawer();
        assert_eq!(nav.current(), ScreenIndex::DRAWER);
        nav.back();
        assert_eq!(nav.current(), ScreenIndex::HOME);
    }

    #[test]
    fn top_of_history_always_equals_current() {
        let mut nav = Navigator::new();
        let moves = [2usize, 3, 3, 1, 0, 5, 2];
        for m in moves {
            nav.navigate_to(idx(m));
            assert_eq!(*nav.history().last().unwrap(), nav.current());
        }
        for _ in 0..4 {
            nav.back();
            assert_eq!(*nav.history().last().unwrap(), nav.current());
        }
    }

    #[test]
    fn app_base_indices_are_apps() {
        assert!(!ScreenIndex::HOME.is_app());
        assert!(!ScreenIndex::DRAWER.is_app());
        assert!(idx(ScreenIndex::APP_BASE).is_app());
    }
}
