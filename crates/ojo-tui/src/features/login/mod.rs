//! Login screen: credential form, submit button and notice line.

mod render;
mod update;

use ojo_core::session::Field;
pub use render::render_login;
pub use update::{handle_analysis_finished, handle_key, handle_paste};

/// View-only state for the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginView {
    pub focus: Field,
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            focus: Field::Username,
        }
    }
}

impl LoginView {
    /// Moves focus forward through `visible`, wrapping around.
    pub fn focus_next(&mut self, visible: &[Field]) {
        self.focus = step(visible, self.focus, 1);
    }

    pub fn focus_prev(&mut self, visible: &[Field]) {
        self.focus = step(visible, self.focus, visible.len().saturating_sub(1));
    }

    /// Falls back to the first field if the focused one is hidden.
    pub fn ensure_visible(&mut self, visible: &[Field]) {
        if !visible.contains(&self.focus) {
            self.focus = visible.first().copied().unwrap_or(Field::Username);
        }
    }
}

fn step(visible: &[Field], current: Field, by: usize) -> Field {
    if visible.is_empty() {
        return current;
    }
    let index = visible.iter().position(|f| *f == current).unwrap_or(0);
    visible[(index + by) % visible.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &[Field] = &[Field::Username, Field::Password];
    const THREE: &[Field] = &[Field::Username, Field::Password, Field::TwoFactorCode];

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut view = LoginView::default();
        view.focus_next(TWO);
        assert_eq!(view.focus, Field::Password);
        view.focus_next(TWO);
        assert_eq!(view.focus, Field::Username);
        view.focus_prev(THREE);
        assert_eq!(view.focus, Field::TwoFactorCode);
    }

    #[test]
    fn test_ensure_visible_resets_hidden_focus() {
        let mut view = LoginView {
            focus: Field::TwoFactorCode,
        };
        view.ensure_visible(TWO);
        assert_eq!(view.focus, Field::Username);
    }
}
