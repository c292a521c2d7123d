//! Render function
//!
//! Pure projection of a [`LikeState`] onto the button and count elements.
//! Rendering the same state twice writes the same values twice and nothing
//! else.

use crate::model::LikeState;
use crate::traits::{CountDisplay, LikeButton};

/// Class present on the button while liked
pub const LIKED_CLASS: &str = "is-liked";

/// Accessibility attribute mirroring `liked`
pub const PRESSED_ATTRIBUTE: &str = "aria-pressed";

/// Paint `state` onto the elements
pub fn render(state: LikeState, button: &dyn LikeButton, count: Option<&dyn CountDisplay>) {
    tracing::trace!("Rendering liked={} count={}", state.liked, state.count);

    button.set_class(LIKED_CLASS, state.liked);
    button.set_attribute(PRESSED_ATTRIBUTE, if state.liked { "true" } else { "false" });
    if let Some(count) = count {
        count.set_text(&state.count.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{HeadlessButton, HeadlessCount};

    #[test]
    fn paints_liked_state() {
        let button = HeadlessButton::new();
        let count = HeadlessCount::new();

        render(LikeState::new(true, 7), &button, Some(&count));

        assert!(button.has_class(LIKED_CLASS));
        assert_eq!(button.attribute(PRESSED_ATTRIBUTE).as_deref(), Some("true"));
        assert_eq!(count.text().as_deref(), Some("7"));
    }

    #[test]
    fn paints_not_liked_state() {
        let button = HeadlessButton::new();
        render(LikeState::new(true, 1), &button, None);
        render(LikeState::new(false, 0), &button, None);

        assert!(!button.has_class(LIKED_CLASS));
        assert_eq!(button.attribute(PRESSED_ATTRIBUTE).as_deref(), Some("false"));
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let button = HeadlessButton::new();
        let count = HeadlessCount::new();
        let state = LikeState::new(true, 3);

        render(state, &button, Some(&count));
        let first_pass = button.mutations();
        let snapshot = button.snapshot();

        render(state, &button, Some(&count));
        let all = button.mutations();

        assert_eq!(button.snapshot(), snapshot);
        assert_eq!(&all[first_pass.len()..], &first_pass[..]);
        assert_eq!(count.history(), vec!["3".to_string(), "3".to_string()]);
    }
}
