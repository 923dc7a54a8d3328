//! Interactive course picker
//!
//! Two panes: the grouped course chips on the left and the generated
//! schedule on the right. Plan loads and generate calls run on the tokio
//! runtime and report back to the event loop over a channel.

mod app;
mod views;
mod widgets;

pub use app::{run_tui, TuiConfig};

/// Ellipsize text to fit within max_chars
pub fn ellipsize(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let take = max_chars.saturating_sub(1);
        let mut result = value.chars().take(take).collect::<String>();
        result.push('…');
        result
    }
}

/// Sanitize text by removing newlines for single-line display
pub fn sanitize_text(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}
