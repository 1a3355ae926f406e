//! Terminal width detection.

use is_terminal::IsTerminal;
use soq_core::render::clamp_width;
use terminal_size::{Width, terminal_size};

/// Width to render at: the stdout terminal width capped at 80 columns, or
/// 80 when stdout is not a terminal.
pub fn render_width() -> usize {
    let detected = if std::io::stdout().is_terminal() {
        terminal_size().map(|(Width(columns), _)| usize::from(columns))
    } else {
        None
    };
    clamp_width(detected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soq_core::context::MAX_WIDTH;

    #[test]
    fn test_render_width_is_bounded() {
        let width = render_width();
        assert!(width > 0 && width <= MAX_WIDTH);
    }
}
