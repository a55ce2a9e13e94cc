use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// Borderless one-row bar, filled left to right.
pub struct ProgressBar<'a> {
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(ratio: f64, theme: &'a Theme) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }

    fn filled_width(&self, width: u16) -> u16 {
        (self.ratio * width as f64).round() as u16
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;
        let filled = self.filled_width(area.width);

        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled {
                Style::default().bg(colors.bar_filled())
            } else {
                Style::default().bg(colors.bar_empty())
            };
            buf[(x, area.y)].set_char(' ').set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_width() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new(0.0, &theme).filled_width(40), 0);
        assert_eq!(ProgressBar::new(0.4, &theme).filled_width(40), 16);
        assert_eq!(ProgressBar::new(3.0, &theme).filled_width(40), 40);
    }
}
