use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::course::topic::{Topic, TopicStatus};
use crate::ui::theme::Theme;

const NODE_WIDTH: u16 = 24;
const ROW_HEIGHT: u16 = 2;
/// Horizontal shift per node, repeating: center, right, center, left.
const ZIGZAG: [i32; 4] = [0, 8, 0, -8];

/// The lesson map: one node per topic, zig-zagging down the screen.
pub struct LessonPath<'a> {
    pub topics: &'a [Topic],
    pub statuses: Vec<TopicStatus>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> LessonPath<'a> {
    pub fn new(
        topics: &'a [Topic],
        statuses: Vec<TopicStatus>,
        selected: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            topics,
            statuses,
            selected,
            theme,
        }
    }

    /// First topic to draw so that `selected` stays on screen.
    fn scroll_offset(&self, visible_rows: usize) -> usize {
        if visible_rows == 0 || self.selected < visible_rows {
            0
        } else {
            self.selected + 1 - visible_rows
        }
    }
}

impl Widget for LessonPath<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let visible_rows = (area.height / ROW_HEIGHT) as usize;
        let offset = self.scroll_offset(visible_rows);

        for (row, i) in (offset..self.topics.len()).take(visible_rows).enumerate() {
            let topic = &self.topics[i];
            let status = self.statuses.get(i).copied().unwrap_or(TopicStatus::Locked);
            let is_selected = i == self.selected;

            let (marker, color) = match status {
                TopicStatus::Completed => ("\u{1F451}", colors.completed()),
                TopicStatus::Next => (topic.icon, colors.accent()),
                TopicStatus::Locked => ("\u{1F512}", colors.locked()),
            };
            let mut style = Style::default().fg(color);
            if is_selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            let cursor = if is_selected { ">" } else { " " };

            let left = area.x as i32;
            let right = (left + area.width as i32 - NODE_WIDTH as i32).max(left);
            let center = left + (area.width as i32 - NODE_WIDTH as i32) / 2;
            let x = (center + ZIGZAG[i % ZIGZAG.len()]).clamp(left, right) as u16;
            let y = area.y + row as u16 * ROW_HEIGHT;
            let node = Rect::new(x, y, NODE_WIDTH.min(area.width), 1);

            let line = Line::from(vec![
                Span::styled(cursor, Style::default().fg(colors.selected())),
                Span::raw(" "),
                Span::styled(format!(" {marker} {} ", topic.title), style),
            ]);
            Paragraph::new(line).render(node, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::topic::TOPICS;

    #[test]
    fn test_scroll_keeps_selection_visible() {
        let theme = Theme::default();
        let path = LessonPath::new(TOPICS, vec![TopicStatus::Locked; TOPICS.len()], 6, &theme);
        assert_eq!(path.scroll_offset(3), 4);
        assert_eq!(path.scroll_offset(10), 0);
        assert_eq!(path.scroll_offset(0), 0);
    }

    #[test]
    fn test_render_marks_selected_topic() {
        let theme = Theme::default();
        let statuses = vec![TopicStatus::Next; TOPICS.len()];
        let path = LessonPath::new(TOPICS, statuses, 0, &theme);
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        path.render(area, &mut buf);

        let text: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(text.contains('>'));
        assert!(text.contains("Basics 1"));
    }
}
