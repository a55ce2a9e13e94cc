use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::course::language::Language;
use crate::ui::theme::Theme;

pub struct LanguagePicker<'a> {
    pub languages: &'a [Language],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> LanguagePicker<'a> {
    pub fn new(languages: &'a [Language], selected: usize, theme: &'a Theme) -> Self {
        Self {
            languages,
            selected,
            theme,
        }
    }
}

impl Widget for LanguagePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "I want to learn...",
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.languages
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, lang) in self.languages.iter().enumerate() {
            if i >= rows.len() {
                break;
            }
            let is_selected = i == self.selected;
            let border = if is_selected {
                colors.border_focused()
            } else {
                colors.border()
            };
            let block = Block::bordered()
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg()));
            let inner = block.inner(rows[i]);
            block.render(rows[i], buf);

            let label_style = Style::default()
                .fg(if is_selected {
                    colors.selected()
                } else {
                    colors.fg()
                })
                .add_modifier(Modifier::BOLD);
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), Style::default().fg(colors.text_muted())),
                Span::raw(format!("{}  ", lang.flag)),
                Span::styled(lang.name.as_str(), label_style),
            ]))
            .render(inner, buf);
        }
    }
}
