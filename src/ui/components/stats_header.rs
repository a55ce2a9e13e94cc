use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::course::language::Language;
use crate::ui::theme::Theme;

pub const HEART: &str = "\u{2665}";
pub const STAR: &str = "\u{2605}";

/// Top bar of the lesson map: language flag on the left, hearts and XP on
/// the right.
pub struct StatsHeader<'a> {
    pub language: Option<&'a Language>,
    pub hearts: u32,
    pub xp: u32,
    pub theme: &'a Theme,
}

impl<'a> StatsHeader<'a> {
    pub fn new(language: Option<&'a Language>, hearts: u32, xp: u32, theme: &'a Theme) -> Self {
        Self {
            language,
            hearts,
            xp,
            theme,
        }
    }
}

impl Widget for StatsHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let language = match self.language {
            Some(lang) => format!(" {} {} ", lang.flag, lang.name),
            None => " lingo ".to_string(),
        };
        Paragraph::new(Line::from(Span::styled(
            language,
            Style::default()
                .fg(colors.header_fg())
                .add_modifier(Modifier::BOLD),
        )))
        .render(inner, buf);

        let stats = Line::from(vec![
            Span::styled(
                format!("{HEART} {}", self.hearts),
                Style::default()
                    .fg(colors.hearts())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{STAR} {} ", self.xp),
                Style::default().fg(colors.xp()).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(stats)
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}
