use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::LessonResult;
use crate::ui::components::stats_header::HEART;
use crate::ui::theme::Theme;

pub struct LessonComplete<'a> {
    pub result: &'a LessonResult,
    pub theme: &'a Theme,
}

impl<'a> LessonComplete<'a> {
    pub fn new(result: &'a LessonResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for LessonComplete<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Lesson Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            self.result.heading.as_str(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let xp_line = Line::from(vec![
            Span::styled("  XP earned: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("+{}", self.result.score),
                Style::default().fg(colors.xp()).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(xp_line).render(layout[1], buf);

        let hearts_line = Line::from(vec![
            Span::styled("  Hearts:    ", Style::default().fg(colors.fg())),
            Span::styled(
                HEART.repeat(self.result.lives_remaining as usize),
                Style::default().fg(colors.hearts()),
            ),
        ]);
        Paragraph::new(hearts_line).render(layout[2], buf);

        let acc_color = if self.result.correct == self.result.total {
            colors.correct()
        } else {
            colors.incorrect()
        };
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy:  ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.0}%", self.result.accuracy()),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{} correct)", self.result.correct, self.result.total),
                Style::default().fg(colors.text_muted()),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[3], buf);

        let when = self.result.timestamp.format("%Y-%m-%d %H:%M UTC").to_string();
        Paragraph::new(Line::from(Span::styled(
            format!("  Finished {when}"),
            Style::default().fg(colors.text_muted()),
        )))
        .render(layout[4], buf);

        Paragraph::new(Line::from(Span::styled(
            "  [Enter] Continue",
            Style::default().fg(colors.accent()),
        )))
        .render(layout[6], buf);
    }
}
