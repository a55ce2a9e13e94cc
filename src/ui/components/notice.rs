use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Clone, Debug)]
pub enum NoticeKind {
    /// Waiting on the lesson generator. `frame` drives the spinner.
    Loading { topic: String, frame: usize },
    Error {
        message: String,
        returns_in: Option<Duration>,
    },
    OutOfHearts,
}

/// Centered message panel for the loading, error and out-of-hearts states.
pub struct Notice<'a> {
    pub kind: NoticeKind,
    pub theme: &'a Theme,
}

impl<'a> Notice<'a> {
    pub fn new(kind: NoticeKind, theme: &'a Theme) -> Self {
        Self { kind, theme }
    }

    fn lines(&self) -> (&'static str, Vec<Line<'static>>) {
        let colors = &self.theme.colors;
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        match &self.kind {
            NoticeKind::Loading { topic, frame } => (
                " Loading ",
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!(
                            "{} Creating your lesson with AI...",
                            SPINNER[frame % SPINNER.len()]
                        ),
                        bold(colors.accent()),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(topic.clone(), Style::default().fg(colors.fg()))),
                ],
            ),
            NoticeKind::Error { message, returns_in } => {
                let mut lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Could not create a lesson",
                        bold(colors.incorrect()),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(message.clone(), Style::default().fg(colors.fg()))),
                ];
                if let Some(remaining) = returns_in {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!("Back to the map in {:.1}s", remaining.as_secs_f64()),
                        Style::default().fg(colors.text_muted()),
                    )));
                }
                (" Error ", lines)
            }
            NoticeKind::OutOfHearts => (
                " Out of hearts ",
                vec![
                    Line::from(""),
                    Line::from(Span::styled("You ran out of hearts!", bold(colors.hearts()))),
                    Line::from(""),
                    Line::from(Span::styled(
                        "No XP this time. Try the lesson again from the map.",
                        Style::default().fg(colors.fg()),
                    )),
                ],
            ),
        }
    }
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (title, lines) = self.lines();
        let border = match self.kind {
            NoticeKind::Loading { .. } => colors.border_focused(),
            NoticeKind::Error { .. } => colors.incorrect(),
            NoticeKind::OutOfHearts => colors.hearts(),
        };

        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
