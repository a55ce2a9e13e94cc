use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::session::quiz::{AnswerStatus, LessonSession};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::stats_header::HEART;
use crate::ui::theme::{Theme, ThemeColors};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OptionLook {
    Idle,
    Selected,
    Correct,
    Incorrect,
}

/// How an option button should be drawn given the checked state. Once an
/// answer is checked the correct option is always highlighted.
fn option_look(
    option: &str,
    correct_answer: &str,
    selected: Option<&str>,
    status: AnswerStatus,
) -> OptionLook {
    let is_selected = selected == Some(option);
    match status {
        AnswerStatus::Idle if is_selected => OptionLook::Selected,
        AnswerStatus::Idle => OptionLook::Idle,
        _ if option == correct_answer => OptionLook::Correct,
        AnswerStatus::Incorrect if is_selected => OptionLook::Incorrect,
        _ => OptionLook::Idle,
    }
}

/// The quiz screen: progress and hearts, the prompt, the options and, once
/// an answer is checked, the feedback bar.
pub struct ChallengeView<'a> {
    pub session: &'a LessonSession,
    pub theme: &'a Theme,
}

impl<'a> ChallengeView<'a> {
    pub fn new(session: &'a LessonSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn render_top_bar(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let hearts = format!(" {HEART} {}", self.session.lives());
        let hearts_width = hearts.chars().count() as u16 + 1;

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(4), Constraint::Length(hearts_width)])
            .split(area);

        ProgressBar::new(self.session.progress(), self.theme).render(cols[0], buf);
        Paragraph::new(Span::styled(
            hearts,
            Style::default()
                .fg(colors.hearts())
                .add_modifier(Modifier::BOLD),
        ))
        .render(cols[1], buf);
    }

    fn render_feedback(&self, area: Rect, buf: &mut Buffer, correct_answer: &str) {
        let colors = &self.theme.colors;
        let (fg, bg, lines) = match self.session.status() {
            AnswerStatus::Idle => return,
            AnswerStatus::Correct => (
                colors.correct(),
                colors.correct_bg(),
                vec![Line::from(Span::styled(
                    " Amazing!",
                    Style::default().add_modifier(Modifier::BOLD),
                ))],
            ),
            AnswerStatus::Incorrect => (
                colors.incorrect(),
                colors.incorrect_bg(),
                vec![
                    Line::from(Span::styled(
                        " Correct answer:",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(" {correct_answer}")),
                ],
            ),
        };

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(fg))
            .style(Style::default().fg(fg).bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for ChallengeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(challenge) = self.session.current() else {
            return;
        };

        let option_rows = challenge.options.len() as u16 * 3;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(2),
                Constraint::Length(option_rows),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_top_bar(layout[0], buf);

        Paragraph::new(Line::from(Span::styled(
            challenge.kind.prompt_title(),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )))
        .render(layout[2], buf);

        let keyword = challenge.image_keyword.as_deref().unwrap_or("picture");
        Paragraph::new(Line::from(vec![
            Span::styled("[img] ", Style::default().fg(colors.accent())),
            Span::styled(keyword, Style::default().fg(colors.fg())),
            Span::styled(
                format!("  {}", challenge.illustration_url()),
                Style::default().fg(colors.text_muted()),
            ),
        ]))
        .render(layout[3], buf);

        Paragraph::new(challenge.question.as_str())
            .style(Style::default().fg(colors.fg()))
            .wrap(Wrap { trim: true })
            .render(layout[4], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                challenge
                    .options
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[5]);

        for (i, option) in challenge.options.iter().enumerate() {
            let look = option_look(
                option,
                &challenge.correct_answer,
                self.session.selected(),
                self.session.status(),
            );
            render_option(i, option, look, colors, rows[i], buf);
        }

        self.render_feedback(layout[6], buf, &challenge.correct_answer);
    }
}

fn render_option(
    idx: usize,
    option: &str,
    look: OptionLook,
    colors: &ThemeColors,
    area: Rect,
    buf: &mut Buffer,
) {
    let (border, fg, bg) = match look {
        OptionLook::Idle => (colors.border(), colors.fg(), colors.bg()),
        OptionLook::Selected => (colors.selected(), colors.selected(), colors.bg()),
        OptionLook::Correct => (colors.correct(), colors.correct(), colors.correct_bg()),
        OptionLook::Incorrect => (colors.incorrect(), colors.incorrect(), colors.incorrect_bg()),
    };
    let block = Block::bordered()
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    block.render(area, buf);

    let mut label = Style::default().fg(fg);
    if look != OptionLook::Idle {
        label = label.add_modifier(Modifier::BOLD);
    }
    Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", idx + 1), Style::default().fg(colors.text_muted())),
        Span::styled(option, label),
    ]))
    .render(inner, buf);
}
