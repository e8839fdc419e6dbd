use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use valentine_app::{PreferenceStore, ProposalPhase, ProposalSession};
use valentine_core::{Clock, Emphasis};

use super::super::constants::{SHARE_PANEL_HEIGHT, SHARE_PANEL_WIDTH_PERCENT};
use super::super::view::Ui;
use super::util::{centered_rect, percent_of};

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_proposal(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(session) = self.container.proposal() else {
            return;
        };
        match session.phase() {
            ProposalPhase::Accepted => draw_celebration(f, area, session),
            ProposalPhase::Reveal(_) => {
                draw_reveal(f, area, session);
                if session.is_share_open() {
                    self.draw_share_panel(f, area, session);
                }
            }
        }
    }

    fn draw_share_panel(&self, f: &mut Frame<'_>, area: Rect, session: &ProposalSession) {
        let width = percent_of(area.width, SHARE_PANEL_WIDTH_PERCENT);
        let popup = centered_rect(area, width, SHARE_PANEL_HEIGHT);
        let draft = session.draft();
        let link = match self.container.draft_invitation_link() {
            Some(Ok(url)) => url.to_string(),
            Some(Err(err)) => format!("(invalid origin: {err})"),
            None => String::new(),
        };
        let field = |label: &str, value: &str| {
            let shown = if value.is_empty() { "(not set)" } else { value };
            Line::from(vec![
                Span::styled(format!("{label:<8}"), Style::default().fg(Color::Gray)),
                Span::raw(shown.to_owned()),
            ])
        };
        let lines = vec![
            field("To", &draft.partner),
            field("From", &draft.sender),
            Line::default(),
            Line::from(Span::styled(link, Style::default().fg(Color::Cyan))),
        ];

        let block = Block::default()
            .title(" Create Your Own Link ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn draw_reveal(f: &mut Frame<'_>, area: Rect, session: &ProposalSession) {
    let sequencer = session.sequencer();
    let mut lines: Vec<Line<'_>> = Vec::new();
    for (text, emphasis) in sequencer.visible_lines() {
        let style = match emphasis {
            Emphasis::Current => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Emphasis::Past => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(Span::styled(text, style)));
        lines.push(Line::default());
    }

    if sequencer.is_asking() {
        lines.push(Line::from(Span::styled(
            "♥  Will you be my Valentine?  ♥",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(sender) = session.sender_name() {
            lines.push(Line::from(Span::styled(
                format!("with all my heart, {sender}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_celebration(f: &mut Frame<'_>, area: Rect, session: &ProposalSession) {
    let who = session.partner_name().unwrap_or("my love");
    let lines = vec![
        Line::from(Span::styled("♥", Style::default().fg(Color::Red))),
        Line::default(),
        Line::from(Span::styled(
            "It's Official!",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("You just made me the happiest person alive, {who}.")),
        Line::default(),
        Line::from(Span::styled(
            "Preparing our hub...",
            Style::default().fg(Color::LightRed),
        )),
    ];
    let popup = centered_rect(area, area.width, 8);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}
