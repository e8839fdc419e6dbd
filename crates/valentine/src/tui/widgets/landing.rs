use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use valentine_app::PreferenceStore;
use valentine_core::Clock;

use super::super::constants::ACCEPT_BASE_PADDING;
use super::super::view::Ui;
use super::util::{centered_rect, evaded_rect, scaled_padding};

const FEATURES: [(&str, &str); 4] = [
    ("Letter Studio", "Prose that captures your deepest emotions."),
    ("Memory Curator", "Turn simple photos into timeless poetic narratives."),
    ("Date Planner", "Bespoke itineraries for your unique connection."),
    ("Virtual Florist", "Flowers that never fade, meanings that never end."),
];

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_landing(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(" ♥ Aura Love ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(7),
                Constraint::Length(u16::try_from(FEATURES.len()).unwrap_or(u16::MAX) + 2),
            ])
            .split(inner);

        let hero = vec![
            Line::from(Span::styled(
                "THE OPERATING SYSTEM FOR ROMANCE",
                Style::default().fg(Color::LightRed),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Our Love Story, Perfectly Crafted.",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Will you embark on this journey with me?",
                Style::default().fg(Color::Gray),
            )),
        ];
        f.render_widget(
            Paragraph::new(hero)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        self.draw_landing_buttons(f, chunks[1]);

        let features: Vec<Line<'_>> = FEATURES
            .iter()
            .map(|(title, desc)| {
                Line::from(vec![
                    Span::styled(format!("{title}: "), Style::default().fg(Color::LightRed)),
                    Span::raw(*desc),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(features).block(Block::default().borders(Borders::TOP).title(" Features ")),
            chunks[2],
        );
    }

    fn draw_landing_buttons(&self, f: &mut Frame<'_>, area: Rect) {
        let evasion = self.container.evasion();
        let padding = " ".repeat(usize::from(scaled_padding(
            ACCEPT_BASE_PADDING,
            evasion.accept_scale(),
        )));
        let accept = format!("{padding}Say Yes! ♥{padding}");
        let accept_width = u16::try_from(accept.chars().count()).unwrap_or(u16::MAX);

        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let accept_area = centered_rect(halves[0], accept_width.saturating_add(2), 3);
        f.render_widget(
            Paragraph::new(accept)
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL)),
            accept_area,
        );

        let decline = format!("[ {} ]", evasion.decline_label());
        let decline_width = u16::try_from(decline.chars().count()).unwrap_or(u16::MAX);
        f.render_widget(
            Paragraph::new(decline).style(Style::default().fg(Color::Gray)),
            evaded_rect(halves[1], decline_width, evasion.offset()),
        );
    }
}
