use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use valentine_app::PreferenceStore;
use valentine_core::{Clock, View};

use super::super::constants::HEADER_NAME_MAX_CHARS;
use super::super::view::{MessageLevel, Ui};
use super::util::truncate_with_ellipsis;
use crate::config::{Action, ViewType};

const CARDS: [(Action, View, &str); 4] = [
    (
        Action::OpenLetter,
        View::LetterStudio,
        "Heartfelt messages, ready to share.",
    ),
    (
        Action::OpenMemories,
        View::MemoryCurator,
        "Turn special photos into timeless captions.",
    ),
    (
        Action::OpenPlanner,
        View::DatePlanner,
        "Itineraries tailored to your love story.",
    ),
    (
        Action::OpenBouquet,
        View::BouquetBuilder,
        "A digital arrangement with flower meanings.",
    ),
];

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_dashboard(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(area);

        let greeting = self.container.greeting();
        let header = vec![
            Line::from(Span::styled(
                truncate_with_ellipsis(&greeting, HEADER_NAME_MAX_CHARS).into_owned(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Crafting digital memories, one heartbeat at a time.",
                Style::default().fg(Color::Gray),
            )),
        ];
        f.render_widget(
            Paragraph::new(header)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::BOTTOM)),
            chunks[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(chunks[1]);
        for ((action, view, desc), column) in CARDS.iter().zip(columns.iter()) {
            let key = self
                .keybindings
                .first_key(ViewType::Dashboard, *action)
                .unwrap_or_default();
            let card = vec![
                Line::from(Span::styled(*desc, Style::default().fg(Color::Gray))),
                Line::default(),
                Line::from(Span::styled(
                    format!("[{key}] Explore"),
                    Style::default().fg(Color::LightRed),
                )),
            ];
            f.render_widget(
                Paragraph::new(card).wrap(Wrap { trim: true }).block(
                    Block::default()
                        .title(format!(" {} ", view.title()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Magenta)),
                ),
                *column,
            );
        }

        let name = self
            .container
            .preferences()
            .partner_name
            .unwrap_or_else(|| "You".to_owned());
        let quote = vec![
            Line::from(Span::styled(
                format!("\"{name} are the best part of every day.\""),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                "Forever yours",
                Style::default().fg(Color::LightRed),
            )),
        ];
        f.render_widget(
            Paragraph::new(quote)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::TOP)),
            chunks[2],
        );
    }

    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let (text, style) = self.message.as_ref().map_or_else(
            || (String::new(), Style::default()),
            |msg| (msg.text.clone(), msg.style()),
        );
        let prefix = match self.message.as_ref().map(|m| m.level) {
            Some(MessageLevel::Error) => "✗ ",
            Some(MessageLevel::Info) => "✓ ",
            None => "",
        };
        let lines = vec![
            Line::from(Span::styled(format!("{prefix}{text}"), style)),
            Line::from(Span::styled(
                self.keybindings.help_text(self.view_type()),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::TOP)),
            area,
        );
    }
}
