use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use valentine_app::PreferenceStore;
use valentine_core::bouquet::{CATALOGUE, MAX_FLOWERS};
use valentine_core::{Clock, Tone};

use super::super::constants::LIST_HIGHLIGHT_SYMBOL;
use super::super::view::Ui;

fn labelled<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    let value = if value.is_empty() { "(press the edit key)" } else { value };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
}

fn split_inputs(area: Rect, input_rows: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(input_rows + 2), Constraint::Min(3)])
        .split(area)
}

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn draw_letter(&self, f: &mut Frame<'_>, area: Rect) {
        let state = &self.tools.letter;
        let chunks = split_inputs(area, 3);

        let tones: Vec<Span<'_>> = Tone::ALL
            .iter()
            .map(|tone| {
                let style = if *tone == state.request.tone {
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(format!(" {} ", tone.label()), style)
            })
            .collect();
        let inputs = vec![
            labelled("To", &state.request.name),
            labelled("Memories", &state.request.memories),
            Line::from(tones),
        ];
        f.render_widget(
            Paragraph::new(inputs).block(panel("Love Letter Studio")),
            chunks[0],
        );

        let body = state
            .letter
            .as_deref()
            .unwrap_or("Your letter will appear here.");
        f.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .block(panel("Letter")),
            chunks[1],
        );
    }

    pub(in crate::tui) fn draw_planner(&self, f: &mut Frame<'_>, area: Rect) {
        let state = &self.tools.planner;
        let chunks = split_inputs(area, 1);
        f.render_widget(
            Paragraph::new(vec![labelled("Dream", &state.preferences)])
                .wrap(Wrap { trim: true })
                .block(panel("Magic Date Planner")),
            chunks[0],
        );

        let lines = state.plan.as_ref().map_or_else(
            || vec![Line::from("Describe your dream date, then plan it.")],
            |plan| {
                let mut lines = vec![
                    Line::from(Span::styled(
                        plan.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("Vibe: {}", plan.vibe),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::default(),
                ];
                lines.extend(
                    plan.activities
                        .iter()
                        .enumerate()
                        .map(|(i, activity)| Line::from(format!("{}. {activity}", i + 1))),
                );
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("Surprise: {}", plan.surprise_tip),
                    Style::default().fg(Color::LightRed),
                )));
                lines
            },
        );
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(panel("Itinerary")),
            chunks[1],
        );
    }

    pub(in crate::tui) fn draw_bouquet(&self, f: &mut Frame<'_>, area: Rect) {
        let state = &self.tools.bouquet;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let items: Vec<ListItem<'_>> = CATALOGUE
            .iter()
            .map(|flower| {
                let mark = if state.bouquet.contains(flower.id) { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{mark} {:<12}", flower.name)),
                    Span::styled(flower.meaning, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(state.cursor));
        f.render_stateful_widget(
            List::new(items)
                .block(panel("Virtual Bouquet"))
                .highlight_symbol(LIST_HIGHLIGHT_SYMBOL)
                .highlight_style(Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)),
            columns[0],
            &mut list_state,
        );

        let mut lines: Vec<Line<'_>> = state
            .bouquet
            .flowers()
            .map(|flower| Line::from(format!("✿ {}", flower.name)))
            .collect();
        if lines.is_empty() {
            lines.push(Line::from("Your vase is empty."));
        }
        lines.push(Line::default());
        let footer = if state.bouquet.is_sent() {
            Span::styled("Sent with love ♥", Style::default().fg(Color::Green))
        } else {
            Span::styled(
                format!("{}/{MAX_FLOWERS} flowers", state.bouquet.len()),
                Style::default().fg(Color::Gray),
            )
        };
        lines.push(Line::from(footer));
        f.render_widget(Paragraph::new(lines).block(panel("Arrangement")), columns[1]);
    }

    pub(in crate::tui) fn draw_memories(&self, f: &mut Frame<'_>, area: Rect) {
        let state = &self.tools.memories;
        let chunks = split_inputs(area, 2);
        let photo = state
            .photo
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        f.render_widget(
            Paragraph::new(vec![labelled("Photo", &photo), labelled("Context", &state.context)])
                .block(panel("Memory Curator")),
            chunks[0],
        );

        let caption = state
            .caption
            .as_deref()
            .unwrap_or("Pick a photo and let it speak.");
        f.render_widget(
            Paragraph::new(caption)
                .wrap(Wrap { trim: true })
                .block(panel("Caption")),
            chunks[1],
        );
    }
}
