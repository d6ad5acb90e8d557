use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{spinner, Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{DetailPage, DetailPane};

pub struct DetailPanelProps<'a> {
    pub pane: &'a DetailPane,
    pub tick: u64,
}

/// Labelled values of the resolved reference, or the state of resolving it.
#[derive(Default)]
pub struct DetailPanel;

fn page_text(page: &DetailPage) -> Text<'static> {
    let label_style = Style::default()
        .fg(ACCENT_GOLD)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line<'static>> = page
        .sections
        .iter()
        .map(|section| {
            Line::from(vec![
                Span::styled(format!("{}: ", section.label), label_style),
                Span::styled(section.values.join(", "), Style::default().fg(TEXT_MAIN)),
            ])
        })
        .collect();
    Text::from(lines)
}

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailPanelProps<'_>) {
        let page = &props.pane.page;
        let title = page
            .data()
            .map(|page| format!(" {} ", page.title))
            .unwrap_or_else(|| " DETAIL ".to_string());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                title,
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content = if let Some(detail) = page.data() {
            page_text(detail)
        } else if let Some(error) = page.error() {
            Text::from(Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(ACCENT_RED),
            )))
        } else if page.is_loading() {
            Text::from(Line::from(Span::styled(
                format!("{} Loading...", spinner(props.tick)),
                Style::default().fg(ACCENT_GOLD),
            )))
        } else {
            Text::from(Line::from(Span::styled(
                "Select a row and press Enter.",
                Style::default().fg(TEXT_DIM),
            )))
        };
        frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }), inner);
    }
}
