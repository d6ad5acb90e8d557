use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{Component, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::extract::ReferenceSummary;

pub struct ReferenceListProps<'a> {
    pub title: &'a str,
    pub rows: &'a [ReferenceSummary],
    pub highlighted: usize,
    pub is_focused: bool,
    /// Shown instead of the rows, e.g. while the parent record loads.
    pub placeholder: Option<&'a str>,
}

/// The selectable reference rows: title plus a dimmed subtitle.
pub struct ReferenceList {
    list: SelectList,
}

impl Default for ReferenceList {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceList {
    pub fn new() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

fn row_lines(rows: &[ReferenceSummary]) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| {
            Line::from(vec![
                Span::raw(row.title.clone()),
                Span::raw("  "),
                Span::styled(row.subtitle.clone(), Style::default().fg(TEXT_DIM)),
            ])
        })
        .collect()
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

impl Component<Action> for ReferenceList {
    type Props<'a> = ReferenceListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.placeholder.is_some() || props.rows.is_empty() {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Enter {
                return vec![Action::RowSelect];
            }
        }
        let items = row_lines(props.rows);
        let select_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.highlighted.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::RowHighlight,
            render_item: &|item| item.clone(),
        };
        self.list
            .handle_event(event, select_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ReferenceListProps<'_>) {
        let border = if props.is_focused {
            Style::default().fg(ACCENT_TEAL)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", props.title))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let placeholder = props
            .placeholder
            .or_else(|| props.rows.is_empty().then_some("Nothing to show."));
        if let Some(text) = placeholder {
            frame.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(TEXT_DIM))
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        let items = row_lines(props.rows);
        let select_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.highlighted.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::RowHighlight,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, select_props);
    }
}
