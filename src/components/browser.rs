use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::{
    spinner, Component, DetailPanel, DetailPanelProps, OptionTabs, OptionTabsProps,
    ReferenceList, ReferenceListProps, ACCENT_GOLD, ACCENT_TEAL, BG_BASE, BG_PANEL, TEXT_DIM,
    TEXT_MAIN,
};
use crate::action::Action;
use crate::state::AppState;

pub struct BrowserProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: option tabs, reference rows, detail pane, status bar.
pub struct Browser {
    tabs: OptionTabs,
    list: ReferenceList,
    detail: DetailPanel,
    status_bar: StatusBar,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    pub fn new() -> Self {
        Self {
            tabs: OptionTabs,
            list: ReferenceList::new(),
            detail: DetailPanel,
            status_bar: StatusBar::new(),
        }
    }
}

fn list_placeholder(state: &AppState) -> Option<String> {
    if state.pokemon.is_loading() {
        Some(format!("{} Loading {}...", spinner(state.tick), state.pokemon_name))
    } else {
        state
            .pokemon
            .error()
            .map(|error| format!("Could not load {}: {error}", state.pokemon_name))
    }
}

fn status_message(state: &AppState) -> String {
    if state.pokemon.is_loading() {
        return "Loading pokemon...".to_string();
    }
    if state.pokemon.is_failed() {
        return "Pokemon unavailable".to_string();
    }
    if state.pipeline.is_loading() {
        let title = state
            .highlighted_summary()
            .map(|row| row.title.as_str())
            .unwrap_or_default();
        return format!("Resolving {title}...");
    }
    format!("{} {}", state.pipeline.items().len(), state.option.title().to_lowercase())
}

fn status_style() -> StatusBarStyle {
    StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    }
}

impl Component<Action> for Browser {
    type Props<'a> = BrowserProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char(']') | KeyCode::Right | KeyCode::Tab => {
                    return vec![Action::OptionNext]
                }
                KeyCode::Char('[') | KeyCode::Left | KeyCode::BackTab => {
                    return vec![Action::OptionPrev]
                }
                KeyCode::Esc => return vec![Action::DetailClose],
                _ => {}
            }
        }
        let placeholder = list_placeholder(state);
        let title = state.option.menu_title();
        let list_props = ReferenceListProps {
            title: &title,
            rows: state.pipeline.items(),
            highlighted: state.highlighted,
            // Rows stay inert while a reference resolves.
            is_focused: !state.pipeline.is_loading(),
            placeholder: placeholder.as_deref(),
        };
        self.list
            .handle_event(event, list_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: BrowserProps<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.tabs.render(
            frame,
            layout[0],
            OptionTabsProps {
                selected: state.option,
                pokemon: &state.pokemon,
                requested: &state.pokemon_name,
            },
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(layout[1]);
        let placeholder = list_placeholder(state);
        let title = state.option.menu_title();
        self.list.render(
            frame,
            body[0],
            ReferenceListProps {
                title: &title,
                rows: state.pipeline.items(),
                highlighted: state.highlighted,
                is_focused: props.is_focused && !state.pipeline.is_loading(),
                placeholder: placeholder.as_deref(),
            },
        );
        self.detail.render(
            frame,
            body[1],
            DetailPanelProps {
                pane: &state.detail,
                tick: state.tick,
            },
        );

        let left = [
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "View"),
            StatusBarHint::new("[ ]", "Option"),
            StatusBarHint::new("Esc", "Close"),
        ];
        let center = [StatusBarHint::new("q", "Quit")];
        let message = status_message(state);
        let status_items = [StatusBarItem::span(Span::styled(
            message.as_str(),
            Style::default().fg(ACCENT_GOLD),
        ))];
        let status_props = StatusBarProps {
            left: StatusBarSection::hints(&left).with_separator("  "),
            center: StatusBarSection::hints(&center).with_separator("  "),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style: status_style(),
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, layout[2], status_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_global_keys() {
        let mut component = Browser::new();
        let state = AppState::default();
        let cases = [
            (press(KeyCode::Char('q')), Action::Quit),
            (press(KeyCode::Char(']')), Action::OptionNext),
            (press(KeyCode::Left), Action::OptionPrev),
            (press(KeyCode::Esc), Action::DetailClose),
        ];
        for (event, expected) in cases {
            let props = BrowserProps {
                state: &state,
                is_focused: true,
            };
            let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
            actions.assert_count(1);
            actions.assert_first(expected);
        }
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut component = Browser::new();
        let state = AppState::default();
        let props = BrowserProps {
            state: &state,
            is_focused: false,
        };
        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Char('q')), props)
            .into_iter()
            .collect();
        actions.assert_count(0);
    }
}
