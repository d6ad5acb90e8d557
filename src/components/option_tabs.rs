use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::detail::capitalize;
use crate::extract::DetailsOption;
use crate::pokemon::Pokemon;

pub struct OptionTabsProps<'a> {
    pub selected: DetailsOption,
    pub pokemon: &'a DataResource<Pokemon>,
    /// Name the record was requested by; shown until it loads.
    pub requested: &'a str,
}

/// Header: the Pokemon being browsed and one tab per details option.
#[derive(Default)]
pub struct OptionTabs;

impl OptionTabs {
    fn heading(props: &OptionTabsProps<'_>) -> Line<'static> {
        let title_style = Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD);
        let record = props.pokemon.data();
        let name = record
            .and_then(|pokemon| pokemon.name.as_deref())
            .unwrap_or(props.requested);
        let mut spans = vec![
            Span::raw(" "),
            Span::styled("POKEPEDIA", title_style),
            Span::raw("  "),
            Span::styled(capitalize(name), Style::default().fg(TEXT_MAIN)),
        ];
        if let Some(id) = record.and_then(|pokemon| pokemon.id) {
            spans.push(Span::styled(
                format!(" #{id:03}"),
                Style::default().fg(ACCENT_GOLD),
            ));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }
}

impl Component<Action> for OptionTabs {
    type Props<'a> = OptionTabsProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: OptionTabsProps<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Self::heading(&props))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tabs = Tabs::new(DetailsOption::ALL.iter().map(|option| option.title()))
            .select(props.selected.index())
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_render_tabs_and_name() {
        let mut render = RenderHarness::new(60, 3);
        let mut component = OptionTabs;
        let pokemon = DataResource::Loaded(Pokemon {
            id: Some(1),
            name: Some("bulbasaur".into()),
            ..Default::default()
        });

        let output = render.render_to_string_plain(|frame| {
            let props = OptionTabsProps {
                selected: DetailsOption::Moves,
                pokemon: &pokemon,
                requested: "bulbasaur",
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Bulbasaur #001"), "{output}");
        assert!(output.contains("Abilities"));
        assert!(output.contains("Types"));
    }

    #[test]
    fn test_render_requested_name_while_loading() {
        let mut render = RenderHarness::new(60, 3);
        let mut component = OptionTabs;
        let pokemon = DataResource::Loading;

        let output = render.render_to_string_plain(|frame| {
            let props = OptionTabsProps {
                selected: DetailsOption::Abilities,
                pokemon: &pokemon,
                requested: "mr-mime",
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Mr-Mime"), "{output}");
    }
}
