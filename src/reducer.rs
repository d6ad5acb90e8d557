//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.pokemon = DataResource::Loading;
            state.rebuild_pipeline();
            DispatchResult::changed_with(Effect::LoadPokemon {
                url: state.pokemon_url(),
            })
        }

        Action::PokemonDidLoad(pokemon) => {
            state.pokemon = DataResource::Loaded(pokemon);
            state.rebuild_pipeline();
            DispatchResult::changed()
        }

        Action::PokemonDidError(error) => {
            state.pokemon = DataResource::Failed(error);
            state.rebuild_pipeline();
            DispatchResult::changed()
        }

        // ===== Options =====
        Action::OptionNext => cycle_option(state, 1),
        Action::OptionPrev => cycle_option(state, -1),

        // ===== Rows =====
        Action::RowHighlight(row) => {
            if row < state.pipeline.items().len() && row != state.highlighted {
                state.highlighted = row;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::RowSelect => {
            // Re-selection is suppressed here; the pipeline itself allows it.
            if state.pipeline.is_loading() || state.pipeline.items().is_empty() {
                return DispatchResult::unchanged();
            }
            match state.pipeline.select(state.highlighted, &mut state.detail) {
                Ok(request) => DispatchResult::changed_with(Effect::ResolveDetail(request)),
                Err(err) => {
                    tracing::warn!(error = %err, "row selection rejected");
                    DispatchResult::unchanged()
                }
            }
        }

        // ===== Detail =====
        Action::DetailDidResolve { request, sections } => {
            if state
                .pipeline
                .complete(&request, Ok(sections), &mut state.detail)
            {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::DetailDidError { request, error } => {
            if state
                .pipeline
                .complete(&request, Err(error), &mut state.detail)
            {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::DetailClose => {
            if state.pipeline.is_loading() || !state.detail.is_open() {
                return DispatchResult::unchanged();
            }
            state.detail.page = DataResource::Empty;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.is_busy() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn cycle_option(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.pipeline.is_loading() {
        return DispatchResult::unchanged();
    }
    state.option = state.option.cycle(step);
    state.rebuild_pipeline();
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::Detail;
    use crate::extract::DetailsOption;
    use crate::pipeline::ResolveRequest;
    use crate::pokemon::{Pokemon, PokemonAbility, PokemonStat};
    use crate::resources::NamedResource;

    fn reference(name: &str, url: &str) -> Option<NamedResource> {
        Some(NamedResource {
            name: Some(name.into()),
            url: Some(url.into()),
        })
    }

    fn bulbasaur() -> Pokemon {
        Pokemon {
            id: Some(1),
            name: Some("bulbasaur".into()),
            abilities: Some(vec![
                PokemonAbility {
                    ability: reference("overgrow", "https://pokeapi.co/api/v2/ability/65/"),
                    slot: Some(1),
                },
                PokemonAbility {
                    ability: reference("chlorophyll", "https://pokeapi.co/api/v2/ability/34/"),
                    slot: Some(3),
                },
            ]),
            stats: Some(vec![PokemonStat {
                stat: reference("hp", "https://pokeapi.co/api/v2/stat/1/"),
                base_stat: Some(45),
            }]),
            ..Default::default()
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::PokemonDidLoad(bulbasaur()));
        state
    }

    fn select(state: &mut AppState) -> ResolveRequest {
        let result = reducer(state, Action::RowSelect);
        match result.effects.as_slice() {
            [Effect::ResolveDetail(request)] => request.clone(),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_init_loads_pokemon() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.pokemon.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadPokemon {
                url: "https://pokeapi.co/api/v2/pokemon/bulbasaur".into()
            }]
        );
    }

    #[test]
    fn test_pokemon_load_builds_rows() {
        let state = loaded();
        assert!(state.pokemon.is_loaded());
        assert_eq!(state.pipeline.items().len(), 2);
        assert_eq!(state.pipeline.items()[1].subtitle, "Slot #3");
    }

    #[test]
    fn test_row_select_emits_resolve() {
        let mut state = loaded();
        reducer(&mut state, Action::RowHighlight(1));

        let request = select(&mut state);

        assert_eq!(request.title, "Chlorophyll");
        assert!(state.pipeline.is_loading());
        assert!(state.detail.page.is_loading());
    }

    #[test]
    fn test_reselect_while_loading_ignored() {
        let mut state = loaded();
        select(&mut state);

        let result = reducer(&mut state, Action::RowSelect);
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::OptionNext);
        assert!(!result.changed);
        assert_eq!(state.option, DetailsOption::Abilities);
    }

    #[test]
    fn test_resolve_shows_page_once() {
        let mut state = loaded();
        let request = select(&mut state);
        let sections = vec![Detail::single("ID", Some("65".into()))];

        let result = reducer(
            &mut state,
            Action::DetailDidResolve {
                request: request.clone(),
                sections: sections.clone(),
            },
        );
        assert!(result.changed);
        assert_eq!(
            state.detail.page.data().map(|page| page.title.as_str()),
            Some("Overgrow")
        );

        let result = reducer(
            &mut state,
            Action::DetailDidError {
                request,
                error: "late".into(),
            },
        );
        assert!(!result.changed);
        assert!(state.detail.page.is_loaded());
    }

    #[test]
    fn test_error_then_close() {
        let mut state = loaded();
        let request = select(&mut state);
        reducer(
            &mut state,
            Action::DetailDidError {
                request,
                error: "Not Found".into(),
            },
        );
        assert_eq!(state.detail.page.error(), Some("Not Found"));
        assert!(!state.pipeline.is_loading());

        assert!(reducer(&mut state, Action::DetailClose).changed);
        assert!(state.detail.page.is_empty());
        assert!(!reducer(&mut state, Action::DetailClose).changed);
    }

    #[test]
    fn test_option_cycle_rebuilds_rows() {
        let mut state = loaded();
        reducer(&mut state, Action::RowHighlight(1));

        reducer(&mut state, Action::OptionPrev);
        assert_eq!(state.option, DetailsOption::Types);
        assert!(state.pipeline.items().is_empty());

        reducer(&mut state, Action::OptionPrev);
        assert_eq!(state.option, DetailsOption::Stats);
        assert_eq!(state.highlighted, 0);
        assert_eq!(state.pipeline.items()[0].subtitle, "Base value 45");
    }

    #[test]
    fn test_row_select_on_empty_list() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::RowSelect);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_highlight_out_of_range() {
        let mut state = loaded();
        assert!(!reducer(&mut state, Action::RowHighlight(5)).changed);
        assert_eq!(state.highlighted, 0);
    }

    #[test]
    fn test_tick_only_while_busy() {
        let mut state = loaded();
        assert!(!reducer(&mut state, Action::Tick).changed);
        select(&mut state);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 1);
    }
}
