//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::detail::Detail;
use crate::extract::{DetailsOption, ReferenceSummary};
use crate::pipeline::{ListPipeline, Presenter};
use crate::pokemon::{pokemon_url, Pokemon, DEFAULT_API_BASE};

/// A resolved reference, ready to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPage {
    pub title: String,
    pub sections: Vec<Detail>,
}

/// The detail pane. Driven by the pipeline through [`Presenter`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailPane {
    pub page: DataResource<DetailPage>,
}

impl Default for DetailPane {
    fn default() -> Self {
        Self {
            page: DataResource::Empty,
        }
    }
}

impl DetailPane {
    pub fn is_open(&self) -> bool {
        !self.page.is_empty()
    }
}

impl Presenter for DetailPane {
    fn on_loading_started(&mut self) {
        self.page = DataResource::Loading;
    }

    fn on_resolved(&mut self, sections: Vec<Detail>, title: String) {
        self.page = DataResource::Loaded(DetailPage { title, sections });
    }

    fn on_failed(&mut self, message: String) {
        self.page = DataResource::Failed(message);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub api_base: String,
    pub pokemon_name: String,
    /// Parent record lifecycle: Empty -> Loading -> Loaded/Failed
    pub pokemon: DataResource<Pokemon>,
    pub option: DetailsOption,
    pub pipeline: ListPipeline,
    pub highlighted: usize,
    pub detail: DetailPane,
    pub terminal_size: (u16, u16),
    pub tick: u64,
}

impl AppState {
    pub fn new(api_base: impl Into<String>, pokemon_name: impl Into<String>, option: DetailsOption) -> Self {
        Self {
            api_base: api_base.into(),
            pokemon_name: pokemon_name.into(),
            pokemon: DataResource::Empty,
            option,
            pipeline: ListPipeline::new(option.shape(), Vec::new()),
            highlighted: 0,
            detail: DetailPane::default(),
            terminal_size: (80, 24),
            tick: 0,
        }
    }

    pub fn pokemon_url(&self) -> String {
        pokemon_url(&self.api_base, &self.pokemon_name)
    }

    pub fn highlighted_summary(&self) -> Option<&ReferenceSummary> {
        self.pipeline.items().get(self.highlighted)
    }

    /// Rebuild the pipeline for the current option from the loaded record.
    /// Clears the highlight and the detail pane.
    pub fn rebuild_pipeline(&mut self) {
        self.pipeline = match self.pokemon.data() {
            Some(pokemon) => ListPipeline::for_option(self.option, pokemon),
            None => ListPipeline::new(self.option.shape(), Vec::new()),
        };
        self.highlighted = 0;
        self.detail = DetailPane::default();
    }

    pub fn is_busy(&self) -> bool {
        self.pokemon.is_loading() || self.pipeline.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, "bulbasaur", DetailsOption::default())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let pokemon = if let Some(pokemon) = self.pokemon.data() {
            format!("{:?} #{:?}", pokemon.name, pokemon.id)
        } else if let Some(error) = self.pokemon.error() {
            format!("failed: {error}")
        } else if self.pokemon.is_loading() {
            "loading".to_string()
        } else {
            "empty".to_string()
        };
        vec![
            DebugSection::new("Pokemon")
                .entry("name", ron_string(&self.pokemon_name))
                .entry("record", ron_string(&pokemon))
                .entry("api_base", ron_string(&self.api_base)),
            DebugSection::new("Pipeline")
                .entry("option", ron_string(&self.option))
                .entry("shape", ron_string(&self.pipeline.shape()))
                .entry("phase", ron_string(&self.pipeline.phase()))
                .entry("rows", ron_string(&self.pipeline.items().len()))
                .entry("highlighted", ron_string(&self.highlighted)),
            DebugSection::new("Detail")
                .entry("open", ron_string(&self.detail.is_open()))
                .entry(
                    "title",
                    ron_string(&self.detail.page.data().map(|page| page.title.clone())),
                )
                .entry("error", ron_string(&self.detail.page.error())),
        ]
    }
}
