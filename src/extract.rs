//! Reference extraction: a Pokemon's nested lists turned into selectable rows.
//!
//! A row needs a title, a subtitle and a resolvable URL. Entries missing any of
//! the three are dropped without error; the rest keep their source order.

use serde::{Deserialize, Serialize};

use crate::detail::capitalize;
use crate::pokemon::Pokemon;
use crate::resources::{NamedResource, Shape};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSummary {
    pub title: String,
    pub subtitle: String,
    pub url: String,
}

/// `Some` only when all three values are present.
pub fn require3<A, B, C>(a: Option<A>, b: Option<B>, c: Option<C>) -> Option<(A, B, C)> {
    Some((a?, b?, c?))
}

fn name(resource: Option<&NamedResource>) -> Option<&str> {
    resource
        .and_then(|resource| resource.name.as_deref())
        .filter(|name| !name.trim().is_empty())
}

fn title(resource: Option<&NamedResource>) -> Option<String> {
    name(resource).map(capitalize)
}

/// The URL as the record gave it, provided it parses.
fn url(resource: Option<&NamedResource>) -> Option<String> {
    let raw = resource.and_then(|resource| resource.url.as_deref())?;
    reqwest::Url::parse(raw).ok()?;
    Some(raw.to_string())
}

fn summarize<E>(
    kind: Shape,
    entries: Option<&[E]>,
    summary: impl Fn(&E) -> Option<(String, String, String)>,
) -> Vec<ReferenceSummary> {
    let entries = entries.unwrap_or_default();
    let rows: Vec<ReferenceSummary> = entries
        .iter()
        .filter_map(summary)
        .map(|(title, subtitle, url)| ReferenceSummary {
            title,
            subtitle,
            url,
        })
        .collect();
    if rows.len() < entries.len() {
        tracing::debug!(
            %kind,
            dropped = entries.len() - rows.len(),
            "dropped incomplete reference entries"
        );
    }
    rows
}

pub fn extract_abilities(pokemon: &Pokemon) -> Vec<ReferenceSummary> {
    summarize(Shape::Ability, pokemon.abilities.as_deref(), |entry| {
        let resource = entry.ability.as_ref();
        let (title, slot, url) = require3(title(resource), entry.slot, url(resource))?;
        Some((title, format!("Slot #{slot}"), url))
    })
}

pub fn extract_moves(pokemon: &Pokemon) -> Vec<ReferenceSummary> {
    summarize(Shape::Move, pokemon.moves.as_deref(), |entry| {
        let resource = entry.move_info.as_ref();
        let method = entry
            .version_group_details
            .as_deref()
            .and_then(|details| details.first())
            .and_then(|detail| name(detail.move_learn_method.as_ref()))
            .map(str::to_string);
        let (title, method, url) = require3(title(resource), method, url(resource))?;
        Some((title, format!("Learned by {method}"), url))
    })
}

pub fn extract_stats(pokemon: &Pokemon) -> Vec<ReferenceSummary> {
    summarize(Shape::Stat, pokemon.stats.as_deref(), |entry| {
        let resource = entry.stat.as_ref();
        let (title, value, url) = require3(title(resource), entry.base_stat, url(resource))?;
        Some((title, format!("Base value {value}"), url))
    })
}

pub fn extract_types(pokemon: &Pokemon) -> Vec<ReferenceSummary> {
    summarize(Shape::Type, pokemon.types.as_deref(), |entry| {
        let resource = entry.type_info.as_ref();
        let (title, slot, url) = require3(title(resource), entry.slot, url(resource))?;
        Some((title, format!("Slot #{slot}"), url))
    })
}

/// The four attribute lists a Pokemon can be browsed by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DetailsOption {
    #[default]
    Abilities,
    Moves,
    Stats,
    Types,
}

impl DetailsOption {
    pub const ALL: [DetailsOption; 4] = [
        DetailsOption::Abilities,
        DetailsOption::Moves,
        DetailsOption::Stats,
        DetailsOption::Types,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DetailsOption::Abilities => "Abilities",
            DetailsOption::Moves => "Moves",
            DetailsOption::Stats => "Stats",
            DetailsOption::Types => "Types",
        }
    }

    pub fn menu_title(self) -> String {
        format!("View {}", self.title())
    }

    pub fn shape(self) -> Shape {
        match self {
            DetailsOption::Abilities => Shape::Ability,
            DetailsOption::Moves => Shape::Move,
            DetailsOption::Stats => Shape::Stat,
            DetailsOption::Types => Shape::Type,
        }
    }

    pub fn extract(self, pokemon: &Pokemon) -> Vec<ReferenceSummary> {
        match self {
            DetailsOption::Abilities => extract_abilities(pokemon),
            DetailsOption::Moves => extract_moves(pokemon),
            DetailsOption::Stats => extract_stats(pokemon),
            DetailsOption::Types => extract_types(pokemon),
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0)
    }

    pub fn cycle(self, step: i16) -> Self {
        let len = Self::ALL.len() as i16;
        let next = (self.index() as i16 + step).rem_euclid(len);
        Self::ALL[next as usize]
    }
}
