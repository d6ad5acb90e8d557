//! The parent record: a Pokemon with its nested reference lists.

use serde::{Deserialize, Serialize};

use crate::client::{HttpTransport, ServiceClient};
use crate::decode::{decode, lenient, lenient_list};
use crate::pipeline::ResolveError;
use crate::resources::NamedResource;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub abilities: Option<Vec<PokemonAbility>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub moves: Option<Vec<PokemonMove>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub stats: Option<Vec<PokemonStat>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub types: Option<Vec<PokemonType>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonAbility {
    #[serde(default, deserialize_with = "lenient")]
    pub ability: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient")]
    pub slot: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonMove {
    #[serde(rename = "move", default, deserialize_with = "lenient")]
    pub move_info: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub version_group_details: Option<Vec<VersionGroupDetail>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGroupDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub move_learn_method: Option<NamedResource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    #[serde(default, deserialize_with = "lenient")]
    pub stat: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient")]
    pub base_stat: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub type_info: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient")]
    pub slot: Option<i64>,
}

pub fn pokemon_url(api_base: &str, name: &str) -> String {
    format!(
        "{}/pokemon/{}",
        api_base.trim_end_matches('/'),
        name.trim().to_lowercase()
    )
}

pub async fn fetch_pokemon<T: HttpTransport>(
    client: &ServiceClient<T>,
    url: &str,
) -> Result<Pokemon, ResolveError> {
    let bytes = client.fetch(url).await?;
    Ok(decode(&bytes)?)
}
