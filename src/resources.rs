//! PokeAPI detail records: Ability, Move, Stat and Type.
//!
//! Field names follow the wire's snake_case keys. Every field is optional; see
//! [`crate::decode`] for how absent and mismatched values are handled.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::decode::{decode, lenient, lenient_list, DecodeError};
use crate::detail::{self, Detail, Displayable};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// A localized name entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_main_series: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub generation: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub names: Option<Vec<Name>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub accuracy: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub power: Option<i64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub names: Option<Vec<Name>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub game_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_battle_only: Option<bool>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub names: Option<Vec<Name>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub generation: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient")]
    pub move_damage_class: Option<NamedResource>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub names: Option<Vec<Name>>,
}

impl Displayable for Ability {
    fn details(&self) -> Vec<Detail> {
        vec![
            Detail::single("ID", detail::number(self.id)),
            Detail::single("Name", detail::text(self.name.as_deref())),
            Detail::single("Is Main Series", detail::flag(self.is_main_series)),
            Detail::single(
                "Generation",
                detail::resource_name(self.generation.as_ref()),
            ),
            detail::names(self.names.as_deref()),
        ]
    }
}

impl Displayable for Move {
    fn details(&self) -> Vec<Detail> {
        vec![
            Detail::single("ID", detail::number(self.id)),
            Detail::single("Name", detail::text(self.name.as_deref())),
            Detail::single("Accuracy", detail::number(self.accuracy)),
            Detail::single("Power", detail::number(self.power)),
            detail::names(self.names.as_deref()),
        ]
    }
}

impl Displayable for Stat {
    fn details(&self) -> Vec<Detail> {
        vec![
            Detail::single("ID", detail::number(self.id)),
            Detail::single("Name", detail::text(self.name.as_deref())),
            Detail::single("Game Index", detail::number(self.game_index)),
            Detail::single("Is Battle Only", detail::flag(self.is_battle_only)),
            detail::names(self.names.as_deref()),
        ]
    }
}

impl Displayable for Type {
    fn details(&self) -> Vec<Detail> {
        vec![
            Detail::single("ID", detail::number(self.id)),
            Detail::single("Name", detail::text(self.name.as_deref())),
            Detail::single(
                "Generation",
                detail::resource_name(self.generation.as_ref()),
            ),
            Detail::single(
                "Move Damage Class",
                detail::resource_name(self.move_damage_class.as_ref()),
            ),
            detail::names(self.names.as_deref()),
        ]
    }
}

/// Which record a pipeline decodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Ability,
    Move,
    Stat,
    Type,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shape::Ability => "ability",
            Shape::Move => "move",
            Shape::Stat => "stat",
            Shape::Type => "type",
        };
        f.write_str(label)
    }
}

/// A decodable, displayable detail record.
pub trait Resource: DeserializeOwned + Displayable {
    const SHAPE: Shape;

    fn into_record(self) -> DecodedRecord;
}

impl Resource for Ability {
    const SHAPE: Shape = Shape::Ability;

    fn into_record(self) -> DecodedRecord {
        DecodedRecord::Ability(self)
    }
}

impl Resource for Move {
    const SHAPE: Shape = Shape::Move;

    fn into_record(self) -> DecodedRecord {
        DecodedRecord::Move(self)
    }
}

impl Resource for Stat {
    const SHAPE: Shape = Shape::Stat;

    fn into_record(self) -> DecodedRecord {
        DecodedRecord::Stat(self)
    }
}

impl Resource for Type {
    const SHAPE: Shape = Shape::Type;

    fn into_record(self) -> DecodedRecord {
        DecodedRecord::Type(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedRecord {
    Ability(Ability),
    Move(Move),
    Stat(Stat),
    Type(Type),
}

impl DecodedRecord {
    pub fn shape(&self) -> Shape {
        match self {
            DecodedRecord::Ability(_) => Shape::Ability,
            DecodedRecord::Move(_) => Shape::Move,
            DecodedRecord::Stat(_) => Shape::Stat,
            DecodedRecord::Type(_) => Shape::Type,
        }
    }
}

impl Displayable for DecodedRecord {
    fn details(&self) -> Vec<Detail> {
        match self {
            DecodedRecord::Ability(ability) => ability.details(),
            DecodedRecord::Move(move_info) => move_info.details(),
            DecodedRecord::Stat(stat) => stat.details(),
            DecodedRecord::Type(type_info) => type_info.details(),
        }
    }
}

pub fn decode_as<R: Resource>(bytes: &[u8]) -> Result<DecodedRecord, DecodeError> {
    decode::<R>(bytes).map(R::into_record)
}

/// Decode `bytes` as the record `shape` names.
pub fn decode_record(bytes: &[u8], shape: Shape) -> Result<DecodedRecord, DecodeError> {
    match shape {
        Shape::Ability => decode_as::<Ability>(bytes),
        Shape::Move => decode_as::<Move>(bytes),
        Shape::Stat => decode_as::<Stat>(bytes),
        Shape::Type => decode_as::<Type>(bytes),
    }
}
