use crate::pipeline::ResolveRequest;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPokemon { url: String },
    ResolveDetail(ResolveRequest),
}
