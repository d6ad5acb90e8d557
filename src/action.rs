use serde::{Deserialize, Serialize};

use crate::detail::Detail;
use crate::pipeline::ResolveRequest;
use crate::pokemon::Pokemon;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    PokemonDidLoad(Pokemon),
    PokemonDidError(String),

    OptionNext,
    OptionPrev,

    /// Move the list highlight without resolving anything.
    RowHighlight(usize),
    /// Resolve the highlighted row.
    RowSelect,

    DetailDidResolve {
        request: ResolveRequest,
        sections: Vec<Detail>,
    },
    DetailDidError {
        request: ResolveRequest,
        error: String,
    },
    DetailClose,

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
