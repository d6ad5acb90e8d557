//! Pokepedia TUI

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokepedia::action::Action;
use pokepedia::client::ServiceClient;
use pokepedia::components::{Browser, BrowserProps, Component};
use pokepedia::effect::Effect;
use pokepedia::extract::DetailsOption;
use pokepedia::pipeline;
use pokepedia::pokemon::{fetch_pokemon, DEFAULT_API_BASE};
use pokepedia::reducer::reducer;
use pokepedia::state::AppState;

const LOG_ENV: &str = "POKEPEDIA_LOG";

/// Browse a Pokemon's abilities, moves, stats and types
#[derive(Parser, Debug)]
#[command(name = "pokepedia")]
#[command(about = "Pokemon reference browser using tui-dispatch")]
struct Args {
    /// Pokemon to browse
    #[arg(default_value = "bulbasaur")]
    pokemon: String,

    /// Details option shown first
    #[arg(long, short, value_enum, default_value_t = DetailsOption::Abilities)]
    option: DetailsOption,

    /// Base URL of the PokeAPI service
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Directory for the log file (defaults to the platform cache dir)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokepediaComponentId {
    Browser,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokepediaContext {
    Main,
}

impl EventRoutingState<PokepediaComponentId, PokepediaContext> for AppState {
    fn focused(&self) -> Option<PokepediaComponentId> {
        Some(PokepediaComponentId::Browser)
    }

    fn modal(&self) -> Option<PokepediaComponentId> {
        None
    }

    fn binding_context(&self, id: PokepediaComponentId) -> PokepediaContext {
        match id {
            PokepediaComponentId::Browser => PokepediaContext::Main,
        }
    }

    fn default_context(&self) -> PokepediaContext {
        PokepediaContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        pokemon,
        option,
        api_base,
        log_dir,
        debug: debug_args,
    } = Args::parse();

    let log_dir = log_dir.unwrap_or_else(default_log_dir);
    setup_logging(&log_dir)?;

    let debug = DebugSession::new(debug_args);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(api_base, pokemon, option))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("session finished");
    Ok(())
}

fn default_log_dir() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pokepedia")
        .join("logs")
}

/// Log to a file only; the terminal belongs to the TUI.
fn setup_logging(log_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "pokepedia.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(())
}

struct PokepediaUi {
    browser: Browser,
}

impl PokepediaUi {
    fn new() -> Self {
        Self {
            browser: Browser::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokepediaComponentId>,
    ) {
        event_ctx.set_component_area(PokepediaComponentId::Browser, area);
        let props = BrowserProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.browser.render(frame, area, props);
    }

    fn handle_browser_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = BrowserProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .browser
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokepediaUi::new()));
    let mut bus: EventBus<AppState, Action, PokepediaComponentId, PokepediaContext> =
        EventBus::new();
    let keybindings: Keybindings<PokepediaContext> = Keybindings::new();

    let ui_browser = Rc::clone(&ui);
    bus.register(PokepediaComponentId::Browser, move |event, state| {
        ui_browser
            .borrow_mut()
            .handle_browser_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Results come back as actions, so the
/// store applies them on the UI loop.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadPokemon { url } => {
            ctx.tasks().spawn(TaskKey::new("pokemon"), async move {
                match fetch_pokemon(&ServiceClient::new(), &url).await {
                    Ok(pokemon) => Action::PokemonDidLoad(pokemon),
                    Err(err) => Action::PokemonDidError(err.to_string()),
                }
            });
        }
        Effect::ResolveDetail(request) => {
            let key = format!("resolve_{}", request.id);
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match pipeline::resolve(&ServiceClient::new(), request.shape, &request.url).await {
                    Ok(sections) => Action::DetailDidResolve { request, sections },
                    Err(err) => Action::DetailDidError {
                        request,
                        error: err.to_string(),
                    },
                }
            });
        }
    }
}
