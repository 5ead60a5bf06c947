pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ui;

use futures::StreamExt;

use application::clock::SystemClock;
use application::feed::RandomOrderFeed;
use application::service::DisplayService;
use crossterm::event::EventStream;
use domain::status_style::StyleTable;
use ui::render::Renderer;
use ui::terminal::{Input, TerminalGuard, TerminalView};
use ui::view::Screen;

pub use config::BoardConfig;
pub use errors::AppError;

/// Builds the random order feed described by `config`.
pub fn order_feed(config: &BoardConfig) -> RandomOrderFeed {
    RandomOrderFeed::new(config.rng_seed)
        .with_numbers(config.numbers.clone())
        .with_return_probability(config.return_probability)
}

/// Runs the board in the current terminal until the user quits.
pub async fn run(config: BoardConfig) -> Result<(), AppError> {
    // fail before touching the terminal if a status has no style
    let styles = StyleTable::standard()?;
    let viewport = ui::terminal::viewport()?;
    let guard = TerminalGuard::enter()?;

    let screen = Screen::new(Renderer::new(styles, config.layout.clone()), config.card_stagger);
    let handle = DisplayService::mount(
        &config,
        order_feed(&config),
        SystemClock,
        TerminalView::new(screen)?,
        viewport,
    );

    let mut events = EventStream::new();
    let mut snapshots = handle.subscribe();
    loop {
        tokio::select! {
            event = events.next() => {
                let Some(event) = event else { break };
                match ui::terminal::map_event(&event?, handle.snapshot().settings_open) {
                    Some(Input::Quit) => break,
                    Some(Input::Command(cmd)) => {
                        if handle.send(cmd).is_err() {
                            break;
                        }
                    }
                    None => {}
                }
            }
            // the board task ended on its own, most likely a failed draw
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    let result = handle.unmount().await;
    drop(guard);
    let board = result?;
    log::info!("Board closed with {} orders", board.order_count());
    Ok(())
}
