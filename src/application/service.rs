use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, sleep_until, Instant, Interval, MissedTickBehavior};

use crate::application::board::{BoardSnapshot, OrderBoard};
use crate::config::BoardConfig;
use crate::domain::layout::{self, Chrome, LayoutConfig, Viewport};
use crate::domain::order::OrderStatus;
use crate::domain::ports::{Clock, OrderFeed};
use crate::errors::AppError;

/// Input the board reacts to besides its own timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    NextPage,
    PrevPage,
    ToggleSettings,
    CloseSettings,
    ToggleStatus(OrderStatus),
    ToggleReturns,
    NextStore,
    SelectStore(usize),
    SelectNextCard,
    ToggleDetail,
    Resize { width: u16, height: u16 },
}

/// Where the board is drawn.
pub trait View: Send + 'static {
    /// Header and footer heights as they would be drawn for `board`.
    fn measure(&self, board: &OrderBoard, width: u16) -> Chrome;

    /// Draws the board. Returns when it next wants to be redrawn even if
    /// nothing changes (pending card entrances).
    fn present(
        &mut self,
        board: &OrderBoard,
        viewport: Viewport,
        now: Instant,
    ) -> Result<Option<Instant>, AppError>;
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    clock: Duration,
    arrival: Duration,
    rotation: Duration,
    settle: Duration,
}

pub struct DisplayService<F, C, V> {
    board: OrderBoard,
    feed: F,
    clock: C,
    view: V,
    layout: LayoutConfig,
    viewport: Viewport,
    timing: Timing,
    measured: bool,
    snapshots: watch::Sender<BoardSnapshot>,
}

/// Owner side of a mounted board. Dropping it tears the board down.
pub struct DisplayHandle {
    commands: mpsc::UnboundedSender<BoardCommand>,
    snapshots: watch::Receiver<BoardSnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<OrderBoard, AppError>>>,
}

impl<F, C, V> DisplayService<F, C, V>
where
    F: OrderFeed,
    C: Clock,
    V: View,
{
    /// Seeds a board, starts its timers and returns the handle that owns them.
    pub fn mount(
        config: &BoardConfig,
        mut feed: F,
        clock: C,
        view: V,
        viewport: Viewport,
    ) -> DisplayHandle {
        let mut board = OrderBoard::new(config, clock.now());
        board.seed(feed.seed(config.seed_count, &config.statuses));

        let (snapshots, snapshot_rx) = watch::channel(board.snapshot());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let service = DisplayService {
            board,
            feed,
            clock,
            view,
            layout: config.layout.clone(),
            viewport,
            timing: Timing {
                clock: config.clock_interval,
                arrival: config.arrival_interval,
                rotation: config.rotation_interval,
                settle: config.settle_delay,
            },
            measured: false,
            snapshots,
        };

        log::info!(
            "Mounting board: {} orders, capacity {}, viewport {}x{}",
            service.board.order_count(),
            service.board.capacity(),
            viewport.width,
            viewport.height
        );

        let task = tokio::spawn(service.run(command_rx, shutdown_rx));

        DisplayHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<BoardCommand>,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Result<OrderBoard, AppError> {
        let start = Instant::now();
        let mut clock_tick = ticker(start, self.timing.clock);
        let mut arrivals = ticker(start, self.timing.arrival);
        let mut rotation = ticker(start, self.timing.rotation);
        let settle = sleep(self.timing.settle);
        tokio::pin!(settle);

        self.relayout();
        let mut wake = self.present()?;

        loop {
            let restart_rotation = tokio::select! {
                biased;

                _ = &mut shutdown => break,
                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.apply(cmd),
                    None => break,
                },
                _ = clock_tick.tick() => {
                    self.board.set_time(self.clock.now());
                    false
                }
                _ = arrivals.tick() => self.arrive(),
                _ = rotation.tick() => {
                    if self.board.rotate_page() {
                        log::debug!("Rotated to page {}", self.board.pager().current() + 1);
                    }
                    false
                }
                _ = &mut settle, if !self.measured => {
                    self.measured = true;
                    self.relayout()
                }
                _ = sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => false,
            };

            if restart_rotation {
                rotation.reset();
            }
            wake = self.present()?;
        }

        log::info!("Unmounting board with {} orders", self.board.order_count());
        Ok(self.board)
    }

    /// Returns true when the page cursor was reset.
    fn apply(&mut self, cmd: BoardCommand) -> bool {
        log::debug!("Command {:?}", cmd);
        match cmd {
            BoardCommand::NextPage => {
                self.board.next_page();
                false
            }
            BoardCommand::PrevPage => {
                self.board.prev_page();
                false
            }
            BoardCommand::ToggleSettings => {
                self.board.toggle_settings();
                false
            }
            BoardCommand::CloseSettings => {
                self.board.close_settings();
                false
            }
            BoardCommand::ToggleStatus(status) => {
                self.board.toggle_status(status);
                self.relayout();
                true
            }
            BoardCommand::ToggleReturns => {
                self.board.toggle_returns();
                self.relayout();
                true
            }
            BoardCommand::NextStore => {
                self.board.next_store();
                self.relayout()
            }
            BoardCommand::SelectStore(index) => {
                self.board.select_store(index);
                self.relayout()
            }
            BoardCommand::SelectNextCard => {
                self.board.select_next_card();
                false
            }
            BoardCommand::ToggleDetail => {
                self.board.toggle_detail();
                false
            }
            BoardCommand::Resize { width, height } => {
                self.viewport = Viewport { width, height };
                self.relayout()
            }
        }
    }

    /// Adds the next order from the feed. The order count is part of the
    /// header, so a measured layout is recomputed; returns true when that
    /// reset the page cursor.
    fn arrive(&mut self) -> bool {
        let Some(order) = self.feed.next_order(self.board.enabled_statuses()) else {
            return false;
        };
        log::debug!("Order {} arrived as {}", order.number, order.status);
        for evicted in self.board.push_arrival(order) {
            log::trace!("Evicted order {}", evicted.number);
        }
        self.measured && self.relayout()
    }

    /// Recomputes cards per page. Before the settle delay has passed the
    /// header and footer sizes are estimates; afterwards they are measured.
    fn relayout(&mut self) -> bool {
        let chrome = if self.measured {
            self.view.measure(&self.board, self.viewport.width)
        } else {
            Chrome::estimated(&self.layout)
        };
        let cards = layout::cards_per_page(self.viewport, chrome, &self.layout);
        let changed = self.board.set_cards_per_page(cards);
        if changed {
            log::debug!(
                "Layout {}x{} (header {}, footer {}): {} cards per page",
                self.viewport.width,
                self.viewport.height,
                chrome.header,
                chrome.footer,
                cards
            );
        }
        changed
    }

    fn present(&mut self) -> Result<Option<Instant>, AppError> {
        let wake = self.view.present(&self.board, self.viewport, Instant::now())?;
        let snapshot = self.board.snapshot();
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(&snapshot) {
                Ok(json) => log::trace!("Snapshot {}", json),
                Err(e) => log::warn!("Snapshot not serializable: {}", e),
            }
        }
        self.snapshots.send_replace(snapshot);
        Ok(wake)
    }
}

fn ticker(start: Instant, period: Duration) -> Interval {
    let mut interval = interval_at(start + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

impl DisplayHandle {
    pub fn send(&self, cmd: BoardCommand) -> Result<(), AppError> {
        self.commands
            .send(cmd)
            .map_err(|_| AppError::Task("display is no longer mounted".to_string()))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.clone()
    }

    /// Stops every timer and waits for the board task to finish, handing back
    /// the final board state.
    pub async fn unmount(mut self) -> Result<OrderBoard, AppError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        match self.task.take() {
            Some(task) => task.await?,
            None => Err(AppError::Task("display already unmounted".to_string())),
        }
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
