use std::collections::{BTreeSet, VecDeque};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::BoardConfig;
use crate::domain::order::{Order, OrderDetail, OrderStatus};
use crate::domain::pagination::{page_range, total_pages, Pager};

/// All mutable state of one display board.
///
/// Derived views (the filtered list, the current page) are recomputed from
/// this state on every call rather than cached.
#[derive(Debug, Clone)]
pub struct OrderBoard {
    capacity: usize,
    orders: VecDeque<Order>,
    enabled: Vec<OrderStatus>,
    selected: BTreeSet<OrderStatus>,
    show_returns: bool,
    stores: Vec<String>,
    store: usize,
    settings_open: bool,
    cards_per_page: usize,
    pager: Pager,
    current_time: NaiveDateTime,
    selected_card: Option<usize>,
    detail_open: bool,
}

/// Read-only picture of the board published after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub order_count: usize,
    pub visible_count: usize,
    pub page: usize,
    pub total_pages: usize,
    pub cards_per_page: usize,
    pub page_orders: Vec<Order>,
    pub selected_statuses: Vec<OrderStatus>,
    pub show_returns: bool,
    pub store: String,
    pub settings_open: bool,
    pub time: NaiveDateTime,
}

impl OrderBoard {
    pub fn new(config: &BoardConfig, now: NaiveDateTime) -> Self {
        Self {
            capacity: config.capacity.max(1),
            orders: VecDeque::with_capacity(config.capacity),
            enabled: config.statuses.clone(),
            selected: config.statuses.iter().copied().collect(),
            show_returns: true,
            stores: config.stores.clone(),
            store: config.store,
            settings_open: false,
            cards_per_page: config.layout.min_cards_per_page.max(1),
            pager: Pager::default(),
            current_time: now,
            selected_card: None,
            detail_open: false,
        }
    }

    /// Places the initial orders, oldest last, trimming to capacity.
    pub fn seed(&mut self, orders: Vec<Order>) {
        self.orders = orders.into_iter().take(self.capacity).collect();
        self.pager.reset(self.page_count());
    }

    /// Prepends a freshly arrived order and evicts whatever falls past the
    /// capacity bound, oldest first.
    pub fn push_arrival(&mut self, order: Order) -> Vec<Order> {
        self.orders.push_front(order);
        let evicted = if self.orders.len() > self.capacity {
            self.orders.split_off(self.capacity).into()
        } else {
            Vec::new()
        };
        self.pager.resize(self.page_count());
        self.clamp_selection();
        evicted
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Statuses new orders may be born with.
    pub fn enabled_statuses(&self) -> &[OrderStatus] {
        &self.enabled
    }

    /// Orders passing the status and return filters, ascending by number.
    /// Orders with equal numbers keep their collection order.
    pub fn visible_orders(&self) -> Vec<&Order> {
        let mut visible: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| self.selected.contains(&o.status))
            .filter(|o| self.show_returns || !o.is_return)
            .collect();
        visible.sort_by_key(|o| o.number);
        visible
    }

    pub fn page_count(&self) -> usize {
        total_pages(self.visible_orders().len(), self.cards_per_page)
    }

    pub fn current_page_orders(&self) -> Vec<&Order> {
        let visible = self.visible_orders();
        let range = page_range(self.pager.current(), self.cards_per_page, visible.len());
        visible[range].to_vec()
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn cards_per_page(&self) -> usize {
        self.cards_per_page
    }

    pub fn is_selected(&self, status: OrderStatus) -> bool {
        self.selected.contains(&status)
    }

    pub fn selected_statuses(&self) -> Vec<OrderStatus> {
        OrderStatus::ALL
            .iter()
            .copied()
            .filter(|s| self.selected.contains(s))
            .collect()
    }

    pub fn toggle_status(&mut self, status: OrderStatus) {
        if !self.selected.remove(&status) {
            self.selected.insert(status);
        }
        self.restart_paging();
    }

    pub fn show_returns(&self) -> bool {
        self.show_returns
    }

    pub fn toggle_returns(&mut self) {
        self.show_returns = !self.show_returns;
        self.restart_paging();
    }

    /// Returns true when the capacity actually changed.
    pub fn set_cards_per_page(&mut self, cards: usize) -> bool {
        let cards = cards.max(1);
        if cards == self.cards_per_page {
            return false;
        }
        self.cards_per_page = cards;
        self.restart_paging();
        true
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pager.next();
        if moved {
            self.clear_selection();
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pager.prev();
        if moved {
            self.clear_selection();
        }
        moved
    }

    /// Auto-rotation step; a no-op while everything fits on one page.
    pub fn rotate_page(&mut self) -> bool {
        if !self.pager.rotates() {
            return false;
        }
        self.pager.rotate();
        self.clear_selection();
        true
    }

    fn restart_paging(&mut self) {
        self.pager.reset(self.page_count());
        self.clear_selection();
    }

    pub fn current_time(&self) -> NaiveDateTime {
        self.current_time
    }

    pub fn set_time(&mut self, now: NaiveDateTime) {
        self.current_time = now;
    }

    pub fn store(&self) -> &str {
        self.stores.get(self.store).map(String::as_str).unwrap_or_default()
    }

    pub fn stores(&self) -> &[String] {
        &self.stores
    }

    pub fn store_index(&self) -> usize {
        self.store
    }

    /// Store choice is cosmetic: it does not change which orders are shown.
    pub fn select_store(&mut self, index: usize) -> bool {
        if index >= self.stores.len() {
            return false;
        }
        self.store = index;
        true
    }

    pub fn next_store(&mut self) {
        if !self.stores.is_empty() {
            self.store = (self.store + 1) % self.stores.len();
        }
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    pub fn selected_card(&self) -> Option<usize> {
        self.selected_card
    }

    pub fn select_next_card(&mut self) {
        let on_page = self.current_page_orders().len();
        if on_page == 0 {
            self.clear_selection();
            return;
        }
        self.selected_card = Some(match self.selected_card {
            Some(i) => (i + 1) % on_page,
            None => 0,
        });
    }

    pub fn toggle_detail(&mut self) {
        if self.selected_card.is_none() {
            self.select_next_card();
        }
        self.detail_open = self.selected_card.is_some() && !self.detail_open;
    }

    pub fn detail(&self) -> Option<(Order, OrderDetail)> {
        if !self.detail_open {
            return None;
        }
        let index = self.selected_card?;
        let order = self.current_page_orders().get(index).map(|o| (*o).clone())?;
        let detail = OrderDetail::for_order(&order);
        Some((order, detail))
    }

    fn clear_selection(&mut self) {
        self.selected_card = None;
        self.detail_open = false;
    }

    fn clamp_selection(&mut self) {
        if let Some(i) = self.selected_card {
            if i >= self.current_page_orders().len() {
                self.clear_selection();
            }
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let visible_count = self.visible_orders().len();
        BoardSnapshot {
            order_count: self.orders.len(),
            visible_count,
            page: self.pager.current(),
            total_pages: self.pager.total(),
            cards_per_page: self.cards_per_page,
            page_orders: self.current_page_orders().into_iter().cloned().collect(),
            selected_statuses: self.selected_statuses(),
            show_returns: self.show_returns,
            store: self.store().to_string(),
            settings_open: self.settings_open,
            time: self.current_time,
        }
    }
}
