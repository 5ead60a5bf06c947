use chrono::NaiveDateTime;

use super::order::{Order, OrderStatus};

/// Source of orders arriving on the board.
pub trait OrderFeed: Send + 'static {
    /// Produces the next order with a status drawn from `statuses`.
    /// Returns `None` when `statuses` is empty.
    fn next_order(&mut self, statuses: &[OrderStatus]) -> Option<Order>;

    fn seed(&mut self, count: usize, statuses: &[OrderStatus]) -> Vec<Order> {
        (0..count)
            .map_while(|_| self.next_order(statuses))
            .collect()
    }
}

/// Wall clock as shown in the header and footer.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}
