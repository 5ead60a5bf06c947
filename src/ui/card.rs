use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::domain::order::{Order, OrderNumber, OrderStatus};

/// One order on screen.
///
/// A card starts hidden and becomes visible once its entrance delay has
/// passed. Dropping the card before then simply discards the pending reveal.
#[derive(Debug, Clone)]
pub struct OrderCard {
    pub id: Uuid,
    pub number: OrderNumber,
    pub status: OrderStatus,
    pub is_return: bool,
    reveal_at: Instant,
    visible: bool,
}

impl OrderCard {
    pub fn mount(order: &Order, delay: Duration, now: Instant) -> Self {
        Self {
            id: order.id,
            number: order.number,
            status: order.status,
            is_return: order.is_return,
            reveal_at: now + delay,
            visible: delay.is_zero(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pending reveal time, if the card is still hidden.
    pub fn reveal_at(&self) -> Option<Instant> {
        (!self.visible).then_some(self.reveal_at)
    }

    /// Returns true if the card became visible on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.visible || now < self.reveal_at {
            return false;
        }
        self.visible = true;
        true
    }
}

/// Cards of the page currently on screen, keyed by order id.
#[derive(Debug, Default)]
pub struct CardGrid {
    cards: Vec<OrderCard>,
}

impl CardGrid {
    /// Brings the grid in line with `orders`.
    ///
    /// Cards whose order is still on the page keep their state; new cards are
    /// mounted with a delay staggered by their position.
    pub fn sync(&mut self, orders: &[&Order], stagger: Duration, now: Instant) {
        let mut previous = std::mem::take(&mut self.cards);
        self.cards = orders
            .iter()
            .enumerate()
            .map(|(index, order)| {
                match previous.iter().position(|c| c.id == order.id) {
                    Some(pos) => previous.swap_remove(pos),
                    None => OrderCard::mount(order, stagger * index as u32, now),
                }
            })
            .collect();
    }

    pub fn tick(&mut self, now: Instant) -> usize {
        self.cards.iter_mut().filter_map(|c| c.tick(now).then_some(())).count()
    }

    pub fn next_reveal(&self) -> Option<Instant> {
        self.cards.iter().filter_map(OrderCard::reveal_at).min()
    }

    pub fn cards(&self) -> &[OrderCard] {
        &self.cards
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGGER: Duration = Duration::from_millis(10);

    #[test]
    fn card_reveals_after_delay() {
        let now = Instant::now();
        let order = Order::new(1001, OrderStatus::Ready, false);
        let mut card = OrderCard::mount(&order, Duration::from_millis(30), now);

        assert!(!card.is_visible());
        assert!(!card.tick(now + Duration::from_millis(29)));
        assert!(card.tick(now + Duration::from_millis(30)));
        assert!(card.is_visible());
        assert_eq!(card.reveal_at(), None);
    }

    #[test]
    fn zero_delay_is_visible_immediately() {
        let order = Order::new(1001, OrderStatus::Ready, false);
        let card = OrderCard::mount(&order, Duration::ZERO, Instant::now());
        assert!(card.is_visible());
    }

    #[test]
    fn grid_staggers_new_cards() {
        let now = Instant::now();
        let a = Order::new(1, OrderStatus::Ready, false);
        let b = Order::new(2, OrderStatus::Ready, false);
        let c = Order::new(3, OrderStatus::Ready, false);
        let mut grid = CardGrid::default();
        grid.sync(&[&a, &b, &c], STAGGER, now);

        assert_eq!(grid.next_reveal(), Some(now + STAGGER));
        assert_eq!(grid.tick(now + STAGGER), 1);
        assert_eq!(grid.tick(now + STAGGER * 2), 1);
        assert_eq!(grid.next_reveal(), None);
    }

    #[test]
    fn surviving_cards_keep_their_state() {
        let now = Instant::now();
        let a = Order::new(1, OrderStatus::Ready, false);
        let b = Order::new(2, OrderStatus::Ready, false);
        let mut grid = CardGrid::default();
        grid.sync(&[&a, &b], STAGGER, now);
        grid.tick(now + STAGGER);

        let fresh = Order::new(0, OrderStatus::Problem, false);
        grid.sync(&[&fresh, &a, &b], STAGGER, now + STAGGER);

        let visible: Vec<bool> = grid.cards().iter().map(OrderCard::is_visible).collect();
        assert_eq!(visible, vec![true, true, true]);
    }

    #[test]
    fn dropped_cards_leave_no_pending_reveal() {
        let now = Instant::now();
        let a = Order::new(1, OrderStatus::Ready, false);
        let b = Order::new(2, OrderStatus::Ready, false);
        let mut grid = CardGrid::default();
        grid.sync(&[&a, &b], STAGGER, now);

        grid.sync(&[&a], STAGGER, now);
        assert_eq!(grid.cards().len(), 1);
        assert_eq!(grid.next_reveal(), None);
    }
}
