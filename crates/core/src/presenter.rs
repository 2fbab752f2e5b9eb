//! Presenter contract

use crate::item::Item;

/// Renders a sequence of items to text
pub trait Presenter {
    fn render(&self, items: &[&Item]) -> String;
}
