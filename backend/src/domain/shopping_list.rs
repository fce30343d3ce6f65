//! Read model handed to the list renderer.

use serde::Serialize;

use super::category::category_labels;
use super::item::Item;

/// An item paired with its display-class token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedItem {
    #[serde(flatten)]
    pub item: Item,
    pub color_class: &'static str,
}

impl From<Item> for ListedItem {
    fn from(item: Item) -> Self {
        let color_class = item.color_class();
        Self { item, color_class }
    }
}

/// Partitioned shopping list plus the category registry for the create form.
///
/// ## Invariants
/// - `pending` holds only items with `purchased == false`, `purchased` only
///   items with `purchased == true`.
/// - Each partition keeps the order the items were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub pending: Vec<ListedItem>,
    pub purchased: Vec<ListedItem>,
    pub categories: Vec<&'static str>,
}

impl ShoppingList {
    /// Partition already-ordered items into pending and purchased lists.
    ///
    /// # Examples
    /// ```
    /// use shopping_list::domain::{Item, ItemId, Quantity, ShoppingList};
    ///
    /// let item = Item {
    ///     id: ItemId::new(1).expect("valid id"),
    ///     name: "Leite".to_owned(),
    ///     quantity: Quantity::MIN,
    ///     category: "Laticínios".to_owned(),
    ///     purchased: false,
    /// };
    /// let list = ShoppingList::from_items(vec![item]);
    /// assert_eq!(list.pending_count(), 1);
    /// assert_eq!(list.purchased_count(), 0);
    /// ```
    pub fn from_items(items: Vec<Item>) -> Self {
        let (purchased, pending): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|item| item.purchased);
        Self {
            pending: pending.into_iter().map(ListedItem::from).collect(),
            purchased: purchased.into_iter().map(ListedItem::from).collect(),
            categories: category_labels(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn purchased_count(&self) -> usize {
        self.purchased.len()
    }
}
