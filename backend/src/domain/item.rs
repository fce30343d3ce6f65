//! Shopping-list item model.
//!
//! `Item` is what the store returns; `NewItem` is the validated payload the
//! create path accepts. Quantities are always at least one and the purchased
//! flag is a plain `bool` here; the 0/1 column encoding stays in the
//! persistence adapter.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::category::{Category, color_class_for};

/// Validation errors raised while building item values from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    InvalidId,
    EmptyName,
    EmptyQuantity,
    InvalidQuantity,
    EmptyCategory,
    UnknownCategory,
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "item id must be a positive integer"),
            Self::EmptyName => write!(f, "item name must not be empty"),
            Self::EmptyQuantity => write!(f, "quantity must not be empty"),
            Self::InvalidQuantity => write!(f, "quantity must be a positive integer"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::UnknownCategory => write!(f, "category is not in the registry"),
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(i32);

impl ItemId {
    /// Wrap a store identifier, rejecting zero and negative values.
    ///
    /// # Examples
    /// ```
    /// use shopping_list::domain::ItemId;
    ///
    /// assert_eq!(ItemId::new(7).expect("positive id").get(), 7);
    /// assert!(ItemId::new(0).is_err());
    /// ```
    pub fn new(value: i32) -> Result<Self, ItemValidationError> {
        if value < 1 {
            return Err(ItemValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Raw identifier as stored in the `items.id` column.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for ItemId {
    type Err = ItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i32>()
            .map_err(|_| ItemValidationError::InvalidId)?;
        Self::new(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Validate and construct a name, trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ItemValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Item quantity; never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// Smallest quantity an item can hold.
    pub const MIN: Self = Self(1);

    /// Validate a raw quantity.
    pub fn new(value: i32) -> Result<Self, ItemValidationError> {
        if value < Self::MIN.0 {
            return Err(ItemValidationError::InvalidQuantity);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// Quantity after one step in the given direction, clamped at [`Quantity::MIN`].
    pub fn adjusted(self, adjustment: QuantityAdjustment) -> Self {
        match adjustment {
            QuantityAdjustment::Increase => Self(self.0.saturating_add(1)),
            QuantityAdjustment::Decrease => Self(self.0.saturating_sub(1).max(Self::MIN.0)),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl FromStr for Quantity {
    type Err = ItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ItemValidationError::EmptyQuantity);
        }
        let value = trimmed
            .parse::<i32>()
            .map_err(|_| ItemValidationError::InvalidQuantity)?;
        Self::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a single quantity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAdjustment {
    Increase,
    Decrease,
}

impl QuantityAdjustment {
    /// Parse the `action` query value. Unknown verbs yield `None`.
    ///
    /// # Examples
    /// ```
    /// use shopping_list::domain::QuantityAdjustment;
    ///
    /// assert_eq!(
    ///     QuantityAdjustment::from_action("decrease"),
    ///     Some(QuantityAdjustment::Decrease)
    /// );
    /// assert_eq!(QuantityAdjustment::from_action("double"), None);
    /// ```
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

/// A stored shopping-list item.
///
/// `category` keeps the raw column text so rows holding a label outside the
/// registry still load; they render with the fallback display class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: Quantity,
    pub category: String,
    pub purchased: bool,
}

impl Item {
    /// Display-class token for this item's category.
    pub fn color_class(&self) -> &'static str {
        color_class_for(&self.category)
    }
}

/// Validated payload for the create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: ItemName,
    pub quantity: Quantity,
    pub category: Category,
}

impl NewItem {
    /// Validate raw form values.
    ///
    /// Checks run in field order so the first offending field is reported.
    ///
    /// # Examples
    /// ```
    /// use shopping_list::domain::{Category, ItemValidationError, NewItem};
    ///
    /// let item = NewItem::try_from_parts("Leite", "2", "Laticínios").expect("valid item");
    /// assert_eq!(item.category, Category::Dairy);
    ///
    /// let err = NewItem::try_from_parts("Leite", "2", "Brinquedos").expect_err("unknown");
    /// assert_eq!(err, ItemValidationError::UnknownCategory);
    /// ```
    pub fn try_from_parts(
        name: &str,
        quantity: &str,
        category: &str,
    ) -> Result<Self, ItemValidationError> {
        let name = ItemName::new(name)?;
        let quantity = quantity.parse::<Quantity>()?;
        if category.is_empty() {
            return Err(ItemValidationError::EmptyCategory);
        }
        let category =
            Category::from_label(category).ok_or(ItemValidationError::UnknownCategory)?;
        Ok(Self {
            name,
            quantity,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Validation rules for item values.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 42 ", Ok(42))]
    #[case("0", Err(ItemValidationError::InvalidId))]
    #[case("-3", Err(ItemValidationError::InvalidId))]
    #[case("abc", Err(ItemValidationError::InvalidId))]
    #[case("", Err(ItemValidationError::InvalidId))]
    fn item_id_parsing(#[case] raw: &str, #[case] expected: Result<i32, ItemValidationError>) {
        assert_eq!(raw.parse::<ItemId>().map(ItemId::get), expected);
    }

    #[rstest]
    #[case("", ItemValidationError::EmptyQuantity)]
    #[case("   ", ItemValidationError::EmptyQuantity)]
    #[case("0", ItemValidationError::InvalidQuantity)]
    #[case("-1", ItemValidationError::InvalidQuantity)]
    #[case("1.5", ItemValidationError::InvalidQuantity)]
    #[case("dois", ItemValidationError::InvalidQuantity)]
    fn quantity_rejects_falsy_and_non_positive_values(
        #[case] raw: &str,
        #[case] expected: ItemValidationError,
    ) {
        assert_eq!(raw.parse::<Quantity>(), Err(expected));
    }

    #[rstest]
    fn decrease_clamps_at_one() {
        let mut quantity = Quantity::new(2).expect("valid quantity");
        for _ in 0..5 {
            quantity = quantity.adjusted(QuantityAdjustment::Decrease);
            assert!(quantity >= Quantity::MIN);
        }
        assert_eq!(quantity, Quantity::MIN);
    }

    #[rstest]
    fn increase_adds_one() {
        let quantity = Quantity::MIN.adjusted(QuantityAdjustment::Increase);
        assert_eq!(quantity.get(), 2);
    }

    #[rstest]
    fn name_is_trimmed() {
        let name = ItemName::new("  Pão francês ").expect("valid name");
        assert_eq!(name.as_str(), "Pão francês");
    }

    #[rstest]
    #[case("", "1", "Frutas", ItemValidationError::EmptyName)]
    #[case("  ", "1", "Frutas", ItemValidationError::EmptyName)]
    #[case("Maçã", "", "Frutas", ItemValidationError::EmptyQuantity)]
    #[case("Maçã", "1", "", ItemValidationError::EmptyCategory)]
    #[case("Maçã", "1", "Eletrônicos", ItemValidationError::UnknownCategory)]
    fn new_item_rejects_invalid_parts(
        #[case] name: &str,
        #[case] quantity: &str,
        #[case] category: &str,
        #[case] expected: ItemValidationError,
    ) {
        assert_eq!(
            NewItem::try_from_parts(name, quantity, category),
            Err(expected)
        );
    }

    #[rstest]
    fn new_item_accepts_registry_category() {
        let item = NewItem::try_from_parts("Milk", "2", "Laticínios").expect("valid item");
        assert_eq!(item.name.as_str(), "Milk");
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.category, Category::Dairy);
    }

    #[rstest]
    #[case("increase", Some(QuantityAdjustment::Increase))]
    #[case("decrease", Some(QuantityAdjustment::Decrease))]
    #[case("INCREASE", None)]
    #[case("", None)]
    fn adjustment_parsing(#[case] action: &str, #[case] expected: Option<QuantityAdjustment>) {
        assert_eq!(QuantityAdjustment::from_action(action), expected);
    }

    #[rstest]
    fn item_colour_class_falls_back_for_unknown_category() {
        let item = Item {
            id: ItemId::new(1).expect("valid id"),
            name: "Vela".to_owned(),
            quantity: Quantity::MIN,
            category: "Decoração".to_owned(),
            purchased: false,
        };
        assert_eq!(item.color_class(), "cat-outros");
    }
}
