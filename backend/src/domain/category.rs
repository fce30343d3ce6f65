//! Category registry for shopping-list items.
//!
//! The registry is a fixed, ordered list of labels. The same value backs both
//! create-path validation and the display-class lookup used when rendering,
//! so the two can never drift apart.

use std::fmt;

use serde::Serialize;

/// Display-class token used for any label outside the registry.
pub const DEFAULT_COLOR_CLASS: &str = "cat-outros";

/// A category label accepted by the create path.
///
/// Variants are declared in registry order; [`Category::ALL`] preserves it.
///
/// # Examples
/// ```
/// use shopping_list::domain::Category;
///
/// let category = Category::from_label("Laticínios").expect("known label");
/// assert_eq!(category.color_class(), "cat-laticinios");
/// assert_eq!(Category::from_label("Brinquedos"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Category {
    Fruits,
    Vegetables,
    Dairy,
    MeatAndPoultry,
    Seafood,
    Bakery,
    Frozen,
    Pantry,
    Beverages,
    Cleaning,
    PersonalCare,
    Other,
}

impl Category {
    /// Every category in registry order.
    pub const ALL: [Self; 12] = [
        Self::Fruits,
        Self::Vegetables,
        Self::Dairy,
        Self::MeatAndPoultry,
        Self::Seafood,
        Self::Bakery,
        Self::Frozen,
        Self::Pantry,
        Self::Beverages,
        Self::Cleaning,
        Self::PersonalCare,
        Self::Other,
    ];

    /// Label stored in the `items.category` column and shown to users.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fruits => "Frutas",
            Self::Vegetables => "Verduras e Legumes",
            Self::Dairy => "Laticínios",
            Self::MeatAndPoultry => "Carnes e Aves",
            Self::Seafood => "Peixes e Frutos do Mar",
            Self::Bakery => "Padaria",
            Self::Frozen => "Congelados",
            Self::Pantry => "Mercearia (Secos)",
            Self::Beverages => "Bebidas",
            Self::Cleaning => "Limpeza",
            Self::PersonalCare => "Higiene Pessoal",
            Self::Other => "Outros",
        }
    }

    /// Display-class token for this category.
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Fruits => "cat-frutas",
            Self::Vegetables => "cat-verduras",
            Self::Dairy => "cat-laticinios",
            Self::MeatAndPoultry => "cat-carnes",
            Self::Seafood => "cat-peixes",
            Self::Bakery => "cat-padaria",
            Self::Frozen => "cat-congelados",
            Self::Pantry => "cat-mercearia",
            Self::Beverages => "cat-bebidas",
            Self::Cleaning => "cat-limpeza",
            Self::PersonalCare => "cat-higiene",
            Self::Other => DEFAULT_COLOR_CLASS,
        }
    }

    /// Look up a category by its exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.label()
    }
}

/// Return `true` when `label` is one of the registry labels.
pub fn is_valid_category(label: &str) -> bool {
    Category::from_label(label).is_some()
}

/// Map any label to its display-class token.
///
/// Unknown and empty labels map to [`DEFAULT_COLOR_CLASS`].
pub fn color_class_for(label: &str) -> &'static str {
    Category::from_label(label).map_or(DEFAULT_COLOR_CLASS, Category::color_class)
}

/// Registry labels in display order, as used by the creation form.
pub fn category_labels() -> Vec<&'static str> {
    Category::ALL.into_iter().map(Category::label).collect()
}
