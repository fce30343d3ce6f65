//! Diesel table definition for the `items` table.
//!
//! Must match [`super::bootstrap::CREATE_ITEMS_TABLE`] exactly.

diesel::table! {
    /// Shopping-list items.
    ///
    /// `purchased` stores the flag as `0`/`1`; the adapter converts it to a
    /// `bool` before it reaches the domain.
    items (id) {
        /// Primary key assigned by the `SERIAL` sequence.
        id -> Int4,
        /// Item name as entered.
        name -> Text,
        /// Quantity, at least one.
        quantity -> Int4,
        /// Category label.
        category -> Text,
        /// Purchased flag as `0` or `1`.
        purchased -> Int4,
    }
}
