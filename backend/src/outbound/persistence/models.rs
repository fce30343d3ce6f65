//! Internal Diesel row structs for the `items` table.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::items;

/// Row struct for reading from the items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub category: String,
    pub purchased: i32,
}

/// Insertable struct for creating new item records.
///
/// `purchased` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub name: &'a str,
    pub quantity: i32,
    pub category: &'a str,
}
