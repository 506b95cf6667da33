use crate::auction::{Item, ItemId, ItemIdRef};
use crate::validation::{self, InvalidArgument};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("item already listed: {0}")]
    DuplicateItem(ItemId),
    #[error(transparent)]
    Invalid(#[from] InvalidArgument),
}

/// The registry of items up for auction
pub trait Catalog {
    fn add(&self, item: Item) -> Result<(), CatalogError>;
    fn find(&self, name: ItemIdRef<'_>) -> Option<Item>;
    fn items(&self) -> Vec<Item>;
}

pub type SharedCatalog = Arc<dyn Catalog + Send + Sync + 'static>;

/// Items kept in insertion order
///
/// Lookups scan the whole list, which is fine for the tens of items an
/// auction holds.
#[derive(Default)]
pub struct InMemoryCatalog {
    items: RwLock<Vec<Item>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> SharedCatalog {
        Arc::new(Self::new())
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let catalog = Self::new();
        for item in items {
            catalog.add(item)?;
        }
        Ok(catalog)
    }
}

impl Catalog for InMemoryCatalog {
    fn add(&self, item: Item) -> Result<(), CatalogError> {
        validation::validate_item(&item)?;

        let mut items = self.items.write();
        if items.contains(&item) {
            return Err(CatalogError::DuplicateItem(item.name().to_owned()));
        }
        items.push(item);
        Ok(())
    }

    fn find(&self, name: ItemIdRef<'_>) -> Option<Item> {
        self.items.read().iter().find(|i| i.name() == name).cloned()
    }

    fn items(&self) -> Vec<Item> {
        self.items.read().clone()
    }
}
