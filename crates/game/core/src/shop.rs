//! Town merchant: buying and selling for gold.
//!
//! Both trades are atomic. On any error neither the shop stock, the
//! warrior's purse nor the inventory change.

use crate::entity::Warrior;
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::{InventoryError, Placement};
use crate::item::Item;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    pub item: Item,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quantity: u32,
    /// Never runs out; `quantity` is ignored.
    #[cfg_attr(feature = "serde", serde(default))]
    pub infinite: bool,
}

impl ShopItem {
    pub fn price(&self) -> u32 {
        self.item.gold_value
    }

    pub fn in_stock(&self) -> bool {
        self.infinite || self.quantity > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    #[error("the shop has no item at position {index}")]
    NoSuchItem { index: usize },

    #[error("{item} is sold out")]
    OutOfStock { item: String },

    #[error("not enough gold: {item} costs {price}, you have {gold}")]
    NotEnoughGold { item: String, price: u32, gold: u32 },

    #[error("{item} is worthless to the merchant")]
    Unsellable { item: String },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for ShopError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSuchItem { .. } | Self::Unsellable { .. } => ErrorSeverity::Validation,
            Self::OutOfStock { .. } | Self::NotEnoughGold { .. } => ErrorSeverity::Recoverable,
            Self::Inventory(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchItem { .. } => "SHOP_NO_SUCH_ITEM",
            Self::OutOfStock { .. } => "SHOP_OUT_OF_STOCK",
            Self::NotEnoughGold { .. } => "SHOP_NOT_ENOUGH_GOLD",
            Self::Unsellable { .. } => "SHOP_UNSELLABLE",
            Self::Inventory(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Shop {
    stock: Vec<ShopItem>,
}

impl Shop {
    pub fn new(stock: Vec<ShopItem>) -> Self {
        Self { stock }
    }

    pub fn stock(&self) -> &[ShopItem] {
        &self.stock
    }

    /// Buys the stock entry at `index`. Returns the name of the purchase and
    /// where it landed in the inventory.
    pub fn buy(&mut self, index: usize, warrior: &mut Warrior) -> Result<(String, Placement), ShopError> {
        let entry = self
            .stock
            .get(index)
            .ok_or(ShopError::NoSuchItem { index })?;
        if !entry.in_stock() {
            return Err(ShopError::OutOfStock {
                item: entry.item.name.clone(),
            });
        }
        let price = entry.price();
        if warrior.gold < price {
            return Err(ShopError::NotEnoughGold {
                item: entry.item.name.clone(),
                price,
                gold: warrior.gold,
            });
        }

        let item = entry.item.clone();
        let name = item.name.clone();
        let placement = warrior.add_item(item)?;

        warrior.gold -= price;
        let entry = &mut self.stock[index];
        if !entry.infinite {
            entry.quantity -= 1;
        }
        Ok((name, placement))
    }

    /// Sells the backpack item at `backpack_index` for half its value and
    /// adds it to the shop's stock. Returns the gold received.
    pub fn sell(&mut self, backpack_index: usize, warrior: &mut Warrior) -> Result<(String, u32), ShopError> {
        let capacity = warrior.inventory().capacity();
        let item = warrior
            .inventory()
            .backpack()
            .get(backpack_index)
            .ok_or(InventoryError::SlotOutOfRange {
                index: backpack_index,
                capacity,
            })?
            .item()
            .ok_or(InventoryError::EmptySlot {
                index: backpack_index,
            })?;
        let price = item.sell_price();
        if price == 0 {
            return Err(ShopError::Unsellable {
                item: item.name.clone(),
            });
        }

        let item = warrior.take_from_backpack(backpack_index)?;
        let name = item.name.clone();
        warrior.gold = warrior.gold.saturating_add(price);
        self.restock(item);
        Ok((name, price))
    }

    fn restock(&mut self, item: Item) {
        match self.stock.iter_mut().find(|entry| entry.item == item) {
            Some(entry) if !entry.infinite => entry.quantity += 1,
            Some(_) => {}
            None => self.stock.push(ShopItem {
                item,
                quantity: 1,
                infinite: false,
            }),
        }
    }
}
