//! Slot-based inventory: one weapon slot, one armor slot and a fixed backpack.
//!
//! Items move between slots by value. Apart from the explicit removal
//! operations (`take_from_backpack`, `take_first`, `consume_town_portal`) no
//! operation creates or destroys an item, and a failed operation leaves the
//! inventory untouched.

use crate::error::{ErrorSeverity, GameError};
use crate::item::{EquipSlot, Item};

/// A single storage cell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Item),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(item) => Some(item),
        }
    }

    /// Empties the slot, returning its item.
    pub fn take(&mut self) -> Option<Item> {
        match std::mem::take(self) {
            Slot::Empty => None,
            Slot::Occupied(item) => Some(item),
        }
    }

    /// Stores `item`, returning the previous occupant.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        match std::mem::replace(self, Slot::Occupied(item)) {
            Slot::Empty => None,
            Slot::Occupied(previous) => Some(previous),
        }
    }
}

impl From<Option<Item>> for Slot {
    fn from(item: Option<Item>) -> Self {
        item.map_or(Slot::Empty, Slot::Occupied)
    }
}

/// Where `add_item` placed an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Equipped(EquipSlot),
    Backpack(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// Nowhere to put the item; it is handed back to the caller.
    #[error("inventory is full, cannot store {}", .0.name)]
    InventoryFull(Item),

    #[error("no free backpack slot to unequip into")]
    BackpackFull,

    #[error("{item} cannot be equipped")]
    TypeMismatch { item: String },

    #[error("backpack slot {index} is empty")]
    EmptySlot { index: usize },

    #[error("nothing equipped in the {slot} slot")]
    NothingEquipped { slot: EquipSlot },

    #[error("backpack slot {index} is out of range (capacity {capacity})")]
    SlotOutOfRange { index: usize, capacity: usize },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InventoryFull(_) | Self::BackpackFull => ErrorSeverity::Recoverable,
            Self::TypeMismatch { .. }
            | Self::EmptySlot { .. }
            | Self::NothingEquipped { .. }
            | Self::SlotOutOfRange { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InventoryFull(_) => "INVENTORY_FULL",
            Self::BackpackFull => "INVENTORY_BACKPACK_FULL",
            Self::TypeMismatch { .. } => "INVENTORY_TYPE_MISMATCH",
            Self::EmptySlot { .. } => "INVENTORY_EMPTY_SLOT",
            Self::NothingEquipped { .. } => "INVENTORY_NOTHING_EQUIPPED",
            Self::SlotOutOfRange { .. } => "INVENTORY_SLOT_OUT_OF_RANGE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    weapon: Slot,
    armor: Slot,
    backpack: Vec<Slot>,
}

impl Inventory {
    pub fn new(backpack_slots: usize) -> Self {
        Self {
            weapon: Slot::Empty,
            armor: Slot::Empty,
            backpack: vec![Slot::Empty; backpack_slots],
        }
    }

    pub fn capacity(&self) -> usize {
        self.backpack.len()
    }

    pub fn backpack(&self) -> &[Slot] {
        &self.backpack
    }

    pub fn backpack_item(&self, index: usize) -> Option<&Item> {
        self.backpack.get(index).and_then(Slot::item)
    }

    pub fn equipped(&self, slot: EquipSlot) -> Option<&Item> {
        self.equipment(slot).item()
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.item()
    }

    pub fn armor(&self) -> Option<&Item> {
        self.armor.item()
    }

    fn equipment(&self, slot: EquipSlot) -> &Slot {
        match slot {
            EquipSlot::Weapon => &self.weapon,
            EquipSlot::Armor => &self.armor,
        }
    }

    fn equipment_mut(&mut self, slot: EquipSlot) -> &mut Slot {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    fn first_free_backpack_slot(&self) -> Option<usize> {
        self.backpack.iter().position(Slot::is_empty)
    }

    /// Stores an item, auto-equipping it when its matching slot is empty.
    ///
    /// Otherwise the item goes to the first empty backpack slot. When neither is
    /// available the item comes back inside [`InventoryError::InventoryFull`].
    pub fn add_item(&mut self, item: Item) -> Result<Placement, InventoryError> {
        if let Some(slot) = item.item_type.equip_slot() {
            let equipment = self.equipment_mut(slot);
            if equipment.is_empty() {
                equipment.replace(item);
                return Ok(Placement::Equipped(slot));
            }
        }

        match self.first_free_backpack_slot() {
            Some(index) => {
                self.backpack[index].replace(item);
                Ok(Placement::Backpack(index))
            }
            None => Err(InventoryError::InventoryFull(item)),
        }
    }

    /// Equips the backpack item at `index`, swapping the previously equipped
    /// item (if any) into the vacated backpack slot.
    pub fn equip_from_backpack(&mut self, index: usize) -> Result<EquipSlot, InventoryError> {
        let capacity = self.capacity();
        let item = self
            .backpack
            .get(index)
            .ok_or(InventoryError::SlotOutOfRange { index, capacity })?
            .item()
            .ok_or(InventoryError::EmptySlot { index })?;
        let slot = item
            .item_type
            .equip_slot()
            .ok_or_else(|| InventoryError::TypeMismatch {
                item: item.name.clone(),
            })?;

        let Some(item) = self.backpack[index].take() else {
            return Err(InventoryError::EmptySlot { index });
        };
        if let Some(previous) = self.equipment_mut(slot).replace(item) {
            self.backpack[index].replace(previous);
        }
        Ok(slot)
    }

    /// Moves the equipped item into the first free backpack slot.
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<usize, InventoryError> {
        if self.equipment(slot).is_empty() {
            return Err(InventoryError::NothingEquipped { slot });
        }
        let index = self
            .first_free_backpack_slot()
            .ok_or(InventoryError::BackpackFull)?;
        if let Some(item) = self.equipment_mut(slot).take() {
            self.backpack[index].replace(item);
        }
        Ok(index)
    }

    /// Removes and returns the backpack item at `index`.
    pub fn take_from_backpack(&mut self, index: usize) -> Result<Item, InventoryError> {
        let capacity = self.capacity();
        self.backpack
            .get_mut(index)
            .ok_or(InventoryError::SlotOutOfRange { index, capacity })?
            .take()
            .ok_or(InventoryError::EmptySlot { index })
    }

    /// Removes the first backpack item matching `predicate`.
    pub fn take_first(&mut self, predicate: impl Fn(&Item) -> bool) -> Option<Item> {
        self.backpack
            .iter_mut()
            .find(|slot| slot.item().is_some_and(&predicate))
            .and_then(Slot::take)
    }

    pub fn count_where(&self, predicate: impl Fn(&Item) -> bool) -> usize {
        self.backpack
            .iter()
            .filter_map(Slot::item)
            .filter(|item| predicate(item))
            .count()
    }

    pub fn count_town_portals(&self) -> usize {
        self.count_where(Item::is_town_portal)
    }

    pub fn consume_town_portal(&mut self) -> Option<Item> {
        self.take_first(Item::is_town_portal)
    }

    pub fn has_space(&self) -> bool {
        self.first_free_backpack_slot().is_some()
    }

    pub fn free_backpack_slots(&self) -> usize {
        self.backpack.iter().filter(|slot| slot.is_empty()).count()
    }

    /// Total number of items held, equipment included.
    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    /// Equipped items first, then backpack items in slot order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor]
            .into_iter()
            .chain(self.backpack.iter())
            .filter_map(Slot::item)
    }

    fn equipment_items(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor].into_iter().filter_map(Slot::item)
    }

    pub fn total_attack_bonus(&self) -> u32 {
        self.equipment_items().map(|item| item.bonuses.attack).sum()
    }

    pub fn total_defense_bonus(&self) -> u32 {
        self.equipment_items().map(|item| item.bonuses.defense).sum()
    }

    pub fn total_health_bonus(&self) -> u32 {
        self.equipment_items().map(|item| item.bonuses.health).sum()
    }
}
