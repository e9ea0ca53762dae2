//! Item definitions.
//!
//! Items are plain values: inventories, chests, the shop and the ground move
//! them around by value, and nothing mutates an item after creation.

use std::fmt;

/// Broad category of an item, which decides where it may be equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Misc,
}

impl ItemType {
    /// Equipment slot accepting this type, if any.
    pub fn equip_slot(self) -> Option<EquipSlot> {
        match self {
            ItemType::Weapon => Some(EquipSlot::Weapon),
            ItemType::Armor => Some(EquipSlot::Armor),
            ItemType::Consumable | ItemType::Misc => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Flat stat bonuses granted while an item is equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemBonuses {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
}

impl ItemBonuses {
    pub const NONE: Self = Self {
        attack: 0,
        defense: 0,
        health: 0,
    };
}

/// Special behaviour attached to an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Consumed to open a portal back to town.
    TownPortal,
    /// Credited to the warrior's purse instead of the inventory.
    Gold(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub item_type: ItemType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: ItemBonuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold_value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<ItemEffect>,
}

impl Item {
    pub const TOWN_PORTAL: &'static str = "Town Portal";
    pub const TOWN_PORTAL_VALUE: u32 = 50;

    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            item_type,
            bonuses: ItemBonuses::NONE,
            gold_value: 0,
            effect: None,
        }
    }

    pub fn weapon(name: impl Into<String>, attack: u32, gold_value: u32) -> Self {
        Self::new(name, ItemType::Weapon)
            .with_bonuses(ItemBonuses {
                attack,
                ..ItemBonuses::NONE
            })
            .with_gold_value(gold_value)
            .with_description(format!("Deals {attack} extra damage"))
    }

    pub fn armor(name: impl Into<String>, defense: u32, gold_value: u32) -> Self {
        Self::new(name, ItemType::Armor)
            .with_bonuses(ItemBonuses {
                defense,
                ..ItemBonuses::NONE
            })
            .with_gold_value(gold_value)
            .with_description(format!("+{defense} defense"))
    }

    pub fn consumable(name: impl Into<String>, gold_value: u32) -> Self {
        Self::new(name, ItemType::Consumable).with_gold_value(gold_value)
    }

    pub fn misc(name: impl Into<String>, gold_value: u32) -> Self {
        Self::new(name, ItemType::Misc).with_gold_value(gold_value)
    }

    pub fn town_portal() -> Self {
        Self::new(Self::TOWN_PORTAL, ItemType::Consumable)
            .with_description("Opens a portal back to town")
            .with_gold_value(Self::TOWN_PORTAL_VALUE)
            .with_effect(ItemEffect::TownPortal)
    }

    pub fn gold_pile(amount: u32) -> Self {
        Self::new(format!("{amount} Gold"), ItemType::Misc)
            .with_description("A pile of gold coins")
            .with_effect(ItemEffect::Gold(amount))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_bonuses(mut self, bonuses: ItemBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_gold_value(mut self, gold_value: u32) -> Self {
        self.gold_value = gold_value;
        self
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn is_town_portal(&self) -> bool {
        self.effect == Some(ItemEffect::TownPortal)
    }

    /// Coin amount if this item is a gold pile.
    pub fn gold_amount(&self) -> Option<u32> {
        match self.effect {
            Some(ItemEffect::Gold(amount)) => Some(amount),
            _ => None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.item_type.equip_slot().is_some()
    }

    /// What a merchant pays for the item: half its value, rounded down.
    pub fn sell_price(&self) -> u32 {
        self.gold_value / 2
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_weapons_and_armor_have_slots() {
        assert_eq!(ItemType::Weapon.equip_slot(), Some(EquipSlot::Weapon));
        assert_eq!(ItemType::Armor.equip_slot(), Some(EquipSlot::Armor));
        assert_eq!(ItemType::Consumable.equip_slot(), None);
        assert_eq!(ItemType::Misc.equip_slot(), None);
    }

    #[test]
    fn town_portal_is_consumable_with_effect() {
        let portal = Item::town_portal();
        assert_eq!(portal.item_type, ItemType::Consumable);
        assert!(portal.is_town_portal());
        assert_eq!(portal.name, Item::TOWN_PORTAL);
    }

    #[test]
    fn gold_pile_reports_amount() {
        let gold = Item::gold_pile(42);
        assert_eq!(gold.gold_amount(), Some(42));
        assert_eq!(gold.name, "42 Gold");
        assert_eq!(Item::weapon("Iron Sword", 5, 50).gold_amount(), None);
    }

    #[test]
    fn sell_price_is_half_value() {
        assert_eq!(Item::weapon("Steel Sword", 10, 101).sell_price(), 50);
        assert_eq!(Item::misc("Pebble", 0).sell_price(), 0);
    }
}
