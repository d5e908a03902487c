//! Purchasable perks: level-indexed cost/bonus curves bound to one player stat.

use super::player::Player;
use crate::core::constants::{
    CRIT_DAMAGE_PERK, CRIT_RATE_PERK, DAMAGE_BONUS_PERK, DEFAULT_BONUS_SCALE,
    DEFAULT_PRICE_SCALE, LOOT_BONUS_PERK, MAX_CRITICAL_RATE, MAX_PERK_LEVEL,
};
use crate::core::economy::{perk_bonus, perk_price};
use serde::{Deserialize, Serialize};

/// The player stat a perk modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerkStat {
    CriticalRate,
    CriticalDamage,
    LootBonus,
    BaseDamage,
}

impl PerkStat {
    /// All perks in shop order.
    pub fn all() -> [PerkStat; 4] {
        [
            PerkStat::CriticalRate,
            PerkStat::CriticalDamage,
            PerkStat::LootBonus,
            PerkStat::BaseDamage,
        ]
    }

    pub fn shop_index(self) -> usize {
        match self {
            PerkStat::CriticalRate => 0,
            PerkStat::CriticalDamage => 1,
            PerkStat::LootBonus => 2,
            PerkStat::BaseDamage => 3,
        }
    }

    /// Short code shown in the shop, e.g. "CR".
    pub fn code(self) -> &'static str {
        self.defaults().0
    }

    /// Key under which this perk is stored in the save document.
    pub fn save_key(self) -> &'static str {
        match self {
            PerkStat::CriticalRate => "cr",
            PerkStat::CriticalDamage => "cd",
            PerkStat::LootBonus => "ld",
            PerkStat::BaseDamage => "db",
        }
    }

    /// (name, base_price, base_bonus)
    fn defaults(self) -> (&'static str, u64, u32) {
        match self {
            PerkStat::CriticalRate => CRIT_RATE_PERK,
            PerkStat::CriticalDamage => CRIT_DAMAGE_PERK,
            PerkStat::LootBonus => LOOT_BONUS_PERK,
            PerkStat::BaseDamage => DAMAGE_BONUS_PERK,
        }
    }

    /// Current value of the bound stat on `player`.
    pub fn read(self, player: &Player) -> u32 {
        match self {
            PerkStat::CriticalRate => player.critical_rate,
            PerkStat::CriticalDamage => player.critical_damage,
            PerkStat::LootBonus => player.loot_bonus,
            PerkStat::BaseDamage => player.base_damage,
        }
    }
}

/// One upgradeable modifier. Price and bonus are pure functions of `level`.
#[derive(Debug, Clone, PartialEq)]
pub struct Perk {
    pub name: String,
    pub base_price: u64,
    pub base_bonus: u32,
    pub price_scale: f64,
    pub bonus_scale: f64,
    pub level: u32,
    pub stat: PerkStat,
}

impl Perk {
    pub fn new(stat: PerkStat) -> Self {
        let (name, base_price, base_bonus) = stat.defaults();
        Self {
            name: name.to_string(),
            base_price,
            base_bonus,
            price_scale: DEFAULT_PRICE_SCALE,
            bonus_scale: DEFAULT_BONUS_SCALE,
            level: 0,
            stat,
        }
    }

    pub fn price(&self) -> u64 {
        perk_price(self.base_price, self.price_scale, self.level)
    }

    pub fn bonus(&self) -> u32 {
        perk_bonus(self.base_bonus, self.bonus_scale, self.level)
    }

    pub fn upgrade(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    /// True when the next level cannot be granted in full: the level cap is
    /// reached, the bound stat would overflow, or critical rate would pass 100.
    pub fn is_maxed_for(&self, player: &Player) -> bool {
        if self.level >= MAX_PERK_LEVEL {
            return true;
        }
        match self.stat.read(player).checked_add(self.bonus()) {
            None => true,
            Some(value) => self.stat == PerkStat::CriticalRate && value > MAX_CRITICAL_RATE,
        }
    }

    /// Grants the current bonus to the bound stat and advances the level.
    ///
    /// Does not touch `player.loot`; paying is the caller's half of a purchase.
    pub fn apply(&mut self, player: &mut Player) {
        let bonus = self.bonus();
        match self.stat {
            PerkStat::CriticalRate => {
                player.critical_rate = player
                    .critical_rate
                    .saturating_add(bonus)
                    .min(MAX_CRITICAL_RATE);
            }
            PerkStat::CriticalDamage => {
                player.critical_damage = player.critical_damage.saturating_add(bonus)
            }
            PerkStat::LootBonus => player.loot_bonus = player.loot_bonus.saturating_add(bonus),
            PerkStat::BaseDamage => player.base_damage = player.base_damage.saturating_add(bonus),
        }
        self.upgrade();
    }
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased {
        perk: PerkStat,
        price: u64,
        bonus: u32,
        new_level: u32,
    },
    /// Not enough loot; nothing changed.
    InsufficientFunds { price: u64, loot: u64 },
    /// The bound stat is capped; nothing changed.
    Maxed,
}

/// The fixed set of four perks.
#[derive(Debug, Clone, PartialEq)]
pub struct Perks {
    pub crit_rate: Perk,
    pub crit_damage: Perk,
    pub loot_bonus: Perk,
    pub damage_bonus: Perk,
}

impl Default for Perks {
    fn default() -> Self {
        Self {
            crit_rate: Perk::new(PerkStat::CriticalRate),
            crit_damage: Perk::new(PerkStat::CriticalDamage),
            loot_bonus: Perk::new(PerkStat::LootBonus),
            damage_bonus: Perk::new(PerkStat::BaseDamage),
        }
    }
}

impl Perks {
    pub fn get(&self, stat: PerkStat) -> &Perk {
        match stat {
            PerkStat::CriticalRate => &self.crit_rate,
            PerkStat::CriticalDamage => &self.crit_damage,
            PerkStat::LootBonus => &self.loot_bonus,
            PerkStat::BaseDamage => &self.damage_bonus,
        }
    }

    pub fn get_mut(&mut self, stat: PerkStat) -> &mut Perk {
        match stat {
            PerkStat::CriticalRate => &mut self.crit_rate,
            PerkStat::CriticalDamage => &mut self.crit_damage,
            PerkStat::LootBonus => &mut self.loot_bonus,
            PerkStat::BaseDamage => &mut self.damage_bonus,
        }
    }

    /// Perks in shop order.
    pub fn iter(&self) -> impl Iterator<Item = &Perk> {
        PerkStat::all().into_iter().map(move |stat| self.get(stat))
    }

    /// Buys one level of `stat`: pay the price and apply, or change nothing.
    pub fn buy(&mut self, stat: PerkStat, player: &mut Player) -> PurchaseOutcome {
        let perk = self.get_mut(stat);
        if perk.is_maxed_for(player) {
            return PurchaseOutcome::Maxed;
        }

        let price = perk.price();
        if player.loot < price {
            return PurchaseOutcome::InsufficientFunds {
                price,
                loot: player.loot,
            };
        }

        let bonus = perk.bonus();
        player.loot -= price;
        perk.apply(player);

        PurchaseOutcome::Purchased {
            perk: stat,
            price,
            bonus,
            new_level: perk.level,
        }
    }

    /// The cheapest perk the player can afford right now, if any.
    pub fn cheapest_affordable(&self, player: &Player) -> Option<PerkStat> {
        self.iter()
            .filter(|perk| !perk.is_maxed_for(player) && perk.price() <= player.loot)
            .min_by_key(|perk| perk.price())
            .map(|perk| perk.stat)
    }
}
