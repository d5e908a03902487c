//! Balance numbers and fixed geometry, kept in one place.

// Tick and timing
pub const TICKS_PER_SECOND: u32 = 60;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// Player starting stats
pub const STARTING_LOOT: u64 = 0;
pub const STARTING_LOOT_BONUS: u32 = 0;
pub const STARTING_BASE_DAMAGE: u32 = 1;
pub const STARTING_CRITICAL_DAMAGE: u32 = 1;
pub const STARTING_CRITICAL_RATE: u32 = 0;

/// Fixed offset added to the constructed base damage.
pub const BASE_DAMAGE_OFFSET: u32 = 5;
pub const MAX_CRITICAL_RATE: u32 = 100;
/// Highest perk level a save may hold; purchases stop here too.
pub const MAX_PERK_LEVEL: u32 = 1_000;

// Perk curves: (name, base_price, base_bonus)
pub const DEFAULT_PRICE_SCALE: f64 = 1.2;
pub const DEFAULT_BONUS_SCALE: f64 = 1.0;
pub const CRIT_RATE_PERK: (&str, u64, u32) = ("CR", 100, 1);
pub const CRIT_DAMAGE_PERK: (&str, u64, u32) = ("CD", 50, 5);
pub const LOOT_BONUS_PERK: (&str, u64, u32) = ("LB", 100, 2);
pub const DAMAGE_BONUS_PERK: (&str, u64, u32) = ("DB", 50, 5);

// Enemy health growth
pub const ENEMY_BASE_HEALTH: u64 = 10;
pub const BASE_HEALTH_INCREASE: u64 = 5;
pub const BASE_HEALTH_GROWTH_RATE: f64 = 0.2;
pub const BASE_HEALTH_GROWTH_FACTOR: f64 = 1.0;

/// Number of cosmetic sprite tiers; tier = enemy_count % ENEMY_TIERS.
pub const ENEMY_TIERS: u32 = 7;

// Loot variance: loot = floor(sqrt(base_health) * U(min, max))
pub const LOOT_VARIANCE_MIN: f64 = 0.8;
pub const LOOT_VARIANCE_MAX: f64 = 1.2;

// Animation playback
pub const ANIMATION_STEP: f64 = 0.01;
pub const ANIMATION_SPEED_INITIAL: f64 = 0.1;
pub const ANIMATION_MIN_SPEED: f64 = 0.02;
pub const ANIMATION_MAX_SPEED: f64 = 0.2;
pub const ANIMATION_THRESHOLD_FRAMES: usize = 5;

// Click feedback squash
pub const SHRINK_DURATION: f64 = 0.1;
pub const GROW_DURATION: f64 = 0.1;

// Screen geometry
pub const DISPLAY_WIDTH: i32 = 800;
pub const DISPLAY_HEIGHT: i32 = 500;
pub const ENEMY_SIZE: (i32, i32) = (250, 250);

// Shop panel
pub const SHOP_BOX_WIDTH: i32 = 200;
pub const SHOP_BOX_MARGIN: i32 = 30;
pub const SHOP_BOX_Y: i32 = 50;
pub const SHOP_PERK_INSET_X: i32 = 20;
pub const SHOP_PERK_INSET_Y: i32 = 7;
pub const SHOP_PERK_SPACING: i32 = 100;
pub const BUY_BUTTON_OFFSET: (i32, i32) = (50, 65);
pub const BUY_BUTTON_SIZE: (i32, i32) = (60, 20);

// Save file
pub const SAVE_FILE_NAME: &str = "save.json";
pub const SAVE_VERSION: u32 = 1;
