use crate::error::{ErrorSeverity, GameError};

/// Tunable parameters for enemy decision making and combat.
///
/// A single immutable value is injected into the runtime at construction.
/// Ratios (`*_threshold`, `*_chance`) are fractions in `[0.0, 1.0]`; ranges and
/// radii are measured in tiles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Units below this hp fraction flee from visible hostiles.
    pub flee_health_threshold: f64,
    /// Units below this hp fraction heal when no hostile is visible.
    pub heal_priority_threshold: f64,
    /// Ammo below this count is a critical need.
    pub ammo_seek_threshold: u32,
    /// Radius scanned for resources when nothing is urgent.
    pub proactive_scan_radius: u32,
    /// Radius scanned for resources that satisfy a critical need.
    pub critical_scan_radius: u32,

    pub ranged_range: u32,
    pub ranged_damage: u32,
    pub melee_damage: u32,

    /// Chance to hold position instead of stepping into the target's firing line.
    pub risk_aversion_chance: f64,

    pub heal_amount: u32,
    pub medkit_pickup_amount: u32,
    pub ammo_pickup_amount: u32,

    /// Chance an exploring unit inside the zone heads for the zone centre.
    pub explore_aggression_chance: f64,
    /// Chance an exploring unit inside the zone wanders randomly.
    pub explore_random_move_chance: f64,

    pub spawn: SpawnConfig,
}

/// Bounds used when enemies are created at round start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnConfig {
    pub min_hp: u32,
    pub max_hp: u32,
    pub min_detection_range: u32,
    pub max_detection_range: u32,
    pub min_ammo: u32,
    pub max_ammo: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_HEALTH_THRESHOLD: f64 = 0.25;
    pub const DEFAULT_HEAL_PRIORITY_THRESHOLD: f64 = 0.5;
    pub const DEFAULT_AMMO_SEEK_THRESHOLD: u32 = 2;
    pub const DEFAULT_PROACTIVE_SCAN_RADIUS: u32 = 3;
    pub const DEFAULT_CRITICAL_SCAN_RADIUS: u32 = 8;
    pub const DEFAULT_RANGED_RANGE: u32 = 6;
    pub const DEFAULT_RANGED_DAMAGE: u32 = 4;
    pub const DEFAULT_MELEE_DAMAGE: u32 = 3;
    pub const DEFAULT_RISK_AVERSION_CHANCE: f64 = 0.3;
    pub const DEFAULT_HEAL_AMOUNT: u32 = 5;
    pub const DEFAULT_MEDKIT_PICKUP_AMOUNT: u32 = 1;
    pub const DEFAULT_AMMO_PICKUP_AMOUNT: u32 = 3;
    pub const DEFAULT_EXPLORE_AGGRESSION_CHANCE: f64 = 0.4;
    pub const DEFAULT_EXPLORE_RANDOM_MOVE_CHANCE: f64 = 0.4;

    /// Upper bound for resource scan radii.
    pub const MAX_SCAN_RADIUS: u32 = 1024;

    pub fn new() -> Self {
        Self {
            flee_health_threshold: Self::DEFAULT_FLEE_HEALTH_THRESHOLD,
            heal_priority_threshold: Self::DEFAULT_HEAL_PRIORITY_THRESHOLD,
            ammo_seek_threshold: Self::DEFAULT_AMMO_SEEK_THRESHOLD,
            proactive_scan_radius: Self::DEFAULT_PROACTIVE_SCAN_RADIUS,
            critical_scan_radius: Self::DEFAULT_CRITICAL_SCAN_RADIUS,
            ranged_range: Self::DEFAULT_RANGED_RANGE,
            ranged_damage: Self::DEFAULT_RANGED_DAMAGE,
            melee_damage: Self::DEFAULT_MELEE_DAMAGE,
            risk_aversion_chance: Self::DEFAULT_RISK_AVERSION_CHANCE,
            heal_amount: Self::DEFAULT_HEAL_AMOUNT,
            medkit_pickup_amount: Self::DEFAULT_MEDKIT_PICKUP_AMOUNT,
            ammo_pickup_amount: Self::DEFAULT_AMMO_PICKUP_AMOUNT,
            explore_aggression_chance: Self::DEFAULT_EXPLORE_AGGRESSION_CHANCE,
            explore_random_move_chance: Self::DEFAULT_EXPLORE_RANDOM_MOVE_CHANCE,
            spawn: SpawnConfig::default(),
        }
    }

    /// Checks that ratios are fractions, scan radii are bounded and spawn
    /// bounds are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("flee_health_threshold", self.flee_health_threshold),
            ("heal_priority_threshold", self.heal_priority_threshold),
            ("risk_aversion_chance", self.risk_aversion_chance),
            ("explore_aggression_chance", self.explore_aggression_chance),
            ("explore_random_move_chance", self.explore_random_move_chance),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { field, value });
            }
        }

        let explore_total = self.explore_aggression_chance + self.explore_random_move_chance;
        if explore_total > 1.0 {
            return Err(ConfigError::ExploreChancesExceedOne {
                total: explore_total,
            });
        }

        if self.ranged_range == 0 {
            return Err(ConfigError::ZeroRangedRange);
        }

        let radii = [
            ("proactive_scan_radius", self.proactive_scan_radius),
            ("critical_scan_radius", self.critical_scan_radius),
        ];
        for (field, value) in radii {
            if value > Self::MAX_SCAN_RADIUS {
                return Err(ConfigError::ScanRadiusTooLarge {
                    field,
                    value,
                    max: Self::MAX_SCAN_RADIUS,
                });
            }
        }

        self.spawn.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnConfig {
    pub const DEFAULT_MIN_HP: u32 = 10;
    pub const DEFAULT_MAX_HP: u32 = 20;
    pub const DEFAULT_MIN_DETECTION_RANGE: u32 = 4;
    pub const DEFAULT_MAX_DETECTION_RANGE: u32 = 8;
    pub const DEFAULT_MIN_AMMO: u32 = 0;
    pub const DEFAULT_MAX_AMMO: u32 = 5;

    fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [
            ("hp", self.min_hp, self.max_hp),
            (
                "detection_range",
                self.min_detection_range,
                self.max_detection_range,
            ),
            ("ammo", self.min_ammo, self.max_ammo),
        ];
        for (field, min, max) in bounds {
            if min > max {
                return Err(ConfigError::InvertedSpawnBounds { field, min, max });
            }
        }
        if self.min_hp == 0 {
            return Err(ConfigError::ZeroSpawnHp);
        }
        Ok(())
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_hp: Self::DEFAULT_MIN_HP,
            max_hp: Self::DEFAULT_MAX_HP,
            min_detection_range: Self::DEFAULT_MIN_DETECTION_RANGE,
            max_detection_range: Self::DEFAULT_MAX_DETECTION_RANGE,
            min_ammo: Self::DEFAULT_MIN_AMMO,
            max_ammo: Self::DEFAULT_MAX_AMMO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [0.0, 1.0], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("exploration chances sum to {total}, which exceeds 1.0")]
    ExploreChancesExceedOne { total: f64 },

    #[error("ranged_range must be at least 1")]
    ZeroRangedRange,

    #[error("{field} is {value}, above the limit of {max}")]
    ScanRadiusTooLarge {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("spawn bounds for {field} are inverted ({min} > {max})")]
    InvertedSpawnBounds {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("spawned units must start with at least 1 hp")]
    ZeroSpawnHp,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FractionOutOfRange { .. } => "CONFIG_FRACTION_OUT_OF_RANGE",
            Self::ExploreChancesExceedOne { .. } => "CONFIG_EXPLORE_CHANCES",
            Self::ZeroRangedRange => "CONFIG_ZERO_RANGED_RANGE",
            Self::ScanRadiusTooLarge { .. } => "CONFIG_SCAN_RADIUS_TOO_LARGE",
            Self::InvertedSpawnBounds { .. } => "CONFIG_INVERTED_SPAWN_BOUNDS",
            Self::ZeroSpawnHp => "CONFIG_ZERO_SPAWN_HP",
        }
    }
}
