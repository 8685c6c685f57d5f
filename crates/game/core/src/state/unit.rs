use strum::{Display, EnumIter, IntoStaticStr};

use super::{Position, ResourceKind, UnitId};

/// Behaviour state of an AI-controlled unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AiState {
    #[default]
    Exploring,
    SeekingResources,
    EngagingEnemy,
    Fleeing,
    Healing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Player,
    Enemy,
}

/// Consumables carried by a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub ammo: u32,
    pub medkits: u32,
}

impl Resources {
    pub const fn new(ammo: u32, medkits: u32) -> Self {
        Self { ammo, medkits }
    }

    pub fn count(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Medkit => self.medkits,
            ResourceKind::Ammo => self.ammo,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Medkit => self.medkits = self.medkits.saturating_add(amount),
            ResourceKind::Ammo => self.ammo = self.ammo.saturating_add(amount),
        }
    }
}

/// A combatant on the grid, either the player or an enemy.
///
/// # Invariants
///
/// - `hp <= max_hp` and `max_hp > 0`
/// - `hp == 0` means the unit is dead and ignored by perception and movement
/// - `target_enemy` is a weak reference by id; the referenced unit may be
///   dead or removed, which callers treat as "needs re-evaluation"
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub resources: Resources,
    pub detection_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: AiState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_enemy: Option<UnitId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_resource: Option<Position>,
}

impl Unit {
    pub fn player(position: Position, max_hp: u32, detection_range: u32) -> Self {
        Self::new(UnitId::PLAYER, UnitKind::Player, position, max_hp, detection_range)
    }

    pub fn enemy(id: UnitId, position: Position, max_hp: u32, detection_range: u32) -> Self {
        Self::new(id, UnitKind::Enemy, position, max_hp, detection_range)
    }

    fn new(
        id: UnitId,
        kind: UnitKind,
        position: Position,
        max_hp: u32,
        detection_range: u32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            hp: max_hp,
            max_hp,
            resources: Resources::default(),
            detection_range,
            state: AiState::Exploring,
            target_enemy: None,
            target_resource: None,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn with_resources(mut self, ammo: u32, medkits: u32) -> Self {
        self.resources = Resources::new(ammo, medkits);
        self
    }

    pub fn with_state(mut self, state: AiState) -> Self {
        self.state = state;
        self
    }

    pub fn with_target_enemy(mut self, target: UnitId) -> Self {
        self.target_enemy = Some(target);
        self
    }

    pub fn with_target_resource(mut self, target: Position) -> Self {
        self.target_resource = Some(target);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, UnitKind::Player)
    }

    /// Current hp as a fraction of `max_hp`; `0.0` when `max_hp` is zero.
    pub fn health_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    pub fn clear_targets(&mut self) {
        self.target_enemy = None;
        self.target_resource = None;
    }
}
