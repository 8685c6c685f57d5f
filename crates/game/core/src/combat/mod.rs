//! Attack resolution and knockback.
//!
//! Melee hits an adjacent unit; ranged fire travels along a cardinal
//! direction and strikes the first living unit in its path, whoever that is.
//! A surviving target is pushed one tile away from the attacker.

mod attack;
mod knockback;

pub use attack::{AttackReport, AttackStyle, ShotOutcome, apply_damage, melee_attack, shoot};
pub use knockback::{
    KnockbackFailure, KnockbackResult, apply_knockback, calculate_knockback_destination,
};
