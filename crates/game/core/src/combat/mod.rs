//! Combat resolution.
//!
//! Damage math lives in [`damage`] as pure functions; [`result`] applies an
//! attack between two entities, gating on cooldown, range and liveness.
//!
//! There is no turn-order priority: the warrior and a monster may both land
//! hits on each other within the same tick.

pub mod damage;
pub mod result;

pub use damage::{MIN_DAMAGE, apply_damage, calculate_damage};
pub use result::{AttackOutcome, AttackReport, resolve_attack, resolve_strike};
