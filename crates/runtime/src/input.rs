//! Player intents.
//!
//! Front ends translate whatever devices they read into [`Intent`]s; the
//! runtime never sees raw input. A small text grammar is provided for
//! line-based front ends and tests.
use std::str::FromStr;

use game_core::{Direction, SkillId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Attack,
    /// Attack with the selected active skill if it is ready.
    SkillAttack,
    ToggleInventory,
    /// Open the shop when standing next to it.
    Interact,
    UseTownPortal,
    ToggleSkills,
    LearnSkill(SkillId),
    /// `None` returns to basic attacks.
    SelectSkill(Option<SkillId>),
    EquipFromBackpack(usize),
    Buy(usize),
    Sell(usize),
    CloseShop,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntentError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command} needs a slot number")]
    MissingIndex { command: String },
    #[error("invalid slot number: {0}")]
    BadIndex(String),
    #[error("{command} needs a skill name")]
    MissingSkill { command: String },
    #[error("unknown skill: {0}")]
    UnknownSkill(String),
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    /// Accepts `w/a/s/d`, `move <direction>`, a bare direction, `attack`,
    /// `strike`, `inventory`, `interact`, `portal`, `skills`,
    /// `learn <skill>`, `select <skill|none>`, `equip <n>`, `buy <n>`,
    /// `sell <n>`, `leave` and `restart`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or(ParseIntentError::Empty)?
            .to_ascii_lowercase();
        let argument = words.next();

        let index = |command: &str| -> Result<usize, ParseIntentError> {
            let raw = argument.ok_or_else(|| ParseIntentError::MissingIndex {
                command: command.to_string(),
            })?;
            raw.parse()
                .map_err(|_| ParseIntentError::BadIndex(raw.to_string()))
        };
        let skill = |command: &str| -> Result<SkillId, ParseIntentError> {
            let raw = argument.ok_or_else(|| ParseIntentError::MissingSkill {
                command: command.to_string(),
            })?;
            raw.parse()
                .map_err(|_| ParseIntentError::UnknownSkill(raw.to_string()))
        };

        let intent = match command.as_str() {
            "w" => Intent::Move(Direction::North),
            "a" => Intent::Move(Direction::West),
            "s" => Intent::Move(Direction::South),
            "d" => Intent::Move(Direction::East),
            "move" | "go" => {
                let raw = argument.unwrap_or_default();
                let direction = raw
                    .parse()
                    .map_err(|_| ParseIntentError::Unknown(line.trim().to_string()))?;
                Intent::Move(direction)
            }
            "f" | "attack" => Intent::Attack,
            "q" | "strike" => Intent::SkillAttack,
            "i" | "inventory" => Intent::ToggleInventory,
            "e" | "interact" => Intent::Interact,
            "t" | "portal" => Intent::UseTownPortal,
            "k" | "skills" => Intent::ToggleSkills,
            "learn" => Intent::LearnSkill(skill("learn")?),
            "select" => match argument {
                Some(raw) if raw.eq_ignore_ascii_case("none") => Intent::SelectSkill(None),
                _ => Intent::SelectSkill(Some(skill("select")?)),
            },
            "equip" => Intent::EquipFromBackpack(index("equip")?),
            "buy" => Intent::Buy(index("buy")?),
            "sell" => Intent::Sell(index("sell")?),
            "leave" | "close" => Intent::CloseShop,
            "r" | "restart" => Intent::Restart,
            other => match other.parse::<Direction>() {
                Ok(direction) => Intent::Move(direction),
                Err(_) => return Err(ParseIntentError::Unknown(line.trim().to_string())),
            },
        };
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movement_forms() {
        assert_eq!("w".parse(), Ok(Intent::Move(Direction::North)));
        assert_eq!("move East".parse(), Ok(Intent::Move(Direction::East)));
        assert_eq!("south".parse(), Ok(Intent::Move(Direction::South)));
    }

    #[test]
    fn parses_indexed_commands() {
        assert_eq!("buy 2".parse(), Ok(Intent::Buy(2)));
        assert_eq!("equip 0".parse(), Ok(Intent::EquipFromBackpack(0)));
        assert_eq!(
            "sell".parse::<Intent>(),
            Err(ParseIntentError::MissingIndex {
                command: "sell".into()
            })
        );
        assert_eq!(
            "sell x".parse::<Intent>(),
            Err(ParseIntentError::BadIndex("x".into()))
        );
    }

    #[test]
    fn parses_skill_commands() {
        assert_eq!("q".parse(), Ok(Intent::SkillAttack));
        assert_eq!(
            "learn power_strike".parse(),
            Ok(Intent::LearnSkill(SkillId::PowerStrike))
        );
        assert_eq!(
            "select Cleave".parse(),
            Ok(Intent::SelectSkill(Some(SkillId::Cleave)))
        );
        assert_eq!("select none".parse(), Ok(Intent::SelectSkill(None)));
        assert_eq!(
            "learn".parse::<Intent>(),
            Err(ParseIntentError::MissingSkill {
                command: "learn".into()
            })
        );
        assert_eq!(
            "learn juggling".parse::<Intent>(),
            Err(ParseIntentError::UnknownSkill("juggling".into()))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Intent>(), Err(ParseIntentError::Empty));
        assert!("dance".parse::<Intent>().is_err());
    }
}
