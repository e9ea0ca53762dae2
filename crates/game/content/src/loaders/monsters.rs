//! Monster template loader.

use std::path::Path;

use game_core::{MonsterKind, MonsterTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Monster catalog structure for RON files.
///
/// Kinds absent from the file use [`MonsterKind::default_template`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterCatalog {
    #[serde(default)]
    pub monsters: Vec<MonsterTemplate>,
}

impl MonsterCatalog {
    pub fn template(&self, kind: MonsterKind) -> MonsterTemplate {
        self.monsters
            .iter()
            .find(|template| template.kind == kind)
            .cloned()
            .unwrap_or_else(|| kind.default_template())
    }
}

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        for template in &catalog.monsters {
            if template.max_health == 0 {
                anyhow::bail!("Monster {} has zero max_health", template.kind);
            }
            if template.attack_range_tiles > template.chase_range_tiles {
                anyhow::bail!(
                    "Monster {} attacks from {} tiles but only chases within {}",
                    template.kind,
                    template.attack_range_tiles,
                    template.chase_range_tiles
                );
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::BrainKind;

    #[test]
    fn overrides_and_fallbacks() {
        let catalog = MonsterLoader::parse(
            r#"(monsters: [
                (kind: pooka, max_health: 10, attack: 3, chase_range_tiles: 2,
                 attack_range_tiles: 1, xp_value: 5, brain: Stationary),
            ])"#,
        )
        .unwrap();

        let pooka = catalog.template(MonsterKind::Pooka);
        assert_eq!(pooka.max_health, 10);
        assert_eq!(pooka.attack_cooldown, MonsterTemplate::DEFAULT_ATTACK_COOLDOWN);
        assert_eq!(pooka.brain, BrainKind::Stationary);

        assert_eq!(
            catalog.template(MonsterKind::Dullahan),
            MonsterKind::Dullahan.default_template()
        );
    }

    #[test]
    fn attack_range_beyond_chase_range_is_rejected() {
        let result = MonsterLoader::parse(
            r#"(monsters: [
                (kind: banshee, max_health: 10, attack: 3, chase_range_tiles: 1,
                 attack_range_tiles: 3, xp_value: 5),
            ])"#,
        );
        assert!(result.is_err());
    }
}
