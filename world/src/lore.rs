use serde::{Deserialize, Serialize};

use crate::{Definition, Header, Kind, Result, Tag};

/// Rough altitude band of a biome.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Elevation {
    Below,
    #[default]
    Level,
    Above,
}

/// Themed environment a region can turn into when it holds enough parquets
/// tagged for it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Biome {
    #[serde(flatten)]
    header: Header,
    /// Progression tier, higher tiers are found later in the game.
    #[serde(default)]
    pub tier: i32,
    #[serde(default)]
    pub elevation: Elevation,
    #[serde(default)]
    pub is_liquid_based: bool,
    /// Parquet `adds-to-biome` tag that counts towards this biome.
    #[serde(default)]
    pub parquet_criteria: Tag,
    /// Item tags a player needs to safely enter.
    #[serde(default)]
    pub entry_requirements: Vec<Tag>,
}

impl Biome {
    pub fn new(
        header: Header,
        parquet_criteria: impl Into<Tag>,
    ) -> Result<Self> {
        let ret = Biome {
            header,
            tier: 0,
            elevation: Elevation::Level,
            is_liquid_based: false,
            parquet_criteria: parquet_criteria.into(),
            entry_requirements: Default::default(),
        };
        ret.validate()?;
        Ok(ret)
    }
}

impl Definition for Biome {
    fn header(&self) -> &Header {
        &self.header
    }

    fn validate(&self) -> Result<()> {
        self.header.validate(Self::CATEGORY)
    }
}

/// Task a character can give to the player.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Quest {
    #[serde(flatten)]
    header: Header,
    /// Tags of the things the player must bring or build.
    #[serde(default)]
    pub objective_tags: Vec<Tag>,
}

impl Quest {
    pub fn new<T: Into<Tag>>(
        header: Header,
        objectives: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        let ret = Quest {
            header,
            objective_tags: objectives.into_iter().map(Into::into).collect(),
        };
        ret.validate()?;
        Ok(ret)
    }
}

impl Definition for Quest {
    fn header(&self) -> &Header {
        &self.header
    }

    fn validate(&self) -> Result<()> {
        self.header.validate(Self::CATEGORY)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lore() {
        let forest = Biome::new(Header::new(100_001, "Forest"), "forest")
            .unwrap();
        assert_eq!(forest.parquet_criteria, Tag::new("forest"));
        assert!(Biome::new(Header::new(90_001, "Forest"), "forest").is_err());

        let q = Quest::new(Header::new(90_001, "Fetch"), ["berry"]).unwrap();
        assert_eq!(q.objective_tags, vec![Tag::new("berry")]);
        assert!(Quest::new(Header::new(100_001, "Fetch"), ["berry"]).is_err());
    }
}
