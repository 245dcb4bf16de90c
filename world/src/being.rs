use serde::{Deserialize, Serialize};

use crate::{
    entity::check_ids, parquet::check_parquet, Category, Definition, Header,
    Id, Kind, Result,
};

/// Default behavior pattern of a being.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    #[default]
    Stationary,
    Wander,
    Approach,
    Flee,
    Swarm,
    Follow,
    Chase,
    /// Controlled by the player.
    Player,
}

/// Fields shared by every kind of being.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BeingBase {
    native_biome: Id,
    pub primary_behavior: Behavior,
    /// Parquets the being keeps away from.
    avoids: Vec<Id>,
    /// Parquets the being moves towards.
    seeks: Vec<Id>,
}

impl BeingBase {
    pub fn native_biome(&self) -> Id {
        self.native_biome
    }

    pub fn avoids(&self) -> &[Id] {
        &self.avoids
    }

    pub fn seeks(&self) -> &[Id] {
        &self.seeks
    }

    fn validate(&self) -> Result<()> {
        Category::Biome.check(self.native_biome)?;
        for &id in self.avoids.iter().chain(&self.seeks) {
            check_parquet(id)?;
        }
        Ok(())
    }
}

macro_rules! being_kind {
    ($kind:ident) => {
        impl $kind {
            pub fn being(&self) -> &BeingBase {
                &self.being
            }

            pub fn with_native_biome(
                mut self,
                biome: impl Into<Id>,
            ) -> Result<Self> {
                self.being.native_biome = Category::Biome.check(biome.into())?;
                Ok(self)
            }

            pub fn with_behavior(mut self, behavior: Behavior) -> Self {
                self.being.primary_behavior = behavior;
                self
            }

            /// Add parquets to avoid, fails on ids that aren't parquets.
            pub fn avoiding(
                mut self,
                ids: impl IntoIterator<Item = Id>,
            ) -> Result<Self> {
                for id in ids {
                    self.being.avoids.push(check_parquet(id)?);
                }
                Ok(self)
            }

            /// Add parquets to seek, fails on ids that aren't parquets.
            pub fn seeking(
                mut self,
                ids: impl IntoIterator<Item = Id>,
            ) -> Result<Self> {
                for id in ids {
                    self.being.seeks.push(check_parquet(id)?);
                }
                Ok(self)
            }
        }

        impl Definition for $kind {
            fn header(&self) -> &Header {
                &self.header
            }

            fn validate(&self) -> Result<()> {
                self.header.validate(Self::CATEGORY)?;
                self.being.validate()?;
                self.validate_fields()
            }
        }
    };
}

/// Animal or other simple creature.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Critter {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    being: BeingBase,
}

being_kind!(Critter);

impl Critter {
    pub fn new(header: Header) -> Result<Self> {
        let ret = Critter {
            header,
            being: Default::default(),
        };
        ret.validate()?;
        Ok(ret)
    }

    fn validate_fields(&self) -> Result<()> {
        Ok(())
    }
}

/// Non-player character.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Npc {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    being: BeingBase,
    #[serde(default)]
    pub pronoun: String,
    /// Identifier tying the character to the story script.
    #[serde(default)]
    pub story_character_id: String,
    /// Quests the character can hand out.
    #[serde(default)]
    quests: Vec<Id>,
}

being_kind!(Npc);

impl Npc {
    pub fn new(header: Header) -> Result<Self> {
        let ret = Npc {
            header,
            being: Default::default(),
            pronoun: Default::default(),
            story_character_id: Default::default(),
            quests: Default::default(),
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_quests(
        mut self,
        ids: impl IntoIterator<Item = Id>,
    ) -> Result<Self> {
        for id in ids {
            self.quests.push(Category::Quest.check(id)?);
        }
        Ok(self)
    }

    pub fn quests(&self) -> &[Id] {
        &self.quests
    }

    fn validate_fields(&self) -> Result<()> {
        check_ids(Category::Quest, &self.quests)
    }
}

/// Character the player can take control of.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlayerCharacter {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    being: BeingBase,
    #[serde(default)]
    pub pronoun: String,
    #[serde(default)]
    pub story_character_id: String,
    /// Items the character starts with.
    #[serde(default)]
    inventory: Vec<Id>,
}

being_kind!(PlayerCharacter);

impl PlayerCharacter {
    pub fn new(header: Header) -> Result<Self> {
        let ret = PlayerCharacter {
            header,
            being: BeingBase {
                primary_behavior: Behavior::Player,
                ..Default::default()
            },
            pronoun: Default::default(),
            story_character_id: Default::default(),
            inventory: Default::default(),
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_inventory(
        mut self,
        ids: impl IntoIterator<Item = Id>,
    ) -> Result<Self> {
        for id in ids {
            self.inventory.push(Category::Item.check(id)?);
        }
        Ok(self)
    }

    pub fn inventory(&self) -> &[Id] {
        &self.inventory
    }

    fn validate_fields(&self) -> Result<()> {
        check_ids(Category::Item, &self.inventory)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[test]
    fn beings_validate_references() {
        let fox = Critter::new(Header::new(10_001, "Fox"))
            .unwrap()
            .with_native_biome(100_001)
            .unwrap()
            .seeking([Id::new(60_001)])
            .unwrap();
        assert_eq!(fox.being().native_biome(), Id::new(100_001));
        assert_eq!(fox.being().seeks(), &[Id::new(60_001)]);

        assert!(fox.clone().with_native_biome(30_001).is_err());
        assert!(fox.avoiding([Id::new(110_001)]).is_err());
    }

    #[test]
    fn category_ranges() {
        assert!(Critter::new(Header::new(20_001, "Mayor")).is_err());
        assert!(Npc::new(Header::new(20_001, "Mayor")).is_ok());
        assert!(PlayerCharacter::new(Header::new(1, "Ana")).is_ok());
        assert!(matches!(
            PlayerCharacter::new(Header::new(10_000, "Ana")),
            Err(Error::IdOutOfRange {
                category: Category::Player,
                ..
            })
        ));
    }

    #[test]
    fn npc_and_player_lists() {
        let npc = Npc::new(Header::new(20_001, "Mayor")).unwrap();
        assert!(npc.clone().with_quests([Id::new(90_001)]).is_ok());
        assert!(npc.with_quests([Id::new(80_001)]).is_err());

        let pc = PlayerCharacter::new(Header::new(1, "Ana")).unwrap();
        assert_eq!(pc.being().primary_behavior, Behavior::Player);
        assert!(pc.clone().with_inventory([Id::new(110_005)]).is_ok());
        assert!(pc.with_inventory([Id::new(30_001)]).is_err());
    }

    #[test]
    fn loading_rechecks_references() {
        let npc: Npc = serde_json::from_str(
            r#"{ "id": 20001, "name": "Mayor", "quests": [30001] }"#,
        )
        .unwrap();
        assert!(npc.validate().is_err());
    }
}
