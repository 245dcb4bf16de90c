use derives::{DeserializeFlags, SerializeFlags};
use serde::{Deserialize, Serialize};

use crate::{
    entity::check_any, Category, Definition, Header, Id, Kind, Result, Tag,
};

/// Tool needed to modify or gather a parquet.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    #[default]
    None,
    Shovel,
    Pick,
    Axe,
    Hammer,
    Bucket,
}

/// What happens when a block is gathered.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GatheringEffect {
    #[default]
    None,
    /// Block turns into its equivalent item.
    Item,
    /// Block drops its collectible.
    Collectible,
}

/// What happens when a collectible is picked up.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CollectingEffect {
    #[default]
    None,
    Money,
    Experience,
    Health,
    Item,
}

bitflags::bitflags! {
    #[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash, SerializeFlags, DeserializeFlags)]
    pub struct BlockFlags: u8 {
        const FLAMMABLE = 1 << 0;

        /// Water, lava and the like. Liquid blocks never enclose a room.
        const LIQUID = 1 << 1;
    }
}

bitflags::bitflags! {
    #[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash, SerializeFlags, DeserializeFlags)]
    pub struct FurnishingFlags: u8 {
        /// Beings can stand on the furnishing's cell.
        const WALKABLE = 1 << 0;

        /// Door or similar, counts as a way into a room.
        const ENTRY = 1 << 1;

        /// Can stand in for a wall on a room's perimeter.
        const ENCLOSING = 1 << 2;

        const FLAMMABLE = 1 << 3;
    }
}

/// Fields shared by every parquet kind.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParquetBase {
    /// Item the parquet turns into when picked up.
    item: Id,
    adds_to_biome: Vec<Tag>,
    adds_to_room: Vec<Tag>,
}

impl ParquetBase {
    pub fn item(&self) -> Id {
        self.item
    }

    pub fn adds_to_biome(&self) -> &[Tag] {
        &self.adds_to_biome
    }

    pub fn adds_to_room(&self) -> &[Tag] {
        &self.adds_to_room
    }

    fn validate(&self) -> Result<()> {
        Category::Item.check(self.item)?;
        Ok(())
    }
}

macro_rules! parquet_kind {
    ($kind:ident) => {
        impl $kind {
            pub fn parquet(&self) -> &ParquetBase {
                &self.parquet
            }

            /// Set the equivalent item, fails if `item` is not an item id.
            pub fn with_item(mut self, item: impl Into<Id>) -> Result<Self> {
                self.parquet.item = Category::Item.check(item.into())?;
                Ok(self)
            }

            pub fn adding_to_biome<T: Into<Tag>>(
                mut self,
                tags: impl IntoIterator<Item = T>,
            ) -> Self {
                self.parquet
                    .adds_to_biome
                    .extend(tags.into_iter().map(Into::into));
                self
            }

            pub fn adding_to_room<T: Into<Tag>>(
                mut self,
                tags: impl IntoIterator<Item = T>,
            ) -> Self {
                self.parquet
                    .adds_to_room
                    .extend(tags.into_iter().map(Into::into));
                self
            }
        }

        impl Definition for $kind {
            fn header(&self) -> &Header {
                &self.header
            }

            fn validate(&self) -> Result<()> {
                self.header.validate(Self::CATEGORY)?;
                self.parquet.validate()?;
                self.validate_fields()
            }
        }
    };
}

/// Walkable ground layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Floor {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    parquet: ParquetBase,
    /// Tool that digs or refills a trench in this floor.
    #[serde(default = "Floor::default_mod_tool")]
    pub mod_tool: Tool,
    /// Name shown for the floor when it has been dug into a trench.
    #[serde(default = "Floor::default_trench_name")]
    pub trench_name: String,
}

parquet_kind!(Floor);

impl Floor {
    pub const DEFAULT_TRENCH_NAME: &'static str = "dark hole";

    pub fn new(header: Header) -> Result<Self> {
        let ret = Floor {
            header,
            parquet: Default::default(),
            mod_tool: Self::default_mod_tool(),
            trench_name: Self::default_trench_name(),
        };
        ret.validate()?;
        Ok(ret)
    }

    fn default_mod_tool() -> Tool {
        Tool::Shovel
    }

    fn default_trench_name() -> String {
        Self::DEFAULT_TRENCH_NAME.to_owned()
    }

    fn validate_fields(&self) -> Result<()> {
        Ok(())
    }
}

/// Solid or liquid layer on top of the floor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Block {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    parquet: ParquetBase,
    #[serde(default)]
    pub gather_tool: Tool,
    #[serde(default)]
    pub gather_effect: GatheringEffect,
    /// Collectible dropped when the block is gathered.
    #[serde(default)]
    collectible: Id,
    #[serde(default)]
    pub flags: BlockFlags,
    #[serde(default = "Block::default_toughness")]
    max_toughness: i32,
}

parquet_kind!(Block);

impl Block {
    pub const LOWEST_POSSIBLE_TOUGHNESS: i32 = 0;
    pub const DEFAULT_MAX_TOUGHNESS: i32 = 10;

    pub fn new(header: Header) -> Result<Self> {
        let ret = Block {
            header,
            parquet: Default::default(),
            gather_tool: Tool::None,
            gather_effect: GatheringEffect::None,
            collectible: Id::NONE,
            flags: BlockFlags::empty(),
            max_toughness: Self::DEFAULT_MAX_TOUGHNESS,
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_flags(mut self, flags: BlockFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_collectible(mut self, id: impl Into<Id>) -> Result<Self> {
        self.collectible = Category::Collectible.check(id.into())?;
        Ok(self)
    }

    /// Set the toughness a freshly placed block starts with, clamped to be
    /// at least `LOWEST_POSSIBLE_TOUGHNESS`.
    pub fn with_max_toughness(mut self, toughness: i32) -> Self {
        self.max_toughness = toughness.max(Self::LOWEST_POSSIBLE_TOUGHNESS);
        self
    }

    pub fn collectible(&self) -> Id {
        self.collectible
    }

    pub fn max_toughness(&self) -> i32 {
        self.max_toughness
    }

    pub fn is_flammable(&self) -> bool {
        self.flags.contains(BlockFlags::FLAMMABLE)
    }

    pub fn is_liquid(&self) -> bool {
        self.flags.contains(BlockFlags::LIQUID)
    }

    fn default_toughness() -> i32 {
        Self::DEFAULT_MAX_TOUGHNESS
    }

    fn validate_fields(&self) -> Result<()> {
        Category::Collectible.check(self.collectible)?;
        if self.max_toughness < Self::LOWEST_POSSIBLE_TOUGHNESS {
            return Err(crate::Error::Malformed(format!(
                "block {} has negative toughness {}",
                self.id(),
                self.max_toughness
            )));
        }
        Ok(())
    }
}

/// Furniture, doors, walls of lesser material.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Furnishing {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    parquet: ParquetBase,
    #[serde(default)]
    pub flags: FurnishingFlags,
    /// Furnishing this one toggles into, such as an open door for a closed
    /// one.
    #[serde(default)]
    swap: Id,
}

parquet_kind!(Furnishing);

impl Furnishing {
    pub fn new(header: Header) -> Result<Self> {
        let ret = Furnishing {
            header,
            parquet: Default::default(),
            flags: FurnishingFlags::empty(),
            swap: Id::NONE,
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_flags(mut self, flags: FurnishingFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_swap(mut self, id: impl Into<Id>) -> Result<Self> {
        self.swap = Category::Furnishing.check(id.into())?;
        Ok(self)
    }

    pub fn swap(&self) -> Id {
        self.swap
    }

    pub fn is_walkable(&self) -> bool {
        self.flags.contains(FurnishingFlags::WALKABLE)
    }

    pub fn is_entry(&self) -> bool {
        self.flags.contains(FurnishingFlags::ENTRY)
    }

    pub fn is_enclosing(&self) -> bool {
        self.flags.contains(FurnishingFlags::ENCLOSING)
    }

    pub fn is_flammable(&self) -> bool {
        self.flags.contains(FurnishingFlags::FLAMMABLE)
    }

    fn validate_fields(&self) -> Result<()> {
        Category::Furnishing.check(self.swap)?;
        Ok(())
    }
}

/// Small pick-up-able thing lying on top of the other layers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Collectible {
    #[serde(flatten)]
    header: Header,
    #[serde(flatten)]
    parquet: ParquetBase,
    #[serde(default)]
    pub effect: CollectingEffect,
    #[serde(default)]
    pub effect_amount: i32,
}

parquet_kind!(Collectible);

impl Collectible {
    pub fn new(header: Header) -> Result<Self> {
        let ret = Collectible {
            header,
            parquet: Default::default(),
            effect: CollectingEffect::None,
            effect_amount: 0,
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_effect(
        mut self,
        effect: CollectingEffect,
        amount: i32,
    ) -> Self {
        self.effect = effect;
        self.effect_amount = amount;
        self
    }

    fn validate_fields(&self) -> Result<()> {
        Ok(())
    }
}

/// Check that an id refers to some parquet kind.
pub(crate) fn check_parquet(id: Id) -> Result<Id> {
    check_any(
        &[
            Category::Floor,
            Category::Block,
            Category::Furnishing,
            Category::Collectible,
        ],
        id,
    )
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Error;

    #[test]
    fn construction_checks_range() {
        assert!(Floor::new(Header::new(30_001, "Grass")).is_ok());
        assert!(matches!(
            Floor::new(Header::new(40_001, "Stone")),
            Err(Error::IdOutOfRange {
                category: Category::Floor,
                ..
            })
        ));
        assert!(Block::new(Header::new(40_001, "Stone")).is_ok());
        assert!(Furnishing::new(Header::new(50_001, "Door")).is_ok());
        assert!(Collectible::new(Header::new(60_001, "Berry")).is_ok());
    }

    #[test]
    fn referenced_ids_are_checked() {
        let stone = Block::new(Header::new(40_001, "Stone")).unwrap();
        assert!(stone.clone().with_collectible(60_001).is_ok());
        assert!(stone.clone().with_collectible(50_001).is_err());
        assert!(stone.clone().with_item(110_001).is_ok());
        assert!(stone.with_item(40_001).is_err());

        let door = Furnishing::new(Header::new(50_001, "Door")).unwrap();
        assert!(door.clone().with_swap(50_002).is_ok());
        assert!(door.with_swap(30_001).is_err());
    }

    #[test]
    fn toughness_floor() {
        let b = Block::new(Header::new(40_001, "Glass"))
            .unwrap()
            .with_max_toughness(-5);
        assert_eq!(b.max_toughness(), Block::LOWEST_POSSIBLE_TOUGHNESS);
        let b = Block::new(Header::new(40_002, "Brick")).unwrap();
        assert_eq!(b.max_toughness(), Block::DEFAULT_MAX_TOUGHNESS);
    }

    #[test]
    fn flags_serialize_as_names() {
        let door = Furnishing::new(Header::new(50_001, "Door"))
            .unwrap()
            .with_flags(FurnishingFlags::ENTRY | FurnishingFlags::ENCLOSING)
            .adding_to_room(["door"]);
        let json = serde_json::to_value(&door).unwrap();
        assert_eq!(json["flags"], serde_json::json!(["entry", "enclosing"]));
        assert_eq!(json["adds-to-room"], serde_json::json!(["door"]));

        let back: Furnishing = serde_json::from_value(json).unwrap();
        assert!(back.is_entry());
        assert!(back.is_enclosing());
        assert!(!back.is_walkable());
        assert_eq!(back.parquet().adds_to_room(), &[Tag::new("door")]);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let block: Block = serde_json::from_str(
            r#"{ "id": 40001, "name": "Stone", "flags": ["liquid"] }"#,
        )
        .unwrap();
        assert!(block.is_liquid());
        assert_eq!(block.max_toughness(), Block::DEFAULT_MAX_TOUGHNESS);
        assert_eq!(block.collectible(), Id::NONE);
        assert_eq!(block.gather_tool, Tool::None);

        let floor: Floor =
            serde_json::from_str(r#"{ "id": 30001, "name": "Grass" }"#)
                .unwrap();
        assert_eq!(floor.trench_name, Floor::DEFAULT_TRENCH_NAME);
        assert_eq!(floor.mod_tool, Tool::Shovel);
    }

    #[test]
    fn parquet_ids() {
        for id in [30_001, 40_001, 50_001, 60_001, -60_001] {
            assert!(check_parquet(Id::new(id)).is_ok());
        }
        assert!(check_parquet(Id::new(110_001)).is_err());
    }
}
