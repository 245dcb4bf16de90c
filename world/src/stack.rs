use serde::{Deserialize, Serialize};

use crate::{Block, Category, Error, Id, Result};

/// The four parquet layers co-located on one map cell.
///
/// Every slot is checked against its own category when the stack is built,
/// so a stack in hand never holds an id from the wrong range. Serializes as a
/// `[floor, block, furnishing, collectible]` array.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(try_from = "[Id; 4]", into = "[Id; 4]")]
pub struct ParquetStack {
    floor: Id,
    block: Id,
    furnishing: Id,
    collectible: Id,
}

impl ParquetStack {
    pub const EMPTY: ParquetStack = ParquetStack {
        floor: Id::NONE,
        block: Id::NONE,
        furnishing: Id::NONE,
        collectible: Id::NONE,
    };

    /// Layer categories from bottom to top.
    pub const LAYERS: [Category; 4] = [
        Category::Floor,
        Category::Block,
        Category::Furnishing,
        Category::Collectible,
    ];

    pub fn new(
        floor: impl Into<Id>,
        block: impl Into<Id>,
        furnishing: impl Into<Id>,
        collectible: impl Into<Id>,
    ) -> Result<Self> {
        Ok(ParquetStack {
            floor: Category::Floor.check(floor.into())?,
            block: Category::Block.check(block.into())?,
            furnishing: Category::Furnishing.check(furnishing.into())?,
            collectible: Category::Collectible.check(collectible.into())?,
        })
    }

    pub fn floor(&self) -> Id {
        self.floor
    }

    pub fn block(&self) -> Id {
        self.block
    }

    pub fn furnishing(&self) -> Id {
        self.furnishing
    }

    pub fn collectible(&self) -> Id {
        self.collectible
    }

    pub fn with_floor(self, id: impl Into<Id>) -> Result<Self> {
        Ok(ParquetStack {
            floor: Category::Floor.check(id.into())?,
            ..self
        })
    }

    pub fn with_block(self, id: impl Into<Id>) -> Result<Self> {
        Ok(ParquetStack {
            block: Category::Block.check(id.into())?,
            ..self
        })
    }

    pub fn with_furnishing(self, id: impl Into<Id>) -> Result<Self> {
        Ok(ParquetStack {
            furnishing: Category::Furnishing.check(id.into())?,
            ..self
        })
    }

    pub fn with_collectible(self, id: impl Into<Id>) -> Result<Self> {
        Ok(ParquetStack {
            collectible: Category::Collectible.check(id.into())?,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// The visually top-most parquet, or `Id::NONE` for an empty stack.
    ///
    /// Collectibles sit on furnishings, which sit on blocks, which sit on
    /// floors.
    pub fn top(&self) -> Id {
        [self.collectible, self.furnishing, self.block, self.floor]
            .into_iter()
            .find(|id| id.is_some())
            .unwrap_or(Id::NONE)
    }

    /// Non-empty layer ids from bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = Id> {
        <[Id; 4]>::from(*self).into_iter().filter(|id| id.is_some())
    }
}

impl TryFrom<[Id; 4]> for ParquetStack {
    type Error = Error;

    fn try_from([f, b, u, c]: [Id; 4]) -> Result<Self> {
        ParquetStack::new(f, b, u, c)
    }
}

impl From<ParquetStack> for [Id; 4] {
    fn from(s: ParquetStack) -> Self {
        [s.floor, s.block, s.furnishing, s.collectible]
    }
}

/// Mutable per-cell state of a map.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "StatusData", rename_all = "kebab-case")]
pub struct ParquetStatus {
    /// The floor has been dug out.
    pub is_trench: bool,
    toughness: i32,
}

impl Default for ParquetStatus {
    fn default() -> Self {
        ParquetStatus {
            is_trench: false,
            toughness: Block::DEFAULT_MAX_TOUGHNESS,
        }
    }
}

impl ParquetStatus {
    pub fn new(is_trench: bool, toughness: i32) -> Self {
        ParquetStatus {
            is_trench,
            toughness: clamp_toughness(toughness),
        }
    }

    pub fn toughness(&self) -> i32 {
        self.toughness
    }

    pub fn set_toughness(&mut self, toughness: i32) {
        self.toughness = clamp_toughness(toughness);
    }
}

fn clamp_toughness(toughness: i32) -> i32 {
    toughness.clamp(
        Block::LOWEST_POSSIBLE_TOUGHNESS,
        Block::DEFAULT_MAX_TOUGHNESS,
    )
}

#[derive(Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct StatusData {
    is_trench: bool,
    toughness: i32,
}

impl Default for StatusData {
    fn default() -> Self {
        let ParquetStatus {
            is_trench,
            toughness,
        } = Default::default();
        StatusData {
            is_trench,
            toughness,
        }
    }
}

impl From<StatusData> for ParquetStatus {
    fn from(data: StatusData) -> Self {
        ParquetStatus::new(data.is_trench, data.toughness)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn every_slot_is_checked() {
        assert!(ParquetStack::new(30_001, 40_001, 50_001, 60_001).is_ok());
        assert!(ParquetStack::new(0, 0, 0, 0).unwrap().is_empty());
        // Each slot wrong in turn while the rest stay valid.
        assert!(ParquetStack::new(40_001, 40_001, 50_001, 60_001).is_err());
        assert!(ParquetStack::new(30_001, 30_001, 50_001, 60_001).is_err());
        assert!(ParquetStack::new(30_001, 40_001, 60_001, 60_001).is_err());
        assert!(ParquetStack::new(30_001, 40_001, 50_001, 50_001).is_err());
    }

    #[test]
    fn layer_updates() {
        let s = ParquetStack::EMPTY.with_floor(30_001).unwrap();
        let s = s.with_furnishing(50_002).unwrap();
        assert_eq!(s.floor(), Id::new(30_001));
        assert_eq!(s.block(), Id::NONE);
        assert_eq!(s.furnishing(), Id::new(50_002));
        assert!(s.with_block(30_001).is_err());
        assert_eq!(
            s.ids().collect::<Vec<_>>(),
            vec![Id::new(30_001), Id::new(50_002)]
        );
    }

    #[test]
    fn top_precedence() {
        let s = ParquetStack::new(30_001, 40_001, 0, 0).unwrap();
        assert_eq!(s.top(), Id::new(40_001));
        let s = s.with_collectible(60_001).unwrap();
        assert_eq!(s.top(), Id::new(60_001));
        let s = s.with_collectible(0).unwrap().with_furnishing(50_001).unwrap();
        assert_eq!(s.top(), Id::new(50_001));
        assert_eq!(ParquetStack::EMPTY.top(), Id::NONE);
    }

    #[test]
    fn stack_serialization() {
        let s = ParquetStack::new(30_001, 0, 50_001, 0).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[30001,0,50001,0]");
        assert_eq!(serde_json::from_str::<ParquetStack>(&json).unwrap(), s);
        assert!(serde_json::from_str::<ParquetStack>("[40001,0,0,0]").is_err());
    }

    #[quickcheck]
    fn toughness_is_clamped(t: i32) -> bool {
        let s = ParquetStatus::new(false, t);
        (Block::LOWEST_POSSIBLE_TOUGHNESS..=Block::DEFAULT_MAX_TOUGHNESS)
            .contains(&s.toughness())
    }

    #[test]
    fn status_loading_clamps() {
        let s: ParquetStatus =
            serde_json::from_str(r#"{ "is-trench": true, "toughness": 99 }"#)
                .unwrap();
        assert!(s.is_trench);
        assert_eq!(s.toughness(), Block::DEFAULT_MAX_TOUGHNESS);
        let s: ParquetStatus = serde_json::from_str("{}").unwrap();
        assert_eq!(s, ParquetStatus::default());
    }
}
