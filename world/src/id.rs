use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::All;

/// Identifier of a game object definition.
///
/// Zero is reserved for "no object". Negative values mark test instances of
/// an otherwise valid category, validity checks use the absolute value.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Id(i32);

impl Id {
    pub const NONE: Id = Id(0);

    pub const fn new(value: i32) -> Self {
        Id(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// Id is none or its absolute value lies within the range.
    pub fn is_valid_for(self, range: &Range) -> bool {
        range.contains(self)
    }

    /// Id is valid for at least one of the ranges.
    pub fn is_valid_for_any<'a>(
        self,
        ranges: impl IntoIterator<Item = &'a Range>,
    ) -> bool {
        ranges.into_iter().any(|r| r.contains(self))
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id(value)
    }
}

impl From<Id> for i32 {
    fn from(value: Id) -> Self {
        value.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive interval of valid identifier values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Range {
    min: i32,
    max: i32,
}

impl Range {
    /// Panics if `min > max`.
    pub const fn new(min: i32, max: i32) -> Self {
        assert!(min <= max, "Range: minimum exceeds maximum");
        Range { min, max }
    }

    pub const fn min(&self) -> i32 {
        self.min
    }

    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Number of values in the range.
    pub const fn len(&self) -> i64 {
        self.max as i64 - self.min as i64 + 1
    }

    pub const fn contains_value(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Id is none or its absolute value is within the range.
    pub const fn contains(&self, id: Id) -> bool {
        if id.is_none() {
            return true;
        }
        let abs = (id.0 as i64).abs();
        self.min as i64 <= abs && abs <= self.max as i64
    }

    /// Whether `other` lies wholly within this range.
    pub const fn contains_range(&self, other: &Range) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    pub const fn overlaps(&self, other: &Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Every kind of game object that gets its own identifier range.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    Player,
    Critter,
    Npc,
    Floor,
    Block,
    Furnishing,
    Collectible,
    CraftingRecipe,
    RoomRecipe,
    Quest,
    Biome,
    Item,
}

impl Category {
    pub const fn range(self) -> Range {
        use Category::*;
        match self {
            Player => All::PLAYER_IDS,
            Critter => All::CRITTER_IDS,
            Npc => All::NPC_IDS,
            Floor => All::FLOOR_IDS,
            Block => All::BLOCK_IDS,
            Furnishing => All::FURNISHING_IDS,
            Collectible => All::COLLECTIBLE_IDS,
            CraftingRecipe => All::CRAFTING_RECIPE_IDS,
            RoomRecipe => All::ROOM_RECIPE_IDS,
            Quest => All::QUEST_IDS,
            Biome => All::BIOME_IDS,
            Item => All::ITEM_IDS,
        }
    }

    /// Fail with `IdOutOfRange` unless the id is valid for this category.
    pub fn check(self, id: Id) -> crate::Result<Id> {
        if id.is_valid_for(&self.range()) {
            Ok(id)
        } else {
            Err(crate::Error::IdOutOfRange { id, category: self })
        }
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;
    use strum::IntoEnumIterator;

    use super::*;

    fn range(a: i32, b: i32) -> Range {
        Range::new(a.min(b), a.max(b))
    }

    #[quickcheck]
    fn none_is_always_valid(a: i32, b: i32) -> bool {
        Id::NONE.is_valid_for(&range(a, b))
    }

    #[quickcheck]
    fn validity_is_absolute_membership(id: i32, a: i32, b: i32) -> bool {
        let r = range(a, b);
        let abs = (id as i64).abs();
        id == 0
            || Id::new(id).is_valid_for(&r)
                == (abs >= r.min() as i64 && abs <= r.max() as i64)
    }

    #[test]
    fn negative_ids_are_test_instances() {
        let r = Range::new(100, 200);
        assert!(Id::new(150).is_valid_for(&r));
        assert!(Id::new(-150).is_valid_for(&r));
        assert!(!Id::new(99).is_valid_for(&r));
        assert!(!Id::new(-201).is_valid_for(&r));
        assert!(!Id::new(i32::MIN).is_valid_for(&Range::new(0, i32::MAX)));
    }

    #[test]
    fn any_of_ranges() {
        let ranges = [Range::new(1, 10), Range::new(20, 30)];
        assert!(Id::new(25).is_valid_for_any(&ranges));
        assert!(!Id::new(15).is_valid_for_any(&ranges));
        assert!(Id::NONE.is_valid_for_any(&ranges));
        assert!(!Id::new(5).is_valid_for_any(&[]));
    }

    #[test]
    fn range_containment() {
        let outer = Range::new(0, 100);
        assert!(outer.contains_range(&Range::new(0, 100)));
        assert!(outer.contains_range(&Range::new(10, 20)));
        assert!(!outer.contains_range(&Range::new(-1, 20)));
        assert!(!outer.contains_range(&Range::new(90, 101)));
        assert_eq!(outer.len(), 101);
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(Id::new(-5) < Id::new(3));
        assert_eq!(
            [Id::new(80_002), Id::new(80_010), Id::new(80_001)]
                .into_iter()
                .max(),
            Some(Id::new(80_010))
        );
    }

    #[test]
    fn category_check() {
        for c in Category::iter() {
            let r = c.range();
            assert!(c.check(Id::new(r.min())).is_ok());
            assert!(c.check(Id::new(r.max() + 1)).is_err());
        }
        assert_eq!(Category::CraftingRecipe.to_string(), "crafting-recipe");
    }
}
