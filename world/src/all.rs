use std::{collections::BTreeMap, sync::OnceLock};

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::{
    collection::Entries, Category, Collection, Entity, Error, Id, Range,
    Result,
};

/// Identifier ranges of every object category and the catalogs of
/// definitions.
///
/// Ranges are compile-time constants. Catalogs start out empty and are
/// filled exactly once with `populate`.
#[derive(Debug)]
pub struct All {
    catalogs: OnceLock<Catalogs>,
    placeholder: Catalogs,
}

impl All {
    pub const PLAYER_IDS: Range = Range::new(1, 9_999);
    pub const CRITTER_IDS: Range = Range::new(10_000, 19_999);
    pub const NPC_IDS: Range = Range::new(20_000, 29_999);

    pub const FLOOR_IDS: Range = Range::new(30_000, 39_999);
    pub const BLOCK_IDS: Range = Range::new(40_000, 49_999);
    pub const FURNISHING_IDS: Range = Range::new(50_000, 59_999);
    pub const COLLECTIBLE_IDS: Range = Range::new(60_000, 69_999);

    pub const CRAFTING_RECIPE_IDS: Range = Range::new(70_000, 79_999);
    pub const ROOM_RECIPE_IDS: Range = Range::new(80_000, 89_999);
    pub const QUEST_IDS: Range = Range::new(90_000, 99_999);
    pub const BIOME_IDS: Range = Range::new(100_000, 109_999);

    /// Every fixed category range, items excluded.
    pub const STATIC_RANGES: [Range; 11] = [
        Self::PLAYER_IDS,
        Self::CRITTER_IDS,
        Self::NPC_IDS,
        Self::FLOOR_IDS,
        Self::BLOCK_IDS,
        Self::FURNISHING_IDS,
        Self::COLLECTIBLE_IDS,
        Self::CRAFTING_RECIPE_IDS,
        Self::ROOM_RECIPE_IDS,
        Self::QUEST_IDS,
        Self::BIOME_IDS,
    ];

    pub const BEING_IDS: [Range; 3] =
        [Self::PLAYER_IDS, Self::CRITTER_IDS, Self::NPC_IDS];

    pub const PARQUET_IDS: [Range; 4] = [
        Self::FLOOR_IDS,
        Self::BLOCK_IDS,
        Self::FURNISHING_IDS,
        Self::COLLECTIBLE_IDS,
    ];

    /// Item range bounds are rounded to multiples of this.
    pub const TARGET_MULTIPLE: i32 = 10_000;

    /// Starts above every static range and holds at least two items for
    /// every possible parquet.
    pub const ITEM_IDS: Range = item_range(
        &Self::STATIC_RANGES,
        &Self::PARQUET_IDS,
        Self::TARGET_MULTIPLE,
    );

    pub fn new() -> Self {
        All {
            catalogs: OnceLock::new(),
            placeholder: Catalogs::default(),
        }
    }

    /// Install the catalogs.
    ///
    /// Only the first call succeeds, later or concurrent calls get
    /// `Error::AlreadyPopulated` and leave the installed catalogs untouched.
    pub fn populate(&self, catalogs: Catalogs) -> Result<()> {
        let counts = catalogs.summary();
        self.catalogs
            .set(catalogs)
            .map_err(|_| Error::AlreadyPopulated)?;
        log::info!("Populated catalogs: {counts}");
        Ok(())
    }

    pub fn is_populated(&self) -> bool {
        self.catalogs.get().is_some()
    }

    pub fn catalogs(&self) -> &Catalogs {
        self.catalogs.get().unwrap_or(&self.placeholder)
    }

    pub fn beings(&self) -> &Collection {
        &self.catalogs().beings
    }

    pub fn items(&self) -> &Collection {
        &self.catalogs().items
    }

    pub fn parquets(&self) -> &Collection {
        &self.catalogs().parquets
    }

    pub fn crafting_recipes(&self) -> &Collection {
        &self.catalogs().crafting_recipes
    }

    pub fn room_recipes(&self) -> &Collection {
        &self.catalogs().room_recipes
    }

    pub fn biomes(&self) -> &Collection {
        &self.catalogs().biomes
    }

    pub fn quests(&self) -> &Collection {
        &self.catalogs().quests
    }
}

impl Default for All {
    fn default() -> Self {
        All::new()
    }
}

const fn max_of(ranges: &[Range]) -> i32 {
    let mut ret = i32::MIN;
    let mut i = 0;
    while i < ranges.len() {
        if ranges[i].max() > ret {
            ret = ranges[i].max();
        }
        i += 1;
    }
    ret
}

const fn round_up(n: i64, multiple: i64) -> i64 {
    (n + multiple - 1) / multiple * multiple
}

const fn item_range(
    statics: &[Range],
    parquets: &[Range],
    multiple: i32,
) -> Range {
    let mut parquet_span = 0;
    let mut i = 0;
    while i < parquets.len() {
        parquet_span += parquets[i].len();
        i += 1;
    }

    let multiple = multiple as i64;
    let min = round_up(max_of(statics) as i64 + 1, multiple);
    let size = round_up(2 * parquet_span, multiple);
    Range::new(min as i32, (min + size - 1) as i32)
}

const fn disjoint(ranges: &[Range]) -> bool {
    let mut i = 0;
    while i < ranges.len() {
        let mut j = i + 1;
        while j < ranges.len() {
            if ranges[i].overlaps(&ranges[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const_assert!(disjoint(&All::STATIC_RANGES));
const_assert!(All::ITEM_IDS.min() > max_of(&All::STATIC_RANGES));
const_assert!(All::ITEM_IDS.len() >= 2 * 40_000);
const_assert!(All::PLAYER_IDS.min() > 0);

/// The definition collections held by `All`.
#[derive(Clone, Debug)]
pub struct Catalogs {
    beings: Collection,
    items: Collection,
    parquets: Collection,
    crafting_recipes: Collection,
    room_recipes: Collection,
    biomes: Collection,
    quests: Collection,
}

impl Default for Catalogs {
    fn default() -> Self {
        Catalogs {
            beings: Collection::empty(All::BEING_IDS),
            items: Collection::empty([All::ITEM_IDS]),
            parquets: Collection::empty(All::PARQUET_IDS),
            crafting_recipes: Collection::empty([All::CRAFTING_RECIPE_IDS]),
            room_recipes: Collection::empty([All::ROOM_RECIPE_IDS]),
            biomes: Collection::empty([All::BIOME_IDS]),
            quests: Collection::empty([All::QUEST_IDS]),
        }
    }
}

impl Catalogs {
    /// Sort definitions into their catalogs by category.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Result<Self> {
        let mut sorted: [Vec<Entity>; 7] = Default::default();
        for e in entities {
            sorted[slot(e.category())].push(e);
        }
        let [beings, items, parquets, crafting, rooms, biomes, quests] =
            sorted;

        Ok(Catalogs {
            beings: Collection::new(All::BEING_IDS, beings)?,
            items: Collection::new([All::ITEM_IDS], items)?,
            parquets: Collection::new(All::PARQUET_IDS, parquets)?,
            crafting_recipes: Collection::new(
                [All::CRAFTING_RECIPE_IDS],
                crafting,
            )?,
            room_recipes: Collection::new([All::ROOM_RECIPE_IDS], rooms)?,
            biomes: Collection::new([All::BIOME_IDS], biomes)?,
            quests: Collection::new([All::QUEST_IDS], quests)?,
        })
    }

    /// Load catalogs from a document with one id-keyed object per catalog.
    pub fn from_json(s: &str) -> Result<Self> {
        let data: CatalogsData = serde_json::from_str(s)?;
        Ok(Catalogs {
            beings: Collection::from_entries(All::BEING_IDS, data.beings)?,
            items: Collection::from_entries([All::ITEM_IDS], data.items)?,
            parquets: Collection::from_entries(
                All::PARQUET_IDS,
                data.parquets,
            )?,
            crafting_recipes: Collection::from_entries(
                [All::CRAFTING_RECIPE_IDS],
                data.crafting_recipes,
            )?,
            room_recipes: Collection::from_entries(
                [All::ROOM_RECIPE_IDS],
                data.room_recipes,
            )?,
            biomes: Collection::from_entries([All::BIOME_IDS], data.biomes)?,
            quests: Collection::from_entries([All::QUEST_IDS], data.quests)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let data = CatalogsRef {
            beings: self.beings.entities(),
            items: self.items.entities(),
            parquets: self.parquets.entities(),
            crafting_recipes: self.crafting_recipes.entities(),
            room_recipes: self.room_recipes.entities(),
            biomes: self.biomes.entities(),
            quests: self.quests.entities(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    fn summary(&self) -> String {
        format!(
            "{} beings, {} items, {} parquets, {} crafting recipes, \
             {} room recipes, {} biomes, {} quests",
            self.beings.len(),
            self.items.len(),
            self.parquets.len(),
            self.crafting_recipes.len(),
            self.room_recipes.len(),
            self.biomes.len(),
            self.quests.len()
        )
    }
}

fn slot(category: Category) -> usize {
    use Category::*;
    match category {
        Player | Critter | Npc => 0,
        Item => 1,
        Floor | Block | Furnishing | Collectible => 2,
        CraftingRecipe => 3,
        RoomRecipe => 4,
        Biome => 5,
        Quest => 6,
    }
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct CatalogsData {
    beings: Entries,
    items: Entries,
    parquets: Entries,
    crafting_recipes: Entries,
    room_recipes: Entries,
    biomes: Entries,
    quests: Entries,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct CatalogsRef<'a> {
    beings: &'a BTreeMap<Id, Entity>,
    items: &'a BTreeMap<Id, Entity>,
    parquets: &'a BTreeMap<Id, Entity>,
    crafting_recipes: &'a BTreeMap<Id, Entity>,
    room_recipes: &'a BTreeMap<Id, Entity>,
    biomes: &'a BTreeMap<Id, Entity>,
    quests: &'a BTreeMap<Id, Entity>,
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{Critter, Floor, Header, Item, Quest};

    fn sample() -> Catalogs {
        Catalogs::new([
            Entity::from(Floor::new(Header::new(30_001, "Grass")).unwrap()),
            Critter::new(Header::new(10_001, "Fox")).unwrap().into(),
            Item::new(Header::new(110_001, "Seed")).unwrap().into(),
            Quest::new(Header::new(90_001, "Fetch"), ["seed"])
                .unwrap()
                .into(),
        ])
        .unwrap()
    }

    #[test]
    fn item_range() {
        assert_eq!(All::ITEM_IDS, Range::new(110_000, 189_999));
        for c in Category::iter().filter(|&c| c != Category::Item) {
            assert!(All::ITEM_IDS.min() > c.range().max(), "{c}");
        }
    }

    #[test]
    fn categories_are_disjoint() {
        let ranges: Vec<Range> = Category::iter().map(|c| c.range()).collect();
        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn derived_lists() {
        assert!(All::BEING_IDS.contains(&All::NPC_IDS));
        assert!(All::PARQUET_IDS.contains(&All::COLLECTIBLE_IDS));
        assert!(!All::STATIC_RANGES.contains(&All::ITEM_IDS));
    }

    #[test]
    fn populate_once() {
        let all = All::new();
        assert!(!all.is_populated());
        assert!(all.parquets().is_empty());

        all.populate(sample()).unwrap();
        assert!(all.is_populated());
        assert_eq!(all.parquets().len(), 1);
        assert_eq!(all.beings().len(), 1);
        assert_eq!(all.items().len(), 1);
        assert_eq!(all.quests().len(), 1);

        assert!(matches!(
            all.populate(Catalogs::default()),
            Err(Error::AlreadyPopulated)
        ));
        assert_eq!(all.parquets().len(), 1);
    }

    #[test]
    fn catalogs_reject_bad_entries() {
        let dup =
            || Entity::from(Floor::new(Header::new(30_001, "A")).unwrap());
        assert!(matches!(
            Catalogs::new([dup(), dup()]),
            Err(Error::DuplicateId(_))
        ));
    }

    #[test]
    fn catalogs_json() {
        let json = sample().to_json().unwrap();
        let back = Catalogs::from_json(&json).unwrap();
        assert_eq!(back.summary(), sample().summary());

        let partial = Catalogs::from_json(
            r#"{
                "parquets": {
                    "50001": { "kind": "furnishing", "id": 50001, "name": "Door",
                               "flags": ["entry"] }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(partial.parquets.len(), 1);
        assert!(partial.items.is_empty());

        // Definitions filed under the wrong catalog.
        let misfiled = r#"{
            "items": {
                "30001": { "kind": "floor", "id": 30001, "name": "Grass" }
            }
        }"#;
        assert!(Catalogs::from_json(misfiled).is_err());

        let repeated = r#"{
            "parquets": {
                "30001": { "kind": "floor", "id": 30001, "name": "Grass" },
                "30001": { "kind": "floor", "id": 30001, "name": "Moss" }
            }
        }"#;
        assert!(matches!(
            Catalogs::from_json(repeated),
            Err(Error::DuplicateId(_))
        ));
    }
}
