#![allow(dead_code)]

use util::StrExt;
use world::{
    All, Block, BlockFlags, Catalogs, Entity, Floor, Furnishing,
    FurnishingFlags, Header, Map, RecipeElement, RoomRecipe,
};

pub const GRASS: i32 = 30_001;
pub const WALL: i32 = 40_001;
pub const WATER: i32 = 40_002;
pub const DOOR: i32 = 50_001;
pub const BED: i32 = 50_002;
pub const BEDROOM: i32 = 80_001;
pub const DORMITORY: i32 = 80_010;

/// Catalogs with a handful of parquets and two room recipes.
pub fn catalogs() -> Catalogs {
    let bed = |n| [RecipeElement::new("bed", n).unwrap()];
    Catalogs::new([
        Entity::from(
            Floor::new(Header::new(GRASS, "grass"))
                .unwrap()
                .adding_to_room(["soft"]),
        ),
        Block::new(Header::new(WALL, "wall"))
            .unwrap()
            .adding_to_room(["stone"])
            .into(),
        Block::new(Header::new(WATER, "water"))
            .unwrap()
            .with_flags(BlockFlags::LIQUID)
            .into(),
        Furnishing::new(Header::new(DOOR, "door"))
            .unwrap()
            .with_flags(FurnishingFlags::ENTRY | FurnishingFlags::ENCLOSING)
            .into(),
        Furnishing::new(Header::new(BED, "bed"))
            .unwrap()
            .with_flags(FurnishingFlags::WALKABLE)
            .adding_to_room(["bed"])
            .into(),
        RoomRecipe::new(Header::new(BEDROOM, "Bedroom"), 4, bed(1))
            .unwrap()
            .into(),
        RoomRecipe::new(Header::new(DORMITORY, "Dormitory"), 5, bed(2))
            .unwrap()
            .into(),
    ])
    .unwrap()
}

pub fn all() -> All {
    let all = All::new();
    all.populate(catalogs()).unwrap();
    all
}

/// Build a map from ASCII art.
///
/// `.` grass, `#` wall, `~` water, `+` door, `b` bed on grass, `_` nothing.
pub fn map<const W: usize, const H: usize>(art: &str) -> Map<W, H> {
    let mut ret = Map::default();
    for (p, c) in art.char_grid() {
        match c {
            '.' => {
                ret.try_set_floor(GRASS, p).unwrap();
            }
            '#' => {
                ret.try_set_block(WALL, p).unwrap();
            }
            '~' => {
                ret.try_set_block(WATER, p).unwrap();
            }
            '+' => {
                ret.try_set_furnishing(DOOR, p).unwrap();
            }
            'b' => {
                ret.try_set_floor(GRASS, p).unwrap();
                ret.try_set_furnishing(BED, p).unwrap();
            }
            '_' => {}
            c => panic!("unknown map char {c:?}"),
        }
    }
    ret
}
