//! Content model of the parquet game: object definitions, their identifier
//! ranges and catalogs, maps of parquet stacks and the rooms found on them.

mod all;
pub use all::{All, Catalogs};

mod being;
pub use being::{Behavior, BeingBase, Critter, Npc, PlayerCharacter};

mod chunk_grid;
pub use chunk_grid::ChunkGrid;

mod collection;
pub use collection::Collection;

mod entity;
pub use entity::{Definition, Entity, Header, Kind};

mod error;
pub use error::{Error, Result};

mod id;
pub use id::{Category, Id, Range};

mod item;
pub use item::{Item, ItemKind};

mod lore;
pub use lore::{Biome, Elevation, Quest};

mod map;
pub use map::{
    Chunk, Environs, Map, Region, SpawnKind, SpecialPoint,
    CHUNKS_PER_REGION_DIMENSION, CHUNK_DIMENSION, REGION_DIMENSION,
};

mod parquet;
pub use parquet::{
    Block, BlockFlags, Collectible, CollectingEffect, Floor, Furnishing,
    FurnishingFlags, GatheringEffect, ParquetBase, Tool,
};

mod recipe;
pub use recipe::{CraftingRecipe, RecipeElement, RoomRecipe};

mod room;
pub use room::{find_best_match, Room, RoomCollection};

mod stack;
pub use stack::{ParquetStack, ParquetStatus};

mod tag;
pub use tag::Tag;

/// Smallest number of walkable cells a room can have.
pub const MIN_WALKABLE_SPACES: usize = 4;

/// Largest number of walkable cells a room can have.
pub const MAX_WALKABLE_SPACES: usize = 121;

/// Version string written into saved maps. Maps with any other version are
/// not loaded.
pub const DATA_VERSION: &str = "0.1.0";
