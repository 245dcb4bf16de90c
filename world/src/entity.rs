use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{
    Biome, Block, Category, Collectible, CraftingRecipe, Critter, Error,
    Floor, Furnishing, Id, Item, Npc, ParquetBase, PlayerCharacter, Quest,
    Result, RoomRecipe,
};

/// Identity and descriptive text shared by every game object definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Header {
    id: Id,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    comment: String,
}

impl Header {
    /// Unvalidated header, the definition it goes into checks the id against
    /// its own category.
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Header {
            id: id.into(),
            name: name.into(),
            description: Default::default(),
            comment: Default::default(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn comment_text(&self) -> &str {
        &self.comment
    }

    pub(crate) fn validate(&self, category: Category) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::IdOutOfRange {
                id: self.id,
                category,
            });
        }
        category.check(self.id)?;
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName(self.id));
        }
        Ok(())
    }
}

/// Common interface of every game object definition.
pub trait Definition {
    fn header(&self) -> &Header;

    /// Check the definition's own id and every id it refers to.
    fn validate(&self) -> Result<()>;

    fn id(&self) -> Id {
        self.header().id()
    }

    fn name(&self) -> &str {
        self.header().name()
    }
}

/// A concrete definition type that can be stored in and fetched from an
/// `Entity`.
pub trait Kind: Definition + Into<Entity> + Sized + 'static {
    const CATEGORY: Category;

    fn downcast(entity: &Entity) -> Option<&Self>;
}

/// Check every id in `ids` against the category's range.
pub(crate) fn check_ids<'a>(
    category: Category,
    ids: impl IntoIterator<Item = &'a Id>,
) -> Result<()> {
    for &id in ids {
        category.check(id)?;
    }
    Ok(())
}

/// Check an id against several categories, accepting if any of them fits.
pub(crate) fn check_any(categories: &[Category], id: Id) -> Result<Id> {
    if categories.iter().any(|c| id.is_valid_for(&c.range())) {
        Ok(id)
    } else {
        Err(Error::IdOutOfRange {
            id,
            category: categories[0],
        })
    }
}

macro_rules! entities {
    ($($kind:ident: $category:ident),* $(,)?) => {
        /// Any storable game object definition.
        ///
        /// Serialized with a `kind` field so that collections can be loaded
        /// back into their concrete types.
        #[derive(Clone, Debug, Serialize, Deserialize)]
        #[serde(tag = "kind", rename_all = "kebab-case")]
        pub enum Entity {
            $($kind($kind)),*
        }

        impl Entity {
            pub fn header(&self) -> &Header {
                match self {
                    $(Entity::$kind(a) => a.header()),*
                }
            }

            pub fn category(&self) -> Category {
                match self {
                    $(Entity::$kind(_) => Category::$category),*
                }
            }

            pub fn validate(&self) -> Result<()> {
                match self {
                    $(Entity::$kind(a) => a.validate()),*
                }
            }
        }

        $(
            impl From<$kind> for Entity {
                fn from(value: $kind) -> Self {
                    Entity::$kind(value)
                }
            }

            impl Kind for $kind {
                const CATEGORY: Category = Category::$category;

                fn downcast(entity: &Entity) -> Option<&Self> {
                    match entity {
                        Entity::$kind(a) => Some(a),
                        _ => None,
                    }
                }
            }

            impl PartialEq for $kind {
                fn eq(&self, other: &Self) -> bool {
                    self.id() == other.id()
                }
            }

            impl Eq for $kind {}

            impl Hash for $kind {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.id().hash(state);
                }
            }
        )*
    };
}

entities! {
    Floor: Floor,
    Block: Block,
    Furnishing: Furnishing,
    Collectible: Collectible,
    Critter: Critter,
    Npc: Npc,
    PlayerCharacter: Player,
    Item: Item,
    CraftingRecipe: CraftingRecipe,
    RoomRecipe: RoomRecipe,
    Biome: Biome,
    Quest: Quest,
}

impl Entity {
    pub fn id(&self) -> Id {
        self.header().id()
    }

    pub fn name(&self) -> &str {
        self.header().name()
    }

    /// Shared parquet fields if this is a floor, block, furnishing or
    /// collectible.
    pub fn parquet(&self) -> Option<&ParquetBase> {
        match self {
            Entity::Floor(a) => Some(a.parquet()),
            Entity::Block(a) => Some(a.parquet()),
            Entity::Furnishing(a) => Some(a.parquet()),
            Entity::Collectible(a) => Some(a.parquet()),
            _ => None,
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
