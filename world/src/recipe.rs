use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    Block, Collection, Definition, Environs, Error, Floor, Header, Kind,
    Result, Room, Tag, MAX_WALKABLE_SPACES, MIN_WALKABLE_SPACES,
};

/// A number of things carrying a tag.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize,
    Deserialize,
)]
#[serde(try_from = "(Tag, i32)", into = "(Tag, i32)")]
pub struct RecipeElement {
    tag: Tag,
    amount: i32,
}

impl RecipeElement {
    /// Fails unless `amount` is at least one.
    pub fn new(tag: impl Into<Tag>, amount: i32) -> Result<Self> {
        let tag = tag.into();
        if amount < 1 {
            return Err(Error::InvalidAmount { tag, amount });
        }
        Ok(RecipeElement { tag, amount })
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Whether `tags` has at least `amount` copies of the element's tag.
    pub fn is_met_by<'a>(
        &self,
        tags: impl IntoIterator<Item = &'a Tag>,
    ) -> bool {
        tags.into_iter().filter(|&&t| t == self.tag).count() as i64
            >= self.amount as i64
    }
}

impl TryFrom<(Tag, i32)> for RecipeElement {
    type Error = Error;

    fn try_from((tag, amount): (Tag, i32)) -> Result<Self> {
        RecipeElement::new(tag, amount)
    }
}

impl From<RecipeElement> for (Tag, i32) {
    fn from(e: RecipeElement) -> Self {
        (e.tag, e.amount)
    }
}

fn check_elements(elts: &[RecipeElement]) -> Result<()> {
    for e in elts {
        RecipeElement::new(e.tag, e.amount)?;
    }
    Ok(())
}

/// Turns ingredients into products.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CraftingRecipe {
    #[serde(flatten)]
    header: Header,
    products: Vec<RecipeElement>,
    #[serde(default)]
    ingredients: Vec<RecipeElement>,
}

impl CraftingRecipe {
    pub fn new(
        header: Header,
        products: impl IntoIterator<Item = RecipeElement>,
        ingredients: impl IntoIterator<Item = RecipeElement>,
    ) -> Result<Self> {
        let ret = CraftingRecipe {
            header,
            products: products.into_iter().collect(),
            ingredients: ingredients.into_iter().collect(),
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn products(&self) -> &[RecipeElement] {
        &self.products
    }

    pub fn ingredients(&self) -> &[RecipeElement] {
        &self.ingredients
    }
}

impl Definition for CraftingRecipe {
    fn header(&self) -> &Header {
        &self.header
    }

    fn validate(&self) -> Result<()> {
        self.header.validate(Self::CATEGORY)?;
        if self.products.is_empty() {
            return Err(Error::MissingElements {
                id: self.id(),
                what: "products",
            });
        }
        check_elements(&self.products)?;
        check_elements(&self.ingredients)
    }
}

/// Pattern a detected room can match to become a particular kind of room.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoomRecipe {
    #[serde(flatten)]
    header: Header,
    #[serde(
        default = "RoomRecipe::default_minimum",
        deserialize_with = "deserialize_size"
    )]
    minimum_walkable_spaces: usize,
    required_furnishings: Vec<RecipeElement>,
    /// Tags the floors of the walkable area must supply.
    #[serde(default)]
    required_floors: Vec<RecipeElement>,
    /// Tags the blocks of the perimeter must supply.
    #[serde(default)]
    required_perimeter_blocks: Vec<RecipeElement>,
}

impl RoomRecipe {
    /// Build a recipe, clamping the minimum size into the room size limits.
    pub fn new(
        header: Header,
        minimum_walkable_spaces: usize,
        required_furnishings: impl IntoIterator<Item = RecipeElement>,
    ) -> Result<Self> {
        let ret = RoomRecipe {
            header,
            minimum_walkable_spaces: clamp_size(minimum_walkable_spaces),
            required_furnishings: required_furnishings.into_iter().collect(),
            required_floors: Default::default(),
            required_perimeter_blocks: Default::default(),
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_floors(
        mut self,
        elts: impl IntoIterator<Item = RecipeElement>,
    ) -> Self {
        self.required_floors.extend(elts);
        self
    }

    pub fn with_perimeter_blocks(
        mut self,
        elts: impl IntoIterator<Item = RecipeElement>,
    ) -> Self {
        self.required_perimeter_blocks.extend(elts);
        self
    }

    pub fn minimum_walkable_spaces(&self) -> usize {
        self.minimum_walkable_spaces
    }

    pub fn required_furnishings(&self) -> &[RecipeElement] {
        &self.required_furnishings
    }

    pub fn required_floors(&self) -> &[RecipeElement] {
        &self.required_floors
    }

    pub fn required_perimeter_blocks(&self) -> &[RecipeElement] {
        &self.required_perimeter_blocks
    }

    /// Whether a room is big enough and holds every required element.
    pub fn matches(
        &self,
        room: &Room,
        env: &impl Environs,
        parquets: &Collection,
    ) -> bool {
        if room.walkable_area().len() < self.minimum_walkable_spaces {
            return false;
        }

        let furnishings = room.furnishing_tags(env, parquets);
        if !self
            .required_furnishings
            .iter()
            .all(|e| e.is_met_by(furnishings))
        {
            return false;
        }

        if !self.required_floors.is_empty() {
            let floors: Vec<Tag> = room
                .walkable_area()
                .iter()
                .filter_map(|&p| {
                    parquets.get::<Floor>(env.stack_at(p).floor())
                })
                .flat_map(|f| f.parquet().adds_to_room().iter().copied())
                .collect();
            if !self.required_floors.iter().all(|e| e.is_met_by(&floors)) {
                return false;
            }
        }

        if !self.required_perimeter_blocks.is_empty() {
            let blocks: Vec<Tag> = room
                .perimeter()
                .iter()
                .filter_map(|&p| {
                    parquets.get::<Block>(env.stack_at(p).block())
                })
                .flat_map(|b| b.parquet().adds_to_room().iter().copied())
                .collect();
            if !self
                .required_perimeter_blocks
                .iter()
                .all(|e| e.is_met_by(&blocks))
            {
                return false;
            }
        }

        true
    }

    fn default_minimum() -> usize {
        MIN_WALKABLE_SPACES
    }
}

fn clamp_size(n: usize) -> usize {
    n.clamp(MIN_WALKABLE_SPACES, MAX_WALKABLE_SPACES)
}

/// Loaded sizes are clamped the same way `RoomRecipe::new` clamps them.
fn deserialize_size<'de, D>(
    deserializer: D,
) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(clamp_size(usize::deserialize(deserializer)?))
}

impl Definition for RoomRecipe {
    fn header(&self) -> &Header {
        &self.header
    }

    fn validate(&self) -> Result<()> {
        self.header.validate(Self::CATEGORY)?;
        if self.required_furnishings.is_empty() {
            return Err(Error::MissingElements {
                id: self.id(),
                what: "required furnishings",
            });
        }
        check_elements(&self.required_furnishings)?;
        check_elements(&self.required_floors)?;
        check_elements(&self.required_perimeter_blocks)
    }
}
