use serde::{Deserialize, Serialize};

use crate::{
    parquet::check_parquet, Definition, Error, Header, Id, Kind, Result, Tag,
};

#[derive(
    Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    #[default]
    Material,
    /// Places a parquet when used.
    Placeable,
    Tool,
    Consumable,
    /// Story item that can't be sold or dropped.
    Key,
}

/// Anything that can sit in an inventory.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Item {
    #[serde(flatten)]
    header: Header,
    /// Stored as `item-kind`, `kind` names the definition type.
    #[serde(default, rename = "item-kind")]
    pub kind: ItemKind,
    #[serde(default)]
    pub price: i32,
    #[serde(default)]
    pub rarity: i32,
    #[serde(default = "Item::default_stack_max")]
    stack_max: i32,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Parquet the item places, if any.
    #[serde(default)]
    parquet: Id,
}

impl Item {
    pub const DEFAULT_STACK_MAX: i32 = 999;

    pub fn new(header: Header) -> Result<Self> {
        let ret = Item {
            header,
            kind: ItemKind::Material,
            price: 0,
            rarity: 0,
            stack_max: Self::DEFAULT_STACK_MAX,
            tags: Default::default(),
            parquet: Id::NONE,
        };
        ret.validate()?;
        Ok(ret)
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_stack_max(mut self, stack_max: i32) -> Result<Self> {
        self.stack_max = stack_max;
        self.check_stack_max()?;
        Ok(self)
    }

    pub fn with_parquet(mut self, id: impl Into<Id>) -> Result<Self> {
        self.parquet = check_parquet(id.into())?;
        Ok(self)
    }

    pub fn stack_max(&self) -> i32 {
        self.stack_max
    }

    pub fn parquet(&self) -> Id {
        self.parquet
    }

    fn default_stack_max() -> i32 {
        Self::DEFAULT_STACK_MAX
    }

    fn check_stack_max(&self) -> Result<()> {
        if self.stack_max < 1 {
            return Err(Error::Malformed(format!(
                "item {} has stack maximum {}",
                self.id(),
                self.stack_max
            )));
        }
        Ok(())
    }
}

impl Definition for Item {
    fn header(&self) -> &Header {
        &self.header
    }

    fn validate(&self) -> Result<()> {
        self.header.validate(Self::CATEGORY)?;
        self.check_stack_max()?;
        check_parquet(self.parquet)?;
        Ok(())
    }
}
