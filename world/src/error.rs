use glam::IVec2;
use thiserror::Error;

use crate::{Category, Id, Tag};

/// Errors from building or loading game content.
///
/// All of these are deterministic consequences of bad input, retrying the
/// same operation will fail the same way.
#[derive(Debug, Error)]
pub enum Error {
    #[error("id {id} is outside the {category} range")]
    IdOutOfRange { id: Id, category: Category },

    #[error("id {0} is already in use")]
    DuplicateId(Id),

    #[error("definition {0} has an empty name")]
    EmptyName(Id),

    #[error("recipe element {tag:?} has non-positive amount {amount}")]
    InvalidAmount { tag: Tag, amount: i32 },

    #[error("definition {id} has no {what}")]
    MissingElements { id: Id, what: &'static str },

    #[error("unsupported data version {0:?}")]
    UnsupportedVersion(String),

    #[error("malformed data: {0}")]
    Malformed(String),

    #[error("could not deserialize: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("catalogs have already been populated")]
    AlreadyPopulated,

    #[error("invalid room: {0}")]
    InvalidRoom(String),

    #[error("rooms overlap at {0}")]
    OverlappingRooms(IVec2),
}

pub type Result<T> = std::result::Result<T, Error>;
