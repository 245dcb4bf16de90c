use glam::{ivec2, IVec2};
use serde::{Deserialize, Serialize};
use util::Grid;

use crate::{
    Collection, Error, Id, ParquetStack, ParquetStatus, Result, DATA_VERSION,
};

/// Read access to a map's parquets, enough for room detection and matching.
pub trait Environs {
    /// Size of the map in parquets.
    fn dimensions(&self) -> IVec2;

    /// Stack at position, `ParquetStack::EMPTY` outside the map.
    fn stack_at(&self, p: IVec2) -> ParquetStack;

    fn is_valid_position(&self, p: IVec2) -> bool {
        let dim = self.dimensions();
        p.x >= 0 && p.y >= 0 && p.x < dim.x && p.y < dim.y
    }
}

/// Which kind of being appears at a spawn point.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnKind {
    Player,
    Critter,
    Npc,
}

/// Marked map position with gameplay meaning.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SpecialPoint {
    Spawn { position: IVec2, kind: SpawnKind },
    /// Leads to another map, named by `destination`.
    Exit { position: IVec2, destination: String },
}

impl SpecialPoint {
    pub fn position(&self) -> IVec2 {
        match self {
            SpecialPoint::Spawn { position, .. } => *position,
            SpecialPoint::Exit { position, .. } => *position,
        }
    }

    pub fn is_spawn(&self) -> bool {
        matches!(self, SpecialPoint::Spawn { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, SpecialPoint::Exit { .. })
    }

    fn offset(self, d: IVec2) -> Self {
        use SpecialPoint::*;
        match self {
            Spawn { position, kind } => Spawn {
                position: position + d,
                kind,
            },
            Exit {
                position,
                destination,
            } => Exit {
                position: position + d,
                destination,
            },
        }
    }
}

/// Rectangular map of `W` by `H` parquet stacks with per-cell status.
#[derive(Clone, Debug)]
pub struct Map<const W: usize, const H: usize> {
    pub title: String,
    pub background_color: String,
    revision: u64,
    stacks: Grid<ParquetStack>,
    statuses: Grid<ParquetStatus>,
    special_points: Vec<SpecialPoint>,
}

/// Size of a chunk along each axis in parquets.
pub const CHUNK_DIMENSION: usize = 8;

/// Size of a region along each axis in chunks.
pub const CHUNKS_PER_REGION_DIMENSION: usize = 4;

/// Size of a region along each axis in parquets.
pub const REGION_DIMENSION: usize =
    CHUNK_DIMENSION * CHUNKS_PER_REGION_DIMENSION;

/// Small hand-authored piece of a region.
pub type Chunk = Map<CHUNK_DIMENSION, CHUNK_DIMENSION>;

/// Full playable map unit.
pub type Region = Map<REGION_DIMENSION, REGION_DIMENSION>;

impl<const W: usize, const H: usize> Default for Map<W, H> {
    fn default() -> Self {
        Map {
            title: "New Map".into(),
            background_color: "#FFFFFF".into(),
            revision: 0,
            stacks: Grid::new(Self::DIM, ParquetStack::EMPTY),
            statuses: Grid::with_default(Self::DIM),
            special_points: Default::default(),
        }
    }
}

impl<const W: usize, const H: usize> Map<W, H> {
    pub const DIM: IVec2 = ivec2(W as i32, H as i32);

    pub fn new(title: impl Into<String>) -> Self {
        Map {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn dimensions(&self) -> IVec2 {
        Self::DIM
    }

    pub fn is_valid_position(&self, p: IVec2) -> bool {
        self.stacks.contains(p)
    }

    /// Number of successful edits made to the map since it was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stack_at(&self, p: IVec2) -> ParquetStack {
        self.stacks.get(p).copied().unwrap_or(ParquetStack::EMPTY)
    }

    pub fn status_at(&self, p: IVec2) -> Option<&ParquetStatus> {
        self.statuses.get(p)
    }

    pub fn status_at_mut(&mut self, p: IVec2) -> Option<&mut ParquetStatus> {
        self.statuses.get_mut(p)
    }

    /// Replace the whole stack at `p`.
    ///
    /// Returns false without changing anything if `p` is outside the map.
    pub fn try_set_stack(&mut self, stack: ParquetStack, p: IVec2) -> bool {
        if self.stacks.set(p, stack).is_some() {
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// Replace the floor at `p`, keeping the other layers.
    ///
    /// Fails if `id` is not a floor id, returns `Ok(false)` if `p` is outside
    /// the map.
    pub fn try_set_floor(
        &mut self,
        id: impl Into<Id>,
        p: IVec2,
    ) -> Result<bool> {
        let id = id.into();
        self.update(p, |s| s.with_floor(id))
    }

    pub fn try_set_block(
        &mut self,
        id: impl Into<Id>,
        p: IVec2,
    ) -> Result<bool> {
        let id = id.into();
        self.update(p, |s| s.with_block(id))
    }

    pub fn try_set_furnishing(
        &mut self,
        id: impl Into<Id>,
        p: IVec2,
    ) -> Result<bool> {
        let id = id.into();
        self.update(p, |s| s.with_furnishing(id))
    }

    pub fn try_set_collectible(
        &mut self,
        id: impl Into<Id>,
        p: IVec2,
    ) -> Result<bool> {
        let id = id.into();
        self.update(p, |s| s.with_collectible(id))
    }

    fn update(
        &mut self,
        p: IVec2,
        f: impl FnOnce(ParquetStack) -> Result<ParquetStack>,
    ) -> Result<bool> {
        let Some(cell) = self.stacks.get_mut(p) else {
            return Ok(false);
        };
        *cell = f(*cell)?;
        self.revision += 1;
        Ok(true)
    }

    pub fn special_points(&self) -> &[SpecialPoint] {
        &self.special_points
    }

    pub fn spawn_points(&self) -> impl Iterator<Item = &SpecialPoint> {
        self.special_points.iter().filter(|a| a.is_spawn())
    }

    pub fn exit_points(&self) -> impl Iterator<Item = &SpecialPoint> {
        self.special_points.iter().filter(|a| a.is_exit())
    }

    /// Place a spawn point, replacing any spawn point already at `p`.
    ///
    /// Returns false if `p` is outside the map.
    pub fn set_spawn_point(&mut self, p: IVec2, kind: SpawnKind) -> bool {
        self.set_special_point(SpecialPoint::Spawn { position: p, kind })
    }

    /// Place an exit point, replacing any exit point already at `p`.
    ///
    /// Returns false if `p` is outside the map.
    pub fn set_exit_point(
        &mut self,
        p: IVec2,
        destination: impl Into<String>,
    ) -> bool {
        self.set_special_point(SpecialPoint::Exit {
            position: p,
            destination: destination.into(),
        })
    }

    /// Remove the spawn point at `p` if there is one. Always succeeds.
    pub fn remove_spawn_point(&mut self, p: IVec2) -> bool {
        self.remove_special_point(p, SpecialPoint::is_spawn);
        true
    }

    /// Remove the exit point at `p` if there is one. Always succeeds.
    pub fn remove_exit_point(&mut self, p: IVec2) -> bool {
        self.remove_special_point(p, SpecialPoint::is_exit);
        true
    }

    fn set_special_point(&mut self, point: SpecialPoint) -> bool {
        if !self.is_valid_position(point.position()) {
            return false;
        }
        let same_kind = if point.is_spawn() {
            SpecialPoint::is_spawn
        } else {
            SpecialPoint::is_exit
        };
        self.remove_special_point(point.position(), same_kind);
        self.special_points.push(point);
        self.revision += 1;
        true
    }

    fn remove_special_point(
        &mut self,
        p: IVec2,
        same_kind: fn(&SpecialPoint) -> bool,
    ) {
        let n = self.special_points.len();
        self.special_points
            .retain(|a| !(a.position() == p && same_kind(a)));
        if self.special_points.len() != n {
            self.revision += 1;
        }
    }

    /// Every parquet id present on the map, layer by layer within each
    /// cell, in scanline order. Repeats are kept.
    pub fn parquet_ids(&self) -> Vec<Id> {
        self.stacks.as_slice().iter().flat_map(|s| s.ids()).collect()
    }

    /// Copy `other` into this map with its origin at `offset`.
    ///
    /// Cells falling outside this map are dropped.
    pub(crate) fn paste<const W2: usize, const H2: usize>(
        &mut self,
        other: &Map<W2, H2>,
        offset: IVec2,
    ) {
        for (p, &stack) in other.stacks.iter() {
            if let Some(cell) = self.stacks.get_mut(p + offset) {
                *cell = stack;
            }
        }
        for (p, &status) in other.statuses.iter() {
            if let Some(cell) = self.statuses.get_mut(p + offset) {
                *cell = status;
            }
        }
        for point in &other.special_points {
            let point = point.clone().offset(offset);
            if self.is_valid_position(point.position()) {
                self.special_points.push(point);
            }
        }
        self.revision += 1;
    }

    /// Text picture of the map, one character per cell.
    ///
    /// Each cell shows the first letter of the name of its top-most parquet,
    /// `~` for an empty cell and `?` for a parquet missing from `parquets`.
    pub fn dump(&self, parquets: &Collection) -> String {
        self.dump_layer(parquets, ParquetStack::top)
    }

    /// Like `dump`, but with a separate labeled picture for every layer.
    pub fn dump_layers(&self, parquets: &Collection) -> String {
        let layers: [(&str, fn(&ParquetStack) -> Id); 4] = [
            ("Floor", ParquetStack::floor),
            ("Block", ParquetStack::block),
            ("Furnishing", ParquetStack::furnishing),
            ("Collectible", ParquetStack::collectible),
        ];

        let mut ret = String::new();
        for (name, layer) in layers {
            ret.push_str(name);
            ret.push_str(":\n");
            ret.push_str(&self.dump_layer(parquets, layer));
        }
        ret
    }

    fn dump_layer(
        &self,
        parquets: &Collection,
        layer: impl Fn(&ParquetStack) -> Id,
    ) -> String {
        let mut ret = String::with_capacity((W + 1) * H);
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                let id = layer(&self.stacks[ivec2(x, y)]);
                ret.push(glyph(parquets, id));
            }
            ret.push('\n');
        }
        ret
    }

    pub fn to_json(&self) -> Result<String> {
        let data = MapData {
            data_version: DATA_VERSION.to_owned(),
            title: self.title.clone(),
            background_color: self.background_color.clone(),
            revision: self.revision,
            dimensions: Self::DIM,
            stacks: self.stacks.as_slice().to_vec(),
            statuses: self.statuses.as_slice().to_vec(),
            special_points: self.special_points.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Load a map saved with `to_json`.
    ///
    /// Documents with a different data version are rejected outright, as are
    /// documents whose dimensions don't match this map type.
    pub fn from_json(s: &str) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_str(s)?;
        if !probe.data_version.eq_ignore_ascii_case(DATA_VERSION) {
            log::warn!(
                "Rejecting map with data version {:?}, expected {:?}",
                probe.data_version,
                DATA_VERSION
            );
            return Err(Error::UnsupportedVersion(probe.data_version));
        }

        let data: MapData = serde_json::from_str(s)?;
        if data.dimensions != Self::DIM {
            return Err(Error::Malformed(format!(
                "map is {}x{}, expected {}x{}",
                data.dimensions.x, data.dimensions.y, W, H
            )));
        }
        let stacks = Grid::from_vec(Self::DIM, data.stacks).ok_or_else(|| {
            Error::Malformed("stack count does not match dimensions".into())
        })?;
        let statuses =
            Grid::from_vec(Self::DIM, data.statuses).ok_or_else(|| {
                Error::Malformed(
                    "status count does not match dimensions".into(),
                )
            })?;
        let points = &data.special_points;
        for (i, a) in points.iter().enumerate() {
            if !stacks.contains(a.position()) {
                return Err(Error::Malformed(format!(
                    "special point outside map at {}",
                    a.position()
                )));
            }
            // At most one point of each kind per position.
            if points[..i].iter().any(|b| {
                b.position() == a.position() && b.is_spawn() == a.is_spawn()
            }) {
                return Err(Error::Malformed(format!(
                    "repeated special point at {}",
                    a.position()
                )));
            }
        }

        Ok(Map {
            title: data.title,
            background_color: data.background_color,
            revision: data.revision,
            stacks,
            statuses,
            special_points: data.special_points,
        })
    }
}

impl<const W: usize, const H: usize> Environs for Map<W, H> {
    fn dimensions(&self) -> IVec2 {
        Self::DIM
    }

    fn stack_at(&self, p: IVec2) -> ParquetStack {
        Map::stack_at(self, p)
    }

    fn is_valid_position(&self, p: IVec2) -> bool {
        Map::is_valid_position(self, p)
    }
}

fn glyph(parquets: &Collection, id: Id) -> char {
    if id.is_none() {
        return '~';
    }
    parquets
        .get_entity(id)
        .and_then(|e| e.name().chars().next())
        .unwrap_or('?')
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct VersionProbe {
    data_version: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MapData {
    data_version: String,
    title: String,
    background_color: String,
    revision: u64,
    dimensions: IVec2,
    stacks: Vec<ParquetStack>,
    statuses: Vec<ParquetStatus>,
    #[serde(default)]
    special_points: Vec<SpecialPoint>,
}
