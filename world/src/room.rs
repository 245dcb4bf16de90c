use std::sync::OnceLock;

use glam::IVec2;
use util::{HashSet, DIR_8};

use crate::{
    All, Block, Collection, Definition, Environs, Error, Furnishing, Id,
    Result, RoomRecipe, Tag, MAX_WALKABLE_SPACES, MIN_WALKABLE_SPACES,
};

/// Enclosed walkable area of a map together with the cells enclosing it.
///
/// A room doesn't refer back to the map it was found on. Derived values are
/// computed from the map on first use and kept until `clear_caches` is
/// called, whoever edits the map under a room must call it.
#[derive(Clone, Debug)]
pub struct Room {
    walkable: HashSet<IVec2>,
    perimeter: HashSet<IVec2>,
    position: IVec2,
    furnishing_tags: OnceLock<Vec<Tag>>,
    recipe_id: OnceLock<Id>,
}

impl Room {
    /// Build a room, checking its size, that the two areas are disjoint,
    /// that the perimeter is large enough to enclose the walkable area and
    /// that there is an entry furnishing somewhere in the room.
    pub fn new(
        walkable: impl IntoIterator<Item = IVec2>,
        perimeter: impl IntoIterator<Item = IVec2>,
        env: &impl Environs,
        parquets: &Collection,
    ) -> Result<Self> {
        let walkable: HashSet<IVec2> = walkable.into_iter().collect();
        let perimeter: HashSet<IVec2> = perimeter.into_iter().collect();

        let n = walkable.len();
        if !(MIN_WALKABLE_SPACES..=MAX_WALKABLE_SPACES).contains(&n) {
            return Err(Error::InvalidRoom(format!(
                "walkable area of {n} cells is outside [{MIN_WALKABLE_SPACES}, \
                 {MAX_WALKABLE_SPACES}]"
            )));
        }
        if let Some(p) = walkable.intersection(&perimeter).next() {
            return Err(Error::InvalidRoom(format!(
                "{p} is both walkable and perimeter"
            )));
        }
        if perimeter.len() < 2 * n + 2 {
            return Err(Error::InvalidRoom(format!(
                "perimeter of {} cells can't enclose {n} walkable cells",
                perimeter.len()
            )));
        }
        let is_entry = |p: IVec2| {
            furnishing(env, parquets, p).is_some_and(|f| f.is_entry())
        };
        if !walkable.iter().chain(&perimeter).any(|&p| is_entry(p)) {
            return Err(Error::InvalidRoom("room has no entry".into()));
        }

        let position = perimeter.iter().fold(IVec2::MAX, |a, &b| a.min(b));

        Ok(Room {
            walkable,
            perimeter,
            position,
            furnishing_tags: Default::default(),
            recipe_id: Default::default(),
        })
    }

    pub fn walkable_area(&self) -> &HashSet<IVec2> {
        &self.walkable
    }

    pub fn perimeter(&self) -> &HashSet<IVec2> {
        &self.perimeter
    }

    /// Top left corner of the room's bounding box.
    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn contains(&self, p: IVec2) -> bool {
        self.walkable.contains(&p) || self.perimeter.contains(&p)
    }

    fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.walkable.iter().chain(&self.perimeter).copied()
    }

    /// Room tags of every furnishing in the room, repeats included.
    pub fn furnishing_tags(
        &self,
        env: &impl Environs,
        parquets: &Collection,
    ) -> &[Tag] {
        self.furnishing_tags.get_or_init(|| {
            self.cells()
                .filter_map(|p| furnishing(env, parquets, p))
                .flat_map(|f| f.parquet().adds_to_room().iter().copied())
                .collect()
        })
    }

    /// Best matching room recipe, or `Id::NONE` if nothing matches.
    pub fn recipe_id(&self, env: &impl Environs, all: &All) -> Id {
        *self
            .recipe_id
            .get_or_init(|| find_best_match(self, env, all))
    }

    /// Forget derived values after the map under the room has changed.
    pub fn clear_caches(&mut self) {
        self.furnishing_tags.take();
        self.recipe_id.take();
    }
}

fn furnishing<'a>(
    env: &impl Environs,
    parquets: &'a Collection,
    p: IVec2,
) -> Option<&'a Furnishing> {
    parquets.get::<Furnishing>(env.stack_at(p).furnishing())
}

/// Id of the matching room recipe with the highest id, or `Id::NONE` if no
/// recipe matches.
pub fn find_best_match(room: &Room, env: &impl Environs, all: &All) -> Id {
    all.room_recipes()
        .iter_kind::<RoomRecipe>()
        .filter(|r| r.matches(room, env, all.parquets()))
        .map(|r| r.id())
        .max()
        .unwrap_or(Id::NONE)
}

/// The rooms of a map. No cell belongs to more than one room.
#[derive(Clone, Default, Debug)]
pub struct RoomCollection {
    rooms: Vec<Room>,
}

impl RoomCollection {
    /// Fails if any two rooms share a cell.
    pub fn new(rooms: impl IntoIterator<Item = Room>) -> Result<Self> {
        let mut occupied = HashSet::default();
        let mut ret = Vec::new();
        for room in rooms {
            for p in room.cells() {
                if !occupied.insert(p) {
                    return Err(Error::OverlappingRooms(p));
                }
            }
            ret.push(room);
        }
        Ok(RoomCollection { rooms: ret })
    }

    /// Find every room on a map.
    ///
    /// A room is a 4-connected walkable area completely ringed, diagonals
    /// included, by enclosing cells within the map. Areas that would share
    /// cells with a room found earlier in scanline order are skipped.
    pub fn detect(env: &impl Environs, parquets: &Collection) -> Self {
        let dim = env.dimensions();
        let mut seen = HashSet::default();
        let mut occupied: HashSet<IVec2> = HashSet::default();
        let mut rooms = Vec::new();

        let walkable = |p: IVec2| is_walkable(env, parquets, p);

        for y in 0..dim.y {
            for x in 0..dim.x {
                let start = IVec2::new(x, y);
                if seen.contains(&start) || !walkable(start) {
                    continue;
                }

                let area = util::flood_fill(
                    start,
                    &true,
                    |p| env.is_valid_position(p),
                    walkable,
                    |a, b| a == b,
                );
                seen.extend(area.iter().copied());

                let n = area.len();
                if !(MIN_WALKABLE_SPACES..=MAX_WALKABLE_SPACES).contains(&n) {
                    log::debug!("Area at {start} has {n} cells, not a room");
                    continue;
                }

                let ring: HashSet<IVec2> = area
                    .iter()
                    .flat_map(|&p| DIR_8.iter().map(move |&d| p + d))
                    .filter(|p| !area.contains(p))
                    .collect();
                let is_wall = |p: IVec2| {
                    env.is_valid_position(p) && is_enclosing(env, parquets, p)
                };
                if let Some(p) = ring.iter().find(|&&p| !is_wall(p)) {
                    log::debug!("Area at {start} is open at {p}, not a room");
                    continue;
                }
                if let Some(p) =
                    area.iter().chain(&ring).find(|&&p| occupied.contains(&p))
                {
                    log::debug!(
                        "Area at {start} overlaps an earlier room at {p}"
                    );
                    continue;
                }

                match Room::new(area, ring, env, parquets) {
                    Ok(room) => {
                        occupied.extend(room.cells());
                        rooms.push(room);
                    }
                    Err(e) => log::debug!("Area at {start} rejected: {e}"),
                }
            }
        }

        RoomCollection { rooms }
    }

    /// The room whose walkable area or perimeter contains `p`.
    pub fn get_room_at(&self, p: IVec2) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn clear_caches(&mut self) {
        for r in &mut self.rooms {
            r.clear_caches();
        }
    }
}

/// Floor present, no block, furnishing absent or walkable.
fn is_walkable(env: &impl Environs, parquets: &Collection, p: IVec2) -> bool {
    let s = env.stack_at(p);
    s.floor().is_some()
        && s.block().is_none()
        && (s.furnishing().is_none()
            || furnishing(env, parquets, p).is_some_and(|f| f.is_walkable()))
}

/// Solid block or a furnishing that can stand in for a wall.
fn is_enclosing(env: &impl Environs, parquets: &Collection, p: IVec2) -> bool {
    let s = env.stack_at(p);
    if let Some(b) = parquets.get::<Block>(s.block()) {
        if !b.is_liquid() {
            return true;
        }
    }
    furnishing(env, parquets, p)
        .is_some_and(|f| f.is_enclosing() || f.is_entry())
}
