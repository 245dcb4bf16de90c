mod fixture;

use glam::ivec2;
use pretty_assertions::assert_eq;
use world::{Chunk, Id, Region, RoomCollection};

use fixture::{BEDROOM, DORMITORY};

const TWO_ROOMS: &str = "
    ######______
    #b..b+______
    ######______
    ____________
    _#######____
    _+.b.b.#____
    _#######____";

#[test]
fn detect_and_match() {
    let all = fixture::all();
    let map: Region = fixture::map(TWO_ROOMS);
    let rooms = RoomCollection::detect(&map, all.parquets());
    assert_eq!(rooms.len(), 2);

    let small = rooms.get_room_at(ivec2(2, 1)).unwrap();
    assert_eq!(small.walkable_area().len(), 4);
    assert_eq!(small.perimeter().len(), 14);
    assert_eq!(small.position(), ivec2(0, 0));
    assert_eq!(small.furnishing_tags(&map, all.parquets()).len(), 2);
    // Too small to be a dormitory.
    assert_eq!(small.recipe_id(&map, &all), Id::new(BEDROOM));

    let large = rooms.get_room_at(ivec2(1, 5)).unwrap();
    assert_eq!(large.walkable_area().len(), 5);
    assert_eq!(large.position(), ivec2(1, 4));
    assert_eq!(large.recipe_id(&map, &all), Id::new(DORMITORY));

    // Door is part of the perimeter.
    assert!(rooms.get_room_at(ivec2(5, 1)).is_some());
    assert!(rooms.get_room_at(ivec2(0, 3)).is_none());
}

#[test]
fn liquid_does_not_enclose() {
    let all = fixture::all();
    let art = TWO_ROOMS.replacen("_#######", "_###~###", 1);
    let map: Region = fixture::map(&art);
    let rooms = RoomCollection::detect(&map, all.parquets());
    assert_eq!(rooms.len(), 1);
    assert!(rooms.get_room_at(ivec2(3, 5)).is_none());
}

#[test]
fn small_areas_are_skipped() {
    let all = fixture::all();
    let map: Chunk = fixture::map(
        "
        ########
        #b.+.b.#
        ########",
    );
    assert!(RoomCollection::detect(&map, all.parquets()).is_empty());
}

#[test]
fn larger_enclosures_are_not_rooms() {
    let all = fixture::all();
    // A 3x3 interior has a ring of 16 cells, short of the 2 * 9 + 2 needed.
    let map: Chunk = fixture::map(
        "
        #####
        #b..#
        #...+
        #...#
        #####",
    );
    assert!(RoomCollection::detect(&map, all.parquets()).is_empty());

    // A 2x3 interior is the largest two-wide enclosure that passes.
    let map: Chunk = fixture::map(
        "
        ####
        #b.#
        #..+
        #..#
        ####",
    );
    let rooms = RoomCollection::detect(&map, all.parquets());
    assert_eq!(rooms.len(), 1);
    let room = rooms.iter().next().unwrap();
    assert_eq!(room.walkable_area().len(), 6);
    assert_eq!(room.perimeter().len(), 14);
}

#[test]
fn rooms_need_a_door() {
    let all = fixture::all();
    let map: Region = fixture::map(&TWO_ROOMS.replace('+', "#"));
    assert!(RoomCollection::detect(&map, all.parquets()).is_empty());
}

#[test]
fn shared_wall_goes_to_first_room() {
    let all = fixture::all();
    let map: Region = fixture::map(
        "
        ###########
        #b...+...b#
        ###########",
    );
    let rooms = RoomCollection::detect(&map, all.parquets());
    assert_eq!(rooms.len(), 1);
    // The right side would need the door cells the left room has taken.
    let room = rooms.iter().next().unwrap();
    assert!(room.walkable_area().contains(&ivec2(1, 1)));
    assert!(room.perimeter().contains(&ivec2(5, 1)));
}

#[test]
fn caches_follow_edits_after_clearing() {
    let all = fixture::all();
    let mut map: Region = fixture::map(TWO_ROOMS);
    let mut rooms = RoomCollection::detect(&map, all.parquets());
    let p = ivec2(3, 5);
    assert_eq!(
        rooms.get_room_at(p).unwrap().recipe_id(&map, &all),
        Id::new(DORMITORY)
    );

    // Take out one bed.
    map.try_set_furnishing(0, p).unwrap();
    assert_eq!(
        rooms.get_room_at(p).unwrap().recipe_id(&map, &all),
        Id::new(DORMITORY)
    );
    rooms.clear_caches();
    assert_eq!(
        rooms.get_room_at(p).unwrap().recipe_id(&map, &all),
        Id::new(BEDROOM)
    );
}
