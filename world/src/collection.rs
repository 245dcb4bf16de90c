use std::{collections::BTreeMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

use crate::{Entity, Error, Id, Kind, Range, Result};

/// Immutable id-to-definition lookup restricted to a set of id ranges.
///
/// Ids are checked against the ranges and for duplicates when the collection
/// is built. `Id::NONE` is implicitly present and maps to nothing.
#[derive(Clone, Debug)]
pub struct Collection {
    ranges: Vec<Range>,
    entities: BTreeMap<Id, Entity>,
}

impl Collection {
    pub fn new(
        ranges: impl IntoIterator<Item = Range>,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Result<Self> {
        let mut ret = Collection::empty(ranges);
        for e in entities {
            ret.insert(e)?;
        }
        Ok(ret)
    }

    pub fn empty(ranges: impl IntoIterator<Item = Range>) -> Self {
        Collection {
            ranges: ranges.into_iter().collect(),
            entities: Default::default(),
        }
    }

    fn insert(&mut self, e: Entity) -> Result<()> {
        let id = e.id();
        if !id.is_valid_for_any(&self.ranges) {
            return Err(Error::IdOutOfRange {
                id,
                category: e.category(),
            });
        }
        if id.is_none() || self.entities.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }
        e.validate()?;
        self.entities.insert(id, e);
        Ok(())
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Number of definitions, not counting the implicit none entry.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Panics if `id` is outside the collection's ranges.
    pub fn contains(&self, id: Id) -> bool {
        self.check(id);
        id.is_none() || self.entities.contains_key(&id)
    }

    pub fn contains_entity(&self, entity: &Entity) -> bool {
        self.entities.get(&entity.id()) == Some(entity)
    }

    /// Panics if `id` is outside the collection's ranges.
    pub fn get_entity(&self, id: Id) -> Option<&Entity> {
        self.check(id);
        self.entities.get(&id)
    }

    /// Fetch a definition as a concrete type.
    ///
    /// Panics if `id` is outside the collection's ranges or if the stored
    /// definition is not a `T`.
    pub fn get<T: Kind>(&self, id: Id) -> Option<&T> {
        let e = self.get_entity(id)?;
        match T::downcast(e) {
            Some(a) => Some(a),
            None => panic!(
                "Collection::get: {} is a {}, not a {}",
                id,
                e.category(),
                T::CATEGORY
            ),
        }
    }

    /// Iterate definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate the definitions of one concrete type in id order.
    pub fn iter_kind<T: Kind>(&self) -> impl Iterator<Item = &T> {
        self.entities.values().filter_map(T::downcast)
    }

    fn check(&self, id: Id) {
        assert!(
            id.is_valid_for_any(&self.ranges),
            "Collection: id {id} is outside ranges {:?}",
            self.ranges
        );
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entities)?)
    }

    /// Load a collection saved with `to_json`, checking it the same way
    /// `new` does.
    pub fn from_json(
        ranges: impl IntoIterator<Item = Range>,
        s: &str,
    ) -> Result<Self> {
        let entries: Entries = serde_json::from_str(s)?;
        Self::from_entries(ranges, entries)
    }

    /// Build from document entries. A key repeated in the document is a
    /// `DuplicateId` error.
    pub(crate) fn from_entries(
        ranges: impl IntoIterator<Item = Range>,
        Entries(entries): Entries,
    ) -> Result<Self> {
        if let Some((key, e)) = entries.iter().find(|(k, e)| *k != e.id()) {
            return Err(Error::Malformed(format!(
                "entry {key} holds definition {}",
                e.id()
            )));
        }
        Collection::new(ranges, entries.into_iter().map(|(_, e)| e))
    }

    pub(crate) fn entities(&self) -> &BTreeMap<Id, Entity> {
        &self.entities
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entity;
    type IntoIter = std::collections::btree_map::Values<'a, Id, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.values()
    }
}

/// Id-keyed definitions of a collection document in document order.
///
/// Unlike a map type, keeps every entry of a repeated key.
#[derive(Default, Debug)]
pub(crate) struct Entries(Vec<(Id, Entity)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of ids to definitions")
            }

            fn visit_map<A>(
                self,
                mut map: A,
            ) -> std::result::Result<Entries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut ret = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    ret.push(entry);
                }
                Ok(Entries(ret))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{All, Block, Definition, Floor, Furnishing, Header, Item};

    fn floor(id: i32) -> Entity {
        Floor::new(Header::new(id, format!("Floor {id}")))
            .unwrap()
            .into()
    }

    fn sample() -> Collection {
        Collection::new(
            All::PARQUET_IDS,
            [
                floor(30_001),
                Block::new(Header::new(40_001, "Wall")).unwrap().into(),
                Furnishing::new(Header::new(50_001, "Door")).unwrap().into(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn construction() {
        let c = sample();
        assert_eq!(c.len(), 3);
        assert!(c.contains(Id::new(30_001)));
        assert!(!c.contains(Id::new(30_002)));
        assert!(c.contains(Id::NONE));
        assert!(c.get_entity(Id::NONE).is_none());
    }

    #[test]
    fn duplicates_fail() {
        assert!(matches!(
            Collection::new(All::PARQUET_IDS, [floor(30_001), floor(30_001)]),
            Err(Error::DuplicateId(id)) if id == Id::new(30_001)
        ));
    }

    #[test]
    fn out_of_range_fails() {
        let item: Entity =
            Item::new(Header::new(110_001, "Seed")).unwrap().into();
        assert!(matches!(
            Collection::new(All::PARQUET_IDS, [item]),
            Err(Error::IdOutOfRange { .. })
        ));
    }

    #[quickcheck]
    fn unique_ids_always_build(ids: Vec<u16>) -> bool {
        let mut ids: Vec<i32> =
            ids.into_iter().map(|a| 30_001 + (a % 9_999) as i32).collect();
        ids.sort();
        ids.dedup();
        let c =
            Collection::new([All::FLOOR_IDS], ids.iter().map(|&a| floor(a)))
                .unwrap();
        c.len() == ids.len()
    }

    #[test]
    fn typed_lookup() {
        let c = sample();
        let f: &Floor = c.get(Id::new(30_001)).unwrap();
        assert_eq!(f.name(), "Floor 30001");
        assert!(c.get::<Block>(Id::new(40_002)).is_none());
        assert_eq!(c.iter_kind::<Block>().count(), 1);
    }

    #[test]
    #[should_panic]
    fn wrong_type_panics() {
        sample().get::<Block>(Id::new(30_001));
    }

    #[test]
    #[should_panic]
    fn out_of_range_query_panics() {
        sample().contains(Id::new(110_001));
    }

    #[test]
    fn json_round_trip() {
        let c = sample();
        let json = c.to_json().unwrap();
        let back = Collection::from_json(All::PARQUET_IDS, &json).unwrap();
        assert_eq!(back.len(), c.len());
        for e in &c {
            let b = back.get_entity(e.id()).unwrap();
            assert_eq!(b.name(), e.name());
            assert_eq!(b.category(), e.category());
        }
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Collection::from_json(All::PARQUET_IDS, "{ nope"),
            Err(Error::Deserialization(_))
        ));
        // Key does not match the stored id.
        let json = r#"{ "30002": { "kind": "floor", "id": 30001, "name": "Grass" } }"#;
        assert!(matches!(
            Collection::from_json(All::PARQUET_IDS, json),
            Err(Error::Malformed(_))
        ));
        // Stored id out of range for its kind.
        let json = r#"{ "40001": { "kind": "floor", "id": 40001, "name": "Grass" } }"#;
        assert!(matches!(
            Collection::from_json(All::PARQUET_IDS, json),
            Err(Error::IdOutOfRange { .. })
        ));
    }

    #[test]
    fn repeated_key_is_a_duplicate() {
        let json = r#"{
            "30001": { "kind": "floor", "id": 30001, "name": "Grass" },
            "30001": { "kind": "floor", "id": 30001, "name": "Moss" }
        }"#;
        assert!(matches!(
            Collection::from_json(All::PARQUET_IDS, json),
            Err(Error::DuplicateId(id)) if id == Id::new(30_001)
        ));
    }
}
