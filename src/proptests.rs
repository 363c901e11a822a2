use super::*;

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::mem;

const IDX: usize = mem::size_of::<usize>();
const CAP: usize = 8;
const VAL: usize = 8;

const RING_SLOTS: usize = 6; // 5 usable records
const ITEM: usize = 4;

fn val_bytes(v: u64) -> [u8; VAL] {
    v.to_ne_bytes()
}

fn val_of(bytes: &[u8]) -> u64 {
    u64::from_ne_bytes(bytes.try_into().unwrap())
}

// Keys drawn from twice the capacity so op sequences regularly collide,
// fill the map, and evict.
fn key_strategy() -> impl Strategy<Value = usize> + Clone {
    0..(CAP * 2)
}

#[derive(Clone, Debug)]
enum MapOp {
    Set(usize, u64),
    Remove(usize),
    Get(usize),
    Clear,
}

fn map_ops() -> impl Strategy<Value = Vec<MapOp>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| MapOp::Set(k, v)),
        25 => key.clone().prop_map(MapOp::Remove),
        24 => key.prop_map(MapOp::Get),
        1 => Just(MapOp::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

#[derive(Clone, Debug)]
enum LruOp {
    Update(usize, u64),
    Remove(usize),
    RemoveFirst,
    RemoveLast,
    Get(usize),
    GetAt(usize),
    Clear,
}

fn lru_ops() -> impl Strategy<Value = Vec<LruOp>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| LruOp::Update(k, v)),
        20 => key.clone().prop_map(LruOp::Remove),
        5 => Just(LruOp::RemoveFirst),
        5 => Just(LruOp::RemoveLast),
        14 => key.prop_map(LruOp::Get),
        5 => (0..CAP + 2).prop_map(LruOp::GetAt),
        1 => Just(LruOp::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

#[derive(Clone, Debug)]
enum RingOp {
    Push(Vec<u32>),
    Pop(usize),
    Skip(usize),
    Get(usize),
    Find(u32),
    Clear,
}

fn ring_ops() -> impl Strategy<Value = Vec<RingOp>> {
    // Record payloads from a small range so Find hits sometimes.
    let record = 0u32..32;
    let op = prop_oneof![
        40 => prop::collection::vec(record.clone(), 0..=4).prop_map(RingOp::Push),
        20 => (0usize..=RING_SLOTS).prop_map(RingOp::Pop),
        10 => (0usize..=RING_SLOTS).prop_map(RingOp::Skip),
        14 => (0usize..=RING_SLOTS).prop_map(RingOp::Get),
        14 => record.prop_map(RingOp::Find),
        2 => Just(RingOp::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_fixed_map_matches_model(ops in map_ops()) {
        let mut keys = [0u8; CAP * IDX];
        let mut vals = [0u8; CAP * VAL];
        let mut map = FixedMap::new(
            ArrayView::new(&mut keys, 1).unwrap(),
            ArrayView::new(&mut vals, VAL).unwrap(),
        )
        .unwrap();
        let mut model: HashMap<usize, u64> = HashMap::new();

        for op in ops {
            match op {
                MapOp::Set(key, value) => {
                    // A full map rejects new keys but still overwrites
                    // existing ones.
                    let expect = model.contains_key(&key) || model.len() < CAP;
                    prop_assert_eq!(map.set(key, &val_bytes(value)), expect);
                    if expect {
                        model.insert(key, value);
                    }
                }
                MapOp::Remove(key) => {
                    prop_assert_eq!(map.remove(key), model.remove(&key).is_some());
                }
                MapOp::Get(key) => {
                    let got = map.get(key).map(val_of);
                    prop_assert_eq!(got, model.get(&key).copied());
                }
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        let mut got: Vec<(usize, u64)> = map.iter().map(|(k, v)| (k, val_of(v))).collect();
        got.sort_unstable();
        let mut expected: Vec<(usize, u64)> = model.into_iter().collect();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_lru_map_matches_model(ops in lru_ops()) {
        let mut prev = [0u8; CAP * IDX];
        let mut next = [0u8; CAP * IDX];
        let mut keys = [0u8; CAP * IDX];
        let mut vals = [0u8; CAP * VAL];
        let mut map = LruMap::new(
            ArrayView::new(&mut prev, 1).unwrap(),
            ArrayView::new(&mut next, 1).unwrap(),
            ArrayView::new(&mut keys, 1).unwrap(),
            ArrayView::new(&mut vals, VAL).unwrap(),
        )
        .unwrap();

        // Reference model: live entries front-to-back in least- to
        // most-recently-updated order.
        let mut model: Vec<(usize, u64)> = Vec::new();

        for op in ops {
            match op {
                LruOp::Update(key, value) => {
                    prop_assert!(map.update(key, &val_bytes(value)));
                    model.retain(|&(k, _)| k != key);
                    if model.len() == CAP {
                        model.remove(0);
                    }
                    model.push((key, value));
                }
                LruOp::Remove(key) => {
                    let expect = model.iter().any(|&(k, _)| k == key);
                    prop_assert_eq!(map.remove(key), expect);
                    model.retain(|&(k, _)| k != key);
                }
                LruOp::RemoveFirst => {
                    prop_assert_eq!(map.remove_first(), !model.is_empty());
                    if !model.is_empty() {
                        model.remove(0);
                    }
                }
                LruOp::RemoveLast => {
                    prop_assert_eq!(map.remove_last(), model.pop().is_some());
                }
                LruOp::Get(key) => {
                    let got = map.get(key).map(val_of);
                    let expected = model.iter().find(|&&(k, _)| k == key).map(|&(_, v)| v);
                    prop_assert_eq!(got, expected);
                }
                LruOp::GetAt(idx) => {
                    let got = map.get_at(idx).map(|(k, v)| (k, val_of(v)));
                    let expected = if idx < CAP { model.get(idx).copied() } else { None };
                    prop_assert_eq!(got, expected);
                }
                LruOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            map.check_invariants();
            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.get_first().map(val_of), model.first().map(|&(_, v)| v));
            prop_assert_eq!(map.get_last().map(val_of), model.last().map(|&(_, v)| v));
        }

        let got: Vec<(usize, u64)> = map.iter().map(|(k, v)| (k, val_of(v))).collect();
        prop_assert_eq!(got, model);
    }

    #[test]
    fn prop_ring_buffer_matches_model(ops in ring_ops()) {
        let mut buf = [0u8; RING_SLOTS * ITEM];
        let mut ring = RingBuffer::new(&mut buf, ITEM).unwrap();
        let capacity = ring.capacity();

        let mut model: VecDeque<[u8; ITEM]> = VecDeque::new();

        for op in ops {
            match op {
                RingOp::Push(records) => {
                    let mut items = Vec::new();
                    for r in &records {
                        items.extend_from_slice(&r.to_ne_bytes());
                    }
                    prop_assert_eq!(ring.push(&items), records.len());
                    for r in records {
                        model.push_back(r.to_ne_bytes());
                        if model.len() > capacity {
                            model.pop_front();
                        }
                    }
                }
                RingOp::Pop(count) => {
                    let mut out = vec![0u8; count * ITEM];
                    let popped = ring.pop(&mut out);
                    prop_assert_eq!(popped, count.min(model.len()));
                    for i in 0..popped {
                        let expected = model.pop_front().unwrap();
                        prop_assert_eq!(&out[i * ITEM..(i + 1) * ITEM], &expected[..]);
                    }
                }
                RingOp::Skip(count) => {
                    prop_assert_eq!(ring.skip(count), count.min(model.len()));
                    for _ in 0..count {
                        model.pop_front();
                    }
                }
                RingOp::Get(index) => {
                    let expected = model.get(index).map(|r| &r[..]);
                    prop_assert_eq!(ring.get(index), expected);
                }
                RingOp::Find(record) => {
                    let needle = record.to_ne_bytes();
                    let expected = model.iter().position(|r| r == &needle);
                    prop_assert_eq!(ring.find(&needle), expected);
                }
                RingOp::Clear => {
                    ring.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.is_empty(), model.is_empty());
            prop_assert_eq!(ring.is_full(), model.len() == capacity);
        }
    }
}

#[test]
fn lru_chain_survives_interleaved_churn() {
    // Deterministic worst-case churn: repeatedly fill past capacity, then
    // remove from both ends, keeping the chain and slot states consistent.
    let mut prev = [0u8; CAP * IDX];
    let mut next = [0u8; CAP * IDX];
    let mut keys = [0u8; CAP * IDX];
    let mut vals = [0u8; CAP * VAL];
    let mut map = LruMap::new(
        ArrayView::new(&mut prev, 1).unwrap(),
        ArrayView::new(&mut next, 1).unwrap(),
        ArrayView::new(&mut keys, 1).unwrap(),
        ArrayView::new(&mut vals, VAL).unwrap(),
    )
    .unwrap();

    for round in 0..50usize {
        for i in 0..CAP + 3 {
            assert!(map.update(round * 100 + i, &val_bytes(i as u64)));
            map.check_invariants();
        }
        assert_eq!(map.len(), CAP);
        assert!(map.remove_first());
        assert!(map.remove_last());
        map.check_invariants();
        assert_eq!(map.len(), CAP - 2);
    }
}
