#![cfg(test)]

// Property tests for HashMap run against std::collections::HashMap as the
// model, once with a keyed SipHasher and once with a hasher that sends every
// key to the same bucket.

use core::hash::BuildHasher;
use core::hash::BuildHasherDefault;
use core::hash::Hasher;
use std::collections::BTreeMap;
use std::collections::HashMap as StdHashMap;
use std::string::String;
use std::vec::Vec;

use proptest::prelude::*;
use siphasher::sip::SipHasher;

use crate::HashMap;

#[derive(Clone, Default)]
struct FixedSip;

impl BuildHasher for FixedSip {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> SipHasher {
        SipHasher::new_with_keys(0x5eed, 0xcafe)
    }
}

// Every key hashes to zero, so the whole map is one chain.
#[derive(Default)]
struct ConstantHasher;

impl Hasher for ConstantHasher {
    fn finish(&self) -> u64 {
        0
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

type Colliding = BuildHasherDefault<ConstantHasher>;

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    GetOrDefault(usize),
    EntryAdd(usize, i32),
    Remove(usize),
    Find(usize),
    At(usize),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            2 => idx.clone().prop_map(Op::GetOrDefault),
            2 => (idx.clone(), -100..100i32).prop_map(|(i, d)| Op::EntryAdd(i, d)),
            5 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Find),
            2 => idx.clone().prop_map(Op::At),
            1 => (idx.clone(), -100..100i32).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_load<S>(sut: &HashMap<String, i32, S>) -> Result<(), TestCaseError> {
    let (len, cap) = (sut.len(), sut.capacity());
    if len == 0 {
        prop_assert_eq!(cap, 0, "an emptied map holds no buckets");
    } else {
        prop_assert!(len * 3 <= cap, "load above 1/3: len {} cap {}", len, cap);
        prop_assert!(len * 20 >= cap, "load below 1/20: len {} cap {}", len, cap);
    }
    Ok(())
}

fn check_contents<S: BuildHasher>(
    sut: &HashMap<String, i32, S>,
    model: &StdHashMap<String, i32>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());

    let seen: BTreeMap<&String, &i32> = sut.iter().collect();
    prop_assert_eq!(seen.len(), sut.len(), "iteration yielded a key twice");
    for (k, v) in model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

fn run_state_machine<S: BuildHasher + Default>(
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut sut: HashMap<String, i32, S> = HashMap::default();
    let mut model: StdHashMap<String, i32> = StdHashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let cap_before = sut.capacity();
                let replaced = sut.insert(k.clone(), v);
                let expected = model.insert(k, v);
                if expected.is_some() {
                    prop_assert_eq!(sut.capacity(), cap_before, "overwrite must not rebuild");
                }
                prop_assert_eq!(replaced, expected);
            }
            Op::GetOrDefault(i) => {
                let k = pool[i].clone();
                let got = *sut.get_or_default(k.clone());
                let expected = *model.entry(k).or_default();
                prop_assert_eq!(got, expected);
            }
            Op::EntryAdd(i, d) => {
                let k = pool[i].clone();
                *sut.entry(k.clone()).or_insert(0) += d;
                *model.entry(k).or_insert(0) += d;
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.find(k).is_end(), "removed key still found");
            }
            Op::Find(i) => {
                let k = &pool[i];
                let cursor = sut.find(k);
                match model.get(k) {
                    Some(v) => {
                        prop_assert_eq!(cursor.get(), Some((k, v)));
                    }
                    None => prop_assert_eq!(cursor, sut.cursor_end()),
                }
            }
            Op::At(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.at(k).ok(), model.get(k));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::Iterate => {
                let mut cursor = sut.cursor_begin();
                let mut walked = 0;
                while !cursor.is_end() {
                    let (k, v) = cursor.get().ok_or_else(|| TestCaseError::fail("cursor lost entry"))?;
                    prop_assert_eq!(model.get(k), Some(v));
                    cursor.move_next();
                    walked += 1;
                }
                prop_assert_eq!(walked, model.len());
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        check_load(&sut)?;
        check_contents(&sut, &model)?;
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine::<FixedSip>(&pool, ops)?;
    }

    #[test]
    fn prop_state_machine_single_chain((pool, ops) in arb_scenario()) {
        run_state_machine::<Colliding>(&pool, ops)?;
    }

    // Bulk construction keeps the last value for each key and sizes the
    // table at five buckets per distinct key.
    #[test]
    fn prop_bulk_load_matches_model(
        pairs in proptest::collection::vec(("[a-c]{0,3}", any::<i32>()), 0..64)
    ) {
        let sut: HashMap<String, i32, FixedSip> = pairs.iter().cloned().collect();
        let model: StdHashMap<String, i32> = pairs.into_iter().collect();

        prop_assert_eq!(sut.capacity(), model.len() * 5);
        check_contents(&sut, &model)?;
    }

    // Growth and shrink rebuilds never lose or duplicate an entry.
    #[test]
    fn prop_rebuilds_preserve_contents(n in 1usize..200, keep_every in 2usize..7) {
        let mut sut: HashMap<u32, u32, FixedSip> = HashMap::default();
        for i in 0..n as u32 {
            prop_assert_eq!(sut.insert(i, i * 2), None);
        }
        prop_assert_eq!(sut.capacity() % 5, 0);

        for i in 0..n as u32 {
            if i as usize % keep_every != 0 {
                prop_assert_eq!(sut.remove(&i), Some(i * 2));
                prop_assert!(sut.is_empty() || sut.len() * 20 >= sut.capacity());
            }
        }

        let mut remaining: Vec<u32> = sut.keys().copied().collect();
        remaining.sort_unstable();
        let expected: Vec<u32> = (0..n as u32).filter(|i| *i as usize % keep_every == 0).collect();
        prop_assert_eq!(remaining, expected);
    }

    // Draining yields every entry once and leaves no buckets behind.
    #[test]
    fn prop_drain_empties(keys in proptest::collection::btree_set(any::<u16>(), 0..80)) {
        let mut sut: HashMap<u16, (), FixedSip> = keys.iter().map(|&k| (k, ())).collect();
        let drained: std::collections::BTreeSet<u16> = sut.drain().map(|(k, _)| k).collect();

        prop_assert_eq!(drained, keys);
        prop_assert!(sut.is_empty());
        prop_assert_eq!(sut.capacity(), 0);
    }
}
