use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;

use chain_hash::HashMap as ChainHashMap;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::distr;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy, Default)]
struct SipBuildHasher;

impl BuildHasher for SipBuildHasher {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> SipHasher {
        SipHasher::new()
    }
}

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

type Chain<K> = ChainHashMap<K, u64, SipBuildHasher>;
type Hashbrown<K> = HashbrownHashMap<K, u64, SipBuildHasher>;

fn chain_map<K: BenchKey>() -> Chain<K> {
    ChainHashMap::with_hasher(SipBuildHasher)
}

fn hashbrown_map<K: BenchKey>() -> Hashbrown<K> {
    HashbrownHashMap::with_hasher(SipBuildHasher)
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
    (1 << 17),
];

fn random_keys<K: BenchKey>(count: usize) -> Vec<(K, u64)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let key = rng.try_next_u64().unwrap();
            (K::new(key), key)
        })
        .collect()
}

fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut SmallRng::from_os_rng());
    items
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let pairs = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || shuffled(&pairs),
                |pairs| {
                    let mut map = chain_map::<K>();
                    for (key, value) in pairs {
                        black_box(map.insert(key, value));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || shuffled(&pairs),
                |pairs| {
                    let mut map = hashbrown_map::<K>();
                    for (key, value) in pairs {
                        black_box(map.insert(key, value));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_collect<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("collect_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let pairs = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || pairs.clone(),
                |pairs| black_box(pairs.into_iter().collect::<Chain<K>>()),
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || pairs.clone(),
                |pairs| black_box(pairs.into_iter().collect::<Hashbrown<K>>()),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let pairs = random_keys::<K>(size);
        let chain: Chain<K> = pairs.iter().cloned().collect();
        let hashbrown: Hashbrown<K> = pairs.iter().cloned().collect();
        let lookups = shuffled(&pairs);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter(|| {
                for (key, _) in lookups.iter() {
                    black_box(chain.get(key));
                }
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                for (key, _) in lookups.iter() {
                    black_box(hashbrown.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_find_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let pairs = random_keys::<K>(size);
        let chain: Chain<K> = pairs.iter().cloned().collect();
        let hashbrown: Hashbrown<K> = pairs.iter().cloned().collect();
        let misses: Vec<K> = random_keys::<K>(size)
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !chain.contains_key(key))
            .collect();

        group.throughput(Throughput::Elements(misses.len() as u64));
        group.bench_function("chain_hash", |b| {
            b.iter(|| {
                for key in misses.iter() {
                    black_box(chain.find(key).is_end());
                }
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                for key in misses.iter() {
                    black_box(hashbrown.get(key).is_none());
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let pairs = random_keys::<K>(size);
        let chain: Chain<K> = pairs.iter().cloned().collect();
        let hashbrown: Hashbrown<K> = pairs.iter().cloned().collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || (chain.clone(), shuffled(&pairs)),
                |(mut map, order)| {
                    for (key, _) in order.iter() {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || (hashbrown.clone(), shuffled(&pairs)),
                |(mut map, order)| {
                    for (key, _) in order.iter() {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let pairs = random_keys::<K>(size);
        let chain: Chain<K> = pairs.iter().cloned().collect();
        let hashbrown: Hashbrown<K> = pairs.iter().cloned().collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter(|| black_box(chain.values().sum::<u64>()))
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| black_box(hashbrown.values().sum::<u64>()))
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Find,
    Remove,
}

fn bench_mixed_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    const KEY_SPACE_MULTIPLIER: usize = 2;

    for &size in SIZES[..=MAX_SIZE].iter() {
        let mut rng = SmallRng::from_os_rng();
        let key_distr = Zipf::new((size * KEY_SPACE_MULTIPLIER) as f32 - 1.0, 1.0).unwrap();

        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(distr::Uniform::new(0.0, 1.0).unwrap());
                let op = if op_choice < 0.5 {
                    Operation::Find
                } else if op_choice < 0.75 {
                    Operation::Insert
                } else {
                    Operation::Remove
                };
                let key = rng.sample(key_distr) as u64;
                (op, K::new(key), key)
            })
            .collect::<Vec<(Operation, K, u64)>>();

        group.throughput(Throughput::Elements(operations.len() as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = chain_map::<K>();
                    for (op, key, value) in operations {
                        match op {
                            Operation::Insert => {
                                black_box(map.insert(key, value));
                            }
                            Operation::Find => {
                                black_box(map.get(&key));
                            }
                            Operation::Remove => {
                                black_box(map.remove(&key));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = hashbrown_map::<K>();
                    for (op, key, value) in operations {
                        match op {
                            Operation::Insert => {
                                black_box(map.insert(key, value));
                            }
                            Operation::Find => {
                                black_box(map.get(&key));
                            }
                            Operation::Remove => {
                                black_box(map.remove(&key));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// Every key is inserted and later removed, so the map grows and shrinks
// through its whole capacity range.
fn bench_churn<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let toggles = (0..size as u64)
            .flat_map(|i| [(K::new(i), i), (K::new(i), i)])
            .collect::<Vec<(K, u64)>>();

        group.throughput(Throughput::Elements(toggles.len() as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || shuffled(&toggles),
                |toggles| {
                    let mut map = chain_map::<K>();
                    for (key, value) in toggles {
                        if map.remove(&key).is_none() {
                            map.insert(key, value);
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || shuffled(&toggles),
                |toggles| {
                    let mut map = hashbrown_map::<K>();
                    for (key, value) in toggles {
                        if map.remove(&key).is_none() {
                            map.insert(key, value);
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<u64, 7>,
    bench_insert_random::<StringKey, 6>,
    bench_collect::<u64, 7>,
    bench_collect::<StringKey, 6>,
    bench_find_hit::<u64, 7>,
    bench_find_hit::<StringKey, 6>,
    bench_find_miss::<u64, 7>,
    bench_find_miss::<StringKey, 6>,
    bench_remove::<u64, 7>,
    bench_remove::<StringKey, 6>,
    bench_iteration::<u64, 7>,
    bench_iteration::<StringKey, 6>,
    bench_mixed_zipf::<u64, 7>,
    bench_mixed_zipf::<StringKey, 6>,
    bench_churn::<u64, 7>,
    bench_churn::<StringKey, 6>,
);

criterion_main!(benches);
