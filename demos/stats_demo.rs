use std::collections::hash_map::DefaultHasher;
use std::hash::BuildHasherDefault;

use chain_hash::HashMap;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    /// Percentage of the entries to remove after filling.
    #[arg(short = 'r', long = "remove_percent", default_value_t = 90)]
    remove_percent: usize,
}

fn report(map: &HashMap<u64, u64, BuildHasherDefault<DefaultHasher>>) {
    println!("Entries: {}, buckets: {}", map.len(), map.capacity());
    if map.capacity() > 0 {
        println!(
            "Load factor: {:.2}%",
            (map.len() as f64 / map.capacity() as f64) * 100.0
        );
    }
    map.chain_histogram().print();
    map.debug_stats().print();
}

fn main() {
    let args = Args::parse();

    println!("Filling HashMap with {} u64 keys...", args.entries);

    let mut map: HashMap<u64, u64, BuildHasherDefault<DefaultHasher>> = HashMap::default();
    let mut rebuilds = 0;
    for key in 0..args.entries as u64 {
        let before = map.capacity();
        map.insert(key, key * 2);
        if map.capacity() != before {
            rebuilds += 1;
        }
    }

    println!("Growth rebuilds: {}", rebuilds);
    report(&map);

    let to_remove = args.entries * args.remove_percent.min(100) / 100;
    println!();
    println!("Removing {} keys...", to_remove);

    let mut rebuilds = 0;
    for key in 0..to_remove as u64 {
        let before = map.capacity();
        map.remove(&key);
        if map.capacity() != before {
            rebuilds += 1;
        }
    }

    println!("Shrink rebuilds: {}", rebuilds);
    report(&map);
}
