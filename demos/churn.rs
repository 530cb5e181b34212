use range_id_allocator::{AllocError, IdAllocator};
use std::env;
use std::sync::Arc;
use std::thread;

/// Several workers repeatedly take and return ids from one shared allocator.
///
/// Usage: cargo run --example churn [workers] [ids]
fn main() {
    let args: Vec<String> = env::args().collect();
    let workers: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);
    let capacity: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);

    let ids = Arc::new(IdAllocator::new(1, capacity));
    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                let mut held = Vec::new();
                let mut exhausted = 0usize;

                for round in 0..10_000usize {
                    // Hold a few ids at a time, releasing the oldest as we go.
                    match ids.allocate() {
                        Ok(id) => held.push(id),
                        Err(AllocError::Exhausted) => exhausted += 1,
                    }
                    if held.len() > 1 + (round + worker) % 8 {
                        ids.free(held.remove(0));
                    }
                }
                for id in held {
                    ids.free(id);
                }
                exhausted
            })
        })
        .collect();

    let mut exhausted = 0;
    for handle in handles {
        exhausted += handle.join().expect("worker panicked");
    }

    println!("=== Statistics ===");
    println!("Workers: {}", workers);
    println!("Id range: {}", ids.bounds());
    println!("Exhausted allocations: {}", exhausted);
    println!("Free ids at end: {}/{}", ids.free_count(), ids.capacity());
    println!("Free ranges at end: {}", ids.free_ranges().len());
}
