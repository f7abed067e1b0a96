use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed derived from the event id; same event, same seed on every platform
pub fn event_seed(event_id: &str) -> u64 {
    crc32fast::hash(event_id.as_bytes()) as u64
}

/// Fresh generator for one event. Each list gets its own so the crew order
/// doesn't depend on how many boats were shuffled before it.
pub fn event_rng(event_id: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(event_seed(event_id))
}

/// Shuffles `items` in place, reproducibly for a given event
pub fn shuffle_for_event<T>(items: &mut [T], event_id: &str) {
    let mut rng = event_rng(event_id);
    items.shuffle(&mut rng);
}
