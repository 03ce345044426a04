use crate::data::world::WorldPosition;
use crate::generation::Star;
use log::trace;
use std::sync::Arc;

pub type QueryResult = Arc<[Star]>;

struct CacheEntry {
	position: WorldPosition,
	zoom: f32,
	result: QueryResult,
}

/// Remembers the most recent query result.
///
/// Keys are compared with exact float equality, callers must move the position in exactly repeatable steps for
/// revisits to hit.
#[derive(Default)]
pub struct QueryCache {
	entry: Option<CacheEntry>,
	hits: u64,
	misses: u64,
}

impl QueryCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the stored result if it was computed for exactly this position and zoom, otherwise runs `compute` and
	/// stores what it returns. A failed `compute` leaves the previous entry in place.
	pub fn get<E>(
		&mut self,
		position: WorldPosition,
		zoom: f32,
		compute: impl FnOnce() -> Result<Vec<Star>, E>,
	) -> Result<QueryResult, E> {
		if let Some(entry) = &self.entry {
			if entry.position == position && entry.zoom == zoom {
				self.hits += 1;
				trace!("Query cache hit at {position}, zoom {zoom}");
				return Ok(entry.result.clone());
			}
		}

		let result: QueryResult = compute()?.into();
		self.misses += 1;
		self.entry = Some(CacheEntry {
			position,
			zoom,
			result: result.clone(),
		});

		Ok(result)
	}

	pub fn hits(&self) -> u64 {
		self.hits
	}

	pub fn misses(&self) -> u64 {
		self.misses
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::convert::Infallible;

	fn here() -> WorldPosition {
		WorldPosition::new(50_000.0, 50_000.0, 12_500.0)
	}

	#[test]
	fn first_lookup_computes() {
		let mut cache = QueryCache::new();
		assert_eq!((cache.hits(), cache.misses()), (0, 0));

		let mut called = false;
		cache
			.get(here(), 100.0, || {
				called = true;
				Ok::<_, Infallible>(vec![])
			})
			.unwrap();

		assert!(called);
		assert_eq!((cache.hits(), cache.misses()), (0, 1));
	}

	#[test]
	fn identical_keys_hit() {
		let mut cache = QueryCache::new();
		let mut calls = 0;

		let first = cache
			.get(here(), 100.0, || {
				calls += 1;
				Ok::<_, Infallible>(vec![])
			})
			.unwrap();
		let second = cache
			.get(here(), 100.0, || {
				calls += 1;
				Ok::<_, Infallible>(vec![])
			})
			.unwrap();

		assert_eq!(calls, 1);
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!((cache.hits(), cache.misses()), (1, 1));
	}

	#[test]
	fn any_key_change_misses() {
		let mut cache = QueryCache::new();
		let mut calls = 0;
		let mut compute = || {
			calls += 1;
			Ok::<_, Infallible>(vec![])
		};

		cache.get(here(), 100.0, &mut compute).unwrap();
		cache.get(here(), 200.0, &mut compute).unwrap();
		cache.get(WorldPosition::new(50_010.0, 50_000.0, 12_500.0), 200.0, &mut compute).unwrap();
		cache.get(here(), 100.0, &mut compute).unwrap();

		assert_eq!(calls, 4);
	}

	#[test]
	fn nearly_equal_keys_miss() {
		let mut cache = QueryCache::new();
		cache.get(here(), 100.0, || Ok::<_, Infallible>(vec![])).unwrap();

		let nudged = WorldPosition::new(50_000.004, 50_000.0, 12_500.0);
		assert_ne!(nudged, here());
		cache.get(nudged, 100.0, || Ok::<_, Infallible>(vec![])).unwrap();

		assert_eq!(cache.misses(), 2);
	}

	#[test]
	fn failures_keep_the_previous_entry() {
		let mut cache = QueryCache::new();
		let stored = cache.get(here(), 100.0, || Ok::<_, ()>(vec![])).unwrap();

		assert!(cache.get(here(), 0.0, || Err(())).is_err());

		let mut called = false;
		let again = cache
			.get(here(), 100.0, || {
				called = true;
				Ok::<_, ()>(vec![])
			})
			.unwrap();
		assert!(!called);
		assert!(Arc::ptr_eq(&stored, &again));
	}
}
