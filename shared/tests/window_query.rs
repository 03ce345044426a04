use approx::assert_relative_eq;
use galaxy_shared::class::{LodTable, StellarClass, StellarClassTable, CLASSES};
use galaxy_shared::data::world::{GalaxyWindow, WorldPosition, DISPLAY_SIZE};
use galaxy_shared::query::covering_sectors;
use galaxy_shared::session::{Axis, Direction, ZOOM_STOPS};
use galaxy_shared::{query, Generator, SectorGenerator, ViewerSession};
use std::sync::Arc;

fn window(x: f32, y: f32, z: f32, zoom: f32) -> GalaxyWindow {
	GalaxyWindow::new(WorldPosition::new(x, y, z), zoom)
}

#[test]
fn query_returns_only_stars_inside_the_window() {
	let window = window(50_050.0, 50_050.0, 12_500.0, 100.0);
	let stars = query(&SectorGenerator::default(), &window).unwrap();
	assert!(!stars.is_empty());

	for star in &stars {
		assert!(window.contains(&star.position), "{:?} outside the window", star.position);

		let display = star.display.expect("query results are projected");
		assert!(display.iter().all(|coordinate| (0.0..=DISPLAY_SIZE).contains(coordinate)));
		assert_relative_eq!(display, (star.position - window.min()) * 10.0, max_relative = 1e-3);
	}
}

#[test]
fn query_matches_a_sequential_walk() {
	let window = window(50_050.0, 50_050.0, 12_500.0, 100.0);
	let generator = SectorGenerator::default();

	let expected = covering_sectors(&window)
		.iter()
		.flat_map(|sector| generator.generate_sector(sector, window.zoom_index()))
		.filter(|star| window.contains(&star.position))
		.map(|star| star.projected(&window))
		.collect::<Vec<_>>();

	assert_eq!(query(&generator, &window).unwrap(), expected);
	assert_eq!(query(&generator, &window).unwrap(), expected);
}

#[test]
fn wider_windows_see_everything_narrower_ones_do() {
	let generator = SectorGenerator::default();
	let narrow = query(&generator, &window(50_000.0, 50_000.0, 12_500.0, 100.0)).unwrap();
	let wide = query(&generator, &window(50_000.0, 50_000.0, 12_500.0, 200.0)).unwrap();

	assert!(wide.len() > narrow.len());
	for star in &narrow {
		assert!(wide.iter().any(|other| other.position == star.position && other.class == star.class));
	}
}

#[test]
fn lod_table_limits_the_classes_in_a_query() {
	let lod = LodTable::new([7, 7, 7, 7, 7, 1, 1, 1, 1, 1, 1]);
	let generator = SectorGenerator::new(StellarClassTable::new(CLASSES.to_vec(), lod));

	let stars = query(&generator, &window(50_000.0, 50_000.0, 12_500.0, 100.0)).unwrap();
	assert!(stars.iter().all(|star| matches!(star.class, StellarClass::O | StellarClass::B)));

	let fine = query(&generator, &window(50_000.0, 50_000.0, 12_500.0, 32.0)).unwrap();
	assert!(fine.iter().any(|star| star.class == StellarClass::M));
}

#[test]
fn every_zoom_stop_has_a_bounded_population() {
	const LIMIT: usize = 10_000_000;
	let table = StellarClassTable::default();

	for zoom in ZOOM_STOPS {
		// Misaligned in x and y, the largest sector cover for this zoom
		let window = window(50_050.0, 50_050.0, 12_500.0, zoom);

		let per_sector: u32 = table
			.active_classes(window.zoom_index())
			.iter()
			.map(|spec| *spec.population_bounds().end())
			.sum();
		let worst_case = covering_sectors(&window).len() * per_sector as usize;

		assert!(worst_case <= LIMIT, "zoom {zoom}: up to {worst_case} stars");
	}
}

#[test]
fn session_reuses_results_until_the_view_changes() {
	let mut session: ViewerSession = ViewerSession::default();

	let first = session.stars().unwrap();
	let again = session.stars().unwrap();
	assert!(Arc::ptr_eq(&first, &again));

	session.zoom_out();
	let wider = session.stars().unwrap();
	assert!(!Arc::ptr_eq(&first, &wider));
	assert!(wider.len() > first.len());

	// Returning to the cached view before querying again still hits
	session.step(Axis::Z, Direction::Forward);
	session.step(Axis::Z, Direction::Backward);
	let back = session.stars().unwrap();
	assert!(Arc::ptr_eq(&wider, &back));
	assert_eq!((session.cache().hits(), session.cache().misses()), (2, 2));

	session.step(Axis::Z, Direction::Forward);
	let moved = session.stars().unwrap();
	assert!(!Arc::ptr_eq(&wider, &moved));
	assert_eq!((session.cache().hits(), session.cache().misses()), (2, 3));
}
