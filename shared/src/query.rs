use crate::data::world::{GalaxyWindow, SectorCoordinates, WorldPosition, DISPLAY_SIZE, SECTOR_SIZE};
use crate::generation::{Generator, Star};
use log::debug;
use nalgebra::vector;
use rayon::prelude::*;
use std::time::Instant;
use thiserror::Error;

const SECTOR_STEP: u32 = SECTOR_SIZE as u32;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum InvalidInput {
	#[error("invalid input: zoom must be positive and finite, got {0}")]
	Zoom(f32),
	#[error("invalid input: position {0} is outside the world")]
	Position(WorldPosition),
	#[error("invalid input: step size must be positive and finite, got {0}")]
	Step(f32),
}

pub fn validate(window: &GalaxyWindow) -> Result<(), InvalidInput> {
	if !(window.zoom.is_finite() && window.zoom > 0.0) {
		return Err(InvalidInput::Zoom(window.zoom));
	}

	if !window.here.is_in_bounds() {
		return Err(InvalidInput::Position(window.here));
	}

	Ok(())
}

/// Lists the sectors a window is assembled from, x outermost, then y, then z.
///
/// Every axis is walked in sector sized steps from the window minimum. The x and y axes take one extra step when their
/// minimum is not a multiple of [`DISPLAY_SIZE`]. The z axis never does, viewers keep z on a sector boundary.
pub fn covering_sectors(window: &GalaxyWindow) -> Vec<SectorCoordinates> {
	let (min, max) = (window.min(), window.max());

	let misaligned = |coordinate: f32| u32::from(coordinate % DISPLAY_SIZE != 0.0);
	let steps = |span: f32, extra: u32| (span as u32 + extra).div_ceil(SECTOR_STEP);

	let x_steps = steps(max.x - min.x, misaligned(min.x));
	let y_steps = steps(max.y - min.y, misaligned(min.y));
	let z_steps = steps(max.z - min.z, 0);

	let mut sectors = Vec::with_capacity(x_steps as usize * y_steps as usize * z_steps as usize);
	for x in 0..x_steps {
		for y in 0..y_steps {
			for z in 0..z_steps {
				let offset = vector![x as f32, y as f32, z as f32] * SECTOR_SIZE;
				sectors.push(SectorCoordinates::containing(&WorldPosition::from(min + offset)));
			}
		}
	}

	sectors
}

/// Assembles every star visible in `window`, with display coordinates set.
///
/// Sectors are generated in parallel and merged in enumeration order, so the result matches a sequential walk: sector
/// order, then class order, then draw order.
pub fn query<G: Generator + ?Sized>(generator: &G, window: &GalaxyWindow) -> Result<Vec<Star>, InvalidInput> {
	validate(window)?;

	let start_time = Instant::now();
	let zoom = window.zoom_index();
	let sectors = covering_sectors(window);

	let stars = sectors
		.par_iter()
		.map(|sector| {
			generator
				.generate_sector(sector, zoom)
				.into_iter()
				.filter(|star| window.contains(&star.position))
				.map(|star| star.projected(window))
				.collect::<Vec<_>>()
		})
		.collect::<Vec<_>>()
		.concat();

	debug!(
		"Queried {} sectors around {} at zoom {} (index {zoom}): {} stars in {:.0?}",
		sectors.len(),
		window.here,
		window.zoom,
		stars.len(),
		Instant::now() - start_time
	);

	Ok(stars)
}
