use crate::cache::{QueryCache, QueryResult};
use crate::data::world::{GalaxyWindow, WorldPosition, ZoomIndex};
use crate::generation::{Generator, SectorGenerator, Star};
use crate::query::{query, InvalidInput};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Display, fmt::Formatter, str::FromStr};

pub const DEFAULT_POSITION: [f32; 3] = [50_000.0, 50_000.0, 12_500.0];
pub const DEFAULT_ZOOM: f32 = 100.0;
pub const DEFAULT_STEP: f32 = 10.0;

/// Zoom extents offered by [`ViewerSession::zoom_in`] and [`ViewerSession::zoom_out`], half a decade apart.
pub const ZOOM_STOPS: [f32; 9] = [1.0, 3.0, 10.0, 32.0, 100.0, 316.0, 1000.0, 3162.0, 10000.0];

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Axis {
	X,
	Y,
	Z,
}

impl Axis {
	pub const fn index(&self) -> usize {
		match self {
			Self::X => 0,
			Self::Y => 1,
			Self::Z => 2,
		}
	}
}

impl Display for Axis {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::X => "x",
			Self::Y => "y",
			Self::Z => "z",
		})
	}
}

impl FromStr for Axis {
	type Err = ();

	fn from_str(string: &str) -> Result<Self, Self::Err> {
		match string {
			"x" | "X" => Ok(Self::X),
			"y" | "Y" => Ok(Self::Y),
			"z" | "Z" => Ok(Self::Z),
			_ => Err(()),
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
	Forward,
	Backward,
}

/// Marker diameters shrink at coarse zoom: halved from `middle` on, quartered from `big` on.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MarkerPolicy {
	pub middle: ZoomIndex,
	pub big: ZoomIndex,
}

impl MarkerPolicy {
	pub fn scale(&self, zoom: ZoomIndex) -> f32 {
		if zoom >= self.big {
			0.25
		} else if zoom >= self.middle {
			0.5
		} else {
			1.0
		}
	}

	pub fn marker_size(&self, star: &Star, zoom: ZoomIndex) -> f32 {
		star.pixels as f32 * self.scale(zoom)
	}
}

impl Default for MarkerPolicy {
	fn default() -> Self {
		Self {
			middle: ZoomIndex::new(4),
			big: ZoomIndex::new(8),
		}
	}
}

/// Everything a viewer mutates between queries: where it is, how far it sees, how far it steps, and the result of
/// the last query.
pub struct ViewerSession<G = SectorGenerator> {
	generator: G,
	cache: QueryCache,

	here: WorldPosition,
	zoom: f32,
	step_size: f32,
	markers: MarkerPolicy,
}

impl<G: Generator> ViewerSession<G> {
	/// `here` is clamped into the world. `zoom` is checked on the first query.
	pub fn new(generator: G, here: WorldPosition, zoom: f32) -> Self {
		Self {
			generator,
			cache: QueryCache::new(),

			here: here.clamped(),
			zoom,
			step_size: DEFAULT_STEP,
			markers: MarkerPolicy::default(),
		}
	}

	#[must_use]
	pub fn with_markers(mut self, markers: MarkerPolicy) -> Self {
		self.markers = markers;
		self
	}

	pub fn generator(&self) -> &G {
		&self.generator
	}

	pub fn cache(&self) -> &QueryCache {
		&self.cache
	}

	pub fn here(&self) -> WorldPosition {
		self.here
	}

	pub fn zoom(&self) -> f32 {
		self.zoom
	}

	pub fn zoom_index(&self) -> ZoomIndex {
		ZoomIndex::from_zoom(self.zoom)
	}

	pub fn step_size(&self) -> f32 {
		self.step_size
	}

	pub fn window(&self) -> GalaxyWindow {
		GalaxyWindow::new(self.here, self.zoom)
	}

	/// Moves one step along `axis`, stopping at the edge of the world.
	pub fn step(&mut self, axis: Axis, direction: Direction) {
		let delta = match direction {
			Direction::Forward => self.step_size,
			Direction::Backward => -self.step_size,
		};

		self.here[axis.index()] += delta;
		self.here = self.here.clamped();
	}

	pub fn goto(&mut self, here: WorldPosition) {
		self.here = here.clamped();
	}

	pub fn set_zoom(&mut self, zoom: f32) -> Result<(), InvalidInput> {
		if !(zoom.is_finite() && zoom > 0.0) {
			return Err(InvalidInput::Zoom(zoom));
		}

		self.zoom = zoom;
		Ok(())
	}

	pub fn set_step_size(&mut self, step_size: f32) -> Result<(), InvalidInput> {
		if !(step_size.is_finite() && step_size > 0.0) {
			return Err(InvalidInput::Step(step_size));
		}

		self.step_size = step_size;
		Ok(())
	}

	/// Switches to the next smaller zoom stop, if there is one.
	pub fn zoom_in(&mut self) {
		if let Some(stop) = ZOOM_STOPS.iter().rev().find(|stop| **stop < self.zoom) {
			self.zoom = *stop;
		}
	}

	/// Switches to the next larger zoom stop, if there is one.
	pub fn zoom_out(&mut self) {
		if let Some(stop) = ZOOM_STOPS.iter().find(|stop| **stop > self.zoom) {
			self.zoom = *stop;
		}
	}

	/// The stars visible from the current position and zoom, reusing the previous result when neither changed.
	pub fn stars(&mut self) -> Result<QueryResult, InvalidInput> {
		let window = self.window();
		let generator = &self.generator;

		let stars = self.cache.get(self.here, self.zoom, || query(generator, &window))?;

		debug!(
			"Query cache: {} hits, {} misses",
			self.cache.hits(),
			self.cache.misses()
		);

		Ok(stars)
	}

	pub fn marker_size(&self, star: &Star) -> f32 {
		self.markers.marker_size(star, self.zoom_index())
	}
}

impl Default for ViewerSession {
	fn default() -> Self {
		Self::new(SectorGenerator::default(), DEFAULT_POSITION.into(), DEFAULT_ZOOM)
	}
}
