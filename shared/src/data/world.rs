use nalgebra::{vector, Vector3};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use std::{fmt, fmt::Display, fmt::Formatter, ops::Deref, ops::DerefMut};

/// Edge length of a sector in light years.
pub const SECTOR_SIZE: f32 = 100.0;

/// Extent of the canvas that windows are projected onto.
pub const DISPLAY_SIZE: f32 = 1000.0;

/// Upper world bound per axis. The lower bound is 0 on every axis.
pub const WORLD_EXTENT: [f32; 3] = [100_000.0, 100_000.0, 25_000.0];

pub const ZOOM_LEVELS: u8 = 11;

/// A discrete level of detail derived from the zoom extent. Coarser zoom means a higher index.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ZoomIndex(u8);

impl ZoomIndex {
	pub const fn new(index: u8) -> Self {
		assert!(index < ZOOM_LEVELS, "out of bounds 0..=10");
		Self(index)
	}

	/// Spreads the four decades from 1 to 10 000 ly over every index, so the widest views get the last and tightest
	/// level of detail. The zoom stops 1, 3, 10, 32, 100, 316, 1000, 3162, 10000 map onto 0, 1, 3, 4, 5, 6, 8, 9, 10.
	pub fn from_zoom(zoom: f32) -> Self {
		// Offset so powers of ten do not land on a half step
		let index = (2.5 * zoom.log10() + 0.2).round().clamp(0.0, (ZOOM_LEVELS - 1) as f32);

		// NaN casts to 0
		Self(index as u8)
	}
}

impl<'d> Deserialize<'d> for ZoomIndex {
	fn deserialize<D: Deserializer<'d>>(deserializer: D) -> Result<Self, D::Error> {
		let index = u8::deserialize(deserializer)?;
		match index >= ZOOM_LEVELS {
			true => Err(Error::custom("out of bounds 0..=10")),
			false => Ok(Self(index)),
		}
	}
}

impl Display for ZoomIndex {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Deref for ZoomIndex {
	type Target = u8;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Integer address of a sector, the unit of deterministic generation.
#[must_use]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SectorCoordinates(Vector3<u32>);

impl SectorCoordinates {
	pub fn new(x: u32, y: u32, z: u32) -> Self {
		Self(vector![x, y, z])
	}

	/// Truncates towards zero, negative positions saturate to sector 0.
	pub fn containing(position: &WorldPosition) -> Self {
		Self(position.map(|coordinate| (coordinate / SECTOR_SIZE) as u32))
	}

	/// Returns the world position of the sector's minimum corner.
	pub fn origin(&self) -> Vector3<f32> {
		self.map(|coordinate| coordinate as f32 * SECTOR_SIZE)
	}
}

impl Display for SectorCoordinates {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
	}
}

impl Deref for SectorCoordinates {
	type Target = Vector3<u32>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// A continuous position in light years.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorldPosition(Vector3<f32>);

impl WorldPosition {
	pub fn new(x: f32, y: f32, z: f32) -> Self {
		Self(vector![x, y, z])
	}

	pub fn is_in_bounds(&self) -> bool {
		self.iter()
			.zip(WORLD_EXTENT)
			.all(|(coordinate, max)| (0.0..=max).contains(coordinate))
	}

	#[must_use]
	pub fn clamped(&self) -> Self {
		Self(self.zip_map(&Vector3::from(WORLD_EXTENT), |coordinate, max| coordinate.clamp(0.0, max)))
	}
}

impl From<[f32; 3]> for WorldPosition {
	fn from([x, y, z]: [f32; 3]) -> Self {
		Self::new(x, y, z)
	}
}

impl From<Vector3<f32>> for WorldPosition {
	fn from(coordinates: Vector3<f32>) -> Self {
		Self(coordinates)
	}
}

impl Display for WorldPosition {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.x, self.y, self.z)
	}
}

impl Deref for WorldPosition {
	type Target = Vector3<f32>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for WorldPosition {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

/// The axis aligned cube of space visible to the viewer, `zoom` light years along every axis from `here`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GalaxyWindow {
	pub here: WorldPosition,
	pub zoom: f32,
}

impl GalaxyWindow {
	pub const fn new(here: WorldPosition, zoom: f32) -> Self {
		Self { here, zoom }
	}

	pub fn min(&self) -> Vector3<f32> {
		*self.here
	}

	pub fn max(&self) -> Vector3<f32> {
		self.here.add_scalar(self.zoom)
	}

	pub fn zoom_index(&self) -> ZoomIndex {
		ZoomIndex::from_zoom(self.zoom)
	}

	/// Closed on both ends of every axis.
	#[allow(clippy::neg_cmp_op_on_partial_ord)]
	pub fn contains(&self, position: &Vector3<f32>) -> bool {
		let (min, max) = (self.min(), self.max());
		(0..3).all(|axis| !(position[axis] < min[axis]) && !(position[axis] > max[axis]))
	}

	/// Maps a position inside the window onto `[0, DISPLAY_SIZE]` per axis.
	pub fn project(&self, position: &Vector3<f32>) -> Vector3<f32> {
		let (min, max) = (self.min(), self.max());
		Vector3::from_fn(|axis, _| {
			let display = (position[axis] - min[axis]) * DISPLAY_SIZE / (max[axis] - min[axis]);

			// Rounding can overshoot at the far edge
			display.clamp(0.0, DISPLAY_SIZE)
		})
	}
}
