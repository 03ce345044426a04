use crate::class::{ClassSpec, StellarClass, StellarClassTable};
use crate::data::world::{GalaxyWindow, SectorCoordinates, ZoomIndex, SECTOR_SIZE};
use crate::data::Color;
use crate::hash::sector_rng;
use nalgebra::{vector, Vector3};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Star {
	pub class: StellarClass,
	pub bright_color: Color,
	pub dim_color: Color,
	pub pixels: u32,

	pub mass: f32,
	pub radius: f32,
	pub luminance: f32,

	/// Position relative to the sector origin, within `[0, SECTOR_SIZE)` on every axis.
	pub local: Vector3<f32>,
	pub position: Vector3<f32>,
	/// Display coordinates, only set on stars returned from a window query.
	pub display: Option<Vector3<f32>>,
}

impl Star {
	#[must_use]
	pub fn projected(mut self, window: &GalaxyWindow) -> Self {
		self.display = Some(window.project(&self.position));
		self
	}
}

/// Produces the stars of one sector. Implementations must be pure: the same sector and zoom index always yield the
/// same stars in the same order.
pub trait Generator: Send + Sync {
	fn generate_sector(&self, sector: &SectorCoordinates, zoom: ZoomIndex) -> Vec<Star>;
}

/// The standard generator, populating sectors from a [`StellarClassTable`].
#[derive(Clone, Debug, Default)]
pub struct SectorGenerator {
	table: StellarClassTable,
}

impl SectorGenerator {
	pub fn new(table: StellarClassTable) -> Self {
		Self { table }
	}
}

impl Generator for SectorGenerator {
	fn generate_sector(&self, sector: &SectorCoordinates, zoom: ZoomIndex) -> Vec<Star> {
		// One stream for the whole sector, classes draw from it in table order
		let mut rng = sector_rng(sector);
		let origin = sector.origin();

		let mut stars = vec![];
		for spec in self.table.active_classes(zoom) {
			generate_class(spec, &origin, &mut rng, &mut stars);
		}

		stars
	}
}

fn generate_class(spec: &ClassSpec, origin: &Vector3<f32>, rng: &mut impl Rng, stars: &mut Vec<Star>) {
	let count = spec.population(rng.gen());
	stars.reserve(count as usize);

	for _ in 0..count {
		let draw: f32 = rng.gen();

		let x = rng.gen::<f32>() * SECTOR_SIZE;
		let y = rng.gen::<f32>() * SECTOR_SIZE;
		let z = rng.gen::<f32>() * SECTOR_SIZE;
		let local = vector![x, y, z];

		stars.push(Star {
			class: spec.class,
			bright_color: spec.bright_color,
			dim_color: spec.dim_color,
			pixels: spec.pixels,

			// Offset by a whole delta, the lower half of the mass range is never produced
			mass: spec.mass.at(1.0 + draw),
			radius: spec.radius.at(draw),
			luminance: spec.luminosity.at(draw),

			local,
			position: origin + local,
			display: None,
		});
	}
}
