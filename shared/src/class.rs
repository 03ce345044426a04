use crate::data::{world::ZoomIndex, world::ZOOM_LEVELS, Color};
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Display, fmt::Formatter, ops::RangeInclusive};

/// Expected stars per sector per unit of `odds`.
pub const POPULATION_SCALE: f32 = 1000.0;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum StellarClass {
	O,
	B,
	A,
	F,
	G,
	K,
	M,
}

impl StellarClass {
	pub const fn name(&self) -> &'static str {
		match self {
			Self::O => "O",
			Self::B => "B",
			Self::A => "A",
			Self::F => "F",
			Self::G => "G",
			Self::K => "K",
			Self::M => "M",
		}
	}
}

impl Display for StellarClass {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// `min` plus some fraction of `delta`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Span {
	pub min: f32,
	pub delta: f32,
}

impl Span {
	pub const fn new(min: f32, delta: f32) -> Self {
		Self { min, delta }
	}

	pub fn at(&self, fraction: f32) -> f32 {
		self.min + fraction * self.delta
	}
}

/// Generation parameters for one stellar class.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClassSpec {
	pub class: StellarClass,

	// Brightness gradient for presentation, not used by generation.
	pub bright_color: Color,
	pub medium_color: Color,
	pub dim_color: Color,

	/// Baseline population density.
	pub odds: f32,
	/// Half width of the band the population is drawn from.
	pub fudge: f32,

	pub mass: Span,
	pub radius: Span,
	pub luminosity: Span,

	/// Marker diameter.
	pub pixels: u32,
}

impl ClassSpec {
	/// Number of stars of this class in a sector, given a uniform draw in `[0, 1)`.
	pub fn population(&self, draw: f32) -> u32 {
		let expected = POPULATION_SCALE * (self.odds - self.fudge + 2.0 * self.fudge * draw);

		// Negative populations saturate to 0
		expected.floor() as u32
	}

	/// Every value [`ClassSpec::population`] can return.
	pub fn population_bounds(&self) -> RangeInclusive<u32> {
		self.population(0.0)..=self.population(1.0)
	}
}

const BRIGHT: u8 = u8::MAX;
const TWEEN: u8 = 228;
const MEDIUM: u8 = 196;
const DIM: u8 = 128;

pub static CLASSES: [ClassSpec; 7] = [
	ClassSpec {
		class: StellarClass::O,
		bright_color: Color::opaque(0, 0, BRIGHT),
		medium_color: Color::opaque(0, 0, BRIGHT),
		dim_color: Color::opaque(0, 0, MEDIUM),
		odds: 0.0006,
		fudge: 0.000402,
		mass: Span::new(16.00001, 243.2),
		radius: Span::new(6.0, 17.3),
		luminosity: Span::new(30000.0, 147000.2),
		pixels: 11,
	},
	ClassSpec {
		class: StellarClass::B,
		bright_color: Color::opaque(DIM, DIM, BRIGHT),
		medium_color: Color::opaque(DIM / 2, DIM / 2, MEDIUM),
		dim_color: Color::opaque(DIM / 4, DIM / 4, DIM),
		odds: 0.0013,
		fudge: 0.0003,
		mass: Span::new(2.1, 13.9),
		radius: Span::new(1.8, 4.8),
		luminosity: Span::new(25.0, 29975.0),
		pixels: 8,
	},
	ClassSpec {
		class: StellarClass::A,
		bright_color: Color::opaque(BRIGHT, BRIGHT, BRIGHT),
		medium_color: Color::opaque(MEDIUM, MEDIUM, MEDIUM),
		dim_color: Color::opaque(DIM, DIM, DIM),
		odds: 0.006,
		fudge: 0.0018,
		mass: Span::new(1.4, 0.7),
		radius: Span::new(1.4, 0.4),
		luminosity: Span::new(5.0, 20.0),
		pixels: 6,
	},
	ClassSpec {
		class: StellarClass::F,
		bright_color: Color::opaque(BRIGHT, BRIGHT, TWEEN),
		medium_color: Color::opaque(TWEEN, TWEEN, DIM),
		dim_color: Color::opaque(MEDIUM, MEDIUM, DIM / 2),
		odds: 0.03,
		fudge: 0.012,
		mass: Span::new(1.04, 0.36),
		radius: Span::new(1.15, 0.25),
		luminosity: Span::new(1.5, 3.5),
		pixels: 5,
	},
	ClassSpec {
		class: StellarClass::G,
		bright_color: Color::opaque(TWEEN, TWEEN, 0),
		medium_color: Color::opaque(MEDIUM, MEDIUM, 0),
		dim_color: Color::opaque(DIM, DIM, 0),
		odds: 0.076,
		fudge: 0.01102,
		mass: Span::new(0.8, 0.24),
		radius: Span::new(0.96, 0.19),
		luminosity: Span::new(0.6, 0.9),
		pixels: 4,
	},
	ClassSpec {
		class: StellarClass::K,
		bright_color: Color::opaque(0xfe, 0xd8, 0xb1),
		medium_color: Color::opaque(3 * (0xfe / 4), 3 * (0xd8 / 4), 3 * (0xb1 / 4)),
		dim_color: Color::opaque(0xfe / 2, 0xd8 / 2, 0xb1 / 2),
		odds: 0.121,
		fudge: 0.042,
		mass: Span::new(0.45, 0.35),
		radius: Span::new(0.7, 0.26),
		luminosity: Span::new(0.08, 0.52),
		pixels: 3,
	},
	ClassSpec {
		class: StellarClass::M,
		bright_color: Color::opaque(BRIGHT, 0, 0),
		medium_color: Color::opaque(MEDIUM, 0, 0),
		dim_color: Color::opaque(DIM, 0, 0),
		odds: 0.7645,
		fudge: 0.04,
		mass: Span::new(1.04, 0.36),
		radius: Span::new(1.15, 0.25),
		luminosity: Span::new(1.5, 3.5),
		pixels: 2,
	},
];

/// Maps each [`ZoomIndex`] to a class count threshold `T`, the first `T + 1` classes are generated.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LodTable([u8; ZOOM_LEVELS as usize]);

impl LodTable {
	pub const fn new(thresholds: [u8; ZOOM_LEVELS as usize]) -> Self {
		Self(thresholds)
	}

	pub fn threshold(&self, zoom: ZoomIndex) -> u8 {
		self.0[*zoom as usize]
	}
}

impl Default for LodTable {
	fn default() -> Self {
		Self([7, 7, 7, 7, 7, 7, 6, 5, 4, 3, 2])
	}
}

/// The ordered class catalog together with the level of detail policy that truncates it.
#[derive(Clone, Debug)]
pub struct StellarClassTable {
	classes: Box<[ClassSpec]>,
	lod: LodTable,
}

impl StellarClassTable {
	pub fn new(classes: impl Into<Box<[ClassSpec]>>, lod: LodTable) -> Self {
		Self { classes: classes.into(), lod }
	}

	pub fn class_limit(&self, zoom: ZoomIndex) -> usize {
		usize::min(self.classes.len(), self.lod.threshold(zoom) as usize + 1)
	}

	/// The leading classes generated at `zoom`, rarest first.
	pub fn active_classes(&self, zoom: ZoomIndex) -> &[ClassSpec] {
		&self.classes[..self.class_limit(zoom)]
	}
}

impl Default for StellarClassTable {
	fn default() -> Self {
		Self::new(CLASSES.to_vec(), LodTable::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classes_are_ordered_rarest_first() {
		let order = CLASSES.iter().map(|spec| spec.class.name()).collect::<String>();
		assert_eq!(order, "OBAFGKM");
		assert!(CLASSES.windows(2).all(|pair| pair[0].odds < pair[1].odds));
	}

	#[test]
	fn class_o_population_is_zero_or_one() {
		assert_eq!(CLASSES[0].population_bounds(), 0..=1);
		assert_eq!(CLASSES[0].population(0.0), 0);
		assert_eq!(CLASSES[0].population(0.999_999), 1);
	}

	#[test]
	fn negative_population_saturates() {
		let spec = ClassSpec {
			odds: 0.001,
			fudge: 0.0105,
			..CLASSES[0].clone()
		};
		assert_eq!(spec.population(0.0), 0);
		assert_eq!(spec.population_bounds(), 0..=11);
	}

	#[test]
	fn derived_colors() {
		assert_eq!(CLASSES[1].dim_color, Color::opaque(32, 32, 128));
		assert_eq!(CLASSES[5].medium_color, Color::opaque(189, 162, 132));
		assert_eq!(CLASSES[5].dim_color, Color::opaque(127, 108, 88));
	}

	#[test]
	fn lod_keeps_threshold_plus_one_classes() {
		let table = StellarClassTable::default();
		assert_eq!(table.class_limit(ZoomIndex::new(0)), 7);
		assert_eq!(table.class_limit(ZoomIndex::new(6)), 7);
		assert_eq!(table.class_limit(ZoomIndex::new(7)), 6);
		assert_eq!(table.class_limit(ZoomIndex::new(10)), 3);

		let classes = table.active_classes(ZoomIndex::new(9));
		assert_eq!(classes.last().map(|spec| spec.class), Some(StellarClass::F));
		assert_eq!(table.active_classes(ZoomIndex::new(10)).len(), 3);
	}

	#[test]
	fn lod_table_deserializes_from_a_list() {
		let table: LodTable = serde_json::from_str("[6, 6, 6, 6, 5, 5, 4, 3, 2, 1, 0]").unwrap();
		assert_eq!(table.threshold(ZoomIndex::new(10)), 0);
		assert!(serde_json::from_str::<LodTable>("[1, 2, 3]").is_err());
	}
}
