pub mod world;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// An 8-bit RGBA color, as handed to whatever draws the star markers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Color {
	pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: u8::MAX }
	}
}

impl Display for Color {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
	}
}
