use galaxy_shared::class::LodTable;
use galaxy_shared::data::world::{WorldPosition, ZOOM_LEVELS};
use galaxy_shared::session::{MarkerPolicy, DEFAULT_POSITION, DEFAULT_STEP, DEFAULT_ZOOM};
use serde::Deserialize;
use std::{fs::File, io, io::Read, path::Path, str, str::Utf8Error};
use thiserror::Error;

/// Explorer settings, every field falls back to the built-in default when missing.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Configuration {
	pub start: Start,
	pub zoom: f32,
	pub step: f32,

	/// Overrides the level of detail table, one threshold per zoom index.
	pub lod: Option<Vec<u8>>,
	pub markers: MarkerPolicy,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Start {
	pub x: f32,
	pub y: f32,
	pub z: f32,
}

impl Configuration {
	pub fn load(path: &Path) -> Result<Configuration, ConfigurationLoadError> {
		let mut file = File::open(path)?;
		let length = file.metadata()?.len() as usize;
		let mut buffer = vec![0; length];
		file.read_exact(&mut buffer)?;
		Self::parse(str::from_utf8(&buffer)?)
	}

	pub fn parse(string: &str) -> Result<Configuration, ConfigurationLoadError> {
		let configuration: Configuration = hocon::de::from_str(string)?;

		// Surface a bad table at load time rather than on first use
		configuration.lod_table()?;

		Ok(configuration)
	}

	pub fn lod_table(&self) -> Result<LodTable, ConfigurationLoadError> {
		match &self.lod {
			None => Ok(LodTable::default()),
			Some(thresholds) => <[u8; ZOOM_LEVELS as usize]>::try_from(thresholds.as_slice())
				.map(LodTable::new)
				.map_err(|_| ConfigurationLoadError::LodLength(thresholds.len())),
		}
	}
}

impl Default for Start {
	fn default() -> Self {
		let [x, y, z] = DEFAULT_POSITION;
		Self { x, y, z }
	}
}

impl Default for Configuration {
	fn default() -> Self {
		Self {
			start: Start::default(),
			zoom: DEFAULT_ZOOM,
			step: DEFAULT_STEP,
			lod: None,
			markers: MarkerPolicy::default(),
		}
	}
}

impl From<&Start> for WorldPosition {
	fn from(start: &Start) -> Self {
		WorldPosition::new(start.x, start.y, start.z)
	}
}

#[derive(Debug, Error)]
pub enum ConfigurationLoadError {
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error(transparent)]
	Utf8(#[from] Utf8Error),
	#[error(transparent)]
	Parse(#[from] hocon::Error),
	#[error("lod table needs one threshold per zoom index, got {0}")]
	LodLength(usize),
}
