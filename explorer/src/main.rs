#![deny(clippy::unwrap_used)]

use crate::command::{Command, CommandError, HELP};
use crate::config::{Configuration, ConfigurationLoadError};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use galaxy_shared::class::{StellarClassTable, CLASSES};
use galaxy_shared::data::world::WorldPosition;
use galaxy_shared::{Generator, InvalidInput, SectorGenerator, ViewerSession};
use log::{info, warn};
use std::{io, io::BufRead, io::Write, path::PathBuf, time::Instant};
use thiserror::Error;

mod command;
mod config;
mod render;

#[derive(Parser)]
#[command(version)]
struct ClArgs {
	/// Path to an explorer config file
	#[arg(long)]
	config: Option<PathBuf>,

	/// Starting x coordinate in light years, overrides the config file
	#[arg(long)]
	x: Option<f32>,

	/// Starting y coordinate in light years, overrides the config file
	#[arg(long)]
	y: Option<f32>,

	/// Starting z coordinate in light years, overrides the config file
	#[arg(long)]
	z: Option<f32>,

	/// Window extent in light years, overrides the config file
	#[arg(long)]
	zoom: Option<f32>,

	/// Step size in light years, overrides the config file
	#[arg(long)]
	step: Option<f32>,

	/// Print the starting view and exit instead of reading commands from stdin
	#[arg(long)]
	once: bool,

	#[arg(long, value_enum, default_value_t = Format::Summary)]
	format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	/// Star counts per class
	Summary,
	/// One JSON object per star
	Json,
}

fn main() -> Result<(), ExplorerError> {
	let start_time = Instant::now();

	let cl_args = ClArgs::parse();

	env_logger::init_from_env(Env::default().default_filter_or(if cfg!(debug_assertions) { "debug" } else { "info" }));

	info!("Galaxy Explorer v{}", env!("CARGO_PKG_VERSION"));

	let configuration = match &cl_args.config {
		Some(path) => Configuration::load(path)?,
		None => Configuration::default(),
	};

	let mut session = {
		let table = StellarClassTable::new(CLASSES.to_vec(), configuration.lod_table()?);

		let start = WorldPosition::from(&configuration.start);
		let here = WorldPosition::new(
			cl_args.x.unwrap_or(start.x),
			cl_args.y.unwrap_or(start.y),
			cl_args.z.unwrap_or(start.z),
		);

		let zoom = cl_args.zoom.unwrap_or(configuration.zoom);

		// Fail at startup rather than on the first query
		let mut session = ViewerSession::new(SectorGenerator::new(table), here, zoom).with_markers(configuration.markers);
		session.set_zoom(zoom)?;
		session.set_step_size(cl_args.step.unwrap_or(configuration.step))?;
		session
	};

	let mut stdout = io::stdout().lock();

	info!("Ready! {:.0?}", Instant::now() - start_time);

	show(&mut session, cl_args.format, &mut stdout)?;
	if cl_args.once {
		return Ok(());
	}

	for line in io::stdin().lock().lines() {
		let command = match line?.parse::<Command>() {
			Ok(command) => command,
			Err(CommandError::Empty) => continue,
			Err(error) => {
				warn!("{error}");
				continue;
			}
		};

		match command {
			Command::Step(axis, direction) => session.step(axis, direction),
			Command::ZoomIn => session.zoom_in(),
			Command::ZoomOut => session.zoom_out(),
			Command::Zoom(zoom) => {
				if let Err(error) = session.set_zoom(zoom) {
					warn!("{error}");
					continue;
				}
			}
			Command::StepSize(step_size) => {
				if let Err(error) = session.set_step_size(step_size) {
					warn!("{error}");
				}
				continue;
			}
			Command::Goto(here) => session.goto(here),
			Command::Show => {}
			Command::Zooms => {
				writeln!(stdout, "{}", render::zooms(&session))?;
				continue;
			}
			Command::Help => {
				writeln!(stdout, "{HELP}")?;
				continue;
			}
			Command::Quit => break,
		}

		show(&mut session, cl_args.format, &mut stdout)?;
	}

	Ok(())
}

fn show<G: Generator>(
	session: &mut ViewerSession<G>,
	format: Format,
	out: &mut impl Write,
) -> Result<(), ExplorerError> {
	let stars = session.stars()?;

	match format {
		Format::Summary => writeln!(out, "{}", render::summary(session, &stars))?,
		Format::Json => out.write_all(render::json_lines(session, &stars)?.as_bytes())?,
	}

	Ok(out.flush()?)
}

#[derive(Debug, Error)]
#[error(transparent)]
pub enum ExplorerError {
	Configuration(#[from] ConfigurationLoadError),
	InvalidInput(#[from] InvalidInput),
	Io(#[from] io::Error),
	Json(#[from] serde_json::Error),
}
