use galaxy_shared::data::world::WorldPosition;
use galaxy_shared::session::{Axis, Direction};
use std::{num::ParseFloatError, str::FromStr};
use thiserror::Error;

/// One line of explorer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
	Step(Axis, Direction),
	ZoomIn,
	ZoomOut,
	Zoom(f32),
	StepSize(f32),
	Goto(WorldPosition),
	Show,
	Zooms,
	Help,
	Quit,
}

pub const HELP: &str = "\
x+ x- y+ y- z+ z-   step along an axis
in, out             switch to the next zoom stop
zoom <ly>           set the zoom extent
step <ly>           set the step size
goto <x> <y> <z>    jump to a position
show                print the current view
zooms               list the zoom stops
quit";

impl FromStr for Command {
	type Err = CommandError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let mut words = line.split_whitespace();
		let Some(name) = words.next() else {
			return Err(CommandError::Empty);
		};

		let command = match name {
			"in" => Self::ZoomIn,
			"out" => Self::ZoomOut,
			"zoom" => Self::Zoom(number(&mut words, "zoom")?),
			"step" => Self::StepSize(number(&mut words, "step")?),
			"goto" => {
				let x = number(&mut words, "x")?;
				let y = number(&mut words, "y")?;
				let z = number(&mut words, "z")?;
				Self::Goto(WorldPosition::new(x, y, z))
			}
			"show" => Self::Show,
			"zooms" => Self::Zooms,
			"help" | "?" => Self::Help,
			"quit" | "exit" => Self::Quit,
			_ => step(name).ok_or_else(|| CommandError::Unknown(name.into()))?,
		};

		match words.next() {
			Some(extra) => Err(CommandError::Unexpected(extra.into())),
			None => Ok(command),
		}
	}
}

fn step(name: &str) -> Option<Command> {
	let direction = match name.get(1..)? {
		"+" => Direction::Forward,
		"-" => Direction::Backward,
		_ => return None,
	};

	Some(Command::Step(name.get(..1)?.parse().ok()?, direction))
}

fn number<'a>(words: &mut impl Iterator<Item = &'a str>, argument: &'static str) -> Result<f32, CommandError> {
	let word = words.next().ok_or(CommandError::MissingArgument(argument))?;
	Ok(word.parse()?)
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
	#[error("empty command")]
	Empty,
	#[error("unknown command {0:?}, try \"help\"")]
	Unknown(Box<str>),
	#[error("missing argument <{0}>")]
	MissingArgument(&'static str),
	#[error("unexpected argument {0:?}")]
	Unexpected(Box<str>),
	#[error(transparent)]
	Number(#[from] ParseFloatError),
}
