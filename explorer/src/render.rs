use galaxy_shared::class::{StellarClass, CLASSES};
use galaxy_shared::session::{ViewerSession, ZOOM_STOPS};
use galaxy_shared::{Generator, Star};
use serde::Serialize;

/// What a viewer needs to draw one star: display x and y, marker size and color.
#[derive(Debug, PartialEq, Serialize)]
struct Marker {
	class: StellarClass,
	x: f32,
	y: f32,
	size: f32,
	color: Box<str>,
}

/// A header line with the view, followed by star counts per class.
pub fn summary<G: Generator>(session: &ViewerSession<G>, stars: &[Star]) -> String {
	let mut counts = vec![0; CLASSES.len()];
	for star in stars {
		counts[star.class as usize] += 1;
	}

	let mut string = format!(
		"{} stars at {}, zoom {} (index {}), step {}\n",
		stars.len(),
		session.here(),
		session.zoom(),
		session.zoom_index(),
		session.step_size()
	);

	for (spec, count) in CLASSES.iter().zip(counts) {
		string += &format!(" {}:{count}", spec.class);
	}

	string
}

/// One JSON object per star and line.
pub fn json_lines<G: Generator>(session: &ViewerSession<G>, stars: &[Star]) -> Result<String, serde_json::Error> {
	let mut string = String::new();

	for star in stars {
		let display = star.display.unwrap_or_default();
		let marker = Marker {
			class: star.class,
			x: display.x,
			y: display.y,
			size: session.marker_size(star),
			color: star.bright_color.to_string().into(),
		};

		string += &serde_json::to_string(&marker)?;
		string.push('\n');
	}

	Ok(string)
}

/// The zoom stops, with the current zoom bracketed when it sits on one.
pub fn zooms<G: Generator>(session: &ViewerSession<G>) -> String {
	ZOOM_STOPS
		.iter()
		.map(|stop| match *stop == session.zoom() {
			true => format!("[{stop}]"),
			false => stop.to_string(),
		})
		.collect::<Vec<_>>()
		.join(" ")
}
