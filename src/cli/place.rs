//! tm place commands.

use crate::cli::{CliContext, PlaceCommands};
use crate::error::{Error, Result};
use crate::net::require_connectivity;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::place::{Place, PlaceIndex};
use crate::proximity::{distance_m, Coordinates};

#[derive(serde::Serialize)]
struct PlaceListOutput {
    total: usize,
    places: Vec<Place>,
}

#[derive(serde::Serialize)]
struct PlaceNearOutput {
    place: Place,
    distance_m: f64,
}

pub fn run(ctx: &CliContext, command: PlaceCommands, json: bool, quiet: bool) -> Result<()> {
    let options = OutputOptions { json, quiet };
    let index = PlaceIndex::new(ctx.storage.clone());

    match command {
        PlaceCommands::Add { name, lat, lon } => {
            index.add(Place {
                name: name.clone(),
                latitude: lat,
                longitude: lon,
            })?;

            let mut human = HumanOutput::new("Place saved");
            human.push_summary("Name", name.clone());
            human.push_summary("Coordinates", format!("{lat}, {lon}"));

            #[derive(serde::Serialize)]
            struct PlaceAddedOutput {
                name: String,
            }

            emit_success(options, "place add", &PlaceAddedOutput { name }, Some(&human))
        }
        PlaceCommands::List => {
            let places = index.list()?;
            let mut human = HumanOutput::new("Places");
            human.push_summary("Total", places.len().to_string());
            for place in &places {
                human.push_detail(format!(
                    "{} ({}, {})",
                    place.name, place.latitude, place.longitude
                ));
            }

            emit_success(
                options,
                "place list",
                &PlaceListOutput {
                    total: places.len(),
                    places,
                },
                Some(&human),
            )
        }
        PlaceCommands::Search { query } => {
            require_connectivity(&ctx.reachability, "place search")?;
            let places = index.search(&query)?;
            if places.is_empty() {
                return Err(Error::PlaceNotFound(query));
            }

            let mut human = HumanOutput::new("Place results");
            human.push_summary("Query", query);
            for place in &places {
                human.push_detail(format!(
                    "{} ({}, {})",
                    place.name, place.latitude, place.longitude
                ));
            }

            emit_success(
                options,
                "place search",
                &PlaceListOutput {
                    total: places.len(),
                    places,
                },
                Some(&human),
            )
        }
        PlaceCommands::Near { lat, lon } => {
            require_connectivity(&ctx.reachability, "reverse geocoding")?;
            let coords = Coordinates::new(lat, lon);
            let place = index
                .reverse_geocode(coords)?
                .ok_or_else(|| Error::PlaceNotFound(format!("{lat}, {lon}")))?;
            let distance = distance_m(coords, place.coordinates());

            let mut human = HumanOutput::new("Nearest place");
            human.push_summary("Name", place.name.clone());
            human.push_summary("Distance", format!("{:.0} m", distance));

            emit_success(
                options,
                "place near",
                &PlaceNearOutput {
                    place,
                    distance_m: distance,
                },
                Some(&human),
            )
        }
    }
}
