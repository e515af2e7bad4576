// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use sobelseam::{
    energy_to_image, image_to_pixels, luminance_to_image, pixels_to_image, EnergyUpdate,
    SeamCarver,
};

#[macro_use]
extern crate clap;
extern crate image;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use log::{info, LevelFilter};

fn init_logging(verbosity: u64) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let seams = value_t!(matches, "seams", u32).unwrap_or_else(|e| e.exit());
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let image = image::open(input)?.to_rgba();
    let (width, height) = image.dimensions();
    info!("read {} ({}x{})", input, width, height);

    let update = if matches.is_present("full") {
        EnergyUpdate::Full
    } else {
        EnergyUpdate::Incremental
    };
    let mut carver = SeamCarver::new(image_to_pixels(&image))?.with_energy_update(update);
    carver.carve(seams)?;
    let carved = carver.finish();

    pixels_to_image(&carved.pixels).save(output)?;
    info!("wrote {} ({}x{})", output, carved.width, height);

    if let Some(path) = matches.value_of("energy") {
        energy_to_image(&carved.energy).save(path)?;
        info!("wrote energy map to {}", path);
    }
    if let Some(path) = matches.value_of("luminance") {
        luminance_to_image(&carved.luminance).save(path)?;
        info!("wrote luminance map to {}", path);
    }
    Ok(())
}

fn main() {
    let matches = App::new("sobelseam")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Narrow an image by removing its lowest-energy vertical seams")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("seams")
                .short("n")
                .long("seams")
                .value_name("COUNT")
                .help("How many vertical seams to remove")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("FILE")
                .help("Also write the final energy map as a greyscale image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("luminance")
                .long("luminance")
                .value_name("FILE")
                .help("Also write the final luminance map as a greyscale image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("full")
                .long("full-recompute")
                .help("Recompute the whole energy map after every seam"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log progress; repeat for more detail"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("sobelseam: {}", err);
        std::process::exit(1);
    }
}
