use log::{debug, error};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

use jsonrecipe::{Ingredient, Recipe, RecipeConfig};

const USAGE: &str = "Usage: jsonrecipe [--config <file>] <recipe.json | ->\n       jsonrecipe [--config <file>] --ingredient <description>";

fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn run(mut args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = if args.first().map(String::as_str) == Some("--config") {
        let path = args.get(1).ok_or(USAGE)?.clone();
        args.drain(..2);
        RecipeConfig::load_from(Path::new(&path))?
    } else {
        RecipeConfig::load()?
    };

    match args.first().map(String::as_str) {
        Some("--ingredient") => {
            let description = args.get(1).ok_or(USAGE)?;
            let ingredient = Ingredient::parse(description)?;
            debug!("{:#?}", ingredient);
            println!("{}", render(&ingredient, config.pretty)?);
        }
        Some(path) => {
            let recipe = if path == "-" {
                Recipe::from_reader_with_config(io::stdin(), &config)?
            } else {
                Recipe::from_reader_with_config(File::open(path)?, &config)?
            };
            debug!("{:#?}", recipe);
            println!("{}", recipe.to_json(config.pretty)?);
        }
        None => return Err(USAGE.into()),
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
