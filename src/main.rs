use std::{fs, path::PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use world::{All, Catalogs, Category, Region, RoomCollection};

#[derive(Parser, Debug)]
#[command(about = "Inspect parquet game content and maps")]
struct Args {
    /// JSON file with the object catalogs.
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the identifier range of every object category.
    Ranges,
    /// Print a text picture of a saved region.
    Dump {
        region: PathBuf,
        /// Show every layer separately.
        #[arg(long)]
        layers: bool,
    },
    /// List the rooms found on a saved region.
    Rooms { region: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.cmd {
        Cmd::Ranges => {
            for c in Category::iter() {
                println!("{:16} {}", c.to_string(), c.range());
            }
        }
        Cmd::Dump { region, layers } => {
            let all = load_catalogs(args.catalog)?;
            let region = load_region(region)?;
            if layers {
                print!("{}", region.dump_layers(all.parquets()));
            } else {
                print!("{}", region.dump(all.parquets()));
            }
        }
        Cmd::Rooms { region } => {
            let all = load_catalogs(args.catalog)?;
            let region = load_region(region)?;
            let rooms = RoomCollection::detect(&region, all.parquets());
            log::info!("{} rooms in {:?}", rooms.len(), region.title);
            for room in rooms.iter() {
                let id = room.recipe_id(&region, &all);
                let recipe = all
                    .room_recipes()
                    .get_entity(id)
                    .map_or("no recipe", |e| e.name());
                println!(
                    "{:>3} {:>3}  {:>3} cells  {recipe} ({id})",
                    room.position().x,
                    room.position().y,
                    room.walkable_area().len()
                );
            }
        }
    }

    Ok(())
}

fn load_catalogs(path: Option<PathBuf>) -> anyhow::Result<All> {
    let Some(path) = path else {
        bail!("--catalog is required for this command");
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let catalogs = Catalogs::from_json(&text)
        .with_context(|| format!("loading {}", path.display()))?;
    let all = All::new();
    all.populate(catalogs)?;
    Ok(all)
}

fn load_region(path: PathBuf) -> anyhow::Result<Region> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    Region::from_json(&text)
        .with_context(|| format!("loading {}", path.display()))
}
