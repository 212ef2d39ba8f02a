use crate::cli::BoundsArgs;
use crate::error::{CliError, Result};
use nanolysis::engine::Engine;
use nanolysis::engine::config::{CoordinateMode, EngineConfigBuilder};
use tracing::info;

pub fn run(args: BoundsArgs) -> Result<()> {
    let mode = if args.scaled {
        CoordinateMode::ScaledByBox
    } else {
        CoordinateMode::Raw
    };
    let config = EngineConfigBuilder::new()
        .coordinate_mode(mode)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut engine = Engine::new(config);
    engine.set_origin(&args.origin)?;
    info!("Reading snapshot from {:?}", &args.input);
    let snapshot = engine.read(&args.input)?;
    let (timestep, beads) = (snapshot.timestep, snapshot.len());

    let bounds = engine.bounding_box()?;
    let lengths = bounds.lengths();

    println!("Timestep: {}", timestep);
    println!("Beads:    {}", beads);
    println!(
        "Min:      ({}, {}, {})",
        bounds.min.x, bounds.min.y, bounds.min.z
    );
    println!(
        "Max:      ({}, {}, {})",
        bounds.max.x, bounds.max.y, bounds.max.z
    );
    println!("Extent:   ({}, {}, {})", lengths.x, lengths.y, lengths.z);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        let origin = dir.path().join("structure.in");
        let dump = dir.path().join("dump.in");
        fs::write(&origin, "id\twalk\ta\tb\tc\td\te\tf\n").unwrap();
        fs::write(
            &dump,
            "ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n0\nITEM: BOX BOUNDS pp pp pp\n\
             0 1.0\n0 1.0\n0 1.0\nITEM: ATOMS id type xs ys zs\n",
        )
        .unwrap();

        let result = run(BoundsArgs {
            origin,
            input: dump,
            scaled: false,
        });
        assert!(matches!(result, Err(CliError::Engine(_))));
    }
}
