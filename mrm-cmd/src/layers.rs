//! `layers`: the map layer plan as Mapbox style JSON.

use crate::input;
use crate::DatasetArgs;
use anyhow::Context;
use log::info;
use mrm_map::layers::LayerPlan;

pub fn style_json(args: &DatasetArgs) -> anyhow::Result<String> {
    let loaded = input::load(args)?;
    let plan = LayerPlan::build(&loaded.dataset);
    info!(
        "Layer plan: {} sources, {} layers",
        plan.sources.len(),
        plan.layers.len()
    );
    Ok(serde_json::to_string_pretty(&plan.to_style_json())?)
}

pub fn run_layers(args: &DatasetArgs, output: Option<&str>) -> anyhow::Result<()> {
    let json = style_json(args)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path))?;
            info!("Layer plan written to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
