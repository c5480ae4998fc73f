use std::{env, io};

use crate::{
    data::{AtlasManifest, Config, Manifest},
    options::PackOptions,
};

pub fn pack(options: PackOptions) -> Result<(), anyhow::Error> {
    let config_path = match options.config_path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let config = Config::read_from_folder_or_file(&config_path)?;
    let manifest = pack_config(&config)?;

    match options.output {
        Some(output_path) => {
            manifest.write_to_file(&output_path)?;
            log::info!("Wrote manifest to {}", output_path.display());
        }
        None => {
            let stdout = io::stdout();
            manifest.write_to(stdout.lock())?;
            println!();
        }
    }

    Ok(())
}

/// Packs every atlas in the config. Stops at the first atlas that has an
/// image that doesn't fit.
pub fn pack_config(config: &Config) -> Result<Manifest, anyhow::Error> {
    let mut manifest = Manifest::default();

    for atlas in config.atlases()? {
        if atlas.images().is_empty() {
            log::warn!("Atlas {} has no images", atlas.definition().name);
        }

        let chart = atlas.pack()?;

        log::info!(
            "Packed {} images into atlas {}",
            chart.entries().len(),
            atlas.definition()
        );

        manifest.atlases.push(AtlasManifest::from_chart(&chart));
    }

    Ok(manifest)
}
