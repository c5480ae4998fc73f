use anyhow::{bail, Context};

use crate::{
    data::{EntryManifest, Manifest},
    options::RemapOptions,
};

pub fn remap(options: RemapOptions) -> Result<(), anyhow::Error> {
    let manifest = Manifest::read_from_file(&options.manifest)
        .with_context(|| format!("could not read manifest {}", options.manifest.display()))?;

    let entry = find_entry(&manifest, options.atlas.as_deref(), &options.image)?;

    for coord in options.coords {
        let (u, v) = entry.uv.apply((coord.0, coord.1));
        println!("{} {}", u, v);
    }

    Ok(())
}

/// Looks up an image by name, optionally restricted to one atlas. Images that
/// appear in several atlases have to be disambiguated.
pub fn find_entry<'a>(
    manifest: &'a Manifest,
    atlas: Option<&str>,
    image: &str,
) -> Result<&'a EntryManifest, anyhow::Error> {
    let mut found = manifest
        .atlases
        .iter()
        .filter(|atlas_manifest| atlas.map_or(true, |name| atlas_manifest.name == name))
        .flat_map(|atlas_manifest| atlas_manifest.entries.iter())
        .filter(|entry| entry.image == image);

    match (found.next(), found.next()) {
        (Some(entry), None) => Ok(entry),
        (Some(_), Some(_)) => bail!(
            "image '{}' is in more than one atlas, pick one with --atlas",
            image
        ),
        (None, _) => bail!("image '{}' is not in the manifest", image),
    }
}
