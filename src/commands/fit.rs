use std::io;

use bspack::{BspPacker, Sizable};
use serde::Serialize;

use crate::{
    data::ManifestRect,
    options::{FitOptions, SizeArg},
};

#[derive(Debug, Clone, Copy)]
struct FitItem {
    index: usize,
    size: SizeArg,
}

impl Sizable for FitItem {
    fn width(&self) -> f64 {
        self.size.0
    }

    fn height(&self) -> f64 {
        self.size.1
    }
}

/// Where one of the sizes given on the command line was placed. `index`
/// refers to the position of the size in the argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitPlacement {
    pub index: usize,
    pub rect: ManifestRect,
}

pub fn fit(options: FitOptions) -> Result<(), anyhow::Error> {
    let placements = fit_sizes(&options)?;

    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &placements)?;
    println!();

    Ok(())
}

pub fn fit_sizes(options: &FitOptions) -> Result<Vec<FitPlacement>, anyhow::Error> {
    let definition = &options.definition;
    let items = options
        .sizes
        .iter()
        .enumerate()
        .map(|(index, &size)| FitItem { index, size });

    let placements = BspPacker::new(definition.size)
        .margin(definition.margin)
        .pack(items)
        .map_err(|err| {
            anyhow::anyhow!(
                "size #{} ({}x{}) does not fit in {}",
                err.item().index,
                err.item().size.0,
                err.item().size.1,
                definition
            )
        })?;

    log::debug!("Fit {} sizes into {}", placements.len(), definition);

    Ok(placements
        .into_iter()
        .map(|placement| {
            let (item, rect) = placement.into_inner();
            FitPlacement {
                index: item.index,
                rect: rect.into(),
            }
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;

    fn options(definition: &str, sizes: &[(f64, f64)]) -> FitOptions {
        FitOptions {
            definition: definition.parse().unwrap(),
            sizes: sizes.iter().map(|&(w, h)| SizeArg(w, h)).collect(),
        }
    }

    #[test]
    fn indices_follow_input() {
        let placements = fit_sizes(&options("sheet@8x4", &[(2.0, 2.0), (4.0, 4.0)])).unwrap();

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].index, 1);
        assert_eq!(placements[0].rect.x, 0.0);
        assert_eq!(placements[1].index, 0);
        assert_eq!(placements[1].rect.x, 4.0);
    }

    #[test]
    fn overflow_names_size() {
        let err = fit_sizes(&options("sheet@8x4:1", &[(4.0, 4.0), (4.0, 4.0)])).unwrap_err();

        assert_eq!(err.to_string(), "size #0 (4x4) does not fit in sheet@8x4:1");
    }
}
