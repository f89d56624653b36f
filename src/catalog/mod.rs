// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! LoTSS source catalogs.

mod error;

pub use error::CatalogError;

use std::path::Path;

use log::{debug, info};

use crate::{
    config::DataConfig,
    io::read::fits::{fits_get_col, fits_open, fits_open_hdu},
    mask::DataRelease,
    misc::expensive_op,
};

pub(crate) const RA_COL: &str = "RA";
pub(crate) const DEC_COL: &str = "DEC";
pub(crate) const FLUX_COL: &str = "Total_flux";
pub(crate) const NOISE_COL: &str = "Isl_rms";

/// Detected sources. The columns always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    ra: Vec<f64>,
    dec: Vec<f64>,
    total_flux: Vec<f64>,
    isl_rms: Vec<f64>,
}

impl Catalog {
    /// Positions are in degrees, fluxes and noises in mJy.
    pub fn new(
        ra: Vec<f64>,
        dec: Vec<f64>,
        total_flux: Vec<f64>,
        isl_rms: Vec<f64>,
    ) -> Result<Catalog, CatalogError> {
        let n = ra.len();
        if dec.len() != n || total_flux.len() != n || isl_rms.len() != n {
            return Err(CatalogError::ColumnLengths {
                ra: n,
                dec: dec.len(),
                flux: total_flux.len(),
                noise: isl_rms.len(),
            });
        }
        Ok(Catalog {
            ra,
            dec,
            total_flux,
            isl_rms,
        })
    }

    /// Read the position, flux and noise columns from the first table HDU of
    /// a FITS file. Other columns are ignored.
    pub fn read(file: &Path) -> Result<Catalog, CatalogError> {
        debug!("Reading catalog {}", file.display());
        let mut fptr = fits_open(file)?;
        let hdu = fits_open_hdu(&mut fptr, 1)?;
        let ra = fits_get_col(&mut fptr, &hdu, RA_COL)?;
        let dec = fits_get_col(&mut fptr, &hdu, DEC_COL)?;
        let total_flux = fits_get_col(&mut fptr, &hdu, FLUX_COL)?;
        let isl_rms = fits_get_col(&mut fptr, &hdu, NOISE_COL)?;
        Catalog::new(ra, dec, total_flux, isl_rms)
    }

    /// Keep only the sources whose total flux is strictly greater than
    /// `flux_min_cut` \[mJy\]. Order is preserved.
    pub fn flux_cut(self, flux_min_cut: f64) -> Catalog {
        let keep: Vec<bool> = self.total_flux.iter().map(|&f| f > flux_min_cut).collect();
        let filter = |v: Vec<f64>| -> Vec<f64> {
            v.into_iter()
                .zip(keep.iter())
                .filter_map(|(x, &k)| k.then_some(x))
                .collect()
        };
        Catalog {
            ra: filter(self.ra),
            dec: filter(self.dec),
            total_flux: filter(self.total_flux),
            isl_rms: filter(self.isl_rms),
        }
    }

    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    pub fn ra(&self) -> &[f64] {
        &self.ra
    }

    pub fn dec(&self) -> &[f64] {
        &self.dec
    }

    pub fn total_flux(&self) -> &[f64] {
        &self.total_flux
    }

    pub fn isl_rms(&self) -> &[f64] {
        &self.isl_rms
    }
}

/// Load the catalog of a data release and apply a flux cut \[mJy\].
pub fn load_lotss_catalog(
    config: &DataConfig,
    release: DataRelease,
    flux_min_cut: f64,
) -> Result<Catalog, CatalogError> {
    let file = config.catalog_path(release);
    let catalog = expensive_op(
        || Catalog::read(&file),
        &format!("Still reading {}", file.display()),
    )?;
    info!("Original LoTSS {release} catalog: {} sources", catalog.len());

    let catalog = catalog.flux_cut(flux_min_cut);
    info!(
        "Sources with total flux > {flux_min_cut} mJy: {}",
        catalog.len()
    );
    Ok(catalog)
}
