//! File-to-file conversion driver.
//!
//! Whole input in, whole output out: a conversion that fails at any point
//! writes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CanvasConfig;
use crate::error::SketchError;
use crate::pgm;
use crate::raster::{Raster, RasterCanvas};
use crate::sketch;

/// File-type detection is by suffix only; no content sniffing.
pub fn is_pgm(name: &str) -> bool {
    name.ends_with(".pgm")
}

pub fn is_sk(name: &str) -> bool {
    name.ends_with(".sk")
}

/// Convert a PGM image to a sketch next to it (`picture.pgm` → `picture.sk`).
pub fn pgm_to_sk(path: &Path) -> Result<PathBuf, SketchError> {
    let bytes = fs::read(path)?;
    let raster = pgm::decode(&bytes)?;
    log::info!(
        "decoded {}x{} PGM from {}",
        raster.width(),
        raster.height(),
        path.display()
    );

    let encoded = sketch::encode_raster(&raster);
    log::info!("encoded {} sketch bytes", encoded.len());

    let out_path = path.with_extension("sk");
    fs::write(&out_path, &encoded)?;
    Ok(out_path)
}

/// Convert a sketch to a PGM image next to it (`drawing.sk` → `drawing.pgm`).
///
/// Sketches carry no dimensions; the canvas config decides the surface.
pub fn sk_to_pgm(path: &Path, config: &CanvasConfig) -> Result<PathBuf, SketchError> {
    let bytes = fs::read(path)?;
    let mut canvas = RasterCanvas::new(Raster::filled(
        config.width,
        config.height,
        config.background,
    ));
    sketch::run(&bytes, &mut canvas)?;
    log::info!(
        "rasterized {} sketch bytes onto a {}x{} canvas",
        bytes.len(),
        config.width,
        config.height
    );

    let encoded = pgm::encode(canvas.raster());
    let out_path = path.with_extension("pgm");
    fs::write(&out_path, &encoded)?;
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pgm() {
        assert!(is_pgm("somefile.pgm"));
        assert!(!is_pgm("anotherfile.docx"));
        assert!(is_pgm("i am annoying and i use spaces in my filenames.pgm"));
        assert!(!is_pgm("uncompressMeFirstPlease.zip"));
    }

    #[test]
    fn test_is_sk() {
        assert!(is_sk("somefile.sk"));
        assert!(!is_sk("anotherfile.docx"));
        assert!(is_sk("i am annoying and i use spaces in my filenames.sk"));
        assert!(!is_sk("ive_done_enough_copy_pasting_for_now.melon"));
    }

    #[test]
    fn test_suffix_check_on_short_names() {
        // Shorter than the suffix itself: must classify, not read out of bounds
        assert!(!is_pgm("pgm"));
        assert!(!is_pgm("m"));
        assert!(!is_pgm(""));
        assert!(!is_sk("sk"));
        assert!(!is_sk("k"));
        assert!(!is_sk(""));
        // A bare dotfile that is nothing but the suffix still counts
        assert!(is_pgm(".pgm"));
        assert!(is_sk(".sk"));
    }

    #[test]
    fn test_classifications_are_disjoint_for_sane_names() {
        for name in ["a.pgm", "b.sk", "c.txt", "d.sk.pgm", "e.pgm.sk"] {
            assert!(!(is_pgm(name) && is_sk(name)), "{} classified twice", name);
        }
    }
}
