use std::path::{Path, PathBuf};

use inkfit_image::Image;
use inkfit_io::functional::write_image_rgba8;

use crate::{error::PreviewError, session::DisplaySink};

/// Writes every presented frame as a numbered PNG file.
pub struct PngSequenceSink {
    dir: PathBuf,
    index: usize,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, PreviewError> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_owned(),
            index: 0,
        })
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.index
    }
}

impl DisplaySink for PngSequenceSink {
    fn present(&mut self, frame: &Image<u8, 4>) -> Result<(), PreviewError> {
        let path = self.dir.join(format!("frame_{:05}.png", self.index));
        write_image_rgba8(&path, frame)?;
        self.index += 1;
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn present(&mut self, _frame: &Image<u8, 4>) -> Result<(), PreviewError> {
        Ok(())
    }
}
