use std::{
    fs::{File, metadata},
    io::Result,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

pub const SCRATCH_PREFIX: &str = ".rag-";

/// The proposed contents of one candidate file.
///
/// The scratch file is created next to its target so that promoting it is a rename within one
/// filesystem. Dropping a `ScratchCopy` deletes the file.
pub struct ScratchCopy {
    target: PathBuf,
    tempfile: NamedTempFile,
}

impl ScratchCopy {
    pub fn new<P>(target: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let tempfile = sibling_tempfile(target.as_ref())?;
        Ok(Self {
            target: target.as_ref().to_path_buf(),
            tempfile,
        })
    }

    pub fn path(&self) -> &Path {
        self.tempfile.path()
    }

    pub fn as_file_mut(&mut self) -> &mut File {
        self.tempfile.as_file_mut()
    }

    /// Renames the scratch file over its target, keeping the target's permissions.
    ///
    /// On failure the scratch file is deleted and the target is left as it was.
    pub fn promote(self) -> Result<()> {
        let permissions = metadata(&self.target)?.permissions();
        self.tempfile.as_file().set_permissions(permissions)?;
        self.tempfile
            .persist(&self.target)
            .map(drop)
            .map_err(|error| error.error)
    }

    pub fn discard(self) -> Result<()> {
        self.tempfile.close()
    }
}

fn sibling_tempfile(path: &Path) -> Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempfile_in(parent)
}
