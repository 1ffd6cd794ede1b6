use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode given to written artifacts, matching a plain `fs::write` under a 022 umask
#[cfg(unix)]
pub const ARTIFACT_MODE: u32 = 0o644;

/// Writes named artifacts into an output directory
///
/// Each write goes to a temporary file in the same directory and is renamed over
/// the destination, so an interrupted run never leaves a partial artifact behind
/// and reruns always fully replace earlier output.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Create the output directory if absent
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path an artifact named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write `data` as `name`, replacing any existing file
    pub fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(name);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(data)?;
        set_artifact_permissions(&tmp)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::info!(path = %path.display(), size = data.len(), "wrote artifact");
        Ok(path)
    }
}

// Temp files are created 0600; widen so readers running as other users can open them
#[cfg(unix)]
fn set_artifact_permissions(tmp: &NamedTempFile) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(ARTIFACT_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_artifact_permissions(_tmp: &NamedTempFile) -> Result<()> {
    Ok(())
}
