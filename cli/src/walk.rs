use std::path::Path;

use anyhow::Context;

/// Walks the regular files under a directory, running a given function
/// for each file.
///
/// ```text
/// let walker = Walker::path(".");
///
/// walker.walk(
///     // This function is called for each file.
///     |file_path| {
///         // ... search the file
///         Ok(())
///     },
///     // This function is called with any error found during the walk.
///     |err| {
///         Ok(())
///     }
/// ).unwrap();
/// ```
pub struct Walker<'a> {
    /// Path to the directory that will be walked. Can also point to an
    /// individual file.
    path: &'a Path,
}

impl<'a> Walker<'a> {
    /// Creates a [`Walker`] that walks a directory.
    ///
    /// `path` can also point to an individual file instead of a
    /// directory.
    pub fn path(path: &'a Path) -> Self {
        Self { path }
    }

    /// Runs `f` for every regular file found, in walk order. Errors
    /// produced while walking go to `e`, which decides whether the walk
    /// continues (`Ok`) or aborts (`Err`).
    pub fn walk<F, E>(&self, mut f: F, mut e: E) -> anyhow::Result<()>
    where
        F: FnMut(&Path) -> anyhow::Result<()>,
        E: FnMut(anyhow::Error) -> anyhow::Result<()>,
    {
        if self.path.is_file() {
            return f(self.path);
        }

        let entries =
            globwalk::GlobWalkerBuilder::from_patterns(self.path, &["**/*"])
                .file_type(globwalk::FileType::FILE)
                .build()
                .with_context(|| {
                    format!("can not walk `{}`", self.path.display())
                })?;

        for entry in entries {
            match entry {
                Ok(entry) => f(entry.path())?,
                Err(err) => e(err.into())?,
            }
        }

        Ok(())
    }
}
