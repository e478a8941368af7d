//! Hashing whole files.
//!
//! Each file is materialized in one piece (memory-mapped with the `mmap`
//! feature, read into memory otherwise) and hashed in a single call.

use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};

#[cfg(feature = "mmap")]
use memmap2::Mmap;
use rayon::prelude::*;

use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::hash::hash_bytes_with;
use crate::options::HashOptions;

/// File contents held for the duration of one hash.
enum Contents {
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Contents {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            Contents::Mapped(m) => &m[..],
            Contents::Owned(v) => v.as_slice(),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}

fn read_contents(path: &Path) -> Result<Contents> {
    let mut file = open(path)?;
    let size = file.metadata()?.len();

    #[cfg(feature = "mmap")]
    {
        if size > 0 {
            // Safety: mapped read-only; the file must not be truncated while hashing
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
            return Ok(Contents::Mapped(mmap));
        }
    }

    let mut buf = Vec::with_capacity(size as usize);
    std::io::Read::read_to_end(&mut file, &mut buf)?;
    Ok(Contents::Owned(buf))
}

/// Digest of one file's contents. An empty file gives [`Digest::EMPTY`].
pub fn hash_file(path: impl AsRef<Path>, opts: &HashOptions) -> Result<Digest> {
    let path = path.as_ref();
    let contents = read_contents(path)?;
    let digest = hash_bytes_with(Some(&*contents), opts);
    tracing::debug!(path = %path.display(), bytes = contents.len(), %digest, "hashed file");
    Ok(digest)
}

/// Result for one entry of [`hash_files`].
#[derive(Debug)]
pub struct FileDigest {
    pub path: PathBuf,
    pub digest: Result<Digest>,
}

/// Hash many files in parallel. Output order matches input order.
#[tracing::instrument(skip_all, fields(count = paths.len()))]
pub fn hash_files(paths: &[PathBuf], opts: &HashOptions) -> Vec<FileDigest> {
    paths
        .par_iter()
        .map(|path| FileDigest {
            path: path.clone(),
            digest: hash_file(path, opts),
        })
        .collect()
}

/// True when the file hashes to `expected`.
pub fn verify_file(path: impl AsRef<Path>, expected: &Digest, opts: &HashOptions) -> Result<bool> {
    let actual = hash_file(path.as_ref(), opts)?;
    if actual != *expected {
        tracing::info!(path = %path.as_ref().display(), %expected, %actual, "digest mismatch");
    }
    Ok(actual == *expected)
}
