//! One load-mutate-write cycle over a staffdb file.
use anyhow::{bail, Context, Result};
use dbfile::Header;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use store::Store;

use crate::config::Config;

/// An open database file together with its in-memory [`Store`].
///
/// # Write Path
///
/// 1. Rewrite header and records from offset 0 ([`Store::write_to`]).
/// 2. Truncate the file to the committed `filesize` so no stale tail survives.
/// 3. If `sync` is set, `fsync` the file.
///
/// The file handle is owned by the session and closed when it is dropped,
/// on success and error paths alike.
pub struct Session {
    file: File,
    path: PathBuf,
    store: Store,
    dirty: bool,

    /// If `true`, [`save`](Session::save) calls `sync_all` after writing.
    pub sync: bool,
}

impl Session {
    /// Creates a new database file holding an empty store.
    ///
    /// The bare header is written before returning, so the file is a valid
    /// empty database even if a later step of the invocation fails. If that
    /// first write fails the file is removed again.
    ///
    /// # Errors
    ///
    /// Fails if `path` already exists or cannot be created or written.
    pub fn create<P: AsRef<Path>>(path: P, sync: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                bail!("file already exists: {}", path.display())
            }
            Err(e) => {
                return Err(e).with_context(|| format!("unable to create {}", path.display()))
            }
        };

        let mut store = Store::new();
        if let Err(e) = init_file(&mut file, &mut store, sync) {
            drop(file);
            if let Err(rm) = fs::remove_file(&path) {
                warn!("could not remove {}: {rm}", path.display());
            }
            return Err(e).with_context(|| format!("unable to initialise {}", path.display()));
        }

        info!("created database file {}", path.display());
        Ok(Self {
            file,
            path,
            store,
            dirty: false,
            sync,
        })
    }

    /// Opens and validates an existing database file.
    pub fn open<P: AsRef<Path>>(path: P, sync: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("unable to open {}", path.display()))?;

        let store = Store::open(&mut file)
            .with_context(|| format!("failed to validate database {}", path.display()))?;

        debug!("loaded {} employees from {}", store.len(), path.display());
        Ok(Self {
            file,
            path,
            store,
            dirty: false,
            sync,
        })
    }

    /// Appends one `name,address,hours` line to the in-memory store.
    pub fn add(&mut self, line: &str) -> Result<()> {
        self.store
            .append(line)
            .with_context(|| format!("unable to add employee {line:?}"))?;
        self.dirty = true;
        Ok(())
    }

    /// Prints every employee in file order.
    pub fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, e) in self.store.iter().enumerate() {
            writeln!(out, "Employee {i}")?;
            writeln!(out, "\tName: {}", e.name)?;
            writeln!(out, "\tAddress: {}", e.address)?;
            writeln!(out, "\tHours: {}", e.hours)?;
        }
        Ok(())
    }

    /// Rewrites the file if anything changed since it was opened.
    pub fn save(&mut self) -> Result<Option<Header>> {
        if !self.dirty {
            return Ok(None);
        }

        let committed = self
            .store
            .write_to(&mut self.file)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        self.file.set_len(u64::from(committed.filesize))?;
        if self.sync {
            self.file.sync_all()?;
        }
        self.dirty = false;

        info!(
            "wrote {} employees ({} bytes) to {}",
            committed.count,
            committed.filesize,
            self.path.display()
        );
        Ok(Some(committed))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

/// Writes the header of an empty store into a freshly created file.
fn init_file(file: &mut File, store: &mut Store, sync: bool) -> Result<()> {
    store.write_to(file)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

/// Runs one invocation: open or create, append, list, then save.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let mut session = if config.create {
        Session::create(&config.path, config.sync)?
    } else {
        Session::open(&config.path, config.sync)?
    };

    if let Some(line) = &config.add {
        session.add(line)?;
        debug!("{} employees after append", session.store().len());
    }

    if config.list {
        session.list(out)?;
    }

    session.save()?;
    Ok(())
}
