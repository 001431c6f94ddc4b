//! Directory-backed storage of network generations
//!
//! Level `k` of an `n`-wire search is kept in `networks_<n>-<k>.txt`, one
//! network line followed by its output-set line. Sorting networks found along
//! the way are appended to `optimum_<n>-<k>.txt`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::network::Network;
use crate::parser::parse_network_list;

#[derive(Debug, Clone)]
pub struct NetworkStore {
    dir: PathBuf,
}

impl NetworkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        NetworkStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn networks_path(&self, wires: usize, size: usize) -> PathBuf {
        self.dir.join(format!("networks_{wires}-{size}.txt"))
    }

    pub fn optimum_path(&self, wires: usize, size: usize) -> PathBuf {
        self.dir.join(format!("optimum_{wires}-{size}.txt"))
    }

    /// Replace the stored generation for `(wires, size)`.
    pub fn write(&self, wires: usize, size: usize, networks: &[Network]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.networks_path(wires, size);
        let mut out = BufWriter::new(File::create(&path)?);
        for net in networks {
            writeln!(out, "{net}")?;
            writeln!(out, "{}", net.output_set())?;
        }
        out.flush()?;
        debug!(path = %path.display(), count = networks.len(), "wrote networks");
        Ok(path)
    }

    /// Load the stored generation, at most `limit` networks; a missing file is an empty generation.
    pub fn read(&self, wires: usize, size: usize, limit: Option<usize>) -> Result<Vec<Network>> {
        let path = self.networks_path(wires, size);
        if !path.exists() {
            debug!(path = %path.display(), "no stored networks");
            return Ok(Vec::new());
        }
        let source = fs::read_to_string(&path)?;
        let mut networks = parse_network_list(wires, &source)?;
        if let Some(limit) = limit {
            networks.truncate(limit);
        }
        debug!(path = %path.display(), count = networks.len(), "read networks");
        Ok(networks)
    }

    /// Append a sorting network to the optimum file for its size.
    pub fn write_optimum(&self, net: &Network) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.optimum_path(net.wires(), net.size());
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{net}")?;
        Ok(path)
    }
}
