//! Run directories on disk: one folder per generated dataset, holding the
//! binary data archive plus JSON config, stats, and evaluation results.
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};

use crate::data_handling::{DatasetTriplet, SampleSet};
use crate::error::{Result, ShiftError};

/// names of files inside the store folder
pub const DATA_FILE: &str = "data.bin";
pub const CONFIG_FILE: &str = "config.json";
pub const STATS_FILE: &str = "stats.json";

/// Magic bytes and version for the binary data archive.
const DATA_MAGIC: [u8; 4] = *b"SBDS";
const DATA_VERSION: u8 = 1;

/// Reference to a directory on disk, for storing a dataset for later
/// retrieval, along with metadata and evaluation results.
#[derive(Debug, Clone)]
pub struct Store {
    name: String,
    path_full: PathBuf,
}

impl Store {
    /// Reference an existing store directory. Fails with `StoreNotFound`
    /// if the directory does not exist; use `Store::create` to make one.
    pub fn open(name: &str, store_path: &Path) -> Result<Store> {
        let path_full = store_path.join(name);
        if !path_full.is_dir() {
            return Err(ShiftError::StoreNotFound(path_full));
        }
        Ok(Store {
            name: name.to_string(),
            path_full,
        })
    }

    /// Create a storage folder on disk for a dataset.
    ///
    /// With no name, a local timestamp is used, with a numeric postfix when
    /// the timestamp collides with an existing folder. An existing directory
    /// is an error unless `overwrite` is set, in which case it is replaced.
    pub fn create(name: Option<&str>, store_path: &Path, overwrite: bool) -> Result<Store> {
        let folder_name = match name {
            Some(given) => given.to_string(),
            None => {
                let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
                let mut candidate = stamp.clone();
                let mut postfix = 1;
                while store_path.join(&candidate).exists() {
                    candidate = format!("{}_{}", stamp, postfix);
                    postfix += 1;
                }
                candidate
            }
        };

        let path_full = store_path.join(&folder_name);
        if path_full.exists() {
            if overwrite {
                fs::remove_dir_all(&path_full)?;
            } else {
                return Err(ShiftError::StoreExists(path_full));
            }
        }
        fs::create_dir_all(&path_full)?;
        log::info!("created store {}", path_full.display());

        Ok(Store {
            name: folder_name,
            path_full,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path_full
    }

    /// Persist the three partitions in the binary array archive.
    pub fn save_data(&self, data: &DatasetTriplet) -> Result<()> {
        let file = File::create(self.path_full.join(DATA_FILE))?;
        let mut w = BufWriter::new(file);

        w.write_all(&DATA_MAGIC)?;
        w.write_all(&[DATA_VERSION])?;
        for set in [&data.source, &data.global, &data.target] {
            write_sample_set(&mut w, set)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Load a dataset previously written by `save_data`, bit-identical.
    pub fn load_data(&self) -> Result<DatasetTriplet> {
        let file = File::open(self.path_full.join(DATA_FILE))?;
        let mut r = BufReader::new(file);

        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != DATA_MAGIC {
            return Err(ShiftError::Corrupt("bad magic bytes".to_string()));
        }
        let mut version = [0u8; 1];
        r.read_exact(&mut version)?;
        if version[0] != DATA_VERSION {
            return Err(ShiftError::Corrupt(format!(
                "unsupported data version {}",
                version[0]
            )));
        }

        let source = read_sample_set(&mut r)?;
        let global = read_sample_set(&mut r)?;
        let target = read_sample_set(&mut r)?;
        DatasetTriplet::new(source, global, target)
    }

    /// Persist the builder configuration that produced this dataset.
    pub fn save_config(&self, config: &serde_json::Value) -> Result<()> {
        self.write_json(CONFIG_FILE, config)
    }

    /// Persist basic statistics computed at generation time.
    pub fn save_stats(&self, stats: &BTreeMap<String, f64>) -> Result<()> {
        let value = serde_json::to_value(stats).map_err(json_err)?;
        self.write_json(STATS_FILE, &value)
    }

    /// Persist an evaluation result for one model run.
    ///
    /// The identifier distinguishes repeated evaluations of different model
    /// configurations on the same dataset.
    pub fn save_eval(
        &self,
        metrics: &BTreeMap<String, f64>,
        model: &str,
        identifier: Option<&str>,
    ) -> Result<()> {
        let file_name = match identifier {
            Some(id) => format!("eval_{}_{}.json", model, id),
            None => format!("eval_{}.json", model),
        };
        let value = serde_json::json!({
            "model": model,
            "identifier": identifier,
            "metrics": metrics,
        });
        self.write_json(&file_name, &value)
    }

    fn write_json(&self, file_name: &str, value: &serde_json::Value) -> Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(json_err)?;
        fs::write(self.path_full.join(file_name), text)?;
        Ok(())
    }
}

fn json_err(err: serde_json::Error) -> ShiftError {
    ShiftError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

fn write_sample_set<W: Write>(w: &mut W, set: &SampleSet) -> Result<()> {
    w.write_all(&(set.x.nrows() as u64).to_le_bytes())?;
    w.write_all(&(set.x.ncols() as u64).to_le_bytes())?;
    for &v in set.x.iter() {
        w.write_all(&v.to_le_bytes())?;
    }
    for &v in set.y.iter() {
        w.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

fn read_sample_set<R: Read>(r: &mut R) -> Result<SampleSet> {
    let rows = read_u64(r)? as usize;
    let cols = read_u64(r)? as usize;

    let mut x_data = Vec::with_capacity(rows * cols);
    let mut buf = [0u8; 8];
    for _ in 0..rows * cols {
        r.read_exact(&mut buf)?;
        x_data.push(f64::from_le_bytes(buf));
    }
    let mut y_data = Vec::with_capacity(rows);
    let mut ybuf = [0u8; 4];
    for _ in 0..rows {
        r.read_exact(&mut ybuf)?;
        y_data.push(i32::from_le_bytes(ybuf));
    }

    let x = Array2::from_shape_vec((rows, cols), x_data)
        .map_err(|err| ShiftError::Corrupt(format!("bad array shape: {}", err)))?;
    let y = Array1::from_vec(y_data);
    SampleSet::new(x, y)
}

fn read_u64<R: Read>(r: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
