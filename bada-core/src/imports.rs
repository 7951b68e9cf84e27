pub use anyhow::{anyhow, bail, ensure, Context};
pub use log;
pub use ndarray::{aview0, concatenate, s, Array1, Array2, ArrayView1, Axis, Zip};
pub use serde::{Deserialize, Serialize};
pub use std::ffi::OsStr;
pub use std::fs::File;
pub use std::path::{Path, PathBuf};

pub use crate::traits::*;
pub use crate::utils;
