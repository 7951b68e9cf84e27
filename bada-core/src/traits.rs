use crate::imports::*;

/// Serialization shared by everything read from or written to coefficient
/// directories.  Every read path ends in [init](SerdeAPI::init), so a record
/// that deserializes but fails validation never reaches the caller.
pub trait SerdeAPI: Serialize + for<'a> Deserialize<'a> {
    /// Formats understood by the reader and writer methods, named by file
    /// extension
    const ACCEPTED_FORMATS: &'static [&'static str] = &["yaml", "yml", "json"];

    /// Validates and completes the object after it has been deserialized
    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Reads `filepath`, relative to the bundled `resources` directory, with
    /// the format given by its extension
    #[cfg(feature = "resources")]
    fn from_resource<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let file = crate::resources::RESOURCES_DIR
            .get_file(filepath)
            .with_context(|| format!("{filepath:?} is not bundled in resources"))?;
        Self::from_reader(file.contents(), extension_of(filepath)?)
    }

    /// Writes the object to `filepath`, creating or truncating it
    fn to_file<P: AsRef<Path>>(&self, filepath: P) -> anyhow::Result<()> {
        let filepath = filepath.as_ref();
        let format = extension_of(filepath)?;
        let file = File::create(filepath).with_context(|| format!("{filepath:?}"))?;
        self.to_writer(file, format)
    }

    fn to_writer<W: std::io::Write>(&self, wtr: W, format: &str) -> anyhow::Result<()> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::to_writer(wtr, self)?,
            "json" => serde_json::to_writer(wtr, self)?,
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_FORMATS
            ),
        }
        Ok(())
    }

    /// Reads the object from `filepath` with the format given by its extension
    fn from_file<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let format = extension_of(filepath)?;
        let file = File::open(filepath).with_context(|| format!("Could not open {filepath:?}"))?;
        Self::from_reader(file, format).with_context(|| format!("{filepath:?}"))
    }

    fn from_reader<R: std::io::Read>(rdr: R, format: &str) -> anyhow::Result<Self> {
        let mut de: Self = match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_reader(rdr)?,
            "json" => serde_json::from_reader(rdr)?,
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_FORMATS
            ),
        };
        de.init()?;
        Ok(de)
    }

    fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(&self)?)
    }

    fn from_yaml<S: AsRef<str>>(yaml_str: S) -> anyhow::Result<Self> {
        Self::from_reader(yaml_str.as_ref().as_bytes(), "yaml")
    }
}

fn extension_of(filepath: &Path) -> anyhow::Result<&str> {
    filepath
        .extension()
        .and_then(OsStr::to_str)
        .with_context(|| format!("File extension could not be parsed: {filepath:?}"))
}

pub trait ApproxEq<Rhs = Self> {
    fn approx_eq(&self, other: &Rhs, tol: f64) -> bool;
}

macro_rules! impl_approx_eq_for_floats {
    ($($float_type: ty),*) => {
        $(
            impl ApproxEq for $float_type {
                fn approx_eq(&self, other: &$float_type, tol: f64) -> bool {
                    (((other - self) / (self + other)).abs() as f64) < tol || ((other - self).abs() as f64) < tol
                }
            }
        )*
    }
}

impl_approx_eq_for_floats!(f32, f64);

impl<T: ApproxEq> ApproxEq for Array1<T> {
    fn approx_eq(&self, other: &Array1<T>, tol: f64) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(x, y)| x.approx_eq(y, tol))
    }
}
