//! Sources that resolve ICAO aircraft type designators to coefficient records.
//!
//! A coefficient directory holds
//! - `synonyms.csv`, mapping every known ICAO code to the id of the file that
//!   describes it, so that several variants can share one file
//! - one `<file id>.yaml` file per described type, a serialized
//!   [AircraftType](crate::coefficients::AircraftType)
//! - optionally `global_params.yaml` with the
//!   [GlobalPerformanceFactors](crate::params::GlobalPerformanceFactors)

use crate::coefficients::AircraftType;
use crate::error::PerformanceError;
use crate::imports::*;
use crate::params::GlobalPerformanceFactors;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Name of the synonym table in a coefficient directory
pub const SYNONYM_FILE: &str = "synonyms.csv";
/// Name of the global performance factors file in a coefficient directory
pub const GLOBAL_PARAMS_FILE: &str = "global_params.yaml";

lazy_static! {
    static ref ICAO_DESIGNATOR_REGEX: Regex = Regex::new(r"^[A-Z][A-Z0-9]{1,3}$").unwrap();
}

/// Trims and uppercases `icao`, failing with
/// [UnknownAircraftType](PerformanceError::UnknownAircraftType) if the result
/// cannot be an ICAO aircraft type designator
pub fn normalize_icao(icao: &str) -> anyhow::Result<String> {
    let icao = icao.trim().to_uppercase();
    ensure!(
        ICAO_DESIGNATOR_REGEX.is_match(&icao),
        PerformanceError::UnknownAircraftType(icao)
    );
    Ok(icao)
}

/// Resolves aircraft types and provides the global performance factors that
/// go with them
pub trait CoefficientSource: std::fmt::Debug + Send + Sync {
    /// Returns the validated record for `icao`, or an error that downcasts to
    /// [UnknownAircraftType](PerformanceError::UnknownAircraftType) if the
    /// type is not known
    fn resolve(&self, icao: &str) -> anyhow::Result<AircraftType>;

    /// Returns the global performance factors of this source.  Sources
    /// without their own factors fall back to the BADA defaults.
    fn global_factors(&self) -> anyhow::Result<GlobalPerformanceFactors> {
        Ok(GlobalPerformanceFactors::default())
    }
}

/// Row of the synonym table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynonymRecord {
    /// ICAO aircraft type designator
    pub icao: String,
    /// Id of the coefficient file describing this type
    pub file_id: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
}

/// Lookup from ICAO code to coefficient file id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynonymTable {
    records: HashMap<String, SynonymRecord>,
}

impl SynonymTable {
    /// Reads a synonym table in CSV format with headers
    /// `icao,file_id,manufacturer,model`.  Fails with
    /// [ConfigurationDataMissing](PerformanceError::ConfigurationDataMissing)
    /// if the table has no rows.
    pub fn from_csv_reader<R: std::io::Read>(rdr: R) -> anyhow::Result<Self> {
        let mut table = Self::default();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        for result in rdr.deserialize() {
            let mut record: SynonymRecord = result?;
            record.icao = normalize_icao(&record.icao)
                .with_context(|| format!("invalid ICAO code in synonym table: {:?}", record.icao))?;
            if let Some(prev) = table.records.get(&record.icao) {
                log::warn!(
                    "{} listed twice in synonym table, {} replaces {}",
                    record.icao,
                    record.file_id,
                    prev.file_id
                );
            }
            table.records.insert(record.icao.clone(), record);
        }
        ensure!(
            !table.is_empty(),
            PerformanceError::ConfigurationDataMissing("synonym table is empty".into())
        );
        Ok(table)
    }

    pub fn from_csv_file<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let file = File::open(filepath).map_err(|_| {
            PerformanceError::ConfigurationDataMissing(format!(
                "synonym table not found: {filepath:?}"
            ))
        })?;
        Self::from_csv_reader(file).with_context(|| format!("{filepath:?}"))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, icao: &str) -> Option<&SynonymRecord> {
        self.records.get(icao)
    }

    /// Returns the file id for `icao`, failing with
    /// [UnknownAircraftType](PerformanceError::UnknownAircraftType)
    pub fn file_id(&self, icao: &str) -> anyhow::Result<&str> {
        let icao = normalize_icao(icao)?;
        match self.records.get(&icao) {
            Some(record) => Ok(&record.file_id),
            None => bail!(PerformanceError::UnknownAircraftType(icao)),
        }
    }

    /// Sorted list of every known ICAO code
    pub fn icao_codes(&self) -> Vec<String> {
        self.records.keys().cloned().sorted().collect()
    }
}

/// Looks `icao` up in `synonyms`, loads the file it points at with `load` and
/// names the result after the requested code
fn resolve_synonym<F>(synonyms: &SynonymTable, icao: &str, load: F) -> anyhow::Result<AircraftType>
where
    F: FnOnce(&str) -> anyhow::Result<AircraftType>,
{
    let icao = normalize_icao(icao)?;
    let file_id = synonyms.file_id(&icao)?;
    let mut ac = match load(file_id) {
        Ok(ac) => ac,
        // a listed type whose file is absent is missing reference data
        Err(err) if is_missing_data(&err) => return Err(err),
        Err(err) => {
            return Err(err.context(PerformanceError::InvalidCoefficients {
                icao,
                reason: format!("coefficient file {file_id:?} could not be loaded"),
            }))
        }
    };
    ac.icao = icao;
    Ok(ac)
}

fn is_missing_data(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PerformanceError>(),
        Some(PerformanceError::ConfigurationDataMissing(_))
    )
}

/// Coefficient directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    synonyms: SynonymTable,
}

impl DirectorySource {
    /// Opens coefficient directory `dir` and reads its synonym table.  Fails
    /// with [ConfigurationDataMissing](PerformanceError::ConfigurationDataMissing)
    /// if the directory or its synonym table is missing or empty.
    pub fn new<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        ensure!(
            dir.is_dir(),
            PerformanceError::ConfigurationDataMissing(format!(
                "coefficient directory not found: {dir:?}"
            ))
        );
        let synonyms = SynonymTable::from_csv_file(dir.join(SYNONYM_FILE))?;
        log::debug!("{} aircraft types known in {:?}", synonyms.len(), dir);
        Ok(Self { dir, synonyms })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }
}

impl CoefficientSource for DirectorySource {
    fn resolve(&self, icao: &str) -> anyhow::Result<AircraftType> {
        resolve_synonym(&self.synonyms, icao, |file_id| {
            let filepath = self.dir.join(format!("{file_id}.yaml"));
            ensure!(
                filepath.is_file(),
                PerformanceError::ConfigurationDataMissing(format!(
                    "coefficient file not found: {filepath:?}"
                ))
            );
            AircraftType::from_file(filepath)
        })
    }

    /// Reads `global_params.yaml`, failing with
    /// [ConfigurationDataMissing](PerformanceError::ConfigurationDataMissing)
    /// if it is absent or empty
    fn global_factors(&self) -> anyhow::Result<GlobalPerformanceFactors> {
        let filepath = self.dir.join(GLOBAL_PARAMS_FILE);
        ensure!(
            filepath.is_file(),
            PerformanceError::ConfigurationDataMissing(format!(
                "global performance factors not found: {filepath:?}"
            ))
        );
        let contents = std::fs::read_to_string(&filepath)
            .with_context(|| format!("Could not read {filepath:?}"))?;
        ensure!(
            !contents.trim().is_empty(),
            PerformanceError::ConfigurationDataMissing(format!(
                "global performance factors file is empty: {filepath:?}"
            ))
        );
        GlobalPerformanceFactors::from_yaml(contents).with_context(|| format!("{filepath:?}"))
    }
}

/// Aircraft types held in memory, keyed by ICAO code
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    types: HashMap<String, AircraftType>,
    gpf: Option<GlobalPerformanceFactors>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `ac` and stores it under its ICAO code, replacing any
    /// previous entry
    pub fn insert(&mut self, mut ac: AircraftType) -> anyhow::Result<()> {
        ac.init()?;
        self.types.insert(ac.icao.clone(), ac);
        Ok(())
    }

    pub fn with_type(mut self, ac: AircraftType) -> anyhow::Result<Self> {
        self.insert(ac)?;
        Ok(self)
    }

    pub fn with_global_factors(mut self, gpf: GlobalPerformanceFactors) -> Self {
        self.gpf = Some(gpf);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Source holding the jet, turboprop and piston mock types
    pub fn mock() -> Self {
        let types = [
            AircraftType::mock_jet(),
            AircraftType::mock_turboprop(),
            AircraftType::mock_piston(),
        ]
        .into_iter()
        .map(|ac| (ac.icao.clone(), ac))
        .collect();
        Self { types, gpf: None }
    }
}

impl CoefficientSource for InMemorySource {
    fn resolve(&self, icao: &str) -> anyhow::Result<AircraftType> {
        let icao = normalize_icao(icao)?;
        match self.types.get(&icao) {
            Some(ac) => Ok(ac.clone()),
            None => bail!(PerformanceError::UnknownAircraftType(icao)),
        }
    }

    fn global_factors(&self) -> anyhow::Result<GlobalPerformanceFactors> {
        Ok(self.gpf.clone().unwrap_or_default())
    }
}

/// Coefficient directory bundled into the crate under `resources/`
#[cfg(feature = "resources")]
#[derive(Debug, Clone)]
pub struct ResourceSource {
    synonyms: SynonymTable,
}

#[cfg(feature = "resources")]
impl ResourceSource {
    pub fn new() -> anyhow::Result<Self> {
        let file = crate::resources::RESOURCES_DIR
            .get_file(SYNONYM_FILE)
            .ok_or_else(|| {
                PerformanceError::ConfigurationDataMissing(format!(
                    "{SYNONYM_FILE} not found in resources"
                ))
            })?;
        Ok(Self {
            synonyms: SynonymTable::from_csv_reader(file.contents())?,
        })
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }
}

#[cfg(feature = "resources")]
impl CoefficientSource for ResourceSource {
    fn resolve(&self, icao: &str) -> anyhow::Result<AircraftType> {
        resolve_synonym(&self.synonyms, icao, |file_id| {
            let filename = format!("{file_id}.yaml");
            ensure!(
                crate::resources::RESOURCES_DIR.get_file(&filename).is_some(),
                PerformanceError::ConfigurationDataMissing(format!(
                    "{filename} not found in resources"
                ))
            );
            AircraftType::from_resource(filename)
        })
    }

    fn global_factors(&self) -> anyhow::Result<GlobalPerformanceFactors> {
        GlobalPerformanceFactors::from_resource(GLOBAL_PARAMS_FILE)
    }
}
