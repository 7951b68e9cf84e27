pub use crate::coefficients::{AircraftCoefficients, CoefficientTable};
pub use crate::enums::*;
pub use crate::error::PerformanceError;
pub use crate::fleet::{AircraftId, BadaPerformance};
pub use crate::loader::{CoefficientSource, DirectorySource, InMemorySource, SynonymTable};
pub use crate::params::GlobalPerformanceFactors;
pub use crate::performance::{FlightState, PerformanceModel, TickOutputs};
pub use crate::traits::{ApproxEq, SerdeAPI};
