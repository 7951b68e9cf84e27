//! Module containing the fleet registry: every per-aircraft column of the
//! performance model, indexed by slot, and the operations that grow and
//! shrink them together.

use crate::atmosphere;
use crate::coefficients::*;
use crate::enums::*;
use crate::error::PerformanceError;
use crate::imports::*;
use crate::loader::{CoefficientSource, InMemorySource};
use crate::params::*;
use crate::speed_schedule::*;
use crate::utils::{kts_to_mps, m_to_ft, map_slots, try_map_slots};

/// Identity of an aircraft in the fleet.  Unlike its slot, an id never
/// changes while the aircraft exists and is never handed out twice.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AircraftId(u64);

impl std::fmt::Display for AircraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// BADA performance model over a fleet of aircraft.  Slot `i` of every column
/// belongs to the same aircraft; deleting an aircraft shifts all later slots
/// down by one.
#[derive(Debug)]
pub struct BadaPerformance {
    gpf: GlobalPerformanceFactors,
    source: Box<dyn CoefficientSource>,
    /// Ascending, since ids are handed out in increasing order and removal
    /// keeps the order of the remaining slots
    ids: Vec<AircraftId>,
    next_id: u64,
    icao: Vec<String>,
    coefficients: CoefficientTable,
    procedure_speeds: ProcedureSpeedTable,
    climb_schedule: Array2<f64>,
    cruise_schedule: Array2<f64>,
    descent_schedule: Array2<f64>,
    pub(crate) drag: Array1<f64>,
    pub(crate) thrust: Array1<f64>,
    pub(crate) esf: Array1<f64>,
}

impl BadaPerformance {
    /// Creates an empty fleet that resolves aircraft types through `source`
    /// and takes its global performance factors from it
    pub fn new<S: CoefficientSource + 'static>(source: S) -> anyhow::Result<Self> {
        let gpf = source.global_factors()?;
        Self::with_global_factors(source, gpf)
    }

    /// Creates an empty fleet with explicitly given global performance factors
    pub fn with_global_factors<S: CoefficientSource + 'static>(
        source: S,
        mut gpf: GlobalPerformanceFactors,
    ) -> anyhow::Result<Self> {
        gpf.init().with_context(|| {
            PerformanceError::ConfigurationDataMissing("invalid global performance factors".into())
        })?;
        Ok(Self::empty(Box::new(source), gpf))
    }

    /// Creates an empty fleet backed by the coefficient files bundled with the crate
    #[cfg(feature = "resources")]
    pub fn from_resources() -> anyhow::Result<Self> {
        Self::new(crate::loader::ResourceSource::new()?)
    }

    /// Empty fleet backed by the mock aircraft types with BADA default factors
    pub fn mock() -> Self {
        Self::empty(
            Box::new(InMemorySource::mock()),
            GlobalPerformanceFactors::default(),
        )
    }

    fn empty(source: Box<dyn CoefficientSource>, gpf: GlobalPerformanceFactors) -> Self {
        Self {
            gpf,
            source,
            ids: Vec::new(),
            next_id: 0,
            icao: Vec::new(),
            coefficients: CoefficientTable::default(),
            procedure_speeds: ProcedureSpeedTable::default(),
            climb_schedule: Array2::zeros((0, CLIMB_BANDS)),
            cruise_schedule: Array2::zeros((0, CRUISE_BANDS)),
            descent_schedule: Array2::zeros((0, DESCENT_BANDS)),
            drag: Array1::zeros(0),
            thrust: Array1::zeros(0),
            esf: Array1::zeros(0),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn gpf(&self) -> &GlobalPerformanceFactors {
        &self.gpf
    }

    pub fn coefficients(&self) -> &CoefficientTable {
        &self.coefficients
    }

    pub fn procedure_speeds(&self) -> &ProcedureSpeedTable {
        &self.procedure_speeds
    }

    /// Climb, cruise and descent schedules, one row per slot
    pub fn schedules(&self) -> (&Array2<f64>, &Array2<f64>, &Array2<f64>) {
        (
            &self.climb_schedule,
            &self.cruise_schedule,
            &self.descent_schedule,
        )
    }

    /// Drag [N] of the last [step](Self::step)
    pub fn drag_output(&self) -> &Array1<f64> {
        &self.drag
    }

    /// Thrust [N] of the last [step](Self::step)
    pub fn thrust_output(&self) -> &Array1<f64> {
        &self.thrust
    }

    /// Energy share factor of the last [step](Self::step)
    pub fn esf_output(&self) -> &Array1<f64> {
        &self.esf
    }

    pub fn ids(&self) -> &[AircraftId] {
        &self.ids
    }

    /// Current slot of aircraft `id`, `None` once it has been deleted
    pub fn slot_of(&self, id: AircraftId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    pub fn id_of(&self, slot: usize) -> Option<AircraftId> {
        self.ids.get(slot).copied()
    }

    /// ICAO code the aircraft in `slot` was added with
    pub fn icao(&self, slot: usize) -> Option<&str> {
        self.icao.get(slot).map(String::as_str)
    }

    fn check_slot(&self, slot: usize) -> anyhow::Result<()> {
        ensure!(
            slot < self.len(),
            PerformanceError::SlotOutOfRange {
                slot,
                len: self.len()
            }
        );
        Ok(())
    }

    /// Adds an aircraft of type `icao` flying the procedure speeds of
    /// `mass_class` and returns its slot, always the last one.  Its speed
    /// schedule starts out at reference mass.  The fleet is left untouched if
    /// the type cannot be resolved.
    pub fn add_aircraft(&mut self, icao: &str, mass_class: MassClass) -> anyhow::Result<usize> {
        // everything that can fail on bad input happens before the first column grows
        let ac = self.source.resolve(icao)?;
        let speeds = ac.procedure_speeds(mass_class);
        let coeffs = ac.coefficients;
        let sched = SpeedSchedule::new(&coeffs, &self.gpf, &speeds, coeffs.m_ref * KG_PER_TONNE);

        self.coefficients.push(&coeffs)?;
        self.procedure_speeds.push(&speeds)?;
        self.climb_schedule
            .push_row(ArrayView1::from(&sched.climb[..]))?;
        self.cruise_schedule
            .push_row(ArrayView1::from(&sched.cruise[..]))?;
        self.descent_schedule
            .push_row(ArrayView1::from(&sched.descent[..]))?;
        for col in [&mut self.drag, &mut self.thrust, &mut self.esf] {
            col.push(Axis(0), aview0(&0.0))?;
        }
        let id = AircraftId(self.next_id);
        self.next_id += 1;
        self.ids.push(id);
        self.icao.push(ac.icao);

        let slot = self.len() - 1;
        log::info!(
            "added {} {} as {:?} in slot {}",
            self.icao[slot],
            id,
            mass_class,
            slot
        );
        Ok(slot)
    }

    /// Removes the aircraft in `slot` from every column and returns its id.
    /// Every later aircraft moves down one slot.
    pub fn del_aircraft(&mut self, slot: usize) -> anyhow::Result<AircraftId> {
        self.check_slot(slot)?;
        self.coefficients.remove(slot)?;
        self.procedure_speeds.remove(slot)?;
        self.climb_schedule = utils::remove_row(&self.climb_schedule, slot)?;
        self.cruise_schedule = utils::remove_row(&self.cruise_schedule, slot)?;
        self.descent_schedule = utils::remove_row(&self.descent_schedule, slot)?;
        self.drag = utils::remove_index(&self.drag, slot)?;
        self.thrust = utils::remove_index(&self.thrust, slot)?;
        self.esf = utils::remove_index(&self.esf, slot)?;
        let icao = self.icao.remove(slot);
        let id = self.ids.remove(slot);
        log::info!("deleted {} {} from slot {}", icao, id, slot);
        Ok(id)
    }

    /// Rebuilds the speed schedule of `slot` for an aircraft of `mass_kg`
    pub fn init_procedure_speed(&mut self, mass_kg: f64, slot: usize) -> anyhow::Result<()> {
        self.check_slot(slot)?;
        let sched = SpeedSchedule::new(
            &self.coefficients.row(slot),
            &self.gpf,
            &self.procedure_speeds.row(slot),
            mass_kg,
        );
        self.climb_schedule
            .row_mut(slot)
            .assign(&ArrayView1::from(&sched.climb[..]));
        self.cruise_schedule
            .row_mut(slot)
            .assign(&ArrayView1::from(&sched.cruise[..]));
        self.descent_schedule
            .row_mut(slot)
            .assign(&ArrayView1::from(&sched.descent[..]));
        Ok(())
    }

    /// Speed schedule currently stored for `slot`
    pub fn schedule(&self, slot: usize) -> anyhow::Result<SpeedSchedule> {
        self.check_slot(slot)?;
        SpeedSchedule::from_rows(
            self.climb_schedule.row(slot),
            self.cruise_schedule.row(slot),
            self.descent_schedule.row(slot),
        )
    }

    /// Returns the scheduled speed of every slot, CAS [kt] below the
    /// transition altitude and Mach above
    /// # Arguments
    /// * `h_p_ft` - geopotential pressure altitude [ft]
    /// * `h_p_trans_ft` - Mach transition altitude [ft]
    /// * `flight_phase` - flight phase
    pub fn get_procedure_speed(
        &self,
        h_p_ft: &Array1<f64>,
        h_p_trans_ft: &Array1<f64>,
        flight_phase: &Array1<FlightPhase>,
    ) -> anyhow::Result<Array1<f64>> {
        ensure_same_len!(self.ids, h_p_ft, h_p_trans_ft, flight_phase);
        try_map_slots(self.len(), |i| {
            Ok(self.schedule(i)?.speed(
                self.coefficients.engine_type[i],
                h_p_ft[i],
                h_p_trans_ft[i],
                flight_phase[i],
            ))
        })
    }

    /// Returns the climb Mach transition altitude [ft] of every slot, where
    /// the climb CAS above 10,000 ft and the climb Mach number give the same TAS
    pub fn transition_altitude(&self, d_t: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
        ensure_same_len!(self.ids, d_t);
        Ok(map_slots(self.len(), |i| {
            m_to_ft(atmosphere::transition_altitude(
                kts_to_mps(self.procedure_speeds.v_cl_2[i]),
                self.procedure_speeds.m_cl[i],
                d_t[i],
            ))
        }))
    }

    /// Empty mass [kg] of the aircraft in `slot`
    pub fn empty_mass(&self, slot: usize) -> anyhow::Result<f64> {
        self.check_slot(slot)?;
        Ok(self.coefficients.row(slot).empty_mass())
    }

    /// Nominal bank angle [deg] of every slot in its `configuration`
    pub fn nominal_bank_angle(
        &self,
        configuration: &Array1<Configuration>,
    ) -> anyhow::Result<Array1<f64>> {
        ensure_same_len!(self.ids, configuration);
        Ok(configuration.mapv(|c| crate::configuration::nominal_bank_angle(&self.gpf, c)))
    }
}
