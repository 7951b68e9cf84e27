//! Per-tick evaluation of the performance model over the whole fleet.

use crate::aerodynamics::expedite_descent_factor;
use crate::atmosphere::Atmosphere;
use crate::enums::*;
use crate::fleet::BadaPerformance;
use crate::imports::*;
use crate::total_energy::{energy_share_factor, tem_accel, tem_rocd};
use crate::utils::{ft_to_m, kts_to_mps, map_slots, mps2_to_kts_per_s, mps_to_fpm};

columnar_record! {
    /// Flight condition of one aircraft, as kept by the traffic simulation
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
    pub struct FlightCondition in FlightState {
        /// Aircraft mass [kg]
        pub mass_kg: f64,
        /// Geopotential pressure altitude [ft]
        pub alt_ft: f64,
        /// Calibrated airspeed [kt]
        pub cas_kts: f64,
        /// True airspeed [kt]
        pub tas_kts: f64,
        /// Mach number [-]
        pub mach: f64,
        pub vertical_mode: VerticalMode,
        pub speed_mode: SpeedMode,
        /// Bank angle [deg]
        pub bank_angle_deg: f64,
        /// Temperature deviation from ISA [K]
        pub d_t: f64,
        pub configuration: Configuration,
        pub flight_phase: FlightPhase,
        pub expedite_descent: bool,
        /// Maximum altitude [ft]
        pub max_alt_ft: f64,
    }
}

impl FlightState {
    /// Checks that every column holds one row per aircraft of a fleet of
    /// `fleet_len`
    pub fn check(&self, fleet_len: usize) -> anyhow::Result<()> {
        ensure!(
            self.mass_kg.len() == fleet_len,
            "{}\nflight state has {} rows for a fleet of {} aircraft",
            format_dbg!(),
            self.mass_kg.len(),
            fleet_len
        );
        ensure_same_len!(
            self.mass_kg,
            self.alt_ft,
            self.cas_kts,
            self.tas_kts,
            self.mach,
            self.vertical_mode,
            self.speed_mode,
            self.bank_angle_deg,
            self.d_t,
            self.configuration,
            self.flight_phase,
            self.expedite_descent,
            self.max_alt_ft,
        );
        Ok(())
    }

    /// Builds a state from one condition per slot
    pub fn from_conditions<'a, I>(conditions: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = &'a FlightCondition>,
    {
        let mut state = Self::default();
        for cond in conditions {
            state.push(cond)?;
        }
        Ok(state)
    }
}

impl FlightCondition {
    /// Level cruise of an A320-like jet at FL350, 460 kt TAS, constant Mach
    pub fn mock_jet_cruise() -> Self {
        Self {
            mass_kg: 60_000.0,
            alt_ft: 35_000.0,
            cas_kts: 263.0,
            tas_kts: 460.0,
            mach: 0.8,
            vertical_mode: VerticalMode::Level,
            speed_mode: SpeedMode::ConstantMach,
            bank_angle_deg: 0.0,
            d_t: 0.0,
            configuration: Configuration::Clean,
            flight_phase: FlightPhase::Cruise,
            expedite_descent: false,
            max_alt_ft: 39_800.0,
        }
    }
}

/// Everything computed for the fleet in one tick
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TickOutputs {
    pub configuration: Array1<Configuration>,
    /// Drag [N]
    pub drag: Array1<f64>,
    /// Thrust [N]
    pub thrust: Array1<f64>,
    /// Energy share factor [-]
    pub esf: Array1<f64>,
    /// Rate of climb or descent [ft/min]
    pub rocd_fpm: Array1<f64>,
    /// True airspeed acceleration [kt/s]
    pub accel_kts_per_s: Array1<f64>,
    /// Fuel burn [kg/s]
    pub fuel_burn_kg_per_s: Array1<f64>,
}

impl SerdeAPI for TickOutputs {}

/// Capabilities a performance model offers the traffic simulation.  Every
/// method works on whole columns, one row per fleet slot.
pub trait PerformanceModel {
    /// Aerodynamic configuration from CAS, altitude and vertical mode
    fn configuration(&self, state: &FlightState) -> anyhow::Result<Array1<Configuration>>;

    /// Drag [N] in the configuration stored in `state`
    fn drag(&self, state: &FlightState) -> anyhow::Result<Array1<f64>>;

    /// Thrust [N] for the vertical and speed modes in `state`
    fn thrust(&self, state: &FlightState, drag: &Array1<f64>) -> anyhow::Result<Array1<f64>>;

    fn energy_share_factor(&self, state: &FlightState) -> anyhow::Result<Array1<f64>>;

    /// Rate of climb or descent [ft/min] and true airspeed acceleration
    /// [kt/s].  Acceleration is 0 unless the speed mode accelerates or
    /// decelerates.
    fn vertical_speed_and_accel(
        &self,
        state: &FlightState,
        drag: &Array1<f64>,
        thrust: &Array1<f64>,
        esf: &Array1<f64>,
    ) -> anyhow::Result<(Array1<f64>, Array1<f64>)>;

    /// Fuel burn [kg/s] in the flight phase stored in `state`
    fn fuel_burn(&self, state: &FlightState, thrust: &Array1<f64>)
        -> anyhow::Result<Array1<f64>>;

    /// Minimum speed [kt CAS] in `configuration`
    fn minimum_speed(&self, configuration: &Array1<Configuration>)
        -> anyhow::Result<Array1<f64>>;

    /// Maximum operating speed [kt CAS] and Mach number
    fn maximum_speed(&self) -> (Array1<f64>, Array1<f64>);

    /// Maximum altitude [ft] at temperature deviation `d_t` [K] and `mass_kg`
    fn maximum_altitude(
        &self,
        d_t: &Array1<f64>,
        mass_kg: &Array1<f64>,
    ) -> anyhow::Result<Array1<f64>>;
}

impl PerformanceModel for BadaPerformance {
    fn configuration(&self, state: &FlightState) -> anyhow::Result<Array1<Configuration>> {
        state.check(self.len())?;
        Ok(map_slots(self.len(), |i| {
            self.coefficients().row(i).update_configuration(
                self.gpf(),
                state.cas_kts[i],
                state.alt_ft[i],
                state.vertical_mode[i],
            )
        }))
    }

    fn drag(&self, state: &FlightState) -> anyhow::Result<Array1<f64>> {
        state.check(self.len())?;
        Ok(map_slots(self.len(), |i| {
            let atm = Atmosphere::at(ft_to_m(state.alt_ft[i]), state.d_t[i]);
            self.coefficients().row(i).drag(
                kts_to_mps(state.tas_kts[i]),
                state.bank_angle_deg[i],
                state.mass_kg[i],
                atm.density,
                state.configuration[i],
                expedite_descent_factor(self.gpf(), state.expedite_descent[i]),
            )
        }))
    }

    fn thrust(&self, state: &FlightState, drag: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
        state.check(self.len())?;
        ensure_same_len!(state.mass_kg, drag);
        Ok(map_slots(self.len(), |i| {
            self.coefficients().row(i).thrust(
                self.gpf(),
                state.vertical_mode[i],
                state.configuration[i],
                state.alt_ft[i],
                state.tas_kts[i],
                state.d_t[i],
                drag[i],
                state.speed_mode[i],
            )
        }))
    }

    fn energy_share_factor(&self, state: &FlightState) -> anyhow::Result<Array1<f64>> {
        state.check(self.len())?;
        Ok(map_slots(self.len(), |i| {
            let h_p_m = ft_to_m(state.alt_ft[i]);
            let atm = Atmosphere::at(h_p_m, state.d_t[i]);
            energy_share_factor(
                h_p_m,
                atm.temperature,
                state.d_t[i],
                state.mach[i],
                state.speed_mode[i],
                state.vertical_mode[i],
            )
        }))
    }

    fn vertical_speed_and_accel(
        &self,
        state: &FlightState,
        drag: &Array1<f64>,
        thrust: &Array1<f64>,
        esf: &Array1<f64>,
    ) -> anyhow::Result<(Array1<f64>, Array1<f64>)> {
        state.check(self.len())?;
        ensure_same_len!(state.mass_kg, drag, thrust, esf);
        let pairs = map_slots(self.len(), |i| {
            let ac = self.coefficients().row(i);
            let (m, d_t) = (state.mass_kg[i], state.d_t[i]);
            let t = Atmosphere::at(ft_to_m(state.alt_ft[i]), d_t).temperature;
            let v_tas = kts_to_mps(state.tas_kts[i]);
            let c_pow_red =
                ac.reduced_climb_power(self.gpf(), m, state.alt_ft[i], state.max_alt_ft[i]);
            let rocd = tem_rocd(t, d_t, m, drag[i], esf[i], thrust[i], v_tas, c_pow_red);
            let accel = match state.speed_mode[i] {
                SpeedMode::Accelerate | SpeedMode::Decelerate => {
                    tem_accel(t, d_t, m, drag[i], rocd, thrust[i], v_tas)
                }
                SpeedMode::ConstantCas | SpeedMode::ConstantMach => 0.0,
            };
            (mps_to_fpm(rocd), mps2_to_kts_per_s(accel))
        });
        Ok((pairs.mapv(|(rocd, _)| rocd), pairs.mapv(|(_, accel)| accel)))
    }

    fn fuel_burn(
        &self,
        state: &FlightState,
        thrust: &Array1<f64>,
    ) -> anyhow::Result<Array1<f64>> {
        state.check(self.len())?;
        ensure_same_len!(state.mass_kg, thrust);
        Ok(map_slots(self.len(), |i| {
            self.coefficients().row(i).fuel_burn(
                state.flight_phase[i],
                state.tas_kts[i],
                thrust[i],
                state.alt_ft[i],
            )
        }))
    }

    fn minimum_speed(
        &self,
        configuration: &Array1<Configuration>,
    ) -> anyhow::Result<Array1<f64>> {
        ensure_same_len!(self.ids(), configuration);
        Ok(map_slots(self.len(), |i| {
            self.coefficients()
                .row(i)
                .minimum_speed(self.gpf(), configuration[i])
        }))
    }

    fn maximum_speed(&self) -> (Array1<f64>, Array1<f64>) {
        (
            self.coefficients().v_mo.clone(),
            self.coefficients().m_mo.clone(),
        )
    }

    fn maximum_altitude(
        &self,
        d_t: &Array1<f64>,
        mass_kg: &Array1<f64>,
    ) -> anyhow::Result<Array1<f64>> {
        ensure_same_len!(self.ids(), d_t, mass_kg);
        Ok(map_slots(self.len(), |i| {
            self.coefficients().row(i).maximum_altitude(d_t[i], mass_kg[i])
        }))
    }
}

impl BadaPerformance {
    /// Runs one tick over the whole fleet: configuration, drag, thrust,
    /// energy share, vertical speed and acceleration, then fuel burn.  Drag,
    /// thrust and energy share factor are kept as the fleet's derived
    /// outputs until the next tick.
    pub fn step(&mut self, state: &FlightState) -> anyhow::Result<TickOutputs> {
        state.check(self.len())?;
        let mut state = state.clone();
        state.configuration = self.configuration(&state)?;
        let drag = self.drag(&state)?;
        let thrust = self.thrust(&state, &drag)?;
        let esf = self.energy_share_factor(&state)?;
        let (rocd_fpm, accel_kts_per_s) =
            self.vertical_speed_and_accel(&state, &drag, &thrust, &esf)?;
        let fuel_burn_kg_per_s = self.fuel_burn(&state, &thrust)?;

        self.drag = drag.clone();
        self.thrust = thrust.clone();
        self.esf = esf.clone();

        Ok(TickOutputs {
            configuration: state.configuration,
            drag,
            thrust,
            esf,
            rocd_fpm,
            accel_kts_per_s,
            fuel_burn_kg_per_s,
        })
    }
}
