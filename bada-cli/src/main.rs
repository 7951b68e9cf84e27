use clap::Parser;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

extern crate bada_core;
use bada_core::atmosphere::Atmosphere;
use bada_core::performance::FlightCondition;
use bada_core::prelude::*;
use bada_core::utils::{ft_to_m, kts_to_mps, mps_to_kts};

/// Evaluates the BADA performance model for one aircraft at one flight
/// condition.
/// After running `cargo build --release`, run with
/// ```bash
/// ./target/release/bada-cli --icao A320 --alt-ft 35000 --tas-kts 460 --mass-kg 62000
/// ```
/// Coefficients come from the bundled resources unless `--coefficient-dir`
/// points at a directory holding `synonyms.csv` and one yaml file per type.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct BadaApi {
    #[clap(long, value_parser)]
    /// ICAO type designator, e.g. A320
    icao: String,
    #[clap(long, value_parser, default_value_t = 2)]
    /// Mass class selecting the procedure speeds: 1 low, 2 average, 3 high
    mass_class: u8,
    #[clap(long, value_parser)]
    /// Aircraft mass [kg], defaults to the reference mass of the type
    mass_kg: Option<f64>,
    #[clap(long, value_parser)]
    /// Pressure altitude [ft]
    alt_ft: f64,
    #[clap(long, value_parser)]
    /// True airspeed [kt]
    tas_kts: f64,
    #[clap(long, value_parser, default_value_t = 0.0)]
    /// Temperature deviation from ISA [K]
    d_t: f64,
    #[clap(long, value_parser = parse_variant::<VerticalMode>, default_value = "Level")]
    /// Climb, Level or Descent
    vertical_mode: VerticalMode,
    #[clap(long, value_parser = parse_variant::<SpeedMode>, default_value = "ConstantMach")]
    /// ConstantCas, ConstantMach, Accelerate or Decelerate
    speed_mode: SpeedMode,
    #[clap(long, value_parser = parse_variant::<FlightPhase>, default_value = "Cruise")]
    /// Flight phase used for fuel burn, e.g. Climb, Cruise, Descent, Approach
    flight_phase: FlightPhase,
    #[clap(long, value_parser)]
    /// Directory with the coefficient files
    coefficient_dir: Option<String>,
    #[clap(long, value_parser, default_value = "json")]
    /// How to return results: `json` or `yaml`
    res_fmt: String,
}

/// Parses an enum variant by name
fn parse_variant<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_yaml::from_str(s).map_err(|err| format!("`{s}` is not a valid value: {err}"))
}

#[derive(Debug, Deserialize, Serialize)]
struct PerformanceReport {
    icao: String,
    configuration: Configuration,
    /// Drag [N]
    drag: f64,
    /// Thrust [N]
    thrust: f64,
    esf: f64,
    rocd_fpm: f64,
    accel_kts_per_s: f64,
    fuel_burn_kg_per_s: f64,
    /// Speed of the schedule for the flight phase [kt CAS or Mach]
    procedure_speed: f64,
    transition_alt_ft: f64,
    max_alt_ft: f64,
    min_speed_kts: f64,
    max_speed_kts: f64,
    max_mach: f64,
}

impl SerdeAPI for PerformanceReport {}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = BadaApi::parse();
    let mut fleet = match &api.coefficient_dir {
        Some(dir) => BadaPerformance::new(DirectorySource::new(dir)?)?,
        None => BadaPerformance::from_resources()?,
    };
    let slot = fleet.add_aircraft(&api.icao, MassClass::try_from(api.mass_class)?)?;

    let ac = fleet.coefficients().row(slot);
    let mass_kg = api.mass_kg.unwrap_or(ac.m_ref * 1e3);
    let d_t = ndarray::arr1(&[api.d_t]);
    fleet.init_procedure_speed(mass_kg, slot)?;
    let max_alt_ft = fleet.maximum_altitude(&d_t, &ndarray::arr1(&[mass_kg]))?[0];

    let atm = Atmosphere::at(ft_to_m(api.alt_ft), api.d_t);
    let v_tas = kts_to_mps(api.tas_kts);
    let cond = FlightCondition {
        mass_kg,
        alt_ft: api.alt_ft,
        cas_kts: mps_to_kts(atm.tas_to_cas(v_tas)),
        tas_kts: api.tas_kts,
        mach: atm.tas_to_mach(v_tas),
        vertical_mode: api.vertical_mode,
        speed_mode: api.speed_mode,
        bank_angle_deg: 0.0,
        d_t: api.d_t,
        configuration: Configuration::Clean,
        flight_phase: api.flight_phase,
        expedite_descent: false,
        max_alt_ft,
    };
    let out = fleet.step(&FlightState::from_conditions(&[cond])?)?;

    let transition_alt_ft = fleet.transition_altitude(&d_t)?[0];
    let procedure_speed = fleet.get_procedure_speed(
        &ndarray::arr1(&[api.alt_ft]),
        &ndarray::arr1(&[transition_alt_ft]),
        &ndarray::arr1(&[api.flight_phase]),
    )?[0];
    let (v_mo, m_mo) = fleet.maximum_speed();
    let report = PerformanceReport {
        icao: api.icao.clone(),
        configuration: out.configuration[0],
        drag: out.drag[0],
        thrust: out.thrust[0],
        esf: out.esf[0],
        rocd_fpm: out.rocd_fpm[0],
        accel_kts_per_s: out.accel_kts_per_s[0],
        fuel_burn_kg_per_s: out.fuel_burn_kg_per_s[0],
        procedure_speed,
        transition_alt_ft,
        max_alt_ft,
        min_speed_kts: fleet.minimum_speed(&out.configuration)?[0],
        max_speed_kts: v_mo[0],
        max_mach: m_mo[0],
    };

    report.to_writer(std::io::stdout().lock(), &api.res_fmt)?;
    println!();
    Ok(())
}
