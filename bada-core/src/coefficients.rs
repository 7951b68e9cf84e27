//! Module containing the per-aircraft BADA coefficient record and the
//! struct-of-arrays table that holds one record per fleet slot.

use crate::enums::*;
use crate::imports::*;
use validator::Validate;

columnar_record! {
    /// BADA operations performance coefficients of one aircraft type.
    /// Masses are in tonnes, speeds in kt CAS and altitudes in ft, as in the
    /// reference tables.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default, Validate)]
    pub struct AircraftCoefficients in CoefficientTable {
        /// Number of engines
        #[validate(range(min = 1))]
        pub n_eng: u32,
        pub engine_type: EngineType,
        pub wake_category: WakeCategory,
        /// Reference mass [t]
        #[validate(range(min = 0))]
        pub m_ref: f64,
        /// Minimum mass [t]
        #[validate(range(min = 0))]
        pub m_min: f64,
        /// Maximum mass [t]
        #[validate(range(min = 0))]
        pub m_max: f64,
        /// Maximum payload mass [t]
        #[validate(range(min = 0))]
        pub m_pyld: f64,
        /// Maximum operating speed [kt CAS]
        #[validate(range(min = 0))]
        pub v_mo: f64,
        /// Maximum operating Mach number [-]
        #[validate(range(min = 0))]
        pub m_mo: f64,
        /// Maximum operating altitude [ft]
        #[validate(range(min = 0))]
        pub h_mo: f64,
        /// Maximum altitude at MTOW and ISA, 0 when only `h_mo` applies [ft]
        #[validate(range(min = 0))]
        pub h_max: f64,
        /// Weight gradient on maximum altitude [ft/kg]
        pub g_w: f64,
        /// Temperature gradient on maximum altitude [ft/K]
        pub g_t: f64,
        /// Reference wing surface area [m^2]
        #[validate(range(min = 0))]
        pub wing_area_m2: f64,
        /// Parasitic drag coefficient, cruise [-]
        #[validate(range(min = 0))]
        pub c_d0_cr: f64,
        /// Induced drag coefficient, cruise [-]
        #[validate(range(min = 0))]
        pub c_d2_cr: f64,
        /// Parasitic drag coefficient, approach [-]
        #[validate(range(min = 0))]
        pub c_d0_ap: f64,
        /// Induced drag coefficient, approach, 0 when not available [-]
        #[validate(range(min = 0))]
        pub c_d2_ap: f64,
        /// Parasitic drag coefficient, landing [-]
        #[validate(range(min = 0))]
        pub c_d0_ld: f64,
        /// Induced drag coefficient, landing, 0 when not available [-]
        #[validate(range(min = 0))]
        pub c_d2_ld: f64,
        /// Parasitic drag coefficient of the landing gear [-]
        #[validate(range(min = 0))]
        pub c_d0_ldg: f64,
        /// Reference stall speed, take-off [kt CAS]
        #[validate(range(min = 0))]
        pub v_stall_to: f64,
        /// Reference stall speed, initial climb [kt CAS]
        #[validate(range(min = 0))]
        pub v_stall_ic: f64,
        /// Reference stall speed, cruise [kt CAS]
        #[validate(range(min = 0))]
        pub v_stall_cr: f64,
        /// Reference stall speed, approach [kt CAS]
        #[validate(range(min = 0))]
        pub v_stall_ap: f64,
        /// Reference stall speed, landing [kt CAS]
        #[validate(range(min = 0))]
        pub v_stall_ld: f64,
        /// Buffet onset lift coefficient at M = 0, jets only [-]
        pub c_lbo: f64,
        /// Buffet onset lift gradient, jets only [-]
        pub k: f64,
        /// 1st maximum climb thrust coefficient [N, kt*N for turboprops]
        pub c_tc_1: f64,
        /// 2nd maximum climb thrust coefficient [ft]
        pub c_tc_2: f64,
        /// 3rd maximum climb thrust coefficient [1/ft^2, N for turboprops, kt*N for pistons]
        pub c_tc_3: f64,
        /// 1st thrust temperature coefficient [K]
        pub c_tc_4: f64,
        /// 2nd thrust temperature coefficient [1/K]
        pub c_tc_5: f64,
        /// Low altitude descent thrust coefficient [-]
        pub c_tdes_low: f64,
        /// High altitude descent thrust coefficient [-]
        pub c_tdes_high: f64,
        /// Transition altitude for descent thrust [ft]
        pub h_p_des: f64,
        /// Approach thrust coefficient [-]
        pub c_tdes_app: f64,
        /// Landing thrust coefficient [-]
        pub c_tdes_ld: f64,
        /// Reference descent speed [kt CAS]
        pub v_des_ref: f64,
        /// Reference descent Mach number [-]
        pub m_des_ref: f64,
        /// 1st thrust specific fuel consumption coefficient [kg/(min*kN), kg/min for pistons]
        #[validate(range(min = 0))]
        pub c_f1: f64,
        /// 2nd thrust specific fuel consumption coefficient [kt]
        #[validate(range(min = 0))]
        pub c_f2: f64,
        /// 1st descent fuel flow coefficient [kg/min]
        #[validate(range(min = 0))]
        pub c_f3: f64,
        /// 2nd descent fuel flow coefficient [ft]
        #[validate(range(min = 0))]
        pub c_f4: f64,
        /// Cruise fuel flow correction coefficient [-]
        #[validate(range(min = 0))]
        pub c_fcr: f64,
        /// Take-off length [m]
        #[validate(range(min = 0))]
        pub tol_m: f64,
        /// Landing length [m]
        #[validate(range(min = 0))]
        pub ldl_m: f64,
        /// Wingspan [m]
        #[validate(range(min = 0))]
        pub span_m: f64,
        /// Fuselage length [m]
        #[validate(range(min = 0))]
        pub length_m: f64,
    }
}

columnar_record! {
    /// Airline procedure speeds of one mass class
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default, Validate)]
    pub struct ProcedureSpeeds in ProcedureSpeedTable {
        /// Standard climb CAS below 10,000 ft [kt]
        #[validate(range(min = 0))]
        pub v_cl_1: f64,
        /// Standard climb CAS above 10,000 ft [kt]
        #[validate(range(min = 0))]
        pub v_cl_2: f64,
        /// Standard climb Mach number [-]
        #[validate(range(min = 0, max = 1))]
        pub m_cl: f64,
        /// Standard cruise CAS below 10,000 ft [kt]
        #[validate(range(min = 0))]
        pub v_cr_1: f64,
        /// Standard cruise CAS above 10,000 ft [kt]
        #[validate(range(min = 0))]
        pub v_cr_2: f64,
        /// Standard cruise Mach number [-]
        #[validate(range(min = 0, max = 1))]
        pub m_cr: f64,
        /// Standard descent CAS below 10,000 ft [kt]
        #[validate(range(min = 0))]
        pub v_des_1: f64,
        /// Standard descent CAS above 10,000 ft [kt]
        #[validate(range(min = 0))]
        pub v_des_2: f64,
        /// Standard descent Mach number [-]
        #[validate(range(min = 0, max = 1))]
        pub m_des: f64,
    }
}

impl AircraftCoefficients {
    /// Checks field ranges and the relations between fields that ranges cannot express
    pub fn check(&self) -> anyhow::Result<()> {
        if let Err(e) = self.validate() {
            bail!(e)
        }
        ensure!(
            self.m_min <= self.m_ref && self.m_ref <= self.m_max,
            "{}\nreference mass must lie between minimum and maximum mass",
            format_dbg!((self.m_min, self.m_ref, self.m_max))
        );
        ensure!(
            self.m_max > self.m_min,
            "{}\nmaximum mass must exceed minimum mass",
            format_dbg!((self.m_min, self.m_max))
        );
        ensure!(
            self.wing_area_m2 > 0.0,
            "{}\nwing area must be positive",
            format_dbg!(self.wing_area_m2)
        );
        Ok(())
    }

    /// Operations performance coefficients shaped after an A320
    pub fn mock_jet() -> Self {
        Self {
            n_eng: 2,
            engine_type: EngineType::Jet,
            wake_category: WakeCategory::Medium,
            m_ref: 64.0,
            m_min: 39.0,
            m_max: 77.0,
            m_pyld: 21.5,
            v_mo: 350.0,
            m_mo: 0.82,
            h_mo: 41_000.0,
            h_max: 39_800.0,
            g_w: 0.25,
            g_t: -40.0,
            wing_area_m2: 122.6,
            c_d0_cr: 0.024,
            c_d2_cr: 0.0375,
            c_d0_ap: 0.0242,
            c_d2_ap: 0.0469,
            c_d0_ld: 0.0456,
            c_d2_ld: 0.0445,
            c_d0_ldg: 0.0,
            v_stall_to: 114.0,
            v_stall_ic: 120.0,
            v_stall_cr: 143.0,
            v_stall_ap: 111.0,
            v_stall_ld: 106.0,
            c_lbo: 1.35,
            k: 0.45,
            c_tc_1: 140_000.0,
            c_tc_2: 50_000.0,
            c_tc_3: 1.03e-10,
            c_tc_4: 10.6,
            c_tc_5: 0.008,
            c_tdes_low: 0.04,
            c_tdes_high: 0.06,
            h_p_des: 20_000.0,
            c_tdes_app: 0.12,
            c_tdes_ld: 0.2,
            v_des_ref: 310.0,
            m_des_ref: 0.78,
            c_f1: 0.7,
            c_f2: 1_000.0,
            c_f3: 12.0,
            c_f4: 70_000.0,
            c_fcr: 0.95,
            tol_m: 2_190.0,
            ldl_m: 1_440.0,
            span_m: 34.1,
            length_m: 37.57,
        }
    }

    /// Operations performance coefficients shaped after an ATR 72, without
    /// non-clean drag data
    pub fn mock_turboprop() -> Self {
        Self {
            n_eng: 2,
            engine_type: EngineType::Turboprop,
            wake_category: WakeCategory::Medium,
            m_ref: 20.0,
            m_min: 13.0,
            m_max: 22.8,
            m_pyld: 7.5,
            v_mo: 250.0,
            m_mo: 0.55,
            h_mo: 25_000.0,
            h_max: 25_000.0,
            g_w: 0.5,
            g_t: -50.0,
            wing_area_m2: 61.0,
            c_d0_cr: 0.0256,
            c_d2_cr: 0.0401,
            c_d0_ap: 0.0,
            c_d2_ap: 0.0,
            c_d0_ld: 0.0,
            c_d2_ld: 0.0,
            c_d0_ldg: 0.0,
            v_stall_to: 94.0,
            v_stall_ic: 98.0,
            v_stall_cr: 111.0,
            v_stall_ap: 92.0,
            v_stall_ld: 87.0,
            c_lbo: 1.4,
            k: 0.4,
            c_tc_1: 6.0e6,
            c_tc_2: 40_000.0,
            c_tc_3: 2_000.0,
            c_tc_4: 10.0,
            c_tc_5: 0.0,
            c_tdes_low: 0.05,
            c_tdes_high: 0.08,
            h_p_des: 10_000.0,
            c_tdes_app: 0.1,
            c_tdes_ld: 0.15,
            v_des_ref: 230.0,
            m_des_ref: 0.45,
            c_f1: 2.0,
            c_f2: 1_500.0,
            c_f3: 5.0,
            c_f4: 100_000.0,
            c_fcr: 1.0,
            tol_m: 1_400.0,
            ldl_m: 1_070.0,
            span_m: 27.05,
            length_m: 27.17,
        }
    }

    /// Operations performance coefficients shaped after a light single engine piston
    pub fn mock_piston() -> Self {
        Self {
            n_eng: 1,
            engine_type: EngineType::Piston,
            wake_category: WakeCategory::Light,
            m_ref: 1.0,
            m_min: 0.7,
            m_max: 1.1,
            m_pyld: 0.3,
            v_mo: 160.0,
            m_mo: 0.24,
            h_mo: 14_000.0,
            h_max: 0.0,
            g_w: 0.0,
            g_t: 0.0,
            wing_area_m2: 16.2,
            c_d0_cr: 0.025,
            c_d2_cr: 0.05,
            c_d0_ap: 0.0,
            c_d2_ap: 0.0,
            c_d0_ld: 0.0,
            c_d2_ld: 0.0,
            c_d0_ldg: 0.0,
            v_stall_to: 48.0,
            v_stall_ic: 50.0,
            v_stall_cr: 55.0,
            v_stall_ap: 47.0,
            v_stall_ld: 45.0,
            c_lbo: 0.0,
            k: 0.0,
            c_tc_1: 3_000.0,
            c_tc_2: 20_000.0,
            c_tc_3: 50_000.0,
            c_tc_4: 10.0,
            c_tc_5: 0.0,
            c_tdes_low: 0.05,
            c_tdes_high: 0.05,
            h_p_des: 5_000.0,
            c_tdes_app: 0.1,
            c_tdes_ld: 0.1,
            v_des_ref: 100.0,
            m_des_ref: 0.2,
            c_f1: 0.6,
            c_f2: 0.0,
            c_f3: 0.4,
            c_f4: 0.0,
            c_fcr: 0.9,
            tol_m: 500.0,
            ldl_m: 400.0,
            span_m: 10.7,
            length_m: 7.3,
        }
    }
}

impl ProcedureSpeeds {
    pub fn check(&self) -> anyhow::Result<()> {
        if let Err(e) = self.validate() {
            bail!(e)
        }
        Ok(())
    }

    pub fn mock_jet() -> Self {
        Self {
            v_cl_1: 250.0,
            v_cl_2: 300.0,
            m_cl: 0.78,
            v_cr_1: 250.0,
            v_cr_2: 310.0,
            m_cr: 0.78,
            v_des_1: 250.0,
            v_des_2: 300.0,
            m_des: 0.78,
        }
    }

    pub fn mock_turboprop() -> Self {
        Self {
            v_cl_1: 170.0,
            v_cl_2: 180.0,
            m_cl: 0.45,
            v_cr_1: 180.0,
            v_cr_2: 230.0,
            m_cr: 0.45,
            v_des_1: 230.0,
            v_des_2: 230.0,
            m_des: 0.45,
        }
    }

    pub fn mock_piston() -> Self {
        Self {
            v_cl_1: 80.0,
            v_cl_2: 80.0,
            m_cl: 0.2,
            v_cr_1: 100.0,
            v_cr_2: 110.0,
            m_cr: 0.2,
            v_des_1: 100.0,
            v_des_2: 100.0,
            m_des: 0.2,
        }
    }
}

/// Everything known about one aircraft type: its coefficients and the
/// procedure speeds of the low, average and high mass classes.  This is what
/// a [CoefficientSource](crate::loader::CoefficientSource) resolves an ICAO
/// code to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AircraftType {
    /// ICAO aircraft type designator
    pub icao: String,
    pub coefficients: AircraftCoefficients,
    /// Procedure speeds indexed by [MassClass::index]
    pub procedure_speeds: [ProcedureSpeeds; 3],
}

impl SerdeAPI for AircraftType {
    fn init(&mut self) -> anyhow::Result<()> {
        self.icao = self.icao.trim().to_uppercase();
        self.coefficients
            .check()
            .with_context(|| format!("invalid coefficients for {}", self.icao))?;
        for speeds in self.procedure_speeds.iter() {
            speeds
                .check()
                .with_context(|| format!("invalid procedure speeds for {}", self.icao))?;
        }
        Ok(())
    }
}

impl AircraftType {
    pub fn procedure_speeds(&self, mass_class: MassClass) -> ProcedureSpeeds {
        self.procedure_speeds[mass_class.index()]
    }

    fn mock(icao: &str, coefficients: AircraftCoefficients, average: ProcedureSpeeds) -> Self {
        let low = ProcedureSpeeds {
            v_cl_1: average.v_cl_1 - 10.0,
            v_cr_1: average.v_cr_1 - 10.0,
            v_des_1: average.v_des_1 - 10.0,
            ..average
        };
        let high = ProcedureSpeeds {
            v_cl_2: average.v_cl_2 + 10.0,
            v_cr_2: average.v_cr_2 + 10.0,
            v_des_2: average.v_des_2 + 10.0,
            ..average
        };
        Self {
            icao: icao.into(),
            coefficients,
            procedure_speeds: [low, average, high],
        }
    }

    pub fn mock_jet() -> Self {
        Self::mock(
            "A320",
            AircraftCoefficients::mock_jet(),
            ProcedureSpeeds::mock_jet(),
        )
    }

    pub fn mock_turboprop() -> Self {
        Self::mock(
            "AT72",
            AircraftCoefficients::mock_turboprop(),
            ProcedureSpeeds::mock_turboprop(),
        )
    }

    pub fn mock_piston() -> Self {
        Self::mock(
            "P28A",
            AircraftCoefficients::mock_piston(),
            ProcedureSpeeds::mock_piston(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_that_mocks_are_valid() {
        for mut ac in [
            AircraftType::mock_jet(),
            AircraftType::mock_turboprop(),
            AircraftType::mock_piston(),
        ] {
            assert!(ac.init().is_ok(), "{}", ac.icao);
        }
    }

    #[test]
    fn test_input_validation() {
        let mut ac = AircraftType::mock_jet();
        ac.coefficients.wing_area_m2 = -1.0;
        ac.coefficients.n_eng = 0;
        ac.procedure_speeds[1].m_cl = 1.5;
        let err = ac.coefficients.check().unwrap_err();
        let validation_errs = err.downcast::<validator::ValidationErrors>().unwrap();
        let bad_fields = validation_errs.errors();
        assert!(bad_fields.contains_key("wing_area_m2"));
        assert!(bad_fields.contains_key("n_eng"));
        assert_eq!(bad_fields.len(), 2);
        assert!(ac.procedure_speeds[1].check().is_err());
        assert!(ac.init().is_err());
    }

    #[test]
    fn test_that_mass_ordering_is_checked() {
        let mut coeffs = AircraftCoefficients::mock_jet();
        coeffs.m_ref = 80.0;
        assert!(coeffs.check().is_err());
    }

    #[test]
    fn test_table_push_remove_keeps_columns_aligned() {
        let mut table = CoefficientTable::default();
        let jet = AircraftCoefficients::mock_jet();
        let prop = AircraftCoefficients::mock_turboprop();
        let piston = AircraftCoefficients::mock_piston();
        table.push(&jet).unwrap();
        table.push(&prop).unwrap();
        table.push(&piston).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.c_tc_1.len(), 3);
        assert_eq!(table.row(1), prop);

        table.remove(1).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.engine_type.len(), 2);
        assert_eq!(table.row(0), jet);
        assert_eq!(table.row(1), piston);
        assert!(table.get(2).is_none());

        let err = table.remove(5).unwrap_err();
        assert_eq!(
            err.downcast_ref::<crate::error::PerformanceError>(),
            Some(&crate::error::PerformanceError::SlotOutOfRange { slot: 5, len: 2 })
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_procedure_speeds_by_mass_class() {
        let ac = AircraftType::mock_jet();
        assert_eq!(ac.procedure_speeds(MassClass::Average), ProcedureSpeeds::mock_jet());
        assert!(ac.procedure_speeds(MassClass::Low).v_cl_1 < ac.procedure_speeds(MassClass::High).v_cl_1 + 1.0);
        assert_eq!(ac.procedure_speeds(MassClass::High).v_cl_2, 310.0);
    }

    #[test]
    fn test_aircraft_type_yaml_roundtrip() {
        let ac = AircraftType::mock_turboprop();
        let ac_de = AircraftType::from_yaml(ac.to_yaml().unwrap()).unwrap();
        assert_eq!(ac, ac_de);
    }
}
