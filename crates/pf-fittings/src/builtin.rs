//! Built-in coefficient table.

use pf_core::Reference;

use crate::catalog::FittingEntry;
use crate::method::LossMethod;

const CRANE: &str = "Crane Co., Flow of Fluids Through Valves, Fittings, and Pipe, Technical Paper No. 410";
const DARBY: &str = "Darby, R., Correlate pressure drops through fittings, Chemical Engineering 106(7), 1999";
const HI: &str = "Hydraulic Institute, Engineering Data Book, 2nd ed.";

fn crane_k_table() -> Reference {
    Reference::new(CRANE).with_page("A-29")
}

fn crane_entrance_exit() -> Reference {
    Reference::new(CRANE).with_page("A-30")
}

fn darby_table() -> Reference {
    Reference::new(DARBY).with_page("101").with_equation("Table 1")
}

fn l_over_d(id: &str, description: &str, l_over_d: f64) -> FittingEntry {
    FittingEntry {
        id: id.into(),
        description: description.into(),
        method: LossMethod::EquivalentLength { l_over_d },
        reference: crane_k_table(),
    }
}

fn three_k(id: &str, description: &str, k1: f64, k_inf: f64, k_d: f64) -> FittingEntry {
    FittingEntry {
        id: id.into(),
        description: description.into(),
        method: LossMethod::ThreeK { k1, k_inf, k_d },
        reference: darby_table(),
    }
}

fn entrance_exit(id: &str, description: &str, k: f64) -> FittingEntry {
    FittingEntry {
        id: id.into(),
        description: description.into(),
        method: LossMethod::EntranceExit { k },
        reference: crane_entrance_exit(),
    }
}

fn tabulated(id: &str, description: &str, k: f64) -> FittingEntry {
    FittingEntry {
        id: id.into(),
        description: description.into(),
        method: LossMethod::TabulatedK { k },
        reference: Reference::new(HI),
    }
}

pub(crate) fn entries() -> Vec<FittingEntry> {
    vec![
        // Crane equivalent lengths (K = f_T · L/D)
        l_over_d("elbow_90_standard", "90° standard elbow", 30.0),
        l_over_d("elbow_90_long_radius", "90° long-radius elbow, r/d = 1.5", 14.0),
        l_over_d("elbow_45_standard", "45° standard elbow", 16.0),
        l_over_d("bend_180_close_return", "180° close return bend", 50.0),
        l_over_d("tee_through_run", "Standard tee, flow through run", 20.0),
        l_over_d("tee_through_branch", "Standard tee, flow through branch", 60.0),
        l_over_d("gate_valve", "Gate valve, fully open", 8.0),
        l_over_d("globe_valve", "Globe valve, fully open", 340.0),
        l_over_d("angle_valve", "Angle valve, fully open", 150.0),
        l_over_d("ball_valve", "Ball valve, full port", 3.0),
        l_over_d("butterfly_valve", "Butterfly valve, 2 to 8 in", 45.0),
        l_over_d("swing_check_valve", "Swing check valve", 100.0),
        // Darby 3-K
        three_k("elbow_90_standard_threaded_3k", "90° standard elbow, threaded", 800.0, 0.14, 4.0),
        three_k("elbow_90_standard_flanged_3k", "90° standard elbow, flanged/welded", 800.0, 0.091, 4.0),
        three_k("elbow_90_long_radius_3k", "90° long-radius elbow, r/d = 1.5", 800.0, 0.071, 4.2),
        three_k("elbow_45_standard_3k", "45° standard elbow", 500.0, 0.071, 4.2),
        three_k("tee_through_run_3k", "Tee, flow through run, threaded", 200.0, 0.091, 4.0),
        three_k("tee_through_branch_3k", "Tee, flow through branch, threaded", 500.0, 0.274, 4.0),
        three_k("gate_valve_3k", "Gate valve, full line size", 300.0, 0.037, 3.9),
        three_k("globe_valve_3k", "Globe valve, standard", 1500.0, 1.7, 3.6),
        three_k("ball_valve_3k", "Ball valve, full line size", 300.0, 0.017, 4.0),
        // Entrances and exits
        entrance_exit("entrance_sharp", "Pipe entrance, flush sharp-edged", 0.5),
        entrance_exit("entrance_projecting", "Pipe entrance, inward projecting", 0.78),
        entrance_exit("entrance_rounded", "Pipe entrance, rounded r/d >= 0.15", 0.04),
        entrance_exit("exit", "Pipe exit into a reservoir", 1.0),
        // Tabulated K
        tabulated("y_strainer", "Y-strainer, clean screen", 2.5),
        tabulated("foot_valve_with_strainer", "Foot valve with strainer, poppet disc", 12.0),
    ]
}
