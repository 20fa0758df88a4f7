use super::params::{Cutoffs, IonIonParams, SpeciesParams, WaterIonParams, WaterWaterParams};
use crate::core::frame::FrameWeights;
use phf::{Map, phf_map};

/// Lone-pair weights shared by MB-pol and every MB-nrg water-ion fit.
pub const WATER_FRAME: FrameWeights =
    FrameWeights::new(-9.721486914088159e-02, 9.859272078406150e-02);

#[rustfmt::skip]
pub const H2O_H2O: WaterWaterParams = WaterWaterParams {
    k_hh_intra: -6.480884773303821e-01,
    k_oh_intra:  1.674518993682975e+00,
    k_hh_coul:   1.148231864355956e+00,
    k_oh_coul:   1.205989761123099e+00,
    k_oo_coul:   1.395357065790959e+00,
    k_xh_main:   7.347036852042255e-01,
    k_xo_main:   7.998249864422826e-01,
    k_xx_main:   7.960663960630585e-01,
    d0_intra: 1.0,
    d0_inter: 4.0,
    frame: WATER_FRAME,
    cutoffs: Cutoffs::new(4.5, 6.5),
};

#[allow(clippy::too_many_arguments)]
const fn water_ion(
    k_hh_intra: f64,
    k_oh_intra: f64,
    k_ion_h: f64,
    k_ion_o: f64,
    k_ion_lone_pair: f64,
    d_hh_intra: f64,
    d_oh_intra: f64,
    d_ion_h: f64,
    d_ion_o: f64,
    d_ion_lone_pair: f64,
    cutoffs: Cutoffs,
) -> WaterIonParams {
    WaterIonParams {
        k_hh_intra,
        k_oh_intra,
        k_ion_h,
        k_ion_o,
        k_ion_lone_pair,
        d_hh_intra,
        d_oh_intra,
        d_ion_h,
        d_ion_o,
        d_ion_lone_pair,
        frame: WATER_FRAME,
        cutoffs,
    }
}

const ION_ION_CUTOFFS: Cutoffs = Cutoffs::new(7.0, 8.0);

// Argument order: k_hh_intra, k_oh_intra, k_ion_h, k_ion_o, k_ion_lone_pair,
// then the matching reference distances, then the switching band.
#[rustfmt::skip]
pub const H2O_F_POL0: WaterIonParams = water_ion(
    1.198289240265508e-01, 2.270606085681964e-01, 8.653779284320098e-01, 8.629435215971726e-01, 1.045757220762339e+00,
    6.497863079017504e-01, 9.018131053340623e-01, 6.335566001322430e+00, 6.871501255485637e+00, 5.300969484503110e+00,
    Cutoffs::new(5.0, 6.0),
);
#[rustfmt::skip]
pub const H2O_F_POL50: WaterIonParams = water_ion(
    1.616400335828359e-01, 3.090618526198022e-01, 8.516313154660000e-01, 8.677252408732146e-01, 1.001095638344430e+00,
    1.717640275353714e-01, 4.741238016488328e-01, 6.326959804886554e+00, 6.998093445441315e+00, 5.108064890685443e+00,
    Cutoffs::new(5.0, 6.0),
);
#[rustfmt::skip]
pub const H2O_BR_POL0: WaterIonParams = water_ion(
    2.951167833464670e-01, 3.331141943760614e-01, 5.661597529227129e-01, 8.076624979285920e-01, 1.009430529406921e+00,
    1.153140899745128e+00, 1.427296477192937e+00, 4.309935170051643e+00, 6.984688951176864e+00, 5.515897876336050e+00,
    Cutoffs::new(5.5, 6.5),
);
#[rustfmt::skip]
pub const H2O_BR_POL50: WaterIonParams = water_ion(
    2.239996679390635e-01, 2.511419062764456e-01, 6.308687525749147e-01, 7.494714869650595e-01, 1.050726845257100e+00,
    2.046944768703250e-01, 1.257544612711722e+00, 6.995812922320198e+00, 6.999901335477379e+00, 4.793936418157202e+00,
    Cutoffs::new(5.5, 6.5),
);
#[rustfmt::skip]
pub const H2O_BR_POL100: WaterIonParams = water_ion(
    1.975327500640361e-01, 2.617953180072867e-01, 4.677981536517541e-01, 8.328591854489560e-01, 7.425459819690536e-01,
    7.395636139500104e-01, 1.999982215501664e+00, 5.786908831939904e+00, 6.999937722802333e+00, 6.999670438271242e+00,
    Cutoffs::new(5.5, 6.5),
);
#[rustfmt::skip]
pub const H2O_CS_POL0: WaterIonParams = water_ion(
    4.028053520238458e-01, 4.509806860358335e-01, 4.864870134382200e-01, 6.288413402784591e-01, 8.069975251987423e-01,
    1.999837886240069e+00, 1.162051362716558e+00, 6.309550239856037e+00, 6.999999948206465e+00, 3.971458511009841e+00,
    Cutoffs::new(6.0, 7.0),
);
#[rustfmt::skip]
pub const H2O_I_POL75: WaterIonParams = water_ion(
    1.287860253987811e-01, 2.521312733790787e-01, 3.950180440069139e-01, 1.163343409452539e+00, 7.102580751813152e-01,
    1.793655232739329e+00, 5.676853531148358e-01, 6.865462207536646e+00, 6.998510996519467e+00, 6.539602724733552e+00,
    Cutoffs::new(6.0, 7.0),
);
#[rustfmt::skip]
pub const H2O_NA_POL0: WaterIonParams = water_ion(
    4.486597767562190e-01, 1.999999985087912e+00, 1.137553081822990e-01, 6.464154361224240e-01, 8.519110931821103e-01,
    9.527622551741199e-01, 1.999985130842382e+00, 6.718134294113021e+00, 6.880638895624118e+00, 3.165068379361477e+00,
    Cutoffs::new(5.5, 6.5),
);
#[rustfmt::skip]
pub const H2O_RB_POL100: WaterIonParams = water_ion(
    3.195475762417059e-01, 6.446164826239851e-01, 5.104027836124081e-01, 1.273907587244391e+00, 7.482531727951891e-01,
    1.431386688762102e+00, 1.999530480711730e+00, 4.312600876869783e+00, 4.872074227770685e+00, 3.821777646259915e+00,
    Cutoffs::new(6.0, 7.0),
);

pub const LI_LI: IonIonParams = IonIonParams {
    decay: 5.212691985268002e-01,
    reference: 5.567958391183113e+00,
    cutoffs: ION_ION_CUTOFFS,
};
pub const CS_CS: IonIonParams = IonIonParams {
    decay: 2.734137883307410e-01,
    reference: 6.999998946225389e+00,
    cutoffs: ION_ION_CUTOFFS,
};
pub const K_BR: IonIonParams = IonIonParams {
    decay: 3.781623438780963e-01,
    reference: 6.999967921758660e+00,
    cutoffs: ION_ION_CUTOFFS,
};

#[rustfmt::skip]
static PRESETS: Map<&'static str, SpeciesParams> = phf_map! {
    "h2o-h2o"       => SpeciesParams::WaterWater(H2O_H2O),
    "h2o-f-pol0"    => SpeciesParams::WaterIon(H2O_F_POL0),
    "h2o-f-pol50"   => SpeciesParams::WaterIon(H2O_F_POL50),
    "h2o-br-pol0"   => SpeciesParams::WaterIon(H2O_BR_POL0),
    "h2o-br-pol50"  => SpeciesParams::WaterIon(H2O_BR_POL50),
    "h2o-br-pol100" => SpeciesParams::WaterIon(H2O_BR_POL100),
    "h2o-cs-pol0"   => SpeciesParams::WaterIon(H2O_CS_POL0),
    "h2o-i-pol75"   => SpeciesParams::WaterIon(H2O_I_POL75),
    "h2o-na-pol0"   => SpeciesParams::WaterIon(H2O_NA_POL0),
    "h2o-rb-pol100" => SpeciesParams::WaterIon(H2O_RB_POL100),
    "li-li"         => SpeciesParams::IonIon(LI_LI),
    "cs-cs"         => SpeciesParams::IonIon(CS_CS),
    "k-br"          => SpeciesParams::IonIon(K_BR),
};

/// Calibrated parameters of a published fit, by name (e.g. `"h2o-na-pol0"`).
pub fn get(name: &str) -> Option<&'static SpeciesParams> {
    PRESETS.get(name)
}

/// All preset names in alphabetical order.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = PRESETS.keys().copied().collect();
    names.sort_unstable();
    names
}
