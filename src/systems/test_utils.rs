use ndarray::array;

use crate::{Structure, UnitCell};

pub fn test_structure(name: &str) -> Structure {
    match name {
        "CsCl" => get_cscl(),
        "xenon" => get_xenon(),
        "triclinic-ZnS" => get_triclinic_zns(),
        _ => panic!("unknown test structure {}", name)
    }
}

/// CsCl structure: a cubic cell with Cs at the origin and Cl at the center
fn get_cscl() -> Structure {
    let species = vec!["Cs".to_string(), "Cl".to_string()];
    let positions = array![
        [0.0, 0.0, 0.0],
        [0.5, 0.5, 0.5],
    ];
    return Structure::new(species, UnitCell::cubic(4.0), positions).expect("bad CsCl structure");
}

/// A single xenon atom close to the far face of a large cubic cell, so that
/// the atom is far from the origin but one of its periodic images is close
fn get_xenon() -> Structure {
    let species = vec!["Xe".to_string()];
    let positions = array![[0.9, 0.0, 0.0]];
    return Structure::new(species, UnitCell::cubic(10.0), positions).expect("bad xenon structure");
}

/// Two atoms in a fully triclinic cell
fn get_triclinic_zns() -> Structure {
    let cell = UnitCell::triclinic(5.0, 6.0, 3.6, 90.0, 53.0, 77.0).expect("bad triclinic cell");
    let species = vec!["Zn".to_string(), "S".to_string()];
    let positions = array![
        [0.1, 0.2, 0.3],
        [0.7, 0.8, 0.9],
    ];
    return Structure::new(species, cell, positions).expect("bad ZnS structure");
}
