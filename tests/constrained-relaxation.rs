//! End-to-end checks of the constraint pipeline: build a structure, expand
//! it into its periodic images, classify the atoms against a sphere, and
//! assemble the relaxation constraints.

use ndarray::array;

use cellgeom::{Structure, UnitCell};
use cellgeom::{PeriodicImages, TiledSupercell};
use cellgeom::{SphereParameters, SphereClassification, Constraints, ConstraintRecord};

fn centered_atom() -> Structure {
    // a single carbon atom at the center of a unit cube
    let species = vec!["C".to_string()];
    let positions = array![[0.5, 0.5, 0.5]];
    return Structure::new(species, UnitCell::cubic(1.0), positions).unwrap();
}

#[test]
fn atom_inside_sphere_stays_free() {
    let structure = centered_atom();
    let mut images = PeriodicImages::new(&structure);

    let parameters = SphereParameters { center: [0.5, 0.5, 0.5], radius: 0.1 };
    let classification = SphereClassification::compute(&mut images, &parameters).unwrap();

    assert_eq!(classification.free(), [true]);
    assert_eq!(classification.fake_species(), ["C"]);

    let constraints = Constraints::new(&structure, &classification).unwrap();
    assert_eq!(constraints.records(), [ConstraintRecord {
        species: "C".into(),
        position: [0.5, 0.5, 0.5],
        mask: [1, 1, 1],
    }]);
    assert_eq!(constraints.masses()[0], 12.011);
}

#[test]
fn atom_outside_sphere_is_fixed() {
    let structure = centered_atom();
    let mut images = PeriodicImages::new(&structure);

    let parameters = SphereParameters { center: [0.5, 0.5, 0.5], radius: 0.0 };
    let classification = SphereClassification::compute(&mut images, &parameters).unwrap();

    assert_eq!(classification.free(), [false]);
    assert_eq!(classification.fake_species(), ["He"]);

    // every image mass was halved by the classification
    for &mass in images.flat_masses() {
        assert_eq!(mass, 12.011 / 2.0);
    }

    let constraints = Constraints::new(&structure, &classification).unwrap();
    assert_eq!(constraints.records(), [ConstraintRecord {
        species: "C".into(),
        position: [0.5, 0.5, 0.5],
        mask: [0, 0, 0],
    }]);

    // the canonical mass is halved once more, independently of the images
    assert_eq!(constraints.masses()[0], 12.011 / 2.0);
    assert_eq!(structure.masses()[0], 12.011);
}

#[test]
fn defect_region_in_a_supercell() {
    // 4 silicon atoms along the diagonal of a cubic supercell, with the
    // sphere centered on the first one
    let species = vec!["Si".to_string(); 4];
    let positions = array![
        [0.0, 0.0, 0.0],
        [0.25, 0.25, 0.25],
        [0.5, 0.5, 0.5],
        [0.75, 0.75, 0.75],
    ];
    let structure = Structure::new(species, UnitCell::cubic(8.0), positions).unwrap();
    let mut images = PeriodicImages::new(&structure);

    let parameters = SphereParameters { center: [0.0, 0.0, 0.0], radius: 4.0 };
    let classification = SphereClassification::compute(&mut images, &parameters).unwrap();

    // the atom at (2, 2, 2) is inside, the one at (4, 4, 4) is outside, and
    // the one at (6, 6, 6) comes back inside through the image at
    // (-2, -2, -2)
    assert_eq!(classification.free(), [true, true, false, true]);
    assert_eq!(classification.num_free(), 3);
    assert_eq!(classification.fake_species(), ["Si", "Si", "He", "Si"]);

    let constraints = Constraints::new(&structure, &classification).unwrap();
    assert_eq!(constraints.force_mask(), array![
        [1, 1, 1],
        [1, 1, 1],
        [0, 0, 0],
        [1, 1, 1],
    ]);
    assert_eq!(constraints.masses(), array![28.085, 28.085, 28.085 / 2.0, 28.085]);
}

#[test]
fn flattened_outputs_share_row_ordering() {
    let species = vec!["Ga".to_string(), "As".to_string()];
    let positions = array![
        [0.0, 0.0, 0.0],
        [0.25, 0.25, 0.25],
    ];
    let structure = Structure::new(species, UnitCell::cubic(5.65), positions).unwrap();

    let images = PeriodicImages::new(&structure);
    let positions = images.flat_cartesian();
    let masses = images.flat_masses();
    let species = images.flat_species();
    assert_eq!(positions.nrows(), 54);
    assert_eq!(masses.len(), 54);
    assert_eq!(species.len(), 54);
    for block in 0..27 {
        assert_eq!(species[2 * block], "Ga");
        assert_eq!(species[2 * block + 1], "As");
        assert_eq!(masses[2 * block], 69.723);
        assert_eq!(masses[2 * block + 1], 74.9922);
    }

    let tiled = TiledSupercell::new(&structure, 3).unwrap();
    assert_eq!(tiled.cartesian().nrows(), 54);
    assert_eq!(tiled.masses().len(), 54);
    assert_eq!(tiled.species().len(), 54);
}
