use ndarray::Array2;

use cellgeom::{Structure, UnitCell};
use cellgeom::{PeriodicImages, SphereParameters, SphereClassification};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Build a silicon supercell with `n x n x n` conventional cells of 8 atoms
fn silicon_supercell(n: usize) -> Structure {
    let basis = [
        [0.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5],
        [0.25, 0.25, 0.25], [0.75, 0.75, 0.25], [0.75, 0.25, 0.75], [0.25, 0.75, 0.75],
    ];

    let mut positions = Vec::new();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for atom in &basis {
                    positions.push([
                        (atom[0] + i as f64) / n as f64,
                        (atom[1] + j as f64) / n as f64,
                        (atom[2] + k as f64) / n as f64,
                    ]);
                }
            }
        }
    }

    let n_atoms = positions.len();
    let fractional = Array2::from_shape_fn((n_atoms, 3), |(atom, dim)| positions[atom][dim]);
    let species = vec!["Si".to_string(); n_atoms];

    return Structure::new(species, UnitCell::cubic(5.43 * n as f64), fractional)
        .expect("invalid silicon supercell");
}

fn periodic_images(c: &mut Criterion) {
    let mut group = c.benchmark_group("PeriodicImages::new");
    group.noise_threshold(0.05);

    for &n in black_box(&[2, 4, 6]) {
        let structure = silicon_supercell(n);
        group.bench_function(format!("{} atoms", structure.size()), |b| b.iter(|| {
            PeriodicImages::new(black_box(&structure))
        }));
    }
}

fn sphere_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("SphereClassification::compute");
    group.noise_threshold(0.05);

    for &n in black_box(&[2, 4, 6]) {
        let structure = silicon_supercell(n);
        let images = PeriodicImages::new(&structure);
        let parameters = SphereParameters {
            center: [2.7, 2.7, 2.7],
            radius: 5.43 * n as f64 / 2.0,
        };

        group.bench_function(format!("{} atoms", structure.size()), |b| b.iter(|| {
            let mut images = images.clone();
            SphereClassification::compute(black_box(&mut images), &parameters)
        }));
    }
}

criterion_group!(benches, periodic_images, sphere_classification);
criterion_main!(benches);
