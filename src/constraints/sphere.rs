use log::warn;

use crate::elements::PLACEHOLDER_SPECIES;
use crate::{Error, PeriodicImages, Vector3D};

/// Parameters of the spherical region within which atoms are free to move
/// during a relaxation.
///
/// The center is typically placed on a defect, and the radius chosen so that
/// the sphere contains the atoms whose positions the defect perturbs. With
/// the default radius of 0, no atom qualifies and everything is fixed.
#[derive(Debug, Clone)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct SphereParameters {
    /// Cartesian coordinates of the center of the sphere
    pub center: [f64; 3],
    /// Radius of the sphere, in the same length unit as the cell. Must not
    /// be negative.
    pub radius: f64,
}

impl Default for SphereParameters {
    fn default() -> SphereParameters {
        SphereParameters {
            center: [0.0, 0.0, 0.0],
            radius: 0.0,
        }
    }
}

/// The result of classifying every atom of a supercell against a spherical
/// region, accounting for periodic boundary conditions.
///
/// An atom is free to move when **any** of its 27 periodic images falls
/// strictly inside the sphere; atoms exactly on the boundary stay fixed.
/// Fixed atoms are also reported under the placeholder species
/// [`PLACEHOLDER_SPECIES`], which makes the free region stand out when the
/// structure is visualized.
#[derive(Debug, Clone)]
pub struct SphereClassification {
    parameters: SphereParameters,
    /// For each canonical atom, whether it is free to move
    free: Vec<bool>,
    /// Placeholder species for fixed atoms, true species for free atoms
    fake_species: Vec<String>,
}

impl SphereClassification {
    /// Classify the atoms of `images` against the sphere described by
    /// `parameters`, marking atoms with at least one image strictly inside
    /// the sphere as free.
    ///
    /// As a side effect, the stored mass of every image atom found outside
    /// the sphere is halved in place, de-weighting the fixed region. The
    /// attenuation is applied per image and never undone: when only some
    /// images of an atom are inside the sphere, the atom ends up free but
    /// its out-of-sphere images still have their mass halved. The free flag
    /// itself does not depend on the order in which images are visited.
    ///
    /// This fails with [`Error::InvalidRadius`] when the radius is negative,
    /// before touching any mass.
    #[time_graph::instrument(name = "SphereClassification::compute")]
    pub fn compute(
        images: &mut PeriodicImages,
        parameters: &SphereParameters,
    ) -> Result<SphereClassification, Error> {
        if parameters.radius < 0.0 {
            return Err(Error::InvalidRadius(parameters.radius));
        }

        let n_atoms = images.size();
        let center = Vector3D::from(parameters.center);

        let mut free = vec![false; n_atoms];
        let mut fake_species = vec![PLACEHOLDER_SPECIES.to_owned(); n_atoms];

        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for atom in 0..n_atoms {
                        let positions = images.image_cartesian(i, j, k);
                        let position = Vector3D::new(
                            positions[[atom, 0]],
                            positions[[atom, 1]],
                            positions[[atom, 2]],
                        );

                        if (position - center).norm() < parameters.radius {
                            free[atom] = true;
                            fake_species[atom] = images.species()[atom].clone();
                        } else {
                            images.masses_mut()[[i, j, k, atom]] /= 2.0;
                        }
                    }
                }
            }
        }

        if parameters.radius > 0.0 && !free.contains(&true) {
            warn!(
                "no atom within {} of {:?}, all atoms will be fixed",
                parameters.radius, parameters.center
            );
        }

        return Ok(SphereClassification {
            parameters: parameters.clone(),
            free: free,
            fake_species: fake_species,
        });
    }

    /// Get the number of atoms in the canonical supercell
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Check if there are no atoms in this classification
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Get the free/fixed flags, one for each canonical atom
    pub fn free(&self) -> &[bool] {
        &self.free
    }

    /// Check whether the atom with index `atom` is free to move
    pub fn is_free(&self, atom: usize) -> bool {
        self.free[atom]
    }

    /// Get the number of atoms free to move
    pub fn num_free(&self) -> usize {
        self.free.iter().filter(|&&free| free).count()
    }

    /// Get the species with fixed atoms replaced by the placeholder, one
    /// for each canonical atom
    pub fn fake_species(&self) -> &[String] {
        &self.fake_species
    }

    /// Get the parameters used to compute this classification, as a JSON
    /// string
    pub fn parameters(&self) -> String {
        serde_json::to_string(&self.parameters).expect("failed to serialize to JSON")
    }
}
