//! Traced rays
//!
//! The ray tracer writes every ray snapshot as a row of [`N_COLUMNS`] doubles in the
//! HDF5 dataset [`DATASET`], the columns being ordered as in [`COLUMNS`].

use std::{
    ops::Deref,
    path::{Path, PathBuf},
    time::Instant,
};

/// Number of values per ray
pub const N_COLUMNS: usize = 18;
/// Name of the HDF5 dataset holding the rays
pub const DATASET: &str = "0";
/// Column labels of the rays dataset
pub const COLUMNS: [&str; N_COLUMNS] = [
    "RayId",
    "SnapshotID",
    "Xloc",
    "Yloc",
    "Zloc",
    "Weight",
    "Xdir",
    "Ydir",
    "Zdir",
    "Energy",
    "Stokes0",
    "Stokes1",
    "Stokes2",
    "Stokes3",
    "pathLength",
    "order",
    "lastElement",
    "extraParam",
];

#[derive(Debug, thiserror::Error)]
pub enum RaysError {
    #[error("failed to open {1:?}")]
    Open(#[source] hdf5::Error, PathBuf),
    #[error("failed to create {1:?}")]
    Create(#[source] hdf5::Error, PathBuf),
    #[error("dataset {1:?} not found")]
    Dataset(#[source] hdf5::Error, String),
    #[error("expected a 2D rays dataset, found shape {0:?}")]
    Shape(Vec<usize>),
    #[error("expected {expected} columns per ray, found {found}")]
    Columns { expected: usize, found: usize },
    #[error("failed to read or write the rays dataset")]
    Hdf5(#[from] hdf5::Error),
    #[error("failed to write the hits")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, RaysError>;

/// A ray snapshot
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Ray {
    pub ray_id: f64,
    pub snapshot_id: f64,
    /// location
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// statistical weight, see [`W_JUST_HIT_ELEM`](crate::W_JUST_HIT_ELEM)
    pub weight: f64,
    /// direction
    pub x_dir: f64,
    pub y_dir: f64,
    pub z_dir: f64,
    pub energy: f64,
    pub stokes: [f64; 4],
    pub path_length: f64,
    pub order: f64,
    /// identifier of the optical element the ray interacted with last
    pub last_element: f64,
    pub extra_param: f64,
}
impl Ray {
    /// Creates a ray from a row of the rays dataset
    pub fn from_row(row: &[f64]) -> Result<Self> {
        let row: &[f64; N_COLUMNS] = row.try_into().map_err(|_| RaysError::Columns {
            expected: N_COLUMNS,
            found: row.len(),
        })?;
        let &[
            ray_id,
            snapshot_id,
            x,
            y,
            z,
            weight,
            x_dir,
            y_dir,
            z_dir,
            energy,
            s0,
            s1,
            s2,
            s3,
            path_length,
            order,
            last_element,
            extra_param,
        ] = row;
        Ok(Self {
            ray_id,
            snapshot_id,
            x,
            y,
            z,
            weight,
            x_dir,
            y_dir,
            z_dir,
            energy,
            stokes: [s0, s1, s2, s3],
            path_length,
            order,
            last_element,
            extra_param,
        })
    }
    /// Returns the ray as a row of the rays dataset
    pub fn to_row(&self) -> [f64; N_COLUMNS] {
        let [s0, s1, s2, s3] = self.stokes;
        [
            self.ray_id,
            self.snapshot_id,
            self.x,
            self.y,
            self.z,
            self.weight,
            self.x_dir,
            self.y_dir,
            self.z_dir,
            self.energy,
            s0,
            s1,
            s2,
            s3,
            self.path_length,
            self.order,
            self.last_element,
            self.extra_param,
        ]
    }
}

/// Rays snapshots
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rays(Vec<Ray>);
impl Deref for Rays {
    type Target = Vec<Ray>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<Ray>> for Rays {
    fn from(rays: Vec<Ray>) -> Self {
        Self(rays)
    }
}
impl FromIterator<Ray> for Rays {
    fn from_iter<I: IntoIterator<Item = Ray>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl Rays {
    /// Loads the rays from the dataset "0" of an HDF5 file
    ///
    /// The file is closed before returning, whether the rays were loaded or not.
    pub fn from_h5<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading {:?}...", path);
        let now = Instant::now();
        let data = {
            let file =
                hdf5::File::open(path).map_err(|e| RaysError::Open(e, path.to_path_buf()))?;
            let dataset = file
                .dataset(DATASET)
                .map_err(|e| RaysError::Dataset(e, DATASET.to_string()))?;
            match dataset.shape().as_slice() {
                [_, n] if *n == N_COLUMNS => (),
                [_, n] => {
                    return Err(RaysError::Columns {
                        expected: N_COLUMNS,
                        found: *n,
                    })
                }
                shape => return Err(RaysError::Shape(shape.to_vec())),
            }
            dataset.read_raw::<f64>()?
        };
        let rays = Self::from_row_major(&data)?;
        log::info!(
            "... loaded {} rays in {:}ms",
            rays.len(),
            now.elapsed().as_millis()
        );
        Ok(rays)
    }
    /// Creates the rays from the row-major samples of a `[n, N_COLUMNS]` table
    pub fn from_row_major(data: &[f64]) -> Result<Self> {
        if data.len() % N_COLUMNS != 0 {
            return Err(RaysError::Shape(vec![data.len()]));
        }
        data.chunks_exact(N_COLUMNS).map(Ray::from_row).collect()
    }
    /// Writes the rays to the dataset "0" of a new HDF5 file, truncating any existing file
    pub fn to_h5<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file =
            hdf5::File::create(path).map_err(|e| RaysError::Create(e, path.to_path_buf()))?;
        let dataset = file
            .new_dataset::<f64>()
            .shape((self.len(), N_COLUMNS))
            .create(DATASET)?;
        if !self.is_empty() {
            let data: Vec<f64> = self.iter().flat_map(Ray::to_row).collect();
            dataset.write_raw(&data)?;
        }
        log::debug!("{} rays written to {:?}", self.len(), path);
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn ray(x: f64, y: f64, z: f64, weight: f64, last_element: f64) -> Ray {
        Ray {
            x,
            y,
            z,
            weight,
            last_element,
            ..Default::default()
        }
    }

    #[test]
    fn row_labels() {
        let row: Vec<f64> = (0..N_COLUMNS).map(|i| i as f64).collect();
        let ray = Ray::from_row(&row).unwrap();
        assert_eq!(COLUMNS[2], "Xloc");
        assert_eq!(ray.x, 2.);
        assert_eq!(COLUMNS[5], "Weight");
        assert_eq!(ray.weight, 5.);
        assert_eq!(ray.stokes, [10., 11., 12., 13.]);
        assert_eq!(COLUMNS[16], "lastElement");
        assert_eq!(ray.last_element, 16.);
        assert_eq!(ray.to_row().to_vec(), row);
    }
    #[test]
    fn row_too_short() {
        match Ray::from_row(&[0f64; 17]) {
            Err(RaysError::Columns { expected, found }) => {
                assert_eq!((expected, found), (18, 17))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
    #[test]
    fn h5_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rays.h5");
        let rays: Rays = vec![ray(1., 2., 3., 1., 4.), ray(-1., 0.5, 7., 0., 2.)].into();
        rays.to_h5(&path).unwrap();
        assert_eq!(Rays::from_h5(&path).unwrap(), rays);
    }
    #[test]
    fn h5_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Rays::from_h5(dir.path().join("nope.h5")),
            Err(RaysError::Open(_, _))
        ));
    }
    #[test]
    fn h5_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rays.h5");
        {
            let file = hdf5::File::create(&path).unwrap();
            file.new_dataset::<f64>()
                .shape((2, N_COLUMNS))
                .create("1")
                .unwrap();
        }
        assert!(matches!(
            Rays::from_h5(&path),
            Err(RaysError::Dataset(_, name)) if name == "0"
        ));
    }
    #[test]
    fn h5_wrong_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rays.h5");
        {
            let file = hdf5::File::create(&path).unwrap();
            let dataset = file
                .new_dataset::<f64>()
                .shape((2, 17))
                .create(DATASET)
                .unwrap();
            dataset.write_raw(&vec![1f64; 34]).unwrap();
        }
        assert!(matches!(
            Rays::from_h5(&path),
            Err(RaysError::Columns {
                expected: 18,
                found: 17
            })
        ));
    }
}
