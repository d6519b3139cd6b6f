//! Rays that just hit an optical element

use std::{ops::Deref, path::Path};

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::{
    footprint::Footprint,
    rays::{Rays, RaysError},
};

/// Ray weight flagging a ray that has just hit an optical element
pub const W_JUST_HIT_ELEM: f64 = 1.;

/// The location of a ray on the element it has just hit
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    #[serde(rename = "Xloc")]
    pub x: f64,
    #[serde(rename = "Yloc")]
    pub y: f64,
    #[serde(rename = "Zloc")]
    pub z: f64,
    #[serde(rename = "lastElement")]
    pub element: f64,
}
impl Hit {
    /// Returns a key identifying the hit element
    ///
    /// `0.` and `-0.` share the same key, so do all the NaNs.
    pub(crate) fn element_key(&self) -> u64 {
        if self.element.is_nan() {
            f64::NAN.to_bits()
        } else {
            (self.element + 0.).to_bits()
        }
    }
}

/// Rays hits on the optical elements
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Hits(Vec<Hit>);
impl Deref for Hits {
    type Target = Vec<Hit>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<Hit>> for Hits {
    fn from(hits: Vec<Hit>) -> Self {
        Self(hits)
    }
}
impl Rays {
    /// Returns the locations of the rays with a weight of exactly [`W_JUST_HIT_ELEM`]
    pub fn hits(&self) -> Hits {
        Hits(
            self.iter()
                .filter(|ray| ray.weight == W_JUST_HIT_ELEM)
                .map(|ray| Hit {
                    x: ray.x,
                    y: ray.y,
                    z: ray.z,
                    element: ray.last_element,
                })
                .collect(),
        )
    }
}
impl Hits {
    /// Returns the hit elements in the order they first appear
    pub fn elements(&self) -> Vec<f64> {
        self.iter()
            .unique_by(|hit| hit.element_key())
            .map(|hit| hit.element)
            .collect()
    }
    /// Returns the footprint of each hit element, ordered as [`Hits::elements`]
    pub fn footprints(&self) -> Vec<Footprint> {
        let groups = self.iter().into_group_map_by(|hit| hit.element_key());
        self.iter()
            .unique_by(|hit| hit.element_key())
            .filter_map(|hit| {
                groups.get(&hit.element_key()).map(|hits| {
                    Footprint::new(hit.element, hits.iter().map(|&&hit| hit).collect())
                })
            })
            .collect()
    }
    /// Writes the hits to a CSV file
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), RaysError> {
        let mut wtr = csv::Writer::from_path(path)?;
        for hit in self.iter() {
            wtr.serialize(hit)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
    pub fn summary(&self) {
        let minmax = |x: &mut dyn Iterator<Item = f64>| match x.minmax() {
            MinMaxResult::NoElements => (f64::NAN, f64::NAN),
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        println!("SUMMARY:");
        println!(" - # of hits: {}", self.len());
        let footprints = self.footprints();
        if footprints.is_empty() {
            return;
        }
        println!(" - # of hit elements: {}", footprints.len());
        println!(
            "    {:^8}: {:>8}  ({:^10}, {:^10})  ({:^10}, {:^10})  ({:^10}, {:^10})  {:^5}",
            "ELEMENT", "HITS", "XMIN", "XMAX", "YMIN", "YMAX", "ZMIN", "ZMAX", "PLANE"
        );
        for footprint in &footprints {
            let hits = footprint.hits();
            println!(
                "  - {:8}: {:>8}  {:>10.3?}  {:>10.3?}  {:>10.3?}  {:^5}",
                footprint.element_id(),
                hits.len(),
                minmax(&mut hits.iter().map(|h| h.x)),
                minmax(&mut hits.iter().map(|h| h.y)),
                minmax(&mut hits.iter().map(|h| h.z)),
                footprint.plane().to_string(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{seq::SliceRandom, Rng};

    use super::*;
    use crate::rays::{tests::ray, Ray};

    #[test]
    fn terminal_hits_only() {
        let mut rng = rand::thread_rng();
        let weights = [0., 1., 2., 1. + f64::EPSILON, 1. - f64::EPSILON, -1.];
        for _ in 0..20 {
            let rays: Rays = (0..rng.gen_range(0..200))
                .map(|_| {
                    ray(
                        rng.gen(),
                        rng.gen(),
                        rng.gen(),
                        *weights.choose(&mut rng).unwrap(),
                        rng.gen_range(0..5) as f64,
                    )
                })
                .collect();
            let n_hits = rays.iter().filter(|r| r.weight == 1.).count();
            let hits = rays.hits();
            assert_eq!(hits.len(), n_hits);
            assert!(hits.iter().all(|hit| rays
                .iter()
                .any(|r| r.weight == 1. && r.x == hit.x && r.y == hit.y && r.z == hit.z)));
        }
    }
    #[test]
    fn one_element() {
        let rays: Rays = vec![
            ray(0., 1., 2., 1., 2.),
            ray(1., 2., 3., 1., 2.),
            ray(2., 3., 4., 0., 5.),
        ]
        .into();
        let hits = rays.hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.elements(), vec![2.]);
        let footprints = hits.footprints();
        assert_eq!(footprints.len(), 1);
        assert_eq!(footprints[0].title(), "Footprint of element 2");
    }
    #[test]
    fn no_hits() {
        let rays: Rays = vec![ray(0., 1., 2., 0., 2.), ray(1., 2., 3., 2., 3.)].into();
        let hits = rays.hits();
        assert!(hits.is_empty());
        assert!(hits.elements().is_empty());
        assert!(hits.footprints().is_empty());
    }
    #[test]
    fn elements_first_seen() {
        let hits: Hits = [3., 1., 3., 7.5, 1., -0., 0.]
            .into_iter()
            .map(|element| Hit {
                element,
                ..Default::default()
            })
            .collect::<Vec<_>>()
            .into();
        assert_eq!(hits.elements(), vec![3., 1., 7.5, 0.]);
        let footprints = hits.footprints();
        let sizes: Vec<_> = footprints.iter().map(|f| f.hits().len()).collect();
        assert_eq!(sizes, vec![2, 2, 1, 2]);
        let ids: Vec<_> = footprints.iter().map(|f| f.element_id()).collect();
        assert_eq!(ids, vec![3, 1, 7, 0]);
    }
    #[test]
    fn nan_elements() {
        let hits: Hits = [
            f64::from_bits(0x7ff8_0000_0000_0001),
            2.,
            f64::NAN,
            -f64::NAN,
            f64::from_bits(0x7ff0_0000_0000_0002),
        ]
        .into_iter()
        .map(|element| Hit {
            element,
            ..Default::default()
        })
        .collect::<Vec<_>>()
        .into();
        assert_eq!(hits.elements().len(), 2);
        assert!(hits.elements()[0].is_nan());
        let sizes: Vec<_> = hits.footprints().iter().map(|f| f.hits().len()).collect();
        assert_eq!(sizes, vec![4, 1]);
    }
    #[test]
    fn load_twice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rays.h5");
        let rays: Rays = (0..50)
            .map(|i| Ray {
                ray_id: i as f64,
                ..ray(i as f64, 0.5 * i as f64, 3., (i % 3) as f64, (i % 4) as f64)
            })
            .collect();
        rays.to_h5(&path).unwrap();
        let hits = Rays::from_h5(&path).unwrap().hits();
        assert_eq!(hits, Rays::from_h5(&path).unwrap().hits());
        assert_eq!(hits, rays.hits());
    }
    #[test]
    fn csv_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hits.csv");
        let hits: Hits = vec![Hit {
            x: 1.,
            y: 2.,
            z: 3.,
            element: 4.,
        }]
        .into();
        hits.to_csv(&path).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "Xloc,Yloc,Zloc,lastElement\n1.0,2.0,3.0,4.0\n");
    }
}
