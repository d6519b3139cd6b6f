//! Footprint of the rays on an optical element
//!
//! An element lies either in the XY or in the XZ plane, the plane being the one
//! where the hits are spread the most along the second axis.

use std::fmt;

use crate::{
    histogram::{Histogram2d, HistogramError},
    hits::Hit,
};

/// Plane of an optical element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    XY,
    XZ,
}
impl Plane {
    /// Classifies an element from the ranges of the hits along the y and z axes
    ///
    /// The element is in the XY plane only if the y range is strictly larger than the z range.
    pub fn classify(y_range: f64, z_range: f64) -> Self {
        if y_range > z_range {
            Plane::XY
        } else {
            Plane::XZ
        }
    }
    /// Label of the second axis of the plane
    pub fn y_label(&self) -> &'static str {
        match self {
            Plane::XY => "y",
            Plane::XZ => "z",
        }
    }
}
impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::XY => write!(f, "XY"),
            Plane::XZ => write!(f, "XZ"),
        }
    }
}

/// Returns `max - min` of the values
pub fn range(values: impl Iterator<Item = f64> + Clone) -> f64 {
    values.clone().fold(f64::NEG_INFINITY, f64::max) - values.fold(f64::INFINITY, f64::min)
}

/// The hits on one optical element
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    element: f64,
    plane: Plane,
    hits: Vec<Hit>,
}
impl Footprint {
    pub fn new(element: f64, hits: Vec<Hit>) -> Self {
        let plane = Plane::classify(
            range(hits.iter().map(|h| h.y)),
            range(hits.iter().map(|h| h.z)),
        );
        log::debug!(
            "element {}: {} hits in the {} plane",
            element,
            hits.len(),
            plane
        );
        Self {
            element,
            plane,
            hits,
        }
    }
    pub fn element(&self) -> f64 {
        self.element
    }
    /// Element identifier, the fractional part truncated
    pub fn element_id(&self) -> i64 {
        self.element as i64
    }
    pub fn plane(&self) -> Plane {
        self.plane
    }
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }
    pub fn title(&self) -> String {
        format!("Footprint of element {}", self.element_id())
    }
    pub fn x_label(&self) -> &'static str {
        "x"
    }
    pub fn y_label(&self) -> &'static str {
        self.plane.y_label()
    }
    /// Iterator over the hits (x,y) or (x,z) coordinates in the element plane
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let plane = self.plane;
        self.hits.iter().map(move |h| match plane {
            Plane::XY => (h.x, h.y),
            Plane::XZ => (h.x, h.z),
        })
    }
    /// Returns the 2D histogram of the hits in the element plane
    pub fn histogram(&self, bins: usize) -> Result<Histogram2d, HistogramError> {
        Histogram2d::new(self.points(), bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(x: f64, y: f64, z: f64) -> Hit {
        Hit {
            x,
            y,
            z,
            element: 3.,
        }
    }

    #[test]
    fn classify() {
        assert_eq!(Plane::classify(10., 3.), Plane::XY);
        assert_eq!(Plane::classify(3., 10.), Plane::XZ);
        assert_eq!(Plane::classify(0., 0.), Plane::XZ);
        assert_eq!(Plane::classify(2.5, 2.5), Plane::XZ);
    }
    #[test]
    fn xy_element() {
        let footprint = Footprint::new(3.9, vec![hit(0., 0., 0.), hit(1., 10., 3.)]);
        assert_eq!(footprint.plane(), Plane::XY);
        assert_eq!(footprint.y_label(), "y");
        assert_eq!(footprint.x_label(), "x");
        assert_eq!(footprint.title(), "Footprint of element 3");
        assert_eq!(
            footprint.points().collect::<Vec<_>>(),
            vec![(0., 0.), (1., 10.)]
        );
    }
    #[test]
    fn xz_element() {
        let footprint = Footprint::new(-1.5, vec![hit(0., 1., -4.), hit(1., 2., 4.)]);
        assert_eq!(footprint.plane(), Plane::XZ);
        assert_eq!(footprint.y_label(), "z");
        assert_eq!(footprint.element_id(), -1);
        assert_eq!(
            footprint.points().collect::<Vec<_>>(),
            vec![(0., -4.), (1., 4.)]
        );
    }
    #[test]
    fn single_hit() {
        let footprint = Footprint::new(1., vec![hit(1., 2., 3.)]);
        assert_eq!(footprint.plane(), Plane::XZ);
    }
}
