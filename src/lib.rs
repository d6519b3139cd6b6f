//! # Ray footprints
//!
//! Density maps of the rays hitting the optical elements of a beamline.
//!
//! The rays are loaded from the HDF5 file written by the ray tracer, the rays that
//! have just hit an element are kept and, for each element, the hits are binned into a
//! 2D histogram in the plane of the element.
//!
//! ```no_run
//! use ray_footprint::{Figure, Rays};
//!
//! let hits = Rays::from_h5("output.h5")?.hits();
//! hits.summary();
//! Figure::new(hits.footprints()).save("footprints.png")?;
//! # Ok::<(), ray_footprint::Error>(())
//! ```

pub mod error;
pub mod footprint;
pub mod histogram;
pub mod hits;
#[cfg(feature = "plot")]
pub mod plot;
pub mod rays;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::{Error, Result};
pub use footprint::{Footprint, Plane};
pub use histogram::{Histogram2d, HistogramError};
pub use hits::{Hit, Hits, W_JUST_HIT_ELEM};
#[cfg(feature = "plot")]
pub use plot::Figure;
pub use rays::{Ray, Rays};
