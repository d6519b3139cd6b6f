use crate::rays::RaysError;
#[cfg(feature = "plot")]
use crate::plot::PlotError;
#[cfg(feature = "viewer")]
use crate::viewer::ViewerError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `rays` module")]
    Rays(#[from] RaysError),
    #[cfg(feature = "plot")]
    #[error("Error in the `plot` module")]
    Plot(#[from] PlotError),
    #[cfg(feature = "viewer")]
    #[error("Error in the `viewer` module")]
    Viewer(#[from] ViewerError),
}

pub type Result<T> = std::result::Result<T, Error>;
