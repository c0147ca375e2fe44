pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod intersection;
pub mod mesh;
pub mod profile;
pub mod proximity;
pub mod readout;
pub mod session;
pub mod timer;
pub mod vortex;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use intersection::*;
pub use mesh::*;
pub use profile::*;
pub use proximity::*;
pub use readout::*;
pub use session::*;
pub use timer::*;
pub use vortex::*;
