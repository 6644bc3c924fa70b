pub mod args;
pub mod delivery;
pub mod embed;
pub mod error;
pub mod logging;
pub mod model;
