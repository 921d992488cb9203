pub mod length;
pub mod mass;
pub mod time;
pub mod velocity;


pub use length::{EARTH_ORBIT_M, Length};
pub use mass::{EARTH_MASS_KG, Mass, SOLAR_MASS_KG};
pub use time::Time;
pub use velocity::{
    GRAVITATIONAL_CONSTANT, Velocity, circular_orbital_period, circular_orbital_velocity,
};
