//! Clear-sky solar radiation on a horizontal surface.
//!
//! Both models come from the Washington State Department of Ecology SolRad
//! workbook:
//!
//! - Bras, R.L. 1990. Hydrology. Addison-Wesley, Reading, MA.
//! - Ryan, P.J. and K.D. Stolzenbach. 1972. Engineering aspects of heat
//!   disposal from power generation. MIT R.M. Parsons Laboratory.

use chrono::{DateTime, TimeZone};

use crate::angles::{rad_to_deg, sin_d};
use crate::position::solar_position;
use crate::types::{Algorithm, AtmosphereParams, RadiationEstimate, SolarPosition};

/// W/m²
pub const SOLAR_CONSTANT: f64 = 1367.0;

fn relative_air_mass(sin_elevation: f64, elevation: f64) -> f64 {
    sin_elevation + 0.15 * (elevation + 3.885).powf(-1.253)
}

pub fn bras_radiation(solar_elevation: f64, distance_au: f64, turbidity: f64) -> f64 {
    let sin_elevation = sin_d(solar_elevation);
    if sin_elevation < 0.0 {
        return 0.0;
    }

    let top_of_atmosphere = (SOLAR_CONSTANT / distance_au.powi(2)) * sin_elevation;
    let optical_air_mass = relative_air_mass(sin_elevation, solar_elevation).powi(-1);
    let scattering_coefficient = 0.128 - 0.054 * optical_air_mass.log10();

    top_of_atmosphere * (-turbidity * scattering_coefficient * optical_air_mass).exp()
}

pub fn ryan_stolzenbach_radiation(
    solar_elevation: f64,
    distance_au: f64,
    transmission_coefficient: f64,
    altitude_m: f64,
) -> f64 {
    let sin_elevation = sin_d(solar_elevation);
    if sin_elevation < 0.0 {
        return 0.0;
    }

    let pressure_ratio = ((288.0 - 0.0065 * altitude_m) / 288.0).powf(5.256);
    let rm = pressure_ratio / relative_air_mass(sin_elevation, rad_to_deg(sin_elevation.asin()));
    let top_of_atmosphere = SOLAR_CONSTANT * sin_elevation / distance_au.powi(2);

    top_of_atmosphere * transmission_coefficient.powf(rm)
}

/// Uses the refraction-corrected altitude, so a sun just below the geometric
/// horizon can still contribute.
pub fn max_radiation(
    algorithm: Algorithm,
    position: &SolarPosition,
    params: &AtmosphereParams,
) -> f64 {
    let elevation = position.corrected_altitude;
    match algorithm {
        Algorithm::Bras => bras_radiation(elevation, position.distance, params.turbidity),
        Algorithm::RyanStolzenbach => ryan_stolzenbach_radiation(
            elevation,
            position.distance,
            params.transmission_coefficient,
            params.altitude_m,
        ),
    }
}

pub fn estimate(
    algorithm: Algorithm,
    position: &SolarPosition,
    params: &AtmosphereParams,
) -> RadiationEstimate {
    RadiationEstimate {
        max_possible_radiation: max_radiation(algorithm, position, params),
    }
}

pub fn solar_max<Tz: TimeZone>(
    algorithm: Algorithm,
    at: &DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    params: &AtmosphereParams,
) -> f64 {
    let position = solar_position(at, latitude, longitude);
    max_radiation(algorithm, &position, params)
}
