pub const DEGREES_PER_HOUR: f64 = 15.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn sin_d(deg: f64) -> f64 {
    deg_to_rad(deg).sin()
}

pub fn cos_d(deg: f64) -> f64 {
    deg_to_rad(deg).cos()
}

pub fn tan_d(deg: f64) -> f64 {
    deg_to_rad(deg).tan()
}

/// Wraps into [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Wraps into (-180, 180].
pub fn normalize_hour_angle(angle: f64) -> f64 {
    let wrapped = normalize_angle(angle);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
