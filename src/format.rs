const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn temperature(degrees: f64) -> String {
    format!("{}°F", degrees.round() as i64)
}

/// `fraction` is a probability in `0.0..=1.0`.
pub fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

pub fn wind_speed(speed: f64) -> String {
    format!("{}mph", speed.round() as i64)
}

pub fn compass(degrees: f64) -> &'static str {
    let sector = (degrees / 22.5).round() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_readings() {
        assert_eq!(temperature(74.6), "75°F");
        assert_eq!(temperature(-3.2), "-3°F");
        assert_eq!(percent(0.2), "20%");
        assert_eq!(percent(0.0), "0%");
        assert_eq!(wind_speed(11.5), "12mph");
    }

    #[test]
    fn compass_wraps_around() {
        assert_eq!(compass(0.0), "N");
        assert_eq!(compass(45.0), "NE");
        assert_eq!(compass(200.0), "SSW");
        assert_eq!(compass(350.0), "N");
        assert_eq!(compass(360.0), "N");
        assert_eq!(compass(-90.0), "W");
    }
}
