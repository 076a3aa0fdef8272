use crate::constants::NOT_AVAILABLE;
use crate::models::Coordinate;

/// Converts a Tomorrow.io weather code to a human-readable description
pub fn weather_code_to_description(code: Option<i64>) -> &'static str {
    match code {
        Some(1000) => "Clear, Sunny",
        Some(1100) => "Mostly Clear",
        Some(1101) => "Partly Cloudy",
        Some(1102) => "Mostly Cloudy",
        Some(1001) => "Cloudy",
        Some(2000) => "Fog",
        Some(2100) => "Light Fog",
        Some(4000) => "Drizzle",
        Some(4001) => "Rain",
        Some(4200) => "Light Rain",
        Some(4201) => "Heavy Rain",
        Some(5000) => "Snow",
        Some(5001) => "Flurries",
        Some(5100) => "Light Snow",
        Some(5101) => "Heavy Snow",
        Some(6000) => "Freezing Drizzle",
        Some(6001) => "Freezing Rain",
        Some(6200) => "Light Freezing Rain",
        Some(6201) => "Heavy Freezing Rain",
        Some(7000) => "Ice Pellets",
        Some(7101) => "Heavy Ice Pellets",
        Some(7102) => "Light Ice Pellets",
        Some(8000) => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Whole degrees Celsius, e.g. `25.6` -> `"26C"`. Ties go to the even
/// degree, and small negatives keep their sign (`-0.4` -> `"-0C"`).
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.0}C", celsius.round_ties_even())
}

pub fn format_humidity(humidity: Option<f64>) -> String {
    humidity.map_or_else(|| NOT_AVAILABLE.to_string(), |h| format!("{}%", h))
}

pub fn format_wind_speed(wind_speed: Option<f64>) -> String {
    wind_speed.map_or_else(|| NOT_AVAILABLE.to_string(), |w| format!("{} m/s", w))
}

/// `"Location (13.76, 100.50)"`
pub fn format_location(coordinate: Coordinate) -> String {
    format!(
        "Location ({:.2}, {:.2})",
        coordinate.latitude, coordinate.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(weather_code_to_description(Some(1000)), "Clear, Sunny");
        assert_eq!(weather_code_to_description(Some(4001)), "Rain");
        assert_eq!(weather_code_to_description(Some(7102)), "Light Ice Pellets");
        assert_eq!(weather_code_to_description(Some(8000)), "Thunderstorm");
    }

    #[test]
    fn unknown_or_missing_code() {
        assert_eq!(weather_code_to_description(Some(0)), "Unknown");
        assert_eq!(weather_code_to_description(Some(9999)), "Unknown");
        assert_eq!(weather_code_to_description(None), "Unknown");
    }

    #[test]
    fn temperature_rounds_to_whole_degrees() {
        assert_eq!(format_temperature(25.6), "26C");
        assert_eq!(format_temperature(25.4), "25C");
        assert_eq!(format_temperature(-3.7), "-4C");
        assert_eq!(format_temperature(-0.4), "-0C");
    }

    #[test]
    fn temperature_ties_round_to_even() {
        assert_eq!(format_temperature(24.5), "24C");
        assert_eq!(format_temperature(25.5), "26C");
        assert_eq!(format_temperature(0.5), "0C");
        assert_eq!(format_temperature(2.5), "2C");
        assert_eq!(format_temperature(-1.5), "-2C");
    }

    #[test]
    fn humidity_and_wind() {
        assert_eq!(format_humidity(Some(78.0)), "78%");
        assert_eq!(format_humidity(Some(64.5)), "64.5%");
        assert_eq!(format_humidity(None), "N/A");
        assert_eq!(format_wind_speed(Some(3.4)), "3.4 m/s");
        assert_eq!(format_wind_speed(None), "N/A");
    }

    #[test]
    fn location_label_uses_two_decimals() {
        assert_eq!(
            format_location(Coordinate::new(13.7563, 100.5018)),
            "Location (13.76, 100.50)"
        );
        assert_eq!(
            format_location(Coordinate::new(-33.8688, 151.2093)),
            "Location (-33.87, 151.21)"
        );
    }
}
