//! Console entry of the starting view: "lat lon" on one line, then a scale percent

use crate::core::geo::{LatLng, ZoomLevel};
use crate::core::navigation::NavigationModel;
use crate::{MapError, Result};
use std::io::{BufRead, Write};

/// Parses "lat lon" separated by whitespace. Commas are rejected outright.
pub fn parse_coordinate_line(line: &str) -> Result<LatLng> {
    if line.contains(',') {
        return Err(MapError::InvalidCoordinate(
            "separate latitude and longitude with a space, not a comma".to_string(),
        ));
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [lat, lng] => NavigationModel::parse_coordinate(lat, lng),
        _ => Err(MapError::InvalidCoordinate(format!(
            "expected latitude and longitude, got {} value(s)",
            parts.len()
        ))),
    }
}

/// Parses a 0-100 scale percent
pub fn parse_scale_percent(text: &str) -> Result<f64> {
    let text = text.trim();
    let percent: f64 = text
        .parse()
        .map_err(|_| MapError::InvalidScale(format!("'{text}' is not a number")))?;
    // Range check happens in the conversion; run it here so bad input fails early.
    ZoomLevel::from_percent(percent)?;
    Ok(percent)
}

/// Prompts for the starting center and scale
pub fn read_startup<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(LatLng, ZoomLevel)> {
    writeln!(output, "Enter latitude and longitude separated by a space:")?;
    output.flush()?;
    let center = parse_coordinate_line(&read_line(input)?)?;

    writeln!(output, "Enter the scale in percent (0-100):")?;
    output.flush()?;
    let percent = parse_scale_percent(&read_line(input)?)?;

    Ok((center, NavigationModel::percent_to_zoom(percent)?))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(MapError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input ended before all values were entered",
        )));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_coordinate_line() {
        assert_eq!(
            parse_coordinate_line("55.75 37.61").unwrap(),
            LatLng::new(55.75, 37.61)
        );
        assert_eq!(
            parse_coordinate_line("  -33.9\t18.4  ").unwrap(),
            LatLng::new(-33.9, 18.4)
        );
    }

    #[test]
    fn test_comma_is_rejected() {
        for line in ["55.75,37.61", "55.75, 37.61", "55,75 37,61"] {
            assert!(matches!(
                parse_coordinate_line(line),
                Err(MapError::InvalidCoordinate(_))
            ));
        }
    }

    #[test]
    fn test_wrong_value_count() {
        assert!(parse_coordinate_line("55.75").is_err());
        assert!(parse_coordinate_line("1 2 3").is_err());
        assert!(parse_coordinate_line("").is_err());
        assert!(parse_coordinate_line("100 37").is_err());
    }

    #[test]
    fn test_parse_scale_percent() {
        assert_eq!(parse_scale_percent(" 50 ").unwrap(), 50.0);
        assert!(matches!(parse_scale_percent("abc"), Err(MapError::InvalidScale(_))));
        assert!(matches!(parse_scale_percent("101"), Err(MapError::InvalidScale(_))));
        assert!(matches!(parse_scale_percent("-3"), Err(MapError::InvalidScale(_))));
    }

    #[test]
    fn test_read_startup() {
        let mut input = Cursor::new("55.751244 37.618423\n50\n");
        let mut output = Vec::new();

        let (center, zoom) = read_startup(&mut input, &mut output).unwrap();
        assert_eq!(center, LatLng::new(55.751244, 37.618423));
        assert_eq!(zoom.value(), 8);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("latitude and longitude"));
        assert!(printed.contains("0-100"));
    }

    #[test]
    fn test_read_startup_stops_at_first_error() {
        let mut input = Cursor::new("55.75,37.61\n50\n");
        let mut output = Vec::new();
        assert!(matches!(
            read_startup(&mut input, &mut output),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert!(!String::from_utf8(output).unwrap().contains("percent"));
    }

    #[test]
    fn test_read_startup_eof() {
        let mut input = Cursor::new("55.75 37.61\n");
        let mut output = Vec::new();
        assert!(matches!(read_startup(&mut input, &mut output), Err(MapError::Io(_))));
    }
}
