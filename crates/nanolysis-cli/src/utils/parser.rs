use nanolysis::core::geometry::{AxisRange, Cell};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid cell '{0}'. Expected 'xlo:xhi,ylo:yhi,zlo:zhi' (e.g., '0:10,0:10,-5:5').")]
    InvalidCellFormat(String),

    #[error("Invalid range '{0}'. Expected 'low:high'.")]
    InvalidRangeFormat(String),

    #[error("Invalid number '{0}' in range.")]
    InvalidNumber(String),

    #[error("Range '{0}' has its low bound above its high bound.")]
    InvertedRange(String),
}

/// Parses `low:high` into a closed range.
pub fn parse_range(s: &str) -> Result<AxisRange, ParseError> {
    let (low, high) = s
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidRangeFormat(s.to_string()))?;
    let number = |t: &str| {
        t.trim()
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber(t.trim().to_string()))
    };
    let (low, high) = (number(low)?, number(high)?);
    if low > high {
        return Err(ParseError::InvertedRange(s.to_string()));
    }
    Ok(AxisRange::new(low, high))
}

/// Parses `xlo:xhi,ylo:yhi,zlo:zhi` into a cell. Used as a clap value parser.
pub fn parse_cell(s: &str) -> Result<Cell, ParseError> {
    let parts: Vec<&str> = s.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(ParseError::InvalidCellFormat(s.to_string()));
    };
    Ok(Cell::new(parse_range(x)?, parse_range(y)?, parse_range(z)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_cell() {
        let cell = parse_cell("0:10, -5:5,1.5:2").unwrap();
        assert_eq!(cell.x, AxisRange::new(0.0, 10.0));
        assert_eq!(cell.y, AxisRange::new(-5.0, 5.0));
        assert_eq!(cell.z, AxisRange::new(1.5, 2.0));
    }

    #[test]
    fn rejects_wrong_number_of_ranges() {
        assert_eq!(
            parse_cell("0:1,0:1"),
            Err(ParseError::InvalidCellFormat("0:1,0:1".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert_eq!(
            parse_range("5"),
            Err(ParseError::InvalidRangeFormat("5".to_string()))
        );
        assert_eq!(
            parse_range("a:1"),
            Err(ParseError::InvalidNumber("a".to_string()))
        );
        assert_eq!(
            parse_range("2:1"),
            Err(ParseError::InvertedRange("2:1".to_string()))
        );
    }
}
