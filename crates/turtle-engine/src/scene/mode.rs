use std::fmt;
use std::str::FromStr;

/// How a shape is painted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DrawMode {
    #[default]
    Fill,
    /// Outline only, using the current line width.
    Line,
}

impl FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fill" => Ok(DrawMode::Fill),
            "line" => Ok(DrawMode::Line),
            _ => Err(format!("invalid draw mode '{s}', expected 'fill' or 'line'")),
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawMode::Fill => "fill",
            DrawMode::Line => "line",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" LINE ".parse::<DrawMode>(), Ok(DrawMode::Line));
        assert_eq!("fill".parse::<DrawMode>(), Ok(DrawMode::Fill));
        assert!("stroke".parse::<DrawMode>().is_err());
    }
}
