use std::fmt;

/// The running framework version.
pub const VERSION: Version = Version { major: 0, minor: 1, revision: 2, codename: "LÖVEly Turtles" };

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
    pub codename: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("invalid framework version '{0}', expected 'major.minor.revision'")]
    Unparsable(String),
    #[error(
        "This game was made for version {declared} of Turtle. \
         It may not be compatible with the running version ({running})."
    )]
    Mismatch { declared: String, running: String },
}

impl Version {
    /// Parses `major.minor.revision`, with an optional leading `v`.
    pub fn parse_numbers(s: &str) -> Result<(u32, u32, u32), VersionError> {
        let bad = || VersionError::Unparsable(s.to_string());
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let mut parts = trimmed.split('.');
        let mut next = || -> Result<u32, VersionError> {
            parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())
        };
        let numbers = (next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(numbers)
    }

    /// Checks a version string declared by an application against `self`.
    pub fn check_compatible(&self, declared: &str) -> Result<(), VersionError> {
        let numbers = Self::parse_numbers(declared)?;
        if numbers == (self.major, self.minor, self.revision) {
            Ok(())
        } else {
            Err(VersionError::Mismatch {
                declared: declared.trim().to_string(),
                running: format!("{}.{}.{}", self.major, self.minor, self.revision),
            })
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version {}.{}.{} - {}", self.major, self.minor, self.revision, self.codename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_release_string() {
        assert_eq!(VERSION.to_string(), "Version 0.1.2 - LÖVEly Turtles");
    }

    #[test]
    fn parses_plain_and_prefixed() {
        assert_eq!(Version::parse_numbers("0.1.2"), Ok((0, 1, 2)));
        assert_eq!(Version::parse_numbers(" v1.20.3 "), Ok((1, 20, 3)));
    }

    #[test]
    fn rejects_malformed() {
        for s in ["", "1.2", "1.2.3.4", "a.b.c", "1..2"] {
            assert!(matches!(Version::parse_numbers(s), Err(VersionError::Unparsable(_))), "{s}");
        }
    }

    #[test]
    fn compatibility() {
        assert_eq!(VERSION.check_compatible("0.1.2"), Ok(()));
        assert!(matches!(VERSION.check_compatible("0.2.0"), Err(VersionError::Mismatch { .. })));
        assert!(matches!(VERSION.check_compatible("latest"), Err(VersionError::Unparsable(_))));
    }
}
