use std::fmt;

/// Severity level for diagnostics, ordered from least to most severe.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum Severity {
    #[default]
    Ignored,
    Note,
    Remark,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Ignored => "ignored",
            Severity::Note => "note",
            Severity::Remark => "remark",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignored" => Ok(Severity::Ignored),
            "note" => Ok(Severity::Note),
            "remark" => Ok(Severity::Remark),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            other => Err(format!("unknown severity `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_escalation() {
        assert!(Severity::Ignored < Severity::Note);
        assert!(Severity::Note < Severity::Remark);
        assert!(Severity::Remark < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn parses_display_form() {
        for severity in [
            Severity::Ignored,
            Severity::Note,
            Severity::Remark,
            Severity::Warning,
            Severity::Error,
            Severity::Fatal,
        ] {
            assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
        }
        assert!("loud".parse::<Severity>().is_err());
    }
}
