//! Purpose a passcode was issued for

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Context requiring the code; active codes are partitioned per purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    #[default]
    Verification,
    Login,
    Reset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Verification => "verification",
            OtpPurpose::Login => "login",
            OtpPurpose::Reset => "reset",
        }
    }

    /// Wording used in the SMS body ("Your {label} code is ...")
    pub fn label(&self) -> &'static str {
        match self {
            OtpPurpose::Verification => "verification",
            OtpPurpose::Login => "login",
            OtpPurpose::Reset => "password reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verification" => Ok(OtpPurpose::Verification),
            "login" => Ok(OtpPurpose::Login),
            "reset" => Ok(OtpPurpose::Reset),
            other => Err(format!("Unknown OTP purpose: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_string_forms() {
        assert_eq!(OtpPurpose::default(), OtpPurpose::Verification);
        assert_eq!("reset".parse::<OtpPurpose>(), Ok(OtpPurpose::Reset));
        assert!("signup".parse::<OtpPurpose>().is_err());
        assert_eq!(OtpPurpose::Login.to_string(), "login");
        assert_eq!(serde_json::to_string(&OtpPurpose::Reset).unwrap(), "\"reset\"");
    }
}
