//! Testing method and certificate type codes.
//!
//! Both are stored on the wire as small integers. Lookups never fail: an
//! unknown or missing code renders as [`UNKNOWN_METHOD_LABEL`] or
//! [`UNKNOWN_TYPE_LABEL`].

use std::fmt;

pub const UNKNOWN_METHOD_LABEL: &str = "Unknown Method";
pub const UNKNOWN_TYPE_LABEL: &str = "Unknown Type";

/// Non-destructive testing technique a certificate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethod {
    MagneticParticleTesting = 1,
    LiquidPenetrantTesting = 2,
    RadiographicTesting = 3,
    UltrasonicTesting = 4,
    VisualTesting = 5,
}

impl ServiceMethod {
    /// All methods in code order, for dropdowns.
    pub const ALL: [Self; 5] = [
        Self::MagneticParticleTesting,
        Self::LiquidPenetrantTesting,
        Self::RadiographicTesting,
        Self::UltrasonicTesting,
        Self::VisualTesting,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    #[inline]
    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MagneticParticleTesting => "Magnetic Particle Testing",
            Self::LiquidPenetrantTesting => "Liquid Penetrant Testing",
            Self::RadiographicTesting => "Radiographic Testing",
            Self::UltrasonicTesting => "Ultrasonic Testing",
            Self::VisualTesting => "Visual Testing",
        }
    }
}

impl fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Issuance category of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateType {
    Recertificate = 1,
    Initial = 2,
}

impl CertificateType {
    pub const ALL: [Self; 2] = [Self::Recertificate, Self::Initial];

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    #[inline]
    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Recertificate => "Recertificate",
            Self::Initial => "Initial",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a method code, or `"Unknown Method"`.
pub fn method_label(code: Option<i64>) -> &'static str {
    code.and_then(ServiceMethod::from_code)
        .map_or(UNKNOWN_METHOD_LABEL, ServiceMethod::label)
}

/// Label for a certificate type code, or `"Unknown Type"`.
pub fn type_label(code: Option<i64>) -> &'static str {
    code.and_then(CertificateType::from_code)
        .map_or(UNKNOWN_TYPE_LABEL, CertificateType::label)
}
