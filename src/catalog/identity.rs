use serde::{Serialize, Serializer};

/// One of the three identifier namespaces declared by the catalogs.
///
/// Each kind owns a catalog document (keyed by its plural name) and a
/// required identifier prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EntityKind {
    Standard,
    Property,
    Tool,
}

impl EntityKind {
    /// Every kind in catalog evaluation order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Standard, EntityKind::Property, EntityKind::Tool];

    /// Top-level key holding the entity list in the kind's catalog document.
    pub fn catalog_key(self) -> &'static str {
        match self {
            EntityKind::Standard => "standards",
            EntityKind::Property => "properties",
            EntityKind::Tool => "tools",
        }
    }

    /// Prefix every identifier in this namespace must carry.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Standard => "std:",
            EntityKind::Property => "prop:",
            EntityKind::Tool => "tool:",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Standard => "standard",
            EntityKind::Property => "property",
            EntityKind::Tool => "tool",
        }
    }

    /// Capitalized label used in violation messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Standard => "Standard",
            EntityKind::Property => "Property",
            EntityKind::Tool => "Tool",
        }
    }
}

impl Serialize for EntityKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// How a property is verified.
///
/// Known variants cover the closed enumeration; `Other` keeps unknown values
/// intact so the enumeration rule can report them as written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationType {
    Library,
    CustomProperty,
    AiAudit,
    Manual,
    Other(String),
}

impl VerificationType {
    /// The closed set accepted by the enumeration rule.
    pub const ALLOWED: [&'static str; 4] = ["library", "custom_property", "ai_audit", "manual"];

    pub fn as_str(&self) -> &str {
        match self {
            VerificationType::Library => "library",
            VerificationType::CustomProperty => "custom_property",
            VerificationType::AiAudit => "ai_audit",
            VerificationType::Manual => "manual",
            VerificationType::Other(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "library" => VerificationType::Library,
            "custom_property" => VerificationType::CustomProperty,
            "ai_audit" => VerificationType::AiAudit,
            "manual" => VerificationType::Manual,
            other => VerificationType::Other(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VerificationType::Other(_))
    }
}
