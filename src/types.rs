use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TickkkError;

pub const TOKEN_KEY: &str = "tickkk_token";
pub const USER_KEY: &str = "tickkk_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Abierto,
    EnProceso,
    Cerrado,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Abierto,
        TicketStatus::EnProceso,
        TicketStatus::Cerrado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Abierto => "abierto",
            TicketStatus::EnProceso => "en_proceso",
            TicketStatus::Cerrado => "cerrado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Abierto => "Abierto",
            TicketStatus::EnProceso => "En Proceso",
            TicketStatus::Cerrado => "Cerrado",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TickkkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "abierto" | "open" => Ok(TicketStatus::Abierto),
            "en_proceso" | "in_progress" => Ok(TicketStatus::EnProceso),
            "cerrado" | "closed" => Ok(TicketStatus::Cerrado),
            _ => Err(TickkkError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["abierto", "en_proceso", "cerrado"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Baja,
    #[default]
    Media,
    Alta,
    Critica,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 4] = [
        TicketPriority::Baja,
        TicketPriority::Media,
        TicketPriority::Alta,
        TicketPriority::Critica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Baja => "baja",
            TicketPriority::Media => "media",
            TicketPriority::Alta => "alta",
            TicketPriority::Critica => "critica",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketPriority::Baja => "Baja",
            TicketPriority::Media => "Media",
            TicketPriority::Alta => "Alta",
            TicketPriority::Critica => "Crítica",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = TickkkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baja" | "low" => Ok(TicketPriority::Baja),
            "media" | "medium" => Ok(TicketPriority::Media),
            "alta" | "high" => Ok(TicketPriority::Alta),
            "critica" | "crítica" | "critical" => Ok(TicketPriority::Critica),
            _ => Err(TickkkError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["baja", "media", "alta", "critica"];

/// Fixed ticket category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    #[default]
    Tecnico,
    Facturacion,
    Cuenta,
    Producto,
    Consulta,
    Incidencia,
    Solicitud,
    Configuracion,
    Instalacion,
    Red,
    Seguridad,
    Hardware,
    Software,
    Email,
    Rendimiento,
    Otro,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 16] = [
        TicketCategory::Tecnico,
        TicketCategory::Facturacion,
        TicketCategory::Cuenta,
        TicketCategory::Producto,
        TicketCategory::Consulta,
        TicketCategory::Incidencia,
        TicketCategory::Solicitud,
        TicketCategory::Configuracion,
        TicketCategory::Instalacion,
        TicketCategory::Red,
        TicketCategory::Seguridad,
        TicketCategory::Hardware,
        TicketCategory::Software,
        TicketCategory::Email,
        TicketCategory::Rendimiento,
        TicketCategory::Otro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Tecnico => "tecnico",
            TicketCategory::Facturacion => "facturacion",
            TicketCategory::Cuenta => "cuenta",
            TicketCategory::Producto => "producto",
            TicketCategory::Consulta => "consulta",
            TicketCategory::Incidencia => "incidencia",
            TicketCategory::Solicitud => "solicitud",
            TicketCategory::Configuracion => "configuracion",
            TicketCategory::Instalacion => "instalacion",
            TicketCategory::Red => "red",
            TicketCategory::Seguridad => "seguridad",
            TicketCategory::Hardware => "hardware",
            TicketCategory::Software => "software",
            TicketCategory::Email => "email",
            TicketCategory::Rendimiento => "rendimiento",
            TicketCategory::Otro => "otro",
        }
    }

    /// Short label used in ticket lists and filter menus.
    pub fn label(&self) -> &'static str {
        match self {
            TicketCategory::Tecnico => "Técnico",
            TicketCategory::Facturacion => "Facturación",
            TicketCategory::Cuenta => "Cuenta",
            TicketCategory::Producto => "Producto",
            TicketCategory::Consulta => "Consulta",
            TicketCategory::Incidencia => "Incidencia",
            TicketCategory::Solicitud => "Solicitud",
            TicketCategory::Configuracion => "Configuración",
            TicketCategory::Instalacion => "Instalación",
            TicketCategory::Red => "Red",
            TicketCategory::Seguridad => "Seguridad",
            TicketCategory::Hardware => "Hardware",
            TicketCategory::Software => "Software",
            TicketCategory::Email => "Email",
            TicketCategory::Rendimiento => "Rendimiento",
            TicketCategory::Otro => "Otro",
        }
    }

    /// Longer label used by the category report.
    pub fn report_label(&self) -> &'static str {
        match self {
            TicketCategory::Cuenta => "Cuenta y Acceso",
            TicketCategory::Producto => "Producto/Servicio",
            TicketCategory::Consulta => "Consulta General",
            TicketCategory::Incidencia => "Incidencia/Error",
            TicketCategory::Solicitud => "Solicitud de Cambio",
            TicketCategory::Red => "Conectividad/Red",
            other => other.label(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TicketCategory::Tecnico => "🔧",
            TicketCategory::Facturacion => "💳",
            TicketCategory::Cuenta => "👤",
            TicketCategory::Producto => "📦",
            TicketCategory::Consulta => "💬",
            TicketCategory::Incidencia => "⚠️",
            TicketCategory::Solicitud => "📝",
            TicketCategory::Configuracion => "⚙️",
            TicketCategory::Instalacion => "💿",
            TicketCategory::Red => "🌐",
            TicketCategory::Seguridad => "🔒",
            TicketCategory::Hardware => "🖥️",
            TicketCategory::Software => "💻",
            TicketCategory::Email => "📧",
            TicketCategory::Rendimiento => "⚡",
            TicketCategory::Otro => "📋",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketCategory {
    type Err = TickkkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        TicketCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| TickkkError::InvalidCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Agent,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::Agent => "Agente",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for UserRole {
    type Err = TickkkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "agent" => Ok(UserRole::Agent),
            _ => Err(TickkkError::InvalidRole(s.to_string())),
        }
    }
}

pub const VALID_ROLES: &[&str] = &["admin", "agent"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::EnProceso).unwrap(),
            "\"en_proceso\""
        );
        let parsed: TicketStatus = serde_json::from_str("\"cerrado\"").unwrap();
        assert_eq!(parsed, TicketStatus::Cerrado);
    }

    #[test]
    fn test_status_from_str_accepts_english_aliases() {
        assert_eq!(
            "in-progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::EnProceso
        );
        assert_eq!("Closed".parse::<TicketStatus>().unwrap(), TicketStatus::Cerrado);
        assert!("pending".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_priority_default_is_media() {
        assert_eq!(TicketPriority::default(), TicketPriority::Media);
        assert_eq!("crítica".parse::<TicketPriority>().unwrap(), TicketPriority::Critica);
    }

    #[test]
    fn test_category_round_trips_through_slug() {
        for category in TicketCategory::ALL {
            assert_eq!(category.as_str().parse::<TicketCategory>().unwrap(), category);
        }
        assert!("sin_categoria".parse::<TicketCategory>().is_err());
    }

    #[test]
    fn test_category_report_label() {
        assert_eq!(TicketCategory::Red.report_label(), "Conectividad/Red");
        assert_eq!(TicketCategory::Hardware.report_label(), "Hardware");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("root".parse::<UserRole>().is_err());
    }
}
