use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of chart kinds a panel can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Table overview of the bound database
    #[default]
    Default,
    Capacity,
    SystemCosts,
    ProductionPrices,
    StoragePrices,
    TransportPrices,
    ResidualLoad,
    ImportExport,
    /// Free-form SQL explorer; the panel carries its own statement
    Sql,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown chart kind: {0}")]
pub struct UnknownChartKind(pub String);

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::Default,
        ChartKind::Capacity,
        ChartKind::SystemCosts,
        ChartKind::ProductionPrices,
        ChartKind::StoragePrices,
        ChartKind::TransportPrices,
        ChartKind::ResidualLoad,
        ChartKind::ImportExport,
        ChartKind::Sql,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Capacity => "capacity",
            Self::SystemCosts => "system_costs",
            Self::ProductionPrices => "production_prices",
            Self::StoragePrices => "storage_prices",
            Self::TransportPrices => "transport_prices",
            Self::ResidualLoad => "residual_load",
            Self::ImportExport => "import_export",
            Self::Sql => "sql",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Tables",
            Self::Capacity => "Capacity",
            Self::SystemCosts => "System Costs",
            Self::ProductionPrices => "Production Prices",
            Self::StoragePrices => "Storage Prices",
            Self::TransportPrices => "Transport Prices",
            Self::ResidualLoad => "Residual Load",
            Self::ImportExport => "Import/Export",
            Self::Sql => "SQL Explorer",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "default" | "tables" => Ok(Self::Default),
            "capacity" => Ok(Self::Capacity),
            "system_costs" | "costs" => Ok(Self::SystemCosts),
            "production_prices" | "production" => Ok(Self::ProductionPrices),
            "storage_prices" | "storage" => Ok(Self::StoragePrices),
            "transport_prices" | "transport" => Ok(Self::TransportPrices),
            "residual_load" | "residual" => Ok(Self::ResidualLoad),
            "import_export" | "trade" => Ok(Self::ImportExport),
            "sql" | "database" => Ok(Self::Sql),
            _ => Err(UnknownChartKind(s.trim().to_string())),
        }
    }
}
