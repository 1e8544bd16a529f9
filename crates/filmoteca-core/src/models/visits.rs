use serde::{Deserialize, Serialize};

/// Aggregate visit counters from the `get_visitas_dashboard` procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitsSummary {
    pub visitas_activas: i64,
    pub visitas_diarias: i64,
    pub visitas_7_dias: i64,
    pub visitas_mes: i64,
    pub visitas_3_meses: i64,
    pub visitas_totales: i64,
}

/// One day of the visits series, split by device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVisits {
    pub date: String,
    pub mobile: i64,
    pub desktop: i64,
}

/// Full dashboard payload: summary counters plus the daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitsDashboard {
    #[serde(default)]
    pub resumen: Option<VisitsSummary>,
    #[serde(default)]
    pub diario: Vec<DailyVisits>,
}
