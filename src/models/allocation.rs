// src/models/allocation.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "etat_materiel", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EtatMateriel {
    #[default]
    Neuf,
    Deteriore,
}

impl EtatMateriel {
    pub fn label(&self) -> &'static str {
        match self {
            EtatMateriel::Neuf => "NEUF",
            EtatMateriel::Deteriore => "DÉTÉRIORÉ",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationMateriel {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub date: NaiveDate,
    pub dossier_id: Uuid,
    pub equipement_id: Uuid,
    #[schema(example = 1)]
    pub nombre: i32,
    pub description: Option<String>,
    /// Nota livre sobre o estado constatado na entrega.
    pub constatation: Option<String>,
    pub etat: EtatMateriel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha usada na ficha PDF (com o nome do equipamento).
#[derive(Debug, Clone, FromRow)]
pub struct AllocationLigne {
    pub equipement_nom: String,
    pub nombre: i32,
    pub etat: EtatMateriel,
    pub date: NaiveDate,
    pub constatation: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllocationPayload {
    // Ausente: hoje
    pub date: Option<NaiveDate>,
    pub dossier_id: Uuid,
    pub equipement_id: Uuid,
    #[validate(range(min = 1, message = "Le nombre doit être au moins 1."))]
    #[serde(default = "default_nombre")]
    pub nombre: i32,
    pub description: Option<String>,
    pub constatation: Option<String>,
    #[serde(default)]
    pub etat: EtatMateriel,
}

fn default_nombre() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllocationPayload {
    pub date: Option<NaiveDate>,
    pub dossier_id: Option<Uuid>,
    pub equipement_id: Option<Uuid>,
    #[validate(range(min = 1, message = "Le nombre doit être au moins 1."))]
    pub nombre: Option<i32>,
    pub description: Option<String>,
    pub constatation: Option<String>,
    pub etat: Option<EtatMateriel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStats {
    pub total_items: i64,
    pub neuf_items: i64,
    pub deteriore_items: i64,
    pub total_allocations: i64,
    pub last_allocation_date: Option<NaiveDate>,
}

impl AllocationStats {
    pub fn from_allocations(allocations: &[AllocationMateriel]) -> Self {
        allocations.iter().fold(AllocationStats::default(), |mut acc, a| {
            let n = i64::from(a.nombre);
            acc.total_items += n;
            match a.etat {
                EtatMateriel::Neuf => acc.neuf_items += n,
                EtatMateriel::Deteriore => acc.deteriore_items += n,
            }
            acc.total_allocations += 1;
            acc.last_allocation_date = acc.last_allocation_date.max(Some(a.date));
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(nombre: i32, etat: EtatMateriel, day: u32) -> AllocationMateriel {
        AllocationMateriel {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            dossier_id: Uuid::nil(),
            equipement_id: Uuid::new_v4(),
            nombre,
            description: None,
            constatation: None,
            etat,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stats_sum_items_by_state() {
        let stats = AllocationStats::from_allocations(&[
            allocation(2, EtatMateriel::Neuf, 3),
            allocation(1, EtatMateriel::Deteriore, 10),
            allocation(1, EtatMateriel::Neuf, 7),
        ]);
        assert_eq!(stats.total_items, 4);
        assert_eq!(stats.neuf_items, 3);
        assert_eq!(stats.deteriore_items, 1);
        assert_eq!(stats.total_allocations, 3);
        assert_eq!(stats.last_allocation_date, NaiveDate::from_ymd_opt(2025, 1, 10));
    }

    #[test]
    fn stats_of_empty_dossier() {
        let stats = AllocationStats::from_allocations(&[]);
        assert_eq!(stats, AllocationStats::default());
        assert!(stats.last_allocation_date.is_none());
    }
}
