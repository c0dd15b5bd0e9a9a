use async_trait::async_trait;
use sqlx::PgPool;

use courtside_core::repository::{CourtRepository, StoreError, StoreResult};
use courtside_core::{Court, Surface};

use crate::backend_error;

pub struct PgCourtRepository {
    pool: PgPool,
}

impl PgCourtRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CourtRow {
    id: i64,
    name: String,
    surface: String,
    location: String,
}

impl TryFrom<CourtRow> for Court {
    type Error = StoreError;

    fn try_from(row: CourtRow) -> Result<Self, Self::Error> {
        let surface: Surface = row.surface.parse().map_err(StoreError::Backend)?;
        Ok(Court {
            id: row.id,
            name: row.name,
            surface,
            location: row.location,
        })
    }
}

#[async_trait]
impl CourtRepository for PgCourtRepository {
    async fn list_courts(&self) -> StoreResult<Vec<Court>> {
        let rows = sqlx::query_as::<_, CourtRow>(
            "SELECT id, name, surface, location FROM courts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        rows.into_iter().map(Court::try_from).collect()
    }

    async fn get_court(&self, id: i64) -> StoreResult<Option<Court>> {
        let row = sqlx::query_as::<_, CourtRow>(
            "SELECT id, name, surface, location FROM courts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        row.map(Court::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = CourtRow {
            id: 2,
            name: "Court 2".to_string(),
            surface: "synthetic".to_string(),
            location: "Sector B".to_string(),
        };
        let court = Court::try_from(row).unwrap();
        assert_eq!(court.surface, Surface::Synthetic);
        assert_eq!(court.location, "Sector B");
    }

    #[test]
    fn test_unknown_surface_is_backend_error() {
        let row = CourtRow {
            id: 9,
            name: "Court 9".to_string(),
            surface: "carpet".to_string(),
            location: "Sector Z".to_string(),
        };
        assert!(matches!(Court::try_from(row), Err(StoreError::Backend(_))));
    }
}
