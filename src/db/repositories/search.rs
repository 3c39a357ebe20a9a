use crate::entities::{prelude::*, searches};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Appends one history row. The stored temperature and description are
    /// the raw upstream values; display rounding happens in the API layer.
    pub async fn record(
        &self,
        city_name: &str,
        country_code: &str,
        temperature: Option<f64>,
        description: &str,
    ) -> Result<()> {
        let active_model = searches::ActiveModel {
            city_name: Set(city_name.to_string()),
            country_code: Set(country_code.to_string()),
            temperature: Set(temperature),
            weather_description: Set(description.to_string()),
            searched_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        Searches::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    /// The `limit` newest rows, returned oldest-first.
    pub async fn recent(&self, limit: u64) -> Result<Vec<searches::Model>> {
        let mut rows = Searches::find()
            .order_by_desc(searches::Column::SearchedAt)
            .order_by_desc(searches::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.reverse();

        Ok(rows)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = Searches::delete_many().exec(&self.conn).await?;

        Ok(result.rows_affected)
    }
}
