//! Collection point catalog
//!
//! Loads collection points together with the containers located there.

use std::collections::HashMap;

use sqlx::{Postgres, Transaction};

use crate::domain::{CollectionPoint, Container, GeoCoordinate, PointId, Reading};

use super::StoreError;

/// (id, latitude, longitude)
type PointRow = (i64, f64, f64);

/// (id, point_id, weight, volume, volume_max)
type ContainerRow = (i64, i64, i32, i32, i32);

/// Load every collection point, ordered by id
pub(crate) async fn fetch_all_points(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<Vec<CollectionPoint>, StoreError> {
    let rows: Vec<PointRow> = sqlx::query_as(
        r#"
        SELECT id, latitude, longitude
        FROM collection_point
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&mut **tx)
    .await?;

    attach_containers(tx, rows).await
}

/// Load the given collection points, keyed by id
pub(crate) async fn fetch_points(
    tx: &mut Transaction<'_, Postgres>,
    ids: &[PointId],
) -> Result<HashMap<PointId, CollectionPoint>, StoreError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<PointRow> = sqlx::query_as(
        r#"
        SELECT id, latitude, longitude
        FROM collection_point
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(&mut **tx)
    .await?;

    let points = attach_containers(tx, rows).await?;
    Ok(points.into_iter().map(|p| (p.id, p)).collect())
}

async fn attach_containers(
    tx: &mut Transaction<'_, Postgres>,
    rows: Vec<PointRow>,
) -> Result<Vec<CollectionPoint>, StoreError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let point_ids: Vec<PointId> = rows.iter().map(|(id, _, _)| *id).collect();

    let container_rows: Vec<ContainerRow> = sqlx::query_as(
        r#"
        SELECT id, point_id, weight, volume, volume_max
        FROM container
        WHERE point_id = ANY($1)
        ORDER BY point_id ASC, id ASC
        "#,
    )
    .bind(&point_ids)
    .fetch_all(&mut **tx)
    .await?;

    let mut containers: HashMap<PointId, Vec<Container>> = HashMap::new();
    for (id, point_id, weight, volume, volume_max) in container_rows {
        let reading = Reading::new(weight, volume, volume_max)
            .map_err(|e| StoreError::InvalidAggregate(format!("container {}: {}", id, e)))?;
        containers
            .entry(point_id)
            .or_default()
            .push(Container::new(id, point_id, reading));
    }

    Ok(rows
        .into_iter()
        .map(|(id, latitude, longitude)| CollectionPoint {
            id,
            location: GeoCoordinate::new(latitude, longitude),
            containers: containers.remove(&id).unwrap_or_default(),
        })
        .collect())
}
