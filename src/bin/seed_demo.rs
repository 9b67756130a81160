//! Demo data seeder
//!
//! Creates collection points around the depot, their containers, and today's
//! planning with one route per truck.
//!
//! Run with: cargo run --bin seed_demo -- --routes 3 --stops 5

use std::time::Instant;

use chrono::Local;
use sqlx::postgres::PgPoolOptions;

use collecte_server::domain::{CollectionPoint, Container, GeoCoordinate, Reading, Route};
use collecte_server::protocol::DEFAULT_DEPOT;
use collecte_server::{db, RouteStore};

const CONTAINERS_PER_POINT: i64 = 2;
const VOLUME_MAX: i32 = 1000;

fn arg(args: &[String], name: &str, default: usize) -> usize {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let route_count = arg(&args, "--routes", 3);
    let stops_per_route = arg(&args, "--stops", 5);

    let database_url = std::env::var("DATABASE_URL")?;

    println!(
        "Seeding {} routes of {} stops for {}",
        route_count,
        stops_per_route,
        Local::now().date_naive()
    );

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;
    db::apply_schema(&pool).await?;

    let start = Instant::now();

    // Points on a small spiral around the depot
    let mut points = Vec::with_capacity(route_count * stops_per_route);
    for i in 0..route_count * stops_per_route {
        let angle = i as f64 * 0.7;
        let radius = 0.005 + i as f64 * 0.0008;
        let location = GeoCoordinate::new(
            DEFAULT_DEPOT.latitude() + radius * angle.sin(),
            DEFAULT_DEPOT.longitude() + radius * angle.cos(),
        );

        let point_id: i64 = sqlx::query_scalar(
            "INSERT INTO collection_point (latitude, longitude) VALUES ($1, $2) RETURNING id",
        )
        .bind(location.latitude())
        .bind(location.longitude())
        .fetch_one(&pool)
        .await?;

        let mut point = CollectionPoint::new(point_id, location);
        for c in 0..CONTAINERS_PER_POINT {
            let volume = ((i as i64 * 37 + c * 211) % i64::from(VOLUME_MAX)) as i32;
            let reading = Reading::new(volume / 4, volume, VOLUME_MAX)?;

            let container_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO container (point_id, weight, volume, volume_max)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(point_id)
            .bind(reading.weight())
            .bind(reading.volume())
            .bind(reading.volume_max())
            .fetch_one(&pool)
            .await?;

            point = point.with_container(Container::new(container_id, point_id, reading));
        }
        points.push(point);
    }

    let store = RouteStore::new(pool.clone());
    let today = Local::now().date_naive();

    let routes: Vec<Route> = points
        .chunks(stops_per_route.max(1))
        .enumerate()
        .map(|(truck, stops)| {
            stops
                .iter()
                .cloned()
                .fold(Route::new(0, truck as i64 + 1, today), Route::with_stop)
        })
        .collect();

    let planning = store.replace_planning_routes(today, routes).await?;

    let elapsed = start.elapsed();

    println!("\n=== Seed Results ===");
    println!("Collection points: {}", points.len());
    println!("Containers: {}", points.len() as i64 * CONTAINERS_PER_POINT);
    println!("Planning: {} ({} routes)", planning.id, planning.routes.len());
    println!("Time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
