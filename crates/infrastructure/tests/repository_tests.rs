//! Integration tests for the PostgreSQL repositories
//!
//! These tests require a PostgreSQL database and are marked with #[ignore] for CI.
//! Run with: DATABASE_URL=postgres://... cargo test --test repository_tests -- --ignored

use travel_health_application::{
    ApplicationError, ChildRepositoryPort, CityRepositoryPort, EmergencyRepositoryPort,
    RatingRepositoryPort,
};
use travel_health_common::DatabaseConfig;
use travel_health_domain::{CityId, EmergencyInfoUpdate, GeneralRating, Hospital, Vaccine};
use travel_health_infrastructure::{
    DatabasePool, PgChildRepository, PgCityRepository, PgEmergencyRepository, PgRatingRepository,
};
use travel_health_testing::fixtures::*;

async fn pool() -> DatabasePool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = DatabasePool::connect(&DatabaseConfig {
        url,
        max_connections: 4,
        ..DatabaseConfig::default()
    })
    .await
    .unwrap();
    pool.migrate().await.unwrap();
    pool
}

async fn insert_city(pool: &DatabasePool) -> travel_health_domain::City {
    let repo = PgCityRepository::new(pool.pool().clone());
    let city = create_test_city();
    repo.create_with_rating(&city, &GeneralRating::new(city.id, 4.0))
        .await
        .unwrap();
    city
}

#[tokio::test]
#[ignore]
async fn test_city_aggregate_round_trip() {
    let pool = pool().await;
    let city = insert_city(&pool).await;
    let repo = PgCityRepository::new(pool.pool().clone());

    let aggregate = repo.get_aggregate(city.id).await.unwrap().unwrap();

    assert_eq!(aggregate.city, city);
    assert_eq!(aggregate.general_ratings.len(), 1);
    assert!(aggregate.hospitals.is_empty());
    assert!(aggregate.emergency_info.is_none());
}

#[tokio::test]
#[ignore]
async fn test_replace_hospitals_is_atomic() {
    let pool = pool().await;
    let city = insert_city(&pool).await;
    let repo = PgChildRepository::<Hospital>::new(pool.pool().clone());

    let first = vec![create_test_hospital(city.id), create_test_hospital(city.id)];
    repo.create_many(&first).await.unwrap();

    let replacement = vec![create_test_hospital(city.id)];
    repo.replace_for_city(city.id, &replacement).await.unwrap();

    assert_eq!(repo.list_by_city(city.id).await.unwrap(), replacement);
    assert!(repo.get_by_id(first[0].id).await.unwrap().is_none());
}

fn sorted_ids(hospitals: &[Hospital]) -> Vec<String> {
    let mut ids: Vec<String> = hospitals.iter().map(|h| h.id.to_string()).collect();
    ids.sort();
    ids
}

#[tokio::test]
#[ignore]
async fn test_concurrent_replaces_never_merge() {
    let pool = pool().await;
    let repo = PgChildRepository::<Hospital>::new(pool.pool().clone());

    for _ in 0..20 {
        let city = insert_city(&pool).await;
        repo.create_many(&[create_test_hospital(city.id)]).await.unwrap();

        let first = vec![create_test_hospital(city.id), create_test_hospital(city.id)];
        let second = vec![
            create_test_hospital(city.id),
            create_test_hospital(city.id),
            create_test_hospital(city.id),
        ];

        let (a, b) = tokio::join!(
            repo.replace_for_city(city.id, &first),
            repo.replace_for_city(city.id, &second),
        );
        a.unwrap();
        b.unwrap();

        let stored = sorted_ids(&repo.list_by_city(city.id).await.unwrap());
        assert!(
            stored == sorted_ids(&first) || stored == sorted_ids(&second),
            "stored rows are neither replacement list: {:?}",
            stored
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_failed_insert_rolls_back_delete() {
    let pool = pool().await;
    let city = insert_city(&pool).await;
    let repo = PgChildRepository::<Hospital>::new(pool.pool().clone());

    let original = vec![create_test_hospital(city.id), create_test_hospital(city.id)];
    repo.create_many(&original).await.unwrap();

    // Same id twice: the delete succeeds, then the insert hits the primary key.
    let duplicate = create_test_hospital(city.id);
    let err = repo
        .replace_for_city(city.id, &[duplicate.clone(), duplicate])
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Storage(_)));
    assert_eq!(
        sorted_ids(&repo.list_by_city(city.id).await.unwrap()),
        sorted_ids(&original)
    );
}

#[tokio::test]
#[ignore]
async fn test_replace_for_missing_city_is_not_found() {
    let pool = pool().await;
    let repo = PgChildRepository::<Vaccine>::new(pool.pool().clone());
    let missing = CityId::new();

    let err = repo
        .replace_for_city(missing, &[create_test_vaccine(missing)])
        .await
        .unwrap_err();

    assert_eq!(err, ApplicationError::city_not_found());
}

#[tokio::test]
#[ignore]
async fn test_general_rating_update_and_delete() {
    let pool = pool().await;
    let city = insert_city(&pool).await;
    let repo = PgRatingRepository::new(pool.pool().clone());

    let rating = GeneralRating::new(city.id, 2.5);
    repo.create_general(&rating).await.unwrap();

    let updated = repo.update_general(rating.id, 3.5).await.unwrap().unwrap();
    assert_eq!(updated.rating, 3.5);

    let deleted = repo.delete_general(rating.id).await.unwrap().unwrap();
    assert_eq!(deleted.id, rating.id);
    assert_eq!(repo.list_general(city.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_emergency_update_adds_ambulance_service() {
    let pool = pool().await;
    let city = insert_city(&pool).await;
    let repo = PgEmergencyRepository::new(pool.pool().clone());

    let mut details = create_test_emergency(city.id);
    let ambulance = details.ambulance_service.take().unwrap();
    repo.create(&details).await.unwrap();

    let update = EmergencyInfoUpdate {
        emergency_phone: None,
        ambulance_service: Some(travel_health_domain::AmbulanceServiceDraft {
            available: ambulance.available,
            lowest_fees: ambulance.lowest_fees,
            highest_fees: ambulance.highest_fees,
            response_time: ambulance.response_time,
        }),
    };
    let updated = repo.update(details.info.id, &update).await.unwrap().unwrap();
    assert!(updated.ambulance_service.is_some());

    assert!(repo.delete(details.info.id).await.unwrap());
    assert!(repo.get_by_city(city.id).await.unwrap().is_none());
}
