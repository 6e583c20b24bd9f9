//! Tests for city, rating, emergency and insurance services

use std::sync::Arc;
use travel_health_application::{validation::*, ApplicationError, Services};
use travel_health_domain::{CityId, HealthScores};
use travel_health_testing::{builders::*, fixtures::*, mocks::*};

fn setup() -> (Arc<InMemoryStore>, Services) {
    let store = InMemoryStore::shared();
    let services = Services::new(store.repositories());
    (store, services)
}

// ============================================================================
// Cities
// ============================================================================

#[tokio::test]
async fn test_create_city_stores_initial_rating() {
    let (store, services) = setup();

    let created = services.cities.create(create_city_request()).await.unwrap();

    assert_eq!(created.general_ratings.len(), 1);
    assert_eq!(created.general_ratings[0].rating, 4.0);
    assert_eq!(created.general_ratings[0].city_id, created.city.id);
    assert_eq!(store.city_count(), 1);
}

#[tokio::test]
async fn test_create_city_missing_fields_is_rejected() {
    let (store, services) = setup();
    let request = CreateCityRequest {
        country: None,
        general_rating: Some(7.5),
        ..create_city_request()
    };

    let err = services.cities.create(request).await.unwrap_err();

    match err {
        ApplicationError::ValidationFailed(message) => {
            assert!(message.contains("country"));
            assert!(message.contains("general_rating"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.city_count(), 0);
}

#[tokio::test]
async fn test_city_detail_carries_averages() {
    let (store, services) = setup();
    let city = CityBuilder::new()
        .with_general_ratings(&[4.0, 5.0, 4.0])
        .insert(&store);

    let detail = services.cities.get(&city.id.to_string()).await.unwrap();

    assert_eq!(detail.average_general_rating, 4.33);
    assert_eq!(detail.average_health_ratings, HealthScores::default());
    assert!(detail.emergency_info.is_none());
}

#[tokio::test]
async fn test_city_list_includes_children() {
    let (store, services) = setup();
    CityBuilder::new().complete().insert(&store);
    CityBuilder::new().insert(&store);

    let cities = services.cities.list().await.unwrap();

    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].hospitals.len(), 2);
    assert!(cities[0].insurance_info.is_some());
    assert!(cities[1].hospitals.is_empty());
}

#[tokio::test]
async fn test_overview_without_ratings_averages_zero() {
    let (store, services) = setup();
    CityBuilder::new().with_general_ratings(&[]).insert(&store);

    let overview = services.cities.overview().await.unwrap();

    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].average_general_rating, 0.0);
}

#[tokio::test]
async fn test_get_unknown_city() {
    let (_store, services) = setup();

    let err = services.cities.get(&CityId::new().to_string()).await.unwrap_err();
    assert_eq!(err, ApplicationError::city_not_found());

    let err = services.cities.get("lisbon").await.unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidInput(_)));
}

#[tokio::test]
async fn test_description_lifecycle() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);
    let id = city.id.to_string();

    services
        .cities
        .set_description(
            &id,
            DescriptionRequest {
                description: Some("Coastal capital".to_string()),
            },
        )
        .await
        .unwrap();
    let description = services.cities.get_description(&id).await.unwrap();
    assert_eq!(description.description.as_deref(), Some("Coastal capital"));

    let cleared = services.cities.clear_description(&id).await.unwrap();
    assert!(cleared.description.is_none());
}

#[tokio::test]
async fn test_set_image_rejects_non_http_url() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    let err = services
        .cities
        .set_image(
            &city.id.to_string(),
            UpdateImageRequest {
                image_url: Some("ftp://images.example.com/a.png".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

// ============================================================================
// Ratings
// ============================================================================

#[tokio::test]
async fn test_general_ratings_summary() {
    let (store, services) = setup();
    let city = CityBuilder::new().with_general_ratings(&[1.0, 2.0]).insert(&store);

    services
        .ratings
        .create_general(general_rating_request(city.id, 2.0))
        .await
        .unwrap();
    let summary = services
        .ratings
        .general_for_city(&city.id.to_string())
        .await
        .unwrap();

    assert_eq!(summary.ratings.len(), 3);
    assert_eq!(summary.average_rating, 1.67);
}

#[tokio::test]
async fn test_general_ratings_for_unrated_city_is_not_found() {
    let (store, services) = setup();
    let city = CityBuilder::new().with_general_ratings(&[]).insert(&store);

    let err = services
        .ratings
        .general_for_city(&city.id.to_string())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    let err = services
        .ratings
        .create_general(general_rating_request(city.id, 5.5))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_health_average_per_field() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    for scores in [[4.0, 2.0, 3.0, 1.0, 5.0], [2.0, 4.0, 5.0, 3.0, 1.0]] {
        services
            .ratings
            .create_health(health_rating_request(city.id, scores))
            .await
            .unwrap();
    }
    let summary = services
        .ratings
        .health_for_city(&city.id.to_string())
        .await
        .unwrap();

    assert_eq!(
        summary.average,
        HealthScores {
            language_support: 3.0,
            water_safety: 3.0,
            food_safety: 4.0,
            health_risk: 2.0,
            air_quality: 3.0,
        }
    );
}

#[tokio::test]
async fn test_update_and_delete_health_rating() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);
    let rating = services
        .ratings
        .create_health(health_rating_request(city.id, [1.0; 5]))
        .await
        .unwrap();
    let id = rating.id.to_string();

    let updated = services
        .ratings
        .update_health(&id, health_scores_input([5.0; 5]))
        .await
        .unwrap();
    assert_eq!(updated.scores.air_quality, 5.0);

    services.ratings.delete_health(&id).await.unwrap();
    let err = services.ratings.delete_health(&id).await.unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_rating_for_unknown_city() {
    let (_store, services) = setup();

    let err = services
        .ratings
        .create_general(general_rating_request(CityId::new(), 3.0))
        .await
        .unwrap_err();

    assert_eq!(err, ApplicationError::city_not_found());
}

// ============================================================================
// Child collections
// ============================================================================

#[tokio::test]
async fn test_hospital_crud() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    let hospital = services
        .hospitals
        .create(create_child_request(city.id, hospital_input("Central")))
        .await
        .unwrap();
    let fetched = services.hospitals.get(&hospital.id.to_string()).await.unwrap();
    assert_eq!(fetched, hospital);

    let listed = services
        .hospitals
        .list_by_city(&city.id.to_string())
        .await
        .unwrap();
    assert_eq!(listed, vec![hospital.clone()]);

    services.hospitals.delete(&hospital.id.to_string()).await.unwrap();
    let err = services
        .hospitals
        .list_by_city(&city.id.to_string())
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_batch_create_and_delete_vaccines() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    let created = services
        .vaccines
        .create_many(ChildBatchRequest {
            city_id: Some(city.id.to_string()),
            items: Some(vec![vaccine_input("Typhoid", 3), vaccine_input("Rabies", 1)]),
        })
        .await
        .unwrap();
    assert_eq!(created.len(), 2);

    let deleted = services
        .vaccines
        .delete_many(DeleteChildrenRequest {
            ids: Some(created.iter().map(|v| v.id.to_string()).collect()),
        })
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let err = services
        .vaccines
        .delete_many(DeleteChildrenRequest {
            ids: Some(vec![created[0].id.to_string()]),
        })
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_create_illness_for_unknown_city() {
    let (_store, services) = setup();

    let err = services
        .illnesses
        .create(create_child_request(CityId::new(), illness_input("Dengue")))
        .await
        .unwrap_err();

    assert_eq!(err, ApplicationError::city_not_found());
}

// ============================================================================
// Emergency and insurance
// ============================================================================

#[tokio::test]
async fn test_emergency_create_update_delete() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    let created = services
        .emergency
        .create(CreateEmergencyRequest {
            ambulance_service: None,
            ..emergency_request(city.id)
        })
        .await
        .unwrap();
    assert!(created.ambulance_service.is_none());

    let updated = services
        .emergency
        .update(
            &created.info.id.to_string(),
            UpdateEmergencyRequest {
                emergency_phone: Some("911".to_string()),
                ambulance_service: Some(ambulance_input()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.info.emergency_phone, "911");
    let ambulance = updated.ambulance_service.unwrap();
    assert_eq!(ambulance.emergency_info_id, created.info.id);

    services
        .emergency
        .delete(&created.info.id.to_string())
        .await
        .unwrap();
    let err = services
        .emergency
        .get_by_city(&city.id.to_string())
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_second_emergency_record_is_rejected() {
    let (store, services) = setup();
    let city = CityBuilder::new().with_emergency().insert(&store);

    let err = services
        .emergency
        .create(emergency_request(city.id))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_insurance_lifecycle() {
    let (store, services) = setup();
    let city = CityBuilder::new().insert(&store);

    let info = services
        .insurance
        .create(insurance_request(city.id))
        .await
        .unwrap();
    assert!(!info.travel_insurance_recommended);

    let updated = services
        .insurance
        .update(
            &info.id.to_string(),
            UpdateInsuranceRequest {
                international_accepted: Some(false),
                travel_insurance_recommended: Some(true),
            },
        )
        .await
        .unwrap();
    assert!(updated.travel_insurance_recommended);
    assert!(!updated.international_accepted);

    let duplicate = services.insurance.create(insurance_request(city.id)).await;
    assert!(duplicate.is_err());

    services.insurance.delete(&info.id.to_string()).await.unwrap();
    assert!(services
        .insurance
        .get_by_city(&city.id.to_string())
        .await
        .is_err());
}
