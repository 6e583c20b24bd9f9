//! Tests for replacing a city's child collections
//!
//! Covers whole-collection replacement, validation before any mutation,
//! and rollback when storage fails.

use travel_health_application::{validation::*, ApplicationError, Services};
use travel_health_domain::{CityId, Hospital, Vaccine};
use travel_health_testing::{builders::*, fixtures::*, mocks::*};

fn services(store: &std::sync::Arc<InMemoryStore>) -> Services {
    Services::new(store.repositories())
}

#[tokio::test]
async fn test_replace_hospitals_swaps_whole_collection() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().with_hospitals(2).insert(&store);
    let before = store.hospitals_of(city.id);

    let replaced = services
        .hospitals
        .replace_all(&city.id.to_string(), replace_request(vec![hospital_input("St Mary")]))
        .await
        .unwrap();

    let after = store.hospitals_of(city.id);
    assert_eq!(after, replaced);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "St Mary");
    assert!(before.iter().all(|old| old.id != after[0].id));
}

#[tokio::test]
async fn test_second_replace_wins() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().insert(&store);
    let city_id = city.id.to_string();

    services
        .vaccines
        .replace_all(&city_id, replace_request(vec![vaccine_input("Typhoid", 3)]))
        .await
        .unwrap();
    services
        .vaccines
        .replace_all(
            &city_id,
            replace_request(vec![vaccine_input("Hepatitis A", 4), vaccine_input("Rabies", 2)]),
        )
        .await
        .unwrap();

    let names: Vec<String> = store
        .vaccines_of(city.id)
        .into_iter()
        .map(|v| v.vaccine)
        .collect();
    assert_eq!(names, vec!["Hepatitis A", "Rabies"]);
}

#[tokio::test]
async fn test_empty_replacement_list_is_rejected() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().with_illnesses(3).insert(&store);

    let err = services
        .illnesses
        .replace_all(&city.id.to_string(), replace_request(Vec::<IllnessInput>::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
    assert_eq!(store.illnesses_of(city.id).len(), 3);
}

#[tokio::test]
async fn test_invalid_element_rejects_whole_batch() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().with_vaccines(2).insert(&store);
    let before = store.vaccines_of(city.id);

    let missing_name = VaccineInput {
        vaccine: None,
        importance: Some(2),
    };
    let err = services
        .vaccines
        .replace_all(
            &city.id.to_string(),
            replace_request(vec![vaccine_input("Cholera", 1), missing_name]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
    assert_eq!(store.vaccines_of(city.id), before);
}

#[tokio::test]
async fn test_replace_from_json_without_vaccine_name_is_rejected() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().with_vaccines(1).insert(&store);
    let before = store.vaccines_of(city.id);

    let request: ReplaceChildrenRequest<VaccineInput> =
        serde_json::from_str(r#"{"vaccines": [{"importance": 2}]}"#).unwrap();
    let err = services
        .vaccines
        .replace_all(&city.id.to_string(), request)
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 400);
    assert_eq!(store.vaccines_of(city.id), before);
}

#[tokio::test]
async fn test_storage_failure_keeps_previous_collection() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().with_hospitals(2).insert(&store);
    let before = store.hospitals_of(city.id);

    store.fail_writes(true);
    let err = services
        .hospitals
        .replace_all(&city.id.to_string(), replace_request(vec![hospital_input("New")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Storage(_)));
    assert_eq!(store.hospitals_of(city.id), before);
}

#[tokio::test]
async fn test_replace_leaves_other_cities_alone() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let target = CityBuilder::new().with_hospitals(1).insert(&store);
    let other = CityBuilder::new().with_hospitals(3).insert(&store);
    let untouched: Vec<Hospital> = store.hospitals_of(other.id);

    services
        .hospitals
        .replace_all(&target.id.to_string(), replace_request(vec![hospital_input("A")]))
        .await
        .unwrap();

    assert_eq!(store.hospitals_of(other.id), untouched);
}

#[tokio::test]
async fn test_replace_unknown_city_is_not_found() {
    let store = InMemoryStore::shared();
    let services = services(&store);

    let err = services
        .vaccines
        .replace_all(
            &CityId::new().to_string(),
            replace_request(vec![vaccine_input("Yellow fever", 5)]),
        )
        .await
        .unwrap_err();

    assert_eq!(err, ApplicationError::city_not_found());
}

#[tokio::test]
async fn test_replace_malformed_city_id_is_invalid_input() {
    let store = InMemoryStore::shared();
    let services = services(&store);

    let err = services
        .vaccines
        .replace_all("not-a-uuid", replace_request(vec![vaccine_input("Typhoid", 3)]))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidInput(_)));
}

#[tokio::test]
async fn test_replaced_rows_get_fresh_ids() {
    let store = InMemoryStore::shared();
    let services = services(&store);
    let city = CityBuilder::new().insert(&store);
    let city_id = city.id.to_string();
    let items = || replace_request(vec![vaccine_input("Typhoid", 3)]);

    let first: Vec<Vaccine> = services.vaccines.replace_all(&city_id, items()).await.unwrap();
    let second: Vec<Vaccine> = services.vaccines.replace_all(&city_id, items()).await.unwrap();

    assert_ne!(first[0].id, second[0].id);
    assert_eq!(first[0].vaccine, second[0].vaccine);
}
