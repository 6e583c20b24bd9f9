//! In-memory implementation of every repository port.
//!
//! All tables live behind one lock so multi-table writes (city with its
//! first rating, emergency info with its ambulance service, replace-all)
//! are applied as a unit, mirroring the transactions of the PostgreSQL
//! repositories. Rows keep insertion order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use travel_health_application::{
    ApplicationError, ChildRepositoryPort, CityRepositoryPort, EmergencyRepositoryPort,
    InsuranceRepositoryPort, RatingRepositoryPort, RepositorySet,
};
use travel_health_domain::{
    City, CityAggregate, CityChild, CityId, CommonIllness, EmergencyDetails, EmergencyInfoId,
    EmergencyInfoUpdate, GeneralRating, GeneralRatingId, HealthRating, HealthRatingId,
    HealthScores, Hospital, InsuranceDraft, InsuranceInfo, InsuranceInfoId, Vaccine,
};

type Result<T> = std::result::Result<T, ApplicationError>;

#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub cities: Vec<City>,
    pub general_ratings: Vec<GeneralRating>,
    pub health_ratings: Vec<HealthRating>,
    pub hospitals: Vec<Hospital>,
    pub vaccines: Vec<Vaccine>,
    pub illnesses: Vec<CommonIllness>,
    pub emergency: Vec<EmergencyDetails>,
    pub insurance: Vec<InsuranceInfo>,
}

impl Tables {
    fn has_city(&self, id: CityId) -> bool {
        self.cities.iter().any(|city| city.id == id)
    }

    fn require_city(&self, id: CityId) -> Result<()> {
        if self.has_city(id) {
            Ok(())
        } else {
            Err(ApplicationError::city_not_found())
        }
    }

    fn aggregate(&self, city: &City) -> CityAggregate {
        CityAggregate {
            city: city.clone(),
            general_ratings: of_city(&self.general_ratings, city.id, |r| r.city_id),
            health_ratings: of_city(&self.health_ratings, city.id, |r| r.city_id),
            hospitals: of_city(&self.hospitals, city.id, |h| h.city_id),
            vaccines: of_city(&self.vaccines, city.id, |v| v.city_id),
            common_illnesses: of_city(&self.illnesses, city.id, |i| i.city_id),
            emergency_info: self
                .emergency
                .iter()
                .find(|e| e.info.city_id == city.id)
                .cloned(),
            insurance_info: self
                .insurance
                .iter()
                .find(|i| i.city_id == city.id)
                .cloned(),
        }
    }
}

fn of_city<T: Clone>(rows: &[T], city_id: CityId, key: impl Fn(&T) -> CityId) -> Vec<T> {
    rows.iter().filter(|row| key(row) == city_id).cloned().collect()
}

/// Access to the table holding one child collection
pub trait MemoryChild: CityChild {
    fn table(tables: &Tables) -> &Vec<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self>;
}

impl MemoryChild for Hospital {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.hospitals
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.hospitals
    }
}

impl MemoryChild for Vaccine {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.vaccines
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.vaccines
    }
}

impl MemoryChild for CommonIllness {
    fn table(tables: &Tables) -> &Vec<Self> {
        &tables.illnesses
    }
    fn table_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.illnesses
    }
}

/// In-memory store for tests and local experiments
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Ports backed by this store
    pub fn repositories(self: &Arc<Self>) -> RepositorySet {
        RepositorySet {
            cities: self.clone(),
            ratings: self.clone(),
            hospitals: self.clone(),
            vaccines: self.clone(),
            illnesses: self.clone(),
            emergency: self.clone(),
            insurance: self.clone(),
        }
    }

    /// Make every following write fail with a storage error, leaving data untouched.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of all tables
    pub fn snapshot(&self) -> Tables {
        self.tables.read().clone()
    }

    /// Insert rows directly, bypassing validation
    pub fn seed(&self, apply: impl FnOnce(&mut Tables)) {
        apply(&mut self.tables.write());
    }

    pub fn city_count(&self) -> usize {
        self.tables.read().cities.len()
    }

    pub fn hospitals_of(&self, city_id: CityId) -> Vec<Hospital> {
        of_city(&self.tables.read().hospitals, city_id, |h| h.city_id)
    }

    pub fn vaccines_of(&self, city_id: CityId) -> Vec<Vaccine> {
        of_city(&self.tables.read().vaccines, city_id, |v| v.city_id)
    }

    pub fn illnesses_of(&self, city_id: CityId) -> Vec<CommonIllness> {
        of_city(&self.tables.read().illnesses, city_id, |i| i.city_id)
    }

    pub fn clear(&self) {
        *self.tables.write() = Tables::default();
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(ApplicationError::Storage(
                "simulated storage failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Cities
// ============================================================================

#[async_trait]
impl CityRepositoryPort for InMemoryStore {
    async fn create_with_rating(&self, city: &City, rating: &GeneralRating) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.cities.push(city.clone());
        tables.general_ratings.push(rating.clone());
        Ok(())
    }

    async fn get(&self, id: CityId) -> Result<Option<City>> {
        Ok(self
            .tables
            .read()
            .cities
            .iter()
            .find(|city| city.id == id)
            .cloned())
    }

    async fn list_aggregates(&self) -> Result<Vec<CityAggregate>> {
        let tables = self.tables.read();
        Ok(tables.cities.iter().map(|city| tables.aggregate(city)).collect())
    }

    async fn get_aggregate(&self, id: CityId) -> Result<Option<CityAggregate>> {
        let tables = self.tables.read();
        Ok(tables
            .cities
            .iter()
            .find(|city| city.id == id)
            .map(|city| tables.aggregate(city)))
    }

    async fn list_with_general_ratings(&self) -> Result<Vec<(City, Vec<GeneralRating>)>> {
        let tables = self.tables.read();
        Ok(tables
            .cities
            .iter()
            .map(|city| {
                let ratings = of_city(&tables.general_ratings, city.id, |r| r.city_id);
                (city.clone(), ratings)
            })
            .collect())
    }

    async fn set_image_url(&self, id: CityId, image_url: &str) -> Result<Option<City>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        Ok(tables.cities.iter_mut().find(|city| city.id == id).map(|city| {
            city.image_url = Some(image_url.to_string());
            city.clone()
        }))
    }

    async fn set_description(&self, id: CityId, description: Option<&str>) -> Result<Option<City>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        Ok(tables.cities.iter_mut().find(|city| city.id == id).map(|city| {
            city.description = description.map(str::to_string);
            city.clone()
        }))
    }
}

// ============================================================================
// Ratings
// ============================================================================

#[async_trait]
impl RatingRepositoryPort for InMemoryStore {
    async fn create_general(&self, rating: &GeneralRating) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.require_city(rating.city_id)?;
        tables.general_ratings.push(rating.clone());
        Ok(())
    }

    async fn list_general(&self, city_id: CityId) -> Result<Vec<GeneralRating>> {
        Ok(of_city(&self.tables.read().general_ratings, city_id, |r| r.city_id))
    }

    async fn update_general(&self, id: GeneralRatingId, rating: f64) -> Result<Option<GeneralRating>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        Ok(tables
            .general_ratings
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| {
                r.rating = rating;
                r.clone()
            }))
    }

    async fn delete_general(&self, id: GeneralRatingId) -> Result<Option<GeneralRating>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        let position = tables.general_ratings.iter().position(|r| r.id == id);
        Ok(position.map(|i| tables.general_ratings.remove(i)))
    }

    async fn create_health(&self, rating: &HealthRating) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.require_city(rating.city_id)?;
        tables.health_ratings.push(rating.clone());
        Ok(())
    }

    async fn list_health(&self, city_id: CityId) -> Result<Vec<HealthRating>> {
        Ok(of_city(&self.tables.read().health_ratings, city_id, |r| r.city_id))
    }

    async fn update_health(
        &self,
        id: HealthRatingId,
        scores: HealthScores,
    ) -> Result<Option<HealthRating>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        Ok(tables
            .health_ratings
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| {
                r.scores = scores;
                r.clone()
            }))
    }

    async fn delete_health(&self, id: HealthRatingId) -> Result<Option<HealthRating>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        let position = tables.health_ratings.iter().position(|r| r.id == id);
        Ok(position.map(|i| tables.health_ratings.remove(i)))
    }
}

// ============================================================================
// Child collections
// ============================================================================

#[async_trait]
impl<C: MemoryChild> ChildRepositoryPort<C> for InMemoryStore {
    async fn create(&self, child: &C) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.require_city(child.city_id())?;
        C::table_mut(&mut tables).push(child.clone());
        Ok(())
    }

    async fn create_many(&self, children: &[C]) -> Result<u64> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        for child in children {
            tables.require_city(child.city_id())?;
        }
        C::table_mut(&mut tables).extend_from_slice(children);
        Ok(children.len() as u64)
    }

    async fn get_by_id(&self, id: C::Id) -> Result<Option<C>> {
        let tables = self.tables.read();
        Ok(C::table(&tables).iter().find(|c| c.id() == id).cloned())
    }

    async fn list_by_city(&self, city_id: CityId) -> Result<Vec<C>> {
        let tables = self.tables.read();
        Ok(of_city(C::table(&tables), city_id, |c| c.city_id()))
    }

    async fn delete(&self, id: C::Id) -> Result<Option<C>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        let table = C::table_mut(&mut tables);
        let position = table.iter().position(|c| c.id() == id);
        Ok(position.map(|i| table.remove(i)))
    }

    async fn delete_many(&self, ids: &[C::Id]) -> Result<u64> {
        self.check_writable()?;
        let wanted: HashSet<C::Id> = ids.iter().copied().collect();
        let mut tables = self.tables.write();
        let table = C::table_mut(&mut tables);
        let before = table.len();
        table.retain(|c| !wanted.contains(&c.id()));
        Ok((before - table.len()) as u64)
    }

    async fn replace_for_city(&self, city_id: CityId, children: &[C]) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.require_city(city_id)?;

        let table = C::table_mut(&mut tables);
        let mut next: Vec<C> = table
            .iter()
            .filter(|c| c.city_id() != city_id)
            .cloned()
            .collect();
        next.extend_from_slice(children);
        *table = next;
        Ok(())
    }
}

// ============================================================================
// Emergency
// ============================================================================

#[async_trait]
impl EmergencyRepositoryPort for InMemoryStore {
    async fn create(&self, details: &EmergencyDetails) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.require_city(details.info.city_id)?;
        tables.emergency.push(details.clone());
        Ok(())
    }

    async fn get_by_city(&self, city_id: CityId) -> Result<Option<EmergencyDetails>> {
        Ok(self
            .tables
            .read()
            .emergency
            .iter()
            .find(|e| e.info.city_id == city_id)
            .cloned())
    }

    async fn update(
        &self,
        id: EmergencyInfoId,
        update: &EmergencyInfoUpdate,
    ) -> Result<Option<EmergencyDetails>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        Ok(tables
            .emergency
            .iter_mut()
            .find(|e| e.info.id == id)
            .map(|details| {
                update.clone().apply_to(details);
                details.clone()
            }))
    }

    async fn delete(&self, id: EmergencyInfoId) -> Result<bool> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        let before = tables.emergency.len();
        tables.emergency.retain(|e| e.info.id != id);
        Ok(tables.emergency.len() != before)
    }
}

// ============================================================================
// Insurance
// ============================================================================

#[async_trait]
impl InsuranceRepositoryPort for InMemoryStore {
    async fn create(&self, info: &InsuranceInfo) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        tables.require_city(info.city_id)?;
        tables.insurance.push(info.clone());
        Ok(())
    }

    async fn get_by_city(&self, city_id: CityId) -> Result<Option<InsuranceInfo>> {
        Ok(self
            .tables
            .read()
            .insurance
            .iter()
            .find(|i| i.city_id == city_id)
            .cloned())
    }

    async fn update(
        &self,
        id: InsuranceInfoId,
        draft: InsuranceDraft,
    ) -> Result<Option<InsuranceInfo>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        Ok(tables.insurance.iter_mut().find(|i| i.id == id).map(|info| {
            info.apply(draft);
            info.clone()
        }))
    }

    async fn delete(&self, id: InsuranceInfoId) -> Result<Option<InsuranceInfo>> {
        self.check_writable()?;
        let mut tables = self.tables.write();
        let position = tables.insurance.iter().position(|i| i.id == id);
        Ok(position.map(|i| tables.insurance.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{create_test_city, create_test_hospital};

    #[tokio::test]
    async fn test_replace_swaps_only_the_city_rows() {
        let store = InMemoryStore::shared();
        let (a, b) = (create_test_city(), create_test_city());
        store.seed(|t| {
            t.cities.extend([a.clone(), b.clone()]);
            t.hospitals.push(create_test_hospital(a.id));
            t.hospitals.push(create_test_hospital(b.id));
        });

        let replacement = vec![create_test_hospital(a.id), create_test_hospital(a.id)];
        ChildRepositoryPort::<Hospital>::replace_for_city(&*store, a.id, &replacement)
            .await
            .unwrap();

        assert_eq!(store.hospitals_of(a.id), replacement);
        assert_eq!(store.hospitals_of(b.id).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_tables_untouched() {
        let store = InMemoryStore::shared();
        let city = create_test_city();
        let existing = create_test_hospital(city.id);
        store.seed(|t| {
            t.cities.push(city.clone());
            t.hospitals.push(existing.clone());
        });

        store.fail_writes(true);
        let result = ChildRepositoryPort::<Hospital>::replace_for_city(
            &*store,
            city.id,
            &[create_test_hospital(city.id)],
        )
        .await;

        assert!(matches!(result, Err(ApplicationError::Storage(_))));
        assert_eq!(store.hospitals_of(city.id), vec![existing]);
    }

    #[tokio::test]
    async fn test_child_insert_requires_city() {
        let store = InMemoryStore::new();
        let orphan = create_test_hospital(CityId::new());
        let result = ChildRepositoryPort::<Hospital>::create(&store, &orphan).await;
        assert_eq!(result, Err(ApplicationError::city_not_found()));
    }
}
