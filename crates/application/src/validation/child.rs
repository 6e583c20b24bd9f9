//! Validation for hospitals, vaccines and common illnesses
//!
//! The three collections share request envelopes (single create, batch
//! create, replace-all, delete by ids) parameterized by the element input.

use super::{
    parse_id, required, validate_each, Validatable, ValidationResult, ValidationRules,
    ValidatorExt,
};
use crate::ApplicationResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use travel_health_domain::{
    CityChild, CityId, CommonIllness, Hospital, HospitalDraft, IllnessDraft, Vaccine,
    VaccineDraft,
};
use validator::Validate;

/// One element of a child collection, as received from a client.
pub trait ChildInput: Validatable + DeserializeOwned + Send + Sync + 'static {
    type Child: CityChild;

    /// Convert into a draft. Only called once `validate_all` has passed.
    fn into_draft(self) -> ApplicationResult<<Self::Child as CityChild>::Draft>;
}

// ============================================================================
// Element inputs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HospitalInput {
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub address: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub contact: Option<String>,

    #[serde(rename = "open24Hours")]
    #[validate(required(message = "is required"))]
    pub open_24_hours: Option<bool>,
}

impl Validatable for HospitalInput {
    fn validate_all(&self) -> ValidationResult {
        self.to_validation_result()
    }
}

impl ChildInput for HospitalInput {
    type Child = Hospital;

    fn into_draft(self) -> ApplicationResult<HospitalDraft> {
        Ok(HospitalDraft {
            name: required(self.name, "name")?,
            address: required(self.address, "address")?,
            contact: required(self.contact, "contact")?,
            open_24_hours: required(self.open_24_hours, "open24Hours")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VaccineInput {
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub vaccine: Option<String>,

    #[validate(required(message = "is required"))]
    pub importance: Option<i32>,
}

impl Validatable for VaccineInput {
    fn validate_all(&self) -> ValidationResult {
        self.to_validation_result()
    }
}

impl ChildInput for VaccineInput {
    type Child = Vaccine;

    fn into_draft(self) -> ApplicationResult<VaccineDraft> {
        Ok(VaccineDraft {
            vaccine: required(self.vaccine, "vaccine")?,
            importance: required(self.importance, "importance")?,
        })
    }
}

/// A common illness given either as `{"illness": "..."}` or a bare string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IllnessInput {
    Name(String),
    Fields { illness: Option<String> },
}

impl IllnessInput {
    fn illness(&self) -> Option<&str> {
        match self {
            IllnessInput::Name(name) => Some(name),
            IllnessInput::Fields { illness } => illness.as_deref(),
        }
    }
}

impl Validatable for IllnessInput {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        match self.illness() {
            None => result.add_field_error("illness", "is required"),
            Some(name) if !travel_health_common::is_present(name) => {
                result.add_field_error("illness", "must not be empty")
            }
            Some(_) => {}
        }
        result
    }
}

impl ChildInput for IllnessInput {
    type Child = CommonIllness;

    fn into_draft(self) -> ApplicationResult<IllnessDraft> {
        let illness = match self {
            IllnessInput::Name(name) => name,
            IllnessInput::Fields { illness } => required(illness, "illness")?,
        };
        Ok(IllnessDraft { illness })
    }
}

// ============================================================================
// Request envelopes
// ============================================================================

/// Create a single child row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest<I> {
    pub city_id: Option<String>,
    #[serde(flatten)]
    pub item: I,
}

impl<I: ChildInput> Validatable for CreateChildRequest<I> {
    fn validate_all(&self) -> ValidationResult {
        let mut result = validate_city_id(self.city_id.as_deref());
        result.merge(self.item.validate_all());
        result
    }
}

/// Create several child rows for one city
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildBatchRequest<I> {
    pub city_id: Option<String>,
    #[serde(alias = "hospitals", alias = "vaccines", alias = "illnesses")]
    pub items: Option<Vec<I>>,
}

impl<I: ChildInput> Validatable for ChildBatchRequest<I> {
    fn validate_all(&self) -> ValidationResult {
        let mut result = validate_city_id(self.city_id.as_deref());
        result.merge(validate_items::<I>(self.items.as_deref()));
        result
    }
}

/// Full replacement set for a city's collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceChildrenRequest<I> {
    #[serde(alias = "hospitals", alias = "vaccines", alias = "illnesses")]
    pub items: Option<Vec<I>>,
}

impl<I: ChildInput> Validatable for ReplaceChildrenRequest<I> {
    fn validate_all(&self) -> ValidationResult {
        validate_items::<I>(self.items.as_deref())
    }
}

/// Delete several child rows by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteChildrenRequest {
    #[serde(alias = "hospitalIds", alias = "vaccineIds", alias = "illnessIds")]
    pub ids: Option<Vec<String>>,
}

impl DeleteChildrenRequest {
    /// Validate and parse the ids as identifiers of `C`.
    pub fn into_ids<C: CityChild>(self) -> ApplicationResult<Vec<C::Id>> {
        let ids = self.ids.unwrap_or_default();

        let mut result =
            ValidationRules::validate_list_size(&ids, "ids", Some(1), None);
        for (i, id) in ids.iter().enumerate() {
            result.merge(ValidationRules::validate_id::<C::Id>(id, &format!("ids[{}]", i)));
        }
        result.ensure_valid()?;

        ids.iter().map(|id| parse_id(id, C::NAME)).collect()
    }
}

fn validate_city_id(city_id: Option<&str>) -> ValidationResult {
    match city_id {
        Some(id) => ValidationRules::validate_id::<CityId>(id, "cityId"),
        None => {
            let mut result = ValidationResult::success();
            result.add_field_error("cityId", "is required");
            result
        }
    }
}

fn validate_items<I: ChildInput>(items: Option<&[I]>) -> ValidationResult {
    let field = <I::Child as CityChild>::PLURAL;
    match items {
        None => {
            let mut result = ValidationResult::success();
            result.add_field_error(field, "is required");
            result
        }
        Some(items) => {
            let mut result = ValidationRules::validate_list_size(items, field, Some(1), None);
            result.merge(validate_each(items, field));
            result
        }
    }
}

/// Convert every element of an already validated list into drafts.
pub fn into_drafts<I: ChildInput>(
    items: Vec<I>,
) -> ApplicationResult<Vec<<I::Child as CityChild>::Draft>> {
    items.into_iter().map(I::into_draft).collect()
}
