/// Address endpoints
///
/// Addresses hang off a contact, so every operation first verifies that the
/// path's contact belongs to the authenticated user; only then does the
/// address statement run, scoped to that contact. Both failure modes are a
/// 404: "Contact not found" when the parent probe fails, "Address not
/// found" when the address statement matches nothing.
///
/// # Endpoints
///
/// - `POST   /api/contacts/:contact_id/addresses` - Create an address
/// - `GET    /api/contacts/:contact_id/addresses` - List addresses
/// - `GET    /api/contacts/:contact_id/addresses/:address_id`
/// - `PUT    /api/contacts/:contact_id/addresses/:address_id`
/// - `DELETE /api/contacts/:contact_id/addresses/:address_id`

use crate::{
    app::AppState,
    error::{validate_request, ApiError, ApiResult},
    middleware::auth::CurrentUser,
    response::Data,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rolodex_shared::models::address::{Address, CreateAddress, UpdateAddress};
use rolodex_shared::models::contact::Contact;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create address request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAddressRequest {
    #[validate(length(max = 255, message = "street must be at most 255 characters"))]
    pub street: Option<String>,

    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 100, message = "province must be at most 100 characters"))]
    pub province: Option<String>,

    #[validate(length(min = 1, max = 100, message = "country must be 1-100 characters"))]
    pub country: String,

    #[validate(length(min = 1, max = 10, message = "postal_code must be 1-10 characters"))]
    pub postal_code: String,
}

/// Update address request
///
/// The target id comes from the path; the body overwrites all five fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAddressRequest {
    #[validate(length(max = 255, message = "street must be at most 255 characters"))]
    pub street: Option<String>,

    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 100, message = "province must be at most 100 characters"))]
    pub province: Option<String>,

    #[validate(length(min = 1, max = 100, message = "country must be 1-100 characters"))]
    pub country: String,

    #[validate(length(min = 1, max = 10, message = "postal_code must be 1-10 characters"))]
    pub postal_code: String,
}

/// Public projection of an address
///
/// The contact foreign key is internal and never returned.
#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

/// Create an address under a contact
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: The contact does not exist under this user
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(contact_id): Path<i64>,
    Json(req): Json<CreateAddressRequest>,
) -> ApiResult<Json<Data<AddressResponse>>> {
    check_contact_must_exist(&state, &user.username, contact_id).await?;
    validate_request(&req)?;

    let address = Address::create(
        &state.db,
        contact_id,
        CreateAddress {
            street: req.street,
            city: req.city,
            province: req.province,
            country: req.country,
            postal_code: req.postal_code,
        },
    )
    .await?;

    Ok(Data::new(AddressResponse::from(address)))
}

/// Fetch one address by id
///
/// # Errors
///
/// - `404 Not Found`: The contact or the address does not exist under this
///   user
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((contact_id, address_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Data<AddressResponse>>> {
    check_contact_must_exist(&state, &user.username, contact_id).await?;

    let address = Address::find_by_id(&state.db, contact_id, address_id)
        .await?
        .ok_or_else(address_not_found)?;

    Ok(Data::new(AddressResponse::from(address)))
}

/// Overwrite an address's fields
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: The contact or the address does not exist under this
///   user
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((contact_id, address_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateAddressRequest>,
) -> ApiResult<Json<Data<AddressResponse>>> {
    check_contact_must_exist(&state, &user.username, contact_id).await?;
    validate_request(&req)?;

    let address = Address::update(
        &state.db,
        contact_id,
        address_id,
        UpdateAddress {
            street: req.street,
            city: req.city,
            province: req.province,
            country: req.country,
            postal_code: req.postal_code,
        },
    )
    .await?
    .ok_or_else(address_not_found)?;

    Ok(Data::new(AddressResponse::from(address)))
}

/// Delete an address
///
/// # Errors
///
/// - `404 Not Found`: The contact or the address does not exist under this
///   user
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((contact_id, address_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Data<&'static str>>> {
    check_contact_must_exist(&state, &user.username, contact_id).await?;

    let deleted = Address::delete(&state.db, contact_id, address_id).await?;
    if !deleted {
        return Err(address_not_found());
    }

    Ok(Data::new("OK"))
}

/// List all addresses under a contact
///
/// # Errors
///
/// - `404 Not Found`: The contact does not exist under this user
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(contact_id): Path<i64>,
) -> ApiResult<Json<Data<Vec<AddressResponse>>>> {
    check_contact_must_exist(&state, &user.username, contact_id).await?;

    let addresses = Address::list_by_contact(&state.db, contact_id).await?;

    Ok(Data::new(
        addresses.into_iter().map(AddressResponse::from).collect(),
    ))
}

/// Parent-ownership probe: the contact must exist under the given owner
///
/// An owner-scoped count of exactly 1 proves both existence and ownership
/// in a single round-trip.
async fn check_contact_must_exist(
    state: &AppState,
    owner: &str,
    contact_id: i64,
) -> Result<(), ApiError> {
    if !Contact::exists(&state.db, owner, contact_id).await? {
        return Err(ApiError::NotFound("Contact not found".to_string()));
    }

    Ok(())
}

fn address_not_found() -> ApiError {
    ApiError::NotFound("Address not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_valid() {
        let req = CreateAddressRequest {
            street: Some("Jalan Test".to_string()),
            city: Some("Jakarta".to_string()),
            province: Some("DKI Jakarta".to_string()),
            country: "Indonesia".to_string(),
            postal_code: "12345".to_string(),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_optional_fields_may_be_absent() {
        let req = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: "Indonesia".to_string(),
            postal_code: "12345".to_string(),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_country() {
        let req = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: String::new(),
            postal_code: "12345".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_overlong_postal_code() {
        let req = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: "Indonesia".to_string(),
            postal_code: "0".repeat(11),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_address_response_excludes_contact_id() {
        let address = Address {
            id: 3,
            contact_id: 9,
            street: None,
            city: None,
            province: None,
            country: "Indonesia".to_string(),
            postal_code: "12345".to_string(),
        };

        let json = serde_json::to_value(AddressResponse::from(address)).unwrap();
        assert!(json.get("contact_id").is_none());
        assert_eq!(json["id"], 3);
    }
}
