/// Contact endpoints
///
/// All endpoints require a session token and operate only on contacts owned
/// by the authenticated user. A contact id that exists under another user
/// yields the same 404 as an id that does not exist at all.
///
/// # Endpoints
///
/// - `POST   /api/contacts` - Create a contact
/// - `GET    /api/contacts` - Search own contacts with paging
/// - `GET    /api/contacts/:contact_id` - Fetch one contact
/// - `PUT    /api/contacts/:contact_id` - Overwrite a contact
/// - `DELETE /api/contacts/:contact_id` - Delete a contact

use crate::{
    app::AppState,
    error::{validate_request, ApiError, ApiResult},
    middleware::auth::CurrentUser,
    response::Data,
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rolodex_shared::models::contact::{Contact, ContactFilter, CreateContact, UpdateContact};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create contact request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 100, message = "first_name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(max = 100, message = "last_name must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 200, message = "email must be at most 200 characters")
    )]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Update contact request
///
/// The target id comes from the path; the body overwrites all four mutable
/// fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, max = 100, message = "first_name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(max = 100, message = "last_name must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 200, message = "email must be at most 200 characters")
    )]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Search query parameters
///
/// `name` matches either first or last name as a substring; `email` and
/// `phone` match as substrings of their columns.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchContactsQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,

    /// Page size
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "size must be between 1 and 100"))]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// Public projection of a contact
///
/// The owning username is internal and never returned.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// Paging block of a search response
#[derive(Debug, Serialize)]
pub struct Paging {
    pub page: i64,
    pub total_page: i64,
    pub total_item: i64,
}

/// Search response: one page of contacts plus paging arithmetic
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub data: Vec<ContactResponse>,
    pub paging: Paging,
}

/// Create a contact owned by the authenticated user
///
/// # Endpoint
///
/// ```text
/// POST /api/contacts
/// Authorization: <token>
/// Content-Type: application/json
///
/// {
///   "first_name": "test",
///   "last_name": "test",
///   "email": "test@mail.com",
///   "phone": "08090000000"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateContactRequest>,
) -> ApiResult<Json<Data<ContactResponse>>> {
    validate_request(&req)?;

    let contact = Contact::create(
        &state.db,
        &user.username,
        CreateContact {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        },
    )
    .await?;

    Ok(Data::new(ContactResponse::from(contact)))
}

/// Fetch one contact by id
///
/// # Errors
///
/// - `404 Not Found`: No such contact under this user
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(contact_id): Path<i64>,
) -> ApiResult<Json<Data<ContactResponse>>> {
    let contact = Contact::find_by_id(&state.db, &user.username, contact_id)
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(Data::new(ContactResponse::from(contact)))
}

/// Overwrite a contact's fields
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: No such contact under this user
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(contact_id): Path<i64>,
    Json(req): Json<UpdateContactRequest>,
) -> ApiResult<Json<Data<ContactResponse>>> {
    validate_request(&req)?;

    let contact = Contact::update(
        &state.db,
        &user.username,
        contact_id,
        UpdateContact {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        },
    )
    .await?
    .ok_or_else(contact_not_found)?;

    Ok(Data::new(ContactResponse::from(contact)))
}

/// Delete a contact (and, via the schema, its addresses)
///
/// # Errors
///
/// - `404 Not Found`: No such contact under this user
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(contact_id): Path<i64>,
) -> ApiResult<Json<Data<&'static str>>> {
    let deleted = Contact::delete(&state.db, &user.username, contact_id).await?;
    if !deleted {
        return Err(contact_not_found());
    }

    Ok(Data::new("OK"))
}

/// Search the user's contacts
///
/// # Endpoint
///
/// ```text
/// GET /api/contacts?name=test&page=2&size=10
/// Authorization: <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "data": [ ... ],
///   "paging": { "page": 2, "total_page": 2, "total_item": 15 }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: page or size out of range
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SearchContactsQuery>,
) -> ApiResult<Json<ContactListResponse>> {
    validate_request(&query)?;

    let filter = ContactFilter {
        name: query.name,
        email: query.email,
        phone: query.phone,
    };

    let (contacts, total_item) =
        Contact::search(&state.db, &user.username, &filter, query.page, query.size).await?;

    let total_page = if total_item == 0 {
        0
    } else {
        (total_item + query.size - 1) / query.size
    };

    Ok(Json(ContactListResponse {
        data: contacts.into_iter().map(ContactResponse::from).collect(),
        paging: Paging {
            page: query.page,
            total_page,
            total_item,
        },
    }))
}

fn contact_not_found() -> ApiError {
    ApiError::NotFound("Contact not found".to_string())
}
