// handlers/public/auth/register.rs - POST /auth/register handler

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;

use crate::app::AppState;
use crate::auth::Registration;
use crate::database::models::AccountView;
use crate::error::ApiError;

/// Registration payload. Field names follow the established client wire
/// format (camelCase, `userName`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub contact_number: String,
    pub mobile_number: String,
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub concerning_person_name: String,
    #[serde(default)]
    pub website: Option<String>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let required = [
            ("userName", &self.user_name),
            ("email", &self.email),
            ("password", &self.password),
            ("contactNumber", &self.contact_number),
            ("mobileNumber", &self.mobile_number),
            ("companyName", &self.company_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("concerningPersonName", &self.concerning_person_name),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::bad_request(format!("Missing required field: {}", name)));
            }
        }
        Ok(())
    }
}

/// POST /auth/register - Create a new partner account
///
/// The first account ever registered becomes an auto-approved admin;
/// every later account is created unapproved and waits in the admin
/// approval queue. Responds 201 with the created account (hash omitted)
/// or 409 when the username, email or a contact number is taken.
pub async fn register_post(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    body.validate()?;

    let account = state
        .auth
        .register(Registration {
            username: body.user_name,
            email: body.email,
            contact_number: body.contact_number,
            mobile_number: body.mobile_number,
            password: body.password,
            company_name: body.company_name,
            address: body.address,
            city: body.city,
            state: body.state,
            concerning_person: body.concerning_person_name,
            website: body.website,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountView::from(&account))))
}
