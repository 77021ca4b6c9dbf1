//! Company handlers.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use jobdeck_app::api::companies::get_companies;
use jobdeck_app::pages::PostJobPage;
use jobdeck_models::{AddCompanyForm, Company};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::read_file_field;
use crate::state::AppState;

/// `GET /companies` — dropdown data for the post-job screen.
pub async fn list_companies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Company>>> {
    let token = auth
        .shared_session()
        .access_token()
        .await
        .map_err(ApiError::from)?;
    let companies = get_companies(&state.db, &token)
        .await
        .map_err(|e| ApiError::Action(std::sync::Arc::new(e)))?;
    Ok(Json(companies))
}

/// `POST /companies` — add a company with its logo (recruiter only).
pub async fn add_company(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut name: Option<String> = None;
    let mut logo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                )
            }
            "logo" => logo = Some(read_file_field(field).await?),
            _ => {}
        }
    }

    let form = AddCompanyForm {
        name: name.ok_or_else(|| ApiError::bad_request("Company name is required"))?,
        logo: logo.ok_or_else(|| ApiError::bad_request("Logo file is required"))?,
    };

    let page = PostJobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone());
    let company = page.add_company(&auth.profile(), form).await?;
    Ok((StatusCode::CREATED, Json(company)).into_response())
}
