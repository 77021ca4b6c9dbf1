//! Wrappers over the `companies` table.

use jobdeck_auth::AccessToken;
use jobdeck_models::{AddCompanyForm, Company, NewCompany};
use jobdeck_storage::{object_key, Bucket, StorageClient};
use jobdeck_supabase::PostgrestClient;

use crate::error::{ApiCallError, ApiCallResult};

const COMPANIES: &str = "companies";

/// All companies.
pub async fn get_companies(
    db: &PostgrestClient,
    token: &AccessToken,
) -> ApiCallResult<Vec<Company>> {
    Ok(db.select(token, COMPANIES, "*", &[]).await?)
}

/// Upload the logo, then insert the company pointing at its public URL.
pub async fn add_new_company(
    db: &PostgrestClient,
    storage: &StorageClient,
    token: &AccessToken,
    input: &AddCompanyForm,
) -> ApiCallResult<Company> {
    let key = object_key("logo", &input.name);

    storage
        .upload(
            token,
            Bucket::CompanyLogo,
            &key,
            input.logo.bytes.clone(),
            &input.logo.content_type,
        )
        .await
        .map_err(|e| ApiCallError::upload("Error uploading Company Logo", e))?;

    let logo_url = storage.public_url(Bucket::CompanyLogo, &key);

    let rows: Vec<Company> = db
        .insert(
            token,
            COMPANIES,
            &[NewCompany {
                name: input.name.clone(),
                logo_url,
            }],
        )
        .await
        .map_err(|e| ApiCallError::mutation("Error submitting Company", e))?;

    rows.into_iter()
        .next()
        .ok_or(ApiCallError::mutation_empty("Error submitting Company"))
}
