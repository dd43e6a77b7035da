use edunexia_core::{ApiEnvelope, Profile, PROFILE_ENDPOINT};

use crate::modules::http::{ApiClient, ApiError};

pub(crate) async fn get_profile(api: &ApiClient) -> Result<ApiEnvelope<Profile>, ApiError> {
    api.get_json(PROFILE_ENDPOINT).await
}
