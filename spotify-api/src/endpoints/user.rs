use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::Request;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
    pub country: Option<String>,
    /// `premium` is required for playback control
    pub product: Option<String>,
}

impl CurrentUser {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn is_premium(&self) -> bool {
        self.product.as_deref() == Some("premium")
    }
}

#[derive(Default, Debug, Clone)]
pub struct GetCurrentUser;

impl Request for GetCurrentUser {
    type Data = ();
    type Response = CurrentUser;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me".into()
    }
}
