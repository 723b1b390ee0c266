use super::{PageQuery, Paging, Track};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{EmptyResponse, Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: DateTime<Utc>,
    pub track: Track,
}

/// Comma-separated id list used by the save/remove endpoints
#[derive(Debug, Clone, Serialize)]
pub struct IdsQuery {
    pub ids: String,
}

impl IdsQuery {
    fn new(ids: &[String]) -> Self {
        Self { ids: ids.join(",") }
    }
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListSavedTracks {
    page: PageQuery,
}

impl ListSavedTracks {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page.limit: u32);
    setter!(page.offset: u32);
}

impl Request for ListSavedTracks {
    type Data = PageQuery;
    type Response = Paging<SavedTrack>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/tracks".into()
    }

    fn data(&self) -> RequestData<&PageQuery> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct SaveTracks {
    query: IdsQuery,
}

impl SaveTracks {
    pub fn new(ids: &[String]) -> Self {
        Self {
            query: IdsQuery::new(ids),
        }
    }
}

impl Request for SaveTracks {
    type Data = IdsQuery;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/tracks".into()
    }

    fn data(&self) -> RequestData<&IdsQuery> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveSavedTracks {
    query: IdsQuery,
}

impl RemoveSavedTracks {
    pub fn new(ids: &[String]) -> Self {
        Self {
            query: IdsQuery::new(ids),
        }
    }
}

impl Request for RemoveSavedTracks {
    type Data = IdsQuery;
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/tracks".into()
    }

    fn data(&self) -> RequestData<&IdsQuery> {
        RequestData::Query(&self.query)
    }
}

/// One flag per requested id, in request order
#[derive(Debug, Clone)]
pub struct CheckSavedTracks {
    query: IdsQuery,
}

impl CheckSavedTracks {
    pub fn new(ids: &[String]) -> Self {
        Self {
            query: IdsQuery::new(ids),
        }
    }
}

impl Request for CheckSavedTracks {
    type Data = IdsQuery;
    type Response = Vec<bool>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/tracks/contains".into()
    }

    fn data(&self) -> RequestData<&IdsQuery> {
        RequestData::Query(&self.query)
    }
}
