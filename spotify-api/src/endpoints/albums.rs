use super::{PageQuery, Paging, Track};
use crate::macros::setter;
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

/// Tracks of one album. Items carry no `album` of their own.
#[derive(Debug, Clone)]
pub struct ListAlbumTracks {
    album_id: String,
    page: PageQuery,
}

impl ListAlbumTracks {
    pub fn new(album_id: impl Into<String>) -> Self {
        Self {
            album_id: album_id.into(),
            page: PageQuery::default(),
        }
    }

    setter!(page.limit: u32);
    setter!(page.offset: u32);
}

impl Request for ListAlbumTracks {
    type Data = PageQuery;
    type Response = Paging<Track>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/albums/{}/tracks", self.album_id).into()
    }

    fn data(&self) -> RequestData<&PageQuery> {
        RequestData::Query(&self.page)
    }
}
