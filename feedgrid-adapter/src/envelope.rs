//! JSON wire format of the list endpoint.
//!
//! ```json
//! { "code": 0, "message": "ok", "data": { "list": [ ... ], "hasMore": true } }
//! ```
//!
//! A non-zero `code` is a rejected request even when the body is otherwise well-formed.

use feedgrid::{FetchError, Item, Page};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub list: Vec<WireItem>,
    pub has_more: bool,
}

/// One card as the list endpoint sends it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireItem {
    pub id: String,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub alt: String,
    pub author: String,
    #[serde(default)]
    pub avatar: String,
    pub category: String,
    /// Preparation time in minutes. Sent as a string by some servers.
    pub time: Minutes,
    pub likes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Minutes {
    Number(u32),
    Text(String),
}

impl Minutes {
    fn parse(&self) -> Result<u32, FetchError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| FetchError::Decode(format!("invalid time value {s:?}"))),
        }
    }
}

impl WireItem {
    pub fn into_item(self) -> Result<Item, FetchError> {
        let minutes = self.time.parse()?;
        Ok(Item {
            id: self.id,
            title: self.title,
            image_url: self.image,
            author_name: self.author,
            category: self.category,
            estimated_duration_minutes: minutes,
            popularity_score: self.likes,
        })
    }

    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            image: item.image_url.clone(),
            alt: item.title.clone(),
            author: item.author_name.clone(),
            avatar: String::new(),
            category: item.category.clone(),
            time: Minutes::Text(item.estimated_duration_minutes.to_string()),
            likes: item.popularity_score,
        }
    }
}

/// Decodes a list-endpoint response body into page `page_number`.
pub fn decode_page(page_number: u32, body: &[u8]) -> Result<Page, FetchError> {
    let envelope: Envelope<PageData> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if envelope.code != 0 {
        return Err(FetchError::Rejected {
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
        });
    }
    let data = envelope
        .data
        .ok_or_else(|| FetchError::Decode("missing `data`".to_owned()))?;

    let items = data
        .list
        .into_iter()
        .map(WireItem::into_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page {
        page_number,
        items,
        has_more: data.has_more,
    })
}

/// Encodes a successful response body for `page`.
pub fn encode_page(page: &Page) -> Result<Vec<u8>, FetchError> {
    let envelope = Envelope {
        code: 0,
        message: None,
        data: Some(PageData {
            list: page.items.iter().map(WireItem::from_item).collect(),
            has_more: page.has_more,
        }),
    };
    serde_json::to_vec(&envelope).map_err(|e| FetchError::Transport(e.to_string()))
}
