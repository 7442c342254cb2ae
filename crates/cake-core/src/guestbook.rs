// Guestbook records, the local cache of sent wishes, and the proxy reply.

use crate::error::GuestbookError;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const FORM_NAME: &str = "wishes";
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    /// RFC 3339 / ISO 8601 UTC timestamp.
    #[serde(default)]
    pub timestamp: String,
}

impl Wish {
    /// Sender to display; blank names read as anonymous.
    pub fn sender(&self) -> &str {
        if self.name.trim().is_empty() {
            ANONYMOUS
        } else {
            &self.name
        }
    }
}

// Older pages stored bare message strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredWish {
    Record(Wish),
    Legacy(String),
}

impl From<StoredWish> for Wish {
    fn from(stored: StoredWish) -> Self {
        match stored {
            StoredWish::Record(w) => w,
            StoredWish::Legacy(message) => Wish {
                name: String::new(),
                message,
                timestamp: String::new(),
            },
        }
    }
}

/// A validated wish that has not been confirmed by the backend yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WishDraft {
    name: String,
    message: String,
}

impl WishDraft {
    pub fn new(name: &str, message: &str) -> Result<Self, GuestbookError> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(GuestbookError::MissingField);
        }
        Ok(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Form fields in submission order, ready for URL encoding.
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("form-name", FORM_NAME),
            ("name", &self.name),
            ("message", &self.message),
        ]
    }
}

/// Ordered list of wishes this browser has successfully sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WishCache {
    wishes: Vec<Wish>,
}

impl WishCache {
    /// Decode the persisted JSON; a missing entry is an empty cache.
    pub fn decode(json: Option<&str>) -> Result<Self, GuestbookError> {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            return Ok(Self::default());
        };
        let stored: Vec<StoredWish> = serde_json::from_str(json)?;
        Ok(Self {
            wishes: stored.into_iter().map(Wish::from).collect(),
        })
    }

    pub fn encode(&self) -> Result<String, GuestbookError> {
        Ok(serde_json::to_string(&self.wishes)?)
    }

    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    pub fn len(&self) -> usize {
        self.wishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishes.is_empty()
    }

    /// Second phase of a submission: `status` is the backend's reply to the
    /// POST of `draft`. Only a 2xx records the wish; anything else leaves the
    /// cache untouched.
    pub fn settle(
        &mut self,
        draft: WishDraft,
        status: u16,
        timestamp: String,
    ) -> Result<&Wish, GuestbookError> {
        if !(200..=299).contains(&status) {
            return Err(GuestbookError::Status(status));
        }
        Ok(self.commit(draft, timestamp))
    }

    /// Record a draft the backend accepted.
    pub fn commit(&mut self, draft: WishDraft, timestamp: String) -> &Wish {
        self.wishes.push(Wish {
            name: draft.name,
            message: draft.message,
            timestamp,
        });
        &self.wishes[self.wishes.len() - 1]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProxyReply {
    Wishes(Vec<Wish>),
    Failure { error: String },
}

/// Interpret a reply from the wishes retrieval endpoint. Successful replies
/// come back sorted newest first.
pub fn parse_proxy_reply(status: u16, body: &str) -> Result<Vec<Wish>, GuestbookError> {
    let reply = serde_json::from_str::<ProxyReply>(body);
    match (status, reply) {
        (_, Ok(ProxyReply::Failure { error })) => Err(GuestbookError::Upstream(error)),
        (200..=299, Ok(ProxyReply::Wishes(mut wishes))) => {
            sort_newest_first(&mut wishes);
            Ok(wishes)
        }
        (200..=299, Err(e)) => Err(GuestbookError::Reply(e)),
        (status, _) => Err(GuestbookError::Status(status)),
    }
}

/// ISO 8601 UTC timestamps of equal precision order lexicographically.
pub fn sort_newest_first(wishes: &mut [Wish]) {
    wishes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

pub const BUBBLE_PALETTES: [&str; 4] = [
    "bg-pink-100 text-pink-800 border-pink-200",
    "bg-purple-100 text-purple-800 border-purple-200",
    "bg-blue-100 text-blue-800 border-blue-200",
    "bg-yellow-100 text-yellow-800 border-yellow-200",
];

/// Per-bubble decoration; purely for visual variety.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleStyle {
    pub palette: &'static str,
    /// Degrees, in [-3, 3).
    pub rotation_deg: f32,
}

impl BubbleStyle {
    pub fn pick<R: Rng>(rng: &mut R) -> Self {
        Self {
            palette: BUBBLE_PALETTES[rng.gen_range(0..BUBBLE_PALETTES.len())],
            rotation_deg: rng.gen::<f32>() * 6.0 - 3.0,
        }
    }
}
