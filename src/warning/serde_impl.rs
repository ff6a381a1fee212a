//! Serde support for warnings (feature-gated)
//!
//! Every warning serializes as its bare message string. [`Message`] also
//! deserializes from a string.
//!
//! ```rust,ignore
//! let w = ripple::warning::new("careful");
//! assert_eq!(serde_json::to_string(&*w).unwrap(), r#""careful""#);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Message, Warning};

impl Serialize for dyn Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Message::new)
    }
}
