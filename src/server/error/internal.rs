use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enumeration column holds a label this build does not know.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown value '{value}' stored in column {column}")]
    UnknownStoredValue {
        /// Column that held the value
        column: &'static str,
        /// The stored label
        value: String,
    },

    /// A JSON column could not be decoded into its domain shape.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to decode JSON column {column}: {source}")]
    CorruptJson {
        /// Column that held the document
        column: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A domain value could not be encoded for its JSON column.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to encode JSON column {column}: {source}")]
    JsonEncode {
        /// Column the document was meant for
        column: &'static str,
        /// The underlying encode error
        #[source]
        source: serde_json::Error,
    },
}
