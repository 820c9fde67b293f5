use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;

/// Typed view of a VisaNet response body.
///
/// Only the fields that drive classification are typed; everything else stays in
/// [`ParsedResponse::raw`] whatever its JSON type. Every field besides `errorCode` may be
/// missing or `null`, and both collapse to `None`. Blank strings are kept as-is here; use
/// the `*_text` accessors to treat them as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub error_code: i64,
    pub error_message: Option<String>,
    pub data: Option<ResponseData>,
}

/// The `data` block. Field names are the gateway's own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseData {
    #[serde(rename = "DSC_COD_ACCION")]
    pub action_description: Option<String>,
    #[serde(rename = "ID_UNICO")]
    pub transaction_id: Option<String>,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    pub fn error_message_text(&self) -> Option<&str> {
        non_blank(self.error_message.as_deref())
    }

    pub fn action_description_text(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| non_blank(data.action_description.as_deref()))
    }

    pub fn transaction_id_text(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| non_blank(data.transaction_id.as_deref()))
    }
}

/// A parsed response body: the typed view plus the untouched JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub fields: GatewayResponse,
    pub raw: Value,
}

impl ParsedResponse {
    pub fn parse(body: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(body.trim())?;
        let fields = GatewayResponse::deserialize(&raw)?;
        Ok(Self { fields, raw })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
