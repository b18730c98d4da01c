use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorResponse {
    pub bg_color_id: i64,
    pub color_name: String,
    pub hex_code: String,
}
