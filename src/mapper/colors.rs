use crate::api::dto::colors::ColorResponse;
use crate::repos::color_repo::BgColorRow;

pub fn color_to_response(row: BgColorRow) -> ColorResponse {
    ColorResponse {
        bg_color_id: row.bg_color_id,
        color_name: row.color_name,
        hex_code: row.hex_code,
    }
}

pub fn colors_to_responses(rows: Vec<BgColorRow>) -> Vec<ColorResponse> {
    rows.into_iter().map(color_to_response).collect()
}
