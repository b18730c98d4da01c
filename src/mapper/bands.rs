use crate::api::dto::bands::{BandPatchDto, BandPostDto, BandResponse};
use crate::repos::band_repo::{BandChanges, BandRow, BandStatus, NewBand};

/// New bands start active and belong to `member_id`.
pub fn band_post_to_new_band(dto: BandPostDto, join_pass_hash: String, member_id: i64) -> NewBand {
    NewBand {
        school: dto.school.trim().to_string(),
        school_code: dto.school_code,
        grade: dto.grade,
        ban_number: dto.ban_number,
        username: dto.username.trim().to_string(),
        join_pass_hash,
        status: BandStatus::BandActive,
        member_id,
    }
}

pub fn band_patch_to_changes(dto: BandPatchDto, join_pass_hash: Option<String>) -> BandChanges {
    BandChanges {
        school: dto.school.map(|s| s.trim().to_string()),
        school_code: dto.school_code,
        grade: dto.grade,
        ban_number: dto.ban_number,
        join_pass_hash,
        status: dto.status_update,
    }
}

pub fn band_to_response(row: BandRow) -> BandResponse {
    BandResponse {
        band_id: row.band_id,
        school: row.school,
        school_code: row.school_code,
        grade: row.grade,
        ban_number: row.ban_number,
        username: row.username,
        status: row.status.name().to_string(),
        member_id: row.member_id,
        created_at: row.created_at,
        modified_at: row.modified_at,
    }
}
