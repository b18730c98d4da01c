use crate::api::dto::{
    colors::ColorResponse,
    members::{MemberPatchDto, MemberPostDto, MemberResponse},
};
use crate::repos::member_repo::{MemberChanges, MemberRow, NewMember};
use crate::services::auth::{AuthorityUtils, Role};

/// Email is trimmed and lowercased so login lookups are case-insensitive.
pub fn member_post_to_new_member(
    dto: MemberPostDto,
    password_hash: String,
    roles: &[Role],
) -> NewMember {
    NewMember {
        email: dto.email.trim().to_ascii_lowercase(),
        password_hash,
        name: dto.name.trim().to_string(),
        mbti: dto.mbti.map(|m| m.to_ascii_uppercase()),
        interesting: dto.interesting.map(|i| i.trim().to_string()),
        bg_color_id: dto.bg_color_id,
        roles: AuthorityUtils::role_names(roles),
    }
}

/// `password_hash` is the already-hashed `dto.password`, if one was sent.
pub fn member_patch_to_changes(dto: MemberPatchDto, password_hash: Option<String>) -> MemberChanges {
    MemberChanges {
        name: dto.name.map(|n| n.trim().to_string()),
        password_hash,
        mbti: dto.mbti.map(|m| m.to_ascii_uppercase()),
        interesting: dto.interesting.map(|i| i.trim().to_string()),
        bg_color_id: dto.bg_color_id,
    }
}

pub fn member_to_response(row: MemberRow) -> MemberResponse {
    // only a fully joined color is exposed
    let bg_color = match (row.bg_color_id, row.color_name, row.hex_code) {
        (Some(bg_color_id), Some(color_name), Some(hex_code)) => Some(ColorResponse {
            bg_color_id,
            color_name,
            hex_code,
        }),
        _ => None,
    };

    MemberResponse {
        member_id: row.member_id,
        email: row.email,
        name: row.name,
        mbti: row.mbti,
        interesting: row.interesting,
        bg_color,
        roles: row.roles,
        created_at: row.created_at,
        modified_at: row.modified_at,
    }
}
