use crate::api::dto::mentions::{MentionPostDto, MentionResponse};
use crate::repos::mention_repo::{MentionRow, NewMention};

pub fn mention_post_to_new_mention(dto: MentionPostDto) -> NewMention {
    NewMention {
        comment_id: dto.comment_id,
        member_id: dto.member_id,
    }
}

pub fn mention_to_response(row: MentionRow) -> MentionResponse {
    MentionResponse {
        mention_id: row.mention_id,
        comment_id: row.comment_id,
        member_id: row.member_id,
        member_name: row.member_name,
        created_at: row.created_at,
    }
}
